//! HTTP gateway client
//!
//! Talks JSON to the assignment service:
//!
//! | operation             | request                                   |
//! |-----------------------|-------------------------------------------|
//! | `health_check`        | `GET  {base}/health`                      |
//! | `get_student`         | `GET  {base}/estudiantes/{name}`          |
//! | `get_recommendations` | `GET  {base}/recomendaciones/{name}?limite=N` |
//! | `list_courses`        | `GET  {base}/cursos?estudiante={name}`    |
//! | `register_assignment` | `POST {base}/aprobaciones`                |

use std::time::Duration;

use async_trait::async_trait;
use reqwest::{Response, StatusCode, Url};
use serde::{Deserialize, Serialize};
use tracing::{debug, info};

use crate::error::GatewayError;
use crate::gateway::{AssignmentGateway, AssignmentRequest, GatewayResult, RawPayload};

/// Service URL used when `ASSIGNMENT_GATEWAY_URL` is not set
pub const DEFAULT_GATEWAY_URL: &str = "http://localhost:8000";

const DEFAULT_TIMEOUT_SECS: u64 = 10;

/// Gateway connection settings
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct GatewayConfig {
    /// Base URL of the assignment service
    pub base_url: String,
    /// Per-request timeout in seconds
    pub timeout_secs: u64,
}

impl Default for GatewayConfig {
    fn default() -> Self {
        GatewayConfig {
            base_url: DEFAULT_GATEWAY_URL.to_string(),
            timeout_secs: DEFAULT_TIMEOUT_SECS,
        }
    }
}

impl GatewayConfig {
    /// Defaults overlaid with `ASSIGNMENT_GATEWAY_URL` and
    /// `ASSIGNMENT_GATEWAY_TIMEOUT_SECS`. Unparseable values are ignored.
    pub fn from_env() -> Self {
        let mut config = Self::default();
        if let Ok(url) = std::env::var("ASSIGNMENT_GATEWAY_URL") {
            config.base_url = url;
        }
        if let Some(secs) = std::env::var("ASSIGNMENT_GATEWAY_TIMEOUT_SECS")
            .ok()
            .and_then(|v| v.parse().ok())
        {
            config.timeout_secs = secs;
        }
        config
    }

    /// Create config for a specific service URL
    pub fn new(base_url: &str) -> Self {
        GatewayConfig {
            base_url: base_url.to_string(),
            ..Self::default()
        }
    }

    /// Set the per-request timeout
    pub fn with_timeout_secs(mut self, secs: u64) -> Self {
        self.timeout_secs = secs;
        self
    }

    pub fn timeout(&self) -> Duration {
        Duration::from_secs(self.timeout_secs)
    }
}

/// reqwest-backed implementation of [`AssignmentGateway`]
#[derive(Debug, Clone)]
pub struct HttpGateway {
    base_url: Url,
    http_client: reqwest::Client,
}

impl HttpGateway {
    /// Create a new client
    pub fn new(config: GatewayConfig) -> GatewayResult<Self> {
        let base_url = Url::parse(&config.base_url)
            .map_err(|e| GatewayError::InvalidUrl(format!("{}: {e}", config.base_url)))?;
        if base_url.cannot_be_a_base() {
            return Err(GatewayError::InvalidUrl(config.base_url));
        }

        let http_client = reqwest::Client::builder()
            .user_agent(concat!("assignment-gateway/", env!("CARGO_PKG_VERSION")))
            .timeout(config.timeout())
            .build()
            .map_err(|e| GatewayError::ClientSetup(e.to_string()))?;

        Ok(HttpGateway {
            base_url,
            http_client,
        })
    }

    /// Create client from environment variables
    pub fn from_env() -> GatewayResult<Self> {
        Self::new(GatewayConfig::from_env())
    }

    pub fn base_url(&self) -> &Url {
        &self.base_url
    }

    fn endpoint(&self, segments: &[&str]) -> GatewayResult<Url> {
        let mut url = self.base_url.clone();
        url.path_segments_mut()
            .map_err(|_| GatewayError::InvalidUrl(self.base_url.to_string()))?
            .pop_if_empty()
            .extend(segments);
        Ok(url)
    }

    async fn get_json(&self, url: Url) -> GatewayResult<RawPayload> {
        debug!(%url, "GET");
        let response = self.http_client.get(url).send().await?;
        let response = ensure_success(response).await?;
        let value = response
            .json::<serde_json::Value>()
            .await
            .map_err(|e| GatewayError::Decode(e.to_string()))?;
        Ok(RawPayload(value))
    }
}

#[async_trait]
impl AssignmentGateway for HttpGateway {
    async fn get_student(&self, name: &str) -> GatewayResult<Option<RawPayload>> {
        let url = self.endpoint(&["estudiantes", name])?;
        debug!(%url, "GET");
        let response = self.http_client.get(url).send().await?;
        if response.status() == StatusCode::NOT_FOUND {
            info!(student = %name, "student not known to the service");
            return Ok(None);
        }
        let response = ensure_success(response).await?;
        let value = response
            .json::<serde_json::Value>()
            .await
            .map_err(|e| GatewayError::Decode(e.to_string()))?;
        if value.is_null() {
            return Ok(None);
        }
        Ok(Some(RawPayload(value)))
    }

    async fn health_check(&self) -> GatewayResult<()> {
        let url = self.endpoint(&["health"])?;
        let response = self.http_client.get(url).send().await?;
        ensure_success(response).await?;
        Ok(())
    }

    async fn get_recommendations(
        &self,
        student_name: &str,
        limit: u32,
    ) -> GatewayResult<RawPayload> {
        let mut url = self.endpoint(&["recomendaciones", student_name])?;
        url.query_pairs_mut()
            .append_pair("limite", &limit.to_string());
        self.get_json(url).await
    }

    async fn list_courses(&self, student_name: &str) -> GatewayResult<RawPayload> {
        let mut url = self.endpoint(&["cursos"])?;
        url.query_pairs_mut().append_pair("estudiante", student_name);
        self.get_json(url).await
    }

    async fn register_assignment(&self, request: &AssignmentRequest) -> GatewayResult<()> {
        let url = self.endpoint(&["aprobaciones"])?;
        info!(
            student = %request.student_name,
            professor = %request.professor_name,
            course = %request.course_code,
            "registering assignment"
        );
        let response = self.http_client.post(url).json(request).send().await?;
        ensure_success(response).await?;
        Ok(())
    }
}

/// Turn a non-2xx response into a [`GatewayError`], keeping the service's
/// reason when it sent one.
async fn ensure_success(response: Response) -> GatewayResult<Response> {
    let status = response.status();
    if status.is_success() {
        return Ok(response);
    }

    let body = response.text().await.unwrap_or_default();
    let message = error_reason(&body)
        .unwrap_or_else(|| status.canonical_reason().unwrap_or("unknown").to_string());

    if status.is_client_error() {
        Err(GatewayError::Rejected(message))
    } else {
        Err(GatewayError::Server {
            status: status.as_u16(),
            message,
        })
    }
}

/// Extract a human-readable reason from an error body: the first of
/// `error`, `detail`, `message` when the body is a JSON object, else the
/// trimmed body itself.
fn error_reason(body: &str) -> Option<String> {
    if let Ok(serde_json::Value::Object(map)) = serde_json::from_str(body) {
        for key in ["error", "detail", "message"] {
            if let Some(serde_json::Value::String(reason)) = map.get(key) {
                return Some(reason.clone());
            }
        }
    }
    let trimmed = body.trim();
    (!trimmed.is_empty()).then(|| trimmed.to_string())
}
