//! Assignment Gateway: remote data service access for the course assignment workflow
//!
//! This crate owns the contract the workflow needs from the remote service
//! (student lookup, health check, recommendation ranking, course listing and
//! assignment registration) and two implementations of it:
//!
//! - [`HttpGateway`]: JSON over HTTP via reqwest
//! - [`fakes::ScriptedGateway`]: scripted in-memory answers for tests
//!
//! Responses are handed back raw; shaping them is the caller's job.

pub mod error;
pub mod fakes;
pub mod gateway;
pub mod http;

pub use error::GatewayError;
pub use gateway::{AssignmentGateway, AssignmentRequest, GatewayResult, RawPayload};
pub use http::{GatewayConfig, HttpGateway, DEFAULT_GATEWAY_URL};
