//! Professor selection and assignment confirmation.
//!
//! Assignment status machine:
//!
//! ```text
//!   none ──confirm──▶ pending ──ok──▶ succeeded ──(redirect after delay)
//!                        │
//!   failed ◀────error────┘
//!     └──────confirm───▶ pending
//! ```
//!
//! Selecting only changes the selection, never the status. Confirm without a
//! selection, or while pending, does nothing.

use std::fmt;

use assignment_gateway::{AssignmentGateway, AssignmentRequest};
use chrono::{DateTime, Utc};
use serde::Serialize;
use tokio::task::JoinHandle;
use tracing::{warn, Instrument};

use crate::domain::{self, CommitError, Course, FetchError, NormalizationError, Professor};
use crate::navigation::{NavigationState, Route};
use crate::workflow::screen::{ScreenId, ScreenKind, ScreenState};
use crate::workflow::WorkflowContext;
use crate::{fallback, normalize, obs};

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "status", rename_all = "snake_case")]
pub enum AssignmentStatus {
    /// No confirm attempted yet ("none").
    Idle,
    Pending,
    Succeeded,
    Failed { reason: String },
}

impl AssignmentStatus {
    pub fn label(&self) -> &'static str {
        match self {
            AssignmentStatus::Idle => "none",
            AssignmentStatus::Pending => "pending",
            AssignmentStatus::Succeeded => "succeeded",
            AssignmentStatus::Failed { .. } => "failed",
        }
    }

    pub fn is_terminal(&self) -> bool {
        matches!(
            self,
            AssignmentStatus::Succeeded | AssignmentStatus::Failed { .. }
        )
    }
}

impl fmt::Display for AssignmentStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

/// One confirm attempt in flight.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CommitAttempt {
    pub screen: ScreenId,
    pub attempt: u32,
    pub request: AssignmentRequest,
}

/// Proof of a registered assignment.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct AssignmentReceipt {
    pub student_name: String,
    pub professor_name: String,
    pub course_code: String,
    pub confirmed_at: DateTime<Utc>,
}

impl AssignmentReceipt {
    fn new(request: &AssignmentRequest) -> Self {
        Self {
            student_name: request.student_name.clone(),
            professor_name: request.professor_name.clone(),
            course_code: request.course_code.clone(),
            confirmed_at: Utc::now(),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct SelectionView {
    pub course: Option<Course>,
    pub student_name: String,
    pub professors: Vec<Professor>,
    pub selected_id: Option<String>,
    pub status: AssignmentStatus,
    pub can_confirm: bool,
    pub loading: bool,
    pub error: Option<String>,
}

pub struct SelectionScreen {
    ctx: WorkflowContext,
    state: ScreenState<Vec<Professor>>,
    course_id: String,
    course: Option<Course>,
    student_name: String,
    selected: Option<Professor>,
    status: AssignmentStatus,
    attempts: u32,
    receipt: Option<AssignmentReceipt>,
    redirect: Option<JoinHandle<()>>,
}

impl SelectionScreen {
    /// Mount for `course_id`. Missing navigation state is valid: the session
    /// identity stands in for the student and the route id for the course
    /// code.
    pub fn mount(
        ctx: WorkflowContext,
        course_id: impl Into<String>,
        navigation: Option<NavigationState>,
    ) -> Self {
        let navigation = navigation.unwrap_or_default();
        let student_name = navigation
            .student_name
            .unwrap_or_else(|| ctx.session().student_name().to_string());

        Self {
            state: ScreenState::mount(ScreenKind::ProfessorSelection),
            course_id: course_id.into(),
            course: navigation.course,
            student_name,
            selected: None,
            status: AssignmentStatus::Idle,
            attempts: 0,
            receipt: None,
            redirect: None,
            ctx,
        }
    }

    /// Fetch ranked recommendations for the student.
    pub async fn load(&mut self) {
        let ticket = self.state.begin_fetch();
        let span = obs::screen_span(ScreenKind::ProfessorSelection, &ticket.screen);

        let gateway = self.ctx.gateway();
        let outcome = fetch_professors(
            gateway.as_ref(),
            &self.student_name,
            self.ctx.config().recommendation_limit,
        )
        .instrument(span)
        .await;
        self.state.settle(ticket.tag(outcome), fallback::professors);
    }

    pub fn state(&self) -> &ScreenState<Vec<Professor>> {
        &self.state
    }

    pub fn professors(&self) -> &[Professor] {
        self.state.data().map(Vec::as_slice).unwrap_or(&[])
    }

    pub fn course(&self) -> Option<&Course> {
        self.course.as_ref()
    }

    pub fn student_name(&self) -> &str {
        &self.student_name
    }

    /// Code sent with the assignment: the handed-over course's code, else the
    /// route's course id.
    pub fn course_code(&self) -> &str {
        self.course
            .as_ref()
            .map(|c| c.code.as_str())
            .unwrap_or(&self.course_id)
    }

    pub fn selected(&self) -> Option<&Professor> {
        self.selected.as_ref()
    }

    pub fn is_selected(&self, professor_id: &str) -> bool {
        self.selected.as_ref().is_some_and(|p| p.id == professor_id)
    }

    pub fn status(&self) -> &AssignmentStatus {
        &self.status
    }

    pub fn receipt(&self) -> Option<&AssignmentReceipt> {
        self.receipt.as_ref()
    }

    /// Choose `professor_id`, replacing any earlier choice.
    ///
    /// # Errors
    ///
    /// Refused while loading, while an assignment is pending or after it
    /// succeeded, for unknown ids, and for ids shared by several professors.
    pub fn select(&mut self, professor_id: &str) -> domain::Result<()> {
        if matches!(
            self.status,
            AssignmentStatus::Pending | AssignmentStatus::Succeeded
        ) {
            return Err(domain::WorkflowError::SelectionLocked {
                status: self.status.label(),
            });
        }
        let professors = self.state.data().ok_or(domain::WorkflowError::NotReady)?;
        let professor = domain::find_unique(professors, "professor", professor_id)?.clone();
        self.selected = Some(professor);
        Ok(())
    }

    /// Whether the confirm affordance is enabled.
    pub fn can_confirm(&self) -> bool {
        self.selected.is_some()
            && matches!(
                self.status,
                AssignmentStatus::Idle | AssignmentStatus::Failed { .. }
            )
    }

    /// Enter `pending` and describe the commit to perform.
    ///
    /// Returns `None`, changing nothing, when there is no selection or the
    /// status does not allow a new attempt.
    pub fn begin_confirm(&mut self) -> Option<CommitAttempt> {
        let Some(professor) = self.selected.as_ref() else {
            obs::emit_confirm_ignored("no professor selected");
            return None;
        };
        if !self.can_confirm() {
            obs::emit_confirm_ignored(self.status.label());
            return None;
        }

        let request = AssignmentRequest::new(
            self.student_name.as_str(),
            professor.name.as_str(),
            self.course_code(),
        );
        self.attempts += 1;
        self.transition(AssignmentStatus::Pending);
        Some(CommitAttempt {
            screen: self.state.id(),
            attempt: self.attempts,
            request,
        })
    }

    /// Apply the outcome of `attempt`.
    ///
    /// Success schedules the redirect to the course list. Returns `false`,
    /// changing nothing, for an attempt that is not the one pending on this
    /// screen.
    pub fn finish_confirm(
        &mut self,
        attempt: &CommitAttempt,
        outcome: Result<(), CommitError>,
    ) -> bool {
        if attempt.screen != self.state.id()
            || attempt.attempt != self.attempts
            || self.status != AssignmentStatus::Pending
        {
            obs::emit_confirm_ignored("stale commit outcome");
            return false;
        }

        match outcome {
            Ok(()) => {
                self.receipt = Some(AssignmentReceipt::new(&attempt.request));
                self.transition(AssignmentStatus::Succeeded);
                self.schedule_redirect();
            }
            Err(err) => {
                self.transition(AssignmentStatus::Failed {
                    reason: err.to_string(),
                });
            }
        }
        true
    }

    /// Confirm the current selection against the gateway.
    pub async fn confirm(&mut self) -> AssignmentStatus {
        let Some(attempt) = self.begin_confirm() else {
            return self.status.clone();
        };

        let span = obs::screen_span(ScreenKind::ProfessorSelection, &attempt.screen);
        let gateway = self.ctx.gateway();
        let outcome = gateway
            .register_assignment(&attempt.request)
            .instrument(span)
            .await
            .map_err(CommitError::from);

        self.finish_confirm(&attempt, outcome);
        self.status.clone()
    }

    pub fn snapshot(&self) -> SelectionView {
        SelectionView {
            course: self.course.clone(),
            student_name: self.student_name.clone(),
            professors: self.state.data_or_else(fallback::professors),
            selected_id: self.selected.as_ref().map(|p| p.id.clone()),
            status: self.status.clone(),
            can_confirm: self.can_confirm(),
            loading: self.state.is_loading(),
            error: self.state.error().map(str::to_string),
        }
    }

    fn transition(&mut self, next: AssignmentStatus) {
        obs::emit_assignment_transition(self.status.label(), next.label());
        self.status = next;
    }

    fn schedule_redirect(&mut self) {
        let handle = match tokio::runtime::Handle::try_current() {
            Ok(handle) => handle,
            Err(_) => {
                warn!(event = "redirect.skipped", "no async runtime to schedule the redirect on");
                return;
            }
        };
        if let Some(previous) = self.redirect.take() {
            previous.abort();
        }

        let navigator = self.ctx.navigator();
        let delay = self.ctx.config().redirect_delay();
        obs::emit_redirect_scheduled(self.ctx.config().redirect_delay_ms);
        self.redirect = Some(handle.spawn(async move {
            tokio::time::sleep(delay).await;
            let route = Route::CourseList;
            obs::emit_redirect_fired(&route);
            navigator.navigate(route, None);
        }));
    }
}

impl Drop for SelectionScreen {
    fn drop(&mut self) {
        if let Some(redirect) = self.redirect.take() {
            if !redirect.is_finished() {
                redirect.abort();
                obs::emit_redirect_cancelled();
            }
        }
    }
}

async fn fetch_professors(
    gateway: &dyn AssignmentGateway,
    student_name: &str,
    limit: u32,
) -> Result<Vec<Professor>, FetchError> {
    let raw = gateway.get_recommendations(student_name, limit).await?;
    let professors = normalize::professors(&raw)?;
    if professors.is_empty() {
        return Err(NormalizationError::Empty { kind: "professor" }.into());
    }
    let collisions = domain::duplicate_ids(&professors);
    if !collisions.is_empty() {
        obs::emit_identifier_collision("professor", &collisions);
    }
    Ok(professors)
}
