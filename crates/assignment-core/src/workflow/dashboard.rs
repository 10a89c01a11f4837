//! Student dashboard.

use assignment_gateway::AssignmentGateway;
use serde::Serialize;
use tracing::{info, Instrument};

use crate::domain::{FetchError, Student};
use crate::navigation::Route;
use crate::workflow::health::HealthProbe;
use crate::workflow::screen::{ScreenKind, ScreenState};
use crate::workflow::WorkflowContext;
use crate::{fallback, normalize, obs};

/// Everything the dashboard renders. `student` is always populated.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct DashboardView {
    pub student: Student,
    pub loading: bool,
    pub error: Option<String>,
    pub health_warning: Option<String>,
}

pub struct DashboardScreen {
    ctx: WorkflowContext,
    state: ScreenState<Student>,
    health: Option<HealthProbe>,
}

impl DashboardScreen {
    pub fn mount(ctx: WorkflowContext) -> Self {
        Self {
            ctx,
            state: ScreenState::mount(ScreenKind::Dashboard),
            health: None,
        }
    }

    /// Fetch the student profile while a health check runs alongside.
    ///
    /// Only the profile fetch decides when the screen is ready.
    pub async fn load(&mut self) {
        let ticket = self.state.begin_fetch();
        let span = obs::screen_span(ScreenKind::Dashboard, &ticket.screen);

        let probe = span.in_scope(|| {
            HealthProbe::spawn(self.ctx.gateway(), self.ctx.config().health_policy)
        });
        self.health = Some(probe);

        let gateway = self.ctx.gateway();
        let outcome = fetch_student(gateway.as_ref(), self.ctx.session().student_name())
            .instrument(span)
            .await;
        self.state.settle(ticket.tag(outcome), fallback::student);
    }

    pub fn state(&self) -> &ScreenState<Student> {
        &self.state
    }

    pub fn health(&self) -> Option<&HealthProbe> {
        self.health.as_ref()
    }

    pub fn health_mut(&mut self) -> Option<&mut HealthProbe> {
        self.health.as_mut()
    }

    pub fn snapshot(&self) -> DashboardView {
        DashboardView {
            student: self.state.data_or_else(fallback::student),
            loading: self.state.is_loading(),
            error: self.state.error().map(str::to_string),
            health_warning: self.health.as_ref().and_then(HealthProbe::warning),
        }
    }

    /// "Assign courses" action.
    pub fn open_courses(&self) {
        self.ctx.navigator().navigate(Route::CourseList, None);
    }
}

async fn fetch_student(
    gateway: &dyn AssignmentGateway,
    name: &str,
) -> Result<Student, FetchError> {
    match gateway.get_student(name).await? {
        Some(raw) => Ok(normalize::student(&raw)?),
        None => {
            info!(event = "student.not_found", student = %name);
            Ok(fallback::student())
        }
    }
}
