//! Course list: the entry point into professor selection.

use assignment_gateway::AssignmentGateway;
use serde::Serialize;
use tracing::Instrument;

use crate::domain::{self, Course, FetchError, NormalizationError};
use crate::navigation::{NavigationState, Route};
use crate::workflow::health::HealthProbe;
use crate::workflow::screen::{ScreenKind, ScreenState};
use crate::workflow::WorkflowContext;
use crate::{fallback, normalize, obs};

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct CourseListView {
    pub courses: Vec<Course>,
    pub loading: bool,
    pub error: Option<String>,
    pub health_warning: Option<String>,
}

pub struct CourseListScreen {
    ctx: WorkflowContext,
    state: ScreenState<Vec<Course>>,
    health: Option<HealthProbe>,
}

impl CourseListScreen {
    pub fn mount(ctx: WorkflowContext) -> Self {
        Self {
            ctx,
            state: ScreenState::mount(ScreenKind::CourseList),
            health: None,
        }
    }

    /// Fetch the course listing; a health check runs alongside and never
    /// affects the outcome.
    pub async fn load(&mut self) {
        let ticket = self.state.begin_fetch();
        let span = obs::screen_span(ScreenKind::CourseList, &ticket.screen);

        let probe = span.in_scope(|| {
            HealthProbe::spawn(self.ctx.gateway(), self.ctx.config().health_policy)
        });
        self.health = Some(probe);

        let gateway = self.ctx.gateway();
        let outcome = fetch_courses(gateway.as_ref(), self.ctx.session().student_name())
            .instrument(span)
            .await;
        self.state.settle(ticket.tag(outcome), fallback::courses);
    }

    pub fn state(&self) -> &ScreenState<Vec<Course>> {
        &self.state
    }

    pub fn health(&self) -> Option<&HealthProbe> {
        self.health.as_ref()
    }

    pub fn health_mut(&mut self) -> Option<&mut HealthProbe> {
        self.health.as_mut()
    }

    pub fn courses(&self) -> &[Course] {
        self.state.data().map(Vec::as_slice).unwrap_or(&[])
    }

    pub fn snapshot(&self) -> CourseListView {
        CourseListView {
            courses: self.state.data_or_else(fallback::courses),
            loading: self.state.is_loading(),
            error: self.state.error().map(str::to_string),
            health_warning: self.health.as_ref().and_then(HealthProbe::warning),
        }
    }

    /// Open professor selection for `course_id`, handing over a copy of the
    /// course and the session identity.
    pub fn select_course(&self, course_id: &str) -> domain::Result<()> {
        let courses = self.state.data().ok_or(domain::WorkflowError::NotReady)?;
        let course = domain::find_unique(courses, "course", course_id)?;

        let state = NavigationState {
            course: Some(course.clone()),
            student_name: Some(self.ctx.session().student_name().to_string()),
        };
        self.ctx.navigator().navigate(
            Route::ProfessorSelection {
                course_id: course.id.clone(),
            },
            Some(state),
        );
        Ok(())
    }
}

async fn fetch_courses(
    gateway: &dyn AssignmentGateway,
    student_name: &str,
) -> Result<Vec<Course>, FetchError> {
    let raw = gateway.list_courses(student_name).await?;
    let courses = normalize::courses(&raw)?;
    if courses.is_empty() {
        return Err(NormalizationError::Empty { kind: "course" }.into());
    }
    let collisions = domain::duplicate_ids(&courses);
    if !collisions.is_empty() {
        obs::emit_identifier_collision("course", &collisions);
    }
    Ok(courses)
}
