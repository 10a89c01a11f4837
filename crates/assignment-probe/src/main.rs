use std::sync::Arc;

use anyhow::{Context, Result};
use assignment_core::{
    init_tracing, CourseListScreen, DashboardScreen, LogFormat, RecordingNavigator, Route,
    SelectionScreen, Session, WorkflowConfig, WorkflowContext,
};
use assignment_gateway::{GatewayConfig, HttpGateway};
use tracing::{info, warn, Level};

/// Walk dashboard, course list and professor selection once. Read-only: no
/// assignment is ever confirmed.
#[tokio::main]
async fn main() -> Result<()> {
    init_tracing(LogFormat::from_env(), Level::INFO);

    let gateway =
        HttpGateway::new(GatewayConfig::from_env()).context("failed to build gateway client")?;
    let workflow_config = WorkflowConfig::from_env().context("invalid workflow configuration")?;
    let session = Session::from_env();
    let navigator = Arc::new(RecordingNavigator::new());

    info!(
        gateway = %gateway.base_url(),
        student = %session.student_name(),
        "assignment-probe started"
    );

    let ctx = WorkflowContext::new(Arc::new(gateway), navigator.clone(), session)
        .with_config(workflow_config);

    let mut dashboard = DashboardScreen::mount(ctx.clone());
    dashboard.load().await;
    let view = dashboard.snapshot();
    info!(
        student = %view.student.full_name,
        enrollment = %view.student.enrollment_code,
        average = view.student.prior_term_average,
        error = ?view.error,
        "dashboard"
    );
    if let Some(probe) = dashboard.health_mut() {
        let status = probe.settled().await;
        info!(?status, "service health");
    }

    let mut courses = CourseListScreen::mount(ctx.clone());
    courses.load().await;
    let view = courses.snapshot();
    for course in &view.courses {
        info!(id = %course.id, code = %course.code, name = %course.name, "course");
    }
    if let Some(error) = &view.error {
        warn!(%error, "course list degraded");
    }

    let Some(first) = courses.courses().first() else {
        warn!("no course to open");
        return Ok(());
    };
    courses
        .select_course(&first.id)
        .context("failed to open professor selection")?;

    let Some(record) = navigator.last() else {
        return Ok(());
    };
    let Route::ProfessorSelection { course_id } = record.route else {
        return Ok(());
    };

    let mut selection = SelectionScreen::mount(ctx, course_id, record.state);
    selection.load().await;
    let view = selection.snapshot();
    for (rank, professor) in view.professors.iter().enumerate() {
        info!(
            rank = rank + 1,
            name = %professor.name,
            compatibility = professor.compatibility_percent(),
            specialty = %professor.specialty,
            "recommendation"
        );
    }
    if let Some(error) = &view.error {
        warn!(%error, "recommendations degraded");
    }

    info!("assignment-probe finished");
    Ok(())
}
