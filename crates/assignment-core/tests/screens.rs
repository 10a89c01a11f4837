//! Loading, degradation and hand-off across the three screens.

use std::sync::Arc;
use std::time::Duration;

use assignment_core::fallback;
use assignment_core::normalize::NOT_SPECIFIED;
use assignment_core::{
    CourseListScreen, DashboardScreen, HealthCheckPolicy, HealthStatus, NavigationState,
    RecordingNavigator, Route, SelectionScreen, Session, WorkflowConfig, WorkflowContext,
    WorkflowError,
};
use assignment_gateway::fakes::{GatewayCall, ScriptedGateway};
use assignment_gateway::GatewayError;
use serde_json::json;

fn context(gateway: ScriptedGateway) -> (WorkflowContext, Arc<ScriptedGateway>, Arc<RecordingNavigator>) {
    let gateway = Arc::new(gateway);
    let navigator = Arc::new(RecordingNavigator::new());
    let ctx = WorkflowContext::new(gateway.clone(), navigator.clone(), Session::default());
    (ctx, gateway, navigator)
}

#[tokio::test]
async fn test_offline_dashboard_shows_fallback_and_error() {
    let (ctx, _, _) = context(ScriptedGateway::offline("network error"));
    let mut dashboard = DashboardScreen::mount(ctx);
    assert!(dashboard.snapshot().loading);

    dashboard.load().await;

    let view = dashboard.snapshot();
    assert!(!view.loading);
    assert_eq!(view.student, fallback::student());
    assert!(view.error.unwrap().contains("network error"));
    assert_eq!(view.health_warning, None);
}

#[tokio::test]
async fn test_unknown_student_uses_fallback_without_error() {
    let (ctx, gateway, _) = context(ScriptedGateway::new());
    let mut dashboard = DashboardScreen::mount(ctx);
    dashboard.load().await;

    let view = dashboard.snapshot();
    assert_eq!(view.student, fallback::student());
    assert_eq!(view.error, None);
    assert!(gateway.calls().contains(&GatewayCall::GetStudent {
        name: fallback::DEFAULT_STUDENT_NAME.to_string()
    }));
}

#[tokio::test]
async fn test_partial_student_is_completed_from_fallback() {
    let (ctx, _, _) = context(ScriptedGateway::new().with_student(json!({
        "nombre": "PÉREZ, LUCÍA",
        "promedio": "85.5",
        "grado": null
    })));
    let mut dashboard = DashboardScreen::mount(ctx);
    dashboard.load().await;

    let student = dashboard.snapshot().student;
    assert_eq!(student.full_name, "PÉREZ, LUCÍA");
    assert_eq!(student.prior_term_average, 85.5);
    assert_eq!(student.grade_level, fallback::student().grade_level);
    assert_eq!(student.enrollment_code, fallback::student().enrollment_code);
}

#[tokio::test]
async fn test_slow_health_check_does_not_hold_back_ready() {
    let (ctx, _, _) = context(
        ScriptedGateway::new()
            .with_student(json!({ "nombre": "PÉREZ, LUCÍA" }))
            .with_health_delay(Duration::from_secs(30)),
    );
    let mut dashboard = DashboardScreen::mount(ctx);
    dashboard.load().await;

    assert!(!dashboard.snapshot().loading);
    assert_eq!(dashboard.health().unwrap().status(), HealthStatus::Checking);
}

#[tokio::test]
async fn test_failed_health_check_is_only_logged_by_default() {
    let (ctx, _, _) = context(
        ScriptedGateway::new().with_health(Err(GatewayError::Unreachable("refused".into()))),
    );
    let mut dashboard = DashboardScreen::mount(ctx);
    dashboard.load().await;

    let status = dashboard.health_mut().unwrap().settled().await;
    assert!(matches!(status, HealthStatus::Unreachable { .. }));
    let view = dashboard.snapshot();
    assert_eq!(view.health_warning, None);
    assert_eq!(view.error, None);
}

#[tokio::test]
async fn test_surface_policy_shows_health_warning() {
    let (ctx, _, _) = context(
        ScriptedGateway::new().with_health(Err(GatewayError::Unreachable("refused".into()))),
    );
    let ctx = ctx.with_config(
        WorkflowConfig::default().with_health_policy(HealthCheckPolicy::Surface),
    );
    let mut courses = CourseListScreen::mount(ctx);
    courses.load().await;
    courses.health_mut().unwrap().settled().await;

    let warning = courses.snapshot().health_warning.unwrap();
    assert!(warning.contains("refused"));
}

#[tokio::test]
async fn test_dashboard_opens_course_list() {
    let (ctx, _, navigator) = context(ScriptedGateway::new());
    let dashboard = DashboardScreen::mount(ctx);
    dashboard.open_courses();

    let last = navigator.last().unwrap();
    assert_eq!(last.route, Route::CourseList);
    assert_eq!(last.state, None);
}

#[tokio::test]
async fn test_course_selection_hands_off_course_and_student() {
    let (ctx, _, navigator) = context(ScriptedGateway::new().with_courses(json!([
        { "codigo": "MAT101", "nombre": "Cálculo 1" },
        { "id": "FIS1", "name": "Física 1", "code": "FIS101" }
    ])));
    let mut courses = CourseListScreen::mount(ctx);
    courses.load().await;
    assert_eq!(courses.courses().len(), 2);

    courses.select_course("FIS1").unwrap();

    let last = navigator.last().unwrap();
    assert_eq!(
        last.route,
        Route::ProfessorSelection {
            course_id: "FIS1".to_string()
        }
    );
    let state = last.state.unwrap();
    assert_eq!(state.course.unwrap().code, "FIS101");
    assert_eq!(
        state.student_name.as_deref(),
        Some(fallback::DEFAULT_STUDENT_NAME)
    );
}

#[tokio::test]
async fn test_course_selection_rejects_unknown_and_ambiguous_ids() {
    let (ctx, _, navigator) = context(ScriptedGateway::new().with_courses(json!([
        { "id": "X", "name": "A" },
        { "id": "X", "name": "B" }
    ])));
    let mut courses = CourseListScreen::mount(ctx);
    assert_eq!(courses.select_course("X"), Err(WorkflowError::NotReady));

    courses.load().await;

    assert!(matches!(
        courses.select_course("X"),
        Err(WorkflowError::AmbiguousId { count: 2, .. })
    ));
    assert!(matches!(
        courses.select_course("nope"),
        Err(WorkflowError::UnknownRecord { .. })
    ));
    assert!(navigator.records().is_empty());
}

#[tokio::test]
async fn test_empty_course_listing_falls_back() {
    let (ctx, _, _) = context(ScriptedGateway::new());
    let mut courses = CourseListScreen::mount(ctx);
    courses.load().await;

    let view = courses.snapshot();
    assert_eq!(view.courses, fallback::courses());
    assert!(view.error.is_some());
}

#[tokio::test]
async fn test_recommendations_are_normalized() {
    let (ctx, gateway, _) = context(ScriptedGateway::new().with_recommendations(json!([
        { "nombre": "Dr. X", "score": 0.82 }
    ])));
    let mut selection = SelectionScreen::mount(ctx, "CALC1", None);
    selection.load().await;

    let professors = selection.professors();
    assert_eq!(professors.len(), 1);
    assert_eq!(professors[0].id, "Dr. X");
    assert_eq!(professors[0].name, "Dr. X");
    assert_eq!(professors[0].score, 0.82);
    assert_eq!(professors[0].compatibility_percent(), 82);
    assert_eq!(professors[0].specialty, NOT_SPECIFIED);
    assert_eq!(selection.snapshot().error, None);

    assert!(gateway.calls().contains(&GatewayCall::GetRecommendations {
        student_name: fallback::DEFAULT_STUDENT_NAME.to_string(),
        limit: 5,
    }));
}

#[tokio::test]
async fn test_malformed_recommendations_fall_back() {
    let (ctx, _, _) = context(
        ScriptedGateway::new().with_recommendations(json!({ "error": "oops" })),
    );
    let mut selection = SelectionScreen::mount(ctx, "CALC1", None);
    selection.load().await;

    let view = selection.snapshot();
    assert_eq!(view.professors, fallback::professors());
    assert!(view.error.is_some());
    assert!(!view.loading);
}

#[tokio::test]
async fn test_selection_uses_handed_over_student() {
    let (ctx, gateway, _) = context(ScriptedGateway::new());
    let navigation = NavigationState {
        course: None,
        student_name: Some("PÉREZ, LUCÍA".to_string()),
    };
    let mut selection = SelectionScreen::mount(ctx, "CALC1", Some(navigation));
    selection.load().await;

    assert_eq!(selection.student_name(), "PÉREZ, LUCÍA");
    assert_eq!(selection.course_code(), "CALC1");
    assert!(gateway.calls().contains(&GatewayCall::GetRecommendations {
        student_name: "PÉREZ, LUCÍA".to_string(),
        limit: 5,
    }));
}
