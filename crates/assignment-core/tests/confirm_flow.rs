//! Selection and the assignment confirm flow, including the delayed redirect.

use std::sync::Arc;
use std::time::Duration;

use assignment_core::{
    AssignmentStatus, Course, NavigationState, RecordingNavigator, Route, SelectionScreen,
    Session, WorkflowContext, WorkflowError,
};
use assignment_gateway::fakes::{GatewayCall, ScriptedGateway};
use assignment_gateway::{AssignmentRequest, GatewayError};
use serde_json::json;

fn recommendations() -> serde_json::Value {
    json!([
        { "id": "p1", "nombre": "Dr. A", "puntuacion_compatibilidad": 0.9 },
        { "id": "p2", "nombre": "Dra. B", "puntuacion_compatibilidad": 0.7 }
    ])
}

fn navigation() -> NavigationState {
    NavigationState {
        course: Some(Course {
            id: "CALC1".to_string(),
            name: "Cálculo 1".to_string(),
            code: "MAT101".to_string(),
        }),
        student_name: Some("PÉREZ, LUCÍA".to_string()),
    }
}

async fn loaded_screen(
    gateway: ScriptedGateway,
) -> (SelectionScreen, Arc<ScriptedGateway>, Arc<RecordingNavigator>) {
    let gateway = Arc::new(gateway.with_recommendations(recommendations()));
    let navigator = Arc::new(RecordingNavigator::new());
    let ctx = WorkflowContext::new(gateway.clone(), navigator.clone(), Session::default());
    let mut screen = SelectionScreen::mount(ctx, "CALC1", Some(navigation()));
    screen.load().await;
    (screen, gateway, navigator)
}

fn redirects(navigator: &RecordingNavigator) -> usize {
    navigator
        .records()
        .iter()
        .filter(|r| r.route == Route::CourseList)
        .count()
}

#[tokio::test]
async fn test_selection_is_single_and_replaceable() {
    let (mut screen, _, _) = loaded_screen(ScriptedGateway::new()).await;

    screen.select("p1").unwrap();
    screen.select("p2").unwrap();

    assert!(screen.is_selected("p2"));
    assert!(!screen.is_selected("p1"));
    assert_eq!(screen.snapshot().selected_id.as_deref(), Some("p2"));
    assert_eq!(screen.status(), &AssignmentStatus::Idle);
}

#[tokio::test]
async fn test_select_unknown_professor_keeps_selection() {
    let (mut screen, _, _) = loaded_screen(ScriptedGateway::new()).await;
    screen.select("p1").unwrap();

    let err = screen.select("ghost").unwrap_err();
    assert!(matches!(err, WorkflowError::UnknownRecord { .. }));
    assert!(screen.is_selected("p1"));
}

#[tokio::test]
async fn test_confirm_without_selection_is_a_no_op() {
    let (mut screen, gateway, _) = loaded_screen(ScriptedGateway::new()).await;

    assert!(!screen.can_confirm());
    let status = screen.confirm().await;

    assert_eq!(status, AssignmentStatus::Idle);
    assert_eq!(gateway.registration_count(), 0);
}

#[tokio::test(start_paused = true)]
async fn test_success_redirects_once_after_delay() {
    let (mut screen, gateway, navigator) = loaded_screen(ScriptedGateway::new()).await;
    screen.select("p1").unwrap();

    let status = screen.confirm().await;

    assert_eq!(status, AssignmentStatus::Succeeded);
    assert!(gateway
        .calls()
        .contains(&GatewayCall::RegisterAssignment(AssignmentRequest::new(
            "PÉREZ, LUCÍA",
            "Dr. A",
            "MAT101"
        ))));
    let receipt = screen.receipt().unwrap();
    assert_eq!(receipt.professor_name, "Dr. A");
    assert_eq!(receipt.course_code, "MAT101");

    tokio::time::sleep(Duration::from_millis(1999)).await;
    assert_eq!(redirects(&navigator), 0);

    tokio::time::sleep(Duration::from_millis(2)).await;
    assert_eq!(redirects(&navigator), 1);
    assert_eq!(navigator.last().unwrap().state, None);

    tokio::time::sleep(Duration::from_secs(10)).await;
    assert_eq!(redirects(&navigator), 1);
}

#[tokio::test(start_paused = true)]
async fn test_success_locks_selection_and_confirm() {
    let (mut screen, gateway, _) = loaded_screen(ScriptedGateway::new()).await;
    screen.select("p1").unwrap();
    screen.confirm().await;

    assert_eq!(
        screen.select("p2"),
        Err(WorkflowError::SelectionLocked {
            status: "succeeded"
        })
    );
    assert!(!screen.can_confirm());
    assert_eq!(screen.confirm().await, AssignmentStatus::Succeeded);
    assert_eq!(gateway.registration_count(), 1);
}

#[tokio::test(start_paused = true)]
async fn test_failure_allows_retry() {
    let (mut screen, gateway, navigator) = loaded_screen(
        ScriptedGateway::new().then_register(Err(GatewayError::Rejected("cupo lleno".into()))),
    )
    .await;
    screen.select("p1").unwrap();

    let status = screen.confirm().await;
    let AssignmentStatus::Failed { reason } = status else {
        panic!("expected failure, got {status:?}");
    };
    assert!(reason.contains("cupo lleno"));
    assert!(screen.receipt().is_none());

    tokio::time::sleep(Duration::from_secs(5)).await;
    assert_eq!(redirects(&navigator), 0);

    // Selection stays editable after a failure.
    screen.select("p2").unwrap();
    assert!(matches!(screen.status(), AssignmentStatus::Failed { .. }));
    assert!(screen.can_confirm());

    assert_eq!(screen.confirm().await, AssignmentStatus::Succeeded);
    assert_eq!(gateway.registration_count(), 2);
    assert_eq!(screen.receipt().unwrap().professor_name, "Dra. B");

    tokio::time::sleep(Duration::from_millis(2001)).await;
    assert_eq!(redirects(&navigator), 1);
}

#[tokio::test]
async fn test_pending_refuses_second_confirm_and_selection() {
    let (mut screen, _, _) = loaded_screen(ScriptedGateway::new()).await;
    screen.select("p1").unwrap();

    let attempt = screen.begin_confirm().unwrap();
    assert_eq!(screen.status(), &AssignmentStatus::Pending);
    assert!(screen.begin_confirm().is_none());
    assert_eq!(
        screen.select("p2"),
        Err(WorkflowError::SelectionLocked { status: "pending" })
    );
    assert_eq!(attempt.request.course_code, "MAT101");
}

#[tokio::test]
async fn test_outcome_of_foreign_attempt_is_ignored() {
    let (mut first, _, _) = loaded_screen(ScriptedGateway::new()).await;
    let (mut second, _, _) = loaded_screen(ScriptedGateway::new()).await;
    first.select("p1").unwrap();
    second.select("p1").unwrap();

    let foreign = first.begin_confirm().unwrap();
    let own = second.begin_confirm().unwrap();

    assert!(!second.finish_confirm(&foreign, Ok(())));
    assert_eq!(second.status(), &AssignmentStatus::Pending);

    assert!(second.finish_confirm(&own, Ok(())));
    assert_eq!(second.status(), &AssignmentStatus::Succeeded);
    assert!(!second.finish_confirm(&own, Ok(())));
}

#[tokio::test(start_paused = true)]
async fn test_leaving_the_screen_cancels_redirect() {
    let (mut screen, _, navigator) = loaded_screen(ScriptedGateway::new()).await;
    screen.select("p1").unwrap();
    screen.confirm().await;

    drop(screen);
    tokio::time::sleep(Duration::from_secs(5)).await;

    assert_eq!(redirects(&navigator), 0);
}

#[tokio::test]
async fn test_missing_course_uses_route_id_as_code() {
    let gateway = Arc::new(ScriptedGateway::new().with_recommendations(recommendations()));
    let navigator = Arc::new(RecordingNavigator::new());
    let ctx = WorkflowContext::new(gateway.clone(), navigator, Session::new("RUIZ, ANA"));
    let mut screen = SelectionScreen::mount(ctx, "EST1", None);
    screen.load().await;
    screen.select("p2").unwrap();

    let attempt = screen.begin_confirm().unwrap();
    assert_eq!(
        attempt.request,
        AssignmentRequest::new("RUIZ, ANA", "Dra. B", "EST1")
    );
}
