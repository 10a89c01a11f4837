//! Structured log events for the assignment workflow.
//!
//! Every event carries an `event = "<area>.<what>"` field so log pipelines
//! can filter on it. Screen work runs inside [`screen_span`], which tags all
//! nested events with the screen kind and instance id.

use std::fmt::Display;

use tracing::{debug, info, warn};

use crate::workflow::screen::{FetchTicket, ScreenId, ScreenKind};

/// Span covering one screen instance's async work.
pub fn screen_span(kind: ScreenKind, id: &ScreenId) -> tracing::Span {
    tracing::info_span!("assignment.screen", screen = %kind, screen_id = %id)
}

pub fn emit_screen_mounted(kind: ScreenKind, id: &ScreenId) {
    debug!(event = "screen.mounted", screen = %kind, screen_id = %id);
}

pub fn emit_screen_ready(kind: ScreenKind, id: &ScreenId, degraded: bool) {
    info!(event = "screen.ready", screen = %kind, screen_id = %id, degraded = degraded);
}

/// Primary fetch failed; the screen is showing fallback data.
pub fn emit_fallback_used(kind: ScreenKind, error: &dyn Display) {
    warn!(event = "screen.fallback", screen = %kind, error = %error);
}

pub fn emit_stale_result_dropped(kind: ScreenKind, ticket: &FetchTicket) {
    debug!(
        event = "screen.stale_result",
        screen = %kind,
        screen_id = %ticket.screen,
        generation = ticket.generation,
    );
}

pub fn emit_identifier_collision(kind: &str, ids: &[String]) {
    warn!(event = "normalize.id_collision", kind = %kind, ids = ?ids);
}

pub fn emit_health_checked(error: Option<&dyn Display>) {
    match error {
        None => info!(event = "health.ok"),
        Some(error) => warn!(event = "health.unreachable", error = %error),
    }
}

pub fn emit_assignment_transition(from: &str, to: &str) {
    info!(event = "assignment.transition", from = %from, to = %to);
}

pub fn emit_confirm_ignored(reason: &str) {
    debug!(event = "assignment.confirm_ignored", reason = %reason);
}

pub fn emit_redirect_scheduled(delay_ms: u64) {
    info!(event = "redirect.scheduled", delay_ms = delay_ms);
}

pub fn emit_redirect_fired(route: &dyn Display) {
    info!(event = "redirect.fired", route = %route);
}

pub fn emit_redirect_cancelled() {
    debug!(event = "redirect.cancelled");
}
