//! Per-screen load state and the stale-result guard.
//!
//! A screen instance has a fixed [`ScreenId`]; every fetch it starts bumps a
//! generation counter and gets a [`FetchTicket`]. Results come back wrapped in
//! [`Tagged`] and are applied only if their ticket is the screen's current
//! one, so a late answer can never overwrite newer state or another screen's
//! state.

use std::fmt;

use serde::Serialize;
use uuid::Uuid;

use crate::domain::FetchError;
use crate::obs;

/// Identity of one mounted screen instance.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct ScreenId(Uuid);

impl ScreenId {
    pub fn new() -> Self {
        ScreenId(Uuid::new_v4())
    }
}

impl Default for ScreenId {
    fn default() -> Self {
        Self::new()
    }
}

impl fmt::Display for ScreenId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum ScreenKind {
    Dashboard,
    CourseList,
    ProfessorSelection,
}

impl fmt::Display for ScreenKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            ScreenKind::Dashboard => "dashboard",
            ScreenKind::CourseList => "course_list",
            ScreenKind::ProfessorSelection => "professor_selection",
        };
        f.write_str(name)
    }
}

/// One fetch issued by one screen instance.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct FetchTicket {
    pub screen: ScreenId,
    pub generation: u64,
}

impl FetchTicket {
    pub fn tag<T>(self, payload: T) -> Tagged<T> {
        Tagged {
            ticket: self,
            payload,
        }
    }
}

/// A fetch result together with the ticket it answers.
#[derive(Debug, Clone)]
pub struct Tagged<T> {
    pub ticket: FetchTicket,
    pub payload: T,
}

#[derive(Debug, Clone, PartialEq)]
pub enum LoadState<T> {
    Loading,
    /// `error` is a non-fatal warning; `data` is always populated.
    Ready { data: T, error: Option<String> },
}

#[derive(Debug)]
pub struct ScreenState<T> {
    kind: ScreenKind,
    id: ScreenId,
    generation: u64,
    load: LoadState<T>,
}

impl<T> ScreenState<T> {
    /// Fresh instance in `loading`.
    pub fn mount(kind: ScreenKind) -> Self {
        let id = ScreenId::new();
        obs::emit_screen_mounted(kind, &id);
        Self {
            kind,
            id,
            generation: 0,
            load: LoadState::Loading,
        }
    }

    pub fn kind(&self) -> ScreenKind {
        self.kind
    }

    pub fn id(&self) -> ScreenId {
        self.id
    }

    pub fn load_state(&self) -> &LoadState<T> {
        &self.load
    }

    pub fn is_loading(&self) -> bool {
        matches!(self.load, LoadState::Loading)
    }

    pub fn data(&self) -> Option<&T> {
        match &self.load {
            LoadState::Ready { data, .. } => Some(data),
            LoadState::Loading => None,
        }
    }

    pub fn error(&self) -> Option<&str> {
        match &self.load {
            LoadState::Ready { error, .. } => error.as_deref(),
            LoadState::Loading => None,
        }
    }

    /// Ticket of the fetch currently awaited, if any.
    pub fn current_ticket(&self) -> FetchTicket {
        FetchTicket {
            screen: self.id,
            generation: self.generation,
        }
    }

    /// Enter `loading` for a new fetch. Tickets handed out earlier go stale.
    pub fn begin_fetch(&mut self) -> FetchTicket {
        self.generation += 1;
        self.load = LoadState::Loading;
        self.current_ticket()
    }

    /// Apply a fetch result: success stores the data, failure stores
    /// `fallback()` plus the failure message.
    ///
    /// Returns `false`, leaving the state untouched, when the result answers
    /// a stale ticket or the screen already settled.
    pub fn settle(
        &mut self,
        outcome: Tagged<Result<T, FetchError>>,
        fallback: impl FnOnce() -> T,
    ) -> bool {
        if outcome.ticket != self.current_ticket() || !self.is_loading() {
            obs::emit_stale_result_dropped(self.kind, &outcome.ticket);
            return false;
        }

        self.load = match outcome.payload {
            Ok(data) => {
                obs::emit_screen_ready(self.kind, &self.id, false);
                LoadState::Ready { data, error: None }
            }
            Err(err) => {
                obs::emit_fallback_used(self.kind, &err);
                obs::emit_screen_ready(self.kind, &self.id, true);
                LoadState::Ready {
                    data: fallback(),
                    error: Some(err.to_string()),
                }
            }
        };
        true
    }
}

impl<T: Clone> ScreenState<T> {
    /// Loaded data, or `fallback()` while still loading. Lets a caller render
    /// something meaningful synchronously.
    pub fn data_or_else(&self, fallback: impl FnOnce() -> T) -> T {
        self.data().cloned().unwrap_or_else(fallback)
    }
}
