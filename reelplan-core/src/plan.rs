//! Plan lifecycle: idle → loading → loaded, with a single in-flight load.
//!
//! Generating a plan is the one asynchronous step in the application. Each load
//! is represented by a [`LoadTicket`] carrying a unique id and a shared
//! [`CancelFlag`]. Only the ticket currently in flight may complete the load:
//! a response carrying any other id is stale and is discarded. Starting a new
//! plan cancels the outstanding ticket so the worker can skip its work, and any
//! response that still arrives is rejected by id.

use std::fmt;
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;

use uuid::Uuid;

use crate::model::Storyboard;
use crate::scroll::ScrollOptions;
use crate::session::StoryboardSession;

/// Shared cancellation signal between the UI and the load worker.
#[derive(Debug, Clone, Default)]
pub struct CancelFlag(Arc<AtomicBool>);

impl CancelFlag {
    pub fn cancel(&self) {
        self.0.store(true, Ordering::Release);
    }

    pub fn is_cancelled(&self) -> bool {
        self.0.load(Ordering::Acquire)
    }
}

/// One outstanding storyboard load.
#[derive(Debug, Clone)]
pub struct LoadTicket {
    pub id: Uuid,
    pub topic: String,
    pub cancel: CancelFlag,
}

impl LoadTicket {
    fn new(topic: String) -> Self {
        Self {
            id: Uuid::new_v4(),
            topic,
            cancel: CancelFlag::default(),
        }
    }
}

/// What happened to a completed load.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum CompletionOutcome {
    /// The storyboard is now shown.
    Loaded,
    /// The load failed; the plan is back to idle with its topic kept.
    Failed(String),
    /// The response did not belong to the in-flight ticket and was dropped.
    Stale,
}

#[derive(Debug)]
pub enum PlanPhase {
    Idle,
    Loading(LoadTicket),
    Loaded(Box<StoryboardSession>),
}

/// The top-level state of one plan: the topic being edited or generated and
/// the phase it is in.
#[derive(Debug)]
pub struct PlanState {
    topic: String,
    phase: PlanPhase,
    scroll_options: ScrollOptions,
}

impl PlanState {
    pub fn new(scroll_options: ScrollOptions) -> Self {
        Self {
            topic: String::new(),
            phase: PlanPhase::Idle,
            scroll_options,
        }
    }

    pub fn phase(&self) -> &PlanPhase {
        &self.phase
    }

    pub fn topic(&self) -> &str {
        &self.topic
    }

    /// Mutable topic text. Edits are only accepted while idle.
    pub fn topic_mut(&mut self) -> Option<&mut String> {
        matches!(self.phase, PlanPhase::Idle).then_some(&mut self.topic)
    }

    pub fn is_loading(&self) -> bool {
        matches!(self.phase, PlanPhase::Loading(_))
    }

    /// Whether generate-plan is currently available.
    pub fn can_generate(&self) -> bool {
        matches!(self.phase, PlanPhase::Idle) && !self.topic.trim().is_empty()
    }

    /// Starts a load for the current topic.
    ///
    /// Returns `None` (and changes nothing) when the topic is blank or the plan
    /// is not idle; in particular a second load can never start while one is in
    /// flight.
    pub fn begin(&mut self) -> Option<LoadTicket> {
        if !self.can_generate() {
            return None;
        }
        let ticket = LoadTicket::new(self.topic.trim().to_owned());
        tracing::info!(ticket = %ticket.id, topic = %ticket.topic, "storyboard load started");
        self.phase = PlanPhase::Loading(ticket.clone());
        Some(ticket)
    }

    /// Applies the result of load `id`.
    ///
    /// The result is used only if `id` is the in-flight ticket. A failed load
    /// returns to idle without showing anything partial.
    pub fn complete<E: fmt::Display>(
        &mut self,
        id: Uuid,
        result: Result<Storyboard, E>,
    ) -> CompletionOutcome {
        let in_flight = match &self.phase {
            PlanPhase::Loading(ticket) => ticket.id == id && !ticket.cancel.is_cancelled(),
            _ => false,
        };
        if !in_flight {
            tracing::debug!(ticket = %id, "discarding stale storyboard response");
            return CompletionOutcome::Stale;
        }
        match result {
            Ok(storyboard) => {
                tracing::info!(
                    ticket = %id,
                    segments = storyboard.segments().len(),
                    "storyboard loaded"
                );
                let session = StoryboardSession::new(storyboard, self.scroll_options);
                self.phase = PlanPhase::Loaded(Box::new(session));
                CompletionOutcome::Loaded
            }
            Err(err) => {
                let message = err.to_string();
                tracing::error!(ticket = %id, error = %message, "storyboard load failed");
                self.phase = PlanPhase::Idle;
                CompletionOutcome::Failed(message)
            }
        }
    }

    /// Discards everything: cancels an in-flight load, drops the session and
    /// clears the topic.
    pub fn new_plan(&mut self) {
        if let PlanPhase::Loading(ticket) = &self.phase {
            ticket.cancel.cancel();
            tracing::info!(ticket = %ticket.id, "in-flight storyboard load cancelled");
        }
        self.phase = PlanPhase::Idle;
        self.topic.clear();
    }

    pub fn session(&self) -> Option<&StoryboardSession> {
        match &self.phase {
            PlanPhase::Loaded(session) => Some(session.as_ref()),
            _ => None,
        }
    }

    pub fn session_mut(&mut self) -> Option<&mut StoryboardSession> {
        match &mut self.phase {
            PlanPhase::Loaded(session) => Some(session.as_mut()),
            _ => None,
        }
    }
}
