//! Owned, `Send` messages exchanged with the producer thread.

use reelplan_core::{CancelFlag, LoadTicket, PayloadError, Storyboard};
use thiserror::Error;
use uuid::Uuid;

/// Why a storyboard could not be produced.
#[derive(Debug, Error)]
pub enum LoadError {
    #[error(transparent)]
    Payload(#[from] PayloadError),
    #[error("request to {endpoint} failed: {message}")]
    Http { endpoint: String, message: String },
    #[error("storyboard service returned {status}: {body}")]
    Status { status: u16, body: String },
    #[error("no payload file configured; pass --payload or set producer.path")]
    NoPayloadPath,
    #[error("the producer thread is not running")]
    WorkerGone,
}

/// One generate request, sent from the main thread to the worker.
#[derive(Debug, Clone)]
pub struct LoadRequest {
    pub ticket_id: Uuid,
    pub topic: String,
    /// Checked before the fetch and again before the result is posted.
    pub cancel: CancelFlag,
}

impl From<&LoadTicket> for LoadRequest {
    fn from(ticket: &LoadTicket) -> Self {
        Self {
            ticket_id: ticket.id,
            topic: ticket.topic.clone(),
            cancel: ticket.cancel.clone(),
        }
    }
}

/// Result of one request, carried inside `AppEvent::Storyboard`.
#[derive(Debug)]
pub struct LoadResponse {
    pub ticket_id: Uuid,
    pub result: Result<Storyboard, LoadError>,
}
