//! Background thread that turns topics into storyboards.
//!
//! The thread owns its [`Producer`] for its lifetime and serves requests one
//! at a time until the request channel closes. Cancelled requests are skipped
//! before any work starts, and their results are dropped instead of posted.

use std::path::PathBuf;
use std::time::Duration;

use crossbeam_channel::Receiver;
use reelplan_core::Storyboard;
use tokio::sync::mpsc::UnboundedSender;

use crate::config::{ProducerConfig, ProducerKind};
use crate::event::AppEvent;
use crate::producer::types::{LoadError, LoadRequest, LoadResponse};

/// The storyboard bundled into the binary.
const DEMO_STORYBOARD: &str = include_str!("../../demos/storyboard.json");

/// Something that can turn a topic into a storyboard. Runs on the worker
/// thread and may block.
pub trait Producer: Send {
    fn produce(&self, topic: &str) -> Result<Storyboard, LoadError>;

    /// Short name for logs.
    fn name(&self) -> &'static str;
}

/// Serves the bundled sample regardless of topic.
pub struct DemoProducer;

impl Producer for DemoProducer {
    fn produce(&self, _topic: &str) -> Result<Storyboard, LoadError> {
        Ok(Storyboard::from_json_str(DEMO_STORYBOARD)?)
    }

    fn name(&self) -> &'static str {
        "demo"
    }
}

/// Re-reads a JSON file on every request, so edits show up on the next plan.
pub struct FileProducer {
    pub path: Option<PathBuf>,
}

impl Producer for FileProducer {
    fn produce(&self, _topic: &str) -> Result<Storyboard, LoadError> {
        let path = self.path.as_ref().ok_or(LoadError::NoPayloadPath)?;
        Ok(Storyboard::from_path(path)?)
    }

    fn name(&self) -> &'static str {
        "file"
    }
}

/// POSTs `{"topic": ..., "max_ideators": n}` and decodes the JSON response.
pub struct HttpProducer {
    agent: ureq::Agent,
    endpoint: String,
    max_ideators: u32,
}

impl HttpProducer {
    pub fn new(endpoint: String, max_ideators: u32, timeout: Duration) -> Self {
        let agent = ureq::AgentBuilder::new()
            .timeout_connect(Duration::from_secs(5))
            .timeout_read(timeout)
            .timeout_write(Duration::from_secs(30))
            .build();
        Self {
            agent,
            endpoint,
            max_ideators,
        }
    }
}

impl Producer for HttpProducer {
    fn produce(&self, topic: &str) -> Result<Storyboard, LoadError> {
        let payload = serde_json::json!({
            "topic": topic,
            "max_ideators": self.max_ideators,
        });
        let response = self
            .agent
            .post(&self.endpoint)
            .set("Content-Type", "application/json")
            .set("Accept", "application/json")
            .send_string(&payload.to_string());
        let body = match response {
            Ok(resp) => resp.into_string().map_err(|err| LoadError::Http {
                endpoint: self.endpoint.clone(),
                message: err.to_string(),
            })?,
            Err(ureq::Error::Status(status, resp)) => {
                let body = resp.into_string().unwrap_or_default();
                return Err(LoadError::Status { status, body });
            }
            Err(err) => {
                return Err(LoadError::Http {
                    endpoint: self.endpoint.clone(),
                    message: err.to_string(),
                })
            }
        };
        Ok(Storyboard::from_json_str(&body)?)
    }

    fn name(&self) -> &'static str {
        "http"
    }
}

/// Builds the producer selected by `config`.
pub fn build_producer(config: &ProducerConfig) -> Box<dyn Producer> {
    match config.kind {
        ProducerKind::Demo => Box::new(DemoProducer),
        ProducerKind::File => Box::new(FileProducer {
            path: config.path.clone(),
        }),
        ProducerKind::Http => Box::new(HttpProducer::new(
            config.endpoint.clone(),
            config.max_ideators,
            Duration::from_secs(config.timeout_secs.max(1)),
        )),
    }
}

/// Entry point of the producer thread.
///
/// Loops over incoming requests until the channel is closed (sender dropped).
/// `latency` is slept before each fetch to make the loading state visible
/// with instant producers.
pub fn producer_worker_loop(
    producer: Box<dyn Producer>,
    latency: Duration,
    rx: Receiver<LoadRequest>,
    event_tx: UnboundedSender<AppEvent>,
) {
    tracing::debug!(producer = producer.name(), "producer thread started");
    for request in rx {
        if let Some(response) = serve(producer.as_ref(), latency, request) {
            if event_tx.send(AppEvent::Storyboard(Box::new(response))).is_err() {
                break;
            }
        }
    }
    tracing::debug!("producer thread exiting");
}

/// Runs one request. Returns `None` when the request was cancelled.
fn serve(producer: &dyn Producer, latency: Duration, request: LoadRequest) -> Option<LoadResponse> {
    if request.cancel.is_cancelled() {
        tracing::debug!(ticket = %request.ticket_id, "skipping cancelled request");
        return None;
    }
    if !latency.is_zero() {
        std::thread::sleep(latency);
    }
    let result = producer.produce(&request.topic);
    if request.cancel.is_cancelled() {
        tracing::debug!(ticket = %request.ticket_id, "dropping result of cancelled request");
        return None;
    }
    Some(LoadResponse {
        ticket_id: request.ticket_id,
        result,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use reelplan_core::CancelFlag;
    use uuid::Uuid;

    fn request(cancel: CancelFlag) -> LoadRequest {
        LoadRequest {
            ticket_id: Uuid::new_v4(),
            topic: "anything".to_owned(),
            cancel,
        }
    }

    #[test]
    fn demo_storyboard_decodes_with_clips_and_concepts() {
        let storyboard = DemoProducer.produce("topic").unwrap();
        assert!(!storyboard.is_empty());
        assert!(storyboard.visuals().any(|v| v.is_concept()));
        assert!(storyboard
            .visuals()
            .any(|v| reelplan_core::clip::present(v).as_clip().is_some()));
    }

    #[test]
    fn file_producer_without_path_fails() {
        let producer = FileProducer { path: None };
        assert!(matches!(
            producer.produce("t"),
            Err(LoadError::NoPayloadPath)
        ));
    }

    #[test]
    fn cancelled_request_is_skipped() {
        let cancel = CancelFlag::default();
        cancel.cancel();
        assert!(serve(&DemoProducer, Duration::ZERO, request(cancel)).is_none());
    }

    #[test]
    fn live_request_carries_its_ticket() {
        let req = request(CancelFlag::default());
        let id = req.ticket_id;
        let response = serve(&DemoProducer, Duration::ZERO, req).unwrap();
        assert_eq!(response.ticket_id, id);
        assert!(response.result.is_ok());
    }

    #[test]
    fn worker_posts_results_until_channel_closes() {
        let (req_tx, req_rx) = crossbeam_channel::unbounded();
        let (event_tx, mut event_rx) = tokio::sync::mpsc::unbounded_channel();
        let handle = std::thread::spawn(move || {
            producer_worker_loop(Box::new(DemoProducer), Duration::ZERO, req_rx, event_tx)
        });
        let req = request(CancelFlag::default());
        let id = req.ticket_id;
        req_tx.send(req).unwrap();
        drop(req_tx);
        handle.join().unwrap();

        match event_rx.try_recv() {
            Ok(AppEvent::Storyboard(response)) => assert_eq!(response.ticket_id, id),
            other => panic!("unexpected event: {other:?}"),
        }
    }
}
