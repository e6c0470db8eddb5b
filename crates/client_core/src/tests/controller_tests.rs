use super::*;
use std::collections::HashMap;

use async_trait::async_trait;
use reqwest::StatusCode;
use serde_json::json;
use shared::protocol::{ConversionReply, HistoryEntry};
use tokio::sync::{mpsc, oneshot, Mutex};

use crate::{
    error::ClientError,
    view::{
        ViewState, CONNECTION_FAILED_MESSAGE, CONVERTING_MESSAGE, HISTORY_FAILED_MESSAGE,
        NO_HISTORY_MESSAGE,
    },
};

type ConvertOutcome = Result<ConversionReply, ClientError>;
type HistoryOutcome = Result<Vec<HistoryEntry>, ClientError>;

#[derive(Default)]
struct FakeConversionService {
    replies: Mutex<HashMap<String, ConvertOutcome>>,
    gates: Mutex<HashMap<String, oneshot::Receiver<()>>>,
    history_outcome: Mutex<Option<HistoryOutcome>>,
    convert_calls: Mutex<Vec<String>>,
    history_calls: Mutex<u32>,
}

impl FakeConversionService {
    async fn reply(&self, input: &str, outcome: ConvertOutcome) {
        self.replies.lock().await.insert(input.to_string(), outcome);
    }

    /// Holds the response for `input` until the returned sender fires.
    async fn gate(&self, input: &str) -> oneshot::Sender<()> {
        let (tx, rx) = oneshot::channel();
        self.gates.lock().await.insert(input.to_string(), rx);
        tx
    }

    async fn history_reply(&self, outcome: HistoryOutcome) {
        *self.history_outcome.lock().await = Some(outcome);
    }
}

#[async_trait]
impl ConversionService for FakeConversionService {
    async fn convert(&self, input: &ConversionInput) -> Result<ConversionReply, ClientError> {
        self.convert_calls
            .lock()
            .await
            .push(input.as_str().to_string());
        let gate = self.gates.lock().await.remove(input.as_str());
        if let Some(gate) = gate {
            let _ = gate.await;
        }
        self.replies
            .lock()
            .await
            .remove(input.as_str())
            .unwrap_or(Ok(ConversionReply::Unexpected))
    }

    async fn history(&self) -> Result<Vec<HistoryEntry>, ClientError> {
        *self.history_calls.lock().await += 1;
        self.history_outcome
            .lock()
            .await
            .take()
            .unwrap_or(Ok(Vec::new()))
    }
}

struct Harness {
    service: Arc<FakeConversionService>,
    controller: UiController,
    updates: mpsc::UnboundedReceiver<RegionUpdate>,
    view: ViewState,
}

impl Harness {
    fn new() -> Self {
        let service = Arc::new(FakeConversionService::default());
        let (tx, updates) = mpsc::unbounded_channel();
        let controller = UiController::new(
            Arc::clone(&service) as Arc<dyn ConversionService>,
            Arc::new(tx),
            Handle::current(),
        );
        Self {
            service,
            controller,
            updates,
            view: ViewState::default(),
        }
    }

    /// Applies every update published so far and returns them.
    fn drain(&mut self) -> Vec<RegionUpdate> {
        let mut seen = Vec::new();
        while let Ok(update) = self.updates.try_recv() {
            self.view.apply(update.clone());
            seen.push(update);
        }
        seen
    }
}

fn status_failure() -> ClientError {
    ClientError::Status {
        url: "http://localhost:8080/convert-measurements".to_string(),
        status: StatusCode::INTERNAL_SERVER_ERROR,
    }
}

#[tokio::test]
async fn blank_input_short_circuits_without_a_request() {
    let mut harness = Harness::new();

    let handle = harness.controller.convert("   \t ");

    assert!(handle.is_none());
    assert_eq!(
        harness.drain(),
        vec![RegionUpdate::Result(ResultRegion::Error(
            PROMPT_MESSAGE.to_string()
        ))]
    );
    assert!(harness.view.result.is_error());
    assert!(harness.service.convert_calls.lock().await.is_empty());
}

#[tokio::test]
async fn convert_shows_placeholder_then_result() {
    let mut harness = Harness::new();
    harness
        .service
        .reply(
            "5 ft",
            Ok(ConversionReply::Processed(vec![json!(1), json!(2), json!(3)])),
        )
        .await;

    let handle = harness.controller.convert("  5 ft  ").expect("request issued");
    assert_eq!(
        harness.drain(),
        vec![RegionUpdate::Result(ResultRegion::Loading)]
    );
    assert_eq!(harness.view.result.text(), CONVERTING_MESSAGE);
    assert!(!harness.view.result.is_error());

    handle.await.expect("task");
    harness.drain();

    assert_eq!(harness.view.result.text(), "[1, 2, 3]");
    assert!(!harness.view.result.is_error());
    assert_eq!(
        harness.service.convert_calls.lock().await.as_slice(),
        &["5 ft".to_string()]
    );
}

#[tokio::test]
async fn empty_processed_list_is_success() {
    let mut harness = Harness::new();
    harness
        .service
        .reply("aa", Ok(ConversionReply::Processed(Vec::new())))
        .await;

    harness
        .controller
        .convert("aa")
        .expect("request issued")
        .await
        .expect("task");
    harness.drain();

    assert_eq!(harness.view.result, ResultRegion::Success("[]".to_string()));
}

#[tokio::test]
async fn server_rejection_is_error_styled() {
    let mut harness = Harness::new();
    harness
        .service
        .reply("x", Ok(ConversionReply::Rejected("bad unit".to_string())))
        .await;

    harness
        .controller
        .convert("x")
        .expect("request issued")
        .await
        .expect("task");
    harness.drain();

    assert_eq!(harness.view.result.text(), "bad unit");
    assert!(harness.view.result.is_error());
}

#[tokio::test]
async fn failed_request_shows_generic_message() {
    let mut harness = Harness::new();
    harness.service.reply("x", Err(status_failure())).await;

    harness
        .controller
        .convert("x")
        .expect("request issued")
        .await
        .expect("task");
    harness.drain();

    assert_eq!(harness.view.result.text(), CONNECTION_FAILED_MESSAGE);
    assert!(harness.view.result.is_error());
}

#[tokio::test]
async fn last_arriving_response_wins_the_result_region() {
    let mut harness = Harness::new();
    harness
        .service
        .reply("slow", Ok(ConversionReply::Processed(vec![json!(1)])))
        .await;
    harness
        .service
        .reply("fast", Ok(ConversionReply::Processed(vec![json!(2)])))
        .await;
    let release_slow = harness.service.gate("slow").await;

    let slow = harness.controller.convert("slow").expect("request issued");
    let fast = harness.controller.convert("fast").expect("request issued");

    fast.await.expect("fast task");
    harness.drain();
    assert_eq!(harness.view.result.text(), "[2]");

    release_slow.send(()).expect("release");
    slow.await.expect("slow task");
    harness.drain();
    assert_eq!(harness.view.result.text(), "[1]");
}

#[tokio::test]
async fn show_history_clears_then_renders_lines() {
    let mut harness = Harness::new();
    harness
        .service
        .history_reply(Ok(vec![HistoryEntry {
            sequence: "5 ft".to_string(),
            processed: vec![json!(1.524)],
        }]))
        .await;
    harness.view.history = HistoryRegion::Error;

    let handle = harness.controller.show_history();
    assert_eq!(
        harness.drain(),
        vec![RegionUpdate::History(HistoryRegion::Empty)]
    );
    assert!(harness.view.history.lines().is_empty());

    handle.await.expect("task");
    harness.drain();

    let lines = harness.view.history.lines();
    assert_eq!(lines.len(), 1);
    assert_eq!(lines[0].text, "Input: 5 ft → Output: [1.524]");
    assert!(!lines[0].is_error);
    assert_eq!(*harness.service.history_calls.lock().await, 1);
}

#[tokio::test]
async fn empty_history_renders_placeholder_line() {
    let mut harness = Harness::new();
    harness.service.history_reply(Ok(Vec::new())).await;

    harness.controller.show_history().await.expect("task");
    harness.drain();

    assert_eq!(harness.view.history, HistoryRegion::NoHistory);
    assert_eq!(harness.view.history.lines()[0].text, NO_HISTORY_MESSAGE);
}

#[tokio::test]
async fn failed_history_renders_single_error_line() {
    let mut harness = Harness::new();
    harness.service.history_reply(Err(status_failure())).await;

    harness.controller.show_history().await.expect("task");
    harness.drain();

    let lines = harness.view.history.lines();
    assert_eq!(lines.len(), 1);
    assert_eq!(lines[0].text, HISTORY_FAILED_MESSAGE);
    assert!(lines[0].is_error);
}

#[tokio::test]
async fn clear_actions_reset_only_their_region() {
    let mut harness = Harness::new();
    harness.view.result = ResultRegion::Error("bad unit".to_string());
    harness.view.history = HistoryRegion::Entries(vec!["Input: a → Output: [0]".to_string()]);

    assert!(harness.controller.dispatch(UiAction::ClearResult).is_none());
    harness.drain();
    assert_eq!(harness.view.result.text(), "");
    assert!(!harness.view.result.is_error());
    assert_eq!(harness.view.history.lines().len(), 1);

    assert!(harness.controller.dispatch(UiAction::ClearHistory).is_none());
    harness.drain();
    assert!(harness.view.history.lines().is_empty());

    harness.view.history = HistoryRegion::NoHistory;
    harness.controller.clear_history();
    harness.drain();
    assert_eq!(harness.view.history, HistoryRegion::Empty);
}

#[tokio::test]
async fn dispatch_routes_network_actions() {
    let mut harness = Harness::new();
    harness
        .service
        .reply("abbcc", Ok(ConversionReply::Processed(vec![json!(2), json!(6)])))
        .await;

    harness
        .controller
        .dispatch(UiAction::Convert {
            input: "abbcc".to_string(),
        })
        .expect("convert task")
        .await
        .expect("task");
    harness
        .controller
        .dispatch(UiAction::ShowHistory)
        .expect("history task")
        .await
        .expect("task");
    harness.drain();

    assert_eq!(harness.view.result.text(), "[2, 6]");
    assert_eq!(harness.view.history, HistoryRegion::NoHistory);
    assert!(harness
        .controller
        .dispatch(UiAction::Convert {
            input: String::new()
        })
        .is_none());
}

#[test]
fn action_names_are_stable() {
    assert_eq!(
        UiAction::Convert {
            input: "a".to_string()
        }
        .name(),
        "convert"
    );
    assert_eq!(UiAction::ShowHistory.name(), "show_history");
    assert_eq!(UiAction::ClearResult.name(), "clear_result");
    assert_eq!(UiAction::ClearHistory.name(), "clear_history");
}
