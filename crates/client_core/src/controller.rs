//! Command handlers behind the four buttons of the converter.
//!
//! Each handler publishes its synchronous effect before returning and then,
//! for the two network actions, spawns one task whose outcome replaces the
//! handler's region when it arrives. Nothing correlates responses with the
//! click that caused them: whichever response lands last owns the region.

use std::sync::Arc;

use shared::domain::ConversionInput;
use tokio::{runtime::Handle, sync::mpsc::UnboundedSender, task::JoinHandle};
use tracing::{debug, warn};

use crate::{
    view::{
        render_conversion, render_history, HistoryRegion, RegionUpdate, ResultRegion,
        PROMPT_MESSAGE,
    },
    ConversionService,
};

/// Receiver of region replacements; the front end owns the regions.
pub trait RegionSink: Send + Sync {
    fn publish(&self, update: RegionUpdate);
}

impl RegionSink for UnboundedSender<RegionUpdate> {
    fn publish(&self, update: RegionUpdate) {
        if self.send(update).is_err() {
            debug!("region receiver dropped; update discarded");
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum UiAction {
    Convert { input: String },
    ShowHistory,
    ClearResult,
    ClearHistory,
}

impl UiAction {
    pub fn name(&self) -> &'static str {
        match self {
            Self::Convert { .. } => "convert",
            Self::ShowHistory => "show_history",
            Self::ClearResult => "clear_result",
            Self::ClearHistory => "clear_history",
        }
    }
}

#[derive(Clone)]
pub struct UiController {
    service: Arc<dyn ConversionService>,
    sink: Arc<dyn RegionSink>,
    runtime: Handle,
}

impl UiController {
    pub fn new(
        service: Arc<dyn ConversionService>,
        sink: Arc<dyn RegionSink>,
        runtime: Handle,
    ) -> Self {
        Self {
            service,
            sink,
            runtime,
        }
    }

    /// Runs the handler for `action`. The handle, when present, tracks the
    /// spawned network task; dropping it does not cancel anything.
    pub fn dispatch(&self, action: UiAction) -> Option<JoinHandle<()>> {
        debug!(action = action.name(), "dispatching ui action");
        match action {
            UiAction::Convert { input } => self.convert(&input),
            UiAction::ShowHistory => Some(self.show_history()),
            UiAction::ClearResult => {
                self.clear_result();
                None
            }
            UiAction::ClearHistory => {
                self.clear_history();
                None
            }
        }
    }

    pub fn convert(&self, raw: &str) -> Option<JoinHandle<()>> {
        let input = match ConversionInput::parse(raw) {
            Ok(input) => input,
            Err(_) => {
                self.sink.publish(RegionUpdate::Result(ResultRegion::Error(
                    PROMPT_MESSAGE.to_string(),
                )));
                return None;
            }
        };
        self.sink.publish(RegionUpdate::Result(ResultRegion::Loading));

        let service = Arc::clone(&self.service);
        let sink = Arc::clone(&self.sink);
        Some(self.runtime.spawn(async move {
            let outcome = service.convert(&input).await;
            if let Err(err) = &outcome {
                warn!(input = %input, error = %err, "conversion request failed");
            }
            sink.publish(RegionUpdate::Result(render_conversion(outcome)));
        }))
    }

    pub fn show_history(&self) -> JoinHandle<()> {
        self.sink.publish(RegionUpdate::History(HistoryRegion::Empty));

        let service = Arc::clone(&self.service);
        let sink = Arc::clone(&self.sink);
        self.runtime.spawn(async move {
            let outcome = service.history().await;
            if let Err(err) = &outcome {
                warn!(error = %err, "history request failed");
            }
            sink.publish(RegionUpdate::History(render_history(outcome)));
        })
    }

    pub fn clear_result(&self) {
        self.sink.publish(RegionUpdate::Result(ResultRegion::Empty));
    }

    pub fn clear_history(&self) {
        self.sink.publish(RegionUpdate::History(HistoryRegion::Empty));
    }
}

#[cfg(test)]
#[path = "tests/controller_tests.rs"]
mod tests;
