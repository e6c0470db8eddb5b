//! Backend-to-UI events and the sink that feeds them into the frame loop.

use client_core::{RegionSink, RegionUpdate};
use crossbeam_channel::{Sender, TrySendError};

pub enum UiEvent {
    Region(RegionUpdate),
}

/// Queues region updates for the next frame and wakes the UI thread.
pub struct GuiRegionSink {
    ui_tx: Sender<UiEvent>,
    ctx: egui::Context,
}

impl GuiRegionSink {
    pub fn new(ui_tx: Sender<UiEvent>, ctx: egui::Context) -> Self {
        Self { ui_tx, ctx }
    }
}

impl RegionSink for GuiRegionSink {
    fn publish(&self, update: RegionUpdate) {
        match self.ui_tx.try_send(UiEvent::Region(update)) {
            Ok(()) => self.ctx.request_repaint(),
            Err(TrySendError::Full(_)) => {
                tracing::warn!("ui event queue is full; dropping region update");
            }
            Err(TrySendError::Disconnected(_)) => {
                tracing::debug!("ui event receiver closed; dropping region update");
            }
        }
    }
}
