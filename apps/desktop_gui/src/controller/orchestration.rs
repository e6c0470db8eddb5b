//! Turns one frame's button presses into controller actions.

use client_core::{UiAction, UiController};

/// Buttons pressed during a single frame.
#[derive(Debug, Default, Clone, Copy, PartialEq, Eq)]
pub struct FrameClicks {
    pub convert: bool,
    /// Enter pressed in the input field.
    pub submit: bool,
    pub clear_result: bool,
    pub show_history: bool,
    pub clear_history: bool,
}

/// Actions in on-screen order. Convert and Enter in the same frame count as
/// one conversion.
pub fn actions_for(clicks: FrameClicks, input: &str) -> Vec<UiAction> {
    let mut actions = Vec::new();
    if clicks.convert || clicks.submit {
        actions.push(UiAction::Convert {
            input: input.to_string(),
        });
    }
    if clicks.clear_result {
        actions.push(UiAction::ClearResult);
    }
    if clicks.show_history {
        actions.push(UiAction::ShowHistory);
    }
    if clicks.clear_history {
        actions.push(UiAction::ClearHistory);
    }
    actions
}

pub fn dispatch_ui_actions(controller: &UiController, actions: Vec<UiAction>) {
    for action in actions {
        tracing::debug!(command = action.name(), "ui action");
        // request tasks run detached; their outcome arrives as a UiEvent
        let _ = controller.dispatch(action);
    }
}
