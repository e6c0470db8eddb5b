//! Controller layer: region events from the backend and dispatch of UI actions.

pub mod events;
pub mod orchestration;
