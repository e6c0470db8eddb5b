//! Async runtime hosting the network side of the GUI.

pub mod runtime;
