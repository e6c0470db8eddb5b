//! UI layer for the desktop converter.

pub mod app;

pub use app::ConverterApp;
