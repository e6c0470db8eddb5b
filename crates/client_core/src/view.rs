//! The two output regions and how request outcomes render into them.

use shared::{
    display::bracketed,
    protocol::{ConversionReply, HistoryEntry},
};

use crate::error::ClientError;

pub const PROMPT_MESSAGE: &str = "Please enter a measurement string.";
pub const CONVERTING_MESSAGE: &str = "Converting...";
pub const UNEXPECTED_RESPONSE_MESSAGE: &str = "Unexpected response from server.";
pub const CONNECTION_FAILED_MESSAGE: &str = "Could not connect to server or invalid response.";
pub const NO_HISTORY_MESSAGE: &str = "No history found.";
pub const HISTORY_FAILED_MESSAGE: &str = "Could not fetch history.";

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub enum ResultRegion {
    #[default]
    Empty,
    Loading,
    Success(String),
    Error(String),
}

impl ResultRegion {
    pub fn text(&self) -> &str {
        match self {
            Self::Empty => "",
            Self::Loading => CONVERTING_MESSAGE,
            Self::Success(text) | Self::Error(text) => text,
        }
    }

    pub fn is_error(&self) -> bool {
        matches!(self, Self::Error(_))
    }
}

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub enum HistoryRegion {
    #[default]
    Empty,
    Entries(Vec<String>),
    NoHistory,
    Error,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct HistoryLine {
    pub text: String,
    pub is_error: bool,
}

impl HistoryLine {
    fn plain(text: impl Into<String>) -> Self {
        Self {
            text: text.into(),
            is_error: false,
        }
    }
}

impl HistoryRegion {
    pub fn lines(&self) -> Vec<HistoryLine> {
        match self {
            Self::Empty => Vec::new(),
            Self::Entries(lines) => lines
                .iter()
                .map(|line| HistoryLine::plain(line.as_str()))
                .collect(),
            Self::NoHistory => vec![HistoryLine::plain(NO_HISTORY_MESSAGE)],
            Self::Error => vec![HistoryLine {
                text: HISTORY_FAILED_MESSAGE.to_string(),
                is_error: true,
            }],
        }
    }
}

/// Replacement of exactly one region.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum RegionUpdate {
    Result(ResultRegion),
    History(HistoryRegion),
}

/// Front-end owned copy of both regions.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ViewState {
    pub result: ResultRegion,
    pub history: HistoryRegion,
}

impl ViewState {
    pub fn apply(&mut self, update: RegionUpdate) {
        match update {
            RegionUpdate::Result(region) => self.result = region,
            RegionUpdate::History(region) => self.history = region,
        }
    }
}

pub fn render_conversion(outcome: Result<ConversionReply, ClientError>) -> ResultRegion {
    match outcome {
        Ok(ConversionReply::Processed(values)) => ResultRegion::Success(bracketed(&values)),
        Ok(ConversionReply::Rejected(message)) => ResultRegion::Error(message),
        Ok(ConversionReply::Unexpected) => {
            ResultRegion::Error(UNEXPECTED_RESPONSE_MESSAGE.to_string())
        }
        Err(_) => ResultRegion::Error(CONNECTION_FAILED_MESSAGE.to_string()),
    }
}

pub fn render_history(outcome: Result<Vec<HistoryEntry>, ClientError>) -> HistoryRegion {
    match outcome {
        Ok(entries) if entries.is_empty() => HistoryRegion::NoHistory,
        Ok(entries) => {
            HistoryRegion::Entries(entries.iter().map(HistoryEntry::display_line).collect())
        }
        Err(_) => HistoryRegion::Error,
    }
}
