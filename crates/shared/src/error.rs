use thiserror::Error;

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum InputError {
    #[error("measurement input is empty")]
    Empty,
}

/// A response body that parsed as JSON but cannot be rendered.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ProtocolError {
    #[error("response body is null")]
    NullBody,
    #[error("`processed` is not a list")]
    ProcessedNotList,
    #[error("`history` is not a list")]
    HistoryNotList,
    #[error("history entry {index} is null")]
    NullHistoryEntry { index: usize },
    #[error("history entry {index} has no `processed` list")]
    EntryProcessedNotList { index: usize },
}
