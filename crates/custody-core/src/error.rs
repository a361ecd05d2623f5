//! Error types for parsing the event vocabulary.
//!
//! The simulation itself is total and never fails. Errors only arise when
//! text from outside (command-line arguments, files) is turned into events.
use thiserror::Error;

#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum EventParseError {
    #[error("unknown failure event: {0:?}")] UnknownTag(String),
}

#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum TimelineParseError {
    #[error("expected DAY:EVENT, got {0:?}")] MissingSeparator(String),
    #[error("invalid day {0:?}")] InvalidDay(String),
    #[error(transparent)] Event(#[from] EventParseError),
}
