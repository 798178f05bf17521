use thiserror::Error;

/// Errors produced while ingesting external data into Frost values.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum TypeError {
    #[error("expected a mapping, got {0}")]
    NotAMapping(&'static str),
}
