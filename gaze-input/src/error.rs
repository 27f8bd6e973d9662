//! Parse errors for textual key names

use thiserror::Error;

/// Errors produced when parsing key names
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum ParseError {
    #[error("Unknown function key: {0}")]
    UnknownFunctionKey(String),
}
