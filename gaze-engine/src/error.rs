//! Error types surfaced by the engine

use std::io;

use thiserror::Error;

/// A failure reported by any downstream collaborator
///
/// The engine treats the cause as opaque; it only surfaces it to the user.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
#[error("{source_name}: {message}")]
pub struct ServiceError {
    /// Which collaborator raised it
    pub source_name: String,
    pub message: String,
}

impl ServiceError {
    pub fn new(source_name: impl Into<String>, message: impl Into<String>) -> Self {
        Self {
            source_name: source_name.into(),
            message: message.into(),
        }
    }
}

/// Why a calibration attempt did not succeed
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum CalibrationError {
    /// Calibration ran to completion but was not successful
    #[error("{}", .0.as_deref().unwrap_or("Something went wrong, but I don't know what - please check the logs"))]
    Unsuccessful(Option<String>),
    /// Calibration raised a failure while running
    #[error("{0}")]
    Faulted(String),
}

/// Errors that can occur while loading settings
#[derive(Error, Debug)]
pub enum SettingsError {
    #[error("IO error: {0}")]
    Io(#[from] io::Error),
    #[error("Invalid value for {key}: {value:?}")]
    InvalidValue { key: String, value: String },
}
