//! Error types for the expiry sweep

use std::fmt::Display;
use thiserror::Error;

/// Errors that can occur while sweeping the archive
#[derive(Error, Debug)]
pub enum JanitorError {
    /// The archive store rejected a query or delete
    #[error("Archive store error: {0}")]
    Store(String),

    /// Invalid janitor configuration
    #[error("Invalid janitor configuration: {0}")]
    Config(String),

    /// The sweep worker could not keep running (timer or signal failure)
    #[error("Sweep worker error: {0}")]
    Worker(String),
}

impl JanitorError {
    /// Wrap any store error
    pub fn store(e: impl Display) -> Self {
        JanitorError::Store(e.to_string())
    }
}
