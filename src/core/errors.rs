// src/core/errors.rs

//! Defines the error type for the event dispatch core.

use thiserror::Error;

/// Failures surfaced by the dispatcher and its run loop.
/// Handler and reconciler failures are not represented here.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum SerferError {
    /// The run loop was started without a way to stop it.
    #[error("Shutdown signal cannot be absent")]
    MissingShutdownSignal,

    #[error("Invalid configuration: {0}")]
    InvalidConfig(String),
}
