//! Unified error handling for the rosterbot crate
//!
//! Domain errors live next to the code that raises them (see
//! [`crate::utils::error`]). This module folds them into a single [`Error`]
//! for the run orchestrator and the binary.
//!
//! # Architecture
//!
//! - [`RosterErrorTrait`] - Common interface implemented by the unified error
//! - [`ErrorCategory`] - Classification of errors for handling strategies
//! - [`Error`] - Unified error enum wrapping all domain-specific errors
//!
//! Nothing in the crate recovers locally: every error aborts the current run.
//! `is_recoverable` only tells the caller whether the next scheduled run is
//! likely to succeed without intervention.

use std::io;
use thiserror::Error;

pub use crate::utils::error::{AuthError, EncodeError, FetchError, MalformedRosterError};

/// Common trait for rosterbot error types
pub trait RosterErrorTrait: std::error::Error {
    /// Check if this error is transient
    fn is_recoverable(&self) -> bool;

    /// Get the error category for handling strategies
    fn category(&self) -> ErrorCategory;
}

/// Classification of errors for handling strategies
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ErrorCategory {
    /// Network-related errors (HTTP, timeout, status)
    Network,
    /// Token acquisition errors
    Auth,
    /// Roster document errors
    Parsing,
    /// Update document errors
    Encoding,
    /// Local I/O errors
    Io,
}

impl ErrorCategory {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Network => "network",
            Self::Auth => "auth",
            Self::Parsing => "parsing",
            Self::Encoding => "encoding",
            Self::Io => "io",
        }
    }
}

impl std::fmt::Display for ErrorCategory {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Unified error type for the rosterbot crate
#[derive(Error, Debug)]
pub enum Error {
    /// Token acquisition failed
    #[error("Authentication error: {0}")]
    Auth(#[from] AuthError),

    /// Roster fetch or update failed
    #[error("Fetch error: {0}")]
    Fetch(#[from] FetchError),

    /// Roster document malformed
    #[error("Malformed roster: {0}")]
    Roster(#[from] MalformedRosterError),

    /// Update document could not be built
    #[error("Encode error: {0}")]
    Encode(#[from] EncodeError),

    /// I/O errors
    #[error("I/O error: {0}")]
    Io(#[from] io::Error),
}

impl RosterErrorTrait for Error {
    fn is_recoverable(&self) -> bool {
        match self {
            Self::Auth(e) => e.is_recoverable(),
            Self::Fetch(e) => e.is_recoverable(),
            Self::Roster(_) | Self::Encode(_) => false,
            Self::Io(_) => true,
        }
    }

    fn category(&self) -> ErrorCategory {
        match self {
            Self::Auth(_) => ErrorCategory::Auth,
            Self::Fetch(_) => ErrorCategory::Network,
            Self::Roster(_) => ErrorCategory::Parsing,
            Self::Encode(_) => ErrorCategory::Encoding,
            Self::Io(_) => ErrorCategory::Io,
        }
    }
}

/// Result type alias using the unified Error type
pub type Result<T> = std::result::Result<T, Error>;
