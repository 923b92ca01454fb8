//! Error types for the roster pipeline
//!
//! This module defines custom error types used throughout the application.

use thiserror::Error;

/// Errors that can occur while talking to the fantasy API
#[derive(Error, Debug)]
pub enum FetchError {
    /// HTTP request error
    #[error("HTTP request failed: {0}")]
    Http(#[from] reqwest::Error),

    /// Non-success status from the API
    #[error("API returned status {status}: {body}")]
    Status { status: u16, body: String },

    /// Request timeout
    #[error("Request timeout")]
    Timeout,

    /// Invalid URL
    #[error("Invalid URL: {0}")]
    InvalidUrl(String),
}

impl FetchError {
    /// Statuses worth another attempt
    pub fn is_retryable_status(status: u16) -> bool {
        matches!(status, 429 | 500 | 502 | 503 | 504)
    }

    /// Whether a retry could succeed
    pub fn is_recoverable(&self) -> bool {
        match self {
            Self::Http(e) => e.is_connect() || e.is_timeout(),
            Self::Status { status, .. } => Self::is_retryable_status(*status),
            Self::Timeout => true,
            Self::InvalidUrl(_) => false,
        }
    }

    pub(crate) fn from_reqwest(err: reqwest::Error) -> Self {
        if err.is_timeout() {
            Self::Timeout
        } else {
            Self::Http(err)
        }
    }
}

/// Errors raised while acquiring a bearer token
#[derive(Error, Debug)]
pub enum AuthError {
    /// Token endpoint could not be reached
    #[error("Token request failed: {0}")]
    Http(#[from] reqwest::Error),

    /// Token endpoint refused the credentials
    #[error("Token endpoint rejected credentials ({status}): {message}")]
    Rejected { status: u16, message: String },

    /// Token endpoint answered with something unusable
    #[error("Invalid token response: {0}")]
    InvalidResponse(String),

    /// Credential material is missing or empty
    #[error("Missing credential: {0}")]
    MissingCredential(&'static str),
}

impl AuthError {
    pub fn is_recoverable(&self) -> bool {
        match self {
            Self::Http(e) => e.is_connect() || e.is_timeout(),
            Self::Rejected { status, .. } => FetchError::is_retryable_status(*status),
            Self::InvalidResponse(_) | Self::MissingCredential(_) => false,
        }
    }
}

/// Roster document did not have the expected shape
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum MalformedRosterError {
    /// Document is not well-formed XML
    #[error("Roster document is not valid XML: {0}")]
    InvalidXml(String),

    /// No roster container element
    #[error("Roster container element not found")]
    MissingRosterContainer,

    /// Player entry without an id
    #[error("Player entry #{index} has no player_id")]
    MissingPlayerId { index: usize },

    /// Player entry without eligible positions
    #[error("Player {player_id} has no eligible position")]
    MissingEligiblePosition { player_id: String },

    /// Player entry without a slot assignment
    #[error("Player {player_id} has no selected_position element")]
    MissingSelectedPosition { player_id: String },

    /// Slot assignment without the starting flag
    #[error("Player {player_id} has no is_starting attribute")]
    MissingStartingFlag { player_id: String },

    /// Starting flag outside "true"/"false"
    #[error("Player {player_id} has invalid is_starting value '{value}'")]
    InvalidStartingFlag { player_id: String, value: String },
}

/// Errors that can occur while encoding an update document
#[derive(Error, Debug)]
pub enum EncodeError {
    /// XML writer failure
    #[error("XML write failed: {0}")]
    Xml(String),

    /// Writer produced non UTF-8 output
    #[error("Encoded document is not UTF-8: {0}")]
    Utf8(#[from] std::string::FromUtf8Error),

    /// JSON rendering failure
    #[error("JSON encoding failed: {0}")]
    Json(#[from] serde_json::Error),
}
