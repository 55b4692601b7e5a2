//! # Preview Error Type
//!
//! Unified error type for the preview app.
//!
//! ## Error Flow
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                     Error Flow in gstdesk-preview                       │
//! │                                                                         │
//! │  read input ──────── io::Error ─────────────┐                          │
//! │  parse record ────── serde_json::Error ─────┤                          │
//! │  load config ─────── toml::de::Error ───────┤                          │
//! │  strict checks ───── ValidationError ───────┼──► PreviewError ──► exit │
//! │  prepare document ── CoreError ─────────────┘                          │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```

use gstdesk_core::{CoreError, ValidationError};
use thiserror::Error;

/// Result type alias for preview operations.
pub type PreviewResult<T> = Result<T, PreviewError>;

#[derive(Debug, Error)]
pub enum PreviewError {
    // =========================================================================
    // Input / Output
    // =========================================================================
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    // =========================================================================
    // Configuration
    // =========================================================================
    /// The config file exists but is not valid TOML for [`crate::config::PreviewConfig`].
    #[error("Failed to parse config: {0}")]
    ConfigParse(#[from] toml::de::Error),

    #[error("Invalid configuration: {0}")]
    InvalidConfig(String),

    // =========================================================================
    // Document
    // =========================================================================
    /// The record is valid JSON but its header fields are unusable.
    #[error("Invalid document record: {0}")]
    InvalidRecord(String),

    #[error(transparent)]
    Core(#[from] CoreError),
}

impl From<ValidationError> for PreviewError {
    fn from(err: ValidationError) -> Self {
        PreviewError::Core(CoreError::Validation(err))
    }
}
