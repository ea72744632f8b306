//! Crate error type.
//!
//! Failing to place a lesson is not an error: it is reported as a
//! [`Conflict`](crate::models::Conflict) inside the result. Errors here
//! cover the crate boundary only (configuration, transports, lookups).

use thiserror::Error;

/// Errors raised at the crate boundary.
#[derive(Debug, Error)]
pub enum TimetableError {
    /// Configuration values are inconsistent.
    #[error("invalid configuration: {0}")]
    Config(String),

    /// Configuration file is not valid TOML for
    /// [`GeneratorConfig`](crate::config::GeneratorConfig).
    #[error("failed to parse configuration: {0}")]
    ConfigParse(#[from] toml::de::Error),

    /// JSON transport could not be encoded or decoded.
    #[error("json transport error: {0}")]
    Json(#[from] serde_json::Error),

    /// Filesystem access failed.
    #[error("io error: {0}")]
    Io(#[from] std::io::Error),

    /// The calendar collaborator has no template with this id.
    #[error("calendar template not found: {0}")]
    TemplateNotFound(String),

    /// A day tag could not be parsed.
    #[error("invalid day tag: {0:?}")]
    InvalidDay(String),

    /// A block kind could not be parsed.
    #[error("invalid block kind: {0:?}")]
    InvalidBlock(String),
}

/// Crate result alias.
pub type Result<T> = std::result::Result<T, TimetableError>;
