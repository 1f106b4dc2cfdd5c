//! Unified application error type.
//! Every layer (utils, store, core, cli) returns AppError so the caller can
//! decide how to present a failure. `kind()` gives the presentation layer a
//! payload-free tag to switch on.

use std::io;
use thiserror::Error;

#[derive(Error, Debug)]
pub enum AppError {
    // ---------------------------
    // Parsing errors
    // ---------------------------
    #[error("Invalid date/time format: {0}")]
    InvalidTimeFormat(String),

    #[error("Invalid date format: {0}")]
    InvalidDate(String),

    #[error("Invalid field '{0}': use start, end or break-N-start / break-N-end")]
    InvalidField(String),

    // ---------------------------
    // Session lifecycle
    // ---------------------------
    #[error("Invalid transition: {0}")]
    InvalidTransition(String),

    #[error("Work session has not been started for {0}")]
    SessionNotStarted(String),

    #[error("Work session already ended for {0}")]
    SessionEnded(String),

    // ---------------------------
    // Records / admin
    // ---------------------------
    #[error("No work record found for user {user_id} on {date}")]
    RecordNotFound { user_id: String, date: String },

    #[error("Invalid break number {index}: the record has {count} break(s)")]
    InvalidBreakIndex { index: usize, count: usize },

    #[error("Unauthorized: the '{0}' role is required")]
    Unauthorized(String),

    // ---------------------------
    // Storage
    // ---------------------------
    #[error("Store unavailable: {0}")]
    StoreUnavailable(String),

    #[error("I/O error: {0}")]
    Io(#[from] io::Error),

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    // ---------------------------
    // Config errors
    // ---------------------------
    #[error("Configuration error: {0}")]
    Config(String),

    #[error("YAML error: {0}")]
    Yaml(#[from] serde_yaml::Error),
}

/// Payload-free classification of [`AppError`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorKind {
    InvalidTimeFormat,
    InvalidDate,
    InvalidField,
    InvalidTransition,
    SessionNotStarted,
    SessionEnded,
    RecordNotFound,
    InvalidBreakIndex,
    Unauthorized,
    StoreUnavailable,
    Config,
}

impl AppError {
    pub fn kind(&self) -> ErrorKind {
        match self {
            AppError::InvalidTimeFormat(_) => ErrorKind::InvalidTimeFormat,
            AppError::InvalidDate(_) => ErrorKind::InvalidDate,
            AppError::InvalidField(_) => ErrorKind::InvalidField,
            AppError::InvalidTransition(_) => ErrorKind::InvalidTransition,
            AppError::SessionNotStarted(_) => ErrorKind::SessionNotStarted,
            AppError::SessionEnded(_) => ErrorKind::SessionEnded,
            AppError::RecordNotFound { .. } => ErrorKind::RecordNotFound,
            AppError::InvalidBreakIndex { .. } => ErrorKind::InvalidBreakIndex,
            AppError::Unauthorized(_) => ErrorKind::Unauthorized,
            AppError::StoreUnavailable(_) | AppError::Io(_) | AppError::Json(_) => {
                ErrorKind::StoreUnavailable
            }
            AppError::Config(_) | AppError::Yaml(_) => ErrorKind::Config,
        }
    }

    /// Storage failures are the only ones worth shouting about.
    pub fn is_store_failure(&self) -> bool {
        self.kind() == ErrorKind::StoreUnavailable
    }
}

pub type AppResult<T> = Result<T, AppError>;
