//! Common error types for Travelog.

use thiserror::Error;

/// Common result type for Travelog operations.
pub type Result<T> = std::result::Result<T, Error>;

/// Failure taxonomy shared by the controller and the HTTP client.
///
/// `Validation` and `Precondition` are raised before anything is sent to the
/// network. `Auth` means the API rejected the session (401). `Transient`
/// covers every other failed call; it is always safe to retry the action.
#[derive(Error, Debug)]
pub enum Error {
    /// Required input missing or empty; the request was never issued.
    #[error("Invalid input: {0}")]
    Validation(String),

    /// No valid session. The caller should log in again.
    #[error("Not logged in: {0}")]
    Auth(String),

    /// Operation attempted from the wrong lifecycle state.
    #[error("Not allowed: {0}")]
    Precondition(String),

    /// A failed network call. Local state was not changed.
    #[error("Request failed, try again: {0}")]
    Transient(String),

    /// Configuration loading or validation error.
    #[error("Configuration error: {0}")]
    Config(String),

    /// I/O operation error (wraps std::io::Error).
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}

impl From<reqwest::Error> for Error {
    fn from(err: reqwest::Error) -> Self {
        match err.status() {
            Some(status) if status == reqwest::StatusCode::UNAUTHORIZED => {
                Error::Auth(err.to_string())
            }
            _ => Error::Transient(err.to_string()),
        }
    }
}

impl From<serde_json::Error> for Error {
    fn from(err: serde_json::Error) -> Self {
        Error::Transient(err.to_string())
    }
}
