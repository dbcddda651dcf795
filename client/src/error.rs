//! Client error type.
//!
//! ERROR HANDLING
//! ==============
//! Every failure is recoverable by the user (retry, fix the form, log in
//! again). Nothing here retries on its own: callers surface the error and
//! let the user decide.

use fesup_model::{AccountError, WishError};

#[derive(Debug, thiserror::Error)]
pub enum ClientError {
    /// The request never produced a response (DNS, connect, timeout).
    #[error("request failed: {0}")]
    Request(String),

    /// The backend answered with a non-success status.
    #[error("server returned {status}: {message}")]
    Status { status: u16, message: String },

    /// Credentials were rejected.
    #[error("identification refused: {0}")]
    Unauthorized(String),

    /// Admin call attempted by a non-admin identity.
    #[error("forbidden: {0}")]
    Forbidden(String),

    /// The assignment job cannot start because no session has been created.
    #[error("no sessions exist yet; create sessions before launching the assignment")]
    NoSessions,

    /// A run is already in progress locally; a second launch is refused.
    #[error("an assignment run is already in progress")]
    AlreadyRunning,

    /// The response body did not match the expected shape.
    #[error("response decode failed: {0}")]
    Decode(String),

    /// The call needs a logged-in identity of a different kind.
    #[error("not authenticated: {0}")]
    NotAuthenticated(&'static str),

    /// Client-side wish validation blocked the submission.
    #[error(transparent)]
    Wish(#[from] WishError),

    /// An admin account form was refused before sending.
    #[error(transparent)]
    Account(#[from] AccountError),

    /// The session record could not be read or written.
    #[error("session storage failed: {0}")]
    Storage(String),

    #[error("HTTP client build failed: {0}")]
    HttpClientBuild(String),
}

impl ClientError {
    #[must_use]
    pub fn error_code(&self) -> &'static str {
        match self {
            Self::Request(_) => "E_REQUEST",
            Self::Status { .. } => "E_STATUS",
            Self::Unauthorized(_) => "E_UNAUTHORIZED",
            Self::Forbidden(_) => "E_FORBIDDEN",
            Self::NoSessions => "E_NO_SESSIONS",
            Self::AlreadyRunning => "E_ALREADY_RUNNING",
            Self::Decode(_) => "E_DECODE",
            Self::NotAuthenticated(_) => "E_NOT_AUTHENTICATED",
            Self::Wish(_) => "E_WISH_INVALID",
            Self::Account(_) => "E_ACCOUNT_INVALID",
            Self::Storage(_) => "E_STORAGE",
            Self::HttpClientBuild(_) => "E_HTTP_CLIENT_BUILD",
        }
    }
}

impl From<reqwest::Error> for ClientError {
    fn from(error: reqwest::Error) -> Self {
        if error.is_decode() {
            Self::Decode(error.to_string())
        } else {
            Self::Request(error.to_string())
        }
    }
}
