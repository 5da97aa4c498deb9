//! Backend call failures.

use thiserror::Error;

use crate::domains::orders::ValidationError;

/// Why a backend call did not produce a usable payload.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum BackendError {
    /// The backend answered with a non-2xx status.
    #[error("{status} {reason}")]
    Status { status: u16, reason: String },

    /// The request never produced a response, or the body was not JSON.
    #[error("{0}")]
    Transport(String),

    /// The payload was JSON but did not match the declared schema.
    #[error("response did not match the order schema: {0}")]
    Schema(#[from] ValidationError),

    /// The configured base URL cannot be used to build request URLs.
    #[error("invalid backend URL '{0}'")]
    InvalidUrl(String),
}

/// Coarse failure class used to pick the user-facing message.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FailureClass {
    NotFound,
    Http,
    Transport,
}

impl BackendError {
    /// Build a status error, using the canonical reason phrase when known.
    pub fn status(status: u16) -> Self {
        let reason = reqwest::StatusCode::from_u16(status)
            .ok()
            .and_then(|s| s.canonical_reason())
            .unwrap_or_default()
            .to_string();
        Self::Status { status, reason }
    }

    /// Build a transport error from an error and its whole source chain.
    pub fn transport(err: &(dyn std::error::Error + 'static)) -> Self {
        let mut message = err.to_string();
        let mut source = err.source();
        while let Some(cause) = source {
            let cause_text = cause.to_string();
            if !message.contains(&cause_text) {
                message.push_str(": ");
                message.push_str(&cause_text);
            }
            source = cause.source();
        }
        Self::Transport(message)
    }

    /// Build a status error with the backend's own reason phrase. hyper only
    /// reports one when it differs from the canonical phrase.
    pub fn status_with_reason(status: u16, reason: Option<String>) -> Self {
        match reason {
            Some(reason) => Self::Status { status, reason },
            None => Self::status(status),
        }
    }

    pub fn class(&self) -> FailureClass {
        match self {
            Self::Status { status: 404, .. } => FailureClass::NotFound,
            Self::Status { .. } => FailureClass::Http,
            Self::Transport(_) | Self::Schema(_) | Self::InvalidUrl(_) => FailureClass::Transport,
        }
    }
}
