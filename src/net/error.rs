//! API error taxonomy and message normalization.
//!
//! ERROR HANDLING
//! ==============
//! Views only ever show one human-readable line, so every variant carries the
//! already-normalized message and `Display` prints exactly that.

#[cfg(test)]
#[path = "error_test.rs"]
mod error_test;

use serde::Deserialize;

/// Message used when neither the server nor the transport said anything.
pub const FALLBACK_MESSAGE: &str = "Request failed";

#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum ApiError {
    /// No response was received (network failure, timeout, aborted request).
    #[error("{message}")]
    Transport { message: String },
    /// The server answered with a non-success status.
    #[error("{message}")]
    Server { status: u16, message: String },
    /// A 401 that was intercepted: the session has already been cleared and
    /// navigation to the login route forced.
    #[error("{message}")]
    Unauthorized { message: String },
    /// The response arrived but its body could not be decoded.
    #[error("{message}")]
    Decode { message: String },
}

impl ApiError {
    pub fn message(&self) -> &str {
        match self {
            Self::Transport { message }
            | Self::Server { message, .. }
            | Self::Unauthorized { message }
            | Self::Decode { message } => message,
        }
    }

    /// HTTP status, when a response was received.
    pub fn status(&self) -> Option<u16> {
        match self {
            Self::Server { status, .. } => Some(*status),
            Self::Unauthorized { .. } => Some(401),
            Self::Transport { .. } | Self::Decode { .. } => None,
        }
    }

    /// True for intercepted 401s and for raw 401s returned by the download path.
    pub fn is_unauthorized(&self) -> bool {
        self.status() == Some(401)
    }
}

#[derive(Deserialize)]
struct MessageBody {
    message: Option<String>,
}

/// Extract the server-supplied `message` field from a JSON error body.
pub(crate) fn server_message(body: &[u8]) -> Option<String> {
    serde_json::from_slice::<MessageBody>(body)
        .ok()
        .and_then(|b| b.message)
        .map(|m| m.trim().to_owned())
        .filter(|m| !m.is_empty())
}

/// Pick the message for a failed call: server message, then the
/// transport-level message, then [`FALLBACK_MESSAGE`].
pub(crate) fn failure_message(body: Option<&[u8]>, transport: Option<&str>) -> String {
    if let Some(message) = body.and_then(server_message) {
        return message;
    }
    match transport.map(str::trim) {
        Some(message) if !message.is_empty() => message.to_owned(),
        _ => FALLBACK_MESSAGE.to_owned(),
    }
}

/// Transport-level description of an HTTP failure status.
pub(crate) fn status_failed_message(status: u16) -> String {
    format!("Request failed with status code {status}")
}
