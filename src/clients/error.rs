use thiserror::Error;

/// Message shown when a failure carries nothing more specific.
pub const FALLBACK_MESSAGE: &str = "An error occurred";

/// Failure of a single client operation, after retries are exhausted
#[derive(Debug, Clone, PartialEq, Error)]
pub enum ClientError {
    /// Input rejected before any request was made
    #[error("{0}")]
    Validation(String),

    /// Non-2xx reply, or an envelope with `success: false`
    #[error("server returned {status}: {}", .message.as_deref().unwrap_or("no error message"))]
    Server { status: u16, message: Option<String> },

    /// The request never produced an HTTP response
    #[error("transport error: {0}")]
    Transport(String),

    /// The reply did not match the expected payload shape
    #[error("unexpected response shape: {0}")]
    Decode(String),
}

impl ClientError {
    /// Whether another attempt may succeed.
    pub fn is_transient(&self) -> bool {
        match self {
            ClientError::Transport(_) => true,
            ClientError::Server { status, .. } => {
                *status == 408 || *status == 429 || (500..600).contains(status)
            }
            ClientError::Validation(_) | ClientError::Decode(_) => false,
        }
    }

    /// Single user-facing line for this failure.
    ///
    /// The server's `error` field wins, then the transport message, then
    /// [`FALLBACK_MESSAGE`].
    pub fn user_message(&self) -> String {
        let message = match self {
            ClientError::Validation(message) => Some(message.clone()),
            ClientError::Server {
                message: Some(message),
                ..
            } => Some(message.clone()),
            ClientError::Server {
                status,
                message: None,
            } => Some(format!("Server responded with status {}", status)),
            ClientError::Transport(message) => Some(message.clone()),
            ClientError::Decode(_) => None,
        };

        message
            .map(|m| m.trim().to_string())
            .filter(|m| !m.is_empty())
            .unwrap_or_else(|| FALLBACK_MESSAGE.to_string())
    }
}

impl From<reqwest::Error> for ClientError {
    fn from(err: reqwest::Error) -> Self {
        if err.is_decode() {
            ClientError::Decode(err.to_string())
        } else {
            ClientError::Transport(err.to_string())
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn server_error_field_wins() {
        let err = ClientError::Server {
            status: 400,
            message: Some("Not enough rooms available".to_string()),
        };
        assert_eq!(err.user_message(), "Not enough rooms available");
    }

    #[test]
    fn blank_messages_fall_back() {
        let err = ClientError::Server {
            status: 400,
            message: Some("  ".to_string()),
        };
        assert_eq!(err.user_message(), FALLBACK_MESSAGE);
        assert_eq!(
            ClientError::Transport(String::new()).user_message(),
            FALLBACK_MESSAGE
        );
        assert_eq!(
            ClientError::Decode("missing field `rooms`".into()).user_message(),
            FALLBACK_MESSAGE
        );
    }

    #[test]
    fn transport_message_used_without_server_error() {
        let err = ClientError::Transport("connection refused".into());
        assert_eq!(err.user_message(), "connection refused");
    }

    #[test]
    fn only_transport_and_retryable_statuses_are_transient() {
        assert!(ClientError::Transport("reset".into()).is_transient());
        for status in [408, 429, 500, 503] {
            assert!(ClientError::Server { status, message: None }.is_transient());
        }
        for status in [400, 404, 409] {
            assert!(!ClientError::Server { status, message: None }.is_transient());
        }
        assert!(!ClientError::Validation("bad".into()).is_transient());
        assert!(!ClientError::Decode("bad".into()).is_transient());
    }
}
