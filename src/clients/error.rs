//! Error types for the remote collection client.

use crate::validation::ValidationErrors;
use thiserror::Error;

/// Errors that can occur while talking to the remote user collection.
#[derive(Debug, Clone, Error, PartialEq)]
pub enum ClientError {
    /// Network failure, non-validation HTTP error, or an undecodable payload.
    #[error("{message}")]
    Transport {
        message: String,
        server_message: Option<String>,
    },

    /// The server rejected the submitted draft with per-field messages.
    #[error("validation failed: {field_errors}")]
    Validation {
        server_message: Option<String>,
        field_errors: ValidationErrors,
    },
}

impl ClientError {
    pub fn transport(message: impl Into<String>) -> Self {
        ClientError::Transport {
            message: message.into(),
            server_message: None,
        }
    }

    /// Message supplied by the server in the failure body, if any.
    pub fn server_message(&self) -> Option<&str> {
        match self {
            ClientError::Transport { server_message, .. }
            | ClientError::Validation { server_message, .. } => server_message.as_deref(),
        }
    }

    /// Per-field errors supplied by the server, if any.
    pub fn field_errors(&self) -> Option<&ValidationErrors> {
        match self {
            ClientError::Validation { field_errors, .. } => Some(field_errors),
            ClientError::Transport { .. } => None,
        }
    }

    /// Best available description: the server message, else this error's own text.
    pub fn describe(&self) -> String {
        self.server_message()
            .map(str::to_owned)
            .unwrap_or_else(|| self.to_string())
    }
}
