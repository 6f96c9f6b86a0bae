//! Error types for the Todoist client.
//!
//! # Design
//! The dispatcher maps 400/401/403/404 responses to `Api`, carrying the
//! response text Todoist sends back ("Empty token", "Task not found", ...).
//! Statuses the calling operation did not expect, such as a 200 where a
//! delete wants 204, land in `UnexpectedStatus` with the raw body.

use thiserror::Error;

/// Errors returned by `TodoistClient` operations.
#[derive(Debug, Error)]
pub enum ApiError {
    /// No endpoint with this name exists in the registry.
    #[error("endpoint not found: {0}")]
    EndpointNotFound(String),

    /// A required field, path parameter, or payload shape was wrong.
    #[error("invalid input: {0}")]
    InvalidInput(String),

    /// Neither an explicit token nor a process-wide default was available.
    #[error("Empty token")]
    MissingToken,

    /// The HTTP round-trip itself failed.
    #[error("transport error: {0}")]
    Transport(String),

    /// The server answered 400, 401, 403, or 404.
    #[error("{message}")]
    Api { status: u16, message: String },

    /// The server returned a status the operation does not accept.
    #[error("received status code {status}")]
    UnexpectedStatus { status: u16, body: String },

    /// The response body could not be deserialized into the expected type.
    #[error("deserialization failed: {0}")]
    Deserialization(String),

    /// The request payload could not be serialized to JSON.
    #[error("serialization failed: {0}")]
    Serialization(String),
}

impl ApiError {
    /// HTTP status carried by the error, if it came from a response.
    pub fn status(&self) -> Option<u16> {
        match self {
            ApiError::Api { status, .. } | ApiError::UnexpectedStatus { status, .. } => Some(*status),
            _ => None,
        }
    }

    pub fn is_not_found(&self) -> bool {
        matches!(self, ApiError::Api { status: 404, .. })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn api_error_displays_server_text() {
        let err = ApiError::Api {
            status: 401,
            message: "Empty token".to_string(),
        };
        assert_eq!(err.to_string(), "Empty token");
        assert_eq!(err.status(), Some(401));
        assert!(!err.is_not_found());
    }

    #[test]
    fn unexpected_status_mentions_code() {
        let err = ApiError::UnexpectedStatus {
            status: 200,
            body: String::new(),
        };
        assert_eq!(err.to_string(), "received status code 200");
    }

    #[test]
    fn not_found_is_only_404_api_errors() {
        let err = ApiError::Api {
            status: 404,
            message: "Task not found".to_string(),
        };
        assert!(err.is_not_found());
        assert!(!ApiError::EndpointNotFound("GetThing".to_string()).is_not_found());
        assert_eq!(ApiError::MissingToken.status(), None);
    }
}
