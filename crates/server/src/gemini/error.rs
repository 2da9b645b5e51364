//! Error types for the Gemini API client.

use thiserror::Error;

/// Errors that can occur when interacting with the Gemini API.
#[derive(Debug, Error)]
pub enum GeminiError {
    /// HTTP request failed.
    #[error("HTTP error: {0}")]
    Http(#[from] reqwest::Error),

    /// Gemini API returned an error.
    #[error("API error ({status}): {message}")]
    Api {
        /// Numeric error code from the API.
        code: i32,
        /// Error status from the API (e.g., `INVALID_ARGUMENT`).
        status: String,
        /// Error message.
        message: String,
    },

    /// Rate limited by the API.
    #[error("rate limited, retry after {0} seconds")]
    RateLimited(u64),

    /// Authentication failed.
    #[error("unauthorized: {0}")]
    Unauthorized(String),

    /// Failed to parse response.
    #[error("parse error: {0}")]
    Parse(String),

    /// The response contained no usable payload of the requested kind.
    #[error("no {0} in response")]
    NoPayload(&'static str),

    /// The video operation did not complete within the poll bound.
    #[error("video generation did not complete after {attempts} polls")]
    Timeout {
        /// Number of polls performed before giving up.
        attempts: u32,
    },

    /// The caller cancelled the operation (e.g., the consuming view was
    /// dismissed or the server is shutting down).
    #[error("video generation cancelled")]
    Cancelled,
}

/// API error response envelope from Gemini.
#[derive(Debug, serde::Deserialize)]
pub struct ApiErrorResponse {
    /// Nested error details.
    pub error: ApiError,
}

/// Nested error details.
#[derive(Debug, serde::Deserialize)]
pub struct ApiError {
    /// Numeric error code.
    pub code: i32,
    /// Error status (e.g., `INVALID_ARGUMENT`, `RESOURCE_EXHAUSTED`).
    #[serde(default)]
    pub status: String,
    /// Error message.
    pub message: String,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_gemini_error_display() {
        let err = GeminiError::RateLimited(30);
        assert_eq!(err.to_string(), "rate limited, retry after 30 seconds");

        let err = GeminiError::Timeout { attempts: 60 };
        assert_eq!(
            err.to_string(),
            "video generation did not complete after 60 polls"
        );

        let err = GeminiError::NoPayload("audio data");
        assert_eq!(err.to_string(), "no audio data in response");
    }

    #[test]
    fn test_api_error_deserialization() {
        let json = r#"{
            "error": {
                "code": 400,
                "message": "Invalid model name",
                "status": "INVALID_ARGUMENT"
            }
        }"#;

        let response: ApiErrorResponse = serde_json::from_str(json).expect("deserialize");
        assert_eq!(response.error.code, 400);
        assert_eq!(response.error.status, "INVALID_ARGUMENT");
        assert_eq!(response.error.message, "Invalid model name");
    }
}
