//! JSON envelopes shared by every endpoint.
//!
//! Success: `{ "status": "success", "message": ..., "payload": ... }`
//! Failure: `{ "status": "error", "message": ..., "payload": null | { "error": ... } }`

use serde::{Deserialize, Serialize};

/// Envelope status discriminator.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum EnvelopeStatus {
    /// The request succeeded.
    Success,
    /// The request failed.
    Error,
}

/// Standard success response wrapper.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ApiResponse<T> {
    /// Always `success`.
    pub status: EnvelopeStatus,
    /// Human-readable summary.
    pub message: String,
    /// Response data.
    pub payload: T,
}

impl<T: Serialize> ApiResponse<T> {
    /// Creates a successful response.
    pub fn ok(message: impl Into<String>, payload: T) -> Self {
        Self {
            status: EnvelopeStatus::Success,
            message: message.into(),
            payload,
        }
    }
}

impl ApiResponse<Option<()>> {
    /// Creates a successful response with a `null` payload.
    pub fn message(message: impl Into<String>) -> Self {
        Self::ok(message, None)
    }
}

/// Detail object carried in an error payload.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct ErrorDetail {
    /// Underlying error description.
    pub error: String,
}

/// Standard error response body.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ErrorEnvelope {
    /// Always `error`.
    pub status: EnvelopeStatus,
    /// Human-readable reason.
    pub message: String,
    /// `null`, or the detail of the failure.
    pub payload: Option<ErrorDetail>,
}

impl ErrorEnvelope {
    /// Builds an error envelope.
    pub fn new(message: impl Into<String>, detail: Option<String>) -> Self {
        Self {
            status: EnvelopeStatus::Error,
            message: message.into(),
            payload: detail.map(|error| ErrorDetail { error }),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_envelope_null_payload() {
        let json = serde_json::to_value(ErrorEnvelope::new("User not authenticated", None))
            .expect("serialize");
        assert_eq!(
            json,
            serde_json::json!({
                "status": "error",
                "message": "User not authenticated",
                "payload": null
            })
        );
    }

    #[test]
    fn test_error_envelope_with_detail() {
        let json = serde_json::to_value(ErrorEnvelope::new(
            "Error checking permissions",
            Some("connection reset".to_string()),
        ))
        .expect("serialize");
        assert_eq!(json["payload"]["error"], "connection reset");
    }

    #[test]
    fn test_success_envelope() {
        let json = serde_json::to_value(ApiResponse::message("Logout successful")).expect("serialize");
        assert_eq!(json["status"], "success");
        assert!(json["payload"].is_null());
    }
}
