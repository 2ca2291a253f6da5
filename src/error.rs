//! Error types for the Carbon Calculator API client

use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Errors that can occur when interacting with the Carbon Calculator API
#[derive(Debug, Error)]
pub enum ServiceError {
    /// Missing `CARBON_API_KEY` environment variable
    #[error("Missing CARBON_API_KEY environment variable")]
    MissingApiKey,

    /// HTTP request failed before a response was received
    #[error("Request failed: {0}")]
    RequestFailed(String),

    /// Response body could not be parsed into the expected shape
    #[error("Response parsing failed: {0}")]
    ResponseParseFailed(String),

    /// Unauthorized - invalid API key
    #[error("Unauthorized - invalid API key")]
    Unauthorized,

    /// Remote service rejected the call
    #[error("API error (status {status}): {}", summarize(.errors))]
    Api {
        /// HTTP status code
        status: u16,
        /// Structured error entries reported by the remote service
        errors: Vec<ServiceErrorItem>,
    },

    /// Request rejected locally before any remote call was made
    #[error("Invalid request: {0}")]
    InvalidRequest(String),
}

impl ServiceError {
    /// Structured error entries from the remote service, if any.
    ///
    /// Remote rejections (`Api`) always carry at least one entry; transport
    /// and local-validation errors carry none.
    #[must_use]
    pub fn service_errors(&self) -> &[ServiceErrorItem] {
        match self {
            Self::Api { errors, .. } => errors,
            _ => &[],
        }
    }
}

/// One structured error entry from the remote service's error envelope
#[derive(Clone, Debug, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "PascalCase")]
pub struct ServiceErrorItem {
    /// Subsystem that produced the error
    pub source: String,
    /// Machine-readable reason code
    pub reason_code: String,
    /// Human-readable description
    pub description: String,
    /// Whether the remote service considers the error recoverable
    #[serde(default)]
    pub recoverable: bool,
    /// Additional detail, when provided
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub details: Option<String>,
}

impl ServiceErrorItem {
    /// Synthesize an entry from a raw response body, for responses that do
    /// not carry the structured envelope.
    #[must_use]
    pub fn from_raw(status: u16, body: &str) -> Self {
        Self {
            source: "carbon-calculator-client".to_string(),
            reason_code: format!("HTTP_{status}"),
            description: if body.is_empty() {
                "Remote service returned an error with no body".to_string()
            } else {
                body.to_string()
            },
            recoverable: false,
            details: None,
        }
    }
}

fn summarize(errors: &[ServiceErrorItem]) -> String {
    errors
        .iter()
        .map(|e| format!("{}: {}", e.reason_code, e.description))
        .collect::<Vec<_>>()
        .join("; ")
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_api_error_exposes_entries() {
        let err = ServiceError::Api {
            status: 400,
            errors: vec![ServiceErrorItem::from_raw(400, "bad bin")],
        };
        assert_eq!(err.service_errors().len(), 1);
        assert_eq!(err.service_errors()[0].reason_code, "HTTP_400");
    }

    #[test]
    fn test_transport_error_has_no_entries() {
        let err = ServiceError::RequestFailed("connection refused".to_string());
        assert!(err.service_errors().is_empty());
    }

    #[test]
    #[allow(clippy::unwrap_used)] // Test code
    fn test_error_item_envelope_field_names() {
        let item = ServiceErrorItem {
            source: "CarbonCalculator".to_string(),
            reason_code: "INVALID_CARD".to_string(),
            description: "FPAN failed validation".to_string(),
            recoverable: false,
            details: None,
        };

        let json = serde_json::to_string(&item).unwrap();
        assert!(json.contains(r#""Source":"CarbonCalculator""#));
        assert!(json.contains(r#""ReasonCode":"INVALID_CARD""#));
        assert!(json.contains(r#""Recoverable":false"#));
    }

    #[test]
    fn test_api_error_display_includes_reason_codes() {
        let err = ServiceError::Api {
            status: 400,
            errors: vec![ServiceErrorItem {
                source: "CarbonCalculator".to_string(),
                reason_code: "INVALID_CARD".to_string(),
                description: "FPAN failed validation".to_string(),
                recoverable: false,
                details: None,
            }],
        };
        let rendered = err.to_string();
        assert!(rendered.contains("status 400"));
        assert!(rendered.contains("INVALID_CARD"));
    }
}
