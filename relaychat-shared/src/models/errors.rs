//! # Gateway Error Bodies

use serde::{Deserialize, Serialize};
use serde_json::Value;

/// Error body returned by the gateway.
///
/// The gateway forwards errors from several services, so the text may arrive
/// as `detail` (a string, or a list of validation errors) or as `message`.
#[derive(Debug, Clone, Default, Deserialize, Serialize, PartialEq)]
pub struct GatewayErrorBody {
    /// Service-provided detail, usually a string
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub detail: Option<Value>,
    /// Alternate message field some services use
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub message: Option<String>,
}

impl GatewayErrorBody {
    /// Creates an error body with just a detail string.
    pub fn with_detail(detail: impl Into<String>) -> Self {
        Self {
            detail: Some(Value::String(detail.into())),
            message: None,
        }
    }

    /// Best human-readable description, `detail` first, then `message`.
    ///
    /// # Returns
    /// `None` when neither field carries any text.
    pub fn description(&self) -> Option<String> {
        let detail = match &self.detail {
            Some(Value::String(text)) if !text.is_empty() => Some(text.clone()),
            Some(Value::Null | Value::String(_)) | None => None,
            Some(other) => Some(other.to_string()),
        };
        detail.or_else(|| self.message.clone().filter(|text| !text.is_empty()))
    }

    /// Description, or `fallback` when the body carries none.
    pub fn describe_or(&self, fallback: &str) -> String {
        self.description().unwrap_or_else(|| fallback.to_owned())
    }
}

impl std::fmt::Display for GatewayErrorBody {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.describe_or("gateway request failed"))
    }
}

impl std::error::Error for GatewayErrorBody {}

#[cfg(test)]
mod tests {
    use super::*;

    /// Test a FastAPI-style string detail
    #[test]
    fn test_detail_string() {
        let body: GatewayErrorBody =
            serde_json::from_str(r#"{"detail":"Thread not found"}"#).unwrap();
        assert_eq!(body.description().as_deref(), Some("Thread not found"));
        assert_eq!(body.to_string(), "Thread not found");
    }

    /// Test that detail wins over message
    #[test]
    fn test_detail_preferred_over_message() {
        let body: GatewayErrorBody =
            serde_json::from_str(r#"{"detail":"from detail","message":"from message"}"#).unwrap();
        assert_eq!(body.description().as_deref(), Some("from detail"));
    }

    /// Test message fallback
    #[test]
    fn test_message_fallback() {
        let body: GatewayErrorBody = serde_json::from_str(r#"{"message":"upstream down"}"#).unwrap();
        assert_eq!(body.description().as_deref(), Some("upstream down"));
    }

    /// Test validation error lists are rendered as JSON
    #[test]
    fn test_structured_detail() {
        let body: GatewayErrorBody =
            serde_json::from_str(r#"{"detail":[{"loc":["query","channel_id"],"msg":"field required"}]}"#)
                .unwrap();
        let description = body.description().unwrap();
        assert!(description.contains("field required"));
    }

    /// Test the caller-supplied fallback
    #[test]
    fn test_fallback_when_empty() {
        let body: GatewayErrorBody = serde_json::from_str(r#"{"detail":""}"#).unwrap();
        assert_eq!(body.describe_or("Failed to fetch thread"), "Failed to fetch thread");
        assert_eq!(GatewayErrorBody::default().description(), None);
    }

    /// Test the detail constructor
    #[test]
    fn test_with_detail() {
        let body = GatewayErrorBody::with_detail("nope");
        assert_eq!(
            serde_json::to_string(&body).unwrap(),
            r#"{"detail":"nope"}"#
        );
    }
}
