//! Domain DTOs for the greeting resource.
//!
//! # Design
//! These types mirror the backend's schema but are defined independently;
//! integration tests catch schema drift. `id` and `created_at` stay opaque
//! strings: the client never interprets either, it only displays and echoes
//! them.

use serde::{Deserialize, Serialize};

/// Upper bound, in characters, for `sender` and `recipient`.
pub const NAME_MAX_CHARS: usize = 50;
/// Upper bound, in characters, for `message`.
pub const MESSAGE_MAX_CHARS: usize = 280;

/// A greeting as returned by the API.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct Greeting {
    pub id: String,
    pub sender: String,
    pub recipient: String,
    pub message: String,
    /// ISO-8601, server-assigned, immutable.
    pub created_at: String,
}

/// Request payload for creating a greeting. Doubles as the shape of the
/// page's form and edit drafts.
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq, Eq)]
pub struct CreateGreeting {
    pub sender: String,
    pub recipient: String,
    pub message: String,
}

impl CreateGreeting {
    /// Client-side validation: every field non-empty and within its limit.
    /// Invalid drafts never reach the network; the triggering action is
    /// disabled instead of surfacing a runtime error.
    pub fn is_valid(&self) -> bool {
        field_within(&self.sender, NAME_MAX_CHARS)
            && field_within(&self.recipient, NAME_MAX_CHARS)
            && field_within(&self.message, MESSAGE_MAX_CHARS)
    }
}

fn field_within(value: &str, max_chars: usize) -> bool {
    let chars = value.chars().count();
    chars >= 1 && chars <= max_chars
}

/// Request payload for updating a greeting. Only the fields present in the
/// JSON are applied; omitted fields remain unchanged on the server.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct UpdateGreeting {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub sender: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub recipient: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub message: Option<String>,
}

#[cfg(test)]
mod tests {
    use super::*;

    fn draft(sender: &str, recipient: &str, message: &str) -> CreateGreeting {
        CreateGreeting {
            sender: sender.to_string(),
            recipient: recipient.to_string(),
            message: message.to_string(),
        }
    }

    #[test]
    fn greeting_roundtrips_through_json() {
        let raw = r#"{"id":"1","sender":"Alice","recipient":"Bob","message":"Hi","created_at":"2024-01-01T00:00:00Z"}"#;
        let greeting: Greeting = serde_json::from_str(raw).unwrap();
        assert_eq!(greeting.id, "1");
        assert_eq!(greeting.created_at, "2024-01-01T00:00:00Z");
        let back = serde_json::to_string(&greeting).unwrap();
        let again: Greeting = serde_json::from_str(&back).unwrap();
        assert_eq!(again, greeting);
    }

    #[test]
    fn valid_draft_passes() {
        assert!(draft("Alice", "Bob", "Hi").is_valid());
    }

    #[test]
    fn empty_field_fails_validation() {
        assert!(!draft("", "Bob", "Hi").is_valid());
        assert!(!draft("Alice", "", "Hi").is_valid());
        assert!(!draft("Alice", "Bob", "").is_valid());
    }

    #[test]
    fn limits_are_counted_in_characters() {
        let at_limit = "å".repeat(NAME_MAX_CHARS);
        assert!(draft(&at_limit, "Bob", "Hi").is_valid());
        let over = "å".repeat(NAME_MAX_CHARS + 1);
        assert!(!draft(&over, "Bob", "Hi").is_valid());
        let long_message = "x".repeat(MESSAGE_MAX_CHARS + 1);
        assert!(!draft("Alice", "Bob", &long_message).is_valid());
    }

    #[test]
    fn update_omits_absent_fields() {
        let update = UpdateGreeting {
            message: Some("New".to_string()),
            ..Default::default()
        };
        let json: serde_json::Value = serde_json::to_value(&update).unwrap();
        assert_eq!(json, serde_json::json!({"message": "New"}));
    }

    #[test]
    fn update_all_fields_optional() {
        let update: UpdateGreeting = serde_json::from_str("{}").unwrap();
        assert!(update.sender.is_none());
        assert!(update.recipient.is_none());
        assert!(update.message.is_none());
    }
}
