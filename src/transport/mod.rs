//! Transport collaborator for submitting registrations

mod client;
mod payload;
mod traits;

pub use client::HttpTransport;
pub use payload::{RegistrationPayload, ID_CARD_PART};
pub use traits::RegistrationTransport;

#[cfg(test)]
pub use traits::MockRegistrationTransport;

use serde::{Deserialize, Deserializer, Serialize};
use thiserror::Error;

/// Backend acknowledgement of an accepted registration
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RegistrationReceipt {
    #[serde(deserialize_with = "string_or_number")]
    pub id: String,
    pub status: String,
}

impl RegistrationReceipt {
    pub fn new(id: impl Into<String>, status: impl Into<String>) -> Self {
        Self {
            id: id.into(),
            status: status.into(),
        }
    }
}

fn string_or_number<'de, D: Deserializer<'de>>(deserializer: D) -> Result<String, D::Error> {
    match serde_json::Value::deserialize(deserializer)? {
        serde_json::Value::String(s) => Ok(s),
        serde_json::Value::Number(n) => Ok(n.to_string()),
        other => Err(serde::de::Error::custom(format!(
            "expected string or number id, got {other}"
        ))),
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum TransportError {
    /// The backend answered with a non-success status
    #[error("registration rejected ({status}): {detail}")]
    Rejected { status: u16, detail: String },

    #[error("network error: {0}")]
    Network(String),

    #[error("invalid response: {0}")]
    InvalidResponse(String),

    #[error("invalid payload: {0}")]
    InvalidPayload(String),
}

impl TransportError {
    /// Message supplied by the backend, if any
    pub fn user_message(&self) -> Option<&str> {
        match self {
            Self::Rejected { detail, .. } => Some(detail),
            _ => None,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_receipt_accepts_extra_keys() {
        let json = r#"{"id": "abc", "status": "pending", "created_at": "2026-01-01"}"#;
        let receipt: RegistrationReceipt = serde_json::from_str(json).unwrap();
        assert_eq!(receipt, RegistrationReceipt::new("abc", "pending"));
    }

    #[test]
    fn test_receipt_accepts_numeric_id() {
        let receipt: RegistrationReceipt =
            serde_json::from_str(r#"{"id": 42, "status": "pending"}"#).unwrap();
        assert_eq!(receipt.id, "42");
    }

    #[test]
    fn test_receipt_requires_status() {
        assert!(serde_json::from_str::<RegistrationReceipt>(r#"{"id": "abc"}"#).is_err());
    }

    #[test]
    fn test_only_rejections_carry_user_message() {
        let rejected = TransportError::Rejected {
            status: 409,
            detail: "duplicate student id".to_string(),
        };
        assert_eq!(rejected.user_message(), Some("duplicate student id"));
        assert_eq!(TransportError::Network("reset".into()).user_message(), None);
        assert_eq!(TransportError::InvalidResponse("eof".into()).user_message(), None);
    }
}
