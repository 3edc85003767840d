//! Entity references and canonical-identifier resolution.
//!
//! The Grantly API accepts either an opaque id or a natural key (an email
//! address) in the same reference field. Resolution therefore never touches
//! the network: it picks one representation, normalizes it, and fails early
//! when neither is usable.
//!
//! # Example
//!
//! ```
//! use grantly_core::reference::EntityReference;
//!
//! let owner = EntityReference::from_email("  User@Example.com ");
//! assert_eq!(owner.resolve("owner").unwrap(), "user@example.com");
//!
//! let by_id = EntityReference::from_id("9ae0fa0e-6c5a-4cca-9a86-a72f4b7b4bd9");
//! assert_eq!(by_id.resolve("owner").unwrap(), "9ae0fa0e-6c5a-4cca-9a86-a72f4b7b4bd9");
//! ```

use crate::error::{GrantlyError, Result};
use serde::{Deserialize, Serialize};

/// A reference to a user or group that may carry an opaque id, a natural
/// key (email), or both.
///
/// Constructed from configuration input or a wire payload, consumed once
/// per API call, never persisted beyond it.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct EntityReference {
    /// Opaque server-issued identifier (UUID). Case is significant.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub id: Option<String>,
    /// Natural key; emails are case-insensitive upstream.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub email: Option<String>,
}

impl EntityReference {
    /// Creates a reference carrying only an opaque id.
    pub fn from_id(id: impl Into<String>) -> Self {
        Self {
            id: Some(id.into()),
            email: None,
        }
    }

    /// Creates a reference carrying only an email natural key.
    pub fn from_email(email: impl Into<String>) -> Self {
        Self {
            id: None,
            email: Some(email.into()),
        }
    }

    /// Creates a reference carrying both representations, as returned by
    /// the server on reads.
    pub fn new(id: impl Into<String>, email: impl Into<String>) -> Self {
        Self {
            id: Some(id.into()),
            email: Some(email.into()),
        }
    }

    /// Resolve this reference to the single canonical identifier sent
    /// upstream.
    ///
    /// Preference order: id first (trimmed of whitespace and stray quoting
    /// artifacts, case preserved since ids are opaque), then email (trimmed
    /// and lower-cased). When neither survives normalization the reference
    /// is unusable and `field` names the offending attribute in the error.
    pub fn resolve(&self, field: &str) -> Result<String> {
        if let Some(id) = self.id.as_deref() {
            let id = id.trim().trim_matches(|c| c == '"' || c == '\'').trim();
            if !id.is_empty() {
                return Ok(id.to_string());
            }
        }
        if let Some(email) = self.email.as_deref() {
            let email = email.trim();
            if !email.is_empty() {
                return Ok(email.to_lowercase());
            }
        }
        Err(GrantlyError::missing_identifier(field))
    }

    /// True when neither representation is present.
    pub fn is_empty(&self) -> bool {
        self.id.is_none() && self.email.is_none()
    }
}

/// Lower-case an email on the way in from a response, mirroring the
/// normalization applied at write time so round-trips are idempotent.
pub fn normalize_email(email: &str) -> String {
    email.trim().to_lowercase()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_resolve_prefers_id_case_preserved() {
        let r = EntityReference::new("AbC-123", "user@example.com");
        assert_eq!(r.resolve("owner").unwrap(), "AbC-123");
    }

    #[test]
    fn test_resolve_trims_id_quoting_artifacts() {
        let r = EntityReference::from_id("  \"9ae0fa0e\"  ");
        assert_eq!(r.resolve("owner").unwrap(), "9ae0fa0e");
    }

    #[test]
    fn test_resolve_lowercases_and_trims_email() {
        let r = EntityReference::from_email(" User@Example.COM ");
        assert_eq!(r.resolve("owner").unwrap(), "user@example.com");
    }

    #[test]
    fn test_resolve_empty_fails_with_field_name() {
        let r = EntityReference::default();
        let err = r.resolve("maintainers[0]").unwrap_err();
        assert!(matches!(err, GrantlyError::MissingIdentifier { ref field } if field == "maintainers[0]"));
    }

    #[test]
    fn test_resolve_blank_id_falls_back_to_email() {
        let r = EntityReference {
            id: Some("   ".into()),
            email: Some("Ops@Corp.io".into()),
        };
        assert_eq!(r.resolve("owner").unwrap(), "ops@corp.io");
    }

    #[test]
    fn test_resolve_blank_everything_fails() {
        let r = EntityReference {
            id: Some("".into()),
            email: Some("  ".into()),
        };
        assert!(r.resolve("owner").is_err());
    }

    #[test]
    fn test_normalize_email() {
        assert_eq!(normalize_email(" Admin@Example.Com"), "admin@example.com");
    }
}
