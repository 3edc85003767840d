//! Wire shapes shared across object kinds.

use crate::error::{GrantlyError, Result};
use crate::reference::{normalize_email, EntityReference};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// Single-object response envelope: the API wraps every payload in
/// `{ "result": ... }`.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ItemEnvelope<T> {
    pub result: T,
}

/// Index response envelope.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ListEnvelope<T> {
    pub result: Vec<T>,
}

/// A bare reference payload on write requests.
///
/// Carries the already-resolved canonical identifier; the API accepts an
/// opaque id or an email in the same field.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct WireRef {
    pub id: String,
}

impl WireRef {
    /// Resolve an entity reference into a wire payload, naming `field` in
    /// any pre-flight diagnostic.
    pub fn resolve(reference: &EntityReference, field: &str) -> Result<Self> {
        Ok(Self {
            id: reference.resolve(field)?,
        })
    }
}

/// A user object as returned inside responses (owner, forward target).
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct UserWire {
    pub id: Uuid,
    #[serde(default)]
    pub email: Option<String>,
    #[serde(default)]
    pub first_name: Option<String>,
    #[serde(default)]
    pub last_name: Option<String>,
}

impl UserWire {
    /// Convert to an entity reference, normalizing the email so inbound
    /// state matches what write-time resolution would have produced.
    pub fn to_reference(&self) -> EntityReference {
        EntityReference {
            id: Some(self.id.to_string()),
            email: self.email.as_deref().map(normalize_email),
        }
    }
}

/// A workflow reference inside responses.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct WorkflowRefWire {
    pub id: Uuid,
    #[serde(default)]
    pub name: Option<String>,
}

/// An integration reference nested inside resource responses.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct IntegrationRefWire {
    pub id: Uuid,
    #[serde(default)]
    pub name: Option<String>,
}

/// Extract a required nested object or fail as a server contract violation.
pub fn require_nested<T>(value: Option<T>, what: &str) -> Result<T> {
    value.ok_or_else(|| {
        GrantlyError::malformed(format!("required nested object '{what}' is absent"))
    })
}
