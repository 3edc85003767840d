//! Prerequisite permissions: a tagged envelope wrapping a role reference.
//!
//! On the wire a prerequisite-permission item looks like
//! `{ "default": bool, "type": "role", "role": { ... } }`. The role payload
//! returned by the server carries denormalized read-only names for the
//! role's resource, that resource's integration, and the integration's
//! application. These names are hydrated from the nested data in the same
//! response; when the server omits a level the local field stays `None`, and
//! no secondary fetch is ever attempted.

use crate::error::{GrantlyError, Result};
use serde::{Deserialize, Serialize};

const TAG_ROLE: &str = "role";

/// Application name snapshot, the deepest level of the nested graph.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ApplicationSnapshot {
    pub name: Option<String>,
}

/// Integration snapshot nested under a resource.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct IntegrationSnapshot {
    pub name: Option<String>,
    pub application: Option<ApplicationSnapshot>,
}

/// Resource snapshot nested under a role.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ResourceSnapshot {
    pub name: Option<String>,
    pub integration: Option<IntegrationSnapshot>,
}

/// A role reference with its server-populated denormalized snapshot.
///
/// Only `id` is ever written; everything else is read-only and owned, a
/// fully-materialized copy of the nested response data. There is nothing to
/// cache or invalidate because it is never refreshed independently.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct RoleRef {
    pub id: String,
    pub name: Option<String>,
    pub resource: Option<ResourceSnapshot>,
}

impl RoleRef {
    pub fn from_id(id: impl Into<String>) -> Self {
        Self {
            id: id.into(),
            ..Self::default()
        }
    }
}

/// A prerequisite permission as understood locally.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PrerequisitePermission {
    pub grant_by_default: bool,
    pub role: RoleRef,
}

/// Nested wire shapes mirroring the response graph.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct ApplicationWire {
    #[serde(default)]
    pub name: Option<String>,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct IntegrationWire {
    #[serde(default)]
    pub name: Option<String>,
    #[serde(default)]
    pub application: Option<ApplicationWire>,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct ResourceWire {
    #[serde(default)]
    pub name: Option<String>,
    #[serde(default)]
    pub integration: Option<IntegrationWire>,
}

/// Role payload inside a prerequisite-permission envelope.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct RoleRefWire {
    pub id: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub resource: Option<ResourceWire>,
}

/// The tagged wire shape of one prerequisite-permission item.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PrerequisitePermissionEnvelope {
    pub default: bool,
    #[serde(rename = "type")]
    pub tag: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub role: Option<RoleRefWire>,
}

/// Encode a prerequisite permission for a write request.
///
/// Only the role id travels; denormalized names are server-owned and never
/// written back.
pub fn encode_permission(
    permission: &PrerequisitePermission,
    field: &str,
) -> Result<PrerequisitePermissionEnvelope> {
    let id = permission.role.id.trim();
    if id.is_empty() {
        return Err(GrantlyError::missing_identifier(field));
    }
    Ok(PrerequisitePermissionEnvelope {
        default: permission.grant_by_default,
        tag: TAG_ROLE.to_string(),
        role: Some(RoleRefWire {
            id: id.to_string(),
            name: None,
            resource: None,
        }),
    })
}

/// Decode one prerequisite-permission envelope, hydrating the denormalized
/// snapshot from whatever nested data the response carried.
pub fn decode_permission(
    envelope: &PrerequisitePermissionEnvelope,
    field: &str,
) -> Result<PrerequisitePermission> {
    if !envelope.tag.eq_ignore_ascii_case(TAG_ROLE) {
        return Err(GrantlyError::unknown_tag(field, envelope.tag.clone()));
    }
    let role = envelope.role.as_ref().ok_or_else(|| {
        GrantlyError::malformed(format!(
            "prerequisite permission for field '{field}' carries no role payload"
        ))
    })?;
    if role.id.is_empty() {
        return Err(GrantlyError::malformed(format!(
            "prerequisite permission for field '{field}' has an empty role id"
        )));
    }

    let resource = role.resource.as_ref().map(|r| ResourceSnapshot {
        name: r.name.clone(),
        integration: r.integration.as_ref().map(|i| IntegrationSnapshot {
            name: i.name.clone(),
            application: i.application.as_ref().map(|a| ApplicationSnapshot {
                name: a.name.clone(),
            }),
        }),
    });

    Ok(PrerequisitePermission {
        grant_by_default: envelope.default,
        role: RoleRef {
            id: role.id.clone(),
            name: role.name.clone(),
            resource,
        },
    })
}

/// Decode a full prerequisite-permission list; one bad item fails the whole
/// list so no partial model escapes.
pub fn decode_permissions(
    envelopes: &[PrerequisitePermissionEnvelope],
    field: &str,
) -> Result<Vec<PrerequisitePermission>> {
    envelopes
        .iter()
        .enumerate()
        .map(|(i, envelope)| decode_permission(envelope, &format!("{field}[{i}]")))
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    fn full_envelope() -> PrerequisitePermissionEnvelope {
        PrerequisitePermissionEnvelope {
            default: true,
            tag: "role".to_string(),
            role: Some(RoleRefWire {
                id: "role-1".into(),
                name: Some("Admin".into()),
                resource: Some(ResourceWire {
                    name: Some("prod-db".into()),
                    integration: Some(IntegrationWire {
                        name: Some("postgres-prod".into()),
                        application: Some(ApplicationWire {
                            name: Some("PostgreSQL".into()),
                        }),
                    }),
                }),
            }),
        }
    }

    #[test]
    fn test_encode_writes_only_role_id() {
        let p = PrerequisitePermission {
            grant_by_default: false,
            role: RoleRef {
                id: "role-9".into(),
                name: Some("stale-name".into()),
                resource: Some(ResourceSnapshot::default()),
            },
        };
        let env = encode_permission(&p, "prerequisite_permissions[0]").unwrap();
        assert_eq!(env.tag, "role");
        assert!(!env.default);
        let role = env.role.unwrap();
        assert_eq!(role.id, "role-9");
        assert!(role.name.is_none());
        assert!(role.resource.is_none());
    }

    #[test]
    fn test_encode_blank_role_id_fails_preflight() {
        let p = PrerequisitePermission {
            grant_by_default: true,
            role: RoleRef::from_id("  "),
        };
        let err = encode_permission(&p, "prerequisite_permissions[2]").unwrap_err();
        assert!(err.is_preflight());
    }

    #[test]
    fn test_decode_hydrates_full_snapshot() {
        let p = decode_permission(&full_envelope(), "prerequisite_permissions[0]").unwrap();
        assert!(p.grant_by_default);
        assert_eq!(p.role.id, "role-1");
        assert_eq!(p.role.name.as_deref(), Some("Admin"));
        let resource = p.role.resource.unwrap();
        assert_eq!(resource.name.as_deref(), Some("prod-db"));
        let integration = resource.integration.unwrap();
        assert_eq!(integration.name.as_deref(), Some("postgres-prod"));
        assert_eq!(
            integration.application.unwrap().name.as_deref(),
            Some("PostgreSQL")
        );
    }

    #[test]
    fn test_decode_absent_nested_data_stays_none() {
        let mut env = full_envelope();
        env.role.as_mut().unwrap().resource = None;
        let p = decode_permission(&env, "prerequisite_permissions[0]").unwrap();
        assert_eq!(p.role.id, "role-1");
        assert_eq!(p.role.name.as_deref(), Some("Admin"));
        assert!(p.role.resource.is_none());
    }

    #[test]
    fn test_decode_unknown_tag_is_hard_error() {
        let mut env = full_envelope();
        env.tag = "bundle".to_string();
        let err = decode_permission(&env, "prerequisite_permissions[0]").unwrap_err();
        assert!(matches!(err, GrantlyError::UnknownDiscriminatorTag { .. }));
    }

    #[test]
    fn test_decode_missing_role_payload_is_contract_violation() {
        let mut env = full_envelope();
        env.role = None;
        let err = decode_permission(&env, "prerequisite_permissions[0]").unwrap_err();
        assert!(matches!(err, GrantlyError::MalformedResponse { .. }));
    }

    #[test]
    fn test_decode_list_indexes_failures() {
        let mut bad = full_envelope();
        bad.tag = "unknown".into();
        let err =
            decode_permissions(&[full_envelope(), bad], "prerequisite_permissions").unwrap_err();
        assert!(err.to_string().contains("prerequisite_permissions[1]"));
    }
}
