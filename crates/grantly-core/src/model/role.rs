//! Role objects.
//!
//! A role belongs to a resource and may gate itself behind prerequisite
//! permissions, each of which wraps a reference to another role in a tagged
//! envelope (see [`crate::permission`]).

use crate::durations::AllowedDurations;
use crate::error::Result;
use crate::model::common::{require_nested, IntegrationRefWire};
use crate::optional::{SetField, WriteOp};
use crate::permission::{
    decode_permissions, encode_permission, PrerequisitePermission, PrerequisitePermissionEnvelope,
};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// Resource reference nested inside role responses.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RoleResourceWire {
    pub id: Uuid,
    #[serde(default)]
    pub name: Option<String>,
    #[serde(default)]
    pub integration: Option<IntegrationRefWire>,
}

/// Full role object as returned by show/create/update.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RoleResponse {
    pub id: Uuid,
    pub name: String,
    #[serde(default)]
    pub requestable: Option<bool>,
    #[serde(default)]
    pub resource: Option<RoleResourceWire>,
    #[serde(default)]
    pub allowed_durations: Option<Vec<i64>>,
    #[serde(default)]
    pub prerequisite_permissions: Option<Vec<PrerequisitePermissionEnvelope>>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CreateRoleRequest {
    pub name: String,
    pub resource_id: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub requestable: Option<bool>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub allowed_durations: Option<Vec<i64>>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub prerequisite_permissions: Option<Vec<PrerequisitePermissionEnvelope>>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct UpdateRoleRequest {
    pub name: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub requestable: Option<bool>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub allowed_durations: Option<Vec<i64>>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub prerequisite_permissions: Option<Vec<PrerequisitePermissionEnvelope>>,
}

/// Desired configuration as read from the host's plan.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct RoleConfig {
    pub name: String,
    pub resource_id: String,
    pub requestable: Option<bool>,
    pub allowed_durations: AllowedDurations,
    pub prerequisite_permissions: SetField<PrerequisitePermission>,
}

/// Canonical local representation.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RoleModel {
    pub id: Uuid,
    pub name: String,
    pub requestable: Option<bool>,
    pub resource_id: Uuid,
    pub resource_name: Option<String>,
    pub integration_id: Option<Uuid>,
    pub integration_name: Option<String>,
    pub allowed_durations: AllowedDurations,
    pub prerequisite_permissions: SetField<PrerequisitePermission>,
}

fn encode_permissions_field(
    config: &RoleConfig,
    op: WriteOp,
) -> Result<Option<Vec<PrerequisitePermissionEnvelope>>> {
    config.prerequisite_permissions.try_to_wire(op, |i, p| {
        encode_permission(p, &format!("prerequisite_permissions[{i}]"))
    })
}

pub fn encode_create(config: &RoleConfig) -> Result<CreateRoleRequest> {
    Ok(CreateRoleRequest {
        name: config.name.clone(),
        resource_id: config.resource_id.trim().to_string(),
        requestable: config.requestable,
        allowed_durations: config.allowed_durations.to_wire(WriteOp::Create),
        prerequisite_permissions: encode_permissions_field(config, WriteOp::Create)?,
    })
}

pub fn encode_update(config: &RoleConfig) -> Result<UpdateRoleRequest> {
    Ok(UpdateRoleRequest {
        name: config.name.clone(),
        requestable: config.requestable,
        allowed_durations: config.allowed_durations.to_wire(WriteOp::Update),
        prerequisite_permissions: encode_permissions_field(config, WriteOp::Update)?,
    })
}

/// Build the canonical model from a full API response.
///
/// The owning resource is required; the integration level underneath it is
/// denormalized data the server may omit, in which case those fields stay
/// `None` without any secondary fetch.
pub fn map_role(response: &RoleResponse) -> Result<RoleModel> {
    let resource = require_nested(response.resource.as_ref(), "role.resource")?;
    let permissions = match response.prerequisite_permissions.as_deref() {
        Some(envelopes) => SetField::Set(decode_permissions(
            envelopes,
            "prerequisite_permissions",
        )?),
        None => SetField::Unset,
    };
    Ok(RoleModel {
        id: response.id,
        name: response.name.clone(),
        requestable: response.requestable,
        resource_id: resource.id,
        resource_name: resource.name.clone(),
        integration_id: resource.integration.as_ref().map(|i| i.id),
        integration_name: resource.integration.as_ref().and_then(|i| i.name.clone()),
        allowed_durations: AllowedDurations::from_wire(response.allowed_durations.clone()),
        prerequisite_permissions: permissions,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::permission::RoleRef;
    use serde_json::json;

    fn response_json() -> serde_json::Value {
        json!({
            "id": "3b42e1a6-55c7-4dbb-83c8-30d4b8f1a6c7",
            "name": "read-only",
            "requestable": true,
            "resource": {
                "id": "0b7f4b0e-98a4-4cb2-a543-98a8c3c4b417",
                "name": "prod-db",
                "integration": { "id": "e2b1d7f0-9c3e-43aa-86ad-ff6c152fca1c", "name": "postgres-prod" }
            },
            "allowed_durations": [3600],
            "prerequisite_permissions": [
                {
                    "default": true,
                    "type": "role",
                    "role": { "id": "base-role", "name": "Base" }
                }
            ]
        })
    }

    #[test]
    fn test_map_hydrates_denormalized_names() {
        let response: RoleResponse = serde_json::from_value(response_json()).unwrap();
        let model = map_role(&response).unwrap();
        assert_eq!(model.resource_name.as_deref(), Some("prod-db"));
        assert_eq!(model.integration_name.as_deref(), Some("postgres-prod"));
        let permissions = model.prerequisite_permissions.as_set().unwrap();
        assert_eq!(permissions[0].role.name.as_deref(), Some("Base"));
    }

    #[test]
    fn test_map_missing_resource_is_malformed() {
        let mut value = response_json();
        value.as_object_mut().unwrap().remove("resource");
        let response: RoleResponse = serde_json::from_value(value).unwrap();
        assert!(map_role(&response).is_err());
    }

    #[test]
    fn test_map_absent_integration_level_stays_none() {
        let mut value = response_json();
        value["resource"].as_object_mut().unwrap().remove("integration");
        let response: RoleResponse = serde_json::from_value(value).unwrap();
        let model = map_role(&response).unwrap();
        assert!(model.integration_id.is_none());
        assert!(model.integration_name.is_none());
        assert_eq!(model.resource_name.as_deref(), Some("prod-db"));
    }

    #[test]
    fn test_encode_create_writes_permission_envelopes() {
        let config = RoleConfig {
            name: "read-only".into(),
            resource_id: "res-1".into(),
            prerequisite_permissions: SetField::Set(vec![PrerequisitePermission {
                grant_by_default: false,
                role: RoleRef::from_id("base-role"),
            }]),
            ..RoleConfig::default()
        };
        let request = encode_create(&config).unwrap();
        let value = serde_json::to_value(&request).unwrap();
        assert_eq!(value["prerequisite_permissions"][0]["type"], "role");
        assert_eq!(
            value["prerequisite_permissions"][0]["role"]["id"],
            "base-role"
        );
    }

    #[test]
    fn test_encode_update_omits_unset_collections() {
        let config = RoleConfig {
            name: "read-only".into(),
            resource_id: "res-1".into(),
            ..RoleConfig::default()
        };
        let value = serde_json::to_value(encode_update(&config).unwrap()).unwrap();
        assert!(value.get("prerequisite_permissions").is_none());
        assert!(value.get("allowed_durations").is_none());
        assert!(value.get("resource_id").is_none());
    }
}
