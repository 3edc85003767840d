//! Bundle objects: a named collection of roles requestable as one unit.

use crate::durations::AllowedDurations;
use crate::error::{GrantlyError, Result};
use crate::model::common::{WireRef, WorkflowRefWire};
use crate::optional::{SetField, WriteOp};
use crate::permission::RoleRef;
use crate::reference::EntityReference;
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// Role entry inside bundle responses; name is denormalized, read-only.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct BundleRoleWire {
    pub id: String,
    #[serde(default)]
    pub name: Option<String>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct BundleResponse {
    pub id: Uuid,
    pub name: String,
    #[serde(default)]
    pub description: Option<String>,
    #[serde(default)]
    pub category: Option<String>,
    #[serde(default)]
    pub allowed_durations: Option<Vec<i64>>,
    #[serde(default)]
    pub workflow: Option<WorkflowRefWire>,
    #[serde(default)]
    pub roles: Option<Vec<BundleRoleWire>>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CreateBundleRequest {
    pub name: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub category: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub allowed_durations: Option<Vec<i64>>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub workflow: Option<WireRef>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub roles: Option<Vec<WireRef>>,
}

pub type UpdateBundleRequest = CreateBundleRequest;

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct BundleConfig {
    pub name: String,
    pub description: Option<String>,
    pub category: Option<String>,
    pub allowed_durations: AllowedDurations,
    pub workflow: Option<EntityReference>,
    /// Role ids; names come back denormalized on reads.
    pub roles: SetField<RoleRef>,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct BundleModel {
    pub id: Uuid,
    pub name: String,
    pub description: Option<String>,
    pub category: Option<String>,
    pub allowed_durations: AllowedDurations,
    pub workflow_id: Option<Uuid>,
    pub roles: SetField<RoleRef>,
}

fn encode(config: &BundleConfig, op: WriteOp) -> Result<CreateBundleRequest> {
    let workflow = config
        .workflow
        .as_ref()
        .map(|w| WireRef::resolve(w, "workflow"))
        .transpose()?;
    let roles = config.roles.try_to_wire(op, |i, role| {
        let id = role.id.trim();
        if id.is_empty() {
            return Err(GrantlyError::missing_identifier(format!("roles[{i}]")));
        }
        Ok(WireRef { id: id.to_string() })
    })?;
    Ok(CreateBundleRequest {
        name: config.name.clone(),
        description: config.description.clone(),
        category: config.category.clone(),
        allowed_durations: config.allowed_durations.to_wire(op),
        workflow,
        roles,
    })
}

pub fn encode_create(config: &BundleConfig) -> Result<CreateBundleRequest> {
    encode(config, WriteOp::Create)
}

pub fn encode_update(config: &BundleConfig) -> Result<UpdateBundleRequest> {
    encode(config, WriteOp::Update)
}

pub fn map_bundle(response: &BundleResponse) -> Result<BundleModel> {
    let roles = response.roles.as_ref().map(|roles| {
        roles
            .iter()
            .map(|r| RoleRef {
                id: r.id.clone(),
                name: r.name.clone(),
                resource: None,
            })
            .collect()
    });
    Ok(BundleModel {
        id: response.id,
        name: response.name.clone(),
        description: response.description.clone(),
        category: response.category.clone(),
        allowed_durations: AllowedDurations::from_wire(response.allowed_durations.clone()),
        workflow_id: response.workflow.as_ref().map(|w| w.id),
        roles: SetField::from_wire(roles),
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_map_bundle_hydrates_role_names() {
        let response: BundleResponse = serde_json::from_value(json!({
            "id": "1a2b3c4d-0000-4000-8000-000000000001",
            "name": "oncall-kit",
            "roles": [
                { "id": "role-1", "name": "pager-admin" },
                { "id": "role-2" }
            ]
        }))
        .unwrap();
        let model = map_bundle(&response).unwrap();
        let roles = model.roles.as_set().unwrap();
        assert_eq!(roles[0].name.as_deref(), Some("pager-admin"));
        assert!(roles[1].name.is_none());
    }

    #[test]
    fn test_encode_writes_role_ids_only() {
        let config = BundleConfig {
            name: "oncall-kit".into(),
            roles: SetField::Set(vec![RoleRef {
                id: "role-1".into(),
                name: Some("stale".into()),
                resource: None,
            }]),
            ..BundleConfig::default()
        };
        let value = serde_json::to_value(encode_update(&config).unwrap()).unwrap();
        assert_eq!(value["roles"], json!([{ "id": "role-1" }]));
    }

    #[test]
    fn test_encode_blank_role_id_fails_preflight() {
        let config = BundleConfig {
            name: "b".into(),
            roles: SetField::Set(vec![RoleRef::from_id("")]),
            ..BundleConfig::default()
        };
        let err = encode_create(&config).unwrap_err();
        assert!(err.is_preflight());
        assert!(err.to_string().contains("roles[0]"));
    }
}
