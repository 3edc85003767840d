//! Resource objects: wire schema, configuration, canonical model, mappers.
//!
//! A resource belongs to exactly one integration and optionally carries an
//! owner, maintainers, tags, an allowed-duration override and a workflow
//! override. The canonical model is always rebuilt whole from the latest
//! response so host-visible state mirrors server state exactly.

use crate::durations::AllowedDurations;
use crate::error::Result;
use crate::maintainer::{
    decode_maintainers, encode_maintainer, Maintainer, MaintainerEnvelope,
};
use crate::model::common::{require_nested, IntegrationRefWire, UserWire, WireRef, WorkflowRefWire};
use crate::optional::{SetField, WriteOp};
use crate::reference::EntityReference;
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// Full resource object as returned by show/create/update.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ResourceResponse {
    pub id: Uuid,
    pub name: String,
    #[serde(default)]
    pub description: Option<String>,
    #[serde(default)]
    pub requestable: Option<bool>,
    #[serde(default)]
    pub integration: Option<IntegrationRefWire>,
    #[serde(default)]
    pub owner: Option<UserWire>,
    #[serde(default)]
    pub maintainers: Option<Vec<MaintainerEnvelope>>,
    #[serde(default)]
    pub tags: Option<Vec<String>>,
    #[serde(default)]
    pub allowed_durations: Option<Vec<i64>>,
    #[serde(default)]
    pub workflow: Option<WorkflowRefWire>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CreateResourceRequest {
    pub name: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    pub integration_id: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub requestable: Option<bool>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub owner: Option<WireRef>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub maintainers: Option<Vec<MaintainerEnvelope>>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub tags: Option<Vec<String>>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub allowed_durations: Option<Vec<i64>>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub workflow: Option<WireRef>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct UpdateResourceRequest {
    pub name: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub requestable: Option<bool>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub owner: Option<WireRef>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub maintainers: Option<Vec<MaintainerEnvelope>>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub tags: Option<Vec<String>>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub allowed_durations: Option<Vec<i64>>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub workflow: Option<WireRef>,
}

/// Desired configuration as read from the host's plan.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ResourceConfig {
    pub name: String,
    pub description: Option<String>,
    pub integration_id: String,
    pub requestable: Option<bool>,
    pub owner: Option<EntityReference>,
    pub maintainers: SetField<Maintainer>,
    pub tags: SetField<String>,
    pub allowed_durations: AllowedDurations,
    pub workflow: Option<EntityReference>,
}

/// Canonical local representation, rebuilt in full after every
/// create/read/update.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ResourceModel {
    pub id: Uuid,
    pub name: String,
    pub description: Option<String>,
    pub requestable: Option<bool>,
    pub integration_id: Uuid,
    pub integration_name: Option<String>,
    pub owner: Option<EntityReference>,
    pub maintainers: SetField<Maintainer>,
    pub tags: SetField<String>,
    pub allowed_durations: AllowedDurations,
    pub workflow_id: Option<Uuid>,
}

fn encode_common(
    config: &ResourceConfig,
    op: WriteOp,
) -> Result<(
    Option<WireRef>,
    Option<Vec<MaintainerEnvelope>>,
    Option<Vec<String>>,
    Option<Vec<i64>>,
    Option<WireRef>,
)> {
    let owner = config
        .owner
        .as_ref()
        .map(|o| WireRef::resolve(o, "owner"))
        .transpose()?;
    let maintainers = config
        .maintainers
        .try_to_wire(op, |i, m| encode_maintainer(m, &format!("maintainers[{i}]")))?;
    let tags = config.tags.to_wire(op);
    let allowed_durations = config.allowed_durations.to_wire(op);
    let workflow = config
        .workflow
        .as_ref()
        .map(|w| WireRef::resolve(w, "workflow"))
        .transpose()?;
    Ok((owner, maintainers, tags, allowed_durations, workflow))
}

/// Encode the desired configuration into a create request.
pub fn encode_create(config: &ResourceConfig) -> Result<CreateResourceRequest> {
    let (owner, maintainers, tags, allowed_durations, workflow) =
        encode_common(config, WriteOp::Create)?;
    Ok(CreateResourceRequest {
        name: config.name.clone(),
        description: config.description.clone(),
        integration_id: config.integration_id.trim().to_string(),
        requestable: config.requestable,
        owner,
        maintainers,
        tags,
        allowed_durations,
        workflow,
    })
}

/// Encode the desired configuration into an update request.
///
/// Unset fields are omitted so the server keeps its current values; an
/// explicitly configured empty collection is sent and clears.
pub fn encode_update(config: &ResourceConfig) -> Result<UpdateResourceRequest> {
    let (owner, maintainers, tags, allowed_durations, workflow) =
        encode_common(config, WriteOp::Update)?;
    Ok(UpdateResourceRequest {
        name: config.name.clone(),
        description: config.description.clone(),
        requestable: config.requestable,
        owner,
        maintainers,
        tags,
        allowed_durations,
        workflow,
    })
}

/// Build the canonical model from a full API response.
///
/// The integration is required on every resource; its absence is a server
/// contract violation, not a defaultable field.
pub fn map_resource(response: &ResourceResponse) -> Result<ResourceModel> {
    let integration = require_nested(response.integration.as_ref(), "resource.integration")?;
    let maintainers = match response.maintainers.as_deref() {
        Some(envelopes) => SetField::Set(decode_maintainers(envelopes, "maintainers")?),
        None => SetField::Unset,
    };
    Ok(ResourceModel {
        id: response.id,
        name: response.name.clone(),
        description: response.description.clone(),
        requestable: response.requestable,
        integration_id: integration.id,
        integration_name: integration.name.clone(),
        owner: response.owner.as_ref().map(UserWire::to_reference),
        maintainers,
        tags: SetField::from_wire(response.tags.clone()),
        allowed_durations: AllowedDurations::from_wire(response.allowed_durations.clone()),
        workflow_id: response.workflow.as_ref().map(|w| w.id),
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::maintainer::MaintainerKind;
    use assert_json_diff::assert_json_eq;
    use serde_json::json;

    fn response_json() -> serde_json::Value {
        json!({
            "id": "0b7f4b0e-98a4-4cb2-a543-98a8c3c4b417",
            "name": "prod-db",
            "description": "Primary database",
            "requestable": true,
            "integration": { "id": "e2b1d7f0-9c3e-43aa-86ad-ff6c152fca1c", "name": "postgres-prod" },
            "owner": { "id": "d52a5f84-1f65-4a42-a7ff-78e4a2431f42", "email": "DBA@Corp.io" },
            "maintainers": [
                { "type": "user", "user": { "id": "u-1", "email": "Ops@Corp.io" } },
                { "type": "group", "group": { "id": "g-1" } }
            ],
            "tags": [],
            "allowed_durations": [7200, 3600]
        })
    }

    #[test]
    fn test_map_builds_complete_model() {
        let response: ResourceResponse = serde_json::from_value(response_json()).unwrap();
        let model = map_resource(&response).unwrap();
        assert_eq!(model.name, "prod-db");
        assert_eq!(model.integration_name.as_deref(), Some("postgres-prod"));
        // Owner email lower-cased inbound, matching write-time normalization.
        assert_eq!(
            model.owner.as_ref().unwrap().email.as_deref(),
            Some("dba@corp.io")
        );
        // Present-but-empty tags stay an explicit empty set, not Unset.
        assert_eq!(model.tags, SetField::Set(vec![]));
        // Durations normalized.
        assert_eq!(
            model.allowed_durations,
            AllowedDurations::set([3600, 7200])
        );
        assert!(model.workflow_id.is_none());
        let maintainers = model.maintainers.as_set().unwrap();
        assert_eq!(maintainers[0].kind, MaintainerKind::User);
        assert_eq!(maintainers[1].kind, MaintainerKind::Group);
    }

    #[test]
    fn test_map_is_idempotent() {
        let response: ResourceResponse = serde_json::from_value(response_json()).unwrap();
        assert_eq!(map_resource(&response).unwrap(), map_resource(&response).unwrap());
    }

    #[test]
    fn test_map_missing_integration_is_malformed() {
        let mut value = response_json();
        value.as_object_mut().unwrap().remove("integration");
        let response: ResourceResponse = serde_json::from_value(value).unwrap();
        let err = map_resource(&response).unwrap_err();
        assert!(err.to_string().contains("resource.integration"));
    }

    #[test]
    fn test_map_unknown_maintainer_tag_yields_no_partial_model() {
        let mut value = response_json();
        value["maintainers"][1] = json!({ "type": "robot" });
        let response: ResourceResponse = serde_json::from_value(value).unwrap();
        assert!(map_resource(&response).is_err());
    }

    #[test]
    fn test_encode_create_unset_fields_are_omitted() {
        let config = ResourceConfig {
            name: "prod-db".into(),
            integration_id: "int-1".into(),
            ..ResourceConfig::default()
        };
        let request = encode_create(&config).unwrap();
        let value = serde_json::to_value(&request).unwrap();
        assert_json_eq!(
            value,
            json!({ "name": "prod-db", "integration_id": "int-1" })
        );
    }

    #[test]
    fn test_encode_update_explicit_empty_differs_from_unset() {
        let unset = ResourceConfig {
            name: "r".into(),
            integration_id: "i".into(),
            ..ResourceConfig::default()
        };
        let empty = ResourceConfig {
            tags: SetField::Set(vec![]),
            ..unset.clone()
        };
        let unset_value = serde_json::to_value(encode_update(&unset).unwrap()).unwrap();
        let empty_value = serde_json::to_value(encode_update(&empty).unwrap()).unwrap();
        assert_ne!(unset_value, empty_value);
        assert_eq!(empty_value["tags"], json!([]));
        assert!(unset_value.get("tags").is_none());
    }

    #[test]
    fn test_encode_update_unknown_collection_is_omitted() {
        let config = ResourceConfig {
            name: "r".into(),
            integration_id: "i".into(),
            maintainers: SetField::Unknown,
            ..ResourceConfig::default()
        };
        let value = serde_json::to_value(encode_update(&config).unwrap()).unwrap();
        assert!(value.get("maintainers").is_none());
        // On create the same placeholder is sent as a safe empty list.
        let created = serde_json::to_value(encode_create(&config).unwrap()).unwrap();
        assert_eq!(created["maintainers"], json!([]));
    }

    #[test]
    fn test_encode_resolves_owner_email() {
        let config = ResourceConfig {
            name: "r".into(),
            integration_id: "i".into(),
            owner: Some(EntityReference::from_email("User@Example.com")),
            ..ResourceConfig::default()
        };
        let request = encode_create(&config).unwrap();
        assert_eq!(request.owner.unwrap().id, "user@example.com");
    }

    #[test]
    fn test_encode_bad_maintainer_aborts_preflight() {
        let config = ResourceConfig {
            name: "r".into(),
            integration_id: "i".into(),
            maintainers: SetField::Set(vec![Maintainer::user(EntityReference::default())]),
            ..ResourceConfig::default()
        };
        let err = encode_create(&config).unwrap_err();
        assert!(err.is_preflight());
        assert!(err.to_string().contains("maintainers[0]"));
    }
}
