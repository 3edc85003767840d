//! Automatic-grant policies.
//!
//! A policy grants a set of roles and bundles to members of a set of
//! directory groups. All three are plain id collections with tri-state
//! optionality; the policy number is server-assigned and read-only.

use crate::error::{GrantlyError, Result};
use crate::model::common::WireRef;
use crate::optional::{SetField, WriteOp};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PolicyResponse {
    pub id: Uuid,
    #[serde(default)]
    pub number: Option<i64>,
    #[serde(default)]
    pub roles: Option<Vec<WireRef>>,
    #[serde(default)]
    pub bundles: Option<Vec<WireRef>>,
    #[serde(default)]
    pub in_groups: Option<Vec<WireRef>>,
    #[serde(default)]
    pub sort_order: Option<i64>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CreatePolicyRequest {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub roles: Option<Vec<WireRef>>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub bundles: Option<Vec<WireRef>>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub in_groups: Option<Vec<WireRef>>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub sort_order: Option<i64>,
}

pub type UpdatePolicyRequest = CreatePolicyRequest;

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct PolicyConfig {
    pub roles: SetField<String>,
    pub bundles: SetField<String>,
    pub in_groups: SetField<String>,
    pub sort_order: Option<i64>,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PolicyModel {
    pub id: Uuid,
    pub number: Option<i64>,
    pub roles: SetField<String>,
    pub bundles: SetField<String>,
    pub in_groups: SetField<String>,
    pub sort_order: Option<i64>,
}

fn encode_ids(
    field: &SetField<String>,
    name: &str,
    op: WriteOp,
) -> Result<Option<Vec<WireRef>>> {
    field.try_to_wire(op, |i, id| {
        let id = id.trim();
        if id.is_empty() {
            return Err(GrantlyError::missing_identifier(format!("{name}[{i}]")));
        }
        Ok(WireRef { id: id.to_string() })
    })
}

fn encode(config: &PolicyConfig, op: WriteOp) -> Result<CreatePolicyRequest> {
    Ok(CreatePolicyRequest {
        roles: encode_ids(&config.roles, "roles", op)?,
        bundles: encode_ids(&config.bundles, "bundles", op)?,
        in_groups: encode_ids(&config.in_groups, "in_groups", op)?,
        sort_order: config.sort_order,
    })
}

pub fn encode_create(config: &PolicyConfig) -> Result<CreatePolicyRequest> {
    encode(config, WriteOp::Create)
}

pub fn encode_update(config: &PolicyConfig) -> Result<UpdatePolicyRequest> {
    encode(config, WriteOp::Update)
}

pub fn map_policy(response: &PolicyResponse) -> Result<PolicyModel> {
    let ids = |refs: &Option<Vec<WireRef>>| {
        SetField::from_wire(
            refs.as_ref()
                .map(|refs| refs.iter().map(|r| r.id.clone()).collect()),
        )
    };
    Ok(PolicyModel {
        id: response.id,
        number: response.number,
        roles: ids(&response.roles),
        bundles: ids(&response.bundles),
        in_groups: ids(&response.in_groups),
        sort_order: response.sort_order,
    })
}
