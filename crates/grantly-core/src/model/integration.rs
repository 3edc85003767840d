//! Integration objects.
//!
//! An integration connects the governance service to one application (the
//! `application.name` pairing is fixed at creation). The owner reference
//! follows the usual id-or-email convention.

use crate::durations::AllowedDurations;
use crate::error::Result;
use crate::model::common::{require_nested, UserWire, WireRef, WorkflowRefWire};
use crate::optional::WriteOp;
use crate::reference::EntityReference;
use serde::{Deserialize, Serialize};
use uuid::Uuid;

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ApplicationRefWire {
    pub name: String,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct IntegrationResponse {
    pub id: Uuid,
    pub name: String,
    #[serde(default)]
    pub application: Option<ApplicationRefWire>,
    #[serde(default)]
    pub owner: Option<UserWire>,
    #[serde(default)]
    pub allowed_durations: Option<Vec<i64>>,
    #[serde(default)]
    pub workflow: Option<WorkflowRefWire>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CreateIntegrationRequest {
    pub name: String,
    pub application: ApplicationRefWire,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub owner: Option<WireRef>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub allowed_durations: Option<Vec<i64>>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub workflow: Option<WireRef>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct UpdateIntegrationRequest {
    pub name: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub owner: Option<WireRef>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub allowed_durations: Option<Vec<i64>>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub workflow: Option<WireRef>,
}

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct IntegrationConfig {
    pub name: String,
    pub application_name: String,
    pub owner: Option<EntityReference>,
    pub allowed_durations: AllowedDurations,
    pub workflow: Option<EntityReference>,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct IntegrationModel {
    pub id: Uuid,
    pub name: String,
    pub application_name: String,
    pub owner: Option<EntityReference>,
    pub allowed_durations: AllowedDurations,
    pub workflow_id: Option<Uuid>,
}

fn encode_refs(
    config: &IntegrationConfig,
) -> Result<(Option<WireRef>, Option<WireRef>)> {
    let owner = config
        .owner
        .as_ref()
        .map(|o| WireRef::resolve(o, "owner"))
        .transpose()?;
    let workflow = config
        .workflow
        .as_ref()
        .map(|w| WireRef::resolve(w, "workflow"))
        .transpose()?;
    Ok((owner, workflow))
}

pub fn encode_create(config: &IntegrationConfig) -> Result<CreateIntegrationRequest> {
    let (owner, workflow) = encode_refs(config)?;
    Ok(CreateIntegrationRequest {
        name: config.name.clone(),
        application: ApplicationRefWire {
            name: config.application_name.clone(),
        },
        owner,
        allowed_durations: config.allowed_durations.to_wire(WriteOp::Create),
        workflow,
    })
}

pub fn encode_update(config: &IntegrationConfig) -> Result<UpdateIntegrationRequest> {
    let (owner, workflow) = encode_refs(config)?;
    Ok(UpdateIntegrationRequest {
        name: config.name.clone(),
        owner,
        allowed_durations: config.allowed_durations.to_wire(WriteOp::Update),
        workflow,
    })
}

/// Build the canonical model. The application pairing is required on every
/// integration response.
pub fn map_integration(response: &IntegrationResponse) -> Result<IntegrationModel> {
    let application = require_nested(response.application.as_ref(), "integration.application")?;
    Ok(IntegrationModel {
        id: response.id,
        name: response.name.clone(),
        application_name: application.name.clone(),
        owner: response.owner.as_ref().map(UserWire::to_reference),
        allowed_durations: AllowedDurations::from_wire(response.allowed_durations.clone()),
        workflow_id: response.workflow.as_ref().map(|w| w.id),
    })
}
