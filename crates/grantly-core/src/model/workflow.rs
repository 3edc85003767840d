//! Approval workflow objects.

use crate::durations::AllowedDurations;
use crate::error::Result;
use crate::optional::WriteOp;
use serde::{Deserialize, Serialize};
use uuid::Uuid;

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct WorkflowResponse {
    pub id: Uuid,
    pub name: String,
    #[serde(default)]
    pub enabled: Option<bool>,
    #[serde(default)]
    pub allowed_durations: Option<Vec<i64>>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CreateWorkflowRequest {
    pub name: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub enabled: Option<bool>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub allowed_durations: Option<Vec<i64>>,
}

pub type UpdateWorkflowRequest = CreateWorkflowRequest;

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct WorkflowConfig {
    pub name: String,
    pub enabled: Option<bool>,
    pub allowed_durations: AllowedDurations,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct WorkflowModel {
    pub id: Uuid,
    pub name: String,
    pub enabled: Option<bool>,
    pub allowed_durations: AllowedDurations,
}

pub fn encode_create(config: &WorkflowConfig) -> Result<CreateWorkflowRequest> {
    Ok(CreateWorkflowRequest {
        name: config.name.clone(),
        enabled: config.enabled,
        allowed_durations: config.allowed_durations.to_wire(WriteOp::Create),
    })
}

pub fn encode_update(config: &WorkflowConfig) -> Result<UpdateWorkflowRequest> {
    Ok(UpdateWorkflowRequest {
        name: config.name.clone(),
        enabled: config.enabled,
        allowed_durations: config.allowed_durations.to_wire(WriteOp::Update),
    })
}

pub fn map_workflow(response: &WorkflowResponse) -> Result<WorkflowModel> {
    Ok(WorkflowModel {
        id: response.id,
        name: response.name.clone(),
        enabled: response.enabled,
        allowed_durations: AllowedDurations::from_wire(response.allowed_durations.clone()),
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_map_workflow() {
        let response: WorkflowResponse = serde_json::from_value(json!({
            "id": "8c7e2b53-6a3a-4a76-b2a2-b2acb0f0a001",
            "name": "default-approval",
            "enabled": true,
            "allowed_durations": [3600, -1]
        }))
        .unwrap();
        let model = map_workflow(&response).unwrap();
        assert_eq!(model.name, "default-approval");
        assert!(model.allowed_durations.allows_unlimited());
    }

    #[test]
    fn test_encode_update_keeps_unset_durations_omitted() {
        let config = WorkflowConfig {
            name: "w".into(),
            ..WorkflowConfig::default()
        };
        let value = serde_json::to_value(encode_update(&config).unwrap()).unwrap();
        assert!(value.get("allowed_durations").is_none());
    }
}
