//! Agent tokens.
//!
//! The token secret is returned exactly once, on create. Reads return the
//! metadata only, so the model keeps the secret as an `Option` that is
//! populated solely from the create response and never compared for drift.

use crate::error::Result;
use serde::{Deserialize, Serialize};
use time::OffsetDateTime;
use uuid::Uuid;

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AgentTokenResponse {
    pub id: Uuid,
    pub name: String,
    #[serde(default)]
    pub token: Option<String>,
    #[serde(default, with = "time::serde::rfc3339::option")]
    pub created_at: Option<OffsetDateTime>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CreateAgentTokenRequest {
    pub name: String,
}

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct AgentTokenConfig {
    pub name: String,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AgentTokenModel {
    pub id: Uuid,
    pub name: String,
    /// Populated only from the create response; absent on reads.
    pub token: Option<String>,
    pub created_at: Option<OffsetDateTime>,
}

pub fn encode_create(config: &AgentTokenConfig) -> Result<CreateAgentTokenRequest> {
    Ok(CreateAgentTokenRequest {
        name: config.name.clone(),
    })
}

pub fn map_agent_token(response: &AgentTokenResponse) -> Result<AgentTokenModel> {
    Ok(AgentTokenModel {
        id: response.id,
        name: response.name.clone(),
        token: response.token.clone(),
        created_at: response.created_at,
    })
}
