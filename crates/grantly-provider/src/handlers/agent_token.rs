//! Lifecycle shell for agent tokens.
//!
//! The API has no update endpoint for tokens; a name change is a
//! replacement, which the host expresses as delete + create. The secret is
//! only present on the create response, so `read` keeps the previously
//! stored secret untouched by construction (the model from a read simply
//! has `token: None`, and the host merges computed-once attributes).

use grantly_client::GrantlyClient;
use grantly_core::error::Result;
use grantly_core::model::agent_token::{
    encode_create, map_agent_token, AgentTokenConfig, AgentTokenModel,
};
use tracing::instrument;
use uuid::Uuid;

pub struct AgentTokenHandler<'a> {
    client: &'a GrantlyClient,
}

impl<'a> AgentTokenHandler<'a> {
    pub fn new(client: &'a GrantlyClient) -> Self {
        Self { client }
    }

    #[instrument(skip_all, fields(name = %config.name))]
    pub async fn create(&self, config: &AgentTokenConfig) -> Result<AgentTokenModel> {
        let request = encode_create(config)?;
        let response = self.client.create_agent_token(&request).await?;
        map_agent_token(&response)
    }

    #[instrument(skip(self))]
    pub async fn read(&self, id: Uuid) -> Result<AgentTokenModel> {
        let response = self.client.get_agent_token(id).await?;
        map_agent_token(&response)
    }

    #[instrument(skip(self))]
    pub async fn delete(&self, id: Uuid) -> Result<()> {
        match self.client.delete_agent_token(id).await {
            Err(err) if err.is_not_found() => {
                tracing::debug!(%id, "agent token already absent, treating delete as success");
                Ok(())
            }
            other => other,
        }
    }
}
