//! Lifecycle shell for automatic-grant policies.

use grantly_client::GrantlyClient;
use grantly_core::error::Result;
use grantly_core::filter::ListFilter;
use grantly_core::model::policy::{
    encode_create, encode_update, map_policy, PolicyConfig, PolicyModel,
};
use tracing::instrument;
use uuid::Uuid;

pub struct PolicyHandler<'a> {
    client: &'a GrantlyClient,
}

impl<'a> PolicyHandler<'a> {
    pub fn new(client: &'a GrantlyClient) -> Self {
        Self { client }
    }

    #[instrument(skip_all)]
    pub async fn create(&self, config: &PolicyConfig) -> Result<PolicyModel> {
        let request = encode_create(config)?;
        let response = self.client.create_policy(&request).await?;
        map_policy(&response)
    }

    #[instrument(skip(self))]
    pub async fn read(&self, id: Uuid) -> Result<PolicyModel> {
        let response = self.client.get_policy(id).await?;
        map_policy(&response)
    }

    #[instrument(skip_all, fields(%id))]
    pub async fn update(&self, id: Uuid, config: &PolicyConfig) -> Result<PolicyModel> {
        let request = encode_update(config)?;
        let response = self.client.update_policy(id, &request).await?;
        map_policy(&response)
    }

    #[instrument(skip(self))]
    pub async fn delete(&self, id: Uuid) -> Result<()> {
        match self.client.delete_policy(id).await {
            Err(err) if err.is_not_found() => {
                tracing::debug!(%id, "policy already absent, treating delete as success");
                Ok(())
            }
            other => other,
        }
    }

    #[instrument(skip_all)]
    pub async fn find(&self, filter: Option<&ListFilter>) -> Result<Vec<PolicyModel>> {
        let responses = self.client.list_policies(filter).await?;
        responses.iter().map(map_policy).collect()
    }
}
