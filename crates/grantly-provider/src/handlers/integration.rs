//! Lifecycle shell for integrations.

use grantly_client::GrantlyClient;
use grantly_core::error::Result;
use grantly_core::filter::ListFilter;
use grantly_core::model::integration::{
    encode_create, encode_update, map_integration, IntegrationConfig, IntegrationModel,
};
use tracing::instrument;
use uuid::Uuid;

pub struct IntegrationHandler<'a> {
    client: &'a GrantlyClient,
}

impl<'a> IntegrationHandler<'a> {
    pub fn new(client: &'a GrantlyClient) -> Self {
        Self { client }
    }

    #[instrument(skip_all, fields(name = %config.name))]
    pub async fn create(&self, config: &IntegrationConfig) -> Result<IntegrationModel> {
        let request = encode_create(config)?;
        let response = self.client.create_integration(&request).await?;
        map_integration(&response)
    }

    #[instrument(skip(self))]
    pub async fn read(&self, id: Uuid) -> Result<IntegrationModel> {
        let response = self.client.get_integration(id).await?;
        map_integration(&response)
    }

    #[instrument(skip_all, fields(%id))]
    pub async fn update(&self, id: Uuid, config: &IntegrationConfig) -> Result<IntegrationModel> {
        let request = encode_update(config)?;
        let response = self.client.update_integration(id, &request).await?;
        map_integration(&response)
    }

    #[instrument(skip(self))]
    pub async fn delete(&self, id: Uuid) -> Result<()> {
        match self.client.delete_integration(id).await {
            Err(err) if err.is_not_found() => {
                tracing::debug!(%id, "integration already absent, treating delete as success");
                Ok(())
            }
            other => other,
        }
    }

    #[instrument(skip_all)]
    pub async fn find(&self, filter: Option<&ListFilter>) -> Result<Vec<IntegrationModel>> {
        let responses = self.client.list_integrations(filter).await?;
        responses.iter().map(map_integration).collect()
    }
}
