//! Lifecycle shell for resource objects.

use grantly_client::GrantlyClient;
use grantly_core::error::Result;
use grantly_core::filter::ListFilter;
use grantly_core::model::resource::{
    encode_create, encode_update, map_resource, ResourceConfig, ResourceModel,
};
use tracing::instrument;
use uuid::Uuid;

pub struct ResourceHandler<'a> {
    client: &'a GrantlyClient,
}

impl<'a> ResourceHandler<'a> {
    pub fn new(client: &'a GrantlyClient) -> Self {
        Self { client }
    }

    #[instrument(skip_all, fields(name = %config.name))]
    pub async fn create(&self, config: &ResourceConfig) -> Result<ResourceModel> {
        let request = encode_create(config)?;
        let response = self.client.create_resource(&request).await?;
        map_resource(&response)
    }

    #[instrument(skip(self))]
    pub async fn read(&self, id: Uuid) -> Result<ResourceModel> {
        let response = self.client.get_resource(id).await?;
        map_resource(&response)
    }

    #[instrument(skip_all, fields(%id))]
    pub async fn update(&self, id: Uuid, config: &ResourceConfig) -> Result<ResourceModel> {
        let request = encode_update(config)?;
        let response = self.client.update_resource(id, &request).await?;
        map_resource(&response)
    }

    /// Delete is idempotent: an object already absent upstream is the
    /// desired end state, not a failure.
    #[instrument(skip(self))]
    pub async fn delete(&self, id: Uuid) -> Result<()> {
        match self.client.delete_resource(id).await {
            Err(err) if err.is_not_found() => {
                tracing::debug!(%id, "resource already absent, treating delete as success");
                Ok(())
            }
            other => other,
        }
    }

    #[instrument(skip_all)]
    pub async fn find(&self, filter: Option<&ListFilter>) -> Result<Vec<ResourceModel>> {
        let responses = self.client.list_resources(filter).await?;
        responses.iter().map(map_resource).collect()
    }
}
