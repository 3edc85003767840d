//! Lifecycle shell for bundles.

use grantly_client::GrantlyClient;
use grantly_core::error::Result;
use grantly_core::filter::ListFilter;
use grantly_core::model::bundle::{
    encode_create, encode_update, map_bundle, BundleConfig, BundleModel,
};
use tracing::instrument;
use uuid::Uuid;

pub struct BundleHandler<'a> {
    client: &'a GrantlyClient,
}

impl<'a> BundleHandler<'a> {
    pub fn new(client: &'a GrantlyClient) -> Self {
        Self { client }
    }

    #[instrument(skip_all, fields(name = %config.name))]
    pub async fn create(&self, config: &BundleConfig) -> Result<BundleModel> {
        let request = encode_create(config)?;
        let response = self.client.create_bundle(&request).await?;
        map_bundle(&response)
    }

    #[instrument(skip(self))]
    pub async fn read(&self, id: Uuid) -> Result<BundleModel> {
        let response = self.client.get_bundle(id).await?;
        map_bundle(&response)
    }

    #[instrument(skip_all, fields(%id))]
    pub async fn update(&self, id: Uuid, config: &BundleConfig) -> Result<BundleModel> {
        let request = encode_update(config)?;
        let response = self.client.update_bundle(id, &request).await?;
        map_bundle(&response)
    }

    #[instrument(skip(self))]
    pub async fn delete(&self, id: Uuid) -> Result<()> {
        match self.client.delete_bundle(id).await {
            Err(err) if err.is_not_found() => {
                tracing::debug!(%id, "bundle already absent, treating delete as success");
                Ok(())
            }
            other => other,
        }
    }

    #[instrument(skip_all)]
    pub async fn find(&self, filter: Option<&ListFilter>) -> Result<Vec<BundleModel>> {
        let responses = self.client.list_bundles(filter).await?;
        responses.iter().map(map_bundle).collect()
    }
}
