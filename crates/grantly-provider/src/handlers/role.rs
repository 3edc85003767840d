//! Lifecycle shell for role objects.

use grantly_client::GrantlyClient;
use grantly_core::error::Result;
use grantly_core::filter::ListFilter;
use grantly_core::model::role::{encode_create, encode_update, map_role, RoleConfig, RoleModel};
use tracing::instrument;
use uuid::Uuid;

pub struct RoleHandler<'a> {
    client: &'a GrantlyClient,
}

impl<'a> RoleHandler<'a> {
    pub fn new(client: &'a GrantlyClient) -> Self {
        Self { client }
    }

    #[instrument(skip_all, fields(name = %config.name))]
    pub async fn create(&self, config: &RoleConfig) -> Result<RoleModel> {
        let request = encode_create(config)?;
        let response = self.client.create_role(&request).await?;
        map_role(&response)
    }

    #[instrument(skip(self))]
    pub async fn read(&self, id: Uuid) -> Result<RoleModel> {
        let response = self.client.get_role(id).await?;
        map_role(&response)
    }

    #[instrument(skip_all, fields(%id))]
    pub async fn update(&self, id: Uuid, config: &RoleConfig) -> Result<RoleModel> {
        let request = encode_update(config)?;
        let response = self.client.update_role(id, &request).await?;
        map_role(&response)
    }

    #[instrument(skip(self))]
    pub async fn delete(&self, id: Uuid) -> Result<()> {
        match self.client.delete_role(id).await {
            Err(err) if err.is_not_found() => {
                tracing::debug!(%id, "role already absent, treating delete as success");
                Ok(())
            }
            other => other,
        }
    }

    #[instrument(skip_all)]
    pub async fn find(&self, filter: Option<&ListFilter>) -> Result<Vec<RoleModel>> {
        let responses = self.client.list_roles(filter).await?;
        responses.iter().map(map_role).collect()
    }
}
