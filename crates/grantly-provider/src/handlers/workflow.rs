//! Lifecycle shell for approval workflows.

use grantly_client::GrantlyClient;
use grantly_core::error::Result;
use grantly_core::filter::ListFilter;
use grantly_core::model::workflow::{
    encode_create, encode_update, map_workflow, WorkflowConfig, WorkflowModel,
};
use tracing::instrument;
use uuid::Uuid;

pub struct WorkflowHandler<'a> {
    client: &'a GrantlyClient,
}

impl<'a> WorkflowHandler<'a> {
    pub fn new(client: &'a GrantlyClient) -> Self {
        Self { client }
    }

    #[instrument(skip_all, fields(name = %config.name))]
    pub async fn create(&self, config: &WorkflowConfig) -> Result<WorkflowModel> {
        let request = encode_create(config)?;
        let response = self.client.create_workflow(&request).await?;
        map_workflow(&response)
    }

    #[instrument(skip(self))]
    pub async fn read(&self, id: Uuid) -> Result<WorkflowModel> {
        let response = self.client.get_workflow(id).await?;
        map_workflow(&response)
    }

    #[instrument(skip_all, fields(%id))]
    pub async fn update(&self, id: Uuid, config: &WorkflowConfig) -> Result<WorkflowModel> {
        let request = encode_update(config)?;
        let response = self.client.update_workflow(id, &request).await?;
        map_workflow(&response)
    }

    #[instrument(skip(self))]
    pub async fn delete(&self, id: Uuid) -> Result<()> {
        match self.client.delete_workflow(id).await {
            Err(err) if err.is_not_found() => {
                tracing::debug!(%id, "workflow already absent, treating delete as success");
                Ok(())
            }
            other => other,
        }
    }

    #[instrument(skip_all)]
    pub async fn find(&self, filter: Option<&ListFilter>) -> Result<Vec<WorkflowModel>> {
        let responses = self.client.list_workflows(filter).await?;
        responses.iter().map(map_workflow).collect()
    }
}
