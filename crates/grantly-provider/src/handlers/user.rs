//! Data-source reads for directory users.

use grantly_client::GrantlyClient;
use grantly_core::error::Result;
use grantly_core::filter::ListFilter;
use grantly_core::model::user::{map_user, UserModel};
use tracing::instrument;
use uuid::Uuid;

pub struct UserHandler<'a> {
    client: &'a GrantlyClient,
}

impl<'a> UserHandler<'a> {
    pub fn new(client: &'a GrantlyClient) -> Self {
        Self { client }
    }

    #[instrument(skip(self))]
    pub async fn read(&self, id: Uuid) -> Result<UserModel> {
        let response = self.client.get_user(id).await?;
        map_user(&response)
    }

    #[instrument(skip_all)]
    pub async fn find(&self, filter: Option<&ListFilter>) -> Result<Vec<UserModel>> {
        let responses = self.client.list_users(filter).await?;
        responses.iter().map(map_user).collect()
    }
}
