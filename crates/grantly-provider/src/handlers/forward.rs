//! Lifecycle shells for access-review and access-request forwards.
//!
//! The two kinds share one shape and differ only in API path, so one
//! generic handler is parameterized by the endpoint family.

use grantly_client::GrantlyClient;
use grantly_core::error::Result;
use grantly_core::model::forward::{encode_create, map_forward, ForwardConfig, ForwardModel};
use tracing::instrument;
use uuid::Uuid;

/// Which forward endpoint family to address.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ForwardKind {
    AccessReview,
    AccessRequest,
}

pub struct ForwardHandler<'a> {
    client: &'a GrantlyClient,
    kind: ForwardKind,
}

impl<'a> ForwardHandler<'a> {
    pub fn new(client: &'a GrantlyClient, kind: ForwardKind) -> Self {
        Self { client, kind }
    }

    #[instrument(skip_all, fields(kind = ?self.kind))]
    pub async fn create(&self, config: &ForwardConfig) -> Result<ForwardModel> {
        let request = encode_create(config)?;
        let response = match self.kind {
            ForwardKind::AccessReview => {
                self.client.create_access_review_forward(&request).await?
            }
            ForwardKind::AccessRequest => {
                self.client.create_access_request_forward(&request).await?
            }
        };
        map_forward(&response)
    }

    #[instrument(skip(self), fields(kind = ?self.kind))]
    pub async fn read(&self, id: Uuid) -> Result<ForwardModel> {
        let response = match self.kind {
            ForwardKind::AccessReview => self.client.get_access_review_forward(id).await?,
            ForwardKind::AccessRequest => self.client.get_access_request_forward(id).await?,
        };
        map_forward(&response)
    }

    #[instrument(skip(self), fields(kind = ?self.kind))]
    pub async fn delete(&self, id: Uuid) -> Result<()> {
        let result = match self.kind {
            ForwardKind::AccessReview => self.client.delete_access_review_forward(id).await,
            ForwardKind::AccessRequest => self.client.delete_access_request_forward(id).await,
        };
        match result {
            Err(err) if err.is_not_found() => {
                tracing::debug!(%id, "forward already absent, treating delete as success");
                Ok(())
            }
            other => other,
        }
    }
}
