//! Access-review and access-request forwards.
//!
//! Both kinds share one shape: reviews or requests addressed to one user
//! are forwarded to another. The two differ only in API path, so the model
//! and codecs are shared and the client exposes separate operations.

use crate::error::Result;
use crate::model::common::{require_nested, UserWire, WireRef};
use crate::reference::EntityReference;
use serde::{Deserialize, Serialize};
use uuid::Uuid;

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ForwardResponse {
    pub id: Uuid,
    #[serde(default)]
    pub user: Option<UserWire>,
    #[serde(default)]
    pub forward_to: Option<UserWire>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CreateForwardRequest {
    pub user: WireRef,
    pub forward_to: WireRef,
}

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ForwardConfig {
    pub user: EntityReference,
    pub forward_to: EntityReference,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ForwardModel {
    pub id: Uuid,
    pub user: EntityReference,
    pub forward_to: EntityReference,
}

pub fn encode_create(config: &ForwardConfig) -> Result<CreateForwardRequest> {
    Ok(CreateForwardRequest {
        user: WireRef::resolve(&config.user, "user")?,
        forward_to: WireRef::resolve(&config.forward_to, "forward_to")?,
    })
}

/// Both sides are required on every forward response.
pub fn map_forward(response: &ForwardResponse) -> Result<ForwardModel> {
    let user = require_nested(response.user.as_ref(), "forward.user")?;
    let forward_to = require_nested(response.forward_to.as_ref(), "forward.forward_to")?;
    Ok(ForwardModel {
        id: response.id,
        user: user.to_reference(),
        forward_to: forward_to.to_reference(),
    })
}
