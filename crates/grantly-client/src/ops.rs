//! Typed operations over the Grantly API, one method per published
//! endpoint.
//!
//! Every fully-managed object kind exposes the same five operations
//! (create, show-by-id, index-with-filter, update, delete), so those are
//! stamped out by `crud_ops!` below. Kinds with a narrower surface (agent
//! tokens have no update; forwards come in two path flavors over one shape;
//! users are read-only) are written out by hand.

use crate::client::GrantlyClient;
use grantly_core::error::Result;
use grantly_core::filter::{build_query, ListFilter};
use grantly_core::model::agent_token::{AgentTokenResponse, CreateAgentTokenRequest};
use grantly_core::model::bundle::{BundleResponse, CreateBundleRequest, UpdateBundleRequest};
use grantly_core::model::common::{ItemEnvelope, ListEnvelope};
use grantly_core::model::forward::{CreateForwardRequest, ForwardResponse};
use grantly_core::model::integration::{
    CreateIntegrationRequest, IntegrationResponse, UpdateIntegrationRequest,
};
use grantly_core::model::policy::{CreatePolicyRequest, PolicyResponse, UpdatePolicyRequest};
use grantly_core::model::resource::{
    CreateResourceRequest, ResourceResponse, UpdateResourceRequest,
};
use grantly_core::model::role::{CreateRoleRequest, RoleResponse, UpdateRoleRequest};
use grantly_core::model::user::UserResponse;
use grantly_core::model::workflow::{
    CreateWorkflowRequest, UpdateWorkflowRequest, WorkflowResponse,
};
use reqwest::Method;
use uuid::Uuid;

macro_rules! crud_ops {
    ($path:literal, $op:literal, $resp:ty,
     $create:ident($create_req:ty), $get:ident, $list:ident,
     $update:ident($update_req:ty), $delete:ident) => {
        impl GrantlyClient {
            pub async fn $create(&self, request: &$create_req) -> Result<$resp> {
                let envelope: ItemEnvelope<$resp> = self
                    .request(
                        Method::POST,
                        $path,
                        &[],
                        Some(request),
                        concat!($op, ".create"),
                        "",
                    )
                    .await?;
                Ok(envelope.result)
            }

            pub async fn $get(&self, id: Uuid) -> Result<$resp> {
                let envelope: ItemEnvelope<$resp> = self
                    .request::<(), _>(
                        Method::GET,
                        &format!(concat!($path, "/{}"), id),
                        &[],
                        None,
                        concat!($op, ".read"),
                        &id.to_string(),
                    )
                    .await?;
                Ok(envelope.result)
            }

            pub async fn $list(&self, filter: Option<&ListFilter>) -> Result<Vec<$resp>> {
                let envelope: ListEnvelope<$resp> = self
                    .request::<(), _>(
                        Method::GET,
                        $path,
                        &build_query(filter),
                        None,
                        concat!($op, ".index"),
                        "",
                    )
                    .await?;
                Ok(envelope.result)
            }

            pub async fn $update(&self, id: Uuid, request: &$update_req) -> Result<$resp> {
                let envelope: ItemEnvelope<$resp> = self
                    .request(
                        Method::PUT,
                        &format!(concat!($path, "/{}"), id),
                        &[],
                        Some(request),
                        concat!($op, ".update"),
                        &id.to_string(),
                    )
                    .await?;
                Ok(envelope.result)
            }

            pub async fn $delete(&self, id: Uuid) -> Result<()> {
                self.request_empty::<()>(
                    Method::DELETE,
                    &format!(concat!($path, "/{}"), id),
                    None,
                    concat!($op, ".delete"),
                    &id.to_string(),
                )
                .await
            }
        }
    };
}

crud_ops!(
    "v1/resources", "resources", ResourceResponse,
    create_resource(CreateResourceRequest), get_resource, list_resources,
    update_resource(UpdateResourceRequest), delete_resource
);

crud_ops!(
    "v1/roles", "roles", RoleResponse,
    create_role(CreateRoleRequest), get_role, list_roles,
    update_role(UpdateRoleRequest), delete_role
);

crud_ops!(
    "v1/workflows", "workflows", WorkflowResponse,
    create_workflow(CreateWorkflowRequest), get_workflow, list_workflows,
    update_workflow(UpdateWorkflowRequest), delete_workflow
);

crud_ops!(
    "v1/integrations", "integrations", IntegrationResponse,
    create_integration(CreateIntegrationRequest), get_integration, list_integrations,
    update_integration(UpdateIntegrationRequest), delete_integration
);

crud_ops!(
    "v1/bundles", "bundles", BundleResponse,
    create_bundle(CreateBundleRequest), get_bundle, list_bundles,
    update_bundle(UpdateBundleRequest), delete_bundle
);

crud_ops!(
    "v1/policies", "policies", PolicyResponse,
    create_policy(CreatePolicyRequest), get_policy, list_policies,
    update_policy(UpdatePolicyRequest), delete_policy
);

impl GrantlyClient {
    // Agent tokens: no update endpoint; the secret comes back on create only.

    pub async fn create_agent_token(
        &self,
        request: &CreateAgentTokenRequest,
    ) -> Result<AgentTokenResponse> {
        let envelope: ItemEnvelope<AgentTokenResponse> = self
            .request(
                Method::POST,
                "v1/agent-tokens",
                &[],
                Some(request),
                "agent_tokens.create",
                "",
            )
            .await?;
        Ok(envelope.result)
    }

    pub async fn get_agent_token(&self, id: Uuid) -> Result<AgentTokenResponse> {
        let envelope: ItemEnvelope<AgentTokenResponse> = self
            .request::<(), _>(
                Method::GET,
                &format!("v1/agent-tokens/{id}"),
                &[],
                None,
                "agent_tokens.read",
                &id.to_string(),
            )
            .await?;
        Ok(envelope.result)
    }

    pub async fn delete_agent_token(&self, id: Uuid) -> Result<()> {
        self.request_empty::<()>(
            Method::DELETE,
            &format!("v1/agent-tokens/{id}"),
            None,
            "agent_tokens.delete",
            &id.to_string(),
        )
        .await
    }

    // Access-review and access-request forwards share one shape over two
    // path families; neither supports update (replace = delete + create).

    pub async fn create_access_review_forward(
        &self,
        request: &CreateForwardRequest,
    ) -> Result<ForwardResponse> {
        let envelope: ItemEnvelope<ForwardResponse> = self
            .request(
                Method::POST,
                "v1/access-review-forwards",
                &[],
                Some(request),
                "access_review_forwards.create",
                "",
            )
            .await?;
        Ok(envelope.result)
    }

    pub async fn get_access_review_forward(&self, id: Uuid) -> Result<ForwardResponse> {
        let envelope: ItemEnvelope<ForwardResponse> = self
            .request::<(), _>(
                Method::GET,
                &format!("v1/access-review-forwards/{id}"),
                &[],
                None,
                "access_review_forwards.read",
                &id.to_string(),
            )
            .await?;
        Ok(envelope.result)
    }

    pub async fn delete_access_review_forward(&self, id: Uuid) -> Result<()> {
        self.request_empty::<()>(
            Method::DELETE,
            &format!("v1/access-review-forwards/{id}"),
            None,
            "access_review_forwards.delete",
            &id.to_string(),
        )
        .await
    }

    pub async fn create_access_request_forward(
        &self,
        request: &CreateForwardRequest,
    ) -> Result<ForwardResponse> {
        let envelope: ItemEnvelope<ForwardResponse> = self
            .request(
                Method::POST,
                "v1/access-request-forwards",
                &[],
                Some(request),
                "access_request_forwards.create",
                "",
            )
            .await?;
        Ok(envelope.result)
    }

    pub async fn get_access_request_forward(&self, id: Uuid) -> Result<ForwardResponse> {
        let envelope: ItemEnvelope<ForwardResponse> = self
            .request::<(), _>(
                Method::GET,
                &format!("v1/access-request-forwards/{id}"),
                &[],
                None,
                "access_request_forwards.read",
                &id.to_string(),
            )
            .await?;
        Ok(envelope.result)
    }

    pub async fn delete_access_request_forward(&self, id: Uuid) -> Result<()> {
        self.request_empty::<()>(
            Method::DELETE,
            &format!("v1/access-request-forwards/{id}"),
            None,
            "access_request_forwards.delete",
            &id.to_string(),
        )
        .await
    }

    // Users: data-source reads only.

    pub async fn get_user(&self, id: Uuid) -> Result<UserResponse> {
        let envelope: ItemEnvelope<UserResponse> = self
            .request::<(), _>(
                Method::GET,
                &format!("v1/users/{id}"),
                &[],
                None,
                "users.read",
                &id.to_string(),
            )
            .await?;
        Ok(envelope.result)
    }

    pub async fn list_users(&self, filter: Option<&ListFilter>) -> Result<Vec<UserResponse>> {
        let envelope: ListEnvelope<UserResponse> = self
            .request::<(), _>(
                Method::GET,
                "v1/users",
                &build_query(filter),
                None,
                "users.index",
                "",
            )
            .await?;
        Ok(envelope.result)
    }
}
