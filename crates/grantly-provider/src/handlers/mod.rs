//! Thin lifecycle shells, one per object kind.
//!
//! Every handler follows the same pipeline: desired configuration →
//! pre-flight encoding (identity resolution, union encoding, tri-state
//! collapse) → one client call → classified result → complete canonical
//! model handed back to the host. Handlers hold only a borrowed client;
//! concurrent lifecycle calls for independent objects share nothing else.

pub mod agent_token;
pub mod bundle;
pub mod forward;
pub mod integration;
pub mod policy;
pub mod resource;
pub mod role;
pub mod user;
pub mod workflow;

pub use agent_token::AgentTokenHandler;
pub use bundle::BundleHandler;
pub use forward::{ForwardHandler, ForwardKind};
pub use integration::IntegrationHandler;
pub use policy::PolicyHandler;
pub use resource::ResourceHandler;
pub use role::RoleHandler;
pub use user::UserHandler;
pub use workflow::WorkflowHandler;
