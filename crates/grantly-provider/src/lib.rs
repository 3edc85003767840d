//! Declarative-infrastructure provider for the Grantly access-governance
//! service.
//!
//! The host orchestrator drives lifecycle operations (create, read,
//! update, delete, plus data-source reads) against the handlers in
//! [`handlers`]; attribute schemas declared in [`schema`] tell the host
//! which fields exist and who owns them. All reconciliation semantics live
//! in `grantly-core`, all HTTP in `grantly-client`.

pub mod config;
pub mod handlers;
pub mod schema;

pub use config::{ConfigError, ProviderConfig, DEFAULT_ENDPOINT};
