//! Canonical models, wire schemas and response-to-model mappers.
//!
//! One module per object kind. Every mapper constructs a complete model
//! from the latest response; nothing is ever merged onto a previous local
//! value, so host-visible state cannot drift from server state through
//! partial server-side defaulting.

pub mod agent_token;
pub mod bundle;
pub mod common;
pub mod forward;
pub mod integration;
pub mod policy;
pub mod resource;
pub mod role;
pub mod user;
pub mod workflow;
