//! Typed HTTP transport for the Grantly access-governance API.
//!
//! [`GrantlyClient`] wraps a shared `reqwest` handle, attaches bearer
//! credentials, and exposes one async method per published endpoint. All
//! request and response shapes come from `grantly-core`; every exchange is
//! classified once through the core error taxonomy before its payload is
//! decoded.

pub mod client;
pub mod ops;

pub use client::GrantlyClient;
