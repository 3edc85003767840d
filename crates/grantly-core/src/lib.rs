//! Core reconciliation layer for the Grantly access-governance provider.
//!
//! This crate holds the pure, network-free half of the provider: entity
//! references and canonical-identifier resolution, tri-state optionality,
//! discriminated-union wire codecs, allowed-duration sets, the error
//! taxonomy and classifier, pagination/filter building, and the per-kind
//! canonical models with their response-to-model mappers.
//!
//! Everything here is a pure transformation over explicit inputs: no
//! shared mutable state, no locks, nothing to cancel. The HTTP transport
//! lives in `grantly-client`; the host-facing lifecycle shells live in
//! `grantly-provider`.

pub mod durations;
pub mod error;
pub mod filter;
pub mod maintainer;
pub mod model;
pub mod optional;
pub mod permission;
pub mod reference;

pub use durations::{AllowedDurations, DURATION_UNLIMITED};
pub use error::{classify, ApiErrorBody, ErrorCategory, GrantlyError, Result};
pub use filter::{build_query, ListFilter};
pub use maintainer::{Maintainer, MaintainerEnvelope, MaintainerKind};
pub use optional::{ScalarField, SetField, WriteOp};
pub use permission::{PrerequisitePermission, PrerequisitePermissionEnvelope, RoleRef};
pub use reference::EntityReference;
