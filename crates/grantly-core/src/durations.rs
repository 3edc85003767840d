//! Allowed-duration sets.
//!
//! Grant durations are numeric codes in seconds, with a `-1` sentinel
//! meaning "unlimited". The set is order-irrelevant: the server may return
//! codes in any order, so both encode and decode normalize (sort + dedup) to
//! keep state comparison stable. An unset field inherits the workflow
//! default upstream; an explicit empty set and a populated set are distinct
//! wire states and must never collapse into each other.

use crate::optional::{SetField, WriteOp};
use serde::{Deserialize, Serialize};

/// Sentinel duration code meaning "unlimited access".
pub const DURATION_UNLIMITED: i64 = -1;

/// Tri-state set of allowed duration codes.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct AllowedDurations(pub SetField<i64>);

impl AllowedDurations {
    /// Unset: inherit from the workflow default.
    pub fn unset() -> Self {
        Self(SetField::Unset)
    }

    /// Explicitly configured codes; normalized immediately.
    pub fn set(codes: impl IntoIterator<Item = i64>) -> Self {
        Self(SetField::Set(normalize(codes)))
    }

    /// Build from a wire response field, normalizing any populated set.
    pub fn from_wire(wire: Option<Vec<i64>>) -> Self {
        Self(match SetField::from_wire(wire) {
            SetField::Set(codes) => SetField::Set(normalize(codes)),
            other => other,
        })
    }

    /// Collapse to the wire representation, normalized.
    pub fn to_wire(&self, op: WriteOp) -> Option<Vec<i64>> {
        self.0.to_wire(op).map(normalize)
    }

    /// True when the set explicitly contains the unlimited sentinel.
    pub fn allows_unlimited(&self) -> bool {
        self.0
            .as_set()
            .is_some_and(|codes| codes.contains(&DURATION_UNLIMITED))
    }
}

fn normalize(codes: impl IntoIterator<Item = i64>) -> Vec<i64> {
    let mut codes: Vec<i64> = codes.into_iter().collect();
    codes.sort_unstable();
    codes.dedup();
    codes
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_set_normalizes_order_and_duplicates() {
        let d = AllowedDurations::set([7200, 3600, 7200, DURATION_UNLIMITED]);
        assert_eq!(
            d.to_wire(WriteOp::Create),
            Some(vec![DURATION_UNLIMITED, 3600, 7200])
        );
    }

    #[test]
    fn test_unset_omits_field() {
        assert_eq!(AllowedDurations::unset().to_wire(WriteOp::Update), None);
    }

    #[test]
    fn test_explicit_empty_is_sent_on_update() {
        let d = AllowedDurations::set([]);
        assert_eq!(d.to_wire(WriteOp::Update), Some(vec![]));
    }

    #[test]
    fn test_from_wire_normalizes_server_ordering() {
        let a = AllowedDurations::from_wire(Some(vec![7200, 3600]));
        let b = AllowedDurations::from_wire(Some(vec![3600, 7200]));
        assert_eq!(a, b);
    }

    #[test]
    fn test_from_wire_absent_is_unset() {
        assert_eq!(AllowedDurations::from_wire(None), AllowedDurations::unset());
    }

    #[test]
    fn test_allows_unlimited() {
        assert!(AllowedDurations::set([3600, DURATION_UNLIMITED]).allows_unlimited());
        assert!(!AllowedDurations::set([3600]).allows_unlimited());
        assert!(!AllowedDurations::unset().allows_unlimited());
    }
}
