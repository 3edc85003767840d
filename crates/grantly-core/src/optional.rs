//! Tri-state optionality for configuration-driven fields.
//!
//! A plain `Option<Vec<T>>` cannot distinguish "the operator never wrote
//! this field" from "the operator explicitly configured an empty set", and
//! both differ again from "the value exists but has not been computed yet at
//! plan time". Collapsing any two of these produces either accidental
//! destructive updates (clearing a server-managed default) or perpetual
//! drift (a diff that never converges). The three local states collapse to
//! the two-state wire representation (field omitted vs field present) only
//! at the final encode step.

use crate::error::Result;
use serde::{Deserialize, Serialize};

/// Which write operation a wire value is being produced for.
///
/// Unknown plan-time placeholders are safe to send as an empty collection on
/// Create, but must be omitted on Update so an uncomputed dependent value
/// never clears live server state.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum WriteOp {
    Create,
    Update,
}

/// Tri-state collection-valued field.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub enum SetField<T> {
    /// Absent from configuration; the server keeps its current value or
    /// applies its default.
    #[default]
    Unset,
    /// Plan-time placeholder whose value depends on something not yet
    /// computed.
    Unknown,
    /// Explicitly configured, possibly empty.
    Set(Vec<T>),
}

impl<T> SetField<T> {
    /// Builds the tri-state from a wire response field.
    ///
    /// Present-but-empty maps to `Set(vec![])`; a field the server never
    /// returned maps to `Unset`. This distinction is what keeps desired and
    /// actual state diff-stable.
    pub fn from_wire(wire: Option<Vec<T>>) -> Self {
        match wire {
            Some(values) => Self::Set(values),
            None => Self::Unset,
        }
    }

    /// Collapses to the wire representation: `None` means "omit the field".
    pub fn to_wire(&self, op: WriteOp) -> Option<Vec<T>>
    where
        T: Clone,
    {
        match self {
            Self::Unset => None,
            Self::Unknown => match op {
                WriteOp::Create => Some(Vec::new()),
                WriteOp::Update => None,
            },
            Self::Set(values) => Some(values.clone()),
        }
    }

    /// Collapses to the wire representation while encoding each element,
    /// failing fast on the first element that does not encode. The encoder
    /// receives the element index so diagnostics can name the exact entry.
    pub fn try_to_wire<U, F>(&self, op: WriteOp, mut encode: F) -> Result<Option<Vec<U>>>
    where
        F: FnMut(usize, &T) -> Result<U>,
    {
        match self {
            Self::Unset => Ok(None),
            Self::Unknown => match op {
                WriteOp::Create => Ok(Some(Vec::new())),
                WriteOp::Update => Ok(None),
            },
            Self::Set(values) => {
                let mut out = Vec::with_capacity(values.len());
                for (index, value) in values.iter().enumerate() {
                    out.push(encode(index, value)?);
                }
                Ok(Some(out))
            }
        }
    }

    /// True when the field was never configured.
    pub fn is_unset(&self) -> bool {
        matches!(self, Self::Unset)
    }

    /// The configured values, when explicitly set.
    pub fn as_set(&self) -> Option<&[T]> {
        match self {
            Self::Set(values) => Some(values),
            _ => None,
        }
    }
}

/// Tri-state scalar-valued field.
///
/// Same semantics as [`SetField`] for single values: an Unknown scalar is
/// never written on Update.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub enum ScalarField<T> {
    #[default]
    Unset,
    Unknown,
    Value(T),
}

impl<T> ScalarField<T> {
    pub fn from_wire(wire: Option<T>) -> Self {
        match wire {
            Some(value) => Self::Value(value),
            None => Self::Unset,
        }
    }

    pub fn to_wire(&self) -> Option<T>
    where
        T: Clone,
    {
        match self {
            Self::Value(value) => Some(value.clone()),
            _ => None,
        }
    }

    pub fn as_value(&self) -> Option<&T> {
        match self {
            Self::Value(value) => Some(value),
            _ => None,
        }
    }
}
