//! Maintainer discriminated union and its wire envelope codec.
//!
//! On the wire a maintainer is a tagged envelope: a `type` discriminator
//! plus exactly one payload object matching it (`user` or `group`). Locally
//! it is a sum type, so decode-time matching is exhaustive and an unknown
//! tag is a hard error rather than a silently dropped entry. Dropping a
//! maintainer silently would make the orchestrator believe one was removed
//! upstream when it was not.

use crate::error::{GrantlyError, Result};
use crate::reference::{normalize_email, EntityReference};
use serde::{Deserialize, Serialize};
use std::fmt;

const TAG_USER: &str = "user";
const TAG_GROUP: &str = "group";

/// Which kind of principal maintains an object.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum MaintainerKind {
    User,
    Group,
}

impl MaintainerKind {
    /// Parse a wire tag, case-insensitively.
    pub fn parse(tag: &str) -> Option<Self> {
        if tag.eq_ignore_ascii_case(TAG_USER) {
            Some(Self::User)
        } else if tag.eq_ignore_ascii_case(TAG_GROUP) {
            Some(Self::Group)
        } else {
            None
        }
    }

    /// Canonical wire tag.
    pub fn as_tag(&self) -> &'static str {
        match self {
            Self::User => TAG_USER,
            Self::Group => TAG_GROUP,
        }
    }
}

impl fmt::Display for MaintainerKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_tag())
    }
}

/// A maintainer as understood locally: a kind plus an entity reference.
///
/// Immutable once constructed, whether from configuration or a response.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Maintainer {
    pub kind: MaintainerKind,
    pub entity: EntityReference,
}

impl Maintainer {
    pub fn user(entity: EntityReference) -> Self {
        Self {
            kind: MaintainerKind::User,
            entity,
        }
    }

    pub fn group(entity: EntityReference) -> Self {
        Self {
            kind: MaintainerKind::Group,
            entity,
        }
    }
}

/// Payload object inside a maintainer envelope.
///
/// On requests only `id` is populated (with the resolved canonical
/// identifier); on responses the server is authoritative and may add the
/// natural key.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct MaintainerPayload {
    pub id: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub email: Option<String>,
}

/// The tagged wire shape of a maintainer.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct MaintainerEnvelope {
    #[serde(rename = "type")]
    pub tag: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub user: Option<MaintainerPayload>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub group: Option<MaintainerPayload>,
}

/// Encode a maintainer for a write request.
///
/// Fails before any network call when the entity reference is unusable;
/// `field` names the attribute (e.g. `maintainers[2]`) in the diagnostic.
pub fn encode_maintainer(maintainer: &Maintainer, field: &str) -> Result<MaintainerEnvelope> {
    let id = maintainer.entity.resolve(field)?;
    let payload = MaintainerPayload { id, email: None };
    let envelope = match maintainer.kind {
        MaintainerKind::User => MaintainerEnvelope {
            tag: TAG_USER.to_string(),
            user: Some(payload),
            group: None,
        },
        MaintainerKind::Group => MaintainerEnvelope {
            tag: TAG_GROUP.to_string(),
            group: Some(payload),
            user: None,
        },
    };
    Ok(envelope)
}

/// Decode a maintainer envelope from a response.
///
/// The tag comparison is case-insensitive; an unrecognized tag is a hard
/// error, and a recognized tag with a missing payload is a contract
/// violation by the server.
pub fn decode_maintainer(envelope: &MaintainerEnvelope, field: &str) -> Result<Maintainer> {
    let kind = MaintainerKind::parse(&envelope.tag)
        .ok_or_else(|| GrantlyError::unknown_tag(field, envelope.tag.clone()))?;

    let payload = match kind {
        MaintainerKind::User => envelope.user.as_ref(),
        MaintainerKind::Group => envelope.group.as_ref(),
    }
    .ok_or_else(|| {
        GrantlyError::malformed(format!(
            "maintainer envelope tagged '{}' carries no matching payload for field '{field}'",
            envelope.tag
        ))
    })?;

    if payload.id.is_empty() {
        return Err(GrantlyError::malformed(format!(
            "maintainer payload for field '{field}' has an empty id"
        )));
    }

    let entity = EntityReference {
        id: Some(payload.id.clone()),
        email: payload.email.as_deref().map(normalize_email),
    };
    Ok(Maintainer { kind, entity })
}

/// Decode a full maintainer list, failing on the first bad envelope so no
/// partial model is ever produced.
pub fn decode_maintainers(envelopes: &[MaintainerEnvelope], field: &str) -> Result<Vec<Maintainer>> {
    envelopes
        .iter()
        .enumerate()
        .map(|(i, envelope)| decode_maintainer(envelope, &format!("{field}[{i}]")))
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_encode_user_maintainer() {
        let m = Maintainer::user(EntityReference::from_email("Ops@Corp.IO"));
        let env = encode_maintainer(&m, "maintainers[0]").unwrap();
        assert_eq!(env.tag, "user");
        assert_eq!(env.user.unwrap().id, "ops@corp.io");
        assert!(env.group.is_none());
    }

    #[test]
    fn test_encode_group_maintainer() {
        let m = Maintainer::group(EntityReference::from_id("g-123"));
        let env = encode_maintainer(&m, "maintainers[0]").unwrap();
        assert_eq!(env.tag, "group");
        assert_eq!(env.group.unwrap().id, "g-123");
        assert!(env.user.is_none());
    }

    #[test]
    fn test_encode_empty_reference_fails_preflight() {
        let m = Maintainer::user(EntityReference::default());
        let err = encode_maintainer(&m, "maintainers[3]").unwrap_err();
        assert!(err.is_preflight());
        assert!(err.to_string().contains("maintainers[3]"));
    }

    #[test]
    fn test_decode_round_trip_preserves_kind_and_id() {
        let m = Maintainer::group(EntityReference::from_id("abc-def"));
        let env = encode_maintainer(&m, "maintainers[0]").unwrap();
        let back = decode_maintainer(&env, "maintainers[0]").unwrap();
        assert_eq!(back.kind, m.kind);
        assert_eq!(back.entity.id.as_deref(), Some("abc-def"));
    }

    #[test]
    fn test_decode_tag_is_case_insensitive() {
        let env = MaintainerEnvelope {
            tag: "USER".to_string(),
            user: Some(MaintainerPayload {
                id: "u1".into(),
                email: Some("Person@Example.com".into()),
            }),
            group: None,
        };
        let m = decode_maintainer(&env, "maintainers[0]").unwrap();
        assert_eq!(m.kind, MaintainerKind::User);
        assert_eq!(m.entity.email.as_deref(), Some("person@example.com"));
    }

    #[test]
    fn test_decode_unknown_tag_is_hard_error() {
        let env = MaintainerEnvelope {
            tag: "robot".to_string(),
            user: None,
            group: None,
        };
        let err = decode_maintainer(&env, "maintainers[0]").unwrap_err();
        assert!(matches!(err, GrantlyError::UnknownDiscriminatorTag { ref tag, .. } if tag == "robot"));
    }

    #[test]
    fn test_decode_missing_payload_is_contract_violation() {
        let env = MaintainerEnvelope {
            tag: "user".to_string(),
            user: None,
            group: None,
        };
        let err = decode_maintainer(&env, "maintainers[0]").unwrap_err();
        assert!(matches!(err, GrantlyError::MalformedResponse { .. }));
    }

    #[test]
    fn test_decode_list_fails_whole_on_one_bad_entry() {
        let good = MaintainerEnvelope {
            tag: "user".to_string(),
            user: Some(MaintainerPayload {
                id: "u1".into(),
                email: None,
            }),
            group: None,
        };
        let bad = MaintainerEnvelope {
            tag: "service".to_string(),
            user: None,
            group: None,
        };
        let err = decode_maintainers(&[good, bad], "maintainers").unwrap_err();
        assert!(err.to_string().contains("maintainers[1]"));
    }

    #[test]
    fn test_envelope_serde_shape() {
        let env = MaintainerEnvelope {
            tag: "user".to_string(),
            user: Some(MaintainerPayload {
                id: "u1".into(),
                email: None,
            }),
            group: None,
        };
        let json = serde_json::to_value(&env).unwrap();
        assert_eq!(json["type"], "user");
        assert_eq!(json["user"]["id"], "u1");
        assert!(json.get("group").is_none());
    }
}
