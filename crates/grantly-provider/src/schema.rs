//! Host-facing attribute schemas.
//!
//! The orchestrator's schema system owns types, plan-time validation and
//! diffing; the provider only declares, per object kind, which attributes
//! exist and whether each is required, optional or computed. Validation
//! primitives ("is UUID", "is email", length bounds) are the host's
//! validator hooks, referenced by name here and never reimplemented.

/// Attribute value shape as declared to the host.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AttrType {
    String,
    Bool,
    Int,
    StringList,
    IntList,
    ObjectList,
    Object,
}

/// Who may set the attribute.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AttrMode {
    Required,
    Optional,
    /// Server-populated, read-only.
    Computed,
    /// Optional in configuration, defaulted by the server when absent.
    OptionalComputed,
}

/// One attribute declaration.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Attribute {
    pub name: &'static str,
    pub kind: AttrType,
    pub mode: AttrMode,
    /// Host validator hooks applied at plan time.
    pub validators: &'static [&'static str],
}

const fn attr(name: &'static str, kind: AttrType, mode: AttrMode) -> Attribute {
    Attribute {
        name,
        kind,
        mode,
        validators: &[],
    }
}

const fn attr_with(
    name: &'static str,
    kind: AttrType,
    mode: AttrMode,
    validators: &'static [&'static str],
) -> Attribute {
    Attribute {
        name,
        kind,
        mode,
        validators,
    }
}

pub const RESOURCE: &[Attribute] = &[
    attr("id", AttrType::String, AttrMode::Computed),
    attr_with("name", AttrType::String, AttrMode::Required, &["length_1_to_255"]),
    attr("description", AttrType::String, AttrMode::Optional),
    attr_with("integration_id", AttrType::String, AttrMode::Required, &["is_uuid"]),
    attr("requestable", AttrType::Bool, AttrMode::OptionalComputed),
    attr("owner", AttrType::Object, AttrMode::Optional),
    attr("maintainers", AttrType::ObjectList, AttrMode::Optional),
    attr("tags", AttrType::StringList, AttrMode::Optional),
    attr("allowed_durations", AttrType::IntList, AttrMode::OptionalComputed),
    attr("workflow", AttrType::Object, AttrMode::Optional),
];

pub const ROLE: &[Attribute] = &[
    attr("id", AttrType::String, AttrMode::Computed),
    attr_with("name", AttrType::String, AttrMode::Required, &["length_1_to_255"]),
    attr_with("resource_id", AttrType::String, AttrMode::Required, &["is_uuid"]),
    attr("requestable", AttrType::Bool, AttrMode::OptionalComputed),
    attr("allowed_durations", AttrType::IntList, AttrMode::OptionalComputed),
    attr("prerequisite_permissions", AttrType::ObjectList, AttrMode::Optional),
];

pub const WORKFLOW: &[Attribute] = &[
    attr("id", AttrType::String, AttrMode::Computed),
    attr("name", AttrType::String, AttrMode::Required),
    attr("enabled", AttrType::Bool, AttrMode::OptionalComputed),
    attr("allowed_durations", AttrType::IntList, AttrMode::OptionalComputed),
];

pub const INTEGRATION: &[Attribute] = &[
    attr("id", AttrType::String, AttrMode::Computed),
    attr("name", AttrType::String, AttrMode::Required),
    attr("application_name", AttrType::String, AttrMode::Required),
    attr("owner", AttrType::Object, AttrMode::Optional),
    attr("allowed_durations", AttrType::IntList, AttrMode::OptionalComputed),
    attr("workflow", AttrType::Object, AttrMode::Optional),
];

pub const AGENT_TOKEN: &[Attribute] = &[
    attr("id", AttrType::String, AttrMode::Computed),
    attr("name", AttrType::String, AttrMode::Required),
    attr("token", AttrType::String, AttrMode::Computed),
    attr("created_at", AttrType::String, AttrMode::Computed),
];

pub const BUNDLE: &[Attribute] = &[
    attr("id", AttrType::String, AttrMode::Computed),
    attr("name", AttrType::String, AttrMode::Required),
    attr("description", AttrType::String, AttrMode::Optional),
    attr("category", AttrType::String, AttrMode::Optional),
    attr("allowed_durations", AttrType::IntList, AttrMode::OptionalComputed),
    attr("workflow", AttrType::Object, AttrMode::Optional),
    attr("roles", AttrType::ObjectList, AttrMode::Optional),
];

pub const POLICY: &[Attribute] = &[
    attr("id", AttrType::String, AttrMode::Computed),
    attr("number", AttrType::Int, AttrMode::Computed),
    attr("roles", AttrType::StringList, AttrMode::Optional),
    attr("bundles", AttrType::StringList, AttrMode::Optional),
    attr("in_groups", AttrType::StringList, AttrMode::Optional),
    attr("sort_order", AttrType::Int, AttrMode::OptionalComputed),
];

pub const FORWARD: &[Attribute] = &[
    attr("id", AttrType::String, AttrMode::Computed),
    attr_with("user", AttrType::Object, AttrMode::Required, &["is_uuid_or_email"]),
    attr_with("forward_to", AttrType::Object, AttrMode::Required, &["is_uuid_or_email"]),
];

pub const USER: &[Attribute] = &[
    attr("id", AttrType::String, AttrMode::Computed),
    attr_with("email", AttrType::String, AttrMode::Computed, &["is_email"]),
    attr("first_name", AttrType::String, AttrMode::Computed),
    attr("last_name", AttrType::String, AttrMode::Computed),
    attr("role", AttrType::String, AttrMode::Computed),
];

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_every_schema_has_a_computed_id() {
        for schema in [
            RESOURCE, ROLE, WORKFLOW, INTEGRATION, AGENT_TOKEN, BUNDLE, POLICY, FORWARD, USER,
        ] {
            let id = schema.iter().find(|a| a.name == "id").unwrap();
            assert_eq!(id.mode, AttrMode::Computed);
        }
    }

    #[test]
    fn test_attribute_names_are_unique_per_schema() {
        for schema in [
            RESOURCE, ROLE, WORKFLOW, INTEGRATION, AGENT_TOKEN, BUNDLE, POLICY, FORWARD, USER,
        ] {
            let mut names: Vec<_> = schema.iter().map(|a| a.name).collect();
            names.sort_unstable();
            let before = names.len();
            names.dedup();
            assert_eq!(before, names.len());
        }
    }
}
