//! Error taxonomy for Grantly provider operations.
//!
//! Every failure in the reconciliation layer collapses into [`GrantlyError`].
//! Pre-flight errors (`MissingIdentifier`, `UnknownDiscriminatorTag` on
//! encode) abort before any network call. Post-call errors are produced by
//! [`classify`] exactly once per HTTP exchange and carry the status and the
//! server-supplied message verbatim, with one exception: `Unauthorized`
//! never echoes the body, so credential material cannot leak into
//! diagnostics.

use serde::Deserialize;
use std::fmt;
use thiserror::Error;

/// Machine error code the API uses for a missing object.
const NOT_FOUND_CODE: &str = "resource.notFound";

/// Structured error body returned by the Grantly API.
///
/// Used only for classification, never stored on a model.
#[derive(Debug, Clone, Deserialize)]
pub struct ApiErrorBody {
    /// Machine error code, e.g. `"resource.notFound"`.
    pub id: String,
    /// Optional human-readable message.
    pub message: Option<String>,
}

/// Errors produced by the Grantly provider reconciliation layer.
#[derive(Debug, Error)]
pub enum GrantlyError {
    /// A reference carried neither an id nor a natural key.
    #[error(
        "missing identifier for field '{field}': set either an id or an email before applying"
    )]
    MissingIdentifier { field: String },

    /// A discriminated-union envelope carried a tag outside the known set.
    #[error("unknown discriminator tag '{tag}' for field '{field}'")]
    UnknownDiscriminatorTag { field: String, tag: String },

    /// The transport failed before an HTTP status was obtained.
    #[error("connection failure while calling the Grantly API: {message}")]
    Connection { message: String },

    /// Credentials were rejected. Fixed remediation text; the server body is
    /// intentionally discarded so token material is never echoed.
    #[error(
        "the Grantly API rejected the supplied credentials; refresh or re-issue the API token and retry the operation"
    )]
    Unauthorized,

    /// The object does not exist upstream.
    #[error("{operation}: object '{id}' was not found in the Grantly API")]
    NotFound { operation: String, id: String },

    /// The server rejected the request as invalid; message passed through.
    #[error("the Grantly API rejected the request (HTTP {status}): {message}")]
    Validation { status: u16, message: String },

    /// A 2xx response violated the published schema.
    #[error("malformed Grantly API response: {detail}")]
    MalformedResponse { detail: String },

    /// Anything else, including 5xx.
    #[error("unexpected Grantly API failure (HTTP {status}): {message}")]
    Unknown { status: u16, message: String },
}

impl GrantlyError {
    /// Create a new MissingIdentifier error naming the offending field.
    pub fn missing_identifier(field: impl Into<String>) -> Self {
        Self::MissingIdentifier {
            field: field.into(),
        }
    }

    /// Create a new UnknownDiscriminatorTag error.
    pub fn unknown_tag(field: impl Into<String>, tag: impl Into<String>) -> Self {
        Self::UnknownDiscriminatorTag {
            field: field.into(),
            tag: tag.into(),
        }
    }

    /// Create a new Connection error from a transport-level failure.
    pub fn connection(message: impl Into<String>) -> Self {
        Self::Connection {
            message: message.into(),
        }
    }

    /// Create a new NotFound error for the given operation and object id.
    pub fn not_found(operation: impl Into<String>, id: impl Into<String>) -> Self {
        Self::NotFound {
            operation: operation.into(),
            id: id.into(),
        }
    }

    /// Create a new MalformedResponse error.
    pub fn malformed(detail: impl Into<String>) -> Self {
        Self::MalformedResponse {
            detail: detail.into(),
        }
    }

    /// True for errors raised before any network call was made.
    pub fn is_preflight(&self) -> bool {
        matches!(
            self,
            Self::MissingIdentifier { .. } | Self::UnknownDiscriminatorTag { .. }
        )
    }

    /// True when the object is already absent upstream.
    ///
    /// Delete handlers treat this as success: the desired end state
    /// ("object does not exist") already holds.
    pub fn is_not_found(&self) -> bool {
        matches!(self, Self::NotFound { .. })
    }

    /// Short category label for diagnostics and logs.
    pub fn category(&self) -> ErrorCategory {
        match self {
            Self::MissingIdentifier { .. } => ErrorCategory::Configuration,
            Self::UnknownDiscriminatorTag { .. } => ErrorCategory::Decode,
            Self::Connection { .. } => ErrorCategory::Connection,
            Self::Unauthorized => ErrorCategory::Unauthorized,
            Self::NotFound { .. } => ErrorCategory::NotFound,
            Self::Validation { .. } => ErrorCategory::Validation,
            Self::MalformedResponse { .. } => ErrorCategory::Contract,
            Self::Unknown { .. } => ErrorCategory::Unknown,
        }
    }
}

/// Coarse error categories used as diagnostic labels.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorCategory {
    Configuration,
    Decode,
    Connection,
    Unauthorized,
    NotFound,
    Validation,
    Contract,
    Unknown,
}

impl fmt::Display for ErrorCategory {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Configuration => write!(f, "configuration"),
            Self::Decode => write!(f, "decode"),
            Self::Connection => write!(f, "connection"),
            Self::Unauthorized => write!(f, "unauthorized"),
            Self::NotFound => write!(f, "not_found"),
            Self::Validation => write!(f, "validation"),
            Self::Contract => write!(f, "contract"),
            Self::Unknown => write!(f, "unknown"),
        }
    }
}

/// Classify an HTTP exchange into the error taxonomy.
///
/// `operation` names the lifecycle call (e.g. `"resources.read"`) and `id`
/// the object when known; both end up in the diagnostic. A 2xx status
/// classifies as `Ok(())`. The caller decides policy: delete handlers map
/// [`GrantlyError::NotFound`] back to success, everything else surfaces it.
pub fn classify(
    operation: &str,
    id: &str,
    status: u16,
    body: &[u8],
) -> std::result::Result<(), GrantlyError> {
    if (200..300).contains(&status) {
        return Ok(());
    }

    let parsed: Option<ApiErrorBody> = serde_json::from_slice(body).ok();
    let message = parsed
        .as_ref()
        .and_then(|b| b.message.clone())
        .unwrap_or_else(|| String::from_utf8_lossy(body).trim().to_string());

    if status == 401 {
        return Err(GrantlyError::Unauthorized);
    }
    // The API reports a bad token on some routes as a 400 with an
    // invalid-identifier message rather than a 401.
    if status == 400
        && (message.contains("invalid identifier")
            || parsed.as_ref().is_some_and(|b| b.id == "auth.invalidToken"))
    {
        return Err(GrantlyError::Unauthorized);
    }

    let not_found_code = parsed.as_ref().is_some_and(|b| b.id == NOT_FOUND_CODE);
    if status == 404 || not_found_code {
        return Err(GrantlyError::not_found(operation, id));
    }

    if (400..500).contains(&status) {
        return Err(GrantlyError::Validation { status, message });
    }

    Err(GrantlyError::Unknown { status, message })
}

/// Convenience result type for reconciliation operations.
pub type Result<T> = std::result::Result<T, GrantlyError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_missing_identifier_names_field() {
        let err = GrantlyError::missing_identifier("owner");
        assert!(err.to_string().contains("'owner'"));
        assert!(err.is_preflight());
        assert_eq!(err.category(), ErrorCategory::Configuration);
    }

    #[test]
    fn test_unknown_tag_is_preflight() {
        let err = GrantlyError::unknown_tag("maintainers", "robot");
        assert!(err.to_string().contains("'robot'"));
        assert!(err.is_preflight());
        assert_eq!(err.category(), ErrorCategory::Decode);
    }

    #[test]
    fn test_classify_success() {
        assert!(classify("resources.read", "abc", 200, b"{}").is_ok());
        assert!(classify("resources.create", "abc", 201, b"{}").is_ok());
    }

    #[test]
    fn test_classify_not_found_by_status() {
        let err = classify("resources.read", "abc", 404, b"").unwrap_err();
        assert!(err.is_not_found());
        assert!(err.to_string().contains("resources.read"));
        assert!(err.to_string().contains("'abc'"));
    }

    #[test]
    fn test_classify_not_found_by_body_code() {
        let body = br#"{"id":"resource.notFound","message":"gone"}"#;
        let err = classify("roles.update", "r1", 400, body).unwrap_err();
        assert!(err.is_not_found());
    }

    #[test]
    fn test_classify_unauthorized_never_echoes_body() {
        let token = "bearer-secret-token-material";
        let body = format!(r#"{{"id":"auth.denied","message":"bad token {token}"}}"#);
        let err = classify("resources.read", "abc", 401, body.as_bytes()).unwrap_err();
        assert_eq!(err.category(), ErrorCategory::Unauthorized);
        assert!(!err.to_string().contains(token));
    }

    #[test]
    fn test_classify_bad_request_invalid_identifier_is_unauthorized() {
        let body = br#"{"id":"auth.invalidToken","message":"invalid identifier supplied"}"#;
        let err = classify("resources.read", "abc", 400, body).unwrap_err();
        assert_eq!(err.category(), ErrorCategory::Unauthorized);
    }

    #[test]
    fn test_classify_validation_passes_message_through() {
        let body = br#"{"id":"resource.invalidName","message":"name must not be blank"}"#;
        let err = classify("resources.create", "", 422, body).unwrap_err();
        assert_eq!(err.category(), ErrorCategory::Validation);
        assert!(err.to_string().contains("name must not be blank"));
    }

    #[test]
    fn test_classify_server_error_is_unknown() {
        let err = classify("resources.read", "abc", 503, b"upstream down").unwrap_err();
        assert_eq!(err.category(), ErrorCategory::Unknown);
        assert!(err.to_string().contains("503"));
    }

    #[test]
    fn test_category_labels() {
        assert_eq!(ErrorCategory::NotFound.to_string(), "not_found");
        assert_eq!(ErrorCategory::Unauthorized.to_string(), "unauthorized");
        assert_eq!(ErrorCategory::Contract.to_string(), "contract");
    }
}
