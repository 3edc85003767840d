//! The Grantly API client: an injected, immutable transport handle.
//!
//! One instance is constructed per provider configuration and shared across
//! every resource and data-source instance. Nothing mutates it after
//! construction, so concurrent lifecycle calls need no synchronization of
//! their own. Transport-level retries, pooling and timeouts belong to the
//! underlying `reqwest` client; this layer only builds typed requests,
//! attaches credentials, classifies failures and decodes typed responses.

use grantly_core::error::{classify, GrantlyError, Result};
use reqwest::{Method, StatusCode};
use serde::de::DeserializeOwned;
use serde::Serialize;
use std::fmt;
use url::Url;

const USER_AGENT: &str = concat!("grantly-provider/", env!("CARGO_PKG_VERSION"));

/// Typed client over the Grantly REST API.
pub struct GrantlyClient {
    http: reqwest::Client,
    base_url: Url,
    token: String,
}

impl fmt::Debug for GrantlyClient {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        // The token is deliberately absent here so it cannot leak through
        // debug logs or error context.
        f.debug_struct("GrantlyClient")
            .field("base_url", &self.base_url.as_str())
            .finish_non_exhaustive()
    }
}

impl GrantlyClient {
    /// Build a client for the given endpoint and API token.
    ///
    /// The endpoint is validated here so a malformed provider configuration
    /// fails at construction, not on the first lifecycle call.
    pub fn new(endpoint: &str, token: impl Into<String>) -> Result<Self> {
        // Url::join drops the last path segment of a base without a
        // trailing slash, so normalize before parsing.
        let normalized = if endpoint.ends_with('/') {
            endpoint.to_string()
        } else {
            format!("{endpoint}/")
        };
        let base_url = Url::parse(&normalized).map_err(|e| {
            GrantlyError::connection(format!("invalid API endpoint '{endpoint}': {e}"))
        })?;
        if base_url.cannot_be_a_base() {
            return Err(GrantlyError::connection(format!(
                "invalid API endpoint '{endpoint}': not a base URL"
            )));
        }
        Ok(Self {
            http: reqwest::Client::new(),
            base_url,
            token: token.into(),
        })
    }

    fn endpoint(&self, path: &str) -> Result<Url> {
        self.base_url.join(path).map_err(|e| {
            GrantlyError::connection(format!("cannot build URL for path '{path}': {e}"))
        })
    }

    /// Perform one API call and decode the typed response payload.
    ///
    /// `operation` is the canonical operation name (e.g. `resources.read`)
    /// and `id` the object id when known; both flow into diagnostics. The
    /// exchange is classified exactly once, then decoded; a 2xx body that
    /// does not match the published schema is a contract violation.
    pub(crate) async fn request<B, T>(
        &self,
        method: Method,
        path: &str,
        query: &[(String, String)],
        body: Option<&B>,
        operation: &str,
        id: &str,
    ) -> Result<T>
    where
        B: Serialize + ?Sized,
        T: DeserializeOwned,
    {
        let bytes = self.exchange(method, path, query, body, operation, id).await?;
        serde_json::from_slice(&bytes).map_err(|e| {
            GrantlyError::malformed(format!("{operation}: response did not match schema: {e}"))
        })
    }

    /// Perform one API call where no response body is expected (delete).
    pub(crate) async fn request_empty<B>(
        &self,
        method: Method,
        path: &str,
        body: Option<&B>,
        operation: &str,
        id: &str,
    ) -> Result<()>
    where
        B: Serialize + ?Sized,
    {
        self.exchange(method, path, &[], body, operation, id)
            .await
            .map(|_| ())
    }

    async fn exchange<B>(
        &self,
        method: Method,
        path: &str,
        query: &[(String, String)],
        body: Option<&B>,
        operation: &str,
        id: &str,
    ) -> Result<Vec<u8>>
    where
        B: Serialize + ?Sized,
    {
        let url = self.endpoint(path)?;
        tracing::debug!(operation, object_id = id, path, "calling Grantly API");

        let mut request = self
            .http
            .request(method, url)
            .bearer_auth(&self.token)
            .header(reqwest::header::USER_AGENT, USER_AGENT);
        if !query.is_empty() {
            request = request.query(query);
        }
        if let Some(body) = body {
            request = request.json(body);
        }

        let response = request.send().await.map_err(|e| {
            // No status was obtained; this is a connection error, reported
            // distinctly from API errors. reqwest's Display does not include
            // request bodies or headers, so no credential material leaks.
            GrantlyError::connection(e.to_string())
        })?;

        let status: StatusCode = response.status();
        let bytes = response
            .bytes()
            .await
            .map_err(|e| GrantlyError::connection(e.to_string()))?;

        if let Err(err) = classify(operation, id, status.as_u16(), &bytes) {
            tracing::warn!(
                operation,
                object_id = id,
                status = status.as_u16(),
                category = %err.category(),
                "Grantly API call failed"
            );
            return Err(err);
        }
        Ok(bytes.to_vec())
    }
}
