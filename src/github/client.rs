//! GitHub REST API client
//!
//! Fetches a user's profile and repository list. Each call is a single GET
//! with no retries; the only timeout is the one configured on the HTTP client.

use std::time::Duration;

use futures::future::{BoxFuture, FutureExt};
use reqwest::{
    header::{HeaderMap, HeaderValue, ACCEPT, USER_AGENT},
    Client,
};
use serde::de::DeserializeOwned;
use thiserror::Error;
use tracing::debug;

use crate::data::{Repository, UserProfile};

/// Base URL for the GitHub REST API
pub const GITHUB_API_BASE: &str = "https://api.github.com";

/// Default request timeout
pub const DEFAULT_TIMEOUT: Duration = Duration::from_secs(30);

const GITHUB_API_VERSION: &str = "2022-11-28";

/// Errors that can occur when fetching from the remote
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum FetchError {
    /// The request never produced a response (network unreachable, timeout)
    #[error("{0}")]
    Transport(String),

    /// The remote answered with a non-success status
    #[error("API Error: {status} - {message}")]
    Remote { status: u16, message: String },

    /// The remote answered with a success status but no payload
    #[error("Empty response body")]
    EmptyBody,

    /// The payload was not the expected JSON shape
    #[error("Failed to parse API response: {0}")]
    Decode(String),
}

impl FetchError {
    fn transport(err: reqwest::Error) -> Self {
        if err.is_timeout() {
            FetchError::Transport("timeout".to_string())
        } else {
            FetchError::Transport(err.to_string())
        }
    }

    /// HTTP status carried by a `Remote` failure
    pub fn status(&self) -> Option<u16> {
        match self {
            FetchError::Remote { status, .. } => Some(*status),
            _ => None,
        }
    }
}

/// A read-only source of profiles and repositories, consulted on cache miss
pub trait RemoteSource: Send + Sync {
    /// Fetches the profile of `username`
    fn fetch_user<'a>(
        &'a self,
        username: &'a str,
        token: Option<&'a str>,
    ) -> BoxFuture<'a, Result<UserProfile, FetchError>>;

    /// Fetches the repositories owned by `username`, in API order
    fn fetch_repositories<'a>(
        &'a self,
        username: &'a str,
        token: Option<&'a str>,
    ) -> BoxFuture<'a, Result<Vec<Repository>, FetchError>>;
}

/// Client for the GitHub REST API
#[derive(Debug, Clone)]
pub struct GitHubClient {
    /// HTTP client for making requests
    http_client: Client,
    /// Base URL for the API (allows override for testing)
    base_url: String,
}

impl GitHubClient {
    /// Creates a client with a custom base URL and request timeout
    ///
    /// # Arguments
    /// * `base_url` - API root, e.g. `https://api.github.com` or a mock server URL
    /// * `timeout` - Total time allowed per request
    pub fn with_config(base_url: impl Into<String>, timeout: Duration) -> Result<Self, FetchError> {
        let mut headers = HeaderMap::new();
        headers.insert(
            ACCEPT,
            HeaderValue::from_static("application/vnd.github+json"),
        );
        headers.insert(
            "X-GitHub-Api-Version",
            HeaderValue::from_static(GITHUB_API_VERSION),
        );
        headers.insert(USER_AGENT, HeaderValue::from_static("ghpeek"));

        let http_client = Client::builder()
            .default_headers(headers)
            .timeout(timeout)
            .build()
            .map_err(FetchError::transport)?;

        Ok(Self {
            http_client,
            base_url: base_url.into().trim_end_matches('/').to_string(),
        })
    }

    /// Issues a GET and decodes a non-empty JSON body
    async fn get_json<T: DeserializeOwned>(
        &self,
        endpoint: &str,
        token: Option<&str>,
    ) -> Result<T, FetchError> {
        let url = format!("{}{}", self.base_url, endpoint);
        debug!(%url, authenticated = token.is_some(), "GET");

        let mut request = self.http_client.get(&url);
        if let Some(token) = token {
            request = request.bearer_auth(token);
        }

        let response = request.send().await.map_err(FetchError::transport)?;

        let status = response.status();
        if !status.is_success() {
            return Err(FetchError::Remote {
                status: status.as_u16(),
                message: status.canonical_reason().unwrap_or("Unknown").to_string(),
            });
        }

        let body = response.bytes().await.map_err(FetchError::transport)?;
        if body.iter().all(u8::is_ascii_whitespace) {
            return Err(FetchError::EmptyBody);
        }

        // A literal `null` body counts as empty
        let value: Option<T> =
            serde_json::from_slice(&body).map_err(|e| FetchError::Decode(e.to_string()))?;
        value.ok_or(FetchError::EmptyBody)
    }
}

impl RemoteSource for GitHubClient {
    fn fetch_user<'a>(
        &'a self,
        username: &'a str,
        token: Option<&'a str>,
    ) -> BoxFuture<'a, Result<UserProfile, FetchError>> {
        async move {
            self.get_json(&format!("/users/{}", path_segment(username)), token)
                .await
        }
        .boxed()
    }

    fn fetch_repositories<'a>(
        &'a self,
        username: &'a str,
        token: Option<&'a str>,
    ) -> BoxFuture<'a, Result<Vec<Repository>, FetchError>> {
        async move {
            self.get_json(&format!("/users/{}/repos", path_segment(username)), token)
                .await
        }
        .boxed()
    }
}

/// Percent-encodes a username for use as a single path segment
fn path_segment(s: &str) -> String {
    s.chars()
        .map(|c| match c {
            c if c.is_ascii_alphanumeric() || "-._~".contains(c) => c.to_string(),
            c => {
                let mut buf = [0u8; 4];
                c.encode_utf8(&mut buf)
                    .bytes()
                    .map(|b| format!("%{:02X}", b))
                    .collect()
            }
        })
        .collect()
}
