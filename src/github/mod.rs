//! GitHub API module
//!
//! Provides the [`RemoteSource`] seam and its reqwest-backed implementation.

pub mod client;

pub use client::{FetchError, GitHubClient, RemoteSource, DEFAULT_TIMEOUT, GITHUB_API_BASE};

#[cfg(test)]
pub(crate) mod fake;
