//! Read-through caching repository
//!
//! Mediates between three tiers for each entity type, consulted in order:
//!
//! 1. the persisted collection, reloaded on every call;
//! 2. the in-memory map owned by this repository;
//! 3. the remote source.
//!
//! A persisted hit is copied into memory. A remote success is inserted into
//! memory and the whole memory map for that entity type is written back to
//! disk. A remote failure leaves every tier untouched.

use std::collections::HashMap;

use futures::future::BoxFuture;
use thiserror::Error;
use tracing::{debug, info, warn};

use crate::cache::{PersistenceProvider, StoreError};
use crate::data::{cache_key, Repository, UserProfile};
use crate::github::{FetchError, RemoteSource};

/// Failure of a repository lookup
#[derive(Debug, Error)]
pub enum RepositoryError {
    /// The remote fetch failed
    #[error(transparent)]
    Fetch(#[from] FetchError),

    /// Loading or saving the persisted collection failed
    #[error(transparent)]
    Store(#[from] StoreError),
}

impl RepositoryError {
    /// HTTP status of a remote error response, if that is what failed
    pub fn status(&self) -> Option<u16> {
        match self {
            RepositoryError::Fetch(e) => e.status(),
            RepositoryError::Store(_) => None,
        }
    }
}

/// Caches profiles and repository lists in memory and on disk
///
/// Lookups take `&mut self`, so a single instance never has two requests in
/// flight at once.
pub struct CachingRepository<R, P> {
    remote: R,
    store: P,
    user_cache: HashMap<String, UserProfile>,
    repo_cache: HashMap<String, Vec<Repository>>,
}

impl<R: RemoteSource, P: PersistenceProvider> CachingRepository<R, P> {
    /// Creates a repository with empty memory caches
    pub fn new(remote: R, store: P) -> Self {
        Self {
            remote,
            store,
            user_cache: HashMap::new(),
            repo_cache: HashMap::new(),
        }
    }

    /// Returns the profile for `username`, fetching it only on a full miss
    ///
    /// # Arguments
    /// * `username` - Login name in any casing
    /// * `token` - Optional bearer token passed to the remote
    pub async fn get_user(
        &mut self,
        username: &str,
        token: Option<&str>,
    ) -> Result<UserProfile, RepositoryError> {
        let key = cache_key(username);
        let persisted = self.store.load_users()?;
        let remote = &self.remote;
        let store = &self.store;

        read_through(
            "user",
            &key,
            persisted,
            &mut self.user_cache,
            || remote.fetch_user(&key, token),
            |cache| store.save_users(cache),
        )
        .await
    }

    /// Returns the repositories owned by `username`, fetching them only on a full miss
    ///
    /// # Arguments
    /// * `username` - Owner login name in any casing
    /// * `token` - Optional bearer token passed to the remote
    pub async fn get_repositories(
        &mut self,
        username: &str,
        token: Option<&str>,
    ) -> Result<Vec<Repository>, RepositoryError> {
        let key = cache_key(username);
        let persisted = self.store.load_repos()?;
        let remote = &self.remote;
        let store = &self.store;

        read_through(
            "repositories",
            &key,
            persisted,
            &mut self.repo_cache,
            || remote.fetch_repositories(&key, token),
            |cache| store.save_repos(cache),
        )
        .await
    }

    /// Profile held in memory for `username`, without touching disk or remote
    pub fn cached_user(&self, username: &str) -> Option<&UserProfile> {
        self.user_cache.get(&cache_key(username))
    }

    /// Repositories held in memory for `username`, without touching disk or remote
    pub fn cached_repositories(&self, username: &str) -> Option<&[Repository]> {
        self.repo_cache
            .get(&cache_key(username))
            .map(Vec::as_slice)
    }

    /// Deletes both persisted collections. The memory caches are kept.
    pub fn purge(&self) -> Result<(), StoreError> {
        info!("purging persisted cache");
        self.store.purge_all()
    }

    /// The persistence provider backing this repository
    pub fn store(&self) -> &P {
        &self.store
    }

    /// The remote source backing this repository
    pub fn remote(&self) -> &R {
        &self.remote
    }
}

/// Rekeys a loaded collection by canonical username
fn lowercase_keys<T>(collection: HashMap<String, T>) -> HashMap<String, T> {
    collection
        .into_iter()
        .map(|(key, value)| (cache_key(&key), value))
        .collect()
}

/// One lookup through the persisted, memory and remote tiers
async fn read_through<'f, T: Clone>(
    kind: &'static str,
    key: &str,
    persisted: HashMap<String, T>,
    memory: &mut HashMap<String, T>,
    fetch: impl FnOnce() -> BoxFuture<'f, Result<T, FetchError>>,
    save: impl FnOnce(&HashMap<String, T>) -> Result<(), StoreError>,
) -> Result<T, RepositoryError> {
    if let Some(value) = lowercase_keys(persisted).remove(key) {
        debug!(kind, key, "persisted cache hit");
        memory.insert(key.to_string(), value.clone());
        return Ok(value);
    }

    if let Some(value) = memory.get(key) {
        debug!(kind, key, "memory cache hit");
        return Ok(value.clone());
    }

    info!(kind, key, "cache miss, fetching from remote");
    let value = fetch().await.map_err(|e| {
        warn!(kind, key, error = %e, "remote fetch failed");
        e
    })?;

    memory.insert(key.to_string(), value.clone());
    if let Err(e) = save(memory) {
        warn!(kind, key, error = %e, "failed to persist cache");
        return Err(e.into());
    }

    Ok(value)
}
