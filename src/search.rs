//! Lookups over the persisted collections
//!
//! These read the on-disk cache only. Entries that exist solely in a
//! repository's memory cache (because the disk copy was purged or failed to
//! save) are not visible here.

use std::collections::BTreeMap;

use crate::cache::{PersistenceProvider, StoreError};
use crate::data::{cache_key, Repository, UserProfile};

/// A repository match together with its owner key
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RepositoryMatch {
    pub owner: String,
    pub repository: Repository,
}

/// Everything currently persisted, ordered by username
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct PersistedSnapshot {
    pub users: BTreeMap<String, UserProfile>,
    pub repositories: BTreeMap<String, Vec<Repository>>,
}

impl PersistedSnapshot {
    pub fn is_empty(&self) -> bool {
        self.users.is_empty() && self.repositories.is_empty()
    }
}

/// Finds a persisted profile by exact username (case-insensitive)
///
/// Returns `Ok(None)` when nothing is stored under that name.
pub fn find_user<P: PersistenceProvider>(
    store: &P,
    username: &str,
) -> Result<Option<UserProfile>, StoreError> {
    let key = cache_key(username);
    Ok(store
        .load_users()?
        .into_iter()
        .find(|(stored, _)| cache_key(stored) == key)
        .map(|(_, user)| user))
}

/// Finds persisted repositories whose name contains `query` (case-insensitive)
///
/// Results are grouped by owner in alphabetical order; within an owner the
/// stored order is kept.
pub fn find_repositories<P: PersistenceProvider>(
    store: &P,
    query: &str,
) -> Result<Vec<RepositoryMatch>, StoreError> {
    let needle = query.trim().to_lowercase();
    let by_owner: BTreeMap<String, Vec<Repository>> = store
        .load_repos()?
        .into_iter()
        .map(|(owner, repos)| (cache_key(&owner), repos))
        .collect();

    Ok(by_owner
        .into_iter()
        .flat_map(|(owner, repos)| {
            repos.into_iter().map(move |repository| RepositoryMatch {
                owner: owner.clone(),
                repository,
            })
        })
        .filter(|m| m.repository.name.to_lowercase().contains(&needle))
        .collect())
}

/// Loads both persisted collections
pub fn snapshot<P: PersistenceProvider>(store: &P) -> Result<PersistedSnapshot, StoreError> {
    Ok(PersistedSnapshot {
        users: store.load_users()?.into_iter().collect(),
        repositories: store.load_repos()?.into_iter().collect(),
    })
}
