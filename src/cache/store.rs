//! JSON file store for the persisted profile and repository collections
//!
//! Two collections live side by side in the cache directory: `users.json`
//! maps a username to its profile and `repos.json` maps an owner to its
//! repository list. Each save rewrites the whole file.

use std::collections::HashMap;
use std::fs;
use std::io::{self, Write};
use std::path::{Path, PathBuf};

use directories::ProjectDirs;
use serde::{de::DeserializeOwned, Serialize};
use thiserror::Error;
use tracing::debug;

use crate::data::{Repository, UserProfile};

/// File name of the persisted user collection
pub const USERS_FILE: &str = "users.json";

/// File name of the persisted repository collection
pub const REPOS_FILE: &str = "repos.json";

/// Errors raised by the persistence layer
#[derive(Debug, Error)]
pub enum StoreError {
    /// Reading, writing or deleting a cache file failed
    #[error("Cache I/O error: {0}")]
    Io(#[from] io::Error),

    /// A cache file exists but does not hold the expected JSON
    #[error("Corrupt cache file {}: {source}", .path.display())]
    Corrupt {
        path: PathBuf,
        source: serde_json::Error,
    },

    /// A collection could not be encoded
    #[error("Failed to encode cache data: {0}")]
    Encode(#[from] serde_json::Error),
}

/// Load-all/save-all access to the two persisted collections
pub trait PersistenceProvider {
    /// Reads the full user collection, creating empty storage if none exists
    fn load_users(&self) -> Result<HashMap<String, UserProfile>, StoreError>;

    /// Replaces the full user collection
    fn save_users(&self, users: &HashMap<String, UserProfile>) -> Result<(), StoreError>;

    /// Reads the full repository collection, creating empty storage if none exists
    fn load_repos(&self) -> Result<HashMap<String, Vec<Repository>>, StoreError>;

    /// Replaces the full repository collection
    fn save_repos(&self, repos: &HashMap<String, Vec<Repository>>) -> Result<(), StoreError>;

    /// Deletes both collections
    fn purge_all(&self) -> Result<(), StoreError>;
}

/// Persists both collections as JSON files in one directory
///
/// The default location is the XDG-compliant cache directory
/// (`~/.cache/ghpeek/` on Linux). Files are created lazily: the first load of
/// a missing collection writes an empty JSON object in its place.
#[derive(Debug, Clone)]
pub struct JsonFileStore {
    /// Directory where the collection files are stored
    cache_dir: PathBuf,
}

impl JsonFileStore {
    /// Creates a store in the platform cache directory
    ///
    /// Returns `None` if the cache directory cannot be determined (e.g., no home directory).
    pub fn new() -> Option<Self> {
        let project_dirs = ProjectDirs::from("", "", "ghpeek")?;
        let cache_dir = project_dirs.cache_dir().to_path_buf();
        Some(Self { cache_dir })
    }

    /// Creates a store rooted at a custom directory
    pub fn with_dir(cache_dir: PathBuf) -> Self {
        Self { cache_dir }
    }

    /// Directory holding the collection files
    pub fn dir(&self) -> &Path {
        &self.cache_dir
    }

    fn users_path(&self) -> PathBuf {
        self.cache_dir.join(USERS_FILE)
    }

    fn repos_path(&self) -> PathBuf {
        self.cache_dir.join(REPOS_FILE)
    }

    /// Writes an empty collection if the file does not exist yet
    fn ensure_file(&self, path: &Path) -> io::Result<()> {
        if !path.exists() {
            fs::create_dir_all(&self.cache_dir)?;
            fs::write(path, "{}")?;
            debug!(path = %path.display(), "initialized empty cache collection");
        }
        Ok(())
    }

    fn load_collection<T: DeserializeOwned>(
        &self,
        path: &Path,
    ) -> Result<HashMap<String, T>, StoreError> {
        self.ensure_file(path)?;

        let content = fs::read_to_string(path)?;
        if content.trim().is_empty() {
            return Ok(HashMap::new());
        }

        serde_json::from_str(&content).map_err(|source| StoreError::Corrupt {
            path: path.to_path_buf(),
            source,
        })
    }

    fn save_collection<T: Serialize>(
        &self,
        path: &Path,
        collection: &HashMap<String, T>,
    ) -> Result<(), StoreError> {
        fs::create_dir_all(&self.cache_dir)?;

        let json = serde_json::to_string_pretty(collection)?;

        // Write atomically via temp file
        let temp_path = path.with_extension("tmp");
        let mut file = fs::File::create(&temp_path)?;
        file.write_all(json.as_bytes())?;
        file.sync_all()?;
        fs::rename(&temp_path, path)?;

        debug!(path = %path.display(), entries = collection.len(), "saved cache collection");
        Ok(())
    }
}

impl PersistenceProvider for JsonFileStore {
    fn load_users(&self) -> Result<HashMap<String, UserProfile>, StoreError> {
        self.load_collection(&self.users_path())
    }

    fn save_users(&self, users: &HashMap<String, UserProfile>) -> Result<(), StoreError> {
        self.save_collection(&self.users_path(), users)
    }

    fn load_repos(&self) -> Result<HashMap<String, Vec<Repository>>, StoreError> {
        self.load_collection(&self.repos_path())
    }

    fn save_repos(&self, repos: &HashMap<String, Vec<Repository>>) -> Result<(), StoreError> {
        self.save_collection(&self.repos_path(), repos)
    }

    fn purge_all(&self) -> Result<(), StoreError> {
        for path in [self.users_path(), self.repos_path()] {
            match fs::remove_file(&path) {
                Ok(()) => debug!(path = %path.display(), "deleted cache collection"),
                Err(e) if e.kind() == io::ErrorKind::NotFound => {}
                Err(e) => return Err(e.into()),
            }
        }
        Ok(())
    }
}
