//! Cache module for persisting fetched profiles and repositories to disk
//!
//! The store keeps two whole-collection JSON files and exposes them through the
//! [`PersistenceProvider`] trait so the caching repository can be tested
//! against any backing store.

mod store;

pub use store::{JsonFileStore, PersistenceProvider, StoreError, REPOS_FILE, USERS_FILE};
