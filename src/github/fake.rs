//! In-memory [`RemoteSource`] for unit tests

use std::collections::HashMap;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::Mutex;

use futures::future::{self, BoxFuture, FutureExt};

use super::{FetchError, RemoteSource};
use crate::data::{Repository, UserProfile};

/// Canned remote that counts calls and records requested usernames
#[derive(Debug, Default)]
pub struct FakeRemote {
    users: HashMap<String, Result<UserProfile, FetchError>>,
    repos: HashMap<String, Result<Vec<Repository>, FetchError>>,
    user_calls: AtomicUsize,
    repo_calls: AtomicUsize,
    requested: Mutex<Vec<String>>,
}

impl FakeRemote {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_user(mut self, username: &str, result: Result<UserProfile, FetchError>) -> Self {
        self.users.insert(username.to_string(), result);
        self
    }

    pub fn with_repos(
        mut self,
        username: &str,
        result: Result<Vec<Repository>, FetchError>,
    ) -> Self {
        self.repos.insert(username.to_string(), result);
        self
    }

    pub fn user_calls(&self) -> usize {
        self.user_calls.load(Ordering::SeqCst)
    }

    pub fn repo_calls(&self) -> usize {
        self.repo_calls.load(Ordering::SeqCst)
    }

    pub fn requested(&self) -> Vec<String> {
        self.requested.lock().unwrap().clone()
    }

    fn record(&self, username: &str) {
        self.requested.lock().unwrap().push(username.to_string());
    }
}

fn not_found() -> FetchError {
    FetchError::Remote {
        status: 404,
        message: "Not Found".to_string(),
    }
}

impl RemoteSource for FakeRemote {
    fn fetch_user<'a>(
        &'a self,
        username: &'a str,
        _token: Option<&'a str>,
    ) -> BoxFuture<'a, Result<UserProfile, FetchError>> {
        self.user_calls.fetch_add(1, Ordering::SeqCst);
        self.record(username);
        let result = self
            .users
            .get(username)
            .cloned()
            .unwrap_or_else(|| Err(not_found()));
        future::ready(result).boxed()
    }

    fn fetch_repositories<'a>(
        &'a self,
        username: &'a str,
        _token: Option<&'a str>,
    ) -> BoxFuture<'a, Result<Vec<Repository>, FetchError>> {
        self.repo_calls.fetch_add(1, Ordering::SeqCst);
        self.record(username);
        let result = self
            .repos
            .get(username)
            .cloned()
            .unwrap_or_else(|| Err(not_found()));
        future::ready(result).boxed()
    }
}
