//! Session orchestration for "tell me about user X"
//!
//! A [`Session`] runs the profile fetch and the repository fetch through the
//! caching repository and folds both outcomes into one [`SessionState`]. The
//! latest state is published on a `watch` channel, so observers always see
//! the most recent value and never a backlog.

use tokio::sync::watch;
use tracing::debug;

use crate::cache::PersistenceProvider;
use crate::data::{Repository, UserProfile};
use crate::github::RemoteSource;
use crate::repository::{CachingRepository, RepositoryError};

/// Outcome of the latest fetch request
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SessionState {
    /// A request is in progress (also the initial state)
    Loading,
    /// Both the profile and the repositories were obtained
    Success {
        profile: UserProfile,
        repositories: Vec<Repository>,
    },
    /// At least one fetch failed
    Error { message: String },
}

/// Sequences fetches and exposes the latest [`SessionState`]
pub struct Session<R, P> {
    repository: CachingRepository<R, P>,
    state_tx: watch::Sender<SessionState>,
}

impl<R: RemoteSource, P: PersistenceProvider> Session<R, P> {
    /// Creates a session around an existing repository, starting in `Loading`
    pub fn new(repository: CachingRepository<R, P>) -> Self {
        let (state_tx, _) = watch::channel(SessionState::Loading);
        Self {
            repository,
            state_tx,
        }
    }

    /// Subscribes to state changes
    pub fn subscribe(&self) -> watch::Receiver<SessionState> {
        self.state_tx.subscribe()
    }

    /// Snapshot of the current state
    pub fn state(&self) -> SessionState {
        self.state_tx.borrow().clone()
    }

    /// The repository this session reads through
    pub fn repository(&self) -> &CachingRepository<R, P> {
        &self.repository
    }

    /// Mutable access to the repository, for lookups outside a session request
    pub fn repository_mut(&mut self) -> &mut CachingRepository<R, P> {
        &mut self.repository
    }

    /// Fetches profile then repositories for `username` and publishes the result
    ///
    /// The state is reset to `Loading` before either fetch starts. Both fetches
    /// always run; when both fail, the profile error wins.
    ///
    /// # Returns
    /// The state that was published at the end of the request
    pub async fn fetch_user_data(&mut self, username: &str, token: Option<&str>) -> SessionState {
        self.state_tx.send_replace(SessionState::Loading);

        let profile = self.repository.get_user(username, token).await;
        let repositories = self.repository.get_repositories(username, token).await;

        let state = aggregate(profile, repositories);
        debug!(username, success = matches!(state, SessionState::Success { .. }), "fetch finished");
        self.state_tx.send_replace(state.clone());
        state
    }
}

/// Folds the two fetch outcomes into a single state
fn aggregate(
    profile: Result<UserProfile, RepositoryError>,
    repositories: Result<Vec<Repository>, RepositoryError>,
) -> SessionState {
    match (profile, repositories) {
        (Ok(profile), Ok(repositories)) => SessionState::Success {
            profile,
            repositories,
        },
        (Err(e), _) | (Ok(_), Err(e)) => SessionState::Error {
            message: e.to_string(),
        },
    }
}
