//! Plain-text rendering of profiles, repositories and session states

use std::io::{self, Write};

use crossterm::style::Stylize;

use crate::data::{top_by_stars, Repository, UserProfile};
use crate::search::{PersistedSnapshot, RepositoryMatch};
use crate::session::SessionState;

use super::style::paint;

/// Number of repositories shown in a user summary
pub const TOP_REPOSITORIES: usize = 5;

/// Date format for account creation, e.g. "25 Jan 2011"
const DATE_FORMAT: &str = "%d %b %Y";

fn heading<W: Write>(out: &mut W, title: &str) -> io::Result<()> {
    writeln!(out)?;
    writeln!(out, "{}", paint(title.bold().cyan()))?;
    writeln!(out, "{}", "-".repeat(title.len()))
}

/// Renders the final (or loading) state of a fetch request
pub fn render_state<W: Write>(out: &mut W, state: &SessionState) -> io::Result<()> {
    match state {
        SessionState::Loading => writeln!(out, "{}", paint("Loading...".dark_grey())),
        SessionState::Success {
            profile,
            repositories,
        } => {
            render_profile(out, profile)?;
            render_top_repositories(out, repositories)
        }
        SessionState::Error { message } => render_error(out, message),
    }
}

/// Renders an error line
pub fn render_error<W: Write>(out: &mut W, message: &str) -> io::Result<()> {
    writeln!(out, "{} {}", paint("Error:".red().bold()), message)
}

/// Renders a profile block
pub fn render_profile<W: Write>(out: &mut W, user: &UserProfile) -> io::Result<()> {
    heading(out, "User Information:")?;
    writeln!(out, "Username: {}", user.username)?;
    writeln!(out, "Name: {}", user.name.as_deref().unwrap_or("Not specified"))?;
    writeln!(out, "Bio: {}", user.bio.as_deref().unwrap_or("Not specified"))?;
    writeln!(out, "Followers: {}", user.followers)?;
    writeln!(out, "Following: {}", user.following)?;
    writeln!(out, "Account created: {}", user.created_at.format(DATE_FORMAT))?;
    writeln!(out, "Public repositories: {}", user.public_repos)
}

/// Renders the most-starred repositories
pub fn render_top_repositories<W: Write>(out: &mut W, repos: &[Repository]) -> io::Result<()> {
    heading(out, "Top Repositories:")?;
    if repos.is_empty() {
        return writeln!(out, "No public repositories");
    }
    for repo in top_by_stars(repos, TOP_REPOSITORIES) {
        render_repository(out, repo)?;
    }
    Ok(())
}

fn render_repository<W: Write>(out: &mut W, repo: &Repository) -> io::Result<()> {
    writeln!(out)?;
    writeln!(out, "Name: {}", paint(repo.name.as_str().bold()))?;
    writeln!(
        out,
        "Description: {}",
        repo.description.as_deref().unwrap_or("No description")
    )?;
    writeln!(
        out,
        "Language: {}",
        repo.language.as_deref().unwrap_or("Not specified")
    )?;
    writeln!(out, "Stars: {}", repo.stars)?;
    writeln!(out, "Forks: {}", repo.forks)?;
    writeln!(out, "URL: {}", repo.url)
}

/// Renders the result of a persisted user lookup
pub fn render_user_search<W: Write>(
    out: &mut W,
    username: &str,
    found: Option<&UserProfile>,
) -> io::Result<()> {
    match found {
        Some(user) => render_profile(out, user),
        None => writeln!(out, "No cached user named '{}'", username),
    }
}

/// Renders persisted repository matches
pub fn render_repository_search<W: Write>(
    out: &mut W,
    query: &str,
    matches: &[RepositoryMatch],
) -> io::Result<()> {
    if matches.is_empty() {
        return writeln!(out, "No cached repositories matching '{}'", query);
    }
    heading(out, &format!("Cached repositories matching '{}':", query))?;
    for m in matches {
        writeln!(out, "{}/{} ({} stars)", m.owner, m.repository.name, m.repository.stars)?;
    }
    Ok(())
}

/// Renders every persisted profile and repository list
pub fn render_snapshot<W: Write>(out: &mut W, snapshot: &PersistedSnapshot) -> io::Result<()> {
    if snapshot.is_empty() {
        return writeln!(out, "The cache is empty");
    }

    heading(out, "Cached users:")?;
    for (key, user) in &snapshot.users {
        writeln!(
            out,
            "{} ({}) - {} followers, {} public repositories",
            key,
            user.name.as_deref().unwrap_or("Not specified"),
            user.followers,
            user.public_repos
        )?;
    }

    heading(out, "Cached repositories:")?;
    for (owner, repos) in &snapshot.repositories {
        writeln!(out, "{} ({} repositories)", paint(owner.as_str().bold()), repos.len())?;
        for repo in repos {
            writeln!(out, "  {} - {} stars, {} forks", repo.name, repo.stars, repo.forks)?;
        }
    }
    Ok(())
}
