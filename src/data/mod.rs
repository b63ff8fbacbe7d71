//! Core data models for ghpeek
//!
//! Profiles and repositories as returned by the GitHub REST API. The same
//! serde field names are used on the wire and in the on-disk cache, so a
//! cached record is byte-compatible with an API response.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// A GitHub user's public profile
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct UserProfile {
    /// Login name, as returned by the API (original casing)
    #[serde(rename = "login")]
    pub username: String,
    /// Display name, if the user set one
    #[serde(default)]
    pub name: Option<String>,
    /// Biography, if the user set one
    #[serde(default)]
    pub bio: Option<String>,
    /// Number of followers
    pub followers: u32,
    /// Number of accounts this user follows
    pub following: u32,
    /// When the account was created
    pub created_at: DateTime<Utc>,
    /// Number of public repositories
    pub public_repos: u32,
    /// Avatar image URL
    #[serde(default)]
    pub avatar_url: Option<String>,
}

/// A single repository owned by a user
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Repository {
    /// Repository name (without owner prefix)
    pub name: String,
    /// Short description, if any
    #[serde(default)]
    pub description: Option<String>,
    /// Star count
    #[serde(rename = "stargazers_count")]
    pub stars: u32,
    /// Fork count
    #[serde(rename = "forks_count")]
    pub forks: u32,
    /// Primary language detected by GitHub
    #[serde(default)]
    pub language: Option<String>,
    /// Browser URL of the repository
    #[serde(rename = "html_url")]
    pub url: String,
}

/// Canonical cache key for a username.
///
/// Every tier (memory, disk, remote request) must use this form or lookups
/// silently miss.
pub fn cache_key(username: &str) -> String {
    username.trim().to_lowercase()
}

/// Returns up to `limit` repositories ordered by star count, highest first.
///
/// Ties keep their original (remote response) order.
pub fn top_by_stars(repos: &[Repository], limit: usize) -> Vec<&Repository> {
    let mut sorted: Vec<&Repository> = repos.iter().collect();
    sorted.sort_by(|a, b| b.stars.cmp(&a.stars));
    sorted.truncate(limit);
    sorted
}


#[cfg(test)]
mod tests {
    use super::fixtures::{profile, repo};
    use super::*;

    #[test]
    fn test_cache_key_lowercases_and_trims() {
        assert_eq!(cache_key("Octocat"), "octocat");
        assert_eq!(cache_key("  OCTO "), "octo");
        assert_eq!(cache_key("octo"), "octo");
    }

    #[test]
    fn test_user_profile_deserializes_api_field_names() {
        let json = r#"{
            "login": "octocat",
            "id": 583231,
            "name": "The Octocat",
            "bio": null,
            "followers": 20000,
            "following": 9,
            "created_at": "2011-01-25T18:44:36Z",
            "public_repos": 8,
            "avatar_url": "https://avatars.githubusercontent.com/u/583231?v=4"
        }"#;

        let user: UserProfile = serde_json::from_str(json).expect("Should parse profile");

        assert_eq!(user.username, "octocat");
        assert_eq!(user.name.as_deref(), Some("The Octocat"));
        assert!(user.bio.is_none());
        assert_eq!(user.followers, 20000);
        assert_eq!(user.following, 9);
        assert_eq!(user.public_repos, 8);
        assert_eq!(user.created_at.to_rfc3339(), "2011-01-25T18:44:36+00:00");
    }

    #[test]
    fn test_user_profile_missing_optional_fields() {
        let json = r#"{
            "login": "ghost",
            "followers": 0,
            "following": 0,
            "created_at": "2008-05-13T06:14:25Z",
            "public_repos": 0
        }"#;

        let user: UserProfile = serde_json::from_str(json).expect("Should parse profile");

        assert!(user.name.is_none());
        assert!(user.bio.is_none());
        assert!(user.avatar_url.is_none());
    }

    #[test]
    fn test_repository_deserializes_api_field_names() {
        let json = r#"{
            "name": "Hello-World",
            "full_name": "octocat/Hello-World",
            "description": "My first repository on GitHub!",
            "stargazers_count": 2500,
            "forks_count": 2300,
            "language": null,
            "html_url": "https://github.com/octocat/Hello-World"
        }"#;

        let repo: Repository = serde_json::from_str(json).expect("Should parse repository");

        assert_eq!(repo.name, "Hello-World");
        assert_eq!(repo.stars, 2500);
        assert_eq!(repo.forks, 2300);
        assert!(repo.language.is_none());
        assert_eq!(repo.url, "https://github.com/octocat/Hello-World");
    }

    #[test]
    fn test_serialized_profile_uses_api_names() {
        let json = serde_json::to_string(&profile("octo")).expect("Should serialize");

        assert!(json.contains("\"login\":\"octo\""));
        assert!(json.contains("\"public_repos\":3"));
    }

    #[test]
    fn test_top_by_stars_orders_and_truncates() {
        let repos = vec![
            repo("a", 1),
            repo("b", 50),
            repo("c", 7),
            repo("d", 50),
            repo("e", 0),
            repo("f", 3),
        ];

        let top: Vec<&str> = top_by_stars(&repos, 5)
            .into_iter()
            .map(|r| r.name.as_str())
            .collect();

        assert_eq!(top, vec!["b", "d", "c", "f", "a"]);
    }

    #[test]
    fn test_top_by_stars_with_fewer_repos_than_limit() {
        let repos = vec![repo("only", 1)];
        assert_eq!(top_by_stars(&repos, 5).len(), 1);
        assert!(top_by_stars(&[], 5).is_empty());
    }
}
