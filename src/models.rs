use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Account {
    pub login: String,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Repository {
    #[serde(default)]
    pub id: u64,
    pub name: String,
    #[serde(default)]
    pub full_name: String,
    pub owner: Account,
    pub description: Option<String>,
    #[serde(default)]
    pub private: bool,
    #[serde(default)]
    pub default_branch: String,
    #[serde(default)]
    pub stargazers_count: u64,
    #[serde(default)]
    pub forks_count: u64,
    pub updated_at: DateTime<Utc>,
    #[serde(default)]
    pub html_url: String,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Signature {
    pub name: String,
    pub date: DateTime<Utc>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CommitDetail {
    pub message: String,
    pub author: Signature,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Commit {
    pub sha: String,
    pub commit: CommitDetail,
    #[serde(default)]
    pub html_url: String,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PullRequest {
    pub number: u64,
    pub title: String,
    pub state: String, // open, closed
    pub user: Account,
    pub created_at: DateTime<Utc>,
    #[serde(default)]
    pub html_url: String,
}

/// Back-reference GitHub attaches to issue entries that are really pull requests.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PullRequestRef {
    #[serde(default)]
    pub url: String,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Issue {
    pub number: u64,
    pub title: String,
    pub state: String,
    pub user: Account,
    pub created_at: DateTime<Utc>,
    #[serde(default)]
    pub html_url: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub pull_request: Option<PullRequestRef>,
}

impl Issue {
    pub fn is_pull_request(&self) -> bool {
        self.pull_request.is_some()
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Contributor {
    pub login: String,
    #[serde(default)]
    pub avatar_url: String,
    pub contributions: u64,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_issue_with_pull_request_reference() {
        let issue: Issue = serde_json::from_value(serde_json::json!({
            "number": 7,
            "title": "Add pagination",
            "state": "open",
            "user": { "login": "octocat" },
            "created_at": "2026-10-01T12:00:00Z",
            "pull_request": { "url": "https://api.github.com/repos/o/r/pulls/7" }
        }))
        .unwrap();

        assert!(issue.is_pull_request());
    }

    #[test]
    fn test_null_pull_request_is_plain_issue() {
        let issue: Issue = serde_json::from_value(serde_json::json!({
            "number": 8,
            "title": "Crash on start",
            "state": "closed",
            "user": { "login": "octocat" },
            "created_at": "2026-10-01T12:00:00Z",
            "pull_request": null
        }))
        .unwrap();

        assert!(!issue.is_pull_request());
    }

    #[test]
    fn test_repository_without_description() {
        let repo: Repository = serde_json::from_value(serde_json::json!({
            "id": 1,
            "name": "pulse",
            "full_name": "octocat/pulse",
            "owner": { "login": "octocat" },
            "description": null,
            "private": true,
            "default_branch": "main",
            "stargazers_count": 3,
            "forks_count": 1,
            "updated_at": "2026-10-10T08:30:00Z"
        }))
        .unwrap();

        assert_eq!(repo.owner.login, "octocat");
        assert!(repo.description.is_none());
        assert_eq!(repo.html_url, "");
    }
}
