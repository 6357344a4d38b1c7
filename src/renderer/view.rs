//! Display-ready shapes built from relay data. Nothing here knows about HTML;
//! the templates render these structs through serde.

use chrono::{DateTime, Utc};
use serde::Serialize;

use super::format::{relative_date, truncate};
use crate::models::Repository;
use crate::pulse::PulseReport;

pub const TITLE_LIMIT: usize = 60;
pub const LIST_PREVIEW: usize = 5;
pub const NO_DESCRIPTION: &str = "No description provided";

/// The repository currently chosen in the dashboard.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Selection {
    pub owner: String,
    pub repo: String,
}

impl Selection {
    pub fn new(owner: impl Into<String>, repo: impl Into<String>) -> Self {
        Self {
            owner: owner.into(),
            repo: repo.into(),
        }
    }
}

impl std::fmt::Display for Selection {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}/{}", self.owner, self.repo)
    }
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct RepositoryRow {
    pub owner: String,
    pub name: String,
    pub full_name: String,
    pub description: String,
    pub default_branch: String,
    pub stars: u64,
    pub forks: u64,
    pub updated: String,
    pub selected: bool,
}

impl RepositoryRow {
    pub fn new(repo: &Repository, now: DateTime<Utc>) -> Self {
        let description = repo
            .description
            .as_deref()
            .filter(|d| !d.is_empty())
            .unwrap_or(NO_DESCRIPTION);

        Self {
            owner: repo.owner.login.clone(),
            name: repo.name.clone(),
            full_name: repo.full_name.clone(),
            description: description.to_string(),
            default_branch: repo.default_branch.clone(),
            stars: repo.stargazers_count,
            forks: repo.forks_count,
            updated: relative_date(repo.updated_at, now),
            selected: false,
        }
    }

    pub fn selection(&self) -> Selection {
        Selection::new(&self.owner, &self.name)
    }
}

#[derive(Debug, Clone, PartialEq)]
pub enum ListState {
    Loading,
    Rows(Vec<RepositoryRow>),
    Empty,
    Failed,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct StatCard {
    pub kind: &'static str,
    pub value: usize,
    pub label: &'static str,
}

/// One line in a pulse list: truncated headline plus its byline.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ActivityEntry {
    pub headline: String,
    pub author: String,
    pub state: Option<String>,
    pub when: String,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ContributorEntry {
    pub login: String,
    pub avatar_url: String,
    pub contributions: u64,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct PulseView {
    pub stats: Vec<StatCard>,
    pub commits: Vec<ActivityEntry>,
    pub pull_requests: Vec<ActivityEntry>,
    pub issues: Vec<ActivityEntry>,
    pub contributors: Vec<ContributorEntry>,
}

impl PulseView {
    pub fn new(report: &PulseReport, now: DateTime<Utc>) -> Self {
        let stats = report.stats();

        let commits = report
            .commits
            .iter()
            .take(LIST_PREVIEW)
            .map(|c| ActivityEntry {
                headline: truncate(&c.commit.message, TITLE_LIMIT),
                author: c.commit.author.name.clone(),
                state: None,
                when: relative_date(c.commit.author.date, now),
            })
            .collect();

        let pull_requests = report
            .pull_requests
            .iter()
            .take(LIST_PREVIEW)
            .map(|pr| ActivityEntry {
                headline: truncate(&pr.title, TITLE_LIMIT),
                author: pr.user.login.clone(),
                state: Some(pr.state.clone()),
                when: relative_date(pr.created_at, now),
            })
            .collect();

        let issues = report
            .plain_issues()
            .take(LIST_PREVIEW)
            .map(|issue| ActivityEntry {
                headline: truncate(&issue.title, TITLE_LIMIT),
                author: issue.user.login.clone(),
                state: Some(issue.state.clone()),
                when: relative_date(issue.created_at, now),
            })
            .collect();

        let contributors = report
            .contributors
            .iter()
            .take(LIST_PREVIEW)
            .map(|c| ContributorEntry {
                login: c.login.clone(),
                avatar_url: c.avatar_url.clone(),
                contributions: c.contributions,
            })
            .collect();

        Self {
            stats: vec![
                StatCard {
                    kind: "commits",
                    value: stats.total_commits,
                    label: "Commits (30 days)",
                },
                StatCard {
                    kind: "pulls",
                    value: stats.open_pull_requests,
                    label: "Open Pull Requests",
                },
                StatCard {
                    kind: "issues",
                    value: stats.open_issues,
                    label: "Open Issues",
                },
                StatCard {
                    kind: "contributors",
                    value: stats.total_contributors,
                    label: "Contributors",
                },
            ],
            commits,
            pull_requests,
            issues,
            contributors,
        }
    }
}

#[derive(Debug, Clone, PartialEq)]
pub enum PulseState {
    Loading(Selection),
    Ready(Selection, PulseView),
    Failed(Selection),
}
