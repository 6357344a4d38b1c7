use anyhow::Result;
use chrono::{Duration, Utc};

use crate::config::Config;
use crate::error::{GithubError, RelayError};
use crate::github::GithubClient;
use crate::models::Repository;
use crate::pulse::PulseReport;

/// Trailing window for the commit list.
const COMMIT_WINDOW_DAYS: i64 = 30;

/// Relays dashboard requests to GitHub with the server-held credential.
#[derive(Debug, Clone)]
pub struct Relay {
    github: GithubClient,
}

impl Relay {
    pub fn new(config: &Config) -> Result<Self> {
        let github = GithubClient::new(&config.api_base, config.github_token.clone())?;
        Ok(Self { github })
    }

    pub async fn list_repositories(&self) -> Result<Vec<Repository>, RelayError> {
        if !self.github.has_token() {
            tracing::warn!("Repository listing requested without GITHUB_TOKEN");
            return Err(RelayError::TokenMissing);
        }

        self.github.private_repositories().await.map_err(|e| {
            tracing::error!("Failed to fetch repositories: {}", e);
            RelayError::Repositories(e)
        })
    }

    pub async fn pulse(&self, owner: &str, repo: &str) -> Result<PulseReport, RelayError> {
        if !self.github.has_token() {
            tracing::error!("Pulse for {}/{} requested without GITHUB_TOKEN", owner, repo);
            return Err(RelayError::PulseUnconfigured);
        }

        tracing::info!("Fetching pulse for {}/{}", owner, repo);

        let report = self.fetch_pulse(owner, repo).await.map_err(|e| {
            tracing::error!("Failed to fetch pulse data for {}/{}: {}", owner, repo, e);
            RelayError::Pulse(e)
        })?;

        tracing::info!(
            "Pulse for {}/{}: {} commits, {} pull requests, {} issues, {} contributors",
            owner,
            repo,
            report.stats().total_commits,
            report.pull_requests.len(),
            report.issues.len(),
            report.stats().total_contributors
        );

        Ok(report)
    }

    async fn fetch_pulse(&self, owner: &str, repo: &str) -> Result<PulseReport, GithubError> {
        let since = Utc::now() - Duration::days(COMMIT_WINDOW_DAYS);

        // Independent calls; the first failure cancels the rest
        let (repository, commits, pull_requests, issues, contributors) = tokio::try_join!(
            self.github.repository(owner, repo),
            self.github.commits_since(owner, repo, since),
            self.github.pull_requests(owner, repo),
            self.github.issues(owner, repo),
            self.github.contributors(owner, repo),
        )?;

        Ok(PulseReport::assemble(
            repository,
            commits,
            pull_requests,
            issues,
            contributors,
        ))
    }
}
