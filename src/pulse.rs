use serde::{Deserialize, Serialize};

use crate::models::{Commit, Contributor, Issue, PullRequest, Repository};

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PulseStats {
    pub total_commits: usize,
    pub open_pull_requests: usize,
    pub closed_pull_requests: usize,
    pub open_issues: usize,
    pub closed_issues: usize,
    pub total_contributors: usize,
}

impl PulseStats {
    pub fn compute(
        commits: &[Commit],
        pull_requests: &[PullRequest],
        issues: &[Issue],
        contributors: &[Contributor],
    ) -> Self {
        let prs_in = |state: &str| pull_requests.iter().filter(|pr| pr.state == state).count();
        // Entries backed by a pull request are already counted above
        let issues_in = |state: &str| {
            issues
                .iter()
                .filter(|issue| issue.state == state && !issue.is_pull_request())
                .count()
        };

        Self {
            total_commits: commits.len(),
            open_pull_requests: prs_in("open"),
            closed_pull_requests: prs_in("closed"),
            open_issues: issues_in("open"),
            closed_issues: issues_in("closed"),
            total_contributors: contributors.len(),
        }
    }
}

/// Everything the dashboard shows for one repository.
///
/// `stats` is derived from the four sequences when the report is assembled
/// and again when it is decoded, so the counts always agree with the lists.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", from = "PulseReportWire")]
pub struct PulseReport {
    pub repository: Repository,
    pub commits: Vec<Commit>,
    pub pull_requests: Vec<PullRequest>,
    pub issues: Vec<Issue>,
    pub contributors: Vec<Contributor>,
    stats: PulseStats,
}

impl PulseReport {
    pub fn assemble(
        repository: Repository,
        commits: Vec<Commit>,
        pull_requests: Vec<PullRequest>,
        issues: Vec<Issue>,
        contributors: Vec<Contributor>,
    ) -> Self {
        let stats = PulseStats::compute(&commits, &pull_requests, &issues, &contributors);
        Self {
            repository,
            commits,
            pull_requests,
            issues,
            contributors,
            stats,
        }
    }

    pub fn stats(&self) -> &PulseStats {
        &self.stats
    }

    /// Issue entries that are not pull requests, in upstream order.
    pub fn plain_issues(&self) -> impl Iterator<Item = &Issue> {
        self.issues.iter().filter(|issue| !issue.is_pull_request())
    }
}

#[derive(Deserialize)]
#[serde(rename_all = "camelCase")]
struct PulseReportWire {
    repository: Repository,
    commits: Vec<Commit>,
    pull_requests: Vec<PullRequest>,
    issues: Vec<Issue>,
    contributors: Vec<Contributor>,
}

impl From<PulseReportWire> for PulseReport {
    fn from(wire: PulseReportWire) -> Self {
        PulseReport::assemble(
            wire.repository,
            wire.commits,
            wire.pull_requests,
            wire.issues,
            wire.contributors,
        )
    }
}
