use chrono::{DateTime, SecondsFormat, Utc};
use reqwest::{header, Client, Response, StatusCode};
use serde::de::DeserializeOwned;

use crate::error::{GithubError, GithubResult};
use crate::models::{Commit, Contributor, Issue, PullRequest, Repository};

const USER_AGENT: &str = "product-pulse";
const ACCEPT: &str = "application/vnd.github.v3+json";

pub const REPOSITORY_PAGE: usize = 10;
pub const COMMIT_PAGE: usize = 100;
pub const PULL_REQUEST_PAGE: usize = 20;
pub const ISSUE_PAGE: usize = 20;
pub const CONTRIBUTOR_PAGE: usize = 10;

/// Read-only client for the handful of GitHub REST endpoints the dashboard needs.
#[derive(Debug, Clone)]
pub struct GithubClient {
    http: Client,
    api_base: String,
    token: Option<String>,
}

impl GithubClient {
    pub fn new(api_base: &str, token: Option<String>) -> reqwest::Result<Self> {
        let http = Client::builder().user_agent(USER_AGENT).build()?;

        Ok(Self {
            http,
            api_base: api_base.trim_end_matches('/').to_string(),
            token,
        })
    }

    pub fn has_token(&self) -> bool {
        self.token.is_some()
    }

    /// Private repositories of the authenticated user, most recently updated first
    pub async fn private_repositories(&self) -> GithubResult<Vec<Repository>> {
        self.get_list(
            "/user/repos",
            &[
                ("visibility", "private".into()),
                ("sort", "updated".into()),
                ("per_page", REPOSITORY_PAGE.to_string()),
            ],
            REPOSITORY_PAGE,
        )
        .await
    }

    pub async fn repository(&self, owner: &str, repo: &str) -> GithubResult<Repository> {
        self.get_one(&format!("/repos/{}/{}", owner, repo), &[]).await
    }

    pub async fn commits_since(
        &self,
        owner: &str,
        repo: &str,
        since: DateTime<Utc>,
    ) -> GithubResult<Vec<Commit>> {
        self.get_list(
            &format!("/repos/{}/{}/commits", owner, repo),
            &[
                ("since", since.to_rfc3339_opts(SecondsFormat::Secs, true)),
                ("per_page", COMMIT_PAGE.to_string()),
            ],
            COMMIT_PAGE,
        )
        .await
    }

    pub async fn pull_requests(&self, owner: &str, repo: &str) -> GithubResult<Vec<PullRequest>> {
        self.get_list(
            &format!("/repos/{}/{}/pulls", owner, repo),
            &[("state", "all".into()), ("per_page", PULL_REQUEST_PAGE.to_string())],
            PULL_REQUEST_PAGE,
        )
        .await
    }

    pub async fn issues(&self, owner: &str, repo: &str) -> GithubResult<Vec<Issue>> {
        self.get_list(
            &format!("/repos/{}/{}/issues", owner, repo),
            &[("state", "all".into()), ("per_page", ISSUE_PAGE.to_string())],
            ISSUE_PAGE,
        )
        .await
    }

    pub async fn contributors(&self, owner: &str, repo: &str) -> GithubResult<Vec<Contributor>> {
        self.get_list(
            &format!("/repos/{}/{}/contributors", owner, repo),
            &[("per_page", CONTRIBUTOR_PAGE.to_string())],
            CONTRIBUTOR_PAGE,
        )
        .await
    }

    async fn get_one<T: DeserializeOwned>(
        &self,
        endpoint: &str,
        query: &[(&str, String)],
    ) -> GithubResult<T> {
        let response = self.send(endpoint, query).await?;
        decode(endpoint, response).await
    }

    /// Fetch a list endpoint and cap it to `limit` entries.
    async fn get_list<T: DeserializeOwned>(
        &self,
        endpoint: &str,
        query: &[(&str, String)],
        limit: usize,
    ) -> GithubResult<Vec<T>> {
        let response = self.send(endpoint, query).await?;

        // GitHub answers 204 for lists it cannot compute, e.g. contributors of an empty repository
        if response.status() == StatusCode::NO_CONTENT {
            return Ok(Vec::new());
        }

        let mut items: Vec<T> = decode(endpoint, response).await?;
        items.truncate(limit);
        Ok(items)
    }

    async fn send(&self, endpoint: &str, query: &[(&str, String)]) -> GithubResult<Response> {
        let url = format!("{}{}", self.api_base, endpoint);
        tracing::debug!("GET {}", url);

        let mut request = self
            .http
            .get(&url)
            .header(header::ACCEPT, ACCEPT)
            .query(query);

        if let Some(token) = &self.token {
            request = request.bearer_auth(token);
        }

        let response = request.send().await.map_err(|source| GithubError::Transport {
            endpoint: endpoint.to_string(),
            source,
        })?;

        let status = response.status();
        if !status.is_success() {
            let body = response.text().await.unwrap_or_default();
            return Err(GithubError::Status {
                endpoint: endpoint.to_string(),
                status,
                body,
            });
        }

        Ok(response)
    }
}

async fn decode<T: DeserializeOwned>(endpoint: &str, response: Response) -> GithubResult<T> {
    response.json::<T>().await.map_err(|source| GithubError::Decode {
        endpoint: endpoint.to_string(),
        source,
    })
}
