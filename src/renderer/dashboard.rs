use std::sync::Arc;

use anyhow::Result;
use async_trait::async_trait;
use chrono::{DateTime, Utc};

use super::view::{ListState, PulseState, PulseView, RepositoryRow, Selection};
use crate::models::Repository;
use crate::pulse::PulseReport;
use crate::relay::Relay;

/// Where the dashboard gets its data from.
#[async_trait]
pub trait PulseSource: Send + Sync {
    async fn repositories(&self) -> Result<Vec<Repository>>;
    async fn pulse(&self, owner: &str, repo: &str) -> Result<PulseReport>;
}

#[async_trait]
impl PulseSource for Relay {
    async fn repositories(&self) -> Result<Vec<Repository>> {
        Ok(self.list_repositories().await?)
    }

    async fn pulse(&self, owner: &str, repo: &str) -> Result<PulseReport> {
        Ok(Relay::pulse(self, owner, repo).await?)
    }
}

#[async_trait]
impl<T: PulseSource + ?Sized> PulseSource for Arc<T> {
    async fn repositories(&self) -> Result<Vec<Repository>> {
        (**self).repositories().await
    }

    async fn pulse(&self, owner: &str, repo: &str) -> Result<PulseReport> {
        (**self).pulse(owner, repo).await
    }
}

/// Handle for one pulse request. Only the newest ticket's response is shown.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PulseTicket {
    pub generation: u64,
    pub selection: Selection,
}

impl PulseTicket {
    pub async fn fetch<S: PulseSource>(&self, source: &S) -> Result<PulseReport> {
        source
            .pulse(&self.selection.owner, &self.selection.repo)
            .await
    }
}

/// Dashboard controller: repository list, current selection and pulse panel.
pub struct Dashboard<S> {
    source: S,
    list: ListState,
    selection: Option<Selection>,
    pulse: Option<PulseState>,
    generation: u64,
}

impl<S: PulseSource> Dashboard<S> {
    pub fn new(source: S) -> Self {
        Self {
            source,
            list: ListState::Loading,
            selection: None,
            pulse: None,
            generation: 0,
        }
    }

    pub async fn load_repositories(&mut self, now: DateTime<Utc>) -> &ListState {
        self.list = match self.source.repositories().await {
            Ok(repos) if repos.is_empty() => ListState::Empty,
            Ok(repos) => ListState::Rows(
                repos
                    .iter()
                    .map(|repo| RepositoryRow::new(repo, now))
                    .collect(),
            ),
            Err(e) => {
                tracing::error!("Error loading repositories: {:#}", e);
                ListState::Failed
            }
        };
        &self.list
    }

    /// Mark row `index` as the only selected row and start its pulse,
    /// superseding any pulse still in flight.
    pub fn select(&mut self, index: usize) -> Option<PulseTicket> {
        let ListState::Rows(rows) = &mut self.list else {
            return None;
        };
        if index >= rows.len() {
            return None;
        }

        for row in rows.iter_mut() {
            row.selected = false;
        }
        rows[index].selected = true;
        let selection = rows[index].selection();

        self.generation += 1;
        self.selection = Some(selection.clone());
        self.pulse = Some(PulseState::Loading(selection.clone()));

        Some(PulseTicket {
            generation: self.generation,
            selection,
        })
    }

    /// Show a pulse response unless a newer selection has been made since.
    /// Returns the state now on display, or `None` for a stale response.
    pub fn apply_pulse(
        &mut self,
        ticket: PulseTicket,
        result: Result<PulseReport>,
        now: DateTime<Utc>,
    ) -> Option<&PulseState> {
        if ticket.generation != self.generation {
            tracing::debug!(
                "Discarding stale pulse for {} (generation {} < {}), {:?} is selected",
                ticket.selection,
                ticket.generation,
                self.generation,
                self.selection.as_ref().map(ToString::to_string)
            );
            return None;
        }

        let state = match result {
            Ok(report) => PulseState::Ready(ticket.selection, PulseView::new(&report, now)),
            Err(e) => {
                tracing::error!("Error loading pulse data for {}: {:#}", ticket.selection, e);
                PulseState::Failed(ticket.selection)
            }
        };
        Some(&*self.pulse.insert(state))
    }
}

#[cfg(test)]
pub(crate) mod fake {
    use std::sync::Mutex;
    use std::time::Duration;

    use super::*;
    use crate::pulse::fixtures::*;

    #[derive(Default)]
    pub struct FakeSource {
        pub repositories: Vec<Repository>,
        pub fail_listing: bool,
        pub failing_pulse: Option<&'static str>,
        pub slow_pulse: Option<&'static str>,
        pub pulse_calls: Mutex<Vec<(String, String)>>,
    }

    impl FakeSource {
        pub fn with_repositories(names: &[&str]) -> Self {
            Self {
                repositories: names.iter().map(|n| repository("octocat", n)).collect(),
                ..Default::default()
            }
        }
    }

    #[async_trait]
    impl PulseSource for FakeSource {
        async fn repositories(&self) -> Result<Vec<Repository>> {
            if self.fail_listing {
                anyhow::bail!("Failed to fetch repositories");
            }
            Ok(self.repositories.clone())
        }

        async fn pulse(&self, owner: &str, repo: &str) -> Result<PulseReport> {
            self.pulse_calls
                .lock()
                .unwrap()
                .push((owner.to_string(), repo.to_string()));
            if self.slow_pulse == Some(repo) {
                tokio::time::sleep(Duration::from_millis(300)).await;
            }
            if self.failing_pulse == Some(repo) {
                anyhow::bail!("Failed to fetch repository pulse data");
            }
            Ok(PulseReport::assemble(
                repository(owner, repo),
                vec![commit(&format!("Work on {}", repo), "Mona", "2026-10-17T09:00:00Z")],
                vec![],
                vec![],
                vec![],
            ))
        }
    }
}
