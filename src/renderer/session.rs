//! Per-page dashboards. Each page load opens a session holding its own
//! `Dashboard`; row clicks are routed back to it by session id.

use std::num::NonZeroUsize;
use std::sync::atomic::{AtomicU64, Ordering};

use chrono::{DateTime, Utc};
use lru::LruCache;
use tokio::sync::Mutex;

use super::dashboard::{Dashboard, PulseSource};
use super::view::{ListState, PulseState};

pub type SessionId = u64;

pub const DEFAULT_CAPACITY: NonZeroUsize = match NonZeroUsize::new(64) {
    Some(capacity) => capacity,
    None => unreachable!(),
};

#[derive(Debug, Clone, PartialEq)]
pub enum SelectOutcome {
    /// The pulse panel for the newest selection.
    Shown(PulseState),
    /// A later selection in the same session replaced this one.
    Superseded,
    UnknownSession,
    UnknownRow,
}

pub struct Sessions<S> {
    source: S,
    next_id: AtomicU64,
    dashboards: Mutex<LruCache<SessionId, Dashboard<S>>>,
}

impl<S: PulseSource + Clone> Sessions<S> {
    pub fn new(source: S, capacity: NonZeroUsize) -> Self {
        Self {
            source,
            next_id: AtomicU64::new(1),
            dashboards: Mutex::new(LruCache::new(capacity)),
        }
    }

    /// Load the repository list into a fresh dashboard and keep it. The
    /// least recently used dashboard is dropped once the cache is full.
    pub async fn open(&self, now: DateTime<Utc>) -> (SessionId, ListState) {
        let mut dashboard = Dashboard::new(self.source.clone());
        let list = dashboard.load_repositories(now).await.clone();

        let id = self.next_id.fetch_add(1, Ordering::Relaxed);
        if let Some((evicted, _)) = self.dashboards.lock().await.push(id, dashboard) {
            tracing::debug!("Dropped dashboard session {} to make room for {}", evicted, id);
        }
        (id, list)
    }

    /// Select row `index` in session `id` and wait for its pulse. The lock is
    /// not held while the pulse is fetched, so a click that lands meanwhile
    /// supersedes this one.
    pub async fn select(&self, id: SessionId, index: usize, now: DateTime<Utc>) -> SelectOutcome {
        let ticket = {
            let mut dashboards = self.dashboards.lock().await;
            let Some(dashboard) = dashboards.get_mut(&id) else {
                return SelectOutcome::UnknownSession;
            };
            match dashboard.select(index) {
                Some(ticket) => ticket,
                None => return SelectOutcome::UnknownRow,
            }
        };

        let result = ticket.fetch(&self.source).await;

        let mut dashboards = self.dashboards.lock().await;
        let Some(dashboard) = dashboards.get_mut(&id) else {
            return SelectOutcome::UnknownSession;
        };
        match dashboard.apply_pulse(ticket, result, now) {
            Some(state) => SelectOutcome::Shown(state.clone()),
            None => SelectOutcome::Superseded,
        }
    }
}

#[cfg(test)]
mod tests {
    use std::sync::Arc;
    use std::time::Duration;

    use super::*;
    use crate::pulse::fixtures::*;
    use crate::renderer::dashboard::fake::FakeSource;
    use crate::renderer::view::Selection;

    fn now() -> DateTime<Utc> {
        at("2026-10-18T09:00:00Z")
    }

    fn sessions(source: FakeSource) -> Sessions<Arc<FakeSource>> {
        Sessions::new(Arc::new(source), DEFAULT_CAPACITY)
    }

    #[tokio::test]
    async fn test_open_returns_rows_and_distinct_ids() {
        let sessions = sessions(FakeSource::with_repositories(&["a", "b"]));

        let (first, list) = sessions.open(now()).await;
        let (second, _) = sessions.open(now()).await;

        assert_ne!(first, second);
        assert!(matches!(list, ListState::Rows(ref rows) if rows.len() == 2));
    }

    #[tokio::test]
    async fn test_select_shows_pulse_for_row() {
        let sessions = sessions(FakeSource::with_repositories(&["a", "b"]));
        let (id, _) = sessions.open(now()).await;

        match sessions.select(id, 1, now()).await {
            SelectOutcome::Shown(PulseState::Ready(selection, view)) => {
                assert_eq!(selection, Selection::new("octocat", "b"));
                assert_eq!(view.commits[0].headline, "Work on b");
            }
            other => panic!("expected pulse for b, got {:?}", other),
        }
    }

    #[tokio::test]
    async fn test_slower_earlier_click_is_superseded() {
        let source = FakeSource {
            slow_pulse: Some("slow"),
            ..FakeSource::with_repositories(&["slow", "fast"])
        };
        let sessions = sessions(source);
        let (id, _) = sessions.open(now()).await;

        let (slow, fast) = tokio::join!(sessions.select(id, 0, now()), async {
            tokio::time::sleep(Duration::from_millis(20)).await;
            sessions.select(id, 1, now()).await
        });

        assert_eq!(slow, SelectOutcome::Superseded);
        assert!(matches!(
            fast,
            SelectOutcome::Shown(PulseState::Ready(ref s, _)) if s.repo == "fast"
        ));
    }

    #[tokio::test]
    async fn test_sessions_do_not_supersede_each_other() {
        let source = FakeSource {
            slow_pulse: Some("slow"),
            ..FakeSource::with_repositories(&["slow", "fast"])
        };
        let sessions = sessions(source);
        let (first, _) = sessions.open(now()).await;
        let (second, _) = sessions.open(now()).await;

        let (slow, _) = tokio::join!(sessions.select(first, 0, now()), async {
            tokio::time::sleep(Duration::from_millis(20)).await;
            sessions.select(second, 1, now()).await
        });

        assert!(matches!(slow, SelectOutcome::Shown(PulseState::Ready(..))));
    }

    #[tokio::test]
    async fn test_failed_pulse_is_shown_as_failure() {
        let source = FakeSource {
            failing_pulse: Some("broken"),
            ..FakeSource::with_repositories(&["broken"])
        };
        let sessions = sessions(source);
        let (id, _) = sessions.open(now()).await;

        assert_eq!(
            sessions.select(id, 0, now()).await,
            SelectOutcome::Shown(PulseState::Failed(Selection::new("octocat", "broken")))
        );
    }

    #[tokio::test]
    async fn test_unknown_row_and_session() {
        let sessions = sessions(FakeSource::with_repositories(&["a"]));
        let (id, _) = sessions.open(now()).await;

        assert_eq!(sessions.select(id, 3, now()).await, SelectOutcome::UnknownRow);
        assert_eq!(sessions.select(id + 100, 0, now()).await, SelectOutcome::UnknownSession);
    }

    #[tokio::test]
    async fn test_empty_session_has_no_rows() {
        let sessions = sessions(FakeSource::with_repositories(&[]));
        let (id, list) = sessions.open(now()).await;

        assert_eq!(list, ListState::Empty);
        assert_eq!(sessions.select(id, 0, now()).await, SelectOutcome::UnknownRow);
    }

    #[tokio::test]
    async fn test_oldest_session_is_evicted() {
        let source = Arc::new(FakeSource::with_repositories(&["a"]));
        let sessions = Sessions::new(source, NonZeroUsize::MIN);
        let (first, _) = sessions.open(now()).await;
        let (second, _) = sessions.open(now()).await;

        assert_eq!(sessions.select(first, 0, now()).await, SelectOutcome::UnknownSession);
        assert!(matches!(
            sessions.select(second, 0, now()).await,
            SelectOutcome::Shown(_)
        ));
    }
}
