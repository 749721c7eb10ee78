use super::accumulator::{Applied, PageRequest, SearchAccumulator};
use super::criteria::{CriteriaPatch, QueryCriteria};
use super::PageSource;
use crate::domain::shared::PaginatedResponse;
use crate::domain::story::Story;
use crate::error::{AppError, AppResult};
use std::collections::HashMap;
use std::sync::Arc;
use tokio::task::{Id, JoinError, JoinSet};

type Outcome = AppResult<PaginatedResponse<Story>>;

/// Result of processing one completed fetch
#[derive(Debug, Clone, PartialEq)]
pub struct FeedUpdate {
    pub request: PageRequest,
    pub applied: Applied,
}

/// Drives a [`SearchAccumulator`] against a [`PageSource`].
///
/// Each page request runs on its own task; completions come back through
/// [`SearchFeed::next_event`] in whatever order the network delivers them,
/// and the accumulator's generation fence decides which ones count.
/// A task that panics counts as a failed fetch.
/// Dropping the feed aborts any fetch still running.
pub struct SearchFeed {
    source: Arc<dyn PageSource>,
    state: SearchAccumulator<Story>,
    tasks: JoinSet<Outcome>,
    requests: HashMap<Id, PageRequest>,
}

impl SearchFeed {
    pub fn new(source: Arc<dyn PageSource>, criteria: QueryCriteria) -> Self {
        Self {
            source,
            state: SearchAccumulator::new(criteria),
            tasks: JoinSet::new(),
            requests: HashMap::new(),
        }
    }

    pub fn state(&self) -> &SearchAccumulator<Story> {
        &self.state
    }

    pub fn records(&self) -> &[Story] {
        self.state.records()
    }

    /// Fetch page 1 of the current criteria, bypassing any cached pages
    pub fn refresh(&mut self) {
        let request = self.state.refresh();
        self.dispatch(request);
    }

    pub fn set_criteria(&mut self, patch: CriteriaPatch) {
        let request = self.state.set_criteria(patch);
        self.dispatch(request);
    }

    /// Returns false when the accumulator declined to load another page
    pub fn load_more(&mut self) -> bool {
        match self.state.load_more() {
            Some(request) => {
                self.dispatch(request);
                true
            }
            None => false,
        }
    }

    pub fn retry(&mut self) -> bool {
        match self.state.retry() {
            Some(request) => {
                self.dispatch(request);
                true
            }
            None => false,
        }
    }

    /// Number of fetch tasks not yet collected, stale ones included
    pub fn pending(&self) -> usize {
        self.tasks.len()
    }

    /// Wait for the next fetch to finish and fold it into the state.
    /// Returns `None` once no fetches are outstanding.
    pub async fn next_event(&mut self) -> Option<FeedUpdate> {
        loop {
            let joined = self.tasks.join_next_with_id().await?;
            if let Some(update) = self.absorb(joined) {
                return Some(update);
            }
        }
    }

    /// Process completions until the current request has been applied.
    /// Stale fetches still outstanding are left for later calls.
    pub async fn settle(&mut self) -> Option<Applied> {
        let mut last = None;
        while self.state.is_fetching() {
            match self.next_event().await {
                Some(update) => {
                    if update.applied != Applied::Stale {
                        last = Some(update.applied);
                    }
                }
                None => break,
            }
        }
        last
    }

    fn absorb(&mut self, joined: Result<(Id, Outcome), JoinError>) -> Option<FeedUpdate> {
        let (id, outcome) = match joined {
            Ok((id, outcome)) => (id, outcome),
            Err(err) => {
                tracing::error!(error = %err, "Page fetch task did not complete");
                let outcome = Err(AppError::Internal(format!("Page fetch task failed: {}", err)));
                (err.id(), outcome)
            }
        };

        let request = self.requests.remove(&id)?;
        let applied = self.state.apply(&request, outcome);
        Some(FeedUpdate { request, applied })
    }

    fn dispatch(&mut self, request: PageRequest) {
        // Everything already finished is stale now; drop the pages it holds
        while let Some(joined) = self.tasks.try_join_next_with_id() {
            self.absorb(joined);
        }

        tracing::debug!(
            generation = request.generation,
            page = request.page,
            fresh = request.fresh,
            search = %request.criteria.search,
            "Dispatching page fetch"
        );

        let source = self.source.clone();
        let ticket = request.clone();
        let handle = self
            .tasks
            .spawn(async move { source.fetch_page(&ticket).await });
        self.requests.insert(handle.id(), request);
    }
}
