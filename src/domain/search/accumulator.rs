use super::criteria::{CriteriaPatch, QueryCriteria};
use crate::domain::shared::{PageSummary, PaginatedResponse};
use crate::domain::story::Story;
use crate::error::{AppError, AppResult};
use std::sync::Arc;

/// A page fetch the accumulator wants performed.
///
/// The ticket carries the criteria and page it was issued for plus a
/// generation number. Only a response for the current generation is ever
/// applied. A `fresh` ticket must be answered by the API, never a cache.
#[derive(Debug, Clone, PartialEq)]
pub struct PageRequest {
    pub generation: u64,
    pub criteria: QueryCriteria,
    pub page: u32,
    pub fresh: bool,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Phase {
    /// Page 1 of the current criteria: results replace the set
    Resetting,
    /// Page > 1: results extend the set
    Extending,
}

/// What applying a completed fetch did to the state
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Applied {
    Replaced,
    Appended,
    Stale,
    Failed,
}

/// Client-side "infinite list" over the paginated story endpoint.
///
/// The accumulator never performs I/O. Operations that need a page return a
/// [`PageRequest`]; the caller fetches it and hands the outcome back to
/// [`SearchAccumulator::apply`].
#[derive(Debug)]
pub struct SearchAccumulator<T = Story> {
    criteria: QueryCriteria,
    page: u32,
    loaded_page: u32,
    records: Vec<T>,
    has_next: bool,
    total: u64,
    generation: u64,
    in_flight: Option<u64>,
    fresh: bool,
    failed: Option<PageRequest>,
    last_error: Option<Arc<AppError>>,
}

impl<T> Default for SearchAccumulator<T> {
    fn default() -> Self {
        Self::new(QueryCriteria::default())
    }
}

impl<T> SearchAccumulator<T> {
    pub fn new(criteria: QueryCriteria) -> Self {
        Self {
            criteria,
            page: 1,
            loaded_page: 0,
            records: Vec::new(),
            has_next: true,
            total: 0,
            generation: 0,
            in_flight: None,
            fresh: false,
            failed: None,
            last_error: None,
        }
    }

    /// Re-run the current criteria from page 1, straight from the API.
    ///
    /// Every page loaded until the next criteria change is also requested
    /// fresh, so a refreshed page 1 is never followed by a cached page 2.
    pub fn refresh(&mut self) -> PageRequest {
        self.restart(CriteriaPatch::default(), true)
    }

    /// Merge `patch` into the criteria and restart at page 1.
    ///
    /// Always issues a request, even while another is in flight: the older
    /// request becomes stale and its response will be discarded.
    pub fn set_criteria(&mut self, patch: CriteriaPatch) -> PageRequest {
        self.restart(patch, false)
    }

    fn restart(&mut self, patch: CriteriaPatch, fresh: bool) -> PageRequest {
        self.criteria.merge(patch);
        self.fresh = fresh;
        self.page = 1;
        self.loaded_page = 0;
        self.failed = None;
        self.last_error = None;
        self.issue()
    }

    /// Ask for the next page. `None` when there is nothing more to load,
    /// a request is already in flight, or page 1 has not loaded yet.
    pub fn load_more(&mut self) -> Option<PageRequest> {
        if !self.has_next || self.in_flight.is_some() || self.loaded_page == 0 {
            return None;
        }

        self.page = self.loaded_page + 1;
        Some(self.issue())
    }

    /// Re-issue the request that failed last, if any
    pub fn retry(&mut self) -> Option<PageRequest> {
        if self.in_flight.is_some() {
            return None;
        }

        let failed = self.failed.take()?;
        self.page = failed.page;
        Some(self.issue())
    }

    /// Fold a completed fetch into the state
    pub fn apply(
        &mut self,
        request: &PageRequest,
        outcome: AppResult<PaginatedResponse<T>>,
    ) -> Applied {
        if self.in_flight != Some(request.generation) {
            tracing::debug!(
                generation = request.generation,
                current_generation = self.generation,
                page = request.page,
                "Discarding stale page response"
            );
            return Applied::Stale;
        }

        self.in_flight = None;

        let response = match outcome {
            Ok(response) => response,
            Err(err) => {
                tracing::warn!(
                    error = %err,
                    page = request.page,
                    generation = request.generation,
                    "Page fetch failed"
                );
                self.page = self.loaded_page.max(1);
                self.failed = Some(request.clone());
                self.last_error = Some(Arc::new(err));
                return Applied::Failed;
            }
        };

        self.has_next = response.page_summary.has_next;
        self.total = response.page_summary.total;
        self.loaded_page = request.page;
        self.failed = None;
        self.last_error = None;

        let received = response.records.len();
        let applied = if request.page == 1 {
            self.records = response.records;
            Applied::Replaced
        } else {
            self.records.extend(response.records);
            Applied::Appended
        };

        tracing::debug!(
            page = request.page,
            received,
            accumulated = self.records.len(),
            has_next = self.has_next,
            "Page applied"
        );

        applied
    }

    fn issue(&mut self) -> PageRequest {
        self.generation += 1;
        self.in_flight = Some(self.generation);

        PageRequest {
            generation: self.generation,
            criteria: self.criteria.clone(),
            page: self.page,
            fresh: self.fresh,
        }
    }

    pub fn records(&self) -> &[T] {
        &self.records
    }

    pub fn criteria(&self) -> &QueryCriteria {
        &self.criteria
    }

    pub fn page(&self) -> u32 {
        self.page
    }

    pub fn has_next(&self) -> bool {
        self.has_next
    }

    pub fn total(&self) -> u64 {
        self.total
    }

    pub fn phase(&self) -> Phase {
        if self.page <= 1 {
            Phase::Resetting
        } else {
            Phase::Extending
        }
    }

    pub fn is_fetching(&self) -> bool {
        self.in_flight.is_some()
    }

    /// First page of a new query is in flight
    pub fn is_loading(&self) -> bool {
        self.is_fetching() && self.phase() == Phase::Resetting
    }

    /// A follow-up page is in flight
    pub fn is_loading_more(&self) -> bool {
        self.is_fetching() && self.phase() == Phase::Extending
    }

    pub fn last_error(&self) -> Option<&AppError> {
        self.last_error.as_deref()
    }

    pub fn page_summary(&self) -> PageSummary {
        PageSummary {
            has_next: self.has_next,
            page: self.page,
            size: self.criteria.size,
            total: self.total,
        }
    }
}
