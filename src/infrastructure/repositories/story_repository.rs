use crate::domain::search::QueryCriteria;
use crate::domain::shared::PaginatedResponse;
use crate::domain::story::{Story, StoryQuery, StoryRequest};
use crate::error::AppResult;
use async_trait::async_trait;

/// Repository for stories.
/// Abstracts where stories come from (the REST API in production, fakes in tests).
///
/// Implementations are responsible for:
/// - Building the listing query for a page of search criteria
/// - Mapping "not found" to `Ok(None)` for single-story lookups
/// - Invalidating cached listings after a successful write
#[async_trait]
pub trait StoryRepository: Send + Sync {
    /// One page of the public search listing.
    /// `fresh` skips any cached copy and asks the API again.
    async fn search(
        &self,
        criteria: &QueryCriteria,
        page: u32,
        fresh: bool,
    ) -> AppResult<PaginatedResponse<Story>>;

    /// One page of the dashboard listing
    async fn list(&self, query: &StoryQuery) -> AppResult<PaginatedResponse<Story>>;

    async fn find_by_id(&self, id: &str) -> AppResult<Option<Story>>;

    async fn find_by_slug(&self, slug: &str) -> AppResult<Option<Story>>;

    async fn create(&self, request: &StoryRequest) -> AppResult<()>;

    async fn update(&self, id: &str, request: &StoryRequest) -> AppResult<()>;

    async fn delete(&self, id: &str) -> AppResult<()>;
}
