pub mod accumulator;
pub mod criteria;
pub mod feed;

pub use accumulator::{Applied, PageRequest, Phase, SearchAccumulator};
pub use criteria::{CriteriaPatch, QueryCriteria, SortKey};
pub use feed::{FeedUpdate, SearchFeed};

use crate::domain::shared::PaginatedResponse;
use crate::domain::story::Story;
use crate::error::AppResult;
use async_trait::async_trait;

/// A paginated story listing the search feed can pull pages from
#[async_trait]
pub trait PageSource: Send + Sync {
    /// Fetch the page a ticket asks for. Tickets marked `fresh` must not be
    /// answered from a cache.
    async fn fetch_page(&self, request: &PageRequest) -> AppResult<PaginatedResponse<Story>>;
}
