use super::story_repository::StoryRepository;
use crate::domain::search::QueryCriteria;
use crate::domain::shared::PaginatedResponse;
use crate::domain::story::{Story, StoryQuery, StoryRequest};
use crate::error::{AppError, AppResult};
use crate::infrastructure::http::ApiContext;
use async_trait::async_trait;
use std::sync::Arc;

const STORIES_PATH: &str = "v1/stories";
const PUBLIC_STORIES_PATH: &str = "v1/public/stories";

fn story_path(id: &str) -> String {
    format!("{}/{}", STORIES_PATH, urlencoding::encode(id))
}

/// Story repository backed by the Haluland REST API
pub struct HttpStoryRepository {
    api: Arc<ApiContext>,
}

impl HttpStoryRepository {
    pub fn new(api: Arc<ApiContext>) -> Self {
        Self { api }
    }

    async fn fetch_page(&self, path: &str, fresh: bool) -> AppResult<PaginatedResponse<Story>> {
        let page = if fresh {
            self.api.get_fresh::<PaginatedResponse<Story>>(path).await?
        } else {
            self.api.get::<PaginatedResponse<Story>>(path).await?
        };

        page.ok_or_else(|| AppError::Internal(format!("Listing {} returned no data", path)))
    }

    async fn find(&self, path: &str) -> AppResult<Option<Story>> {
        match self.api.get::<Story>(path).await {
            Ok(story) => Ok(story),
            Err(AppError::NotFound(_)) => Ok(None),
            Err(e) => Err(e),
        }
    }

    /// Listings and public pages may both show the changed story
    async fn invalidate_story_caches(&self) {
        self.api.invalidate_prefix(STORIES_PATH).await;
        self.api.invalidate_prefix(PUBLIC_STORIES_PATH).await;
    }
}

#[async_trait]
impl StoryRepository for HttpStoryRepository {
    async fn search(
        &self,
        criteria: &QueryCriteria,
        page: u32,
        fresh: bool,
    ) -> AppResult<PaginatedResponse<Story>> {
        self.fetch_page(&criteria.to_path(page), fresh).await
    }

    async fn list(&self, query: &StoryQuery) -> AppResult<PaginatedResponse<Story>> {
        self.fetch_page(&query.to_path(), false).await
    }

    async fn find_by_id(&self, id: &str) -> AppResult<Option<Story>> {
        self.find(&story_path(id)).await
    }

    async fn find_by_slug(&self, slug: &str) -> AppResult<Option<Story>> {
        self.find(&format!(
            "{}/{}",
            PUBLIC_STORIES_PATH,
            urlencoding::encode(slug)
        ))
        .await
    }

    async fn create(&self, request: &StoryRequest) -> AppResult<()> {
        self.api.post(STORIES_PATH, request).await?;
        self.invalidate_story_caches().await;
        Ok(())
    }

    async fn update(&self, id: &str, request: &StoryRequest) -> AppResult<()> {
        self.api.patch(&story_path(id), request).await?;
        self.invalidate_story_caches().await;
        Ok(())
    }

    async fn delete(&self, id: &str) -> AppResult<()> {
        self.api.delete(&story_path(id)).await?;
        self.invalidate_story_caches().await;
        Ok(())
    }
}
