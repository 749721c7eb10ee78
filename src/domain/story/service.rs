use super::error::StoryServiceError;
use crate::domain::search::{PageRequest, PageSource};
use crate::domain::shared::PaginatedResponse;
use crate::domain::story::{Story, StoryQuery, StoryRequest};
use crate::error::AppResult;
use crate::infrastructure::repositories::StoryRepository;
use async_trait::async_trait;
use std::sync::Arc;

pub struct StoryService {
    story_repo: Arc<dyn StoryRepository>,
}

impl StoryService {
    pub fn new(story_repo: Arc<dyn StoryRepository>) -> Self {
        Self { story_repo }
    }
}

#[async_trait]
pub trait StoryServiceApi: Send + Sync {
    /// One page of the dashboard listing
    async fn list_stories(
        &self,
        query: &StoryQuery,
    ) -> Result<PaginatedResponse<Story>, StoryServiceError>;

    async fn get_story(&self, id: &str) -> Result<Story, StoryServiceError>;

    /// Public story page, looked up by slug
    async fn get_story_by_slug(&self, slug: &str) -> Result<Story, StoryServiceError>;

    async fn create_story(&self, request: StoryRequest) -> Result<(), StoryServiceError>;

    async fn update_story(&self, id: &str, request: StoryRequest)
        -> Result<(), StoryServiceError>;

    async fn delete_story(&self, id: &str) -> Result<(), StoryServiceError>;
}

#[async_trait]
impl StoryServiceApi for StoryService {
    async fn list_stories(
        &self,
        query: &StoryQuery,
    ) -> Result<PaginatedResponse<Story>, StoryServiceError> {
        Ok(self.story_repo.list(query).await?)
    }

    async fn get_story(&self, id: &str) -> Result<Story, StoryServiceError> {
        self.story_repo
            .find_by_id(id)
            .await?
            .ok_or(StoryServiceError::NotFound)
    }

    async fn get_story_by_slug(&self, slug: &str) -> Result<Story, StoryServiceError> {
        let slug = slug.trim();
        if slug.is_empty() {
            return Err(StoryServiceError::Invalid("Slug cannot be empty".to_string()));
        }

        self.story_repo
            .find_by_slug(slug)
            .await?
            .ok_or(StoryServiceError::NotFound)
    }

    async fn create_story(&self, request: StoryRequest) -> Result<(), StoryServiceError> {
        match request.title.as_deref().map(str::trim) {
            Some(title) if !title.is_empty() => {}
            _ => {
                return Err(StoryServiceError::Invalid("Title is required".to_string()));
            }
        }

        self.story_repo.create(&request).await?;

        tracing::info!(title = ?request.title, status = ?request.status, "Story created");
        Ok(())
    }

    async fn update_story(
        &self,
        id: &str,
        request: StoryRequest,
    ) -> Result<(), StoryServiceError> {
        if request == StoryRequest::default() {
            return Err(StoryServiceError::Invalid("Nothing to update".to_string()));
        }
        if matches!(request.title.as_deref().map(str::trim), Some("")) {
            return Err(StoryServiceError::Invalid("Title cannot be empty".to_string()));
        }

        self.story_repo.update(id, &request).await?;

        tracing::info!(story_id = %id, "Story updated");
        Ok(())
    }

    async fn delete_story(&self, id: &str) -> Result<(), StoryServiceError> {
        self.story_repo.delete(id).await?;

        tracing::info!(story_id = %id, "Story deleted");
        Ok(())
    }
}

#[async_trait]
impl PageSource for StoryService {
    async fn fetch_page(&self, request: &PageRequest) -> AppResult<PaginatedResponse<Story>> {
        self.story_repo
            .search(&request.criteria, request.page, request.fresh)
            .await
    }
}
