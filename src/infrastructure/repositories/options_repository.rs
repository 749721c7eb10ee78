use crate::domain::options::{CategoryOption, OptionsRepository, TagOption};
use crate::error::AppResult;
use crate::infrastructure::http::ApiContext;
use async_trait::async_trait;
use std::sync::Arc;

/// Category and tag options served by the REST API.
/// An empty `data` is treated as an empty list.
pub struct HttpOptionsRepository {
    api: Arc<ApiContext>,
}

impl HttpOptionsRepository {
    pub fn new(api: Arc<ApiContext>) -> Self {
        Self { api }
    }
}

#[async_trait]
impl OptionsRepository for HttpOptionsRepository {
    async fn get_categories(&self) -> AppResult<Vec<CategoryOption>> {
        Ok(self
            .api
            .get::<Vec<CategoryOption>>("v1/options/categories")
            .await?
            .unwrap_or_default())
    }

    async fn get_tags(&self) -> AppResult<Vec<TagOption>> {
        Ok(self
            .api
            .get::<Vec<TagOption>>("v1/options/tags")
            .await?
            .unwrap_or_default())
    }
}
