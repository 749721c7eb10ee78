use super::{CategoryOption, OptionsRepository, TagOption};
use crate::error::{AppError, AppResult};
use std::sync::Arc;

pub struct OptionsService {
    repository: Arc<dyn OptionsRepository>,
}

impl OptionsService {
    pub fn new(repository: Arc<dyn OptionsRepository>) -> Self {
        Self { repository }
    }

    pub async fn get_categories(&self) -> AppResult<Vec<CategoryOption>> {
        self.repository.get_categories().await
    }

    pub async fn get_tags(&self) -> AppResult<Vec<TagOption>> {
        self.repository.get_tags().await
    }

    /// Look up a category by its slug
    pub async fn find_category(&self, slug: &str) -> AppResult<Option<CategoryOption>> {
        let categories = self.repository.get_categories().await?;
        Ok(categories.into_iter().find(|c| c.slug == slug))
    }

    /// Translate tag labels (case-insensitive) into tag ids.
    /// Fails on the first label that matches no tag.
    pub async fn resolve_tag_ids(&self, labels: &[String]) -> AppResult<Vec<i64>> {
        if labels.is_empty() {
            return Ok(Vec::new());
        }

        let tags = self.repository.get_tags().await?;

        labels
            .iter()
            .map(|label| {
                tags.iter()
                    .find(|tag| tag.label.eq_ignore_ascii_case(label.trim()))
                    .map(|tag| tag.value)
                    .ok_or_else(|| AppError::BadRequest(format!("Unknown tag: {}", label)))
            })
            .collect()
    }
}
