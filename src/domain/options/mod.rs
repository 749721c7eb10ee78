use crate::error::AppResult;
use async_trait::async_trait;
use serde::{Deserialize, Serialize};

/// Category choice for filter menus and the story editor
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct CategoryOption {
    pub label: String,
    pub slug: String,
    pub value: i64,
}

/// Tag choice for filter menus and the story editor
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct TagOption {
    pub label: String,
    pub value: i64,
}

/// Repository trait for the option lists backing filters
#[async_trait]
pub trait OptionsRepository: Send + Sync {
    async fn get_categories(&self) -> AppResult<Vec<CategoryOption>>;
    async fn get_tags(&self) -> AppResult<Vec<TagOption>>;
}

pub mod service;
pub use service::OptionsService;
