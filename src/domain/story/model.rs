use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::str::FromStr;

/// A published or draft story as returned by the API.
/// Read-only on the client: lifecycle is owned by the server.
/// Ids are opaque strings; the API does not promise any format.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct Story {
    pub id: String,
    #[serde(default)]
    pub author_id: Option<String>,
    pub title: String,
    pub slug: String,
    #[serde(default)]
    pub excerpt: String,
    #[serde(default)]
    pub content: String,
    #[serde(default)]
    pub thumbnail: String,
    #[serde(default)]
    pub thumbnail_public_id: Option<String>,
    #[serde(default)]
    pub category_id: Option<i64>,
    pub status: StoryStatus,
    #[serde(default)]
    pub published_at: Option<DateTime<Utc>>,
    #[serde(default)]
    pub created_at: Option<DateTime<Utc>>,
    #[serde(default)]
    pub updated_at: Option<DateTime<Utc>>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub category: Option<StoryCategory>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub author: Option<StoryAuthor>,
    #[serde(default)]
    pub tags: Vec<Tag>,
    #[serde(default)]
    pub total_views: u64,
    #[serde(default)]
    pub total_comments: u64,
    #[serde(default)]
    pub total_likes: u64,
    #[serde(default)]
    pub is_liked: bool,
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct StoryCategory {
    pub id: i64,
    pub name: String,
    pub slug: String,
    #[serde(default)]
    pub description: Option<String>,
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct StoryAuthor {
    pub id: String,
    pub name: String,
    #[serde(default)]
    pub email: Option<String>,
    #[serde(default)]
    pub picture: Option<String>,
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct Tag {
    pub id: i64,
    pub name: String,
    pub slug: String,
}

#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Hash)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum StoryStatus {
    Draft,
    Published,
    Archived,
}

impl StoryStatus {
    pub fn as_str(&self) -> &'static str {
        match self {
            StoryStatus::Draft => "DRAFT",
            StoryStatus::Published => "PUBLISHED",
            StoryStatus::Archived => "ARCHIVED",
        }
    }
}

impl std::fmt::Display for StoryStatus {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for StoryStatus {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_ascii_uppercase().as_str() {
            "DRAFT" => Ok(StoryStatus::Draft),
            "PUBLISHED" => Ok(StoryStatus::Published),
            "ARCHIVED" => Ok(StoryStatus::Archived),
            other => Err(format!("Unknown story status: {}", other)),
        }
    }
}

/// Body for POST /v1/stories and PATCH /v1/stories/{id}.
/// Edits are partial: unset fields are not sent.
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq)]
pub struct StoryRequest {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub author_id: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub title: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub excerpt: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub content: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub thumbnail: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub thumbnail_public_id: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub category_id: Option<i64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub status: Option<StoryStatus>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub published_at: Option<DateTime<Utc>>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub tags: Option<Vec<i64>>,
}

/// Parameters for the journalist dashboard listing (one explicit page, no accumulation)
#[derive(Debug, Clone, PartialEq)]
pub struct StoryQuery {
    pub page: u32,
    pub size: u32,
    pub sort: String,
    pub search: String,
    pub status: Option<StoryStatus>,
    pub user_id: Option<String>,
}

impl Default for StoryQuery {
    fn default() -> Self {
        Self {
            page: 1,
            size: 5,
            sort: "-created_at".to_string(),
            search: String::new(),
            status: None,
            user_id: None,
        }
    }
}

impl StoryQuery {
    /// Path and query string for GET /v1/stories.
    /// Every key is always present, empty when unset.
    pub fn to_path(&self) -> String {
        format!(
            "v1/stories?page={}&size={}&sort={}&search={}&user_id={}&status={}",
            self.page.max(1),
            self.size.max(1),
            urlencoding::encode(&self.sort),
            urlencoding::encode(&self.search),
            urlencoding::encode(self.user_id.as_deref().unwrap_or_default()),
            self.status.map(|s| s.as_str()).unwrap_or_default(),
        )
    }
}
