use std::str::FromStr;

const DEFAULT_PAGE_SIZE: u32 = 5;

/// Ordering requested from the listing endpoint
#[derive(Debug, Clone, PartialEq, Eq, Hash, Default)]
pub enum SortKey {
    #[default]
    LatestPublished,
    Popular,
    LatestCreated,
    Custom(String),
}

impl SortKey {
    pub fn as_str(&self) -> &str {
        match self {
            SortKey::LatestPublished => "-published_at",
            SortKey::Popular => "-popular",
            SortKey::LatestCreated => "-created_at",
            SortKey::Custom(key) => key,
        }
    }
}

impl std::fmt::Display for SortKey {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for SortKey {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim() {
            "" => Err("Sort key cannot be empty".to_string()),
            "-published_at" | "latest" => Ok(SortKey::LatestPublished),
            "-popular" | "popular" => Ok(SortKey::Popular),
            "-created_at" | "newest" => Ok(SortKey::LatestCreated),
            other => Ok(SortKey::Custom(other.to_string())),
        }
    }
}

/// Filter and sort parameters driving the story listing.
///
/// Empty strings and an empty `tag_ids` mean "no filter" and are left out
/// of the request entirely.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct QueryCriteria {
    pub search: String,
    pub category_id: String,
    pub category_slug: String,
    pub tag_ids: Vec<i64>,
    pub sort: SortKey,
    pub size: u32,
}

impl Default for QueryCriteria {
    fn default() -> Self {
        Self {
            search: String::new(),
            category_id: String::new(),
            category_slug: String::new(),
            tag_ids: Vec::new(),
            sort: SortKey::default(),
            size: DEFAULT_PAGE_SIZE,
        }
    }
}

impl QueryCriteria {
    pub fn with_size(size: u32) -> Self {
        Self {
            size: size.max(1),
            ..Default::default()
        }
    }

    /// Shallow merge: fields left as `None` in the patch keep their value.
    pub fn merge(&mut self, patch: CriteriaPatch) {
        if let Some(search) = patch.search {
            self.search = search;
        }
        if let Some(category_id) = patch.category_id {
            self.category_id = category_id;
        }
        if let Some(category_slug) = patch.category_slug {
            self.category_slug = category_slug;
        }
        if let Some(tag_ids) = patch.tag_ids {
            self.tag_ids = tag_ids;
        }
        if let Some(sort) = patch.sort {
            self.sort = sort;
        }
        if let Some(size) = patch.size {
            self.size = size.max(1);
        }
    }

    /// Query parameters for a given page, in a fixed order so that the
    /// resulting path is a stable cache key.
    pub fn query_pairs(&self, page: u32) -> Vec<(&'static str, String)> {
        let mut pairs = vec![
            ("page", page.max(1).to_string()),
            ("size", self.size.max(1).to_string()),
            ("sort", self.sort.as_str().to_string()),
        ];

        if !self.search.is_empty() {
            pairs.push(("search", self.search.clone()));
        }
        if !self.category_id.is_empty() {
            pairs.push(("category_id", self.category_id.clone()));
        }
        if !self.tag_ids.is_empty() {
            let joined = self
                .tag_ids
                .iter()
                .map(|id| id.to_string())
                .collect::<Vec<_>>()
                .join(",");
            pairs.push(("tag_ids", joined));
        }
        if !self.category_slug.is_empty() {
            pairs.push(("category_slug", self.category_slug.clone()));
        }

        pairs
    }

    /// Path and query string for GET /v1/stories
    pub fn to_path(&self, page: u32) -> String {
        let query = self
            .query_pairs(page)
            .into_iter()
            .map(|(key, value)| format!("{}={}", key, urlencoding::encode(&value)))
            .collect::<Vec<_>>()
            .join("&");
        format!("v1/stories?{}", query)
    }
}

/// Partial update of [`QueryCriteria`].
///
/// `None` leaves a field unchanged. To clear a filter pass an empty value:
/// `Some(String::new())` for text filters, `Some(vec![])` for tags.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct CriteriaPatch {
    pub search: Option<String>,
    pub category_id: Option<String>,
    pub category_slug: Option<String>,
    pub tag_ids: Option<Vec<i64>>,
    pub sort: Option<SortKey>,
    pub size: Option<u32>,
}

impl CriteriaPatch {
    pub fn search(mut self, search: impl Into<String>) -> Self {
        self.search = Some(search.into());
        self
    }

    pub fn category_id(mut self, category_id: impl Into<String>) -> Self {
        self.category_id = Some(category_id.into());
        self
    }

    pub fn category_slug(mut self, category_slug: impl Into<String>) -> Self {
        self.category_slug = Some(category_slug.into());
        self
    }

    pub fn tag_ids(mut self, tag_ids: Vec<i64>) -> Self {
        self.tag_ids = Some(tag_ids);
        self
    }

    pub fn sort(mut self, sort: SortKey) -> Self {
        self.sort = Some(sort);
        self
    }

    pub fn size(mut self, size: u32) -> Self {
        self.size = Some(size);
        self
    }

    /// Clear every filter, keeping sort and page size
    pub fn clear_filters() -> Self {
        Self::default()
            .search("")
            .category_id("")
            .category_slug("")
            .tag_ids(Vec::new())
    }
}
