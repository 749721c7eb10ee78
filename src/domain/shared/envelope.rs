use crate::error::{AppError, AppResult};
use serde::{Deserialize, Serialize};

/// Envelope wrapping every Haluland API response
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ApiResponse<T> {
    pub success: bool,
    #[serde(default)]
    pub message: String,
    pub data: Option<T>,
}

impl<T> ApiResponse<T> {
    /// Unwrap the payload, turning `success: false` into an error.
    /// A successful envelope without data yields `None`.
    pub fn into_result(self) -> AppResult<Option<T>> {
        if !self.success {
            return Err(AppError::Rejected(self.message));
        }
        Ok(self.data)
    }
}

/// Payload of every paginated listing endpoint
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct PaginatedResponse<T> {
    #[serde(default = "Vec::new")]
    pub records: Vec<T>,
    pub page_summary: PageSummary,
}

/// Server-reported pagination metadata, trusted as-is
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
pub struct PageSummary {
    #[serde(alias = "hasNext")]
    pub has_next: bool,
    pub page: u32,
    pub size: u32,
    #[serde(default)]
    pub total: u64,
}
