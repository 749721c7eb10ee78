pub mod error;
pub mod model;
pub mod service;

pub use error::StoryServiceError;
pub use model::{Story, StoryAuthor, StoryCategory, StoryQuery, StoryRequest, StoryStatus, Tag};
pub use service::{StoryService, StoryServiceApi};
