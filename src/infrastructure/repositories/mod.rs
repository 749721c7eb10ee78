pub mod http_story_repository;
pub mod options_repository;
pub mod story_repository;

pub use http_story_repository::HttpStoryRepository;
pub use options_repository::HttpOptionsRepository;
pub use story_repository::StoryRepository;
