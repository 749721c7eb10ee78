pub mod options;
pub mod search;
pub mod shared;
pub mod story;
