use chrono::{Duration, Utc};
use haluland::domain::options::{CategoryOption, TagOption};
use haluland::domain::story::{Story, StoryCategory, StoryStatus, Tag};
use uuid::Uuid;

pub const MUSIC: i64 = 1;
pub const FILM: i64 = 2;

pub const TAG_KPOP: i64 = 10;
pub const TAG_AWARDS: i64 = 11;

pub fn categories() -> Vec<CategoryOption> {
    vec![
        CategoryOption {
            label: "Music".to_string(),
            slug: "music".to_string(),
            value: MUSIC,
        },
        CategoryOption {
            label: "Film".to_string(),
            slug: "film".to_string(),
            value: FILM,
        },
    ]
}

pub fn tags() -> Vec<TagOption> {
    vec![
        TagOption {
            label: "K-Pop".to_string(),
            value: TAG_KPOP,
        },
        TagOption {
            label: "Awards".to_string(),
            value: TAG_AWARDS,
        },
    ]
}

/// A published story with no category or tags
pub fn story(title: &str) -> Story {
    let slug = title.to_lowercase().replace(' ', "-");

    Story {
        id: format!("story-{}", Uuid::new_v4().simple()),
        author_id: None,
        title: title.to_string(),
        slug,
        excerpt: String::new(),
        content: format!("{} body", title),
        thumbnail: String::new(),
        thumbnail_public_id: None,
        category_id: None,
        status: StoryStatus::Published,
        published_at: Some(Utc::now()),
        created_at: Some(Utc::now()),
        updated_at: None,
        category: None,
        author: None,
        tags: Vec::new(),
        total_views: 0,
        total_comments: 0,
        total_likes: 0,
        is_liked: false,
    }
}

pub fn in_category(mut story: Story, category_id: i64) -> Story {
    let category = categories()
        .into_iter()
        .find(|c| c.value == category_id)
        .expect("Unknown fixture category");

    story.category_id = Some(category_id);
    story.category = Some(StoryCategory {
        id: category.value,
        name: category.label,
        slug: category.slug,
        description: None,
    });
    story
}

pub fn tagged(mut story: Story, tag_id: i64) -> Story {
    let tag = tags()
        .into_iter()
        .find(|t| t.value == tag_id)
        .expect("Unknown fixture tag");

    story.tags.push(Tag {
        id: tag.value,
        name: tag.label.clone(),
        slug: tag.label.to_lowercase(),
    });
    story
}

/// `count` published stories titled "Story 1".."Story N", newest first
pub fn numbered(count: usize) -> Vec<Story> {
    (1..=count)
        .map(|n| {
            let mut s = story(&format!("Story {}", n));
            s.published_at = Some(Utc::now() - Duration::minutes(n as i64));
            s
        })
        .collect()
}

pub fn titles(stories: &[Story]) -> Vec<String> {
    stories.iter().map(|s| s.title.clone()).collect()
}
