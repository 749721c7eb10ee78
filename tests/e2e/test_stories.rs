use crate::e2e::helpers;

use haluland::domain::story::{
    StoryQuery, StoryRequest, StoryServiceApi, StoryServiceError, StoryStatus,
};
use helpers::fixtures::{self, titles};
use helpers::TestContext;
use pretty_assertions::assert_eq;
use test_context::test_context;

#[test_context(TestContext)]
#[tokio::test]
async fn it_should_get_a_published_story_by_slug(ctx: &TestContext) {
    let story = fixtures::story("Met Gala Recap");
    ctx.stub.seed(vec![story.clone()]);

    let found = ctx
        .services
        .stories
        .get_story_by_slug("met-gala-recap")
        .await
        .unwrap();

    assert_eq!(found.id, story.id);
    assert_eq!(found.content, "Met Gala Recap body");
    assert_eq!(
        ctx.stub.gets("/v1/public/stories/"),
        vec!["/v1/public/stories/met-gala-recap"]
    );
}

#[test_context(TestContext)]
#[tokio::test]
async fn it_should_hide_drafts_from_the_public_page(ctx: &TestContext) {
    let mut draft = fixtures::story("Unannounced Tour");
    draft.status = StoryStatus::Draft;
    ctx.stub.seed(vec![draft.clone()]);

    let public = ctx
        .services
        .stories
        .get_story_by_slug("unannounced-tour")
        .await;
    assert!(matches!(public, Err(StoryServiceError::NotFound)));

    // The dashboard lookup by id still sees it
    let by_id = ctx.services.stories.get_story(&draft.id).await.unwrap();
    assert_eq!(by_id.status, StoryStatus::Draft);
}

#[test_context(TestContext)]
#[tokio::test]
async fn it_should_return_not_found_for_an_unknown_id(ctx: &TestContext) {
    let result = ctx.services.stories.get_story("story-missing").await;
    assert!(matches!(result, Err(StoryServiceError::NotFound)));
}

#[test_context(TestContext)]
#[tokio::test]
async fn it_should_reject_writes_without_a_token(ctx: &TestContext) {
    let anonymous = ctx.anonymous();

    let result = anonymous
        .stories
        .create_story(StoryRequest {
            title: Some("Leaked Setlist".to_string()),
            ..Default::default()
        })
        .await;

    match result {
        Err(StoryServiceError::Unauthorized(msg)) => assert_eq!(msg, "Unauthorized"),
        other => panic!("expected unauthorized, got {:?}", other),
    }
    assert!(ctx.stub.stories().is_empty());

    let post = ctx
        .stub
        .requests()
        .into_iter()
        .find(|r| r.method == "POST")
        .expect("POST was not sent");
    assert_eq!(post.authorization, None);
}

#[test_context(TestContext)]
#[tokio::test]
async fn it_should_create_a_story_and_list_it_on_the_dashboard(ctx: &TestContext) {
    ctx.stub.seed(fixtures::numbered(2));

    ctx.services
        .stories
        .create_story(StoryRequest {
            title: Some("Breaking Exclusive".to_string()),
            excerpt: Some("First look".to_string()),
            status: Some(StoryStatus::Draft),
            ..Default::default()
        })
        .await
        .unwrap();

    let query = StoryQuery {
        status: Some(StoryStatus::Draft),
        ..Default::default()
    };
    let drafts = ctx.services.stories.list_stories(&query).await.unwrap();

    assert_eq!(titles(&drafts.records), vec!["Breaking Exclusive"]);
    assert_eq!(drafts.records[0].excerpt, "First look");
    assert_eq!(drafts.page_summary.total, 1);
    assert_eq!(
        ctx.stub.gets("/v1/stories?"),
        vec!["/v1/stories?page=1&size=5&sort=-created_at&search=&user_id=&status=DRAFT"]
    );
}

#[test_context(TestContext)]
#[tokio::test]
async fn it_should_update_and_delete_a_story(ctx: &TestContext) {
    let story = fixtures::story("Red Carpet Looks");
    let id = story.id.clone();
    ctx.stub.seed(vec![story]);

    ctx.services
        .stories
        .update_story(
            &id,
            StoryRequest {
                title: Some("Red Carpet Best Looks".to_string()),
                status: Some(StoryStatus::Archived),
                ..Default::default()
            },
        )
        .await
        .unwrap();

    let updated = ctx.services.stories.get_story(&id).await.unwrap();
    assert_eq!(updated.title, "Red Carpet Best Looks");
    assert_eq!(updated.status, StoryStatus::Archived);

    ctx.services.stories.delete_story(&id).await.unwrap();
    assert!(ctx.stub.stories().is_empty());

    let again = ctx.services.stories.delete_story(&id).await;
    assert!(matches!(again, Err(StoryServiceError::NotFound)));
}

#[test_context(TestContext)]
#[tokio::test]
async fn it_should_validate_before_calling_the_api(ctx: &TestContext) {
    let result = ctx
        .services
        .stories
        .create_story(StoryRequest {
            excerpt: Some("No title".to_string()),
            ..Default::default()
        })
        .await;

    assert!(matches!(result, Err(StoryServiceError::Invalid(_))));
    assert!(ctx.stub.requests().is_empty());
}

#[test_context(TestContext)]
#[tokio::test]
async fn it_should_accept_ids_that_are_not_uuids(ctx: &TestContext) {
    let mut story = fixtures::story("Box Office Weekend");
    story.id = "42".to_string();
    story.author_id = Some("journalist-7".to_string());
    ctx.stub.seed(vec![story]);

    let found = ctx.services.stories.get_story("42").await.unwrap();
    assert_eq!(found.title, "Box Office Weekend");

    let query = StoryQuery {
        user_id: Some("journalist-7".to_string()),
        ..Default::default()
    };
    let mine = ctx.services.stories.list_stories(&query).await.unwrap();
    assert_eq!(titles(&mine.records), vec!["Box Office Weekend"]);
}
