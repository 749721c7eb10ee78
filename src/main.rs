use clap::{Args, Parser, Subcommand};
use haluland::domain::options::OptionsService;
use haluland::domain::search::{CriteriaPatch, QueryCriteria, SearchFeed, SortKey};
use haluland::domain::story::{Story, StoryQuery, StoryService, StoryServiceApi, StoryStatus};
use haluland::infrastructure::auth::AuthSession;
use haluland::infrastructure::config::{Config, LogFormat};
use haluland::infrastructure::http::ApiContext;
use haluland::infrastructure::repositories::{HttpOptionsRepository, HttpStoryRepository};
use std::sync::Arc;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

#[derive(Parser)]
#[command(name = "haluland", about = "Browse and search Haluland stories")]
struct Cli {
    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand)]
enum Command {
    /// Search published stories, loading further pages on demand
    Search(SearchArgs),
    /// Show a published story by its slug
    Story { slug: String },
    /// List category options
    Categories,
    /// List tag options
    Tags,
    /// List stories for the journalist dashboard (requires ACCESS_TOKEN)
    Dashboard(DashboardArgs),
}

#[derive(Args)]
struct SearchArgs {
    /// Free-text search
    #[arg(short, long, default_value = "")]
    query: String,
    /// Category slug
    #[arg(long)]
    category: Option<String>,
    #[arg(long)]
    category_id: Option<String>,
    /// Tag labels, comma separated
    #[arg(long, value_delimiter = ',')]
    tag: Vec<String>,
    /// Tag ids, comma separated
    #[arg(long, value_delimiter = ',')]
    tag_id: Vec<i64>,
    /// latest, popular, newest or a raw sort key such as -published_at
    #[arg(long)]
    sort: Option<SortKey>,
    #[arg(long)]
    size: Option<u32>,
    /// How many pages to load
    #[arg(long, default_value_t = 1)]
    pages: u32,
}

#[derive(Args)]
struct DashboardArgs {
    #[arg(short, long, default_value = "")]
    query: String,
    #[arg(long)]
    status: Option<StoryStatus>,
    #[arg(long)]
    user_id: Option<String>,
    #[arg(long, default_value_t = 1)]
    page: u32,
    #[arg(long)]
    size: Option<u32>,
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();

    // Load configuration
    let config = Config::from_env()?;

    // Initialize logging
    init_logging(&config);

    tracing::info!(api_host = %config.api_host, "Starting Haluland client");

    // === DEPENDENCY INJECTION SETUP ===
    // 1. Shared API context (credentials + response cache)
    let session = AuthSession::from_optional(config.access_token.clone());
    let api = Arc::new(ApiContext::new(&config, session)?);

    // 2. Repositories
    let story_repo = Arc::new(HttpStoryRepository::new(api.clone()));
    let options_repo = Arc::new(HttpOptionsRepository::new(api.clone()));

    // 3. Services
    let story_service = Arc::new(StoryService::new(story_repo));
    let options_service = OptionsService::new(options_repo);

    match cli.command {
        Command::Search(args) => run_search(args, &config, story_service, &options_service).await,
        Command::Story { slug } => {
            let story = story_service.get_story_by_slug(&slug).await?;
            print_story(&story, true);
            Ok(())
        }
        Command::Categories => {
            for category in options_service.get_categories().await? {
                println!("{:>4}  {:<24} {}", category.value, category.slug, category.label);
            }
            Ok(())
        }
        Command::Tags => {
            for tag in options_service.get_tags().await? {
                println!("{:>4}  {}", tag.value, tag.label);
            }
            Ok(())
        }
        Command::Dashboard(args) => {
            if !api.session().is_authenticated() {
                tracing::warn!(
                    "No ACCESS_TOKEN configured, dashboard listing will likely be rejected"
                );
            }

            let query = StoryQuery {
                page: args.page,
                size: args.size.unwrap_or(config.default_page_size),
                search: args.query,
                status: args.status,
                user_id: args.user_id,
                ..Default::default()
            };
            let page = story_service.list_stories(&query).await?;

            for story in &page.records {
                print_story(story, false);
            }
            println!(
                "page {} of {} stories ({} more)",
                page.page_summary.page,
                page.page_summary.total,
                if page.page_summary.has_next { "has" } else { "no" }
            );
            Ok(())
        }
    }
}

async fn run_search(
    args: SearchArgs,
    config: &Config,
    story_service: Arc<StoryService>,
    options_service: &OptionsService,
) -> anyhow::Result<()> {
    let mut criteria = QueryCriteria::with_size(args.size.unwrap_or(config.default_page_size));
    criteria.sort = args.sort.unwrap_or_else(|| config.default_sort_key());

    let mut tag_ids = args.tag_id;
    tag_ids.extend(options_service.resolve_tag_ids(&args.tag).await?);

    let mut patch = CriteriaPatch::default().search(args.query).tag_ids(tag_ids);
    if let Some(slug) = args.category {
        patch = patch.category_slug(slug);
    }
    if let Some(id) = args.category_id {
        patch = patch.category_id(id);
    }

    let mut feed = SearchFeed::new(story_service, criteria);
    feed.set_criteria(patch);

    let mut printed = 0;
    for page in 1..=args.pages.max(1) {
        if page > 1 && !feed.load_more() {
            break;
        }

        feed.settle().await;

        // One manual retry for errors that may go away on their own
        if feed.state().last_error().is_some_and(|err| err.is_transient()) {
            tracing::warn!(page, "Page fetch failed, retrying once");
            feed.retry();
            feed.settle().await;
        }
        if let Some(err) = feed.state().last_error() {
            anyhow::bail!("Search failed on page {}: {}", page, err);
        }

        for story in &feed.records()[printed..] {
            print_story(story, false);
        }
        printed = feed.records().len();
    }

    let summary = feed.state().page_summary();
    println!(
        "{} of {} stories shown{}",
        printed,
        summary.total,
        if summary.has_next { ", more available" } else { "" }
    );

    Ok(())
}

fn print_story(story: &Story, full: bool) {
    let published = story
        .published_at
        .map(|at| at.format("%Y-%m-%d").to_string())
        .unwrap_or_else(|| story.status.to_string());
    let category = story
        .category
        .as_ref()
        .map(|c| c.name.as_str())
        .unwrap_or("-");

    println!("[{}] {} ({})", published, story.title, category);
    println!(
        "    /stories/{}  likes {}  comments {}",
        story.slug, story.total_likes, story.total_comments
    );

    if full {
        if !story.excerpt.is_empty() {
            println!("\n{}\n", story.excerpt);
        }
        println!("{}", story.content);
    }
}

fn init_logging(config: &Config) {
    let default_filter = if config.is_development() {
        "haluland=debug"
    } else {
        "haluland=info"
    };
    let filter = tracing_subscriber::EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| default_filter.into());

    if config.log_format == LogFormat::Json {
        tracing_subscriber::registry()
            .with(filter)
            .with(tracing_subscriber::fmt::layer().json().with_writer(std::io::stderr))
            .init();
    } else {
        tracing_subscriber::registry()
            .with(filter)
            .with(tracing_subscriber::fmt::layer().pretty().with_writer(std::io::stderr))
            .init();
    }
}
