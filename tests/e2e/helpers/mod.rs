use haluland::domain::options::OptionsService;
use haluland::domain::story::StoryService;
use haluland::infrastructure::auth::AuthSession;
use haluland::infrastructure::config::{Config, Environment, LogFormat};
use haluland::infrastructure::http::ApiContext;
use haluland::infrastructure::repositories::{HttpOptionsRepository, HttpStoryRepository};
use std::sync::Arc;
use test_context::AsyncTestContext;
use tokio::net::TcpListener;

pub mod fixtures;

use stub_api::{StubState, TEST_TOKEN};

/// Client-side services wired against one stub server
pub struct Services {
    pub api: Arc<ApiContext>,
    pub stories: Arc<StoryService>,
    pub options: OptionsService,
}

pub struct TestContext {
    pub stub: Arc<StubState>,
    pub config: Config,
    pub services: Services,
}

impl TestContext {
    /// Services for the same server, built with a different session or config
    pub fn services_with(&self, config: &Config, session: AuthSession) -> Services {
        build_services(config, session)
    }

    pub fn anonymous(&self) -> Services {
        self.services_with(&self.config, AuthSession::anonymous())
    }

    pub fn uncached(&self) -> Services {
        let config = Config {
            cache_enabled: false,
            ..self.config.clone()
        };
        self.services_with(&config, AuthSession::with_token(TEST_TOKEN))
    }
}

impl AsyncTestContext for TestContext {
    fn setup() -> impl std::future::Future<Output = Self> + Send {
        async {
            let stub = Arc::new(StubState::new());
            let app = stub_api::router(stub.clone());

            // Start the stub API
            let listener = TcpListener::bind("127.0.0.1:0")
                .await
                .expect("Failed to bind listener");
            let addr = listener.local_addr().expect("Failed to get local addr");

            tokio::spawn(async move {
                axum::serve(listener, app).await.unwrap();
            });

            let config = Config {
                api_host: format!("http://{}", addr),
                access_token: Some(TEST_TOKEN.to_string()),
                http_timeout_secs: 5,
                environment: Environment::Development,
                log_format: LogFormat::Pretty,
                cache_enabled: true,
                cache_ttl_secs: 60,
                cache_max_entries: 100,
                default_page_size: 5,
                default_sort: "-published_at".to_string(),
            };

            let services = build_services(&config, AuthSession::with_token(TEST_TOKEN));

            Self {
                stub,
                config,
                services,
            }
        }
    }

    fn teardown(self) -> impl std::future::Future<Output = ()> + Send {
        async {
            // The server task ends with the test runtime
        }
    }
}

fn build_services(config: &Config, session: AuthSession) -> Services {
    let api = Arc::new(ApiContext::new(config, session).expect("Failed to build API context"));

    let story_repo = Arc::new(HttpStoryRepository::new(api.clone()));
    let options_repo = Arc::new(HttpOptionsRepository::new(api.clone()));

    Services {
        api,
        stories: Arc::new(StoryService::new(story_repo)),
        options: OptionsService::new(options_repo),
    }
}
