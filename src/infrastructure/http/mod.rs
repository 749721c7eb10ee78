use crate::domain::shared::ApiResponse;
use crate::error::{AppError, AppResult};
use crate::infrastructure::auth::{AuthSession, RequestId, X_REQUEST_ID};
use crate::infrastructure::config::Config;
use moka::future::Cache;
use reqwest::header::{self, HeaderMap, HeaderValue};
use reqwest::{Method, StatusCode};
use serde::de::DeserializeOwned;
use serde::Serialize;
use serde_json::Value;
use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::Arc;

/// Shared, explicitly injected access to the Haluland API.
///
/// Carries the HTTP client, the caller's credentials and a response cache
/// for GET requests keyed by path and query string. Writes never touch the
/// cache; callers invalidate the affected keys after a successful write.
pub struct ApiContext {
    base_url: String,
    http_client: reqwest::Client,
    session: AuthSession,
    cache: Option<Cache<String, Arc<Value>>>,
    // Bumped on every invalidation; a GET that overlapped one is not cached
    cache_epoch: AtomicU64,
}

impl ApiContext {
    pub fn new(config: &Config, session: AuthSession) -> AppResult<Self> {
        let mut headers = HeaderMap::new();
        headers.insert(
            header::ACCEPT,
            HeaderValue::from_static("application/json, text/plain, */*"),
        );

        let http_client = reqwest::Client::builder()
            .timeout(config.http_timeout())
            .default_headers(headers)
            .user_agent("Haluland-Client")
            .build()?;

        let cache = if config.cache_enabled {
            Some(
                Cache::builder()
                    .max_capacity(config.cache_max_entries)
                    .time_to_live(config.cache_ttl())
                    .build(),
            )
        } else {
            None
        };

        Ok(Self {
            base_url: normalize_base_url(&config.api_host),
            http_client,
            session,
            cache,
            cache_epoch: AtomicU64::new(0),
        })
    }

    pub fn session(&self) -> &AuthSession {
        &self.session
    }

    pub fn url(&self, path: &str) -> String {
        format!("{}{}", self.base_url, path.trim_start_matches('/'))
    }

    /// GET `path` and decode the envelope's `data`.
    /// `Ok(None)` means the API answered successfully with no data.
    pub async fn get<T: DeserializeOwned>(&self, path: &str) -> AppResult<Option<T>> {
        if let Some(cache) = &self.cache {
            if let Some(cached) = cache.get(path).await {
                tracing::debug!(path, "API cache hit");
                return decode(cached.as_ref().clone());
            }
        }

        self.fetch(path).await
    }

    /// Like [`ApiContext::get`] but always asks the API, then refreshes the
    /// cached copy with the answer.
    pub async fn get_fresh<T: DeserializeOwned>(&self, path: &str) -> AppResult<Option<T>> {
        self.fetch(path).await
    }

    async fn fetch<T: DeserializeOwned>(&self, path: &str) -> AppResult<Option<T>> {
        let epoch = self.cache_epoch.load(Ordering::SeqCst);
        let data = self.execute(Method::GET, path, None::<&()>).await?;

        if let Some(cache) = &self.cache {
            if self.cache_epoch.load(Ordering::SeqCst) == epoch {
                cache.insert(path.to_string(), Arc::new(data.clone())).await;
            } else {
                tracing::debug!(path, "Cache invalidated during request, not storing response");
            }
        }

        decode(data)
    }

    pub async fn post<B: Serialize + ?Sized>(&self, path: &str, body: &B) -> AppResult<()> {
        self.execute(Method::POST, path, Some(body)).await?;
        Ok(())
    }

    pub async fn patch<B: Serialize + ?Sized>(&self, path: &str, body: &B) -> AppResult<()> {
        self.execute(Method::PATCH, path, Some(body)).await?;
        Ok(())
    }

    pub async fn delete(&self, path: &str) -> AppResult<()> {
        self.execute(Method::DELETE, path, None::<&()>).await?;
        Ok(())
    }

    /// Drop every cached response whose key starts with `prefix`.
    /// Returns how many entries were dropped.
    pub async fn invalidate_prefix(&self, prefix: &str) -> usize {
        let Some(cache) = &self.cache else {
            return 0;
        };
        self.cache_epoch.fetch_add(1, Ordering::SeqCst);

        let keys: Vec<Arc<String>> = cache
            .iter()
            .filter(|(key, _)| key.starts_with(prefix))
            .map(|(key, _)| key)
            .collect();

        for key in &keys {
            cache.invalidate(key.as_str()).await;
        }

        tracing::debug!(prefix, invalidated = keys.len(), "API cache invalidated");
        keys.len()
    }

    async fn execute<B: Serialize + ?Sized>(
        &self,
        method: Method,
        path: &str,
        body: Option<&B>,
    ) -> AppResult<Value> {
        let request_id = RequestId::generate();

        let mut request = self
            .http_client
            .request(method.clone(), self.url(path))
            .header(X_REQUEST_ID, request_id.as_str());

        if let Some(authorization) = self.session.authorization_header() {
            request = request.header(header::AUTHORIZATION, authorization);
        }
        if let Some(body) = body {
            request = request.json(body);
        }

        tracing::debug!(%method, path, request_id = %request_id, "API request");

        let response = request.send().await?;
        let status = response.status();
        let text = response.text().await?;

        let result = interpret(status, &text);
        if let Err(err) = &result {
            tracing::warn!(
                %method,
                path,
                status = status.as_u16(),
                request_id = %request_id,
                error = %err,
                "API request failed"
            );
        }

        result
    }
}

fn normalize_base_url(host: &str) -> String {
    let trimmed = host.trim().trim_end_matches('/');
    format!("{}/", trimmed)
}

/// Turn a raw response into the envelope's data, mapping failures.
/// Non-2xx responses prefer the envelope's message over the raw body.
fn interpret(status: StatusCode, body: &str) -> AppResult<Value> {
    match serde_json::from_str::<ApiResponse<Value>>(body) {
        Ok(envelope) if status.is_success() => Ok(envelope.into_result()?.unwrap_or(Value::Null)),
        Ok(envelope) => Err(AppError::from_status(status, envelope.message)),
        Err(_) if !status.is_success() => Err(AppError::from_status(status, body.to_string())),
        Err(err) => Err(AppError::Decode(err)),
    }
}

fn decode<T: DeserializeOwned>(value: Value) -> AppResult<Option<T>> {
    if value.is_null() {
        return Ok(None);
    }
    Ok(Some(serde_json::from_value(value)?))
}
