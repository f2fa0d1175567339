//! `reqwest`-backed repository talking to the remote travel REST API.

use std::sync::Arc;
use std::time::Duration;

use reqwest::{Method, RequestBuilder, Response};
use serde::de::DeserializeOwned;
use serde::{Deserialize, Serialize};

use crate::cache::ListCache;
use crate::domain::activity::Activity;
use crate::domain::banner::Banner;
use crate::domain::category::Category;
use crate::domain::payment_method::PaymentMethod;
use crate::domain::promo::Promo;
use crate::domain::types::ApiToken;
use crate::models::config::ServerConfig;
use crate::repository::errors::{RepositoryError, RepositoryResult};
use crate::repository::{ListKind, ListRefresher};

mod cart;
mod catalog;
mod transaction;
mod upload;
mod user;

const REQUEST_TIMEOUT: Duration = Duration::from_secs(15);

/// Response envelope shared by every endpoint.
#[derive(Debug, Deserialize)]
#[serde(bound(deserialize = "T: Deserialize<'de>"))]
pub(crate) struct Envelope<T> {
    #[serde(default)]
    pub message: Option<String>,
    #[serde(default)]
    pub data: Option<T>,
}

/// Catalog lists served from memory inside their staleness window.
#[derive(Debug)]
pub(crate) struct CatalogCaches {
    pub activities: ListCache<Activity>,
    pub banners: ListCache<Banner>,
    pub categories: ListCache<Category>,
    pub promos: ListCache<Promo>,
    pub payment_methods: ListCache<PaymentMethod>,
}

impl CatalogCaches {
    fn new(ttl: Duration) -> Self {
        Self {
            activities: ListCache::new(ttl),
            banners: ListCache::new(ttl),
            categories: ListCache::new(ttl),
            promos: ListCache::new(ttl),
            payment_methods: ListCache::new(ttl),
        }
    }
}

/// Remote API client implementing every reader and writer trait.
///
/// Cheap to clone: clones share the HTTP connection pool and the caches.
#[derive(Debug, Clone)]
pub struct ApiRepository {
    base_url: String,
    api_key: String,
    http: Arc<reqwest::Client>,
    caches: Arc<CatalogCaches>,
}

impl ApiRepository {
    pub fn new(
        base_url: impl Into<String>,
        api_key: impl Into<String>,
        cache_ttl: Duration,
    ) -> RepositoryResult<Self> {
        let http = reqwest::Client::builder()
            .timeout(REQUEST_TIMEOUT)
            .build()
            .map_err(|err| RepositoryError::ConnectionError(err.to_string()))?;

        Ok(Self {
            base_url: base_url.into().trim_end_matches('/').to_string(),
            api_key: api_key.into(),
            http: Arc::new(http),
            caches: Arc::new(CatalogCaches::new(cache_ttl)),
        })
    }

    pub fn from_config(config: &ServerConfig) -> RepositoryResult<Self> {
        Self::new(
            &config.api_base_url,
            &config.api_key,
            Duration::from_secs(config.cache_ttl_secs),
        )
    }

    pub(crate) fn caches(&self) -> &CatalogCaches {
        &self.caches
    }

    fn url(&self, path: &str) -> String {
        format!("{}/{}", self.base_url, path.trim_start_matches('/'))
    }

    pub(crate) fn request(
        &self,
        method: Method,
        path: &str,
        token: Option<&ApiToken>,
    ) -> RequestBuilder {
        let url = self.url(path);
        log::debug!("{method} {url}");

        let builder = self
            .http
            .request(method, url)
            .header("apiKey", &self.api_key);

        match token {
            Some(token) => builder.bearer_auth(token.as_str()),
            None => builder,
        }
    }

    /// Sends the request and turns non-success statuses into errors carrying
    /// the API's `message`.
    pub(crate) async fn send(builder: RequestBuilder) -> RepositoryResult<Response> {
        let response = builder.send().await?;
        let status = response.status();
        if status.is_success() {
            return Ok(response);
        }

        let message = response
            .json::<Envelope<serde_json::Value>>()
            .await
            .ok()
            .and_then(|envelope| envelope.message);

        Err(RepositoryError::from_status(status.as_u16(), message))
    }

    /// GETs `path` and returns the envelope's `data`.
    pub(crate) async fn fetch<T: DeserializeOwned>(
        &self,
        path: &str,
        token: Option<&ApiToken>,
    ) -> RepositoryResult<T> {
        let envelope: Envelope<T> = Self::send(self.request(Method::GET, path, token))
            .await?
            .json()
            .await?;

        envelope
            .data
            .ok_or_else(|| RepositoryError::DecodeError(format!("{path}: response has no data")))
    }

    /// Like [`Self::fetch`] for list endpoints: a missing `data` is an
    /// empty list.
    pub(crate) async fn fetch_list<T: DeserializeOwned>(
        &self,
        path: &str,
        token: Option<&ApiToken>,
    ) -> RepositoryResult<Vec<T>> {
        let envelope: Envelope<Vec<T>> = Self::send(self.request(Method::GET, path, token))
            .await?
            .json()
            .await?;

        Ok(envelope.data.unwrap_or_default())
    }

    /// Like [`Self::fetch`], mapping a 404 to `None`.
    pub(crate) async fn fetch_optional<T: DeserializeOwned>(
        &self,
        path: &str,
        token: Option<&ApiToken>,
    ) -> RepositoryResult<Option<T>> {
        match self.fetch(path, token).await {
            Ok(value) => Ok(Some(value)),
            Err(RepositoryError::NotFound) => Ok(None),
            Err(err) => Err(err),
        }
    }

    pub(crate) async fn post_json<B: Serialize + ?Sized + Sync>(
        &self,
        path: &str,
        token: Option<&ApiToken>,
        body: &B,
    ) -> RepositoryResult<Response> {
        Self::send(self.request(Method::POST, path, token).json(body)).await
    }

    pub(crate) async fn post_empty(&self, path: &str, token: &ApiToken) -> RepositoryResult<()> {
        Self::send(self.request(Method::POST, path, Some(token))).await?;
        Ok(())
    }

    pub(crate) async fn delete(&self, path: &str, token: &ApiToken) -> RepositoryResult<()> {
        Self::send(self.request(Method::DELETE, path, Some(token))).await?;
        Ok(())
    }
}

impl ListRefresher for ApiRepository {
    fn refresh(&self, kind: ListKind) {
        let caches = self.caches();
        match kind {
            ListKind::Activities => caches.activities.invalidate(),
            ListKind::Banners => caches.banners.invalidate(),
            ListKind::Categories => caches.categories.invalidate(),
            ListKind::Promos => caches.promos.invalidate(),
            ListKind::PaymentMethods => caches.payment_methods.invalidate(),
        }
        log::info!("Refreshed cached {}", kind.as_str());
    }
}
