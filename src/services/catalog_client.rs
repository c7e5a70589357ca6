//! Remote catalog client for BrewBrowser.
//!
//! Read-only access to an Open Brewery DB style listing service. The client
//! owns no state beyond its HTTP connection pool and never retries or caches.

use std::future::Future;
use std::time::Duration;

use reqwest::{RequestBuilder, StatusCode, Url};
use serde::de::DeserializeOwned;
use tracing::{debug, instrument};

use crate::types::beverage::{BeverageRecord, CatalogMetadata, ListQuery};
use crate::types::errors::CatalogError;
use crate::types::settings::ApiSettings;

/// The catalog operations the views depend on.
///
/// Returned futures are `Send` so controllers can drive them from spawned
/// tasks. Implementations: [`CatalogClient`] over HTTP, and in-memory fakes
/// in tests.
pub trait CatalogClientTrait: Send + Sync + 'static {
    /// Fetches one page of records.
    fn list_items(
        &self,
        query: &ListQuery,
    ) -> impl Future<Output = Result<Vec<BeverageRecord>, CatalogError>> + Send;

    /// Fetches a single record by identifier.
    fn get_item(&self, id: &str)
        -> impl Future<Output = Result<BeverageRecord, CatalogError>> + Send;

    /// Fetches the total count, optionally restricted to a name filter.
    fn get_metadata(
        &self,
        name_filter: Option<&str>,
    ) -> impl Future<Output = Result<CatalogMetadata, CatalogError>> + Send;

    /// Fetches `count` random records.
    fn get_random_sample(
        &self,
        count: u32,
    ) -> impl Future<Output = Result<Vec<BeverageRecord>, CatalogError>> + Send;
}

/// HTTP implementation of [`CatalogClientTrait`].
#[derive(Debug, Clone)]
pub struct CatalogClient {
    http: reqwest::Client,
    base_url: String,
}

impl CatalogClient {
    /// Builds a client from the API settings.
    pub fn new(settings: &ApiSettings) -> Result<Self, CatalogError> {
        let mut builder = reqwest::Client::builder().user_agent(settings.user_agent.clone());
        if let Some(secs) = settings.request_timeout_secs {
            builder = builder.timeout(Duration::from_secs(secs));
        }
        let http = builder
            .build()
            .map_err(|e| CatalogError::Transport(format!("failed to build HTTP client: {}", e)))?;

        Ok(Self {
            http,
            base_url: settings.base_url.trim_end_matches('/').to_string(),
        })
    }

    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    fn url(&self, path: &str) -> String {
        format!("{}/{}", self.base_url, path)
    }

    /// URL of a single record, with `id` escaped as one path segment.
    ///
    /// Ids that cannot name a record segment (empty, `.` or `..`) are
    /// reported as not found without a request.
    fn item_url(&self, id: &str) -> Result<Url, CatalogError> {
        if matches!(id, "" | "." | "..") {
            return Err(CatalogError::NotFound(id.to_string()));
        }
        let mut url = Url::parse(&self.url("breweries"))
            .map_err(|e| CatalogError::Transport(format!("invalid catalog URL {}: {}", self.base_url, e)))?;
        url.path_segments_mut()
            .map_err(|_| CatalogError::Transport(format!("catalog URL {} cannot take a path", self.base_url)))?
            .push(id);
        Ok(url)
    }

    /// Sends a request and decodes a JSON body.
    ///
    /// 404 is reported as `NotFound(not_found_key)`; any other non-success
    /// status is a transport failure.
    async fn fetch<T: DeserializeOwned>(
        &self,
        request: RequestBuilder,
        not_found_key: &str,
    ) -> Result<T, CatalogError> {
        let response = request
            .send()
            .await
            .map_err(|e| CatalogError::Transport(e.to_string()))?;

        let status = response.status();
        if status == StatusCode::NOT_FOUND {
            return Err(CatalogError::NotFound(not_found_key.to_string()));
        }
        if !status.is_success() {
            return Err(CatalogError::Transport(format!(
                "{} returned HTTP {}",
                response.url(),
                status
            )));
        }

        let body = response
            .bytes()
            .await
            .map_err(|e| CatalogError::Transport(e.to_string()))?;
        serde_json::from_slice(&body).map_err(|e| CatalogError::InvalidResponse(e.to_string()))
    }
}

impl CatalogClientTrait for CatalogClient {
    #[instrument(skip(self), fields(page = query.page, by_name = %query.by_name))]
    async fn list_items(&self, query: &ListQuery) -> Result<Vec<BeverageRecord>, CatalogError> {
        let request = self.http.get(self.url("breweries")).query(&query.to_pairs());
        let records: Vec<BeverageRecord> = self.fetch(request, "breweries").await?;
        debug!(count = records.len(), "listed page");
        Ok(records)
    }

    #[instrument(skip(self))]
    async fn get_item(&self, id: &str) -> Result<BeverageRecord, CatalogError> {
        let request = self.http.get(self.item_url(id)?);
        // A `null` body is how some deployments answer unknown ids.
        let record: Option<BeverageRecord> = self.fetch(request, id).await?;
        record.ok_or_else(|| CatalogError::NotFound(id.to_string()))
    }

    #[instrument(skip(self))]
    async fn get_metadata(&self, name_filter: Option<&str>) -> Result<CatalogMetadata, CatalogError> {
        let mut request = self.http.get(self.url("breweries/meta"));
        if let Some(name) = name_filter.filter(|n| !n.is_empty()) {
            request = request.query(&[("by_name", name)]);
        }
        self.fetch(request, "breweries/meta").await
    }

    #[instrument(skip(self))]
    async fn get_random_sample(&self, count: u32) -> Result<Vec<BeverageRecord>, CatalogError> {
        let request = self
            .http
            .get(self.url("breweries/random"))
            .query(&[("size", count)]);
        self.fetch(request, "breweries/random").await
    }
}
