use async_trait::async_trait;
use nextup_models::ShowRecord;
use reqwest::Client;
use tracing::debug;
use url::Url;

use crate::api::{self, DetailEntry, SearchEnvelope};
use crate::error::ProviderError;
use crate::traits::MetadataProvider;

pub const DEFAULT_API_BASE: &str = "https://api.themoviedb.org/3/";
pub const DEFAULT_IMAGE_BASE: &str = "https://image.tmdb.org/t/p/w500";

/// HTTP client for the TMDB TV endpoints. Holds a shared `reqwest::Client`;
/// the api key travels as a query parameter on every request. The base URL
/// is validated per request, so an unusable base surfaces as
/// `ProviderError::BadUrl` from `search`/`fetch_detail`.
#[derive(Clone)]
pub struct TmdbClient {
    http: Client,
    api_key: String,
    api_base: String,
    image_base: String,
}

impl TmdbClient {
    pub fn new(api_key: impl Into<String>) -> Self {
        Self::with_endpoints(api_key, DEFAULT_API_BASE, DEFAULT_IMAGE_BASE)
    }

    /// Construct against alternate endpoints (containers, API proxies).
    pub fn with_endpoints(
        api_key: impl Into<String>,
        api_base: &str,
        image_base: &str,
    ) -> Self {
        // Url::join treats a base without a trailing slash as a file, which
        // would drop the `/3` path segment.
        let api_base = if api_base.ends_with('/') {
            api_base.to_string()
        } else {
            format!("{api_base}/")
        };

        Self {
            http: Client::new(),
            api_key: api_key.into(),
            api_base,
            image_base: image_base.trim_end_matches('/').to_string(),
        }
    }

    fn endpoint(&self, path: &str) -> Result<Url, ProviderError> {
        let mut url = Url::parse(&self.api_base)
            .and_then(|base| base.join(path))
            .map_err(|_| ProviderError::BadUrl(format!("{}{path}", self.api_base)))?;
        url.query_pairs_mut().append_pair("api_key", &self.api_key);
        Ok(url)
    }

    async fn get_body(&self, url: Url) -> Result<String, ProviderError> {
        let response = self.http.get(url).send().await?;

        let status = response.status();
        if !status.is_success() {
            let body = response.text().await.unwrap_or_default();
            return Err(ProviderError::Status { status, body });
        }

        Ok(response.text().await?)
    }
}

#[async_trait]
impl MetadataProvider for TmdbClient {
    async fn search(&self, query: &str) -> Result<Vec<ShowRecord>, ProviderError> {
        let mut url = self.endpoint("search/tv")?;
        url.query_pairs_mut().append_pair("query", query);

        let body = self.get_body(url).await?;
        let envelope: SearchEnvelope = serde_json::from_str(&body)?;

        debug!(query, matches = envelope.results.len(), "TMDB search");
        Ok(envelope
            .results
            .into_iter()
            .map(|entry| api::record_from_search(entry, &self.image_base))
            .collect())
    }

    async fn fetch_detail(&self, id: &str) -> Result<ShowRecord, ProviderError> {
        let url = self.endpoint(&format!("tv/{id}"))?;

        let body = self.get_body(url).await?;
        let entry: DetailEntry = serde_json::from_str(&body)?;

        debug!(id, "TMDB detail fetch");
        Ok(api::record_from_detail(entry, &self.image_base))
    }
}
