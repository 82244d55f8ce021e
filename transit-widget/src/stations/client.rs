//! Station search index client.

use reqwest::header::{HeaderMap, HeaderName, HeaderValue};
use tracing::debug;

use crate::domain::{Station, StationId};
use crate::pipeline::StationResolver;

use super::error::StationError;
use super::types::{IndexQuery, MultiQueryRequest, MultiQueryResponse};

/// Index holding transit trip points.
const DEFAULT_INDEX: &str = "TRIPPOINT_PROD_TR";

/// Query parameters: restrict to real stations or the fixed stop category.
const QUERY_PARAMS: &str = "hitsPerPage=55&page=0&filters=TRANO = 1 OR ISSTATION = 0";

/// Configuration for the station search client.
#[derive(Debug, Clone)]
pub struct StationClientConfig {
    /// Search-only API key
    pub api_key: String,
    /// Application id, also used to derive the default host
    pub app_id: String,
    /// Base URL for the API
    pub base_url: String,
    /// Index to query
    pub index_name: String,
    /// Request timeout in seconds
    pub timeout_secs: u64,
}

impl StationClientConfig {
    /// Create a new config for the given application credentials.
    pub fn new(api_key: impl Into<String>, app_id: impl Into<String>) -> Self {
        let app_id = app_id.into();
        Self {
            api_key: api_key.into(),
            base_url: default_base_url(&app_id),
            app_id,
            index_name: DEFAULT_INDEX.to_string(),
            timeout_secs: 30,
        }
    }

    /// Set a custom base URL (for testing).
    pub fn with_base_url(mut self, url: impl Into<String>) -> Self {
        self.base_url = url.into();
        self
    }

    /// Query a different index.
    pub fn with_index(mut self, index: impl Into<String>) -> Self {
        self.index_name = index.into();
        self
    }

    /// Set request timeout.
    pub fn with_timeout(mut self, secs: u64) -> Self {
        self.timeout_secs = secs;
        self
    }
}

/// Distributed search host for an application id.
fn default_base_url(app_id: &str) -> String {
    format!("https://{}-dsn.algolia.net", app_id.to_ascii_lowercase())
}

/// Client for the station search index.
#[derive(Debug, Clone)]
pub struct StationClient {
    http: reqwest::Client,
    base_url: String,
    index_name: String,
}

impl StationClient {
    /// Create a new station search client.
    pub fn new(config: StationClientConfig) -> Result<Self, StationError> {
        let mut headers = HeaderMap::new();

        let api_key = HeaderValue::from_str(&config.api_key).map_err(|_| StationError::Api {
            status: 0,
            message: "Invalid API key format".to_string(),
        })?;
        headers.insert(HeaderName::from_static("x-algolia-api-key"), api_key);

        let app_id = HeaderValue::from_str(&config.app_id).map_err(|_| StationError::Api {
            status: 0,
            message: "Invalid application id format".to_string(),
        })?;
        headers.insert(HeaderName::from_static("x-algolia-application-id"), app_id);

        let http = reqwest::Client::builder()
            .default_headers(headers)
            .timeout(std::time::Duration::from_secs(config.timeout_secs))
            .build()?;

        Ok(Self {
            http,
            base_url: config.base_url.trim_end_matches('/').to_string(),
            index_name: config.index_name,
        })
    }

    /// Run a search and return the raw multi-query response.
    pub async fn search(&self, name: &str) -> Result<MultiQueryResponse, StationError> {
        let url = format!("{}/1/indexes/*/queries", self.base_url);

        let body = MultiQueryRequest {
            requests: vec![IndexQuery {
                index_name: &self.index_name,
                query: name,
                params: QUERY_PARAMS,
            }],
        };

        let response = self.http.post(&url).json(&body).send().await?;
        let status = response.status();

        if status == reqwest::StatusCode::UNAUTHORIZED || status == reqwest::StatusCode::FORBIDDEN {
            return Err(StationError::Unauthorized);
        }

        if status == reqwest::StatusCode::TOO_MANY_REQUESTS {
            return Err(StationError::RateLimited);
        }

        if !status.is_success() {
            let body = response.text().await.unwrap_or_default();
            return Err(StationError::Api {
                status: status.as_u16(),
                message: body,
            });
        }

        let body = response.text().await?;

        serde_json::from_str(&body).map_err(|e| StationError::Json {
            message: e.to_string(),
            body: Some(body.chars().take(500).collect()),
        })
    }

    /// Look up the identifier of the best match for a station name.
    ///
    /// Returns `Ok(None)` when the name is blank or the index has no hit.
    /// Blank names never reach the network.
    pub async fn lookup(&self, name: &str) -> Result<Option<StationId>, StationError> {
        let name = name.trim();
        if name.is_empty() {
            return Ok(None);
        }

        let response = self.search(name).await?;
        let id = top_hit_id(name, &response)?;

        debug!(station = name, id = ?id, "Station lookup complete");
        Ok(id)
    }
}

/// Validated identifier of the top hit.
pub(crate) fn top_hit_id(
    name: &str,
    response: &MultiQueryResponse,
) -> Result<Option<StationId>, StationError> {
    response
        .top_hit()
        .map(|raw| {
            raw.to_station_id().map_err(|_| StationError::InvalidId {
                name: name.to_string(),
                raw: raw.as_raw(),
            })
        })
        .transpose()
}

impl StationResolver for StationClient {
    async fn resolve(&self, name: &str) -> Result<Option<Station>, StationError> {
        let id = self.lookup(name).await?;
        Ok(id.map(|id| Station::new(name, id)))
    }
}
