//! Trip planner HTTP client.
//!
//! Provides async methods for querying the trip search endpoint and
//! converting the response to domain types.

use tracing::debug;

use crate::domain::{QueryStart, StationId, TravelMode, Trip};
use crate::pipeline::TripSource;

use super::convert::convert_trip_search;
use super::error::TripPlannerError;
use super::types::TripSearchResponse;

/// Default base URL for the trip planner API.
const DEFAULT_BASE_URL: &str = "https://api.gotransit.com";

/// Trip point type for stations; the planner also knows addresses and POIs.
const STATION_TYPE_ID: &str = "4";

/// Configuration for the trip planner client.
#[derive(Debug, Clone)]
pub struct TripPlannerConfig {
    /// Base URL for the API
    pub base_url: String,
    /// Request timeout in seconds
    pub timeout_secs: u64,
}

impl TripPlannerConfig {
    pub fn new() -> Self {
        Self {
            base_url: DEFAULT_BASE_URL.to_string(),
            timeout_secs: 30,
        }
    }

    /// Set a custom base URL (for testing).
    pub fn with_base_url(mut self, url: impl Into<String>) -> Self {
        self.base_url = url.into();
        self
    }

    /// Set request timeout.
    pub fn with_timeout(mut self, secs: u64) -> Self {
        self.timeout_secs = secs;
        self
    }
}

impl Default for TripPlannerConfig {
    fn default() -> Self {
        Self::new()
    }
}

/// Parameters for one trip search.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct TripQuery {
    pub departure: StationId,
    pub arrival: StationId,
    pub mode: TravelMode,
    /// Maximum number of trips to return.
    pub limit: u32,
    pub start: QueryStart,
}

impl TripQuery {
    pub fn new(
        departure: StationId,
        arrival: StationId,
        mode: TravelMode,
        limit: u32,
        start: QueryStart,
    ) -> Self {
        Self {
            departure,
            arrival,
            mode,
            limit,
            start,
        }
    }

    /// The same search in the opposite direction.
    pub fn reversed(&self) -> Self {
        Self {
            departure: self.arrival,
            arrival: self.departure,
            ..*self
        }
    }

    /// Query string parameters, in the order the planner documents them.
    pub fn query_pairs(&self) -> Vec<(&'static str, String)> {
        let mut pairs = vec![
            ("DateType", "DEPARTURE".to_string()),
            ("Date", self.start.to_param()),
            ("Page", "1".to_string()),
            ("PageLimit", self.limit.to_string()),
            ("DepartureTripPointId", self.departure.to_string()),
            ("DepartureTypeId", STATION_TYPE_ID.to_string()),
            ("ArrivalTripPointId", self.arrival.to_string()),
            ("ArrivalTypeId", STATION_TYPE_ID.to_string()),
        ];

        if let Some(mode) = self.mode.query_param() {
            pairs.push(("PreferredTravelMode", mode.to_string()));
        }

        pairs
    }
}

/// Trip planner API client.
#[derive(Debug, Clone)]
pub struct TripPlannerClient {
    http: reqwest::Client,
    base_url: String,
}

impl TripPlannerClient {
    /// Create a new trip planner client with the given configuration.
    pub fn new(config: TripPlannerConfig) -> Result<Self, TripPlannerError> {
        let http = reqwest::Client::builder()
            .timeout(std::time::Duration::from_secs(config.timeout_secs))
            .build()?;

        Ok(Self {
            http,
            base_url: config.base_url.trim_end_matches('/').to_string(),
        })
    }

    /// Get the raw search response (for debugging/testing).
    pub async fn search_raw(&self, query: &TripQuery) -> Result<TripSearchResponse, TripPlannerError> {
        let url = format!("{}/v2/tripplanner/search", self.base_url);

        debug!(
            departure = %query.departure,
            arrival = %query.arrival,
            start = %query.start,
            limit = query.limit,
            mode = %query.mode,
            "Searching trips"
        );

        let response = self
            .http
            .get(&url)
            .query(&query.query_pairs())
            .send()
            .await?;

        let status = response.status();

        if status == reqwest::StatusCode::UNAUTHORIZED || status == reqwest::StatusCode::FORBIDDEN {
            return Err(TripPlannerError::Unauthorized);
        }

        if status == reqwest::StatusCode::TOO_MANY_REQUESTS {
            return Err(TripPlannerError::RateLimited);
        }

        if !status.is_success() {
            let body = response.text().await.unwrap_or_default();
            return Err(TripPlannerError::Api {
                status: status.as_u16(),
                message: body,
            });
        }

        let body = response.text().await?;

        // An empty body means nothing matched
        if body.trim().is_empty() || body.trim() == "null" {
            return Ok(TripSearchResponse::default());
        }

        serde_json::from_str(&body).map_err(|e| TripPlannerError::Json {
            message: e.to_string(),
            body: Some(body.chars().take(500).collect()),
        })
    }

    /// Search trips and convert them to domain types.
    ///
    /// Returns an empty list when the planner found nothing; that is a
    /// valid outcome, not an error.
    pub async fn search(&self, query: &TripQuery) -> Result<Vec<Trip>, TripPlannerError> {
        let response = self.search_raw(query).await?;
        let trips = convert_trip_search(&response);

        debug!(
            received = response.items().len(),
            converted = trips.len(),
            "Trip search complete"
        );

        Ok(trips)
    }
}

impl TripSource for TripPlannerClient {
    async fn fetch_trips(&self, query: &TripQuery) -> Result<Vec<Trip>, TripPlannerError> {
        self.search(query).await
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::NaiveDate;

    fn query(mode: TravelMode) -> TripQuery {
        let now = NaiveDate::from_ymd_opt(2025, 4, 21)
            .unwrap()
            .and_hms_opt(9, 40, 12)
            .unwrap();
        TripQuery::new(
            StationId::new(36888),
            StationId::new(75749),
            mode,
            6,
            QueryStart::from_now(now),
        )
    }

    fn param<'a>(pairs: &'a [(&'static str, String)], key: &str) -> Option<&'a str> {
        pairs
            .iter()
            .find(|(k, _)| *k == key)
            .map(|(_, v)| v.as_str())
    }

    #[test]
    fn config_builder() {
        let config = TripPlannerConfig::new()
            .with_base_url("http://localhost:8080")
            .with_timeout(60);

        assert_eq!(config.base_url, "http://localhost:8080");
        assert_eq!(config.timeout_secs, 60);
    }

    #[test]
    fn config_defaults() {
        let config = TripPlannerConfig::default();
        assert_eq!(config.base_url, DEFAULT_BASE_URL);
        assert_eq!(config.timeout_secs, 30);
    }

    #[test]
    fn client_creation() {
        assert!(TripPlannerClient::new(TripPlannerConfig::new()).is_ok());
    }

    #[test]
    fn query_pairs_for_all_modes_omit_mode() {
        let pairs = query(TravelMode::All).query_pairs();

        assert_eq!(param(&pairs, "DateType"), Some("DEPARTURE"));
        assert_eq!(param(&pairs, "Date"), Some("2025-04-21_09-10"));
        assert_eq!(param(&pairs, "Page"), Some("1"));
        assert_eq!(param(&pairs, "PageLimit"), Some("6"));
        assert_eq!(param(&pairs, "DepartureTripPointId"), Some("36888"));
        assert_eq!(param(&pairs, "DepartureTypeId"), Some("4"));
        assert_eq!(param(&pairs, "ArrivalTripPointId"), Some("75749"));
        assert_eq!(param(&pairs, "ArrivalTypeId"), Some("4"));
        assert_eq!(param(&pairs, "PreferredTravelMode"), None);
    }

    #[test]
    fn query_pairs_pass_explicit_mode() {
        let pairs = query(TravelMode::Bus).query_pairs();
        assert_eq!(param(&pairs, "PreferredTravelMode"), Some("Bus"));

        let pairs = query(TravelMode::Train).query_pairs();
        assert_eq!(param(&pairs, "PreferredTravelMode"), Some("Train"));
    }

    #[test]
    fn reversed_swaps_stations_only() {
        let q = query(TravelMode::Train);
        let r = q.reversed();

        assert_eq!(r.departure, q.arrival);
        assert_eq!(r.arrival, q.departure);
        assert_eq!(r.mode, q.mode);
        assert_eq!(r.limit, q.limit);
        assert_eq!(r.start, q.start);
        assert_eq!(r.reversed(), q);
    }
}
