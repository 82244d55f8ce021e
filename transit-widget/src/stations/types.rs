//! Station search index DTOs.
//!
//! The index speaks the multi-query protocol: one POST carries a list of
//! queries and the response carries one result per query, in order.

use serde::{Deserialize, Serialize};

use crate::domain::{InvalidStationId, StationId};

/// Body of a multi-query search request.
#[derive(Debug, Clone, Serialize)]
pub struct MultiQueryRequest<'a> {
    pub requests: Vec<IndexQuery<'a>>,
}

/// A single query against one index.
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct IndexQuery<'a> {
    pub index_name: &'a str,
    pub query: &'a str,
    /// URL-encoded-style parameter string, passed through verbatim.
    pub params: &'a str,
}

/// Response to a multi-query search.
#[derive(Debug, Clone, Deserialize)]
pub struct MultiQueryResponse {
    #[serde(default)]
    pub results: Vec<QueryResult>,
}

/// Ranked hits for one query.
#[derive(Debug, Clone, Deserialize)]
pub struct QueryResult {
    #[serde(default)]
    pub hits: Vec<TripPointHit>,
}

/// One indexed trip point. Only the identifier is used.
#[derive(Debug, Clone, Deserialize)]
pub struct TripPointHit {
    #[serde(rename = "ID_TRIPPOINT")]
    pub id: Option<RawTripPointId>,
}

/// Trip point identifiers arrive as numbers or numeric strings.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(untagged)]
pub enum RawTripPointId {
    Number(u64),
    Text(String),
}

impl RawTripPointId {
    /// Convert to a validated identifier.
    pub fn to_station_id(&self) -> Result<StationId, InvalidStationId> {
        match self {
            RawTripPointId::Number(n) => Ok(StationId::new(*n)),
            RawTripPointId::Text(s) => StationId::parse(s),
        }
    }

    /// Raw form, for error messages.
    pub fn as_raw(&self) -> String {
        match self {
            RawTripPointId::Number(n) => n.to_string(),
            RawTripPointId::Text(s) => s.clone(),
        }
    }
}

impl MultiQueryResponse {
    /// Identifier of the top-ranked hit of the first query, if any.
    pub fn top_hit(&self) -> Option<&RawTripPointId> {
        self.results.first()?.hits.first()?.id.as_ref()
    }
}
