//! Offline stand-in for both external services.
//!
//! Loads a station table and canned planner responses from a directory so
//! the widget can be developed and demonstrated without credentials.
//!
//! Layout:
//!
//! ```text
//! <dir>/stations.json              {"Union Station GO": 36888, ...}
//! <dir>/trips/<dep>-<arr>.json     raw trip planner responses
//! ```

use std::collections::HashMap;
use std::path::{Path, PathBuf};
use std::sync::Arc;

use tracing::debug;

use crate::domain::{Station, StationId, Trip};
use crate::pipeline::{StationResolver, TripSource};
use crate::stations::StationError;
use crate::tripplanner::{TripPlannerError, TripQuery, TripSearchResponse, convert_trip_search};

/// Error loading mock data.
#[derive(Debug, thiserror::Error)]
pub enum MockDataError {
    #[error("failed to read {path:?}: {source}")]
    Io {
        path: PathBuf,
        source: std::io::Error,
    },

    #[error("failed to parse {path:?}: {message}")]
    Parse { path: PathBuf, message: String },

    /// Trip file name is not `<dep>-<arr>.json`
    #[error("invalid trip file name: {0:?}")]
    InvalidFileName(PathBuf),
}

/// Serves stations and trips from JSON files.
#[derive(Debug, Clone)]
pub struct MockTransitApi {
    /// Keyed by lowercased station name.
    stations: Arc<HashMap<String, Station>>,
    trips: Arc<HashMap<(StationId, StationId), TripSearchResponse>>,
}

impl MockTransitApi {
    /// Load mock data from `data_dir`.
    ///
    /// `stations.json` is required; the `trips` directory is optional.
    pub fn new(data_dir: impl AsRef<Path>) -> Result<Self, MockDataError> {
        let data_dir = data_dir.as_ref();

        let stations_path = data_dir.join("stations.json");
        let raw: HashMap<String, u64> = read_json(&stations_path)?;
        let stations: HashMap<String, Station> = raw
            .into_iter()
            .map(|(name, id)| (normalize(&name), Station::new(name, StationId::new(id))))
            .collect();

        let mut trips = HashMap::new();
        let trips_dir = data_dir.join("trips");
        if trips_dir.is_dir() {
            let entries = std::fs::read_dir(&trips_dir).map_err(|source| MockDataError::Io {
                path: trips_dir.clone(),
                source,
            })?;

            for entry in entries {
                let entry = entry.map_err(|source| MockDataError::Io {
                    path: trips_dir.clone(),
                    source,
                })?;

                let path = entry.path();
                if !path.is_file() || path.extension().and_then(|s| s.to_str()) != Some("json") {
                    continue;
                }

                let key = parse_pair(&path)?;
                let response: TripSearchResponse = read_json(&path)?;
                trips.insert(key, response);
            }
        }

        debug!(
            dir = %data_dir.display(),
            stations = stations.len(),
            routes = trips.len(),
            "Loaded mock transit data"
        );

        Ok(Self {
            stations: Arc::new(stations),
            trips: Arc::new(trips),
        })
    }

    /// Look up a station by name, ignoring case and surrounding whitespace.
    pub fn station(&self, name: &str) -> Option<&Station> {
        self.stations.get(&normalize(name))
    }

    /// Trips for a station pair, empty when no file exists for it.
    pub fn trips(&self, departure: StationId, arrival: StationId) -> Vec<Trip> {
        self.trips
            .get(&(departure, arrival))
            .map(convert_trip_search)
            .unwrap_or_default()
    }

    /// Names of all known stations, sorted.
    pub fn station_names(&self) -> Vec<&str> {
        let mut names: Vec<_> = self.stations.values().map(|s| s.name.as_str()).collect();
        names.sort_unstable();
        names
    }
}

impl StationResolver for MockTransitApi {
    async fn resolve(&self, name: &str) -> Result<Option<Station>, StationError> {
        if name.trim().is_empty() {
            return Ok(None);
        }
        Ok(self.station(name).cloned())
    }
}

impl TripSource for MockTransitApi {
    async fn fetch_trips(&self, query: &TripQuery) -> Result<Vec<Trip>, TripPlannerError> {
        let mut trips = self.trips(query.departure, query.arrival);
        trips.truncate(query.limit as usize);
        Ok(trips)
    }
}

fn normalize(name: &str) -> String {
    name.trim().to_lowercase()
}

fn read_json<T: serde::de::DeserializeOwned>(path: &Path) -> Result<T, MockDataError> {
    let json = std::fs::read_to_string(path).map_err(|source| MockDataError::Io {
        path: path.to_path_buf(),
        source,
    })?;

    serde_json::from_str(&json).map_err(|e| MockDataError::Parse {
        path: path.to_path_buf(),
        message: e.to_string(),
    })
}

/// Extract the station pair from `<dep>-<arr>.json`.
fn parse_pair(path: &Path) -> Result<(StationId, StationId), MockDataError> {
    let invalid = || MockDataError::InvalidFileName(path.to_path_buf());

    let stem = path.file_stem().and_then(|s| s.to_str()).ok_or_else(invalid)?;
    let (dep, arr) = stem.split_once('-').ok_or_else(invalid)?;

    let dep = StationId::parse(dep).map_err(|_| invalid())?;
    let arr = StationId::parse(arr).map_err(|_| invalid())?;
    Ok((dep, arr))
}
