//! The collaborators a running service talks to.

use crate::domain::{Station, Trip};
use crate::mock::MockTransitApi;
use crate::pipeline::{StationResolver, TripSource};
use crate::stations::{StationClient, StationError};
use crate::tripplanner::{TripPlannerClient, TripPlannerError, TripQuery};

/// Live HTTP clients or offline mock data.
#[derive(Debug, Clone)]
pub enum TransitBackend {
    Live {
        stations: StationClient,
        trips: TripPlannerClient,
    },
    Mock(MockTransitApi),
}

impl TransitBackend {
    pub fn is_mock(&self) -> bool {
        matches!(self, TransitBackend::Mock(_))
    }
}

impl StationResolver for TransitBackend {
    async fn resolve(&self, name: &str) -> Result<Option<Station>, StationError> {
        match self {
            TransitBackend::Live { stations, .. } => stations.resolve(name).await,
            TransitBackend::Mock(mock) => mock.resolve(name).await,
        }
    }
}

impl TripSource for TransitBackend {
    async fn fetch_trips(&self, query: &TripQuery) -> Result<Vec<Trip>, TripPlannerError> {
        match self {
            TransitBackend::Live { trips, .. } => trips.fetch_trips(query).await,
            TransitBackend::Mock(mock) => mock.fetch_trips(query).await,
        }
    }
}
