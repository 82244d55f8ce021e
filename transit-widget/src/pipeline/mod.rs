//! One widget refresh: resolve stations, fetch trips, select what to show.
//!
//! The pipeline is generic over its two collaborators so it can be driven
//! by live HTTP clients, the offline mock, or test doubles.

use std::future::Future;

use chrono::NaiveDateTime;
use futures::future::join;
use tracing::{debug, info};

use crate::domain::{QueryStart, Station, Trip};
use crate::selection::{
    Selection, SelectionCriteria, TripOrder, select_categorized, select_round_trip,
};
use crate::stations::StationError;
use crate::tripplanner::{TripPlannerError, TripQuery};

/// Resolves a human-readable station name to a station.
pub trait StationResolver {
    /// `Ok(None)` when nothing matches the name.
    fn resolve(
        &self,
        name: &str,
    ) -> impl Future<Output = Result<Option<Station>, StationError>> + Send;
}

/// Fetches trips between two resolved stations.
pub trait TripSource {
    /// Trips in upstream order. An empty list is a valid answer.
    fn fetch_trips(
        &self,
        query: &TripQuery,
    ) -> impl Future<Output = Result<Vec<Trip>, TripPlannerError>> + Send;
}

/// Failure of one of the external collaborators.
#[derive(Debug, thiserror::Error)]
pub enum UpstreamError {
    #[error("station lookup failed: {0}")]
    Stations(#[from] StationError),

    #[error("trip search failed: {0}")]
    Trips(#[from] TripPlannerError),
}

/// Error from a pipeline run.
#[derive(Debug, thiserror::Error)]
pub enum PipelineError {
    /// A configured station name matched nothing
    #[error("no station found for {name:?}")]
    StationNotFound { name: String },

    /// An external service failed or returned garbage
    #[error("upstream unavailable: {0}")]
    UpstreamUnavailable(#[from] UpstreamError),
}

impl From<StationError> for PipelineError {
    fn from(e: StationError) -> Self {
        PipelineError::UpstreamUnavailable(e.into())
    }
}

impl From<TripPlannerError> for PipelineError {
    fn from(e: TripPlannerError) -> Self {
        PipelineError::UpstreamUnavailable(e.into())
    }
}

/// Input for one run.
#[derive(Debug, Clone)]
pub struct TripRequest {
    pub departure: String,
    pub arrival: String,
    pub criteria: SelectionCriteria,
}

impl TripRequest {
    pub fn new(
        departure: impl Into<String>,
        arrival: impl Into<String>,
        criteria: SelectionCriteria,
    ) -> Self {
        Self {
            departure: departure.into(),
            arrival: arrival.into(),
            criteria,
        }
    }
}

/// Selected trips for one direction of travel.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DirectionSchedule {
    pub from: Station,
    pub to: Station,
    pub trips: Selection,
    /// Trips the planner returned before any filtering.
    pub upstream_count: usize,
}

impl DirectionSchedule {
    /// The planner had nothing at all for this direction.
    pub fn is_upstream_empty(&self) -> bool {
        self.upstream_count == 0
    }

    /// The planner had trips but every one was filtered or truncated away.
    pub fn is_filtered_empty(&self) -> bool {
        self.upstream_count > 0 && self.trips.is_empty()
    }
}

/// Result of a run.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Schedule {
    pub outbound: DirectionSchedule,
    /// Present only when return trips were requested.
    pub inbound: Option<DirectionSchedule>,
    pub order: TripOrder,
}

impl Schedule {
    /// All directions, outbound first.
    pub fn directions(&self) -> impl Iterator<Item = &DirectionSchedule> {
        std::iter::once(&self.outbound).chain(self.inbound.as_ref())
    }
}

/// Drives a single refresh against a pair of collaborators.
pub struct TripPipeline<'a, R: StationResolver, S: TripSource> {
    resolver: &'a R,
    source: &'a S,
}

impl<'a, R: StationResolver, S: TripSource> TripPipeline<'a, R, S> {
    pub fn new(resolver: &'a R, source: &'a S) -> Self {
        Self { resolver, source }
    }

    /// Run the pipeline for `request`, searching from shortly before `now`.
    pub async fn run(
        &self,
        request: &TripRequest,
        now: NaiveDateTime,
    ) -> Result<Schedule, PipelineError> {
        let criteria = &request.criteria;

        let (departure, arrival) = join(
            self.resolver.resolve(&request.departure),
            self.resolver.resolve(&request.arrival),
        )
        .await;

        let departure = departure?.ok_or_else(|| PipelineError::StationNotFound {
            name: request.departure.clone(),
        })?;
        let arrival = arrival?.ok_or_else(|| PipelineError::StationNotFound {
            name: request.arrival.clone(),
        })?;

        debug!(
            departure = %departure.id,
            arrival = %arrival.id,
            "Resolved stations"
        );

        let query = TripQuery::new(
            departure.id,
            arrival.id,
            criteria.travel_mode,
            criteria.page_limit,
            QueryStart::from_now(now),
        );

        let outbound = self.source.fetch_trips(&query).await?;
        let outbound_count = outbound.len();

        let schedule = if criteria.show_return_trips {
            let inbound = self.source.fetch_trips(&query.reversed()).await?;
            let inbound_count = inbound.len();
            let view = select_round_trip(outbound, inbound, criteria);

            Schedule {
                inbound: Some(DirectionSchedule {
                    from: arrival.clone(),
                    to: departure.clone(),
                    trips: view.inbound,
                    upstream_count: inbound_count,
                }),
                outbound: DirectionSchedule {
                    from: departure,
                    to: arrival,
                    trips: view.outbound,
                    upstream_count: outbound_count,
                },
                order: criteria.order,
            }
        } else {
            Schedule {
                outbound: DirectionSchedule {
                    from: departure,
                    to: arrival,
                    trips: select_categorized(outbound, criteria),
                    upstream_count: outbound_count,
                },
                inbound: None,
                order: criteria.order,
            }
        };

        info!(
            from = %schedule.outbound.from.name,
            to = %schedule.outbound.to.name,
            upstream = outbound_count,
            shown = schedule.outbound.trips.len(),
            return_trips = schedule.inbound.is_some(),
            "Schedule ready"
        );

        Ok(schedule)
    }
}
