//! Data transfer objects for web requests and responses.

use chrono::NaiveDateTime;
use serde::{Deserialize, Serialize};

use crate::domain::{Station, StationId, TransitKind, Trip, TripKind, TripSegment};
use crate::pipeline::{DirectionSchedule, Schedule};
use crate::selection::{TripOrder, WidgetSize};
use crate::widget::{ConfigSource, LoadedConfig, WidgetConfig, WidgetId};

/// Query for the schedule endpoint.
#[derive(Debug, Default, Deserialize)]
pub struct ScheduleQuery {
    /// Widget family: small, medium or large (defaults to medium)
    pub size: Option<String>,
}

/// Query for creating a configuration.
#[derive(Debug, Default, Deserialize)]
pub struct CreateConfigQuery {
    #[serde(default)]
    pub overwrite: bool,
}

/// A widget configuration and where it came from.
#[derive(Debug, Serialize)]
pub struct WidgetConfigResponse {
    pub id: WidgetId,
    pub source: ConfigSource,
    pub config: WidgetConfig,
}

impl WidgetConfigResponse {
    pub fn new(id: WidgetId, loaded: LoadedConfig) -> Self {
        Self {
            id,
            source: loaded.source,
            config: loaded.config,
        }
    }
}

/// A resolved station.
#[derive(Debug, Serialize)]
pub struct StationResult {
    pub name: String,
    pub id: StationId,
}

impl From<&Station> for StationResult {
    fn from(station: &Station) -> Self {
        Self {
            name: station.name.clone(),
            id: station.id,
        }
    }
}

/// One ridden segment.
#[derive(Debug, Serialize)]
pub struct SegmentResult {
    pub mode: TransitKind,
    pub line: String,
    pub trip_number: String,
    pub from: String,
    pub to: String,
    /// HH:MM
    pub departure_time: String,
    /// HH:MM
    pub arrival_time: String,
}

impl From<&TripSegment> for SegmentResult {
    fn from(segment: &TripSegment) -> Self {
        Self {
            mode: segment.mode,
            line: segment.line_number.clone(),
            trip_number: segment.trip_number.clone(),
            from: segment.departure_stop.clone(),
            to: segment.arrival_stop.clone(),
            departure_time: segment.departure_time.format("%H:%M").to_string(),
            arrival_time: segment.arrival_time.format("%H:%M").to_string(),
        }
    }
}

/// One trip as shown in the widget.
#[derive(Debug, Serialize)]
pub struct TripResult {
    /// "direct" or "transfer"
    pub kind: &'static str,

    /// Departure time as the planner formats it
    pub departure: String,

    pub arrival: String,

    pub duration: String,

    /// Machine-readable departure (ISO 8601, local time)
    pub departs_at: String,

    pub transfers: usize,

    pub segments: Vec<SegmentResult>,
}

impl From<&Trip> for TripResult {
    fn from(trip: &Trip) -> Self {
        let display = trip.display();
        Self {
            kind: match trip.kind() {
                TripKind::Direct => "direct",
                TripKind::Transfer => "transfer",
            },
            departure: display.departure.clone(),
            arrival: display.arrival.clone(),
            duration: display.duration.clone(),
            departs_at: trip.departs_at().format("%Y-%m-%dT%H:%M:%S").to_string(),
            transfers: trip.transfer_count(),
            segments: trip.segments().iter().map(SegmentResult::from).collect(),
        }
    }
}

/// Outcome for one direction.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum DirectionStatus {
    /// At least one trip to show
    Ok,
    /// The planner returned nothing
    NoTrips,
    /// The planner returned trips but none survived selection
    Filtered,
}

/// Selected trips for one direction.
#[derive(Debug, Serialize)]
pub struct DirectionResult {
    pub from: StationResult,
    pub to: StationResult,
    pub status: DirectionStatus,

    /// Trips the planner returned before filtering
    pub upstream_count: usize,

    /// All shown trips in display order
    pub trips: Vec<TripResult>,

    /// Direct trips only, for category headers
    pub direct: Vec<TripResult>,

    /// Transfer trips only, for category headers
    pub transfer: Vec<TripResult>,
}

impl From<&DirectionSchedule> for DirectionResult {
    fn from(direction: &DirectionSchedule) -> Self {
        let status = if direction.is_upstream_empty() {
            DirectionStatus::NoTrips
        } else if direction.is_filtered_empty() {
            DirectionStatus::Filtered
        } else {
            DirectionStatus::Ok
        };

        Self {
            from: StationResult::from(&direction.from),
            to: StationResult::from(&direction.to),
            status,
            upstream_count: direction.upstream_count,
            trips: direction
                .trips
                .clone()
                .into_trips()
                .iter()
                .map(TripResult::from)
                .collect(),
            direct: direction.trips.direct.iter().map(TripResult::from).collect(),
            transfer: direction.trips.transfer.iter().map(TripResult::from).collect(),
        }
    }
}

/// Response for the schedule endpoint.
#[derive(Debug, Serialize)]
pub struct ScheduleResponse {
    pub widget: WidgetId,
    pub size: WidgetSize,
    pub order: TripOrder,
    pub config_source: ConfigSource,
    /// When the schedule was computed (ISO 8601, local time)
    pub generated_at: String,
    pub outbound: DirectionResult,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub inbound: Option<DirectionResult>,
}

impl ScheduleResponse {
    pub fn new(
        widget: WidgetId,
        size: WidgetSize,
        config_source: ConfigSource,
        schedule: &Schedule,
        generated_at: NaiveDateTime,
    ) -> Self {
        Self {
            widget,
            size,
            order: schedule.order,
            config_source,
            generated_at: generated_at.format("%Y-%m-%dT%H:%M:%S").to_string(),
            outbound: DirectionResult::from(&schedule.outbound),
            inbound: schedule.inbound.as_ref().map(DirectionResult::from),
        }
    }
}

/// Error response body.
#[derive(Debug, Serialize)]
pub struct ErrorResponse {
    pub error: String,
    /// Stable machine-readable category
    pub kind: &'static str,
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::TripDisplay;
    use crate::selection::{SelectionCriteria, select_categorized};
    use chrono::{Duration, NaiveDate};

    fn time(h: u32, m: u32) -> NaiveDateTime {
        NaiveDate::from_ymd_opt(2025, 4, 21)
            .unwrap()
            .and_hms_opt(h, m, 0)
            .unwrap()
    }

    fn segment(line: &str, dep: NaiveDateTime) -> TripSegment {
        TripSegment {
            mode: TransitKind::Train,
            line_number: line.into(),
            trip_number: "5810".into(),
            departure_stop: "Union Station GO".into(),
            arrival_stop: "Unionville GO".into(),
            departure_time: dep,
            arrival_time: dep + Duration::minutes(38),
        }
    }

    fn direct(h: u32, m: u32) -> Trip {
        let display = TripDisplay {
            departure: format!("{h}:{m:02} AM"),
            arrival: "later".into(),
            duration: "00:38".into(),
        };
        Trip::new(vec![segment("ST", time(h, m))], display, time(h, m)).unwrap()
    }

    fn transfer(h: u32, m: u32) -> Trip {
        let first = segment("ST", time(h, m));
        let second = TripSegment {
            mode: TransitKind::Bus,
            ..segment("71", first.arrival_time + Duration::minutes(5))
        };
        Trip::new(vec![first, second], TripDisplay::default(), time(h, m)).unwrap()
    }

    fn station(name: &str, id: u64) -> Station {
        Station::new(name, StationId::new(id))
    }

    fn direction(trips: Vec<Trip>, criteria: &SelectionCriteria) -> DirectionSchedule {
        DirectionSchedule {
            from: station("Union Station GO", 36888),
            to: station("Unionville GO", 75749),
            upstream_count: trips.len(),
            trips: select_categorized(trips, criteria),
        }
    }

    #[test]
    fn trip_result_from_transfer() {
        let result = TripResult::from(&transfer(9, 5));

        assert_eq!(result.kind, "transfer");
        assert_eq!(result.transfers, 1);
        assert_eq!(result.departs_at, "2025-04-21T09:05:00");
        assert_eq!(result.segments.len(), 2);
        assert_eq!(result.segments[0].departure_time, "09:05");
        assert_eq!(result.segments[0].arrival_time, "09:43");
        assert_eq!(result.segments[1].line, "71");
        assert_eq!(result.segments[1].mode, TransitKind::Bus);
    }

    #[test]
    fn direction_status() {
        let criteria = SelectionCriteria::default().with_transfers(false);

        let ok = DirectionResult::from(&direction(vec![direct(9, 10)], &criteria));
        assert_eq!(ok.status, DirectionStatus::Ok);

        let empty = DirectionResult::from(&direction(vec![], &criteria));
        assert_eq!(empty.status, DirectionStatus::NoTrips);

        let filtered = DirectionResult::from(&direction(vec![transfer(9, 5)], &criteria));
        assert_eq!(filtered.status, DirectionStatus::Filtered);
        assert_eq!(filtered.upstream_count, 1);
    }

    #[test]
    fn direction_lists_categories_and_flat_order() {
        let criteria = SelectionCriteria::default().with_order(TripOrder::Chronological);
        let result = DirectionResult::from(&direction(
            vec![direct(9, 10), transfer(9, 5), direct(9, 20)],
            &criteria,
        ));

        let kinds: Vec<_> = result.trips.iter().map(|t| t.kind).collect();
        assert_eq!(kinds, vec!["transfer", "direct", "direct"]);
        assert_eq!(result.direct.len(), 2);
        assert_eq!(result.transfer.len(), 1);
    }

    #[test]
    fn schedule_response_json_shape() {
        let criteria = SelectionCriteria::default();
        let schedule = Schedule {
            outbound: direction(vec![direct(9, 10)], &criteria),
            inbound: None,
            order: TripOrder::Categorized,
        };

        let response = ScheduleResponse::new(
            WidgetId::parse("work").unwrap(),
            WidgetSize::Large,
            ConfigSource::Default,
            &schedule,
            time(9, 0),
        );
        let json = serde_json::to_value(&response).unwrap();

        assert_eq!(json["widget"], "work");
        assert_eq!(json["size"], "large");
        assert_eq!(json["order"], "categorized");
        assert_eq!(json["config_source"], "default");
        assert_eq!(json["generated_at"], "2025-04-21T09:00:00");
        assert_eq!(json["outbound"]["status"], "ok");
        assert_eq!(json["outbound"]["from"]["id"], 36888);
        assert_eq!(json["outbound"]["trips"][0]["departure"], "9:10 AM");
        assert_eq!(json["outbound"]["trips"][0]["segments"][0]["mode"], "train");
        assert!(json.get("inbound").is_none());
    }
}
