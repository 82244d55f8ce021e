//! Conversion from trip planner DTOs to domain types.
//!
//! Invalid records are skipped rather than failing the whole response:
//! one malformed itinerary should not blank the widget.

use chrono::NaiveDateTime;
use tracing::warn;

use crate::domain::{
    DomainError, TimeError, TransitKind, Trip, TripDisplay, TripSegment, parse_timestamp,
};

use super::types::{SectionDetail, TripItem, TripSearchResponse};

/// Error during DTO to domain conversion.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum ConversionError {
    /// Missing required field
    #[error("missing required field: {0}")]
    MissingField(&'static str),

    /// Failed to parse a timestamp
    #[error(transparent)]
    InvalidTime(#[from] TimeError),

    /// Record violates trip invariants
    #[error("invalid trip: {0}")]
    InvalidTrip(#[from] DomainError),
}

/// Convert a search response to trips, in upstream order.
pub fn convert_trip_search(response: &TripSearchResponse) -> Vec<Trip> {
    let items = response.items();
    let mut trips = Vec::with_capacity(items.len());

    for (index, item) in items.iter().enumerate() {
        match convert_trip_item(item) {
            Ok(trip) => trips.push(trip),
            Err(e) => {
                warn!(index, error = %e, "Skipping invalid trip record");
            }
        }
    }

    trips
}

/// Convert a single trip record.
pub fn convert_trip_item(item: &TripItem) -> Result<Trip, ConversionError> {
    let segments = item
        .sections()
        .iter()
        .map(convert_section)
        .collect::<Result<Vec<_>, _>>()?;

    let first = segments.first().ok_or(DomainError::EmptyTrip)?;
    let last = &segments[segments.len() - 1];

    let departs_at = match item.departure_date_time.as_deref() {
        Some(s) => parse_timestamp(s)?,
        None => first.departure_time,
    };

    let display = TripDisplay {
        departure: item
            .departure_time_display
            .clone()
            .unwrap_or_else(|| clock(departs_at)),
        arrival: item
            .arrival_time_display
            .clone()
            .unwrap_or_else(|| clock(last.arrival_time)),
        duration: item
            .duration
            .clone()
            .unwrap_or_else(|| elapsed(departs_at, last.arrival_time)),
    };

    Ok(Trip::new(segments, display, departs_at)?)
}

fn convert_section(section: &SectionDetail) -> Result<TripSegment, ConversionError> {
    let departure_time = section
        .departure_time
        .as_deref()
        .ok_or(ConversionError::MissingField("DepartureTime"))?;
    let arrival_time = section
        .arrival_time
        .as_deref()
        .ok_or(ConversionError::MissingField("ArrivalTime"))?;

    Ok(TripSegment {
        mode: TransitKind::from_code(section.transit_type.unwrap_or_default()),
        line_number: section.line_number.clone().unwrap_or_default(),
        trip_number: section.trip_number.clone().unwrap_or_default(),
        departure_stop: section.departure_stop_name.clone().unwrap_or_default(),
        arrival_stop: section.arrival_stop_name.clone().unwrap_or_default(),
        departure_time: parse_timestamp(departure_time)?,
        arrival_time: parse_timestamp(arrival_time)?,
    })
}

fn clock(t: NaiveDateTime) -> String {
    t.format("%H:%M").to_string()
}

fn elapsed(from: NaiveDateTime, to: NaiveDateTime) -> String {
    let mins = (to - from).num_minutes().max(0);
    format!("{:02}:{:02}", mins / 60, mins % 60)
}
