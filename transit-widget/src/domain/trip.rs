//! Trip types.
//!
//! A `Trip` is one itinerary returned by the planner: one or more segments
//! ridden in order, plus the display strings the planner pre-formats for it.

use chrono::NaiveDateTime;

use super::{DomainError, TransitKind};

/// One leg of a trip on a single vehicle.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TripSegment {
    pub mode: TransitKind,
    /// Public line identifier (e.g. "ST").
    pub line_number: String,
    /// Vehicle run number within the line.
    pub trip_number: String,
    pub departure_stop: String,
    pub arrival_stop: String,
    pub departure_time: NaiveDateTime,
    pub arrival_time: NaiveDateTime,
}

/// Pre-formatted strings the planner supplies for display.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct TripDisplay {
    pub departure: String,
    pub arrival: String,
    pub duration: String,
}

/// Whether a trip needs a change of vehicle.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum TripKind {
    /// Exactly one segment.
    Direct,
    /// Two or more segments with a transfer between each.
    Transfer,
}

/// A complete itinerary from departure to arrival station.
///
/// # Invariants
///
/// - At least one segment
/// - Each segment departs no later than it arrives
/// - Segment `i` arrives no later than segment `i + 1` departs
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Trip {
    segments: Vec<TripSegment>,
    display: TripDisplay,
    departs_at: NaiveDateTime,
}

impl Trip {
    /// Constructs a trip, validating segment order.
    ///
    /// `departs_at` is the planner's machine-readable departure time, used
    /// for sorting. It is taken as given rather than derived from the first
    /// segment, since the planner may include a walk before boarding.
    ///
    /// # Examples
    ///
    /// ```
    /// use transit_widget::domain::{Trip, TripDisplay, TripSegment, TransitKind, parse_timestamp};
    ///
    /// let segment = TripSegment {
    ///     mode: TransitKind::Train,
    ///     line_number: "ST".into(),
    ///     trip_number: "5810".into(),
    ///     departure_stop: "Union Station GO".into(),
    ///     arrival_stop: "Unionville GO".into(),
    ///     departure_time: parse_timestamp("2025-04-21 09:10").unwrap(),
    ///     arrival_time: parse_timestamp("2025-04-21 09:48").unwrap(),
    /// };
    ///
    /// let trip = Trip::new(vec![segment], TripDisplay::default(), parse_timestamp("2025-04-21 09:10").unwrap()).unwrap();
    /// assert!(trip.is_direct());
    /// ```
    pub fn new(
        segments: Vec<TripSegment>,
        display: TripDisplay,
        departs_at: NaiveDateTime,
    ) -> Result<Self, DomainError> {
        if segments.is_empty() {
            return Err(DomainError::EmptyTrip);
        }

        for (index, segment) in segments.iter().enumerate() {
            if segment.arrival_time < segment.departure_time {
                return Err(DomainError::SegmentTimesReversed { index });
            }
        }

        for (prev, window) in segments.windows(2).enumerate() {
            if window[1].departure_time < window[0].arrival_time {
                return Err(DomainError::SegmentsOutOfOrder {
                    prev,
                    index: prev + 1,
                });
            }
        }

        Ok(Self {
            segments,
            display,
            departs_at,
        })
    }

    /// Returns all segments in travel order.
    pub fn segments(&self) -> &[TripSegment] {
        &self.segments
    }

    pub fn segment_count(&self) -> usize {
        self.segments.len()
    }

    /// Returns the number of transfers (segments - 1).
    pub fn transfer_count(&self) -> usize {
        self.segments.len().saturating_sub(1)
    }

    pub fn kind(&self) -> TripKind {
        if self.segments.len() == 1 {
            TripKind::Direct
        } else {
            TripKind::Transfer
        }
    }

    pub fn is_direct(&self) -> bool {
        self.kind() == TripKind::Direct
    }

    pub fn is_transfer(&self) -> bool {
        self.kind() == TripKind::Transfer
    }

    /// Departure timestamp used for ordering.
    pub fn departs_at(&self) -> NaiveDateTime {
        self.departs_at
    }

    /// Arrival time of the final segment.
    pub fn arrives_at(&self) -> NaiveDateTime {
        // Safe: validated non-empty at construction
        self.segments[self.segments.len() - 1].arrival_time
    }

    pub fn display(&self) -> &TripDisplay {
        &self.display
    }

    /// Returns the first segment.
    pub fn first_segment(&self) -> &TripSegment {
        &self.segments[0]
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::NaiveDate;

    fn time(h: u32, m: u32) -> NaiveDateTime {
        NaiveDate::from_ymd_opt(2025, 4, 21)
            .unwrap()
            .and_hms_opt(h, m, 0)
            .unwrap()
    }

    fn segment(from: &str, to: &str, dep: (u32, u32), arr: (u32, u32)) -> TripSegment {
        TripSegment {
            mode: TransitKind::Train,
            line_number: "ST".into(),
            trip_number: "100".into(),
            departure_stop: from.into(),
            arrival_stop: to.into(),
            departure_time: time(dep.0, dep.1),
            arrival_time: time(arr.0, arr.1),
        }
    }

    #[test]
    fn direct_trip() {
        let trip = Trip::new(
            vec![segment("Union", "Unionville", (9, 10), (9, 48))],
            TripDisplay::default(),
            time(9, 10),
        )
        .unwrap();

        assert_eq!(trip.kind(), TripKind::Direct);
        assert!(trip.is_direct());
        assert_eq!(trip.transfer_count(), 0);
        assert_eq!(trip.departs_at(), time(9, 10));
        assert_eq!(trip.arrives_at(), time(9, 48));
    }

    #[test]
    fn transfer_trip() {
        let trip = Trip::new(
            vec![
                segment("Union", "Kennedy", (9, 5), (9, 20)),
                segment("Kennedy", "Unionville", (9, 25), (9, 50)),
            ],
            TripDisplay::default(),
            time(9, 5),
        )
        .unwrap();

        assert_eq!(trip.kind(), TripKind::Transfer);
        assert!(trip.is_transfer());
        assert_eq!(trip.transfer_count(), 1);
        assert_eq!(trip.first_segment().arrival_stop, "Kennedy");
        assert_eq!(trip.arrives_at(), time(9, 50));
    }

    #[test]
    fn empty_trip_rejected() {
        let result = Trip::new(vec![], TripDisplay::default(), time(9, 0));
        assert_eq!(result.unwrap_err(), DomainError::EmptyTrip);
    }

    #[test]
    fn reversed_segment_rejected() {
        let result = Trip::new(
            vec![segment("Union", "Kennedy", (9, 30), (9, 20))],
            TripDisplay::default(),
            time(9, 30),
        );
        assert_eq!(
            result.unwrap_err(),
            DomainError::SegmentTimesReversed { index: 0 }
        );
    }

    #[test]
    fn overlapping_segments_rejected() {
        let result = Trip::new(
            vec![
                segment("Union", "Kennedy", (9, 5), (9, 20)),
                segment("Kennedy", "Unionville", (9, 15), (9, 50)),
            ],
            TripDisplay::default(),
            time(9, 5),
        );
        assert_eq!(
            result.unwrap_err(),
            DomainError::SegmentsOutOfOrder { prev: 0, index: 1 }
        );
    }

    #[test]
    fn same_minute_transfer_allowed() {
        let result = Trip::new(
            vec![
                segment("Union", "Kennedy", (9, 5), (9, 20)),
                segment("Kennedy", "Unionville", (9, 20), (9, 50)),
            ],
            TripDisplay::default(),
            time(9, 5),
        );
        assert!(result.is_ok());
    }

    #[test]
    fn kind_orders_direct_first() {
        assert!(TripKind::Direct < TripKind::Transfer);
    }
}
