//! Domain types for the transit widget.
//!
//! This module contains the core domain model types that represent
//! validated trip planner data. All types enforce their invariants at
//! construction time, so code that receives these types can trust their
//! validity.

mod error;
mod mode;
mod station;
mod time;
mod trip;

pub use error::DomainError;
pub use mode::{InvalidTravelMode, TransitKind, TravelMode};
pub use station::{InvalidStationId, Station, StationId};
pub use time::{GRACE_PERIOD_MINS, QueryStart, TimeError, parse_timestamp};
pub use trip::{Trip, TripDisplay, TripKind, TripSegment};
