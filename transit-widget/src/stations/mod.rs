//! Station search index client.
//!
//! Resolves human-readable station names to the trip point identifiers
//! the trip planner requires. Lookups are made on every run; there is no
//! local cache.

mod client;
mod error;
mod types;

pub use client::{StationClient, StationClientConfig};
pub use error::StationError;
pub use types::{MultiQueryResponse, RawTripPointId, TripPointHit};
