//! Trip planner client.
//!
//! This module provides an HTTP client for the transit agency's trip
//! planner, which returns itineraries between two trip points.
//!
//! Key characteristics of the planner:
//! - Stations are addressed by numeric trip point id, never by name
//! - Searches start at a minute-granularity local time (`YYYY-MM-DD_HH-mm`)
//! - A search with no results may omit the `Trips` object entirely

mod client;
mod convert;
mod error;
mod types;

pub use client::{TripPlannerClient, TripPlannerConfig, TripQuery};
pub use convert::{ConversionError, convert_trip_item, convert_trip_search};
pub use error::TripPlannerError;
pub use types::{SectionDetail, SectionDetails, TripItem, TripList, TripSearchResponse};
