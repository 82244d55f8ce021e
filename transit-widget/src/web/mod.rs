//! Web layer for the transit widget.
//!
//! Provides HTTP endpoints for managing widget configurations and
//! fetching their schedules.

mod dto;
mod routes;
mod state;

pub use dto::*;
pub use routes::{AppError, build_schedule, create_router};
pub use state::AppState;
