//! Domain error types.
//!
//! These errors represent validation failures and data inconsistencies
//! in the domain layer. They are distinct from API/IO errors.

/// Domain-level errors for validation and data consistency.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum DomainError {
    /// Trip has no segments
    #[error("trip must have at least one segment")]
    EmptyTrip,

    /// A segment arrives after it departs
    #[error("segment {index} arrives before it departs")]
    SegmentTimesReversed { index: usize },

    /// Consecutive segments overlap in time
    #[error("segment {index} departs before segment {prev} arrives")]
    SegmentsOutOfOrder { prev: usize, index: usize },
}
