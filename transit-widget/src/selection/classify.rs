//! Direct/transfer classification.
//!
//! Classification is keyed solely on segment count; nothing else about a
//! trip affects which side of the partition it lands on.

use crate::domain::{Trip, TripKind};

/// Trips partitioned by kind, each side in input order.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Classified {
    pub direct: Vec<Trip>,
    pub transfer: Vec<Trip>,
}

impl Classified {
    pub fn len(&self) -> usize {
        self.direct.len() + self.transfer.len()
    }

    pub fn is_empty(&self) -> bool {
        self.direct.is_empty() && self.transfer.is_empty()
    }
}

/// Partition trips into direct and transfer, preserving relative order.
pub fn classify(trips: Vec<Trip>) -> Classified {
    let (direct, transfer) = trips
        .into_iter()
        .partition(|trip| trip.kind() == TripKind::Direct);

    Classified { direct, transfer }
}

/// Drop transfer trips unless they are allowed.
///
/// Must run before any count-based limit: callers that care whether the
/// upstream offered transfers should ask [`has_transfers`] first.
pub fn filter_transfers(trips: Vec<Trip>, allow_transfers: bool) -> Vec<Trip> {
    if allow_transfers {
        return trips;
    }

    trips.into_iter().filter(Trip::is_direct).collect()
}

/// Whether any trip needs a transfer.
pub fn has_transfers(trips: &[Trip]) -> bool {
    trips.iter().any(Trip::is_transfer)
}
