//! Trip ordering and truncation.
//!
//! Turns the unfiltered trips for one direction into the bounded list a
//! widget shows. Selection never fails; empty input gives empty output.

use crate::domain::Trip;

use super::classify::{classify, filter_transfers, has_transfers};
use super::config::{RETURN_TRIP_DIRECT_LIMIT, SelectionCriteria, TripOrder};

/// Sort trips by departure time, keeping upstream order for ties.
pub fn sort_by_departure(mut trips: Vec<Trip>) -> Vec<Trip> {
    trips.sort_by_key(Trip::departs_at);
    trips
}

/// Sort trips with every direct trip before every transfer trip, each
/// group by departure time.
pub fn rank_direct_first(mut trips: Vec<Trip>) -> Vec<Trip> {
    trips.sort_by_key(|trip| (trip.kind(), trip.departs_at()));
    trips
}

/// Number of direct trips to show.
///
/// When transfers are hidden but the planner offered one, a slot is given
/// up so the widget keeps room for its "transfers hidden" hint. This only
/// applies to single-direction views, and it comes out of the page-limit
/// budget before the widget's display cap.
pub fn effective_direct_budget(criteria: &SelectionCriteria, upstream_had_transfer: bool) -> usize {
    let budget = if !criteria.allow_transfers && upstream_had_transfer && !criteria.show_return_trips
    {
        criteria.max_direct.saturating_sub(1)
    } else {
        criteria.max_direct
    };

    criteria.cap_direct(budget)
}

/// Selected trips for one direction.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Selection {
    /// Direct trips, by departure.
    pub direct: Vec<Trip>,
    /// Transfer trips, by departure.
    pub transfer: Vec<Trip>,
    pub order: TripOrder,
}

impl Selection {
    /// Flatten into a single display list.
    pub fn into_trips(self) -> Vec<Trip> {
        match self.order {
            TripOrder::DirectFirst => {
                let mut trips = self.direct;
                trips.extend(self.transfer);
                rank_direct_first(trips)
            }
            TripOrder::Categorized => {
                let mut trips = self.direct;
                trips.extend(self.transfer);
                trips
            }
            TripOrder::Chronological => {
                let mut trips = self.direct;
                trips.extend(self.transfer);
                sort_by_departure(trips)
            }
        }
    }

    pub fn len(&self) -> usize {
        self.direct.len() + self.transfer.len()
    }

    pub fn is_empty(&self) -> bool {
        self.direct.is_empty() && self.transfer.is_empty()
    }
}

/// Select trips keeping the two categories apart.
pub fn select_categorized(trips: Vec<Trip>, criteria: &SelectionCriteria) -> Selection {
    let upstream_had_transfer = has_transfers(&trips);
    let budget = effective_direct_budget(criteria, upstream_had_transfer);

    bounded(trips, criteria, budget)
}

/// Select the trips to display, in display order.
pub fn select(trips: Vec<Trip>, criteria: &SelectionCriteria) -> Vec<Trip> {
    select_categorized(trips, criteria).into_trips()
}

/// Both directions of a return-trip view.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct RoundTripSelection {
    pub outbound: Selection,
    pub inbound: Selection,
}

/// Select outbound and inbound trips for a combined view.
///
/// Each direction shows at most two direct trips regardless of the
/// configured direct budget, and never gives up a slot for hidden
/// transfers.
pub fn select_round_trip(
    outbound: Vec<Trip>,
    inbound: Vec<Trip>,
    criteria: &SelectionCriteria,
) -> RoundTripSelection {
    RoundTripSelection {
        outbound: bounded(outbound, criteria, RETURN_TRIP_DIRECT_LIMIT),
        inbound: bounded(inbound, criteria, RETURN_TRIP_DIRECT_LIMIT),
    }
}

fn bounded(trips: Vec<Trip>, criteria: &SelectionCriteria, direct_budget: usize) -> Selection {
    let classified = classify(filter_transfers(trips, criteria.allow_transfers));

    let mut transfer = sort_by_departure(classified.transfer);
    let mut direct = sort_by_departure(classified.direct);

    let mut transfer_budget = criteria.transfer_limit();
    let mut direct_budget = direct_budget;

    // Shared slots go to transfers first
    if let Some(total) = criteria.total_slots {
        transfer_budget = transfer_budget.min(total);
        let kept = transfer.len().min(transfer_budget);
        direct_budget = direct_budget.min(total - kept);
    }

    transfer.truncate(transfer_budget);
    direct.truncate(direct_budget);

    Selection {
        direct,
        transfer,
        order: criteria.order,
    }
}
