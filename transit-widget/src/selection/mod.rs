//! Trip selection: classify, filter, order and bound the fetched trips.

mod classify;
mod config;
mod rank;

pub use classify::{Classified, classify, filter_transfers, has_transfers};
pub use config::{
    DEFAULT_PAGE_LIMIT, DisplayBudget, InvalidWidgetSize, RETURN_TRIP_DIRECT_LIMIT,
    SHARED_SLOT_TRANSFER_LIMIT, SelectionCriteria, TripOrder, WidgetSize,
};
pub use rank::{
    RoundTripSelection, Selection, effective_direct_budget, rank_direct_first, select,
    select_categorized, select_round_trip, sort_by_departure,
};
