//! Selection criteria for the trip ranker.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::domain::TravelMode;
use crate::widget::WidgetConfig;

/// Direct trips shown per direction when both directions are displayed.
pub const RETURN_TRIP_DIRECT_LIMIT: usize = 2;

/// Trips requested from the planner when nothing else is configured.
pub const DEFAULT_PAGE_LIMIT: u32 = 6;

/// Transfer trips shown when both categories share one pool of slots.
pub const SHARED_SLOT_TRANSFER_LIMIT: usize = 1;

/// How selected trips are ordered for display.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum TripOrder {
    /// One list: direct trips before transfer trips, each by departure.
    DirectFirst,
    /// Direct and transfer trips as separate lists, direct first.
    #[default]
    Categorized,
    /// One list by departure time alone.
    Chronological,
}

/// Widget family, which bounds how many trips fit on screen.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum WidgetSize {
    Small,
    #[default]
    Medium,
    Large,
}

/// Per-category trip caps for one widget size.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct DisplayBudget {
    pub direct: usize,
    pub transfer: usize,
}

impl WidgetSize {
    /// Largest number of trips of each category the widget can show.
    pub fn budget(&self) -> DisplayBudget {
        match self {
            WidgetSize::Large => DisplayBudget {
                direct: 3,
                transfer: 1,
            },
            WidgetSize::Medium | WidgetSize::Small => DisplayBudget {
                direct: 2,
                transfer: 0,
            },
        }
    }

    /// Rows available when direct and transfer trips share one pool.
    pub fn slots(&self) -> usize {
        match self {
            WidgetSize::Large | WidgetSize::Medium => 4,
            WidgetSize::Small => 2,
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            WidgetSize::Small => "small",
            WidgetSize::Medium => "medium",
            WidgetSize::Large => "large",
        }
    }
}

/// Error returned when parsing an unknown widget size.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("unknown widget size: {0:?} (expected small, medium or large)")]
pub struct InvalidWidgetSize(String);

impl FromStr for WidgetSize {
    type Err = InvalidWidgetSize;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "small" => Ok(WidgetSize::Small),
            "medium" => Ok(WidgetSize::Medium),
            "large" => Ok(WidgetSize::Large),
            _ => Err(InvalidWidgetSize(s.to_string())),
        }
    }
}

impl fmt::Display for WidgetSize {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Parameters controlling which trips are fetched and shown.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SelectionCriteria {
    /// Mode filter passed to the planner.
    pub travel_mode: TravelMode,

    /// Keep trips that need a transfer.
    pub allow_transfers: bool,

    /// Direct trips budget before any display cap.
    pub max_direct: usize,

    /// Transfer trips budget before any display cap.
    pub max_transfer: usize,

    /// What the widget can physically show. Applied after the hidden
    /// transfer adjustment, so that adjustment works on `max_direct`.
    pub display_cap: Option<DisplayBudget>,

    /// Also fetch and show trips in the reverse direction.
    pub show_return_trips: bool,

    /// Display ordering.
    pub order: TripOrder,

    /// Total slots shared by both categories. Transfer trips are reserved
    /// first and direct trips fill what is left.
    pub total_slots: Option<usize>,

    /// Trips requested from the planner per direction.
    pub page_limit: u32,
}

impl SelectionCriteria {
    /// Criteria that never truncate.
    pub fn unbounded() -> Self {
        Self {
            max_direct: usize::MAX,
            max_transfer: usize::MAX,
            ..Self::default()
        }
    }

    pub fn with_order(mut self, order: TripOrder) -> Self {
        self.order = order;
        self
    }

    pub fn with_transfers(mut self, allow: bool) -> Self {
        self.allow_transfers = allow;
        self
    }

    pub fn with_limits(mut self, max_direct: usize, max_transfer: usize) -> Self {
        self.max_direct = max_direct;
        self.max_transfer = max_transfer;
        self
    }

    pub fn with_return_trips(mut self, show: bool) -> Self {
        self.show_return_trips = show;
        self
    }

    pub fn with_total_slots(mut self, total: usize) -> Self {
        self.total_slots = Some(total);
        self
    }

    pub fn with_display_cap(mut self, cap: DisplayBudget) -> Self {
        self.display_cap = Some(cap);
        self
    }

    pub fn with_travel_mode(mut self, mode: TravelMode) -> Self {
        self.travel_mode = mode;
        self
    }

    pub fn with_page_limit(mut self, limit: u32) -> Self {
        self.page_limit = limit;
        self
    }

    /// Criteria for rendering a configured widget at `size`.
    ///
    /// Both category budgets start at the page limit. The widget size caps
    /// them at display time. With `totalSlots` set, the size's slot pool is
    /// shared instead: one transfer first, then direct trips.
    pub fn for_widget(config: &WidgetConfig, size: WidgetSize) -> Self {
        let limit = config.page_limit as usize;

        let criteria = Self::default()
            .with_travel_mode(config.travel_mode)
            .with_transfers(config.show_transfers)
            .with_return_trips(config.show_return_trips)
            .with_order(config.ordering.unwrap_or_default())
            .with_page_limit(config.page_limit)
            .with_limits(limit, limit);

        match config.total_slots {
            Some(total) => {
                let slots = size.slots();
                criteria
                    .with_total_slots(total.min(slots))
                    .with_display_cap(DisplayBudget {
                        direct: slots,
                        transfer: SHARED_SLOT_TRANSFER_LIMIT,
                    })
            }
            None => criteria.capped_to(size),
        }
    }

    /// Cap the per-category limits to what a widget size can show.
    pub fn capped_to(self, size: WidgetSize) -> Self {
        self.with_display_cap(size.budget())
    }

    /// Direct trips allowed after the display cap.
    pub fn direct_limit(&self) -> usize {
        self.cap_direct(self.max_direct)
    }

    /// Transfer trips allowed after the display cap.
    pub fn transfer_limit(&self) -> usize {
        self.display_cap
            .map_or(self.max_transfer, |cap| self.max_transfer.min(cap.transfer))
    }

    /// Clamp a direct budget to the display cap.
    pub fn cap_direct(&self, budget: usize) -> usize {
        self.display_cap.map_or(budget, |cap| budget.min(cap.direct))
    }
}

impl Default for SelectionCriteria {
    fn default() -> Self {
        Self {
            travel_mode: TravelMode::All,
            allow_transfers: true,
            max_direct: DEFAULT_PAGE_LIMIT as usize,
            max_transfer: DEFAULT_PAGE_LIMIT as usize,
            display_cap: None,
            show_return_trips: false,
            order: TripOrder::Categorized,
            total_slots: None,
            page_limit: DEFAULT_PAGE_LIMIT,
        }
    }
}
