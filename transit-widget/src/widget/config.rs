//! Widget configuration document.

use serde::{Deserialize, Deserializer, Serialize};

use crate::domain::TravelMode;
use crate::selection::{DEFAULT_PAGE_LIMIT, SelectionCriteria, TripOrder, WidgetSize};

use super::color::ColorScheme;

const DEFAULT_DEPARTURE: &str = "Union Station GO";
const DEFAULT_ARRIVAL: &str = "Unionville GO";

/// Everything one widget needs to render its schedule.
///
/// Field names follow the stored JSON documents. Any field may be missing
/// and takes its default.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct WidgetConfig {
    #[serde(default = "WidgetConfig::default_departure")]
    pub departure: String,

    #[serde(default = "WidgetConfig::default_arrival")]
    pub arrival: String,

    #[serde(default)]
    pub travel_mode: TravelMode,

    #[serde(default = "WidgetConfig::default_show_transfers")]
    pub show_transfers: bool,

    #[serde(default)]
    pub show_return_trips: bool,

    /// Trips requested per direction. Zero means unset.
    #[serde(default = "WidgetConfig::default_page_limit", deserialize_with = "page_limit")]
    pub page_limit: u32,

    #[serde(default)]
    pub colors: ColorScheme,

    /// Line the departure station was picked from.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub departure_line: Option<String>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub arrival_line: Option<String>,

    /// Free-form route label shown in the header.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub route_type: Option<String>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub ordering: Option<TripOrder>,

    /// Share this many rows between direct and transfer trips instead of
    /// the per-category caps. Clamped to the widget's slot pool.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub total_slots: Option<usize>,
}

impl WidgetConfig {
    fn default_departure() -> String {
        DEFAULT_DEPARTURE.to_string()
    }

    fn default_arrival() -> String {
        DEFAULT_ARRIVAL.to_string()
    }

    fn default_show_transfers() -> bool {
        true
    }

    fn default_page_limit() -> u32 {
        DEFAULT_PAGE_LIMIT
    }

    /// Selection criteria for rendering this widget at `size`.
    pub fn criteria(&self, size: WidgetSize) -> SelectionCriteria {
        SelectionCriteria::for_widget(self, size)
    }
}

impl Default for WidgetConfig {
    fn default() -> Self {
        Self {
            departure: Self::default_departure(),
            arrival: Self::default_arrival(),
            travel_mode: TravelMode::All,
            show_transfers: Self::default_show_transfers(),
            show_return_trips: false,
            page_limit: Self::default_page_limit(),
            colors: ColorScheme::default(),
            departure_line: None,
            arrival_line: None,
            route_type: None,
            ordering: None,
            total_slots: None,
        }
    }
}

fn page_limit<'de, D>(deserializer: D) -> Result<u32, D::Error>
where
    D: Deserializer<'de>,
{
    Ok(Option::<u32>::deserialize(deserializer)?
        .filter(|&n| n > 0)
        .unwrap_or(DEFAULT_PAGE_LIMIT))
}
