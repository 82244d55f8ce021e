//! Trip planner response DTOs.
//!
//! These types map directly to the planner's JSON. Field casing is mixed
//! (PascalCase records wrapped in camelCase containers) and almost every
//! field may be absent, so nearly everything is optional here and
//! validation happens during conversion.

use serde::{Deserialize, Deserializer};

/// Response from the trip search endpoint.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct TripSearchResponse {
    /// Absent when the planner found nothing.
    #[serde(rename = "Trips")]
    pub trips: Option<TripList>,
}

/// Container for trip records.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct TripList {
    pub items: Option<Vec<TripItem>>,
}

/// One itinerary.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "PascalCase")]
pub struct TripItem {
    /// Departure time pre-formatted for display (e.g. "9:10 AM").
    #[serde(default, deserialize_with = "lenient_string")]
    pub departure_time_display: Option<String>,

    #[serde(default, deserialize_with = "lenient_string")]
    pub arrival_time_display: Option<String>,

    /// Travel time pre-formatted for display (e.g. "00:38").
    #[serde(default, deserialize_with = "lenient_string")]
    pub duration: Option<String>,

    /// Machine-readable departure timestamp.
    #[serde(default, deserialize_with = "lenient_string")]
    pub departure_date_time: Option<String>,

    #[serde(rename = "sectionDetails")]
    pub section_details: Option<SectionDetails>,
}

/// Wrapper around the segment list.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct SectionDetails {
    #[serde(rename = "SectionDetail")]
    pub section_detail: Option<Vec<SectionDetail>>,
}

/// One ridden segment.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "PascalCase")]
pub struct SectionDetail {
    /// 1 for rail, anything else for bus.
    pub transit_type: Option<i64>,

    #[serde(default, deserialize_with = "lenient_string")]
    pub line_number: Option<String>,

    #[serde(default, deserialize_with = "lenient_string")]
    pub trip_number: Option<String>,

    #[serde(default, deserialize_with = "lenient_string")]
    pub departure_stop_name: Option<String>,

    #[serde(default, deserialize_with = "lenient_string")]
    pub arrival_stop_name: Option<String>,

    /// "YYYY-MM-DD HH:MM"
    #[serde(default, deserialize_with = "lenient_string")]
    pub departure_time: Option<String>,

    #[serde(default, deserialize_with = "lenient_string")]
    pub arrival_time: Option<String>,
}

impl TripSearchResponse {
    /// Trip records, empty when the planner returned none.
    pub fn items(&self) -> &[TripItem] {
        self.trips
            .as_ref()
            .and_then(|t| t.items.as_deref())
            .unwrap_or(&[])
    }
}

impl TripItem {
    /// Segment records, empty when absent.
    pub fn sections(&self) -> &[SectionDetail] {
        self.section_details
            .as_ref()
            .and_then(|s| s.section_detail.as_deref())
            .unwrap_or(&[])
    }
}

/// Accept strings or numbers; line and trip numbers flip between the two.
fn lenient_string<'de, D>(deserializer: D) -> Result<Option<String>, D::Error>
where
    D: Deserializer<'de>,
{
    #[derive(Deserialize)]
    #[serde(untagged)]
    enum Raw {
        Text(String),
        Int(i64),
        Float(f64),
        Flag(bool),
    }

    Ok(Option::<Raw>::deserialize(deserializer)?.map(|raw| match raw {
        Raw::Text(s) => s,
        Raw::Int(n) => n.to_string(),
        Raw::Float(n) => n.to_string(),
        Raw::Flag(b) => b.to_string(),
    }))
}
