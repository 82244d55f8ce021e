//! Travel mode types.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

/// Error returned when parsing an unknown travel mode.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("unknown travel mode: {0:?} (expected All, Train or Bus)")]
pub struct InvalidTravelMode(String);

/// Mode filter requested from the trip planner.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
pub enum TravelMode {
    /// No filter; the planner mixes trains and buses.
    #[default]
    All,
    Train,
    Bus,
}

impl TravelMode {
    /// Value for the planner's `PreferredTravelMode` parameter.
    ///
    /// `All` has no value: the parameter is omitted entirely.
    pub fn query_param(&self) -> Option<&'static str> {
        match self {
            TravelMode::All => None,
            TravelMode::Train => Some("Train"),
            TravelMode::Bus => Some("Bus"),
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            TravelMode::All => "All",
            TravelMode::Train => "Train",
            TravelMode::Bus => "Bus",
        }
    }
}

impl FromStr for TravelMode {
    type Err = InvalidTravelMode;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "all" => Ok(TravelMode::All),
            "train" => Ok(TravelMode::Train),
            "bus" => Ok(TravelMode::Bus),
            _ => Err(InvalidTravelMode(s.to_string())),
        }
    }
}

impl fmt::Display for TravelMode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Vehicle type of a single trip segment.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum TransitKind {
    Train,
    Bus,
}

impl TransitKind {
    /// Decode the planner's numeric `TransitType`: 1 is rail, everything else road.
    pub fn from_code(code: i64) -> Self {
        if code == 1 {
            TransitKind::Train
        } else {
            TransitKind::Bus
        }
    }
}
