//! Station identifier types.

use std::fmt;
use std::str::FromStr;

use serde::Serialize;

/// Error returned when parsing an invalid station identifier.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("invalid station id: {reason}")]
pub struct InvalidStationId {
    reason: &'static str,
}

/// Opaque numeric key for a trip point, as issued by the station lookup.
///
/// The trip planner only accepts these identifiers, never display names.
///
/// # Examples
///
/// ```
/// use transit_widget::domain::StationId;
///
/// let id = StationId::parse("36888").unwrap();
/// assert_eq!(id.value(), 36888);
///
/// assert!(StationId::parse("").is_err());
/// assert!(StationId::parse("UN").is_err());
/// ```
#[derive(Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize)]
#[serde(transparent)]
pub struct StationId(u64);

impl StationId {
    /// Wrap a raw identifier.
    pub fn new(value: u64) -> Self {
        Self(value)
    }

    /// Parse an identifier from its decimal string form.
    ///
    /// Surrounding whitespace is ignored; anything else must be ASCII digits.
    pub fn parse(s: &str) -> Result<Self, InvalidStationId> {
        let s = s.trim();

        if s.is_empty() {
            return Err(InvalidStationId {
                reason: "must not be empty",
            });
        }

        if !s.bytes().all(|b| b.is_ascii_digit()) {
            return Err(InvalidStationId {
                reason: "must be decimal digits",
            });
        }

        s.parse::<u64>().map(Self).map_err(|_| InvalidStationId {
            reason: "out of range",
        })
    }

    /// Returns the raw identifier.
    pub fn value(&self) -> u64 {
        self.0
    }
}

impl FromStr for StationId {
    type Err = InvalidStationId;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::parse(s)
    }
}

impl fmt::Debug for StationId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "StationId({})", self.0)
    }
}

impl fmt::Display for StationId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// A station name paired with its resolved identifier.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Station {
    /// Name as the user configured it.
    pub name: String,
    /// Identifier returned by the lookup.
    pub id: StationId,
}

impl Station {
    pub fn new(name: impl Into<String>, id: StationId) -> Self {
        Self {
            name: name.into(),
            id,
        }
    }
}
