//! Widget identifier.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

const MAX_LEN: usize = 64;

/// Error returned when parsing an invalid widget identifier.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("invalid widget id {input:?}: {reason}")]
pub struct InvalidWidgetId {
    input: String,
    reason: &'static str,
}

/// Name of one widget instance, used to pick its configuration document.
///
/// Only ASCII letters, digits, `-` and `_` are allowed, so an id can be
/// embedded in a file name without escaping the config directory.
///
/// # Examples
///
/// ```
/// use transit_widget::widget::WidgetId;
///
/// let id = WidgetId::parse("work").unwrap();
/// assert_eq!(id.as_str(), "work");
///
/// assert!(WidgetId::parse("").is_err());
/// assert!(WidgetId::parse("../etc").is_err());
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct WidgetId(String);

impl WidgetId {
    /// Parse and validate an identifier.
    pub fn parse(s: &str) -> Result<Self, InvalidWidgetId> {
        let invalid = |reason| InvalidWidgetId {
            input: s.to_string(),
            reason,
        };

        if s.is_empty() {
            return Err(invalid("must not be empty"));
        }

        if s.len() > MAX_LEN {
            return Err(invalid("must be at most 64 characters"));
        }

        if !s
            .bytes()
            .all(|b| b.is_ascii_alphanumeric() || b == b'-' || b == b'_')
        {
            return Err(invalid("only letters, digits, '-' and '_' are allowed"));
        }

        Ok(Self(s.to_string()))
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl FromStr for WidgetId {
    type Err = InvalidWidgetId;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::parse(s)
    }
}

impl TryFrom<String> for WidgetId {
    type Error = InvalidWidgetId;

    fn try_from(s: String) -> Result<Self, Self::Error> {
        Self::parse(&s)
    }
}

impl From<WidgetId> for String {
    fn from(id: WidgetId) -> Self {
        id.0
    }
}

impl fmt::Display for WidgetId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}


#[cfg(test)]
mod proptests {
    use super::*;
    use proptest::prelude::*;

    proptest! {
        #[test]
        fn valid_pattern_always_parses(s in "[A-Za-z0-9_-]{1,64}") {
            let id = WidgetId::parse(&s).unwrap();
            prop_assert_eq!(id.as_str(), s.as_str());
        }

        #[test]
        fn parsed_ids_never_contain_separators(s in "\\PC{0,80}") {
            if let Ok(id) = WidgetId::parse(&s) {
                prop_assert!(!id.as_str().contains('/'));
                prop_assert!(!id.as_str().contains('.'));
                prop_assert!(id.as_str().len() <= 64);
            }
        }
    }
}
