//! Widget colors.

use std::fmt;

use serde::{Deserialize, Serialize};

/// Error returned when parsing an invalid color.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("invalid color {0:?}: expected #RRGGBB")]
pub struct InvalidColor(String);

/// A `#RRGGBB` color, stored uppercase.
#[derive(Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct HexColor(String);

impl HexColor {
    pub fn parse(s: &str) -> Result<Self, InvalidColor> {
        let digits = s
            .strip_prefix('#')
            .ok_or_else(|| InvalidColor(s.to_string()))?;

        if digits.len() != 6 || !digits.bytes().all(|b| b.is_ascii_hexdigit()) {
            return Err(InvalidColor(s.to_string()));
        }

        Ok(Self(format!("#{}", digits.to_ascii_uppercase())))
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }

    /// Red, green and blue components.
    pub fn rgb(&self) -> (u8, u8, u8) {
        let channel = |i: usize| u8::from_str_radix(&self.0[i..i + 2], 16).unwrap_or_default();
        (channel(1), channel(3), channel(5))
    }

    /// Built-in constants are known to be valid.
    fn from_static(s: &'static str) -> Self {
        Self(s.to_string())
    }
}

impl TryFrom<String> for HexColor {
    type Error = InvalidColor;

    fn try_from(s: String) -> Result<Self, Self::Error> {
        Self::parse(&s)
    }
}

impl From<HexColor> for String {
    fn from(c: HexColor) -> Self {
        c.0
    }
}

impl fmt::Debug for HexColor {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "HexColor({})", self.0)
    }
}

impl fmt::Display for HexColor {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

/// Colors for each element of the widget.
///
/// Missing entries in a stored document fall back to the light preset.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct ColorScheme {
    pub title: HexColor,
    pub station_info: HexColor,
    pub time_text: HexColor,
    pub duration: HexColor,
    pub transfer_route: HexColor,
    pub direct_route: HexColor,
    pub station_details: HexColor,
    pub separator: HexColor,
}

impl ColorScheme {
    /// Dark text on a light background.
    pub fn light() -> Self {
        Self {
            title: HexColor::from_static("#000000"),
            station_info: HexColor::from_static("#0066CC"),
            time_text: HexColor::from_static("#333333"),
            duration: HexColor::from_static("#666666"),
            transfer_route: HexColor::from_static("#FF6B00"),
            direct_route: HexColor::from_static("#008E44"),
            station_details: HexColor::from_static("#666666"),
            separator: HexColor::from_static("#999999"),
        }
    }

    /// Light text on a dark background.
    pub fn dark() -> Self {
        Self {
            title: HexColor::from_static("#FFFFFF"),
            time_text: HexColor::from_static("#FFFFFF"),
            station_details: HexColor::from_static("#DDDDDD"),
            separator: HexColor::from_static("#CCCCCC"),
            ..Self::light()
        }
    }
}

impl Default for ColorScheme {
    fn default() -> Self {
        Self::light()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parse_valid_colors() {
        assert_eq!(HexColor::parse("#0066cc").unwrap().as_str(), "#0066CC");
        assert_eq!(HexColor::parse("#FFFFFF").unwrap().rgb(), (255, 255, 255));
        assert_eq!(HexColor::parse("#FF6B00").unwrap().rgb(), (255, 107, 0));
    }

    #[test]
    fn reject_invalid_colors() {
        for s in ["", "#", "000000", "#12345", "#1234567", "#GGGGGG", "red"] {
            assert!(HexColor::parse(s).is_err(), "{s:?} should be rejected");
        }
    }

    #[test]
    fn presets_are_valid() {
        for scheme in [ColorScheme::light(), ColorScheme::dark()] {
            let json = serde_json::to_value(&scheme).unwrap();
            let back: ColorScheme = serde_json::from_value(json).unwrap();
            assert_eq!(back, scheme);
        }
    }

    #[test]
    fn dark_differs_only_in_text() {
        let light = ColorScheme::light();
        let dark = ColorScheme::dark();
        assert_eq!(dark.title.as_str(), "#FFFFFF");
        assert_eq!(dark.direct_route, light.direct_route);
        assert_eq!(dark.transfer_route, light.transfer_route);
    }

    #[test]
    fn partial_scheme_fills_from_light() {
        let scheme: ColorScheme =
            serde_json::from_str(r##"{"title": "#ffffff", "stationDetails": "#707070"}"##)
                .unwrap();
        assert_eq!(scheme.title.as_str(), "#FFFFFF");
        assert_eq!(scheme.station_details.as_str(), "#707070");
        assert_eq!(scheme.direct_route, ColorScheme::light().direct_route);
    }

    #[test]
    fn invalid_color_fails_deserialization() {
        let result = serde_json::from_str::<ColorScheme>(r#"{"title": "black"}"#);
        assert!(result.is_err());
    }
}
