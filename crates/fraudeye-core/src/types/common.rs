use serde::{Deserialize, Deserializer, Serialize};

/// Placeholder shown for descriptive fields the provider did not return
pub const UNKNOWN: &str = "Unknown";

/// Geographic location reported by the IP provider
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Location {
    /// Two-letter country code (ISO 3166-1 alpha-2)
    #[serde(default)]
    pub country_code: Option<String>,

    /// Region/state name
    #[serde(default)]
    pub region: Option<String>,

    /// City name
    #[serde(default)]
    pub city: Option<String>,
}

impl Location {
    /// Human-readable "city, region, country" string, skipping missing parts
    #[must_use]
    pub fn display(&self) -> String {
        let parts: Vec<&str> = [&self.city, &self.region, &self.country_code]
            .into_iter()
            .filter_map(|p| p.as_deref())
            .filter(|p| !p.is_empty())
            .collect();

        if parts.is_empty() {
            UNKNOWN.to_string()
        } else {
            parts.join(", ")
        }
    }
}

/// Deserialize a field that may be absent or `null`, falling back to the default.
///
/// Provider JSON is loosely typed: flags and scores are sometimes sent as
/// `null` rather than omitted.
pub(crate) fn null_as_default<'de, D, T>(deserializer: D) -> std::result::Result<T, D::Error>
where
    D: Deserializer<'de>,
    T: Default + Deserialize<'de>,
{
    Option::<T>::deserialize(deserializer).map(Option::unwrap_or_default)
}

/// Deserialize a 0-100 provider score from any JSON value.
///
/// Integers and floats are rounded and clamped to 0..=100; `null`, strings
/// and anything else read as 0.
#[allow(clippy::cast_possible_truncation, clippy::cast_sign_loss)]
pub(crate) fn lenient_score<'de, D>(deserializer: D) -> std::result::Result<u8, D::Error>
where
    D: Deserializer<'de>,
{
    let value = serde_json::Value::deserialize(deserializer)?;
    Ok(value
        .as_f64()
        .filter(|s| s.is_finite())
        .map_or(0, |s| s.round().clamp(0.0, 100.0) as u8))
}

/// `Some(value)` unless the value is missing or blank
pub(crate) fn non_blank(value: Option<&str>) -> Option<&str> {
    value.map(str::trim).filter(|v| !v.is_empty())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn location_display_skips_missing_parts() {
        let loc = Location {
            country_code: Some("US".into()),
            region: None,
            city: Some("Austin".into()),
        };
        assert_eq!(loc.display(), "Austin, US");
        assert_eq!(Location::default().display(), "Unknown");
    }

    #[test]
    fn non_blank_filters_whitespace() {
        assert_eq!(non_blank(Some("  ")), None);
        assert_eq!(non_blank(Some(" +1555 ")), Some("+1555"));
        assert_eq!(non_blank(None), None);
    }
}
