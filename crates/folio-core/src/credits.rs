//! Photographer credits and human-readable shoot labels.

use chrono::format::{Fixed, Item, StrftimeItems};
use chrono::NaiveDate;
use std::collections::BTreeMap;
use std::fmt::Write;

use crate::types::PhotographerCredit;

/// Default label layout: "Wednesday, January 21, 2026".
pub const DEFAULT_LABEL_FORMAT: &str = "%A, %B %-d, %Y";

/// Immutable lookup from day key to the photographers credited that day.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct CreditBook {
    entries: BTreeMap<String, Vec<PhotographerCredit>>,
}

impl CreditBook {
    /// Build a credit book from a prepared map.
    pub fn new(entries: BTreeMap<String, Vec<PhotographerCredit>>) -> Self {
        Self { entries }
    }

    /// The portfolio's curated credits.
    pub fn curated() -> Self {
        Self::new(curated_credits())
    }

    /// Credits for a day, empty when none are configured.
    pub fn credits_for(&self, day_key: &str) -> &[PhotographerCredit] {
        self.entries.get(day_key).map(Vec::as_slice).unwrap_or(&[])
    }

    /// Number of credited days.
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// Whether no day carries credits.
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Iterate credited days in ascending day-key order.
    pub fn iter(&self) -> impl Iterator<Item = (&str, &[PhotographerCredit])> {
        self.entries
            .iter()
            .map(|(day, credits)| (day.as_str(), credits.as_slice()))
    }
}

/// The curated credit table shipped with the portfolio.
pub fn curated_credits() -> BTreeMap<String, Vec<PhotographerCredit>> {
    let instagram = |handle: &str| {
        PhotographerCredit::new(format!("@{handle}"), format!("https://instagram.com/{handle}"))
    };

    BTreeMap::from([
        (
            "2026-01-21".to_string(),
            vec![instagram("mauikao"), instagram("aeomlifestyle")],
        ),
        ("2026-01-11".to_string(), vec![instagram("aloha.marcela")]),
        ("2025-12-12".to_string(), vec![instagram("vivo.visuals")]),
        ("2025-11-22".to_string(), vec![instagram("aloha.marcela")]),
        ("2025-11-21".to_string(), vec![instagram("rajailiya")]),
        (
            "2025-07-01".to_string(),
            vec![instagram("thaisaquinophotography")],
        ),
        (
            "2024-11-12".to_string(),
            vec![instagram("mauikao"), instagram("aeomlifestyle")],
        ),
        ("2024-11-09".to_string(), vec![instagram("aeomlifestyle")]),
        (
            "2024-06-30".to_string(),
            vec![PhotographerCredit::named("Rachel Hernandez")],
        ),
    ])
}

/// Renders day keys as long-form date labels.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LabelFormatter {
    pattern: String,
}

impl Default for LabelFormatter {
    fn default() -> Self {
        Self {
            pattern: DEFAULT_LABEL_FORMAT.to_string(),
        }
    }
}

impl LabelFormatter {
    /// Create a formatter from a strftime-style pattern.
    ///
    /// Returns `None` if the pattern is empty or contains an unknown
    /// specifier.
    pub fn new(pattern: impl Into<String>) -> Option<Self> {
        let pattern = pattern.into();
        if !is_valid_pattern(&pattern) {
            return None;
        }
        Some(Self { pattern })
    }

    /// The strftime pattern in use.
    pub fn pattern(&self) -> &str {
        &self.pattern
    }

    /// Render the label for a `YYYY-MM-DD` day key.
    ///
    /// The date is built at noon so the label never slides to a
    /// neighbouring day. Keys that are not real dates come back verbatim.
    pub fn format_label(&self, day_key: &str) -> String {
        let Some(noon) = NaiveDate::parse_from_str(day_key, "%Y-%m-%d")
            .ok()
            .and_then(|d| d.and_hms_opt(12, 0, 0))
        else {
            return day_key.to_string();
        };

        let mut label = String::new();
        if write!(label, "{}", noon.format(&self.pattern)).is_err() {
            tracing::warn!(pattern = %self.pattern, day = day_key, "Label pattern failed to render");
            return day_key.to_string();
        }
        label
    }
}

/// Whether a strftime pattern is non-empty, fully recognised and renders
/// from a calendar date alone.
///
/// Labels are rendered from a zone-less date-time, so zone names, offsets
/// and the RFC 2822/3339 composites are rejected.
pub fn is_valid_pattern(pattern: &str) -> bool {
    !pattern.is_empty() && StrftimeItems::new(pattern).all(|item| !needs_zone_or_invalid(&item))
}

fn needs_zone_or_invalid(item: &Item<'_>) -> bool {
    match item {
        Item::Error => true,
        Item::Fixed(fixed) => matches!(
            fixed,
            Fixed::TimezoneName
                | Fixed::TimezoneOffset
                | Fixed::TimezoneOffsetColon
                | Fixed::TimezoneOffsetDoubleColon
                | Fixed::TimezoneOffsetTripleColon
                | Fixed::TimezoneOffsetColonZ
                | Fixed::TimezoneOffsetZ
                | Fixed::RFC2822
                | Fixed::RFC3339
                | Fixed::Internal(_)
        ),
        _ => false,
    }
}
