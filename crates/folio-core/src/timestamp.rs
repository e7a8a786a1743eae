//! Timestamp parsing and day-key derivation.
//!
//! Two encodings reach the gallery: capture timestamps written by the camera
//! (`YYYY:MM:DD HH:MM:SS`, a naive wall-clock value with no zone) and the
//! zone-qualified creation times returned by the storage API. Every
//! zone-sensitive conversion in the crate happens here, against an explicit
//! [`ReferenceZone`].

use chrono::{
    DateTime, FixedOffset, NaiveDate, NaiveDateTime, TimeDelta, TimeZone, Utc,
};
use chrono_tz::Tz;
use regex::Regex;
use std::fmt;
use std::str::FromStr;
use std::sync::LazyLock;

static CAPTURE_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^\d{4}:\d{2}:\d{2} \d{2}:\d{2}:\d{2}$").unwrap());
static CAPTURE_DAY_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^(\d{4}):(\d{2}):(\d{2})").unwrap());
static OFFSET_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^([+-])(\d{2}):?(\d{2})$").unwrap());

/// Zoned layouts RFC 3339 misses: minute precision with `Z` or an offset.
const ZONED_FORMATS: &[&str] = &["%Y-%m-%dT%H:%M%#z", "%Y-%m-%d %H:%M%#z"];

/// Zone-less date-time layouts, tried in order after the zoned ones.
const NAIVE_FORMATS: &[&str] = &[
    "%Y-%m-%dT%H:%M:%S%.f",
    "%Y-%m-%d %H:%M:%S%.f",
    "%Y-%m-%dT%H:%M",
    "%Y-%m-%d %H:%M",
];

/// The zone in which naive wall-clock timestamps are interpreted.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum ReferenceZone {
    /// The host's local zone
    #[default]
    Local,
    /// Coordinated Universal Time
    Utc,
    /// A fixed offset from UTC (e.g., `+10:00`)
    Fixed(FixedOffset),
    /// An IANA zone (e.g., `Pacific/Honolulu`)
    Named(Tz),
}

impl ReferenceZone {
    /// Parse `local`, `UTC`, a `+HH:MM` offset, or an IANA zone name.
    pub fn parse(s: &str) -> Option<Self> {
        let trimmed = s.trim();
        if trimmed.eq_ignore_ascii_case("local") {
            return Some(Self::Local);
        }
        if trimmed.eq_ignore_ascii_case("utc") || trimmed.eq_ignore_ascii_case("z") {
            return Some(Self::Utc);
        }
        if let Some(caps) = OFFSET_RE.captures(trimmed) {
            let hours: i32 = caps[2].parse().ok()?;
            let minutes: i32 = caps[3].parse().ok()?;
            if minutes >= 60 {
                return None;
            }
            let seconds = hours * 3600 + minutes * 60;
            let seconds = if &caps[1] == "-" { -seconds } else { seconds };
            return FixedOffset::east_opt(seconds).map(Self::Fixed);
        }
        Tz::from_str(trimmed).ok().map(Self::Named)
    }

    /// Convert a wall-clock time in this zone to an instant.
    ///
    /// Ambiguous times (clocks falling back) resolve to the earlier instant.
    /// Times inside a spring-forward gap move forward one hour.
    pub fn resolve(&self, naive: NaiveDateTime) -> Option<DateTime<Utc>> {
        self.from_wall_clock(naive).or_else(|| {
            naive
                .checked_add_signed(TimeDelta::hours(1))
                .and_then(|shifted| self.from_wall_clock(shifted))
        })
    }

    fn from_wall_clock(&self, naive: NaiveDateTime) -> Option<DateTime<Utc>> {
        match self {
            Self::Local => chrono::Local
                .from_local_datetime(&naive)
                .earliest()
                .map(|dt| dt.with_timezone(&Utc)),
            Self::Utc => Some(Utc.from_utc_datetime(&naive)),
            Self::Fixed(offset) => offset
                .from_local_datetime(&naive)
                .single()
                .map(|dt| dt.with_timezone(&Utc)),
            Self::Named(tz) => tz
                .from_local_datetime(&naive)
                .earliest()
                .map(|dt| dt.with_timezone(&Utc)),
        }
    }
}

impl fmt::Display for ReferenceZone {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Local => write!(f, "local"),
            Self::Utc => write!(f, "UTC"),
            Self::Fixed(offset) => write!(f, "{offset}"),
            Self::Named(tz) => write!(f, "{}", tz.name()),
        }
    }
}

/// A successfully parsed timestamp together with its grouping key.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ParsedTimestamp {
    /// The comparable instant
    pub instant: DateTime<Utc>,
    /// Canonical `YYYY-MM-DD` day key
    pub day_key: String,
}

/// Normalizes raw timestamp strings into instants and day keys.
#[derive(Debug, Clone, Copy, Default)]
pub struct TimestampParser {
    zone: ReferenceZone,
}

impl TimestampParser {
    /// Create a parser interpreting naive timestamps in `zone`.
    pub fn new(zone: ReferenceZone) -> Self {
        Self { zone }
    }

    /// The zone naive timestamps are read in.
    pub fn zone(&self) -> ReferenceZone {
        self.zone
    }

    /// Parse a raw timestamp. Absent, empty and unparseable input all
    /// yield `None`.
    pub fn parse(&self, raw: Option<&str>) -> Option<DateTime<Utc>> {
        let raw = raw.filter(|s| !s.is_empty())?;

        if CAPTURE_RE.is_match(raw) {
            let normalized = CAPTURE_DAY_RE.replace(raw, "$1-$2-$3");
            let naive = NaiveDateTime::parse_from_str(&normalized, "%Y-%m-%d %H:%M:%S").ok()?;
            return self.zone.resolve(naive);
        }

        self.parse_general(raw)
    }

    /// Derive the day key for a timestamp that `parse` accepted.
    ///
    /// Capture timestamps take the day straight from their digits; anything
    /// else takes the UTC calendar day of the parsed instant.
    pub fn day_key(&self, raw: &str, instant: &DateTime<Utc>) -> String {
        match CAPTURE_DAY_RE.captures(raw) {
            Some(caps) => format!("{}-{}-{}", &caps[1], &caps[2], &caps[3]),
            None => instant.format("%Y-%m-%d").to_string(),
        }
    }

    /// Parse and derive the day key in one step.
    pub fn parse_with_key(&self, raw: Option<&str>) -> Option<ParsedTimestamp> {
        let instant = self.parse(raw)?;
        let day_key = self.day_key(raw.unwrap_or_default(), &instant);
        Some(ParsedTimestamp { instant, day_key })
    }

    fn parse_general(&self, raw: &str) -> Option<DateTime<Utc>> {
        if let Ok(dt) = DateTime::parse_from_rfc3339(raw) {
            return Some(dt.with_timezone(&Utc));
        }
        if let Ok(dt) = DateTime::parse_from_rfc2822(raw) {
            return Some(dt.with_timezone(&Utc));
        }
        for format in ZONED_FORMATS {
            if let Ok(dt) = DateTime::parse_from_str(raw, format) {
                return Some(dt.with_timezone(&Utc));
            }
        }
        for format in NAIVE_FORMATS {
            if let Ok(naive) = NaiveDateTime::parse_from_str(raw, format) {
                return self.zone.resolve(naive);
            }
        }
        // A bare ISO date is midnight UTC, not local midnight.
        NaiveDate::parse_from_str(raw, "%Y-%m-%d")
            .ok()
            .and_then(|d| d.and_hms_opt(0, 0, 0))
            .map(|naive| Utc.from_utc_datetime(&naive))
    }
}

/// Whether `key` is a real calendar day in `YYYY-MM-DD` form.
pub fn is_valid_day_key(key: &str) -> bool {
    key.len() == 10 && NaiveDate::parse_from_str(key, "%Y-%m-%d").is_ok()
}

#[cfg(test)]
mod tests {
    use super::*;

    fn utc(s: &str) -> DateTime<Utc> {
        DateTime::parse_from_rfc3339(s).unwrap().with_timezone(&Utc)
    }

    fn parser(zone: &str) -> TimestampParser {
        TimestampParser::new(ReferenceZone::parse(zone).unwrap())
    }

    #[test]
    fn test_absent_and_empty_are_none() {
        let p = parser("UTC");
        assert!(p.parse(None).is_none());
        assert!(p.parse(Some("")).is_none());
    }

    #[test]
    fn test_garbage_is_none() {
        let p = parser("UTC");
        assert!(p.parse(Some("yesterday-ish")).is_none());
        assert!(p.parse(Some("2024:06:30")).is_none());
        assert!(p.parse(Some("2024:13:01 10:00:00")).is_none());
        assert!(p.parse(Some("2024:02:30 10:00:00")).is_none());
    }

    #[test]
    fn test_capture_format_in_reference_zone() {
        assert_eq!(
            parser("UTC").parse(Some("2024:06:30 14:22:10")),
            Some(utc("2024-06-30T14:22:10Z"))
        );
        assert_eq!(
            parser("+10:00").parse(Some("2024:06:30 14:22:10")),
            Some(utc("2024-06-30T04:22:10Z"))
        );
        assert_eq!(
            parser("Pacific/Honolulu").parse(Some("2024:06:30 14:22:10")),
            Some(utc("2024-07-01T00:22:10Z"))
        );
    }

    #[test]
    fn test_capture_day_key_ignores_zone() {
        for zone in ["UTC", "Pacific/Kiritimati", "Pacific/Pago_Pago", "-11:00", "+14:00", "local"] {
            let parsed = parser(zone)
                .parse_with_key(Some("2024:06:30 14:22:10"))
                .unwrap();
            assert_eq!(parsed.day_key, "2024-06-30", "zone {zone}");
        }
    }

    #[test]
    fn test_capture_day_key_late_evening() {
        // 23:59 in Honolulu is the next UTC day; the key stays on the digits.
        let parsed = parser("Pacific/Honolulu")
            .parse_with_key(Some("2025:11:21 23:59:00"))
            .unwrap();
        assert_eq!(parsed.day_key, "2025-11-21");
        assert_eq!(parsed.instant, utc("2025-11-22T09:59:00Z"));
    }

    #[test]
    fn test_rfc3339_day_key_uses_utc() {
        let p = parser("Pacific/Honolulu");
        let parsed = p
            .parse_with_key(Some("2025-12-12T23:30:00-05:00"))
            .unwrap();
        assert_eq!(parsed.instant, utc("2025-12-13T04:30:00Z"));
        assert_eq!(parsed.day_key, "2025-12-13");

        let parsed = p.parse_with_key(Some("2025-12-12T18:30:00.000Z")).unwrap();
        assert_eq!(parsed.day_key, "2025-12-12");
    }

    #[test]
    fn test_zoned_iso_without_seconds() {
        let p = parser("Pacific/Honolulu");
        let parsed = p.parse_with_key(Some("2025-12-12T18:30Z")).unwrap();
        assert_eq!(parsed.instant, utc("2025-12-12T18:30:00Z"));
        assert_eq!(parsed.day_key, "2025-12-12");

        assert_eq!(
            p.parse(Some("2025-12-12T23:30-05:00")),
            Some(utc("2025-12-13T04:30:00Z"))
        );
        assert_eq!(
            p.parse(Some("2025-12-12 08:00+0930")),
            Some(utc("2025-12-11T22:30:00Z"))
        );
    }

    #[test]
    fn test_rfc2822() {
        assert_eq!(
            parser("UTC").parse(Some("Fri, 12 Dec 2025 18:30:00 +0000")),
            Some(utc("2025-12-12T18:30:00Z"))
        );
    }

    #[test]
    fn test_naive_iso_uses_reference_zone() {
        assert_eq!(
            parser("-10:00").parse(Some("2025-07-01T09:15:00")),
            Some(utc("2025-07-01T19:15:00Z"))
        );
        assert_eq!(
            parser("UTC").parse(Some("2025-07-01 09:15:00.250")),
            Some(utc("2025-07-01T09:15:00.250Z"))
        );
    }

    #[test]
    fn test_bare_date_is_utc_midnight() {
        assert_eq!(
            parser("+09:00").parse(Some("2024-11-12")),
            Some(utc("2024-11-12T00:00:00Z"))
        );
    }

    #[test]
    fn test_spring_forward_gap_shifts_one_hour() {
        // 02:30 does not exist in New York on 2025-03-09.
        assert_eq!(
            parser("America/New_York").parse(Some("2025:03:09 02:30:00")),
            Some(utc("2025-03-09T07:30:00Z"))
        );
    }

    #[test]
    fn test_fall_back_takes_earlier_instant() {
        // 01:30 happens twice in New York on 2025-11-02; the first is EDT.
        assert_eq!(
            parser("America/New_York").parse(Some("2025:11:02 01:30:00")),
            Some(utc("2025-11-02T05:30:00Z"))
        );
    }

    #[test]
    fn test_day_key_is_stable_under_reparse() {
        let p = parser("Europe/Berlin");
        for raw in ["2024:06:30 14:22:10", "2025-12-12T23:30:00-05:00", "2024-11-12"] {
            let first = p.parse_with_key(Some(raw)).unwrap();
            let second = p.parse_with_key(Some(raw)).unwrap();
            assert_eq!(first, second);
        }
    }

    #[test]
    fn test_reference_zone_parse() {
        assert_eq!(ReferenceZone::parse("local"), Some(ReferenceZone::Local));
        assert_eq!(ReferenceZone::parse("UTC"), Some(ReferenceZone::Utc));
        assert_eq!(
            ReferenceZone::parse("-0530"),
            Some(ReferenceZone::Fixed(FixedOffset::west_opt(5 * 3600 + 1800).unwrap()))
        );
        assert_eq!(
            ReferenceZone::parse("Pacific/Honolulu"),
            Some(ReferenceZone::Named(chrono_tz::Pacific::Honolulu))
        );
        assert!(ReferenceZone::parse("+10:75").is_none());
        assert!(ReferenceZone::parse("Mars/Olympus_Mons").is_none());
    }

    #[test]
    fn test_reference_zone_display_round_trips() {
        for zone in ["local", "UTC", "+10:00", "America/New_York"] {
            let parsed = ReferenceZone::parse(zone).unwrap();
            assert_eq!(ReferenceZone::parse(&parsed.to_string()), Some(parsed));
        }
    }

    #[test]
    fn test_is_valid_day_key() {
        assert!(is_valid_day_key("2026-01-09"));
        assert!(!is_valid_day_key("2026-1-9"));
        assert!(!is_valid_day_key("2026-02-30"));
        assert!(!is_valid_day_key("not a day"));
    }
}
