//! Core data types for the Folio portfolio.
//!
//! Field names serialize in camelCase, the shape the gallery front end reads.

use chrono::{DateTime, SecondsFormat, Utc};
use serde::{Deserialize, Serialize, Serializer};

/// Width used when the listing carries no pixel dimensions.
pub const DEFAULT_WIDTH: i64 = 800;

/// Height used when the listing carries no pixel dimensions.
pub const DEFAULT_HEIGHT: i64 = 1000;

/// Alt text used when the listing carries no file name.
pub const DEFAULT_ALT: &str = "Portfolio Image";

/// A single photograph in the portfolio.
///
/// Dimensions are signed and taken as supplied: validating them is the
/// listing collaborator's job, tolerating them the gallery's.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PortfolioImage {
    /// Unique identifier (the storage file id)
    pub id: String,

    /// Display-resolution source URL
    pub src: String,

    /// Full-resolution source URL for the lightbox
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub src_full: Option<String>,

    /// Pixel width
    #[serde(default = "default_width")]
    pub width: i64,

    /// Pixel height
    #[serde(default = "default_height")]
    pub height: i64,

    /// Accessibility text
    #[serde(default = "default_alt")]
    pub alt: String,

    /// Raw creation timestamp, either `YYYY:MM:DD HH:MM:SS` or a standard
    /// date-time string
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub created_time: Option<String>,
}

fn default_width() -> i64 {
    DEFAULT_WIDTH
}

fn default_height() -> i64 {
    DEFAULT_HEIGHT
}

fn default_alt() -> String {
    DEFAULT_ALT.to_string()
}

impl PortfolioImage {
    /// Create an image with default dimensions and alt text and no timestamp.
    pub fn new(id: impl Into<String>, src: impl Into<String>) -> Self {
        Self {
            id: id.into(),
            src: src.into(),
            src_full: None,
            width: DEFAULT_WIDTH,
            height: DEFAULT_HEIGHT,
            alt: DEFAULT_ALT.to_string(),
            created_time: None,
        }
    }

    /// Attach a raw creation timestamp.
    pub fn with_created_time(mut self, created_time: impl Into<String>) -> Self {
        self.created_time = Some(created_time.into());
        self
    }
}

/// A photographer credited for a shoot.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PhotographerCredit {
    /// Display name or handle (e.g., "@vivo.visuals")
    pub name: String,

    /// Profile URL, if the photographer has one
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub url: Option<String>,
}

impl PhotographerCredit {
    /// Create a credit with a profile link.
    pub fn new(name: impl Into<String>, url: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            url: Some(url.into()),
        }
    }

    /// Create a credit that is a name only.
    pub fn named(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            url: None,
        }
    }
}

/// A date-based grouping of portfolio images.
///
/// Images are borrowed from the caller's sequence; a shoot never owns or
/// copies image content.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct PhotoShoot<'a> {
    /// `shoot-<ordinal>-<dayKey>`, or a sentinel for undated/catch-all shoots
    pub id: String,

    /// Anchor instant, rendered as `YYYY-MM-DDTHH:MM:SS.sssZ`
    #[serde(serialize_with = "serialize_iso_millis")]
    pub date: DateTime<Utc>,

    /// Human-readable label (e.g., "Wednesday, January 21, 2026")
    pub date_label: String,

    /// Credited photographers, possibly empty
    pub photographers: Vec<PhotographerCredit>,

    /// Images in display order
    pub images: Vec<&'a PortfolioImage>,
}

impl PhotoShoot<'_> {
    /// The anchor date as an ISO-8601 instant with millisecond precision.
    pub fn date_iso(&self) -> String {
        iso_millis(&self.date)
    }

    /// Number of images in the shoot.
    pub fn len(&self) -> usize {
        self.images.len()
    }

    /// Whether the shoot holds no images.
    pub fn is_empty(&self) -> bool {
        self.images.is_empty()
    }
}

/// Render an instant the way the gallery expects: UTC, milliseconds, `Z`.
pub fn iso_millis(instant: &DateTime<Utc>) -> String {
    instant.to_rfc3339_opts(SecondsFormat::Millis, true)
}

fn serialize_iso_millis<S: Serializer>(
    instant: &DateTime<Utc>,
    serializer: S,
) -> Result<S::Ok, S::Error> {
    serializer.serialize_str(&iso_millis(instant))
}

/// Counters describing one clustering run.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
pub struct ClusterStats {
    /// Images supplied
    pub input: usize,

    /// Images placed in a dated shoot
    pub dated: usize,

    /// Images placed in the undated shoot
    pub undated: usize,

    /// Images dropped because their day is excluded
    pub excluded: usize,

    /// Shoots produced
    pub shoots: usize,

    /// Whether the catch-all shoot replaced an otherwise empty result
    pub catch_all: bool,
}
