//! Sub-configuration structs with the portfolio's shipped defaults.

use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

use crate::cluster::curated_excluded_days;
use crate::credits::{curated_credits, DEFAULT_LABEL_FORMAT};
use crate::types::{PhotographerCredit, DEFAULT_ALT, DEFAULT_HEIGHT, DEFAULT_WIDTH};

/// Gallery presentation settings.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct GalleryConfig {
    /// Zone for naive timestamps: "local", "UTC", "+10:00" or an IANA name
    pub timezone: String,

    /// strftime pattern for shoot labels
    pub label_format: String,
}

impl Default for GalleryConfig {
    fn default() -> Self {
        Self {
            timezone: "local".to_string(),
            label_format: DEFAULT_LABEL_FORMAT.to_string(),
        }
    }
}

/// How listing records become portfolio images.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct SourceConfig {
    /// Route prefix joined with the file id to form `src`
    pub image_route: String,

    /// Width when the listing has no media metadata
    pub default_width: i64,

    /// Height when the listing has no media metadata
    pub default_height: i64,

    /// Alt text when the listing has no file name
    pub default_alt: String,

    /// Prefer the camera capture time over the upload time
    pub prefer_capture_time: bool,
}

impl Default for SourceConfig {
    fn default() -> Self {
        Self {
            image_route: "/api/image/".to_string(),
            default_width: DEFAULT_WIDTH,
            default_height: DEFAULT_HEIGHT,
            default_alt: DEFAULT_ALT.to_string(),
            prefer_capture_time: true,
        }
    }
}

/// Curated portfolio data: withheld days and photographer credits.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct CurationConfig {
    /// Day keys (`YYYY-MM-DD`) whose images never reach the gallery
    pub excluded_days: Vec<String>,

    /// Photographer credits keyed by day
    pub credits: BTreeMap<String, Vec<PhotographerCredit>>,
}

impl Default for CurationConfig {
    fn default() -> Self {
        Self {
            excluded_days: curated_excluded_days().into_iter().collect(),
            credits: curated_credits(),
        }
    }
}

/// Output settings.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct OutputConfig {
    /// Default output format ("json" or "jsonl")
    pub format: String,

    /// Pretty-print JSON output
    pub pretty: bool,
}

impl Default for OutputConfig {
    fn default() -> Self {
        Self {
            format: "json".to_string(),
            pretty: false,
        }
    }
}

/// Logging settings.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct LoggingConfig {
    /// Log level: error, warn, info, debug, trace
    pub level: String,

    /// Log format: "pretty" or "json"
    pub format: String,
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            level: "info".to_string(),
            format: "pretty".to_string(),
        }
    }
}
