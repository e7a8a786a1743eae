//! Conversion of storage listing snapshots into portfolio images.
//!
//! The storage API call itself happens elsewhere; this module reads its
//! materialised JSON. Accepted shapes:
//!
//! - `{"files": [...]}` as returned by a folder listing
//! - a bare array of listing records
//! - a bare array of already-converted [`PortfolioImage`] objects
//!
//! Records and images may be mixed within one array.

use serde::de::{self, Deserializer};
use serde::{Deserialize, Serialize};
use std::path::Path;

use crate::config::SourceConfig;
use crate::error::SourceError;
use crate::types::PortfolioImage;

/// Media metadata the storage API attaches to image files.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ImageMediaMetadata {
    /// Pixel width
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub width: Option<i64>,

    /// Pixel height
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub height: Option<i64>,

    /// Camera capture time, `YYYY:MM:DD HH:MM:SS`
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub time: Option<String>,
}

/// One file entry from a storage folder listing.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ListingRecord {
    /// Storage file id
    #[serde(default)]
    pub id: String,

    /// File name, used as alt text
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,

    /// MIME type reported by the storage API
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub mime_type: Option<String>,

    /// Upload/creation time (RFC 3339)
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub created_time: Option<String>,

    /// Media metadata, present for image files
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub image_media_metadata: Option<ImageMediaMetadata>,
}

impl ListingRecord {
    /// Whether the record is an image. Records without a MIME type are
    /// assumed to be.
    pub fn is_image(&self) -> bool {
        self.mime_type
            .as_deref()
            .map_or(true, |mime| mime.contains("image/"))
    }

    /// Convert into a portfolio image served through the image route.
    pub fn into_image(self, config: &SourceConfig) -> PortfolioImage {
        let meta = self.image_media_metadata.unwrap_or_default();
        let capture_time = meta.time.filter(|t| !t.is_empty());
        let created_time = if config.prefer_capture_time {
            capture_time.or(self.created_time)
        } else {
            self.created_time.or(capture_time)
        };

        PortfolioImage {
            src: format!("{}{}", config.image_route, self.id),
            src_full: None,
            width: meta
                .width
                .filter(|&w| w != 0)
                .unwrap_or(config.default_width),
            height: meta
                .height
                .filter(|&h| h != 0)
                .unwrap_or(config.default_height),
            alt: self
                .name
                .filter(|n| !n.is_empty())
                .unwrap_or_else(|| config.default_alt.clone()),
            id: self.id,
            created_time,
        }
    }
}

/// A snapshot entry: either a raw listing record or a ready image.
///
/// An entry carrying `src` is in gallery shape and must decode as a
/// [`PortfolioImage`]; anything else is read as a listing record.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ListingEntry {
    /// Already in gallery shape (has `src`)
    Image(PortfolioImage),
    /// Raw storage listing record
    Record(ListingRecord),
}

impl<'de> Deserialize<'de> for ListingEntry {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let value = serde_json::Value::deserialize(deserializer)?;
        if value.get("src").is_some() {
            PortfolioImage::deserialize(value)
                .map(Self::Image)
                .map_err(|e| de::Error::custom(format!("invalid gallery image: {e}")))
        } else {
            ListingRecord::deserialize(value)
                .map(Self::Record)
                .map_err(|e| de::Error::custom(format!("invalid listing record: {e}")))
        }
    }
}

/// A decoded listing snapshot, in listing order.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ListingSnapshot {
    /// Entries as they appeared in the snapshot
    pub entries: Vec<ListingEntry>,
}

impl ListingSnapshot {
    /// Decode snapshot JSON text.
    pub fn parse(text: &str) -> Result<Self, SourceError> {
        let listing = match serde_json::from_str::<serde_json::Value>(text)? {
            serde_json::Value::Object(mut object) if object.contains_key("files") => {
                object.remove("files").unwrap_or_default()
            }
            other => other,
        };
        let entries = Vec::<ListingEntry>::deserialize(listing)?;
        Ok(Self { entries })
    }

    /// Read and decode a snapshot file.
    pub fn load(path: &Path) -> Result<Self, SourceError> {
        if !path.exists() {
            return Err(SourceError::NotFound(path.to_path_buf()));
        }
        let text = std::fs::read_to_string(path).map_err(|source| SourceError::Read {
            path: path.to_path_buf(),
            source,
        })?;
        Self::parse(&text)
    }

    /// Convert every usable entry into a portfolio image, keeping order.
    ///
    /// Records without an id or with a non-image MIME type are skipped.
    pub fn into_images(self, config: &SourceConfig) -> Vec<PortfolioImage> {
        let mut images = Vec::with_capacity(self.entries.len());
        for entry in self.entries {
            match entry {
                ListingEntry::Image(image) => images.push(image),
                ListingEntry::Record(record) if record.id.is_empty() => {
                    tracing::warn!(name = ?record.name, "Skipping listing record without an id");
                }
                ListingEntry::Record(record) if !record.is_image() => {
                    tracing::debug!(
                        id = %record.id,
                        mime = ?record.mime_type,
                        "Skipping non-image listing record"
                    );
                }
                ListingEntry::Record(record) => images.push(record.into_image(config)),
            }
        }
        images
    }
}

/// Parse snapshot text straight into portfolio images.
pub fn parse_snapshot(text: &str, config: &SourceConfig) -> Result<Vec<PortfolioImage>, SourceError> {
    Ok(ListingSnapshot::parse(text)?.into_images(config))
}

/// Load a snapshot file straight into portfolio images.
pub fn load_snapshot(path: &Path, config: &SourceConfig) -> Result<Vec<PortfolioImage>, SourceError> {
    Ok(ListingSnapshot::load(path)?.into_images(config))
}
