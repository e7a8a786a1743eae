//! Configuration validation.

use crate::credits::is_valid_pattern;
use crate::error::ConfigError;
use crate::output::OutputFormat;
use crate::timestamp::{is_valid_day_key, ReferenceZone};

use super::Config;

const LOG_LEVELS: &[&str] = &["off", "error", "warn", "info", "debug", "trace"];

impl Config {
    /// Validate configuration values before anything is clustered with them.
    pub(crate) fn validate(&self) -> Result<(), ConfigError> {
        if ReferenceZone::parse(&self.gallery.timezone).is_none() {
            return Err(ConfigError::ValidationError(format!(
                "gallery.timezone '{}' is not a known zone",
                self.gallery.timezone
            )));
        }
        if !is_valid_pattern(&self.gallery.label_format) {
            return Err(ConfigError::ValidationError(format!(
                "gallery.label_format '{}' is not a valid date pattern",
                self.gallery.label_format
            )));
        }
        if self.source.default_width <= 0 {
            return Err(ConfigError::ValidationError(
                "source.default_width must be > 0".into(),
            ));
        }
        if self.source.default_height <= 0 {
            return Err(ConfigError::ValidationError(
                "source.default_height must be > 0".into(),
            ));
        }
        if let Some(day) = self
            .curation
            .excluded_days
            .iter()
            .find(|day| !is_valid_day_key(day))
        {
            return Err(ConfigError::ValidationError(format!(
                "curation.excluded_days entry '{day}' is not a YYYY-MM-DD date"
            )));
        }
        for (day, credits) in &self.curation.credits {
            if !is_valid_day_key(day) {
                return Err(ConfigError::ValidationError(format!(
                    "curation.credits key '{day}' is not a YYYY-MM-DD date"
                )));
            }
            if credits.iter().any(|c| c.name.trim().is_empty()) {
                return Err(ConfigError::ValidationError(format!(
                    "curation.credits for '{day}' has an empty name"
                )));
            }
        }
        if OutputFormat::parse(&self.output.format).is_none() {
            return Err(ConfigError::ValidationError(format!(
                "output.format '{}' must be \"json\" or \"jsonl\"",
                self.output.format
            )));
        }
        if !LOG_LEVELS
            .iter()
            .any(|level| level.eq_ignore_ascii_case(&self.logging.level))
        {
            return Err(ConfigError::ValidationError(format!(
                "logging.level '{}' must be one of {}",
                self.logging.level,
                LOG_LEVELS.join(", ")
            )));
        }
        if !matches!(self.logging.format.as_str(), "pretty" | "json") {
            return Err(ConfigError::ValidationError(format!(
                "logging.format '{}' must be \"pretty\" or \"json\"",
                self.logging.format
            )));
        }
        Ok(())
    }
}
