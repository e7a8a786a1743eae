//! Folio Core - photo shoot clustering for a photography portfolio.
//!
//! Folio takes a flat list of portfolio images with mixed timestamp metadata
//! and groups them into dated photo shoots with photographer credits and
//! readable labels.
//!
//! # Architecture
//!
//! ```text
//! Listing → PortfolioImage → Parse timestamp → Day key → Cluster → PhotoShoot[] → JSON
//! ```
//!
//! # Usage
//!
//! ```rust,ignore
//! use folio_core::{Config, ShootClusterer};
//! use folio_core::source::load_snapshot;
//!
//! fn main() -> folio_core::Result<()> {
//!     let config = Config::load()?;
//!     let images = load_snapshot("listing.json".as_ref(), &config.source)?;
//!     let clusterer = ShootClusterer::from_config(&config)?;
//!
//!     for shoot in clusterer.cluster(&images) {
//!         println!("{} ({} photos)", shoot.date_label, shoot.len());
//!     }
//!     Ok(())
//! }
//! ```

// Module declarations
pub mod cluster;
pub mod config;
pub mod credits;
pub mod error;
pub mod fallback;
pub mod output;
pub mod source;
pub mod timestamp;
pub mod types;

// Re-exports for convenient access
pub use cluster::{ShootClusterer, ShootPolicy};
pub use config::Config;
pub use credits::{CreditBook, LabelFormatter};
pub use error::{ConfigError, FolioError, Result, SourceError};
pub use output::{OutputFormat, ShootWriter};
pub use timestamp::{ReferenceZone, TimestampParser};
pub use types::{ClusterStats, PhotoShoot, PhotographerCredit, PortfolioImage};

/// Library version.
pub const VERSION: &str = env!("CARGO_PKG_VERSION");

/// Cluster images with the shipped curation, reading naive timestamps in the
/// host's local zone.
pub fn cluster_into_shoots(images: &[PortfolioImage]) -> Vec<PhotoShoot<'_>> {
    ShootClusterer::new(ShootPolicy::curated(), TimestampParser::default()).cluster(images)
}
