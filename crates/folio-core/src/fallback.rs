//! Catch-all shoots for images that cannot be placed on a day.

use chrono::{DateTime, Utc};

use crate::types::{PhotoShoot, PortfolioImage};

/// Id of the shoot holding images without a usable timestamp.
pub const UNDATED_ID: &str = "shoot-undated";

/// Label of the undated shoot.
pub const UNDATED_LABEL: &str = "Undated";

/// Id of the shoot used when every image was excluded.
pub const CATCH_ALL_ID: &str = "shoot-all";

/// Label of the catch-all shoot.
pub const CATCH_ALL_LABEL: &str = "All Photos";

/// The trailing shoot for undated images, dated at the Unix epoch.
///
/// Images keep the order they were given in.
pub fn undated_shoot<'a>(images: Vec<&'a PortfolioImage>) -> PhotoShoot<'a> {
    PhotoShoot {
        id: UNDATED_ID.to_string(),
        date: DateTime::<Utc>::UNIX_EPOCH,
        date_label: UNDATED_LABEL.to_string(),
        photographers: Vec::new(),
        images,
    }
}

/// A single shoot holding the full, unfiltered input, dated `now`.
pub fn catch_all_shoot(images: &[PortfolioImage], now: DateTime<Utc>) -> PhotoShoot<'_> {
    PhotoShoot {
        id: CATCH_ALL_ID.to_string(),
        date: now,
        date_label: CATCH_ALL_LABEL.to_string(),
        photographers: Vec::new(),
        images: images.iter().collect(),
    }
}
