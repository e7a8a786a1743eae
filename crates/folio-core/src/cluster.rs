//! Grouping portfolio images into dated photo shoots.
//!
//! ```text
//! images → parse timestamp → day key → drop excluded days → bucket by day
//!        → newest day first, oldest image first → undated shoot last
//! ```
//!
//! Clustering is pure: it reads the images, allocates only local state and
//! never fails. It is safe to run from many threads at once.

use chrono::{DateTime, Utc};
use std::collections::{BTreeMap, BTreeSet};

use crate::config::Config;
use crate::credits::{CreditBook, LabelFormatter};
use crate::error::ConfigError;
use crate::fallback::{catch_all_shoot, undated_shoot};
use crate::timestamp::{ParsedTimestamp, ReferenceZone, TimestampParser};
use crate::types::{ClusterStats, PhotoShoot, PortfolioImage};

/// Days whose images are withheld from the public gallery.
pub fn curated_excluded_days() -> BTreeSet<String> {
    BTreeSet::from(["2026-01-09".to_string()])
}

/// Curation rules applied while clustering.
///
/// `Default` is an empty policy (nothing excluded, nobody credited);
/// [`ShootPolicy::curated`] is the portfolio's shipped data.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ShootPolicy {
    /// Day keys whose images are dropped entirely
    pub excluded_days: BTreeSet<String>,

    /// Photographer credits keyed by day
    pub credits: CreditBook,

    /// Label rendering for dated shoots
    pub labels: LabelFormatter,
}

impl ShootPolicy {
    /// The shipped denylist, credits and label format.
    pub fn curated() -> Self {
        Self {
            excluded_days: curated_excluded_days(),
            credits: CreditBook::curated(),
            labels: LabelFormatter::default(),
        }
    }

    /// Whether images from `day_key` are withheld.
    pub fn is_excluded(&self, day_key: &str) -> bool {
        self.excluded_days.contains(day_key)
    }
}

/// Images collected for one day, with the instant of the first one seen.
struct DayBucket<'a> {
    anchor: DateTime<Utc>,
    members: Vec<(DateTime<Utc>, &'a PortfolioImage)>,
}

/// Groups images into shoots according to a [`ShootPolicy`].
#[derive(Debug, Clone, Default)]
pub struct ShootClusterer {
    policy: ShootPolicy,
    parser: TimestampParser,
}

impl ShootClusterer {
    /// Create a clusterer with an explicit policy and parser.
    pub fn new(policy: ShootPolicy, parser: TimestampParser) -> Self {
        Self { policy, parser }
    }

    /// Build a clusterer from loaded configuration.
    pub fn from_config(config: &Config) -> Result<Self, ConfigError> {
        let zone = ReferenceZone::parse(&config.gallery.timezone).ok_or_else(|| {
            ConfigError::ValidationError(format!(
                "gallery.timezone '{}' is not a known zone",
                config.gallery.timezone
            ))
        })?;
        let labels = LabelFormatter::new(config.gallery.label_format.clone()).ok_or_else(|| {
            ConfigError::ValidationError(format!(
                "gallery.label_format '{}' is not a valid date pattern",
                config.gallery.label_format
            ))
        })?;

        let policy = ShootPolicy {
            excluded_days: config.curation.excluded_days.iter().cloned().collect(),
            credits: CreditBook::new(config.curation.credits.clone()),
            labels,
        };
        Ok(Self::new(policy, TimestampParser::new(zone)))
    }

    /// The curation policy in use.
    pub fn policy(&self) -> &ShootPolicy {
        &self.policy
    }

    /// The timestamp parser in use.
    pub fn parser(&self) -> &TimestampParser {
        &self.parser
    }

    /// Cluster images, dating a catch-all shoot with the system clock.
    pub fn cluster<'a>(&self, images: &'a [PortfolioImage]) -> Vec<PhotoShoot<'a>> {
        self.cluster_at(images, Utc::now())
    }

    /// Cluster images, dating a catch-all shoot at `now`.
    pub fn cluster_at<'a>(
        &self,
        images: &'a [PortfolioImage],
        now: DateTime<Utc>,
    ) -> Vec<PhotoShoot<'a>> {
        self.cluster_with_stats(images, now).0
    }

    /// Cluster images and report what happened to them.
    pub fn cluster_with_stats<'a>(
        &self,
        images: &'a [PortfolioImage],
        now: DateTime<Utc>,
    ) -> (Vec<PhotoShoot<'a>>, ClusterStats) {
        let mut stats = ClusterStats {
            input: images.len(),
            ..ClusterStats::default()
        };
        let mut buckets: BTreeMap<String, DayBucket<'a>> = BTreeMap::new();
        let mut undated: Vec<&'a PortfolioImage> = Vec::new();

        for image in images {
            let raw = image.created_time.as_deref();
            let Some(ParsedTimestamp { instant, day_key }) = self.parser.parse_with_key(raw)
            else {
                match raw {
                    Some(raw) if !raw.is_empty() => {
                        tracing::warn!(id = %image.id, raw, "Unparseable timestamp, image is undated");
                    }
                    _ => tracing::trace!(id = %image.id, "No timestamp, image is undated"),
                }
                undated.push(image);
                continue;
            };

            if self.policy.is_excluded(&day_key) {
                tracing::trace!(id = %image.id, day = %day_key, "Excluded day, dropping image");
                stats.excluded += 1;
                continue;
            }

            buckets
                .entry(day_key)
                .or_insert_with(|| DayBucket {
                    anchor: instant,
                    members: Vec::new(),
                })
                .members
                .push((instant, image));
        }

        let mut shoots: Vec<PhotoShoot<'a>> = buckets
            .into_iter()
            .rev()
            .enumerate()
            .map(|(ordinal, (day_key, mut bucket))| {
                // Stable: equal instants keep input order.
                bucket.members.sort_by_key(|(instant, _)| *instant);
                stats.dated += bucket.members.len();
                PhotoShoot {
                    id: format!("shoot-{ordinal}-{day_key}"),
                    date: bucket.anchor,
                    date_label: self.policy.labels.format_label(&day_key),
                    photographers: self.policy.credits.credits_for(&day_key).to_vec(),
                    images: bucket.members.into_iter().map(|(_, image)| image).collect(),
                }
            })
            .collect();

        stats.undated = undated.len();
        if !undated.is_empty() {
            shoots.push(undated_shoot(undated));
        }

        if shoots.is_empty() && !images.is_empty() {
            tracing::debug!(
                excluded = stats.excluded,
                "Every image was excluded, falling back to a single catch-all shoot"
            );
            shoots.push(catch_all_shoot(images, now));
            stats.catch_all = true;
        }

        stats.shoots = shoots.len();
        tracing::debug!(
            input = stats.input,
            dated = stats.dated,
            undated = stats.undated,
            excluded = stats.excluded,
            shoots = stats.shoots,
            "Clustered images into shoots"
        );

        (shoots, stats)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::types::PhotographerCredit;
    use chrono::TimeZone;

    fn utc_clusterer(policy: ShootPolicy) -> ShootClusterer {
        ShootClusterer::new(policy, TimestampParser::new(ReferenceZone::Utc))
    }

    fn image(id: &str, created: Option<&str>) -> PortfolioImage {
        let img = PortfolioImage::new(id, format!("/api/image/{id}"));
        match created {
            Some(ts) => img.with_created_time(ts),
            None => img,
        }
    }

    fn ids<'a>(shoot: &PhotoShoot<'a>) -> Vec<&'a str> {
        shoot.images.iter().map(|i| i.id.as_str()).collect()
    }

    fn fixed_now() -> DateTime<Utc> {
        Utc.with_ymd_and_hms(2026, 10, 17, 12, 0, 0).unwrap()
    }

    #[test]
    fn test_empty_input_yields_no_shoots() {
        let clusterer = utc_clusterer(ShootPolicy::curated());
        assert!(clusterer.cluster(&[]).is_empty());
    }

    #[test]
    fn test_all_undated_input() {
        let images = vec![image("a", None), image("b", Some("")), image("c", None)];
        let shoots = utc_clusterer(ShootPolicy::curated()).cluster(&images);

        assert_eq!(shoots.len(), 1);
        assert_eq!(shoots[0].id, "shoot-undated");
        assert_eq!(shoots[0].date_label, "Undated");
        assert_eq!(shoots[0].date_iso(), "1970-01-01T00:00:00.000Z");
        assert_eq!(ids(&shoots[0]), ["a", "b", "c"]);
    }

    #[test]
    fn test_denylist_exhaustion_falls_back_to_catch_all() {
        let images = vec![image("only", Some("2026:01:09 10:00:00"))];
        let (shoots, stats) =
            utc_clusterer(ShootPolicy::curated()).cluster_with_stats(&images, fixed_now());

        assert_eq!(shoots.len(), 1);
        assert_eq!(shoots[0].id, "shoot-all");
        assert_eq!(shoots[0].date_label, "All Photos");
        assert_eq!(shoots[0].date, fixed_now());
        assert_eq!(shoots[0].images, vec![&images[0]]);
        assert!(stats.catch_all);
        assert_eq!(stats.excluded, 1);
    }

    #[test]
    fn test_catch_all_via_system_clock_keeps_images() {
        let images = vec![
            image("x", Some("2026:01:09 08:00:00")),
            image("y", Some("2026-01-09T22:00:00Z")),
        ];
        let shoots = utc_clusterer(ShootPolicy::curated()).cluster(&images);
        assert_eq!(shoots.len(), 1);
        assert_eq!(shoots[0].id, "shoot-all");
        assert_eq!(ids(&shoots[0]), ["x", "y"]);
    }

    #[test]
    fn test_excluded_images_dropped_when_others_remain() {
        let images = vec![
            image("hidden", Some("2026:01:09 10:00:00")),
            image("kept", None),
        ];
        let (shoots, stats) =
            utc_clusterer(ShootPolicy::curated()).cluster_with_stats(&images, fixed_now());

        assert_eq!(shoots.len(), 1);
        assert_eq!(shoots[0].id, "shoot-undated");
        assert_eq!(ids(&shoots[0]), ["kept"]);
        assert!(!stats.catch_all);
    }

    #[test]
    fn test_credit_attachment() {
        let images = vec![image("v", Some("2025:12:12 17:45:00"))];
        let shoots = utc_clusterer(ShootPolicy::curated()).cluster(&images);

        assert_eq!(shoots[0].id, "shoot-0-2025-12-12");
        assert_eq!(
            shoots[0].photographers,
            vec![PhotographerCredit::new(
                "@vivo.visuals",
                "https://instagram.com/vivo.visuals"
            )]
        );
        assert_eq!(shoots[0].date_label, "Friday, December 12, 2025");
    }

    #[test]
    fn test_uncredited_day_has_empty_photographers() {
        let images = vec![image("u", Some("2023:03:03 09:00:00"))];
        let shoots = utc_clusterer(ShootPolicy::curated()).cluster(&images);
        assert!(shoots[0].photographers.is_empty());
    }

    #[test]
    fn test_shoots_newest_first_with_undated_last() {
        let images = vec![
            image("mid", Some("2025:07:01 10:00:00")),
            image("none", None),
            image("old", Some("2024-06-30T14:22:10Z")),
            image("new", Some("2026:01:21 09:00:00")),
            image("junk", Some("sometime in june")),
        ];
        let shoots = utc_clusterer(ShootPolicy::curated()).cluster(&images);

        let shoot_ids: Vec<&str> = shoots.iter().map(|s| s.id.as_str()).collect();
        assert_eq!(
            shoot_ids,
            [
                "shoot-0-2026-01-21",
                "shoot-1-2025-07-01",
                "shoot-2-2024-06-30",
                "shoot-undated"
            ]
        );
        assert_eq!(ids(&shoots[3]), ["none", "junk"]);
    }

    #[test]
    fn test_images_within_shoot_are_chronological() {
        let images = vec![
            image("late", Some("2025:11:21 18:00:00")),
            image("early", Some("2025:11:21 08:00:00")),
            image("noon", Some("2025-11-21T12:00:00Z")),
        ];
        let shoots = utc_clusterer(ShootPolicy::curated()).cluster(&images);

        assert_eq!(shoots.len(), 1);
        assert_eq!(ids(&shoots[0]), ["early", "noon", "late"]);
    }

    #[test]
    fn test_equal_instants_keep_input_order() {
        let images = vec![
            image("second", Some("2025:11:22 10:00:00")),
            image("first", Some("2025:11:22 09:00:00")),
            image("tie-a", Some("2025:11:22 10:00:00")),
            image("tie-b", Some("2025-11-22T10:00:00Z")),
        ];
        let shoots = utc_clusterer(ShootPolicy::curated()).cluster(&images);
        assert_eq!(ids(&shoots[0]), ["first", "second", "tie-a", "tie-b"]);
    }

    #[test]
    fn test_anchor_is_first_image_seen() {
        let images = vec![
            image("later", Some("2024:11:12 16:00:00")),
            image("earlier", Some("2024:11:12 09:30:00")),
        ];
        let shoots = utc_clusterer(ShootPolicy::curated()).cluster(&images);
        assert_eq!(shoots[0].date_iso(), "2024-11-12T16:00:00.000Z");
        assert_eq!(ids(&shoots[0]), ["earlier", "later"]);
    }

    #[test]
    fn test_capture_day_survives_zone_conversion() {
        // 23:30 in Honolulu is the next UTC day; the shoot stays on the 21st.
        let clusterer = ShootClusterer::new(
            ShootPolicy::curated(),
            TimestampParser::new(ReferenceZone::Named(chrono_tz::Pacific::Honolulu)),
        );
        let images = vec![
            image("evening", Some("2025:11:21 23:30:00")),
            image("upload", Some("2025-11-22T02:00:00Z")),
        ];
        let shoots = clusterer.cluster(&images);

        let shoot_ids: Vec<&str> = shoots.iter().map(|s| s.id.as_str()).collect();
        assert_eq!(shoot_ids, ["shoot-0-2025-11-22", "shoot-1-2025-11-21"]);
        assert_eq!(shoots[1].photographers[0].name, "@rajailiya");
        assert_eq!(shoots[1].date_iso(), "2025-11-22T09:30:00.000Z");
    }

    #[test]
    fn test_partition_completeness() {
        let images = vec![
            image("1", Some("2026:01:21 10:00:00")),
            image("2", Some("2026:01:09 10:00:00")),
            image("3", None),
            image("4", Some("2026-01-21T11:00:00Z")),
            image("5", Some("2026-01-09T05:00:00Z")),
            image("6", Some("not a date")),
            image("7", Some("2024:11:09 13:00:00")),
        ];
        let (shoots, stats) =
            utc_clusterer(ShootPolicy::curated()).cluster_with_stats(&images, fixed_now());

        let placed: usize = shoots.iter().map(PhotoShoot::len).sum();
        assert_eq!(placed, images.len() - 2);
        assert_eq!(stats.excluded, 2);
        assert_eq!(stats.dated, 3);
        assert_eq!(stats.undated, 2);
        assert_eq!(stats.shoots, 3);

        let mut seen: Vec<&str> = shoots.iter().flat_map(ids).collect();
        seen.sort();
        assert_eq!(seen, ["1", "3", "4", "6", "7"]);
    }

    #[test]
    fn test_injected_policy_replaces_curation() {
        let mut credits = BTreeMap::new();
        credits.insert(
            "2024-02-29".to_string(),
            vec![PhotographerCredit::named("Leap Day Studio")],
        );
        let policy = ShootPolicy {
            excluded_days: BTreeSet::from(["2024-03-01".to_string()]),
            credits: CreditBook::new(credits),
            labels: LabelFormatter::new("%Y/%m/%d").unwrap(),
        };
        let images = vec![
            image("leap", Some("2024:02:29 10:00:00")),
            image("gone", Some("2024:03:01 10:00:00")),
            image("curated-hidden-day", Some("2026:01:09 10:00:00")),
        ];
        let shoots = utc_clusterer(policy).cluster(&images);

        let shoot_ids: Vec<&str> = shoots.iter().map(|s| s.id.as_str()).collect();
        assert_eq!(shoot_ids, ["shoot-0-2026-01-09", "shoot-1-2024-02-29"]);
        assert!(shoots[0].photographers.is_empty());
        assert_eq!(shoots[1].date_label, "2024/02/29");
        assert_eq!(shoots[1].photographers[0].name, "Leap Day Studio");
    }

    #[test]
    fn test_from_config_uses_curated_defaults() {
        let mut config = Config::default();
        config.gallery.timezone = "UTC".to_string();
        let clusterer = ShootClusterer::from_config(&config).unwrap();

        assert_eq!(clusterer.policy(), &ShootPolicy::curated());
        assert_eq!(clusterer.parser().zone(), ReferenceZone::Utc);
    }

    #[test]
    fn test_from_config_rejects_unknown_zone() {
        let mut config = Config::default();
        config.gallery.timezone = "Atlantis/Central".to_string();
        let err = ShootClusterer::from_config(&config).unwrap_err();
        assert!(err.to_string().contains("gallery.timezone"));
    }
}
