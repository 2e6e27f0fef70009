//! Training recommendations from per-region save rates
//!
//! Regions split the diagram horizontally only, at 33 and 66 percent. This
//! is a separate rule from the zone thirds in [`crate::geometry`]: the
//! thresholds differ and every shot counts, inside the goal frame or not.

use crate::{Position, Shot};
use indexmap::IndexMap;
use serde::{Deserialize, Serialize};
use std::fmt;

/// Shots left of this x are in the left region
pub const LEFT_THRESHOLD: f64 = 33.0;
/// Shots right of this x are in the right region
pub const RIGHT_THRESHOLD: f64 = 66.0;
/// Regions saving less than this percentage get a recommendation
pub const RECOMMENDATION_THRESHOLD: f64 = 50.0;

/// Shown by callers when no region needs work
pub const ENCOURAGEMENT: &str = "Great work! Keep maintaining your current training routine.";

/// Horizontal region of the diagram used for coaching
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Region {
    Left,
    Center,
    Right,
}

impl Region {
    pub const ALL: [Region; 3] = [Region::Left, Region::Center, Region::Right];

    pub fn of(position: &Position) -> Self {
        if position.x < LEFT_THRESHOLD {
            Region::Left
        } else if position.x > RIGHT_THRESHOLD {
            Region::Right
        } else {
            Region::Center
        }
    }

    pub fn name(&self) -> &'static str {
        match self {
            Region::Left => "Left",
            Region::Center => "Center",
            Region::Right => "Right",
        }
    }
}

impl fmt::Display for Region {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

/// Shots and raw-flag saves within one region
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct RegionStats {
    pub total: usize,
    pub saved: usize,
}

impl RegionStats {
    /// Plain `saved / total * 100`; NaN for an empty region
    pub fn save_percentage(&self) -> f64 {
        self.saved as f64 / self.total as f64 * 100.0
    }

    /// NaN never compares below the threshold, so empty regions stay quiet
    pub fn needs_work(&self) -> bool {
        self.save_percentage() < RECOMMENDATION_THRESHOLD
    }
}

/// Stats for all three regions, in `Region::ALL` order
pub fn region_stats(shots: &[Shot]) -> IndexMap<Region, RegionStats> {
    let mut regions: IndexMap<Region, RegionStats> = Region::ALL
        .iter()
        .map(|&r| (r, RegionStats::default()))
        .collect();
    for shot in shots {
        let entry = regions.entry(Region::of(&shot.position)).or_default();
        entry.total += 1;
        if shot.saved {
            entry.saved += 1;
        }
    }
    regions
}

/// A coaching suggestion for one region
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TrainingRecommendation {
    pub area: Region,
    pub improvement: String,
    pub drills: Vec<String>,
}

impl TrainingRecommendation {
    pub fn for_region(region: Region) -> Self {
        let name = region.name();
        let lower = name.to_lowercase();
        Self {
            area: region,
            improvement: format!("Improve {} side saves", lower),
            drills: vec![
                format!("{} side diving practice", name),
                format!("Quick reaction {} saves", lower),
                format!("Positioning for {} shots", lower),
            ],
        }
    }
}

/// Recommendations for every region below the save threshold
///
/// Returns an empty list when all regions are at or above it.
pub fn recommend(shots: &[Shot]) -> Vec<TrainingRecommendation> {
    region_stats(shots)
        .into_iter()
        .filter(|(_, stats)| stats.needs_work())
        .map(|(region, _)| TrainingRecommendation::for_region(region))
        .collect()
}
