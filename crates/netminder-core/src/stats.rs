//! Aggregate statistics over a snapshot of shots
//!
//! All functions here are pure counts over a borrowed slice: the result does
//! not depend on the order of the input and the input is never modified.
//!
//! Two notions of "saved" are in use:
//! - The summary, zone and half stats only credit a save when the shot was
//!   inside the goal frame. A shot outside the frame is a miss whatever its
//!   flag says.
//! - The date trend, session comparison and outcome distribution count the
//!   raw `saved` flag.

use crate::geometry::{is_inside_goal, Zone};
use crate::{Error, Game, GameId, Half, Result, Shot};
use chrono::{DateTime, NaiveDate, TimeZone};
use indexmap::IndexMap;
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::fmt;
use std::str::FromStr;

/// `part / whole * 100`, or `0` when `whole` is zero
pub fn save_percentage(part: usize, whole: usize) -> f64 {
    if whole == 0 {
        0.0
    } else {
        part as f64 / whole as f64 * 100.0
    }
}

/// Headline numbers for a collection of shots
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ShotSummary {
    pub total_shots: usize,
    /// Saved and inside the goal frame
    pub saved_shots: usize,
    /// Not saved and inside the goal frame
    pub goals_scored: usize,
    /// Outside the goal frame
    pub missed_shots: usize,
    pub save_percentage: f64,
}

impl ShotSummary {
    pub fn from_shots(shots: &[Shot]) -> Self {
        let mut summary = Self {
            total_shots: shots.len(),
            ..Self::default()
        };
        for shot in shots {
            match (shot.is_inside_goal(), shot.saved) {
                (true, true) => summary.saved_shots += 1,
                (true, false) => summary.goals_scored += 1,
                (false, _) => summary.missed_shots += 1,
            }
        }
        summary.save_percentage = save_percentage(summary.saved_shots, summary.total_shots);
        summary
    }
}

/// Shot count and saves within one zone
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct ZoneStats {
    pub total: usize,
    pub saved: usize,
}

impl ZoneStats {
    /// Saves as a percentage of shots, `None` for an empty zone
    pub fn save_rate(&self) -> Option<f64> {
        (self.total > 0).then(|| self.saved as f64 / self.total as f64 * 100.0)
    }
}

/// Per-zone stats for the 9 zones, in `Zone::ALL` order
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct ZoneBreakdown {
    zones: IndexMap<Zone, ZoneStats>,
}

impl ZoneBreakdown {
    fn empty() -> Self {
        Self {
            zones: Zone::ALL.iter().map(|&z| (z, ZoneStats::default())).collect(),
        }
    }

    /// Stats for a single zone
    pub fn get(&self, zone: Zone) -> ZoneStats {
        self.zones.get(&zone).copied().unwrap_or_default()
    }

    pub fn iter(&self) -> impl Iterator<Item = (Zone, ZoneStats)> + '_ {
        self.zones.iter().map(|(z, s)| (*z, *s))
    }

    /// Sum of shots over all zones
    pub fn total(&self) -> usize {
        self.zones.values().map(|s| s.total).sum()
    }
}

/// Zone stats over shots inside the goal frame
///
/// Shots outside the frame still have a nominal zone but are left out.
pub fn zone_stats(shots: &[Shot]) -> ZoneBreakdown {
    let mut breakdown = ZoneBreakdown::empty();
    for shot in shots.iter().filter(|s| s.is_inside_goal()) {
        let entry = breakdown.zones.entry(shot.zone()).or_default();
        entry.total += 1;
        if shot.saved {
            entry.saved += 1;
        }
    }
    breakdown
}

/// Saves, goals and misses within one half
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct HalfStats {
    pub saves: usize,
    pub goals: usize,
    pub misses: usize,
}

impl HalfStats {
    pub fn from_shots<'a>(shots: impl IntoIterator<Item = &'a Shot>) -> Self {
        let mut stats = Self::default();
        for shot in shots {
            if !is_inside_goal(&shot.position) {
                stats.misses += 1;
            } else if shot.saved {
                stats.saves += 1;
            } else {
                stats.goals += 1;
            }
        }
        stats
    }

    pub fn total(&self) -> usize {
        self.saves + self.goals + self.misses
    }
}

/// Half stats for both halves of a game
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct HalfSplit {
    pub first: HalfStats,
    pub second: HalfStats,
}

impl HalfSplit {
    pub fn get(&self, half: Half) -> HalfStats {
        match half {
            Half::First => self.first,
            Half::Second => self.second,
        }
    }
}

/// Split shots into halves, unassigned shots going to the first half
pub fn half_stats(shots: &[Shot]) -> HalfSplit {
    HalfSplit {
        first: HalfStats::from_shots(shots.iter().filter(|s| s.effective_half() == Half::First)),
        second: HalfStats::from_shots(shots.iter().filter(|s| s.effective_half() == Half::Second)),
    }
}

/// Which shots a half selector keeps
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum HalfFilter {
    #[default]
    All,
    First,
    Second,
}

impl HalfFilter {
    pub fn matches(&self, shot: &Shot) -> bool {
        match self {
            HalfFilter::All => true,
            HalfFilter::First => shot.effective_half() == Half::First,
            HalfFilter::Second => shot.effective_half() == Half::Second,
        }
    }
}

impl From<Half> for HalfFilter {
    fn from(half: Half) -> Self {
        match half {
            Half::First => HalfFilter::First,
            Half::Second => HalfFilter::Second,
        }
    }
}

impl fmt::Display for HalfFilter {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let s = match self {
            HalfFilter::All => "all",
            HalfFilter::First => "first",
            HalfFilter::Second => "second",
        };
        f.write_str(s)
    }
}

impl FromStr for HalfFilter {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self> {
        match s.trim().to_ascii_lowercase().as_str() {
            "all" => Ok(HalfFilter::All),
            "first" => Ok(HalfFilter::First),
            "second" => Ok(HalfFilter::Second),
            _ => Err(Error::InvalidHalfFilter(s.to_string())),
        }
    }
}

/// Shots kept by a half selector
pub fn filter_by_half(shots: &[Shot], filter: HalfFilter) -> Vec<Shot> {
    shots.iter().filter(|s| filter.matches(s)).cloned().collect()
}

/// Shots belonging to one game
pub fn filter_by_game(shots: &[Shot], game_id: &GameId) -> Vec<Shot> {
    shots
        .iter()
        .filter(|s| &s.game_id == game_id)
        .cloned()
        .collect()
}

/// Save percentage trend point for one calendar date
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct DailyStats {
    pub date: NaiveDate,
    pub total: usize,
    pub saved: usize,
    /// Rounded to the nearest integer
    pub percentage: u32,
}

/// Group shots by calendar date in `tz`, ascending
///
/// Saves follow the `ShotSummary` rule: saved and inside the goal frame.
/// Time of day is discarded. Timestamps outside chrono's representable
/// range are skipped.
pub fn daily_stats<Tz: TimeZone>(shots: &[Shot], tz: &Tz) -> Vec<DailyStats> {
    let mut by_date: BTreeMap<NaiveDate, (usize, usize)> = BTreeMap::new();
    for shot in shots {
        let Some(utc) = DateTime::from_timestamp_millis(shot.timestamp) else {
            continue;
        };
        let date = utc.with_timezone(tz).date_naive();
        let entry = by_date.entry(date).or_default();
        entry.0 += 1;
        if shot.saved && shot.is_inside_goal() {
            entry.1 += 1;
        }
    }

    by_date
        .into_iter()
        .map(|(date, (total, saved))| DailyStats {
            date,
            total,
            saved,
            percentage: save_percentage(saved, total).round() as u32,
        })
        .collect()
}

/// `daily_stats` in the local time zone
pub fn daily_stats_local(shots: &[Shot]) -> Vec<DailyStats> {
    daily_stats(shots, &chrono::Local)
}

/// One row of a session comparison
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SessionStats {
    pub game_id: GameId,
    pub name: String,
    pub saves: usize,
    pub total: usize,
    /// Rounded to one decimal place, `0` for a game without shots
    pub percentage: f64,
}

/// Compare games side by side, in the order given
pub fn compare_sessions(games: &[Game], shots: &[Shot]) -> Vec<SessionStats> {
    let mut counts: IndexMap<&GameId, (usize, usize)> =
        games.iter().map(|g| (&g.id, (0, 0))).collect();
    for shot in shots {
        if let Some(entry) = counts.get_mut(&shot.game_id) {
            entry.0 += 1;
            if shot.saved {
                entry.1 += 1;
            }
        }
    }

    games
        .iter()
        .map(|game| {
            let (total, saves) = counts.get(&game.id).copied().unwrap_or_default();
            SessionStats {
                game_id: game.id.clone(),
                name: game.name.clone(),
                saves,
                total,
                percentage: (save_percentage(saves, total) * 10.0).round() / 10.0,
            }
        })
        .collect()
}

/// Saves versus goals by raw flag
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct OutcomeDistribution {
    pub saves: usize,
    pub goals: usize,
}

pub fn outcome_distribution(shots: &[Shot]) -> OutcomeDistribution {
    let saves = shots.iter().filter(|s| s.saved).count();
    OutcomeDistribution {
        saves,
        goals: shots.len() - saves,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{Position, ShotId};
    use chrono::{FixedOffset, Utc};

    fn shot(id: &str, x: f64, y: f64, saved: bool) -> Shot {
        Shot::new(
            ShotId::new(id),
            GameId::new("game1"),
            Position::unchecked(x, y),
            saved,
            0,
        )
    }

    #[test]
    fn test_empty_collection() {
        let summary = ShotSummary::from_shots(&[]);
        assert_eq!(summary.total_shots, 0);
        assert_eq!(summary.save_percentage, 0.0);
        assert!(!summary.save_percentage.is_nan());
        assert_eq!(zone_stats(&[]).total(), 0);
        assert!(daily_stats(&[], &Utc).is_empty());
    }

    #[test]
    fn test_morning_practice_summary() {
        // (80, 20) is outside the frame, so it counts as a miss rather than a goal
        let shots = vec![
            shot("s1", 30.0, 70.0, true),
            shot("s2", 80.0, 20.0, false),
            shot("s3", 50.0, 50.0, true),
        ];
        let summary = ShotSummary::from_shots(&shots);

        assert_eq!(summary.total_shots, 3);
        assert_eq!(summary.saved_shots, 2);
        assert_eq!(summary.goals_scored, 0);
        assert_eq!(summary.missed_shots, 1);
        assert!((summary.save_percentage - 66.67).abs() < 0.01);
    }

    #[test]
    fn test_saved_flag_outside_frame_is_a_miss() {
        let shots = vec![shot("s1", 10.0, 50.0, true), shot("s2", 50.0, 50.0, false)];
        let summary = ShotSummary::from_shots(&shots);

        assert_eq!(summary.saved_shots, 0);
        assert_eq!(summary.goals_scored, 1);
        assert_eq!(summary.missed_shots, 1);
        assert_eq!(summary.save_percentage, 0.0);
    }

    #[test]
    fn test_corner_shot_excluded_from_zones() {
        let shots = vec![shot("s1", 10.0, 10.0, false)];
        let summary = ShotSummary::from_shots(&shots);
        assert_eq!(summary.missed_shots, 1);
        assert_eq!(shots[0].zone(), Zone::UpperLeft);

        let zones = zone_stats(&shots);
        assert_eq!(zones.get(Zone::UpperLeft).total, 0);
        assert_eq!(zones.total(), 0);
    }

    #[test]
    fn test_zone_stats() {
        let shots = vec![
            shot("s1", 50.0, 50.0, true),
            shot("s2", 55.0, 45.0, false),
            shot("s3", 30.0, 70.0, true),
            shot("s4", 90.0, 90.0, true),
        ];
        let zones = zone_stats(&shots);

        assert_eq!(zones.get(Zone::Center), ZoneStats { total: 2, saved: 1 });
        assert_eq!(zones.get(Zone::Center).save_rate(), Some(50.0));
        assert_eq!(zones.get(Zone::LowLeft).save_rate(), Some(100.0));
        assert_eq!(zones.get(Zone::LowRight).save_rate(), None);
        assert_eq!(zones.total(), 3);

        let order: Vec<Zone> = zones.iter().map(|(z, _)| z).collect();
        assert_eq!(order, Zone::ALL.to_vec());
    }

    #[test]
    fn test_half_stats_unassigned_counts_as_first() {
        let shots = vec![
            shot("s1", 50.0, 50.0, true).with_half(Half::First),
            shot("s2", 50.0, 50.0, false),
            shot("s3", 5.0, 50.0, false).with_half(Half::Second),
            shot("s4", 60.0, 40.0, true).with_half(Half::Second),
        ];
        let split = half_stats(&shots);

        assert_eq!(split.first, HalfStats { saves: 1, goals: 1, misses: 0 });
        assert_eq!(split.second, HalfStats { saves: 1, goals: 0, misses: 1 });
        assert_eq!(split.first.total() + split.second.total(), shots.len());
    }

    #[test]
    fn test_half_filter() {
        let shots = vec![
            shot("s1", 50.0, 50.0, true).with_half(Half::Second),
            shot("s2", 50.0, 50.0, false),
        ];
        assert_eq!(filter_by_half(&shots, HalfFilter::All).len(), 2);
        assert_eq!(filter_by_half(&shots, HalfFilter::Second)[0].id.as_str(), "s1");
        assert_eq!(filter_by_half(&shots, HalfFilter::First)[0].id.as_str(), "s2");
        assert_eq!("Second".parse::<HalfFilter>(), Ok(HalfFilter::Second));
        assert!("both".parse::<HalfFilter>().is_err());
    }

    #[test]
    fn test_filter_by_game() {
        let mut other = shot("s2", 50.0, 50.0, true);
        other.game_id = GameId::new("game2");
        let shots = vec![shot("s1", 50.0, 50.0, true), other];

        let filtered = filter_by_game(&shots, &GameId::new("game2"));
        assert_eq!(filtered.len(), 1);
        assert_eq!(filtered[0].id.as_str(), "s2");
    }

    #[test]
    fn test_daily_stats_groups_by_date_in_zone() {
        // 2024-01-15 09:05 and 23:30 UTC, 2024-01-16 14:05 UTC
        let mut a = shot("a", 50.0, 50.0, true);
        a.timestamp = 1_705_309_500_000;
        let mut b = shot("b", 50.0, 50.0, false);
        b.timestamp = 1_705_361_400_000;
        let mut c = shot("c", 50.0, 50.0, false);
        c.timestamp = 1_705_413_900_000;
        let shots = vec![c.clone(), a.clone(), b.clone()];

        let utc = daily_stats(&shots, &Utc);
        assert_eq!(utc.len(), 2);
        assert_eq!(utc[0].date, NaiveDate::from_ymd_opt(2024, 1, 15).unwrap());
        assert_eq!((utc[0].total, utc[0].saved, utc[0].percentage), (2, 1, 50));
        assert_eq!(utc[1].percentage, 0);

        // One hour east pushes 23:30 into the next day
        let east = FixedOffset::east_opt(3600).unwrap();
        let shifted = daily_stats(&shots, &east);
        assert_eq!(shifted[0].total, 1);
        assert_eq!(shifted[0].percentage, 100);
        assert_eq!(shifted[1].total, 2);
    }

    #[test]
    fn test_daily_percentage_rounds() {
        let mut shots = vec![
            shot("a", 50.0, 50.0, true),
            shot("b", 50.0, 50.0, true),
            shot("c", 50.0, 50.0, false),
        ];
        for s in &mut shots {
            s.timestamp = 1_705_309_500_000;
        }
        assert_eq!(daily_stats(&shots, &Utc)[0].percentage, 67);
    }

    #[test]
    fn test_daily_saves_ignore_shots_outside_frame() {
        let mut shots = vec![shot("wide", 10.0, 50.0, true), shot("in", 50.0, 50.0, true)];
        for s in &mut shots {
            s.timestamp = 1_705_309_500_000;
        }

        let days = daily_stats(&shots, &Utc);
        assert_eq!(days.len(), 1);
        assert_eq!((days[0].total, days[0].saved, days[0].percentage), (2, 1, 50));
        assert_eq!(
            days[0].percentage as f64,
            ShotSummary::from_shots(&shots).save_percentage
        );
    }

    #[test]
    fn test_compare_sessions() {
        let game = |id: &str, name: &str| Game {
            id: GameId::new(id),
            name: name.to_string(),
            goalkeeper: "Default".to_string(),
            opponent: None,
            tournament: None,
            created_at: Utc::now(),
            notes: None,
        };
        let games = vec![game("game1", "Morning"), game("game2", "Empty")];
        let shots = vec![
            shot("s1", 50.0, 50.0, true),
            shot("s2", 50.0, 50.0, false),
            shot("s3", 50.0, 50.0, false),
        ];

        let rows = compare_sessions(&games, &shots);
        assert_eq!(rows.len(), 2);
        assert_eq!(rows[0].name, "Morning");
        assert_eq!((rows[0].saves, rows[0].total), (1, 3));
        assert_eq!(rows[0].percentage, 33.3);
        assert_eq!(rows[1].total, 0);
        assert_eq!(rows[1].percentage, 0.0);
    }

    #[test]
    fn test_outcome_distribution_uses_raw_flag() {
        let shots = vec![shot("s1", 5.0, 5.0, true), shot("s2", 50.0, 50.0, false)];
        assert_eq!(
            outcome_distribution(&shots),
            OutcomeDistribution { saves: 1, goals: 1 }
        );
    }

    mod proptests {
        use super::*;
        use proptest::prelude::*;

        fn arb_shot() -> impl Strategy<Value = Shot> {
            (0.0f64..=100.0, 0.0f64..=100.0, any::<bool>(), prop::option::of(any::<bool>()))
                .prop_map(|(x, y, saved, half)| {
                    let mut s = shot("p", x, y, saved);
                    s.half = half.map(|second| if second { Half::Second } else { Half::First });
                    s
                })
        }

        proptest! {
            /// Property: every shot is exactly one of save, goal or miss
            #[test]
            fn prop_outcomes_partition_total(shots in prop::collection::vec(arb_shot(), 0..60)) {
                let s = ShotSummary::from_shots(&shots);
                prop_assert_eq!(s.saved_shots + s.goals_scored + s.missed_shots, s.total_shots);
                prop_assert!(!s.save_percentage.is_nan());
                prop_assert!((0.0..=100.0).contains(&s.save_percentage));
            }

            /// Property: zone totals cover exactly the inside-goal shots
            #[test]
            fn prop_zone_totals_match_inside_goal(
                shots in prop::collection::vec(arb_shot(), 0..60)
            ) {
                let inside = shots.iter().filter(|s| s.is_inside_goal()).count();
                prop_assert_eq!(zone_stats(&shots).total(), inside);
            }

            /// Property: halves partition the collection
            #[test]
            fn prop_halves_partition(shots in prop::collection::vec(arb_shot(), 0..60)) {
                let split = half_stats(&shots);
                prop_assert_eq!(split.first.total() + split.second.total(), shots.len());
            }

            /// Property: aggregation ignores input order
            #[test]
            fn prop_order_independent(
                shots in prop::collection::vec(arb_shot(), 0..40),
                seed in any::<u64>()
            ) {
                let mut shuffled = shots.clone();
                // Deterministic rotation plus reversal gives a different order per seed
                if !shuffled.is_empty() {
                    let k = (seed as usize) % shuffled.len();
                    shuffled.rotate_left(k);
                }
                if seed % 2 == 0 {
                    shuffled.reverse();
                }

                prop_assert_eq!(
                    ShotSummary::from_shots(&shots),
                    ShotSummary::from_shots(&shuffled)
                );
                prop_assert_eq!(zone_stats(&shots), zone_stats(&shuffled));
                prop_assert_eq!(half_stats(&shots), half_stats(&shuffled));
            }
        }
    }
}
