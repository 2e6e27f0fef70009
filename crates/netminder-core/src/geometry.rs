//! Geometry classification of shot positions
//!
//! The goal diagram is a 100x100 percent grid. Two independent labels are
//! derived from a position:
//! - whether it lies inside the goal frame (the central 50% x 50%)
//! - which of the 9 zones it falls in (thirds of each axis)
//!
//! Every band is left-closed and right-open except the last, which extends
//! to infinity, so no finite position is left unclassified.

use crate::{Position, Shot};
use serde::{Deserialize, Serialize};
use std::fmt;

/// Left and top edge of the goal frame
pub const GOAL_MIN: f64 = 25.0;
/// Right and bottom edge of the goal frame
pub const GOAL_MAX: f64 = 75.0;

/// Boundary between the first and second third of an axis
pub const FIRST_THIRD: f64 = 33.33;
/// Boundary between the second and last third of an axis
pub const SECOND_THIRD: f64 = 66.66;

/// Radius, in percent, within which a tap selects an existing shot
pub const HIT_RADIUS: f64 = 5.0;

/// True iff both coordinates lie in `[GOAL_MIN, GOAL_MAX]`
pub fn is_inside_goal(position: &Position) -> bool {
    let frame = GOAL_MIN..=GOAL_MAX;
    frame.contains(&position.x) && frame.contains(&position.y)
}

/// Horizontal third of the diagram
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum HorizontalBand {
    Left,
    Center,
    Right,
}

impl HorizontalBand {
    pub fn of(x: f64) -> Self {
        if x < FIRST_THIRD {
            HorizontalBand::Left
        } else if x < SECOND_THIRD {
            HorizontalBand::Center
        } else {
            HorizontalBand::Right
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            HorizontalBand::Left => "left",
            HorizontalBand::Center => "center",
            HorizontalBand::Right => "right",
        }
    }
}

/// Vertical third of the diagram
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum VerticalBand {
    Upper,
    Middle,
    Lower,
}

impl VerticalBand {
    pub fn of(y: f64) -> Self {
        if y < FIRST_THIRD {
            VerticalBand::Upper
        } else if y < SECOND_THIRD {
            VerticalBand::Middle
        } else {
            VerticalBand::Lower
        }
    }

    /// Prefix used in zone names; the middle band has none
    pub fn prefix(&self) -> Option<&'static str> {
        match self {
            VerticalBand::Upper => Some("upper"),
            VerticalBand::Middle => None,
            VerticalBand::Lower => Some("low"),
        }
    }
}

/// One of the 9 named regions of the goal diagram
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Zone {
    #[serde(rename = "upper left")]
    UpperLeft,
    #[serde(rename = "upper center")]
    UpperCenter,
    #[serde(rename = "upper right")]
    UpperRight,
    #[serde(rename = "left")]
    Left,
    #[serde(rename = "center")]
    Center,
    #[serde(rename = "right")]
    Right,
    #[serde(rename = "low left")]
    LowLeft,
    #[serde(rename = "low center")]
    LowCenter,
    #[serde(rename = "low right")]
    LowRight,
}

impl Zone {
    /// All zones, top row first, left to right
    pub const ALL: [Zone; 9] = [
        Zone::UpperLeft,
        Zone::UpperCenter,
        Zone::UpperRight,
        Zone::Left,
        Zone::Center,
        Zone::Right,
        Zone::LowLeft,
        Zone::LowCenter,
        Zone::LowRight,
    ];

    /// Combine a vertical and a horizontal band
    pub fn from_bands(vertical: VerticalBand, horizontal: HorizontalBand) -> Self {
        use HorizontalBand as H;
        use VerticalBand as V;
        match (vertical, horizontal) {
            (V::Upper, H::Left) => Zone::UpperLeft,
            (V::Upper, H::Center) => Zone::UpperCenter,
            (V::Upper, H::Right) => Zone::UpperRight,
            (V::Middle, H::Left) => Zone::Left,
            (V::Middle, H::Center) => Zone::Center,
            (V::Middle, H::Right) => Zone::Right,
            (V::Lower, H::Left) => Zone::LowLeft,
            (V::Lower, H::Center) => Zone::LowCenter,
            (V::Lower, H::Right) => Zone::LowRight,
        }
    }

    pub fn vertical(&self) -> VerticalBand {
        match self {
            Zone::UpperLeft | Zone::UpperCenter | Zone::UpperRight => VerticalBand::Upper,
            Zone::Left | Zone::Center | Zone::Right => VerticalBand::Middle,
            Zone::LowLeft | Zone::LowCenter | Zone::LowRight => VerticalBand::Lower,
        }
    }

    pub fn horizontal(&self) -> HorizontalBand {
        match self {
            Zone::UpperLeft | Zone::Left | Zone::LowLeft => HorizontalBand::Left,
            Zone::UpperCenter | Zone::Center | Zone::LowCenter => HorizontalBand::Center,
            Zone::UpperRight | Zone::Right | Zone::LowRight => HorizontalBand::Right,
        }
    }

    /// Display name, e.g. `"upper left"`, `"center"`, `"low right"`
    pub fn name(&self) -> &'static str {
        match self {
            Zone::UpperLeft => "upper left",
            Zone::UpperCenter => "upper center",
            Zone::UpperRight => "upper right",
            Zone::Left => "left",
            Zone::Center => "center",
            Zone::Right => "right",
            Zone::LowLeft => "low left",
            Zone::LowCenter => "low center",
            Zone::LowRight => "low right",
        }
    }
}

impl fmt::Display for Zone {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

/// Zone label of a position, independent of the goal frame
pub fn classify_zone(position: &Position) -> Zone {
    Zone::from_bands(VerticalBand::of(position.y), HorizontalBand::of(position.x))
}

/// Both geometry labels of a position
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Classification {
    pub inside_goal: bool,
    pub zone: Zone,
}

pub fn classify(position: &Position) -> Classification {
    Classification {
        inside_goal: is_inside_goal(position),
        zone: classify_zone(position),
    }
}

/// First shot strictly closer than `radius` to `position`
pub fn find_near<'a>(shots: &'a [Shot], position: &Position, radius: f64) -> Option<&'a Shot> {
    shots
        .iter()
        .find(|shot| shot.position.distance_to(position) < radius)
}
