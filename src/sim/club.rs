//! Club catalog and the shot physics model
//!
//! Shot speed comes from the club alone: `BASE_SPEED * max_power` along the
//! aim direction. How far the player drags only sets the direction, so club
//! choice is the one power lever.

use glam::Vec2;
use serde::{Deserialize, Serialize};

use crate::consts::BASE_SPEED;

/// Selectable clubs, in catalog order
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
pub enum ClubKey {
    #[serde(rename = "1w")]
    Driver,
    #[serde(rename = "5i")]
    FiveIron,
    #[default]
    #[serde(rename = "7i")]
    SevenIron,
    #[serde(rename = "9i")]
    NineIron,
    #[serde(rename = "56w")]
    Wedge,
}

/// Physical coefficients of a club
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct ClubSpec {
    pub label: &'static str,
    /// Weight of the aerial part of the shot
    pub carry_coeff: f32,
    /// Weight of the rolling part of the shot
    pub run_coeff: f32,
    /// Shot speed multiplier
    pub max_power: f32,
    /// 0..1, higher reduces roll and air drag
    pub spin: f32,
    /// Only feeds the air drag formula (no vertical flight)
    pub launch_angle_deg: f32,
}

pub static CLUBS: [ClubSpec; 5] = [
    ClubSpec {
        label: "1W",
        carry_coeff: 0.5,
        run_coeff: 0.95,
        max_power: 1.6,
        spin: 0.25,
        launch_angle_deg: 12.0,
    },
    ClubSpec {
        label: "5I",
        carry_coeff: 0.4,
        run_coeff: 0.85,
        max_power: 1.35,
        spin: 0.35,
        launch_angle_deg: 18.0,
    },
    ClubSpec {
        label: "7I",
        carry_coeff: 0.3,
        run_coeff: 0.75,
        max_power: 1.15,
        spin: 0.45,
        launch_angle_deg: 22.0,
    },
    ClubSpec {
        label: "9I",
        carry_coeff: 0.2,
        run_coeff: 0.6,
        max_power: 1.0,
        spin: 0.6,
        launch_angle_deg: 26.0,
    },
    ClubSpec {
        label: "56°",
        carry_coeff: 0.1,
        run_coeff: 0.2,
        max_power: 0.75,
        spin: 0.9,
        launch_angle_deg: 52.0,
    },
];

/// Used for 2D strokes on the green; never in the selectable catalog.
/// Its speed comes from the drag, not from `max_power`.
pub static PUTTER: ClubSpec = ClubSpec {
    label: "PT",
    carry_coeff: 0.0,
    run_coeff: 1.0,
    max_power: 0.0,
    spin: 0.0,
    launch_angle_deg: 0.0,
};

impl ClubKey {
    pub const ORDER: [ClubKey; 5] = [
        ClubKey::Driver,
        ClubKey::FiveIron,
        ClubKey::SevenIron,
        ClubKey::NineIron,
        ClubKey::Wedge,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            ClubKey::Driver => "1w",
            ClubKey::FiveIron => "5i",
            ClubKey::SevenIron => "7i",
            ClubKey::NineIron => "9i",
            ClubKey::Wedge => "56w",
        }
    }

    pub fn from_key(s: &str) -> Option<Self> {
        match s.to_lowercase().as_str() {
            "1w" | "driver" => Some(ClubKey::Driver),
            "5i" => Some(ClubKey::FiveIron),
            "7i" => Some(ClubKey::SevenIron),
            "9i" => Some(ClubKey::NineIron),
            "56w" | "sw" | "wedge" => Some(ClubKey::Wedge),
            _ => None,
        }
    }

    /// Unknown keys fall back to the default club
    pub fn parse_or_default(s: &str) -> Self {
        Self::from_key(s).unwrap_or_else(|| {
            log::warn!("Unknown club '{}', using {}", s, ClubKey::default().as_str());
            ClubKey::default()
        })
    }

    pub fn spec(&self) -> &'static ClubSpec {
        &CLUBS[self.index()]
    }

    fn index(&self) -> usize {
        match self {
            ClubKey::Driver => 0,
            ClubKey::FiveIron => 1,
            ClubKey::SevenIron => 2,
            ClubKey::NineIron => 3,
            ClubKey::Wedge => 4,
        }
    }

    /// Next club in catalog order (wraps)
    pub fn next(&self) -> Self {
        Self::ORDER[(self.index() + 1) % Self::ORDER.len()]
    }

    /// Previous club in catalog order (wraps)
    pub fn prev(&self) -> Self {
        Self::ORDER[(self.index() + Self::ORDER.len() - 1) % Self::ORDER.len()]
    }
}

impl ClubSpec {
    /// Launch speed of a full shot
    #[inline]
    pub fn shot_speed(&self) -> f32 {
        BASE_SPEED * self.max_power
    }

    /// Launch velocity along `aim`. A zero aim gives a zero velocity.
    pub fn shot_velocity(&self, aim: Vec2) -> Vec2 {
        aim.normalize_or_zero() * self.shot_speed()
    }

    /// Fraction of speed lost to air each simulation step
    pub fn air_drag_coefficient(&self) -> f32 {
        (0.004 + 0.004 * (self.launch_angle_deg / 52.0) - 0.002 * self.spin).clamp(0.0, 0.02)
    }
}
