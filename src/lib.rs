//! Mini Golf - A top-down miniature golf shot simulator
//!
//! Core modules:
//! - `geom`: Polygons and point containment
//! - `sim`: Deterministic simulation (lies, clubs, trajectories, strokes, putting)
//! - `scorecard`: Scoring labels and the in-session scorecard
//! - `settings`: Startup preferences
//! - `demo`: Scripted player used by the headless binary

pub mod demo;
pub mod error;
pub mod geom;
pub mod scorecard;
pub mod settings;
pub mod sim;

pub use error::GolfError;
pub use scorecard::{ScoreLabel, Scorecard};
pub use settings::Settings;

use glam::Vec2;

/// Game configuration constants
pub mod consts {
    /// Fixed simulation timestep (60 Hz)
    pub const SIM_DT: f32 = 1.0 / 60.0;
    /// Maximum substeps per frame to prevent spiral of death
    pub const MAX_SUBSTEPS: u32 = 8;

    /// Default world rectangle
    pub const WORLD_WIDTH: f32 = 1280.0;
    pub const WORLD_HEIGHT: f32 = 720.0;

    /// Ball and cup
    pub const BALL_RADIUS: f32 = 5.0;
    pub const CUP_CAPTURE_RADIUS: f32 = 9.0;
    /// Ball must be slower than this (pre-friction) to drop
    pub const CUP_CAPTURE_SPEED: f32 = 30.0;
    /// Green radius used when a hole has no green zone
    pub const GREEN_FALLBACK_RADIUS: f32 = 60.0;

    /// Shot speed for a club with max_power 1.0 (units/s)
    pub const BASE_SPEED: f32 = 600.0;

    /// Trajectory integrator limits
    pub const MAX_SIM_STEPS: usize = 1200;
    pub const PATH_SAMPLE_EVERY: usize = 6;
    /// Ball is at rest below this speed
    pub const STOP_SPEED: f32 = 2.0;

    /// Friction tuning
    pub const SPIN_ROLL_DAMPING: f32 = 0.01;
    pub const SPIN_RUN_REDUCTION: f32 = 0.5;

    /// Trees
    pub const TREE_RADIUS: f32 = 14.0;
    pub const TREE_REBOUND_SPEED: f32 = 40.0;
    pub const TREE_RESTITUTION: f32 = 0.4;
    pub const TREE_CLEARANCE: f32 = 60.0;
    pub const TREE_PLACEMENT_ATTEMPTS_PER_TREE: usize = 50;

    /// Input handling
    pub const INPUT_LOCK_SPEED: f32 = 10.0;
    pub const DRAG_GRAB_RADIUS: f32 = 24.0;
    pub const MIN_DRAG_DISTANCE: f32 = 8.0;

    /// last_safe is only recorded below this speed
    pub const SAFE_SPEED: f32 = 12.0;

    /// 2D putter stroke (drag length sets power)
    pub const PUTTER_DRAG_SCALE: f32 = 3.0;
    pub const PUTTER_MAX_SPEED: f32 = 400.0;

    /// Putting lane (1D mini-game)
    pub const LANE_LENGTH: f32 = 600.0;
    pub const PUTT_DECELERATION: f32 = 320.0;
    pub const PUTT_CUP_RADIUS: f32 = 10.0;
    pub const HOLE_OUT_SPEED: f32 = 260.0;
    pub const PUTT_STOP_SPEED: f32 = 1.0;
    /// Gauge sweeps per second (one bound to the other)
    pub const GAUGE_RATE: f32 = 1.35;

    /// How long the scoring label shows before the hole completes
    pub const HOLE_OUT_DISPLAY_SECS: f32 = 0.9;
}

/// Unit vector from `from` toward `to`, or `fallback` when the points coincide
#[inline]
pub fn direction_or(from: Vec2, to: Vec2, fallback: Vec2) -> Vec2 {
    let d = to - from;
    if d.length_squared() > 1e-8 {
        d.normalize()
    } else {
        fallback
    }
}

/// Point at `dist` along the polyline, clamped to its ends
pub fn point_along(path: &[Vec2], dist: f32) -> Option<Vec2> {
    let first = *path.first()?;
    let mut remaining = dist.max(0.0);
    let mut prev = first;
    for &p in &path[1..] {
        let seg = p.distance(prev);
        if seg >= remaining && seg > 0.0 {
            return Some(prev.lerp(p, remaining / seg));
        }
        remaining -= seg;
        prev = p;
    }
    Some(prev)
}

/// Total length of a polyline
pub fn polyline_length(path: &[Vec2]) -> f32 {
    path.windows(2).map(|w| w[0].distance(w[1])).sum()
}
