//! Deterministic simulation module
//!
//! All gameplay logic lives here. This module must be pure and deterministic:
//! - Fixed timestep only
//! - Seeded RNG only (tree placement)
//! - No rendering or platform dependencies

pub mod club;
pub mod collision;
pub mod course;
pub mod lie;
pub mod putt;
pub mod state;
pub mod tick;
pub mod trajectory;

pub use club::{CLUBS, ClubKey, ClubSpec, PUTTER};
pub use collision::{CollisionResult, ball_tree_collision, reflect_velocity};
pub use course::{Course, Hole, TerrainZone, Tree, ZoneKind, scatter_trees};
pub use lie::{LieKind, classify};
pub use putt::{PowerGauge, PuttOutcome, PuttState};
pub use state::{Ball, GameEvent, HoleResult, HoleState, PenaltyReason, StrokePhase};
pub use tick::{PointerEvent, TickInput, tick};
pub use trajectory::{ShotOutcome, ShotPreview, Trajectory, preview_shot, simulate};
