//! Hole state and core simulation types
//!
//! Everything the stroke state machine mutates during a hole lives in
//! `HoleState`; it is rebuilt from scratch when a hole starts or resets.

use glam::Vec2;
use serde::{Deserialize, Serialize};

use super::club::{ClubKey, ClubSpec};
use super::course::{Hole, Tree, scatter_trees};
use super::lie::{LieKind, classify};
use super::putt::PuttState;
use super::trajectory::{ShotPreview, Terrain};
use crate::geom::WorldBounds;
use crate::scorecard::ScoreLabel;

/// Current phase of the stroke cycle
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub enum StrokePhase {
    /// Ball at rest, waiting for a pointer-down on it
    Aiming,
    /// Pointer held; the preview follows the pointer
    Dragging { start: Vec2, current: Vec2 },
    /// Shot committed, ball rolling
    Executing,
    /// Ball just stopped; hazard, cup and green checks run next tick
    Settled,
    /// The putting mini-game owns the ball
    Putting,
    /// Ball is in the cup and the score label is showing
    HoleOut { remaining: f32, label: ScoreLabel },
    /// Terminal for the hole
    HoleComplete,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum PenaltyReason {
    Water,
    #[serde(rename = "ob")]
    OutOfBounds,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum HoleResult {
    Out,
}

/// Events produced by a tick, consumed by the host
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "camelCase")]
pub enum GameEvent {
    Shot { strokes: u32 },
    Entered { lie: LieKind },
    PuttMode { on: bool },
    Penalty { amount: u32, reason: PenaltyReason },
    Hole { result: HoleResult, strokes: u32, par: u32 },
}

/// First-entry flags, one per lie
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct EnteredFlags {
    pub fairway: bool,
    pub rough: bool,
    pub sand: bool,
    pub water: bool,
    pub green: bool,
}

impl EnteredFlags {
    fn slot(&mut self, lie: LieKind) -> &mut bool {
        match lie {
            LieKind::Fairway => &mut self.fairway,
            LieKind::Rough => &mut self.rough,
            LieKind::Sand => &mut self.sand,
            LieKind::Water => &mut self.water,
            LieKind::Green => &mut self.green,
        }
    }

    /// Mark `lie` entered; true only the first time
    pub fn mark(&mut self, lie: LieKind) -> bool {
        let slot = self.slot(lie);
        let first = !*slot;
        *slot = true;
        first
    }

    pub fn has(&self, lie: LieKind) -> bool {
        match lie {
            LieKind::Fairway => self.fairway,
            LieKind::Rough => self.rough,
            LieKind::Sand => self.sand,
            LieKind::Water => self.water,
            LieKind::Green => self.green,
        }
    }
}

/// The ball and the player's running state for a hole
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Ball {
    pub pos: Vec2,
    pub vel: Vec2,
    /// Most recent slow, dry spot; where penalties drop the ball
    pub last_safe: Vec2,
    pub entered: EnteredFlags,
    pub club: ClubKey,
    pub strokes: u32,
    pub putt_mode: bool,
    pub holed: bool,
}

impl Ball {
    pub fn at_tee(tee: Vec2) -> Self {
        Self {
            pos: tee,
            vel: Vec2::ZERO,
            last_safe: tee,
            entered: EnteredFlags::default(),
            club: ClubKey::default(),
            strokes: 0,
            putt_mode: false,
            holed: false,
        }
    }

    #[inline]
    pub fn speed(&self) -> f32 {
        self.vel.length()
    }

    /// Put the ball down at rest
    pub fn place(&mut self, pos: Vec2) {
        self.pos = pos;
        self.vel = Vec2::ZERO;
    }
}

/// Complete per-hole state (deterministic, serializable)
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct HoleState {
    pub hole: Hole,
    pub world: WorldBounds,
    /// Seed the trees were placed from
    pub tree_seed: u64,
    pub trees: Vec<Tree>,
    pub ball: Ball,
    pub phase: StrokePhase,
    /// Aim preview while dragging
    pub preview: Option<ShotPreview>,
    /// Only present while putting
    pub putt: Option<PuttState>,
    /// Player backed out of the putting mini-game on this green visit
    pub putt_declined: bool,
    /// Ball in motion was struck with the 2D putter
    pub putter_stroke: bool,
    /// Keep the full path in previews
    pub debug_preview: bool,
    /// Simulation tick counter
    pub time_ticks: u64,
}

impl HoleState {
    /// Start a hole with `tree_count` trees placed from `tree_seed`
    pub fn new(hole: Hole, world: WorldBounds, tree_seed: u64, tree_count: usize) -> Self {
        let trees = scatter_trees(&hole, &world, tree_seed, tree_count);
        Self::with_trees(hole, world, tree_seed, trees)
    }

    /// Start a hole with an explicit obstacle set
    pub fn with_trees(hole: Hole, world: WorldBounds, tree_seed: u64, trees: Vec<Tree>) -> Self {
        log::info!(
            "Hole start: par {}, tee ({:.0}, {:.0}), cup ({:.0}, {:.0}), {} trees",
            hole.par,
            hole.tee.x,
            hole.tee.y,
            hole.cup.x,
            hole.cup.y,
            trees.len()
        );
        Self {
            ball: Ball::at_tee(hole.tee),
            hole,
            world,
            tree_seed,
            trees,
            phase: StrokePhase::Aiming,
            preview: None,
            putt: None,
            putt_declined: false,
            putter_stroke: false,
            debug_preview: false,
            time_ticks: 0,
        }
    }

    /// Same hole, same trees, fresh ball
    pub fn restart(&mut self) {
        log::info!("Hole reset after {} strokes", self.ball.strokes);
        let club = self.ball.club;
        self.ball = Ball::at_tee(self.hole.tee);
        self.ball.club = club;
        self.phase = StrokePhase::Aiming;
        self.preview = None;
        self.putt = None;
        self.putt_declined = false;
        self.putter_stroke = false;
    }

    pub fn terrain(&self) -> Terrain<'_> {
        Terrain {
            hole: &self.hole,
            world: &self.world,
            trees: &self.trees,
        }
    }

    pub fn lie(&self) -> LieKind {
        classify(&self.hole, self.ball.pos)
    }

    pub fn club_spec(&self) -> &'static ClubSpec {
        self.ball.club.spec()
    }

    pub fn is_complete(&self) -> bool {
        self.phase == StrokePhase::HoleComplete
    }
}
