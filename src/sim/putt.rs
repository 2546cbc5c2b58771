//! One-dimensional putting mini-game
//!
//! On the green the 2D distance to the cup is mapped onto a fixed-length
//! lane. The ball always starts at the left edge, the cup sits at the lane
//! centre, and the right half stands for overshoot (up to half the remaining
//! distance again). A ping-pong gauge picks the power; locking it rolls the
//! ball with constant deceleration so it stops at `gauge * distance_to_cup`
//! unless it drops first.

use glam::Vec2;
use serde::{Deserialize, Serialize};

use crate::consts::*;
use crate::direction_or;

/// What a putt step produced
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub enum PuttOutcome {
    /// Ball dropped; the mini-game is over
    Holed,
    /// Ball stopped short (or long); lane re-mapped from `world`
    Stopped { world: Vec2 },
}

/// Ping-pong power gauge, always within [0, 1]
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct PowerGauge {
    pub value: f32,
    /// +1 rising, -1 falling
    pub direction: f32,
}

impl Default for PowerGauge {
    fn default() -> Self {
        Self {
            value: 0.0,
            direction: 1.0,
        }
    }
}

impl PowerGauge {
    /// Sweep by `dt`, reversing at the bounds
    pub fn update(&mut self, dt: f32) {
        self.value += self.direction * GAUGE_RATE * dt;
        if self.value >= 1.0 {
            self.value = 1.0;
            self.direction = -1.0;
        }
        if self.value <= 0.0 {
            self.value = 0.0;
            self.direction = 1.0;
        }
    }
}

/// Lane layout in lane units
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct PuttLane {
    pub start: f32,
    pub cup: f32,
    pub end: f32,
}

impl PuttLane {
    pub fn new(length: f32) -> Self {
        let length = length.max(2.0);
        Self {
            start: 0.0,
            cup: length / 2.0,
            end: length,
        }
    }

    #[inline]
    pub fn distance_to_cup(&self) -> f32 {
        (self.cup - self.start).max(1.0)
    }
}

/// Live putting mini-game
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PuttState {
    pub lane: PuttLane,
    /// Ball position along the lane
    pub ball_x: f32,
    /// Lane velocity (units/s, +x toward the cup)
    pub velocity: f32,
    pub gauge: PowerGauge,
    /// Gauge running, waiting for the lock
    pub selecting: bool,
    pub rolling: bool,
    /// World point the current lane starts from
    pub start_world: Vec2,
    pub cup_world: Vec2,
    /// World distance start -> cup
    pub world_distance: f32,
    /// Unit direction start -> cup
    pub world_dir: Vec2,
    /// Lane units per world unit on the approach half
    pub scale: f32,
}

impl PuttState {
    pub fn new(start_world: Vec2, cup_world: Vec2) -> Self {
        Self::with_lane(start_world, cup_world, PuttLane::new(LANE_LENGTH))
    }

    pub fn with_lane(start_world: Vec2, cup_world: Vec2, lane: PuttLane) -> Self {
        let mut state = Self {
            lane,
            ball_x: lane.start,
            velocity: 0.0,
            gauge: PowerGauge::default(),
            selecting: true,
            rolling: false,
            start_world,
            cup_world,
            world_distance: 0.0,
            world_dir: Vec2::X,
            scale: 1.0,
        };
        state.remap(start_world);
        state
    }

    /// Re-map the lane from a new resting point and put the ball back on the left edge
    fn remap(&mut self, start_world: Vec2) {
        self.start_world = start_world;
        self.world_distance = start_world.distance(self.cup_world);
        self.world_dir = direction_or(start_world, self.cup_world, Vec2::X);
        self.scale = if self.world_distance > 1e-4 {
            self.lane.distance_to_cup() / self.world_distance
        } else {
            1.0
        };
        self.ball_x = self.lane.start;
        self.velocity = 0.0;
    }

    /// Lock the gauge and strike. Returns false when not selecting.
    pub fn lock(&mut self) -> bool {
        if self.rolling || !self.selecting {
            return false;
        }
        self.selecting = false;
        let desired = self.gauge.value.clamp(0.0, 1.0) * self.lane.distance_to_cup();
        self.velocity = launch_velocity(desired);
        self.rolling = true;
        log::debug!(
            "Putt locked at {:.2}: aiming {:.1} lane units, v0 {:.1}",
            self.gauge.value,
            desired,
            self.velocity
        );
        true
    }

    /// Leave the mini-game at the ball's projected world position.
    /// Not allowed while the ball is rolling.
    pub fn cancel(&self) -> Option<Vec2> {
        if self.rolling {
            None
        } else {
            Some(self.world_from_lane(self.ball_x))
        }
    }

    /// Advance gauge or ball by `dt`
    pub fn advance(&mut self, dt: f32) -> Option<PuttOutcome> {
        if self.selecting {
            self.gauge.update(dt);
        }
        if !self.rolling {
            return None;
        }

        let prev_x = self.ball_x;
        let v = self.velocity;
        let sign = if v >= 0.0 { 1.0 } else { -1.0 };
        let stop_time = v.abs() / PUTT_DECELERATION;
        if stop_time <= dt {
            // Comes to rest inside this step
            self.ball_x += v * stop_time / 2.0;
            self.velocity = 0.0;
        } else {
            let v_next = v - sign * PUTT_DECELERATION * dt;
            self.ball_x += (v + v_next) / 2.0 * dt;
            self.velocity = v_next;
        }
        self.ball_x = self.ball_x.clamp(self.lane.start, self.lane.end);

        // Cup window, swept in either direction
        let cup = self.lane.cup;
        let near_cup = (self.ball_x - cup).abs() <= PUTT_CUP_RADIUS - 2.0;
        let seg_min = prev_x.min(self.ball_x);
        let seg_max = prev_x.max(self.ball_x);
        let crossed = seg_min <= cup + PUTT_CUP_RADIUS && seg_max >= cup - PUTT_CUP_RADIUS;
        if (crossed || near_cup) && self.velocity.abs() < HOLE_OUT_SPEED {
            self.rolling = false;
            self.velocity = 0.0;
            self.ball_x = cup;
            return Some(PuttOutcome::Holed);
        }

        if self.velocity.abs() <= PUTT_STOP_SPEED {
            let world = self.world_from_lane(self.ball_x);
            self.remap(world);
            self.rolling = false;
            self.selecting = true;
            return Some(PuttOutcome::Stopped { world });
        }
        None
    }

    /// Lane position back to course space. Left of the cup is the
    /// approach; right of it is overshoot capped at half the distance again.
    pub fn world_from_lane(&self, x: f32) -> Vec2 {
        let d = self.world_distance;
        let lane = &self.lane;
        let dist = if x <= lane.cup {
            let t = ((x - lane.start) / (lane.cup - lane.start).max(1.0)).clamp(0.0, 1.0);
            t * d
        } else {
            let t = ((x - lane.cup) / (lane.end - lane.cup).max(1.0)).clamp(0.0, 1.0);
            d + t * d * 0.5
        };
        let clamped = dist.clamp(0.0, (d * 1.5).max(d + 1.0));
        self.start_world + self.world_dir * clamped
    }
}

/// Launch speed that stops after `distance` under constant deceleration
#[inline]
pub fn launch_velocity(distance: f32) -> f32 {
    (2.0 * PUTT_DECELERATION * distance.max(0.0)).sqrt()
}
