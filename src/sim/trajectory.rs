//! Fixed-timestep ball integrator
//!
//! One step function drives both the aim preview and the committed shot, so
//! what the player is shown is exactly what the ball will do at `SIM_DT`.

use glam::Vec2;
use serde::{Deserialize, Serialize};

use super::club::ClubSpec;
use super::collision::{TreeResponse, ball_tree_collision, resolve_tree_hit};
use super::course::{Hole, Tree};
use super::lie::{LieKind, classify};
use crate::consts::*;
use crate::geom::WorldBounds;
use crate::{point_along, polyline_length};

/// Where a simulated shot ended up
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum ShotOutcome {
    Fairway,
    Rough,
    Sand,
    Water,
    Green,
    OutOfBounds,
    Cup,
}

impl From<LieKind> for ShotOutcome {
    fn from(lie: LieKind) -> Self {
        match lie {
            LieKind::Fairway => ShotOutcome::Fairway,
            LieKind::Rough => ShotOutcome::Rough,
            LieKind::Sand => ShotOutcome::Sand,
            LieKind::Water => ShotOutcome::Water,
            LieKind::Green => ShotOutcome::Green,
        }
    }
}

/// Geometry the ball moves through
#[derive(Debug, Clone, Copy)]
pub struct Terrain<'a> {
    pub hole: &'a Hole,
    pub world: &'a WorldBounds,
    pub trees: &'a [Tree],
}

/// Result of advancing the ball by one step
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum StepResult {
    Rolling,
    /// At rest on the given lie
    Stopped(LieKind),
    OutOfBounds,
    /// Dropped; position snapped to the cup
    Cup,
}

impl StepResult {
    pub fn outcome(&self) -> Option<ShotOutcome> {
        match self {
            StepResult::Rolling => None,
            StepResult::Stopped(lie) => Some((*lie).into()),
            StepResult::OutOfBounds => Some(ShotOutcome::OutOfBounds),
            StepResult::Cup => Some(ShotOutcome::Cup),
        }
    }
}

/// Per-step factor adjusted for a frame of length `dt`
#[inline]
fn per_frame(factor: f32, dt: f32) -> f32 {
    let scale = dt / SIM_DT;
    if (scale - 1.0).abs() < 1e-6 {
        factor
    } else {
        factor.max(0.0).powf(scale)
    }
}

/// Advance the ball by `dt`: move, bounds, cup, trees, air drag, lie friction, stop.
pub fn advance_ball(
    pos: &mut Vec2,
    vel: &mut Vec2,
    club: &ClubSpec,
    terrain: &Terrain,
    dt: f32,
) -> StepResult {
    *pos += *vel * dt;

    if !terrain.world.contains(*pos) {
        return StepResult::OutOfBounds;
    }

    // Capture uses the speed before this step's friction
    let speed = vel.length();
    if pos.distance(terrain.hole.cup) < CUP_CAPTURE_RADIUS && speed < CUP_CAPTURE_SPEED {
        *pos = terrain.hole.cup;
        *vel = Vec2::ZERO;
        return StepResult::Cup;
    }

    for tree in terrain.trees {
        let hit = ball_tree_collision(*pos, BALL_RADIUS, tree);
        if hit.hit && resolve_tree_hit(pos, vel, &hit) == TreeResponse::Stopped {
            return StepResult::Stopped(classify(terrain.hole, *pos));
        }
    }

    *vel *= per_frame(1.0 - club.air_drag_coefficient(), dt);

    let lie = classify(terrain.hole, *pos);
    *vel *= per_frame(lie.roll_retention(club.spin), dt);

    if vel.length() < STOP_SPEED {
        *vel = Vec2::ZERO;
        return StepResult::Stopped(lie);
    }
    StepResult::Rolling
}

/// A simulated shot
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Trajectory {
    /// Start point, every `PATH_SAMPLE_EVERY`th step, and the final point
    pub path: Vec<Vec2>,
    pub outcome: ShotOutcome,
    pub steps: usize,
}

impl Trajectory {
    pub fn end(&self) -> Vec2 {
        self.path.last().copied().unwrap_or_default()
    }
}

/// Simulate a shot to completion. Always terminates within `MAX_SIM_STEPS`.
pub fn simulate(start: Vec2, v0: Vec2, club: &ClubSpec, terrain: &Terrain) -> Trajectory {
    let mut path = Vec::with_capacity(MAX_SIM_STEPS / PATH_SAMPLE_EVERY + 2);
    path.push(start);
    let mut pos = start;
    let mut vel = v0;

    for step in 1..=MAX_SIM_STEPS {
        let result = advance_ball(&mut pos, &mut vel, club, terrain, SIM_DT);
        if let Some(outcome) = result.outcome() {
            path.push(pos);
            return Trajectory {
                path,
                outcome,
                steps: step,
            };
        }
        if step % PATH_SAMPLE_EVERY == 0 {
            path.push(pos);
        }
    }

    log::warn!("Shot simulation hit the {} step cap", MAX_SIM_STEPS);
    if path.last() != Some(&pos) {
        path.push(pos);
    }
    let outcome = if terrain.world.contains(pos) {
        classify(terrain.hole, pos).into()
    } else {
        ShotOutcome::OutOfBounds
    };
    Trajectory {
        path,
        outcome,
        steps: MAX_SIM_STEPS,
    }
}

/// Share of a shot spent in the air, from the lie it's played from
pub fn carry_fraction(club: &ClubSpec, lie: LieKind) -> f32 {
    let m = lie.modifier();
    let carry = club.carry_coeff * m.carry;
    let run = club.run_coeff * m.run * (1.0 - SPIN_RUN_REDUCTION * club.spin);
    let total = carry + run;
    if total <= f32::EPSILON {
        1.0
    } else {
        (carry / total).clamp(0.0, 1.0)
    }
}

/// Distance an unobstructed shot rolls on a uniform lie, in closed form
pub fn estimate_roll_distance(speed: f32, club: &ClubSpec, lie: LieKind) -> f32 {
    let r = (1.0 - club.air_drag_coefficient()) * lie.roll_retention(club.spin);
    if speed <= 0.0 {
        return 0.0;
    }
    // Anything that stops after the first step travels exactly one step
    if r <= 0.0 || speed * r < STOP_SPEED {
        return speed * SIM_DT;
    }
    if r >= 1.0 {
        return speed * SIM_DT * MAX_SIM_STEPS as f32;
    }
    // Steps until speed * r^n drops below the stop threshold
    let x = (STOP_SPEED / speed).ln() / r.ln();
    let n = ((x.floor() as i64) + 1).clamp(1, MAX_SIM_STEPS as i64) as i32;
    speed * SIM_DT * (1.0 - r.powi(n)) / (1.0 - r)
}

/// Non-committal aim preview
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ShotPreview {
    /// Path up to the landing point
    pub path: Vec<Vec2>,
    pub landing: Vec2,
    /// Where the full shot would finish
    pub outcome: ShotOutcome,
    pub carry_fraction: f32,
    /// Unclipped path, only kept when the debug preview is on
    pub full_path: Option<Vec<Vec2>>,
}

/// Points of `path` within `len` of the start, ending exactly at `len`
fn clip_path(path: &[Vec2], len: f32) -> (Vec<Vec2>, Vec2) {
    let landing = point_along(path, len).unwrap_or_default();
    let mut clipped = Vec::new();
    let mut travelled = 0.0;
    let mut prev: Option<Vec2> = None;
    for &p in path {
        if let Some(q) = prev {
            travelled += q.distance(p);
        }
        if travelled > len {
            break;
        }
        clipped.push(p);
        prev = Some(p);
    }
    if clipped.last() != Some(&landing) {
        clipped.push(landing);
    }
    (clipped, landing)
}

fn build_preview(trajectory: Trajectory, fraction: f32, debug: bool) -> ShotPreview {
    let total = polyline_length(&trajectory.path);
    let (path, landing) = clip_path(&trajectory.path, total * fraction);
    ShotPreview {
        path,
        landing,
        outcome: trajectory.outcome,
        carry_fraction: fraction,
        full_path: debug.then_some(trajectory.path),
    }
}

/// Preview a full shot, clipped to its carry
pub fn preview_shot(
    start: Vec2,
    v0: Vec2,
    club: &ClubSpec,
    terrain: &Terrain,
    debug: bool,
) -> ShotPreview {
    let fraction = carry_fraction(club, classify(terrain.hole, start));
    build_preview(simulate(start, v0, club, terrain), fraction, debug)
}

/// Preview a roll along the ground (putter); nothing is clipped
pub fn preview_roll(
    start: Vec2,
    v0: Vec2,
    club: &ClubSpec,
    terrain: &Terrain,
    debug: bool,
) -> ShotPreview {
    build_preview(simulate(start, v0, club, terrain), 1.0, debug)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::geom::Polygon;
    use crate::sim::club::ClubKey;
    use crate::sim::course::{TerrainZone, ZoneKind};

    /// Open fairway, cup far off to the side
    fn open_hole() -> (Hole, WorldBounds) {
        let hole = Hole {
            par: 4,
            tee: Vec2::ZERO,
            cup: Vec2::new(900.0, 450.0),
            zones: vec![TerrainZone {
                kind: ZoneKind::Fairway,
                shape: Polygon::rect(Vec2::new(-100.0, -100.0), Vec2::new(1000.0, 500.0)),
            }],
        };
        (hole, WorldBounds::new(Vec2::new(-100.0, -100.0), Vec2::new(1000.0, 500.0)))
    }

    #[test]
    fn test_open_fairway_matches_closed_form() {
        let (hole, world) = open_hole();
        let terrain = Terrain {
            hole: &hole,
            world: &world,
            trees: &[],
        };
        let club = ClubKey::SevenIron.spec();
        let v0 = club.shot_velocity(Vec2::X);
        let traj = simulate(Vec2::ZERO, v0, club, &terrain);

        assert_eq!(traj.outcome, ShotOutcome::Fairway);
        let expected = estimate_roll_distance(club.shot_speed(), club, LieKind::Fairway);
        let actual = traj.end().distance(Vec2::ZERO);
        assert!(
            (actual - expected).abs() < 1.0,
            "actual {actual} expected {expected}"
        );
        assert!(traj.end().y.abs() < 1e-4);
    }

    #[test]
    fn test_simulation_deterministic() {
        let course = crate::sim::course::Course::sample();
        let hole = &course.holes[0];
        let trees = crate::sim::course::scatter_trees(hole, &course.world, 9, 15);
        let terrain = Terrain {
            hole,
            world: &course.world,
            trees: &trees,
        };
        let club = ClubKey::Driver.spec();
        let v0 = club.shot_velocity(Vec2::new(1.0, -0.6));
        let a = simulate(hole.tee, v0, club, &terrain);
        let b = simulate(hole.tee, v0, club, &terrain);
        assert_eq!(a, b);
    }

    #[test]
    fn test_out_of_bounds() {
        let (hole, world) = open_hole();
        let terrain = Terrain {
            hole: &hole,
            world: &world,
            trees: &[],
        };
        let club = ClubKey::Driver.spec();
        let traj = simulate(Vec2::new(0.0, 400.0), club.shot_velocity(Vec2::Y), club, &terrain);
        assert_eq!(traj.outcome, ShotOutcome::OutOfBounds);
        assert!(!world.contains(traj.end()));
    }

    #[test]
    fn test_slow_ball_drops_in_cup() {
        let (hole, world) = open_hole();
        let terrain = Terrain {
            hole: &hole,
            world: &world,
            trees: &[],
        };
        let start = hole.cup - Vec2::new(12.0, 0.0);
        let traj = simulate(start, Vec2::new(28.0, 0.0), &crate::sim::club::PUTTER, &terrain);
        assert_eq!(traj.outcome, ShotOutcome::Cup);
        assert_eq!(traj.end(), hole.cup);
    }

    #[test]
    fn test_fast_ball_passes_over_cup() {
        let (hole, world) = open_hole();
        let terrain = Terrain {
            hole: &hole,
            world: &world,
            trees: &[],
        };
        let start = hole.cup - Vec2::new(60.0, 0.0);
        // 300 units/s moves 5 units a step, so some step lands inside the radius
        let traj = simulate(start, Vec2::new(300.0, 0.0), &crate::sim::club::PUTTER, &terrain);
        assert_ne!(traj.outcome, ShotOutcome::Cup);
        assert!(traj.end().x > hole.cup.x);
    }

    #[test]
    fn test_water_stops_ball() {
        let (mut hole, world) = open_hole();
        hole.zones.push(TerrainZone {
            kind: ZoneKind::Water,
            shape: Polygon::rect(Vec2::new(100.0, -50.0), Vec2::new(200.0, 50.0)),
        });
        let terrain = Terrain {
            hole: &hole,
            world: &world,
            trees: &[],
        };
        let club = ClubKey::Driver.spec();
        let traj = simulate(Vec2::ZERO, club.shot_velocity(Vec2::X), club, &terrain);
        assert_eq!(traj.outcome, ShotOutcome::Water);
        assert!(traj.end().x >= 100.0 && traj.end().x <= 200.0);
    }

    #[test]
    fn test_tree_deflects_fast_ball() {
        let (hole, world) = open_hole();
        let trees = [Tree::new(Vec2::new(400.0, 3.0))];
        let terrain = Terrain {
            hole: &hole,
            world: &world,
            trees: &trees,
        };
        let club = ClubKey::Driver.spec();
        let clear = simulate(Vec2::ZERO, club.shot_velocity(Vec2::X), club, &Terrain { trees: &[], ..terrain });
        let blocked = simulate(Vec2::ZERO, club.shot_velocity(Vec2::X), club, &terrain);
        assert!(blocked.end().distance(Vec2::ZERO) < clear.end().distance(Vec2::ZERO));
        // Never left inside the trunk
        assert!(blocked.end().distance(trees[0].pos) >= trees[0].radius + BALL_RADIUS - 1e-3);
    }

    #[test]
    fn test_step_cap_terminates() {
        // Huge fairway and a huge launch speed: the ball is still rolling at the cap
        let far = Vec2::splat(1e13);
        let hole = Hole {
            par: 4,
            tee: Vec2::ZERO,
            cup: Vec2::new(900.0, 450.0),
            zones: vec![TerrainZone {
                kind: ZoneKind::Fairway,
                shape: Polygon::rect(-far, far),
            }],
        };
        let world = WorldBounds::new(-far, far);
        let terrain = Terrain {
            hole: &hole,
            world: &world,
            trees: &[],
        };
        let traj = simulate(
            Vec2::ZERO,
            Vec2::new(1e12, 0.0),
            &crate::sim::club::PUTTER,
            &terrain,
        );
        assert_eq!(traj.steps, MAX_SIM_STEPS);
        assert_eq!(traj.outcome, ShotOutcome::Fairway);
    }

    #[test]
    fn test_carry_fraction() {
        let driver = ClubKey::Driver.spec();
        let wedge = ClubKey::Wedge.spec();
        let f = carry_fraction(driver, LieKind::Fairway);
        // 0.5*0.95 / (0.475 + 0.95*1.0*0.875)
        assert!((f - 0.475 / (0.475 + 0.83125)).abs() < 1e-5);
        // Wedges fly, drivers run
        assert!(carry_fraction(wedge, LieKind::Fairway) > f);
        // Sand kills the run, so more of the shot is carry
        assert!(carry_fraction(driver, LieKind::Sand) > f);
        assert_eq!(carry_fraction(&crate::sim::club::PUTTER, LieKind::Green), 0.0);
    }

    #[test]
    fn test_preview_clipped_to_carry() {
        let (hole, world) = open_hole();
        let terrain = Terrain {
            hole: &hole,
            world: &world,
            trees: &[],
        };
        let club = ClubKey::FiveIron.spec();
        let v0 = club.shot_velocity(Vec2::X);
        let full = simulate(Vec2::ZERO, v0, club, &terrain);
        let preview = preview_shot(Vec2::ZERO, v0, club, &terrain, false);

        let full_len = polyline_length(&full.path);
        let carry_len = polyline_length(&preview.path);
        assert!((carry_len - full_len * preview.carry_fraction).abs() < 1e-2);
        assert_eq!(preview.landing, *preview.path.last().unwrap());
        assert_eq!(preview.outcome, full.outcome);
        assert!(preview.full_path.is_none());

        let debug = preview_shot(Vec2::ZERO, v0, club, &terrain, true);
        assert_eq!(debug.full_path.as_deref(), Some(full.path.as_slice()));
    }

    #[test]
    fn test_frame_rate_independent_friction() {
        let (hole, world) = open_hole();
        let terrain = Terrain {
            hole: &hole,
            world: &world,
            trees: &[],
        };
        let club = ClubKey::SevenIron.spec();
        let mut pos_a = Vec2::ZERO;
        let mut vel_a = Vec2::new(300.0, 0.0);
        advance_ball(&mut pos_a, &mut vel_a, club, &terrain, SIM_DT);
        advance_ball(&mut pos_a, &mut vel_a, club, &terrain, SIM_DT);

        let mut pos_b = Vec2::ZERO;
        let mut vel_b = Vec2::new(300.0, 0.0);
        advance_ball(&mut pos_b, &mut vel_b, club, &terrain, 2.0 * SIM_DT);
        // Same speed loss over the same time
        assert!((vel_a.length() - vel_b.length()).abs() < 1e-2);
    }
}
