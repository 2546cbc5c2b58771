//! Course data: holes, terrain zones, and tree obstacles
//!
//! Courses are immutable once loaded. Trees are placed at hole setup from an
//! explicit seed so a layout can always be reproduced.

use std::path::Path;

use glam::Vec2;
use rand::{Rng, SeedableRng};
use rand_pcg::Pcg32;
use serde::{Deserialize, Serialize};

use super::lie::{LieKind, classify};
use crate::consts::*;
use crate::error::GolfError;
use crate::geom::{Polygon, WorldBounds};

/// What a terrain polygon represents
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum ZoneKind {
    Fairway,
    Rough,
    Sand,
    Water,
    Green,
    /// Decorative only, never affects play
    Wall,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TerrainZone {
    pub kind: ZoneKind,
    pub shape: Polygon,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Hole {
    pub par: u32,
    pub tee: Vec2,
    pub cup: Vec2,
    #[serde(default)]
    pub zones: Vec<TerrainZone>,
}

/// A circular obstacle
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Tree {
    pub pos: Vec2,
    pub radius: f32,
}

impl Tree {
    pub fn new(pos: Vec2) -> Self {
        Self {
            pos,
            radius: TREE_RADIUS,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Course {
    pub id: String,
    pub name: String,
    #[serde(default)]
    pub world: WorldBounds,
    pub holes: Vec<Hole>,
}

impl Course {
    /// Parse and validate a course from JSON
    pub fn from_json(json: &str) -> Result<Self, GolfError> {
        let course: Course = serde_json::from_str(json)?;
        course.validate()?;
        Ok(course)
    }

    /// Load a course file
    pub fn load(path: &Path) -> Result<Self, GolfError> {
        let json = std::fs::read_to_string(path)?;
        let course = Self::from_json(&json)?;
        log::info!(
            "Loaded course '{}' ({} holes) from {}",
            course.name,
            course.holes.len(),
            path.display()
        );
        Ok(course)
    }

    /// Reject courses that can't be played. Degenerate zones are only
    /// warned about since the classifier ignores them anyway.
    pub fn validate(&self) -> Result<(), GolfError> {
        if self.holes.is_empty() {
            return Err(GolfError::Validation(format!(
                "course '{}' has no holes",
                self.id
            )));
        }
        let size = self.world.size();
        if size.x <= 0.0 || size.y <= 0.0 {
            return Err(GolfError::Validation("world rectangle is empty".into()));
        }
        for (i, hole) in self.holes.iter().enumerate() {
            let n = i + 1;
            if hole.par == 0 {
                return Err(GolfError::Validation(format!("hole {n}: par must be positive")));
            }
            if !self.world.contains(hole.tee) {
                return Err(GolfError::Validation(format!("hole {n}: tee is out of bounds")));
            }
            if !self.world.contains(hole.cup) {
                return Err(GolfError::Validation(format!("hole {n}: cup is out of bounds")));
            }
            for zone in hole.zones.iter().filter(|z| z.shape.is_degenerate()) {
                log::warn!(
                    "hole {n}: {:?} zone has {} points and will be ignored",
                    zone.kind,
                    zone.shape.points.len()
                );
            }
        }
        Ok(())
    }

    pub fn hole(&self, index: usize) -> Option<&Hole> {
        self.holes.get(index)
    }

    pub fn total_par(&self) -> u32 {
        self.holes.iter().map(|h| h.par).sum()
    }

    /// Built-in three hole course
    pub fn sample() -> Self {
        let fairway = |pts: &[(f32, f32)]| TerrainZone {
            kind: ZoneKind::Fairway,
            shape: Polygon::new(pts.iter().map(|&(x, y)| Vec2::new(x, y)).collect()),
        };
        let octagon = |kind: ZoneKind, cx: f32, cy: f32, r: f32| TerrainZone {
            kind,
            shape: Polygon::new(
                (0..8)
                    .map(|i| {
                        let a = i as f32 * std::f32::consts::FRAC_PI_4;
                        Vec2::new(cx + r * a.cos(), cy + r * a.sin())
                    })
                    .collect(),
            ),
        };

        let hole1 = Hole {
            par: 4,
            tee: Vec2::new(120.0, 600.0),
            cup: Vec2::new(1100.0, 160.0),
            zones: vec![
                fairway(&[
                    (60.0, 650.0),
                    (60.0, 550.0),
                    (500.0, 420.0),
                    (1000.0, 120.0),
                    (1200.0, 110.0),
                    (1200.0, 230.0),
                    (640.0, 520.0),
                    (200.0, 690.0),
                ]),
                octagon(ZoneKind::Water, 760.0, 420.0, 60.0),
                octagon(ZoneKind::Sand, 980.0, 300.0, 45.0),
                octagon(ZoneKind::Green, 1100.0, 160.0, 70.0),
            ],
        };

        let hole2 = Hole {
            par: 3,
            tee: Vec2::new(160.0, 180.0),
            cup: Vec2::new(1060.0, 520.0),
            zones: vec![
                fairway(&[
                    (100.0, 120.0),
                    (260.0, 120.0),
                    (1140.0, 440.0),
                    (1140.0, 600.0),
                    (980.0, 600.0),
                    (100.0, 240.0),
                ]),
                octagon(ZoneKind::Water, 600.0, 420.0, 80.0),
                octagon(ZoneKind::Sand, 900.0, 560.0, 40.0),
                octagon(ZoneKind::Green, 1060.0, 520.0, 65.0),
            ],
        };

        let hole3 = Hole {
            par: 5,
            tee: Vec2::new(120.0, 360.0),
            cup: Vec2::new(1140.0, 360.0),
            zones: vec![
                fairway(&[
                    (60.0, 300.0),
                    (1200.0, 280.0),
                    (1200.0, 440.0),
                    (60.0, 420.0),
                ]),
                octagon(ZoneKind::Water, 640.0, 560.0, 100.0),
                octagon(ZoneKind::Sand, 820.0, 330.0, 40.0),
                octagon(ZoneKind::Wall, 640.0, 60.0, 30.0),
            ],
        };

        Self {
            id: "sample-links".into(),
            name: "Sample Links".into(),
            world: WorldBounds::default(),
            holes: vec![hole1, hole2, hole3],
        }
    }
}

/// Place up to `count` trees in the rough, clear of the tee, the cup, and
/// each other. Rejection sampling gives up after a fixed number of attempts
/// per tree, so fewer trees may come back on crowded holes.
pub fn scatter_trees(hole: &Hole, world: &WorldBounds, seed: u64, count: usize) -> Vec<Tree> {
    let mut trees: Vec<Tree> = Vec::with_capacity(count);
    let r = TREE_RADIUS;
    let size = world.size();
    if count == 0 || size.x <= 2.0 * r || size.y <= 2.0 * r {
        return trees;
    }

    let mut rng = Pcg32::seed_from_u64(seed);
    let max_attempts = count * TREE_PLACEMENT_ATTEMPTS_PER_TREE;
    let mut attempts = 0;

    while trees.len() < count && attempts < max_attempts {
        attempts += 1;
        let pos = Vec2::new(
            rng.random_range(world.min.x + r..world.max.x - r),
            rng.random_range(world.min.y + r..world.max.y - r),
        );

        if classify(hole, pos) != LieKind::Rough {
            continue;
        }
        if pos.distance(hole.tee) < TREE_CLEARANCE || pos.distance(hole.cup) < TREE_CLEARANCE {
            continue;
        }
        // Leave a ball-width gap between trunks
        let min_gap = 2.0 * r + 2.0 * BALL_RADIUS;
        if trees.iter().any(|t| t.pos.distance(pos) < min_gap) {
            continue;
        }
        trees.push(Tree::new(pos));
    }

    if trees.len() < count {
        log::debug!(
            "Placed {}/{} trees after {} attempts (seed {})",
            trees.len(),
            count,
            attempts,
            seed
        );
    }
    trees
}
