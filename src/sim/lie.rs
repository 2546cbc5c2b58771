//! Lie classification and per-lie modifiers
//!
//! Zones overlap freely; the lie under a point is resolved by a fixed
//! priority (water > sand > green > fairway), never by zone order.
//! Anything not covered by one of those is rough.

use glam::Vec2;
use serde::{Deserialize, Serialize};

use super::course::{Hole, ZoneKind};
use crate::consts::GREEN_FALLBACK_RADIUS;

/// Terrain under the ball
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum LieKind {
    Fairway,
    Rough,
    Sand,
    Water,
    Green,
}

/// Carry/run multipliers for a lie
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct LieModifier {
    pub carry: f32,
    pub run: f32,
}

impl LieKind {
    pub const ALL: [LieKind; 5] = [
        LieKind::Fairway,
        LieKind::Rough,
        LieKind::Sand,
        LieKind::Water,
        LieKind::Green,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            LieKind::Fairway => "fairway",
            LieKind::Rough => "rough",
            LieKind::Sand => "sand",
            LieKind::Water => "water",
            LieKind::Green => "green",
        }
    }

    pub fn modifier(&self) -> LieModifier {
        let (carry, run) = match self {
            LieKind::Fairway => (0.95, 1.0),
            LieKind::Rough => (0.92, 0.7),
            LieKind::Sand => (0.85, 0.4),
            LieKind::Green => (0.95, 0.5),
            LieKind::Water => (0.8, 0.2),
        };
        LieModifier { carry, run }
    }

    /// Per-step velocity retention before the run modifier and spin
    pub fn base_friction(&self) -> f32 {
        match self {
            LieKind::Fairway => 0.985,
            LieKind::Rough => 0.96,
            LieKind::Sand => 0.92,
            LieKind::Green => 0.98,
            LieKind::Water => 0.80,
        }
    }

    /// Per-step velocity retention for a ball with `spin` rolling on this lie.
    ///
    /// A lower run modifier scales up the base loss; spin removes a little more.
    pub fn roll_retention(&self, spin: f32) -> f32 {
        let run = self.modifier().run.max(0.05);
        let base = (1.0 - (1.0 - self.base_friction()) / run).clamp(0.0, 1.0);
        base * (1.0 - crate::consts::SPIN_ROLL_DAMPING * spin.clamp(0.0, 1.0))
    }
}

fn any_zone(hole: &Hole, kind: ZoneKind, p: Vec2) -> bool {
    hole.zones
        .iter()
        .any(|z| z.kind == kind && z.shape.contains_point(p))
}

/// Whether `p` is on the green. Holes without a green zone get a circular
/// green around the cup.
pub fn on_green(hole: &Hole, p: Vec2) -> bool {
    if hole.zones.iter().any(|z| z.kind == ZoneKind::Green) {
        any_zone(hole, ZoneKind::Green, p)
    } else {
        p.distance(hole.cup) < GREEN_FALLBACK_RADIUS
    }
}

/// Classify the lie at `p`. Out-of-bounds is the caller's concern.
pub fn classify(hole: &Hole, p: Vec2) -> LieKind {
    if any_zone(hole, ZoneKind::Water, p) {
        LieKind::Water
    } else if any_zone(hole, ZoneKind::Sand, p) {
        LieKind::Sand
    } else if on_green(hole, p) {
        LieKind::Green
    } else if any_zone(hole, ZoneKind::Fairway, p) {
        LieKind::Fairway
    } else {
        LieKind::Rough
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::geom::Polygon;
    use crate::sim::course::TerrainZone;

    fn zone(kind: ZoneKind, min: (f32, f32), max: (f32, f32)) -> TerrainZone {
        TerrainZone {
            kind,
            shape: Polygon::rect(Vec2::new(min.0, min.1), Vec2::new(max.0, max.1)),
        }
    }

    fn layered_hole() -> Hole {
        // Listed lowest priority first to prove order doesn't matter
        Hole {
            par: 4,
            tee: Vec2::new(20.0, 20.0),
            cup: Vec2::new(900.0, 500.0),
            zones: vec![
                zone(ZoneKind::Fairway, (0.0, 0.0), (600.0, 400.0)),
                zone(ZoneKind::Rough, (100.0, 100.0), (300.0, 300.0)),
                zone(ZoneKind::Sand, (150.0, 150.0), (250.0, 250.0)),
                zone(ZoneKind::Water, (200.0, 200.0), (280.0, 280.0)),
                zone(ZoneKind::Wall, (0.0, 0.0), (50.0, 50.0)),
            ],
        }
    }

    #[test]
    fn test_priority_order() {
        let hole = layered_hole();
        assert_eq!(classify(&hole, Vec2::new(220.0, 220.0)), LieKind::Water);
        // Inside sand and rough and fairway
        assert_eq!(classify(&hole, Vec2::new(160.0, 160.0)), LieKind::Sand);
        // Rough polygon laid over fairway still reads as fairway
        assert_eq!(classify(&hole, Vec2::new(120.0, 120.0)), LieKind::Fairway);
        assert_eq!(classify(&hole, Vec2::new(500.0, 50.0)), LieKind::Fairway);
        assert_eq!(classify(&hole, Vec2::new(700.0, 50.0)), LieKind::Rough);
        // Wall zone is decorative
        assert_eq!(classify(&hole, Vec2::new(10.0, 10.0)), LieKind::Fairway);
    }

    #[test]
    fn test_green_fallback_circle() {
        let hole = layered_hole();
        assert_eq!(classify(&hole, Vec2::new(940.0, 500.0)), LieKind::Green);
        assert_eq!(classify(&hole, Vec2::new(1000.0, 500.0)), LieKind::Rough);
    }

    #[test]
    fn test_green_zone_overrides_fallback() {
        let mut hole = layered_hole();
        hole.zones
            .push(zone(ZoneKind::Green, (850.0, 450.0), (880.0, 480.0)));
        assert_eq!(classify(&hole, Vec2::new(860.0, 460.0)), LieKind::Green);
        // The cup circle no longer applies once a green zone exists
        assert_eq!(classify(&hole, Vec2::new(900.0, 510.0)), LieKind::Rough);
    }

    #[test]
    fn test_degenerate_zone_ignored() {
        let mut hole = layered_hole();
        hole.zones.push(TerrainZone {
            kind: ZoneKind::Water,
            shape: Polygon::new(vec![Vec2::new(500.0, 50.0), Vec2::new(520.0, 60.0)]),
        });
        assert_eq!(classify(&hole, Vec2::new(510.0, 55.0)), LieKind::Fairway);
    }

    #[test]
    fn test_roll_retention_ordering() {
        let spin = 0.45;
        let fairway = LieKind::Fairway.roll_retention(spin);
        let rough = LieKind::Rough.roll_retention(spin);
        let sand = LieKind::Sand.roll_retention(spin);
        assert!(fairway > rough && rough > sand);
        assert!(LieKind::Water.roll_retention(spin) >= 0.0);
        // More spin, less roll
        assert!(LieKind::Fairway.roll_retention(0.9) < LieKind::Fairway.roll_retention(0.1));
    }

    mod proptests {
        use super::*;
        use proptest::prelude::*;

        proptest! {
            /// Property: a point in both sand and rough is sand, wherever it is
            #[test]
            fn prop_sand_beats_rough(x in 151.0f32..249.0, y in 151.0f32..199.0) {
                let hole = layered_hole();
                prop_assert_eq!(classify(&hole, Vec2::new(x, y)), LieKind::Sand);
            }

            /// Property: classification is a pure function of the point
            #[test]
            fn prop_classify_pure(x in -50.0f32..1300.0, y in -50.0f32..750.0) {
                let hole = layered_hole();
                let p = Vec2::new(x, y);
                prop_assert_eq!(classify(&hole, p), classify(&hole, p));
            }
        }
    }
}
