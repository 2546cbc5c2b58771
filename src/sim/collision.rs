//! Ball vs tree collision detection and response
//!
//! Trees are circles, so the separating normal is simply the direction from
//! the trunk centre to the ball.

use glam::Vec2;

use super::course::Tree;
use crate::consts::{TREE_REBOUND_SPEED, TREE_RESTITUTION};

/// Result of a collision check
#[derive(Debug, Clone)]
pub struct CollisionResult {
    /// Whether a collision occurred
    pub hit: bool,
    /// Surface normal at contact, pointing toward the ball
    pub normal: Vec2,
    /// Penetration depth (for position correction)
    pub penetration: f32,
}

impl CollisionResult {
    pub fn miss() -> Self {
        Self {
            hit: false,
            normal: Vec2::ZERO,
            penetration: 0.0,
        }
    }
}

/// Check overlap between the ball and a tree trunk
pub fn ball_tree_collision(ball_pos: Vec2, ball_radius: f32, tree: &Tree) -> CollisionResult {
    let offset = ball_pos - tree.pos;
    let dist = offset.length();
    let reach = tree.radius + ball_radius;

    if dist >= reach {
        return CollisionResult::miss();
    }

    // Ball centre exactly on the trunk centre: push out along +X
    let normal = if dist > 1e-6 { offset / dist } else { Vec2::X };
    CollisionResult {
        hit: true,
        normal,
        penetration: reach - dist,
    }
}

/// Reflect velocity off a surface
///
/// Standard reflection: v' = v - 2(v·n)n
#[inline]
pub fn reflect_velocity(velocity: Vec2, normal: Vec2) -> Vec2 {
    velocity - 2.0 * velocity.dot(normal) * normal
}

/// How a trunk hit resolved
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum TreeResponse {
    /// Ball glanced off and keeps rolling
    Rebound,
    /// Too slow to bounce: ball dies against the trunk
    Stopped,
}

/// Push the ball out of the trunk and deflect it. Only the velocity
/// component heading into the trunk is reflected.
pub fn resolve_tree_hit(pos: &mut Vec2, vel: &mut Vec2, hit: &CollisionResult) -> TreeResponse {
    *pos += hit.normal * hit.penetration;

    if vel.length() <= TREE_REBOUND_SPEED {
        *vel = Vec2::ZERO;
        return TreeResponse::Stopped;
    }

    if vel.dot(hit.normal) < 0.0 {
        *vel = reflect_velocity(*vel, hit.normal);
    }
    *vel *= TREE_RESTITUTION;
    TreeResponse::Rebound
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::consts::BALL_RADIUS;

    #[test]
    fn test_tree_collision_hit_and_miss() {
        let tree = Tree::new(Vec2::new(100.0, 100.0));
        let result = ball_tree_collision(Vec2::new(80.0, 100.0), BALL_RADIUS, &tree);
        assert!(!result.hit);

        let result = ball_tree_collision(Vec2::new(90.0, 100.0), BALL_RADIUS, &tree);
        assert!(result.hit);
        assert!((result.normal - Vec2::new(-1.0, 0.0)).length() < 1e-6);
        assert!((result.penetration - 9.0).abs() < 1e-4);
    }

    #[test]
    fn test_coincident_centres_fallback_normal() {
        let tree = Tree::new(Vec2::new(10.0, 10.0));
        let result = ball_tree_collision(Vec2::new(10.0, 10.0), BALL_RADIUS, &tree);
        assert!(result.hit);
        assert_eq!(result.normal, Vec2::X);
    }

    #[test]
    fn test_fast_ball_rebounds_inelastically() {
        let tree = Tree::new(Vec2::new(100.0, 100.0));
        let mut pos = Vec2::new(90.0, 100.0);
        let mut vel = Vec2::new(200.0, 0.0);
        let hit = ball_tree_collision(pos, BALL_RADIUS, &tree);
        assert_eq!(resolve_tree_hit(&mut pos, &mut vel, &hit), TreeResponse::Rebound);
        // Pushed just outside the trunk
        assert!((pos.distance(tree.pos) - (tree.radius + BALL_RADIUS)).abs() < 1e-3);
        assert!(vel.x < 0.0);
        assert!((vel.length() - 200.0 * TREE_RESTITUTION).abs() < 1e-3);
    }

    #[test]
    fn test_slow_ball_stops() {
        let tree = Tree::new(Vec2::new(100.0, 100.0));
        let mut pos = Vec2::new(100.0, 88.0);
        let mut vel = Vec2::new(0.0, 20.0);
        let hit = ball_tree_collision(pos, BALL_RADIUS, &tree);
        assert_eq!(resolve_tree_hit(&mut pos, &mut vel, &hit), TreeResponse::Stopped);
        assert_eq!(vel, Vec2::ZERO);
    }

    #[test]
    fn test_reflect_velocity() {
        let velocity = Vec2::new(100.0, 0.0);
        let normal = Vec2::new(-1.0, 0.0);
        let reflected = reflect_velocity(velocity, normal);
        assert!((reflected.x - (-100.0)).abs() < 0.001);
        assert!(reflected.y.abs() < 0.001);
    }
}
