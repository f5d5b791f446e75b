//! Axis-decoupled motion against static walls
//!
//! X is resolved with Y held fixed, then Y with the committed X. An entity
//! pushing diagonally into a wall keeps sliding along the free axis.

use glam::Vec2;

use super::geometry::{Rect, rect_overlap};

/// Resolve a candidate displacement for a square of side `size`
///
/// Each axis commits only if the square at the candidate position touches no
/// wall; otherwise that axis keeps its old coordinate.
pub fn resolve_motion(pos: Vec2, delta: Vec2, size: f32, walls: &[Rect]) -> Vec2 {
    let half = size / 2.0;
    let blocked = |p: Vec2| walls.iter().any(|wall| rect_overlap(p, half, wall));

    let mut out = pos;

    let candidate_x = Vec2::new(pos.x + delta.x, out.y);
    if !blocked(candidate_x) {
        out.x = candidate_x.x;
    }

    let candidate_y = Vec2::new(out.x, pos.y + delta.y);
    if !blocked(candidate_y) {
        out.y = candidate_y.y;
    }

    out
}

/// Step from `pos` toward `target` by at most `step`, resolved against walls
pub fn move_toward(pos: Vec2, target: Vec2, step: f32, size: f32, walls: &[Rect]) -> Vec2 {
    let dir = (target - pos).normalize_or_zero();
    resolve_motion(pos, dir * step, size, walls)
}

/// Clamp a position so the entity stays `margin` inside the world
pub fn clamp_to_world(pos: Vec2, margin: f32, world_size: Vec2) -> Vec2 {
    let min = Vec2::splat(margin);
    let max = (world_size - Vec2::splat(margin)).max(min);
    pos.clamp(min, max)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_free_motion() {
        let out = resolve_motion(Vec2::new(50.0, 50.0), Vec2::new(3.0, -3.0), 20.0, &[]);
        assert_eq!(out, Vec2::new(53.0, 47.0));
    }

    #[test]
    fn test_slides_along_wall_when_moving_diagonally() {
        // Vertical wall to the right of the entity
        let walls = [Rect::new(200.0, 0.0, 20.0, 600.0)];
        let start = Vec2::new(187.0, 300.0);
        let out = resolve_motion(start, Vec2::new(3.0, 3.0), 20.0, &walls);
        assert_eq!(out.x, start.x, "x blocked by the wall");
        assert_eq!(out.y, 303.0, "y keeps sliding");
    }

    #[test]
    fn test_slides_past_end_of_wall() {
        // Short vertical wall to the right, floor further down
        let walls = [
            Rect::new(200.0, 0.0, 20.0, 300.0),
            Rect::new(0.0, 400.0, 400.0, 20.0),
        ];
        let mut pos = Vec2::new(150.0, 250.0);
        for _ in 0..20 {
            pos = resolve_motion(pos, Vec2::new(3.0, 3.0), 20.0, &walls);
        }
        // Pinned against the wall on x while y kept moving
        assert_eq!(pos, Vec2::new(189.0, 310.0));

        for _ in 0..60 {
            pos = resolve_motion(pos, Vec2::new(3.0, 3.0), 20.0, &walls);
        }
        // Past the end of the wall x is free again; y rests above the floor
        assert!(pos.x > 189.0);
        assert_eq!(pos.y, 388.0);
    }

    #[test]
    fn test_fully_blocked_stays_put() {
        let walls = [
            Rect::new(200.0, 0.0, 20.0, 600.0),
            Rect::new(0.0, 200.0, 600.0, 20.0),
        ];
        let start = Vec2::new(189.0, 189.0);
        let out = resolve_motion(start, Vec2::new(3.0, 3.0), 20.0, &walls);
        assert_eq!(out, start);
    }

    #[test]
    fn test_move_toward_and_clamp() {
        let out = move_toward(Vec2::ZERO, Vec2::new(10.0, 0.0), 2.0, 20.0, &[]);
        assert!((out - Vec2::new(2.0, 0.0)).length() < 1e-6);

        let clamped = clamp_to_world(Vec2::new(-5.0, 2000.0), 20.0, Vec2::new(800.0, 600.0));
        assert_eq!(clamped, Vec2::new(20.0, 580.0));
    }
}
