//! Smoothed viewport tracking over a world larger than the screen

use glam::Vec2;
use serde::{Deserialize, Serialize};

use crate::consts::CAMERA_LERP;

/// World-space origin of the visible window
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Camera {
    pub pos: Vec2,
    pub viewport: Vec2,
}

impl Camera {
    pub fn new(viewport: Vec2) -> Self {
        Self {
            pos: Vec2::ZERO,
            viewport,
        }
    }

    /// Camera origin that would center `focus` on screen
    #[inline]
    pub fn target_for(&self, focus: Vec2) -> Vec2 {
        focus - self.viewport / 2.0
    }

    /// Largest valid origin on each axis
    #[inline]
    pub fn max_pos(&self, world_size: Vec2) -> Vec2 {
        (world_size - self.viewport).max(Vec2::ZERO)
    }

    /// Move a fraction of the remaining distance toward `focus`, then clamp
    ///
    /// `frames` is the number of reference frames covered by this tick; the
    /// fraction compounds so two half-frames equal one full frame.
    pub fn follow(&mut self, focus: Vec2, world_size: Vec2, frames: f32) {
        let target = self.target_for(focus);
        let t = 1.0 - (1.0 - CAMERA_LERP).powf(frames);
        self.pos += (target - self.pos) * t;
        self.pos = self.pos.clamp(Vec2::ZERO, self.max_pos(world_size));
    }

    /// Jump straight to the clamped target (level start)
    pub fn snap_to(&mut self, focus: Vec2, world_size: Vec2) {
        self.pos = self
            .target_for(focus)
            .clamp(Vec2::ZERO, self.max_pos(world_size));
    }

    /// Pointer/screen coordinates to world coordinates
    #[inline]
    pub fn viewport_to_world(&self, point: Vec2) -> Vec2 {
        point + self.pos
    }

    /// World coordinates to pointer/screen coordinates
    #[inline]
    pub fn world_to_viewport(&self, point: Vec2) -> Vec2 {
        point - self.pos
    }

    /// Render culling: is a world point (with `margin` slack) on screen?
    pub fn is_visible(&self, point: Vec2, margin: f32) -> bool {
        let p = self.world_to_viewport(point);
        p.x >= -margin
            && p.y >= -margin
            && p.x <= self.viewport.x + margin
            && p.y <= self.viewport.y + margin
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::consts::*;

    fn world() -> Vec2 {
        Vec2::new(WORLD_WIDTH, WORLD_HEIGHT)
    }

    fn camera() -> Camera {
        Camera::new(Vec2::new(VIEWPORT_WIDTH, VIEWPORT_HEIGHT))
    }

    #[test]
    fn test_converges_on_centered_player() {
        let mut cam = camera();
        let player = world() / 2.0;
        let target = cam.target_for(player);

        let mut converged_at = None;
        for i in 0..200 {
            cam.follow(player, world(), 1.0);
            if converged_at.is_none() && cam.pos.distance(target) < 0.01 {
                converged_at = Some(i);
            }
        }
        // 500 px at 10% per tick drops below 0.01 px after ~103 ticks
        let ticks = converged_at.expect("camera should converge");
        assert!(ticks < 150, "converged after {ticks} ticks");
        assert!(cam.pos.distance(target) < 0.01);
    }

    #[test]
    fn test_first_step_is_ten_percent() {
        let mut cam = camera();
        cam.follow(world() / 2.0, world(), 1.0);
        assert!((cam.pos.x - 40.0).abs() < 1e-3);
        assert!((cam.pos.y - 30.0).abs() < 1e-3);
    }

    #[test]
    fn test_clamped_at_world_edges() {
        let mut cam = camera();
        let max = cam.max_pos(world());
        for _ in 0..500 {
            cam.follow(Vec2::new(1590.0, 1190.0), world(), 1.0);
            assert!(cam.pos.x <= max.x && cam.pos.y <= max.y);
        }
        assert!((cam.pos - max).length() < 0.01);

        for _ in 0..500 {
            cam.follow(Vec2::new(10.0, 10.0), world(), 1.0);
            assert!(cam.pos.x >= 0.0 && cam.pos.y >= 0.0);
        }
        assert!(cam.pos.length() < 0.01);
    }

    #[test]
    fn test_world_smaller_than_viewport_pins_origin() {
        let mut cam = camera();
        cam.follow(Vec2::new(300.0, 200.0), Vec2::new(400.0, 300.0), 1.0);
        assert_eq!(cam.pos, Vec2::ZERO);
    }

    #[test]
    fn test_coordinate_transforms() {
        let mut cam = camera();
        cam.pos = Vec2::new(120.0, 80.0);
        let world_pt = cam.viewport_to_world(Vec2::new(10.0, 20.0));
        assert_eq!(world_pt, Vec2::new(130.0, 100.0));
        assert_eq!(cam.world_to_viewport(world_pt), Vec2::new(10.0, 20.0));
        assert!(cam.is_visible(Vec2::new(500.0, 400.0), 0.0));
        assert!(!cam.is_visible(Vec2::new(50.0, 400.0), 0.0));
        assert!(cam.is_visible(Vec2::new(110.0, 400.0), 20.0));
    }
}
