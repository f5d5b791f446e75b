//! Police Stories - A top-down tactical shooter
//!
//! Core modules:
//! - `sim`: Simulation core (movement, AI, ballistics, camera, particles)
//! - `session`: Frame-driven session lifecycle (menu, playing, defeated)
//! - `settings`: Externally persisted preferences
//! - `audio`: Fire-and-forget sound cues

pub mod audio;
pub mod session;
pub mod settings;
pub mod sim;

pub use audio::{AudioSink, LogSink, SoundCue};
pub use session::Session;
pub use settings::{QualityPreset, Settings};

/// Game configuration constants
///
/// Per-frame quantities are calibrated against a 60 Hz reference frame and
/// scaled by [`frame_scale`] when a tick covers a different amount of time.
pub mod consts {
    /// Reference frame every per-frame rate is calibrated against
    pub const REFERENCE_DT: f32 = 1.0 / 60.0;
    /// Fixed simulation timestep
    pub const SIM_DT: f32 = REFERENCE_DT;
    /// Maximum substeps per frame to prevent spiral of death
    pub const MAX_SUBSTEPS: u32 = 8;
    /// Longest frame the session will account for (seconds)
    pub const MAX_FRAME_DT: f32 = 0.1;

    /// World dimensions (larger than the viewport)
    pub const WORLD_WIDTH: f32 = 1600.0;
    pub const WORLD_HEIGHT: f32 = 1200.0;
    /// Visible window into the world
    pub const VIEWPORT_WIDTH: f32 = 800.0;
    pub const VIEWPORT_HEIGHT: f32 = 600.0;
    /// Office layout tile (the interior plan repeats every tile)
    pub const OFFICE_TILE_WIDTH: f32 = 800.0;
    pub const OFFICE_TILE_HEIGHT: f32 = 600.0;
    pub const WALL_THICKNESS: f32 = 20.0;

    /// Player defaults
    pub const PLAYER_SIZE: f32 = 20.0;
    pub const PLAYER_SPEED: f32 = 3.0; // px per reference frame
    pub const PLAYER_MAX_HEALTH: f32 = 100.0;
    pub const PLAYER_SPAWN_X: f32 = 100.0;
    pub const PLAYER_SPAWN_Y: f32 = 100.0;

    /// Enemy defaults
    pub const ENEMY_SIZE: f32 = 20.0;
    pub const ENEMY_SPEED: f32 = 1.5; // px per reference frame
    pub const ENEMY_MAX_HEALTH: f32 = 50.0;
    pub const ENEMY_BASE_COUNT: u32 = 3;
    pub const ENEMY_PER_WAVE: u32 = 2;
    /// Enemies never spawn closer than this to the player
    pub const ENEMY_SPAWN_CLEARANCE: f32 = 200.0;
    /// Spawn and patrol points keep this far from the world edge
    pub const SPAWN_MARGIN: f32 = 50.0;

    /// Bullets
    pub const BULLET_SIZE: f32 = 4.0;
    pub const BULLET_SPEED: f32 = 8.0; // px per reference frame
    pub const PLAYER_BULLET_DAMAGE: f32 = 50.0;
    pub const ENEMY_BULLET_DAMAGE: f32 = 20.0;
    pub const KILL_SCORE: u64 = 100;

    /// Enemy perception
    pub const ALERT_MAX: f32 = 100.0;
    pub const SIGHT_RANGE: f32 = 300.0;
    pub const ALERT_DECAY_RANGE: f32 = 350.0;
    pub const ALERT_CLOSE_RANGE: f32 = 100.0;
    pub const ALERT_MID_RANGE: f32 = 200.0;

    /// Enemy behavior
    pub const STATE_DWELL_SECS: f32 = 0.5;
    pub const ENEMY_FIRE_COOLDOWN_MS: f64 = 1500.0;
    pub const ENEMY_FIRE_RANGE: f32 = 300.0;
    pub const PATROL_SPEED_FACTOR: f32 = 0.5;
    pub const SUSPICIOUS_SPEED_FACTOR: f32 = 0.3;
    pub const SUSPICIOUS_SPIN: f32 = 0.02; // rad per reference frame
    pub const PATROL_ARRIVAL_RADIUS: f32 = 20.0;
    pub const ATTACK_STANDOFF: f32 = 100.0;

    /// Camera smoothing (fraction of remaining distance per reference frame)
    pub const CAMERA_LERP: f32 = 0.1;

    /// Particles
    pub const PARTICLES_PER_KILL: usize = 8;
    pub const PARTICLE_GRAVITY: f32 = 0.1;
    pub const PARTICLE_DRAG: f32 = 0.98;
    pub const MAX_PARTICLES: usize = 512;

    /// Delay between clearing a wave and the next level (seconds)
    pub const NEXT_LEVEL_DELAY: f32 = 1.0;
}

/// Number of reference frames covered by `dt` seconds
///
/// Non-finite or negative input counts as no time at all.
#[inline]
pub fn frame_scale(dt: f32) -> f32 {
    if dt.is_finite() && dt > 0.0 {
        dt / consts::REFERENCE_DT
    } else {
        0.0
    }
}

/// Normalized angle to [-π, π)
#[inline]
pub fn normalize_angle(mut angle: f32) -> f32 {
    use std::f32::consts::PI;
    if !angle.is_finite() {
        return 0.0;
    }
    while angle >= PI {
        angle -= 2.0 * PI;
    }
    while angle < -PI {
        angle += 2.0 * PI;
    }
    angle
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::f32::consts::PI;

    #[test]
    fn test_frame_scale_reference_is_one() {
        assert_eq!(frame_scale(consts::SIM_DT), 1.0);
        assert_eq!(frame_scale(-1.0), 0.0);
        assert_eq!(frame_scale(f32::NAN), 0.0);
    }

    #[test]
    fn test_normalize_angle() {
        let wrapped = normalize_angle(3.0 * PI + 0.5);
        assert!((wrapped - (-PI + 0.5)).abs() < 1e-5);
        // On the boundary only the direction is stable
        let half_turn = normalize_angle(3.0 * PI);
        assert!((half_turn.cos() + 1.0).abs() < 1e-5);
        assert!(half_turn.sin().abs() < 1e-5);
        assert!((-PI..PI).contains(&half_turn));
        assert!((normalize_angle(0.5) - 0.5).abs() < 1e-6);
        assert!(normalize_angle(-PI) >= -PI);
    }
}
