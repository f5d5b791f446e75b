//! Decorative blood-spatter particles
//!
//! Pure visual physics: no collision with walls and no effect on gameplay.

use glam::Vec2;
use rand::Rng;

use super::state::Particle;
use crate::consts::*;

/// Dark-red palette (0xRRGGBB), bright to very dark
pub const BLOOD_PALETTE: [u32; 5] = [0xdc2626, 0xb91c1c, 0x991b1b, 0x7f1d1d, 0x5e1717];

impl Particle {
    /// Random direction, speed 1-4, size 1-4, decay 0.005-0.025 per frame
    pub fn spawn<R: Rng>(rng: &mut R, at: Vec2) -> Self {
        let angle = rng.random_range(0.0..std::f32::consts::TAU);
        let speed = rng.random_range(1.0..4.0);
        Self {
            pos: at,
            vel: Vec2::new(angle.cos(), angle.sin()) * speed,
            life: 1.0,
            decay: rng.random_range(0.005..0.025),
            size: rng.random_range(1.0..4.0),
            color: BLOOD_PALETTE[rng.random_range(0..BLOOD_PALETTE.len())],
        }
    }

    /// Integrate one tick; returns false once the particle is spent
    pub fn update(&mut self, frames: f32) -> bool {
        self.pos += self.vel * frames;
        self.vel.y += PARTICLE_GRAVITY * frames;
        self.vel.x *= PARTICLE_DRAG.powf(frames);
        self.life -= self.decay * f64::from(frames);
        self.life > 0.0
    }
}

/// Spawn `count` particles at `at`, never exceeding `cap` live particles
pub fn spawn_burst<R: Rng>(
    particles: &mut Vec<Particle>,
    rng: &mut R,
    at: Vec2,
    count: usize,
    cap: usize,
) {
    let room = cap.saturating_sub(particles.len());
    particles.extend((0..count.min(room)).map(|_| Particle::spawn(rng, at)));
}

/// Advance every particle and drop the spent ones
pub fn update_particles(particles: &mut Vec<Particle>, frames: f32) {
    particles.retain_mut(|p| p.update(frames));
}
