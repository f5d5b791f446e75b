//! Per-tick simulation driver
//!
//! Fixed execution order: player, enemies, bullets, camera, particles, wave
//! bookkeeping, defeat check. Bullets fired during a tick join the flight list
//! only after ballistics ran, so they first move on the following tick.

use glam::Vec2;

use super::ai::Perception;
use super::ballistics::advance_bullets;
use super::movement::{clamp_to_world, resolve_motion};
use super::particles::update_particles;
use super::state::{Enemy, GameEvent, GamePhase, GameState, Player, Shooter};
use super::world::World;
use crate::consts::*;
use crate::frame_scale;

/// Input commands for a single tick
#[derive(Debug, Clone, Default)]
pub struct TickInput {
    /// Held movement directions
    pub up: bool,
    pub down: bool,
    pub left: bool,
    pub right: bool,
    /// Pointer position in viewport space
    pub pointer: Vec2,
    /// Fire trigger (one-shot)
    pub fire: bool,
    /// Visual effects capability flag (absent means disabled)
    pub effects_enabled: bool,
}

impl TickInput {
    /// Per-axis movement direction (-1, 0 or 1 on each axis)
    pub fn direction(&self) -> Vec2 {
        let axis = |neg: bool, pos: bool| f32::from(u8::from(pos)) - f32::from(u8::from(neg));
        Vec2::new(axis(self.left, self.right), axis(self.up, self.down))
    }
}

/// Advance the game state by `dt` seconds of measured time
pub fn tick(state: &mut GameState, input: &TickInput, dt: f32) {
    if state.phase != GamePhase::Playing {
        return;
    }

    let dt = if dt.is_finite() { dt.max(0.0) } else { 0.0 };
    let frames = frame_scale(dt);

    state.time_ticks += 1;
    state.clock_ms += f64::from(dt) * 1000.0;

    // Level scheduled by a cleared wave
    if let Some(remaining) = state.next_level_in {
        let remaining = remaining - dt;
        if remaining <= 0.0 {
            state.next_level_in = None;
            init_level(state);
        } else {
            state.next_level_in = Some(remaining);
        }
    }

    // 1. Player
    update_player(state, input, frames);

    // 2. Enemies
    update_enemies(state, dt, frames);

    // 3. Bullets (this tick's shots are merged afterwards)
    advance_bullets(state, frames, input.effects_enabled);
    let mut fired = std::mem::take(&mut state.fired);
    state.bullets.append(&mut fired);

    // 4. Camera
    state
        .camera
        .follow(state.player.pos, state.world.size, frames);

    // 5. Particles
    update_particles(&mut state.particles, frames);

    // 6. Wave cleared
    if state.enemies.is_empty() && state.next_level_in.is_none() {
        let cleared = state.wave;
        state.wave += 1;
        state.next_level_in = Some(state.config.next_level_delay.max(0.0));
        state.events.push(GameEvent::WaveCleared { wave: cleared });
        log::info!("Wave {} cleared, next level in {:.1}s", cleared, state.config.next_level_delay);
    }

    // 7. Defeat
    if !state.player.is_alive() {
        state.phase = GamePhase::Defeated;
        state.events.push(GameEvent::Defeated);
        log::info!("Player defeated on wave {} with score {}", state.wave, state.score);
    }
}

/// Movement, wall resolution, bounds clamp, aim and fire
fn update_player(state: &mut GameState, input: &TickInput, frames: f32) {
    let player = &mut state.player;

    let delta = input.direction() * player.speed * frames;
    player.pos = resolve_motion(player.pos, delta, PLAYER_SIZE, &state.world.walls);
    player.pos = clamp_to_world(player.pos, PLAYER_SIZE, state.world.size);

    let aim = state.camera.viewport_to_world(input.pointer) - player.pos;
    if aim != Vec2::ZERO {
        player.angle = aim.y.atan2(aim.x);
    }

    if input.fire {
        let (origin, angle) = (player.pos, player.angle);
        state.shoot(Shooter::Player, origin, angle);
    }
}

/// Sense, think, act and fire for every enemy in order
fn update_enemies(state: &mut GameState, dt: f32, frames: f32) {
    let player = state.player.pos;
    let now_ms = state.clock_ms;
    let patrol_reassign = state.config.patrol_reassign;
    let mut shots = Vec::new();

    for enemy in &mut state.enemies {
        let seen = Perception::sense(enemy.pos, player, &state.world);

        if let Some(previous) = enemy.think(seen, dt, frames) {
            log::debug!(
                "Enemy {} {:?} -> {:?} (alert {:.0}, distance {:.0})",
                enemy.id,
                previous,
                enemy.state,
                enemy.alert,
                seen.distance
            );
        }

        if let Some(angle) = enemy.act(
            player,
            seen,
            &state.world,
            &mut state.rng,
            patrol_reassign,
            frames,
            now_ms,
        ) {
            shots.push((enemy.pos, angle));
        }
    }

    for (origin, angle) in shots {
        state.shoot(Shooter::Enemy, origin, angle);
    }
}

/// Number of enemies spawned for a wave
pub fn enemies_for_wave(wave: u32) -> u32 {
    ENEMY_BASE_COUNT + ENEMY_PER_WAVE * wave
}

/// Rebuild the level for the current wave
///
/// Walls are rebuilt wholesale, the player respawns at full health, bullets
/// are cleared and a fresh batch of enemies spawns away from the player.
pub fn init_level(state: &mut GameState) {
    state.world = World::office(state.config.world_size);
    state.player = Player::new(Vec2::new(PLAYER_SPAWN_X, PLAYER_SPAWN_Y));
    state.player.pos = clamp_to_world(state.player.pos, PLAYER_SIZE, state.world.size);
    state.bullets.clear();
    state.fired.clear();
    state.enemies.clear();

    let player = state.player.pos;
    let count = enemies_for_wave(state.wave);
    for _ in 0..count {
        let Some(pos) = state.world.random_open_point(&mut state.rng, ENEMY_SIZE, |p| {
            p.distance(player) >= ENEMY_SPAWN_CLEARANCE
        }) else {
            log::warn!("No open floor left for enemy spawn on wave {}", state.wave);
            break;
        };
        let patrol_point = state
            .world
            .random_open_point(&mut state.rng, ENEMY_SIZE, |_| true);
        let id = state.next_entity_id();
        state
            .enemies
            .push(Enemy::new(id, pos).with_patrol_point(patrol_point));
    }

    state.camera.snap_to(player, state.world.size);

    state.events.push(GameEvent::LevelStarted {
        wave: state.wave,
        enemies: state.enemies.len(),
    });
    log::info!(
        "Wave {}: {} walls, {} enemies",
        state.wave,
        state.world.walls.len(),
        state.enemies.len()
    );
}
