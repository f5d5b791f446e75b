//! Enemy AI: alert accumulation and a hysteresis-gated state machine
//!
//! Each tick an enemy senses the player once, updates its alert level, picks a
//! candidate state, and only commits to it after dwelling in the current state
//! for longer than `STATE_DWELL_SECS`. Behavior then runs for whatever state
//! the enemy ended up in.

use glam::Vec2;
use rand::Rng;

use super::movement::move_toward;
use super::state::{AiState, Enemy};
use super::world::World;
use crate::consts::*;
use crate::normalize_angle;

/// What an enemy knows about the player this tick
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Perception {
    pub distance: f32,
    pub line_of_sight: bool,
}

impl Perception {
    pub fn sense(from: Vec2, target: Vec2, world: &World) -> Self {
        Self {
            distance: from.distance(target),
            line_of_sight: world.line_of_sight(from, target),
        }
    }
}

/// Alert after one tick of `frames` reference frames
///
/// Seen within `SIGHT_RANGE`: rises by 5/3/1 per frame depending on distance.
/// Beyond `ALERT_DECAY_RANGE`: falls by 1 per frame. Anything else (including
/// the band between the two ranges) leaves it untouched.
pub fn update_alert(alert: f32, seen: Perception, frames: f32) -> f32 {
    let next = if seen.line_of_sight && seen.distance < SIGHT_RANGE {
        let rate = if seen.distance < ALERT_CLOSE_RANGE {
            5.0
        } else if seen.distance < ALERT_MID_RANGE {
            3.0
        } else {
            1.0
        };
        alert + rate * frames
    } else if seen.distance > ALERT_DECAY_RANGE {
        alert - frames
    } else {
        alert
    };
    next.clamp(0.0, ALERT_MAX)
}

/// State the enemy would like to be in, ignoring the dwell gate
pub fn candidate_state(state: AiState, alert: f32, distance: f32) -> AiState {
    match state {
        AiState::Patrol => {
            if alert > 30.0 {
                AiState::Suspicious
            } else {
                AiState::Patrol
            }
        }
        AiState::Suspicious => {
            if alert > 60.0 && distance < 200.0 {
                AiState::Attack
            } else if alert > 60.0 {
                AiState::Defend
            } else if alert < 20.0 {
                AiState::Patrol
            } else {
                AiState::Suspicious
            }
        }
        AiState::Defend => {
            if alert > 80.0 {
                AiState::Attack
            } else if alert < 40.0 {
                AiState::Patrol
            } else {
                AiState::Defend
            }
        }
        AiState::Attack => {
            // Full retreat first; it implies the Defend condition
            if alert < 30.0 && distance > 300.0 {
                AiState::Patrol
            } else if alert < 50.0 && distance > 250.0 {
                AiState::Defend
            } else {
                AiState::Attack
            }
        }
    }
}

impl Enemy {
    /// Advance the dwell timer and alert, then apply the gated transition
    ///
    /// Returns the previous state when a transition happened.
    pub fn think(&mut self, seen: Perception, dt: f32, frames: f32) -> Option<AiState> {
        self.state_timer += dt;
        self.alert = update_alert(self.alert, seen, frames);

        let next = candidate_state(self.state, self.alert, seen.distance);
        if next != self.state && self.state_timer > STATE_DWELL_SECS {
            let previous = self.state;
            self.state = next;
            self.state_timer = 0.0;
            Some(previous)
        } else {
            None
        }
    }

    /// Run the behavior for the current state
    ///
    /// Returns the firing angle when the enemy shoots this tick.
    #[allow(clippy::too_many_arguments)]
    pub fn act<R: Rng>(
        &mut self,
        player: Vec2,
        seen: Perception,
        world: &World,
        rng: &mut R,
        patrol_reassign: bool,
        frames: f32,
        now_ms: f64,
    ) -> Option<f32> {
        let speed = ENEMY_SPEED * frames;

        match self.state {
            AiState::Patrol => {
                if let Some(point) = self.patrol_point {
                    if self.pos.distance(point) < PATROL_ARRIVAL_RADIUS {
                        if patrol_reassign {
                            self.patrol_point = world.random_open_point(rng, ENEMY_SIZE, |_| true);
                        }
                    } else {
                        self.angle = angle_to(self.pos, point);
                        self.pos = move_toward(
                            self.pos,
                            point,
                            speed * PATROL_SPEED_FACTOR,
                            ENEMY_SIZE,
                            &world.walls,
                        );
                    }
                }
            }
            AiState::Suspicious => {
                self.angle = normalize_angle(self.angle + SUSPICIOUS_SPIN * frames);
                if seen.line_of_sight {
                    self.pos = move_toward(
                        self.pos,
                        player,
                        speed * SUSPICIOUS_SPEED_FACTOR,
                        ENEMY_SIZE,
                        &world.walls,
                    );
                    self.angle = angle_to(self.pos, player);
                }
            }
            AiState::Defend => {
                if seen.line_of_sight {
                    self.angle = angle_to(self.pos, player);
                }
            }
            AiState::Attack => {
                if seen.distance > ATTACK_STANDOFF {
                    self.pos = move_toward(self.pos, player, speed, ENEMY_SIZE, &world.walls);
                }
                self.angle = angle_to(self.pos, player);
            }
        }

        self.try_fire(seen, now_ms)
    }

    /// Defend/Attack shoot when the player is visible, in range, and the
    /// cooldown has elapsed
    fn try_fire(&mut self, seen: Perception, now_ms: f64) -> Option<f32> {
        let cooled = self
            .last_shot_ms
            .is_none_or(|last| now_ms - last > ENEMY_FIRE_COOLDOWN_MS);

        if self.state.can_fire() && seen.line_of_sight && seen.distance < ENEMY_FIRE_RANGE && cooled
        {
            self.last_shot_ms = Some(now_ms);
            Some(self.angle)
        } else {
            None
        }
    }
}

#[inline]
fn angle_to(from: Vec2, to: Vec2) -> f32 {
    let d = to - from;
    d.y.atan2(d.x)
}
