//! Bullet travel and hit resolution
//!
//! Every bullet advances once, then is removed for exactly one reason: it
//! left the world, touched a wall, or hit a target.

use super::particles::spawn_burst;
use super::state::{Bullet, GameEvent, GameState, Shooter};
use crate::consts::*;

/// Why a bullet left play
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum BulletFate {
    InFlight,
    OutOfBounds,
    HitWall,
    /// Index into the enemy list at the time of the hit (last match wins)
    HitEnemy(usize),
    HitPlayer,
}

/// Where a bullet ends up after moving this tick
pub fn resolve_bullet(bullet: &Bullet, state: &GameState) -> BulletFate {
    if !state.world.contains(bullet.pos) {
        return BulletFate::OutOfBounds;
    }
    if state.world.blocked(bullet.pos, BULLET_SIZE) {
        return BulletFate::HitWall;
    }

    match bullet.owner {
        // Latest spawned enemy takes the hit when several overlap
        Shooter::Player => state
            .enemies
            .iter()
            .rposition(|e| e.pos.distance(bullet.pos) < ENEMY_SIZE / 2.0)
            .map_or(BulletFate::InFlight, BulletFate::HitEnemy),
        Shooter::Enemy => {
            if state.player.pos.distance(bullet.pos) < PLAYER_SIZE / 2.0 {
                BulletFate::HitPlayer
            } else {
                BulletFate::InFlight
            }
        }
    }
}

/// Move every bullet and apply hits, removals, damage and score
///
/// Bullets in `state.fired` are not touched; the loop driver merges them in
/// afterwards.
pub fn advance_bullets(state: &mut GameState, frames: f32, effects_enabled: bool) {
    let mut bullets = std::mem::take(&mut state.bullets);

    bullets.retain_mut(|bullet| {
        bullet.pos += bullet.vel * frames;

        match resolve_bullet(bullet, state) {
            BulletFate::InFlight => true,
            BulletFate::OutOfBounds | BulletFate::HitWall => false,
            BulletFate::HitEnemy(index) => {
                let enemy = &mut state.enemies[index];
                enemy.take_damage(PLAYER_BULLET_DAMAGE);
                if enemy.is_dead() {
                    let enemy = state.enemies.remove(index);
                    if effects_enabled {
                        spawn_burst(
                            &mut state.particles,
                            &mut state.rng,
                            bullet.pos,
                            PARTICLES_PER_KILL,
                            state.config.max_particles,
                        );
                    }
                    state.score += KILL_SCORE;
                    state.events.push(GameEvent::EnemyEliminated { at: enemy.pos });
                    log::debug!("Enemy {} eliminated, score {}", enemy.id, state.score);
                }
                false
            }
            BulletFate::HitPlayer => {
                state.player.take_damage(ENEMY_BULLET_DAMAGE);
                state.events.push(GameEvent::PlayerDamaged {
                    health: state.player.health,
                });
                false
            }
        }
    });

    state.bullets = bullets;
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::sim::geometry::Rect;
    use crate::sim::state::{Enemy, SimConfig};
    use crate::sim::world::World;
    use glam::Vec2;

    fn arena() -> GameState {
        GameState::with_world(
            1,
            SimConfig::default(),
            World::enclosed(Vec2::new(WORLD_WIDTH, WORLD_HEIGHT)),
        )
    }

    fn bullet(owner: Shooter, pos: Vec2, vel: Vec2) -> Bullet {
        Bullet {
            id: 99,
            pos,
            vel,
            owner,
        }
    }

    #[test]
    fn test_bullet_advances_by_velocity() {
        let mut state = arena();
        state
            .bullets
            .push(bullet(Shooter::Player, Vec2::new(400.0, 400.0), Vec2::new(8.0, 0.0)));
        advance_bullets(&mut state, 1.0, false);
        assert_eq!(state.bullets[0].pos, Vec2::new(408.0, 400.0));
    }

    #[test]
    fn test_kill_removes_enemy_and_scores() {
        let mut state = arena();
        state.player.pos = Vec2::new(100.0, 600.0);
        state.spawn_enemy(Vec2::new(500.0, 500.0));
        state
            .bullets
            .push(bullet(Shooter::Player, Vec2::new(492.0, 500.0), Vec2::new(8.0, 0.0)));

        advance_bullets(&mut state, 1.0, true);

        assert!(state.enemies.is_empty());
        assert!(state.bullets.is_empty());
        assert_eq!(state.score, 100);
        assert_eq!(state.particles.len(), PARTICLES_PER_KILL);
        assert!(matches!(
            state.events.as_slice(),
            [GameEvent::EnemyEliminated { .. }]
        ));
    }

    #[test]
    fn test_kill_without_effects_spawns_no_particles() {
        let mut state = arena();
        state.spawn_enemy(Vec2::new(500.0, 500.0));
        state
            .bullets
            .push(bullet(Shooter::Player, Vec2::new(500.0, 500.0), Vec2::ZERO));
        advance_bullets(&mut state, 1.0, false);
        assert!(state.enemies.is_empty());
        assert!(state.particles.is_empty());
        assert_eq!(state.score, KILL_SCORE);
    }

    #[test]
    fn test_non_lethal_hit_keeps_enemy() {
        let mut state = arena();
        let id = state.next_entity_id();
        let mut tough = Enemy::new(id, Vec2::new(500.0, 500.0));
        tough.health = 100.0;
        state.enemies.push(tough);
        state
            .bullets
            .push(bullet(Shooter::Player, Vec2::new(500.0, 500.0), Vec2::ZERO));

        advance_bullets(&mut state, 1.0, true);

        assert_eq!(state.enemies.len(), 1);
        assert_eq!(state.enemies[0].health, 50.0);
        assert!(state.bullets.is_empty());
        assert_eq!(state.score, 0);
    }

    #[test]
    fn test_one_bullet_one_hit_when_enemies_overlap() {
        let mut state = arena();
        let first = state.spawn_enemy(Vec2::new(500.0, 500.0));
        state.spawn_enemy(Vec2::new(502.0, 500.0));
        state
            .bullets
            .push(bullet(Shooter::Player, Vec2::new(501.0, 500.0), Vec2::ZERO));

        advance_bullets(&mut state, 1.0, false);

        assert_eq!(state.enemies.len(), 1);
        assert_eq!(state.enemies[0].id, first);
        assert_eq!(state.score, KILL_SCORE);
    }

    #[test]
    fn test_player_bullets_ignore_player_and_vice_versa() {
        let mut state = arena();
        state.player.pos = Vec2::new(300.0, 300.0);
        state.spawn_enemy(Vec2::new(600.0, 600.0));
        state
            .bullets
            .push(bullet(Shooter::Player, Vec2::new(300.0, 300.0), Vec2::ZERO));
        state
            .bullets
            .push(bullet(Shooter::Enemy, Vec2::new(600.0, 600.0), Vec2::ZERO));

        advance_bullets(&mut state, 1.0, false);

        assert_eq!(state.bullets.len(), 2);
        assert_eq!(state.player.health, PLAYER_MAX_HEALTH);
        assert_eq!(state.enemies[0].health, ENEMY_MAX_HEALTH);
    }

    #[test]
    fn test_enemy_bullet_damages_player() {
        let mut state = arena();
        state.player.pos = Vec2::new(300.0, 300.0);
        state
            .bullets
            .push(bullet(Shooter::Enemy, Vec2::new(292.0, 300.0), Vec2::new(8.0, 0.0)));

        advance_bullets(&mut state, 1.0, false);

        assert!(state.bullets.is_empty());
        assert_eq!(state.player.health, 80.0);
        assert_eq!(
            state.events,
            vec![GameEvent::PlayerDamaged { health: 80.0 }]
        );
    }

    #[test]
    fn test_wall_stops_bullet() {
        let mut state = GameState::with_world(
            1,
            SimConfig::default(),
            World::new(
                Vec2::new(WORLD_WIDTH, WORLD_HEIGHT),
                vec![Rect::new(400.0, 0.0, 20.0, 800.0)],
            ),
        );
        state
            .bullets
            .push(bullet(Shooter::Player, Vec2::new(390.0, 300.0), Vec2::new(8.0, 0.0)));
        advance_bullets(&mut state, 1.0, false);
        assert!(state.bullets.is_empty());
    }

    #[test]
    fn test_out_of_bounds_and_wall_removed_once() {
        let mut state = arena();
        // Leaves the world through the boundary wall in the same tick
        state
            .bullets
            .push(bullet(Shooter::Player, Vec2::new(1596.0, 300.0), Vec2::new(8.0, 0.0)));
        state
            .bullets
            .push(bullet(Shooter::Player, Vec2::new(800.0, 600.0), Vec2::ZERO));
        let before = state.bullets.len();

        advance_bullets(&mut state, 1.0, false);

        assert_eq!(state.bullets.len(), before - 1);
        assert_eq!(state.bullets[0].pos, Vec2::new(800.0, 600.0));
        assert!(state.events.is_empty());
    }

    #[test]
    fn test_fired_bullets_untouched() {
        let mut state = arena();
        state.shoot(Shooter::Player, Vec2::new(400.0, 400.0), 0.0);
        advance_bullets(&mut state, 1.0, false);
        assert_eq!(state.fired[0].pos, Vec2::new(400.0, 400.0));
    }
}
