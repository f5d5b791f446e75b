//! Game state and core simulation types
//!
//! The whole simulation is one explicitly owned [`GameState`]. Consumers read
//! an owned [`Snapshot`] taken after a tick instead of aliasing live state.

use glam::Vec2;
use rand::SeedableRng;
use rand_pcg::Pcg32;
use serde::{Deserialize, Serialize};

use super::camera::Camera;
use super::geometry::Rect;
use super::world::World;
use crate::consts::*;

/// Current phase of the session
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum GamePhase {
    /// No simulation running
    Menu,
    /// Active gameplay (wave progression stays here)
    Playing,
    /// Player health reached zero
    Defeated,
}

/// Who fired a bullet
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Shooter {
    Player,
    Enemy,
}

/// Enemy behavior state
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub enum AiState {
    #[default]
    Patrol,
    Suspicious,
    Defend,
    Attack,
}

impl AiState {
    /// Only these states are allowed to shoot
    pub fn can_fire(self) -> bool {
        matches!(self, AiState::Defend | AiState::Attack)
    }
}

/// The player
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Player {
    pub pos: Vec2,
    /// Facing angle (radians)
    pub angle: f32,
    pub health: f32,
    pub max_health: f32,
    /// Movement per reference frame on each held axis
    pub speed: f32,
}

impl Player {
    pub fn new(pos: Vec2) -> Self {
        Self {
            pos,
            angle: 0.0,
            health: PLAYER_MAX_HEALTH,
            max_health: PLAYER_MAX_HEALTH,
            speed: PLAYER_SPEED,
        }
    }

    /// Apply damage, keeping health within [0, max_health]
    pub fn take_damage(&mut self, amount: f32) {
        self.health = (self.health - amount).clamp(0.0, self.max_health);
    }

    pub fn is_alive(&self) -> bool {
        self.health > 0.0
    }
}

/// An enemy guard
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Enemy {
    pub id: u32,
    pub pos: Vec2,
    pub health: f32,
    /// Facing angle (radians)
    pub angle: f32,
    /// Simulation clock (ms) of the last shot, if any
    pub last_shot_ms: Option<f64>,
    /// Awareness of the player, 0-100
    pub alert: f32,
    pub state: AiState,
    /// Seconds since the last state transition
    pub state_timer: f32,
    pub patrol_point: Option<Vec2>,
}

impl Enemy {
    pub fn new(id: u32, pos: Vec2) -> Self {
        Self {
            id,
            pos,
            health: ENEMY_MAX_HEALTH,
            angle: 0.0,
            last_shot_ms: None,
            alert: 0.0,
            state: AiState::Patrol,
            state_timer: 0.0,
            patrol_point: None,
        }
    }

    pub fn with_patrol_point(mut self, point: Option<Vec2>) -> Self {
        self.patrol_point = point;
        self
    }

    /// Apply damage; health never drops below zero
    pub fn take_damage(&mut self, amount: f32) {
        self.health = (self.health - amount).max(0.0);
    }

    pub fn is_dead(&self) -> bool {
        self.health <= 0.0
    }
}

/// A bullet in flight
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Bullet {
    pub id: u32,
    pub pos: Vec2,
    /// Displacement per reference frame
    pub vel: Vec2,
    pub owner: Shooter,
}

impl Bullet {
    /// Same muzzle speed regardless of shooter
    pub fn fire(id: u32, owner: Shooter, origin: Vec2, angle: f32) -> Self {
        Self {
            id,
            pos: origin,
            vel: Vec2::new(angle.cos(), angle.sin()) * BULLET_SPEED,
            owner,
        }
    }
}

/// A decorative particle (not gameplay-affecting)
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Particle {
    pub pos: Vec2,
    pub vel: Vec2,
    /// 1.0 at spawn, removed at zero
    pub life: f64,
    /// Life lost per reference frame
    pub decay: f64,
    pub size: f32,
    /// 0xRRGGBB
    pub color: u32,
}

/// Things that happened during a tick, drained by the session
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub enum GameEvent {
    ShotFired { by: Shooter },
    PlayerDamaged { health: f32 },
    EnemyEliminated { at: Vec2 },
    WaveCleared { wave: u32 },
    LevelStarted { wave: u32, enemies: usize },
    Defeated,
}

/// Simulation configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct SimConfig {
    pub world_size: Vec2,
    pub viewport: Vec2,
    /// Seconds between clearing a wave and the next level
    pub next_level_delay: f32,
    /// Patrolling enemies pick a fresh patrol point on arrival instead of
    /// holding position
    pub patrol_reassign: bool,
    /// Upper bound on live particles
    pub max_particles: usize,
}

impl Default for SimConfig {
    fn default() -> Self {
        Self {
            world_size: Vec2::new(WORLD_WIDTH, WORLD_HEIGHT),
            viewport: Vec2::new(VIEWPORT_WIDTH, VIEWPORT_HEIGHT),
            next_level_delay: NEXT_LEVEL_DELAY,
            patrol_reassign: true,
            max_particles: MAX_PARTICLES,
        }
    }
}

/// Complete simulation state
#[derive(Debug, Clone)]
pub struct GameState {
    pub config: SimConfig,
    /// Run seed for reproducibility
    pub seed: u64,
    pub(crate) rng: Pcg32,
    pub phase: GamePhase,
    /// Current wave (1-based)
    pub wave: u32,
    pub score: u64,
    /// Simulation tick counter
    pub time_ticks: u64,
    /// Simulation clock in milliseconds
    pub clock_ms: f64,
    pub world: World,
    pub player: Player,
    /// Live enemies (spawn order)
    pub enemies: Vec<Enemy>,
    /// Bullets in flight
    pub bullets: Vec<Bullet>,
    /// Bullets fired this tick; they join `bullets` after ballistics runs
    pub(crate) fired: Vec<Bullet>,
    /// Visual particles
    pub particles: Vec<Particle>,
    pub camera: Camera,
    /// Seconds until the next level starts (after a cleared wave)
    pub next_level_in: Option<f32>,
    /// Events produced since the last drain
    pub events: Vec<GameEvent>,
    /// Next entity ID
    next_id: u32,
}

impl GameState {
    /// Start a run at wave 1 with the first level initialized
    pub fn new(seed: u64, config: SimConfig) -> Self {
        let world = World::office(config.world_size);
        let mut state = Self::with_world(seed, config, world);
        super::tick::init_level(&mut state);
        state
    }

    /// A playing state on a given world with no enemies spawned
    pub fn with_world(seed: u64, config: SimConfig, world: World) -> Self {
        let camera = Camera::new(config.viewport);
        Self {
            config,
            seed,
            rng: Pcg32::seed_from_u64(seed),
            phase: GamePhase::Playing,
            wave: 1,
            score: 0,
            time_ticks: 0,
            clock_ms: 0.0,
            world,
            player: Player::new(Vec2::new(PLAYER_SPAWN_X, PLAYER_SPAWN_Y)),
            enemies: Vec::new(),
            bullets: Vec::new(),
            fired: Vec::new(),
            particles: Vec::new(),
            camera,
            next_level_in: None,
            events: Vec::new(),
            next_id: 1,
        }
    }

    /// Allocate a new entity ID
    pub fn next_entity_id(&mut self) -> u32 {
        let id = self.next_id;
        self.next_id += 1;
        id
    }

    /// Add an enemy at `pos` (patrol point left unset)
    pub fn spawn_enemy(&mut self, pos: Vec2) -> u32 {
        let id = self.next_entity_id();
        self.enemies.push(Enemy::new(id, pos));
        id
    }

    /// Fire a bullet; it starts moving on the next tick
    pub fn shoot(&mut self, owner: Shooter, origin: Vec2, angle: f32) {
        let id = self.next_entity_id();
        self.fired.push(Bullet::fire(id, owner, origin, angle));
        self.events.push(GameEvent::ShotFired { by: owner });
    }

    /// Take the events produced since the last call
    pub fn drain_events(&mut self) -> Vec<GameEvent> {
        std::mem::take(&mut self.events)
    }

    /// Owned copy of everything a renderer or HUD needs
    pub fn snapshot(&self) -> Snapshot {
        Snapshot {
            phase: self.phase,
            wave: self.wave,
            score: self.score,
            player: self.player.clone(),
            enemies: self.enemies.clone(),
            bullets: self.bullets.iter().chain(&self.fired).cloned().collect(),
            particles: self.particles.clone(),
            camera: self.camera,
            walls: self.world.walls.clone(),
            world_size: self.world.size,
        }
    }
}

/// Read-only post-tick view of the simulation
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Snapshot {
    pub phase: GamePhase,
    pub wave: u32,
    pub score: u64,
    pub player: Player,
    pub enemies: Vec<Enemy>,
    pub bullets: Vec<Bullet>,
    pub particles: Vec<Particle>,
    pub camera: Camera,
    pub walls: Vec<Rect>,
    pub world_size: Vec2,
}
