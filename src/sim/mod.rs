//! Simulation core
//!
//! All gameplay logic lives here. This module must stay free of I/O:
//! - One explicitly owned `GameState`, mutated only by `tick`
//! - Seeded RNG only
//! - Stable iteration order (spawn order)
//! - No rendering, audio or platform dependencies

pub mod ai;
pub mod ballistics;
pub mod camera;
pub mod geometry;
pub mod movement;
pub mod particles;
pub mod state;
pub mod tick;
pub mod world;

pub use ai::{Perception, candidate_state, update_alert};
pub use camera::Camera;
pub use geometry::{Rect, line_of_sight, rect_overlap, segment_intersects_rect, segment_intersects_segment};
pub use state::{
    AiState, Bullet, Enemy, GameEvent, GamePhase, GameState, Particle, Player, Shooter, SimConfig,
    Snapshot,
};
pub use tick::{TickInput, init_level, tick};
pub use world::World;
