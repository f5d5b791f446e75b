//! Static level geometry
//!
//! Walls are immutable for a level's lifetime and rebuilt wholesale when the
//! next level starts.

use glam::Vec2;
use rand::Rng;
use serde::{Deserialize, Serialize};

use super::geometry::{Rect, line_of_sight, rect_overlap};
use crate::consts::*;

/// Interior plan of one office tile, relative to the tile origin
const OFFICE_INTERIOR: [Rect; 6] = [
    Rect::new(200.0, 100.0, 20.0, 150.0),
    Rect::new(400.0, 150.0, 20.0, 200.0),
    Rect::new(600.0, 100.0, 20.0, 150.0),
    Rect::new(100.0, 350.0, 200.0, 20.0),
    Rect::new(500.0, 400.0, 200.0, 20.0),
    Rect::new(350.0, 250.0, 100.0, 20.0),
];

/// Rejection-sampling budget for random open points
const SAMPLE_ATTEMPTS: u32 = 256;

/// World bounds plus the level's wall rectangles
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct World {
    pub size: Vec2,
    pub walls: Vec<Rect>,
}

impl World {
    pub fn new(size: Vec2, walls: Vec<Rect>) -> Self {
        Self { size, walls }
    }

    /// An open arena: just the enclosing boundary walls
    pub fn enclosed(size: Vec2) -> Self {
        Self::new(size, boundary_walls(size))
    }

    /// The office level: boundary walls plus the interior plan repeated in
    /// every whole tile that fits inside `size`
    pub fn office(size: Vec2) -> Self {
        let mut walls = boundary_walls(size);

        let mut origin_y = 0.0;
        while origin_y + OFFICE_TILE_HEIGHT <= size.y {
            let mut origin_x = 0.0;
            while origin_x + OFFICE_TILE_WIDTH <= size.x {
                let origin = Vec2::new(origin_x, origin_y);
                walls.extend(OFFICE_INTERIOR.iter().map(|w| w.translated(origin)));
                origin_x += OFFICE_TILE_WIDTH;
            }
            origin_y += OFFICE_TILE_HEIGHT;
        }

        Self::new(size, walls)
    }

    /// Inclusive world bounds test
    #[inline]
    pub fn contains(&self, point: Vec2) -> bool {
        point.x >= 0.0 && point.x <= self.size.x && point.y >= 0.0 && point.y <= self.size.y
    }

    /// Whether a square of side `size` centered at `point` touches any wall
    pub fn blocked(&self, point: Vec2, size: f32) -> bool {
        let half = size / 2.0;
        self.walls.iter().any(|wall| rect_overlap(point, half, wall))
    }

    /// No wall boundary crosses the straight segment `from`-`to`
    pub fn line_of_sight(&self, from: Vec2, to: Vec2) -> bool {
        line_of_sight(from, to, &self.walls)
    }

    /// Random point where a square of side `size` fits without touching a wall
    ///
    /// Points stay `SPAWN_MARGIN` away from the world edge. `accept` can reject
    /// further candidates (e.g. too close to the player). Returns `None` when
    /// the sampling budget runs out.
    pub fn random_open_point<R: Rng>(
        &self,
        rng: &mut R,
        size: f32,
        mut accept: impl FnMut(Vec2) -> bool,
    ) -> Option<Vec2> {
        let max = self.size - Vec2::splat(SPAWN_MARGIN);
        if max.x <= SPAWN_MARGIN || max.y <= SPAWN_MARGIN {
            return None;
        }

        (0..SAMPLE_ATTEMPTS).find_map(|_| {
            let candidate = Vec2::new(
                rng.random_range(SPAWN_MARGIN..max.x),
                rng.random_range(SPAWN_MARGIN..max.y),
            );
            (!self.blocked(candidate, size) && accept(candidate)).then_some(candidate)
        })
    }
}

fn boundary_walls(size: Vec2) -> Vec<Rect> {
    vec![
        Rect::new(0.0, 0.0, size.x, WALL_THICKNESS),
        Rect::new(0.0, 0.0, WALL_THICKNESS, size.y),
        Rect::new(size.x - WALL_THICKNESS, 0.0, WALL_THICKNESS, size.y),
        Rect::new(0.0, size.y - WALL_THICKNESS, size.x, WALL_THICKNESS),
    ]
}
