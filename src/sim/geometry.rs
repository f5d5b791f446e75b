//! Axis-aligned rectangle and segment geometry
//!
//! Every moving entity collides as a square of side `size`. Line of sight is
//! built entirely on [`segment_intersects_rect`].

use glam::Vec2;
use serde::{Deserialize, Serialize};

/// An axis-aligned rectangle (top-left origin, y grows downward)
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Rect {
    pub x: f32,
    pub y: f32,
    pub width: f32,
    pub height: f32,
}

impl Rect {
    pub const fn new(x: f32, y: f32, width: f32, height: f32) -> Self {
        Self {
            x,
            y,
            width,
            height,
        }
    }

    #[inline]
    pub fn left(&self) -> f32 {
        self.x
    }

    #[inline]
    pub fn right(&self) -> f32 {
        self.x + self.width
    }

    #[inline]
    pub fn top(&self) -> f32 {
        self.y
    }

    #[inline]
    pub fn bottom(&self) -> f32 {
        self.y + self.height
    }

    /// Same rectangle moved by `offset`
    pub fn translated(&self, offset: Vec2) -> Self {
        Self::new(self.x + offset.x, self.y + offset.y, self.width, self.height)
    }

    /// The four boundary edges, clockwise from the top edge
    pub fn edges(&self) -> [(Vec2, Vec2); 4] {
        let tl = Vec2::new(self.left(), self.top());
        let tr = Vec2::new(self.right(), self.top());
        let br = Vec2::new(self.right(), self.bottom());
        let bl = Vec2::new(self.left(), self.bottom());
        [(tl, tr), (tr, br), (br, bl), (bl, tl)]
    }
}

/// Inclusive overlap between a square (center `point`, half side `half_size`)
/// and a rectangle
#[inline]
pub fn rect_overlap(point: Vec2, half_size: f32, rect: &Rect) -> bool {
    point.x - half_size <= rect.right()
        && point.x + half_size >= rect.left()
        && point.y - half_size <= rect.bottom()
        && point.y + half_size >= rect.top()
}

/// Parametric segment/segment intersection
///
/// Parallel segments (zero denominator) never intersect, collinear overlap
/// included.
pub fn segment_intersects_segment(p1: Vec2, p2: Vec2, p3: Vec2, p4: Vec2) -> bool {
    let denom = (p4.y - p3.y) * (p2.x - p1.x) - (p4.x - p3.x) * (p2.y - p1.y);
    if denom == 0.0 {
        return false;
    }

    let ua = ((p4.x - p3.x) * (p1.y - p3.y) - (p4.y - p3.y) * (p1.x - p3.x)) / denom;
    let ub = ((p2.x - p1.x) * (p1.y - p3.y) - (p2.y - p1.y) * (p1.x - p3.x)) / denom;

    (0.0..=1.0).contains(&ua) && (0.0..=1.0).contains(&ub)
}

/// True iff the segment crosses any of the rectangle's four edges
///
/// Endpoints are put in a canonical order first so the answer does not depend
/// on which end the segment is walked from.
pub fn segment_intersects_rect(p1: Vec2, p2: Vec2, rect: &Rect) -> bool {
    let (a, b) = if (p1.x, p1.y) <= (p2.x, p2.y) {
        (p1, p2)
    } else {
        (p2, p1)
    };

    rect.edges()
        .iter()
        .any(|&(e1, e2)| segment_intersects_segment(a, b, e1, e2))
}

/// Line of sight between two points: no wall edge crosses the segment
pub fn line_of_sight(from: Vec2, to: Vec2, walls: &[Rect]) -> bool {
    !walls.iter().any(|wall| segment_intersects_rect(from, to, wall))
}
