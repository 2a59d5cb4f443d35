//! Freehand strokes and their conversion into static collision segments.
//!
//! A stroke is captured as an [`ActiveStroke`] while the pointer is down and
//! frozen into a [`Stroke`] on release. Each consecutive point pair longer than
//! the threshold becomes a [`Segment`], which in turn becomes a fixed, rotated
//! rectangle in the physics world. Shorter pairs are jitter and are dropped.

use glam::Vec2;

use crate::core::physics::{BodyDesc, ColliderDesc};

/// Segments must be strictly longer than this (in pixels) to become colliders.
pub const MIN_SEGMENT_LENGTH: f32 = 2.0;

/// A straight piece of a stroke between two consecutive captured points.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Segment {
    pub start: Vec2,
    pub end: Vec2,
}

impl Segment {
    pub fn new(start: Vec2, end: Vec2) -> Self {
        Self { start, end }
    }

    pub fn length(&self) -> f32 {
        self.start.distance(self.end)
    }

    /// Direction from `start` to `end` in radians, `atan2(dy, dx)`.
    pub fn angle(&self) -> f32 {
        let d = self.end - self.start;
        d.y.atan2(d.x)
    }

    pub fn midpoint(&self) -> Vec2 {
        (self.start + self.end) * 0.5
    }

    /// A fixed rectangle centred on the midpoint, `length` wide and `thickness`
    /// tall, rotated to the segment's angle.
    pub fn body_desc(&self, thickness: f32) -> BodyDesc {
        BodyDesc::fixed(ColliderDesc::Cuboid {
            half_width: self.length() * 0.5,
            half_height: thickness * 0.5,
        })
        .with_position(self.midpoint())
        .with_rotation(self.angle())
    }
}

/// Split a point path into the segments that are long enough to collide with.
pub fn segment_points(points: &[Vec2], min_length: f32) -> Vec<Segment> {
    points
        .windows(2)
        .map(|pair| Segment::new(pair[0], pair[1]))
        .filter(|segment| segment.length() > min_length)
        .collect()
}

/// A stroke that is still being drawn.
#[derive(Debug, Clone, PartialEq)]
pub struct ActiveStroke {
    points: Vec<Vec2>,
}

impl ActiveStroke {
    pub fn begin(start: Vec2) -> Self {
        let mut points = Vec::with_capacity(64);
        points.push(start);
        Self { points }
    }

    pub fn push(&mut self, point: Vec2) {
        self.points.push(point);
    }

    pub fn points(&self) -> &[Vec2] {
        &self.points
    }

    pub fn len(&self) -> usize {
        self.points.len()
    }

    /// Freeze the stroke. Strokes with fewer than two points have no shape and
    /// are discarded.
    pub fn commit(self) -> Option<Stroke> {
        if self.points.len() < 2 {
            return None;
        }
        Some(Stroke {
            points: self.points,
        })
    }
}

/// A committed stroke: kept for redraw, never edited again.
#[derive(Debug, Clone, PartialEq)]
pub struct Stroke {
    points: Vec<Vec2>,
}

impl Stroke {
    pub fn points(&self) -> &[Vec2] {
        &self.points
    }

    pub fn segments(&self, min_length: f32) -> Vec<Segment> {
        segment_points(&self.points, min_length)
    }
}
