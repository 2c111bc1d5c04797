//! Projected line segments for the wireframe modes.
//!
//! [`Lines2D`] deduplicates segments shared between faces: a segment is keyed
//! by its endpoints regardless of direction, the last colour written wins, and
//! iteration follows first-insertion order.

use std::collections::HashMap;

use super::projection::Point2D;
use crate::colors::Color;

#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Line2D {
    pub p1: Point2D,
    pub p2: Point2D,
    pub color: Color,
}

impl Line2D {
    pub fn new(p1: Point2D, p2: Point2D, color: Color) -> Self {
        Self { p1, p2, color }
    }

    /// Direction-independent identity of the segment.
    fn key(&self) -> LineKey {
        let a = endpoint_bits(self.p1);
        let b = endpoint_bits(self.p2);
        if a <= b {
            (a, b)
        } else {
            (b, a)
        }
    }
}

type EndpointBits = [u64; 3];
type LineKey = (EndpointBits, EndpointBits);

fn endpoint_bits(p: Point2D) -> EndpointBits {
    // Normalise -0.0 so both zeros hash alike.
    let bits = |v: f64| (v + 0.0).to_bits();
    [bits(p.x), bits(p.y), bits(p.inv_z)]
}

#[derive(Clone, Debug, Default)]
pub struct Lines2D {
    lines: Vec<Line2D>,
    index: HashMap<LineKey, usize>,
}

impl Lines2D {
    pub fn new() -> Self {
        Self::default()
    }

    /// Adds a segment, or recolours it if the same endpoints are already present.
    pub fn insert(&mut self, line: Line2D) {
        match self.index.get(&line.key()) {
            Some(&i) => self.lines[i].color = line.color,
            None => {
                self.index.insert(line.key(), self.lines.len());
                self.lines.push(line);
            }
        }
    }

    pub fn len(&self) -> usize {
        self.lines.len()
    }

    pub fn is_empty(&self) -> bool {
        self.lines.is_empty()
    }

    pub fn iter(&self) -> std::slice::Iter<'_, Line2D> {
        self.lines.iter()
    }
}

impl<'a> IntoIterator for &'a Lines2D {
    type Item = &'a Line2D;
    type IntoIter = std::slice::Iter<'a, Line2D>;

    fn into_iter(self) -> Self::IntoIter {
        self.lines.iter()
    }
}
