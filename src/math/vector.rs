//! Three-component vector tagged as either a point or a direction.
//!
//! # Tag rules
//! - Points transform with translation, directions without it.
//! - `point + direction = point`, `direction + direction = direction`.
//! - `point - point = direction`, `point - direction = point`.
//! - Scaling and negation keep the tag; the cross product is always a direction.

use std::ops::{Add, Div, Mul, Neg, Sub};

/// Whether a [`Vector`] is a location or a displacement.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum Kind {
    Point,
    Direction,
}

#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Vector {
    pub x: f64,
    pub y: f64,
    pub z: f64,
    kind: Kind,
}

impl Vector {
    pub const ORIGIN: Self = Self::point(0.0, 0.0, 0.0);
    pub const ZERO: Self = Self::direction(0.0, 0.0, 0.0);

    pub const fn point(x: f64, y: f64, z: f64) -> Self {
        Self {
            x,
            y,
            z,
            kind: Kind::Point,
        }
    }

    pub const fn direction(x: f64, y: f64, z: f64) -> Self {
        Self {
            x,
            y,
            z,
            kind: Kind::Direction,
        }
    }

    pub fn kind(&self) -> Kind {
        self.kind
    }

    pub fn is_point(&self) -> bool {
        self.kind == Kind::Point
    }

    pub fn is_direction(&self) -> bool {
        self.kind == Kind::Direction
    }

    /// Same coordinates, retagged as a point.
    pub fn to_point(self) -> Self {
        Self::point(self.x, self.y, self.z)
    }

    /// Same coordinates, retagged as a direction.
    pub fn to_direction(self) -> Self {
        Self::direction(self.x, self.y, self.z)
    }

    pub fn length(&self) -> f64 {
        (self.x * self.x + self.y * self.y + self.z * self.z).sqrt()
    }

    /// Returns the unit vector with the same tag.
    ///
    /// # Panics
    /// Panics when the vector has zero length.
    pub fn normalize(&self) -> Self {
        let length = self.length();
        assert!(length > 0.0, "cannot normalize a zero-length vector");
        Self {
            x: self.x / length,
            y: self.y / length,
            z: self.z / length,
            kind: self.kind,
        }
    }

    pub fn dot(&self, other: Self) -> f64 {
        self.x * other.x + self.y * other.y + self.z * other.z
    }

    /// Cross product; the result is always a direction.
    pub fn cross(&self, other: Self) -> Self {
        Self::direction(
            self.y * other.z - self.z * other.y,
            self.z * other.x - self.x * other.z,
            self.x * other.y - self.y * other.x,
        )
    }
}

impl Add<Vector> for Vector {
    type Output = Vector;

    fn add(self, rhs: Vector) -> Self::Output {
        let kind = if self.is_point() || rhs.is_point() {
            Kind::Point
        } else {
            Kind::Direction
        };
        Self {
            x: self.x + rhs.x,
            y: self.y + rhs.y,
            z: self.z + rhs.z,
            kind,
        }
    }
}

impl Sub<Vector> for Vector {
    type Output = Vector;

    fn sub(self, rhs: Vector) -> Self::Output {
        let kind = if self.kind == rhs.kind {
            Kind::Direction
        } else {
            Kind::Point
        };
        Self {
            x: self.x - rhs.x,
            y: self.y - rhs.y,
            z: self.z - rhs.z,
            kind,
        }
    }
}

impl Mul<f64> for Vector {
    type Output = Vector;

    fn mul(self, rhs: f64) -> Self::Output {
        Self {
            x: self.x * rhs,
            y: self.y * rhs,
            z: self.z * rhs,
            kind: self.kind,
        }
    }
}

impl Div<f64> for Vector {
    type Output = Vector;

    fn div(self, rhs: f64) -> Self::Output {
        Self {
            x: self.x / rhs,
            y: self.y / rhs,
            z: self.z / rhs,
            kind: self.kind,
        }
    }
}

impl Neg for Vector {
    type Output = Vector;

    fn neg(self) -> Self::Output {
        Self {
            x: -self.x,
            y: -self.y,
            z: -self.z,
            kind: self.kind,
        }
    }
}
