//! Perspective projection and image sizing.
//!
//! A camera-space point projects to `screen = d * p / -z + (dx, dy)`. The
//! [`Projection`] is derived from the scene itself: the bounding box of every
//! projected endpoint is scaled to fill 95% of the requested image extent,
//! keeping its aspect ratio, and centered.

use crate::math::Vector;

/// Points with `z` above `-NEAR_EPSILON` lie on or behind the camera plane and
/// cannot be projected.
pub const NEAR_EPSILON: f64 = 1e-9;

/// Fraction of the image extent the scene's bounding box fills.
const FILL_FACTOR: f64 = 0.95;

/// A projected point: screen coordinates plus the reciprocal camera depth.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Point2D {
    pub x: f64,
    pub y: f64,
    pub inv_z: f64,
}

impl Point2D {
    pub fn new(x: f64, y: f64, inv_z: f64) -> Self {
        Self { x, y, inv_z }
    }
}

#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Projection {
    pub d: f64,
    pub dx: f64,
    pub dy: f64,
    width: u32,
    height: u32,
}

impl Projection {
    pub fn new(d: f64, dx: f64, dy: f64, width: u32, height: u32) -> Self {
        Self {
            d,
            dx,
            dy,
            width,
            height,
        }
    }

    /// Sizes an image of at most `size` pixels on its longest side around the
    /// given camera-space points.
    ///
    /// Returns `None` when no point is in front of the camera or all of them
    /// project onto a single spot.
    pub fn fit<I>(points: I, size: u32) -> Option<Self>
    where
        I: IntoIterator<Item = Vector>,
    {
        let mut x_min = f64::INFINITY;
        let mut x_max = f64::NEG_INFINITY;
        let mut y_min = f64::INFINITY;
        let mut y_max = f64::NEG_INFINITY;

        for p in points {
            if p.z > -NEAR_EPSILON {
                continue;
            }
            let x = p.x / -p.z;
            let y = p.y / -p.z;
            x_min = x_min.min(x);
            x_max = x_max.max(x);
            y_min = y_min.min(y);
            y_max = y_max.max(y);
        }

        let x_range = x_max - x_min;
        let y_range = y_max - y_min;
        let range = x_range.max(y_range);
        if !range.is_finite() || range <= 0.0 {
            return None;
        }

        let size = size as f64;
        let image_x = size * x_range / range;
        let image_y = size * y_range / range;
        let d = FILL_FACTOR * size / range;
        let dx = image_x / 2.0 - d * (x_min + x_max) / 2.0;
        let dy = image_y / 2.0 - d * (y_min + y_max) / 2.0;

        Some(Self::new(
            d,
            dx,
            dy,
            (image_x.round() as u32).max(1),
            (image_y.round() as u32).max(1),
        ))
    }

    pub fn width(&self) -> u32 {
        self.width
    }

    pub fn height(&self) -> u32 {
        self.height
    }

    /// Projects a camera-space point; `None` if it is not in front of the camera.
    #[inline]
    pub fn project(&self, p: Vector) -> Option<Point2D> {
        if p.z > -NEAR_EPSILON {
            return None;
        }
        Some(Point2D::new(
            self.d * p.x / -p.z + self.dx,
            self.d * p.y / -p.z + self.dy,
            1.0 / p.z,
        ))
    }

    /// Recovers the camera-space point under screen position `(x, y)` at
    /// reciprocal depth `inv_z`.
    #[inline]
    pub fn unproject(&self, x: f64, y: f64, inv_z: f64) -> Vector {
        let z = 1.0 / inv_z;
        Vector::point(
            (x - self.dx) * -z / self.d,
            (y - self.dy) * -z / self.d,
            z,
        )
    }

    /// Rounds a screen position to a pixel.
    ///
    /// The 95% fill keeps the scene inside the image; the clamp only absorbs
    /// rounding at the border of very small images.
    #[inline]
    pub fn to_pixel(&self, p: Point2D) -> (u32, u32) {
        let x = (p.x.round() as i64).clamp(0, self.width as i64 - 1);
        let y = (p.y.round() as i64).clamp(0, self.height as i64 - 1);
        (x as u32, y as u32)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;

    fn square_at(z: f64) -> Vec<Vector> {
        vec![
            Vector::point(-1.0, -1.0, z),
            Vector::point(1.0, -1.0, z),
            Vector::point(1.0, 1.0, z),
            Vector::point(-1.0, 1.0, z),
        ]
    }

    #[test]
    fn fit_preserves_aspect_ratio() {
        let points = vec![
            Vector::point(-2.0, -1.0, -1.0),
            Vector::point(2.0, 1.0, -1.0),
        ];
        let projection = Projection::fit(points, 100).unwrap();
        assert_eq!(projection.width(), 100);
        assert_eq!(projection.height(), 50);
    }

    #[test]
    fn fit_centers_and_fills_95_percent() {
        let projection = Projection::fit(square_at(-2.0), 200).unwrap();
        let low = projection.project(Vector::point(-1.0, -1.0, -2.0)).unwrap();
        let high = projection.project(Vector::point(1.0, 1.0, -2.0)).unwrap();
        assert_relative_eq!(low.x, 5.0, epsilon = 1e-9);
        assert_relative_eq!(high.x, 195.0, epsilon = 1e-9);
        assert_relative_eq!((low.y + high.y) / 2.0, 100.0, epsilon = 1e-9);
    }

    #[test]
    fn fit_ignores_points_behind_camera() {
        let mut points = square_at(-2.0);
        points.push(Vector::point(100.0, 100.0, 5.0));
        let projection = Projection::fit(points, 200).unwrap();
        assert_eq!(projection.width(), 200);
        assert_eq!(projection.height(), 200);
    }

    #[test]
    fn fit_of_empty_scene_is_none() {
        assert!(Projection::fit(Vec::new(), 100).is_none());
        assert!(Projection::fit(vec![Vector::point(0.0, 0.0, -1.0)], 100).is_none());
    }

    #[test]
    fn unproject_inverts_project() {
        let projection = Projection::new(300.0, 40.0, -12.0, 100, 100);
        let p = Vector::point(0.7, -1.3, -4.5);
        let s = projection.project(p).unwrap();
        let back = projection.unproject(s.x, s.y, s.inv_z);
        assert_relative_eq!(back.x, p.x, epsilon = 1e-12);
        assert_relative_eq!(back.y, p.y, epsilon = 1e-12);
        assert_relative_eq!(back.z, p.z, epsilon = 1e-12);
    }

    #[test]
    fn project_rejects_points_on_camera_plane() {
        let projection = Projection::new(1.0, 0.0, 0.0, 10, 10);
        assert!(projection.project(Vector::point(1.0, 1.0, 0.0)).is_none());
    }
}
