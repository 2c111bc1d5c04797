//! Triangle and line rasterization.
//!
//! - [`ScanlineRasterizer`]: row-by-row triangle fill with plane-equation depth
//! - [`draw_line`]: integer-stepped lines with optional depth testing
//! - [`shader`]: per-pixel colour computation (flat, Phong, textured Phong)

mod line;
mod scanline;
pub mod shader;

pub use line::draw_line;
pub use scanline::ScanlineRasterizer;

use super::projection::{Point2D, Projection};
use crate::math::Vector;

/// A camera-space triangle together with its projection.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Triangle {
    vertices: [Vector; 3],
    screen: [Point2D; 3],
}

impl Triangle {
    /// Projects three camera-space vertices.
    ///
    /// Returns `None` when a vertex lies on or behind the camera plane.
    pub fn project(vertices: [Vector; 3], projection: &Projection) -> Option<Self> {
        let screen = [
            projection.project(vertices[0])?,
            projection.project(vertices[1])?,
            projection.project(vertices[2])?,
        ];
        Some(Self { vertices, screen })
    }

    pub fn vertices(&self) -> &[Vector; 3] {
        &self.vertices
    }

    pub fn screen(&self) -> &[Point2D; 3] {
        &self.screen
    }

    /// Signed area of the projected triangle; positive when it winds
    /// counter-clockwise on screen.
    pub fn signed_area(&self) -> f64 {
        let [a, b, c] = self.screen;
        ((b.x - a.x) * (c.y - a.y) - (c.x - a.x) * (b.y - a.y)) / 2.0
    }

    /// Front faces wind counter-clockwise; degenerate triangles are not front
    /// facing.
    pub fn is_front_facing(&self) -> bool {
        self.signed_area() > 0.0
    }

    /// Unit face normal `(B - A) x (C - A)`, or `None` for a degenerate triangle.
    pub fn normal(&self) -> Option<Vector> {
        let [a, b, c] = self.vertices;
        let n = (b - a).cross(c - a);
        if n.length() > 0.0 {
            Some(n.normalize())
        } else {
            None
        }
    }

    /// Plane equation of `1/z` over the screen, anchored at the centroid.
    fn depth_plane(&self, d: f64) -> Option<DepthPlane> {
        let [a, b, c] = self.vertices;
        let w = (b - a).cross(c - a);
        let k = w.dot(a);
        // The plane passes through the eye: the triangle is seen edge-on.
        // Scaled by |w| and |a| so the test only depends on the viewing angle.
        if k.abs() <= f64::EPSILON * w.length() * a.to_direction().length() {
            return None;
        }

        let [sa, sb, sc] = self.screen;
        Some(DepthPlane {
            xg: (sa.x + sb.x + sc.x) / 3.0,
            yg: (sa.y + sb.y + sc.y) / 3.0,
            inv_zg: (sa.inv_z + sb.inv_z + sc.inv_z) / 3.0,
            dzdx: w.x / (-d * k),
            dzdy: w.y / (-d * k),
        })
    }
}

/// Constant screen-space gradients of `1/z` for one triangle.
#[derive(Clone, Copy, Debug)]
struct DepthPlane {
    xg: f64,
    yg: f64,
    inv_zg: f64,
    dzdx: f64,
    dzdy: f64,
}

impl DepthPlane {
    #[inline]
    fn at(&self, x: f64, y: f64) -> f64 {
        self.inv_zg + (x - self.xg) * self.dzdx + (y - self.yg) * self.dzdy
    }
}
