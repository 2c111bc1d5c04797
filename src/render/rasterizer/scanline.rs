//! Scanline triangle rasterization with plane-equation depth.
//!
//! # Algorithm Overview
//!
//! 1. **Cull**: triangles whose projection winds clockwise (or has no area)
//!    are skipped without touching any buffer.
//! 2. **Depth plane**: the face plane `w . P = k` gives constant screen-space
//!    gradients of `1/z`:
//!
//!    ```text
//!    d(1/z)/dx = w.x / (-d * k)        d(1/z)/dy = w.y / (-d * k)
//!    ```
//!
//!    so the depth of any pixel is an offset from the centroid's `1/z`
//!    instead of a per-vertex interpolation.
//! 3. **Rows**: from `round(y_min + 0.5)` to `round(y_max - 0.5)`, each row
//!    is intersected with the three edges (edges that do not straddle the
//!    row are skipped) to get its left and right bounds.
//! 4. **Pixels**: left to right, from `round(x_left + 0.5)` to
//!    `round(x_right - 0.5)`, depth tested, then shaded.

use super::shader::{Fragment, PixelShader};
use super::Triangle;
use crate::render::framebuffer::FrameBuffer;
use crate::render::projection::Projection;
use crate::render::zbuffer::DepthBuffer;

/// Scanline-based triangle rasterizer.
///
/// Processes pixels row by row, top row of the triangle's span first in
/// memory order, left to right within a row.
#[derive(Debug, Default, Clone, Copy)]
pub struct ScanlineRasterizer;

impl ScanlineRasterizer {
    pub fn new() -> Self {
        Self
    }

    /// Visits every pixel covered by `triangle` with its interpolated `1/z`.
    ///
    /// Rows and columns are clamped to `width` x `height`; the projection
    /// already keeps geometry inside, the clamp only absorbs rounding.
    fn scan<F>(&self, triangle: &Triangle, d: f64, width: u32, height: u32, mut visit: F)
    where
        F: FnMut(u32, u32, f64),
    {
        if width == 0 || height == 0 {
            return;
        }
        let plane = match triangle.depth_plane(d) {
            Some(plane) => plane,
            None => return,
        };
        let s = triangle.screen();
        let edges = [(s[0], s[1]), (s[1], s[2]), (s[2], s[0])];

        let y_lo = s[0].y.min(s[1].y).min(s[2].y);
        let y_hi = s[0].y.max(s[1].y).max(s[2].y);
        let y_start = ((y_lo + 0.5).round() as i64).max(0);
        let y_end = ((y_hi - 0.5).round() as i64).min(height as i64 - 1);

        for y in y_start..=y_end {
            let yf = y as f64;
            let mut x_left = f64::INFINITY;
            let mut x_right = f64::NEG_INFINITY;

            for (p, q) in edges {
                if p.y == q.y || (yf - p.y) * (yf - q.y) > 0.0 {
                    continue;
                }
                let xi = q.x + (p.x - q.x) * (yf - q.y) / (p.y - q.y);
                x_left = x_left.min(xi);
                x_right = x_right.max(xi);
            }
            if x_left > x_right {
                continue;
            }

            let x_start = ((x_left + 0.5).round() as i64).max(0);
            let x_end = ((x_right - 0.5).round() as i64).min(width as i64 - 1);
            for x in x_start..=x_end {
                let xf = x as f64;
                visit(x as u32, y as u32, plane.at(xf, yf));
            }
        }
    }

    /// Fills a front-facing triangle into the frame buffer.
    ///
    /// Each covered pixel that passes the depth test is shaded by `shader` and
    /// written. Back-facing and degenerate triangles write nothing.
    ///
    /// Returns false if the triangle was culled.
    pub fn fill_triangle(
        &self,
        triangle: &Triangle,
        projection: &Projection,
        buffer: &mut FrameBuffer,
        shader: &dyn PixelShader,
    ) -> bool {
        if !triangle.is_front_facing() {
            return false;
        }
        let (width, height) = (buffer.width(), buffer.height());
        self.scan(triangle, projection.d, width, height, |x, y, inv_z| {
            if buffer.depth_test(x, y, inv_z) {
                let (xf, yf) = (x as f64, y as f64);
                let fragment = Fragment {
                    x: xf,
                    y: yf,
                    position: projection.unproject(xf, yf, inv_z),
                };
                buffer.set_pixel(x, y, shader.shade(&fragment));
            }
        });
        true
    }

    /// Writes only the depth of `triangle`, whichever way it faces.
    pub fn fill_depth(
        &self,
        triangle: &Triangle,
        projection: &Projection,
        depth: &mut DepthBuffer,
    ) {
        let (width, height) = (depth.width(), depth.height());
        self.scan(triangle, projection.d, width, height, |x, y, inv_z| {
            depth.test_and_set(x, y, inv_z);
        });
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::colors::{Color, Rgb8};
    use crate::math::Vector;
    use crate::render::image::Image;
    use crate::render::rasterizer::shader::FlatShader;
    use approx::assert_relative_eq;

    const SIZE: u32 = 64;

    fn projection() -> Projection {
        Projection::new(64.0, 32.0, 32.0, SIZE, SIZE)
    }

    fn triangle(z: f64, clockwise: bool) -> Triangle {
        let a = Vector::point(-1.5, -1.5, z);
        let b = Vector::point(1.5, -1.5, z);
        let c = Vector::point(0.0, 1.5, z);
        let vertices = if clockwise { [a, c, b] } else { [a, b, c] };
        Triangle::project(vertices, &projection()).unwrap()
    }

    fn buffers() -> (Image, DepthBuffer) {
        (Image::new(SIZE, SIZE, Color::BLACK), DepthBuffer::new(SIZE, SIZE))
    }

    #[test]
    fn fills_interior_and_writes_depth() {
        let (mut image, mut depth) = buffers();
        let mut fb = FrameBuffer::new(&mut image, &mut depth);
        let drawn = ScanlineRasterizer::new().fill_triangle(
            &triangle(-3.0, false),
            &projection(),
            &mut fb,
            &FlatShader::new(Color::WHITE),
        );
        assert!(drawn);
        assert_eq!(image.get(32, 30), Rgb8::new(255, 255, 255));
        assert_relative_eq!(depth.get(32, 30), -1.0 / 3.0, epsilon = 1e-12);
        assert_eq!(image.get(0, 0), Rgb8::new(0, 0, 0));
    }

    #[test]
    fn clockwise_triangle_writes_nothing() {
        let (mut image, mut depth) = buffers();
        let mut fb = FrameBuffer::new(&mut image, &mut depth);
        let drawn = ScanlineRasterizer::new().fill_triangle(
            &triangle(-3.0, true),
            &projection(),
            &mut fb,
            &FlatShader::new(Color::WHITE),
        );
        assert!(!drawn);
        assert_eq!(image, Image::new(SIZE, SIZE, Color::BLACK));
        assert_eq!(depth, DepthBuffer::new(SIZE, SIZE));
    }

    #[test]
    fn farther_triangle_does_not_overwrite_nearer() {
        let (mut image, mut depth) = buffers();
        let mut fb = FrameBuffer::new(&mut image, &mut depth);
        let rasterizer = ScanlineRasterizer::new();
        let red = Color::new(1.0, 0.0, 0.0);
        let blue = Color::new(0.0, 0.0, 1.0);
        for (z, color) in [(-3.0, red), (-6.0, blue)] {
            let shader = FlatShader::new(color);
            rasterizer.fill_triangle(&triangle(z, false), &projection(), &mut fb, &shader);
        }
        assert_eq!(image.get(32, 30), Rgb8::new(255, 0, 0));
        assert_relative_eq!(depth.get(32, 30), -1.0 / 3.0, epsilon = 1e-12);
    }

    #[test]
    fn nearer_triangle_overwrites_farther() {
        let (mut image, mut depth) = buffers();
        let mut fb = FrameBuffer::new(&mut image, &mut depth);
        let rasterizer = ScanlineRasterizer::new();
        for (z, color) in [(-6.0, Color::new(0.0, 0.0, 1.0)), (-3.0, Color::new(1.0, 0.0, 0.0))] {
            let shader = FlatShader::new(color);
            rasterizer.fill_triangle(&triangle(z, false), &projection(), &mut fb, &shader);
        }
        assert_eq!(image.get(32, 30), Rgb8::new(255, 0, 0));
    }

    #[test]
    fn fill_depth_ignores_winding() {
        let mut depth = DepthBuffer::new(SIZE, SIZE);
        ScanlineRasterizer::new().fill_depth(&triangle(-3.0, true), &projection(), &mut depth);
        assert_relative_eq!(depth.get(32, 30), -1.0 / 3.0, epsilon = 1e-12);
    }
}
