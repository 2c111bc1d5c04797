//! Depth maps rendered from point lights.
//!
//! A [`ShadowMap`] is the depth-only view of the whole world from one light,
//! sized and projected exactly like the camera image. It is written once when
//! built and only read afterwards.

use log::debug;

use super::projection::{Projection, NEAR_EPSILON};
use super::rasterizer::{ScanlineRasterizer, Triangle};
use super::zbuffer::DepthBuffer;
use crate::figure::Figures;
use crate::math::{Mat4, Vector};
use crate::transform::eye_point;

/// How much farther than the stored surface a point must be to count as
/// shadowed, as a fraction of the stored `1/z`. Absorbs the error of the
/// bilinear reconstruction at any distance from the light.
pub const SHADOW_EPSILON: f64 = 1e-4;

#[derive(Debug, Clone)]
pub struct ShadowMap {
    buffer: DepthBuffer,
    projection: Projection,
    eye: Mat4,
}

impl ShadowMap {
    /// Renders every polygon of the world-space `world` as seen from
    /// `location`, into a map of at most `size` pixels per side.
    ///
    /// Returns `None` when the light sits at the origin (it has no viewing
    /// direction) or nothing is in front of it.
    pub fn render(world: &Figures, location: Vector, size: u32) -> Option<Self> {
        if location.to_direction().length() == 0.0 {
            return None;
        }
        let eye = eye_point(location);

        let points = world
            .iter()
            .flat_map(|figure| figure.points().iter().map(move |&p| p * eye));
        let projection = Projection::fit(points, size)?;
        let mut buffer = DepthBuffer::new(projection.width(), projection.height());

        let rasterizer = ScanlineRasterizer::new();
        let mut skipped = 0usize;
        for figure in world {
            let points = figure.points();
            for face in figure.faces().iter().filter(|face| !face.is_line()) {
                for triangle in face.triangulate() {
                    let [a, b, c] = match triangle.indices() {
                        &[a, b, c] => [a, b, c],
                        _ => continue,
                    };
                    let vertices = [points[a] * eye, points[b] * eye, points[c] * eye];
                    match Triangle::project(vertices, &projection) {
                        Some(t) => rasterizer.fill_depth(&t, &projection, &mut buffer),
                        None => skipped += 1,
                    }
                }
            }
        }
        if skipped > 0 {
            debug!("shadow pass skipped {} triangles behind the light", skipped);
        }

        Some(Self {
            buffer,
            projection,
            eye,
        })
    }

    pub fn width(&self) -> u32 {
        self.buffer.width()
    }

    pub fn height(&self) -> u32 {
        self.buffer.height()
    }

    /// True when the light sees another surface in front of `world_point`.
    ///
    /// Points behind the light or outside everything the map recorded are lit.
    pub fn is_shadowed(&self, world_point: Vector) -> bool {
        let p = world_point.to_point() * self.eye;
        if p.z > -NEAR_EPSILON {
            return false;
        }
        let s = match self.projection.project(p) {
            Some(s) => s,
            None => return false,
        };
        let stored = self.buffer.sample(s.x, s.y);
        s.inv_z - stored > SHADOW_EPSILON * stored.abs()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::figure::{Face, Figure, Material};

    /// A 2x2 square in the z = 0 plane.
    fn occluder() -> Figures {
        let square = Figure::new(
            vec![
                Vector::point(-1.0, -1.0, 0.0),
                Vector::point(1.0, -1.0, 0.0),
                Vector::point(1.0, 1.0, 0.0),
                Vector::point(-1.0, 1.0, 0.0),
            ],
            vec![Face::new(vec![0, 1, 2, 3])],
            Material::default(),
        );
        std::iter::once(square).collect()
    }

    fn light() -> Vector {
        Vector::point(0.0, 0.0, 10.0)
    }

    #[test]
    fn map_has_requested_extent() {
        let map = ShadowMap::render(&occluder(), light(), 32).unwrap();
        assert_eq!(map.width(), 32);
        assert_eq!(map.height(), 32);
    }

    #[test]
    fn point_behind_occluder_is_shadowed() {
        let map = ShadowMap::render(&occluder(), light(), 64).unwrap();
        assert!(map.is_shadowed(Vector::point(0.0, 0.0, -5.0)));
        assert!(map.is_shadowed(Vector::point(0.3, -0.2, -1.0)));
    }

    #[test]
    fn distant_light_still_casts_shadows() {
        let map = ShadowMap::render(&occluder(), Vector::point(0.0, 0.0, 100.0), 256).unwrap();
        for gap in [0.1, 0.5, 1.0] {
            assert!(
                map.is_shadowed(Vector::point(0.2, 0.1, -gap)),
                "point {} behind the occluder is lit",
                gap
            );
        }
        assert!(!map.is_shadowed(Vector::point(0.2, 0.1, 0.0)));
        assert!(!map.is_shadowed(Vector::point(0.2, 0.1, 0.5)));
    }

    #[test]
    fn point_in_front_of_occluder_is_lit() {
        let map = ShadowMap::render(&occluder(), light(), 64).unwrap();
        assert!(!map.is_shadowed(Vector::point(0.0, 0.0, 2.0)));
    }

    #[test]
    fn surface_does_not_shadow_itself() {
        let map = ShadowMap::render(&occluder(), light(), 64).unwrap();
        assert!(!map.is_shadowed(Vector::point(0.3, 0.2, 0.0)));
        assert!(!map.is_shadowed(Vector::point(-0.5, 0.5, 0.0)));
    }

    #[test]
    fn point_behind_light_is_lit() {
        let map = ShadowMap::render(&occluder(), light(), 64).unwrap();
        assert!(!map.is_shadowed(Vector::point(0.0, 0.0, 20.0)));
    }

    #[test]
    fn light_at_origin_has_no_map() {
        assert!(ShadowMap::render(&occluder(), Vector::ORIGIN, 64).is_none());
    }

    #[test]
    fn empty_world_has_no_map() {
        assert!(ShadowMap::render(&Figures::new(), light(), 64).is_none());
    }
}
