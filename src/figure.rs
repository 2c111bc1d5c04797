//! Polygonal meshes ([`Figure`]) and their collection ([`Figures`]).
//!
//! A figure owns its points outright; transforms are applied in place as one
//! matrix multiply over the point buffer (and over the texture frame, if any).

use std::ops::MulAssign;
use std::path::Path;
use std::rc::Rc;

use log::debug;
use serde::Deserialize;

use crate::colors::Color;
use crate::error::EngineError;
use crate::math::{Mat4, Vector};
use crate::texture::Texture;

/// An ordered list of point indices.
///
/// Two indices describe a line segment, three or more a planar polygon.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Face {
    indices: Vec<usize>,
}

impl Face {
    /// # Panics
    /// Panics when fewer than two indices are given.
    pub fn new(indices: Vec<usize>) -> Self {
        assert!(
            indices.len() >= 2,
            "a face needs at least two points, got {}",
            indices.len()
        );
        Self { indices }
    }

    pub fn indices(&self) -> &[usize] {
        &self.indices
    }

    pub fn len(&self) -> usize {
        self.indices.len()
    }

    pub fn is_empty(&self) -> bool {
        self.indices.is_empty()
    }

    pub fn is_line(&self) -> bool {
        self.indices.len() == 2
    }

    /// Fan triangulation from the first index: `(v0, v1, v2), (v0, v2, v3), ...`.
    ///
    /// Line segments are returned unchanged.
    pub fn triangulate(&self) -> Vec<Face> {
        if self.is_line() {
            return vec![self.clone()];
        }
        let first = self.indices[0];
        self.indices[1..]
            .windows(2)
            .map(|pair| Face::new(vec![first, pair[0], pair[1]]))
            .collect()
    }

    /// The boundary edges, closing edge included for polygons.
    pub fn edges(&self) -> Vec<(usize, usize)> {
        if self.is_line() {
            return vec![(self.indices[0], self.indices[1])];
        }
        let n = self.indices.len();
        (0..n)
            .map(|i| (self.indices[i], self.indices[(i + 1) % n]))
            .collect()
    }
}

/// Reflection properties of a surface.
#[derive(Clone, Copy, Debug, PartialEq, Deserialize)]
#[serde(default)]
pub struct Material {
    pub ambient: Color,
    pub diffuse: Color,
    pub specular: Color,
    /// Phong exponent of the specular highlight.
    pub reflection_coefficient: f64,
}

impl Material {
    /// A material that only reflects ambient light.
    pub fn flat(color: Color) -> Self {
        Self {
            ambient: color,
            ..Self::default()
        }
    }
}

impl Default for Material {
    fn default() -> Self {
        Self {
            ambient: Color::WHITE,
            diffuse: Color::BLACK,
            specular: Color::BLACK,
            reflection_coefficient: 1.0,
        }
    }
}

/// Binds a texture to a figure through a local frame in object space.
///
/// A surface point `p` maps to texture coordinates `(u, v)` where
/// `p = origin + u * a + v * b + w * (a x b)`.
#[derive(Clone, Debug)]
pub struct TextureBinding {
    pub texture: Rc<Texture>,
    pub origin: Vector,
    pub a: Vector,
    pub b: Vector,
}

impl TextureBinding {
    pub fn new(texture: Rc<Texture>, origin: Vector, a: Vector, b: Vector) -> Self {
        Self {
            texture,
            origin: origin.to_point(),
            a: a.to_direction(),
            b: b.to_direction(),
        }
    }

    fn transform(&mut self, m: Mat4) {
        self.origin = self.origin * m;
        self.a = self.a * m;
        self.b = self.b * m;
    }
}

/// A polygonal mesh with material and optional texture.
#[derive(Clone, Debug)]
pub struct Figure {
    points: Vec<Vector>,
    faces: Vec<Face>,
    pub material: Material,
    pub texture: Option<TextureBinding>,
}

impl Figure {
    /// # Panics
    /// Panics when a face refers to a point that does not exist.
    pub fn new(points: Vec<Vector>, faces: Vec<Face>, material: Material) -> Self {
        for face in &faces {
            for &index in face.indices() {
                assert!(
                    index < points.len(),
                    "face index {} out of range for {} points",
                    index,
                    points.len()
                );
            }
        }
        Self {
            points: points.into_iter().map(Vector::to_point).collect(),
            faces,
            material,
            texture: None,
        }
    }

    /// Loads every object of an OBJ file into a single figure.
    ///
    /// Polygons are kept as they are; call [`Figure::triangulate`] to split them.
    pub fn from_obj<P: AsRef<Path>>(path: P, material: Material) -> Result<Self, EngineError> {
        let path = path.as_ref();
        let options = tobj::LoadOptions {
            triangulate: false,
            single_index: true,
            ..Default::default()
        };
        let (models, _materials) = tobj::load_obj(path, &options)?;

        let mut points = Vec::new();
        let mut faces = Vec::new();
        for model in &models {
            let mesh = &model.mesh;
            let offset = points.len();
            points.extend(mesh.positions.chunks_exact(3).map(|p| {
                Vector::point(p[0] as f64, p[1] as f64, p[2] as f64)
            }));

            let mut next = 0;
            if mesh.face_arities.is_empty() {
                for tri in mesh.indices.chunks_exact(3) {
                    faces.push(Face::new(
                        tri.iter().map(|&i| offset + i as usize).collect(),
                    ));
                }
            } else {
                for &arity in &mesh.face_arities {
                    let end = next + arity as usize;
                    faces.push(Face::new(
                        mesh.indices[next..end]
                            .iter()
                            .map(|&i| offset + i as usize)
                            .collect(),
                    ));
                    next = end;
                }
            }
        }

        debug!(
            "loaded {} points and {} faces from {}",
            points.len(),
            faces.len(),
            path.display()
        );
        Ok(Self::new(points, faces, material))
    }

    pub fn with_texture(mut self, binding: TextureBinding) -> Self {
        self.texture = Some(binding);
        self
    }

    pub fn points(&self) -> &[Vector] {
        &self.points
    }

    pub fn faces(&self) -> &[Face] {
        &self.faces
    }

    /// Applies `m` to every point and to the texture frame.
    pub fn transform(&mut self, m: Mat4) {
        for point in &mut self.points {
            *point = *point * m;
        }
        if let Some(binding) = &mut self.texture {
            binding.transform(m);
        }
    }

    /// Replaces every polygon with its fan triangulation.
    pub fn triangulate(&mut self) {
        self.faces = self.faces.iter().flat_map(Face::triangulate).collect();
    }
}

impl MulAssign<Mat4> for Figure {
    fn mul_assign(&mut self, rhs: Mat4) {
        self.transform(rhs);
    }
}

/// An owning collection of figures, iterated in insertion order.
#[derive(Clone, Debug, Default)]
pub struct Figures {
    figures: Vec<Figure>,
}

impl Figures {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn push(&mut self, figure: Figure) {
        self.figures.push(figure);
    }

    pub fn len(&self) -> usize {
        self.figures.len()
    }

    pub fn is_empty(&self) -> bool {
        self.figures.is_empty()
    }

    pub fn iter(&self) -> std::slice::Iter<'_, Figure> {
        self.figures.iter()
    }

    pub fn iter_mut(&mut self) -> std::slice::IterMut<'_, Figure> {
        self.figures.iter_mut()
    }

    pub fn transform(&mut self, m: Mat4) {
        for figure in &mut self.figures {
            figure.transform(m);
        }
    }

    pub fn triangulate(&mut self) {
        for figure in &mut self.figures {
            figure.triangulate();
        }
    }
}

impl MulAssign<Mat4> for Figures {
    fn mul_assign(&mut self, rhs: Mat4) {
        self.transform(rhs);
    }
}

impl FromIterator<Figure> for Figures {
    fn from_iter<I: IntoIterator<Item = Figure>>(iter: I) -> Self {
        Self {
            figures: iter.into_iter().collect(),
        }
    }
}

impl<'a> IntoIterator for &'a Figures {
    type Item = &'a Figure;
    type IntoIter = std::slice::Iter<'a, Figure>;

    fn into_iter(self) -> Self::IntoIter {
        self.figures.iter()
    }
}
