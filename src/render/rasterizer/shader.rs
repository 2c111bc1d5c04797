//! Pixel shaders for triangle rasterization.
//!
//! The rasterizer handles coverage and the depth test; a [`PixelShader`]
//! only turns a visible [`Fragment`] into a colour.
//!
//! - [`FlatShader`]: one colour for the whole triangle
//! - [`PhongShader`]: per-pixel Phong lighting with the face normal
//! - [`TextureShader`]: Phong lighting with the material colours replaced by
//!   a bilinear texture sample

use crate::colors::Color;
use crate::figure::{Material, TextureBinding};
use crate::light::Lighting;
use crate::math::{Mat4, Vector};
use crate::texture::Texture;

/// A pixel that passed the depth test.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Fragment {
    /// Screen coordinates of the pixel.
    pub x: f64,
    pub y: f64,
    /// Camera-space point reconstructed from the pixel and its depth.
    pub position: Vector,
}

/// Trait for per-pixel shading computations.
pub trait PixelShader {
    fn shade(&self, fragment: &Fragment) -> Color;
}

/// Flat shader - returns a constant color for all pixels.
pub struct FlatShader {
    color: Color,
}

impl FlatShader {
    pub fn new(color: Color) -> Self {
        Self { color }
    }
}

impl PixelShader for FlatShader {
    #[inline]
    fn shade(&self, _fragment: &Fragment) -> Color {
        self.color
    }
}

/// Phong shader using the triangle's face normal at every pixel.
pub struct PhongShader<'a> {
    lighting: &'a Lighting,
    material: &'a Material,
    normal: Vector,
}

impl<'a> PhongShader<'a> {
    pub fn new(lighting: &'a Lighting, material: &'a Material, normal: Vector) -> Self {
        Self {
            lighting,
            material,
            normal,
        }
    }
}

impl PixelShader for PhongShader<'_> {
    #[inline]
    fn shade(&self, fragment: &Fragment) -> Color {
        self.lighting
            .illuminate(fragment.position, self.normal, self.material)
    }
}

/// Textured Phong shader.
///
/// The fragment's position is expressed in the texture frame `(a, b, a x b)`
/// anchored at the frame origin; the first two coordinates, scaled by the
/// texture size, select the sample that stands in for the ambient, diffuse and
/// specular colours.
pub struct TextureShader<'a> {
    lighting: &'a Lighting,
    texture: &'a Texture,
    origin: Vector,
    to_texture: Mat4,
    reflection_coefficient: f64,
    normal: Vector,
}

impl<'a> TextureShader<'a> {
    /// `binding` must already be in the same (camera) space as the fragments.
    ///
    /// # Panics
    /// Panics if the binding's basis vectors are parallel.
    pub fn new(
        lighting: &'a Lighting,
        binding: &'a TextureBinding,
        reflection_coefficient: f64,
        normal: Vector,
    ) -> Self {
        let frame = Mat4::from_basis(binding.a, binding.b, binding.a.cross(binding.b));
        Self {
            lighting,
            texture: &binding.texture,
            origin: binding.origin,
            to_texture: frame.inverse(),
            reflection_coefficient,
            normal,
        }
    }

    /// Texture-space pixel coordinates of a camera-space point.
    #[inline]
    pub fn texture_coordinates(&self, position: Vector) -> (f64, f64) {
        let local = (position - self.origin) * self.to_texture;
        (
            local.x * self.texture.width() as f64,
            local.y * self.texture.height() as f64,
        )
    }
}

impl PixelShader for TextureShader<'_> {
    fn shade(&self, fragment: &Fragment) -> Color {
        let (u, v) = self.texture_coordinates(fragment.position);
        let texel = self.texture.sample(u, v);
        let material = Material {
            ambient: texel,
            diffuse: texel,
            specular: texel,
            reflection_coefficient: self.reflection_coefficient,
        };
        self.lighting
            .illuminate(fragment.position, self.normal, &material)
    }
}
