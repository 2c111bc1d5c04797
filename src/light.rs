//! Lighting types for the renderer.
//!
//! [`Light`] is the scene description in world space. A render turns the light
//! list into a [`Lighting`]: every light moved into camera space, point lights
//! optionally carrying the [`ShadowMap`] rendered from their position.

use log::{debug, warn};

use crate::colors::Color;
use crate::figure::{Figures, Material};
use crate::math::{Mat4, Vector};
use crate::render::shadow::ShadowMap;

/// Where light comes from.
#[derive(Clone, Copy, Debug, PartialEq)]
pub enum LightKind {
    /// Parallel rays travelling along `direction`, like sunlight.
    Infinite { direction: Vector },
    /// Rays emanating from `location`.
    Point { location: Vector },
}

/// A light source with separate ambient, diffuse and specular colours.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Light {
    pub ambient: Color,
    pub diffuse: Color,
    pub specular: Color,
    pub kind: LightKind,
}

impl Light {
    /// A white infinite light travelling along `direction` (normalized).
    pub fn infinite(direction: Vector) -> Self {
        Self {
            ambient: Color::BLACK,
            diffuse: Color::WHITE,
            specular: Color::BLACK,
            kind: LightKind::Infinite {
                direction: direction.to_direction().normalize(),
            },
        }
    }

    /// A white point light at `location`.
    pub fn point(location: Vector) -> Self {
        Self {
            ambient: Color::BLACK,
            diffuse: Color::WHITE,
            specular: Color::BLACK,
            kind: LightKind::Point {
                location: location.to_point(),
            },
        }
    }

    pub fn with_ambient(mut self, ambient: Color) -> Self {
        self.ambient = ambient;
        self
    }

    pub fn with_diffuse(mut self, diffuse: Color) -> Self {
        self.diffuse = diffuse;
        self
    }

    pub fn with_specular(mut self, specular: Color) -> Self {
        self.specular = specular;
        self
    }

    pub fn is_point(&self) -> bool {
        matches!(self.kind, LightKind::Point { .. })
    }
}

/// Camera-space counterpart of [`LightKind`].
#[derive(Clone, Copy, Debug)]
enum Source {
    /// Unit vector pointing towards the light.
    Infinite { to_light: Vector },
    Point { location: Vector },
}

#[derive(Debug)]
struct SceneLight {
    diffuse: Color,
    specular: Color,
    source: Source,
    shadow: Option<ShadowMap>,
}

/// All lights of one render, in camera space.
#[derive(Debug)]
pub struct Lighting {
    ambient: Color,
    lights: Vec<SceneLight>,
    camera_inverse: Mat4,
}

impl Lighting {
    /// Moves `lights` into the frame of `camera`; no shadows.
    pub fn new(lights: &[Light], camera: Mat4) -> Self {
        let ambient = lights
            .iter()
            .fold(Color::BLACK, |sum, light| sum + light.ambient);
        let lights = lights
            .iter()
            .map(|light| SceneLight {
                diffuse: light.diffuse,
                specular: light.specular,
                source: match light.kind {
                    LightKind::Infinite { direction } => Source::Infinite {
                        to_light: -(direction.to_direction() * camera).normalize(),
                    },
                    LightKind::Point { location } => Source::Point {
                        location: location.to_point() * camera,
                    },
                },
                shadow: None,
            })
            .collect();

        Self {
            ambient,
            lights,
            camera_inverse: camera.inverse(),
        }
    }

    /// Like [`Lighting::new`], and renders a `mask_size` shadow map for every
    /// point light from the triangulated world-space figures.
    pub fn with_shadows(lights: &[Light], camera: Mat4, world: &Figures, mask_size: u32) -> Self {
        let mut lighting = Self::new(lights, camera);
        for (scene_light, light) in lighting.lights.iter_mut().zip(lights) {
            if let LightKind::Point { location } = light.kind {
                scene_light.shadow = ShadowMap::render(world, location, mask_size);
                match &scene_light.shadow {
                    Some(map) => debug!(
                        "shadow map {}x{} for light at ({}, {}, {})",
                        map.width(),
                        map.height(),
                        location.x,
                        location.y,
                        location.z
                    ),
                    None => warn!(
                        "no shadow map for light at ({}, {}, {})",
                        location.x, location.y, location.z
                    ),
                }
            }
        }
        lighting
    }

    /// Sum of the ambient colours of all lights.
    pub fn ambient(&self) -> Color {
        self.ambient
    }

    pub fn len(&self) -> usize {
        self.lights.len()
    }

    pub fn is_empty(&self) -> bool {
        self.lights.is_empty()
    }

    /// Phong illumination of a camera-space `position` with unit `normal`.
    ///
    /// Ambient always applies; a point light whose shadow map shows something
    /// nearer to it than `position` contributes neither diffuse nor specular.
    pub fn illuminate(&self, position: Vector, normal: Vector, material: &Material) -> Color {
        let mut color = material.ambient * self.ambient;
        let to_eye = -position.to_direction();
        let to_eye = if to_eye.length() > 0.0 {
            to_eye.normalize()
        } else {
            Vector::ZERO
        };

        for light in &self.lights {
            let to_light = match light.source {
                Source::Infinite { to_light } => to_light,
                Source::Point { location } => {
                    let offset = location - position;
                    if offset.length() == 0.0 {
                        continue;
                    }
                    offset.normalize()
                }
            };

            let cos_theta = normal.dot(to_light);
            if cos_theta <= 0.0 {
                continue;
            }
            if let Some(shadow) = &light.shadow {
                if shadow.is_shadowed(position * self.camera_inverse) {
                    continue;
                }
            }

            color += material.diffuse * light.diffuse * cos_theta;

            let reflected = normal * (2.0 * cos_theta) - to_light;
            let cos_beta = reflected.dot(to_eye);
            if cos_beta > 0.0 {
                color += material.specular
                    * light.specular
                    * cos_beta.powf(material.reflection_coefficient);
            }
        }

        color
    }
}
