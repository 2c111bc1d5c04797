//! RON scene files.
//!
//! A scene file holds the [`RenderSettings`], the lights and the figures of one
//! render. Figures are either OBJ files or inline point/face lists, placed with
//! a scale / rotation / position triple. Relative paths resolve against the
//! directory of the scene file.
//!
//! ```ron
//! (
//!     settings: (size: 512, mode: LightedZBuffering, shadows: true),
//!     lights: [
//!         (source: Point((0.0, 8.0, 8.0)), ambient: (r: 0.2, g: 0.2, b: 0.2)),
//!     ],
//!     figures: [
//!         (
//!             mesh: Obj("cube.obj"),
//!             material: (diffuse: (r: 0.5, g: 0.5, b: 0.5)),
//!             transform: (rotation: (0.0, 45.0, 0.0)),
//!         ),
//!     ],
//! )
//! ```

use std::collections::HashMap;
use std::fs;
use std::path::{Path, PathBuf};
use std::rc::Rc;

use log::{debug, info};
use serde::Deserialize;

use crate::colors::Color;
use crate::engine::{RenderSettings, Scene};
use crate::error::EngineError;
use crate::figure::{Face, Figure, Figures, Material, TextureBinding};
use crate::light::Light;
use crate::math::Vector;
use crate::texture::Texture;
use crate::transform::Transform;

type Triple = (f64, f64, f64);

fn point((x, y, z): Triple) -> Vector {
    Vector::point(x, y, z)
}

fn direction((x, y, z): Triple) -> Vector {
    Vector::direction(x, y, z)
}

#[derive(Debug, Clone, Deserialize)]
pub struct SceneFile {
    #[serde(default)]
    pub settings: RenderSettings,
    #[serde(default)]
    pub lights: Vec<LightDef>,
    #[serde(default)]
    pub figures: Vec<FigureDef>,
}

#[derive(Debug, Clone, Copy, Deserialize)]
pub enum LightSource {
    /// Direction the light travels in.
    Infinite(Triple),
    /// Location of the light.
    Point(Triple),
}

#[derive(Debug, Clone, Copy, Deserialize)]
pub struct LightDef {
    pub source: LightSource,
    #[serde(default)]
    pub ambient: Color,
    #[serde(default = "white")]
    pub diffuse: Color,
    #[serde(default)]
    pub specular: Color,
}

fn white() -> Color {
    Color::WHITE
}

#[derive(Debug, Clone, Deserialize)]
pub enum MeshDef {
    Obj(PathBuf),
    Inline {
        points: Vec<Triple>,
        faces: Vec<Vec<usize>>,
    },
}

#[derive(Debug, Clone, Copy, Deserialize)]
#[serde(default)]
pub struct TransformDef {
    pub scale: Triple,
    /// Degrees about x, y and z.
    pub rotation: Triple,
    pub position: Triple,
}

impl Default for TransformDef {
    fn default() -> Self {
        Self {
            scale: (1.0, 1.0, 1.0),
            rotation: (0.0, 0.0, 0.0),
            position: (0.0, 0.0, 0.0),
        }
    }
}

impl TransformDef {
    pub fn to_transform(&self) -> Transform {
        let mut transform = Transform::new();
        transform
            .set_scale_xyz(self.scale.0, self.scale.1, self.scale.2)
            .set_rotation_xyz(self.rotation.0, self.rotation.1, self.rotation.2)
            .set_position(point(self.position));
        transform
    }
}

#[derive(Debug, Clone, Deserialize)]
pub struct TextureDef {
    pub image: PathBuf,
    pub origin: Triple,
    pub a: Triple,
    pub b: Triple,
}

#[derive(Debug, Clone, Deserialize)]
pub struct FigureDef {
    pub mesh: MeshDef,
    #[serde(default)]
    pub material: Material,
    #[serde(default)]
    pub transform: TransformDef,
    #[serde(default)]
    pub texture: Option<TextureDef>,
}

impl SceneFile {
    pub fn parse(text: &str) -> Result<Self, EngineError> {
        Ok(ron::from_str(text)?)
    }

    /// Reads and builds the scene at `path`.
    pub fn load<P: AsRef<Path>>(path: P) -> Result<(RenderSettings, Scene), EngineError> {
        let path = path.as_ref();
        let text = fs::read_to_string(path)?;
        let base = path.parent().unwrap_or_else(|| Path::new(""));
        let loaded = Self::parse(&text)?.build(base)?;
        info!(
            "loaded scene {} with {} figures and {} lights",
            path.display(),
            loaded.1.figures.len(),
            loaded.1.lights.len()
        );
        Ok(loaded)
    }

    /// Loads meshes and textures (relative to `base`) and places every figure
    /// in the world.
    pub fn build(self, base: &Path) -> Result<(RenderSettings, Scene), EngineError> {
        self.validate()?;

        let mut textures: HashMap<PathBuf, Rc<Texture>> = HashMap::new();
        let mut figures = Figures::new();
        for def in &self.figures {
            let mut figure = match &def.mesh {
                MeshDef::Obj(file) => Figure::from_obj(base.join(file), def.material)?,
                MeshDef::Inline { points, faces } => inline_figure(points, faces, def.material)?,
            };

            if let Some(texture) = &def.texture {
                let file = base.join(&texture.image);
                let image = match textures.get(&file) {
                    Some(image) => Rc::clone(image),
                    None => {
                        let image = Rc::new(Texture::from_file(&file)?);
                        debug!(
                            "loaded {}x{} texture {}",
                            image.width(),
                            image.height(),
                            file.display()
                        );
                        textures.insert(file, Rc::clone(&image));
                        image
                    }
                };
                figure = figure.with_texture(TextureBinding::new(
                    image,
                    point(texture.origin),
                    direction(texture.a),
                    direction(texture.b),
                ));
            }

            figure *= def.transform.to_transform().to_matrix();
            figures.push(figure);
        }

        let lights = self.lights.iter().map(LightDef::to_light).collect();
        Ok((self.settings, Scene::new(figures, lights)))
    }

    fn validate(&self) -> Result<(), EngineError> {
        if self.settings.size == 0 {
            return Err(invalid("image size must be positive"));
        }
        if self.settings.shadows && self.settings.shadow_mask_size == 0 {
            return Err(invalid("shadow mask size must be positive"));
        }
        if direction(self.settings.eye).length() == 0.0 {
            return Err(invalid("eye point must not be the origin"));
        }
        for light in &self.lights {
            if let LightSource::Infinite(d) = light.source {
                if direction(d).length() == 0.0 {
                    return Err(invalid("infinite light without a direction"));
                }
            }
        }
        for texture in self.figures.iter().filter_map(|f| f.texture.as_ref()) {
            if direction(texture.a).cross(direction(texture.b)).length() == 0.0 {
                return Err(invalid("texture basis vectors must not be parallel"));
            }
        }
        Ok(())
    }
}

impl LightDef {
    pub fn to_light(&self) -> Light {
        let light = match self.source {
            LightSource::Infinite(d) => Light::infinite(direction(d)),
            LightSource::Point(p) => Light::point(point(p)),
        };
        light
            .with_ambient(self.ambient)
            .with_diffuse(self.diffuse)
            .with_specular(self.specular)
    }
}

fn invalid(description: &str) -> EngineError {
    EngineError::InvalidScene {
        description: description.to_string(),
    }
}

fn inline_figure(
    points: &[Triple],
    faces: &[Vec<usize>],
    material: Material,
) -> Result<Figure, EngineError> {
    for face in faces {
        if face.len() < 2 {
            return Err(invalid("a face needs at least two points"));
        }
        if let Some(&index) = face.iter().find(|&&i| i >= points.len()) {
            return Err(EngineError::InvalidScene {
                description: format!("face index {} out of range", index),
            });
        }
    }
    Ok(Figure::new(
        points.iter().copied().map(point).collect(),
        faces.iter().cloned().map(Face::new).collect(),
        material,
    ))
}
