//! Core rendering engine.
//!
//! The [`Engine`] struct is the main entry point for the renderer. One call to
//! [`Engine::render`] runs the whole pipeline on a private copy of the scene:
//!
//! 1. move every figure into camera space (and triangulate for solid modes)
//! 2. size the image around everything the faces reference
//! 3. render shadow maps, if enabled, for every point light
//! 4. draw lines or triangles into a fresh image and depth buffer
//!
//! Nothing is shared between renders, so identical inputs give identical
//! images.

use log::{debug, warn};
use serde::Deserialize;

use crate::colors::Color;
use crate::figure::{Figure, Figures};
use crate::light::{Light, Lighting};
use crate::math::{Mat4, Vector};
use crate::render::rasterizer::shader::{FlatShader, PhongShader, PixelShader, TextureShader};
use crate::render::{
    draw_line, DepthBuffer, FrameBuffer, Image, Line2D, Lines2D, Projection, ScanlineRasterizer,
    Triangle,
};
use crate::transform::eye_point;

/// Rendering mode presets
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Deserialize)]
pub enum RenderMode {
    /// Face edges drawn over each other in scene order.
    Wireframe,
    /// Face edges with hidden-line removal through the depth buffer.
    ZBufferedWireframe,
    /// Solid triangles in their material's ambient colour.
    ZBuffering,
    /// Solid triangles with Phong lighting, textures and optional shadows.
    #[default]
    LightedZBuffering,
}

impl RenderMode {
    pub fn is_wireframe(self) -> bool {
        matches!(self, RenderMode::Wireframe | RenderMode::ZBufferedWireframe)
    }
}

/// Everything about a render that is not scene content.
#[derive(Debug, Clone, Copy, PartialEq, Deserialize)]
#[serde(default)]
pub struct RenderSettings {
    /// Longest side of the output image in pixels.
    pub size: u32,
    pub mode: RenderMode,
    pub background: Color,
    /// World-space eye point; the camera always looks at the origin.
    pub eye: (f64, f64, f64),
    pub shadows: bool,
    /// Longest side of every shadow map in pixels.
    pub shadow_mask_size: u32,
}

impl Default for RenderSettings {
    fn default() -> Self {
        Self {
            size: 1024,
            mode: RenderMode::default(),
            background: Color::BLACK,
            eye: (0.0, 0.0, 10.0),
            shadows: false,
            shadow_mask_size: 1024,
        }
    }
}

impl RenderSettings {
    pub fn eye_point(&self) -> Vector {
        let (x, y, z) = self.eye;
        Vector::point(x, y, z)
    }
}

/// World-space content of a render.
#[derive(Debug, Clone, Default)]
pub struct Scene {
    pub figures: Figures,
    pub lights: Vec<Light>,
}

impl Scene {
    pub fn new(figures: Figures, lights: Vec<Light>) -> Self {
        Self { figures, lights }
    }
}

/// Per-render primitive counts.
#[derive(Debug, Default)]
struct RenderStats {
    drawn: usize,
    culled: usize,
    /// Primitives with a vertex on or behind the camera plane.
    skipped: usize,
}

pub struct Engine {
    settings: RenderSettings,
    camera: Mat4,
}

impl Engine {
    /// # Panics
    /// Panics when the eye point is the origin.
    pub fn new(settings: RenderSettings) -> Self {
        let camera = eye_point(settings.eye_point());
        Self { settings, camera }
    }

    /// Uses `camera` as the world-to-camera transform instead of deriving it
    /// from the settings' eye point.
    pub fn with_camera(settings: RenderSettings, camera: Mat4) -> Self {
        Self { settings, camera }
    }

    pub fn settings(&self) -> &RenderSettings {
        &self.settings
    }

    pub fn camera(&self) -> Mat4 {
        self.camera
    }

    pub fn set_render_mode(&mut self, mode: RenderMode) {
        self.settings.mode = mode;
    }

    pub fn render_mode(&self) -> RenderMode {
        self.settings.mode
    }

    /// Renders `scene` into a new image.
    ///
    /// An empty scene (nothing in front of the camera, or everything on a
    /// single spot) gives a 0x0 image.
    pub fn render(&self, scene: &Scene) -> Image {
        let settings = &self.settings;
        let mut figures = scene.figures.clone();
        figures *= self.camera;
        if !settings.mode.is_wireframe() {
            figures.triangulate();
        }

        let projection = match Projection::fit(referenced_points(&figures), settings.size) {
            Some(projection) => projection,
            None => {
                warn!("nothing to draw in front of the camera");
                return Image::new(0, 0, settings.background);
            }
        };
        let (width, height) = (projection.width(), projection.height());
        debug!(
            "rendering {}x{} image, mode {:?}, d = {:.3}",
            width, height, settings.mode, projection.d
        );

        let mut image = Image::new(width, height, settings.background);
        let mut depth = DepthBuffer::new(width, height);
        let mut stats = RenderStats::default();
        {
            let mut buffer = FrameBuffer::new(&mut image, &mut depth);
            match settings.mode {
                RenderMode::Wireframe | RenderMode::ZBufferedWireframe => {
                    let lines = collect_lines(&figures, &projection, &mut stats);
                    let depth_tested = settings.mode == RenderMode::ZBufferedWireframe;
                    for line in &lines {
                        draw_line(&mut buffer, &projection, line, depth_tested);
                    }
                    stats.drawn = lines.len();
                }
                RenderMode::ZBuffering => {
                    draw_solids(&figures, &projection, &mut buffer, None, &mut stats);
                }
                RenderMode::LightedZBuffering => {
                    if scene.lights.is_empty() {
                        warn!("no lights in scene, shading with ambient colours");
                        draw_solids(&figures, &projection, &mut buffer, None, &mut stats);
                    } else {
                        let lighting = self.lighting(scene);
                        draw_solids(
                            &figures,
                            &projection,
                            &mut buffer,
                            Some(&lighting),
                            &mut stats,
                        );
                    }
                }
            }
        }

        debug!("{} primitives drawn, {} culled", stats.drawn, stats.culled);
        if stats.skipped > 0 {
            warn!(
                "skipped {} primitives with a vertex on or behind the camera plane",
                stats.skipped
            );
        }
        image
    }

    fn lighting(&self, scene: &Scene) -> Lighting {
        if self.settings.shadows {
            Lighting::with_shadows(
                &scene.lights,
                self.camera,
                &scene.figures,
                self.settings.shadow_mask_size,
            )
        } else {
            Lighting::new(&scene.lights, self.camera)
        }
    }
}

/// Every point used by some face, in scene order.
fn referenced_points(figures: &Figures) -> impl Iterator<Item = Vector> + '_ {
    figures.iter().flat_map(|figure| {
        let points = figure.points();
        figure
            .faces()
            .iter()
            .flat_map(move |face| face.indices().iter().map(move |&i| points[i]))
    })
}

/// Projected edges of every face, shared edges merged.
fn collect_lines(figures: &Figures, projection: &Projection, stats: &mut RenderStats) -> Lines2D {
    let mut lines = Lines2D::new();
    for figure in figures {
        let points = figure.points();
        let color = figure.material.ambient;
        for face in figure.faces() {
            for (i, j) in face.edges() {
                match (projection.project(points[i]), projection.project(points[j])) {
                    (Some(p), Some(q)) => lines.insert(Line2D::new(p, q, color)),
                    _ => stats.skipped += 1,
                }
            }
        }
    }
    lines
}

/// Draws triangulated figures; without `lighting` every triangle is filled
/// with its material's ambient colour.
fn draw_solids(
    figures: &Figures,
    projection: &Projection,
    buffer: &mut FrameBuffer,
    lighting: Option<&Lighting>,
    stats: &mut RenderStats,
) {
    let rasterizer = ScanlineRasterizer::new();
    for figure in figures {
        let points = figure.points();
        for face in figure.faces() {
            match *face.indices() {
                [a, b] => {
                    match (projection.project(points[a]), projection.project(points[b])) {
                        (Some(p), Some(q)) => {
                            let line = Line2D::new(p, q, figure.material.ambient);
                            draw_line(buffer, projection, &line, true);
                            stats.drawn += 1;
                        }
                        _ => stats.skipped += 1,
                    }
                }
                [a, b, c] => {
                    let triangle =
                        match Triangle::project([points[a], points[b], points[c]], projection) {
                            Some(triangle) => triangle,
                            None => {
                                stats.skipped += 1;
                                continue;
                            }
                        };
                    if draw_triangle(&rasterizer, figure, &triangle, projection, buffer, lighting)
                    {
                        stats.drawn += 1;
                    } else {
                        stats.culled += 1;
                    }
                }
                _ => debug!("skipping untriangulated face of {} points", face.len()),
            }
        }
    }
}

/// Fills one triangle with the shader its figure asks for. Returns false if it
/// was culled.
fn draw_triangle(
    rasterizer: &ScanlineRasterizer,
    figure: &Figure,
    triangle: &Triangle,
    projection: &Projection,
    buffer: &mut FrameBuffer,
    lighting: Option<&Lighting>,
) -> bool {
    let material = &figure.material;
    let lighting = match lighting {
        Some(lighting) => lighting,
        None => {
            let shader = FlatShader::new(material.ambient);
            return rasterizer.fill_triangle(triangle, projection, buffer, &shader);
        }
    };
    // Degenerate triangles have no normal and would be culled anyway.
    let normal = match triangle.normal() {
        Some(normal) => normal,
        None => return false,
    };

    let shader: Box<dyn PixelShader + '_> = match &figure.texture {
        Some(binding) => Box::new(TextureShader::new(
            lighting,
            binding,
            material.reflection_coefficient,
            normal,
        )),
        None => Box::new(PhongShader::new(lighting, material, normal)),
    };
    rasterizer.fill_triangle(triangle, projection, buffer, shader.as_ref())
}
