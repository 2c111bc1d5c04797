//! A CPU-based software rasterizer for 3D polygon scenes.
//!
//! Figures are moved into the frame of a camera looking at the origin,
//! projected with a plain perspective divide, and scan-converted into an
//! [`Image`] through a depth buffer of `1/z` values. Four render modes cover
//! wireframe, depth-tested wireframe, unlit solids and Phong-lit solids with
//! textures and point-light shadow maps.
//!
//! # Quick Start
//!
//! ```ignore
//! use zbuf::prelude::*;
//!
//! let (settings, scene) = SceneFile::load("scene.ron")?;
//! let image = Engine::new(settings).render(&scene);
//! zbuf::bmp::save_bmp(&image, "out.bmp")?;
//! ```

// Public API - exposed to library consumers
pub mod bmp;
pub mod colors;
pub mod config;
pub mod engine;
pub mod error;
pub mod figure;
pub mod light;
pub mod math;
pub mod render;
pub mod texture;
pub mod transform;

// Re-export commonly needed types at crate root for convenience
pub use engine::{Engine, RenderMode, RenderSettings, Scene};
pub use error::EngineError;
pub use render::Image;

/// Prelude module for convenient imports.
///
/// # Example
/// ```ignore
/// use zbuf::prelude::*;
/// ```
pub mod prelude {
    // Engine
    pub use crate::engine::{Engine, RenderMode, RenderSettings, Scene};

    // Scene content
    pub use crate::colors::{Color, Rgb8};
    pub use crate::config::SceneFile;
    pub use crate::figure::{Face, Figure, Figures, Material, TextureBinding};
    pub use crate::light::{Light, LightKind};
    pub use crate::texture::Texture;

    // Transform
    pub use crate::transform::{eye_point, Transform};

    // Math
    pub use crate::math::{Mat4, Vector};

    // Rendering
    pub use crate::render::Image;

    pub use crate::error::EngineError;
}

/// Module exposing internals for benchmarking. Not part of the stable API.
pub mod bench {
    pub use crate::render::rasterizer::shader::{FlatShader, PixelShader};
    pub use crate::render::{DepthBuffer, FrameBuffer, Projection, ScanlineRasterizer, Triangle};
}
