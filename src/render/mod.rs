//! Rendering pipeline: buffers, projection, rasterization and shadow maps.

pub mod framebuffer;
pub mod image;
pub mod lines;
pub mod projection;
pub mod rasterizer;
pub mod shadow;
pub mod zbuffer;

pub use framebuffer::FrameBuffer;
pub use image::Image;
pub use lines::{Line2D, Lines2D};
pub use projection::{Point2D, Projection, NEAR_EPSILON};
pub use rasterizer::{draw_line, ScanlineRasterizer, Triangle};
pub use shadow::ShadowMap;
pub use zbuffer::DepthBuffer;
