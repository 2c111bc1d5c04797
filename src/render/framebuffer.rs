//! Frame buffer abstraction pairing an image with its depth buffer.
//!
//! The depth buffer enables hidden surface removal via the z-buffer algorithm.

use super::image::Image;
use super::zbuffer::DepthBuffer;
use crate::colors::Color;

/// A mutable view over an image and the depth buffer of the same size.
///
/// This is a borrowed view, not an owning type: it is created for the duration
/// of one render to pass both buffers around together.
pub struct FrameBuffer<'a> {
    image: &'a mut Image,
    depth: &'a mut DepthBuffer,
}

impl<'a> FrameBuffer<'a> {
    /// # Panics
    /// Panics if the buffers' dimensions differ.
    pub fn new(image: &'a mut Image, depth: &'a mut DepthBuffer) -> Self {
        assert_eq!(
            (image.width(), image.height()),
            (depth.width(), depth.height()),
            "depth buffer size doesn't match image"
        );
        Self { image, depth }
    }

    pub fn width(&self) -> u32 {
        self.image.width()
    }

    pub fn height(&self) -> u32 {
        self.image.height()
    }

    /// Depth test at `(x, y)`; on success the depth is already stored and the
    /// caller is expected to write the pixel.
    #[inline]
    pub fn depth_test(&mut self, x: u32, y: u32, inv_z: f64) -> bool {
        self.depth.test_and_set(x, y, inv_z)
    }

    /// Set a pixel with depth testing.
    #[inline]
    pub fn set_pixel_with_depth(&mut self, x: u32, y: u32, inv_z: f64, color: Color) {
        if self.depth.test_and_set(x, y, inv_z) {
            self.image.set(x, y, color);
        }
    }

    /// Set a pixel without depth testing.
    #[inline]
    pub fn set_pixel(&mut self, x: u32, y: u32, color: Color) {
        self.image.set(x, y, color);
    }
}
