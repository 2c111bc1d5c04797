//! Owned pixel buffer produced by a render.
//!
//! Pixel `(0, 0)` is the bottom-left corner: screen Y grows upwards, the same
//! way camera-space Y does.

use crate::colors::{Color, Rgb8};

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Image {
    pixels: Vec<Rgb8>,
    width: u32,
    height: u32,
}

impl Image {
    pub fn new(width: u32, height: u32, background: Color) -> Self {
        Self {
            pixels: vec![background.to_rgb8(); (width * height) as usize],
            width,
            height,
        }
    }

    pub fn width(&self) -> u32 {
        self.width
    }

    pub fn height(&self) -> u32 {
        self.height
    }

    #[inline]
    fn index(&self, x: u32, y: u32) -> usize {
        assert!(
            x < self.width && y < self.height,
            "pixel ({}, {}) outside {}x{} image",
            x,
            y,
            self.width,
            self.height
        );
        (y * self.width + x) as usize
    }

    /// # Panics
    /// Panics if `(x, y)` lies outside the image.
    #[inline]
    pub fn get(&self, x: u32, y: u32) -> Rgb8 {
        self.pixels[self.index(x, y)]
    }

    /// Clamps and quantizes `color` into the pixel at `(x, y)`.
    ///
    /// # Panics
    /// Panics if `(x, y)` lies outside the image.
    #[inline]
    pub fn set(&mut self, x: u32, y: u32, color: Color) {
        let index = self.index(x, y);
        self.pixels[index] = color.to_rgb8();
    }

    /// Pixels in row order, bottom row first.
    pub fn pixels(&self) -> &[Rgb8] {
        &self.pixels
    }

    /// Converts to an `image` crate buffer (top row first) for encoding.
    pub fn to_rgb_image(&self) -> image::RgbImage {
        image::RgbImage::from_fn(self.width, self.height, |x, y| {
            let p = self.get(x, self.height - 1 - y);
            image::Rgb([p.r, p.g, p.b])
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn new_image_is_filled_with_background() {
        let image = Image::new(3, 2, Color::new(1.0, 0.0, 0.0));
        assert!(image.pixels().iter().all(|&p| p == Rgb8::new(255, 0, 0)));
    }

    #[test]
    fn rgb_image_is_flipped_vertically() {
        let mut image = Image::new(2, 2, Color::BLACK);
        image.set(0, 0, Color::WHITE);
        let rgb = image.to_rgb_image();
        assert_eq!(rgb.get_pixel(0, 1).0, [255, 255, 255]);
        assert_eq!(rgb.get_pixel(0, 0).0, [0, 0, 0]);
    }

    #[test]
    #[should_panic(expected = "outside")]
    fn out_of_range_write_panics() {
        let mut image = Image::new(2, 2, Color::BLACK);
        image.set(2, 0, Color::WHITE);
    }
}
