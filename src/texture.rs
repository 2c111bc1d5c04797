use std::path::Path;

use crate::colors::Color;
use crate::render::Image;

/// Represents a 2D texture for texture mapping.
///
/// Rows are stored bottom row first, matching [`Image`]'s origin.
#[derive(Debug, Clone)]
pub struct Texture {
    data: Vec<Color>,
    width: u32,
    height: u32,
}

impl Texture {
    /// # Panics
    /// Panics if `data` does not hold `width * height` colors or either
    /// dimension is zero.
    pub fn new(width: u32, height: u32, data: Vec<Color>) -> Self {
        assert!(width > 0 && height > 0, "texture must not be empty");
        assert_eq!(
            data.len(),
            (width * height) as usize,
            "texture data doesn't match dimensions"
        );
        Self {
            data,
            width,
            height,
        }
    }

    /// Load a texture from an image file (PNG, BMP, JPG, ...).
    pub fn from_file<P: AsRef<Path>>(path: P) -> Result<Self, image::ImageError> {
        let img = image::open(path)?.to_rgb8();
        let (width, height) = img.dimensions();

        // Image files store the top row first.
        let mut data = Vec::with_capacity((width * height) as usize);
        for y in (0..height).rev() {
            for x in 0..width {
                let [r, g, b] = img.get_pixel(x, y).0;
                data.push(Color::new(
                    r as f64 / 255.0,
                    g as f64 / 255.0,
                    b as f64 / 255.0,
                ));
            }
        }

        Ok(Self::new(width, height, data))
    }

    /// Use a rendered image as a texture.
    pub fn from_image(image: &Image) -> Self {
        let mut data = Vec::with_capacity((image.width() * image.height()) as usize);
        for y in 0..image.height() {
            for x in 0..image.width() {
                data.push(image.get(x, y).to_color());
            }
        }
        Self::new(image.width(), image.height(), data)
    }

    /// Texel at integer coordinates, wrapping modulo width and height.
    #[inline]
    pub fn texel(&self, x: i64, y: i64) -> Color {
        let x = x.rem_euclid(self.width as i64) as u32;
        let y = y.rem_euclid(self.height as i64) as u32;
        self.data[(y * self.width + x) as usize]
    }

    /// Bilinear sample at pixel coordinates.
    ///
    /// Coordinates wrap, so `x == width` samples the same texel as `x == 0`.
    pub fn sample(&self, x: f64, y: f64) -> Color {
        let x0 = x.floor();
        let y0 = y.floor();
        let tx = x - x0;
        let ty = y - y0;
        let (x0, y0) = (x0 as i64, y0 as i64);

        let bottom = self.texel(x0, y0).lerp(self.texel(x0 + 1, y0), tx);
        let top = self.texel(x0, y0 + 1).lerp(self.texel(x0 + 1, y0 + 1), tx);
        bottom.lerp(top, ty)
    }

    pub fn width(&self) -> u32 {
        self.width
    }

    pub fn height(&self) -> u32 {
        self.height
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;

    fn checker() -> Texture {
        Texture::new(
            2,
            2,
            vec![Color::BLACK, Color::WHITE, Color::WHITE, Color::BLACK],
        )
    }

    #[test]
    fn sampling_at_width_wraps_to_zero() {
        let t = checker();
        assert_eq!(t.sample(2.0, 0.0), t.sample(0.0, 0.0));
        assert_eq!(t.sample(0.0, 2.0), t.sample(0.0, 0.0));
        assert_eq!(t.sample(2.0, 2.0), Color::BLACK);
    }

    #[test]
    fn negative_coordinates_wrap() {
        let t = checker();
        assert_eq!(t.sample(-1.0, 0.0), Color::WHITE);
    }

    #[test]
    fn bilinear_midpoint_blends() {
        let t = checker();
        let c = t.sample(0.5, 0.0);
        assert_relative_eq!(c.r, 0.5);
        assert_relative_eq!(c.g, 0.5);
    }
}
