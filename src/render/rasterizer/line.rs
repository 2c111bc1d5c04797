//! Integer-stepped line drawing.
//!
//! Endpoints are rounded to pixels first. Vertical and horizontal lines step
//! along their only axis; any other line steps along x when `|slope| <= 1`
//! and along y otherwise, so consecutive pixels are always 8-connected.
//! `1/z` is interpolated linearly over the steps.

use crate::render::framebuffer::FrameBuffer;
use crate::render::lines::Line2D;
use crate::render::projection::Projection;

/// Draws `line` in its own colour.
///
/// With `depth_tested` every pixel goes through the same depth rule as
/// triangle fragments; without it pixels are written unconditionally.
pub fn draw_line(
    buffer: &mut FrameBuffer,
    projection: &Projection,
    line: &Line2D,
    depth_tested: bool,
) {
    let (x0, y0) = projection.to_pixel(line.p1);
    let (x1, y1) = projection.to_pixel(line.p2);
    let (mut x0, mut y0, mut x1, mut y1) = (x0 as i64, y0 as i64, x1 as i64, y1 as i64);
    let (mut z0, mut z1) = (line.p1.inv_z, line.p2.inv_z);

    let mut plot = |x: i64, y: i64, i: i64, n: i64, z0: f64, z1: f64| {
        let t = if n == 0 { 0.0 } else { i as f64 / n as f64 };
        let (x, y) = (x as u32, y as u32);
        if depth_tested {
            buffer.set_pixel_with_depth(x, y, z0 + (z1 - z0) * t, line.color);
        } else {
            buffer.set_pixel(x, y, line.color);
        }
    };

    if x0 == x1 {
        if y0 > y1 {
            std::mem::swap(&mut y0, &mut y1);
            std::mem::swap(&mut z0, &mut z1);
        }
        let n = y1 - y0;
        for i in 0..=n {
            plot(x0, y0 + i, i, n, z0, z1);
        }
        return;
    }
    if y0 == y1 {
        if x0 > x1 {
            std::mem::swap(&mut x0, &mut x1);
            std::mem::swap(&mut z0, &mut z1);
        }
        let n = x1 - x0;
        for i in 0..=n {
            plot(x0 + i, y0, i, n, z0, z1);
        }
        return;
    }

    if x0 > x1 {
        std::mem::swap(&mut x0, &mut x1);
        std::mem::swap(&mut y0, &mut y1);
        std::mem::swap(&mut z0, &mut z1);
    }
    let m = (y1 - y0) as f64 / (x1 - x0) as f64;

    if m.abs() <= 1.0 {
        let n = x1 - x0;
        for i in 0..=n {
            let y = (y0 as f64 + m * i as f64).round() as i64;
            plot(x0 + i, y, i, n, z0, z1);
        }
    } else if m > 1.0 {
        let n = y1 - y0;
        for i in 0..=n {
            let x = (x0 as f64 + i as f64 / m).round() as i64;
            plot(x, y0 + i, i, n, z0, z1);
        }
    } else {
        let n = y0 - y1;
        for i in 0..=n {
            let x = (x0 as f64 - i as f64 / m).round() as i64;
            plot(x, y0 - i, i, n, z0, z1);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::colors::{Color, Rgb8};
    use crate::render::image::Image;
    use crate::render::projection::Point2D;
    use crate::render::zbuffer::DepthBuffer;
    use approx::assert_relative_eq;

    const SIZE: u32 = 16;
    const WHITE: Rgb8 = Rgb8 {
        r: 255,
        g: 255,
        b: 255,
    };

    fn projection() -> Projection {
        Projection::new(1.0, 0.0, 0.0, SIZE, SIZE)
    }

    fn line(x0: f64, y0: f64, x1: f64, y1: f64) -> Line2D {
        Line2D::new(
            Point2D::new(x0, y0, -0.5),
            Point2D::new(x1, y1, -0.25),
            Color::WHITE,
        )
    }

    fn lit(image: &Image) -> Vec<(u32, u32)> {
        let mut pixels = Vec::new();
        for y in 0..image.height() {
            for x in 0..image.width() {
                if image.get(x, y) == WHITE {
                    pixels.push((x, y));
                }
            }
        }
        pixels
    }

    fn draw(l: &Line2D, depth_tested: bool) -> (Image, DepthBuffer) {
        let mut image = Image::new(SIZE, SIZE, Color::BLACK);
        let mut depth = DepthBuffer::new(SIZE, SIZE);
        let mut fb = FrameBuffer::new(&mut image, &mut depth);
        draw_line(&mut fb, &projection(), l, depth_tested);
        (image, depth)
    }

    #[test]
    fn shallow_line_steps_along_x() {
        let (image, _) = draw(&line(1.0, 1.0, 9.0, 5.0), false);
        let pixels = lit(&image);
        assert_eq!(pixels.len(), 9);
        assert!(pixels.contains(&(1, 1)));
        assert!(pixels.contains(&(9, 5)));
    }

    #[test]
    fn steep_lines_step_along_y() {
        let (image, _) = draw(&line(2.0, 1.0, 5.0, 10.0), false);
        assert_eq!(lit(&image).len(), 10);
        let (image, _) = draw(&line(2.0, 10.0, 5.0, 1.0), false);
        let pixels = lit(&image);
        assert_eq!(pixels.len(), 10);
        assert!(pixels.contains(&(2, 10)));
        assert!(pixels.contains(&(5, 1)));
    }

    #[test]
    fn direction_does_not_matter() {
        let (a, _) = draw(&line(1.0, 2.0, 12.0, 7.0), false);
        let (b, _) = draw(&line(12.0, 7.0, 1.0, 2.0), false);
        assert_eq!(a, b);
    }

    #[test]
    fn vertical_and_single_pixel_lines() {
        let (image, _) = draw(&line(3.0, 8.0, 3.0, 2.0), false);
        assert_eq!(lit(&image).len(), 7);
        let (image, depth) = draw(&line(4.0, 4.0, 4.0, 4.0), true);
        assert_eq!(lit(&image), vec![(4, 4)]);
        assert_relative_eq!(depth.get(4, 4), -0.5);
    }

    #[test]
    fn depth_interpolates_between_endpoints() {
        let (_, depth) = draw(&line(0.0, 0.0, 4.0, 0.0), true);
        assert_relative_eq!(depth.get(0, 0), -0.5);
        assert_relative_eq!(depth.get(2, 0), -0.375);
        assert_relative_eq!(depth.get(4, 0), -0.25);
    }

    #[test]
    fn plain_lines_leave_depth_untouched() {
        let (_, depth) = draw(&line(0.0, 0.0, 4.0, 0.0), false);
        assert_eq!(depth, DepthBuffer::new(SIZE, SIZE));
    }

    #[test]
    fn hidden_line_is_not_drawn() {
        let mut image = Image::new(SIZE, SIZE, Color::BLACK);
        let mut depth = DepthBuffer::new(SIZE, SIZE);
        let mut fb = FrameBuffer::new(&mut image, &mut depth);
        for x in 0..SIZE {
            fb.set_pixel_with_depth(x, 3, -1.0, Color::BLACK);
        }
        draw_line(&mut fb, &projection(), &line(0.0, 3.0, 8.0, 3.0), true);
        assert!(lit(&image).is_empty());
    }
}
