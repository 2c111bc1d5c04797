//! Depth buffer storing reciprocal camera-space depth.
//!
//! The camera looks down -Z, so every visible surface has a negative `1/z` and
//! a *smaller* value is *nearer*. Cells start at `+inf`, which loses against
//! any real surface.

#[derive(Debug, Clone, PartialEq)]
pub struct DepthBuffer {
    depths: Vec<f64>,
    width: u32,
    height: u32,
}

impl DepthBuffer {
    pub fn new(width: u32, height: u32) -> Self {
        Self {
            depths: vec![f64::INFINITY; (width * height) as usize],
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
            "depth sample ({}, {}) outside {}x{} buffer",
            x,
            y,
            self.width,
            self.height
        );
        (y * self.width + x) as usize
    }

    /// Stored `1/z` at `(x, y)`; `+inf` if nothing was drawn there.
    #[inline]
    pub fn get(&self, x: u32, y: u32) -> f64 {
        self.depths[self.index(x, y)]
    }

    /// Depth test and write.
    ///
    /// Stores `inv_z` and returns true when it is at least as near as the
    /// current value (ties favour the new fragment).
    #[inline]
    pub fn test_and_set(&mut self, x: u32, y: u32, inv_z: f64) -> bool {
        let index = self.index(x, y);
        if inv_z <= self.depths[index] {
            self.depths[index] = inv_z;
            true
        } else {
            false
        }
    }

    /// Samples at real coordinates from the four surrounding cells.
    ///
    /// Neighbours are clamped to the buffer edge. If any neighbour is still
    /// empty the nearest cell is returned instead, so `+inf` never enters the
    /// interpolation.
    pub fn sample(&self, x: f64, y: f64) -> f64 {
        let max_x = (self.width - 1) as f64;
        let max_y = (self.height - 1) as f64;
        let x = x.clamp(0.0, max_x);
        let y = y.clamp(0.0, max_y);

        let x0 = x.floor();
        let y0 = y.floor();
        let x1 = (x0 + 1.0).min(max_x);
        let y1 = (y0 + 1.0).min(max_y);
        let tx = x - x0;
        let ty = y - y0;

        let corners = [
            self.get(x0 as u32, y0 as u32),
            self.get(x1 as u32, y0 as u32),
            self.get(x0 as u32, y1 as u32),
            self.get(x1 as u32, y1 as u32),
        ];

        if corners.iter().any(|d| !d.is_finite()) {
            return self.get(x.round() as u32, y.round() as u32);
        }

        let bottom = corners[0] + (corners[1] - corners[0]) * tx;
        let top = corners[2] + (corners[3] - corners[2]) * tx;
        bottom + (top - bottom) * ty
    }
}
