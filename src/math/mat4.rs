//! 4x4 homogeneous transformation matrix using the row-vector convention.
//!
//! # Convention
//! - Vectors are **row vectors** on the left: `vector * Mat4`
//! - Translation is stored in the **last row**
//! - The last column must stay `(0, 0, 0, 1)`: only affine transforms are applied
//! - Transforms chain **left-to-right**: `v * (A * B)` applies A first, then B
//!
//! # Example
//! ```ignore
//! let transform = scale * rotation * translation; // scale applied first
//! let result = vertex * transform;
//! ```

use std::ops::Mul;

use super::vector::Vector;

/// Pivots smaller than this are treated as zero during inversion.
const SINGULAR_EPSILON: f64 = 1e-12;

/// 4x4 matrix stored as `data[row][col]` with row-vector convention.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Mat4 {
    data: [[f64; 4]; 4],
}

impl Mat4 {
    pub fn new(data: [[f64; 4]; 4]) -> Self {
        Mat4 { data }
    }

    pub fn identity() -> Self {
        Mat4::new([
            [1.0, 0.0, 0.0, 0.0],
            [0.0, 1.0, 0.0, 0.0],
            [0.0, 0.0, 1.0, 0.0],
            [0.0, 0.0, 0.0, 1.0],
        ])
    }

    /// Creates a translation matrix.
    ///
    /// Translation is stored in the last row (row-vector convention).
    pub fn translation(x: f64, y: f64, z: f64) -> Self {
        Mat4::new([
            [1.0, 0.0, 0.0, 0.0],
            [0.0, 1.0, 0.0, 0.0],
            [0.0, 0.0, 1.0, 0.0],
            [x, y, z, 1.0],
        ])
    }

    /// Creates a scale matrix.
    pub fn scaling(x: f64, y: f64, z: f64) -> Self {
        Mat4::new([
            [x, 0.0, 0.0, 0.0],
            [0.0, y, 0.0, 0.0],
            [0.0, 0.0, z, 0.0],
            [0.0, 0.0, 0.0, 1.0],
        ])
    }

    /// Creates a rotation matrix around the X axis (radians).
    pub fn rotation_x(angle: f64) -> Self {
        let c = angle.cos();
        let s = angle.sin();
        Mat4::new([
            [1.0, 0.0, 0.0, 0.0],
            [0.0, c, s, 0.0],
            [0.0, -s, c, 0.0],
            [0.0, 0.0, 0.0, 1.0],
        ])
    }

    /// Creates a rotation matrix around the Y axis (radians).
    pub fn rotation_y(angle: f64) -> Self {
        let c = angle.cos();
        let s = angle.sin();
        Mat4::new([
            [c, 0.0, -s, 0.0],
            [0.0, 1.0, 0.0, 0.0],
            [s, 0.0, c, 0.0],
            [0.0, 0.0, 0.0, 1.0],
        ])
    }

    /// Creates a rotation matrix around the Z axis (radians).
    pub fn rotation_z(angle: f64) -> Self {
        let c = angle.cos();
        let s = angle.sin();
        Mat4::new([
            [c, s, 0.0, 0.0],
            [-s, c, 0.0, 0.0],
            [0.0, 0.0, 1.0, 0.0],
            [0.0, 0.0, 0.0, 1.0],
        ])
    }

    /// Builds the matrix whose rows are the three given basis vectors.
    ///
    /// A coefficient row `(u, v, w)` multiplied by this matrix yields
    /// `u * a + v * b + w * c`.
    pub fn from_basis(a: Vector, b: Vector, c: Vector) -> Self {
        Mat4::new([
            [a.x, a.y, a.z, 0.0],
            [b.x, b.y, b.z, 0.0],
            [c.x, c.y, c.z, 0.0],
            [0.0, 0.0, 0.0, 1.0],
        ])
    }

    pub fn transpose(&self) -> Self {
        let mut data = [[0.0; 4]; 4];
        for (row, values) in data.iter_mut().enumerate() {
            for (col, value) in values.iter_mut().enumerate() {
                *value = self.data[col][row];
            }
        }
        Mat4::new(data)
    }

    /// Returns true when the last column equals `(0, 0, 0, 1)`.
    pub fn is_affine(&self) -> bool {
        self.data[0][3] == 0.0
            && self.data[1][3] == 0.0
            && self.data[2][3] == 0.0
            && self.data[3][3] == 1.0
    }

    /// Computes the inverse with Gauss-Jordan elimination and partial pivoting.
    ///
    /// Returns `None` if the matrix is singular.
    pub fn try_inverse(&self) -> Option<Mat4> {
        let mut m = self.data;
        let mut inv = Mat4::identity().data;

        for col in 0..4 {
            // Largest-magnitude pivot keeps the elimination stable.
            let pivot_row = (col..4)
                .max_by(|&a, &b| m[a][col].abs().total_cmp(&m[b][col].abs()))
                .unwrap_or(col);
            if m[pivot_row][col].abs() < SINGULAR_EPSILON {
                return None;
            }
            m.swap(col, pivot_row);
            inv.swap(col, pivot_row);

            let pivot = m[col][col];
            for k in 0..4 {
                m[col][k] /= pivot;
                inv[col][k] /= pivot;
            }

            for row in 0..4 {
                if row == col {
                    continue;
                }
                let factor = m[row][col];
                if factor == 0.0 {
                    continue;
                }
                for k in 0..4 {
                    m[row][k] -= factor * m[col][k];
                    inv[row][k] -= factor * inv[col][k];
                }
            }
        }

        Some(Mat4::new(inv))
    }

    /// Computes the inverse of the matrix.
    ///
    /// # Panics
    /// Panics if the matrix is singular.
    pub fn inverse(&self) -> Mat4 {
        match self.try_inverse() {
            Some(inverse) => inverse,
            None => panic!("cannot invert singular matrix {:?}", self.data),
        }
    }

    /// Access element at [row][col].
    #[inline]
    pub fn get(&self, row: usize, col: usize) -> f64 {
        self.data[row][col]
    }

    /// Set element at [row][col].
    #[inline]
    pub fn set(&mut self, row: usize, col: usize, value: f64) {
        self.data[row][col] = value;
    }
}

impl Default for Mat4 {
    fn default() -> Self {
        Mat4::identity()
    }
}

/// Matrix multiplication: Mat4 * Mat4.
///
/// With row vectors, `v * (A * B)` applies A first, then B.
impl Mul<Mat4> for Mat4 {
    type Output = Mat4;

    fn mul(self, rhs: Mat4) -> Self::Output {
        let mut result = [[0.0f64; 4]; 4];

        for (row, values) in result.iter_mut().enumerate() {
            for (col, value) in values.iter_mut().enumerate() {
                *value = self.data[row][0] * rhs.data[0][col]
                    + self.data[row][1] * rhs.data[1][col]
                    + self.data[row][2] * rhs.data[2][col]
                    + self.data[row][3] * rhs.data[3][col];
            }
        }

        Mat4::new(result)
    }
}

/// Transform a vector: Vector * Mat4 (row vector).
///
/// Points pick up the translation row, directions do not.
///
/// # Panics
/// Panics if the matrix is not affine.
impl Mul<Mat4> for Vector {
    type Output = Vector;

    fn mul(self, m: Mat4) -> Self::Output {
        assert!(
            m.is_affine(),
            "last column of transform must be (0, 0, 0, 1), got {:?}",
            m
        );
        let d = &m.data;
        let x = self.x * d[0][0] + self.y * d[1][0] + self.z * d[2][0];
        let y = self.x * d[0][1] + self.y * d[1][1] + self.z * d[2][1];
        let z = self.x * d[0][2] + self.y * d[1][2] + self.z * d[2][2];

        if self.is_point() {
            Vector::point(x + d[3][0], y + d[3][1], z + d[3][2])
        } else {
            Vector::direction(x, y, z)
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;
    use std::f64::consts::FRAC_PI_2;

    fn assert_mat_eq(a: &Mat4, b: &Mat4) {
        for row in 0..4 {
            for col in 0..4 {
                assert_relative_eq!(a.get(row, col), b.get(row, col), epsilon = 1e-9);
            }
        }
    }

    #[test]
    fn translation_moves_points_not_directions() {
        let m = Mat4::translation(1.0, 2.0, 3.0);
        assert_eq!(Vector::ORIGIN * m, Vector::point(1.0, 2.0, 3.0));
        assert_eq!(
            Vector::direction(1.0, 0.0, 0.0) * m,
            Vector::direction(1.0, 0.0, 0.0)
        );
    }

    #[test]
    fn composition_applies_left_first() {
        let m = Mat4::scaling(2.0, 2.0, 2.0) * Mat4::translation(1.0, 0.0, 0.0);
        let p = Vector::point(1.0, 0.0, 0.0) * m;
        assert_relative_eq!(p.x, 3.0);
    }

    #[test]
    fn rotation_z_quarter_turn() {
        let p = Vector::point(1.0, 0.0, 0.0) * Mat4::rotation_z(FRAC_PI_2);
        assert_relative_eq!(p.x, 0.0, epsilon = 1e-12);
        assert_relative_eq!(p.y, 1.0, epsilon = 1e-12);
    }

    #[test]
    fn inverse_round_trips() {
        let m = Mat4::rotation_x(0.3)
            * Mat4::rotation_y(-1.1)
            * Mat4::scaling(2.0, 3.0, 0.5)
            * Mat4::translation(4.0, -2.0, 7.0);
        assert_mat_eq(&(m * m.inverse()), &Mat4::identity());
        assert_mat_eq(&(m.inverse() * m), &Mat4::identity());
    }

    #[test]
    fn inverse_needs_pivoting() {
        // Zero on the leading diagonal entry forces a row swap.
        let m = Mat4::new([
            [0.0, 1.0, 0.0, 0.0],
            [1.0, 0.0, 0.0, 0.0],
            [0.0, 0.0, 2.0, 0.0],
            [5.0, 6.0, 7.0, 1.0],
        ]);
        assert_mat_eq(&(m * m.inverse()), &Mat4::identity());
    }

    #[test]
    fn singular_matrix_has_no_inverse() {
        let m = Mat4::scaling(1.0, 0.0, 1.0);
        assert!(m.try_inverse().is_none());
    }

    #[test]
    #[should_panic(expected = "singular")]
    fn inverse_of_singular_panics() {
        Mat4::scaling(0.0, 1.0, 1.0).inverse();
    }

    #[test]
    #[should_panic(expected = "last column")]
    fn non_affine_transform_panics() {
        let mut m = Mat4::identity();
        m.set(2, 3, 1.0);
        let _ = Vector::ORIGIN * m;
    }
}
