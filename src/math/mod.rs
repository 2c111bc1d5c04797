//! Linear algebra: tagged vectors and homogeneous matrices.

pub mod mat4;
pub mod vector;

pub use mat4::Mat4;
pub use vector::{Kind, Vector};
