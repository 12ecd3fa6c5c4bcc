//! Thin 3×3 wrappers over `nalgebra`.
//!
//! The engine's matrices are all small and dense, so this module keeps the
//! linear algebra behind a handful of named operations and the bridges
//! between [`skyalign_core::Vector3`] and `nalgebra`'s column vector.
//! Singularity is detected by an exactly-zero determinant: the bases handed
//! in are either linearly independent or degenerate outright, never merely
//! ill-conditioned by an epsilon.

use crate::error::{Error, Result};
use nalgebra::Matrix3;
use skyalign_core::Vector3;

pub type Col3 = nalgebra::Vector3<f64>;

#[inline]
pub fn to_na(v: &Vector3) -> Col3 {
    Col3::new(v.x, v.y, v.z)
}

#[inline]
pub fn from_na(v: &Col3) -> Vector3 {
    Vector3::new(v.x, v.y, v.z)
}

/// Builds the matrix whose columns are the three given vectors.
pub fn column_matrix(c1: &Vector3, c2: &Vector3, c3: &Vector3) -> Matrix3<f64> {
    Matrix3::from_columns(&[to_na(c1), to_na(c2), to_na(c3)])
}

pub fn determinant3(m: &Matrix3<f64>) -> f64 {
    m.determinant()
}

/// Inverts a 3×3 matrix, failing on singular input.
pub fn invert3(m: &Matrix3<f64>) -> Result<Matrix3<f64>> {
    if determinant3(m) == 0.0 {
        return Err(Error::SingularBasis);
    }
    m.try_inverse().ok_or(Error::SingularBasis)
}

pub fn matmul3(a: &Matrix3<f64>, b: &Matrix3<f64>) -> Matrix3<f64> {
    a * b
}

/// Applies a 3×3 matrix to a direction vector.
pub fn matvec3(m: &Matrix3<f64>, v: &Vector3) -> Vector3 {
    from_na(&(m * to_na(v)))
}
