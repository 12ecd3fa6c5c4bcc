//! Triple-basis transform solver.
//!
//! Given three actual direction vectors and their three apparent
//! counterparts, the matrix `M = P·A⁻¹` (with `A` and `P` the column-wise
//! basis matrices) maps each actual vector onto its apparent partner
//! exactly. The engine uses the forward matrix alone for hull facets and the
//! fallback path, and the full pair for the small-N global model.

use crate::error::Result;
use crate::matrix::{column_matrix, invert3, matmul3};
use nalgebra::Matrix3;
use skyalign_core::Vector3;

/// A transform and its inverse between the actual and apparent frames.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct TransformPair {
    pub actual_to_apparent: Matrix3<f64>,
    pub apparent_to_actual: Matrix3<f64>,
}

/// Computes the matrix taking each `actual[i]` to `apparent[i]`.
///
/// Fails with a singular-basis error when the actual triple is linearly
/// dependent.
pub fn forward_transform(actual: [Vector3; 3], apparent: [Vector3; 3]) -> Result<Matrix3<f64>> {
    let a = column_matrix(&actual[0], &actual[1], &actual[2]);
    let p = column_matrix(&apparent[0], &apparent[1], &apparent[2]);
    Ok(matmul3(&p, &invert3(&a)?))
}

/// Computes the forward transform and its inverse.
///
/// Fails when either triple is linearly dependent.
pub fn calculate_transform_matrices(
    actual: [Vector3; 3],
    apparent: [Vector3; 3],
) -> Result<TransformPair> {
    let actual_to_apparent = forward_transform(actual, apparent)?;
    let apparent_to_actual = invert3(&actual_to_apparent)?;
    Ok(TransformPair {
        actual_to_apparent,
        apparent_to_actual,
    })
}
