//! Loss helpers for training drivers.
//!
//! The training step itself seeds backpropagation with the raw
//! `prediction - target` gradient; these helpers exist for drivers that
//! want to monitor progress.

use crate::error::{Error, Result};
use crate::matrix::Matrix;

/// Mean squared error between `prediction` and `target`.
///
/// # Errors
/// Returns [`Error::DimensionMismatch`] if the shapes differ.
pub fn mean_squared_error(prediction: &Matrix, target: &Matrix) -> Result<f32> {
    if prediction.shape() != target.shape() {
        return Err(Error::dimension_mismatch(
            "mean_squared_error",
            prediction.shape(),
            target.shape(),
        ));
    }
    let sum: f32 = prediction
        .data()
        .iter()
        .zip(target.data())
        .map(|(&p, &t)| (p - t) * (p - t))
        .sum();
    Ok(sum / prediction.len() as f32)
}
