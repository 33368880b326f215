//!
//! Validation of probability distributions
//!
//! * `verify_vector`: 1-D distribution sums to 1
//! * `verify_matrix`: every row of a 2-D distribution sums to 1
//! * `verify_substochastic_matrix`: every row sums to 1 or to 0
//!
//! Negative elements are rejected in all cases.
//!
use crate::error::{LpdbError, Result};
use approx::relative_eq;
use ndarray::prelude::*;

/// relative tolerance of a sum (same as numpy `allclose`)
pub const RTOL: f64 = 1e-5;

/// absolute tolerance of a sum (same as numpy `allclose`)
pub const ATOL: f64 = 1e-8;

///
/// `x == target` within `ATOL`/`RTOL`
///
pub fn is_close(x: f64, target: f64) -> bool {
    relative_eq!(x, target, epsilon = ATOL, max_relative = RTOL)
}

fn has_negative(pd: ArrayView1<'_, f64>) -> bool {
    pd.iter().any(|&p| p < 0.0)
}

///
/// Check that the vector is non-negative and sums to 1.
///
pub fn verify_vector(pd: ArrayView1<'_, f64>) -> Result<()> {
    let sum = pd.sum();
    if is_close(sum, 1.0) && !has_negative(pd) {
        Ok(())
    } else {
        Err(LpdbError::InvalidDistribution { row: None, sum })
    }
}

///
/// Check that every row of the matrix is non-negative and sums to 1.
/// The error reports the first offending row.
///
pub fn verify_matrix(pd: ArrayView2<'_, f64>) -> Result<()> {
    for (i, row) in pd.outer_iter().enumerate() {
        let sum = row.sum();
        if !is_close(sum, 1.0) || has_negative(row) {
            return Err(LpdbError::InvalidDistribution { row: Some(i), sum });
        }
    }
    Ok(())
}

///
/// Check that every row of the matrix sums to either 1 or 0.
///
/// An all-zero row is a state that is never left (unreachable or terminal).
///
pub fn verify_substochastic_matrix(pd: ArrayView2<'_, f64>) -> Result<()> {
    for (i, row) in pd.outer_iter().enumerate() {
        let sum = row.sum();
        if (!is_close(sum, 1.0) && !is_close(sum, 0.0)) || has_negative(row) {
            return Err(LpdbError::InvalidDistribution { row: Some(i), sum });
        }
    }
    Ok(())
}

///
/// Probability distribution of any dimensionality handled by `verify`.
///
pub trait Distribution {
    fn verify(&self) -> Result<()>;
}

impl Distribution for Array1<f64> {
    fn verify(&self) -> Result<()> {
        verify_vector(self.view())
    }
}

impl Distribution for Array2<f64> {
    fn verify(&self) -> Result<()> {
        verify_matrix(self.view())
    }
}

///
/// Check a 1-D or 2-D distribution.
///
pub fn verify<D: Distribution>(pd: &D) -> Result<()> {
    pd.verify()
}
