//!
//! Confusion (interference) models
//!
//! `m x m` row-stochastic matrix whose `[[c, k]]` element is the probability
//! that the true symbol `c` is observed as `k`.
//!
use crate::distribution::verify_matrix;
use crate::error::{LpdbError, Result};
use ndarray::prelude::*;

///
/// Zero-noise model (every symbol is observed as itself)
///
pub fn identity(m: usize) -> Array2<f64> {
    Array2::eye(m)
}

///
/// Every symbol is observed as each symbol with probability `p`, and the
/// remaining mass is on the diagonal.
///
/// ```text
/// eye(m) * (1 - m * p) + ones(m, m) * p
/// ```
///
pub fn uniform(m: usize, p: f64) -> Result<Array2<f64>> {
    if p < 0.0 || m as f64 * p > 1.0 {
        return Err(LpdbError::InvalidDistribution {
            row: None,
            sum: m as f64 * p,
        });
    }
    Ok(Array2::eye(m) * (1.0 - m as f64 * p) + Array2::from_elem((m, m), p))
}

///
/// Check the model is square, of dimension `m` and row-stochastic.
///
pub fn verify_confusion(confusion: ArrayView2<'_, f64>, m: usize) -> Result<()> {
    let (n_rows, n_cols) = confusion.dim();
    if n_rows != n_cols {
        return Err(LpdbError::ShapeMismatch(format!(
            "confusion model has to be a square matrix (is ({}, {}) instead)",
            n_rows, n_cols
        )));
    }
    if n_rows != m {
        return Err(LpdbError::ShapeMismatch(format!(
            "alphabet has to have the same length as the confusion model ({} != {})",
            m, n_rows
        )));
    }
    verify_matrix(confusion)
}

#[cfg(test)]
mod tests {
    use super::*;
    use ndarray::array;

    #[test]
    fn confusion_uniform() {
        let c = uniform(4, 0.02).unwrap();
        assert_abs_diff_eq!(c[[0, 0]], 0.94, epsilon = 1e-12);
        assert_abs_diff_eq!(c[[0, 1]], 0.02, epsilon = 1e-12);
        assert!(verify_confusion(c.view(), 4).is_ok());
        assert_eq!(uniform(3, 0.0).unwrap(), identity(3));
        assert!(uniform(4, 0.3).is_err());
        assert!(uniform(4, -0.1).is_err());
    }

    #[test]
    fn confusion_verify() {
        let c = array![[0.9, 0.1, 0.0], [0.1, 0.9, 0.0]];
        assert!(matches!(
            verify_confusion(c.view(), 2),
            Err(LpdbError::ShapeMismatch(_))
        ));
        assert!(matches!(
            verify_confusion(identity(3).view(), 4),
            Err(LpdbError::ShapeMismatch(_))
        ));
        let c = array![[0.9, 0.2], [0.1, 0.9]];
        assert!(matches!(
            verify_confusion(c.view(), 2),
            Err(LpdbError::InvalidDistribution { row: Some(0), .. })
        ));
    }
}
