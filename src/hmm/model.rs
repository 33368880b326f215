//!
//! Definition of `HiddenMarkovModel`
//!
use crate::distribution::{verify_matrix, verify_substochastic_matrix, verify_vector};
use crate::error::{LpdbError, Result};
use log::debug;
use ndarray::prelude::*;

///
/// Discrete HMM with `N` states and `M` observation symbols.
///
/// * `transition[[i, j]]`: probability of moving from state `i` to state `j` (N x N)
/// * `observation[[i, k]]`: probability of emitting symbol `k` in state `i` (N x M)
/// * `initial[i]`: probability of starting in state `i` (N)
///
/// The model is validated once in `new` and never modified afterwards.
/// Transition rows may sum to 0 instead of 1 when the state is never left.
///
#[derive(Debug, Clone, PartialEq)]
pub struct HiddenMarkovModel {
    transition: Array2<f64>,
    observation: Array2<f64>,
    initial: Array1<f64>,
}

impl HiddenMarkovModel {
    pub fn new(
        transition: Array2<f64>,
        observation: Array2<f64>,
        initial: Array1<f64>,
    ) -> Result<HiddenMarkovModel> {
        let (n_rows, n_cols) = transition.dim();
        if n_rows != n_cols {
            return Err(LpdbError::ShapeMismatch(format!(
                "transition has to be a square matrix (is ({}, {}) instead)",
                n_rows, n_cols
            )));
        }
        if observation.nrows() != n_rows {
            return Err(LpdbError::ShapeMismatch(format!(
                "transition and observation have to have the same number of rows ({} != {})",
                n_rows,
                observation.nrows()
            )));
        }
        if initial.len() != n_rows {
            return Err(LpdbError::ShapeMismatch(format!(
                "initial has to have the length of the number of states ({} != {})",
                initial.len(),
                n_rows
            )));
        }

        verify_substochastic_matrix(transition.view())?;
        verify_matrix(observation.view())?;
        verify_vector(initial.view())?;

        debug!(
            "hmm created n_states={} n_observations={}",
            n_rows,
            observation.ncols()
        );
        Ok(HiddenMarkovModel {
            transition,
            observation,
            initial,
        })
    }
    ///
    /// The number of hidden states `N`
    ///
    pub fn n_states(&self) -> usize {
        self.transition.nrows()
    }
    ///
    /// The number of observation symbols `M`
    ///
    pub fn n_observations(&self) -> usize {
        self.observation.ncols()
    }
    pub fn transition(&self) -> ArrayView2<'_, f64> {
        self.transition.view()
    }
    pub fn observation(&self) -> ArrayView2<'_, f64> {
        self.observation.view()
    }
    pub fn initial(&self) -> ArrayView1<'_, f64> {
        self.initial.view()
    }
}

impl std::fmt::Display for HiddenMarkovModel {
    fn fmt(&self, f: &mut std::fmt::Formatter) -> std::fmt::Result {
        writeln!(f, "Transition Probability Distribution:")?;
        writeln!(f, "{}", self.transition)?;
        writeln!(f, "Observation Probability Distribution:")?;
        writeln!(f, "{}", self.observation)?;
        writeln!(f, "Initial State Probability Distribution:")?;
        write!(f, "{}", self.initial)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use ndarray::array;

    fn mock_params() -> (Array2<f64>, Array2<f64>, Array1<f64>) {
        (
            array![[0.7, 0.3], [0.6, 0.4]],
            array![[0.1, 0.2, 0.7], [0.5, 0.3, 0.2]],
            array![0.6, 0.4],
        )
    }

    #[test]
    fn hmm_new() {
        let (a, b, pi) = mock_params();
        let hmm = HiddenMarkovModel::new(a.clone(), b.clone(), pi.clone()).unwrap();
        assert_eq!(hmm.n_states(), 2);
        assert_eq!(hmm.n_observations(), 3);
        assert_eq!(hmm.transition(), a.view());
        assert_eq!(hmm.observation(), b.view());
        assert_eq!(hmm.initial(), pi.view());
        println!("{}", hmm);
    }

    #[test]
    fn hmm_shape_mismatch() {
        let (_, b, pi) = mock_params();
        // non-square transition
        let a = array![[0.7, 0.3, 0.0], [0.6, 0.4, 0.0]];
        let r = HiddenMarkovModel::new(a, b.clone(), pi.clone());
        assert!(matches!(r, Err(LpdbError::ShapeMismatch(_))));

        // observation rows != n_states
        let (a, _, _) = mock_params();
        let b3 = array![[0.1, 0.9], [0.5, 0.5], [1.0, 0.0]];
        let r = HiddenMarkovModel::new(a.clone(), b3, pi.clone());
        assert!(matches!(r, Err(LpdbError::ShapeMismatch(_))));

        // initial length != n_states
        let r = HiddenMarkovModel::new(a, b, array![0.2, 0.3, 0.5]);
        assert!(matches!(r, Err(LpdbError::ShapeMismatch(_))));
    }

    #[test]
    fn hmm_invalid_distribution() {
        let (a, _, pi) = mock_params();
        let b = array![[0.1, 0.2, 0.7], [0.5, 0.3, 0.3]];
        let r = HiddenMarkovModel::new(a.clone(), b, pi);
        assert!(matches!(
            r,
            Err(LpdbError::InvalidDistribution { row: Some(1), .. })
        ));

        let (_, b, _) = mock_params();
        let r = HiddenMarkovModel::new(a, b, array![0.6, 0.6]);
        assert!(matches!(
            r,
            Err(LpdbError::InvalidDistribution { row: None, .. })
        ));
    }

    #[test]
    fn hmm_zero_transition_row_is_allowed() {
        let a = array![[0.0, 1.0], [0.0, 0.0]];
        let b = array![[1.0, 0.0], [0.0, 1.0]];
        let hmm = HiddenMarkovModel::new(a, b, array![1.0, 0.0]).unwrap();
        assert_eq!(hmm.n_states(), 2);

        let a = array![[0.0, 0.5], [0.0, 0.0]];
        let b = array![[1.0, 0.0], [0.0, 1.0]];
        let r = HiddenMarkovModel::new(a, b, array![1.0, 0.0]);
        assert!(r.is_err());
    }
}
