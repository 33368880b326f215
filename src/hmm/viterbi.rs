//!
//! Viterbi algorithm
//!
//! Computes the most likely state sequence `q` of an observation sequence `O`
//! with plain (not log-transformed) probabilities.
//!
//! ```text
//! delta[i, 0] = pi[i] * B[i, O[0]]
//! delta[j, t] = max_i (delta[i, t-1] * A[i, j]) * B[j, O[t]]
//! psi[j, t]   = argmax_i (delta[i, t-1] * A[i, j])
//! q[T-1]      = argmax_i delta[i, T-1]
//! q[t-1]      = psi[q[t], t]
//! ```
//!
//! Ties in argmax are broken by the lowest state index. The catalogue relies
//! on this: an impossible sequence (all-zero delta) decodes to state 0.
//!
use super::model::HiddenMarkovModel;
use crate::error::{LpdbError, Result};
use log::debug;
use ndarray::prelude::*;
use rayon::prelude::*;

///
/// Viterbi decoder bound to a `HiddenMarkovModel`.
///
#[derive(Debug, Clone)]
pub struct Viterbi {
    hmm: HiddenMarkovModel,
}

///
/// Output of `Viterbi::run`
///
#[derive(Debug, Clone)]
pub struct ViterbiResult {
    ///
    /// optimal state sequence (length T)
    pub states: Vec<usize>,
    ///
    /// best path probability table (N x T) indexed by `[[state, t]]`
    pub delta: Array2<f64>,
}

impl ViterbiResult {
    ///
    /// Probability of the optimal path `max_i delta[i, T-1]`
    ///
    pub fn best_path_prob(&self) -> f64 {
        let t = self.delta.ncols() - 1;
        self.delta[[self.states[t], t]]
    }
}

///
/// Index of the maximum element. The lowest index wins on ties.
///
/// Panics if `xs` is empty.
///
pub fn argmax<I: IntoIterator<Item = f64>>(xs: I) -> (usize, f64) {
    let mut iter = xs.into_iter().enumerate();
    let (mut i_max, mut x_max) = iter.next().expect("argmax of empty sequence");
    for (i, x) in iter {
        if x > x_max {
            i_max = i;
            x_max = x;
        }
    }
    (i_max, x_max)
}

impl Viterbi {
    pub fn new(hmm: HiddenMarkovModel) -> Viterbi {
        Viterbi { hmm }
    }
    ///
    /// Reference to the model this decoder was built for
    ///
    pub fn hmm(&self) -> &HiddenMarkovModel {
        &self.hmm
    }
    ///
    /// Run Viterbi algorithm to the observation sequence.
    ///
    pub fn run(&self, observations: &[usize]) -> Result<ViterbiResult> {
        self.run_with(observations, |prev, obs| {
            (0..self.hmm.n_states())
                .map(|j| self.step(prev, j, obs))
                .collect()
        })
    }
    ///
    /// Same as `run` but the destination states of each time step are
    /// computed in parallel. The output is identical to `run`.
    ///
    pub fn run_parallel(&self, observations: &[usize]) -> Result<ViterbiResult> {
        self.run_with(observations, |prev, obs| {
            (0..self.hmm.n_states())
                .into_par_iter()
                .map(|j| self.step(prev, j, obs))
                .collect()
        })
    }
    ///
    /// Check that the sequence is non-empty and every symbol is in `[0, M)`.
    ///
    fn check_observations(&self, observations: &[usize]) -> Result<()> {
        if observations.is_empty() {
            return Err(LpdbError::InvalidObservation(
                "observation sequence is empty".to_string(),
            ));
        }
        let m = self.hmm.n_observations();
        match observations.iter().position(|&o| o >= m) {
            Some(t) => Err(LpdbError::InvalidObservation(format!(
                "symbol {} at t={} is not in [0, {})",
                observations[t], t, m
            ))),
            None => Ok(()),
        }
    }
    ///
    /// `(psi[j, t], delta[j, t])` from `delta[:, t-1]`
    ///
    fn step(&self, prev: ArrayView1<'_, f64>, j: usize, obs: usize) -> (usize, f64) {
        let a = self.hmm.transition();
        let b = self.hmm.observation();
        let (i_max, p_max) = argmax(prev.iter().zip(a.column(j).iter()).map(|(d, t)| d * t));
        (i_max, p_max * b[[j, obs]])
    }
    fn run_with<F>(&self, observations: &[usize], fill: F) -> Result<ViterbiResult>
    where
        F: Fn(ArrayView1<'_, f64>, usize) -> Vec<(usize, f64)>,
    {
        self.check_observations(observations)?;
        let n = self.hmm.n_states();
        let t_max = observations.len();
        let b = self.hmm.observation();
        let pi = self.hmm.initial();

        let mut delta: Array2<f64> = Array::zeros((n, t_max));
        let mut psi: Array2<usize> = Array::zeros((n, t_max));

        // initialization
        for i in 0..n {
            delta[[i, 0]] = pi[i] * b[[i, observations[0]]];
        }

        // recursion
        for t in 1..t_max {
            let column = fill(delta.column(t - 1), observations[t]);
            for (j, (i_max, d)) in column.into_iter().enumerate() {
                psi[[j, t]] = i_max;
                delta[[j, t]] = d;
            }
        }

        // termination
        let mut states = vec![0; t_max];
        let (q_last, rho) = argmax(delta.column(t_max - 1).iter().copied());
        states[t_max - 1] = q_last;
        debug!("viterbi T={} N={} rho={}", t_max, n, rho);

        // backtrace
        for t in (1..t_max).rev() {
            states[t - 1] = psi[[states[t], t]];
        }

        Ok(ViterbiResult { states, delta })
    }
}
