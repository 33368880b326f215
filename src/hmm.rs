//!
//! Discrete Hidden Markov Model and its Viterbi decoder
//!
//! * `model`: `HiddenMarkovModel` holding transition/observation/initial distributions
//! * `viterbi`: maximum-likelihood state path of an observation sequence
//!
pub mod model;
pub mod viterbi;

pub use model::HiddenMarkovModel;
pub use viterbi::{Viterbi, ViterbiResult};
