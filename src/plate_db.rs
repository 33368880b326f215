//!
//! License plate catalogue recognizing noisy plates with an HMM
//!
//! Every `add`/`remove` that changes the catalogue rebuilds the whole HMM
//! (and its Viterbi decoder) from the current plates.
//!
//! ## HMM
//!
//! * states: `StateSpace` (symbol x position, plus begin and end)
//! * transition: normalized counts of consecutive `(symbol, position)` pairs
//!   over all plates, `begin -> first symbol` and `last symbol -> end`.
//!   Rows of never-visited states stay all-zero.
//! * observation: confusion model row of the symbol (for every position),
//!   begin/end states emit their marker with probability 1.
//! * initial: always the begin state.
//!
pub mod states;

use crate::alphabet::Alphabet;
use crate::confusion::verify_confusion;
use crate::error::{LpdbError, Result};
use crate::hmm::{HiddenMarkovModel, Viterbi};
use log::{debug, info, warn};
use ndarray::prelude::*;
use ndarray::s;
pub use states::StateSpace;

///
/// Outcome of `LicensePlateDB::remove`
///
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Recognition {
    ///
    /// most likely plate of the noisy measurement
    pub plate: String,
    ///
    /// true if `plate` is not in the catalogue (nothing was removed)
    pub rejected: bool,
}

///
/// Catalogue of license plates of fixed length over a fixed alphabet.
///
#[derive(Debug, Clone)]
pub struct LicensePlateDB {
    confusion: Array2<f64>,
    alphabet: Alphabet,
    states: StateSpace,
    plates: Vec<String>,
    viterbi: Viterbi,
}

impl LicensePlateDB {
    ///
    /// Create an empty catalogue.
    ///
    /// `confusion` rows/columns are ordered as the symbols of `alphabet`.
    ///
    pub fn new(
        confusion: Array2<f64>,
        plate_length: usize,
        alphabet: Alphabet,
    ) -> Result<LicensePlateDB> {
        verify_confusion(confusion.view(), alphabet.len())?;
        if plate_length == 0 {
            return Err(LpdbError::LengthMismatch {
                expected: 1,
                actual: 0,
            });
        }
        let states = StateSpace::new(alphabet.len(), plate_length);
        let viterbi = build_viterbi(&confusion, &alphabet, &states, &[])?;
        info!(
            "plate db created alphabet={} length={} n_states={}",
            alphabet,
            plate_length,
            states.n_states()
        );
        Ok(LicensePlateDB {
            confusion,
            alphabet,
            states,
            plates: Vec::new(),
            viterbi,
        })
    }
    ///
    /// Add a plate and rebuild the model.
    ///
    pub fn add(&mut self, plate: &str) -> Result<()> {
        self.verify_plate(plate)?;
        let mut plates = self.plates.clone();
        plates.push(plate.to_string());
        self.replace(plates)?;
        debug!("added {} (n_plates={})", plate, self.len());
        Ok(())
    }
    ///
    /// Recognize the noisy plate and remove it if the recognized plate
    /// is in the catalogue. Otherwise the catalogue is not changed and
    /// the recognition is marked as rejected.
    ///
    pub fn remove(&mut self, noisy_plate: &str) -> Result<Recognition> {
        let plate = self.recognize(noisy_plate)?;
        match self.plates.iter().position(|p| *p == plate) {
            Some(index) => {
                let mut plates = self.plates.clone();
                plates.remove(index);
                self.replace(plates)?;
                debug!("removed {} as {}", noisy_plate, plate);
                Ok(Recognition {
                    plate,
                    rejected: false,
                })
            }
            None => {
                debug!("rejected {} as {}", noisy_plate, plate);
                Ok(Recognition {
                    plate,
                    rejected: true,
                })
            }
        }
    }
    ///
    /// Most likely plate of the noisy measurement under the current model.
    /// The catalogue is not modified.
    ///
    pub fn recognize(&self, noisy_plate: &str) -> Result<String> {
        self.verify_plate(noisy_plate)?;
        let observations = self.alphabet.to_extended_indices(noisy_plate)?;
        let result = self.viterbi.run(&observations)?;

        // drop begin and end
        let n = result.states.len();
        let symbols: Vec<usize> = result.states[1..n - 1]
            .iter()
            .map(|&state| {
                self.states.symbol_of(state).unwrap_or_else(|| {
                    warn!("sentinel state {} inside of the plate", state);
                    0
                })
            })
            .collect();
        Ok(self.alphabet.indices_to_string(&symbols))
    }
    ///
    /// Length is counted in characters, so a non-ASCII character is
    /// reported as an invalid symbol rather than a length mismatch.
    ///
    fn verify_plate(&self, plate: &str) -> Result<()> {
        let length = plate.chars().count();
        if length != self.plate_length() {
            return Err(LpdbError::LengthMismatch {
                expected: self.plate_length(),
                actual: length,
            });
        }
        self.alphabet.to_indices(plate).map(|_| ())
    }
    ///
    /// Build the model of `plates` and swap it in together with the plates.
    /// On error `self` is left untouched.
    ///
    fn replace(&mut self, plates: Vec<String>) -> Result<()> {
        let viterbi = build_viterbi(&self.confusion, &self.alphabet, &self.states, &plates)?;
        self.plates = plates;
        self.viterbi = viterbi;
        Ok(())
    }

    //
    // accessors
    //

    /// Current HMM
    pub fn hmm(&self) -> &HiddenMarkovModel {
        self.viterbi.hmm()
    }
    /// Current decoder
    pub fn viterbi(&self) -> &Viterbi {
        &self.viterbi
    }
    /// Plates in insertion order
    pub fn plates(&self) -> &[String] {
        &self.plates
    }
    pub fn len(&self) -> usize {
        self.plates.len()
    }
    pub fn is_empty(&self) -> bool {
        self.plates.is_empty()
    }
    pub fn contains(&self, plate: &str) -> bool {
        self.plates.iter().any(|p| p == plate)
    }
    pub fn alphabet(&self) -> &Alphabet {
        &self.alphabet
    }
    pub fn plate_length(&self) -> usize {
        self.states.length()
    }
    pub fn confusion(&self) -> ArrayView2<'_, f64> {
        self.confusion.view()
    }
    pub fn state_space(&self) -> &StateSpace {
        &self.states
    }
}

//
// model construction
//

fn build_viterbi(
    confusion: &Array2<f64>,
    alphabet: &Alphabet,
    states: &StateSpace,
    plates: &[String],
) -> Result<Viterbi> {
    let transition = build_transition(alphabet, states, plates)?;
    let observation = build_observation(confusion, alphabet, states);
    let initial = build_initial(states);
    let hmm = HiddenMarkovModel::new(transition, observation, initial)?;
    Ok(Viterbi::new(hmm))
}

///
/// Count transitions of all plates and normalize each non-zero row.
///
pub fn build_transition(
    alphabet: &Alphabet,
    states: &StateSpace,
    plates: &[String],
) -> Result<Array2<f64>> {
    let n = states.n_states();
    let mut transition: Array2<f64> = Array::zeros((n, n));
    for plate in plates {
        let symbols = alphabet.to_indices(plate)?;
        let mut prev = states.begin();
        for (position, &symbol) in symbols.iter().enumerate() {
            let state = states.state(symbol, position);
            transition[[prev, state]] += 1.0;
            prev = state;
        }
        transition[[prev, states.end()]] += 1.0;
    }

    for mut row in transition.outer_iter_mut() {
        let sum = row.sum();
        if sum > 0.0 {
            row /= sum;
        }
    }
    Ok(transition)
}

///
/// Confusion row of the symbol for each `(symbol, position)` state, and
/// markers for the sentinels.
///
pub fn build_observation(
    confusion: &Array2<f64>,
    alphabet: &Alphabet,
    states: &StateSpace,
) -> Array2<f64> {
    let m = alphabet.len();
    let mut observation: Array2<f64> = Array::zeros((states.n_states(), alphabet.extended_len()));
    for position in 0..states.length() {
        for symbol in 0..m {
            observation
                .slice_mut(s![states.state(symbol, position), ..m])
                .assign(&confusion.row(symbol));
        }
    }
    observation[[states.begin(), alphabet.begin_marker_index()]] = 1.0;
    observation[[states.end(), alphabet.end_marker_index()]] = 1.0;
    observation
}

///
/// Always start from the begin state.
///
pub fn build_initial(states: &StateSpace) -> Array1<f64> {
    let mut initial: Array1<f64> = Array::zeros(states.n_states());
    initial[states.begin()] = 1.0;
    initial
}
