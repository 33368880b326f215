//!
//! Configuration of the recognition simulation
//!
//! ```json
//! {
//!   "length_of_the_alphabet": 8,
//!   "length_of_license_plate": 10,
//!   "confusion_matrix": [[0.86, 0.02, ...], ...],
//!   "num_of_license_plates_in_db": 100,
//!   "num_of_license_plates_to_test": 100,
//!   "seed": 0
//! }
//! ```
//!
use crate::alphabet::{Alphabet, ALPHANUMERIC};
use crate::confusion::{uniform, verify_confusion};
use crate::error::{LpdbError, Result};
use ndarray::prelude::*;
use serde::{Deserialize, Serialize};

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct SimulationConfig {
    /// number of symbols taken from `A-Z0-9`
    pub length_of_the_alphabet: usize,
    pub length_of_license_plate: usize,
    /// row `c` is the observation distribution of the symbol `c`
    pub confusion_matrix: Vec<Vec<f64>>,
    /// plates registered before the test iterations start
    pub num_of_license_plates_in_db: usize,
    pub num_of_license_plates_to_test: usize,
    #[serde(default)]
    pub seed: u64,
}

impl SimulationConfig {
    pub fn from_json_str(json: &str) -> Result<SimulationConfig> {
        let config: SimulationConfig = serde_json::from_str(json)?;
        config.validate()?;
        Ok(config)
    }
    pub fn from_json_file<P: AsRef<std::path::Path>>(path: P) -> Result<SimulationConfig> {
        let file = std::fs::File::open(path)?;
        let reader = std::io::BufReader::new(file);
        let config: SimulationConfig = serde_json::from_reader(reader)?;
        config.validate()?;
        Ok(config)
    }
    pub fn to_json_file<P: AsRef<std::path::Path>>(&self, path: P) -> Result<()> {
        let file = std::fs::File::create(path)?;
        serde_json::to_writer_pretty(file, self)?;
        Ok(())
    }
    ///
    /// Check the alphabet size and the confusion matrix.
    ///
    pub fn validate(&self) -> Result<()> {
        if self.length_of_the_alphabet == 0 || self.length_of_the_alphabet > ALPHANUMERIC.len() {
            return Err(LpdbError::Config(format!(
                "length_of_the_alphabet has to be in 1..={} (is {})",
                ALPHANUMERIC.len(),
                self.length_of_the_alphabet
            )));
        }
        if self.length_of_license_plate == 0 {
            return Err(LpdbError::Config(
                "length_of_license_plate has to be positive".to_string(),
            ));
        }
        let confusion = self.confusion()?;
        verify_confusion(confusion.view(), self.length_of_the_alphabet)
    }
    pub fn alphabet(&self) -> Result<Alphabet> {
        Alphabet::alphanumeric(self.length_of_the_alphabet)
    }
    ///
    /// Confusion matrix as `Array2`. Ragged rows are a `ShapeMismatch`.
    ///
    pub fn confusion(&self) -> Result<Array2<f64>> {
        let n_rows = self.confusion_matrix.len();
        let n_cols = self.confusion_matrix.first().map_or(0, |row| row.len());
        if let Some(i) = self
            .confusion_matrix
            .iter()
            .position(|row| row.len() != n_cols)
        {
            return Err(LpdbError::ShapeMismatch(format!(
                "row {} of confusion_matrix has {} columns (expected {})",
                i,
                self.confusion_matrix[i].len(),
                n_cols
            )));
        }
        let elements: Vec<f64> = self.confusion_matrix.iter().flatten().copied().collect();
        Array2::from_shape_vec((n_rows, n_cols), elements)
            .map_err(|e| LpdbError::ShapeMismatch(e.to_string()))
    }
}

impl Default for SimulationConfig {
    ///
    /// 8 symbols, plates of length 10, confusion probability 2%
    ///
    fn default() -> Self {
        let m = 8;
        let confusion = uniform(m, 0.02).expect("8 * 0.02 <= 1");
        SimulationConfig {
            length_of_the_alphabet: m,
            length_of_license_plate: 10,
            confusion_matrix: confusion.outer_iter().map(|row| row.to_vec()).collect(),
            num_of_license_plates_in_db: 100,
            num_of_license_plates_to_test: 100,
            seed: 0,
        }
    }
}
