//!
//! Error type shared by the whole crate
//!
use thiserror::Error;

///
/// Errors raised by model construction, decoding and catalogue operations.
///
/// A rejected `remove` is not an error; see `plate_db::Recognition`.
///
#[derive(Debug, Error)]
pub enum LpdbError {
    /// A probability vector (row = None) or a matrix row does not sum to 1
    #[error("invalid probability distribution ({})", describe_row(.row, .sum))]
    InvalidDistribution { row: Option<usize>, sum: f64 },

    /// Dimensions of matrices/vectors are incompatible
    #[error("shape mismatch: {0}")]
    ShapeMismatch(String),

    /// Entry length differs from the configured plate length
    #[error("plate has wrong length (expected {expected}, got {actual})")]
    LengthMismatch { expected: usize, actual: usize },

    /// Entry contains a symbol outside of the alphabet
    #[error("invalid symbol {symbol:?} at position {position}")]
    InvalidSymbol { symbol: char, position: usize },

    /// Observation index is out of range, or the sequence is empty
    #[error("invalid observation sequence: {0}")]
    InvalidObservation(String),

    /// Alphabet is empty, has duplicates, or uses a reserved marker
    #[error("invalid alphabet: {0}")]
    InvalidAlphabet(String),

    /// Simulation configuration is inconsistent
    #[error("invalid config: {0}")]
    Config(String),

    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    #[error("json error: {0}")]
    Json(#[from] serde_json::Error),
}

fn describe_row(row: &Option<usize>, sum: &f64) -> String {
    match row {
        Some(row) => format!("sum of the row {} is {}", row, sum),
        None => format!("sum of the vector is {}", sum),
    }
}

/// Result alias used throughout the crate.
pub type Result<T> = std::result::Result<T, LpdbError>;
