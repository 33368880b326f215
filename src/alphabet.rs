//!
//! Alphabet of plate symbols
//!
//! The extended alphabet appends two markers used only in observation
//! sequences: `BEGIN_MARKER` and `END_MARKER`.
//!
use crate::error::{LpdbError, Result};
use itertools::Itertools;

/// marker observed at the beginning of every plate
pub const BEGIN_MARKER: u8 = b'$';

/// marker observed at the end of every plate
pub const END_MARKER: u8 = b'#';

/// Symbols used by `Alphabet::alphanumeric`
pub const ALPHANUMERIC: &[u8; 36] = b"ABCDEFGHIJKLMNOPQRSTUVWXYZ0123456789";

///
/// Ordered set of single-byte symbols.
///
/// Order matters: the index of a symbol is the row/column of the
/// confusion model assigned to it.
///
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Alphabet {
    symbols: Vec<u8>,
}

impl Alphabet {
    pub fn new(symbols: &[u8]) -> Result<Alphabet> {
        if symbols.is_empty() {
            return Err(LpdbError::InvalidAlphabet("alphabet is empty".to_string()));
        }
        if let Some(&s) = symbols.iter().find(|s| !s.is_ascii_graphic()) {
            return Err(LpdbError::InvalidAlphabet(format!(
                "{:?} is not a printable ascii symbol",
                s as char
            )));
        }
        if let Some(&s) = symbols
            .iter()
            .find(|&&s| s == BEGIN_MARKER || s == END_MARKER)
        {
            return Err(LpdbError::InvalidAlphabet(format!(
                "{:?} is reserved as a marker",
                s as char
            )));
        }
        if let Some(s) = symbols.iter().duplicates().next() {
            return Err(LpdbError::InvalidAlphabet(format!(
                "{:?} appears more than once",
                *s as char
            )));
        }
        Ok(Alphabet {
            symbols: symbols.to_vec(),
        })
    }
    ///
    /// First `m` symbols of `A-Z0-9`
    ///
    pub fn alphanumeric(m: usize) -> Result<Alphabet> {
        if m > ALPHANUMERIC.len() {
            return Err(LpdbError::InvalidAlphabet(format!(
                "at most {} alphanumeric symbols are available (requested {})",
                ALPHANUMERIC.len(),
                m
            )));
        }
        Alphabet::new(&ALPHANUMERIC[..m])
    }
    /// the number of symbols (without markers)
    pub fn len(&self) -> usize {
        self.symbols.len()
    }
    pub fn is_empty(&self) -> bool {
        self.symbols.is_empty()
    }
    /// the number of symbols including markers
    pub fn extended_len(&self) -> usize {
        self.len() + 2
    }
    pub fn begin_marker_index(&self) -> usize {
        self.len()
    }
    pub fn end_marker_index(&self) -> usize {
        self.len() + 1
    }
    pub fn symbols(&self) -> &[u8] {
        &self.symbols
    }
    ///
    /// Index of the symbol, or None if not in the alphabet
    ///
    pub fn index_of(&self, symbol: u8) -> Option<usize> {
        self.symbols.iter().position(|&s| s == symbol)
    }
    ///
    /// Symbol of the index
    ///
    /// Panics if `index >= self.len()`.
    ///
    pub fn symbol(&self, index: usize) -> u8 {
        self.symbols[index]
    }
    pub fn contains(&self, symbol: u8) -> bool {
        self.index_of(symbol).is_some()
    }
    ///
    /// Index of a character of a plate. Characters outside of ASCII are
    /// never symbols.
    ///
    pub fn index_of_char(&self, symbol: char) -> Option<usize> {
        if symbol.is_ascii() {
            self.index_of(symbol as u8)
        } else {
            None
        }
    }
    ///
    /// Convert each character of the plate into its index.
    /// Positions are counted in characters.
    ///
    pub fn to_indices(&self, plate: &str) -> Result<Vec<usize>> {
        plate
            .chars()
            .enumerate()
            .map(|(position, symbol)| {
                self.index_of_char(symbol)
                    .ok_or(LpdbError::InvalidSymbol { symbol, position })
            })
            .collect()
    }
    ///
    /// Indices in the extended alphabet with the begin/end markers added,
    /// i.e. `$plate#`.
    ///
    pub fn to_extended_indices(&self, plate: &str) -> Result<Vec<usize>> {
        let mut indices = Vec::with_capacity(plate.len() + 2);
        indices.push(self.begin_marker_index());
        indices.extend(self.to_indices(plate)?);
        indices.push(self.end_marker_index());
        Ok(indices)
    }
    ///
    /// Convert indices back into a string.
    ///
    pub fn indices_to_string(&self, indices: &[usize]) -> String {
        indices.iter().map(|&i| self.symbol(i) as char).collect()
    }
}

impl std::fmt::Display for Alphabet {
    fn fmt(&self, f: &mut std::fmt::Formatter) -> std::fmt::Result {
        write!(f, "{}", self.symbols.iter().map(|&s| s as char).join(","))
    }
}
