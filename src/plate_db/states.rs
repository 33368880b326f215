//!
//! State space of the plate HMM
//!
//! A state is shared by every plate having the symbol `c` at position `p`:
//!
//! ```text
//! state(c, p) = p * n_symbols + c        for c < n_symbols, p < length
//! begin       = n_symbols * length
//! end         = n_symbols * length + 1
//! ```
//!
//! so the number of states does not depend on the number of plates.
//!

///
/// Encoding between `(symbol index, position)` and HMM state index
///
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct StateSpace {
    n_symbols: usize,
    length: usize,
}

impl StateSpace {
    pub fn new(n_symbols: usize, length: usize) -> StateSpace {
        StateSpace { n_symbols, length }
    }
    pub fn n_symbols(&self) -> usize {
        self.n_symbols
    }
    pub fn length(&self) -> usize {
        self.length
    }
    /// total number of states including begin and end
    pub fn n_states(&self) -> usize {
        self.n_symbols * self.length + 2
    }
    /// begin sentinel state
    pub fn begin(&self) -> usize {
        self.n_symbols * self.length
    }
    /// end sentinel state
    pub fn end(&self) -> usize {
        self.n_symbols * self.length + 1
    }
    pub fn is_sentinel(&self, state: usize) -> bool {
        state == self.begin() || state == self.end()
    }
    ///
    /// State of symbol index `symbol` at position `position`
    ///
    pub fn state(&self, symbol: usize, position: usize) -> usize {
        assert!(symbol < self.n_symbols);
        assert!(position < self.length);
        position * self.n_symbols + symbol
    }
    ///
    /// Symbol index of the state, None for sentinels
    ///
    pub fn symbol_of(&self, state: usize) -> Option<usize> {
        if state < self.begin() {
            Some(state % self.n_symbols)
        } else {
            None
        }
    }
    ///
    /// Position of the state, None for sentinels
    ///
    pub fn position_of(&self, state: usize) -> Option<usize> {
        if state < self.begin() {
            Some(state / self.n_symbols)
        } else {
            None
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn state_space_abc() {
        let s = StateSpace::new(3, 3);
        assert_eq!(s.n_states(), 11);
        assert_eq!(s.begin(), 9);
        assert_eq!(s.end(), 10);
        assert_eq!(s.state(0, 0), 0);
        assert_eq!(s.state(1, 1), 4);
        assert_eq!(s.state(2, 2), 8);
        assert!(s.is_sentinel(9));
        assert!(!s.is_sentinel(8));
    }

    #[test]
    fn state_space_inverse() {
        let s = StateSpace::new(5, 4);
        for p in 0..4 {
            for c in 0..5 {
                let state = s.state(c, p);
                assert_eq!(s.symbol_of(state), Some(c));
                assert_eq!(s.position_of(state), Some(p));
            }
        }
        assert_eq!(s.symbol_of(s.begin()), None);
        assert_eq!(s.position_of(s.end()), None);
    }
}
