//!
//! Recognition of noisy license plates against a catalogue of plates
//! with a Hidden Markov Model and the Viterbi algorithm.
//!
//! ```
//! use lpdb::{alphabet::Alphabet, confusion, plate_db::LicensePlateDB};
//!
//! let alphabet = Alphabet::new(b"abc").unwrap();
//! let mut db = LicensePlateDB::new(confusion::uniform(3, 0.05).unwrap(), 3, alphabet).unwrap();
//! db.add("abc").unwrap();
//! db.add("cab").unwrap();
//! let r = db.remove("abb").unwrap();
//! assert_eq!(r.plate, "abc");
//! assert!(!r.rejected);
//! ```
//!
pub mod alphabet;
pub mod config;
pub mod confusion;
pub mod distribution;
pub mod error;
pub mod hmm;
pub mod plate_db;
pub mod simulator;

pub use error::{LpdbError, Result};

#[cfg(test)]
#[macro_use]
extern crate approx;
