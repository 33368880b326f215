//!
//! Simulation of noisy plate recognition
//!
//! Plates are generated at random, "measured" through the confusion model,
//! registered in a `LicensePlateDB` and later removed by another noisy
//! measurement. False acceptances (a different plate was removed) and false
//! rejections (nothing was removed) are counted per iteration.
//!
use crate::alphabet::Alphabet;
use crate::config::SimulationConfig;
use crate::error::{LpdbError, Result};
use crate::plate_db::LicensePlateDB;
use log::{debug, info};
use ndarray::prelude::*;
use rand::prelude::*;
use rand_xoshiro::Xoshiro256PlusPlus;

/// maximum number of trials to draw a plate not registered yet
pub const MAX_TRIALS: usize = 10_000;

///
/// Random plate of the given length with uniformly chosen symbols
///
pub fn random_plate<R: Rng>(rng: &mut R, alphabet: &Alphabet, length: usize) -> String {
    (0..length)
        .map(|_| {
            let symbol = alphabet
                .symbols()
                .choose(&mut *rng)
                .expect("alphabet is never empty");
            *symbol as char
        })
        .collect()
}

///
/// Measure the plate through the confusion model.
///
/// The symbol `c` is replaced by the first `k` with `u < cumsum(confusion[c, :])[k]`
/// where `u ~ U[0, 1)`.
///
pub fn noisy_measurement<R: Rng>(
    rng: &mut R,
    plate: &str,
    alphabet: &Alphabet,
    confusion: ArrayView2<'_, f64>,
) -> Result<String> {
    let indices = alphabet.to_indices(plate)?;
    let noisy: Vec<usize> = indices
        .into_iter()
        .map(|c| {
            let u: f64 = rng.gen();
            let mut cumsum = 0.0;
            for (k, p) in confusion.row(c).iter().enumerate() {
                cumsum += p;
                if u < cumsum {
                    return k;
                }
            }
            // rounding error of cumsum
            alphabet.len() - 1
        })
        .collect();
    Ok(alphabet.indices_to_string(&noisy))
}

///
/// Statistics of `run_simulation`
///
#[derive(Clone, Debug, PartialEq)]
pub struct SimulationReport {
    ///
    /// false acceptance rate after each iteration
    pub far: Vec<f64>,
    ///
    /// false rejection rate after each iteration
    pub frr: Vec<f64>,
    pub n_false_acceptances: usize,
    pub n_false_rejections: usize,
}

impl SimulationReport {
    pub fn n_iterations(&self) -> usize {
        self.far.len()
    }
    ///
    /// Write `iteration far frr` rows
    ///
    pub fn to_tsv_writer<W: std::io::Write>(&self, mut writer: W) -> std::io::Result<()> {
        writeln!(writer, "# iteration\tfar\tfrr")?;
        for (i, (far, frr)) in self.far.iter().zip(self.frr.iter()).enumerate() {
            writeln!(writer, "{}\t{}\t{}", i, far, frr)?;
        }
        Ok(())
    }
}

impl std::fmt::Display for SimulationReport {
    fn fmt(&self, f: &mut std::fmt::Formatter) -> std::fmt::Result {
        write!(
            f,
            "n_iterations={} n_false_acceptances={} n_false_rejections={} far={} frr={}",
            self.n_iterations(),
            self.n_false_acceptances,
            self.n_false_rejections,
            self.far.last().copied().unwrap_or(0.0),
            self.frr.last().copied().unwrap_or(0.0),
        )
    }
}

///
/// A registered plate: the true plate and how it was measured when added
///
#[derive(Clone, Debug)]
struct Registered {
    plate: String,
    measured: String,
}

///
/// Run the simulation described by the config with the seeded rng.
///
pub fn run_simulation(config: &SimulationConfig, seed: u64) -> Result<SimulationReport> {
    config.validate()?;
    let alphabet = config.alphabet()?;
    let confusion = config.confusion()?;
    let length = config.length_of_license_plate;
    let mut rng = Xoshiro256PlusPlus::seed_from_u64(seed);
    let mut db = LicensePlateDB::new(confusion.clone(), length, alphabet.clone())?;
    let mut registered: Vec<Registered> = Vec::new();

    // initial plates
    // neither the plate nor its measurement can be registered twice
    for _ in 0..config.num_of_license_plates_in_db {
        let mut trial = 0;
        let r = loop {
            let plate = random_plate(&mut rng, &alphabet, length);
            let measured = noisy_measurement(&mut rng, &plate, &alphabet, confusion.view())?;
            let is_duplicate = registered
                .iter()
                .any(|x| x.plate == plate || x.measured == measured);
            if !is_duplicate {
                break Registered { plate, measured };
            }
            trial += 1;
            if trial >= MAX_TRIALS {
                return Err(LpdbError::Config(format!(
                    "could not generate {} distinct plates",
                    config.num_of_license_plates_in_db
                )));
            }
        };
        db.add(&r.measured)?;
        registered.push(r);
    }
    info!("registered {} plates", db.len());

    let n = config.num_of_license_plates_to_test;
    let mut far = Vec::with_capacity(n);
    let mut frr = Vec::with_capacity(n);
    let mut n_false_acceptances = 0;
    let mut n_false_rejections = 0;

    for i in 0..n {
        // new plate arrives
        let plate = random_plate(&mut rng, &alphabet, length);
        let measured = noisy_measurement(&mut rng, &plate, &alphabet, confusion.view())?;
        db.add(&measured)?;
        registered.push(Registered { plate, measured });

        // random registered plate leaves
        let index = rng.gen_range(0..registered.len());
        let leaving = registered[index].clone();
        let noisy = noisy_measurement(&mut rng, &leaving.plate, &alphabet, confusion.view())?;
        let r = db.remove(&noisy)?;

        if r.rejected {
            n_false_rejections += 1;
        } else {
            if leaving.measured != r.plate {
                n_false_acceptances += 1;
            }
            if let Some(j) = registered.iter().rposition(|x| x.measured == r.plate) {
                registered.remove(j);
            }
        }
        debug!(
            "#{} plate={} measured={} leaving={} recognized={} rejected={}",
            i, leaving.plate, leaving.measured, noisy, r.plate, r.rejected
        );

        let n_iter = (i + 1) as f64;
        far.push(n_false_acceptances as f64 / n_iter);
        frr.push(n_false_rejections as f64 / n_iter);
    }

    let report = SimulationReport {
        far,
        frr,
        n_false_acceptances,
        n_false_rejections,
    };
    info!("{}", report);
    Ok(report)
}
