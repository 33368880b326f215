//!
//! test of the license plate catalogue
//!
use lpdb::alphabet::Alphabet;
use lpdb::confusion::{identity, uniform};
use lpdb::distribution::is_close;
use lpdb::plate_db::LicensePlateDB;
use lpdb::simulator::{noisy_measurement, random_plate};
use lpdb::LpdbError;
use ndarray::array;
use ndarray::prelude::*;
use rand::prelude::*;
use rand_xoshiro::Xoshiro256PlusPlus;
use test_case::test_case;

///
/// observation/initial are stochastic and transition rows sum to 0 or 1
///
fn check_stochastic(db: &LicensePlateDB) {
    let hmm = db.hmm();
    for row in hmm.observation().outer_iter() {
        assert!(is_close(row.sum(), 1.0));
    }
    assert!(is_close(hmm.initial().sum(), 1.0));
    for row in hmm.transition().outer_iter() {
        let sum = row.sum();
        assert!(is_close(sum, 1.0) || sum == 0.0, "sum={}", sum);
    }
}

#[test_case(20, 20, 0 ; "length 20")]
#[test_case(5, 50, 1 ; "length 5")]
#[test_case(1, 3, 2 ; "length 1")]
fn removal_perfect_measurements(length: usize, n_plates: usize, seed: u64) {
    let mut rng = Xoshiro256PlusPlus::seed_from_u64(seed);
    let alphabet = Alphabet::new(b"abc").unwrap();
    let mut db = LicensePlateDB::new(identity(3), length, alphabet.clone()).unwrap();

    let mut plates: Vec<String> = (0..n_plates)
        .map(|_| random_plate(&mut rng, &alphabet, length))
        .collect();
    for plate in plates.iter() {
        db.add(plate).unwrap();
        check_stochastic(&db);
    }
    assert_eq!(db.len(), n_plates);

    plates.shuffle(&mut rng);
    for plate in plates.iter() {
        let r = db.remove(plate).unwrap();
        assert!(!r.rejected);
        assert_eq!(&r.plate, plate);
        check_stochastic(&db);
    }
    assert!(db.is_empty());
}

#[test]
fn removal_noisy_measurements() {
    let mut rng = Xoshiro256PlusPlus::seed_from_u64(3);
    let alphabet = Alphabet::new(b"abcdefgh").unwrap();
    let m = alphabet.len();
    let confusion = uniform(m, 0.02).unwrap();
    let mut db = LicensePlateDB::new(confusion.clone(), 10, alphabet.clone()).unwrap();

    let mut plates: Vec<String> = (0..100)
        .map(|_| random_plate(&mut rng, &alphabet, 10))
        .collect();
    for plate in plates.iter() {
        db.add(plate).unwrap();
    }
    plates.shuffle(&mut rng);

    let mut n_false_rejections = 0;
    let mut n_false_acceptances = 0;
    for plate in plates.iter() {
        let noisy = noisy_measurement(&mut rng, plate, &alphabet, confusion.view()).unwrap();
        let n_before = db.len();
        let contained_before = db.plates().to_vec();
        let r = db.remove(&noisy).unwrap();

        // recognized plate is always made of the alphabet
        assert_eq!(r.plate.len(), 10);
        assert!(r.plate.bytes().all(|s| alphabet.contains(s)));

        if r.rejected {
            n_false_rejections += 1;
            assert_eq!(db.len(), n_before);
            assert!(!contained_before.contains(&r.plate));
        } else {
            // accepted plate was a member of the catalogue
            assert!(contained_before.contains(&r.plate));
            assert_eq!(db.len(), n_before - 1);
            if &r.plate != plate {
                n_false_acceptances += 1;
            }
        }
        check_stochastic(&db);
    }
    println!(
        "FAR: {} FRR: {}",
        n_false_acceptances as f64 / 100.0,
        n_false_rejections as f64 / 100.0
    );
    // every accepted measurement removed exactly one plate
    assert_eq!(db.len(), n_false_rejections);
}

#[test]
fn construction_shape_mismatch() {
    let alphabet = Alphabet::new(b"abc").unwrap();
    let non_square: Array2<f64> = Array::from_elem((3, 2), 0.5);
    assert!(matches!(
        LicensePlateDB::new(non_square, 4, alphabet.clone()),
        Err(LpdbError::ShapeMismatch(_))
    ));
    assert!(matches!(
        LicensePlateDB::new(identity(2), 4, alphabet),
        Err(LpdbError::ShapeMismatch(_))
    ));
}

#[test]
fn add_invalid_plate_keeps_catalogue() {
    let alphabet = Alphabet::new(b"xyz").unwrap();
    let mut db = LicensePlateDB::new(identity(3), 4, alphabet).unwrap();
    db.add("xyzx").unwrap();
    let transition = db.hmm().transition().to_owned();

    assert!(matches!(
        db.add("xyz"),
        Err(LpdbError::LengthMismatch {
            expected: 4,
            actual: 3
        })
    ));
    assert!(matches!(
        db.add("xAzx"),
        Err(LpdbError::InvalidSymbol {
            symbol: 'A',
            position: 1
        })
    ));
    assert_eq!(db.plates(), &["xyzx"]);
    assert_eq!(db.hmm().transition(), transition.view());
}

#[test]
fn recognize_does_not_modify() {
    let alphabet = Alphabet::new(b"01").unwrap();
    let mut db = LicensePlateDB::new(uniform(2, 0.1).unwrap(), 4, alphabet).unwrap();
    db.add("0011").unwrap();
    db.add("1100").unwrap();
    assert_eq!(db.recognize("0010").unwrap(), "0011");
    assert_eq!(db.recognize("1000").unwrap(), "1100");
    assert_eq!(db.len(), 2);
}

#[test]
fn non_ascii_plate_is_counted_in_characters() {
    let alphabet = Alphabet::new(b"abc").unwrap();
    // 2 characters in 3 bytes
    let plate = "a\u{e9}";

    let mut db = LicensePlateDB::new(identity(3), 3, alphabet.clone()).unwrap();
    assert!(matches!(
        db.add(plate),
        Err(LpdbError::LengthMismatch {
            expected: 3,
            actual: 2
        })
    ));

    let mut db = LicensePlateDB::new(identity(3), 2, alphabet).unwrap();
    assert!(matches!(
        db.add(plate),
        Err(LpdbError::InvalidSymbol {
            symbol: '\u{e9}',
            position: 1
        })
    ));
    assert!(matches!(
        db.remove(plate),
        Err(LpdbError::InvalidSymbol {
            symbol: '\u{e9}',
            position: 1
        })
    ));
    assert!(db.is_empty());
}

#[test]
fn construction_negative_confusion() {
    let alphabet = Alphabet::new(b"ab").unwrap();
    let confusion = array![[1.5, -0.5], [0.0, 1.0]];
    assert!(matches!(
        LicensePlateDB::new(confusion, 2, alphabet),
        Err(LpdbError::InvalidDistribution { row: Some(0), .. })
    ));
}
