//! Property checks for HDI computation over seeded random sample sets.

use cageside_hdi::{HdiError, SampleSet, compute_hdi, compute_hdis};
use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};

/// Draws `n` values from a lopsided mixture on [0, 1] so intervals are not
/// trivially centred.
fn draws(n: usize, seed: u64) -> Vec<f64> {
    let mut rng = StdRng::seed_from_u64(seed);
    (0..n)
        .map(|_| {
            let u: f64 = rng.random();
            if rng.random_bool(0.7) {
                0.55 + 0.1 * (u - 0.5)
            } else {
                u
            }
        })
        .collect()
}

// ---------------------------------------------------------------------------
// 1. bounds_are_ordered_samples_with_enough_coverage
// ---------------------------------------------------------------------------
#[test]
fn bounds_are_ordered_samples_with_enough_coverage() {
    for seed in 0..20 {
        let samples = draws(50 + seed as usize * 7, seed);
        for &p in &[0.1, 0.5, 0.75, 0.9, 0.95, 0.99] {
            let iv = compute_hdi(&samples, p).unwrap();
            assert!(iv.lower() <= iv.upper(), "seed {seed}, p {p}");
            assert!(samples.contains(&iv.lower()));
            assert!(samples.contains(&iv.upper()));

            let inside = samples.iter().filter(|&&x| iv.contains(x)).count();
            let required = (p * samples.len() as f64).floor() as usize + 1;
            assert!(
                inside >= required,
                "seed {seed}, p {p}: {inside} inside, need {required}"
            );
        }
    }
}

// ---------------------------------------------------------------------------
// 2. interval_is_narrowest
// ---------------------------------------------------------------------------
#[test]
fn interval_is_narrowest() {
    let samples = draws(200, 7);
    let set = SampleSet::new(&samples).unwrap();
    let sorted = set.sorted();
    let p = 0.8;
    let k = (p * sorted.len() as f64).floor() as usize;
    let iv = set.hdi(p).unwrap();
    for i in 0..sorted.len() - k {
        assert!(sorted[i + k] - sorted[i] >= iv.width());
    }
}

// ---------------------------------------------------------------------------
// 3. widths_grow_with_coverage
// ---------------------------------------------------------------------------
#[test]
fn widths_grow_with_coverage() {
    for seed in 0..20 {
        let samples = draws(300, 100 + seed);
        let set = compute_hdis(&samples, &[0.5, 0.75, 0.9, 0.95]).unwrap();
        let widths: Vec<f64> = set.iter().map(|iv| iv.width()).collect();
        assert!(
            widths.windows(2).all(|w| w[1] >= w[0]),
            "seed {seed}: widths {widths:?}"
        );
    }
}

// ---------------------------------------------------------------------------
// 4. first_minimum_wins_on_ties
// ---------------------------------------------------------------------------
#[test]
fn first_minimum_wins_on_ties() {
    let samples: Vec<f64> = (1..=10).map(f64::from).collect();

    // floor(0.45 * 10) = 4 → five-sample windows (1,5) .. (6,10), all width 4.
    let iv = compute_hdi(&samples, 0.45).unwrap();
    assert_eq!((iv.lower(), iv.upper()), (1.0, 5.0));

    // floor(0.5 * 10) = 5 → six-sample windows (1,6) .. (5,10), all width 5.
    let iv = compute_hdi(&samples, 0.5).unwrap();
    assert_eq!((iv.lower(), iv.upper()), (1.0, 6.0));
}

// ---------------------------------------------------------------------------
// 5. batch_matches_single
// ---------------------------------------------------------------------------
#[test]
fn batch_matches_single() {
    let samples = draws(120, 3);
    let levels = [0.5, 0.75, 0.9, 0.95];
    let set = compute_hdis(&samples, &levels).unwrap();
    for &p in &levels {
        assert_eq!(set.get(p).copied().unwrap(), compute_hdi(&samples, p).unwrap());
    }
}

// ---------------------------------------------------------------------------
// 6. nested_input_equals_flat_input
// ---------------------------------------------------------------------------
#[test]
fn nested_input_equals_flat_input() {
    let flat = draws(90, 11);
    let chains: Vec<Vec<f64>> = flat.chunks(30).map(<[f64]>::to_vec).collect();
    let a = SampleSet::new(&flat).unwrap().hdi(0.9).unwrap();
    let b = SampleSet::from_nested(&chains).unwrap().hdi(0.9).unwrap();
    assert_eq!(a, b);
}

// ---------------------------------------------------------------------------
// 7. coverage_errors
// ---------------------------------------------------------------------------
#[test]
fn coverage_errors() {
    let samples = draws(10, 1);
    for bad in [0.0, 1.0, 1.5, -0.1, f64::NAN] {
        assert!(matches!(
            compute_hdi(&samples, bad),
            Err(HdiError::InvalidCoverage { .. })
        ));
    }
    assert!(matches!(
        compute_hdi(&[], 0.5),
        Err(HdiError::EmptySampleSet)
    ));
}
