//! Synthetic recovery problems: random dictionaries and sparse signals.

use nalgebra::{DMatrix, DVector};
use rand::prelude::*;
use rand::rngs::StdRng;
use rand::seq::index;
use rand_distr::{Normal, StandardNormal};

use crate::domain::{AmplitudeDistribution, ProblemConfig};
use crate::error::{PursuitError, Result};
use crate::math::Support;

/// Offset between the signal seed and the dictionary seed of a problem.
///
/// Drawing the signal and the dictionary from separate streams lets two
/// problems share a signal while differing in the dictionary, and keeps the
/// signal for a given seed identical across measurement counts.
pub const DICTIONARY_SEED_OFFSET: u64 = 198;

#[derive(Debug, Clone)]
pub struct Problem {
    pub dictionary: DMatrix<f64>,
    pub signal: DVector<f64>,
    pub observation: DVector<f64>,
    pub support: Support,
}

/// m×n dictionary with i.i.d. standard normal entries and unit-norm columns.
pub fn random_dictionary<R: Rng + ?Sized>(rng: &mut R, m: usize, n: usize) -> DMatrix<f64> {
    let mut dictionary = DMatrix::from_fn(m, n, |_, _| rng.sample::<f64, _>(StandardNormal));
    for mut column in dictionary.column_iter_mut() {
        let norm = column.norm();
        if norm > 0.0 {
            column /= norm;
        }
    }
    dictionary
}

/// Length-n vector with `s` nonzeros on a uniformly drawn support.
///
/// `s` is clamped to `n`.
pub fn sparse_signal<R: Rng + ?Sized>(
    rng: &mut R,
    n: usize,
    s: usize,
    dist: AmplitudeDistribution,
) -> DVector<f64> {
    let mut x = DVector::zeros(n);
    for idx in index::sample(rng, n, s.min(n)) {
        x[idx] = sample_amplitude(rng, dist);
    }
    x
}

fn sample_amplitude<R: Rng + ?Sized>(rng: &mut R, dist: AmplitudeDistribution) -> f64 {
    let sign = if rng.gen_bool(0.5) { 1.0 } else { -1.0 };
    match dist {
        AmplitudeDistribution::Normal => rng.sample(StandardNormal),
        AmplitudeDistribution::Uniform => sign * rng.gen_range(1.0..2.0),
        AmplitudeDistribution::Binary => sign,
    }
}

/// Build a seeded problem: signal from `seed`, dictionary and noise from
/// `seed + DICTIONARY_SEED_OFFSET`.
pub fn generate_problem(config: &ProblemConfig, seed: u64) -> Result<Problem> {
    config.validate()?;

    let mut signal_rng = StdRng::seed_from_u64(seed);
    let signal = sparse_signal(&mut signal_rng, config.n, config.sparsity, config.distribution);

    let mut dict_rng = StdRng::seed_from_u64(seed.wrapping_add(DICTIONARY_SEED_OFFSET));
    let dictionary = random_dictionary(&mut dict_rng, config.m, config.n);

    let mut observation = &dictionary * &signal;
    if config.noise_std > 0.0 {
        let noise = Normal::new(0.0, config.noise_std)
            .map_err(|e| PursuitError::InvalidConfig(format!("noise distribution error: {e}")))?;
        for v in observation.iter_mut() {
            *v += noise.sample(&mut dict_rng);
        }
    }

    let support = signal
        .iter()
        .enumerate()
        .filter(|(_, v)| **v != 0.0)
        .map(|(i, _)| i)
        .collect();

    Ok(Problem {
        dictionary,
        signal,
        observation,
        support,
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    fn config(distribution: AmplitudeDistribution) -> ProblemConfig {
        ProblemConfig {
            n: 64,
            m: 16,
            sparsity: 4,
            distribution,
            noise_std: 0.0,
        }
    }

    #[test]
    fn dictionary_columns_have_unit_norm() {
        let mut rng = StdRng::seed_from_u64(1);
        let d = random_dictionary(&mut rng, 10, 25);
        assert_eq!(d.shape(), (10, 25));
        for col in d.column_iter() {
            assert!((col.norm() - 1.0).abs() < 1e-12);
        }
    }

    #[test]
    fn signal_has_requested_sparsity_and_amplitudes() {
        let mut rng = StdRng::seed_from_u64(2);
        for _ in 0..20 {
            let x = sparse_signal(&mut rng, 50, 6, AmplitudeDistribution::Uniform);
            let nz: Vec<f64> = x.iter().copied().filter(|v| *v != 0.0).collect();
            assert_eq!(nz.len(), 6);
            assert!(nz.iter().all(|v| (1.0..2.0).contains(&v.abs())));

            let b = sparse_signal(&mut rng, 50, 6, AmplitudeDistribution::Binary);
            assert!(b.iter().filter(|v| **v != 0.0).all(|v| v.abs() == 1.0));
        }
    }

    #[test]
    fn sparsity_is_clamped_to_length() {
        let mut rng = StdRng::seed_from_u64(3);
        let x = sparse_signal(&mut rng, 4, 10, AmplitudeDistribution::Binary);
        assert_eq!(x.iter().filter(|v| **v != 0.0).count(), 4);
    }

    #[test]
    fn problems_are_reproducible_per_seed() {
        let cfg = config(AmplitudeDistribution::Normal);
        let a = generate_problem(&cfg, 9).unwrap();
        let b = generate_problem(&cfg, 9).unwrap();
        let c = generate_problem(&cfg, 10).unwrap();
        assert_eq!(a.dictionary, b.dictionary);
        assert_eq!(a.observation, b.observation);
        assert_ne!(a.signal, c.signal);
        assert_eq!(a.support.len(), 4);
        assert!((&a.dictionary * &a.signal - &a.observation).norm() < 1e-12);
    }

    #[test]
    fn signal_does_not_depend_on_measurement_count() {
        let mut cfg = config(AmplitudeDistribution::Uniform);
        let a = generate_problem(&cfg, 5).unwrap();
        cfg.m = 30;
        let b = generate_problem(&cfg, 5).unwrap();
        assert_eq!(a.signal, b.signal);
        assert_eq!(b.dictionary.nrows(), 30);
    }

    #[test]
    fn noise_perturbs_the_observation() {
        let mut cfg = config(AmplitudeDistribution::Uniform);
        cfg.noise_std = 0.01;
        let p = generate_problem(&cfg, 4).unwrap();
        let clean = &p.dictionary * &p.signal;
        let diff = (&p.observation - clean).norm();
        assert!(diff > 0.0 && diff < 1.0, "noise norm {diff}");
    }

    #[test]
    fn invalid_config_is_rejected() {
        let mut cfg = config(AmplitudeDistribution::Uniform);
        cfg.sparsity = 65;
        assert!(generate_problem(&cfg, 0).is_err());
    }
}
