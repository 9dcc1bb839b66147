//! Recovery trials and recovery-probability sweeps.
//!
//! A trial draws a seeded problem, runs an estimator and measures the ℓ2
//! error against the true signal. Trial `i` of a run uses seed `seed + i`
//! whatever the estimator or measurement count, so every method sees the same
//! signals.

use rayon::prelude::*;

use crate::data::{Problem, generate_problem};
use crate::domain::{ProblemConfig, SweepPoint};
use crate::error::{PursuitError, Result};
use crate::pursuit::{Estimate, Estimator};

/// Error below which a trial counts as an exact recovery.
pub const SUCCESS_TOLERANCE: f64 = 1e-4;

#[derive(Debug, Clone)]
pub struct RecoveryConfig {
    pub problem: ProblemConfig,
    pub trials: usize,
    pub seed: u64,
    pub success_tolerance: f64,
}

impl RecoveryConfig {
    pub fn validate(&self) -> Result<()> {
        self.problem.validate()?;
        if self.trials == 0 {
            return Err(PursuitError::InvalidConfig("trials must be > 0".into()));
        }
        if !(self.success_tolerance.is_finite() && self.success_tolerance > 0.0) {
            return Err(PursuitError::InvalidConfig(format!(
                "success tolerance must be finite and > 0, got {}",
                self.success_tolerance
            )));
        }
        Ok(())
    }
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct TrialOutcome {
    pub error: f64,
    pub converged: bool,
    pub iterations: usize,
}

/// One problem recovered by one estimator.
#[derive(Debug, Clone)]
pub struct RecoveryRun {
    pub problem: Problem,
    pub estimate: Estimate,
    pub outcome: TrialOutcome,
}

/// Run `estimator` on `problem` and measure `||x - x̂||₂`.
pub fn run_trial(problem: &Problem, estimator: &dyn Estimator) -> Result<(Estimate, TrialOutcome)> {
    let estimate = estimator.estimate(
        &problem.dictionary,
        &problem.observation,
        problem.support.len(),
    )?;
    let outcome = TrialOutcome {
        error: (&problem.signal - &estimate.x).norm(),
        converged: estimate.converged,
        iterations: estimate.iterations,
    };
    Ok((estimate, outcome))
}

/// Generate the problem for `seed` and recover it once.
pub fn recover(config: &ProblemConfig, seed: u64, estimator: &dyn Estimator) -> Result<RecoveryRun> {
    let problem = generate_problem(config, seed)?;
    let (estimate, outcome) = run_trial(&problem, estimator)?;
    Ok(RecoveryRun {
        problem,
        estimate,
        outcome,
    })
}

/// Fraction of `config.trials` seeded trials recovered within the tolerance.
///
/// Trials are independent and run on the rayon pool; each one owns its
/// problem and search state.
pub fn recovery_probability(config: &RecoveryConfig, estimator: &dyn Estimator) -> Result<SweepPoint> {
    config.validate()?;

    let outcomes: Vec<TrialOutcome> = (0..config.trials)
        .into_par_iter()
        .map(|i| {
            let problem = generate_problem(&config.problem, config.seed.wrapping_add(i as u64))?;
            run_trial(&problem, estimator).map(|(_, outcome)| outcome)
        })
        .collect::<Result<Vec<_>>>()?;

    let successes = outcomes
        .iter()
        .filter(|o| o.error < config.success_tolerance)
        .count();
    let non_converged = outcomes.iter().filter(|o| !o.converged).count();
    let probability = successes as f64 / config.trials as f64;

    tracing::info!(
        n = config.problem.n,
        m = config.problem.m,
        s = config.problem.sparsity,
        estimator = estimator.name(),
        "p_recovery = {probability:.2}"
    );

    Ok(SweepPoint {
        n: config.problem.n,
        m: config.problem.m,
        sparsity: config.problem.sparsity,
        estimator: estimator.name().to_string(),
        trials: config.trials,
        successes,
        non_converged,
        probability,
    })
}

/// Recovery probability for each measurement count in `measurements`.
pub fn sweep(
    config: &RecoveryConfig,
    measurements: &[usize],
    estimator: &dyn Estimator,
) -> Result<Vec<SweepPoint>> {
    if measurements.is_empty() {
        return Err(PursuitError::InvalidConfig("sweep needs at least one measurement count".into()));
    }
    measurements
        .iter()
        .map(|&m| {
            let mut point_config = config.clone();
            point_config.problem.m = m;
            recovery_probability(&point_config, estimator)
        })
        .collect()
}
