//! Shared domain types.
//!
//! These types are intentionally kept lightweight and serializable so they can be:
//!
//! - built from CLI flags
//! - recorded verbatim next to exported results
//! - reloaded later for plotting or comparisons

use std::fmt;
use std::str::FromStr;

use chrono::{DateTime, Utc};
use clap::ValueEnum;
use serde::{Deserialize, Serialize};

use crate::error::{PursuitError, Result};
use crate::math::Support;
use crate::pursuit::{LookaheadOptions, LookaheadTrace, Method, OmpTrace, SearchStatus};

/// Amplitude law for the nonzero entries of a generated sparse signal.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, ValueEnum)]
#[serde(rename_all = "lowercase")]
pub enum AmplitudeDistribution {
    /// Standard normal amplitudes.
    Normal,
    /// Random sign times a magnitude uniform on `[1, 2]`.
    Uniform,
    /// Random sign, unit magnitude.
    Binary,
}

impl AmplitudeDistribution {
    pub const ALL: [AmplitudeDistribution; 3] = [
        AmplitudeDistribution::Normal,
        AmplitudeDistribution::Uniform,
        AmplitudeDistribution::Binary,
    ];

    pub fn display_name(self) -> &'static str {
        match self {
            AmplitudeDistribution::Normal => "normal",
            AmplitudeDistribution::Uniform => "uniform",
            AmplitudeDistribution::Binary => "binary",
        }
    }

    /// Decision threshold that works well for this amplitude law.
    ///
    /// Gaussian amplitudes often include near-zero entries whose atoms barely
    /// move the residual, so the look-ahead search needs a small threshold.
    /// Amplitudes bounded away from zero tolerate a larger one.
    pub fn default_delta(self) -> f64 {
        match self {
            AmplitudeDistribution::Normal => 0.015,
            AmplitudeDistribution::Uniform | AmplitudeDistribution::Binary => 0.1,
        }
    }
}

impl fmt::Display for AmplitudeDistribution {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.display_name())
    }
}

impl FromStr for AmplitudeDistribution {
    type Err = PursuitError;

    fn from_str(s: &str) -> Result<Self> {
        AmplitudeDistribution::ALL
            .into_iter()
            .find(|d| d.display_name() == s)
            .ok_or_else(|| PursuitError::UnknownOption {
                kind: "distribution",
                value: s.to_string(),
                expected: "normal, uniform, binary",
            })
    }
}

/// Shape of a synthetic recovery problem.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ProblemConfig {
    /// Signal length (dictionary columns).
    pub n: usize,
    /// Number of measurements (dictionary rows).
    pub m: usize,
    /// Nonzero entries in the true signal.
    pub sparsity: usize,
    pub distribution: AmplitudeDistribution,
    /// Standard deviation of additive Gaussian measurement noise.
    pub noise_std: f64,
}

impl ProblemConfig {
    pub fn validate(&self) -> Result<()> {
        if self.n == 0 {
            return Err(PursuitError::InvalidConfig("signal length n must be > 0".into()));
        }
        if self.m == 0 {
            return Err(PursuitError::InvalidConfig("measurement count m must be > 0".into()));
        }
        if self.sparsity > self.n {
            return Err(PursuitError::InvalidConfig(format!(
                "sparsity {} exceeds signal length {}",
                self.sparsity, self.n
            )));
        }
        if !(self.noise_std.is_finite() && self.noise_std >= 0.0) {
            return Err(PursuitError::InvalidConfig(format!(
                "noise std must be finite and >= 0, got {}",
                self.noise_std
            )));
        }
        Ok(())
    }
}

/// Recovery probability for one measurement count.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SweepPoint {
    pub n: usize,
    pub m: usize,
    pub sparsity: usize,
    /// Estimator name (`omp`, `lrt-omp`, or an injected solver).
    pub estimator: String,
    pub trials: usize,
    pub successes: usize,
    /// Trials where the estimator reported a degraded (non-converged) result.
    pub non_converged: usize,
    pub probability: f64,
}

/// Per-iteration trace of one engine, as written to comparison exports.
#[derive(Debug, Clone, Serialize)]
pub struct EngineRun {
    pub method: Method,
    pub error: f64,
    pub iterations: usize,
    pub converged: bool,
    pub support: Support,
    /// ℓ1 norm of the least-squares coefficients on the final support.
    pub coefficient_l1: f64,
    pub relative_residuals: Vec<f64>,
}

/// OMP vs look-ahead on the same problem (also the JSON export schema).
#[derive(Debug, Clone, Serialize)]
pub struct Comparison {
    pub tool: String,
    pub generated_at: DateTime<Utc>,
    pub problem: ProblemConfig,
    pub seed: u64,
    pub true_support: Support,
    pub lookahead_options: LookaheadOptions,
    pub omp: EngineRun,
    pub lookahead: EngineRun,
    pub lookahead_status: SearchStatus,
    /// Distinct supports whose residue the look-ahead search evaluated.
    pub evaluated_supports: usize,
    pub lookahead_trace: LookaheadTrace,
    pub omp_trace: OmpTrace,
}
