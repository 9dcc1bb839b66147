//! Orthogonal matching pursuit (baseline greedy pursuit).
//!
//! Each iteration adds the single atom most correlated with the current
//! residual, refits least squares over every chosen atom and recomputes the
//! residual. There is no backtracking; the support grows by exactly one atom
//! per iteration until the residual norm drops to `epsilon`.

use nalgebra::{DMatrix, DVector};
use serde::Serialize;

use crate::error::{PursuitError, Result};
use crate::math::Support;
use crate::pursuit::residue::{correlations, residue, sparse_estimate, validate_problem};
use crate::pursuit::successors::top_atoms;

#[derive(Debug, Clone, Serialize)]
pub struct OmpOptions {
    /// Stop once `||r||₂ <= epsilon`.
    pub epsilon: f64,
    /// Iteration cap. `None` means the number of measurements.
    pub max_iters: Option<usize>,
    /// Record relative residuals and correlation vectors.
    pub record_trace: bool,
}

impl Default for OmpOptions {
    fn default() -> Self {
        Self {
            epsilon: 1e-6,
            max_iters: None,
            record_trace: false,
        }
    }
}

#[derive(Debug, Clone, Default, Serialize)]
pub struct OmpTrace {
    /// `||r_i|| / ||y||`, starting with 1.0 for the empty support.
    pub relative_residuals: Vec<f64>,
    /// `|Aᵀ r|` computed at each iteration before the atom is chosen.
    pub correlations: Vec<Vec<f64>>,
}

#[derive(Debug, Clone)]
pub struct OmpResult {
    pub estimate: DVector<f64>,
    /// Atom indices in the order they were chosen.
    pub selected: Vec<usize>,
    pub iterations: usize,
    pub residual_norm: f64,
    pub converged: bool,
    pub trace: Option<OmpTrace>,
}

impl OmpResult {
    pub fn support(&self) -> Support {
        self.selected.iter().copied().collect()
    }
}

/// Recover a sparse estimate of `x` from `observation = dictionary · x` with OMP.
pub fn orthogonal_matching_pursuit(
    dictionary: &DMatrix<f64>,
    observation: &DVector<f64>,
    opts: &OmpOptions,
) -> Result<OmpResult> {
    validate_problem(dictionary, observation)?;
    if !(opts.epsilon.is_finite() && opts.epsilon >= 0.0) {
        return Err(PursuitError::InvalidConfig(format!(
            "epsilon must be finite and >= 0, got {}",
            opts.epsilon
        )));
    }

    let max_iters = opts
        .max_iters
        .unwrap_or(dictionary.nrows())
        .min(dictionary.ncols());
    let y_norm = observation.norm();

    let mut trace = opts.record_trace.then(|| OmpTrace {
        relative_residuals: vec![1.0],
        correlations: Vec::new(),
    });

    let mut support = Support::empty();
    let mut selected = Vec::new();
    let mut r = observation.clone();
    let mut iterations = 0;

    while r.norm() > opts.epsilon && iterations < max_iters {
        let h = correlations(dictionary, &r);
        let Some(&best) = top_atoms(&h, &support, 1).first() else {
            break;
        };

        selected.push(best);
        support = support.with(best);
        r = residue(dictionary, observation, &support);
        iterations += 1;

        if let Some(trace) = trace.as_mut() {
            trace.relative_residuals.push(relative(r.norm(), y_norm));
            trace.correlations.push(h.iter().copied().collect());
        }
    }

    let residual_norm = r.norm();
    let converged = residual_norm <= opts.epsilon;
    if !converged {
        tracing::debug!(
            iterations,
            residual_norm,
            epsilon = opts.epsilon,
            "OMP stopped before reaching epsilon"
        );
    }

    Ok(OmpResult {
        estimate: sparse_estimate(dictionary, observation, &support),
        selected,
        iterations,
        residual_norm,
        converged,
        trace,
    })
}

pub(crate) fn relative(value: f64, reference: f64) -> f64 {
    if reference > 0.0 { value / reference } else { 0.0 }
}
