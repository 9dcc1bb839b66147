//! Look-ahead pursuit with backtracking (LRT-OMP).
//!
//! The search walks over support sets starting from ∅. At every step it
//! scores the successors of the current support (a few one-atom extensions
//! plus the predecessor it came from), then lets the decision policy either
//! commit to the best extension or retreat to the smallest candidate. A
//! support abandoned through a retreat gets its score replaced by a large
//! sentinel so the search does not walk straight back into it.
//!
//! Stopping rule, checked at the top of every iteration:
//!
//! ```text
//! ||residue(Γ)|| < epsilon  AND  |Γ| < 2k
//! ```
//!
//! If the residual becomes small while `|Γ| >= 2k` the search keeps going and
//! ends at `max_iters` with `SearchStatus::IterationLimit`.

use nalgebra::{DMatrix, DVector};
use serde::Serialize;

use crate::error::{PursuitError, Result};
use crate::math::Support;
use crate::pursuit::context::SearchContext;
use crate::pursuit::omp::relative;
use crate::pursuit::policy::{Rule, decide};
use crate::pursuit::residue::{sparse_estimate, validate_problem};
use crate::pursuit::successors::successors;

#[derive(Debug, Clone, Serialize)]
pub struct LookaheadOptions {
    /// Spread threshold of the decision policy.
    pub delta: f64,
    /// Residual-norm stop threshold.
    pub epsilon: f64,
    pub max_iters: usize,
    /// Number of one-atom extensions proposed per step (P).
    pub branching: usize,
    /// Score assigned to a support abandoned by a backtrack.
    pub backtrack_penalty: f64,
    pub record_trace: bool,
    /// Emit one `debug` event per iteration.
    pub verbose: bool,
}

impl Default for LookaheadOptions {
    fn default() -> Self {
        Self {
            delta: 0.1,
            epsilon: 1e-6,
            max_iters: 200,
            branching: 2,
            backtrack_penalty: 100.0,
            record_trace: false,
            verbose: false,
        }
    }
}

impl LookaheadOptions {
    pub fn validate(&self) -> Result<()> {
        if !(self.delta.is_finite() && self.delta >= 0.0) {
            return Err(PursuitError::InvalidConfig(format!(
                "delta must be finite and >= 0, got {}",
                self.delta
            )));
        }
        if !(self.epsilon.is_finite() && self.epsilon >= 0.0) {
            return Err(PursuitError::InvalidConfig(format!(
                "epsilon must be finite and >= 0, got {}",
                self.epsilon
            )));
        }
        if self.branching == 0 {
            return Err(PursuitError::InvalidConfig("branching must be >= 1".into()));
        }
        if self.max_iters == 0 {
            return Err(PursuitError::InvalidConfig("max_iters must be >= 1".into()));
        }
        if !self.backtrack_penalty.is_finite() {
            return Err(PursuitError::InvalidConfig(
                "backtrack penalty must be finite".into(),
            ));
        }
        Ok(())
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum SearchStatus {
    /// Residual below epsilon with `|Γ| < 2k`.
    Converged,
    /// `max_iters` reached; the estimate is unreliable.
    IterationLimit,
    /// The current support had no successor at all.
    Stalled,
}

#[derive(Debug, Clone, Default, Serialize)]
pub struct LookaheadTrace {
    /// `||residue(Γ_i)|| / ||y||`, starting with 1.0 for ∅.
    pub relative_residuals: Vec<f64>,
    /// Support reached after each iteration.
    pub supports: Vec<Support>,
    pub spreads: Vec<f64>,
    pub rules: Vec<Rule>,
}

impl LookaheadTrace {
    pub fn backtracks(&self) -> usize {
        let mut prev = 0;
        let mut count = 0;
        for s in &self.supports {
            if s.len() < prev {
                count += 1;
            }
            prev = s.len();
        }
        count
    }
}

#[derive(Debug, Clone)]
pub struct LookaheadResult {
    pub estimate: DVector<f64>,
    pub support: Support,
    pub iterations: usize,
    pub residual_norm: f64,
    pub status: SearchStatus,
    /// Distinct supports whose residue was evaluated.
    pub evaluated_supports: usize,
    pub trace: Option<LookaheadTrace>,
}

impl LookaheadResult {
    pub fn converged(&self) -> bool {
        self.status == SearchStatus::Converged
    }
}

/// Recover a `sparsity`-sparse estimate with the look-ahead search.
///
/// Each call owns a fresh `SearchContext`; nothing is shared between calls.
pub fn lookahead_pursuit(
    dictionary: &DMatrix<f64>,
    observation: &DVector<f64>,
    sparsity: usize,
    opts: &LookaheadOptions,
) -> Result<LookaheadResult> {
    let mut ctx = SearchContext::new(observation);
    lookahead_pursuit_with(&mut ctx, dictionary, observation, sparsity, opts)
}

/// Same as [`lookahead_pursuit`] with a caller-provided context, reset on entry.
pub fn lookahead_pursuit_with(
    ctx: &mut SearchContext,
    dictionary: &DMatrix<f64>,
    observation: &DVector<f64>,
    sparsity: usize,
    opts: &LookaheadOptions,
) -> Result<LookaheadResult> {
    validate_problem(dictionary, observation)?;
    opts.validate()?;
    ctx.reset(observation);

    let y_norm = observation.norm();
    let card_cap = sparsity.saturating_mul(2);

    let mut trace = opts.record_trace.then(|| LookaheadTrace {
        relative_residuals: vec![1.0],
        ..LookaheadTrace::default()
    });

    let mut current = Support::empty();
    let mut iterations = 0;
    let status = loop {
        if ctx.residual_norm(dictionary, observation, &current) < opts.epsilon
            && current.len() < card_cap
        {
            break SearchStatus::Converged;
        }

        ctx.score(dictionary, observation, &current);
        let candidates: Vec<(Support, f64)> =
            successors(ctx, dictionary, observation, &current, opts.branching)
                .into_iter()
                .map(|s| {
                    let score = ctx.score(dictionary, observation, &s);
                    (s, score)
                })
                .collect();

        let Some(choice) = decide(&candidates, y_norm, opts.delta) else {
            tracing::warn!(support = %current, iterations, "look-ahead search has no successor");
            break SearchStatus::Stalled;
        };
        let next = candidates[choice.index].0.clone();

        ctx.record_predecessor(&next, &current);
        if next.len() < current.len() {
            ctx.penalize(&current, opts.backtrack_penalty);
        }

        if opts.verbose {
            let (verb, atoms) = if next.len() > current.len() {
                ("added", next.difference(&current))
            } else {
                ("removed", current.difference(&next))
            };
            tracing::debug!(
                iteration = iterations,
                spread = %format!("{:.2e}", choice.spread),
                rule = ?choice.rule,
                cardinality = next.len(),
                "{verb} {atoms:?}"
            );
        }

        let residual = ctx.residual_norm(dictionary, observation, &next);
        if let Some(trace) = trace.as_mut() {
            trace.relative_residuals.push(relative(residual, y_norm));
            trace.supports.push(next.clone());
            trace.spreads.push(choice.spread);
            trace.rules.push(choice.rule);
        }

        current = next;
        iterations += 1;

        if iterations >= opts.max_iters {
            tracing::warn!(
                iterations,
                cardinality = current.len(),
                residual_norm = residual,
                "look-ahead search hit the iteration limit"
            );
            break SearchStatus::IterationLimit;
        }
    };

    Ok(LookaheadResult {
        estimate: sparse_estimate(dictionary, observation, &current),
        residual_norm: ctx.residual_norm(dictionary, observation, &current),
        support: current,
        iterations,
        status,
        evaluated_supports: ctx.cached_supports(),
        trace,
    })
}
