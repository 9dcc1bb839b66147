//! Successor generation for the look-ahead search.
//!
//! From a support Γ we propose `branching` larger supports, each adding one of
//! the atoms most correlated with Γ's residual. When Γ was reached from a
//! smaller support, that predecessor is proposed too, which is how the search
//! expresses a backtrack.

use std::cmp::Ordering;

use nalgebra::{DMatrix, DVector};

use crate::math::Support;
use crate::pursuit::context::SearchContext;
use crate::pursuit::residue::correlations;

/// Candidate next supports for `support`, in proposal order.
///
/// Growth candidates come first, sorted by decreasing correlation magnitude
/// (lower atom index first on ties). The predecessor, if any, comes last.
/// No growth is proposed once `|Γ| >= m`.
pub fn successors(
    ctx: &mut SearchContext,
    dictionary: &DMatrix<f64>,
    observation: &DVector<f64>,
    support: &Support,
    branching: usize,
) -> Vec<Support> {
    let m = observation.len();
    let mut out = Vec::with_capacity(branching + 1);

    if support.len() < m {
        let residual = ctx.residue(dictionary, observation, support);
        for idx in top_atoms(&correlations(dictionary, residual), support, branching) {
            out.push(support.with(idx));
        }
    }

    if let Some(parent) = ctx.predecessor(support) {
        out.push(parent.clone());
    }

    out
}

/// Indices of the `count` largest magnitudes in `scores`, skipping atoms already in `exclude`.
pub fn top_atoms(scores: &DVector<f64>, exclude: &Support, count: usize) -> Vec<usize> {
    let mut ranked: Vec<(usize, f64)> = scores
        .iter()
        .copied()
        .enumerate()
        .filter(|(idx, _)| !exclude.contains(*idx))
        .collect();
    // Stable sort keeps ascending index order among equal magnitudes.
    ranked.sort_by(|a, b| b.1.partial_cmp(&a.1).unwrap_or(Ordering::Equal));
    ranked.into_iter().take(count).map(|(idx, _)| idx).collect()
}
