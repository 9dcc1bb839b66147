//! Per-call search state: residue cache, score cache and predecessor trail.
//!
//! A `SearchContext` belongs to exactly one top-level search call. It is
//! created (or reset) at the start of the call and dropped at the end, so no
//! entry can leak from one search into the next. Independent searches each
//! own their context and can run concurrently.

use std::collections::HashMap;
use std::collections::hash_map::Entry;

use nalgebra::{DMatrix, DVector};

use crate::math::Support;
use crate::pursuit::residue::residue;

#[derive(Debug, Clone)]
pub struct SearchContext {
    residues: HashMap<Support, DVector<f64>>,
    scores: HashMap<Support, f64>,
    predecessors: HashMap<Support, Support>,
}

impl SearchContext {
    /// Fresh context rooted at the empty support, which maps to `observation`.
    pub fn new(observation: &DVector<f64>) -> Self {
        let mut ctx = Self {
            residues: HashMap::new(),
            scores: HashMap::new(),
            predecessors: HashMap::new(),
        };
        ctx.residues.insert(Support::empty(), observation.clone());
        ctx
    }

    /// Drop every cached entry and reseed the empty support.
    pub fn reset(&mut self, observation: &DVector<f64>) {
        self.residues.clear();
        self.scores.clear();
        self.predecessors.clear();
        self.residues.insert(Support::empty(), observation.clone());
    }

    /// Residual for `support`, computed on first access.
    pub fn residue(
        &mut self,
        dictionary: &DMatrix<f64>,
        observation: &DVector<f64>,
        support: &Support,
    ) -> &DVector<f64> {
        self.residues
            .entry(support.clone())
            .or_insert_with(|| residue(dictionary, observation, support))
    }

    /// `||residue(support)||₂`, bypassing any penalty stored in the score cache.
    pub fn residual_norm(
        &mut self,
        dictionary: &DMatrix<f64>,
        observation: &DVector<f64>,
        support: &Support,
    ) -> f64 {
        self.residue(dictionary, observation, support).norm()
    }

    /// Score used by the decision policy. Defaults to the residual norm.
    pub fn score(
        &mut self,
        dictionary: &DMatrix<f64>,
        observation: &DVector<f64>,
        support: &Support,
    ) -> f64 {
        if let Some(score) = self.scores.get(support) {
            return *score;
        }
        let score = self.residual_norm(dictionary, observation, support);
        self.scores.insert(support.clone(), score);
        score
    }

    /// Overwrite the score of an abandoned support so it ranks last if revisited.
    pub fn penalize(&mut self, support: &Support, sentinel: f64) {
        self.scores.insert(support.clone(), sentinel);
    }

    pub fn predecessor(&self, support: &Support) -> Option<&Support> {
        self.predecessors.get(support)
    }

    /// Record `from` as the predecessor of `next` the first time `next` is reached.
    ///
    /// Returns `true` when a new entry was written. The empty support is the
    /// root of every search and never gets a predecessor, even when the
    /// search retreats to it.
    pub fn record_predecessor(&mut self, next: &Support, from: &Support) -> bool {
        if next.is_empty() {
            return false;
        }
        match self.predecessors.entry(next.clone()) {
            Entry::Occupied(_) => false,
            Entry::Vacant(slot) => {
                slot.insert(from.clone());
                true
            }
        }
    }

    pub fn cached_supports(&self) -> usize {
        self.residues.len()
    }

    pub fn is_cached(&self, support: &Support) -> bool {
        self.residues.contains_key(support)
    }
}
