//! Decision rule for the look-ahead search.
//!
//! The successors of Γ are compared through their scores. When the scores are
//! spread out (relative to `||y||`) the best one is clearly better and we
//! commit to it. When they are bunched together the evidence is weak, so we
//! take the smallest candidate instead, which is the predecessor whenever one
//! was proposed. This acts as a likelihood-ratio style test between "this
//! atom is clearly best" and "stay small".

use serde::Serialize;

use crate::math::Support;

/// Which branch of the decision rule picked the next support.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum Rule {
    /// Spread exceeded delta: minimum score.
    Greedy,
    /// Spread at or below delta: minimum cardinality.
    Conservative,
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Choice {
    /// Index into the candidate list.
    pub index: usize,
    pub spread: f64,
    pub rule: Rule,
}

/// `(max - min) / observation_norm` over `scores`; zero for a zero observation.
pub fn spread(scores: &[f64], observation_norm: f64) -> f64 {
    if scores.is_empty() || observation_norm <= 0.0 {
        return 0.0;
    }
    let max = scores.iter().copied().fold(f64::NEG_INFINITY, f64::max);
    let min = scores.iter().copied().fold(f64::INFINITY, f64::min);
    (max - min) / observation_norm
}

/// Pick one candidate. Returns `None` when there is nothing to choose from.
///
/// Ties go to the earliest candidate under both rules.
pub fn decide(candidates: &[(Support, f64)], observation_norm: f64, delta: f64) -> Option<Choice> {
    if candidates.is_empty() {
        return None;
    }
    let scores: Vec<f64> = candidates.iter().map(|(_, s)| *s).collect();
    let spread = spread(&scores, observation_norm);

    let (rule, index) = if spread > delta {
        (Rule::Greedy, first_min_by(candidates, |(_, s)| *s))
    } else {
        (Rule::Conservative, first_min_by(candidates, |(g, _)| g.len() as f64))
    };

    Some(Choice { index, spread, rule })
}

fn first_min_by<F>(candidates: &[(Support, f64)], key: F) -> usize
where
    F: Fn(&(Support, f64)) -> f64,
{
    let mut best = 0;
    let mut best_key = key(&candidates[0]);
    for (i, c) in candidates.iter().enumerate().skip(1) {
        let k = key(c);
        if k < best_key {
            best = i;
            best_key = k;
        }
    }
    best
}

#[cfg(test)]
mod tests {
    use super::*;

    fn boundary_candidates() -> Vec<(Support, f64)> {
        vec![(Support::from([1, 4]), 0.50), (Support::from([1]), 0.51)]
    }

    #[test]
    fn close_scores_choose_smallest_support() {
        let choice = decide(&boundary_candidates(), 1.0, 0.1).unwrap();
        assert!((choice.spread - 0.01).abs() < 1e-12);
        assert_eq!(choice.rule, Rule::Conservative);
        assert_eq!(choice.index, 1);
    }

    #[test]
    fn spread_above_delta_chooses_minimum_score() {
        let choice = decide(&boundary_candidates(), 1.0, 0.005).unwrap();
        assert_eq!(choice.rule, Rule::Greedy);
        assert_eq!(choice.index, 0);
    }

    #[test]
    fn spread_is_relative_to_observation_norm() {
        assert!((spread(&[1.0, 3.0, 2.0], 4.0) - 0.5).abs() < 1e-12);
        assert_eq!(spread(&[1.0, 3.0], 0.0), 0.0);
        assert_eq!(spread(&[], 1.0), 0.0);
    }

    #[test]
    fn ties_go_to_first_candidate() {
        let candidates = vec![
            (Support::from([0, 2]), 0.3),
            (Support::from([0, 5]), 0.3),
            (Support::from([0, 7]), 0.9),
        ];
        let greedy = decide(&candidates, 1.0, 0.1).unwrap();
        assert_eq!((greedy.rule, greedy.index), (Rule::Greedy, 0));

        let conservative = decide(&candidates, 1.0, 1.0).unwrap();
        assert_eq!((conservative.rule, conservative.index), (Rule::Conservative, 0));
    }

    #[test]
    fn empty_candidates_yield_no_choice() {
        assert!(decide(&[], 1.0, 0.1).is_none());
    }
}
