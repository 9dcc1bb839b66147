//! Uniform estimator contract over the pursuit variants.
//!
//! Experiment drivers only see `Estimator`: dictionary, observation and target
//! sparsity in, estimate out. New variants plug in by implementing the trait.
//! A third-party solver can be injected through `BaselineSolver` without the
//! crate depending on it.

use std::fmt;
use std::str::FromStr;

use clap::ValueEnum;
use nalgebra::{DMatrix, DVector};
use serde::{Deserialize, Serialize};

use crate::error::{PursuitError, Result};
use crate::pursuit::lookahead::{LookaheadOptions, lookahead_pursuit};
use crate::pursuit::omp::{OmpOptions, orthogonal_matching_pursuit};

/// Output of any estimator.
#[derive(Debug, Clone)]
pub struct Estimate {
    pub x: DVector<f64>,
    /// `false` for a degraded result (iteration cap hit, stalled search).
    pub converged: bool,
    pub iterations: usize,
}

pub trait Estimator: Send + Sync {
    fn name(&self) -> &str;

    fn estimate(
        &self,
        dictionary: &DMatrix<f64>,
        observation: &DVector<f64>,
        sparsity: usize,
    ) -> Result<Estimate>;
}

/// Built-in pursuit variants selectable by name.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, ValueEnum)]
#[serde(rename_all = "kebab-case")]
pub enum Method {
    /// Orthogonal matching pursuit.
    Omp,
    /// Look-ahead pursuit with backtracking.
    LrtOmp,
}

impl Method {
    pub const ALL: [Method; 2] = [Method::Omp, Method::LrtOmp];

    pub fn display_name(self) -> &'static str {
        match self {
            Method::Omp => "omp",
            Method::LrtOmp => "lrt-omp",
        }
    }

    pub fn estimator(self, omp: &OmpOptions, lookahead: &LookaheadOptions) -> Box<dyn Estimator> {
        match self {
            Method::Omp => Box::new(Omp(omp.clone())),
            Method::LrtOmp => Box::new(LookaheadOmp(lookahead.clone())),
        }
    }
}

impl fmt::Display for Method {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.display_name())
    }
}

impl FromStr for Method {
    type Err = PursuitError;

    fn from_str(s: &str) -> Result<Self> {
        Method::ALL
            .into_iter()
            .find(|m| m.display_name() == s)
            .ok_or_else(|| PursuitError::UnknownOption {
                kind: "method",
                value: s.to_string(),
                expected: "omp, lrt-omp",
            })
    }
}

/// OMP ignores the target sparsity; it runs until the residual is below epsilon.
#[derive(Debug, Clone, Default)]
pub struct Omp(pub OmpOptions);

impl Estimator for Omp {
    fn name(&self) -> &str {
        "omp"
    }

    fn estimate(
        &self,
        dictionary: &DMatrix<f64>,
        observation: &DVector<f64>,
        _sparsity: usize,
    ) -> Result<Estimate> {
        let result = orthogonal_matching_pursuit(dictionary, observation, &self.0)?;
        Ok(Estimate {
            x: result.estimate,
            converged: result.converged,
            iterations: result.iterations,
        })
    }
}

#[derive(Debug, Clone, Default)]
pub struct LookaheadOmp(pub LookaheadOptions);

impl Estimator for LookaheadOmp {
    fn name(&self) -> &str {
        "lrt-omp"
    }

    fn estimate(
        &self,
        dictionary: &DMatrix<f64>,
        observation: &DVector<f64>,
        sparsity: usize,
    ) -> Result<Estimate> {
        let result = lookahead_pursuit(dictionary, observation, sparsity, &self.0)?;
        Ok(Estimate {
            converged: result.converged(),
            iterations: result.iterations,
            x: result.estimate,
        })
    }
}

/// A black-box sparse solver supplied by the caller (e.g. an A* search).
///
/// The solver reports its own convergence flag and iteration count; `External`
/// passes them through unchanged.
pub trait BaselineSolver: Send + Sync {
    fn name(&self) -> &str;

    fn solve(
        &self,
        dictionary: &DMatrix<f64>,
        observation: &DVector<f64>,
        sparsity: usize,
        iteration_budget: usize,
    ) -> Result<Estimate>;
}

/// Adapts a `BaselineSolver` to the `Estimator` contract.
pub struct External<S> {
    solver: S,
    iteration_budget: usize,
}

impl<S: BaselineSolver> External<S> {
    pub fn new(solver: S, iteration_budget: usize) -> Self {
        Self {
            solver,
            iteration_budget,
        }
    }
}

impl<S: BaselineSolver> Estimator for External<S> {
    fn name(&self) -> &str {
        self.solver.name()
    }

    fn estimate(
        &self,
        dictionary: &DMatrix<f64>,
        observation: &DVector<f64>,
        sparsity: usize,
    ) -> Result<Estimate> {
        let estimate = self
            .solver
            .solve(dictionary, observation, sparsity, self.iteration_budget)?;
        if estimate.x.len() != dictionary.ncols() {
            return Err(PursuitError::Solver {
                solver: self.solver.name().to_string(),
                message: format!(
                    "returned {} coefficients for a dictionary with {} atoms",
                    estimate.x.len(),
                    dictionary.ncols()
                ),
            });
        }
        Ok(estimate)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    struct Oracle(DVector<f64>);

    impl BaselineSolver for Oracle {
        fn name(&self) -> &str {
            "oracle"
        }

        fn solve(
            &self,
            _dictionary: &DMatrix<f64>,
            _observation: &DVector<f64>,
            _sparsity: usize,
            iteration_budget: usize,
        ) -> Result<Estimate> {
            Ok(Estimate {
                x: self.0.clone(),
                converged: iteration_budget >= 10,
                iterations: iteration_budget.min(10),
            })
        }
    }

    fn two_sparse() -> (DMatrix<f64>, DVector<f64>, DVector<f64>) {
        let a = DMatrix::<f64>::identity(6, 6);
        let mut x = DVector::zeros(6);
        x[1] = 1.0;
        x[4] = -1.5;
        let y = &a * &x;
        (a, x, y)
    }

    #[test]
    fn method_names_round_trip_and_unknown_names_fail() {
        assert_eq!("omp".parse::<Method>().unwrap(), Method::Omp);
        assert_eq!("lrt-omp".parse::<Method>().unwrap(), Method::LrtOmp);
        assert_eq!(Method::LrtOmp.to_string(), "lrt-omp");

        let err = "astar".parse::<Method>().unwrap_err();
        assert!(matches!(err, PursuitError::UnknownOption { kind: "method", .. }));
    }

    #[test]
    fn every_method_recovers_through_the_trait() {
        let (a, x, y) = two_sparse();
        for method in Method::ALL {
            let est = method.estimator(&OmpOptions::default(), &LookaheadOptions::default());
            let out = est.estimate(&a, &y, 2).unwrap();
            assert!(out.converged, "{method} did not converge");
            assert!((&out.x - &x).norm() < 1e-6, "{method} error too large");
        }
    }

    #[test]
    fn external_solver_is_wrapped() {
        let (a, x, y) = two_sparse();
        let est = External::new(Oracle(x.clone()), 100);
        assert_eq!(est.name(), "oracle");
        let out = est.estimate(&a, &y, 2).unwrap();
        assert_eq!(out.x, x);
        assert!(out.converged);
        assert_eq!(out.iterations, 10);
    }

    #[test]
    fn external_solver_reports_its_own_convergence() {
        let (a, x, y) = two_sparse();
        let out = External::new(Oracle(x), 4).estimate(&a, &y, 2).unwrap();
        assert!(!out.converged);
        assert_eq!(out.iterations, 4);
    }

    #[test]
    fn external_solver_with_wrong_length_is_rejected() {
        let (a, _, y) = two_sparse();
        let est = External::new(Oracle(DVector::zeros(3)), 100);
        assert!(matches!(
            est.estimate(&a, &y, 2),
            Err(PursuitError::Solver { .. })
        ));
    }
}
