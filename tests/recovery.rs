use nalgebra::{DMatrix, DVector};

use sparse_pursuit::data::generate_problem;
use sparse_pursuit::domain::{AmplitudeDistribution, ProblemConfig};
use sparse_pursuit::error::{PursuitError, Result};
use sparse_pursuit::experiment::{
    CompareConfig, RecoveryConfig, SUCCESS_TOLERANCE, compare, recovery_probability, run_trial,
};
use sparse_pursuit::math::Support;
use sparse_pursuit::pursuit::{
    BaselineSolver, Estimate, Estimator, External, LookaheadOptions, Method, OmpOptions, Rule,
    SearchStatus, lookahead_pursuit, orthogonal_matching_pursuit,
};

fn identity_problem() -> (DMatrix<f64>, DVector<f64>) {
    let a = DMatrix::<f64>::identity(8, 8);
    let mut y = DVector::zeros(8);
    y[3] = 3.0;
    y[6] = -2.0;
    (a, y)
}

#[test]
fn identity_dictionary_is_recovered_by_both_engines() {
    let (a, y) = identity_problem();

    let omp = orthogonal_matching_pursuit(&a, &y, &OmpOptions::default()).unwrap();
    assert_eq!(omp.selected, vec![3, 6]);
    assert_eq!(omp.iterations, 2);
    assert!(omp.converged);

    let opts = LookaheadOptions {
        record_trace: true,
        ..LookaheadOptions::default()
    };
    let la = lookahead_pursuit(&a, &y, 2, &opts).unwrap();
    assert_eq!(la.status, SearchStatus::Converged);
    assert_eq!(la.support, Support::from([3, 6]));
    assert_eq!(la.iterations, 2);
    assert!((la.estimate.clone() - y.clone()).norm() < 1e-12);

    let trace = la.trace.expect("trace requested");
    assert_eq!(trace.relative_residuals.first(), Some(&1.0));
    assert_eq!(trace.rules, vec![Rule::Greedy, Rule::Greedy]);
    assert_eq!(trace.backtracks(), 0);
}

#[test]
fn lookahead_recovers_seeded_problems_with_enough_measurements() {
    let config = RecoveryConfig {
        problem: ProblemConfig {
            n: 64,
            m: 32,
            sparsity: 3,
            distribution: AmplitudeDistribution::Uniform,
            noise_std: 0.0,
        },
        trials: 20,
        seed: 7,
        success_tolerance: SUCCESS_TOLERANCE,
    };
    let estimator = Method::LrtOmp.estimator(&OmpOptions::default(), &LookaheadOptions::default());
    let point = recovery_probability(&config, estimator.as_ref()).unwrap();

    assert_eq!(point.trials, 20);
    assert_eq!(point.m, 32);
    assert_eq!(point.estimator, "lrt-omp");
    assert!(point.probability >= 0.8, "probability {}", point.probability);
}

#[test]
fn unreachable_sparsity_terminates_with_bounded_support() {
    let problem = generate_problem(
        &ProblemConfig {
            n: 20,
            m: 5,
            sparsity: 10,
            distribution: AmplitudeDistribution::Normal,
            noise_std: 0.0,
        },
        3,
    )
    .unwrap();

    let opts = LookaheadOptions {
        max_iters: 50,
        ..LookaheadOptions::default()
    };
    let result = lookahead_pursuit(&problem.dictionary, &problem.observation, 10, &opts).unwrap();
    assert!(result.iterations <= 50);
    assert!(result.support.len() <= 5);
    assert!(result.estimate.iter().all(|v| v.is_finite()));
}

struct OmpBaseline;

impl BaselineSolver for OmpBaseline {
    fn name(&self) -> &str {
        "omp-baseline"
    }

    fn solve(
        &self,
        dictionary: &DMatrix<f64>,
        observation: &DVector<f64>,
        _sparsity: usize,
        iteration_budget: usize,
    ) -> Result<Estimate> {
        let opts = OmpOptions {
            max_iters: Some(iteration_budget),
            ..OmpOptions::default()
        };
        let result = orthogonal_matching_pursuit(dictionary, observation, &opts)?;
        Ok(Estimate {
            x: result.estimate,
            converged: result.converged,
            iterations: result.iterations,
        })
    }
}

struct Truncating;

impl BaselineSolver for Truncating {
    fn name(&self) -> &str {
        "truncating"
    }

    fn solve(&self, _: &DMatrix<f64>, _: &DVector<f64>, _: usize, _: usize) -> Result<Estimate> {
        Ok(Estimate {
            x: DVector::zeros(1),
            converged: true,
            iterations: 0,
        })
    }
}

#[test]
fn external_solvers_plug_into_the_trial_driver() {
    let (a, y) = identity_problem();
    let problem = sparse_pursuit::data::Problem {
        dictionary: a,
        signal: y.clone(),
        observation: y,
        support: Support::from([3, 6]),
    };

    let external = External::new(OmpBaseline, 8);
    assert_eq!(external.name(), "omp-baseline");
    let (_, outcome) = run_trial(&problem, &external).unwrap();
    assert!(outcome.error < 1e-12);
    assert!(outcome.converged);
    assert_eq!(outcome.iterations, 2);

    let err = run_trial(&problem, &External::new(Truncating, 8)).unwrap_err();
    assert!(matches!(err, PursuitError::Solver { .. }));
}

#[test]
fn unknown_names_are_rejected() {
    assert!(matches!(
        "lasso".parse::<Method>(),
        Err(PursuitError::UnknownOption { .. })
    ));
    assert!(matches!(
        "cauchy".parse::<AmplitudeDistribution>(),
        Err(PursuitError::UnknownOption { .. })
    ));
    assert_eq!("lrt-omp".parse::<Method>().unwrap(), Method::LrtOmp);
}

#[test]
fn comparison_serializes_traces_for_both_engines() {
    let config = CompareConfig {
        problem: ProblemConfig {
            n: 40,
            m: 20,
            sparsity: 3,
            distribution: AmplitudeDistribution::Binary,
            noise_std: 0.0,
        },
        seed: 5,
        omp: OmpOptions::default(),
        lookahead: LookaheadOptions::default(),
    };
    let cmp = compare(&config).unwrap();
    assert_eq!(cmp.seed, 5);
    assert_eq!(cmp.true_support.len(), 3);
    assert_eq!(cmp.omp.relative_residuals.first(), Some(&1.0));
    assert_eq!(cmp.lookahead.relative_residuals.first(), Some(&1.0));

    let json = serde_json::to_value(&cmp).unwrap();
    assert!(json["lookahead_trace"]["supports"].is_array());
    assert!(json["omp_trace"]["relative_residuals"].is_array());
    assert_eq!(json["problem"]["distribution"], "binary");
}
