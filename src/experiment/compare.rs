//! Side-by-side run of OMP and the look-ahead search on one problem.

use chrono::Utc;

use crate::data::generate_problem;
use crate::domain::{Comparison, EngineRun, ProblemConfig};
use crate::error::Result;
use crate::pursuit::{
    LookaheadOptions, Method, OmpOptions, coefficient_l1_norm, lookahead_pursuit,
    orthogonal_matching_pursuit,
};

#[derive(Debug, Clone)]
pub struct CompareConfig {
    pub problem: ProblemConfig,
    pub seed: u64,
    pub omp: OmpOptions,
    pub lookahead: LookaheadOptions,
}

/// Run both engines with traces enabled on the problem generated from `config.seed`.
pub fn compare(config: &CompareConfig) -> Result<Comparison> {
    let problem = generate_problem(&config.problem, config.seed)?;
    let a = &problem.dictionary;
    let y = &problem.observation;

    let omp_opts = OmpOptions {
        record_trace: true,
        ..config.omp.clone()
    };
    let omp = orthogonal_matching_pursuit(a, y, &omp_opts)?;

    let lookahead_opts = LookaheadOptions {
        record_trace: true,
        ..config.lookahead.clone()
    };
    let lookahead = lookahead_pursuit(a, y, config.problem.sparsity, &lookahead_opts)?;

    let omp_support = omp.support();
    let omp_trace = omp.trace.clone().unwrap_or_default();
    let lookahead_trace = lookahead.trace.clone().unwrap_or_default();

    Ok(Comparison {
        tool: "pursuit".to_string(),
        generated_at: Utc::now(),
        problem: config.problem.clone(),
        seed: config.seed,
        true_support: problem.support.clone(),
        lookahead_options: lookahead_opts,
        omp: EngineRun {
            method: Method::Omp,
            error: (&problem.signal - &omp.estimate).norm(),
            iterations: omp.iterations,
            converged: omp.converged,
            coefficient_l1: coefficient_l1_norm(a, y, &omp_support),
            support: omp_support,
            relative_residuals: omp_trace.relative_residuals.clone(),
        },
        lookahead: EngineRun {
            method: Method::LrtOmp,
            error: (&problem.signal - &lookahead.estimate).norm(),
            iterations: lookahead.iterations,
            converged: lookahead.converged(),
            support: lookahead.support.clone(),
            coefficient_l1: coefficient_l1_norm(a, y, &lookahead.support),
            relative_residuals: lookahead_trace.relative_residuals.clone(),
        },
        lookahead_status: lookahead.status,
        evaluated_supports: lookahead.evaluated_supports,
        lookahead_trace,
        omp_trace,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::AmplitudeDistribution;

    fn config() -> CompareConfig {
        CompareConfig {
            problem: ProblemConfig {
                n: 64,
                m: 24,
                sparsity: 3,
                distribution: AmplitudeDistribution::Uniform,
                noise_std: 0.0,
            },
            seed: 3,
            omp: OmpOptions::default(),
            lookahead: LookaheadOptions {
                delta: 0.18,
                ..LookaheadOptions::default()
            },
        }
    }

    #[test]
    fn both_traces_start_at_one() {
        let cmp = compare(&config()).unwrap();
        assert_eq!(cmp.omp.relative_residuals[0], 1.0);
        assert_eq!(cmp.lookahead.relative_residuals[0], 1.0);
        assert_eq!(cmp.omp.relative_residuals.len(), cmp.omp.iterations + 1);
        assert_eq!(cmp.lookahead_trace.supports.len(), cmp.lookahead.iterations);
        assert_eq!(cmp.true_support.len(), 3);
        assert!(cmp.lookahead_options.record_trace);
    }

    #[test]
    fn comparison_serializes_to_json() {
        let cmp = compare(&config()).unwrap();
        let json = serde_json::to_value(&cmp).unwrap();
        assert_eq!(json["tool"], "pursuit");
        assert_eq!(json["omp"]["method"], "omp");
        assert_eq!(json["lookahead"]["method"], "lrt-omp");
        assert!(json["lookahead_trace"]["supports"].is_array());
        assert!(json["evaluated_supports"].as_u64().unwrap() > 0);
        assert!(json["omp"]["coefficient_l1"].as_f64().unwrap() > 0.0);
    }

    #[test]
    fn exact_recovery_reports_the_signal_l1_norm() {
        let cmp = compare(&config()).unwrap();
        let problem = generate_problem(&config().problem, config().seed).unwrap();
        let l1 = problem.signal.lp_norm(1);
        for run in [&cmp.omp, &cmp.lookahead] {
            if run.error < 1e-8 {
                assert!(
                    (run.coefficient_l1 - l1).abs() < 1e-6,
                    "{}: {}",
                    run.method,
                    run.coefficient_l1
                );
            }
        }
        // ∅ plus the supports proposed from it.
        assert!(cmp.evaluated_supports > 1);

        let txt = crate::report::format_comparison(&cmp);
        assert!(txt.contains(&format!("evaluated supports: {}", cmp.evaluated_supports)));
        assert!(txt.contains("l1="));
    }
}
