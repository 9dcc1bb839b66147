//! Formatted terminal output for recover / sweep / compare runs.
//!
//! We keep formatting code in one place so:
//! - the pursuit code stays clean and testable
//! - output changes are localized

use crate::domain::{Comparison, EngineRun, SweepPoint};
use crate::experiment::RecoveryRun;
use crate::math::Support;

/// Summary of a single recovery.
pub fn format_recovery(run: &RecoveryRun, estimator: &str, seed: u64) -> String {
    let problem = &run.problem;
    let (m, n) = problem.dictionary.shape();
    let estimated: Support = run
        .estimate
        .x
        .iter()
        .enumerate()
        .filter(|(_, v)| **v != 0.0)
        .map(|(i, _)| i)
        .collect();

    let mut out = String::new();
    out.push_str("=== pursuit - sparse recovery ===\n");
    out.push_str(&format!(
        "Problem: n={n} m={m} k={} | seed={seed}\n",
        problem.support.len()
    ));
    out.push_str(&format!("Estimator: {estimator}\n"));
    out.push_str(&format!("True support     : {}\n", problem.support));
    out.push_str(&format!("Estimated support: {estimated}\n"));
    out.push_str(&format!(
        "Iterations: {} | converged: {}\n",
        run.outcome.iterations,
        yes_no(run.outcome.converged)
    ));
    out.push_str(&format!("Error ||x - x_hat||: {:.3e}\n", run.outcome.error));
    if !run.outcome.converged {
        out.push_str("Warning: estimator did not converge; treat the estimate as unreliable.\n");
    }
    out
}

/// Recovery-probability table.
pub fn format_sweep(points: &[SweepPoint]) -> String {
    let mut out = String::new();
    out.push_str(
        format!(
            "{:<10} {:>6} {:>6} {:>4} {:>8} {:>10} {:>14} {:>8}\n",
            "estimator", "n", "m", "s", "trials", "successes", "non-converged", "p"
        )
        .trim_end(),
    );
    out.push('\n');
    out.push_str(
        format!(
            "{:-<10} {:-<6} {:-<6} {:-<4} {:-<8} {:-<10} {:-<14} {:-<8}\n",
            "", "", "", "", "", "", "", ""
        )
        .trim_end(),
    );
    out.push('\n');

    for p in points {
        out.push_str(
            format!(
                "{:<10} {:>6} {:>6} {:>4} {:>8} {:>10} {:>14} {:>8.2}\n",
                truncate(&p.estimator, 10),
                p.n,
                p.m,
                p.sparsity,
                p.trials,
                p.successes,
                p.non_converged,
                p.probability
            )
            .trim_end(),
        );
        out.push('\n');
    }

    out
}

/// Side-by-side summary of an OMP vs look-ahead comparison.
pub fn format_comparison(cmp: &Comparison) -> String {
    let mut out = String::new();
    out.push_str("=== pursuit - OMP vs look-ahead ===\n");
    out.push_str(&format!(
        "Problem: n={} m={} k={} dist={} | seed={}\n",
        cmp.problem.n, cmp.problem.m, cmp.problem.sparsity, cmp.problem.distribution, cmp.seed
    ));
    out.push_str(&format!(
        "Look-ahead: delta={} branching={} max_iters={}\n",
        cmp.lookahead_options.delta, cmp.lookahead_options.branching, cmp.lookahead_options.max_iters
    ));
    out.push_str(&format!("True support: {}\n\n", cmp.true_support));

    out.push_str(&engine_line(&cmp.omp));
    out.push_str(&engine_line(&cmp.lookahead));
    out.push_str(&format!(
        "\nLook-ahead status: {:?} | backtracks: {} | evaluated supports: {}\n",
        cmp.lookahead_status,
        cmp.lookahead_trace.backtracks(),
        cmp.evaluated_supports
    ));
    out.push_str(&format!("OMP residues       : {}\n", fmt_vec(&cmp.omp.relative_residuals)));
    out.push_str(&format!(
        "Look-ahead residues: {}\n",
        fmt_vec(&cmp.lookahead.relative_residuals)
    ));
    out
}

fn engine_line(run: &EngineRun) -> String {
    format!(
        "{:<8} iters={:<4} converged={:<3} error={:.3e} l1={:.3} support={}\n",
        run.method.to_string(),
        run.iterations,
        yes_no(run.converged),
        run.error,
        run.coefficient_l1,
        run.support
    )
}

fn yes_no(v: bool) -> &'static str {
    if v { "yes" } else { "no" }
}

fn fmt_vec(v: &[f64]) -> String {
    let parts: Vec<String> = v.iter().map(|x| format!("{x:.3}")).collect();
    format!("[{}]", parts.join(", "))
}

fn truncate(s: &str, max: usize) -> String {
    if s.chars().count() <= max {
        return s.to_string();
    }
    let mut out = String::new();
    for (i, ch) in s.chars().enumerate() {
        if i + 1 >= max {
            break;
        }
        out.push(ch);
    }
    out.push('.');
    out
}
