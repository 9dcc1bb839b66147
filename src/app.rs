//! Top-level application orchestration.
//!
//! `src/main.rs` is intentionally tiny; this module is the "real main" that:
//! - parses CLI arguments
//! - installs the log subscriber
//! - generates seeded problems and runs the selected estimator
//! - prints reports/plots
//! - writes optional exports

use clap::Parser;
use tracing::Level;
use tracing_subscriber::FmtSubscriber;

use crate::cli::{Cli, Command, CompareArgs, ProblemArgs, RecoverArgs, SearchArgs, SweepArgs};
use crate::domain::ProblemConfig;
use crate::error::AppError;
use crate::experiment::{CompareConfig, RecoveryConfig, SUCCESS_TOLERANCE};
use crate::plot::Series;
use crate::pursuit::{LookaheadOptions, OmpOptions};

/// Entry point for the `pursuit` binary.
pub fn run() -> Result<(), AppError> {
    let cli = Cli::parse();
    init_logging(cli.verbose)?;

    match cli.command {
        Command::Recover(args) => handle_recover(args, cli.verbose),
        Command::Sweep(args) => handle_sweep(args, cli.verbose),
        Command::Compare(args) => handle_compare(args, cli.verbose),
    }
}

fn init_logging(verbose: u8) -> Result<(), AppError> {
    let level = match verbose {
        0 => Level::WARN,
        1 => Level::INFO,
        _ => Level::DEBUG,
    };
    let subscriber = FmtSubscriber::builder()
        .with_max_level(level)
        .with_target(false)
        .with_writer(std::io::stderr)
        .finish();
    tracing::subscriber::set_global_default(subscriber)
        .map_err(|e| AppError::new(1, format!("Failed to install log subscriber: {e}")))
}

fn handle_recover(args: RecoverArgs, verbose: u8) -> Result<(), AppError> {
    let problem = problem_config_from_args(&args.problem);
    let omp = omp_options_from_args(&args.search);
    let lookahead = lookahead_options_from_args(&args.search, &args.problem, verbose);
    let estimator = args.method.estimator(&omp, &lookahead);

    let run = crate::experiment::recover(&problem, args.problem.seed, estimator.as_ref())?;
    println!(
        "{}",
        crate::report::format_recovery(&run, estimator.name(), args.problem.seed)
    );
    Ok(())
}

fn handle_sweep(args: SweepArgs, verbose: u8) -> Result<(), AppError> {
    let config = recovery_config_from_args(&args);
    let measurements = measurement_counts(&args)?;
    let omp = omp_options_from_args(&args.search);
    let lookahead = lookahead_options_from_args(&args.search, &args.problem, verbose);
    let estimator = args.method.estimator(&omp, &lookahead);

    let points = crate::experiment::sweep(&config, &measurements, estimator.as_ref())?;
    println!("{}", crate::report::format_sweep(&points));

    if let Some(path) = &args.export {
        crate::io::write_sweep_csv(path, &points)?;
    }
    Ok(())
}

fn handle_compare(args: CompareArgs, verbose: u8) -> Result<(), AppError> {
    let config = compare_config_from_args(&args, verbose);
    let cmp = crate::experiment::compare(&config)?;
    println!("{}", crate::report::format_comparison(&cmp));

    if args.plot && !args.no_plot {
        let plot = crate::plot::render_residue_plot(
            &[
                Series {
                    label: cmp.lookahead.method.display_name(),
                    marker: 'o',
                    values: &cmp.lookahead.relative_residuals,
                },
                Series {
                    label: cmp.omp.method.display_name(),
                    marker: 's',
                    values: &cmp.omp.relative_residuals,
                },
            ],
            args.width,
            args.height,
        );
        println!("{plot}");
    }

    if let Some(path) = &args.export_json {
        crate::io::write_comparison_json(path, &cmp)?;
    }
    Ok(())
}

pub fn problem_config_from_args(args: &ProblemArgs) -> ProblemConfig {
    ProblemConfig {
        n: args.n,
        m: args.m,
        sparsity: args.sparsity,
        distribution: args.distribution,
        noise_std: args.noise_std,
    }
}

pub fn omp_options_from_args(args: &SearchArgs) -> OmpOptions {
    OmpOptions {
        epsilon: args.epsilon,
        max_iters: args.omp_max_iters,
        record_trace: false,
    }
}

pub fn lookahead_options_from_args(search: &SearchArgs, problem: &ProblemArgs, verbose: u8) -> LookaheadOptions {
    LookaheadOptions {
        delta: search
            .delta
            .unwrap_or_else(|| problem.distribution.default_delta()),
        epsilon: search.epsilon,
        max_iters: search.max_iters,
        branching: search.branching,
        backtrack_penalty: search.backtrack_penalty,
        record_trace: false,
        verbose: verbose >= 2,
    }
}

pub fn recovery_config_from_args(args: &SweepArgs) -> RecoveryConfig {
    RecoveryConfig {
        problem: problem_config_from_args(&args.problem),
        trials: args.trials,
        seed: args.problem.seed,
        success_tolerance: SUCCESS_TOLERANCE,
    }
}

pub fn compare_config_from_args(args: &CompareArgs, verbose: u8) -> CompareConfig {
    CompareConfig {
        problem: problem_config_from_args(&args.problem),
        seed: args.problem.seed,
        omp: omp_options_from_args(&args.search),
        lookahead: lookahead_options_from_args(&args.search, &args.problem, verbose),
    }
}

/// Measurement counts `m_min, m_min + m_step, ..` up to and including `m_max`.
pub fn measurement_counts(args: &SweepArgs) -> Result<Vec<usize>, AppError> {
    if args.m_step == 0 {
        return Err(AppError::new(2, "--m-step must be >= 1"));
    }
    if args.m_min == 0 || args.m_min > args.m_max {
        return Err(AppError::new(
            2,
            format!("Invalid measurement range: {}..={}", args.m_min, args.m_max),
        ));
    }
    Ok((args.m_min..=args.m_max).step_by(args.m_step).collect())
}
