//! Command-line parsing for the sparse recovery toolkit.
//!
//! The goal of this module is to keep **argument parsing** and **command dispatch**
//! separate from the pursuit/math code.

use std::path::PathBuf;

use clap::{ArgAction, Args, Parser, Subcommand};

use crate::domain::AmplitudeDistribution;
use crate::pursuit::Method;

/// Top-level CLI.
#[derive(Debug, Parser)]
#[command(name = "pursuit", version, about = "Sparse signal recovery: OMP and look-ahead pursuit")]
pub struct Cli {
    /// Increase log verbosity (`-v` info, `-vv` debug with per-iteration events).
    #[arg(short, long, action = ArgAction::Count, global = true)]
    pub verbose: u8,

    #[command(subcommand)]
    pub command: Command,
}

/// CLI subcommands.
#[derive(Debug, Subcommand)]
pub enum Command {
    /// Recover one seeded random problem and print a summary.
    Recover(RecoverArgs),
    /// Estimate recovery probability over a range of measurement counts.
    Sweep(SweepArgs),
    /// Run OMP and the look-ahead search on the same problem and compare traces.
    Compare(CompareArgs),
}

/// Problem shape and signal model shared by every subcommand.
#[derive(Debug, Args, Clone)]
pub struct ProblemArgs {
    /// Signal length (dictionary columns).
    #[arg(short = 'n', long, default_value_t = 128)]
    pub n: usize,

    /// Number of measurements (dictionary rows).
    #[arg(short = 'm', long, default_value_t = 20)]
    pub m: usize,

    /// Sparsity (non-zeros in the true signal).
    #[arg(short = 'k', long, default_value_t = 5)]
    pub sparsity: usize,

    /// Amplitude distribution of the non-zero entries.
    #[arg(long, value_enum, default_value_t = AmplitudeDistribution::Uniform)]
    pub distribution: AmplitudeDistribution,

    /// Standard deviation of additive Gaussian measurement noise.
    #[arg(long, default_value_t = 0.0)]
    pub noise_std: f64,

    /// Random seed for the signal (the dictionary uses seed + 198).
    #[arg(long, default_value_t = 42)]
    pub seed: u64,
}

/// Search options for both engines.
#[derive(Debug, Args, Clone)]
pub struct SearchArgs {
    /// Decision-policy spread threshold. Defaults by distribution (0.015 normal, 0.1 otherwise).
    #[arg(long)]
    pub delta: Option<f64>,

    /// Residual-norm stop threshold.
    #[arg(long, default_value_t = 1e-6)]
    pub epsilon: f64,

    /// Iteration cap for the look-ahead search.
    #[arg(long, default_value_t = 200)]
    pub max_iters: usize,

    /// Iteration cap for OMP (defaults to the number of measurements).
    #[arg(long)]
    pub omp_max_iters: Option<usize>,

    /// Candidate extensions proposed per look-ahead step.
    #[arg(long, default_value_t = 2)]
    pub branching: usize,

    /// Score assigned to a support abandoned by a backtrack.
    #[arg(long, default_value_t = 100.0)]
    pub backtrack_penalty: f64,
}

/// Options for `pursuit recover`.
#[derive(Debug, Parser, Clone)]
pub struct RecoverArgs {
    #[command(flatten)]
    pub problem: ProblemArgs,

    #[command(flatten)]
    pub search: SearchArgs,

    /// Estimator to run.
    #[arg(long, value_enum, default_value_t = Method::LrtOmp)]
    pub method: Method,
}

/// Options for `pursuit sweep`.
#[derive(Debug, Parser, Clone)]
pub struct SweepArgs {
    #[command(flatten)]
    pub problem: ProblemArgs,

    #[command(flatten)]
    pub search: SearchArgs,

    /// Estimator to run.
    #[arg(long, value_enum, default_value_t = Method::LrtOmp)]
    pub method: Method,

    /// Trials per measurement count.
    #[arg(long, default_value_t = 100)]
    pub trials: usize,

    /// Smallest measurement count of the sweep.
    #[arg(long, default_value_t = 10)]
    pub m_min: usize,

    /// Largest measurement count of the sweep (inclusive).
    #[arg(long, default_value_t = 40)]
    pub m_max: usize,

    /// Step between measurement counts.
    #[arg(long, default_value_t = 5)]
    pub m_step: usize,

    /// Export sweep points to CSV.
    #[arg(long)]
    pub export: Option<PathBuf>,
}

/// Options for `pursuit compare`.
#[derive(Debug, Parser, Clone)]
pub struct CompareArgs {
    #[command(flatten)]
    pub problem: ProblemArgs,

    #[command(flatten)]
    pub search: SearchArgs,

    /// Render an ASCII plot of both residue traces (enabled by default).
    #[arg(long, default_value_t = true)]
    pub plot: bool,

    /// Disable the terminal plot.
    #[arg(long)]
    pub no_plot: bool,

    /// Plot width (columns).
    #[arg(long, default_value_t = 80)]
    pub width: usize,

    /// Plot height (rows).
    #[arg(long, default_value_t = 20)]
    pub height: usize,

    /// Export the comparison (options, traces, supports) to JSON.
    #[arg(long = "export-json")]
    pub export_json: Option<PathBuf>,
}
