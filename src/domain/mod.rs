//! Domain types used throughout the crate.
//!
//! This module defines:
//!
//! - configuration enums and structs (`AmplitudeDistribution`, `ProblemConfig`)
//! - experiment outputs (`SweepPoint`, `EngineRun`, `Comparison`)

pub mod types;

pub use types::*;
