//! `sparse-pursuit` library crate.
//!
//! Sparse signal recovery from underdetermined linear measurements `y = A x`:
//! orthogonal matching pursuit and a look-ahead pursuit with backtracking.
//!
//! The binary (`pursuit`) is a thin wrapper around this library so that:
//!
//! - core logic is testable without spawning processes
//! - the engines are reusable from other experiment drivers
//! - code stays easy to navigate as the project grows

pub mod app;
pub mod cli;
pub mod data;
pub mod domain;
pub mod error;
pub mod experiment;
pub mod io;
pub mod math;
pub mod plot;
pub mod pursuit;
pub mod report;
