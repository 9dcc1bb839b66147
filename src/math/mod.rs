//! Mathematical utilities: canonical support sets and minimum-norm least squares.

pub mod lstsq;
pub mod support;

pub use lstsq::*;
pub use support::*;
