//! Synthetic data generation.

pub mod sample;

pub use sample::*;

pub use crate::domain::AmplitudeDistribution;
