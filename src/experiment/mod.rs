//! Experiment drivers.
//!
//! Responsibilities:
//!
//! - recover one seeded problem (`recover`)
//! - estimate recovery probability over many trials, in parallel (`recovery_probability`)
//! - sweep the measurement count (`sweep`)
//! - compare OMP and the look-ahead search on one problem (`compare`)

pub mod compare;
pub mod recovery;

pub use compare::*;
pub use recovery::*;
