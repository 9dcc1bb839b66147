//! Sparse recovery by pursuit over support sets.
//!
//! Responsibilities:
//!
//! - evaluate residues and scores of support sets (`residue`)
//! - memoize them per search call (`context`)
//! - propose and choose the next support (`successors`, `policy`)
//! - run the baseline OMP and the look-ahead search (`omp`, `lookahead`)
//! - expose both behind one estimator contract (`estimator`)

pub mod context;
pub mod estimator;
pub mod lookahead;
pub mod omp;
pub mod policy;
pub mod residue;
pub mod successors;

pub use context::*;
pub use estimator::*;
pub use lookahead::*;
pub use omp::*;
pub use policy::*;
pub use residue::*;
pub use successors::*;
