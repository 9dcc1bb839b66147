//! Output helpers.
//!
//! - sweep result exports (CSV) (`export`)
//! - comparison traces (JSON) (`comparison`)

pub mod comparison;
pub mod export;

pub use comparison::*;
pub use export::*;
