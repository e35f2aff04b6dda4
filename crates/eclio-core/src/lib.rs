//! Core types for Eclipse-format simulation output.
//!
//! This is the leaf crate with zero internal dependencies. It defines
//! the containers a simulator hands to the output writer: the unit
//! system and physical measures, unit-tagged per-cell solution fields,
//! and the sparse well/completion rate containers.

#![deny(missing_docs)]
#![deny(rustdoc::broken_intra_doc_links)]
#![forbid(unsafe_code)]

pub mod error;
pub mod rates;
pub mod solution;
pub mod units;
pub mod wells;

pub use error::DataError;
pub use rates::{RateKind, Rates};
pub use solution::{CellData, Solution, TargetType};
pub use units::{Measure, UnitSystem};
pub use wells::{Completion, Well, Wells};
