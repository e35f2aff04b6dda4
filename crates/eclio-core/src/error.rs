//! Error types for the output data containers.

use std::error::Error;
use std::fmt;

use crate::rates::RateKind;

/// Errors raised by [`Solution`](crate::Solution), [`Rates`](crate::Rates)
/// and [`Well`](crate::Well).
///
/// All of these indicate a programming error in the producer; they are
/// returned to the immediate caller and never retried.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum DataError {
    /// A field with this name is already present in the solution.
    DuplicateField {
        /// The colliding field name.
        name: String,
    },
    /// The requested field is not present in the solution.
    FieldNotFound {
        /// The missing field name.
        name: String,
    },
    /// A strict rate lookup asked for a kind that was never set.
    ///
    /// This is the invalid-argument case of [`Rates::get`](crate::Rates::get);
    /// use [`Rates::get_or`](crate::Rates::get_or) for a lenient lookup.
    RateNotSet {
        /// The rate kind that was requested.
        kind: RateKind,
    },
    /// A well already has a completion in this active cell.
    DuplicateCompletion {
        /// Active cell index of the rejected completion.
        active_index: usize,
    },
}

impl fmt::Display for DataError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::DuplicateField { name } => {
                write!(f, "field '{name}' is already present in the solution")
            }
            Self::FieldNotFound { name } => write!(f, "field '{name}' not found"),
            Self::RateNotSet { kind } => write!(f, "rate '{kind}' has not been set"),
            Self::DuplicateCompletion { active_index } => {
                write!(f, "duplicate completion in active cell {active_index}")
            }
        }
    }
}

impl Error for DataError {}
