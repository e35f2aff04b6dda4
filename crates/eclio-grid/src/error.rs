//! Error types for grid, property and schedule construction.

use std::fmt;

/// Errors arising from model construction or index queries.
#[derive(Debug, Clone, PartialEq)]
pub enum GridError {
    /// A grid dimension is zero.
    EmptyGrid,
    /// An input array has the wrong length for the grid.
    SizeMismatch {
        /// Keyword or array name.
        name: String,
        /// Expected number of elements.
        expected: usize,
        /// Number of elements supplied.
        found: usize,
    },
    /// An `(i, j, k)` triple lies outside the grid.
    CellOutOfBounds {
        /// The offending cell.
        ijk: [usize; 3],
        /// Grid dimensions.
        dims: [usize; 3],
    },
    /// A well with this name is already in the schedule.
    DuplicateWell {
        /// The colliding well name.
        name: String,
    },
    /// Completions were declared for a step before an earlier declaration.
    StepOutOfOrder {
        /// Well the declaration belongs to.
        well: String,
        /// The rejected step.
        step: usize,
        /// The latest step already declared.
        last: usize,
    },
}

impl fmt::Display for GridError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::EmptyGrid => write!(f, "grid must have at least one cell in every direction"),
            Self::SizeMismatch {
                name,
                expected,
                found,
            } => write!(f, "{name}: expected {expected} values, got {found}"),
            Self::CellOutOfBounds { ijk, dims } => {
                write!(f, "cell {ijk:?} out of bounds for grid {dims:?}")
            }
            Self::DuplicateWell { name } => write!(f, "well '{name}' already defined"),
            Self::StepOutOfOrder { well, step, last } => write!(
                f,
                "well '{well}': completions for step {step} declared after step {last}"
            ),
        }
    }
}

impl std::error::Error for GridError {}
