//! Error type for the output session.

use std::error::Error;
use std::fmt;
use std::io;

use eclio_core::DataError;
use eclio_fortio::FortioError;
use eclio_grid::GridError;

use crate::config::ConfigError;

/// Errors returned by [`EclipseIO`](crate::EclipseIO).
///
/// `InvalidArgument` is raised by validation that runs before any file
/// is opened; a call failing with it leaves every output file untouched.
#[derive(Debug)]
pub enum OutputError {
    /// Filesystem error while creating, reading or writing an output file.
    Io(io::Error),
    /// Caller-supplied data is unusable (bad keyword name, wrong length).
    InvalidArgument {
        /// What was wrong.
        reason: String,
    },
    /// Keyword encoding or restart scanning failed.
    Codec(FortioError),
    /// A data container rejected an operation.
    Data(DataError),
    /// The grid or schedule model rejected a query.
    Grid(GridError),
    /// The output configuration is invalid.
    Config(ConfigError),
}

impl fmt::Display for OutputError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Io(e) => write!(f, "I/O error: {e}"),
            Self::InvalidArgument { reason } => write!(f, "invalid argument: {reason}"),
            Self::Codec(e) => write!(f, "codec: {e}"),
            Self::Data(e) => write!(f, "data: {e}"),
            Self::Grid(e) => write!(f, "grid: {e}"),
            Self::Config(e) => write!(f, "config: {e}"),
        }
    }
}

impl Error for OutputError {
    fn source(&self) -> Option<&(dyn Error + 'static)> {
        match self {
            Self::Io(e) => Some(e),
            Self::Codec(e) => Some(e),
            Self::Data(e) => Some(e),
            Self::Grid(e) => Some(e),
            Self::Config(e) => Some(e),
            Self::InvalidArgument { .. } => None,
        }
    }
}

impl From<io::Error> for OutputError {
    fn from(e: io::Error) -> Self {
        Self::Io(e)
    }
}

impl From<FortioError> for OutputError {
    fn from(e: FortioError) -> Self {
        match e {
            FortioError::Io(io) => Self::Io(io),
            other => Self::Codec(other),
        }
    }
}

impl From<DataError> for OutputError {
    fn from(e: DataError) -> Self {
        Self::Data(e)
    }
}

impl From<GridError> for OutputError {
    fn from(e: GridError) -> Self {
        Self::Grid(e)
    }
}

impl From<ConfigError> for OutputError {
    fn from(e: ConfigError) -> Self {
        Self::Config(e)
    }
}
