//! eclio: Eclipse binary output for reservoir simulators.
//!
//! This is the top-level facade crate that re-exports the public API from all
//! eclio sub-crates. For most users, adding `eclio` as a single dependency is
//! sufficient.
//!
//! # Quick start
//!
//! ```rust
//! use std::collections::BTreeMap;
//!
//! use eclio::prelude::*;
//!
//! let dir = tempfile::tempdir().unwrap();
//!
//! // A 2x2x1 box, 10 m cells, tops at 1000 m.
//! let grid = EclipseGrid::from_cartesian([2, 2, 1], &[10.0; 2], &[10.0; 2], &[10.0], &[1000.0; 4])
//!     .unwrap();
//! let mut props = GridProperties::new(grid.cartesian_size());
//! props.insert_double("PORO", vec![0.2; 4]).unwrap();
//!
//! let start = chrono::NaiveDate::from_ymd_opt(2020, 1, 1).unwrap();
//! let schedule = Schedule::new(TimeMap::new(start, vec![86_400.0; 3]));
//! let state = EclipseState::new(grid, props, schedule, UnitSystem::Metric);
//!
//! let mut io = EclipseIO::new(state, OutputConfig::new(dir.path(), "CASE")).unwrap();
//! io.write_initial(&Solution::new(), &BTreeMap::new()).unwrap();
//!
//! let mut sol = Solution::new();
//! sol.insert("PRESSURE", Measure::Pressure, vec![2.0e7; 4], TargetType::RestartSolution)
//!     .unwrap();
//! let none = BTreeMap::new();
//! io.write_time_step(1, false, 86_400.0, &sol, &Wells::new(), &none, &none, &none)
//!     .unwrap();
//!
//! assert_eq!(io.restart_steps().unwrap(), [1]);
//! assert!(dir.path().join("CASE.EGRID").exists());
//! ```
//!
//! # Modules
//!
//! Each module corresponds to a sub-crate. Use them for types not in the prelude:
//!
//! | Module | Sub-crate | Contents |
//! |--------|-----------|----------|
//! | [`types`] | `eclio-core` | Units, solution fields, rates and well results |
//! | [`grid`] | `eclio-grid` | Grid, properties, schedule, region cache |
//! | [`fortio`] | `eclio-fortio` | Keyword codec, reader, writer, restart scanner |
//! | [`writer`] | `eclio-writer` | The `EclipseIO` session and its configuration |

#![deny(missing_docs)]
#![deny(rustdoc::broken_intra_doc_links)]
#![forbid(unsafe_code)]

/// Units, solution fields and well results (`eclio-core`).
///
/// Everything the simulator fills in per report step: [`types::Solution`],
/// [`types::Rates`] and [`types::Wells`].
pub use eclio_core as types;

/// Input models (`eclio-grid`).
///
/// [`grid::EclipseGrid`], [`grid::GridProperties`], [`grid::Schedule`] and
/// the derived [`grid::RegionCache`].
pub use eclio_grid as grid;

/// Keyword file codec (`eclio-fortio`).
///
/// Read written files back with [`fortio::KeywordReader`], or write
/// arbitrary keywords with [`fortio::KeywordWriter`].
pub use eclio_fortio as fortio;

/// Output session (`eclio-writer`).
///
/// [`writer::EclipseIO`] writes EGRID, INIT and UNRST files from an
/// [`writer::EclipseState`].
pub use eclio_writer as writer;

/// Common imports for typical eclio usage.
///
/// ```rust
/// use eclio::prelude::*;
/// ```
pub mod prelude {
    // Result containers
    pub use eclio_core::{
        CellData, Completion, Measure, RateKind, Rates, Solution, TargetType, UnitSystem, Well,
        Wells,
    };

    // Input models
    pub use eclio_grid::{
        CompletionSpec, EclipseGrid, GridProperties, Phase, RegionCache, Schedule, ScheduleWell,
        TimeMap,
    };

    // Codec
    pub use eclio_fortio::{EclKeyword, EclType, KeywordReader, KeywordWriter};

    // Session
    pub use eclio_writer::{
        EclipseIO, EclipseState, IoConfig, OutputConfig, Phases, WriterState,
    };

    // Errors
    pub use eclio_core::DataError;
    pub use eclio_fortio::FortioError;
    pub use eclio_grid::GridError;
    pub use eclio_writer::{ConfigError, OutputError};
}
