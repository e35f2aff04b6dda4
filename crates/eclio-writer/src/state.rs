//! The parsed-deck bundle the session writes from.

use std::path::PathBuf;

use eclio_core::UnitSystem;
use eclio_grid::{EclipseGrid, GridProperties, Schedule};

/// Active fluid phases (`OIL`, `WATER`, `GAS` in the RUNSPEC section).
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct Phases {
    /// Oil is present.
    pub oil: bool,
    /// Water is present.
    pub water: bool,
    /// Gas is present.
    pub gas: bool,
}

impl Phases {
    /// Oil, water and gas.
    pub fn three_phase() -> Self {
        Self {
            oil: true,
            water: true,
            gas: true,
        }
    }

    /// Phase bit mask for `INTEHEAD` (oil 1, water 2, gas 4).
    pub fn indicator(self) -> i32 {
        i32::from(self.oil) | (i32::from(self.water) << 1) | (i32::from(self.gas) << 2)
    }
}

/// Output options as a deck declares them.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct IoConfig {
    /// Case name; output files are `<base_name>.<EXT>`.
    pub base_name: String,
    /// Directory the files are written to.
    pub output_dir: PathBuf,
    /// `INIT` keyword present in the GRID section.
    pub write_init: bool,
    /// `GRIDFILE` requests an EGRID file.
    pub write_egrid: bool,
    /// Restart output requested (`RPTRST`).
    pub write_restart: bool,
}

impl Default for IoConfig {
    fn default() -> Self {
        Self {
            base_name: "ECLIPSE".to_string(),
            output_dir: PathBuf::from("."),
            write_init: true,
            write_egrid: true,
            write_restart: true,
        }
    }
}

/// Read-only input models for one run.
///
/// Grid, properties and schedule are expected to be consistent: the
/// property set covers [`EclipseGrid::cartesian_size`] cells and every
/// completion lies inside the grid. [`EclipseIO::new`](crate::EclipseIO::new)
/// checks this while building its region cache.
#[derive(Clone, Debug)]
pub struct EclipseState {
    /// Grid geometry and ACTNUM.
    pub grid: EclipseGrid,
    /// Static cell properties.
    pub properties: GridProperties,
    /// Wells and report-step calendar.
    pub schedule: Schedule,
    /// Unit system of the output files.
    pub units: UnitSystem,
    /// Active phases.
    pub phases: Phases,
    /// Output options.
    pub io_config: IoConfig,
}

impl EclipseState {
    /// Bundle the models with default phases (three-phase) and output options.
    pub fn new(
        grid: EclipseGrid,
        properties: GridProperties,
        schedule: Schedule,
        units: UnitSystem,
    ) -> Self {
        Self {
            grid,
            properties,
            schedule,
            units,
            phases: Phases::three_phase(),
            io_config: IoConfig::default(),
        }
    }
}
