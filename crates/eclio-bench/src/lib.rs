//! Benchmark profiles for the eclio output writer.
//!
//! Provides pre-built [`EclipseState`] profiles for benchmarking:
//!
//! - [`reference_profile`]: 100x100x10 box (100K cells), two wells
//! - [`stress_profile`]: 200x200x25 box (1M cells)
//! - [`step_solution`]: five-field black-oil restart solution

#![forbid(unsafe_code)]

use std::path::Path;

use chrono::NaiveDate;
use eclio_core::{Measure, Solution, TargetType, UnitSystem};
use eclio_grid::{
    CompletionSpec, EclipseGrid, GridProperties, Phase, Schedule, ScheduleWell, TimeMap,
};
use eclio_writer::{EclipseState, IoConfig, Phases};

/// Build the reference profile: 100x100x10 box (100K cells).
///
/// Every cell is active. `INJ` and `PROD` sit in opposite corners,
/// completed through all layers.
pub fn reference_profile(output_dir: &Path) -> EclipseState {
    box_profile([100, 100, 10], output_dir)
}

/// Build the stress profile: 200x200x25 box (1M cells).
pub fn stress_profile(output_dir: &Path) -> EclipseState {
    box_profile([200, 200, 25], output_dir)
}

fn box_profile(dims: [usize; 3], output_dir: &Path) -> EclipseState {
    let [nx, ny, nz] = dims;
    let cells = nx * ny * nz;
    let grid = EclipseGrid::from_cartesian(
        dims,
        &vec![50.0; nx],
        &vec![50.0; ny],
        &vec![5.0; nz],
        &vec![2000.0; nx * ny],
    )
    .unwrap();

    let mut props = GridProperties::new(cells);
    props.insert_double("PORO", vec![0.25; cells]).unwrap();
    props.insert_double("PERMX", vec![1.0e-13; cells]).unwrap();
    props
        .insert_int(
            "FIPNUM",
            (0..cells).map(|g| (g / (nx * ny)) as i32 + 1).collect(),
        )
        .unwrap();

    let start = NaiveDate::from_ymd_opt(2020, 1, 1).unwrap();
    let mut schedule = Schedule::new(TimeMap::new(start, vec![30.0 * 86_400.0; 12]));
    for (name, phase, [i, j]) in [
        ("INJ", Phase::Water, [0, 0]),
        ("PROD", Phase::Oil, [nx - 1, ny - 1]),
    ] {
        let mut well = ScheduleWell::new(name, "FIELD", [i, j], phase, 0);
        well.set_completions(0, (0..nz).map(|k| CompletionSpec::open(i, j, k)))
            .unwrap();
        schedule.add_well(well).unwrap();
    }

    EclipseState {
        grid,
        properties: props,
        schedule,
        units: UnitSystem::Metric,
        phases: Phases::three_phase(),
        io_config: IoConfig {
            base_name: "BENCH".to_string(),
            output_dir: output_dir.to_path_buf(),
            ..IoConfig::default()
        },
    }
}

/// PRESSURE, SWAT, SGAS, RS and RV over `num_cells` active cells.
pub fn step_solution(step: u32, num_cells: usize) -> Solution {
    let drift = 1.0 + 1.0e-3 * f64::from(step);
    let mut sol = Solution::new();
    for (name, measure, scale) in [
        ("PRESSURE", Measure::Pressure, 1.0e7),
        ("SWAT", Measure::Identity, 0.2),
        ("SGAS", Measure::Identity, 0.1),
        ("RS", Measure::GasOilRatio, 80.0),
        ("RV", Measure::OilGasRatio, 1.0e-4),
    ] {
        let data = (0..num_cells)
            .map(|c| scale * drift * (1.0 + 1.0e-6 * c as f64))
            .collect();
        sol.insert(name, measure, data, TargetType::RestartSolution)
            .unwrap();
    }
    sol
}
