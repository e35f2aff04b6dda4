//! Reference decks as in-memory models.
//!
//! - [`reference_state`]: 3x3x3 box, three phases, two wells, metric units
//! - [`summary_deck`]: 10x10x10 box with one FIPNUM region per layer and
//!   three completed wells, for region tests

use std::collections::BTreeMap;
use std::path::Path;

use chrono::NaiveDate;
use eclio_core::{Measure, Solution, TargetType, UnitSystem};
use eclio_grid::{
    CompletionSpec, EclipseGrid, GridProperties, Phase, Schedule, ScheduleWell, TimeMap,
};
use eclio_writer::{EclipseState, IoConfig, Phases};

pub const REFERENCE_CELLS: usize = 27;

const DAY: f64 = 86_400.0;
const MILLIDARCY: f64 = 9.869_233e-16;

/// Start of the reference schedule.
pub fn reference_start() -> NaiveDate {
    NaiveDate::from_ymd_opt(2008, 10, 10).unwrap()
}

/// 3x3x3 box: DXV 1 2 3, DYV 4 5 6, DZV 7 8 9, tops at 100 m. PORO 0.3,
/// PERMX 1 mD, SATNUM 2, FIPNUM 3. Report steps of 1..=7 days; wells
/// `INJ` (gas, at 1,1) and `PROD` (oil, at 3,3) in group `G`, without
/// connections.
pub fn reference_state(base_name: &str, output_dir: &Path) -> EclipseState {
    let grid = EclipseGrid::from_cartesian(
        [3, 3, 3],
        &[1.0, 2.0, 3.0],
        &[4.0, 5.0, 6.0],
        &[7.0, 8.0, 9.0],
        &[100.0; 9],
    )
    .unwrap();

    let mut props = GridProperties::new(REFERENCE_CELLS);
    props.insert_double("PORO", vec![0.3; REFERENCE_CELLS]).unwrap();
    props
        .insert_double("PERMX", vec![MILLIDARCY; REFERENCE_CELLS])
        .unwrap();
    props.insert_int("SATNUM", vec![2; REFERENCE_CELLS]).unwrap();
    props.insert_int("FIPNUM", vec![3; REFERENCE_CELLS]).unwrap();

    let tsteps = (1..=7).map(|d| f64::from(d) * DAY).collect();
    let mut schedule = Schedule::new(TimeMap::new(reference_start(), tsteps));
    schedule
        .add_well(ScheduleWell::new("INJ", "G", [0, 0], Phase::Gas, 0))
        .unwrap();
    schedule
        .add_well(ScheduleWell::new("PROD", "G", [2, 2], Phase::Oil, 0))
        .unwrap();

    EclipseState {
        grid,
        properties: props,
        schedule,
        units: UnitSystem::Metric,
        phases: Phases::three_phase(),
        io_config: IoConfig {
            base_name: base_name.to_string(),
            output_dir: output_dir.to_path_buf(),
            ..IoConfig::default()
        },
    }
}

/// Black-oil restart solution for `step`: PRESSURE, SWAT, SGAS, RS, RV,
/// each `step * 1e5 + offset + cell`.
pub fn create_blackoil_state(step: u32, num_cells: usize) -> Solution {
    let base = f64::from(step) * 1.0e5;
    let field = |offset: f64| -> Vec<f64> {
        (0..num_cells).map(|c| base + offset + c as f64).collect()
    };
    let mut sol = Solution::new();
    sol.insert("PRESSURE", Measure::Pressure, field(1.0e4), TargetType::RestartSolution)
        .unwrap();
    sol.insert("SWAT", Measure::Identity, field(2.3e4), TargetType::RestartSolution)
        .unwrap();
    sol.insert("SGAS", Measure::Identity, field(2.2e4), TargetType::RestartSolution)
        .unwrap();
    sol.insert("RS", Measure::Identity, field(4.0e4), TargetType::RestartSolution)
        .unwrap();
    sol.insert("RV", Measure::Identity, field(3.0e4), TargetType::RestartSolution)
        .unwrap();
    sol
}

/// [`create_blackoil_state`] plus auxiliary `KRO = step` and `KRG = 10 * step`.
pub fn restart_solution(step: u32) -> Solution {
    let mut sol = create_blackoil_state(step, REFERENCE_CELLS);
    let s = f64::from(step);
    sol.insert(
        "KRO",
        Measure::Identity,
        vec![s; REFERENCE_CELLS],
        TargetType::RestartAuxiliary,
    )
    .unwrap();
    sol.insert(
        "KRG",
        Measure::Identity,
        vec![10.0 * s; REFERENCE_CELLS],
        TargetType::RestartAuxiliary,
    )
    .unwrap();
    sol
}

/// Seconds from the reference start to `10 + step` November 2008.
pub fn elapsed_seconds(step: u32) -> f64 {
    let date = NaiveDate::from_ymd_opt(2008, 11, 10 + step).unwrap();
    (date - reference_start()).num_seconds() as f64
}

/// Zero TRANX/TRANY/TRANZ INIT fields and an integer `STR_V` with
/// `v[2] = 67`, `v[26] = 89`.
pub fn init_extras() -> (Solution, BTreeMap<String, Vec<i32>>) {
    let mut extra = Solution::new();
    for name in ["TRANX", "TRANY", "TRANZ"] {
        extra
            .insert(
                name,
                Measure::Transmissibility,
                vec![0.0; REFERENCE_CELLS],
                TargetType::Init,
            )
            .unwrap();
    }
    let mut v = vec![0; REFERENCE_CELLS];
    v[2] = 67;
    v[26] = 89;
    (extra, BTreeMap::from([("STR_V".to_string(), v)]))
}

/// 10x10x10 box, FIPNUM = layer + 1, wells `W_1`..`W_3` in the first row
/// completed through the top three, two and one layers.
pub fn summary_deck() -> (EclipseGrid, GridProperties, Schedule) {
    let grid = EclipseGrid::from_cartesian(
        [10, 10, 10],
        &[1000.0; 10],
        &[1000.0; 10],
        &[20.0; 10],
        &[1000.0; 100],
    )
    .unwrap();

    let mut props = GridProperties::new(grid.cartesian_size());
    let fipnum = (0..grid.cartesian_size())
        .map(|g| grid.ijk(g)[2] as i32 + 1)
        .collect();
    props.insert_int("FIPNUM", fipnum).unwrap();

    let mut schedule = Schedule::new(TimeMap::new(reference_start(), vec![DAY; 3]));
    for (name, i, layers) in [("W_1", 0, 0..3), ("W_2", 1, 0..2), ("W_3", 2, 0..1)] {
        let mut well = ScheduleWell::new(name, "G_1", [i, 0], Phase::Oil, 0);
        well.set_completions(1, layers.map(|k| CompletionSpec::open(i, 0, k)))
            .unwrap();
        schedule.add_well(well).unwrap();
    }
    (grid, props, schedule)
}
