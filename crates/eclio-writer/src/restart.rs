//! One unified-restart record.
//!
//! A record opens with `SEQNUM` and the three header arrays, then carries
//! the well, group and aquifer arrays, and finally the solution between
//! `STARTSOL` and `ENDSOL` followed by the auxiliary fields.

use std::collections::BTreeMap;
use std::io::Write;

use chrono::NaiveDateTime;
use eclio_core::{CellData, Measure, RateKind, Solution, TargetType, Wells};
use eclio_fortio::scan::SEQNUM;
use eclio_fortio::KeywordWriter;
use eclio_grid::ScheduleWell;
use tracing::debug;

use crate::convert::{check_char_value, check_keyword_name, check_len, to_real};
use crate::error::OutputError;
use crate::header::{doubhead, intehead, logihead, to_i32, WellDims};
use crate::state::EclipseState;

/// Integers per well in `IWEL`.
pub const NIWELZ: usize = 11;
/// Strings per well in `ZWEL`.
pub const NZWELZ: usize = 3;
/// Integers per connection in `ICON`.
pub const NICONZ: usize = 15;
/// Doubles per well in `XWEL`.
pub const NXWELZ: usize = 12;

/// `IWEL` slots.
pub mod iwel {
    /// Wellhead I, one-based.
    pub const I: usize = 0;
    /// Wellhead J, one-based.
    pub const J: usize = 1;
    /// K of the first connection, one-based (0 without connections).
    pub const K: usize = 2;
    /// Number of connections.
    pub const NCON: usize = 4;
    /// Group position in `ZGRP` order, one-based.
    pub const GROUP: usize = 5;
    /// Well type (1 oil, 2 water, 3 gas).
    pub const TYPE: usize = 6;
    /// 1 when any connection is open, else 0.
    pub const STATUS: usize = 10;
}

/// `ICON` slots.
pub mod icon {
    /// Connection number within the well, one-based.
    pub const INDEX: usize = 0;
    /// Cell I, one-based.
    pub const I: usize = 1;
    /// Cell J, one-based.
    pub const J: usize = 2;
    /// Cell K, one-based.
    pub const K: usize = 3;
    /// 1 open, 0 shut.
    pub const STATUS: usize = 5;
    /// Penetration direction (3 = Z).
    pub const DIR: usize = 13;
}

/// `XWEL` slots, in output units.
pub mod xwel {
    /// Oil surface rate.
    pub const OIL: usize = 0;
    /// Water surface rate.
    pub const WAT: usize = 1;
    /// Gas surface rate.
    pub const GAS: usize = 2;
    /// Liquid (oil + water) surface rate.
    pub const LIQ: usize = 3;
    /// Reservoir volume rate.
    pub const RESV: usize = 4;
    /// Bottom-hole pressure.
    pub const BHP: usize = 6;
}

const DIR_Z: i32 = 3;

/// Inputs for one record.
pub(crate) struct StepData<'a> {
    pub step: i32,
    pub elapsed_seconds: f64,
    pub solution: &'a Solution,
    pub wells: &'a Wells,
    pub group_values: &'a BTreeMap<String, f64>,
    pub aquifer_values: &'a BTreeMap<String, f64>,
}

impl StepData<'_> {
    fn report_step(&self) -> usize {
        usize::try_from(self.step).unwrap_or(0)
    }
}

fn restart_fields(solution: &Solution) -> impl Iterator<Item = (&str, &CellData)> {
    solution.iter().filter(|(_, cell)| {
        matches!(
            cell.target,
            TargetType::RestartSolution | TargetType::RestartAuxiliary
        )
    })
}

/// Check everything the record will encode, before any file is opened.
pub(crate) fn validate_step(state: &EclipseState, data: &StepData<'_>) -> Result<(), OutputError> {
    record_date(state, data.elapsed_seconds)?;
    let active = state.grid.num_active();
    for (name, cell) in restart_fields(data.solution) {
        check_keyword_name(name)?;
        check_len(name, cell.data.len(), active)?;
    }
    for well in state.schedule.wells_at(data.report_step()) {
        check_char_value("well", well.name())?;
        check_char_value("group", well.group())?;
    }
    for name in data.group_values.keys() {
        check_char_value("group", name)?;
    }
    Ok(())
}

/// Calendar date of a record `elapsed_seconds` after the simulation start.
fn record_date(state: &EclipseState, elapsed_seconds: f64) -> Result<NaiveDateTime, OutputError> {
    if !elapsed_seconds.is_finite() {
        return Err(OutputError::InvalidArgument {
            reason: format!("elapsed time {elapsed_seconds} s is not finite"),
        });
    }
    state
        .schedule
        .time_map()
        .date_after(elapsed_seconds)
        .ok_or_else(|| OutputError::InvalidArgument {
            reason: format!("elapsed time {elapsed_seconds} s is outside the calendar range"),
        })
}

/// Encode one record. Run [`validate_step`] first.
pub(crate) fn write_step<W: Write>(
    w: &mut KeywordWriter<W>,
    state: &EclipseState,
    data: &StepData<'_>,
) -> Result<(), OutputError> {
    let units = state.units;
    let date = record_date(state, data.elapsed_seconds)?;
    let report_step = data.report_step();
    let wells: Vec<&ScheduleWell> = state.schedule.wells_at(report_step).collect();
    let arrays = well_arrays(state, report_step, &wells, data.wells);

    w.write_inte(SEQNUM, &[data.step])?;
    w.write_inte("INTEHEAD", &intehead(state, date, &arrays.dims))?;
    w.write_logi("LOGIHEAD", &logihead(state))?;
    w.write_doub("DOUBHEAD", &doubhead(data.elapsed_seconds))?;

    if !wells.is_empty() {
        w.write_inte("IWEL", &arrays.iwel)?;
        w.write_char("ZWEL", &arrays.zwel)?;
        w.write_inte("ICON", &arrays.icon)?;
        w.write_doub("XWEL", &arrays.xwel)?;
    }

    if !data.group_values.is_empty() {
        let names: Vec<&str> = data.group_values.keys().map(String::as_str).collect();
        let values: Vec<f64> = data.group_values.values().copied().collect();
        w.write_char("ZGRP", &names)?;
        w.write_doub("XGRP", &values)?;
    }

    if !data.aquifer_values.is_empty() {
        let ids: Vec<i32> = (1..=data.aquifer_values.len()).map(to_i32).collect();
        let values: Vec<f64> = data.aquifer_values.values().copied().collect();
        w.write_inte("IAAQ", &ids)?;
        w.write_doub("XAAQ", &values)?;
    }

    w.write_mess("STARTSOL")?;
    for (name, cell) in data.solution.with_target(TargetType::RestartSolution) {
        w.write_real(name, &to_real(units, cell.measure, &cell.data))?;
    }
    w.write_mess("ENDSOL")?;
    for (name, cell) in data.solution.with_target(TargetType::RestartAuxiliary) {
        w.write_real(name, &to_real(units, cell.measure, &cell.data))?;
    }

    debug!(
        step = data.step,
        wells = wells.len(),
        keywords = w.keywords_written(),
        "restart record encoded"
    );
    Ok(())
}

struct WellArrays {
    iwel: Vec<i32>,
    zwel: Vec<String>,
    icon: Vec<i32>,
    xwel: Vec<f64>,
    dims: WellDims,
}

fn one_based(n: usize) -> i32 {
    to_i32(n + 1)
}

fn well_arrays(
    state: &EclipseState,
    step: usize,
    wells: &[&ScheduleWell],
    results: &Wells,
) -> WellArrays {
    let units = state.units;

    let mut groups: Vec<(&str, usize)> = Vec::new();
    for well in wells {
        match groups.iter_mut().find(|(g, _)| *g == well.group()) {
            Some((_, n)) => *n += 1,
            None => groups.push((well.group(), 1)),
        }
    }
    let ncwmax = wells
        .iter()
        .map(|w| w.completions_at(step).len())
        .max()
        .unwrap_or(0);

    let mut iwel = vec![0; wells.len() * NIWELZ];
    let mut zwel = vec![String::new(); wells.len() * NZWELZ];
    let mut icon = vec![0; wells.len() * ncwmax * NICONZ];
    let mut xwel = vec![0.0; wells.len() * NXWELZ];

    for (n, well) in wells.iter().enumerate() {
        let conns = well.completions_at(step);
        let [hi, hj] = well.head();
        let group = groups
            .iter()
            .position(|(g, _)| *g == well.group())
            .map_or(0, one_based);

        let iw = &mut iwel[n * NIWELZ..(n + 1) * NIWELZ];
        iw[iwel::I] = one_based(hi);
        iw[iwel::J] = one_based(hj);
        iw[iwel::K] = conns.first().map_or(0, |c| one_based(c.k));
        iw[iwel::NCON] = to_i32(conns.len());
        iw[iwel::GROUP] = group;
        iw[iwel::TYPE] = well.phase().eclipse_code();
        iw[iwel::STATUS] = i32::from(conns.iter().any(|c| c.open));

        zwel[n * NZWELZ] = well.name().to_string();

        for (c, conn) in conns.iter().enumerate() {
            let start = (n * ncwmax + c) * NICONZ;
            let ic = &mut icon[start..start + NICONZ];
            ic[icon::INDEX] = one_based(c);
            ic[icon::I] = one_based(conn.i);
            ic[icon::J] = one_based(conn.j);
            ic[icon::K] = one_based(conn.k);
            ic[icon::STATUS] = i32::from(conn.open);
            ic[icon::DIR] = DIR_Z;
        }

        let name = well.name();
        let rate = |kind| results.rate(name, kind);
        let oil = rate(RateKind::Oil);
        let wat = rate(RateKind::Wat);
        let resv = rate(RateKind::ReservoirOil)
            + rate(RateKind::ReservoirWater)
            + rate(RateKind::ReservoirGas);
        let xw = &mut xwel[n * NXWELZ..(n + 1) * NXWELZ];
        xw[xwel::OIL] = units.from_si(Measure::LiquidSurfaceRate, oil);
        xw[xwel::WAT] = units.from_si(Measure::LiquidSurfaceRate, wat);
        xw[xwel::GAS] = units.from_si(Measure::GasSurfaceRate, rate(RateKind::Gas));
        xw[xwel::LIQ] = units.from_si(Measure::LiquidSurfaceRate, oil + wat);
        xw[xwel::RESV] = units.from_si(Measure::Rate, resv);
        xw[xwel::BHP] = results
            .get(name)
            .map_or(0.0, |w| units.from_si(Measure::Pressure, w.bhp));
    }

    WellArrays {
        iwel,
        zwel,
        icon,
        xwel,
        dims: WellDims {
            nwells: wells.len(),
            ncwmax,
            nwgmax: groups.iter().map(|(_, n)| *n).max().unwrap_or(0),
            ngroups: groups.len(),
            niwelz: NIWELZ,
            nxwelz: NXWELZ,
            nzwelz: NZWELZ,
            niconz: NICONZ,
        },
    }
}
