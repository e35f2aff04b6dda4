//! INIT file body: static per-cell properties.

use std::collections::BTreeMap;
use std::io::Write;

use chrono::NaiveDateTime;
use eclio_core::{Measure, Solution, TargetType};
use eclio_fortio::KeywordWriter;
use tracing::debug;

use crate::convert::{check_keyword_name, check_len, to_real};
use crate::error::OutputError;
use crate::header::{doubhead, intehead, logihead, WellDims};
use crate::state::EclipseState;

/// Double properties written when the deck defines them, with their measure.
const OPTIONAL_DOUBLES: [(&str, Measure); 4] = [
    ("PORO", Measure::Identity),
    ("PERMX", Measure::Permeability),
    ("PERMY", Measure::Permeability),
    ("PERMZ", Measure::Permeability),
];

/// Region arrays always written, defaulted to 1.
const MANDATORY_REGIONS: [&str; 2] = ["FIPNUM", "SATNUM"];

/// Region arrays written when the deck defines them.
const OPTIONAL_REGIONS: [&str; 4] = ["PVTNUM", "EQLNUM", "MULTNUM", "IMBNUM"];

/// Check caller-supplied INIT fields.
///
/// Init-tagged double fields and every integer field need a valid keyword
/// name and one value per active cell.
pub fn validate_extras(
    state: &EclipseState,
    extra_fields: &Solution,
    extra_int_fields: &BTreeMap<String, Vec<i32>>,
) -> Result<(), OutputError> {
    let active = state.grid.num_active();
    for (name, cell) in extra_fields.with_target(TargetType::Init) {
        check_keyword_name(name)?;
        check_len(name, cell.data.len(), active)?;
    }
    for (name, values) in extra_int_fields {
        check_keyword_name(name)?;
        check_len(name, values.len(), active)?;
    }
    Ok(())
}

/// Write the INIT keywords.
///
/// Callers must run [`validate_extras`] first; this function only fails
/// on I/O or codec errors.
pub fn write_init<W: Write>(
    w: &mut KeywordWriter<W>,
    state: &EclipseState,
    extra_fields: &Solution,
    extra_int_fields: &BTreeMap<String, Vec<i32>>,
) -> Result<(), OutputError> {
    let grid = &state.grid;
    let props = &state.properties;
    let units = state.units;
    let start: NaiveDateTime = state.schedule.time_map().start();

    w.write_inte("INTEHEAD", &intehead(state, start, &WellDims::default()))?;
    w.write_logi("LOGIHEAD", &logihead(state))?;
    w.write_doub("DOUBHEAD", &doubhead(0.0))?;

    let poro = props.double("PORO");
    let ntg = props.double_or_default("NTG");
    let porv: Vec<f64> = (0..grid.cartesian_size())
        .map(|g| {
            if !grid.is_active(g) {
                return 0.0;
            }
            let phi = poro.map_or(0.0, |p| p[g]);
            let net = ntg.as_ref().map_or(1.0, |n| n[g]);
            grid.cell_volume(g) * phi * net
        })
        .collect();
    w.write_real("PORV", &to_real(units, Measure::Volume, &porv))?;

    let cells = grid.active_cells();
    let depth: Vec<f64> = cells.iter().map(|&g| grid.cell_depth(g)).collect();
    w.write_real("DEPTH", &to_real(units, Measure::Length, &depth))?;
    for (axis, name) in ["DX", "DY", "DZ"].into_iter().enumerate() {
        let d: Vec<f64> = cells.iter().map(|&g| grid.cell_dims(g)[axis]).collect();
        w.write_real(name, &to_real(units, Measure::Length, &d))?;
    }

    for (name, measure) in OPTIONAL_DOUBLES {
        if let Some(values) = props.double(name) {
            w.write_real(name, &to_real(units, measure, &grid.compress(values)))?;
        }
    }
    if let Some(ntg) = &ntg {
        w.write_real("NTG", &to_real(units, Measure::Identity, &grid.compress(&ntg[..])))?;
    }

    for name in MANDATORY_REGIONS {
        let values = props
            .int_or_default(name)
            .map_or_else(|| vec![1; cells.len()], |v| grid.compress(&v[..]));
        w.write_inte(name, &values)?;
    }
    for name in OPTIONAL_REGIONS {
        if let Some(values) = props.int(name) {
            w.write_inte(name, &grid.compress(values))?;
        }
    }

    for (name, cell) in extra_fields.with_target(TargetType::Init) {
        w.write_real(name, &to_real(units, cell.measure, &cell.data))?;
    }
    for (name, values) in extra_int_fields {
        w.write_inte(name, values)?;
    }

    debug!(keywords = w.keywords_written(), "INIT keywords encoded");
    Ok(())
}
