//! `INTEHEAD`, `LOGIHEAD` and `DOUBHEAD` header arrays.
//!
//! The same three arrays open the INIT file and every restart record.
//! Only the slots listed here are filled; every other slot is zero.

use chrono::{Datelike, NaiveDateTime, Timelike};

use crate::state::EclipseState;

/// Length of `INTEHEAD`.
pub const INTEHEAD_LEN: usize = 411;
/// Length of `LOGIHEAD`.
pub const LOGIHEAD_LEN: usize = 121;
/// Length of `DOUBHEAD`.
pub const DOUBHEAD_LEN: usize = 229;

/// `INTEHEAD` slot indices (zero-based).
pub mod ih {
    /// Unit system code.
    pub const UNIT: usize = 2;
    /// Cells in I.
    pub const NX: usize = 8;
    /// Cells in J.
    pub const NY: usize = 9;
    /// Cells in K.
    pub const NZ: usize = 10;
    /// Active cells.
    pub const NACTIV: usize = 11;
    /// Phase indicator bit mask.
    pub const PHASE: usize = 14;
    /// Wells in the record.
    pub const NWELLS: usize = 16;
    /// Maximum completions per well.
    pub const NCWMAX: usize = 17;
    /// Maximum wells per group.
    pub const NWGMAX: usize = 19;
    /// Groups in the record.
    pub const NGMAXZ: usize = 20;
    /// Integers per well in `IWEL`.
    pub const NIWELZ: usize = 24;
    /// Doubles per well in `XWEL`.
    pub const NXWELZ: usize = 26;
    /// Strings per well in `ZWEL`.
    pub const NZWELZ: usize = 27;
    /// Integers per completion in `ICON`.
    pub const NICONZ: usize = 32;
    /// Day of month.
    pub const DAY: usize = 64;
    /// Month.
    pub const MONTH: usize = 65;
    /// Year.
    pub const YEAR: usize = 66;
    /// Simulator id.
    pub const IPROG: usize = 94;
    /// Hour of day.
    pub const HOUR: usize = 206;
    /// Minute of hour.
    pub const MINUTE: usize = 207;
    /// Microseconds within the minute.
    pub const MICROSECOND: usize = 410;
}

/// `DOUBHEAD` slot holding elapsed simulation time in days.
pub const DH_TIME: usize = 0;

/// Simulator id written to `INTEHEAD` (Eclipse 100).
const SIMULATOR_ID: i32 = 100;

/// Well and connection dimensions of one restart record.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct WellDims {
    /// Wells written.
    pub nwells: usize,
    /// Largest completion count of any written well.
    pub ncwmax: usize,
    /// Largest well count of any group.
    pub nwgmax: usize,
    /// Distinct groups.
    pub ngroups: usize,
    /// Integers per well.
    pub niwelz: usize,
    /// Doubles per well.
    pub nxwelz: usize,
    /// Strings per well.
    pub nzwelz: usize,
    /// Integers per completion.
    pub niconz: usize,
}

/// Build `INTEHEAD` for a record dated `date`.
pub fn intehead(state: &EclipseState, date: NaiveDateTime, wells: &WellDims) -> Vec<i32> {
    let mut v = vec![0; INTEHEAD_LEN];
    let [nx, ny, nz] = state.grid.dims();
    v[ih::UNIT] = state.units.eclipse_id();
    v[ih::NX] = to_i32(nx);
    v[ih::NY] = to_i32(ny);
    v[ih::NZ] = to_i32(nz);
    v[ih::NACTIV] = to_i32(state.grid.num_active());
    v[ih::PHASE] = state.phases.indicator();
    v[ih::NWELLS] = to_i32(wells.nwells);
    v[ih::NCWMAX] = to_i32(wells.ncwmax);
    v[ih::NWGMAX] = to_i32(wells.nwgmax);
    v[ih::NGMAXZ] = to_i32(wells.ngroups);
    v[ih::NIWELZ] = to_i32(wells.niwelz);
    v[ih::NXWELZ] = to_i32(wells.nxwelz);
    v[ih::NZWELZ] = to_i32(wells.nzwelz);
    v[ih::NICONZ] = to_i32(wells.niconz);
    v[ih::DAY] = to_i32(date.day());
    v[ih::MONTH] = to_i32(date.month());
    v[ih::YEAR] = date.year();
    v[ih::IPROG] = SIMULATOR_ID;
    v[ih::HOUR] = to_i32(date.hour());
    v[ih::MINUTE] = to_i32(date.minute());
    v[ih::MICROSECOND] = to_i32(date.second() * 1_000_000 + date.nanosecond() / 1_000);
    v
}

/// Build `LOGIHEAD`. Slots 0 and 1 flag dissolved gas and vaporized oil,
/// both set when oil and gas are active together.
pub fn logihead(state: &EclipseState) -> Vec<bool> {
    let mut v = vec![false; LOGIHEAD_LEN];
    let live = state.phases.oil && state.phases.gas;
    v[0] = live;
    v[1] = live;
    v
}

/// Build `DOUBHEAD` for a record `elapsed_seconds` after the start.
pub fn doubhead(elapsed_seconds: f64) -> Vec<f64> {
    let mut v = vec![0.0; DOUBHEAD_LEN];
    v[DH_TIME] = elapsed_seconds / 86_400.0;
    v
}

/// Saturating conversion into a header slot.
pub(crate) fn to_i32<T: TryInto<i32>>(n: T) -> i32 {
    n.try_into().unwrap_or(i32::MAX)
}
