//! EGRID file body.

use std::io::Write;

use eclio_core::Measure;
use eclio_fortio::KeywordWriter;
use tracing::debug;

use crate::convert::to_real;
use crate::error::OutputError;
use crate::state::EclipseState;

/// Length of `FILEHEAD` and `GRIDHEAD`.
const HEAD_LEN: usize = 100;
/// `FILEHEAD[0]`: file format version.
const FILE_VERSION: i32 = 3;
/// `FILEHEAD[1]`: release year of the format.
const FILE_RELEASE_YEAR: i32 = 2007;
/// `GRIDHEAD[0]`: corner-point grid.
const CORNER_POINT: i32 = 1;
/// `GRIDHEAD[24]`: number of reservoirs.
const NUM_RESERVOIRS: i32 = 1;

/// Write the grid keywords of an EGRID file.
///
/// Keyword order: `FILEHEAD`, `GRIDUNIT`, `GRIDHEAD`, `COORD`, `ZCORN`,
/// `ACTNUM`, `ENDGRID`. Geometry is converted to the output length unit.
pub fn write_egrid<W: Write>(
    w: &mut KeywordWriter<W>,
    state: &EclipseState,
) -> Result<(), OutputError> {
    let grid = &state.grid;
    let [nx, ny, nz] = grid.dims();

    let mut filehead = vec![0; HEAD_LEN];
    filehead[0] = FILE_VERSION;
    filehead[1] = FILE_RELEASE_YEAR;
    w.write_inte("FILEHEAD", &filehead)?;

    w.write_char("GRIDUNIT", &[state.units.length_unit(), ""])?;

    let mut gridhead = vec![0; HEAD_LEN];
    gridhead[0] = CORNER_POINT;
    gridhead[1] = dim(nx)?;
    gridhead[2] = dim(ny)?;
    gridhead[3] = dim(nz)?;
    gridhead[24] = NUM_RESERVOIRS;
    w.write_inte("GRIDHEAD", &gridhead)?;

    w.write_real("COORD", &to_real(state.units, Measure::Length, grid.coord()))?;
    w.write_real("ZCORN", &to_real(state.units, Measure::Length, grid.zcorn()))?;
    w.write_inte("ACTNUM", &grid.actnum())?;
    w.write_inte("ENDGRID", &[])?;

    debug!(nx, ny, nz, active = grid.num_active(), "grid keywords encoded");
    Ok(())
}

fn dim(n: usize) -> Result<i32, OutputError> {
    i32::try_from(n).map_err(|_| OutputError::InvalidArgument {
        reason: format!("grid dimension {n} does not fit GRIDHEAD"),
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use eclio_core::UnitSystem;
    use eclio_fortio::KeywordReader;
    use eclio_grid::{EclipseGrid, GridProperties, Schedule};

    fn encode(units: UnitSystem) -> Vec<eclio_fortio::EclKeyword> {
        let grid = EclipseGrid::from_cartesian([2, 1, 1], &[1.0, 2.0], &[1.0], &[0.5], &[10.0; 2])
            .unwrap()
            .with_actnum(vec![1, 0])
            .unwrap();
        let state = EclipseState::new(grid, GridProperties::new(2), Schedule::default(), units);
        let mut buf = Vec::new();
        write_egrid(&mut KeywordWriter::new(&mut buf), &state).unwrap();
        KeywordReader::new(buf.as_slice())
            .keywords()
            .collect::<Result<Vec<_>, _>>()
            .unwrap()
    }

    #[test]
    fn keyword_order() {
        let names: Vec<_> = encode(UnitSystem::Metric)
            .into_iter()
            .map(|kw| kw.name)
            .collect();
        assert_eq!(
            names,
            ["FILEHEAD", "GRIDUNIT", "GRIDHEAD", "COORD", "ZCORN", "ACTNUM", "ENDGRID"]
        );
    }

    #[test]
    fn head_and_actnum() {
        let kws = encode(UnitSystem::Metric);
        let gridhead = kws[2].as_inte().unwrap();
        assert_eq!(&gridhead[..4], &[1, 2, 1, 1]);
        assert_eq!(kws[1].as_chars().unwrap(), &["METRES".to_string(), String::new()]);
        assert_eq!(kws[5].as_inte().unwrap(), &[1, 0]);
        assert!(kws[6].is_empty());
    }

    #[test]
    fn geometry_in_output_units() {
        let metric = encode(UnitSystem::Metric);
        let field = encode(UnitSystem::Field);
        let zm = metric[4].as_real().unwrap();
        let zf = field[4].as_real().unwrap();
        assert_eq!(zm.len(), 16);
        assert_eq!(zm[0], 10.0);
        assert!((zf[0] - (10.0 / 0.3048) as f32).abs() < 1e-4);
        assert_eq!(field[1].as_chars().unwrap()[0], "FEET");
    }
}
