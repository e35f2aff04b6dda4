//! End-to-end runs against the 3x3x3 reference deck.
//!
//! Each `write_and_check` call is one simulator run: a fresh session
//! writes the INIT file, then restart records for steps `first..last`
//! into the same directory, and every file is read back.

use std::collections::BTreeMap;
use std::fs::{self, OpenOptions};
use std::io::Write;
use std::path::Path;

use eclio_core::{Measure, RateKind, Rates, Solution, TargetType, UnitSystem, Well, Wells};
use eclio_fortio::EclKeyword;
use eclio_grid::GridProperties;
use eclio_test_utils::{
    create_blackoil_state, elapsed_seconds, file_size, find_keyword, init_extras, read_keywords,
    reference_state, restart_record, restart_solution, summary_deck, REFERENCE_CELLS,
};
use eclio_writer::header::ih;
use eclio_writer::restart::{xwel, NIWELZ, NXWELZ, NZWELZ};
use eclio_writer::{EclipseIO, EclipseState, OutputError, WriterState};
use proptest::prelude::*;
use tempfile::tempdir;
use tracing_subscriber::EnvFilter;

fn init_tracing() {
    let _ = tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::from_default_env())
        .with_test_writer()
        .try_init();
}

/// `actual` within `rel` relative distance of `expected`.
fn assert_close(expected: f64, actual: f64, rel: f64) {
    let scale = expected.abs().max(actual.abs()).max(1e-12);
    assert!(
        (expected - actual).abs() / scale <= rel,
        "expected {expected}, got {actual}"
    );
}

fn reals(kw: &EclKeyword) -> Vec<f64> {
    kw.as_real().unwrap().iter().map(|&v| f64::from(v)).collect()
}

fn keyword<'a>(kws: &'a [EclKeyword], name: &str) -> &'a EclKeyword {
    find_keyword(kws, name).unwrap_or_else(|| panic!("{name} missing"))
}

fn check_restart_file(path: &Path, last: u32) {
    for i in 1..=last {
        let record = restart_record(path, i as i32);
        assert!(!record.is_empty(), "record {i} missing");
        let sol = create_blackoil_state(i, REFERENCE_CELLS);

        let pressure = reals(keyword(&record, "PRESSURE"));
        for (si, bar) in sol.data("PRESSURE").unwrap().iter().zip(&pressure) {
            assert_close(si / 1.0e5, *bar, 1e-6);
        }
        for name in ["SWAT", "SGAS"] {
            let values = reals(keyword(&record, name));
            assert_eq!(values.len(), REFERENCE_CELLS);
            for (expected, actual) in sol.data(name).unwrap().iter().zip(&values) {
                assert_close(*expected, *actual, 1e-6);
            }
        }

        let kro: f64 = reals(keyword(&record, "KRO")).iter().sum();
        let krg: f64 = reals(keyword(&record, "KRG")).iter().sum();
        assert_eq!(kro, f64::from(i) * REFERENCE_CELLS as f64);
        assert_eq!(krg, 10.0 * f64::from(i) * REFERENCE_CELLS as f64);
    }
}

fn check_init_file(path: &Path) {
    let kws = read_keywords(path);
    for name in ["NTG", "FIPNUM", "SATNUM", "TRANX", "TRANY", "TRANZ", "STR_V"] {
        assert!(find_keyword(&kws, name).is_some(), "{name} missing from INIT");
    }
    for poro in reals(keyword(&kws, "PORO")) {
        assert_close(0.3, poro, 1e-6);
    }
    for permx in reals(keyword(&kws, "PERMX")) {
        assert_close(1.0, permx, 1e-6);
    }
    assert_eq!(keyword(&kws, "SATNUM").as_inte().unwrap(), &[2; REFERENCE_CELLS]);
    assert_eq!(keyword(&kws, "FIPNUM").as_inte().unwrap(), &[3; REFERENCE_CELLS]);

    let str_v = keyword(&kws, "STR_V").as_inte().unwrap();
    assert_eq!(str_v[2], 67);
    assert_eq!(str_v[26], 89);
}

fn check_egrid_file(path: &Path, state: &EclipseState) {
    let kws = read_keywords(path);
    let coord = reals(keyword(&kws, "COORD"));
    assert_eq!(coord.len(), state.grid.coord().len());
    for (expected, actual) in state.grid.coord().iter().zip(&coord) {
        assert_close(*expected, *actual, 1e-6);
    }
    let zcorn = reals(keyword(&kws, "ZCORN"));
    assert_eq!(zcorn.len(), state.grid.zcorn().len());
    for (expected, actual) in state.grid.zcorn().iter().zip(&zcorn) {
        assert_close(*expected, *actual, 1e-6);
    }
    assert_eq!(keyword(&kws, "ACTNUM").as_inte().unwrap(), &[1; REFERENCE_CELLS]);
}

fn write_steps(io: &mut EclipseIO, steps: std::ops::Range<u32>) {
    let empty = BTreeMap::new();
    for i in steps {
        io.write_time_step(
            i,
            false,
            elapsed_seconds(i),
            &restart_solution(i),
            &Wells::new(),
            &empty,
            &empty,
            &empty,
        )
        .unwrap();
    }
}

fn write_and_check(dir: &Path, first: u32, last: u32) -> u64 {
    let mut io = EclipseIO::from_state(reference_state("FOO", dir)).unwrap();
    io.write_initial(&Solution::new(), &BTreeMap::new()).unwrap();

    let (extra, mut ints) = init_extras();
    ints.insert("STR_ULONGNAME".to_string(), vec![1; 8]);
    let before = fs::read(io.file_path("INIT")).unwrap();
    let err = io.write_initial(&extra, &ints).unwrap_err();
    assert!(matches!(err, OutputError::InvalidArgument { .. }));
    assert_eq!(fs::read(io.file_path("INIT")).unwrap(), before);

    ints.remove("STR_ULONGNAME");
    io.write_initial(&extra, &ints).unwrap();

    for i in first..last {
        write_steps(&mut io, i..i + 1);
        check_restart_file(&io.file_path("UNRST"), i);
    }

    check_init_file(&io.file_path("INIT"));
    check_egrid_file(&io.file_path("EGRID"), io.eclipse_state());
    file_size(&io.file_path("UNRST"))
}

#[test]
fn restart_file_is_overwritten_on_rerun() {
    init_tracing();
    let dir = tempdir().unwrap();
    let size = write_and_check(dir.path(), 1, 5);
    for _ in 0..3 {
        assert_eq!(size, write_and_check(dir.path(), 1, 5));
    }

    // Restarting from step 3 with the same end step keeps the size.
    assert_eq!(size, write_and_check(dir.path(), 3, 5));
    // More steps after the restart point grow the file.
    assert!(size < write_and_check(dir.path(), 3, 7));
    // Fewer steps truncate it again.
    assert_eq!(size, write_and_check(dir.path(), 3, 5));
}

#[test]
fn restart_steps_track_the_latest_run() {
    let dir = tempdir().unwrap();
    write_and_check(dir.path(), 1, 7);
    let io = EclipseIO::from_state(reference_state("FOO", dir.path())).unwrap();
    assert_eq!(io.restart_steps().unwrap(), [1, 2, 3, 4, 5, 6]);
    assert_eq!(io.last_written_step(), None);

    write_and_check(dir.path(), 2, 4);
    assert_eq!(io.restart_steps().unwrap(), [1, 2, 3]);
}

#[test]
fn wells_without_connections_are_recorded() {
    let dir = tempdir().unwrap();
    write_and_check(dir.path(), 1, 2);
    let record = restart_record(&dir.path().join("FOO.UNRST"), 1);

    let iwel = keyword(&record, "IWEL").as_inte().unwrap();
    assert_eq!(iwel.len(), 2 * NIWELZ);
    assert_eq!(&iwel[..2], &[1, 1]);
    assert_eq!(&iwel[NIWELZ..NIWELZ + 2], &[3, 3]);

    let zwel = keyword(&record, "ZWEL").as_chars().unwrap();
    assert_eq!(zwel[0], "INJ");
    assert_eq!(zwel[NZWELZ], "PROD");
    assert!(keyword(&record, "ICON").is_empty());
    assert!(keyword(&record, "XWEL").as_doub().unwrap().iter().all(|&x| x == 0.0));
}

#[test]
fn field_units_read_back_as_si() {
    let dir = tempdir().unwrap();
    let mut state = reference_state("FLD", dir.path());
    state.units = UnitSystem::Field;
    let units = state.units;
    let mut io = EclipseIO::from_state(state).unwrap();

    let thickness: Vec<f64> = (0..REFERENCE_CELLS).map(|c| 1.5 + c as f64).collect();
    let mut extra = Solution::new();
    extra
        .insert("CELLDZ", Measure::Length, thickness.clone(), TargetType::Init)
        .unwrap();
    io.write_initial(&extra, &BTreeMap::new()).unwrap();

    let init = read_keywords(&io.file_path("INIT"));
    assert_eq!(keyword(&init, "INTEHEAD").as_inte().unwrap()[ih::UNIT], 2);
    let dz = reals(keyword(&init, "CELLDZ"));
    for (expected, feet) in thickness.iter().zip(&dz) {
        assert_close(*expected, units.to_si(Measure::Length, *feet), 1e-4);
    }

    let mut rates = Rates::new();
    rates
        .set(RateKind::Oil, 0.01)
        .set(RateKind::Wat, 0.004)
        .set(RateKind::Gas, 2.5);
    let mut wells = Wells::new();
    wells.insert("PROD", Well::new(rates, 2.0e7, 0.0, 1));
    let sol = create_blackoil_state(1, REFERENCE_CELLS);
    let empty = BTreeMap::new();
    io.write_time_step(1, false, elapsed_seconds(1), &sol, &wells, &empty, &empty, &empty)
        .unwrap();

    let record = restart_record(&io.file_path("UNRST"), 1);
    let pressure = reals(keyword(&record, "PRESSURE"));
    for (si, psi) in sol.data("PRESSURE").unwrap().iter().zip(&pressure) {
        assert_close(*si, units.to_si(Measure::Pressure, *psi), 1e-4);
    }

    let xw = keyword(&record, "XWEL").as_doub().unwrap();
    let prod = &xw[NXWELZ..2 * NXWELZ];
    let liquid = units.to_si(Measure::LiquidSurfaceRate, prod[xwel::OIL]);
    assert_close(0.01, liquid, 1e-4);
    assert_close(0.004, units.to_si(Measure::LiquidSurfaceRate, prod[xwel::WAT]), 1e-4);
    assert_close(0.014, units.to_si(Measure::LiquidSurfaceRate, prod[xwel::LIQ]), 1e-4);
    assert_close(2.5, units.to_si(Measure::GasSurfaceRate, prod[xwel::GAS]), 1e-4);
    assert_close(2.0e7, units.to_si(Measure::Pressure, prod[xwel::BHP]), 1e-4);
    // One m3/s of liquid is about 543 thousand stb/day.
    assert!(prod[xwel::OIL] > 5_000.0);
}

#[test]
fn garbage_tail_drops_the_record_it_follows() {
    let dir = tempdir().unwrap();
    let mut io = EclipseIO::from_state(reference_state("FOO", dir.path())).unwrap();
    write_steps(&mut io, 1..3);
    let path = io.file_path("UNRST");
    let clean = file_size(&path);

    OpenOptions::new()
        .append(true)
        .open(&path)
        .unwrap()
        .write_all(&[0, 0, 0, 16, b'S', b'E', b'Q'])
        .unwrap();
    // Record 2 may have been cut short, so it is no longer trusted.
    assert_eq!(io.restart_steps().unwrap(), [1]);

    write_steps(&mut io, 2..3);
    assert_eq!(io.restart_steps().unwrap(), [1, 2]);
    assert_eq!(file_size(&path), clean);
    check_restart_file(&path, 2);
}

#[test]
fn record_cut_mid_array_is_dropped() {
    let dir = tempdir().unwrap();
    let mut io = EclipseIO::from_state(reference_state("FOO", dir.path())).unwrap();
    write_steps(&mut io, 1..3);
    let path = io.file_path("UNRST");
    let full = file_size(&path);

    let file = OpenOptions::new().write(true).open(&path).unwrap();
    file.set_len(full - 10).unwrap();
    drop(file);
    assert_eq!(io.restart_steps().unwrap(), [1]);

    write_steps(&mut io, 3..4);
    assert_eq!(io.restart_steps().unwrap(), [1, 3]);
    assert!(restart_record(&path, 2).is_empty());
}

#[test]
fn session_exposes_region_cache() {
    let dir = tempdir().unwrap();
    let (grid, props, schedule) = summary_deck();
    let mut state = EclipseState::new(grid, props, schedule, UnitSystem::Metric);
    state.io_config.output_dir = dir.path().to_path_buf();
    let io = EclipseIO::from_state(state).unwrap();
    assert_eq!(io.writer_state(), WriterState::Uninitialized);
    assert_eq!(io.region_cache().completions(1).len(), 3);
    assert!(io.region_cache().completions(4).is_empty());
}

#[test]
fn property_size_mismatch_fails_session_creation() {
    let dir = tempdir().unwrap();
    let (grid, _, schedule) = summary_deck();
    let mut state = EclipseState::new(grid, GridProperties::new(10), schedule, UnitSystem::Metric);
    state.io_config.output_dir = dir.path().to_path_buf();
    let err = EclipseIO::from_state(state).unwrap_err();
    assert!(matches!(err, OutputError::Grid(_)));
    assert!(fs::read_dir(dir.path()).unwrap().next().is_none());
}

proptest! {
    #![proptest_config(ProptestConfig::with_cases(8))]

    #[test]
    fn file_holds_steps_since_last_restart_point(
        runs in prop::collection::vec((1u32..6, 1u32..4), 1..5),
    ) {
        let dir = tempdir().unwrap();
        let mut model: Vec<i32> = Vec::new();
        for (start, count) in runs {
            let mut io = EclipseIO::from_state(reference_state("P", dir.path())).unwrap();
            write_steps(&mut io, start..start + count);
            model.retain(|&s| s < start as i32);
            model.extend(start as i32..(start + count) as i32);
            prop_assert_eq!(io.restart_steps().unwrap(), model.clone());
        }
    }
}
