//! SI-to-output conversion and argument checks shared by the file writers.

use eclio_core::{Measure, UnitSystem};
use eclio_fortio::codec::validate_name;
use eclio_fortio::CHAR_LEN;

use crate::error::OutputError;

/// Convert SI values to `units` and narrow to `REAL`.
pub(crate) fn to_real(units: UnitSystem, measure: Measure, si: &[f64]) -> Vec<f32> {
    si.iter()
        .map(|&v| units.from_si(measure, v) as f32)
        .collect()
}

/// Convert SI values to `units`, keeping double precision.
pub(crate) fn to_doub(units: UnitSystem, measure: Measure, si: &[f64]) -> Vec<f64> {
    si.iter().map(|&v| units.from_si(measure, v)).collect()
}

/// Reject a name that cannot be a keyword header.
pub(crate) fn check_keyword_name(name: &str) -> Result<(), OutputError> {
    validate_name(name).map_err(|_| OutputError::InvalidArgument {
        reason: format!("keyword name {name:?} must be 1 to 8 printable ASCII characters"),
    })
}

/// Reject a `CHAR` value that does not fit an 8-byte slot.
pub(crate) fn check_char_value(what: &str, value: &str) -> Result<(), OutputError> {
    if value.len() > CHAR_LEN || !value.is_ascii() {
        return Err(OutputError::InvalidArgument {
            reason: format!("{what} name {value:?} must be at most 8 ASCII characters"),
        });
    }
    Ok(())
}

/// Reject a per-cell array whose length is not `expected`.
pub(crate) fn check_len(name: &str, len: usize, expected: usize) -> Result<(), OutputError> {
    if len != expected {
        return Err(OutputError::InvalidArgument {
            reason: format!("{name}: expected {expected} active-cell values, got {len}"),
        });
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn pressure_converts_to_bar() {
        let v = to_real(UnitSystem::Metric, Measure::Pressure, &[1.0e5, 2.5e5]);
        assert_eq!(v, [1.0, 2.5]);
        let v = to_doub(UnitSystem::Metric, Measure::Identity, &[0.25]);
        assert_eq!(v, [0.25]);
    }

    #[test]
    fn long_names_rejected() {
        assert!(check_keyword_name("STR_V").is_ok());
        assert!(matches!(
            check_keyword_name("STR_ULONGNAME"),
            Err(OutputError::InvalidArgument { .. })
        ));
        assert!(check_keyword_name("").is_err());
    }

    #[test]
    fn char_values_fit_slot() {
        assert!(check_char_value("group", "FIELD").is_ok());
        assert!(check_char_value("group", "TOO_LONG_GROUP").is_err());
    }

    #[test]
    fn length_mismatch_reported() {
        assert!(check_len("PRESSURE", 27, 27).is_ok());
        match check_len("PRESSURE", 26, 27) {
            Err(OutputError::InvalidArgument { reason }) => assert!(reason.contains("PRESSURE")),
            other => panic!("expected InvalidArgument, got {other:?}"),
        }
    }
}
