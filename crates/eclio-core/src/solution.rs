//! Named, unit-tagged per-cell fields.
//!
//! A [`Solution`] is built by the simulator for one report step (or for
//! the static INIT output) and consumed by the writer. Field order is the
//! insertion order, which fixes the keyword order on disk.

use indexmap::IndexMap;

use crate::error::DataError;
use crate::units::{Measure, UnitSystem};

/// Which output file (and which section of it) a field belongs to.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum TargetType {
    /// Restart solution, written between `STARTSOL` and `ENDSOL`.
    RestartSolution,
    /// Auxiliary restart data, written after `ENDSOL`.
    RestartAuxiliary,
    /// Static property written to the INIT file.
    Init,
    /// Summary-only data; never written to Eclipse binary files.
    Summary,
}

/// One field of a [`Solution`]: values in SI with their measure and target.
#[derive(Clone, Debug, PartialEq)]
pub struct CellData {
    /// Physical measure used to convert the SI values on output.
    pub measure: Measure,
    /// Per-active-cell values, in SI units.
    pub data: Vec<f64>,
    /// Target file classification.
    pub target: TargetType,
}

impl CellData {
    /// Bundle values with their measure and target.
    pub fn new(measure: Measure, data: Vec<f64>, target: TargetType) -> Self {
        Self {
            measure,
            data,
            target,
        }
    }
}

/// Insertion-ordered map from field name to [`CellData`].
///
/// # Examples
///
/// ```
/// use eclio_core::{Measure, Solution, TargetType};
///
/// let mut sol = Solution::new();
/// sol.insert("PRESSURE", Measure::Pressure, vec![1.0e5; 4], TargetType::RestartSolution)
///     .unwrap();
/// sol.insert("SWAT", Measure::Identity, vec![0.2; 4], TargetType::RestartSolution)
///     .unwrap();
///
/// let names: Vec<_> = sol.iter().map(|(name, _)| name).collect();
/// assert_eq!(names, ["PRESSURE", "SWAT"]);
/// assert!(sol.insert("SWAT", Measure::Identity, vec![], TargetType::RestartSolution).is_err());
/// ```
#[derive(Clone, Debug, Default, PartialEq)]
pub struct Solution {
    fields: IndexMap<String, CellData>,
}

impl Solution {
    /// Create an empty solution.
    pub fn new() -> Self {
        Self::default()
    }

    /// Build a solution from `(name, data)` pairs, failing on the first duplicate.
    pub fn from_fields<I, S>(fields: I) -> Result<Self, DataError>
    where
        I: IntoIterator<Item = (S, CellData)>,
        S: Into<String>,
    {
        let mut sol = Self::new();
        for (name, cell) in fields {
            sol.insert_cell_data(name.into(), cell)?;
        }
        Ok(sol)
    }

    /// Insert a field; fails with [`DataError::DuplicateField`] if the name is taken.
    pub fn insert(
        &mut self,
        name: impl Into<String>,
        measure: Measure,
        data: Vec<f64>,
        target: TargetType,
    ) -> Result<(), DataError> {
        self.insert_cell_data(name.into(), CellData::new(measure, data, target))
    }

    fn insert_cell_data(&mut self, name: String, cell: CellData) -> Result<(), DataError> {
        if self.fields.contains_key(&name) {
            return Err(DataError::DuplicateField { name });
        }
        self.fields.insert(name, cell);
        Ok(())
    }

    /// Values of a field.
    pub fn data(&self, name: &str) -> Result<&[f64], DataError> {
        self.fields
            .get(name)
            .map(|cell| cell.data.as_slice())
            .ok_or_else(|| DataError::FieldNotFound {
                name: name.to_string(),
            })
    }

    /// Mutable values of a field.
    pub fn data_mut(&mut self, name: &str) -> Result<&mut Vec<f64>, DataError> {
        self.fields
            .get_mut(name)
            .map(|cell| &mut cell.data)
            .ok_or_else(|| DataError::FieldNotFound {
                name: name.to_string(),
            })
    }

    /// Full entry for a field, if present.
    pub fn get(&self, name: &str) -> Option<&CellData> {
        self.fields.get(name)
    }

    /// Whether a field with this name exists.
    pub fn has(&self, name: &str) -> bool {
        self.fields.contains_key(name)
    }

    /// Number of fields.
    pub fn len(&self) -> usize {
        self.fields.len()
    }

    /// Whether the solution holds no fields.
    pub fn is_empty(&self) -> bool {
        self.fields.is_empty()
    }

    /// Iterate `(name, entry)` in insertion order.
    pub fn iter(&self) -> impl Iterator<Item = (&str, &CellData)> {
        self.fields.iter().map(|(k, v)| (k.as_str(), v))
    }

    /// Iterate the fields with a given target, in insertion order.
    pub fn with_target(&self, target: TargetType) -> impl Iterator<Item = (&str, &CellData)> {
        self.iter().filter(move |(_, cell)| cell.target == target)
    }

    /// Convert every field from SI into `units`, in place.
    pub fn convert_from_si(&mut self, units: UnitSystem) {
        for cell in self.fields.values_mut() {
            units.from_si_slice(cell.measure, &mut cell.data);
        }
    }

    /// Convert every field from `units` into SI, in place.
    pub fn convert_to_si(&mut self, units: UnitSystem) {
        for cell in self.fields.values_mut() {
            units.to_si_slice(cell.measure, &mut cell.data);
        }
    }
}

impl<'a> IntoIterator for &'a Solution {
    type Item = (&'a String, &'a CellData);
    type IntoIter = indexmap::map::Iter<'a, String, CellData>;

    fn into_iter(self) -> Self::IntoIter {
        self.fields.iter()
    }
}
