//! Static per-cell keyword arrays.

use std::borrow::Cow;

use indexmap::IndexMap;

use crate::error::GridError;

/// Integer keywords with a deck default; absent keywords read as this value.
const INT_DEFAULTS: &[(&str, i32)] = &[
    ("FIPNUM", 1),
    ("SATNUM", 1),
    ("PVTNUM", 1),
    ("EQLNUM", 1),
    ("MULTNUM", 1),
    ("IMBNUM", 1),
    ("ROCKNUM", 1),
];

/// Double keywords with a deck default.
const DOUBLE_DEFAULTS: &[(&str, f64)] = &[
    ("NTG", 1.0),
    ("MULTX", 1.0),
    ("MULTY", 1.0),
    ("MULTZ", 1.0),
];

/// Static properties defined on the full Cartesian box, in SI units.
///
/// Holds what the deck's GRID/PROPS/REGIONS sections produced. Keywords
/// with a deck default (region numbers, `NTG`, `MULT*`) can be read with
/// the `*_or_default` accessors even when the deck never defined them.
#[derive(Clone, Debug, Default)]
pub struct GridProperties {
    cartesian_size: usize,
    ints: IndexMap<String, Vec<i32>>,
    doubles: IndexMap<String, Vec<f64>>,
}

impl GridProperties {
    /// Empty property set for a box of `cartesian_size` cells.
    pub fn new(cartesian_size: usize) -> Self {
        Self {
            cartesian_size,
            ints: IndexMap::new(),
            doubles: IndexMap::new(),
        }
    }

    /// Number of cells every array must cover.
    pub fn cartesian_size(&self) -> usize {
        self.cartesian_size
    }

    /// Define (or replace) an integer keyword.
    pub fn insert_int(&mut self, name: impl Into<String>, values: Vec<i32>) -> Result<(), GridError> {
        let name = name.into();
        self.check_size(&name, values.len())?;
        self.ints.insert(name, values);
        Ok(())
    }

    /// Define (or replace) a double keyword, values in SI.
    pub fn insert_double(
        &mut self,
        name: impl Into<String>,
        values: Vec<f64>,
    ) -> Result<(), GridError> {
        let name = name.into();
        self.check_size(&name, values.len())?;
        self.doubles.insert(name, values);
        Ok(())
    }

    /// Integer keyword as defined in the deck.
    pub fn int(&self, name: &str) -> Option<&[i32]> {
        self.ints.get(name).map(Vec::as_slice)
    }

    /// Double keyword as defined in the deck.
    pub fn double(&self, name: &str) -> Option<&[f64]> {
        self.doubles.get(name).map(Vec::as_slice)
    }

    /// Whether the deck defined the integer keyword.
    pub fn has_int(&self, name: &str) -> bool {
        self.ints.contains_key(name)
    }

    /// Whether the deck defined the double keyword.
    pub fn has_double(&self, name: &str) -> bool {
        self.doubles.contains_key(name)
    }

    /// Integer keyword, falling back to its deck default.
    ///
    /// Returns `None` only for keywords that are neither defined nor defaulted.
    pub fn int_or_default(&self, name: &str) -> Option<Cow<'_, [i32]>> {
        if let Some(values) = self.ints.get(name) {
            return Some(Cow::Borrowed(values));
        }
        INT_DEFAULTS
            .iter()
            .find(|(kw, _)| *kw == name)
            .map(|&(_, v)| Cow::Owned(vec![v; self.cartesian_size]))
    }

    /// Double keyword, falling back to its deck default.
    pub fn double_or_default(&self, name: &str) -> Option<Cow<'_, [f64]>> {
        if let Some(values) = self.doubles.get(name) {
            return Some(Cow::Borrowed(values));
        }
        DOUBLE_DEFAULTS
            .iter()
            .find(|(kw, _)| *kw == name)
            .map(|&(_, v)| Cow::Owned(vec![v; self.cartesian_size]))
    }

    fn check_size(&self, name: &str, found: usize) -> Result<(), GridError> {
        if found != self.cartesian_size {
            return Err(GridError::SizeMismatch {
                name: name.to_string(),
                expected: self.cartesian_size,
                found,
            });
        }
        Ok(())
    }
}
