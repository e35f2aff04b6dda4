//! Per-well and per-completion results.
//!
//! Lookups on [`Wells`] are lenient: a missing well, completion or rate
//! kind reads as `0.0`. Reporting code may ask for wells that have not
//! produced data yet; that is not an error.

use std::collections::BTreeMap;

use crate::error::DataError;
use crate::rates::{RateKind, Rates};

/// Results for one connection between a well and an active grid cell.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct Completion {
    /// Active index of the completed cell.
    pub active_index: usize,
    /// Phase rates through this completion.
    pub rates: Rates,
    /// Connection pressure (SI).
    pub pressure: f64,
    /// Total reservoir rate (SI).
    pub reservoir_rate: f64,
}

impl Completion {
    /// Create a completion result.
    pub fn new(active_index: usize, rates: Rates, pressure: f64, reservoir_rate: f64) -> Self {
        Self {
            active_index,
            rates,
            pressure,
            reservoir_rate,
        }
    }
}

/// Results for one well.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct Well {
    /// Well-level phase rates.
    pub rates: Rates,
    /// Bottom-hole pressure (SI).
    pub bhp: f64,
    /// Well temperature (SI).
    pub temperature: f64,
    /// Active control mode code.
    pub control: i32,
    completions: Vec<Completion>,
}

impl Well {
    /// Create a well result with no completions.
    pub fn new(rates: Rates, bhp: f64, temperature: f64, control: i32) -> Self {
        Self {
            rates,
            bhp,
            temperature,
            control,
            completions: Vec::new(),
        }
    }

    /// Append a completion; active indices must be unique within the well.
    pub fn push_completion(&mut self, completion: Completion) -> Result<(), DataError> {
        if self.find_completion(completion.active_index).is_some() {
            return Err(DataError::DuplicateCompletion {
                active_index: completion.active_index,
            });
        }
        self.completions.push(completion);
        Ok(())
    }

    /// Completions in insertion order.
    pub fn completions(&self) -> &[Completion] {
        &self.completions
    }

    /// The completion in the given active cell, if any.
    pub fn find_completion(&self, active_index: usize) -> Option<&Completion> {
        self.completions
            .iter()
            .find(|c| c.active_index == active_index)
    }
}

/// Well results keyed by well name.
///
/// # Examples
///
/// ```
/// use eclio_core::{RateKind, Rates, Well, Wells};
///
/// let mut rates = Rates::new();
/// rates.set(RateKind::Wat, 5.67);
///
/// let mut wells = Wells::new();
/// wells.insert("OP_1", Well::new(rates, 1.23, 3.45, 1));
///
/// assert_eq!(wells.rate("OP_1", RateKind::Wat), 5.67);
/// assert_eq!(wells.rate("NO_SUCH_WELL", RateKind::Wat), 0.0);
/// ```
#[derive(Clone, Debug, Default, PartialEq)]
pub struct Wells {
    wells: BTreeMap<String, Well>,
}

impl Wells {
    /// Create an empty set.
    pub fn new() -> Self {
        Self::default()
    }

    /// Insert or replace the result for a well.
    pub fn insert(&mut self, name: impl Into<String>, well: Well) -> Option<Well> {
        self.wells.insert(name.into(), well)
    }

    /// Result for a well, if present.
    pub fn get(&self, name: &str) -> Option<&Well> {
        self.wells.get(name)
    }

    /// Mutable result for a well, if present.
    pub fn get_mut(&mut self, name: &str) -> Option<&mut Well> {
        self.wells.get_mut(name)
    }

    /// Well rate, or `0.0` when the well or rate kind is missing.
    pub fn rate(&self, well: &str, kind: RateKind) -> f64 {
        self.wells
            .get(well)
            .map_or(0.0, |w| w.rates.get_or(kind, 0.0))
    }

    /// Completion rate, or `0.0` when the well, completion or kind is missing.
    pub fn completion_rate(&self, well: &str, active_index: usize, kind: RateKind) -> f64 {
        self.wells
            .get(well)
            .and_then(|w| w.find_completion(active_index))
            .map_or(0.0, |c| c.rates.get_or(kind, 0.0))
    }

    /// Number of wells.
    pub fn len(&self) -> usize {
        self.wells.len()
    }

    /// Whether the set is empty.
    pub fn is_empty(&self) -> bool {
        self.wells.is_empty()
    }

    /// Iterate `(name, well)` sorted by name.
    pub fn iter(&self) -> impl Iterator<Item = (&str, &Well)> {
        self.wells.iter().map(|(k, v)| (k.as_str(), v))
    }
}

impl<S: Into<String>> FromIterator<(S, Well)> for Wells {
    fn from_iter<I: IntoIterator<Item = (S, Well)>>(iter: I) -> Self {
        Self {
            wells: iter.into_iter().map(|(k, v)| (k.into(), v)).collect(),
        }
    }
}
