//! Sparse phase-rate container keyed by [`RateKind`].

use std::fmt;

use crate::error::DataError;

/// The closed set of rate kinds reported per well and per completion.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum RateKind {
    /// Surface water rate.
    Wat,
    /// Surface oil rate.
    Oil,
    /// Surface gas rate.
    Gas,
    /// Polymer injection rate.
    Polymer,
    /// Solvent rate.
    Solvent,
    /// Energy rate.
    Energy,
    /// Gas dissolved in the oil phase.
    DissolvedGas,
    /// Oil vaporized in the gas phase.
    VaporizedOil,
    /// Reservoir water rate.
    ReservoirWater,
    /// Reservoir oil rate.
    ReservoirOil,
    /// Reservoir gas rate.
    ReservoirGas,
}

impl RateKind {
    /// Number of rate kinds.
    pub const COUNT: usize = 11;

    /// Every rate kind, in ordinal order.
    pub const ALL: [RateKind; Self::COUNT] = [
        Self::Wat,
        Self::Oil,
        Self::Gas,
        Self::Polymer,
        Self::Solvent,
        Self::Energy,
        Self::DissolvedGas,
        Self::VaporizedOil,
        Self::ReservoirWater,
        Self::ReservoirOil,
        Self::ReservoirGas,
    ];

    fn ordinal(self) -> usize {
        self as usize
    }

    /// Short lowercase name.
    pub fn name(self) -> &'static str {
        match self {
            Self::Wat => "wat",
            Self::Oil => "oil",
            Self::Gas => "gas",
            Self::Polymer => "polymer",
            Self::Solvent => "solvent",
            Self::Energy => "energy",
            Self::DissolvedGas => "dissolved_gas",
            Self::VaporizedOil => "vaporized_oil",
            Self::ReservoirWater => "reservoir_water",
            Self::ReservoirOil => "reservoir_oil",
            Self::ReservoirGas => "reservoir_gas",
        }
    }
}

impl fmt::Display for RateKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

/// Sparse map from [`RateKind`] to value.
///
/// Backed by a fixed array of `Option<f64>` indexed by the kind's ordinal,
/// so presence is tracked independently of the value: `set(kind, 0.0)`
/// makes `has(kind)` true.
///
/// # Examples
///
/// ```
/// use eclio_core::{RateKind, Rates};
///
/// let mut rates = Rates::new();
/// rates.set(RateKind::Wat, 10.0);
/// assert!(rates.has(RateKind::Wat));
/// assert_eq!(rates.get_or(RateKind::Oil, 1.0), 1.0);
/// assert!(rates.get(RateKind::Oil).is_err());
/// ```
#[derive(Clone, Debug, Default, PartialEq)]
pub struct Rates {
    values: [Option<f64>; RateKind::COUNT],
}

impl Rates {
    /// Create an empty rate set.
    pub fn new() -> Self {
        Self::default()
    }

    /// Set (or overwrite) the value for `kind`.
    pub fn set(&mut self, kind: RateKind, value: f64) -> &mut Self {
        self.values[kind.ordinal()] = Some(value);
        self
    }

    /// Whether `kind` has been set.
    pub fn has(&self, kind: RateKind) -> bool {
        self.lookup(kind).is_some()
    }

    /// Strict lookup; fails with [`DataError::RateNotSet`] when absent.
    pub fn get(&self, kind: RateKind) -> Result<f64, DataError> {
        self.lookup(kind).ok_or(DataError::RateNotSet { kind })
    }

    /// Lenient lookup returning `default` when absent.
    pub fn get_or(&self, kind: RateKind, default: f64) -> f64 {
        self.lookup(kind).unwrap_or(default)
    }

    /// Iterate over the kinds that are set, in ordinal order.
    pub fn iter(&self) -> impl Iterator<Item = (RateKind, f64)> + '_ {
        RateKind::ALL
            .iter()
            .filter_map(|&kind| self.lookup(kind).map(|v| (kind, v)))
    }

    /// Whether no kind has been set.
    pub fn is_empty(&self) -> bool {
        self.values.iter().all(Option::is_none)
    }

    fn lookup(&self, kind: RateKind) -> Option<f64> {
        self.values[kind.ordinal()]
    }
}
