//! Physical measures and the deck unit systems.
//!
//! Simulators work in SI internally. Every value that reaches an output
//! file is tagged with a [`Measure`] and converted to the deck's declared
//! [`UnitSystem`] at write time.

use std::fmt;

/// Physical quantity carried by a field or scalar.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum Measure {
    /// Dimensionless; never converted.
    Identity,
    /// Length (m, ft, cm).
    Length,
    /// Time (day, day, hour).
    Time,
    /// Density (kg/m3, lb/ft3, g/cc).
    Density,
    /// Pressure (bar, psi, atm).
    Pressure,
    /// Absolute temperature (K, °R, K).
    TemperatureAbsolute,
    /// Relative temperature (°C, °F, °C); the only affine measure.
    Temperature,
    /// Viscosity (cP in every system).
    Viscosity,
    /// Permeability (mD in every system).
    Permeability,
    /// Liquid surface volume (sm3, stb, scc).
    LiquidSurfaceVolume,
    /// Gas surface volume (sm3, Mscf, scc).
    GasSurfaceVolume,
    /// Reservoir volume (rm3, rb, rcc).
    Volume,
    /// Liquid surface rate (sm3/day, stb/day, scc/hour).
    LiquidSurfaceRate,
    /// Gas surface rate (sm3/day, Mscf/day, scc/hour).
    GasSurfaceRate,
    /// Reservoir rate (rm3/day, rb/day, rcc/hour).
    Rate,
    /// Transmissibility (cP·rm3/day/bar, cP·rb/day/psi, cP·rcc/hour/atm).
    Transmissibility,
    /// Mass (kg, lb, g).
    Mass,
    /// Gas-oil ratio (sm3/sm3, Mscf/stb, scc/scc).
    GasOilRatio,
    /// Oil-gas ratio (sm3/sm3, stb/Mscf, scc/scc).
    OilGasRatio,
}

/// Unit system declared by the input deck.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Default)]
pub enum UnitSystem {
    /// `METRIC`: bar, m, day.
    #[default]
    Metric,
    /// `FIELD`: psi, ft, day.
    Field,
    /// `LAB`: atm, cm, hour.
    Lab,
}

// ── SI factors ─────────────────────────────────────────────────

const DAY: f64 = 86_400.0;
const HOUR: f64 = 3_600.0;
const BARSA: f64 = 1.0e5;
const PSIA: f64 = 6_894.757_293_168_36;
const ATM: f64 = 101_325.0;
const FEET: f64 = 0.3048;
const STB: f64 = 0.158_987_294_928;
const MSCF: f64 = 1_000.0 * FEET * FEET * FEET;
const POUND: f64 = 0.453_592_37;
const CENTIPOISE: f64 = 1.0e-3;
const MILLIDARCY: f64 = 9.869_233e-16;
const CC: f64 = 1.0e-6;
const ZERO_CELSIUS: f64 = 273.15;
const ZERO_FAHRENHEIT_RANKINE: f64 = 459.67;

/// Affine map `si = value * scale + offset`.
#[derive(Clone, Copy, Debug, PartialEq)]
struct Conversion {
    scale: f64,
    offset: f64,
}

impl Conversion {
    const fn scale(scale: f64) -> Self {
        Self { scale, offset: 0.0 }
    }
}

impl UnitSystem {
    /// Eclipse header code for the unit system (`INTEHEAD` item 3).
    pub fn eclipse_id(self) -> i32 {
        match self {
            Self::Metric => 1,
            Self::Field => 2,
            Self::Lab => 3,
        }
    }

    /// Deck keyword naming the system.
    pub fn name(self) -> &'static str {
        match self {
            Self::Metric => "METRIC",
            Self::Field => "FIELD",
            Self::Lab => "LAB",
        }
    }

    /// Unit string written next to grid geometry (`GRIDUNIT`).
    pub fn length_unit(self) -> &'static str {
        match self {
            Self::Metric => "METRES",
            Self::Field => "FEET",
            Self::Lab => "CM",
        }
    }

    fn conversion(self, measure: Measure) -> Conversion {
        use Measure as M;
        match self {
            Self::Metric => match measure {
                M::Identity
                | M::Length
                | M::Density
                | M::TemperatureAbsolute
                | M::LiquidSurfaceVolume
                | M::GasSurfaceVolume
                | M::Volume
                | M::Mass
                | M::GasOilRatio
                | M::OilGasRatio => Conversion::scale(1.0),
                M::Time => Conversion::scale(DAY),
                M::Pressure => Conversion::scale(BARSA),
                M::Temperature => Conversion {
                    scale: 1.0,
                    offset: ZERO_CELSIUS,
                },
                M::Viscosity => Conversion::scale(CENTIPOISE),
                M::Permeability => Conversion::scale(MILLIDARCY),
                M::LiquidSurfaceRate | M::GasSurfaceRate | M::Rate => {
                    Conversion::scale(1.0 / DAY)
                }
                M::Transmissibility => Conversion::scale(CENTIPOISE / (DAY * BARSA)),
            },
            Self::Field => match measure {
                M::Identity => Conversion::scale(1.0),
                M::Length => Conversion::scale(FEET),
                M::Time => Conversion::scale(DAY),
                M::Density => Conversion::scale(POUND / (FEET * FEET * FEET)),
                M::Pressure => Conversion::scale(PSIA),
                M::TemperatureAbsolute => Conversion::scale(5.0 / 9.0),
                M::Temperature => Conversion {
                    scale: 5.0 / 9.0,
                    offset: ZERO_FAHRENHEIT_RANKINE * 5.0 / 9.0,
                },
                M::Viscosity => Conversion::scale(CENTIPOISE),
                M::Permeability => Conversion::scale(MILLIDARCY),
                M::LiquidSurfaceVolume | M::Volume => Conversion::scale(STB),
                M::GasSurfaceVolume => Conversion::scale(MSCF),
                M::LiquidSurfaceRate | M::Rate => Conversion::scale(STB / DAY),
                M::GasSurfaceRate => Conversion::scale(MSCF / DAY),
                M::Transmissibility => Conversion::scale(CENTIPOISE * STB / (DAY * PSIA)),
                M::Mass => Conversion::scale(POUND),
                M::GasOilRatio => Conversion::scale(MSCF / STB),
                M::OilGasRatio => Conversion::scale(STB / MSCF),
            },
            Self::Lab => match measure {
                M::Identity
                | M::TemperatureAbsolute
                | M::GasOilRatio
                | M::OilGasRatio => Conversion::scale(1.0),
                M::Length => Conversion::scale(0.01),
                M::Time => Conversion::scale(HOUR),
                M::Density => Conversion::scale(1_000.0),
                M::Pressure => Conversion::scale(ATM),
                M::Temperature => Conversion {
                    scale: 1.0,
                    offset: ZERO_CELSIUS,
                },
                M::Viscosity => Conversion::scale(CENTIPOISE),
                M::Permeability => Conversion::scale(MILLIDARCY),
                M::LiquidSurfaceVolume | M::GasSurfaceVolume | M::Volume => {
                    Conversion::scale(CC)
                }
                M::LiquidSurfaceRate | M::GasSurfaceRate | M::Rate => {
                    Conversion::scale(CC / HOUR)
                }
                M::Transmissibility => Conversion::scale(CENTIPOISE * CC / (HOUR * ATM)),
                M::Mass => Conversion::scale(1.0e-3),
            },
        }
    }

    /// Convert an SI value into this unit system.
    pub fn from_si(self, measure: Measure, value: f64) -> f64 {
        let c = self.conversion(measure);
        (value - c.offset) / c.scale
    }

    /// Convert a value in this unit system into SI.
    pub fn to_si(self, measure: Measure, value: f64) -> f64 {
        let c = self.conversion(measure);
        value * c.scale + c.offset
    }

    /// In-place [`from_si`](Self::from_si) over a slice.
    pub fn from_si_slice(self, measure: Measure, values: &mut [f64]) {
        if measure == Measure::Identity {
            return;
        }
        let c = self.conversion(measure);
        for v in values {
            *v = (*v - c.offset) / c.scale;
        }
    }

    /// In-place [`to_si`](Self::to_si) over a slice.
    pub fn to_si_slice(self, measure: Measure, values: &mut [f64]) {
        if measure == Measure::Identity {
            return;
        }
        let c = self.conversion(measure);
        for v in values {
            *v = *v * c.scale + c.offset;
        }
    }
}

impl fmt::Display for UnitSystem {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;

    const ALL_SYSTEMS: [UnitSystem; 3] = [UnitSystem::Metric, UnitSystem::Field, UnitSystem::Lab];

    const ALL_MEASURES: [Measure; 19] = [
        Measure::Identity,
        Measure::Length,
        Measure::Time,
        Measure::Density,
        Measure::Pressure,
        Measure::TemperatureAbsolute,
        Measure::Temperature,
        Measure::Viscosity,
        Measure::Permeability,
        Measure::LiquidSurfaceVolume,
        Measure::GasSurfaceVolume,
        Measure::Volume,
        Measure::LiquidSurfaceRate,
        Measure::GasSurfaceRate,
        Measure::Rate,
        Measure::Transmissibility,
        Measure::Mass,
        Measure::GasOilRatio,
        Measure::OilGasRatio,
    ];

    #[test]
    fn metric_pressure_is_bar() {
        let bar = UnitSystem::Metric.from_si(Measure::Pressure, 2.5e5);
        assert!((bar - 2.5).abs() < 1e-12);
    }

    #[test]
    fn field_permeability_is_millidarcy() {
        let md = UnitSystem::Field.from_si(Measure::Permeability, 9.869233e-16);
        assert!((md - 1.0).abs() < 1e-12);
    }

    #[test]
    fn identity_is_untouched_everywhere() {
        for units in ALL_SYSTEMS {
            assert_eq!(units.from_si(Measure::Identity, 0.3), 0.3);
            let mut data = vec![1.0, 2.0];
            units.from_si_slice(Measure::Identity, &mut data);
            assert_eq!(data, vec![1.0, 2.0]);
        }
    }

    #[test]
    fn celsius_and_fahrenheit_offsets() {
        let c = UnitSystem::Metric.from_si(Measure::Temperature, 373.15);
        assert!((c - 100.0).abs() < 1e-9);
        let f = UnitSystem::Field.from_si(Measure::Temperature, 373.15);
        assert!((f - 212.0).abs() < 1e-9);
    }

    #[test]
    fn eclipse_ids() {
        assert_eq!(UnitSystem::Metric.eclipse_id(), 1);
        assert_eq!(UnitSystem::Field.eclipse_id(), 2);
        assert_eq!(UnitSystem::Lab.eclipse_id(), 3);
    }

    proptest! {
        #[test]
        fn si_roundtrip(v in -1.0e6f64..1.0e6, m in 0usize..19, u in 0usize..3) {
            let units = ALL_SYSTEMS[u];
            let measure = ALL_MEASURES[m];
            let back = units.to_si(measure, units.from_si(measure, v));
            prop_assert!((back - v).abs() <= 1e-9 * v.abs().max(1.0));
        }
    }
}
