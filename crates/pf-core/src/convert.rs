//! Unit-system normalization.
//!
//! Every calculation runs in SI internally. Inputs tagged with a [`UnitSystem`]
//! are converted on the way in with [`normalize`] and results are converted
//! back with [`denormalize`].
//!
//! # Key Design
//!
//! - **Conversion table**: one affine conversion per (quantity kind, unit system),
//!   derived once from `uom` unit definitions and never mutated afterwards
//! - **Internal temperature**: kelvin; SI users enter Celsius, Imperial users Fahrenheit
//! - **Text inputs**: [`parse_quantity`] accepts an explicit unit tag (`"4 in"`, `"150 gpm"`)

use std::collections::HashMap;
use std::fmt;
use std::str::FromStr;
use std::sync::LazyLock;

use thiserror::Error;

use crate::units::{
    Accel, Area, Density, DynVisc, KinVisc, Length, Mass, Power, Pressure, Temperature, Time,
    Velocity, Volume, VolumeRate, cubic_foot,
};

/// Unit system a problem is expressed in.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum UnitSystem {
    /// m, m³/s, Pa, kg/m³, Pa·s, W, °C
    #[default]
    #[cfg_attr(feature = "serde", serde(rename = "si", alias = "SI", alias = "metric"))]
    Si,
    /// ft, ft³/s, lbf/ft², slug/ft³, lbf·s/ft², hp, °F
    #[cfg_attr(
        feature = "serde",
        serde(rename = "imperial", alias = "IMPERIAL", alias = "english", alias = "ingles")
    )]
    Imperial,
}

impl fmt::Display for UnitSystem {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Si => write!(f, "SI"),
            Self::Imperial => write!(f, "Imperial"),
        }
    }
}

impl FromStr for UnitSystem {
    type Err = UnitError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "si" | "metric" => Ok(Self::Si),
            "imperial" | "english" | "ingles" | "us" => Ok(Self::Imperial),
            other => Err(UnitError::UnknownSystem {
                system: other.to_string(),
            }),
        }
    }
}

/// Dimension/quantity family of a value.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(rename_all = "snake_case"))]
pub enum QuantityKind {
    /// Lengths, diameters, roughness, heads (canonical: m)
    Length,
    /// Cross-section area (canonical: m²)
    Area,
    /// Mean velocity (canonical: m/s)
    Velocity,
    /// Volumetric flow rate (canonical: m³/s)
    FlowRate,
    /// Pressure or pressure difference (canonical: Pa)
    Pressure,
    /// Density (canonical: kg/m³)
    Density,
    /// Dynamic viscosity (canonical: Pa·s)
    DynamicViscosity,
    /// Kinematic viscosity (canonical: m²/s)
    KinematicViscosity,
    /// Power (canonical: W)
    Power,
    /// Temperature (canonical: K)
    Temperature,
    /// Acceleration (canonical: m/s²)
    Acceleration,
    /// Ratios, coefficients, Reynolds number
    Dimensionless,
}

impl QuantityKind {
    pub const ALL: [QuantityKind; 12] = [
        Self::Length,
        Self::Area,
        Self::Velocity,
        Self::FlowRate,
        Self::Pressure,
        Self::Density,
        Self::DynamicViscosity,
        Self::KinematicViscosity,
        Self::Power,
        Self::Temperature,
        Self::Acceleration,
        Self::Dimensionless,
    ];
}

impl fmt::Display for QuantityKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Length => write!(f, "Length"),
            Self::Area => write!(f, "Area"),
            Self::Velocity => write!(f, "Velocity"),
            Self::FlowRate => write!(f, "Flow Rate"),
            Self::Pressure => write!(f, "Pressure"),
            Self::Density => write!(f, "Density"),
            Self::DynamicViscosity => write!(f, "Dynamic Viscosity"),
            Self::KinematicViscosity => write!(f, "Kinematic Viscosity"),
            Self::Power => write!(f, "Power"),
            Self::Temperature => write!(f, "Temperature"),
            Self::Acceleration => write!(f, "Acceleration"),
            Self::Dimensionless => write!(f, "Dimensionless"),
        }
    }
}

impl FromStr for QuantityKind {
    type Err = UnitError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let key = s.trim().to_lowercase().replace([' ', '-'], "_");
        let kind = match key.as_str() {
            "length" | "diameter" | "roughness" | "head" => Self::Length,
            "area" => Self::Area,
            "velocity" => Self::Velocity,
            "flow_rate" | "flow" => Self::FlowRate,
            "pressure" => Self::Pressure,
            "density" => Self::Density,
            "dynamic_viscosity" | "viscosity" => Self::DynamicViscosity,
            "kinematic_viscosity" => Self::KinematicViscosity,
            "power" => Self::Power,
            "temperature" => Self::Temperature,
            "acceleration" => Self::Acceleration,
            "dimensionless" | "ratio" => Self::Dimensionless,
            _ => {
                return Err(UnitError::UnknownQuantity {
                    quantity: s.to_string(),
                });
            }
        };
        Ok(kind)
    }
}

/// Error in unit parsing or conversion.
#[derive(Error, Debug, Clone, PartialEq)]
pub enum UnitError {
    /// Input text did not parse to a number + optional unit
    #[error("Parse error: {0}")]
    ParseError(String),

    /// Unit not recognized for this quantity
    #[error("Unknown unit '{unit}' for {quantity}")]
    UnknownUnit { unit: String, quantity: String },

    /// Unit system name not recognized
    #[error("Unknown unit system '{system}'")]
    UnknownSystem { system: String },

    /// Quantity kind name not recognized
    #[error("Unknown quantity kind '{quantity}'")]
    UnknownQuantity { quantity: String },

    /// No conversion registered for this combination
    #[error("No conversion for {kind} in {system}")]
    Unsupported {
        kind: QuantityKind,
        system: UnitSystem,
    },
}

/// Affine conversion `si = value * scale + offset`.
#[derive(Debug, Clone, Copy, PartialEq)]
struct Conversion {
    scale: f64,
    offset: f64,
}

impl Conversion {
    const IDENTITY: Conversion = Conversion {
        scale: 1.0,
        offset: 0.0,
    };

    fn scale(scale: f64) -> Self {
        Self { scale, offset: 0.0 }
    }
}

static CONVERSIONS: LazyLock<HashMap<(QuantityKind, UnitSystem), Conversion>> =
    LazyLock::new(build_conversion_table);

fn build_conversion_table() -> HashMap<(QuantityKind, UnitSystem), Conversion> {
    use uom::si::acceleration::foot_per_second_squared;
    use uom::si::area::square_foot;
    use uom::si::length::foot;
    use uom::si::mass::slug;
    use uom::si::power::horsepower;
    use uom::si::pressure::pound_force_per_square_foot;
    use uom::si::thermodynamic_temperature::{degree_celsius, degree_fahrenheit};
    use uom::si::time::second;
    use uom::si::velocity::foot_per_second;

    let mut table = HashMap::new();

    for kind in QuantityKind::ALL {
        if kind != QuantityKind::Temperature {
            table.insert((kind, UnitSystem::Si), Conversion::IDENTITY);
        }
    }
    table.insert(
        (QuantityKind::Temperature, UnitSystem::Si),
        Conversion {
            scale: 1.0,
            offset: Temperature::new::<degree_celsius>(0.0).value,
        },
    );

    // uom stores ft³ truncated; derive it from the foot so Q = V·A holds exactly.
    let ft3_per_s: VolumeRate = cubic_foot() / Time::new::<second>(1.0);
    let slug_per_ft3: Density = Mass::new::<slug>(1.0) / cubic_foot();
    let lbf_s_per_ft2: DynVisc =
        Pressure::new::<pound_force_per_square_foot>(1.0) * Time::new::<second>(1.0);
    let ft2_per_s: KinVisc = Area::new::<square_foot>(1.0) / Time::new::<second>(1.0);
    let f0 = Temperature::new::<degree_fahrenheit>(0.0).value;
    let f1 = Temperature::new::<degree_fahrenheit>(1.0).value;

    let imperial = [
        (QuantityKind::Length, Conversion::scale(Length::new::<foot>(1.0).value)),
        (QuantityKind::Area, Conversion::scale(Area::new::<square_foot>(1.0).value)),
        (
            QuantityKind::Velocity,
            Conversion::scale(Velocity::new::<foot_per_second>(1.0).value),
        ),
        (
            QuantityKind::FlowRate,
            Conversion::scale(ft3_per_s.value),
        ),
        (
            QuantityKind::Pressure,
            Conversion::scale(Pressure::new::<pound_force_per_square_foot>(1.0).value),
        ),
        (QuantityKind::Density, Conversion::scale(slug_per_ft3.value)),
        (QuantityKind::DynamicViscosity, Conversion::scale(lbf_s_per_ft2.value)),
        (QuantityKind::KinematicViscosity, Conversion::scale(ft2_per_s.value)),
        (QuantityKind::Power, Conversion::scale(Power::new::<horsepower>(1.0).value)),
        (
            QuantityKind::Temperature,
            Conversion {
                scale: f1 - f0,
                offset: f0,
            },
        ),
        (
            QuantityKind::Acceleration,
            Conversion::scale(Accel::new::<foot_per_second_squared>(1.0).value),
        ),
        (QuantityKind::Dimensionless, Conversion::IDENTITY),
    ];
    for (kind, conversion) in imperial {
        table.insert((kind, UnitSystem::Imperial), conversion);
    }

    table
}

fn lookup(kind: QuantityKind, system: UnitSystem) -> Result<Conversion, UnitError> {
    CONVERSIONS
        .get(&(kind, system))
        .copied()
        .ok_or(UnitError::Unsupported { kind, system })
}

/// Convert `value`, expressed in `system`, to the internal SI value.
pub fn normalize(value: f64, kind: QuantityKind, system: UnitSystem) -> Result<f64, UnitError> {
    let c = lookup(kind, system)?;
    Ok(value * c.scale + c.offset)
}

/// Convert an internal SI value back to `system`.
pub fn denormalize(value_si: f64, kind: QuantityKind, system: UnitSystem) -> Result<f64, UnitError> {
    let c = lookup(kind, system)?;
    Ok((value_si - c.offset) / c.scale)
}

/// Display symbol for a quantity in a unit system.
pub fn unit_label(kind: QuantityKind, system: UnitSystem) -> &'static str {
    match (system, kind) {
        (UnitSystem::Si, QuantityKind::Length) => "m",
        (UnitSystem::Si, QuantityKind::Area) => "m²",
        (UnitSystem::Si, QuantityKind::Velocity) => "m/s",
        (UnitSystem::Si, QuantityKind::FlowRate) => "m³/s",
        (UnitSystem::Si, QuantityKind::Pressure) => "Pa",
        (UnitSystem::Si, QuantityKind::Density) => "kg/m³",
        (UnitSystem::Si, QuantityKind::DynamicViscosity) => "Pa·s",
        (UnitSystem::Si, QuantityKind::KinematicViscosity) => "m²/s",
        (UnitSystem::Si, QuantityKind::Power) => "W",
        (UnitSystem::Si, QuantityKind::Temperature) => "°C",
        (UnitSystem::Si, QuantityKind::Acceleration) => "m/s²",
        (UnitSystem::Imperial, QuantityKind::Length) => "ft",
        (UnitSystem::Imperial, QuantityKind::Area) => "ft²",
        (UnitSystem::Imperial, QuantityKind::Velocity) => "ft/s",
        (UnitSystem::Imperial, QuantityKind::FlowRate) => "ft³/s",
        (UnitSystem::Imperial, QuantityKind::Pressure) => "lbf/ft²",
        (UnitSystem::Imperial, QuantityKind::Density) => "slug/ft³",
        (UnitSystem::Imperial, QuantityKind::DynamicViscosity) => "lbf·s/ft²",
        (UnitSystem::Imperial, QuantityKind::KinematicViscosity) => "ft²/s",
        (UnitSystem::Imperial, QuantityKind::Power) => "hp",
        (UnitSystem::Imperial, QuantityKind::Temperature) => "°F",
        (UnitSystem::Imperial, QuantityKind::Acceleration) => "ft/s²",
        (_, QuantityKind::Dimensionless) => "",
    }
}

/// Parse a value with an explicit unit tag and return it in SI.
///
/// A bare number is taken to already be SI (kelvin for temperature).
///
/// # Examples
///
/// - `"4 in"` as [`QuantityKind::Length`] -> `0.1016`
/// - `"150 gpm"` as [`QuantityKind::FlowRate`]
/// - `"1 cP"` as [`QuantityKind::DynamicViscosity`] -> `0.001`
pub fn parse_quantity(raw_text: &str, kind: QuantityKind) -> Result<f64, UnitError> {
    let (value, unit) = split_value_and_unit(raw_text)?;
    let unit = unit.to_lowercase().replace(' ', "");

    let parsed = match kind {
        QuantityKind::Length => parse_length(value, &unit),
        QuantityKind::Area => parse_area(value, &unit),
        QuantityKind::Velocity => parse_velocity(value, &unit),
        QuantityKind::FlowRate => parse_flow_rate(value, &unit),
        QuantityKind::Pressure => parse_pressure(value, &unit),
        QuantityKind::Density => parse_density(value, &unit),
        QuantityKind::DynamicViscosity => parse_dynamic_viscosity(value, &unit),
        QuantityKind::KinematicViscosity => parse_kinematic_viscosity(value, &unit),
        QuantityKind::Power => parse_power(value, &unit),
        QuantityKind::Temperature => parse_temperature(value, &unit),
        QuantityKind::Acceleration => parse_acceleration(value, &unit),
        QuantityKind::Dimensionless => parse_dimensionless(value, &unit),
    };

    parsed.ok_or_else(|| UnitError::UnknownUnit {
        unit,
        quantity: kind.to_string(),
    })
}

fn parse_length(v: f64, unit: &str) -> Option<f64> {
    use uom::si::length::{centimeter, foot, inch, kilometer, meter, millimeter};
    let q = match unit {
        "" | "m" => Length::new::<meter>(v),
        "mm" => Length::new::<millimeter>(v),
        "cm" => Length::new::<centimeter>(v),
        "km" => Length::new::<kilometer>(v),
        "in" | "\"" => Length::new::<inch>(v),
        "ft" | "'" => Length::new::<foot>(v),
        _ => return None,
    };
    Some(q.value)
}

fn parse_area(v: f64, unit: &str) -> Option<f64> {
    use uom::si::area::{square_centimeter, square_foot, square_inch, square_meter};
    let q = match unit {
        "" | "m2" | "m^2" | "m²" => Area::new::<square_meter>(v),
        "cm2" | "cm^2" | "cm²" => Area::new::<square_centimeter>(v),
        "ft2" | "ft^2" | "ft²" => Area::new::<square_foot>(v),
        "in2" | "in^2" | "in²" => Area::new::<square_inch>(v),
        _ => return None,
    };
    Some(q.value)
}

fn parse_velocity(v: f64, unit: &str) -> Option<f64> {
    use uom::si::velocity::{foot_per_second, meter_per_second};
    let q = match unit {
        "" | "m/s" => Velocity::new::<meter_per_second>(v),
        "ft/s" | "fps" => Velocity::new::<foot_per_second>(v),
        _ => return None,
    };
    Some(q.value)
}

fn parse_flow_rate(v: f64, unit: &str) -> Option<f64> {
    use uom::si::time::second;
    use uom::si::volume_rate::{
        cubic_meter_per_hour, cubic_meter_per_second, gallon_per_minute, liter_per_minute,
        liter_per_second,
    };
    let q = match unit {
        "" | "m3/s" | "m^3/s" | "m³/s" => VolumeRate::new::<cubic_meter_per_second>(v),
        "m3/h" | "m^3/h" | "m³/h" => VolumeRate::new::<cubic_meter_per_hour>(v),
        "l/s" => VolumeRate::new::<liter_per_second>(v),
        "l/min" | "lpm" => VolumeRate::new::<liter_per_minute>(v),
        "gpm" | "gal/min" => VolumeRate::new::<gallon_per_minute>(v),
        "ft3/s" | "ft^3/s" | "ft³/s" | "cfs" => cubic_foot() * v / Time::new::<second>(1.0),
        _ => return None,
    };
    Some(q.value)
}

fn parse_pressure(v: f64, unit: &str) -> Option<f64> {
    use uom::si::pressure::{
        atmosphere, bar, kilopascal, megapascal, pascal, pound_force_per_square_foot,
        pound_force_per_square_inch,
    };
    // Differences, not absolute states: no gauge/absolute distinction here.
    let q = match unit {
        "" | "pa" => Pressure::new::<pascal>(v),
        "kpa" => Pressure::new::<kilopascal>(v),
        "mpa" => Pressure::new::<megapascal>(v),
        "bar" => Pressure::new::<bar>(v),
        "atm" => Pressure::new::<atmosphere>(v),
        "psi" => Pressure::new::<pound_force_per_square_inch>(v),
        "psf" | "lbf/ft2" | "lbf/ft^2" | "lbf/ft²" => {
            Pressure::new::<pound_force_per_square_foot>(v)
        }
        _ => return None,
    };
    Some(q.value)
}

fn parse_density(v: f64, unit: &str) -> Option<f64> {
    use uom::si::mass::{gram, kilogram, pound, slug};
    use uom::si::volume::{cubic_centimeter, cubic_meter};
    let q: Density = match unit {
        "" | "kg/m3" | "kg/m^3" | "kg/m³" => Mass::new::<kilogram>(v) / Volume::new::<cubic_meter>(1.0),
        "g/cm3" | "g/cm^3" | "g/cm³" => Mass::new::<gram>(v) / Volume::new::<cubic_centimeter>(1.0),
        "lbm/ft3" | "lbm/ft^3" | "lb/ft3" => Mass::new::<pound>(v) / cubic_foot(),
        "slug/ft3" | "slug/ft^3" | "slug/ft³" => Mass::new::<slug>(v) / cubic_foot(),
        _ => return None,
    };
    Some(q.value)
}

fn parse_dynamic_viscosity(v: f64, unit: &str) -> Option<f64> {
    use uom::si::dynamic_viscosity::{centipoise, pascal_second, poise};
    use uom::si::pressure::pound_force_per_square_foot;
    use uom::si::time::second;
    let q: DynVisc = match unit {
        "" | "pa.s" | "pa·s" | "pas" | "kg/m.s" | "kg/(m·s)" => DynVisc::new::<pascal_second>(v),
        "mpa.s" | "mpa·s" => DynVisc::new::<pascal_second>(v * 1e-3),
        "cp" => DynVisc::new::<centipoise>(v),
        "p" | "poise" => DynVisc::new::<poise>(v),
        "lbf.s/ft2" | "lbf·s/ft2" | "lbf·s/ft²" | "lbf.s/ft^2" => {
            Pressure::new::<pound_force_per_square_foot>(v) * Time::new::<second>(1.0)
        }
        _ => return None,
    };
    Some(q.value)
}

fn parse_kinematic_viscosity(v: f64, unit: &str) -> Option<f64> {
    use uom::si::diffusion_coefficient::{centistokes, square_meter_per_second, stokes};
    use uom::si::area::square_foot;
    use uom::si::time::second;
    let q: KinVisc = match unit {
        "" | "m2/s" | "m^2/s" | "m²/s" => KinVisc::new::<square_meter_per_second>(v),
        "cst" => KinVisc::new::<centistokes>(v),
        "st" | "stokes" => KinVisc::new::<stokes>(v),
        "ft2/s" | "ft^2/s" | "ft²/s" => Area::new::<square_foot>(v) / Time::new::<second>(1.0),
        _ => return None,
    };
    Some(q.value)
}

fn parse_power(v: f64, unit: &str) -> Option<f64> {
    use uom::si::power::{horsepower, kilowatt, watt};
    let q = match unit {
        "" | "w" => Power::new::<watt>(v),
        "kw" => Power::new::<kilowatt>(v),
        "hp" => Power::new::<horsepower>(v),
        _ => return None,
    };
    Some(q.value)
}

fn parse_temperature(v: f64, unit: &str) -> Option<f64> {
    use uom::si::thermodynamic_temperature::{degree_celsius, degree_fahrenheit, kelvin};
    let q = match unit {
        "" | "k" | "kelvin" => Temperature::new::<kelvin>(v),
        "c" | "°c" | "celsius" => Temperature::new::<degree_celsius>(v),
        "f" | "°f" | "fahrenheit" => Temperature::new::<degree_fahrenheit>(v),
        _ => return None,
    };
    Some(q.value)
}

fn parse_acceleration(v: f64, unit: &str) -> Option<f64> {
    use uom::si::acceleration::{foot_per_second_squared, meter_per_second_squared};
    let q = match unit {
        "" | "m/s2" | "m/s^2" | "m/s²" => Accel::new::<meter_per_second_squared>(v),
        "ft/s2" | "ft/s^2" | "ft/s²" => Accel::new::<foot_per_second_squared>(v),
        _ => return None,
    };
    Some(q.value)
}

fn parse_dimensionless(v: f64, unit: &str) -> Option<f64> {
    match unit {
        "" => Some(v),
        "%" => Some(v / 100.0),
        _ => None,
    }
}

/// Split a value+unit string into (numeric_value, unit_string).
///
/// Examples:
/// - "4in" -> (4.0, "in")
/// - "150 gpm" -> (150.0, "gpm")
/// - "1e-4" -> (0.0001, "")
fn split_value_and_unit(input: &str) -> Result<(f64, String), UnitError> {
    let trimmed = input.trim();

    let mut split_idx = trimmed.len();
    for (idx, c) in trimmed.char_indices() {
        let exponent = (c == 'e' || c == 'E')
            && trimmed[idx + 1..]
                .chars()
                .next()
                .is_some_and(|n| n.is_ascii_digit() || n == '-' || n == '+');
        if !(c.is_ascii_digit() || c == '.' || c == '-' || c == '+' || exponent) {
            split_idx = idx;
            break;
        }
    }

    let (num_part, unit_part) = trimmed.split_at(split_idx);
    let value: f64 = num_part.trim().parse().map_err(|_| {
        UnitError::ParseError(format!("Could not parse numeric value from '{}'", input))
    })?;

    Ok((value, unit_part.trim().to_string()))
}
