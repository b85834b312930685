//! Fluid property resolution.
//!
//! Turns a [`FluidSpec`] into SI density and viscosity. Overrides take
//! precedence over tabulated values unconditionally.

use crate::catalog::lookup;
use crate::error::{FluidError, FluidResult};

/// Resolved fluid properties (SI).
#[derive(Debug, Clone, Copy, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct FluidProperties {
    /// Density [kg/m³]
    pub density: f64,
    /// Dynamic viscosity [Pa·s]
    pub viscosity: f64,
}

impl FluidProperties {
    /// Kinematic viscosity [m²/s].
    pub fn kinematic_viscosity(&self) -> f64 {
        self.viscosity / self.density
    }
}

/// How the working fluid is specified.
#[derive(Debug, Clone, PartialEq)]
pub enum FluidSpec {
    /// A catalog fluid at a temperature, with optional per-property overrides.
    Named {
        name: String,
        /// Temperature [K]
        temperature_k: f64,
        density_override: Option<f64>,
        viscosity_override: Option<f64>,
    },
    /// Properties given directly.
    Custom { density: f64, viscosity: f64 },
}

impl FluidSpec {
    pub fn named(name: impl Into<String>, temperature_k: f64) -> Self {
        Self::Named {
            name: name.into(),
            temperature_k,
            density_override: None,
            viscosity_override: None,
        }
    }

    pub fn custom(density: f64, viscosity: f64) -> Self {
        Self::Custom { density, viscosity }
    }

    /// Set the density: an override for a named fluid, a replacement for a
    /// custom one.
    pub fn with_density(mut self, value: f64) -> Self {
        match &mut self {
            Self::Named {
                density_override, ..
            } => *density_override = Some(value),
            Self::Custom { density, .. } => *density = value,
        }
        self
    }

    /// Set the viscosity: an override for a named fluid, a replacement for a
    /// custom one.
    pub fn with_viscosity(mut self, value: f64) -> Self {
        match &mut self {
            Self::Named {
                viscosity_override,
                ..
            } => *viscosity_override = Some(value),
            Self::Custom { viscosity, .. } => *viscosity = value,
        }
        self
    }
}

/// Resolve density and viscosity for a fluid spec.
pub fn resolve(spec: &FluidSpec) -> FluidResult<FluidProperties> {
    let props = match spec {
        FluidSpec::Custom { density, viscosity } => FluidProperties {
            density: *density,
            viscosity: *viscosity,
        },
        FluidSpec::Named {
            name,
            temperature_k,
            density_override,
            viscosity_override,
        } => {
            let entry = lookup(name).ok_or_else(|| FluidError::UnknownFluid { name: name.clone() })?;
            match (density_override, viscosity_override) {
                (Some(density), Some(viscosity)) => FluidProperties {
                    density: *density,
                    viscosity: *viscosity,
                },
                _ => {
                    let row = entry.table.interpolate(*temperature_k)?;
                    FluidProperties {
                        density: density_override.unwrap_or(row.density),
                        viscosity: viscosity_override.unwrap_or(row.viscosity),
                    }
                }
            }
        }
    };

    check_physical(props)
}

fn check_physical(props: FluidProperties) -> FluidResult<FluidProperties> {
    if !props.density.is_finite() || props.density <= 0.0 {
        return Err(FluidError::NonPhysical { what: "density" });
    }
    if !props.viscosity.is_finite() || props.viscosity <= 0.0 {
        return Err(FluidError::NonPhysical { what: "viscosity" });
    }
    Ok(props)
}

#[cfg(test)]
mod tests {
    use super::*;
    use pf_core::units::degc;

    #[test]
    fn water_at_20c() {
        let props = resolve(&FluidSpec::named("water", degc(20.0).value)).unwrap();
        assert!((props.density - 998.2).abs() < 1e-6);
        assert!((props.viscosity - 1.002e-3).abs() < 1e-9);
        assert!((props.kinematic_viscosity() - 1.0038e-6).abs() < 1e-9);
    }

    #[test]
    fn out_of_range_without_override_fails() {
        let err = resolve(&FluidSpec::named("water", degc(150.0).value)).unwrap_err();
        assert!(matches!(err, FluidError::OutOfRange { .. }));
    }

    #[test]
    fn full_override_wins_out_of_range() {
        let spec = FluidSpec::named("water", degc(150.0).value)
            .with_density(917.0)
            .with_viscosity(1.8e-4);
        let props = resolve(&spec).unwrap();
        assert_eq!(props.density, 917.0);
        assert_eq!(props.viscosity, 1.8e-4);
    }

    #[test]
    fn custom_builders_replace_properties() {
        let spec = FluidSpec::custom(870.0, 0.02).with_viscosity(0.03);
        assert_eq!(spec, FluidSpec::custom(870.0, 0.03));
        let props = resolve(&spec.with_density(900.0)).unwrap();
        assert_eq!(props.density, 900.0);
        assert_eq!(props.viscosity, 0.03);
    }

    #[test]
    fn partial_override_keeps_other_property() {
        let spec = FluidSpec::named("water", degc(20.0).value).with_density(1025.0);
        let props = resolve(&spec).unwrap();
        assert_eq!(props.density, 1025.0);
        assert!((props.viscosity - 1.002e-3).abs() < 1e-9);
    }

    #[test]
    fn partial_override_still_needs_table() {
        let spec = FluidSpec::named("water", degc(150.0).value).with_density(917.0);
        assert!(matches!(resolve(&spec), Err(FluidError::OutOfRange { .. })));
    }

    #[test]
    fn unknown_fluid() {
        let err = resolve(&FluidSpec::named("unobtainium", 300.0)).unwrap_err();
        assert!(matches!(err, FluidError::UnknownFluid { .. }));
    }

    #[test]
    fn custom_must_be_physical() {
        assert!(resolve(&FluidSpec::custom(1000.0, 1e-3)).is_ok());
        assert!(matches!(
            resolve(&FluidSpec::custom(-1.0, 1e-3)),
            Err(FluidError::NonPhysical { what: "density" })
        ));
        assert!(matches!(
            resolve(&FluidSpec::custom(1000.0, 0.0)),
            Err(FluidError::NonPhysical { what: "viscosity" })
        ));
    }
}
