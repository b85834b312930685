//! Fluid property errors.

use thiserror::Error;

/// Result type for fluid operations.
pub type FluidResult<T> = Result<T, FluidError>;

/// Errors that can occur while resolving fluid properties.
#[derive(Error, Debug, Clone, PartialEq)]
pub enum FluidError {
    /// Fluid name not present in the catalog.
    #[error("Unknown fluid '{name}'")]
    UnknownFluid { name: String },

    /// Temperature outside the tabulated range.
    #[error("Temperature {temperature_k} K out of range for {fluid} ({min_k} K to {max_k} K)")]
    OutOfRange {
        fluid: &'static str,
        temperature_k: f64,
        min_k: f64,
        max_k: f64,
    },

    /// Non-physical values (negative density, viscosity, etc.).
    #[error("Non-physical value for {what}")]
    NonPhysical { what: &'static str },
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn error_display() {
        let err = FluidError::UnknownFluid {
            name: "mercury".into(),
        };
        assert!(err.to_string().contains("mercury"));

        let err = FluidError::OutOfRange {
            fluid: "Water",
            temperature_k: 400.0,
            min_k: 273.15,
            max_k: 373.15,
        };
        assert!(err.to_string().contains("Water"));
    }
}
