//! Error types for component calculations.

use pf_core::error::PfError;
use thiserror::Error;

/// Errors that can occur during component calculations.
#[derive(Error, Debug, Clone, PartialEq)]
pub enum ComponentError {
    #[error("Invalid input: {what}")]
    InvalidInput { what: String },

    #[error(
        "Convergence failed: {what} after {iterations} iterations (last iterate {last_iterate}, residual {residual:e})"
    )]
    Convergence {
        what: &'static str,
        iterations: usize,
        last_iterate: f64,
        residual: f64,
    },
}

pub type ComponentResult<T> = Result<T, ComponentError>;

impl From<PfError> for ComponentError {
    fn from(e: PfError) -> Self {
        ComponentError::InvalidInput {
            what: e.to_string(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn error_display() {
        let err = ComponentError::InvalidInput {
            what: "Reynolds number must be positive".into(),
        };
        assert!(err.to_string().contains("Reynolds"));
    }

    #[test]
    fn error_conversion() {
        let core_err = PfError::NonFinite {
            what: "velocity",
            value: f64::NAN,
        };
        let comp_err: ComponentError = core_err.into();
        assert!(matches!(comp_err, ComponentError::InvalidInput { .. }));
    }
}
