//! Error types for solver operations.

use pf_components::ComponentError;
use pf_core::UnitError;
use pf_fluids::FluidError;
use thiserror::Error;

/// Errors surfaced by [`solve`](crate::solve) and [`sweep`](crate::sweep).
///
/// Lower-level errors are folded into these four kinds so callers only need
/// to match on one enum.
#[derive(Error, Debug, Clone, PartialEq)]
pub enum SolverError {
    /// Malformed, out-of-range or non-physical input.
    #[error("Invalid input: {what}")]
    InvalidInput { what: String },

    /// Fluid property lookup outside the tabulated range.
    #[error("Out of range: {what}")]
    OutOfRange { what: String },

    /// An iterative solver hit its iteration cap or lost its bracket.
    #[error(
        "Convergence failed: {what} after {iterations} iterations (last iterate {last_iterate}, residual {residual:e})"
    )]
    Convergence {
        what: String,
        iterations: usize,
        last_iterate: f64,
        residual: f64,
    },

    #[error("Unit error: {0}")]
    Unit(#[from] UnitError),
}

pub type SolverResult<T> = Result<T, SolverError>;

impl SolverError {
    pub(crate) fn invalid(what: impl Into<String>) -> Self {
        Self::InvalidInput { what: what.into() }
    }
}

impl From<ComponentError> for SolverError {
    fn from(e: ComponentError) -> Self {
        match e {
            ComponentError::InvalidInput { what } => SolverError::InvalidInput { what },
            ComponentError::Convergence {
                what,
                iterations,
                last_iterate,
                residual,
            } => SolverError::Convergence {
                what: what.to_string(),
                iterations,
                last_iterate,
                residual,
            },
        }
    }
}

impl From<FluidError> for SolverError {
    fn from(e: FluidError) -> Self {
        match e {
            FluidError::OutOfRange { .. } => SolverError::OutOfRange {
                what: e.to_string(),
            },
            FluidError::UnknownFluid { .. } | FluidError::NonPhysical { .. } => {
                SolverError::InvalidInput {
                    what: e.to_string(),
                }
            }
        }
    }
}
