//! Common utilities for component calculations.

use crate::error::{ComponentError, ComponentResult};
use pf_core::numeric::ensure_finite;

/// Ensure a value is finite, returning ComponentError if not.
pub fn check_finite(value: f64, what: &'static str) -> ComponentResult<f64> {
    Ok(ensure_finite(value, what)?)
}

/// Ensure a value is finite and strictly positive.
pub fn check_positive(value: f64, what: &'static str) -> ComponentResult<f64> {
    let value = check_finite(value, what)?;
    if value <= 0.0 {
        return Err(ComponentError::InvalidInput {
            what: format!("{what} must be positive (got {value})"),
        });
    }
    Ok(value)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_check_finite() {
        assert!(check_finite(1.0, "test").is_ok());
        assert!(check_finite(f64::INFINITY, "test").is_err());
        assert!(check_finite(f64::NAN, "test").is_err());
    }

    #[test]
    fn non_finite_names_the_quantity() {
        let err = check_finite(f64::NAN, "Reynolds number").unwrap_err();
        assert!(err.to_string().contains("Reynolds number"));
    }

    #[test]
    fn test_check_positive() {
        assert_eq!(check_positive(2.0, "test").unwrap(), 2.0);
        assert!(check_positive(0.0, "test").is_err());
        assert!(check_positive(-3.0, "test").is_err());
    }
}
