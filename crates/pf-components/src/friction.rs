//! Darcy friction factor.
//!
//! - `Re < 2300`: laminar, `f = 64/Re`
//! - `Re >= 4000`: Colebrook-White, solved for `x = 1/√f` by Newton iteration
//!   seeded with the Swamee-Jain approximation
//! - `2300 <= Re < 4000`: linear blend between the laminar value at 2300 and
//!   the Colebrook value at 4000. This is an approximation with no physical
//!   basis in the transitional range; results carry [`FrictionModel::Transitional`]
//!   so callers can warn about it.

use crate::common::{check_finite, check_positive};
use crate::error::{ComponentError, ComponentResult};
use std::f64::consts::LN_10;
use tracing::{trace, warn};

/// Upper Reynolds bound of laminar flow.
pub const LAMINAR_LIMIT: f64 = 2300.0;

/// Lower Reynolds bound of fully turbulent flow.
pub const TURBULENT_LIMIT: f64 = 4000.0;

/// Colebrook-White iteration settings.
#[derive(Debug, Clone, Copy, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(default))]
pub struct FrictionConfig {
    /// Absolute tolerance on the Colebrook residual in `1/√f` form
    pub abs_tol: f64,
    /// Maximum Newton iterations
    pub max_iterations: usize,
}

impl Default for FrictionConfig {
    fn default() -> Self {
        Self {
            abs_tol: 1e-8,
            max_iterations: 50,
        }
    }
}

/// Correlation that produced a friction factor.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(rename_all = "snake_case"))]
pub enum FrictionModel {
    Laminar,
    Transitional,
    Colebrook,
}

/// Darcy friction factor with solver diagnostics.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct FrictionFactor {
    pub f: f64,
    pub model: FrictionModel,
    /// Newton iterations spent (0 for the laminar closed form)
    pub iterations: usize,
    /// Final Colebrook residual (0 for the laminar closed form)
    pub residual: f64,
}

/// Darcy friction factor for Reynolds number `re` and relative roughness `rel_roughness` (ε/D).
pub fn friction_factor(
    re: f64,
    rel_roughness: f64,
    config: &FrictionConfig,
) -> ComponentResult<FrictionFactor> {
    let re = check_positive(re, "Reynolds number")?;
    if check_finite(rel_roughness, "relative roughness")? < 0.0 {
        return Err(ComponentError::InvalidInput {
            what: format!("relative roughness must be non-negative (got {rel_roughness})"),
        });
    }

    if re < LAMINAR_LIMIT {
        return Ok(FrictionFactor {
            f: 64.0 / re,
            model: FrictionModel::Laminar,
            iterations: 0,
            residual: 0.0,
        });
    }

    if re >= TURBULENT_LIMIT {
        return colebrook(re, rel_roughness, config);
    }

    let f_lam = 64.0 / LAMINAR_LIMIT;
    let turbulent = colebrook(TURBULENT_LIMIT, rel_roughness, config)?;
    let weight = (re - LAMINAR_LIMIT) / (TURBULENT_LIMIT - LAMINAR_LIMIT);
    Ok(FrictionFactor {
        f: f_lam + weight * (turbulent.f - f_lam),
        model: FrictionModel::Transitional,
        iterations: turbulent.iterations,
        residual: turbulent.residual,
    })
}

/// Swamee-Jain explicit approximation of Colebrook-White.
pub fn swamee_jain(re: f64, rel_roughness: f64) -> f64 {
    let a = rel_roughness / 3.7;
    let b = 5.74 / re.powf(0.9);
    0.25 / (a + b).log10().powi(2)
}

/// Colebrook-White residual `1/√f + 2 log10(ε/3.7D + 2.51/(Re √f))`.
pub fn colebrook_residual(f: f64, re: f64, rel_roughness: f64) -> f64 {
    residual_x(1.0 / f.sqrt(), re, rel_roughness)
}

fn residual_x(x: f64, re: f64, rel_roughness: f64) -> f64 {
    x + 2.0 * (rel_roughness / 3.7 + 2.51 * x / re).log10()
}

/// Solve Colebrook-White with Newton's method on `x = 1/√f`.
///
/// The residual is increasing and concave in `x`, so Newton steps from the
/// Swamee-Jain seed approach the root monotonically after the first step.
fn colebrook(re: f64, rel_roughness: f64, config: &FrictionConfig) -> ComponentResult<FrictionFactor> {
    let a = rel_roughness / 3.7;
    let b = 2.51 / re;

    let mut x = 1.0 / swamee_jain(re, rel_roughness).sqrt();
    let mut residual = residual_x(x, re, rel_roughness);

    for iter in 0..config.max_iterations {
        trace!(iter, x, residual, "colebrook iteration");
        if residual.abs() < config.abs_tol {
            return Ok(FrictionFactor {
                f: 1.0 / (x * x),
                model: FrictionModel::Colebrook,
                iterations: iter,
                residual,
            });
        }

        let slope = 1.0 + 2.0 * b / (LN_10 * (a + b * x));
        let mut x_new = x - residual / slope;
        // Keep the log argument positive.
        if x_new.is_nan() || x_new <= 0.0 {
            x_new = 0.5 * x;
        }
        x = x_new;
        residual = residual_x(x, re, rel_roughness);

        if !residual.is_finite() {
            break;
        }
    }

    if residual.abs() < config.abs_tol {
        return Ok(FrictionFactor {
            f: 1.0 / (x * x),
            model: FrictionModel::Colebrook,
            iterations: config.max_iterations,
            residual,
        });
    }

    warn!(re, rel_roughness, x, residual, "Colebrook-White did not converge");
    Err(ComponentError::Convergence {
        what: "Colebrook-White friction factor",
        iterations: config.max_iterations,
        last_iterate: 1.0 / (x * x),
        residual,
    })
}
