//! Solver tolerances and iteration caps.

use pf_components::FrictionConfig;
use serde::{Deserialize, Serialize};

/// Tolerances, iteration caps and search bracket for every branch.
///
/// Deserializes with defaults for any missing field, so a problem file can
/// override a single value:
///
/// ```yaml
/// solver:
///   diameter_max: 2.0
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct SolverConfig {
    /// Colebrook-White iteration settings
    pub friction: FrictionConfig,
    /// Relative velocity change that ends the flow iteration
    pub flow_rel_tol: f64,
    pub flow_max_iterations: usize,
    /// Velocity [m/s] the flow iteration starts from
    pub initial_velocity: f64,
    /// Relative head-loss mismatch that ends the diameter search
    pub diameter_rel_tol: f64,
    pub diameter_max_iterations: usize,
    /// Diameter search bracket [m]
    pub diameter_min: f64,
    pub diameter_max: f64,
    /// Velocities [m/s] below this raise a warning
    pub low_velocity_threshold: f64,
}

impl Default for SolverConfig {
    fn default() -> Self {
        Self {
            friction: FrictionConfig::default(),
            flow_rel_tol: 1e-6,
            flow_max_iterations: 100,
            initial_velocity: 1.0,
            diameter_rel_tol: 1e-6,
            diameter_max_iterations: 100,
            diameter_min: 1e-3,
            diameter_max: 5.0,
            low_velocity_threshold: 0.01,
        }
    }
}

impl SolverConfig {
    pub(crate) fn validate(&self) -> Result<(), String> {
        let positive = [
            ("flow_rel_tol", self.flow_rel_tol),
            ("initial_velocity", self.initial_velocity),
            ("diameter_rel_tol", self.diameter_rel_tol),
            ("diameter_min", self.diameter_min),
            ("diameter_max", self.diameter_max),
        ];
        for (name, value) in positive {
            if !value.is_finite() || value <= 0.0 {
                return Err(format!("solver.{name} must be positive (got {value})"));
            }
        }
        if self.diameter_min >= self.diameter_max {
            return Err(format!(
                "solver.diameter_min ({}) must be below solver.diameter_max ({})",
                self.diameter_min, self.diameter_max
            ));
        }
        Ok(())
    }
}
