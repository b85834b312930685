//! Result composition: regime, warnings and conversion to display units.

use std::fmt;

use pf_components::{
    FrictionModel, LAMINAR_LIMIT, TURBULENT_LIMIT, hydraulic_power, pressure_from_head,
};
use pf_core::{QuantityKind, UnitSystem, denormalize};
use serde::{Deserialize, Serialize};

use crate::config::SolverConfig;
use crate::error::SolverResult;
use crate::problem::{NormalizedProblem, Unknown};
use crate::state::FlowState;

/// Flow regime by Reynolds number.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Regime {
    Laminar,
    Transitional,
    Turbulent,
}

impl Regime {
    pub fn from_reynolds(reynolds: f64) -> Self {
        if reynolds < LAMINAR_LIMIT {
            Self::Laminar
        } else if reynolds < TURBULENT_LIMIT {
            Self::Transitional
        } else {
            Self::Turbulent
        }
    }
}

impl fmt::Display for Regime {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Laminar => write!(f, "laminar"),
            Self::Transitional => write!(f, "transitional"),
            Self::Turbulent => write!(f, "turbulent"),
        }
    }
}

/// Non-fatal findings attached to a successful result.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum Warning {
    /// Friction factor interpolated between the laminar and turbulent limits.
    TransitionalFlow { reynolds: f64 },
    /// A fitting with a negative resistance coefficient.
    NegativeFittingCoefficient { fitting: String, k: f64 },
    /// Mean velocity (display units) below the configured threshold.
    LowVelocity { velocity: f64 },
    /// Reported head loss differs from the friction head at the reported
    /// flow (display units). Only possible when both were given.
    HeadLossMismatch { given: f64, friction: f64 },
}

impl fmt::Display for Warning {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::TransitionalFlow { reynolds } => write!(
                f,
                "Re = {reynolds:.0} is in the transitional range; friction factor interpolated, accuracy reduced"
            ),
            Self::NegativeFittingCoefficient { fitting, k } => {
                write!(f, "fitting '{fitting}' has a negative K ({k})")
            }
            Self::LowVelocity { velocity } => {
                write!(f, "velocity {velocity:.4} is close to zero")
            }
            Self::HeadLossMismatch { given, friction } => write!(
                f,
                "given head loss {given:.4} differs from the friction head {friction:.4} at this flow"
            ),
        }
    }
}

/// Immutable outcome of one solve, in `unit_system` units.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct FlowResult {
    pub unit_system: UnitSystem,
    pub target: Unknown,
    pub flow_rate: f64,
    pub velocity: f64,
    pub diameter: f64,
    /// Darcy friction factor
    pub friction_factor: f64,
    pub reynolds: f64,
    /// ε/D
    pub relative_roughness: f64,
    /// Frictional head loss H_L
    pub head_loss: f64,
    /// ρ g H_L
    pub pressure_drop: f64,
    /// P1 − P2 = ρ g (H_L + Δz − h_p)
    pub pressure_difference: f64,
    /// ρ g Q H_L / η
    pub power: f64,
    pub regime: Regime,
    pub friction_model: FrictionModel,
    /// Outer iterations of the branch that produced the result
    pub iterations: usize,
    pub warnings: Vec<Warning>,
}

/// Relative gap between reported and friction head loss that raises a warning.
const HEAD_MISMATCH_TOLERANCE: f64 = 1e-3;

/// Build the result from a finished state. The state is only read.
pub(crate) fn compose(
    state: &FlowState,
    problem: &NormalizedProblem,
    config: &SolverConfig,
) -> SolverResult<FlowResult> {
    let sys = problem.unit_system;
    let out = |value: f64, kind: QuantityKind| denormalize(value, kind, sys);

    let flow_rate = state.flow_rate(problem);
    let pressure_drop = pressure_from_head(problem.density, state.head_loss);
    let pressure_difference = pressure_from_head(
        problem.density,
        state.head_loss + problem.elevation_change - problem.pump_head,
    );
    let power = hydraulic_power(problem.density, flow_rate, state.head_loss, problem.efficiency);

    let mut warnings = Vec::new();
    if state.friction.model == FrictionModel::Transitional {
        warnings.push(Warning::TransitionalFlow {
            reynolds: state.reynolds,
        });
    }
    warnings.extend(problem.negative_k.iter().map(|(name, k)| {
        Warning::NegativeFittingCoefficient {
            fitting: name.clone(),
            k: *k,
        }
    }));
    let friction_head = state.computed_head_loss(problem);
    if (state.head_loss - friction_head).abs() > HEAD_MISMATCH_TOLERANCE * state.head_loss {
        warnings.push(Warning::HeadLossMismatch {
            given: out(state.head_loss, QuantityKind::Length)?,
            friction: out(friction_head, QuantityKind::Length)?,
        });
    }
    if state.velocity < config.low_velocity_threshold {
        warnings.push(Warning::LowVelocity {
            velocity: out(state.velocity, QuantityKind::Velocity)?,
        });
    }

    Ok(FlowResult {
        unit_system: sys,
        target: problem.target,
        flow_rate: out(flow_rate, QuantityKind::FlowRate)?,
        velocity: out(state.velocity, QuantityKind::Velocity)?,
        diameter: out(state.diameter, QuantityKind::Length)?,
        friction_factor: state.friction.f,
        reynolds: state.reynolds,
        relative_roughness: problem.roughness / state.diameter,
        head_loss: out(state.head_loss, QuantityKind::Length)?,
        pressure_drop: out(pressure_drop, QuantityKind::Pressure)?,
        pressure_difference: out(pressure_difference, QuantityKind::Pressure)?,
        power: out(power, QuantityKind::Power)?,
        regime: Regime::from_reynolds(state.reynolds),
        friction_model: state.friction.model,
        iterations: state.iterations,
        warnings,
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn regime_boundaries() {
        assert_eq!(Regime::from_reynolds(2299.9), Regime::Laminar);
        assert_eq!(Regime::from_reynolds(2300.0), Regime::Transitional);
        assert_eq!(Regime::from_reynolds(3999.9), Regime::Transitional);
        assert_eq!(Regime::from_reynolds(4000.0), Regime::Turbulent);
    }

    #[test]
    fn warnings_render() {
        let w = Warning::TransitionalFlow { reynolds: 3000.0 };
        assert!(w.to_string().contains("transitional"));
        let w = Warning::NegativeFittingCoefficient {
            fitting: "corr".into(),
            k: -0.1,
        };
        assert!(w.to_string().contains("corr"));
    }
}
