//! Parametric sweeps over one problem input.
//!
//! Used to build curves such as head loss against velocity. Every point is an
//! independent [`solve`](crate::solve) of a copy of the base problem, run in
//! parallel with rayon.

use std::fmt;
use std::str::FromStr;

use rayon::prelude::*;
use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::config::SolverConfig;
use crate::error::{SolverError, SolverResult};
use crate::problem::{FlowInput, FlowProblem, HeadInput};
use crate::result::FlowResult;
use crate::solve::solve_with_config;

/// Problem input varied by a sweep.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum SweepVariable {
    Velocity,
    FlowRate,
    Diameter,
    Length,
    Roughness,
    HeadLoss,
}

impl SweepVariable {
    /// Copy of `base` with this input set to `value` (problem units).
    pub fn apply(self, base: &FlowProblem, value: f64) -> FlowProblem {
        let mut problem = base.clone();
        match self {
            Self::Velocity => problem.flow = Some(FlowInput::Velocity(value)),
            Self::FlowRate => problem.flow = Some(FlowInput::Rate(value)),
            Self::Diameter => problem.diameter = Some(value),
            Self::Length => problem.length = value,
            Self::Roughness => problem.roughness = value,
            Self::HeadLoss => problem.head = Some(HeadInput::HeadLoss(value)),
        }
        problem
    }
}

impl fmt::Display for SweepVariable {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Velocity => write!(f, "velocity"),
            Self::FlowRate => write!(f, "flow rate"),
            Self::Diameter => write!(f, "diameter"),
            Self::Length => write!(f, "length"),
            Self::Roughness => write!(f, "roughness"),
            Self::HeadLoss => write!(f, "head loss"),
        }
    }
}

impl FromStr for SweepVariable {
    type Err = SolverError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().replace([' ', '-'], "_").as_str() {
            "velocity" | "v" => Ok(Self::Velocity),
            "flow_rate" | "flow" | "q" => Ok(Self::FlowRate),
            "diameter" | "d" => Ok(Self::Diameter),
            "length" | "l" => Ok(Self::Length),
            "roughness" => Ok(Self::Roughness),
            "head_loss" | "head" | "hl" => Ok(Self::HeadLoss),
            other => Err(SolverError::invalid(format!("unknown sweep variable '{other}'"))),
        }
    }
}

/// Point spacing of a sweep.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Spacing {
    #[default]
    Linear,
    Logarithmic,
}

impl fmt::Display for Spacing {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Linear => write!(f, "Linear"),
            Self::Logarithmic => write!(f, "Logarithmic"),
        }
    }
}

/// Range of a sweep, in the problem's units.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct SweepRange {
    pub start: f64,
    pub end: f64,
    pub points: usize,
    #[serde(default)]
    pub spacing: Spacing,
}

impl SweepRange {
    pub fn linear(start: f64, end: f64, points: usize) -> Self {
        Self {
            start,
            end,
            points,
            spacing: Spacing::Linear,
        }
    }

    pub fn logarithmic(start: f64, end: f64, points: usize) -> Self {
        Self {
            start,
            end,
            points,
            spacing: Spacing::Logarithmic,
        }
    }

    fn validate(&self) -> SolverResult<()> {
        if !self.start.is_finite() || !self.end.is_finite() {
            return Err(SolverError::invalid("sweep bounds must be finite"));
        }
        if self.points < 2 {
            return Err(SolverError::invalid("sweep must have at least 2 points"));
        }
        if (self.start - self.end).abs() < 1e-12 {
            return Err(SolverError::invalid("sweep start and end must be different"));
        }
        if self.spacing == Spacing::Logarithmic && (self.start <= 0.0 || self.end <= 0.0) {
            return Err(SolverError::invalid(
                "logarithmic sweep needs positive start and end",
            ));
        }
        Ok(())
    }

    /// All sweep values, with the end point hit exactly.
    pub fn values(&self) -> SolverResult<Vec<f64>> {
        self.validate()?;
        let n = self.points;
        let mut values: Vec<f64> = match self.spacing {
            Spacing::Linear => {
                let delta = (self.end - self.start) / (n - 1) as f64;
                (0..n).map(|i| self.start + i as f64 * delta).collect()
            }
            Spacing::Logarithmic => {
                let log_start = self.start.ln();
                let log_delta = (self.end.ln() - log_start) / (n - 1) as f64;
                (0..n).map(|i| (log_start + i as f64 * log_delta).exp()).collect()
            }
        };
        values[n - 1] = self.end;
        Ok(values)
    }
}

impl fmt::Display for SweepRange {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{} to {} ({} points, {})",
            self.start, self.end, self.points, self.spacing
        )
    }
}

/// Solve `base` once per sweep value. Fails on the first point that fails.
pub fn sweep(
    base: &FlowProblem,
    variable: SweepVariable,
    range: &SweepRange,
) -> SolverResult<Vec<(f64, FlowResult)>> {
    sweep_with_config(base, variable, range, &SolverConfig::default())
}

pub fn sweep_with_config(
    base: &FlowProblem,
    variable: SweepVariable,
    range: &SweepRange,
    config: &SolverConfig,
) -> SolverResult<Vec<(f64, FlowResult)>> {
    let values = range.values()?;
    debug!(%variable, %range, "sweep");
    values
        .into_par_iter()
        .map(|x| {
            let problem = variable.apply(base, x);
            solve_with_config(&problem, config).map(|result| (x, result))
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn linear_values() {
        let v = SweepRange::linear(1.0, 2.0, 5).values().unwrap();
        assert_eq!(v.len(), 5);
        assert!((v[2] - 1.5).abs() < 1e-12);
        assert_eq!(v[4], 2.0);
    }

    #[test]
    fn logarithmic_values() {
        let v = SweepRange::logarithmic(1e-3, 1e-1, 3).values().unwrap();
        assert!((v[1] - 1e-2).abs() < 1e-12);
        assert_eq!(v[2], 1e-1);
    }

    #[test]
    fn bad_ranges_rejected() {
        assert!(SweepRange::linear(1.0, 2.0, 1).values().is_err());
        assert!(SweepRange::linear(1.0, 1.0, 5).values().is_err());
        assert!(SweepRange::logarithmic(0.0, 1.0, 5).values().is_err());
        assert!(SweepRange::linear(f64::NAN, 1.0, 5).values().is_err());
    }

    #[test]
    fn parse_variable() {
        assert_eq!("flow-rate".parse::<SweepVariable>().unwrap(), SweepVariable::FlowRate);
        assert_eq!("V".parse::<SweepVariable>().unwrap(), SweepVariable::Velocity);
        assert!("pressure".parse::<SweepVariable>().is_err());
    }
}
