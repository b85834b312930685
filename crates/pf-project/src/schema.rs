//! Problem file schema.

use pf_components::{FittingKind, PipeMaterial};
use pf_core::{QuantityKind, UnitError, UnitSystem, denormalize, normalize, parse_quantity};
use pf_solver::{SolverConfig, Spacing, SweepVariable, Unknown};
use serde::{Deserialize, Serialize};

/// A number in the file's unit system, or a string with an explicit unit.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum QuantityDef {
    Value(f64),
    Text(String),
}

impl QuantityDef {
    /// Value expressed in `system` units.
    pub fn in_units(&self, kind: QuantityKind, system: UnitSystem) -> Result<f64, UnitError> {
        match self {
            Self::Value(v) => Ok(*v),
            Self::Text(text) => denormalize(parse_quantity(text, kind)?, kind, system),
        }
    }

    /// Value in SI, reading a bare number in `system` units.
    pub fn si(&self, kind: QuantityKind, system: UnitSystem) -> Result<f64, UnitError> {
        match self {
            Self::Value(v) => normalize(*v, kind, system),
            Self::Text(text) => parse_quantity(text, kind),
        }
    }
}

impl From<f64> for QuantityDef {
    fn from(v: f64) -> Self {
        Self::Value(v)
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ProblemFile {
    #[serde(default)]
    pub name: Option<String>,
    #[serde(default)]
    pub unit_system: UnitSystem,
    pub target: Unknown,
    pub fluid: FluidDef,
    pub pipe: PipeDef,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub flow: Option<FlowDef>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub head: Option<HeadDef>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub elevation_change: Option<QuantityDef>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub pump_head: Option<QuantityDef>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub efficiency: Option<f64>,
    #[serde(default)]
    pub fittings: Vec<FittingDef>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub sweep: Option<SweepDef>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub solver: Option<SolverConfig>,
}

/// Working fluid: a catalog name (with optional overrides) or bare properties.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct FluidDef {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub temperature: Option<QuantityDef>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub density: Option<QuantityDef>,
    /// Dynamic viscosity
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub viscosity: Option<QuantityDef>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PipeDef {
    pub length: QuantityDef,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub diameter: Option<QuantityDef>,
    /// Nominal size in inches, e.g. `"1-1/2"`
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub nominal: Option<String>,
    #[serde(default = "default_schedule")]
    pub schedule: u16,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub roughness: Option<QuantityDef>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub material: Option<PipeMaterial>,
}

fn default_schedule() -> u16 {
    40
}

/// `flow: { type: rate, value: 0.01 }`
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type", content = "value", rename_all = "snake_case")]
pub enum FlowDef {
    Rate(QuantityDef),
    Velocity(QuantityDef),
}

/// `head: { type: head_loss, value: 5 }`
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type", content = "value", rename_all = "snake_case")]
pub enum HeadDef {
    HeadLoss(QuantityDef),
    PressureDrop(QuantityDef),
    /// P1 − P2
    PressureDifference(QuantityDef),
}

/// One fitting line: a catalog kind, a K value or an L_eq/D ratio.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct FittingDef {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub kind: Option<FittingKind>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub k: Option<f64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub le_over_d: Option<f64>,
    #[serde(default = "default_count")]
    pub count: u32,
}

fn default_count() -> u32 {
    1
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SweepDef {
    pub variable: SweepVariable,
    pub start: QuantityDef,
    pub end: QuantityDef,
    pub points: usize,
    #[serde(default)]
    pub spacing: Spacing,
}

/// Quantity kind of a sweep variable.
pub fn sweep_quantity(variable: SweepVariable) -> QuantityKind {
    match variable {
        SweepVariable::Velocity => QuantityKind::Velocity,
        SweepVariable::FlowRate => QuantityKind::FlowRate,
        SweepVariable::Diameter
        | SweepVariable::Length
        | SweepVariable::Roughness
        | SweepVariable::HeadLoss => QuantityKind::Length,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn quantity_accepts_number_or_text() {
        let q: QuantityDef = serde_yaml::from_str("0.1").unwrap();
        assert_eq!(q, QuantityDef::Value(0.1));
        let q: QuantityDef = serde_yaml::from_str("\"4 in\"").unwrap();
        let ft = q.in_units(QuantityKind::Length, UnitSystem::Imperial).unwrap();
        assert!((ft - 1.0 / 3.0).abs() < 1e-12);
    }

    #[test]
    fn flow_and_head_use_type_tags() {
        let flow: FlowDef = serde_yaml::from_str("type: rate\nvalue: 0.01").unwrap();
        assert_eq!(flow, FlowDef::Rate(QuantityDef::Value(0.01)));
        let head: HeadDef =
            serde_yaml::from_str("{ type: pressure_difference, value: \"10 psi\" }").unwrap();
        assert_eq!(head, HeadDef::PressureDifference(QuantityDef::Text("10 psi".into())));
        let text = serde_yaml::to_string(&FlowDef::Velocity(QuantityDef::Value(2.0))).unwrap();
        assert!(text.contains("type: velocity"));
    }

    #[test]
    fn plain_number_stays_in_file_units() {
        let q = QuantityDef::Value(3.0);
        assert_eq!(q.in_units(QuantityKind::Length, UnitSystem::Imperial).unwrap(), 3.0);
    }
}
