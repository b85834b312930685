//! Problem definition and normalization to SI.

use pf_components::{
    Fitting, FittingLoss, Pipe, aggregate, aggregate_equivalent_length, head_from_pressure,
};
use pf_core::{QuantityKind, UnitSystem, denormalize, normalize};
use pf_fluids::{FluidSpec, resolve};
use serde::{Deserialize, Serialize};

use crate::error::{SolverError, SolverResult};

/// Quantity a problem solves for.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Unknown {
    /// Flow rate / velocity from a given head loss
    Flow,
    /// Head loss / pressure drop from a given flow
    HeadLoss,
    /// Pipe diameter that carries a given flow at a given head loss
    Diameter,
    /// Pumping power, solving flow or head first if one is missing
    Power,
}

/// How the flow is specified (problem units).
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum FlowInput {
    Rate(f64),
    Velocity(f64),
}

/// How the driving head is specified (problem units).
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum HeadInput {
    /// Frictional head loss H_L
    HeadLoss(f64),
    /// Frictional pressure drop ρ g H_L
    PressureDrop(f64),
    /// Static pressure difference P1 − P2; elevation change and pump head are
    /// taken out to get H_L
    StaticPressureDifference(f64),
}

/// One calculation request, in the units of `unit_system`.
///
/// Exactly one of diameter, flow and head is left unset for the
/// `Flow`/`HeadLoss`/`Diameter` targets. `Power` needs the diameter and at
/// least one of flow or head.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct FlowProblem {
    pub unit_system: UnitSystem,
    pub target: Unknown,
    pub diameter: Option<f64>,
    pub length: f64,
    /// Absolute roughness
    pub roughness: f64,
    pub density: f64,
    /// Dynamic viscosity
    pub viscosity: f64,
    pub flow: Option<FlowInput>,
    pub head: Option<HeadInput>,
    /// z2 − z1
    pub elevation_change: f64,
    /// Head added by a pump between the two stations
    pub pump_head: f64,
    /// Pump efficiency in (0, 1]
    pub efficiency: f64,
    pub fittings: Vec<Fitting>,
}

impl FlowProblem {
    /// SI problem with no flow, head, diameter, elevation or fittings set yet.
    pub fn new(target: Unknown, length: f64, roughness: f64, density: f64, viscosity: f64) -> Self {
        Self {
            unit_system: UnitSystem::Si,
            target,
            diameter: None,
            length,
            roughness,
            density,
            viscosity,
            flow: None,
            head: None,
            elevation_change: 0.0,
            pump_head: 0.0,
            efficiency: 1.0,
            fittings: Vec::new(),
        }
    }

    /// Reinterpret every stored value in `system`.
    pub fn in_units(mut self, system: UnitSystem) -> Self {
        self.unit_system = system;
        self
    }

    pub fn with_target(mut self, target: Unknown) -> Self {
        self.target = target;
        self
    }

    pub fn with_diameter(mut self, diameter: f64) -> Self {
        self.diameter = Some(diameter);
        self
    }

    pub fn with_flow_rate(mut self, flow_rate: f64) -> Self {
        self.flow = Some(FlowInput::Rate(flow_rate));
        self
    }

    pub fn with_velocity(mut self, velocity: f64) -> Self {
        self.flow = Some(FlowInput::Velocity(velocity));
        self
    }

    pub fn with_head_loss(mut self, head_loss: f64) -> Self {
        self.head = Some(HeadInput::HeadLoss(head_loss));
        self
    }

    pub fn with_pressure_drop(mut self, pressure_drop: f64) -> Self {
        self.head = Some(HeadInput::PressureDrop(pressure_drop));
        self
    }

    pub fn with_static_pressure_difference(mut self, p1_minus_p2: f64) -> Self {
        self.head = Some(HeadInput::StaticPressureDifference(p1_minus_p2));
        self
    }

    pub fn with_elevation_change(mut self, dz: f64) -> Self {
        self.elevation_change = dz;
        self
    }

    pub fn with_pump_head(mut self, head: f64) -> Self {
        self.pump_head = head;
        self
    }

    pub fn with_efficiency(mut self, efficiency: f64) -> Self {
        self.efficiency = efficiency;
        self
    }

    pub fn with_fitting(mut self, fitting: Fitting) -> Self {
        self.fittings.push(fitting);
        self
    }

    pub fn with_fittings(mut self, fittings: impl IntoIterator<Item = Fitting>) -> Self {
        self.fittings.extend(fittings);
        self
    }

    /// Fill density and viscosity from a fluid spec, converted to this
    /// problem's unit system. Call after [`in_units`](Self::in_units).
    pub fn with_fluid(mut self, fluid: &FluidSpec) -> SolverResult<Self> {
        let props = resolve(fluid)?;
        self.density = denormalize(props.density, QuantityKind::Density, self.unit_system)?;
        self.viscosity = denormalize(
            props.viscosity,
            QuantityKind::DynamicViscosity,
            self.unit_system,
        )?;
        Ok(self)
    }

    /// Validate and convert to SI.
    pub(crate) fn normalize(&self) -> SolverResult<NormalizedProblem> {
        let sys = self.unit_system;
        let si = |value: f64, kind: QuantityKind| normalize(value, kind, sys);

        let length = positive(si(self.length, QuantityKind::Length)?, "pipe length")?;
        let density = positive(si(self.density, QuantityKind::Density)?, "density")?;
        let viscosity = positive(
            si(self.viscosity, QuantityKind::DynamicViscosity)?,
            "dynamic viscosity",
        )?;
        let roughness = si(self.roughness, QuantityKind::Length)?;
        if !roughness.is_finite() || roughness < 0.0 {
            return Err(SolverError::invalid(format!(
                "roughness must be non-negative (got {})",
                self.roughness
            )));
        }
        if !self.efficiency.is_finite() || self.efficiency <= 0.0 || self.efficiency > 1.0 {
            return Err(SolverError::invalid(format!(
                "efficiency must be in (0, 1] (got {})",
                self.efficiency
            )));
        }
        let elevation_change = finite(
            si(self.elevation_change, QuantityKind::Length)?,
            "elevation change",
        )?;
        let pump_head = finite(si(self.pump_head, QuantityKind::Length)?, "pump head")?;

        let diameter = self
            .diameter
            .map(|d| -> SolverResult<f64> { positive(si(d, QuantityKind::Length)?, "pipe diameter") })
            .transpose()?;

        let flow = self
            .flow
            .map(|flow| -> SolverResult<FlowSi> {
                Ok(match flow {
                    FlowInput::Rate(q) => {
                        FlowSi::Rate(positive(si(q, QuantityKind::FlowRate)?, "flow rate")?)
                    }
                    FlowInput::Velocity(v) => {
                        FlowSi::Velocity(positive(si(v, QuantityKind::Velocity)?, "velocity")?)
                    }
                })
            })
            .transpose()?;

        let head = self
            .head
            .map(|head| -> SolverResult<f64> {
                let h = match head {
                    HeadInput::HeadLoss(h) => si(h, QuantityKind::Length)?,
                    HeadInput::PressureDrop(dp) => {
                        head_from_pressure(density, si(dp, QuantityKind::Pressure)?)
                    }
                    HeadInput::StaticPressureDifference(dp) => {
                        head_from_pressure(density, si(dp, QuantityKind::Pressure)?)
                            - elevation_change
                            + pump_head
                    }
                };
                positive(h, "head loss")
            })
            .transpose()?;

        check_unknowns(self.target, diameter.is_some(), flow.is_some(), head.is_some())?;

        for fitting in &self.fittings {
            let value = match fitting.loss {
                FittingLoss::K(k) => k,
                FittingLoss::EquivalentLength(r) => {
                    if r < 0.0 {
                        return Err(SolverError::invalid(format!(
                            "fitting '{}' has a negative equivalent length ratio ({r})",
                            fitting.name
                        )));
                    }
                    r
                }
            };
            if !value.is_finite() {
                return Err(SolverError::invalid(format!(
                    "fitting '{}' has a non-finite coefficient",
                    fitting.name
                )));
            }
        }

        Ok(NormalizedProblem {
            unit_system: sys,
            target: self.target,
            diameter,
            length,
            roughness,
            density,
            viscosity,
            flow,
            head,
            elevation_change,
            pump_head,
            efficiency: self.efficiency,
            k_total: aggregate(&self.fittings),
            le_over_d: aggregate_equivalent_length(&self.fittings),
            negative_k: self
                .fittings
                .iter()
                .filter_map(|f| f.negative_k().map(|k| (f.name.clone(), k)))
                .collect(),
        })
    }
}

fn check_unknowns(target: Unknown, has_d: bool, has_flow: bool, has_head: bool) -> SolverResult<()> {
    let missing: Vec<&str> = [("diameter", has_d), ("flow", has_flow), ("head", has_head)]
        .into_iter()
        .filter(|(_, given)| !given)
        .map(|(name, _)| name)
        .collect();

    let expected = match target {
        Unknown::Flow => "flow",
        Unknown::HeadLoss => "head",
        Unknown::Diameter => "diameter",
        Unknown::Power => {
            if !has_d {
                return Err(SolverError::invalid("power needs the pipe diameter"));
            }
            if !has_flow && !has_head {
                return Err(SolverError::invalid(
                    "power needs at least one of flow or head; two unknowns given",
                ));
            }
            return Ok(());
        }
    };

    match missing.as_slice() {
        [only] if *only == expected => Ok(()),
        [] => Err(SolverError::invalid(format!(
            "no unknown left: {expected} is the target but a value was given"
        ))),
        _ => Err(SolverError::invalid(format!(
            "exactly one unknown expected ({expected}), found {}: {}",
            missing.len(),
            missing.join(", ")
        ))),
    }
}

fn positive(value: f64, what: &str) -> SolverResult<f64> {
    if value.is_finite() && value > 0.0 {
        Ok(value)
    } else {
        Err(SolverError::invalid(format!("{what} must be positive (got {value})")))
    }
}

fn finite(value: f64, what: &str) -> SolverResult<f64> {
    if value.is_finite() {
        Ok(value)
    } else {
        Err(SolverError::invalid(format!("{what} must be finite (got {value})")))
    }
}

/// Flow specification in SI.
#[derive(Debug, Clone, Copy, PartialEq)]
pub(crate) enum FlowSi {
    Rate(f64),
    Velocity(f64),
}

impl FlowSi {
    pub(crate) fn velocity(self, pipe: &Pipe) -> f64 {
        match self {
            Self::Rate(q) => pipe.velocity_from_flow(q),
            Self::Velocity(v) => v,
        }
    }
}

/// Validated problem in SI with fittings reduced to two scalars.
#[derive(Debug, Clone, PartialEq)]
pub(crate) struct NormalizedProblem {
    pub unit_system: UnitSystem,
    pub target: Unknown,
    pub diameter: Option<f64>,
    pub length: f64,
    pub roughness: f64,
    pub density: f64,
    pub viscosity: f64,
    pub flow: Option<FlowSi>,
    /// Frictional head loss [m]
    pub head: Option<f64>,
    pub elevation_change: f64,
    pub pump_head: f64,
    pub efficiency: f64,
    pub k_total: f64,
    pub le_over_d: f64,
    /// (name, K) of each fitting with a negative coefficient
    pub negative_k: Vec<(String, f64)>,
}

impl NormalizedProblem {
    pub(crate) fn pipe(&self, diameter: f64) -> Pipe {
        Pipe::new(self.length, diameter, self.roughness).with_fittings(self.k_total, self.le_over_d)
    }
}
