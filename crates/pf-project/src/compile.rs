//! Compile a problem file into a solver problem.

use pf_components::{Fitting, nominal_inside_diameter};
use pf_core::{QuantityKind, UnitSystem, denormalize};
use pf_fluids::FluidSpec;
use pf_solver::{FlowProblem, SolverConfig, SweepRange, SweepVariable};

use crate::schema::{FittingDef, FlowDef, FluidDef, HeadDef, ProblemFile, sweep_quantity};
use crate::validate::{ValidationError, validate_problem};
use crate::{ProjectError, ProjectResult};

/// Everything needed to run a problem file.
#[derive(Debug, Clone, PartialEq)]
pub struct CompiledProblem {
    pub problem: FlowProblem,
    pub sweep: Option<(SweepVariable, SweepRange)>,
    pub solver: SolverConfig,
}

pub fn compile(file: &ProblemFile) -> ProjectResult<CompiledProblem> {
    validate_problem(file)?;
    let sys = file.unit_system;

    let length = file.pipe.length.in_units(QuantityKind::Length, sys)?;
    let roughness = match (&file.pipe.roughness, file.pipe.material) {
        (Some(r), _) => r.in_units(QuantityKind::Length, sys)?,
        (None, material) => denormalize(
            material.unwrap_or_default().roughness(),
            QuantityKind::Length,
            sys,
        )?,
    };

    let mut problem = FlowProblem::new(file.target, length, roughness, 0.0, 0.0).in_units(sys);
    problem = apply_fluid(problem, &file.fluid, sys)?;

    if let Some(d) = &file.pipe.diameter {
        problem = problem.with_diameter(d.in_units(QuantityKind::Length, sys)?);
    } else if let Some(nominal) = &file.pipe.nominal {
        let d = nominal_inside_diameter(nominal, file.pipe.schedule).ok_or_else(|| {
            ValidationError::InvalidValue {
                field: "pipe.nominal".into(),
                value: nominal.clone(),
                reason: format!("no schedule {} pipe of this size", file.pipe.schedule),
            }
        })?;
        problem = problem.with_diameter(denormalize(d, QuantityKind::Length, sys)?);
    }

    problem = match &file.flow {
        Some(FlowDef::Rate(q)) => {
            problem.with_flow_rate(q.in_units(QuantityKind::FlowRate, sys)?)
        }
        Some(FlowDef::Velocity(v)) => {
            problem.with_velocity(v.in_units(QuantityKind::Velocity, sys)?)
        }
        None => problem,
    };
    problem = match &file.head {
        Some(HeadDef::HeadLoss(h)) => {
            problem.with_head_loss(h.in_units(QuantityKind::Length, sys)?)
        }
        Some(HeadDef::PressureDrop(p)) => {
            problem.with_pressure_drop(p.in_units(QuantityKind::Pressure, sys)?)
        }
        Some(HeadDef::PressureDifference(p)) => {
            problem.with_static_pressure_difference(p.in_units(QuantityKind::Pressure, sys)?)
        }
        None => problem,
    };

    if let Some(dz) = &file.elevation_change {
        problem = problem.with_elevation_change(dz.in_units(QuantityKind::Length, sys)?);
    }
    if let Some(hp) = &file.pump_head {
        problem = problem.with_pump_head(hp.in_units(QuantityKind::Length, sys)?);
    }
    if let Some(eta) = file.efficiency {
        problem = problem.with_efficiency(eta);
    }
    problem = problem.with_fittings(file.fittings.iter().map(compile_fitting));

    let sweep = file
        .sweep
        .as_ref()
        .map(|s| -> ProjectResult<(SweepVariable, SweepRange)> {
            let kind = sweep_quantity(s.variable);
            Ok((
                s.variable,
                SweepRange {
                    start: s.start.in_units(kind, sys)?,
                    end: s.end.in_units(kind, sys)?,
                    points: s.points,
                    spacing: s.spacing,
                },
            ))
        })
        .transpose()?;

    Ok(CompiledProblem {
        problem,
        sweep,
        solver: file.solver.unwrap_or_default(),
    })
}

fn apply_fluid(
    problem: FlowProblem,
    fluid: &FluidDef,
    sys: UnitSystem,
) -> ProjectResult<FlowProblem> {
    let Some(name) = &fluid.name else {
        // Validation guarantees both properties are present.
        let (Some(rho), Some(mu)) = (&fluid.density, &fluid.viscosity) else {
            return Err(ProjectError::Validation(ValidationError::Missing {
                field: "fluid.density / fluid.viscosity".into(),
                reason: "required when no fluid name is given".into(),
            }));
        };
        return Ok(FlowProblem {
            density: rho.in_units(QuantityKind::Density, sys)?,
            viscosity: mu.in_units(QuantityKind::DynamicViscosity, sys)?,
            ..problem
        });
    };

    // Temperature only matters for the table lookup; with both overrides any
    // value passes.
    let temperature_k = match &fluid.temperature {
        Some(t) => t.si(QuantityKind::Temperature, sys)?,
        None => f64::NAN,
    };
    let mut spec = FluidSpec::named(name.clone(), temperature_k);
    if let Some(rho) = &fluid.density {
        spec = spec.with_density(rho.si(QuantityKind::Density, sys)?);
    }
    if let Some(mu) = &fluid.viscosity {
        spec = spec.with_viscosity(mu.si(QuantityKind::DynamicViscosity, sys)?);
    }
    Ok(problem.with_fluid(&spec)?)
}

fn compile_fitting(def: &FittingDef) -> Fitting {
    let name = |fallback: &str| def.name.clone().unwrap_or_else(|| fallback.to_string());
    match (def.kind, def.k, def.le_over_d) {
        (Some(kind), _, _) => Fitting {
            name: name(kind.display_name()),
            ..Fitting::from_kind(kind, def.count)
        },
        (None, Some(k), _) => Fitting::k(name("fitting"), k, def.count),
        (None, None, Some(ratio)) => Fitting::equivalent_length(name("fitting"), ratio, def.count),
        (None, None, None) => Fitting::k(name("fitting"), 0.0, def.count),
    }
}
