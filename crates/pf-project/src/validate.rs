//! Structural validation of problem files.
//!
//! Checks what serde cannot: mutually exclusive fields, required pairs and
//! simple ranges. Physical validation happens in the solver.

use pf_solver::Unknown;

use crate::schema::{FittingDef, FluidDef, PipeDef, ProblemFile, SweepDef};

#[derive(thiserror::Error, Debug, Clone, PartialEq)]
pub enum ValidationError {
    #[error("Missing field: {field} ({reason})")]
    Missing { field: String, reason: String },

    #[error("Conflicting fields: {first} and {second}")]
    Conflict { first: String, second: String },

    #[error("Invalid value: {field} = {value} ({reason})")]
    InvalidValue {
        field: String,
        value: String,
        reason: String,
    },
}

pub fn validate_problem(file: &ProblemFile) -> Result<(), ValidationError> {
    validate_fluid(&file.fluid)?;
    validate_pipe(&file.pipe, file.target)?;

    if let Some(eta) = file.efficiency {
        if !(eta > 0.0 && eta <= 1.0) {
            return Err(ValidationError::InvalidValue {
                field: "efficiency".into(),
                value: eta.to_string(),
                reason: "must be in (0, 1]".into(),
            });
        }
    }

    for (i, fitting) in file.fittings.iter().enumerate() {
        validate_fitting(i, fitting)?;
    }

    if let Some(sweep) = &file.sweep {
        validate_sweep(sweep)?;
    }
    Ok(())
}

fn validate_fluid(fluid: &FluidDef) -> Result<(), ValidationError> {
    match &fluid.name {
        Some(_) => {
            let both_overridden = fluid.density.is_some() && fluid.viscosity.is_some();
            if fluid.temperature.is_none() && !both_overridden {
                return Err(ValidationError::Missing {
                    field: "fluid.temperature".into(),
                    reason: "needed to look up a named fluid".into(),
                });
            }
        }
        None => {
            for (field, value) in [
                ("fluid.density", &fluid.density),
                ("fluid.viscosity", &fluid.viscosity),
            ] {
                if value.is_none() {
                    return Err(ValidationError::Missing {
                        field: field.into(),
                        reason: "required when no fluid name is given".into(),
                    });
                }
            }
        }
    }
    Ok(())
}

fn validate_pipe(pipe: &PipeDef, target: Unknown) -> Result<(), ValidationError> {
    if pipe.diameter.is_some() && pipe.nominal.is_some() {
        return Err(ValidationError::Conflict {
            first: "pipe.diameter".into(),
            second: "pipe.nominal".into(),
        });
    }
    if pipe.roughness.is_some() && pipe.material.is_some() {
        return Err(ValidationError::Conflict {
            first: "pipe.roughness".into(),
            second: "pipe.material".into(),
        });
    }
    let has_diameter = pipe.diameter.is_some() || pipe.nominal.is_some();
    if target == Unknown::Diameter && has_diameter {
        return Err(ValidationError::InvalidValue {
            field: "pipe.diameter".into(),
            value: "given".into(),
            reason: "the diameter is the unknown".into(),
        });
    }
    if target != Unknown::Diameter && !has_diameter {
        return Err(ValidationError::Missing {
            field: "pipe.diameter".into(),
            reason: "give a diameter or a nominal size".into(),
        });
    }
    Ok(())
}

fn validate_fitting(index: usize, fitting: &FittingDef) -> Result<(), ValidationError> {
    let given = [
        fitting.kind.is_some(),
        fitting.k.is_some(),
        fitting.le_over_d.is_some(),
    ]
    .into_iter()
    .filter(|g| *g)
    .count();
    if given != 1 {
        return Err(ValidationError::InvalidValue {
            field: format!("fittings[{index}]"),
            value: format!("{given} coefficients"),
            reason: "give exactly one of kind, k or le_over_d".into(),
        });
    }
    Ok(())
}

fn validate_sweep(sweep: &SweepDef) -> Result<(), ValidationError> {
    if sweep.points < 2 {
        return Err(ValidationError::InvalidValue {
            field: "sweep.points".into(),
            value: sweep.points.to_string(),
            reason: "need at least 2 points".into(),
        });
    }
    Ok(())
}
