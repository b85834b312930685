//! pf-project: YAML/JSON problem files for the pipe-flow solver.
//!
//! A problem file names its fluid, pipe, flow or head and fittings in a
//! chosen unit system; [`compile`] turns it into a [`pf_solver::FlowProblem`].

pub mod compile;
pub mod schema;
pub mod validate;

pub use compile::{CompiledProblem, compile};
pub use schema::*;
pub use validate::{ValidationError, validate_problem};

use pf_core::UnitError;
use pf_solver::SolverError;

pub type ProjectResult<T> = Result<T, ProjectError>;

#[derive(thiserror::Error, Debug)]
pub enum ProjectError {
    #[error("Validation error: {0}")]
    Validation(#[from] ValidationError),

    #[error("Unit error: {0}")]
    Unit(#[from] UnitError),

    #[error("Solver error: {0}")]
    Solver(#[from] SolverError),

    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    #[error("YAML error: {0}")]
    Yaml(#[from] serde_yaml::Error),

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),
}

pub fn from_yaml_str(content: &str) -> ProjectResult<ProblemFile> {
    let file: ProblemFile = serde_yaml::from_str(content)?;
    validate_problem(&file)?;
    Ok(file)
}

pub fn load_yaml(path: &std::path::Path) -> ProjectResult<ProblemFile> {
    let content = std::fs::read_to_string(path)?;
    from_yaml_str(&content)
}

pub fn save_yaml(path: &std::path::Path, file: &ProblemFile) -> ProjectResult<()> {
    validate_problem(file)?;
    let content = serde_yaml::to_string(file)?;
    std::fs::write(path, content)?;
    Ok(())
}

pub fn load_json(path: &std::path::Path) -> ProjectResult<ProblemFile> {
    let content = std::fs::read_to_string(path)?;
    let file: ProblemFile = serde_json::from_str(&content)?;
    validate_problem(&file)?;
    Ok(file)
}

pub fn save_json(path: &std::path::Path, file: &ProblemFile) -> ProjectResult<()> {
    validate_problem(file)?;
    let content = serde_json::to_string_pretty(file)?;
    std::fs::write(path, content)?;
    Ok(())
}
