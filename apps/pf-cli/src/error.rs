//! Error type for the command line front end.

#[derive(Debug, thiserror::Error)]
pub enum CliError {
    #[error("{0}")]
    Project(#[from] pf_project::ProjectError),

    #[error("Solver error: {0}")]
    Solver(#[from] pf_solver::SolverError),

    #[error("Invalid input: {0}")]
    InvalidInput(String),

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
}

pub type CliResult<T> = Result<T, CliError>;
