//! Steady, incompressible pipe-flow solver.
//!
//! A [`FlowProblem`] leaves one quantity unknown (flow, head loss, diameter or
//! pumping power). [`solve`] normalizes it to SI, runs the branch for that
//! unknown, and composes a [`FlowResult`] in the problem's unit system.
//!
//! ```
//! use pf_solver::{FlowProblem, Regime, Unknown, solve};
//!
//! let problem = FlowProblem::new(Unknown::HeadLoss, 50.0, 1e-4, 998.2, 1.002e-3)
//!     .with_diameter(0.1)
//!     .with_flow_rate(0.01);
//! let result = solve(&problem).unwrap();
//! assert_eq!(result.regime, Regime::Turbulent);
//! assert!(result.head_loss > 0.0);
//! ```

pub mod config;
mod diameter;
pub mod error;
mod flow;
mod head_loss;
pub mod problem;
pub mod result;
pub mod root;
pub mod solve;
pub mod state;
pub mod sweep;

pub use config::SolverConfig;
pub use error::{SolverError, SolverResult};
pub use problem::{FlowInput, FlowProblem, HeadInput, Unknown};
pub use result::{FlowResult, Regime, Warning};
pub use solve::{solve, solve_with_config};
pub use state::FlowState;
pub use sweep::{Spacing, SweepRange, SweepVariable, sweep, sweep_with_config};
