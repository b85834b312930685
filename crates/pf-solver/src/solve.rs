//! Entry point: dispatch on the unknown and compose the result.

use tracing::{debug, info_span};

use crate::config::SolverConfig;
use crate::diameter::solve_diameter;
use crate::error::{SolverError, SolverResult};
use crate::flow::solve_flow;
use crate::head_loss::solve_head_loss;
use crate::problem::{FlowProblem, NormalizedProblem, Unknown};
use crate::result::{FlowResult, compose};
use crate::state::FlowState;

/// Solve a problem with the default [`SolverConfig`].
pub fn solve(problem: &FlowProblem) -> SolverResult<FlowResult> {
    solve_with_config(problem, &SolverConfig::default())
}

/// Solve a problem with explicit tolerances and iteration caps.
pub fn solve_with_config(problem: &FlowProblem, config: &SolverConfig) -> SolverResult<FlowResult> {
    let _span = info_span!("solve", target = ?problem.target).entered();
    config.validate().map_err(SolverError::invalid)?;

    let normalized = problem.normalize()?;
    let state = solve_state(&normalized, config)?;
    let result = compose(&state, &normalized, config)?;
    debug!(
        regime = %result.regime,
        warnings = result.warnings.len(),
        "solve finished"
    );
    Ok(result)
}

fn solve_state(problem: &NormalizedProblem, config: &SolverConfig) -> SolverResult<FlowState> {
    match (problem.target, problem.diameter, problem.flow, problem.head) {
        (Unknown::Flow, Some(d), None, Some(h)) => solve_flow(problem, d, h, config),
        (Unknown::HeadLoss, Some(d), Some(flow), None) => {
            let v = flow.velocity(&problem.pipe(d));
            solve_head_loss(problem, d, v, config)
        }
        (Unknown::Diameter, None, Some(flow), Some(h)) => solve_diameter(problem, flow, h, config),
        (Unknown::Power, Some(d), Some(flow), None) => {
            let v = flow.velocity(&problem.pipe(d));
            solve_head_loss(problem, d, v, config)
        }
        (Unknown::Power, Some(d), None, Some(h)) => solve_flow(problem, d, h, config),
        (Unknown::Power, Some(d), Some(flow), Some(h)) => {
            // Flow and head both given: nothing to iterate, report the given head.
            let v = flow.velocity(&problem.pipe(d));
            let mut state = FlowState::at(problem, d, v, &config.friction)?;
            state.head_loss = h;
            Ok(state)
        }
        _ => Err(SolverError::invalid(format!(
            "inconsistent unknowns for target {:?}",
            problem.target
        ))),
    }
}
