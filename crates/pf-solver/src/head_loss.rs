//! Head-loss branch: direct evaluation at a known velocity.

use tracing::debug;

use crate::config::SolverConfig;
use crate::error::SolverResult;
use crate::problem::NormalizedProblem;
use crate::state::FlowState;

/// One friction-factor evaluation at the given velocity, then Darcy-Weisbach.
pub(crate) fn solve_head_loss(
    problem: &NormalizedProblem,
    diameter: f64,
    velocity: f64,
    config: &SolverConfig,
) -> SolverResult<FlowState> {
    let mut state = FlowState::at(problem, diameter, velocity, &config.friction)?;
    state.head_loss = state.computed_head_loss(problem);
    debug!(
        velocity,
        reynolds = state.reynolds,
        f = state.friction.f,
        head_loss = state.head_loss,
        "head loss evaluated"
    );
    Ok(state)
}
