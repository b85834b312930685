//! Diameter branch: the pipe size that dissipates a target head loss.

use tracing::debug;

use crate::config::SolverConfig;
use crate::error::SolverResult;
use crate::problem::{FlowSi, NormalizedProblem};
use crate::root::bisect_log;
use crate::state::FlowState;

/// Bisection in `ln D` over `[config.diameter_min, config.diameter_max]` on
/// the relative mismatch `(H_L(D) − H_t) / H_t`.
///
/// A given flow rate is held fixed (V follows D); a given velocity is held
/// fixed directly.
pub(crate) fn solve_diameter(
    problem: &NormalizedProblem,
    flow: FlowSi,
    target_head: f64,
    config: &SolverConfig,
) -> SolverResult<FlowState> {
    debug!(target_head, ?flow, "solving for diameter");

    let state_at = |diameter: f64| -> SolverResult<FlowState> {
        let velocity = flow.velocity(&problem.pipe(diameter));
        let mut state = FlowState::at(problem, diameter, velocity, &config.friction)?;
        state.head_loss = state.computed_head_loss(problem);
        Ok(state)
    };

    let root = bisect_log(
        "pipe diameter",
        config.diameter_min,
        config.diameter_max,
        config.diameter_rel_tol,
        config.diameter_max_iterations,
        |diameter| Ok((state_at(diameter)?.head_loss - target_head) / target_head),
    )?;

    let mut state = state_at(root.x)?;
    state.iterations = root.iterations;
    state.residual = root.residual;
    debug!(diameter = state.diameter, iterations = root.iterations, "diameter converged");
    Ok(state)
}
