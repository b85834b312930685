//! Flow branch: velocity and flow rate from a known head loss.

use pf_core::relative_change;
use tracing::{debug, trace, warn};

use crate::config::SolverConfig;
use crate::error::SolverResult;
use crate::problem::NormalizedProblem;
use crate::root::bisect_log;
use crate::state::FlowState;

/// Fixed-point iteration on V:
///
/// ```text
/// V_{n+1} = sqrt(2 g H_L / (f(Re(V_n)) (L/D + ΣL_eq/D) + K_total))
/// ```
///
/// starting from `config.initial_velocity`, until the relative change of V
/// drops below `config.flow_rel_tol`.
///
/// The map contracts only while `|d ln f / d ln Re| < 2`. In the
/// transitional band of a very rough pipe f rises steeply with Re and the
/// iterates oscillate, so a capped fixed point falls back to a bracketed
/// bisection on `H_L(V)`, which is monotone in V.
pub(crate) fn solve_flow(
    problem: &NormalizedProblem,
    diameter: f64,
    head_loss: f64,
    config: &SolverConfig,
) -> SolverResult<FlowState> {
    debug!(diameter, head_loss, "solving for flow");
    let pipe = problem.pipe(diameter);
    let mut state = FlowState::at(problem, diameter, config.initial_velocity, &config.friction)?;

    for iter in 1..=config.flow_max_iterations {
        let velocity = pipe.velocity_for_head(state.friction.f, head_loss)?;
        let change = relative_change(state.velocity, velocity);
        trace!(iter, velocity, f = state.friction.f, change, "flow iteration");

        state = FlowState::at(problem, diameter, velocity, &config.friction)?;
        state.iterations = iter;
        state.residual = change;

        if change < config.flow_rel_tol {
            state.head_loss = head_loss;
            debug!(velocity, iterations = iter, "flow converged");
            return Ok(state);
        }
    }

    warn!(
        velocity = state.velocity,
        residual = state.residual,
        "flow fixed point stalled, bisecting on velocity"
    );
    bisect_velocity(problem, diameter, head_loss, state.velocity, config)
}

/// Relative head mismatch `(H_L(V) − H_t) / H_t`.
fn head_mismatch(
    problem: &NormalizedProblem,
    diameter: f64,
    head_loss: f64,
    velocity: f64,
    config: &SolverConfig,
) -> SolverResult<f64> {
    let state = FlowState::at(problem, diameter, velocity, &config.friction)?;
    Ok((state.computed_head_loss(problem) - head_loss) / head_loss)
}

fn bisect_velocity(
    problem: &NormalizedProblem,
    diameter: f64,
    head_loss: f64,
    near: f64,
    config: &SolverConfig,
) -> SolverResult<FlowState> {
    let mismatch = |v: f64| head_mismatch(problem, diameter, head_loss, v, config);

    // Grow a bracket geometrically around the last iterate.
    let mut lo = 0.5 * near;
    let mut hi = 2.0 * near;
    for _ in 0..BRACKET_STEPS {
        if mismatch(lo)? < 0.0 {
            break;
        }
        lo *= 0.5;
    }
    for _ in 0..BRACKET_STEPS {
        if mismatch(hi)? > 0.0 {
            break;
        }
        hi *= 2.0;
    }

    let root = bisect_log(
        "flow velocity",
        lo,
        hi,
        config.flow_rel_tol,
        config.flow_max_iterations,
        mismatch,
    )?;

    let mut state = FlowState::at(problem, diameter, root.x, &config.friction)?;
    state.head_loss = head_loss;
    state.iterations = config.flow_max_iterations + root.iterations;
    state.residual = root.residual;
    debug!(velocity = root.x, iterations = root.iterations, "flow bisection converged");
    Ok(state)
}

const BRACKET_STEPS: usize = 60;

#[cfg(test)]
mod tests {
    use super::*;
    use crate::problem::{FlowProblem, Unknown};

    fn water_problem(head: f64) -> NormalizedProblem {
        FlowProblem::new(Unknown::Flow, 50.0, 1e-4, 998.2, 1.002e-3)
            .with_diameter(0.1)
            .with_head_loss(head)
            .normalize()
            .unwrap()
    }

    #[test]
    fn converged_state_reproduces_head() {
        let p = water_problem(2.0);
        let state = solve_flow(&p, 0.1, 2.0, &SolverConfig::default()).unwrap();
        let h = state.computed_head_loss(&p);
        assert!((h - 2.0).abs() / 2.0 < 1e-5, "h = {h}");
        assert!(state.iterations < 20);
    }

    #[test]
    fn laminar_flow_converges() {
        // Viscous oil through a small tube
        let p = FlowProblem::new(Unknown::Flow, 10.0, 0.0, 900.0, 0.5)
            .with_diameter(0.02)
            .with_head_loss(1.0)
            .normalize()
            .unwrap();
        let state = solve_flow(&p, 0.02, 1.0, &SolverConfig::default()).unwrap();
        // Hagen-Poiseuille: V = ρ g H D² / (32 μ L)
        let expected = 900.0 * 9.806_65 * 1.0 * 0.02_f64.powi(2) / (32.0 * 0.5 * 10.0);
        assert!((state.velocity - expected).abs() / expected < 1e-5);
        assert!(state.reynolds < 2300.0);
    }

    /// Water through a 10 mm tube with ε/D = 0.05.
    fn rough_tube(head: f64) -> NormalizedProblem {
        FlowProblem::new(Unknown::Flow, 5.0, 5e-4, 998.2, 1.002e-3)
            .with_diameter(0.01)
            .with_head_loss(head)
            .normalize()
            .unwrap()
    }

    #[test]
    fn rough_transitional_flow_falls_back_to_bisection() {
        let config = SolverConfig::default();
        for re in [2350.0, 2600.0, 3000.0] {
            let v = re * 1.002e-3 / (998.2 * 0.01);
            let p = rough_tube(1.0);
            let h = FlowState::at(&p, 0.01, v, &config.friction)
                .unwrap()
                .computed_head_loss(&p);

            let p = rough_tube(h);
            let state = solve_flow(&p, 0.01, h, &config).unwrap();
            assert!((state.velocity - v).abs() / v < 1e-5, "Re {re}: V = {}", state.velocity);
            assert!((state.computed_head_loss(&p) - h).abs() / h < 1e-5);
        }
    }

    #[test]
    fn iteration_cap_is_reported() {
        let p = water_problem(2.0);
        let config = SolverConfig {
            flow_max_iterations: 1,
            flow_rel_tol: 1e-15,
            ..SolverConfig::default()
        };
        let err = solve_flow(&p, 0.1, 2.0, &config).unwrap_err();
        assert!(matches!(err, crate::error::SolverError::Convergence { iterations: 1, .. }));
    }
}
