//! Working values of one solve.

use pf_components::{FrictionConfig, FrictionFactor, Pipe, friction_factor};

use crate::error::SolverResult;
use crate::problem::NormalizedProblem;

/// Transient iteration state (SI). Created at branch entry, updated every
/// iteration and handed to the composer once the branch finishes.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct FlowState {
    /// Current diameter [m]
    pub diameter: f64,
    /// Current mean velocity [m/s]
    pub velocity: f64,
    /// Frictional head loss [m]
    pub head_loss: f64,
    pub reynolds: f64,
    pub friction: FrictionFactor,
    /// Outer iterations spent by the branch
    pub iterations: usize,
    /// Last convergence measure of the branch
    pub residual: f64,
}

impl FlowState {
    /// Evaluate Re and f for a diameter/velocity pair. Head loss is left at 0.
    pub(crate) fn at(
        problem: &NormalizedProblem,
        diameter: f64,
        velocity: f64,
        config: &FrictionConfig,
    ) -> SolverResult<Self> {
        let pipe = problem.pipe(diameter);
        let reynolds = pipe.reynolds(problem.density, problem.viscosity, velocity);
        let friction = friction_factor(reynolds, pipe.relative_roughness(), config)?;
        Ok(Self {
            diameter,
            velocity,
            head_loss: 0.0,
            reynolds,
            friction,
            iterations: 0,
            residual: 0.0,
        })
    }

    pub(crate) fn pipe(&self, problem: &NormalizedProblem) -> Pipe {
        problem.pipe(self.diameter)
    }

    /// Head loss implied by the current velocity and friction factor [m].
    pub(crate) fn computed_head_loss(&self, problem: &NormalizedProblem) -> f64 {
        self.pipe(problem).head_loss(self.friction.f, self.velocity)
    }

    /// Q = V·A [m³/s]
    pub(crate) fn flow_rate(&self, problem: &NormalizedProblem) -> f64 {
        self.pipe(problem).flow_from_velocity(self.velocity)
    }
}
