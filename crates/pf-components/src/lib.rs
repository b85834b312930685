//! pf-components: pipe-flow building blocks.
//!
//! Provides:
//! - `Pipe`: geometry and Darcy-Weisbach head-loss terms
//! - `Fitting` and the minor-loss aggregator
//! - The friction factor solver (laminar, Colebrook-White, transitional blend)
//! - Catalogs of pipe materials, nominal pipe sizes and standard fittings
//!
//! All functions work in SI and are deterministic functions of their inputs.
//!
//! # Example
//!
//! ```
//! use pf_components::{FrictionConfig, Pipe, friction_factor};
//!
//! let pipe = Pipe::new(50.0, 0.1, 1e-4);
//! let re = pipe.reynolds(998.2, 1.002e-3, 1.27);
//! let f = friction_factor(re, pipe.relative_roughness(), &FrictionConfig::default()).unwrap();
//! let h_l = pipe.head_loss(f.f, 1.27);
//! assert!(h_l > 0.0);
//! ```

pub mod catalog;
pub mod common;
pub mod error;
pub mod fitting;
pub mod friction;
pub mod pipe;

// Re-exports
pub use catalog::{NOMINAL_PIPES, NominalPipe, PipeMaterial, nominal_inside_diameter};
pub use error::{ComponentError, ComponentResult};
pub use fitting::{Fitting, FittingKind, FittingLoss, aggregate, aggregate_equivalent_length};
pub use friction::{
    FrictionConfig, FrictionFactor, FrictionModel, LAMINAR_LIMIT, TURBULENT_LIMIT,
    colebrook_residual, friction_factor, swamee_jain,
};
pub use pipe::{Pipe, head_from_pressure, hydraulic_power, pressure_from_head, velocity_head};
