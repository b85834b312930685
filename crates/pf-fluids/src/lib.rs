//! pf-fluids: fluid property resolution for pipeflow.
//!
//! Provides:
//! - Tabulated density/viscosity for common working fluids
//! - A small catalog to resolve fluids by name or alias
//! - `resolve`, which turns a `FluidSpec` into SI `FluidProperties`
//!
//! # Example
//!
//! ```
//! use pf_fluids::{FluidSpec, resolve};
//! use pf_core::units::degc;
//!
//! let props = resolve(&FluidSpec::named("water", degc(20.0).value)).unwrap();
//! assert!((props.density - 998.2).abs() < 1e-9);
//! ```

pub mod catalog;
pub mod error;
pub mod resolver;
pub mod table;

// Re-exports for ergonomics
pub use catalog::{Fluid, FluidCatalogEntry, catalog, lookup};
pub use error::{FluidError, FluidResult};
pub use resolver::{FluidProperties, FluidSpec, resolve};
pub use table::{PropertyPoint, PropertyTable};
