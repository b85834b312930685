//! pf-core: stable foundation for pipeflow.
//!
//! Contains:
//! - units (uom SI aliases and standard gravity)
//! - convert (unit-system normalization between SI and Imperial)
//! - numeric (float helpers: finiteness, relative change, interpolation)
//! - error (shared error types)

pub mod convert;
pub mod error;
pub mod numeric;
pub mod units;

// Re-exports: nice ergonomics for downstream crates
pub use convert::{
    QuantityKind, UnitError, UnitSystem, denormalize, normalize, parse_quantity, unit_label,
};
pub use error::{PfError, PfResult};
pub use numeric::*;
