//! Tabulated fluid properties.
//!
//! Tables are `static` and read-only; lookups interpolate linearly between
//! neighbouring rows and never extrapolate.

use crate::error::{FluidError, FluidResult};
use pf_core::numeric::lerp;

/// Offset between kelvin and degrees Celsius.
const KELVIN_OFFSET: f64 = 273.15;

/// One tabulated row.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct PropertyPoint {
    /// Temperature [°C]
    pub t_c: f64,
    /// Density [kg/m³]
    pub density: f64,
    /// Dynamic viscosity [Pa·s]
    pub viscosity: f64,
}

const fn row(t_c: f64, density: f64, viscosity: f64) -> PropertyPoint {
    PropertyPoint {
        t_c,
        density,
        viscosity,
    }
}

/// Property table for a single fluid, rows sorted by temperature.
#[derive(Debug, Clone, Copy)]
pub struct PropertyTable {
    pub fluid: &'static str,
    pub rows: &'static [PropertyPoint],
}

/// Liquid water at atmospheric pressure.
pub static WATER: PropertyTable = PropertyTable {
    fluid: "Water",
    rows: &[
        row(0.0, 999.8, 1.792e-3),
        row(5.0, 1000.0, 1.519e-3),
        row(10.0, 999.7, 1.307e-3),
        row(15.0, 999.1, 1.138e-3),
        row(20.0, 998.2, 1.002e-3),
        row(25.0, 997.0, 0.890e-3),
        row(30.0, 995.7, 0.798e-3),
        row(40.0, 992.2, 0.653e-3),
        row(50.0, 988.0, 0.547e-3),
        row(60.0, 983.2, 0.467e-3),
        row(70.0, 977.8, 0.404e-3),
        row(80.0, 971.8, 0.355e-3),
        row(90.0, 965.3, 0.315e-3),
        row(100.0, 958.4, 0.282e-3),
    ],
};

/// Dry air at 1 atm.
pub static AIR: PropertyTable = PropertyTable {
    fluid: "Air",
    rows: &[
        row(-20.0, 1.395, 1.630e-5),
        row(0.0, 1.292, 1.729e-5),
        row(20.0, 1.204, 1.825e-5),
        row(40.0, 1.127, 1.918e-5),
        row(60.0, 1.059, 2.008e-5),
        row(80.0, 0.999, 2.096e-5),
        row(100.0, 0.946, 2.181e-5),
    ],
};

impl PropertyTable {
    /// Lowest tabulated temperature [K].
    pub fn min_k(&self) -> f64 {
        self.rows[0].t_c + KELVIN_OFFSET
    }

    /// Highest tabulated temperature [K].
    pub fn max_k(&self) -> f64 {
        self.rows[self.rows.len() - 1].t_c + KELVIN_OFFSET
    }

    /// Interpolate (density, viscosity) at `temperature_k`.
    pub fn interpolate(&self, temperature_k: f64) -> FluidResult<PropertyPoint> {
        let out_of_range = || FluidError::OutOfRange {
            fluid: self.fluid,
            temperature_k,
            min_k: self.min_k(),
            max_k: self.max_k(),
        };

        if !temperature_k.is_finite() {
            return Err(out_of_range());
        }

        let t_c = temperature_k - KELVIN_OFFSET;
        let first = self.rows[0];
        let last = self.rows[self.rows.len() - 1];
        // Tolerate the rounding of a K -> °C round trip at the table ends.
        let edge = 1e-9;
        if t_c < first.t_c - edge || t_c > last.t_c + edge {
            return Err(out_of_range());
        }
        if t_c <= first.t_c {
            return Ok(first);
        }
        if t_c >= last.t_c {
            return Ok(last);
        }

        let upper = self.rows.partition_point(|p| p.t_c < t_c);
        let hi = self.rows[upper];
        if hi.t_c == t_c {
            return Ok(hi);
        }
        let lo = self.rows[upper - 1];

        Ok(PropertyPoint {
            t_c,
            density: lerp(lo.t_c, lo.density, hi.t_c, hi.density, t_c),
            viscosity: lerp(lo.t_c, lo.viscosity, hi.t_c, hi.viscosity, t_c),
        })
    }
}
