use crate::PfError;

/// Floating point type used throughout system
pub type Real = f64;

/// Relative change from `old` to `new`, measured against `new`.
///
/// Falls back to the absolute change when `new` is zero.
pub fn relative_change(old: Real, new: Real) -> Real {
    let diff = (new - old).abs();
    if new == 0.0 { diff } else { diff / new.abs() }
}

pub fn ensure_finite(v: Real, what: &'static str) -> Result<Real, PfError> {
    if v.is_finite() {
        Ok(v)
    } else {
        Err(PfError::NonFinite { what, value: v })
    }
}

/// Linear interpolation of `y` at `x` between `(x0, y0)` and `(x1, y1)`.
pub fn lerp(x0: Real, y0: Real, x1: Real, y1: Real, x: Real) -> Real {
    if x1 == x0 {
        return y0;
    }
    y0 + (y1 - y0) * (x - x0) / (x1 - x0)
}
