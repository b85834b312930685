//! Bounded bracketing root search.

use tracing::{trace, warn};

use crate::error::{SolverError, SolverResult};

/// Converged root of a bracketed search.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Root {
    pub x: f64,
    /// |g(x)| at the returned point
    pub residual: f64,
    pub iterations: usize,
}

/// Bisection in `ln x` on `[lo, hi]` (both positive) for `g(x) = 0`.
///
/// Stops once `|g(x)| < tol`. `g` should already be scaled (e.g. a relative
/// mismatch) so that `tol` is meaningful. Fails with `Convergence` if `g`
/// has the same sign at both ends or if `max_iterations` is reached.
pub fn bisect_log<G>(
    what: &str,
    lo: f64,
    hi: f64,
    tol: f64,
    max_iterations: usize,
    mut g: G,
) -> SolverResult<Root>
where
    G: FnMut(f64) -> SolverResult<f64>,
{
    let mut lo_ln = lo.ln();
    let mut hi_ln = hi.ln();
    let g_lo = g(lo)?;
    let g_hi = g(hi)?;

    if g_lo.abs() < tol {
        return Ok(Root { x: lo, residual: g_lo.abs(), iterations: 0 });
    }
    if g_hi.abs() < tol {
        return Ok(Root { x: hi, residual: g_hi.abs(), iterations: 0 });
    }
    if g_lo.signum() == g_hi.signum() {
        let (x, residual) = if g_lo.abs() < g_hi.abs() { (lo, g_lo) } else { (hi, g_hi) };
        return Err(SolverError::Convergence {
            what: format!("{what}: no sign change in bracket [{lo}, {hi}]"),
            iterations: 0,
            last_iterate: x,
            residual,
        });
    }

    let lo_positive = g_lo > 0.0;
    let mut x = (0.5 * (lo_ln + hi_ln)).exp();
    let mut residual = f64::INFINITY;

    for iter in 1..=max_iterations {
        let mid_ln = 0.5 * (lo_ln + hi_ln);
        x = mid_ln.exp();
        let g_mid = g(x)?;
        residual = g_mid;
        trace!(iter, x, residual, "{what} bisection");

        if g_mid.abs() < tol {
            return Ok(Root { x, residual: g_mid.abs(), iterations: iter });
        }
        if (g_mid > 0.0) == lo_positive {
            lo_ln = mid_ln;
        } else {
            hi_ln = mid_ln;
        }
    }

    warn!(x, residual, max_iterations, "{what} bisection hit the iteration cap");
    Err(SolverError::Convergence {
        what: what.to_string(),
        iterations: max_iterations,
        last_iterate: x,
        residual,
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn finds_cube_root() {
        let root = bisect_log("cube root", 0.1, 10.0, 1e-10, 200, |x| Ok(x * x * x - 8.0)).unwrap();
        assert!((root.x - 2.0).abs() < 1e-9);
        assert!(root.iterations > 0);
    }

    #[test]
    fn decreasing_function() {
        let root = bisect_log("inverse", 1e-3, 5.0, 1e-9, 200, |x| Ok(1.0 / x - 4.0)).unwrap();
        assert!((root.x - 0.25).abs() < 1e-9);
    }

    #[test]
    fn no_sign_change() {
        let err = bisect_log("shifted", 1.0, 2.0, 1e-9, 100, |x| Ok(x + 1.0)).unwrap_err();
        match err {
            SolverError::Convergence { iterations, last_iterate, .. } => {
                assert_eq!(iterations, 0);
                assert_eq!(last_iterate, 1.0);
            }
            other => panic!("unexpected {other:?}"),
        }
    }

    #[test]
    fn iteration_cap() {
        let err = bisect_log("slow", 0.1, 10.0, 0.0, 5, |x| Ok(x - 3.0)).unwrap_err();
        assert!(matches!(err, SolverError::Convergence { iterations: 5, .. }));
    }

    #[test]
    fn errors_from_g_propagate() {
        let err = bisect_log("failing", 0.1, 10.0, 1e-9, 10, |_| {
            Err(SolverError::invalid("boom"))
        })
        .unwrap_err();
        assert!(matches!(err, SolverError::InvalidInput { .. }));
    }
}
