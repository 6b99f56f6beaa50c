//! Bracketing root solver.
//!
//! A single Brent-style solver covers the implicit-geometry needs of the
//! model catalogue (currently the tied core-shell ellipsoid, which solves
//! a cubic volume constraint for its shell thickness at every evaluation).
//! Inverse quadratic interpolation and the secant step are tried first,
//! with bisection as the fallback that guarantees convergence.

use crate::error::{MathError, MathResult};

/// Default convergence tolerance.
pub const DEFAULT_TOLERANCE: f64 = 1e-12;

/// Default maximum iterations.
pub const DEFAULT_MAX_ITERATIONS: u32 = 128;

/// Configuration for the root solver.
#[derive(Debug, Clone, Copy)]
pub struct SolverConfig {
    /// Tolerance for convergence (on both residual and bracket width).
    pub tolerance: f64,
    /// Maximum number of iterations.
    pub max_iterations: u32,
}

impl Default for SolverConfig {
    fn default() -> Self {
        Self {
            tolerance: DEFAULT_TOLERANCE,
            max_iterations: DEFAULT_MAX_ITERATIONS,
        }
    }
}

impl SolverConfig {
    /// Creates a new solver configuration.
    #[must_use]
    pub fn new(tolerance: f64, max_iterations: u32) -> Self {
        Self {
            tolerance,
            max_iterations,
        }
    }
}

/// Finds a root of `f` in `[a, b]`.
///
/// Requires `f(a)` and `f(b)` to have opposite signs.
///
/// # Example
///
/// ```rust
/// use kratky_math::roots::{bracket_root, SolverConfig};
///
/// let root = bracket_root(|x| x * x * x - x - 2.0, 1.0, 2.0, &SolverConfig::default()).unwrap();
/// assert!((root * root * root - root - 2.0).abs() < 1e-10);
/// ```
pub fn bracket_root<F>(f: F, a: f64, b: f64, config: &SolverConfig) -> MathResult<f64>
where
    F: Fn(f64) -> f64,
{
    let mut a = a;
    let mut b = b;
    let mut fa = f(a);
    let mut fb = f(b);

    if fa == 0.0 {
        return Ok(a);
    }
    if fb == 0.0 {
        return Ok(b);
    }
    if fa * fb > 0.0 {
        return Err(MathError::InvalidBracket { a, b, fa, fb });
    }

    // keep |f(a)| >= |f(b)| so b is the best estimate
    if fa.abs() < fb.abs() {
        std::mem::swap(&mut a, &mut b);
        std::mem::swap(&mut fa, &mut fb);
    }

    let mut c = a;
    let mut fc = fa;
    let mut step = b - a;

    for iteration in 0..config.max_iterations {
        if fb.abs() < config.tolerance || (b - a).abs() < config.tolerance {
            log::trace!("bracket_root converged after {iteration} iterations");
            return Ok(b);
        }

        let mut s = 0.5 * (a + b);
        let mut bisected = true;

        if (fa - fc).abs() > 1e-15 && (fb - fc).abs() > 1e-15 {
            // inverse quadratic interpolation
            let r = fb / fc;
            let p = fa / fc;
            let q = fa / fb;
            let candidate = b
                - (q * (q - r) * (b - a) + (1.0 - r) * (b - c) * p)
                    / ((q - 1.0) * (r - 1.0) * (p - 1.0));
            let m = 0.5 * (a + b);
            if candidate > m.min(b)
                && candidate < m.max(b)
                && (candidate - b).abs() < 0.5 * step.abs()
            {
                s = candidate;
                bisected = false;
            }
        } else if (fb - fa).abs() > 1e-15 {
            // secant step
            let candidate = b - fb * (b - a) / (fb - fa);
            let m = 0.5 * (a + b);
            if candidate > m.min(b)
                && candidate < m.max(b)
                && (candidate - b).abs() < 0.5 * step.abs()
            {
                s = candidate;
                bisected = false;
            }
        }

        step = if bisected { b - a } else { s - b };

        c = b;
        fc = fb;

        let fs = f(s);
        if fa * fs < 0.0 {
            b = s;
            fb = fs;
        } else {
            a = s;
            fa = fs;
        }

        if fa.abs() < fb.abs() {
            std::mem::swap(&mut a, &mut b);
            std::mem::swap(&mut fa, &mut fb);
        }
    }

    Err(MathError::convergence_failed(
        config.max_iterations,
        fb.abs(),
    ))
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;

    #[test]
    fn test_sqrt_2() {
        let root = bracket_root(|x| x * x - 2.0, 1.0, 2.0, &SolverConfig::default()).unwrap();
        assert_relative_eq!(root, std::f64::consts::SQRT_2, epsilon = 1e-10);
    }

    #[test]
    fn test_shell_volume_cubic() {
        // the tied-ellipsoid constraint: (re + t)^2 (re x + t xp) - re^3 x = target
        let (re, x, xp) = (200.0, 0.1, 0.2);
        let target = 1.34375 * re * re * re * x;
        let g = |t: f64| (re + t) * (re + t) * (re * x + t * xp) - re * re * re * x - target;
        let root = bracket_root(g, 0.0, 4.0 * re, &SolverConfig::default()).unwrap();
        assert_relative_eq!(root, 50.0, max_relative = 1e-9);
    }

    #[test]
    fn test_endpoint_root() {
        let root = bracket_root(|x| x, 0.0, 1.0, &SolverConfig::default()).unwrap();
        assert_relative_eq!(root, 0.0, epsilon = 1e-12);
    }

    #[test]
    fn test_invalid_bracket() {
        let result = bracket_root(|x| x * x - 2.0, 2.0, 3.0, &SolverConfig::default());
        assert!(matches!(result, Err(MathError::InvalidBracket { .. })));
    }
}
