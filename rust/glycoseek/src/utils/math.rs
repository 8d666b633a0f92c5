/// Natural log of `n!`, exact summation for small `n` and Stirling's
/// series past that.
///
/// Example:
/// ```
/// use glycoseek::utils::math::lnfact;
///
/// assert_eq!(lnfact(0), 0.0);
/// assert!((lnfact(5) - 120f64.ln()).abs() < 1e-12);
/// ```
pub fn lnfact(n: usize) -> f64 {
    if n < 2 {
        return 0.0;
    }
    if n <= 64 {
        return (2..=n).map(|x| (x as f64).ln()).sum();
    }
    let n = n as f64;
    n * n.ln() - n + 0.5 * (2.0 * std::f64::consts::PI * n).ln() + 1.0 / (12.0 * n)
        - 1.0 / (360.0 * n.powi(3))
}

/// `max` that keeps `a` unless `b` is strictly larger.
///
/// Unlike [`f64::max`] a NaN in `a` is returned as is, so degenerate inputs
/// stay degenerate and get clamped by the caller.
pub fn nan_keeping_max(a: f64, b: f64) -> f64 {
    if b > a { b } else { a }
}

/// `min` counterpart of [`nan_keeping_max`].
pub fn nan_keeping_min(a: f64, b: f64) -> f64 {
    if b < a { b } else { a }
}

/// Replaces NaN and infinities by zero.
pub fn finite_or_zero(x: f64) -> f64 {
    if x.is_finite() { x } else { 0.0 }
}
