//! Small numeric helpers shared by the scoring crates.
//!
//! Every helper substitutes a documented fallback for degenerate input
//! (empty slices, NaN) instead of returning an error.

/// Arithmetic mean; 0.0 for an empty slice.
pub fn mean(data: &[f64]) -> f64 {
    if data.is_empty() {
        return 0.0;
    }
    data.iter().sum::<f64>() / data.len() as f64
}

/// Round half away from zero to `decimals` places.
pub fn round_to(value: f64, decimals: u32) -> f64 {
    let factor = 10_f64.powi(decimals as i32);
    (value * factor).round() / factor
}

/// Clamp into `[min, max]`, mapping NaN to `min`.
pub fn clamp_or_min(value: f64, min: f64, max: f64) -> f64 {
    if value.is_nan() {
        return min;
    }
    value.clamp(min, max)
}

/// Clamp a percentage-style score into [0, 100].
pub fn clamp_percent(value: f64) -> f64 {
    clamp_or_min(value, 0.0, 100.0)
}

/// Divide, returning `fallback` when the denominator is zero or the result
/// is not finite.
pub fn safe_div(numerator: f64, denominator: f64, fallback: f64) -> f64 {
    if denominator == 0.0 {
        return fallback;
    }
    let result = numerator / denominator;
    if result.is_finite() {
        result
    } else {
        fallback
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_mean() {
        assert_eq!(mean(&[]), 0.0);
        assert!((mean(&[1.0, 2.0, 3.0]) - 2.0).abs() < 1e-12);
    }

    #[test]
    fn test_round_to() {
        assert_eq!(round_to(33.333_333, 2), 33.33);
        assert_eq!(round_to(1.25, 1), 1.3);
        assert_eq!(round_to(2.5, 0), 3.0);
    }

    #[test]
    fn test_clamp_percent() {
        assert_eq!(clamp_percent(120.0), 100.0);
        assert_eq!(clamp_percent(-4.0), 0.0);
        assert_eq!(clamp_percent(f64::NAN), 0.0);
    }

    #[test]
    fn test_safe_div() {
        assert_eq!(safe_div(1.0, 0.0, 0.0), 0.0);
        assert_eq!(safe_div(1.0, 4.0, 0.0), 0.25);
        assert_eq!(safe_div(f64::INFINITY, 1.0, -1.0), -1.0);
    }
}
