//! Domain mappers: field value to the normalized interval `[-1, 1]`.

use std::fmt;

use fv_core::{FieldViewError, Result};

/// Normalizes a scalar to `[-1, 1]` for a current `(min, max)` range.
///
/// Every mapper clips its output to exactly `[-1, 1]` and passes NaN
/// through unchanged.
pub trait DomainMapper: fmt::Debug + Send + Sync {
    fn min(&self) -> f64;

    fn max(&self) -> f64;

    /// Replace the lower bound, returning the previous one.
    fn set_min(&mut self, min: f64) -> Result<f64>;

    /// Replace the upper bound, returning the previous one.
    fn set_max(&mut self, max: f64) -> Result<f64>;

    fn map(&self, value: f64) -> f64;
}

/// `clip(2 (v - min) / (max - min) - 1)`, with `0.0` mapped to exactly `0.0`.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct LinearMapper {
    min: f64,
    max: f64,
}

impl LinearMapper {
    /// Fails with [`FieldViewError::ZeroWidthRange`] when `min == max`.
    pub fn new(min: f64, max: f64) -> Result<Self> {
        check_width(min, max)?;
        Ok(Self { min, max })
    }
}

fn check_width(min: f64, max: f64) -> Result<()> {
    if min == max {
        return Err(FieldViewError::ZeroWidthRange { value: min });
    }
    Ok(())
}

impl DomainMapper for LinearMapper {
    fn min(&self) -> f64 {
        self.min
    }

    fn max(&self) -> f64 {
        self.max
    }

    fn set_min(&mut self, min: f64) -> Result<f64> {
        check_width(min, self.max)?;
        Ok(std::mem::replace(&mut self.min, min))
    }

    fn set_max(&mut self, max: f64) -> Result<f64> {
        check_width(self.min, max)?;
        Ok(std::mem::replace(&mut self.max, max))
    }

    fn map(&self, value: f64) -> f64 {
        if value.is_nan() {
            return value;
        }
        // keeps the origin of diverging data on the neutral color
        if value == 0.0 {
            return 0.0;
        }
        // halved so that spans near f64::MAX do not overflow to inf / inf
        let f = (0.5 * value - 0.5 * self.min) / (0.5 * self.max - 0.5 * self.min);
        if f.is_nan() {
            // only reachable with infinite bounds
            return if value >= self.max {
                1.0
            } else if value <= self.min {
                -1.0
            } else {
                0.0
            };
        }
        (2.0 * f - 1.0).clamp(-1.0, 1.0)
    }
}

/// Sign-preserving log compression: `sign(v) * max(ln|v|, 0) / ln(max(|min|, |max|))`.
///
/// Magnitudes below 1 collapse to 0. When the largest bound is at most 1 in
/// magnitude there is no positive log range and every defined non-zero value
/// maps to 0.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct LogMapper {
    min: f64,
    max: f64,
    log_max: f64,
}

impl LogMapper {
    pub fn new(min: f64, max: f64) -> Self {
        Self {
            min,
            max,
            log_max: Self::log_max_of(min, max),
        }
    }

    fn log_max_of(min: f64, max: f64) -> f64 {
        min.abs().max(max.abs()).ln()
    }

    pub fn log_max(&self) -> f64 {
        self.log_max
    }
}

impl DomainMapper for LogMapper {
    fn min(&self) -> f64 {
        self.min
    }

    fn max(&self) -> f64 {
        self.max
    }

    fn set_min(&mut self, min: f64) -> Result<f64> {
        let previous = std::mem::replace(&mut self.min, min);
        self.log_max = Self::log_max_of(self.min, self.max);
        Ok(previous)
    }

    fn set_max(&mut self, max: f64) -> Result<f64> {
        let previous = std::mem::replace(&mut self.max, max);
        self.log_max = Self::log_max_of(self.min, self.max);
        Ok(previous)
    }

    fn map(&self, value: f64) -> f64 {
        if value == 0.0 || value.is_nan() {
            return value;
        }
        if self.log_max.is_nan() || self.log_max <= 0.0 {
            return 0.0;
        }
        let sign = if value < 0.0 { -1.0 } else { 1.0 };
        let magnitude = value.abs().ln().max(0.0);
        (sign * magnitude / self.log_max).clamp(-1.0, 1.0)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_abs_diff_eq;

    #[test]
    fn test_linear_endpoints() {
        let m = LinearMapper::new(-2.0, 6.0).unwrap();
        assert_eq!(m.map(-2.0), -1.0);
        assert_eq!(m.map(6.0), 1.0);
        assert_abs_diff_eq!(m.map(2.0), 0.0, epsilon = 1e-12);
        assert_abs_diff_eq!(m.map(4.0), 0.5, epsilon = 1e-12);
    }

    #[test]
    fn test_linear_zero_is_exact() {
        // 0 would map to -0.5 by the formula
        let m = LinearMapper::new(-2.0, 6.0).unwrap();
        assert_eq!(m.map(0.0), 0.0);
        let m = LinearMapper::new(1.0, 3.0).unwrap();
        assert_eq!(m.map(0.0), 0.0);
    }

    #[test]
    fn test_linear_clips() {
        let m = LinearMapper::new(-1.0, 1.0).unwrap();
        for v in [-1e300, -5.0, -1.0, -0.3, 0.7, 1.0, 42.0, 1e300] {
            let t = m.map(v);
            assert!((-1.0..=1.0).contains(&t), "{v} -> {t}");
        }
        assert_eq!(m.map(f64::INFINITY), 1.0);
        assert_eq!(m.map(f64::NEG_INFINITY), -1.0);
    }

    #[test]
    fn test_linear_huge_span_stays_bounded() {
        let m = LinearMapper::new(-1e308, 1e308).unwrap();
        assert_eq!(m.map(1e308), 1.0);
        assert_eq!(m.map(-1e308), -1.0);
        for v in [f64::MAX, -f64::MAX, 5e307, -3.0, 7.5] {
            let t = m.map(v);
            assert!((-1.0..=1.0).contains(&t), "{v} -> {t}");
        }
        let m = LinearMapper::new(f64::NEG_INFINITY, f64::INFINITY).unwrap();
        assert_eq!(m.map(f64::INFINITY), 1.0);
        assert_eq!(m.map(3.0), 0.0);
    }

    #[test]
    fn test_linear_nan_passes_through() {
        let m = LinearMapper::new(-1.0, 1.0).unwrap();
        assert!(m.map(f64::NAN).is_nan());
    }

    #[test]
    fn test_linear_zero_width_rejected() {
        assert!(matches!(
            LinearMapper::new(3.0, 3.0),
            Err(FieldViewError::ZeroWidthRange { value }) if value == 3.0
        ));

        let mut m = LinearMapper::new(0.0, 1.0).unwrap();
        assert!(m.set_min(1.0).is_err());
        assert_eq!(m.min(), 0.0);
        assert!(m.set_max(0.0).is_err());
        assert_eq!(m.max(), 1.0);
    }

    #[test]
    fn test_set_returns_previous() {
        let mut m = LinearMapper::new(0.0, 1.0).unwrap();
        assert_eq!(m.set_min(-4.0).unwrap(), 0.0);
        assert_eq!(m.set_max(4.0).unwrap(), 1.0);
        assert_eq!((m.min(), m.max()), (-4.0, 4.0));
        assert_eq!(m.map(4.0), 1.0);
    }

    #[test]
    fn test_log_sign_preserving() {
        let m = LogMapper::new(-1000.0, 100.0);
        assert_abs_diff_eq!(m.log_max(), 1000f64.ln(), epsilon = 1e-12);
        assert_eq!(m.map(0.0), 0.0);
        assert!(m.map(50.0) > 0.0);
        assert!(m.map(-50.0) < 0.0);
        assert_abs_diff_eq!(m.map(1000.0), 1.0, epsilon = 1e-12);
        assert_abs_diff_eq!(m.map(-1000.0), -1.0, epsilon = 1e-12);
        assert_eq!(m.map(1e9), 1.0);
        assert!(m.map(f64::NAN).is_nan());
    }

    #[test]
    fn test_log_small_magnitudes_collapse() {
        let m = LogMapper::new(-10.0, 10.0);
        assert_eq!(m.map(0.5), 0.0);
        assert_eq!(m.map(-0.5), 0.0);
    }

    #[test]
    fn test_log_degenerate_range_maps_to_zero() {
        let m = LogMapper::new(-0.5, 0.5);
        assert!(m.log_max() <= 0.0);
        assert_eq!(m.map(3.0), 0.0);
        let m = LogMapper::new(0.0, 0.0);
        assert_eq!(m.map(-3.0), 0.0);
    }

    #[test]
    fn test_log_set_recomputes() {
        let mut m = LogMapper::new(-10.0, 10.0);
        assert_eq!(m.set_max(100.0).unwrap(), 10.0);
        assert_abs_diff_eq!(m.log_max(), 100f64.ln(), epsilon = 1e-12);
        assert_eq!(m.set_min(-1000.0).unwrap(), -10.0);
        assert_abs_diff_eq!(m.log_max(), 1000f64.ln(), epsilon = 1e-12);
    }
}
