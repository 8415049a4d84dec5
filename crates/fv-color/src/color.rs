//! Color mappers: normalized value in `[-1, 1]` to RGB.

use std::fmt;

use crate::Rgb;

/// Pure function of a normalized value. Inputs outside `[-1, 1]` are
/// clamped; NaN handling is per variant.
pub trait ColorMapper: fmt::Debug + Send + Sync {
    fn map(&self, normalized: f64) -> Rgb;

    fn name(&self) -> &'static str;
}

/// `(c, c, c)` with `c = (v + 1) / 2`. NaN in gives NaN channels out.
#[derive(Debug, Clone, Copy, Default)]
pub struct Grayscale;

impl ColorMapper for Grayscale {
    fn map(&self, normalized: f64) -> Rgb {
        let c = 0.5 * (normalized.clamp(-1.0, 1.0) + 1.0);
        Rgb::gray(c as f32)
    }

    fn name(&self) -> &'static str {
        "grayscale"
    }
}

/// Eight bands of width 0.25 over `[-1, 1]`, each a linear blend between
/// fixed endpoint colors. NaN is white and exact zero is black.
#[derive(Debug, Clone, Copy, Default)]
pub struct Rainbow;

impl Rainbow {
    /// `(start, end)` color per band, from `-1` upward.
    pub const BANDS: [(Rgb, Rgb); 8] = [
        (Rgb::new(0.5, 0.0, 0.5), Rgb::new(0.0, 0.5, 1.0)),
        (Rgb::new(0.0, 0.5, 1.0), Rgb::new(0.0, 1.0, 1.0)),
        (Rgb::new(0.0, 1.0, 1.0), Rgb::new(0.0, 1.0, 0.0)),
        (Rgb::new(0.0, 1.0, 0.0), Rgb::new(0.3, 0.3, 0.3)),
        (Rgb::new(0.3, 0.3, 0.3), Rgb::new(0.7, 0.7, 0.0)),
        (Rgb::new(0.7, 0.7, 0.0), Rgb::new(0.7, 0.3, 0.0)),
        (Rgb::new(0.7, 0.3, 0.0), Rgb::new(1.0, 0.0, 0.0)),
        (Rgb::new(1.0, 0.0, 0.0), Rgb::new(0.5, 0.0, 1.0)),
    ];

    const BAND_WIDTH: f64 = 0.25;
}

impl ColorMapper for Rainbow {
    fn map(&self, normalized: f64) -> Rgb {
        if normalized.is_nan() {
            return Rgb::WHITE;
        }
        if normalized == 0.0 {
            return Rgb::BLACK;
        }
        let v = normalized.clamp(-1.0, 1.0);
        let band = (((v + 1.0) / Self::BAND_WIDTH).floor() as usize).min(Self::BANDS.len() - 1);
        let start = -1.0 + Self::BAND_WIDTH * band as f64;
        let f = (v - start) / Self::BAND_WIDTH;
        let (from, to) = Self::BANDS[band];
        from.lerp(to, f as f32)
    }

    fn name(&self) -> &'static str {
        "rainbow"
    }
}

/// Diverging blue-white-red ramp, piecewise linear through nine evenly
/// spaced control colors (Moreland's cool-warm map). NaN is black.
#[derive(Debug, Clone, Copy, Default)]
pub struct CoolWarm;

impl CoolWarm {
    pub const TABLE: [Rgb; 9] = [
        Rgb::new(0.2298, 0.2987, 0.7537),
        Rgb::new(0.3843, 0.5098, 0.9176),
        Rgb::new(0.5529, 0.6902, 0.9961),
        Rgb::new(0.7216, 0.8157, 0.9765),
        Rgb::new(0.8654, 0.8654, 0.8654),
        Rgb::new(0.9608, 0.7686, 0.6784),
        Rgb::new(0.9569, 0.6039, 0.4824),
        Rgb::new(0.8706, 0.3765, 0.3020),
        Rgb::new(0.7057, 0.0156, 0.1502),
    ];
}

impl ColorMapper for CoolWarm {
    fn map(&self, normalized: f64) -> Rgb {
        if normalized.is_nan() {
            return Rgb::BLACK;
        }
        let segs = (Self::TABLE.len() - 1) as f64;
        let x = 0.5 * (normalized.clamp(-1.0, 1.0) + 1.0) * segs;
        let i = x.floor() as usize;
        if i >= Self::TABLE.len() - 1 {
            return Self::TABLE[Self::TABLE.len() - 1];
        }
        let f = x - i as f64;
        Self::TABLE[i].lerp(Self::TABLE[i + 1], f as f32)
    }

    fn name(&self) -> &'static str {
        "cool-warm"
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_abs_diff_eq;

    fn assert_rgb_eq(a: Rgb, b: Rgb) {
        assert_abs_diff_eq!(a.r, b.r, epsilon = 1e-6);
        assert_abs_diff_eq!(a.g, b.g, epsilon = 1e-6);
        assert_abs_diff_eq!(a.b, b.b, epsilon = 1e-6);
    }

    #[test]
    fn test_grayscale() {
        assert_rgb_eq(Grayscale.map(-1.0), Rgb::BLACK);
        assert_rgb_eq(Grayscale.map(1.0), Rgb::WHITE);
        assert_rgb_eq(Grayscale.map(0.0), Rgb::gray(0.5));
        assert!(Grayscale.map(f64::NAN).r.is_nan());
    }

    #[test]
    fn test_rainbow_fixed_points() {
        assert_eq!(Rainbow.map(0.0), Rgb::BLACK);
        assert_eq!(Rainbow.map(f64::NAN), Rgb::WHITE);
        assert_rgb_eq(Rainbow.map(-1.0), Rgb::new(0.5, 0.0, 0.5));
        assert_rgb_eq(Rainbow.map(1.0), Rgb::new(0.5, 0.0, 1.0));
    }

    #[test]
    fn test_rainbow_band_boundaries() {
        // a boundary value starts the upper band
        assert_rgb_eq(Rainbow.map(-0.75), Rgb::new(0.0, 0.5, 1.0));
        assert_rgb_eq(Rainbow.map(-0.5), Rgb::new(0.0, 1.0, 1.0));
        assert_rgb_eq(Rainbow.map(0.25), Rgb::new(0.7, 0.7, 0.0));
        assert_rgb_eq(Rainbow.map(0.75), Rgb::new(1.0, 0.0, 0.0));
        // the band ends approach their end color
        assert_rgb_eq(Rainbow.map(-0.875), Rgb::new(0.25, 0.25, 0.75));
        let near_zero = Rainbow.map(1e-12);
        assert_abs_diff_eq!(near_zero.r, 0.3, epsilon = 1e-6);
    }

    #[test]
    fn test_rainbow_clamps_out_of_range() {
        assert_eq!(Rainbow.map(5.0), Rainbow.map(1.0));
        assert_eq!(Rainbow.map(-5.0), Rainbow.map(-1.0));
    }

    #[test]
    fn test_cool_warm_ends_and_middle() {
        assert_eq!(CoolWarm.map(-1.0), CoolWarm::TABLE[0]);
        assert_eq!(CoolWarm.map(1.0), CoolWarm::TABLE[8]);
        assert_rgb_eq(CoolWarm.map(0.0), CoolWarm::TABLE[4]);
        assert_eq!(CoolWarm.map(f64::NAN), Rgb::BLACK);
    }

    #[test]
    fn test_cool_warm_diverges() {
        let cold = CoolWarm.map(-0.8);
        let warm = CoolWarm.map(0.8);
        assert!(cold.b > cold.r);
        assert!(warm.r > warm.b);
    }
}
