use std::fmt;

use fv_core::Result;
use serde::{Deserialize, Serialize};

use crate::color::{ColorMapper, CoolWarm, Grayscale, Rainbow};
use crate::domain::{DomainMapper, LinearMapper, LogMapper};
use crate::Rgb;

/// Domain mapping selector.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Scale {
    #[default]
    Linear,
    Log,
}

impl Scale {
    pub fn mapper(self, min: f64, max: f64) -> Result<Box<dyn DomainMapper>> {
        Ok(match self {
            Scale::Linear => Box::new(LinearMapper::new(min, max)?),
            Scale::Log => Box::new(LogMapper::new(min, max)),
        })
    }
}

/// Color ramp selector.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Palette {
    #[default]
    CoolWarm,
    Rainbow,
    Grayscale,
}

impl Palette {
    /// Numeric color-cycle setting: 1 is cool-warm, 2 is rainbow, anything
    /// else is grayscale.
    pub fn from_cycle(cycle: i32) -> Self {
        match cycle {
            1 => Palette::CoolWarm,
            2 => Palette::Rainbow,
            _ => Palette::Grayscale,
        }
    }

    pub fn cycle(self) -> i32 {
        match self {
            Palette::CoolWarm => 1,
            Palette::Rainbow => 2,
            Palette::Grayscale => 0,
        }
    }

    pub fn mapper(self) -> Box<dyn ColorMapper> {
        match self {
            Palette::CoolWarm => Box::new(CoolWarm),
            Palette::Rainbow => Box::new(Rainbow),
            Palette::Grayscale => Box::new(Grayscale),
        }
    }
}

/// A domain mapper composed with a color mapper.
pub struct MapperPair {
    scale: Scale,
    palette: Palette,
    domain: Box<dyn DomainMapper>,
    color: Box<dyn ColorMapper>,
}

impl MapperPair {
    pub fn new(scale: Scale, palette: Palette, min: f64, max: f64) -> Result<Self> {
        Ok(Self {
            scale,
            palette,
            domain: scale.mapper(min, max)?,
            color: palette.mapper(),
        })
    }

    pub fn scale(&self) -> Scale {
        self.scale
    }

    pub fn palette(&self) -> Palette {
        self.palette
    }

    pub fn range(&self) -> (f64, f64) {
        (self.domain.min(), self.domain.max())
    }

    /// Replace both bounds at once. On failure the previous range is kept.
    pub fn set_range(&mut self, min: f64, max: f64) -> Result<()> {
        self.domain = self.scale.mapper(min, max)?;
        Ok(())
    }

    pub fn normalize(&self, value: f64) -> f64 {
        self.domain.map(value)
    }

    pub fn map(&self, value: f64) -> Rgb {
        self.color.map(self.domain.map(value))
    }
}

impl fmt::Debug for MapperPair {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("MapperPair")
            .field("domain", &self.domain)
            .field("color", &self.color.name())
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use fv_core::FieldViewError;

    #[test]
    fn test_from_cycle() {
        assert_eq!(Palette::from_cycle(1), Palette::CoolWarm);
        assert_eq!(Palette::from_cycle(2), Palette::Rainbow);
        assert_eq!(Palette::from_cycle(0), Palette::Grayscale);
        assert_eq!(Palette::from_cycle(7), Palette::Grayscale);
        for p in [Palette::CoolWarm, Palette::Rainbow, Palette::Grayscale] {
            assert_eq!(Palette::from_cycle(p.cycle()), p);
        }
    }

    #[test]
    fn test_defaults() {
        assert_eq!(Scale::default(), Scale::Linear);
        assert_eq!(Palette::default(), Palette::CoolWarm);
    }

    #[test]
    fn test_pair_maps_through_both_stages() {
        let pair = MapperPair::new(Scale::Linear, Palette::Grayscale, 0.0, 10.0).unwrap();
        assert_eq!(pair.map(10.0), Rgb::WHITE);
        assert_eq!(pair.map(5.0), Rgb::gray(0.5));
        // exact zero is neutral, not the range minimum
        assert_eq!(pair.map(0.0), Rgb::gray(0.5));
    }

    #[test]
    fn test_pair_rainbow_nan_is_white() {
        let pair = MapperPair::new(Scale::Log, Palette::Rainbow, -100.0, 100.0).unwrap();
        assert_eq!(pair.map(f64::NAN), Rgb::WHITE);
        assert_eq!(pair.map(0.0), Rgb::BLACK);
    }

    #[test]
    fn test_zero_width_linear_pair_fails() {
        let err = MapperPair::new(Scale::Linear, Palette::CoolWarm, 2.0, 2.0).unwrap_err();
        assert!(matches!(err, FieldViewError::ZeroWidthRange { .. }));
    }

    #[test]
    fn test_set_range_keeps_old_on_failure() {
        let mut pair = MapperPair::new(Scale::Linear, Palette::CoolWarm, -1.0, 1.0).unwrap();
        assert!(pair.set_range(4.0, 4.0).is_err());
        assert_eq!(pair.range(), (-1.0, 1.0));
        pair.set_range(0.0, 8.0).unwrap();
        assert_eq!(pair.range(), (0.0, 8.0));
    }

    #[test]
    fn test_settings_serde_names() {
        assert_eq!(serde_json::to_string(&Palette::CoolWarm).unwrap(), "\"cool_warm\"");
        let scale: Scale = serde_json::from_str("\"log\"").unwrap();
        assert_eq!(scale, Scale::Log);
    }
}
