//! Two-stage value mapping: a [`DomainMapper`] normalizes a field value to
//! `[-1, 1]`, a [`ColorMapper`] turns the normalized value into an [`Rgb`].

pub mod color;
pub mod domain;
pub mod pipeline;
pub mod rgb;

pub use color::{ColorMapper, CoolWarm, Grayscale, Rainbow};
pub use domain::{DomainMapper, LinearMapper, LogMapper};
pub use pipeline::{MapperPair, Palette, Scale};
pub use rgb::Rgb;
