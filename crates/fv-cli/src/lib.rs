//! Batch front end: load a session, plot its planes, write the textures,
//! and resolve its clicks.

pub mod run;
pub mod session;

pub use run::{run, ClickReport, Report};
pub use session::{Click, FieldSource, Preset, Session};
