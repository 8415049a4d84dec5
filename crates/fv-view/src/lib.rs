//! Cutting-plane views of a field.
//!
//! A [`FieldView`] is created from a [`PlaneRequest`]: the plane is cut
//! against the field bounds ([`intersect`]), the field is resampled on the
//! resulting rectangle ([`resample`]), and the samples are color mapped into
//! textures ([`texture`]). Clicks are resolved back to field values by
//! [`pick`]. A [`Document`] owns fields and views together.

pub mod document;
pub mod export;
pub mod intersect;
pub mod pick;
pub mod resample;
pub mod settings;
pub mod texture;
pub mod view;
pub mod viewport;

pub use document::{Document, FieldKey, ViewKey};
pub use intersect::{intersect_general, intersect_z_parallel, Intersection};
pub use pick::{resolve_click, ClickResult};
pub use resample::{resample, Component, Projector, Resampled, ScalarGrid, ValueRange};
pub use settings::{PlaneDialogState, PlaneKind, PlaneRequest, PlaneSpec, ViewerSettings};
pub use texture::{legend_ramp, FieldTexture};
pub use view::{FieldView, ViewData};
pub use viewport::Viewport;
