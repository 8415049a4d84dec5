pub mod frame;
pub mod fuzzy;
pub mod plane;
pub mod ray;
pub mod rect;

pub use glam::{dvec3, DMat4, DVec2, DVec3, DVec4};
pub use frame::Frame3;
pub use fuzzy::{points_eq, points_eq_with, vectors_eq, vectors_eq_with};
pub use plane::Plane;
pub use ray::PickRay;
pub use rect::{Rect3, RectBasis};

pub type Point2 = DVec2;
pub type Point3 = DVec3;
pub type Vector2 = DVec2;
pub type Vector3 = DVec3;
