use fv_math::{Frame3, Point3, Vector3};
use tracing::debug;

use crate::{undefined, Field, GridField, NO_FIELD_NAME};

/// Named grids, possibly nested inside each other.
///
/// A query is answered by the most recently added grid that contains the
/// point, so finer grids registered after a coarse enclosing grid take
/// precedence inside their own bounds.
#[derive(Debug, Clone, Default)]
pub struct FieldSet {
    grids: Vec<GridField>,
    bounds: Frame3,
}

impl FieldSet {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn add(&mut self, grid: GridField) {
        self.bounds.add_frame(&grid.bounds());
        debug!(name = grid.name(), count = self.grids.len() + 1, "grid added to field set");
        self.grids.push(grid);
    }

    pub fn len(&self) -> usize {
        self.grids.len()
    }

    pub fn is_empty(&self) -> bool {
        self.grids.is_empty()
    }

    pub fn grids(&self) -> impl Iterator<Item = &GridField> {
        self.grids.iter()
    }

    fn grid_at(&self, point: Point3) -> Option<&GridField> {
        self.grids.iter().rev().find(|g| g.contains(point))
    }
}

impl FromIterator<GridField> for FieldSet {
    fn from_iter<I: IntoIterator<Item = GridField>>(iter: I) -> Self {
        let mut set = FieldSet::new();
        for grid in iter {
            set.add(grid);
        }
        set
    }
}

impl Field for FieldSet {
    fn field_at(&self, point: Point3) -> Vector3 {
        self.grid_at(point).map_or_else(undefined, |g| g.field_at(point))
    }

    fn field_name_at(&self, point: Point3) -> &str {
        self.grid_at(point).map_or(NO_FIELD_NAME, |g| g.name())
    }

    fn bounds(&self) -> Frame3 {
        self.bounds
    }
}
