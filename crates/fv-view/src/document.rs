use fv_color::{Palette, Scale};
use fv_core::{FieldViewError, Result};
use fv_field::Field;
use fv_math::PickRay;
use slotmap::{new_key_type, SlotMap};
use tracing::{debug, info, warn};

use crate::pick::ClickResult;
use crate::resample::Projector;
use crate::settings::{PlaneRequest, ViewerSettings};
use crate::view::FieldView;

new_key_type! {
    pub struct FieldKey;
    pub struct ViewKey;
}

/// Fields, the views cut through them, and the current selection.
///
/// Views are kept in creation order; that order is what 1-based view
/// numbers refer to.
#[derive(Debug, Default)]
pub struct Document {
    fields: SlotMap<FieldKey, Box<dyn Field>>,
    views: SlotMap<ViewKey, FieldView>,
    order: Vec<ViewKey>,
    selected: Option<ViewKey>,
    settings: ViewerSettings,
}

impl Document {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_settings(settings: ViewerSettings) -> Self {
        Self {
            settings,
            ..Self::default()
        }
    }

    pub fn settings(&self) -> &ViewerSettings {
        &self.settings
    }

    pub fn add_field(&mut self, field: Box<dyn Field>) -> FieldKey {
        self.fields.insert(field)
    }

    pub fn field(&self, key: FieldKey) -> Option<&dyn Field> {
        self.fields.get(key).map(|f| f.as_ref())
    }

    /// Cut, build and append a new view, which becomes the selection.
    /// On failure the document is unchanged.
    pub fn plot_plane(
        &mut self,
        field_key: FieldKey,
        request: &PlaneRequest,
        projector: &dyn Projector,
    ) -> Result<ViewKey> {
        let field = self.fields.get(field_key).ok_or(FieldViewError::NoField)?;
        let built = FieldView::from_request(field_key, request, &field.bounds()).and_then(|mut view| {
            view.build(field.as_ref(), projector, &self.settings)?;
            Ok(view)
        });
        let view = match built {
            Ok(view) => view,
            Err(e) => {
                warn!(error = %e, "plane not plotted");
                return Err(e);
            }
        };
        let key = self.views.insert(view);
        self.order.push(key);
        self.selected = Some(key);
        debug!(views = self.order.len(), "plane plotted");
        Ok(key)
    }

    pub fn len(&self) -> usize {
        self.order.len()
    }

    pub fn is_empty(&self) -> bool {
        self.order.is_empty()
    }

    /// Views in creation order.
    pub fn views(&self) -> impl Iterator<Item = (ViewKey, &FieldView)> {
        self.order.iter().map(move |&k| (k, &self.views[k]))
    }

    pub fn view(&self, key: ViewKey) -> Option<&FieldView> {
        self.views.get(key)
    }

    pub fn view_mut(&mut self, key: ViewKey) -> Option<&mut FieldView> {
        self.views.get_mut(key)
    }

    pub fn selected(&self) -> Option<ViewKey> {
        self.selected
    }

    pub fn select(&mut self, key: ViewKey) -> Result<()> {
        if !self.views.contains_key(key) {
            return Err(FieldViewError::ViewNotFound);
        }
        self.selected = Some(key);
        Ok(())
    }

    /// Select by 1-based position in creation order.
    pub fn select_index(&mut self, n: usize) -> Result<ViewKey> {
        let key = n
            .checked_sub(1)
            .and_then(|i| self.order.get(i))
            .copied()
            .ok_or(FieldViewError::ViewNotFound)?;
        self.selected = Some(key);
        Ok(key)
    }

    pub fn deselect(&mut self) {
        self.selected = None;
    }

    /// Remove the selected view and clear the selection.
    pub fn delete_selected(&mut self) -> Result<FieldView> {
        let key = self.selected.take().ok_or(FieldViewError::NoViewSelected)?;
        self.order.retain(|&k| k != key);
        self.views.remove(key).ok_or(FieldViewError::ViewNotFound)
    }

    pub fn set_scale(&mut self, scale: Scale) -> Result<()> {
        self.settings.scale = scale;
        self.rebuild_all()
    }

    pub fn set_palette(&mut self, palette: Palette) -> Result<()> {
        self.settings.palette = palette;
        self.rebuild_all()
    }

    /// Numeric palette selector, see [`Palette::from_cycle`].
    pub fn set_color_cycle(&mut self, cycle: i32) -> Result<()> {
        self.set_palette(Palette::from_cycle(cycle))
    }

    /// Re-map every view's textures with the current settings. Samples are
    /// reused, not resampled.
    pub fn rebuild_all(&mut self) -> Result<()> {
        for &key in &self.order {
            if let Some(view) = self.views.get_mut(key) {
                view.remap(&self.settings)?;
            }
        }
        debug!(views = self.order.len(), scale = ?self.settings.scale, palette = ?self.settings.palette, "views remapped");
        Ok(())
    }

    /// Resolve a pick ray against the selected view, or the first view when
    /// nothing is selected.
    pub fn click(&self, ray: &PickRay) -> Result<ClickResult> {
        let key = self
            .selected
            .or_else(|| self.order.first().copied())
            .ok_or(FieldViewError::NoViewSelected)?;
        let view = self.views.get(key).ok_or(FieldViewError::ViewNotFound)?;
        let field = self.field(view.field()).ok_or(FieldViewError::NoField)?;
        let result = view.resolve_click(field, ray)?;
        info!("{result}");
        Ok(result)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use fv_field::AnalyticField;
    use fv_math::{dvec3, Frame3, Point3};

    fn doc_with_field() -> (Document, FieldKey) {
        let mut doc = Document::new();
        let bounds = Frame3::new(Point3::ZERO, Point3::splat(10.0));
        let key = doc.add_field(Box::new(AnalyticField::new("pos", bounds, |p: Point3| p)));
        (doc, key)
    }

    fn px(d: f64) -> f64 {
        d * 4.0
    }

    #[test]
    fn test_failed_plot_leaves_document_unchanged() {
        let (mut doc, key) = doc_with_field();
        let bad = PlaneRequest::general(dvec3(5.0, 5.0, 5.0), dvec3(1.0, 1.0, 1.0));
        assert!(doc.plot_plane(key, &bad, &px).is_err());
        assert!(doc.is_empty());
        assert!(doc.selected().is_none());
    }

    #[test]
    fn test_select_index_is_one_based() {
        let (mut doc, key) = doc_with_field();
        let a = doc.plot_plane(key, &PlaneRequest::general(Point3::splat(5.0), dvec3(0.0, 1.0, 0.0)), &px).unwrap();
        let b = doc.plot_plane(key, &PlaneRequest::general(Point3::splat(5.0), dvec3(1.0, 0.0, 0.0)), &px).unwrap();
        assert_eq!(doc.selected(), Some(b));
        assert_eq!(doc.select_index(1).unwrap(), a);
        assert!(doc.select_index(0).is_err());
        assert!(doc.select_index(3).is_err());
    }

    #[test]
    fn test_delete_selected() {
        let (mut doc, key) = doc_with_field();
        let a = doc.plot_plane(key, &PlaneRequest::general(Point3::splat(5.0), dvec3(0.0, 1.0, 0.0)), &px).unwrap();
        let b = doc.plot_plane(key, &PlaneRequest::general(Point3::splat(5.0), dvec3(1.0, 0.0, 0.0)), &px).unwrap();
        doc.select(a).unwrap();
        doc.delete_selected().unwrap();
        assert_eq!(doc.len(), 1);
        assert_eq!(doc.views().next().map(|(k, _)| k), Some(b));
        assert!(matches!(doc.delete_selected(), Err(FieldViewError::NoViewSelected)));
        assert!(matches!(doc.select(a), Err(FieldViewError::ViewNotFound)));
    }

    #[test]
    fn test_click_falls_back_to_first_view() {
        let (mut doc, key) = doc_with_field();
        let ray = PickRay::new(dvec3(2.0, 3.0, 20.0), dvec3(2.0, 3.0, -20.0));
        // first view is the z = 5 plane, the second one x = 5
        doc.plot_plane(key, &PlaneRequest::general(Point3::splat(5.0), dvec3(0.0, 0.0, 1.0)), &px).unwrap();
        doc.plot_plane(key, &PlaneRequest::general(Point3::splat(5.0), dvec3(1.0, 0.0, 0.0)), &px).unwrap();
        assert!(matches!(doc.click(&ray), Err(FieldViewError::AmbiguousIntersection)));

        doc.deselect();
        assert!(doc.selected().is_none());
        let hit = doc.click(&ray).unwrap();
        assert!((hit.point - dvec3(2.0, 3.0, 5.0)).length() < 1e-9);
    }

    #[test]
    fn test_click_without_views() {
        let (doc, _) = doc_with_field();
        let ray = PickRay::new(dvec3(0.0, 0.0, 10.0), dvec3(0.0, 0.0, -10.0));
        assert!(matches!(doc.click(&ray), Err(FieldViewError::NoViewSelected)));
    }

    #[test]
    fn test_unknown_field() {
        let mut doc = Document::new();
        let req = PlaneRequest::general(Point3::ZERO, dvec3(0.0, 1.0, 0.0));
        assert!(matches!(
            doc.plot_plane(FieldKey::default(), &req, &px),
            Err(FieldViewError::NoField)
        ));
    }
}
