use fv_color::MapperPair;
use fv_core::Result;
use fv_field::Field;
use fv_math::{Frame3, PickRay, Rect3};
use tracing::debug;

use crate::document::FieldKey;
use crate::intersect::{intersect_general, intersect_z_parallel, Intersection};
use crate::pick::{resolve_click, ClickResult};
use crate::resample::{resample, Component, Projector, ScalarGrid, ValueRange};
use crate::settings::{PlaneRequest, PlaneSpec, ViewerSettings};
use crate::texture::{legend_half_width, legend_ramp, FieldTexture};

/// Everything produced by building a view: the samples and their textures.
#[derive(Debug, Clone, PartialEq)]
pub struct ViewData {
    pub grid: ScalarGrid,
    /// Range of the defined samples, `None` if there were none.
    pub observed: Option<ValueRange>,
    /// Range the textures were mapped with.
    pub range: ValueRange,
    pub texture: FieldTexture,
    pub legend: FieldTexture,
}

/// One cutting plane through a field.
///
/// A view is only constructed once its plane has been cut successfully
/// against the field bounds, so its frame is always a valid rectangle.
/// The field itself is referred to by key and owned elsewhere.
#[derive(Debug, Clone)]
pub struct FieldView {
    field: FieldKey,
    request: PlaneRequest,
    frame: Rect3,
    legend_frame: Option<Rect3>,
    fixed_range: Option<ValueRange>,
    data: Option<ViewData>,
}

impl FieldView {
    /// Cut the requested plane against `bounds`. A fixed range in the
    /// request is validated here.
    pub fn from_request(field: FieldKey, request: &PlaneRequest, bounds: &Frame3) -> Result<Self> {
        let Intersection { frame, legend } = match request.plane {
            PlaneSpec::General { point, normal } => intersect_general(point, normal, bounds)?,
            PlaneSpec::ZParallel {
                point,
                angle_deg,
                z_min,
                z_max,
            } => intersect_z_parallel(point, angle_deg, z_min, z_max, bounds)?,
        };
        let mut view = Self {
            field,
            request: *request,
            frame,
            legend_frame: legend,
            fixed_range: None,
            data: None,
        };
        if let Some(r) = request.fixed_range {
            view.set_data_range(r.min, r.max)?;
        }
        Ok(view)
    }

    pub fn field(&self) -> FieldKey {
        self.field
    }

    pub fn request(&self) -> &PlaneRequest {
        &self.request
    }

    pub fn component(&self) -> Component {
        self.request.component
    }

    pub fn frame(&self) -> &Rect3 {
        &self.frame
    }

    pub fn legend_frame(&self) -> Option<&Rect3> {
        self.legend_frame.as_ref()
    }

    pub fn fixed_range(&self) -> Option<ValueRange> {
        self.fixed_range
    }

    /// Fix the mapping range instead of using the observed one.
    pub fn set_data_range(&mut self, min: f64, max: f64) -> Result<()> {
        self.fixed_range = Some(ValueRange::fixed(min, max)?);
        Ok(())
    }

    pub fn clear_data_range(&mut self) {
        self.fixed_range = None;
    }

    pub fn data(&self) -> Option<&ViewData> {
        self.data.as_ref()
    }

    pub fn is_built(&self) -> bool {
        self.data.is_some()
    }

    /// Resample the field on the frame and map it to textures.
    pub fn build(
        &mut self,
        field: &dyn Field,
        projector: &dyn Projector,
        settings: &ViewerSettings,
    ) -> Result<&ViewData> {
        let sampled = resample(field, &self.frame, self.request.component, projector)?;
        let range = ValueRange::effective(self.fixed_range, sampled.observed)?;
        let (texture, legend) = map_textures(&sampled.grid, range, settings)?;
        debug!(?range, across = sampled.grid.n_across, down = sampled.grid.n_down, "view built");
        Ok(&*self.data.insert(ViewData {
            grid: sampled.grid,
            observed: sampled.observed,
            range,
            texture,
            legend,
        }))
    }

    /// Re-map the stored samples with new settings or a new fixed range,
    /// without resampling. Does nothing on an unbuilt view.
    pub fn remap(&mut self, settings: &ViewerSettings) -> Result<()> {
        let Some(data) = self.data.as_mut() else {
            return Ok(());
        };
        let range = ValueRange::effective(self.fixed_range, data.observed)?;
        let (texture, legend) = map_textures(&data.grid, range, settings)?;
        data.range = range;
        data.texture = texture;
        data.legend = legend;
        Ok(())
    }

    /// Field value under a pick ray on this view's plane.
    pub fn resolve_click(&self, field: &dyn Field, ray: &PickRay) -> Result<ClickResult> {
        resolve_click(&self.frame, field, ray)
    }
}

fn map_textures(
    grid: &ScalarGrid,
    range: ValueRange,
    settings: &ViewerSettings,
) -> Result<(FieldTexture, FieldTexture)> {
    let pair = MapperPair::new(settings.scale, settings.palette, range.min, range.max)?;
    let texture = FieldTexture::from_grid(grid, &pair);

    let half = legend_half_width(&range);
    let legend_pair = MapperPair::new(settings.scale, settings.palette, -half, half)?;
    let legend = FieldTexture::from_grid(&legend_ramp(half), &legend_pair);
    Ok((texture, legend))
}
