use std::path::{Path, PathBuf};

use fv_core::Result;
use fv_view::export::write_ppm;
use fv_view::{ClickResult, Document, Viewport};
use serde::Serialize;
use tracing::{info, warn};

use crate::session::Session;

/// Outcome of one batch run.
#[derive(Debug, Default, Serialize)]
pub struct Report {
    /// Images written, in view order.
    pub written: Vec<PathBuf>,
    /// Planes that could not be plotted: 1-based position in the session and the reason.
    pub failed_planes: Vec<(usize, String)>,
    pub clicks: Vec<ClickReport>,
}

#[derive(Debug, Serialize)]
pub struct ClickReport {
    pub x: f64,
    pub y: f64,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub result: Option<ClickResult>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub error: Option<String>,
}

/// Plot every plane of `session`, write `view_N.ppm` (and
/// `view_N_legend.ppm` for planes with a legend) into `out_dir`, then
/// resolve the clicks.
///
/// A plane rejected for its geometry or range is reported and skipped;
/// other failures end the run.
pub fn run(session: &Session, out_dir: &Path) -> Result<Report> {
    let mut doc = Document::with_settings(session.settings);
    let field = session.field.build()?;
    let bounds = field.bounds();
    let field_key = doc.add_field(field);

    let viewport = session.viewport.clone().unwrap_or_else(|| {
        let mut vp = Viewport::default();
        vp.fit_to_frame(&bounds);
        vp
    });

    std::fs::create_dir_all(out_dir)?;
    let mut report = Report::default();

    for (i, request) in session.planes.iter().enumerate() {
        let key = match doc.plot_plane(field_key, request, &viewport) {
            Ok(key) => key,
            Err(e) if !e.is_user_correctable() => return Err(e),
            Err(e) => {
                warn!(plane = i + 1, error = %e, "skipping plane");
                report.failed_planes.push((i + 1, e.to_string()));
                continue;
            }
        };
        let n = doc.len();
        let Some(view) = doc.view(key) else { continue };
        let Some(data) = view.data() else { continue };

        let path = out_dir.join(format!("view_{n}.ppm"));
        write_ppm(&path, &data.texture)?;
        info!(path = %path.display(), range = ?(data.range.min, data.range.max), "wrote view");
        report.written.push(path);

        if view.legend_frame().is_some() {
            let path = out_dir.join(format!("view_{n}_legend.ppm"));
            write_ppm(&path, &data.legend)?;
            report.written.push(path);
        }
    }

    for click in &session.clicks {
        let outcome = match click.view {
            Some(n) => doc.select_index(n).map(|_| ()),
            None => Ok(()),
        }
        .and_then(|()| doc.click(&viewport.click_ray(click.x, click.y)));
        let (result, error) = match outcome {
            Ok(r) => (Some(r), None),
            Err(e) => {
                warn!(x = click.x, y = click.y, error = %e, "click not resolved");
                (None, Some(e.to_string()))
            }
        };
        report.clicks.push(ClickReport {
            x: click.x,
            y: click.y,
            result,
            error,
        });
    }

    Ok(report)
}
