use std::path::{Path, PathBuf};

use crate::config::ViewerConfig;
use crate::data::index::PointIndex;
use crate::data::model::{Bounds, PointSet};
use crate::data::{reader, sample};
use crate::error::SourceUnreadable;

// ---------------------------------------------------------------------------
// Scene – what the widgets draw
// ---------------------------------------------------------------------------

/// Everything the plot and the list display need, derived from the index
/// and the current selection. Only [`AppState`] rebuilds it.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Scene {
    /// All points as plot coordinates.
    pub series: Vec<[f64; 2]>,
    /// The picked point, drawn as an overlay.
    pub highlight: Option<[f64; 2]>,
    /// Lines of the list display.
    pub listing: Vec<String>,
    pub bounds: Bounds,
}

// ---------------------------------------------------------------------------
// Application state
// ---------------------------------------------------------------------------

/// The full UI state, independent of rendering.
pub struct AppState {
    pub config: ViewerConfig,

    /// The single owner of the loaded points.
    index: PointIndex,

    /// Row index of the picked point.
    selection: Option<usize>,

    scene: Scene,

    /// File the current points came from.
    pub source: Option<PathBuf>,

    /// Status / error message shown in the UI.
    pub status_message: Option<String>,

    /// Set after a load; the plot consumes it to fit its view to the bounds.
    fit_pending: bool,
}

impl Default for AppState {
    fn default() -> Self {
        Self::new(ViewerConfig::default())
    }
}

impl AppState {
    pub fn new(config: ViewerConfig) -> Self {
        Self {
            config,
            index: PointIndex::new(),
            selection: None,
            scene: Scene::default(),
            source: None,
            status_message: None,
            fit_pending: false,
        }
    }

    pub fn index(&self) -> &PointIndex {
        &self.index
    }

    pub fn selection(&self) -> Option<usize> {
        self.selection
    }

    pub fn scene(&self) -> &Scene {
        &self.scene
    }

    /// Replace the points, bounds, selection and listing in one step.
    pub fn apply(&mut self, points: PointSet, source: Option<PathBuf>) {
        let bounds = self.index.build(points);
        let loaded = self.index.points();

        self.selection = None;
        self.scene = Scene {
            series: loaded.iter().map(|p| [p.x, p.y]).collect(),
            highlight: None,
            listing: loaded.iter().map(|p| p.to_string()).collect(),
            bounds,
        };
        self.source = source;
        self.status_message = None;
        self.fit_pending = true;
    }

    /// Load a file, replacing the current points only on success.
    /// Returns the number of points loaded.
    pub fn load_from(&mut self, path: &Path) -> Result<usize, SourceUnreadable> {
        match reader::load_path(path) {
            Ok(points) => {
                let n = points.len();
                log::info!("Loaded {n} points from {}", path.display());
                self.apply(points, Some(path.to_path_buf()));
                Ok(n)
            }
            Err(e) => {
                self.report_failure(&e);
                Err(e)
            }
        }
    }

    /// Load the sample file, generating it first if it does not exist yet.
    pub fn load_sample(&mut self) -> Result<usize, SourceUnreadable> {
        let path = self.config.sample_path.clone();
        match sample::ensure_sample(&path) {
            Ok(true) => log::info!("Generated sample data at {}", path.display()),
            Ok(false) => {}
            Err(e) => {
                let err = SourceUnreadable::at(&path, e);
                self.report_failure(&err);
                return Err(err);
            }
        }
        self.load_from(&path)
    }

    fn report_failure(&mut self, err: &SourceUnreadable) {
        log::error!("Failed to load data: {err}");
        if self.config.show_load_errors {
            self.status_message = Some(format!("Error: {err}"));
        }
    }

    /// Select the point nearest to (`qx`, `qy`) and show only it in the list.
    /// With nothing to pick, the highlight and the list are cleared.
    pub fn pick(&mut self, qx: f64, qy: f64) -> Option<usize> {
        match self.index.nearest(qx, qy) {
            Some(hit) => {
                log::debug!("Picked row {} ({}) at ({qx}, {qy})", hit.index, hit.point);
                self.selection = Some(hit.index);
                self.scene.highlight = Some([hit.point.x, hit.point.y]);
                self.scene.listing = vec![hit.point.to_string()];
            }
            None => {
                log::debug!("Nothing to pick at ({qx}, {qy})");
                self.selection = None;
                self.scene.highlight = None;
                self.scene.listing.clear();
            }
        }
        self.selection
    }

    /// Bounds to fit the plot view to, once per load.
    pub fn take_fit_request(&mut self) -> Option<Bounds> {
        std::mem::take(&mut self.fit_pending).then_some(self.scene.bounds)
    }
}
