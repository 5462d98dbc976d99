use std::path::PathBuf;

use crate::data::sample::DEFAULT_SAMPLE_PATH;

// ---------------------------------------------------------------------------
// Viewer configuration
// ---------------------------------------------------------------------------

/// Fixed settings of the viewer window and its data sources.
#[derive(Debug, Clone)]
pub struct ViewerConfig {
    pub title: String,
    pub inner_size: [f32; 2],
    pub min_inner_size: [f32; 2],
    /// Where "Load sample" reads from, generating the file first if absent.
    pub sample_path: PathBuf,
    /// Show failed loads in the top bar. Failures are always logged.
    pub show_load_errors: bool,
}

impl Default for ViewerConfig {
    fn default() -> Self {
        Self {
            title: "Scatterpick – Spreadsheet Viewer".to_string(),
            inner_size: [1000.0, 650.0],
            min_inner_size: [600.0, 400.0],
            sample_path: PathBuf::from(DEFAULT_SAMPLE_PATH),
            show_load_errors: true,
        }
    }
}
