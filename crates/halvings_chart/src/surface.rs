use std::fs;
use std::path::{Path, PathBuf};

use crate::config::ChartConfig;
use crate::render::{ChartSurface, SurfaceError};

/// Renders charts as a JSON configuration document at a fixed path, for a
/// static frontend to pick up and hand to its charting library.
///
/// The file's directory is the render target and must already exist.
#[derive(Debug)]
pub struct JsonFileSurface {
    path: PathBuf,
    generation: u64,
}

/// Handle to the document written by one [`JsonFileSurface::create`] call.
#[derive(Debug, PartialEq, Eq)]
pub struct JsonChart {
    pub path: PathBuf,
    pub generation: u64,
}

impl JsonFileSurface {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self {
            path: path.into(),
            generation: 0,
        }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    fn target_dir(&self) -> &Path {
        match self.path.parent() {
            Some(dir) if !dir.as_os_str().is_empty() => dir,
            _ => Path::new("."),
        }
    }
}

impl ChartSurface for JsonFileSurface {
    type Chart = JsonChart;

    fn ready(&self) -> Result<(), SurfaceError> {
        if self.target_dir().is_dir() {
            Ok(())
        } else {
            Err(SurfaceError::MissingTarget(self.target_dir().display().to_string()))
        }
    }

    fn create(&mut self, config: &ChartConfig) -> Result<JsonChart, SurfaceError> {
        let document = serde_json::to_vec_pretty(config)?;

        // Write-then-rename so readers never see a half-written file.
        let staging = self.path.with_extension("json.tmp");
        fs::write(&staging, document)?;
        fs::rename(&staging, &self.path)?;

        self.generation += 1;
        tracing::info!(
            path = %self.path.display(),
            generation = self.generation,
            points = config.data.labels.len(),
            "chart written"
        );

        Ok(JsonChart {
            path: self.path.clone(),
            generation: self.generation,
        })
    }

    fn dispose(&mut self, chart: JsonChart) {
        tracing::debug!(generation = chart.generation, "disposing chart");
        if let Err(e) = fs::remove_file(&chart.path) {
            tracing::warn!(path = %chart.path.display(), error = %e, "failed to remove chart");
        }
    }
}
