use halvings_shared_models::{HalvingEvent, PricePoint};
use thiserror::Error;

use crate::config::{ChartConfig, build_chart_config};

#[derive(Error, Debug)]
pub enum SurfaceError {
    #[error("Chart target not found: {0}")]
    MissingTarget(String),
    #[error("Failed to write chart: {0}")]
    Io(#[from] std::io::Error),
    #[error("Failed to encode chart: {0}")]
    Encode(#[from] serde_json::Error),
}

#[derive(Error, Debug)]
pub enum RenderError {
    #[error("No data available to create chart")]
    EmptySeries,
    #[error(transparent)]
    Surface(#[from] SurfaceError),
}

/// Where charts get drawn. Each live chart is represented by an owned
/// `Chart` handle, and the surface is only ever asked to dispose a handle
/// it created.
pub trait ChartSurface {
    type Chart;

    /// Checks the target exists before anything is torn down.
    fn ready(&self) -> Result<(), SurfaceError>;

    fn create(&mut self, config: &ChartConfig) -> Result<Self::Chart, SurfaceError>;

    fn dispose(&mut self, chart: Self::Chart);
}

/// A render that did not produce a new chart. `current` is whatever chart
/// is still live: the caller's untouched handle when nothing was disposed,
/// `None` when the old chart was already gone before creation failed.
#[derive(Debug)]
pub struct Rejected<C> {
    pub current: Option<C>,
    pub error: RenderError,
}

impl<C> Rejected<C> {
    pub fn into_current(self) -> Option<C> {
        self.current
    }
}

/// Replaces `current` with a chart of `series`.
///
/// An empty series, or a missing target, leaves `current` exactly as it was.
/// Otherwise the previous chart is disposed and exactly one new chart is
/// created.
pub fn render<S: ChartSurface>(
    surface: &mut S,
    current: Option<S::Chart>,
    series: &[PricePoint],
    halvings: &[HalvingEvent],
) -> Result<S::Chart, Rejected<S::Chart>> {
    if series.is_empty() {
        tracing::error!("No data available to create chart");
        return Err(Rejected {
            current,
            error: RenderError::EmptySeries,
        });
    }

    if let Err(e) = surface.ready() {
        tracing::error!(error = %e, "chart target unavailable");
        return Err(Rejected {
            current,
            error: e.into(),
        });
    }

    let config = build_chart_config(series, halvings);

    if let Some(previous) = current {
        surface.dispose(previous);
    }

    surface.create(&config).map_err(|e| {
        tracing::error!(error = %e, "failed to create chart");
        Rejected {
            current: None,
            error: e.into(),
        }
    })
}
