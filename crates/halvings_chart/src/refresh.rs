use std::time::Duration;

use halvings_shared_models::{HalvingEvent, PricePoint, halvings};
use tokio::sync::oneshot;
use tokio::task::{JoinError, JoinHandle};
use tokio::time::MissedTickBehavior;

use crate::render::{ChartSurface, render};
use crate::source::{PriceSource, fetch_series};

pub const DEFAULT_PERIOD: Duration = Duration::from_secs(5 * 60);

/// One fetch-and-render cycle. Returns whichever chart is live afterwards.
pub async fn refresh_once<P, S>(
    source: &P,
    surface: &mut S,
    current: Option<S::Chart>,
    halvings: &[HalvingEvent],
) -> Option<S::Chart>
where
    P: PriceSource,
    S: ChartSurface,
{
    let series = fetch_series(source).await;
    redraw(surface, current, &series, halvings)
}

fn redraw<S: ChartSurface>(
    surface: &mut S,
    current: Option<S::Chart>,
    series: &[PricePoint],
    halvings: &[HalvingEvent],
) -> Option<S::Chart> {
    match render(surface, current, series, halvings) {
        Ok(chart) => Some(chart),
        Err(rejected) => rejected.into_current(),
    }
}

/// Background task that redraws the chart on a fixed period.
///
/// Cycles run back to back inside a single task, so two refreshes never
/// overlap; ticks that come due while a cycle is still fetching are skipped.
/// Dropping the handle stops the task as well.
pub struct RefreshTask<S: ChartSurface> {
    stop: oneshot::Sender<()>,
    handle: JoinHandle<(S, Option<S::Chart>)>,
}

impl<S> RefreshTask<S>
where
    S: ChartSurface + Send + 'static,
    S::Chart: Send + 'static,
{
    /// Renders immediately, then every `period`.
    pub fn spawn<P>(source: P, mut surface: S, period: Duration) -> Self
    where
        P: PriceSource + Send + Sync + 'static,
    {
        let (stop, mut stopped) = oneshot::channel::<()>();

        let handle = tokio::spawn(async move {
            let halvings = halvings();
            let mut current = None;
            let mut interval = tokio::time::interval(period);
            interval.set_missed_tick_behavior(MissedTickBehavior::Skip);

            loop {
                tokio::select! {
                    _ = &mut stopped => break,
                    _ = interval.tick() => {}
                }

                // The handle stays out of the cancellable future: only the
                // fetch can be interrupted, never a half-done render.
                let series = tokio::select! {
                    _ = &mut stopped => break,
                    series = fetch_series(&source) => series,
                };

                current = redraw(&mut surface, current.take(), &series, &halvings);
            }

            tracing::info!("chart refresh stopped");
            (surface, current)
        });

        Self { stop, handle }
    }

    /// Cancels the task, including an in-flight fetch, and hands back the
    /// surface together with the chart that was live when it stopped.
    pub async fn stop(self) -> Result<(S, Option<S::Chart>), JoinError> {
        let Self { stop, handle } = self;
        let _ = stop.send(());
        handle.await
    }

    pub fn is_finished(&self) -> bool {
        self.handle.is_finished()
    }
}
