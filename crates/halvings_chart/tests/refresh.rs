use std::collections::VecDeque;
use std::sync::{Arc, Mutex};
use std::time::Duration;

use axum::http::StatusCode;
use halvings_chart::config::ChartConfig;
use halvings_chart::{ChartSurface, FetchError, PriceSource, RefreshTask, SurfaceError, refresh_once};
use halvings_shared_models::halvings;
use serde_json::{Value, json};
use tokio::test;

const PERIOD: Duration = Duration::from_secs(300);

#[derive(Debug, Clone, PartialEq)]
enum Event {
    Created { id: u32, points: usize },
    Disposed(u32),
}

#[derive(Clone, Default)]
struct RecordingSurface {
    events: Arc<Mutex<Vec<Event>>>,
    next_id: u32,
}

impl ChartSurface for RecordingSurface {
    type Chart = u32;

    fn ready(&self) -> Result<(), SurfaceError> {
        Ok(())
    }

    fn create(&mut self, config: &ChartConfig) -> Result<u32, SurfaceError> {
        self.next_id += 1;
        self.events.lock().unwrap().push(Event::Created {
            id: self.next_id,
            points: config.data.datasets[0].data.len(),
        });
        Ok(self.next_id)
    }

    fn dispose(&mut self, chart: u32) {
        self.events.lock().unwrap().push(Event::Disposed(chart));
    }
}

/// Answers fetches from a script; once it runs dry every fetch fails.
struct ScriptedSource {
    responses: Mutex<VecDeque<Result<Value, StatusCode>>>,
}

impl ScriptedSource {
    fn new(responses: Vec<Result<Value, StatusCode>>) -> Self {
        Self {
            responses: Mutex::new(responses.into()),
        }
    }
}

impl PriceSource for ScriptedSource {
    async fn fetch(&self) -> Result<Value, FetchError> {
        let next = self.responses.lock().unwrap().pop_front();
        next.unwrap_or(Err(StatusCode::SERVICE_UNAVAILABLE))
            .map_err(FetchError::Status)
    }
}

struct StalledSource;

impl PriceSource for StalledSource {
    async fn fetch(&self) -> Result<Value, FetchError> {
        std::future::pending::<()>().await;
        unreachable!()
    }
}

fn payload(closes: &[Option<f64>]) -> Value {
    let records: Vec<Value> = closes
        .iter()
        .enumerate()
        .map(|(i, close)| json!({ "time": 1_609_459_200 + 86_400 * i as i64, "close": close }))
        .collect();
    json!({ "Data": { "Data": records } })
}

#[tokio::test(start_paused = true)]
pub async fn failed_cycles_keep_the_last_chart() {
    let source = ScriptedSource::new(vec![
        Ok(payload(&[Some(1.0), Some(2.0)])),
        Err(StatusCode::INTERNAL_SERVER_ERROR),
        Ok(json!({ "Response": "Error" })),
        Ok(payload(&[Some(3.0), None, Some(4.0), Some(5.0)])),
    ]);
    let surface = RecordingSurface::default();
    let events = surface.events.clone();

    let task = RefreshTask::spawn(source, surface, PERIOD);
    tokio::time::sleep(PERIOD * 3 + Duration::from_secs(1)).await;
    let (_surface, current) = task.stop().await.unwrap();

    assert_eq!(current, Some(2));
    assert_eq!(
        *events.lock().unwrap(),
        vec![
            Event::Created { id: 1, points: 2 },
            Event::Disposed(1),
            Event::Created { id: 2, points: 3 },
        ]
    );
}

#[tokio::test(start_paused = true)]
pub async fn renders_immediately_then_every_period() {
    let source = ScriptedSource::new(vec![
        Ok(payload(&[Some(1.0)])),
        Ok(payload(&[Some(1.0), Some(2.0)])),
    ]);
    let surface = RecordingSurface::default();
    let events = surface.events.clone();

    let task = RefreshTask::spawn(source, surface, PERIOD);

    tokio::time::sleep(Duration::from_secs(1)).await;
    assert_eq!(*events.lock().unwrap(), vec![Event::Created { id: 1, points: 1 }]);

    tokio::time::sleep(PERIOD).await;
    assert_eq!(events.lock().unwrap().len(), 3);

    let (_surface, current) = task.stop().await.unwrap();
    assert_eq!(current, Some(2));
}

#[tokio::test(start_paused = true)]
pub async fn stop_interrupts_a_stalled_fetch() {
    let surface = RecordingSurface::default();
    let events = surface.events.clone();

    let task = RefreshTask::spawn(StalledSource, surface, PERIOD);
    tokio::time::sleep(Duration::from_secs(1)).await;
    assert!(!task.is_finished());

    let (_surface, current) = task.stop().await.unwrap();

    assert!(current.is_none());
    assert!(events.lock().unwrap().is_empty());
}

#[test]
pub async fn refresh_once_replaces_chart() {
    let source = ScriptedSource::new(vec![Ok(payload(&[Some(10.0), Some(11.0)]))]);
    let mut surface = RecordingSurface::default();

    let first = refresh_once(&source, &mut surface, None, &halvings()).await;
    let second = refresh_once(&source, &mut surface, first, &halvings()).await;

    assert_eq!(first, Some(1));
    assert_eq!(second, Some(1), "an empty refresh keeps the previous chart");
    assert_eq!(surface.events.lock().unwrap().len(), 1);
}
