use chrono::DateTime;
use halvings_shared_models::PricePoint;
use serde_json::Value;
use thiserror::Error;

#[derive(Error, Debug, PartialEq)]
pub enum ShapeError {
    #[error("Invalid data format: missing Data.Data records")]
    MissingRecords,
}

/// Turns a proxied histoday payload into the working price series.
///
/// Only `Data.Data[].time` (epoch seconds) and `Data.Data[].close` are read.
/// Records without a numeric close are dropped; upstream order is kept.
pub fn normalize_histoday(body: &Value) -> Result<Vec<PricePoint>, ShapeError> {
    let records = body
        .get("Data")
        .and_then(|data| data.get("Data"))
        .and_then(Value::as_array)
        .ok_or(ShapeError::MissingRecords)?;

    Ok(records
        .iter()
        .filter_map(to_point)
        .filter(|point| point.price.is_some())
        .collect())
}

fn to_point(record: &Value) -> Option<PricePoint> {
    let time = record.get("time")?;
    let seconds = time.as_i64().or_else(|| time.as_f64().map(|t| t as i64))?;

    let Some(date) = DateTime::from_timestamp(seconds, 0) else {
        tracing::debug!(seconds, "skipping record with out-of-range time");
        return None;
    };

    Some(PricePoint {
        date,
        price: record.get("close").and_then(Value::as_f64),
    })
}
