use chrono::{DateTime, NaiveDate, Utc};
use serde::{Deserialize, Serialize};

/// One day of the price series.
///
/// `price` is `None` only between decoding an upstream record and filtering;
/// every point in a series handed to the renderer carries a price.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PricePoint {
    pub date: DateTime<Utc>,
    pub price: Option<f64>,
}

impl PricePoint {
    pub fn new(date: DateTime<Utc>, price: f64) -> Self {
        Self {
            date,
            price: Some(price),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct HalvingEvent {
    pub date: DateTime<Utc>,
    pub label: &'static str,
    pub block_height: u64,
    pub roi: &'static str,
}

const HALVING_TABLE: [(i32, u32, u32, &str, u64, &str); 4] = [
    (2012, 11, 28, "First Halving (50 → 25 BTC)", 210_000, "9,000%"),
    (2016, 7, 9, "Second Halving (25 → 12.5 BTC)", 420_000, "2,800%"),
    (2020, 5, 11, "Third Halving (12.5 → 6.25 BTC)", 630_000, "650%"),
    (2024, 4, 19, "Fourth Halving (6.25 → 3.125 BTC)", 840_000, "TBD"),
];

/// The four halvings, oldest first.
pub fn halvings() -> Vec<HalvingEvent> {
    HALVING_TABLE
        .iter()
        .filter_map(|&(year, month, day, label, block_height, roi)| {
            let date = NaiveDate::from_ymd_opt(year, month, day)?
                .and_hms_opt(0, 0, 0)?
                .and_utc();

            Some(HalvingEvent {
                date,
                label,
                block_height,
                roi,
            })
        })
        .collect()
}
