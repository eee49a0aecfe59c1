use bon::Builder;
use serde::{Deserialize, Serialize};
use crate::method::Method;

#[derive(Serialize, Deserialize, Debug, Clone, Builder)]
#[builder(on(String, into))]
pub struct HistodayParams {
    #[serde(rename = "fsym")]
    pub source_sym: String,

    #[serde(rename = "tsym")]
    pub target_sym: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub limit: Option<u32>,
    #[serde(rename = "toTs", skip_serializing_if = "Option::is_none")]
    pub to_ts: Option<i64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub aggregate: Option<u32>,
    #[serde(rename = "e", skip_serializing_if = "Option::is_none")]
    pub exchange: Option<String>,
    #[serde(rename = "allData", skip_serializing_if = "Option::is_none")]
    pub all_data: Option<bool>,
}

impl HistodayParams {
    /// Full BTC/USD daily history on the CCCAGG index, ending at `to_ts`
    /// (epoch seconds).
    pub fn btc_usd_full_history(to_ts: i64) -> Self {
        Self::builder()
            .source_sym("BTC")
            .target_sym("USD")
            .limit(2000)
            .to_ts(to_ts)
            .aggregate(1)
            .exchange("CCCAGG".to_string())
            .all_data(true)
            .build()
    }
}

pub struct Histoday;

impl Method for Histoday {
    const PATH: &'static str = "/data/v2/histoday";

    type Params = HistodayParams;
}
