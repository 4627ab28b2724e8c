use serde::{Deserialize, Serialize};

/// Point-in-time market data for one instrument, as supplied by a market-data producer.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CryptoSnapshot {
    pub symbol: String,
    pub name: String,
    pub price: f64,
    pub change: f64,
    pub change_percent: f64,
    pub volume: f64,
    pub market_cap: f64,
    pub high: f64,
    pub low: f64,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub sector: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub rank: Option<u32>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub dominance: Option<f64>,
    #[serde(default, rename = "change24h", skip_serializing_if = "Option::is_none")]
    pub change_24h: Option<f64>,
}
