use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use thiserror::Error;

#[derive(Error, Debug)]
pub enum AnalyzerError {
    #[error("Configuration error: {0}")]
    ConfigError(String),
    #[error("Connection to {endpoint} failed: {reason}")]
    ConnectionFailed { endpoint: String, reason: String },
    #[error("Request timeout: {0}")]
    Timeout(String),
    #[error("Unknown venue: {0}")]
    VenueNotFound(String),
}

/// One swap venue in the registry. Fixed at process start; addresses are
/// opaque here, their validity is the chain's concern.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct VenueConfig {
    pub name: String,
    #[serde(rename = "routerAddress")]
    pub router_address: String,
    #[serde(rename = "factoryAddress")]
    pub factory_address: String,
    pub endpoint: String,
    #[serde(rename = "chainId")]
    pub chain_id: u64,
    pub active: bool,
}

/// Latest computed snapshot for a venue, replaced wholesale on each refresh.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AnalysisRecord {
    #[serde(rename = "venueName")]
    pub venue_name: String,
    #[serde(rename = "priceNative")]
    pub price_native: f64,
    #[serde(rename = "priceDisplay")]
    pub price_display: String,
    #[serde(rename = "liquidityDisplay")]
    pub liquidity_display: String,
    #[serde(rename = "volume24hDisplay")]
    pub volume_24h_display: String,
    #[serde(rename = "feeRate")]
    pub fee_rate: String,
    #[serde(rename = "priceImpact")]
    pub price_impact: String,
    #[serde(rename = "gasFeeDisplay")]
    pub gas_fee_display: String,
    pub profitability: String,
    #[serde(rename = "isRecommended")]
    pub is_recommended: bool,
    #[serde(rename = "lastUpdated")]
    pub last_updated: DateTime<Utc>,
}
