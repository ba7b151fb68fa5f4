use serde::Deserialize;
use serde_json::Value;

// Binance extends its discriminator sets over time, so status / order-type /
// permission fields stay plain strings; these are the values the converter
// compares against.

/// Symbol status meaning the pair is actively trading
pub const STATUS_TRADING: &str = "TRADING";
/// Order type for market orders
pub const ORDER_TYPE_MARKET: &str = "MARKET";

#[derive(Debug, Clone, Deserialize)]
pub struct ServerTime {
    #[serde(rename = "serverTime")]
    pub server_time: i64,
}

#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SpotSymbol {
    pub symbol: String,
    pub status: String,
    pub base_asset: String,
    pub base_asset_precision: i32,
    pub quote_asset: String,
    pub quote_precision: i32,
    pub quote_asset_precision: i32,
    #[serde(default)]
    pub base_commission_precision: i32,
    #[serde(default)]
    pub quote_commission_precision: i32,
    pub order_types: Vec<String>,
    #[serde(default)]
    pub iceberg_allowed: bool,
    #[serde(default)]
    pub oco_allowed: bool,
    #[serde(default)]
    pub oto_allowed: bool,
    #[serde(default)]
    pub quote_order_qty_market_allowed: bool,
    #[serde(default)]
    pub allow_trailing_stop: bool,
    #[serde(default)]
    pub cancel_replace_allowed: bool,
    #[serde(default)]
    pub amend_allowed: bool,
    #[serde(default)]
    pub is_spot_trading_allowed: bool,
    #[serde(default)]
    pub is_margin_trading_allowed: bool,
    /// Raw filter records; the filter analyzer enforces its own type checks
    #[serde(default)]
    pub filters: Vec<Value>,
    #[serde(default)]
    pub permissions: Vec<String>,
    #[serde(default)]
    pub permission_sets: Vec<Vec<String>>,
    #[serde(default)]
    pub default_self_trade_prevention_mode: String,
    #[serde(default)]
    pub allowed_self_trade_prevention_modes: Vec<String>,
}

#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RateLimiter {
    pub rate_limit_type: String,
    pub interval: String,
    pub interval_num: i64,
    pub limit: i64,
}

/// Smart-order-routing group
#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Sor {
    pub base_asset: String,
    pub symbols: Vec<String>,
}

#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SpotExchangeInfo {
    pub timezone: String,
    pub server_time: i64,
    #[serde(default)]
    pub rate_limits: Vec<RateLimiter>,
    #[serde(default)]
    pub exchange_filters: Vec<Value>,
    pub symbols: Vec<SpotSymbol>,
    #[serde(default)]
    pub sors: Vec<Sor>,
}
