use serde::{Deserialize, Serialize};
use std::fmt;

/// Exchanges known to the symbol model
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum CexName {
    Binance,
}

impl fmt::Display for CexName {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Binance => write!(f, "binance"),
        }
    }
}

/// Instrument kind of a symbol
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum SymbolType {
    Spot,
}

impl fmt::Display for SymbolType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Spot => write!(f, "spot"),
        }
    }
}

/// Exchange-agnostic symbol record, derived once from venue metadata.
///
/// Precisions follow the tick/step-size convention: a positive value is a
/// count of decimal places, zero or negative means the minimum increment is
/// a whole-number power of ten (`-2` = increments of 100).
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Symbol {
    pub cex: CexName,
    pub symbol_type: SymbolType,
    /// Base asset code, e.g. "BTC"
    pub asset: String,
    /// Quote asset code, e.g. "USDT"
    pub quote: String,
    /// Venue symbol code, e.g. "BTCUSDT"
    pub symbol: String,
    /// Quantity precision from the lot-size step
    pub q_precision: i32,
    /// Price precision from the price-filter tick
    pub p_precision: i32,
    pub tradable: bool,
    pub can_market: bool,
    pub can_margin: bool,
}

impl fmt::Display for Symbol {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}:{}:{}", self.cex, self.symbol_type, self.symbol)
    }
}
