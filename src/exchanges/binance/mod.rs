pub mod converters;
pub mod endpoints;
pub mod filters;
pub mod rest;
pub mod types;

use crate::core::config::ExchangeConfig;
use crate::core::errors::ExchangeError;

// Re-export main types for easier importing
pub use converters::to_cex_symbol;
pub use filters::{analyze_symbol_filters, size_precision, SymbolFiltersInfo};
pub use rest::{BinanceSpotRest, ExchangeInfoParams};
pub use types::{RateLimiter, ServerTime, Sor, SpotExchangeInfo, SpotSymbol};

/// Create a Binance spot REST client from configuration
pub fn create_binance_spot_client(
    config: &ExchangeConfig,
) -> Result<BinanceSpotRest, ExchangeError> {
    BinanceSpotRest::new(config)
}
