pub mod core;
pub mod exchanges;

pub use crate::core::{
    errors::ExchangeError,
    types::{CexName, Symbol, SymbolType},
};
pub use crate::exchanges::binance::BinanceSpotRest;
