use super::filters::analyze_symbol_filters;
use super::types::{SpotSymbol, ORDER_TYPE_MARKET, STATUS_TRADING};
use crate::core::errors::ExchangeError;
use crate::core::types::{CexName, Symbol, SymbolType};

/// Convert a Binance spot symbol record into the generic symbol type.
///
/// Pure transform: precisions come from the filter analyzer, capability
/// flags from the record's status / order-types / margin fields.
pub fn to_cex_symbol(spot: &SpotSymbol) -> Result<Symbol, ExchangeError> {
    let filters_info = analyze_symbol_filters(&spot.filters)?;

    Ok(Symbol {
        cex: CexName::Binance,
        symbol_type: SymbolType::Spot,
        asset: spot.base_asset.clone(),
        quote: spot.quote_asset.clone(),
        symbol: spot.symbol.clone(),
        q_precision: filters_info.q_prec,
        p_precision: filters_info.p_prec,
        tradable: spot.status == STATUS_TRADING,
        can_market: spot.order_types.iter().any(|t| t == ORDER_TYPE_MARKET),
        can_margin: spot.is_margin_trading_allowed,
    })
}
