use crate::core::errors::ExchangeError;
use serde_json::Value;

/// Precision hints extracted from a symbol's filter list.
///
/// `can_market` is never derived from filters and stays at its default; the
/// converter computes market capability from the order-types list instead.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct SymbolFiltersInfo {
    pub p_prec: i32,
    pub q_prec: i32,
    pub can_market: bool,
}

/// Extract the precision implied by a Binance tick/step size string.
///
/// Binance encodes minimum increments as powers of ten with a single
/// significant digit `1` ("0.00100000", "1.00000000", "100"). The result is
/// the position of that `1` relative to the decimal point: positive counts
/// decimal places ("0.001" -> 3), zero or negative counts whole-number
/// magnitude ("1" -> 0, "100" -> -2).
///
/// Hard precondition: the input follows that convention. This is not a
/// general decimal-precision parser; anything without a digit `1` is
/// rejected with `UnknownFilterSize`.
pub fn size_precision(size: &str) -> Result<i32, ExchangeError> {
    let mut parts = size.splitn(2, '.');
    let integer_part = parts.next().unwrap_or("");
    let fractional_part = parts.next();

    if let Some(i) = integer_part.find('1') {
        return Ok(i as i32 - integer_part.len() as i32 + 1);
    }

    let Some(fractional_part) = fractional_part else {
        return Err(ExchangeError::UnknownFilterSize(size.to_string()));
    };

    match fractional_part.find('1') {
        Some(j) => Ok(j as i32 + 1),
        None => Err(ExchangeError::UnknownFilterSize(size.to_string())),
    }
}

/// Walk a symbol's raw filter list, extracting price and quantity precision.
///
/// Dispatches on the `filterType` discriminator: `PRICE_FILTER` feeds
/// `tickSize` to the analyzer, `LOT_SIZE` feeds `stepSize`. Unrecognized
/// filter types are skipped. A discriminator or size field that is present
/// but not a string is a `TypeMismatch`, surfaced immediately.
pub fn analyze_symbol_filters(filters: &[Value]) -> Result<SymbolFiltersInfo, ExchangeError> {
    let mut info = SymbolFiltersInfo::default();

    for filter in filters {
        let filter_type = filter
            .get("filterType")
            .and_then(Value::as_str)
            .ok_or_else(|| {
                ExchangeError::TypeMismatch(format!("filterType is not a string in {}", filter))
            })?;

        match filter_type {
            "PRICE_FILTER" => {
                let tick_size = filter.get("tickSize").and_then(Value::as_str).ok_or_else(
                    || ExchangeError::TypeMismatch(format!("tickSize is not a string in {}", filter)),
                )?;
                info.p_prec = size_precision(tick_size)?;
            }
            "LOT_SIZE" => {
                let step_size = filter.get("stepSize").and_then(Value::as_str).ok_or_else(
                    || ExchangeError::TypeMismatch(format!("stepSize is not a string in {}", filter)),
                )?;
                info.q_prec = size_precision(step_size)?;
            }
            _ => {}
        }
    }

    Ok(info)
}
