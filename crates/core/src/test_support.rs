//! Builders shared by the unit tests.

use rust_decimal::Decimal;

use crate::holdings::{compute_derived_fields, Holding, RawHolding};

pub fn raw(
    symbol: &str,
    quantity: i64,
    avg_price: Decimal,
    current_price: Decimal,
    sector: &str,
) -> RawHolding {
    RawHolding {
        symbol: symbol.to_string(),
        name: format!("{} Limited", symbol),
        quantity: Decimal::from(quantity),
        avg_price,
        current_price,
        sector: sector.to_string(),
        market_cap: "Large".to_string(),
        exchange: Some("NSE".to_string()),
    }
}

pub fn holding(
    symbol: &str,
    quantity: i64,
    avg_price: Decimal,
    current_price: Decimal,
    sector: &str,
) -> Holding {
    compute_derived_fields(&raw(symbol, quantity, avg_price, current_price, sector)).unwrap()
}

pub fn with_market_cap(mut raw: RawHolding, market_cap: &str) -> RawHolding {
    raw.market_cap = market_cap.to_string();
    raw
}

pub fn with_name(mut holding: Holding, name: &str) -> Holding {
    holding.name = name.to_string();
    holding
}

/// The two-holding portfolio used throughout the engine tests:
/// A gains 10% in Technology, B loses 10% in Banking.
pub fn two_holdings() -> Vec<Holding> {
    vec![
        holding("A", 10, Decimal::from(100), Decimal::from(110), "Technology"),
        holding("B", 5, Decimal::from(200), Decimal::from(180), "Banking"),
    ]
}

pub fn symbols(holdings: &[Holding]) -> Vec<&str> {
    holdings.iter().map(|h| h.symbol.as_str()).collect()
}
