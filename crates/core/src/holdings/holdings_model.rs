use std::fmt;
use std::str::FromStr;

use log::debug;
use rust_decimal::Decimal;
use rust_decimal_macros::dec;
use serde::{Deserialize, Serialize};

use crate::errors::{Error, Result};

/// Business sector a holding is classified under.
#[derive(Serialize, Deserialize, Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Sector {
    Energy,
    Technology,
    Banking,
    #[serde(rename = "Financial Services")]
    FinancialServices,
    Telecommunications,
    #[serde(rename = "Consumer Goods")]
    ConsumerGoods,
    #[serde(rename = "Consumer Discretionary")]
    ConsumerDiscretionary,
    Automotive,
    Healthcare,
    Industrials,
    Materials,
    Utilities,
    #[serde(rename = "Real Estate")]
    RealEstate,
}

impl Sector {
    pub const ALL: [Sector; 13] = [
        Sector::Energy,
        Sector::Technology,
        Sector::Banking,
        Sector::FinancialServices,
        Sector::Telecommunications,
        Sector::ConsumerGoods,
        Sector::ConsumerDiscretionary,
        Sector::Automotive,
        Sector::Healthcare,
        Sector::Industrials,
        Sector::Materials,
        Sector::Utilities,
        Sector::RealEstate,
    ];

    /// Display label, identical to the serialized form.
    pub fn as_str(&self) -> &'static str {
        match self {
            Sector::Energy => "Energy",
            Sector::Technology => "Technology",
            Sector::Banking => "Banking",
            Sector::FinancialServices => "Financial Services",
            Sector::Telecommunications => "Telecommunications",
            Sector::ConsumerGoods => "Consumer Goods",
            Sector::ConsumerDiscretionary => "Consumer Discretionary",
            Sector::Automotive => "Automotive",
            Sector::Healthcare => "Healthcare",
            Sector::Industrials => "Industrials",
            Sector::Materials => "Materials",
            Sector::Utilities => "Utilities",
            Sector::RealEstate => "Real Estate",
        }
    }
}

impl fmt::Display for Sector {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Sector {
    type Err = String;

    fn from_str(s: &str) -> std::result::Result<Self, Self::Err> {
        let wanted = normalize_label(s);
        Sector::ALL
            .iter()
            .copied()
            .find(|sector| normalize_label(sector.as_str()) == wanted)
            .ok_or_else(|| format!("unknown sector '{}'", s.trim()))
    }
}

/// Market capitalisation bucket.
#[derive(Serialize, Deserialize, Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum MarketCap {
    Large,
    Mid,
    Small,
}

impl MarketCap {
    pub const ALL: [MarketCap; 3] = [MarketCap::Large, MarketCap::Mid, MarketCap::Small];

    pub fn as_str(&self) -> &'static str {
        match self {
            MarketCap::Large => "Large",
            MarketCap::Mid => "Mid",
            MarketCap::Small => "Small",
        }
    }
}

impl fmt::Display for MarketCap {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for MarketCap {
    type Err = String;

    fn from_str(s: &str) -> std::result::Result<Self, Self::Err> {
        let wanted = normalize_label(s);
        let wanted = wanted.strip_suffix("cap").unwrap_or(&wanted);
        MarketCap::ALL
            .iter()
            .copied()
            .find(|cap| normalize_label(cap.as_str()) == wanted)
            .ok_or_else(|| format!("unknown market cap '{}'", s.trim()))
    }
}

/// Lowercases and drops separators so "Consumer Goods", "consumer_goods" and
/// "consumerGoods" compare equal.
fn normalize_label(label: &str) -> String {
    label
        .chars()
        .filter(|c| c.is_alphanumeric())
        .flat_map(char::to_lowercase)
        .collect()
}

/// A position as supplied by a data source.
///
/// Only `quantity`, `avgPrice` and `currentPrice` are authoritative. Any
/// pre-computed value or gain field found in a source document is ignored
/// and recomputed by [`compute_derived_fields`].
#[derive(Serialize, Deserialize, Debug, Clone, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct RawHolding {
    pub symbol: String,
    #[serde(alias = "companyName")]
    pub name: String,
    pub quantity: Decimal,
    pub avg_price: Decimal,
    pub current_price: Decimal,
    pub sector: String,
    pub market_cap: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub exchange: Option<String>,
}

/// A validated position with its derived valuation fields.
#[derive(Serialize, Deserialize, Debug, Clone, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct Holding {
    pub symbol: String,
    pub name: String,
    pub quantity: Decimal,
    pub avg_price: Decimal,
    pub current_price: Decimal,
    pub sector: Sector,
    pub market_cap: MarketCap,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub exchange: Option<String>,

    /// `quantity * currentPrice`
    pub value: Decimal,
    /// `quantity * avgPrice`
    pub cost_basis: Decimal,
    /// `value - costBasis`
    pub gain_loss: Decimal,
    /// `gainLoss / costBasis * 100`, zero when the cost basis is zero
    pub gain_loss_percent: Decimal,
}

impl Holding {
    pub fn is_gaining(&self) -> bool {
        self.gain_loss > Decimal::ZERO
    }

    pub fn is_losing(&self) -> bool {
        self.gain_loss < Decimal::ZERO
    }
}

/// Validates a raw holding and augments it with `value`, `gainLoss` and
/// `gainLossPercent`.
///
/// Fails with [`Error::InvalidHolding`] when the quantity is negative or
/// fractional, when either price is not strictly positive, when a category
/// label is unknown, or when the valuation overflows.
pub fn compute_derived_fields(raw: &RawHolding) -> Result<Holding> {
    let symbol = raw.symbol.trim();
    if symbol.is_empty() {
        return Err(Error::invalid_holding("<blank>", "symbol is required"));
    }
    if raw.quantity < Decimal::ZERO {
        return Err(Error::invalid_holding(
            symbol,
            format!("quantity must not be negative, got {}", raw.quantity),
        ));
    }
    if !raw.quantity.fract().is_zero() {
        return Err(Error::invalid_holding(
            symbol,
            format!("quantity must be a whole number, got {}", raw.quantity),
        ));
    }
    if raw.avg_price <= Decimal::ZERO {
        return Err(Error::invalid_holding(
            symbol,
            format!("average price must be positive, got {}", raw.avg_price),
        ));
    }
    if raw.current_price <= Decimal::ZERO {
        return Err(Error::invalid_holding(
            symbol,
            format!("current price must be positive, got {}", raw.current_price),
        ));
    }

    let sector = raw
        .sector
        .parse::<Sector>()
        .map_err(|reason| Error::invalid_holding(symbol, reason))?;
    let market_cap = raw
        .market_cap
        .parse::<MarketCap>()
        .map_err(|reason| Error::invalid_holding(symbol, reason))?;

    let value = raw
        .quantity
        .checked_mul(raw.current_price)
        .ok_or_else(|| Error::invalid_holding(symbol, "market value overflows"))?;
    let cost_basis = raw
        .quantity
        .checked_mul(raw.avg_price)
        .ok_or_else(|| Error::invalid_holding(symbol, "cost basis overflows"))?;
    let gain_loss = value - cost_basis;
    let gain_loss_percent = if cost_basis > Decimal::ZERO {
        gain_loss
            .checked_div(cost_basis)
            .and_then(|ratio| ratio.checked_mul(dec!(100)))
            .ok_or_else(|| Error::invalid_holding(symbol, "gain/loss percentage overflows"))?
    } else {
        Decimal::ZERO
    };

    Ok(Holding {
        symbol: symbol.to_string(),
        name: raw.name.trim().to_string(),
        quantity: raw.quantity,
        avg_price: raw.avg_price,
        current_price: raw.current_price,
        sector,
        market_cap,
        exchange: raw.exchange.clone(),
        value,
        cost_basis,
        gain_loss,
        gain_loss_percent,
    })
}

/// Derives every holding of a source collection, stopping at the first
/// invalid record.
pub fn compute_all(raw_holdings: &[RawHolding]) -> Result<Vec<Holding>> {
    let holdings = raw_holdings
        .iter()
        .map(compute_derived_fields)
        .collect::<Result<Vec<_>>>()?;
    debug!("Derived valuation fields for {} holdings", holdings.len());
    Ok(holdings)
}
