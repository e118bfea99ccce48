//! Allocation models for portfolio breakdown by category.

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use crate::holdings::{MarketCap, Sector};

/// One sector bucket.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SectorAllocationEntry {
    pub sector: Sector,
    /// Sum of the market values of the holdings in this sector
    pub value: Decimal,
    /// Share of total portfolio value (0-100)
    pub percentage: Decimal,
    pub holdings_count: usize,
}

/// One market-cap bucket.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct MarketCapAllocationEntry {
    pub market_cap: MarketCap,
    pub value: Decimal,
    pub percentage: Decimal,
    pub holdings_count: usize,
}

/// Both breakdowns over the same holdings, sorted by value descending.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PortfolioAllocations {
    pub by_sector: Vec<SectorAllocationEntry>,
    pub by_market_cap: Vec<MarketCapAllocationEntry>,
    /// Total portfolio value the percentages are relative to
    pub total_value: Decimal,
}

impl Default for PortfolioAllocations {
    fn default() -> Self {
        Self {
            by_sector: Vec::new(),
            by_market_cap: Vec::new(),
            total_value: Decimal::ZERO,
        }
    }
}
