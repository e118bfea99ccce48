//! Sorting, filtering and ranking over derived holdings.
//!
//! Every function here takes a borrowed slice and returns a freshly allocated
//! result. Inputs are never reordered in place.

use std::cmp::Ordering;
use std::fmt;
use std::str::FromStr;

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use super::holdings_model::{Holding, Sector};
use crate::errors::{Error, Result};

/// Column a holdings list can be ordered by.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
#[serde(rename_all = "camelCase")]
pub enum SortField {
    Symbol,
    Name,
    Quantity,
    CurrentPrice,
    #[default]
    Value,
    GainLoss,
    GainLossPercent,
    Sector,
}

impl SortField {
    pub const ALL: [SortField; 8] = [
        SortField::Symbol,
        SortField::Name,
        SortField::Quantity,
        SortField::CurrentPrice,
        SortField::Value,
        SortField::GainLoss,
        SortField::GainLossPercent,
        SortField::Sector,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            SortField::Symbol => "symbol",
            SortField::Name => "name",
            SortField::Quantity => "quantity",
            SortField::CurrentPrice => "currentPrice",
            SortField::Value => "value",
            SortField::GainLoss => "gainLoss",
            SortField::GainLossPercent => "gainLossPercent",
            SortField::Sector => "sector",
        }
    }
}

impl fmt::Display for SortField {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for SortField {
    type Err = Error;

    /// Accepts the camelCase wire names as well as snake_case spellings.
    fn from_str(s: &str) -> Result<Self> {
        let wanted: String = s.trim().chars().filter(|c| *c != '_').collect();
        SortField::ALL
            .iter()
            .copied()
            .find(|field| field.as_str().eq_ignore_ascii_case(&wanted))
            .ok_or_else(|| Error::UnknownSortField(s.trim().to_string()))
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
#[serde(rename_all = "lowercase")]
pub enum SortOrder {
    Asc,
    #[default]
    Desc,
}

impl FromStr for SortOrder {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self> {
        match s.trim().to_ascii_lowercase().as_str() {
            "asc" | "ascending" => Ok(SortOrder::Asc),
            "desc" | "descending" => Ok(SortOrder::Desc),
            other => Err(Error::UnknownSortOrder(other.to_string())),
        }
    }
}

/// Locale-style string ordering: case-insensitive first, lowercase before
/// uppercase on case-only differences, code points last.
pub fn locale_cmp(a: &str, b: &str) -> Ordering {
    let folded = a
        .chars()
        .flat_map(char::to_lowercase)
        .cmp(b.chars().flat_map(char::to_lowercase));
    folded
        .then_with(|| {
            a.chars()
                .map(char::is_uppercase)
                .cmp(b.chars().map(char::is_uppercase))
        })
        .then_with(|| a.cmp(b))
}

fn compare_numbers(a: Decimal, b: Decimal) -> Ordering {
    a.cmp(&b)
}

fn compare_by_field(a: &Holding, b: &Holding, field: SortField) -> Ordering {
    match field {
        SortField::Symbol => locale_cmp(&a.symbol, &b.symbol),
        SortField::Name => locale_cmp(&a.name, &b.name),
        SortField::Sector => locale_cmp(a.sector.as_str(), b.sector.as_str()),
        SortField::Quantity => compare_numbers(a.quantity, b.quantity),
        SortField::CurrentPrice => compare_numbers(a.current_price, b.current_price),
        SortField::Value => compare_numbers(a.value, b.value),
        SortField::GainLoss => compare_numbers(a.gain_loss, b.gain_loss),
        SortField::GainLossPercent => compare_numbers(a.gain_loss_percent, b.gain_loss_percent),
    }
}

/// Stable sort. Holdings with equal keys keep their input order in both
/// directions.
pub fn sort_holdings(holdings: &[Holding], field: SortField, order: SortOrder) -> Vec<Holding> {
    let mut sorted = holdings.to_vec();
    sorted.sort_by(|a, b| {
        let ordering = compare_by_field(a, b, field);
        match order {
            SortOrder::Asc => ordering,
            SortOrder::Desc => ordering.reverse(),
        }
    });
    sorted
}

/// String-keyed variant of [`sort_holdings`] for callers holding raw view
/// parameters.
pub fn sort_holdings_by(holdings: &[Holding], field: &str, order: &str) -> Result<Vec<Holding>> {
    let field = field.parse::<SortField>()?;
    let order = order.parse::<SortOrder>()?;
    Ok(sort_holdings(holdings, field, order))
}

/// Sector equality plus a case-insensitive substring match on name or symbol.
/// Both parts are optional; a blank search text matches everything.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct HoldingsFilter {
    pub sector: Option<Sector>,
    pub search: Option<String>,
}

impl HoldingsFilter {
    pub fn none() -> Self {
        Self::default()
    }

    pub fn by_sector(sector: Sector) -> Self {
        Self {
            sector: Some(sector),
            search: None,
        }
    }

    pub fn by_search(text: impl Into<String>) -> Self {
        Self {
            sector: None,
            search: Some(text.into()),
        }
    }

    fn needle(&self) -> Option<String> {
        self.search
            .as_deref()
            .map(str::trim)
            .filter(|s| !s.is_empty())
            .map(str::to_lowercase)
    }

    pub fn is_empty(&self) -> bool {
        self.sector.is_none() && self.needle().is_none()
    }

    pub fn matches(&self, holding: &Holding) -> bool {
        if let Some(sector) = self.sector {
            if holding.sector != sector {
                return false;
            }
        }
        match self.needle() {
            Some(needle) => {
                holding.name.to_lowercase().contains(&needle)
                    || holding.symbol.to_lowercase().contains(&needle)
            }
            None => true,
        }
    }
}

/// Order-preserving subsequence of the holdings accepted by `filter`.
pub fn filter_holdings(holdings: &[Holding], filter: &HoldingsFilter) -> Vec<Holding> {
    if filter.is_empty() {
        return holdings.to_vec();
    }
    holdings
        .iter()
        .filter(|h| filter.matches(h))
        .cloned()
        .collect()
}

/// Filter, sort and optionally truncate in one pass, as a holdings table does.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct HoldingsQuery {
    pub sort_field: SortField,
    pub sort_order: SortOrder,
    pub filter: HoldingsFilter,
    pub limit: Option<usize>,
}

impl HoldingsQuery {
    pub fn apply(&self, holdings: &[Holding]) -> Vec<Holding> {
        let filtered = filter_holdings(holdings, &self.filter);
        let mut sorted = sort_holdings(&filtered, self.sort_field, self.sort_order);
        if let Some(limit) = self.limit {
            sorted.truncate(limit);
        }
        sorted
    }
}

/// Best and worst performers by `gainLossPercent`.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PerformanceRanking {
    /// Highest `gainLossPercent` first.
    pub top: Vec<Holding>,
    /// Lowest `gainLossPercent` first.
    pub bottom: Vec<Holding>,
}

/// Top-`n` and bottom-`n` holdings by `gainLossPercent`.
///
/// `n` is capped at half the input length so the two sets never share a
/// holding. Both sides are cut from a single stable descending ordering,
/// which keeps them disjoint even when every percentage ties.
pub fn rank_by_performance(holdings: &[Holding], n: usize) -> PerformanceRanking {
    let n = n.min(holdings.len() / 2);
    let ordered = sort_holdings(holdings, SortField::GainLossPercent, SortOrder::Desc);
    let top = ordered[..n].to_vec();
    let bottom = ordered[ordered.len() - n..].iter().rev().cloned().collect();
    PerformanceRanking { top, bottom }
}

/// Sectors present in the holdings, de-duplicated and in label order.
pub fn distinct_sectors(holdings: &[Holding]) -> Vec<Sector> {
    let mut sectors: Vec<Sector> = Vec::new();
    for holding in holdings {
        if !sectors.contains(&holding.sector) {
            sectors.push(holding.sector);
        }
    }
    sectors.sort_by(|a, b| locale_cmp(a.as_str(), b.as_str()));
    sectors
}
