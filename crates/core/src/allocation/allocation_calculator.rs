use std::collections::HashMap;
use std::hash::Hash;

use log::debug;
use rust_decimal::Decimal;
use rust_decimal_macros::dec;

use super::{MarketCapAllocationEntry, PortfolioAllocations, SectorAllocationEntry};
use crate::errors::{Error, Result};
use crate::holdings::{Holding, MarketCap, Sector};

struct Bucket<K> {
    key: K,
    value: Decimal,
    holdings_count: usize,
}

/// Groups holdings by `key_of`, keeping buckets in first-appearance order,
/// then stable-sorts them by value descending.
fn group_by<K, F>(holdings: &[Holding], key_of: F) -> Vec<Bucket<K>>
where
    K: Copy + Eq + Hash,
    F: Fn(&Holding) -> K,
{
    let mut index: HashMap<K, usize> = HashMap::new();
    let mut buckets: Vec<Bucket<K>> = Vec::new();

    for holding in holdings {
        let key = key_of(holding);
        let slot = *index.entry(key).or_insert_with(|| {
            buckets.push(Bucket {
                key,
                value: Decimal::ZERO,
                holdings_count: 0,
            });
            buckets.len() - 1
        });
        let bucket = &mut buckets[slot];
        // Bounded by the portfolio total, which callers check first.
        bucket.value += holding.value;
        bucket.holdings_count += 1;
    }

    buckets.sort_by(|a, b| b.value.cmp(&a.value));
    buckets
}

/// Sums `field` over the holdings, failing on the holding that pushes the
/// total past what a `Decimal` can hold.
pub fn checked_total<F>(holdings: &[Holding], what: &str, field: F) -> Result<Decimal>
where
    F: Fn(&Holding) -> Decimal,
{
    holdings.iter().try_fold(Decimal::ZERO, |acc, h| {
        acc.checked_add(field(h)).ok_or_else(|| {
            Error::invalid_holding(&h.symbol, format!("portfolio {} overflows", what))
        })
    })
}

/// Total market value of the holdings.
pub fn total_value(holdings: &[Holding]) -> Result<Decimal> {
    checked_total(holdings, "market value", |h| h.value)
}

/// `value / total * 100`, defined as zero when the total is zero. `None`
/// when the ratio does not fit in a `Decimal`.
pub fn percentage_of(value: Decimal, total: Decimal) -> Option<Decimal> {
    if total > Decimal::ZERO {
        value.checked_div(total)?.checked_mul(dec!(100))
    } else {
        Some(Decimal::ZERO)
    }
}

fn share_of(value: Decimal, total: Decimal) -> Result<Decimal> {
    percentage_of(value, total)
        .ok_or_else(|| Error::Overflow(format!("allocation share of {} in {}", value, total)))
}

/// One entry per sector present in the input. Percentages add up to 100
/// whenever the portfolio has a positive value.
pub fn aggregate_by_sector(holdings: &[Holding]) -> Result<Vec<SectorAllocationEntry>> {
    let total = total_value(holdings)?;
    group_by::<Sector, _>(holdings, |h| h.sector)
        .into_iter()
        .map(|bucket| {
            Ok(SectorAllocationEntry {
                sector: bucket.key,
                value: bucket.value,
                percentage: share_of(bucket.value, total)?,
                holdings_count: bucket.holdings_count,
            })
        })
        .collect()
}

/// Same contract as [`aggregate_by_sector`], keyed by market cap.
pub fn aggregate_by_market_cap(holdings: &[Holding]) -> Result<Vec<MarketCapAllocationEntry>> {
    let total = total_value(holdings)?;
    group_by::<MarketCap, _>(holdings, |h| h.market_cap)
        .into_iter()
        .map(|bucket| {
            Ok(MarketCapAllocationEntry {
                market_cap: bucket.key,
                value: bucket.value,
                percentage: share_of(bucket.value, total)?,
                holdings_count: bucket.holdings_count,
            })
        })
        .collect()
}

pub fn compute_allocations(holdings: &[Holding]) -> Result<PortfolioAllocations> {
    let allocations = PortfolioAllocations {
        by_sector: aggregate_by_sector(holdings)?,
        by_market_cap: aggregate_by_market_cap(holdings)?,
        total_value: total_value(holdings)?,
    };
    debug!(
        "Computed allocations: {} sectors, {} market cap buckets",
        allocations.by_sector.len(),
        allocations.by_market_cap.len()
    );
    Ok(allocations)
}
