use log::debug;

use super::{AdvisoryProfile, PortfolioHighlights, PortfolioSummary};
use crate::allocation::{checked_total, percentage_of, total_value};
use crate::errors::{Error, Result};
use crate::holdings::Holding;

/// Totals over every holding. An empty portfolio yields an all-zero summary
/// rather than an error.
pub fn summarize(holdings: &[Holding], advisory: &AdvisoryProfile) -> Result<PortfolioSummary> {
    let total_value = total_value(holdings)?;
    let total_invested = checked_total(holdings, "cost basis", |h| h.cost_basis)?;
    // Both totals are non-negative, so the difference always fits.
    let total_gain_loss = total_value - total_invested;
    let total_gain_loss_percent = percentage_of(total_gain_loss, total_invested)
        .ok_or_else(|| Error::Overflow("total gain/loss percentage".to_string()))?;

    debug!(
        "Summarised {} holdings: value {}, invested {}",
        holdings.len(),
        total_value,
        total_invested
    );

    Ok(PortfolioSummary {
        total_value,
        total_invested,
        total_gain_loss,
        total_gain_loss_percent,
        number_of_holdings: holdings.len(),
        diversification_score: advisory.diversification_score,
        risk_level: advisory.risk_level,
    })
}

/// First holding for which no later holding is strictly preferred.
fn pick<'a, F>(holdings: &'a [Holding], what: &str, prefer: F) -> Result<&'a Holding>
where
    F: Fn(&Holding, &Holding) -> bool,
{
    let mut iter = holdings.iter();
    let first = iter
        .next()
        .ok_or_else(|| Error::EmptyPortfolio(format!("no {} in an empty portfolio", what)))?;
    Ok(iter.fold(first, |best, candidate| {
        if prefer(candidate, best) {
            candidate
        } else {
            best
        }
    }))
}

/// Holding with the highest `gainLossPercent`; the earliest one on ties.
pub fn best_performer(holdings: &[Holding]) -> Result<&Holding> {
    pick(holdings, "best performer", |c, b| {
        c.gain_loss_percent > b.gain_loss_percent
    })
}

/// Holding with the lowest `gainLossPercent`; the earliest one on ties.
pub fn worst_performer(holdings: &[Holding]) -> Result<&Holding> {
    pick(holdings, "worst performer", |c, b| {
        c.gain_loss_percent < b.gain_loss_percent
    })
}

pub fn highest_value(holdings: &[Holding]) -> Result<&Holding> {
    pick(holdings, "highest value holding", |c, b| c.value > b.value)
}

pub fn lowest_value(holdings: &[Holding]) -> Result<&Holding> {
    pick(holdings, "lowest value holding", |c, b| c.value < b.value)
}

/// Best/worst performers, highest/lowest values and gain/loss counts.
///
/// Fails with [`Error::EmptyPortfolio`] when there are no holdings.
pub fn highlights(holdings: &[Holding]) -> Result<PortfolioHighlights> {
    let gaining_count = holdings.iter().filter(|h| h.is_gaining()).count();
    let losing_count = holdings.iter().filter(|h| h.is_losing()).count();

    Ok(PortfolioHighlights {
        best_performer: best_performer(holdings)?.clone(),
        worst_performer: worst_performer(holdings)?.clone(),
        highest_value: highest_value(holdings)?.clone(),
        lowest_value: lowest_value(holdings)?.clone(),
        gaining_count,
        losing_count,
        unchanged_count: holdings.len() - gaining_count - losing_count,
    })
}
