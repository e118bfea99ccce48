use log::debug;

use super::{PortfolioView, ViewParams};
use crate::allocation::compute_allocations;
use crate::errors::{Error, Result};
use crate::holdings::{compute_all, distinct_sectors, rank_by_performance};
use crate::performance::performance_overview;
use crate::repository::PortfolioSnapshot;
use crate::summary::{highlights, summarize};

/// Derives the sections `params.mode` asks for from a resolved snapshot.
///
/// Holdings are re-derived from the raw records on every call. The summary,
/// highlights and ranking always cover the whole portfolio; only the
/// holdings table honours the filter.
pub fn build_view(snapshot: &PortfolioSnapshot, params: &ViewParams) -> Result<PortfolioView> {
    let mode = params.mode;
    let holdings = compute_all(&snapshot.holdings)?;
    let mut view = PortfolioView::empty(mode);

    if mode.includes_summary() {
        view.summary = Some(summarize(&holdings, &snapshot.advisory)?);
    }

    if mode.includes_highlights() {
        view.highlights = match highlights(&holdings) {
            Ok(h) => Some(h),
            Err(Error::EmptyPortfolio(_)) => None,
            Err(e) => return Err(e),
        };
        view.ranking = Some(rank_by_performance(&holdings, params.top_n));
    }

    if mode.includes_holdings() {
        view.holdings = Some(params.holdings.apply(&holdings));
        view.sectors = Some(distinct_sectors(&holdings));
    }

    if mode.includes_allocations() {
        view.allocations = Some(compute_allocations(&holdings)?);
    }

    if mode.includes_performance() {
        view.performance = Some(performance_overview(&snapshot.performance)?);
    }

    debug!(
        "Built {} view over {} holdings from '{}'",
        mode,
        holdings.len(),
        snapshot.source
    );
    Ok(view)
}
