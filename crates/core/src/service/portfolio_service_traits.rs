//! Portfolio service traits.

use async_trait::async_trait;

use crate::allocation::PortfolioAllocations;
use crate::errors::Result;
use crate::holdings::{Holding, HoldingsQuery, PerformanceRanking, Sector};
use crate::performance::PerformanceOverview;
use crate::summary::{PortfolioHighlights, PortfolioSummary};
use crate::views::{PortfolioView, ViewParams};

#[async_trait]
pub trait PortfolioServiceTrait: Send + Sync {
    /// Filtered, sorted and optionally truncated holdings.
    async fn get_holdings(&self, query: &HoldingsQuery) -> Result<Vec<Holding>>;

    async fn get_allocations(&self) -> Result<PortfolioAllocations>;

    async fn get_performance(&self) -> Result<PerformanceOverview>;

    /// Totals over every holding; all zeros when the portfolio is empty.
    async fn get_summary(&self) -> Result<PortfolioSummary>;

    /// Fails with `EmptyPortfolio` when there is nothing to highlight.
    async fn get_highlights(&self) -> Result<PortfolioHighlights>;

    async fn get_top_performers(&self, n: usize) -> Result<PerformanceRanking>;

    async fn get_sectors(&self) -> Result<Vec<Sector>>;

    async fn get_view(&self, params: &ViewParams) -> Result<PortfolioView>;

    /// Re-reads the repository and replaces the cached snapshot.
    ///
    /// On failure the previous snapshot stays in place and a
    /// `ReloadFailed` event is emitted. Returns the new holdings count.
    async fn reload(&self) -> Result<usize>;

    /// Name of the source the cached snapshot came from, if one is loaded.
    async fn current_source(&self) -> Option<String>;
}
