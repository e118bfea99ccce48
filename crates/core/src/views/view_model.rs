use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::allocation::PortfolioAllocations;
use crate::constants::DEFAULT_TOP_N;
use crate::errors::Error;
use crate::holdings::{Holding, HoldingsQuery, PerformanceRanking, Sector};
use crate::performance::PerformanceOverview;
use crate::summary::{PortfolioHighlights, PortfolioSummary};

/// Which dashboard screen a view is built for.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
#[serde(rename_all = "lowercase")]
pub enum ViewMode {
    /// Summary cards, highlights and the gainers/losers ranking.
    #[default]
    Overview,
    /// The holdings table with its sector picker.
    Holdings,
    /// Sector and market cap breakdowns.
    Allocation,
    /// Timeline chart and trailing returns.
    Performance,
    /// Everything at once.
    Complete,
}

impl ViewMode {
    pub fn as_str(&self) -> &'static str {
        match self {
            ViewMode::Overview => "overview",
            ViewMode::Holdings => "holdings",
            ViewMode::Allocation => "allocation",
            ViewMode::Performance => "performance",
            ViewMode::Complete => "complete",
        }
    }

    pub fn includes_summary(&self) -> bool {
        matches!(self, ViewMode::Overview | ViewMode::Complete)
    }

    pub fn includes_highlights(&self) -> bool {
        matches!(self, ViewMode::Overview | ViewMode::Complete)
    }

    pub fn includes_holdings(&self) -> bool {
        matches!(self, ViewMode::Holdings | ViewMode::Complete)
    }

    pub fn includes_allocations(&self) -> bool {
        matches!(self, ViewMode::Allocation | ViewMode::Complete)
    }

    pub fn includes_performance(&self) -> bool {
        matches!(self, ViewMode::Performance | ViewMode::Complete)
    }
}

impl fmt::Display for ViewMode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for ViewMode {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "overview" => Ok(ViewMode::Overview),
            "holdings" => Ok(ViewMode::Holdings),
            "allocation" | "allocations" => Ok(ViewMode::Allocation),
            "performance" => Ok(ViewMode::Performance),
            "complete" | "full" => Ok(ViewMode::Complete),
            other => Err(Error::UnknownViewMode(other.to_string())),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ViewParams {
    pub mode: ViewMode,
    pub holdings: HoldingsQuery,
    /// Size of each side of the gainers/losers ranking
    pub top_n: usize,
}

impl Default for ViewParams {
    fn default() -> Self {
        Self {
            mode: ViewMode::default(),
            holdings: HoldingsQuery::default(),
            top_n: DEFAULT_TOP_N,
        }
    }
}

impl ViewParams {
    pub fn for_mode(mode: ViewMode) -> Self {
        Self {
            mode,
            ..Self::default()
        }
    }
}

/// Derived data for one screen. Sections the mode does not need are `None`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PortfolioView {
    pub mode: ViewMode,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub summary: Option<PortfolioSummary>,
    /// Absent for an empty portfolio even when the mode asks for it.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub highlights: Option<PortfolioHighlights>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub ranking: Option<PerformanceRanking>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub holdings: Option<Vec<Holding>>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub sectors: Option<Vec<Sector>>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub allocations: Option<PortfolioAllocations>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub performance: Option<PerformanceOverview>,
}

impl PortfolioView {
    pub fn empty(mode: ViewMode) -> Self {
        Self {
            mode,
            summary: None,
            highlights: None,
            ranking: None,
            holdings: None,
            sectors: None,
            allocations: None,
            performance: None,
        }
    }
}
