//! Wire types for the portfolio routes. Monetary and percentage fields are
//! rounded to two decimal places here and nowhere else.

use std::str::FromStr;

use chrono::NaiveDate;
use portfolio_analytics_core::{
    allocation::{MarketCapAllocationEntry, PortfolioAllocations, SectorAllocationEntry},
    constants::{DEFAULT_TOP_N, DISPLAY_DECIMAL_PRECISION},
    holdings::{
        Holding, HoldingsFilter, HoldingsQuery, MarketCap, PerformanceRanking, Sector, SortField,
        SortOrder,
    },
    performance::{PerformanceOverview, PerformancePoint, PeriodReturns, SeriesReturns},
    summary::{PortfolioHighlights, PortfolioSummary, RiskLevel},
    views::{PortfolioView, ViewMode, ViewParams},
};
use rust_decimal::{Decimal, RoundingStrategy};
use serde::{ser::SerializeMap, Deserialize, Serialize, Serializer};

use crate::error::{ApiError, ApiResult};

fn round2(value: Decimal) -> Decimal {
    value.round_dp_with_strategy(
        DISPLAY_DECIMAL_PRECISION,
        RoundingStrategy::MidpointAwayFromZero,
    )
}

// ---------------------------------------------------------------------------
// Query parameters
// ---------------------------------------------------------------------------

#[derive(Debug, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct HoldingsParams {
    pub sort_by: Option<String>,
    pub order: Option<String>,
    pub search: Option<String>,
    /// Sector label; `all` or blank disables the filter.
    pub sector: Option<String>,
    pub limit: Option<String>,
}

impl HoldingsParams {
    pub fn to_query(&self) -> ApiResult<HoldingsQuery> {
        let sort_field = match self.sort_by.as_deref() {
            Some(raw) => SortField::from_str(raw)?,
            None => SortField::default(),
        };
        let sort_order = match self.order.as_deref() {
            Some(raw) => SortOrder::from_str(raw)?,
            None => SortOrder::default(),
        };
        let sector = match self.sector.as_deref().map(str::trim) {
            None | Some("") => None,
            Some(raw) if raw.eq_ignore_ascii_case("all") => None,
            Some(raw) => Some(Sector::from_str(raw).map_err(ApiError::BadRequest)?),
        };
        let limit = self
            .limit
            .as_deref()
            .map(|raw| parse_count("limit", raw))
            .transpose()?;

        Ok(HoldingsQuery {
            sort_field,
            sort_order,
            filter: HoldingsFilter {
                sector,
                search: self.search.clone(),
            },
            limit,
        })
    }
}

fn parse_count(name: &str, raw: &str) -> ApiResult<usize> {
    raw.trim().parse::<usize>().map_err(|_| {
        ApiError::BadRequest(format!(
            "{} must be a non-negative integer, got '{}'",
            name, raw
        ))
    })
}

#[derive(Debug, Default, Deserialize)]
pub struct TopPerformersParams {
    pub n: Option<String>,
}

impl TopPerformersParams {
    pub fn count(&self) -> ApiResult<usize> {
        match self.n.as_deref() {
            Some(raw) => parse_count("n", raw),
            None => Ok(DEFAULT_TOP_N),
        }
    }
}

#[derive(Debug, Default, Deserialize)]
pub struct ViewQueryParams {
    pub mode: Option<String>,
    pub n: Option<String>,
    #[serde(flatten)]
    pub holdings: HoldingsParams,
}

impl ViewQueryParams {
    pub fn to_params(&self) -> ApiResult<ViewParams> {
        let mode = match self.mode.as_deref() {
            Some(raw) => ViewMode::from_str(raw)?,
            None => ViewMode::default(),
        };
        let top_n = TopPerformersParams { n: self.n.clone() }.count()?;
        Ok(ViewParams {
            mode,
            holdings: self.holdings.to_query()?,
            top_n,
        })
    }
}

// ---------------------------------------------------------------------------
// Responses
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct HoldingDto {
    pub symbol: String,
    pub name: String,
    pub quantity: Decimal,
    pub avg_price: Decimal,
    pub current_price: Decimal,
    pub sector: Sector,
    pub market_cap: MarketCap,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub exchange: Option<String>,
    pub value: Decimal,
    pub cost_basis: Decimal,
    pub gain_loss: Decimal,
    pub gain_loss_percent: Decimal,
}

impl From<&Holding> for HoldingDto {
    fn from(h: &Holding) -> Self {
        Self {
            symbol: h.symbol.clone(),
            name: h.name.clone(),
            quantity: h.quantity,
            avg_price: round2(h.avg_price),
            current_price: round2(h.current_price),
            sector: h.sector,
            market_cap: h.market_cap,
            exchange: h.exchange.clone(),
            value: round2(h.value),
            cost_basis: round2(h.cost_basis),
            gain_loss: round2(h.gain_loss),
            gain_loss_percent: round2(h.gain_loss_percent),
        }
    }
}

pub fn holdings_dto(holdings: &[Holding]) -> Vec<HoldingDto> {
    holdings.iter().map(HoldingDto::from).collect()
}

#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct AllocationSliceDto {
    pub value: Decimal,
    pub percentage: Decimal,
    pub holdings_count: usize,
}

/// Label-keyed JSON object that keeps the engine's value-descending order.
#[derive(Debug, Clone, Default)]
pub struct AllocationMap(Vec<(&'static str, AllocationSliceDto)>);

impl AllocationMap {
    pub fn labels(&self) -> Vec<&'static str> {
        self.0.iter().map(|(label, _)| *label).collect()
    }
}

impl Serialize for AllocationMap {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        let mut map = serializer.serialize_map(Some(self.0.len()))?;
        for (label, slice) in &self.0 {
            map.serialize_entry(label, slice)?;
        }
        map.end()
    }
}

impl From<&[SectorAllocationEntry]> for AllocationMap {
    fn from(entries: &[SectorAllocationEntry]) -> Self {
        Self(
            entries
                .iter()
                .map(|e| {
                    (
                        e.sector.as_str(),
                        AllocationSliceDto {
                            value: round2(e.value),
                            percentage: round2(e.percentage),
                            holdings_count: e.holdings_count,
                        },
                    )
                })
                .collect(),
        )
    }
}

impl From<&[MarketCapAllocationEntry]> for AllocationMap {
    fn from(entries: &[MarketCapAllocationEntry]) -> Self {
        Self(
            entries
                .iter()
                .map(|e| {
                    (
                        e.market_cap.as_str(),
                        AllocationSliceDto {
                            value: round2(e.value),
                            percentage: round2(e.percentage),
                            holdings_count: e.holdings_count,
                        },
                    )
                })
                .collect(),
        )
    }
}

#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct AllocationResponse {
    pub by_sector: AllocationMap,
    pub by_market_cap: AllocationMap,
    pub total_value: Decimal,
}

impl From<&PortfolioAllocations> for AllocationResponse {
    fn from(a: &PortfolioAllocations) -> Self {
        Self {
            by_sector: AllocationMap::from(a.by_sector.as_slice()),
            by_market_cap: AllocationMap::from(a.by_market_cap.as_slice()),
            total_value: round2(a.total_value),
        }
    }
}

#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct PerformancePointDto {
    pub date: NaiveDate,
    pub portfolio_value: Decimal,
    pub nifty50: Decimal,
    pub gold: Decimal,
    pub portfolio_return: Decimal,
    pub nifty50_return: Decimal,
    pub gold_return: Decimal,
}

impl From<&PerformancePoint> for PerformancePointDto {
    fn from(p: &PerformancePoint) -> Self {
        Self {
            date: p.date,
            portfolio_value: round2(p.portfolio_value),
            nifty50: round2(p.nifty50),
            gold: round2(p.gold),
            portfolio_return: round2(p.portfolio_return),
            nifty50_return: round2(p.nifty50_return),
            gold_return: round2(p.gold_return),
        }
    }
}

fn round_series(s: &SeriesReturns) -> SeriesReturns {
    SeriesReturns {
        one_month: round2(s.one_month),
        three_months: round2(s.three_months),
        one_year: round2(s.one_year),
    }
}

#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct PerformanceResponse {
    pub timeline: Vec<PerformancePointDto>,
    pub returns: PeriodReturns,
}

impl From<&PerformanceOverview> for PerformanceResponse {
    fn from(o: &PerformanceOverview) -> Self {
        Self {
            timeline: o.timeline.iter().map(PerformancePointDto::from).collect(),
            returns: PeriodReturns {
                portfolio: round_series(&o.returns.portfolio),
                nifty50: round_series(&o.returns.nifty50),
                gold: round_series(&o.returns.gold),
            },
        }
    }
}

#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct SummaryResponse {
    pub total_value: Decimal,
    pub total_invested: Decimal,
    pub total_gain_loss: Decimal,
    pub total_gain_loss_percent: Decimal,
    pub number_of_holdings: usize,
    pub diversification_score: Decimal,
    pub risk_level: RiskLevel,
    pub top_gainer: Option<HoldingDto>,
    pub top_loser: Option<HoldingDto>,
}

impl SummaryResponse {
    pub fn new(summary: &PortfolioSummary, highlights: Option<&PortfolioHighlights>) -> Self {
        Self {
            total_value: round2(summary.total_value),
            total_invested: round2(summary.total_invested),
            total_gain_loss: round2(summary.total_gain_loss),
            total_gain_loss_percent: round2(summary.total_gain_loss_percent),
            number_of_holdings: summary.number_of_holdings,
            diversification_score: summary.diversification_score,
            risk_level: summary.risk_level,
            top_gainer: highlights.map(|h| HoldingDto::from(&h.best_performer)),
            top_loser: highlights.map(|h| HoldingDto::from(&h.worst_performer)),
        }
    }
}

#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct HighlightsDto {
    pub best_performer: HoldingDto,
    pub worst_performer: HoldingDto,
    pub highest_value: HoldingDto,
    pub lowest_value: HoldingDto,
    pub gaining_count: usize,
    pub losing_count: usize,
    pub unchanged_count: usize,
}

impl From<&PortfolioHighlights> for HighlightsDto {
    fn from(h: &PortfolioHighlights) -> Self {
        Self {
            best_performer: HoldingDto::from(&h.best_performer),
            worst_performer: HoldingDto::from(&h.worst_performer),
            highest_value: HoldingDto::from(&h.highest_value),
            lowest_value: HoldingDto::from(&h.lowest_value),
            gaining_count: h.gaining_count,
            losing_count: h.losing_count,
            unchanged_count: h.unchanged_count,
        }
    }
}

#[derive(Debug, Clone, Serialize)]
pub struct RankingDto {
    pub top: Vec<HoldingDto>,
    pub bottom: Vec<HoldingDto>,
}

impl From<&PerformanceRanking> for RankingDto {
    fn from(r: &PerformanceRanking) -> Self {
        Self {
            top: holdings_dto(&r.top),
            bottom: holdings_dto(&r.bottom),
        }
    }
}

#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ViewResponse {
    pub mode: ViewMode,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub summary: Option<SummaryResponse>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub highlights: Option<HighlightsDto>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub ranking: Option<RankingDto>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub holdings: Option<Vec<HoldingDto>>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub sectors: Option<Vec<Sector>>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub allocations: Option<AllocationResponse>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub performance: Option<PerformanceResponse>,
}

impl From<&PortfolioView> for ViewResponse {
    fn from(v: &PortfolioView) -> Self {
        Self {
            mode: v.mode,
            summary: v
                .summary
                .as_ref()
                .map(|s| SummaryResponse::new(s, v.highlights.as_ref())),
            highlights: v.highlights.as_ref().map(HighlightsDto::from),
            ranking: v.ranking.as_ref().map(RankingDto::from),
            holdings: v.holdings.as_deref().map(holdings_dto),
            sectors: v.sectors.clone(),
            allocations: v.allocations.as_ref().map(AllocationResponse::from),
            performance: v.performance.as_ref().map(PerformanceResponse::from),
        }
    }
}
