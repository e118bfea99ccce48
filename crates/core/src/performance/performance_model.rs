use chrono::NaiveDate;
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

/// Monthly observation of the portfolio against its benchmarks.
///
/// Return fields are cumulative percentages since the first observation.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PerformancePoint {
    pub date: NaiveDate,
    pub portfolio_value: Decimal,
    pub nifty50: Decimal,
    pub gold: Decimal,
    pub portfolio_return: Decimal,
    pub nifty50_return: Decimal,
    pub gold_return: Decimal,
}

/// Trailing returns for one series, in percentage points.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize, Default)]
pub struct SeriesReturns {
    #[serde(rename = "1month")]
    pub one_month: Decimal,
    #[serde(rename = "3months")]
    pub three_months: Decimal,
    #[serde(rename = "1year")]
    pub one_year: Decimal,
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize, Default)]
#[serde(rename_all = "camelCase")]
pub struct PeriodReturns {
    pub portfolio: SeriesReturns,
    pub nifty50: SeriesReturns,
    pub gold: SeriesReturns,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, Default)]
#[serde(rename_all = "camelCase")]
pub struct PerformanceOverview {
    pub timeline: Vec<PerformancePoint>,
    pub returns: PeriodReturns,
}

/// Selects one of the tracked series from a point.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Series {
    Portfolio,
    Nifty50,
    Gold,
}

impl Series {
    pub fn as_str(&self) -> &'static str {
        match self {
            Series::Portfolio => "portfolio",
            Series::Nifty50 => "nifty50",
            Series::Gold => "gold",
        }
    }
}

impl PerformancePoint {
    pub fn cumulative_return(&self, series: Series) -> Decimal {
        match series {
            Series::Portfolio => self.portfolio_return,
            Series::Nifty50 => self.nifty50_return,
            Series::Gold => self.gold_return,
        }
    }
}
