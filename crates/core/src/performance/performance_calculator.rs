use rust_decimal::Decimal;

use super::{PerformanceOverview, PerformancePoint, PeriodReturns, Series, SeriesReturns};
use crate::errors::{Error, Result};

/// Difference between the latest cumulative return and the one `lookback`
/// observations earlier. Zero when the timeline is too short.
fn trailing(timeline: &[PerformancePoint], series: Series, lookback: usize) -> Result<Decimal> {
    let Some(start) = timeline.len().checked_sub(lookback + 1) else {
        return Ok(Decimal::ZERO);
    };
    let latest = &timeline[timeline.len() - 1];
    latest
        .cumulative_return(series)
        .checked_sub(timeline[start].cumulative_return(series))
        .ok_or_else(|| {
            Error::Overflow(format!(
                "{} return between {} and {}",
                series.as_str(),
                timeline[start].date,
                latest.date
            ))
        })
}

fn series_returns(timeline: &[PerformancePoint], series: Series) -> Result<SeriesReturns> {
    Ok(SeriesReturns {
        one_month: trailing(timeline, series, 1)?,
        three_months: trailing(timeline, series, 3)?,
        one_year: timeline
            .last()
            .map(|p| p.cumulative_return(series))
            .unwrap_or(Decimal::ZERO),
    })
}

/// Trailing one-month, three-month and one-year returns for every series of
/// a chronologically ordered monthly timeline.
pub fn period_returns(timeline: &[PerformancePoint]) -> Result<PeriodReturns> {
    Ok(PeriodReturns {
        portfolio: series_returns(timeline, Series::Portfolio)?,
        nifty50: series_returns(timeline, Series::Nifty50)?,
        gold: series_returns(timeline, Series::Gold)?,
    })
}

/// Orders the timeline by date and attaches its period returns.
pub fn performance_overview(timeline: &[PerformancePoint]) -> Result<PerformanceOverview> {
    let mut ordered = timeline.to_vec();
    ordered.sort_by_key(|p| p.date);
    let returns = period_returns(&ordered)?;
    Ok(PerformanceOverview {
        timeline: ordered,
        returns,
    })
}
