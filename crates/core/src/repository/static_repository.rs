//! Built-in sample dataset, used on its own or as the fallback source.

use async_trait::async_trait;
use chrono::NaiveDate;
use rust_decimal::Decimal;
use rust_decimal_macros::dec;

use super::{PortfolioRepositoryTrait, PortfolioSnapshot};
use crate::constants::STATIC_SOURCE_NAME;
use crate::errors::Result;
use crate::holdings::RawHolding;
use crate::performance::PerformancePoint;
use crate::summary::{AdvisoryProfile, RiskLevel};

#[derive(Debug, Clone, Default)]
pub struct StaticPortfolioRepository;

impl StaticPortfolioRepository {
    pub fn new() -> Self {
        Self
    }
}

#[async_trait]
impl PortfolioRepositoryTrait for StaticPortfolioRepository {
    async fn load_snapshot(&self) -> Result<PortfolioSnapshot> {
        Ok(sample_snapshot())
    }

    fn source_name(&self) -> String {
        STATIC_SOURCE_NAME.to_string()
    }
}

fn nse(
    symbol: &str,
    name: &str,
    quantity: i64,
    avg_price: Decimal,
    current_price: Decimal,
    sector: &str,
) -> RawHolding {
    RawHolding {
        symbol: symbol.to_string(),
        name: name.to_string(),
        quantity: Decimal::from(quantity),
        avg_price,
        current_price,
        sector: sector.to_string(),
        market_cap: "Large".to_string(),
        exchange: Some("NSE".to_string()),
    }
}

#[allow(clippy::too_many_arguments)]
fn month(
    m: u32,
    portfolio_value: Decimal,
    nifty50: Decimal,
    gold: Decimal,
    portfolio_return: Decimal,
    nifty50_return: Decimal,
    gold_return: Decimal,
) -> Option<PerformancePoint> {
    Some(PerformancePoint {
        date: NaiveDate::from_ymd_opt(2024, m, 1)?,
        portfolio_value,
        nifty50,
        gold,
        portfolio_return,
        nifty50_return,
        gold_return,
    })
}

pub fn sample_holdings() -> Vec<RawHolding> {
    vec![
        nse("RELIANCE", "Reliance Industries Ltd", 50, dec!(2450), dec!(2680.5), "Energy"),
        nse("INFY", "Infosys Limited", 100, dec!(1800), dec!(2010.75), "Technology"),
        nse("TCS", "Tata Consultancy Services", 75, dec!(3200), dec!(3450.25), "Technology"),
        nse("HDFCBANK", "HDFC Bank Limited", 80, dec!(1650), dec!(1580.3), "Banking"),
        nse("ICICIBANK", "ICICI Bank Limited", 60, dec!(1100), dec!(1235.8), "Banking"),
        nse("BHARTIARTL", "Bharti Airtel Limited", 120, dec!(850), dec!(920.45), "Telecommunications"),
        nse("ITC", "ITC Limited", 200, dec!(420), dec!(465.2), "Consumer Goods"),
        nse("BAJFINANCE", "Bajaj Finance Limited", 25, dec!(6800), dec!(7150.6), "Financial Services"),
        nse("ASIANPAINT", "Asian Paints Limited", 40, dec!(3100), dec!(2890.75), "Consumer Discretionary"),
        nse("MARUTI", "Maruti Suzuki India Ltd", 30, dec!(9500), dec!(10250.3), "Automotive"),
        nse("WIPRO", "Wipro Limited", 150, dec!(450), dec!(485.6), "Technology"),
        nse("TATAMOTORS", "Tata Motors Limited", 100, dec!(650), dec!(720.85), "Automotive"),
        nse("TECHM", "Tech Mahindra Limited", 80, dec!(1200), dec!(1145.25), "Technology"),
        nse("AXISBANK", "Axis Bank Limited", 90, dec!(980), dec!(1055.4), "Banking"),
        nse("SUNPHARMA", "Sun Pharmaceutical Industries", 60, dec!(1150), dec!(1245.3), "Healthcare"),
    ]
}

pub fn sample_timeline() -> Vec<PerformancePoint> {
    [
        month(1, dec!(1500000), dec!(21000), dec!(62000), dec!(0.0), dec!(0.0), dec!(0.0)),
        month(2, dec!(1520000), dec!(21300), dec!(61800), dec!(1.33), dec!(1.43), dec!(-0.32)),
        month(3, dec!(1540000), dec!(22100), dec!(64500), dec!(2.67), dec!(5.24), dec!(4.03)),
        month(4, dec!(1580000), dec!(22800), dec!(66200), dec!(5.33), dec!(8.57), dec!(6.77)),
        month(5, dec!(1620000), dec!(23200), dec!(68000), dec!(8.0), dec!(10.48), dec!(9.68)),
        month(6, dec!(1650000), dec!(23500), dec!(68500), dec!(10.0), dec!(11.90), dec!(10.48)),
        month(7, dec!(1680000), dec!(24100), dec!(69800), dec!(12.0), dec!(14.76), dec!(12.58)),
        month(8, dec!(1720000), dec!(24800), dec!(70200), dec!(14.67), dec!(18.10), dec!(13.23)),
        month(9, dec!(1750000), dec!(25200), dec!(71500), dec!(16.67), dec!(20.0), dec!(15.32)),
        month(10, dec!(1780000), dec!(25600), dec!(72800), dec!(18.67), dec!(21.90), dec!(17.42)),
        month(11, dec!(1820000), dec!(26100), dec!(74000), dec!(21.33), dec!(24.29), dec!(19.35)),
        month(12, dec!(1850000), dec!(26500), dec!(75200), dec!(23.33), dec!(26.19), dec!(21.29)),
    ]
    .into_iter()
    .flatten()
    .collect()
}

pub fn sample_advisory() -> AdvisoryProfile {
    AdvisoryProfile {
        diversification_score: dec!(8.2),
        risk_level: RiskLevel::Moderate,
    }
}

/// Fifteen NSE large caps with a 2024 monthly timeline.
pub fn sample_snapshot() -> PortfolioSnapshot {
    PortfolioSnapshot {
        source: STATIC_SOURCE_NAME.to_string(),
        holdings: sample_holdings(),
        performance: sample_timeline(),
        advisory: sample_advisory(),
    }
}
