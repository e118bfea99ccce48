use std::fmt;
use std::str::FromStr;

use rust_decimal::Decimal;
use rust_decimal_macros::dec;
use serde::{Deserialize, Serialize};

use crate::errors::Error;
use crate::holdings::Holding;

/// Advisory risk label. Supplied by configuration, never computed.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
pub enum RiskLevel {
    Low,
    #[default]
    Moderate,
    High,
}

impl RiskLevel {
    pub fn as_str(&self) -> &'static str {
        match self {
            RiskLevel::Low => "Low",
            RiskLevel::Moderate => "Moderate",
            RiskLevel::High => "High",
        }
    }
}

impl fmt::Display for RiskLevel {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for RiskLevel {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "low" => Ok(RiskLevel::Low),
            "moderate" | "medium" => Ok(RiskLevel::Moderate),
            "high" => Ok(RiskLevel::High),
            other => Err(Error::Config(format!("unknown risk level '{}'", other))),
        }
    }
}

/// Externally supplied advisory fields carried into the summary verbatim.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AdvisoryProfile {
    pub diversification_score: Decimal,
    pub risk_level: RiskLevel,
}

impl Default for AdvisoryProfile {
    fn default() -> Self {
        Self {
            diversification_score: dec!(0),
            risk_level: RiskLevel::default(),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PortfolioSummary {
    pub total_value: Decimal,
    pub total_invested: Decimal,
    pub total_gain_loss: Decimal,
    pub total_gain_loss_percent: Decimal,
    pub number_of_holdings: usize,
    pub diversification_score: Decimal,
    pub risk_level: RiskLevel,
}

/// Notable holdings for overview cards.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PortfolioHighlights {
    pub best_performer: Holding,
    pub worst_performer: Holding,
    pub highest_value: Holding,
    pub lowest_value: Holding,
    pub gaining_count: usize,
    pub losing_count: usize,
    pub unchanged_count: usize,
}
