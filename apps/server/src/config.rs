use std::{net::SocketAddr, path::PathBuf, str::FromStr, time::Duration};

use anyhow::{anyhow, Context};
use portfolio_analytics_core::summary::{AdvisoryProfile, RiskLevel};
use rust_decimal::Decimal;

const DEFAULT_LISTEN_ADDR: &str = "0.0.0.0:8000";
const DEFAULT_TIMEOUT_MS: u64 = 30_000;

#[derive(Debug, Clone)]
pub struct Config {
    pub listen_addr: SocketAddr,
    pub cors_allow: Vec<String>,
    pub request_timeout: Duration,
    /// JSON snapshot document tried before the built-in dataset
    pub data_file: Option<PathBuf>,
    /// Base URL of a remote portfolio API, tried before the data file
    pub remote_url: Option<String>,
    /// Replaces the advisory profile of whichever source serves the data
    pub advisory: Option<AdvisoryProfile>,
}

impl Config {
    /// Reads `PA_*` variables from the process environment, loading `.env`
    /// first when present.
    pub fn from_env() -> anyhow::Result<Self> {
        dotenvy::dotenv().ok();
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    pub fn from_lookup<F>(lookup: F) -> anyhow::Result<Self>
    where
        F: Fn(&str) -> Option<String>,
    {
        let var = |key: &str| {
            lookup(key)
                .map(|v| v.trim().to_string())
                .filter(|v| !v.is_empty())
        };

        let listen_addr: SocketAddr = var("PA_LISTEN_ADDR")
            .unwrap_or_else(|| DEFAULT_LISTEN_ADDR.to_string())
            .parse()
            .context("Invalid PA_LISTEN_ADDR")?;
        let cors_allow = var("PA_CORS_ALLOW_ORIGINS")
            .unwrap_or_else(|| "*".into())
            .split(',')
            .map(|s| s.trim().to_string())
            .filter(|s| !s.is_empty())
            .collect();
        let timeout_ms: u64 = match var("PA_REQUEST_TIMEOUT_MS") {
            Some(raw) => raw.parse().context("Invalid PA_REQUEST_TIMEOUT_MS")?,
            None => DEFAULT_TIMEOUT_MS,
        };

        let score = var("PA_DIVERSIFICATION_SCORE")
            .map(|raw| Decimal::from_str(&raw).context("Invalid PA_DIVERSIFICATION_SCORE"))
            .transpose()?;
        if let Some(score) = score {
            if score.is_sign_negative() {
                return Err(anyhow!("PA_DIVERSIFICATION_SCORE must not be negative"));
            }
        }
        let risk = var("PA_RISK_LEVEL")
            .map(|raw| RiskLevel::from_str(&raw).context("Invalid PA_RISK_LEVEL"))
            .transpose()?;
        let advisory = match (score, risk) {
            (None, None) => None,
            (score, risk) => {
                let defaults = AdvisoryProfile::default();
                Some(AdvisoryProfile {
                    diversification_score: score.unwrap_or(defaults.diversification_score),
                    risk_level: risk.unwrap_or(defaults.risk_level),
                })
            }
        };

        Ok(Self {
            listen_addr,
            cors_allow,
            request_timeout: Duration::from_millis(timeout_ms),
            data_file: var("PA_DATA_FILE").map(PathBuf::from),
            remote_url: var("PA_REMOTE_URL"),
            advisory,
        })
    }
}

impl Default for Config {
    fn default() -> Self {
        Self {
            listen_addr: SocketAddr::from(([0, 0, 0, 0], 8000)),
            cors_allow: vec!["*".to_string()],
            request_timeout: Duration::from_millis(DEFAULT_TIMEOUT_MS),
            data_file: None,
            remote_url: None,
            advisory: None,
        }
    }
}
