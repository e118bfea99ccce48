use std::time::Duration;

use async_trait::async_trait;
use log::debug;

use super::{PortfolioRepositoryTrait, PortfolioSnapshot};
use crate::errors::{Error, Result};
use crate::holdings::RawHolding;

const DEFAULT_TIMEOUT: Duration = Duration::from_secs(10);

/// Fetches holdings from a remote portfolio API.
///
/// Only `GET {base}/portfolio/holdings` is consulted, so the returned
/// snapshot has no timeline and the default advisory profile. Derived fields
/// in the response are ignored and recomputed locally.
#[derive(Debug, Clone)]
pub struct RemotePortfolioRepository {
    base_url: String,
    client: reqwest::Client,
}

impl RemotePortfolioRepository {
    pub fn new(base_url: impl Into<String>) -> Result<Self> {
        let client = reqwest::Client::builder()
            .timeout(DEFAULT_TIMEOUT)
            .build()?;
        Ok(Self::with_client(base_url, client))
    }

    pub fn with_client(base_url: impl Into<String>, client: reqwest::Client) -> Self {
        let base_url = base_url.into().trim_end_matches('/').to_string();
        Self { base_url, client }
    }

    pub fn holdings_url(&self) -> String {
        format!("{}/portfolio/holdings", self.base_url)
    }
}

#[async_trait]
impl PortfolioRepositoryTrait for RemotePortfolioRepository {
    async fn load_snapshot(&self) -> Result<PortfolioSnapshot> {
        let url = self.holdings_url();
        let response = self.client.get(&url).send().await?;

        let status = response.status();
        if !status.is_success() {
            return Err(Error::Repository(format!(
                "GET {} returned {}",
                url, status
            )));
        }

        let holdings: Vec<RawHolding> = response.json().await?;
        debug!("Fetched {} holdings from {}", holdings.len(), url);

        Ok(PortfolioSnapshot {
            source: self.source_name(),
            holdings,
            ..PortfolioSnapshot::default()
        })
    }

    fn source_name(&self) -> String {
        format!("remote:{}", self.base_url)
    }
}
