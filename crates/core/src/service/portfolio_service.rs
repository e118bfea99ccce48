use std::sync::Arc;

use async_trait::async_trait;
use log::{debug, error, info};
use tokio::sync::RwLock;

use super::PortfolioServiceTrait;
use crate::allocation::{compute_allocations, PortfolioAllocations};
use crate::errors::Result;
use crate::events::{PortfolioEvent, PortfolioEventSink};
use crate::holdings::{
    compute_all, distinct_sectors, rank_by_performance, Holding, HoldingsQuery,
    PerformanceRanking, Sector,
};
use crate::performance::{performance_overview, PerformanceOverview};
use crate::repository::{PortfolioRepositoryTrait, PortfolioSnapshot};
use crate::summary::{highlights, summarize, AdvisoryProfile, PortfolioHighlights, PortfolioSummary};
use crate::views::{build_view, PortfolioView, ViewParams};

pub struct PortfolioService {
    repository: Arc<dyn PortfolioRepositoryTrait>,
    event_sink: Arc<dyn PortfolioEventSink>,
    advisory_override: Option<AdvisoryProfile>,
    cached: RwLock<Option<Arc<PortfolioSnapshot>>>,
}

impl PortfolioService {
    pub fn new(
        repository: Arc<dyn PortfolioRepositoryTrait>,
        event_sink: Arc<dyn PortfolioEventSink>,
    ) -> Self {
        Self {
            repository,
            event_sink,
            advisory_override: None,
            cached: RwLock::new(None),
        }
    }

    /// Replaces whatever advisory profile the repository supplies.
    pub fn with_advisory(mut self, advisory: AdvisoryProfile) -> Self {
        self.advisory_override = Some(advisory);
        self
    }

    /// Loads from the repository and rejects snapshots the engine cannot
    /// derive, so a bad document never replaces a good cache. Besides the
    /// per-holding fields this checks that portfolio totals and trailing
    /// returns stay within `Decimal` range.
    async fn load(&self) -> Result<PortfolioSnapshot> {
        let mut snapshot = self.repository.load_snapshot().await?;
        let holdings = compute_all(&snapshot.holdings)?;
        summarize(&holdings, &snapshot.advisory)?;
        performance_overview(&snapshot.performance)?;
        if let Some(advisory) = &self.advisory_override {
            snapshot.advisory = advisory.clone();
        }
        Ok(snapshot)
    }

    async fn snapshot(&self) -> Result<Arc<PortfolioSnapshot>> {
        if let Some(snapshot) = self.cached.read().await.as_ref() {
            return Ok(Arc::clone(snapshot));
        }

        let mut cached = self.cached.write().await;
        // Another request may have loaded it while we waited for the lock.
        if let Some(snapshot) = cached.as_ref() {
            return Ok(Arc::clone(snapshot));
        }

        let snapshot = self.load().await.map_err(|e| {
            error!(
                "Failed to load portfolio from {}: {}",
                self.repository.source_name(),
                e
            );
            e
        })?;
        info!(
            "Loaded {} holdings from {}",
            snapshot.holdings.len(),
            snapshot.source
        );
        let snapshot = Arc::new(snapshot);
        *cached = Some(Arc::clone(&snapshot));
        Ok(snapshot)
    }

    async fn holdings(&self) -> Result<(Arc<PortfolioSnapshot>, Vec<Holding>)> {
        let snapshot = self.snapshot().await?;
        let holdings = compute_all(&snapshot.holdings)?;
        Ok((snapshot, holdings))
    }
}

#[async_trait]
impl PortfolioServiceTrait for PortfolioService {
    async fn get_holdings(&self, query: &HoldingsQuery) -> Result<Vec<Holding>> {
        let (_, holdings) = self.holdings().await?;
        Ok(query.apply(&holdings))
    }

    async fn get_allocations(&self) -> Result<PortfolioAllocations> {
        let (_, holdings) = self.holdings().await?;
        compute_allocations(&holdings)
    }

    async fn get_performance(&self) -> Result<PerformanceOverview> {
        let snapshot = self.snapshot().await?;
        performance_overview(&snapshot.performance)
    }

    async fn get_summary(&self) -> Result<PortfolioSummary> {
        let (snapshot, holdings) = self.holdings().await?;
        summarize(&holdings, &snapshot.advisory)
    }

    async fn get_highlights(&self) -> Result<PortfolioHighlights> {
        let (_, holdings) = self.holdings().await?;
        highlights(&holdings)
    }

    async fn get_top_performers(&self, n: usize) -> Result<PerformanceRanking> {
        let (_, holdings) = self.holdings().await?;
        Ok(rank_by_performance(&holdings, n))
    }

    async fn get_sectors(&self) -> Result<Vec<Sector>> {
        let (_, holdings) = self.holdings().await?;
        Ok(distinct_sectors(&holdings))
    }

    async fn get_view(&self, params: &ViewParams) -> Result<PortfolioView> {
        let snapshot = self.snapshot().await?;
        build_view(&snapshot, params)
    }

    async fn reload(&self) -> Result<usize> {
        debug!("Reloading portfolio from {}", self.repository.source_name());
        match self.load().await {
            Ok(snapshot) => {
                let count = snapshot.holdings.len();
                let event = PortfolioEvent::snapshot_reloaded(snapshot.source.clone(), count);
                *self.cached.write().await = Some(Arc::new(snapshot));
                info!("Portfolio reloaded with {} holdings", count);
                self.event_sink.emit(event);
                Ok(count)
            }
            Err(e) => {
                error!("Portfolio reload failed: {}", e);
                self.event_sink
                    .emit(PortfolioEvent::reload_failed(e.to_string()));
                Err(e)
            }
        }
    }

    async fn current_source(&self) -> Option<String> {
        self.cached
            .read()
            .await
            .as_ref()
            .map(|snapshot| snapshot.source.clone())
    }
}
