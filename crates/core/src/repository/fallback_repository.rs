use std::sync::Arc;

use async_trait::async_trait;
use log::warn;

use super::{PortfolioRepositoryTrait, PortfolioSnapshot};
use crate::errors::Result;

/// Tries `primary` first and switches to `fallback` when it fails or comes
/// back with no holdings. Fallback errors are returned as-is.
pub struct FallbackPortfolioRepository {
    primary: Arc<dyn PortfolioRepositoryTrait>,
    fallback: Arc<dyn PortfolioRepositoryTrait>,
}

impl FallbackPortfolioRepository {
    pub fn new(
        primary: Arc<dyn PortfolioRepositoryTrait>,
        fallback: Arc<dyn PortfolioRepositoryTrait>,
    ) -> Self {
        Self { primary, fallback }
    }
}

#[async_trait]
impl PortfolioRepositoryTrait for FallbackPortfolioRepository {
    async fn load_snapshot(&self) -> Result<PortfolioSnapshot> {
        match self.primary.load_snapshot().await {
            Ok(snapshot) if !snapshot.is_empty() => return Ok(snapshot),
            Ok(_) => warn!(
                "{} returned no holdings, using {}",
                self.primary.source_name(),
                self.fallback.source_name()
            ),
            Err(e) => warn!(
                "{} failed ({}), using {}",
                self.primary.source_name(),
                e,
                self.fallback.source_name()
            ),
        }
        self.fallback.load_snapshot().await
    }

    fn source_name(&self) -> String {
        format!(
            "{} (fallback: {})",
            self.primary.source_name(),
            self.fallback.source_name()
        )
    }
}
