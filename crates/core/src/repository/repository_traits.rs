use async_trait::async_trait;

use super::PortfolioSnapshot;
use crate::errors::Result;

/// Data-access boundary in front of the engine.
///
/// Implementations resolve a complete snapshot; the engine never imports a
/// dataset of its own.
#[async_trait]
pub trait PortfolioRepositoryTrait: Send + Sync {
    /// Loads the current snapshot. The returned `source` field names the
    /// repository that actually produced it.
    async fn load_snapshot(&self) -> Result<PortfolioSnapshot>;

    /// Short human-readable name used in logs.
    fn source_name(&self) -> String;
}
