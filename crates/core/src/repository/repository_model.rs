use serde::{Deserialize, Serialize};

use crate::holdings::RawHolding;
use crate::performance::PerformancePoint;
use crate::summary::AdvisoryProfile;

/// Everything a data source resolves before the engine runs: the holdings
/// collection plus the timeline and advisory configuration that travel with
/// it.
///
/// This is also the on-disk JSON document format read by
/// [`super::JsonFilePortfolioRepository`].
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, Default)]
#[serde(rename_all = "camelCase")]
pub struct PortfolioSnapshot {
    /// Name of the source the snapshot was loaded from.
    #[serde(default)]
    pub source: String,
    pub holdings: Vec<RawHolding>,
    #[serde(default)]
    pub performance: Vec<PerformancePoint>,
    #[serde(default)]
    pub advisory: AdvisoryProfile,
}

impl PortfolioSnapshot {
    pub fn is_empty(&self) -> bool {
        self.holdings.is_empty()
    }
}
