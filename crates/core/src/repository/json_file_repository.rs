use std::path::{Path, PathBuf};

use async_trait::async_trait;
use log::debug;
use serde::Deserialize;

use super::{PortfolioRepositoryTrait, PortfolioSnapshot};
use crate::errors::Result;
use crate::holdings::RawHolding;

/// Accepted on-disk layouts: a full snapshot, or just the holdings array.
#[derive(Deserialize)]
#[serde(untagged)]
enum SnapshotDocument {
    Snapshot(PortfolioSnapshot),
    Holdings(Vec<RawHolding>),
}

/// Reads a snapshot document from a JSON file on every load.
#[derive(Debug, Clone)]
pub struct JsonFilePortfolioRepository {
    path: PathBuf,
}

impl JsonFilePortfolioRepository {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }
}

#[async_trait]
impl PortfolioRepositoryTrait for JsonFilePortfolioRepository {
    async fn load_snapshot(&self) -> Result<PortfolioSnapshot> {
        let bytes = tokio::fs::read(&self.path).await?;
        let mut snapshot = match serde_json::from_slice::<SnapshotDocument>(&bytes) {
            Ok(SnapshotDocument::Snapshot(snapshot)) => snapshot,
            Ok(SnapshotDocument::Holdings(holdings)) => PortfolioSnapshot {
                holdings,
                ..PortfolioSnapshot::default()
            },
            // Re-parse as the full layout so the error points at the real problem.
            Err(_) => serde_json::from_slice::<PortfolioSnapshot>(&bytes)?,
        };
        snapshot.source = self.source_name();
        debug!(
            "Loaded {} holdings from {}",
            snapshot.holdings.len(),
            self.path.display()
        );
        Ok(snapshot)
    }

    fn source_name(&self) -> String {
        format!("file:{}", self.path.display())
    }
}
