use serde::{Deserialize, Serialize};

/// Facts about the cached portfolio snapshot.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum PortfolioEvent {
    /// A fresh snapshot replaced the cached one.
    SnapshotReloaded {
        source: String,
        /// Number of holdings in the new snapshot
        holdings: usize,
    },

    /// The repository could not produce a snapshot; the previous one, if
    /// any, is still served.
    ReloadFailed { message: String },
}

impl PortfolioEvent {
    pub const SNAPSHOT_RELOADED: &'static str = "portfolio:snapshot-reloaded";
    pub const RELOAD_FAILED: &'static str = "portfolio:reload-failed";
    /// Every name [`PortfolioEvent::name`] can return.
    pub const NAMES: [&'static str; 2] = [Self::SNAPSHOT_RELOADED, Self::RELOAD_FAILED];

    pub fn snapshot_reloaded(source: impl Into<String>, holdings: usize) -> Self {
        Self::SnapshotReloaded {
            source: source.into(),
            holdings,
        }
    }

    pub fn reload_failed(message: impl Into<String>) -> Self {
        Self::ReloadFailed {
            message: message.into(),
        }
    }

    /// Event name used by transports that label their messages.
    pub fn name(&self) -> &'static str {
        match self {
            Self::SnapshotReloaded { .. } => Self::SNAPSHOT_RELOADED,
            Self::ReloadFailed { .. } => Self::RELOAD_FAILED,
        }
    }
}
