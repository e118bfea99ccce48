//! Portfolio event sink trait and implementations.

use std::sync::{Arc, Mutex, MutexGuard};

use super::PortfolioEvent;

/// Receives portfolio events.
///
/// `emit()` must be fast and non-blocking. Failing to deliver an event never
/// fails the operation that produced it.
pub trait PortfolioEventSink: Send + Sync {
    fn emit(&self, event: PortfolioEvent);

    /// Default implementation calls `emit()` for each event.
    fn emit_batch(&self, events: Vec<PortfolioEvent>) {
        for event in events {
            self.emit(event);
        }
    }
}

/// Discards every event.
#[derive(Clone, Default)]
pub struct NoOpPortfolioEventSink;

impl PortfolioEventSink for NoOpPortfolioEventSink {
    fn emit(&self, _event: PortfolioEvent) {}
}

/// Collects emitted events for inspection in tests.
#[derive(Clone, Default)]
pub struct MockPortfolioEventSink {
    events: Arc<Mutex<Vec<PortfolioEvent>>>,
}

impl MockPortfolioEventSink {
    pub fn new() -> Self {
        Self::default()
    }

    fn guard(&self) -> MutexGuard<'_, Vec<PortfolioEvent>> {
        self.events
            .lock()
            .unwrap_or_else(|poisoned| poisoned.into_inner())
    }

    /// Returns all collected events.
    pub fn events(&self) -> Vec<PortfolioEvent> {
        self.guard().clone()
    }

    pub fn clear(&self) {
        self.guard().clear();
    }

    pub fn len(&self) -> usize {
        self.guard().len()
    }

    pub fn is_empty(&self) -> bool {
        self.guard().is_empty()
    }
}

impl PortfolioEventSink for MockPortfolioEventSink {
    fn emit(&self, event: PortfolioEvent) {
        self.guard().push(event);
    }
}
