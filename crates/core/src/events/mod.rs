//! Portfolio events.
//!
//! Services emit these through a [`PortfolioEventSink`] after the cached
//! snapshot changes. Runtime adapters implement the sink to forward events
//! to their own transport (the server pushes them over SSE).

mod portfolio_event;
mod sink;

pub use portfolio_event::*;
pub use sink::*;
