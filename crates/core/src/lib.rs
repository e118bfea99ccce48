//! Portfolio Analytics Core - the holdings aggregation engine.
//!
//! Every dashboard view is re-derived from one holdings collection: derived
//! valuation fields, sorting and filtering, sector and market cap
//! allocation, portfolio totals, highlights and trailing returns. The pure
//! derivations live in `holdings`, `allocation`, `summary`, `performance`
//! and `views`; `repository` and `service` resolve and cache the snapshot
//! they run over.

pub mod allocation;
pub mod constants;
pub mod errors;
pub mod events;
pub mod holdings;
pub mod performance;
pub mod repository;
pub mod service;
pub mod summary;
pub mod views;

#[cfg(test)]
mod test_support;

pub use holdings::*;
pub use service::*;

// Re-export error types
pub use errors::Error;
pub use errors::Result;
