//! Application-facing service: caches the resolved snapshot and answers
//! every dashboard query from it.

mod portfolio_service;
mod portfolio_service_traits;

pub use portfolio_service::*;
pub use portfolio_service_traits::*;

#[cfg(test)]
mod portfolio_service_tests;
