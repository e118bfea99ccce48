//! Portfolio-level totals and highlight holdings.

mod summary_calculator;
mod summary_model;

pub use summary_calculator::*;
pub use summary_model::*;
