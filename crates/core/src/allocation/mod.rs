//! Portfolio allocation breakdowns by sector and market cap.

mod allocation_calculator;
mod allocation_model;

pub use allocation_calculator::*;
pub use allocation_model::*;
