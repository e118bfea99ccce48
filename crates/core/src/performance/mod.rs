//! Historical performance timeline and trailing period returns.

mod performance_calculator;
mod performance_model;

pub use performance_calculator::*;
pub use performance_model::*;
