//! Holdings: validated positions and the list operations every view derives
//! from them.

mod holdings_model;
mod holdings_query;

pub use holdings_model::*;
pub use holdings_query::*;
