//! One consolidated derivation for every dashboard screen, selected by
//! [`ViewMode`].

mod view_builder;
mod view_model;

pub use view_builder::*;
pub use view_model::*;
