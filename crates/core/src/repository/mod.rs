//! Data sources that resolve a [`PortfolioSnapshot`] for the engine.

mod fallback_repository;
mod json_file_repository;
mod remote_repository;
mod repository_model;
mod repository_traits;
mod static_repository;

pub use fallback_repository::*;
pub use json_file_repository::*;
pub use remote_repository::*;
pub use repository_model::*;
pub use repository_traits::*;
pub use static_repository::*;
