//! Error type of the whole crate
//!
//! Every module has its own error enum. [`PlannerError`] wraps any of them
//! for the operations that cross modules.

use thiserror::Error;

pub use crate::{catalog::CatalogError, config::ConfigError, scale::ScaleError};

/// Any error from the planner
#[derive(Debug, Error)]
pub enum PlannerError {
    #[error(transparent)]
    Catalog(#[from] CatalogError),
    #[error(transparent)]
    Config(#[from] ConfigError),
    #[error(transparent)]
    Scale(#[from] ScaleError),
}

impl PlannerError {
    /// Check if retrying later could work
    pub fn is_transient(&self) -> bool {
        matches!(self, PlannerError::Catalog(CatalogError::Unavailable { .. }))
    }
}
