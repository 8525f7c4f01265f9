use thiserror::Error;

use crate::models::{PartId, ProductId};
use crate::validation::FormErrors;

/// Errors raised by inventory operations
#[derive(Error, Debug, Clone, PartialEq)]
pub enum InventoryError {
    #[error("{0}")]
    Validation(#[from] FormErrors),

    #[error("Part not found: {0}")]
    PartNotFound(PartId),

    #[error("Product not found: {0}")]
    ProductNotFound(ProductId),

    #[error("A product cannot be deleted if it contains associated parts.")]
    HasAssociatedParts(ProductId),
}

pub type Result<T> = std::result::Result<T, InventoryError>;
