//! Driving port for product create and list use-cases.

use async_trait::async_trait;

use crate::domain::{Error, Product, ProductDraft, ProductId};

/// Product use-cases consumed by the HTTP adapter.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait ProductCatalogue: Send + Sync {
    /// Store a new product and return its identifier.
    async fn create(&self, draft: ProductDraft) -> Result<ProductId, Error>;

    /// Every product, oldest first.
    async fn list(&self) -> Result<Vec<Product>, Error>;
}
