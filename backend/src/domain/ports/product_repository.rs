//! Driven port for product persistence.

use std::sync::Mutex;

use async_trait::async_trait;

use crate::domain::Product;

use super::define_port_error;

define_port_error! {
    /// Persistence errors raised by product repository adapters.
    pub enum ProductPersistenceError {
        /// Repository connection could not be established.
        Connection { message: String } => "product repository connection failed: {message}",
        /// Query or mutation failed during execution.
        Query { message: String } => "product repository query failed: {message}",
        /// Another product already uses this name.
        DuplicateName { name: String } => "product already exists: {name}",
    }
}

/// Product persistence.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait ProductRepository: Send + Sync {
    /// Insert a product; names are unique.
    async fn insert(&self, product: &Product) -> Result<(), ProductPersistenceError>;

    /// All products in insertion order.
    async fn list(&self) -> Result<Vec<Product>, ProductPersistenceError>;
}

/// Process-local product store used in fixture mode.
#[derive(Debug, Default)]
pub struct InMemoryProductRepository {
    products: Mutex<Vec<Product>>,
}

impl InMemoryProductRepository {
    fn lock(&self) -> Result<std::sync::MutexGuard<'_, Vec<Product>>, ProductPersistenceError> {
        self.products
            .lock()
            .map_err(|_| ProductPersistenceError::query("product store lock poisoned"))
    }
}

#[async_trait]
impl ProductRepository for InMemoryProductRepository {
    async fn insert(&self, product: &Product) -> Result<(), ProductPersistenceError> {
        let mut products = self.lock()?;
        if products.iter().any(|existing| existing.name == product.name) {
            return Err(ProductPersistenceError::duplicate_name(product.name.clone()));
        }
        products.push(product.clone());
        Ok(())
    }

    async fn list(&self) -> Result<Vec<Product>, ProductPersistenceError> {
        Ok(self.lock()?.clone())
    }
}
