//! Product service implementing the [`ProductCatalogue`] driving port.

use std::sync::Arc;

use async_trait::async_trait;
use serde_json::json;
use tracing::{error, info};

use crate::domain::ports::{ProductCatalogue, ProductPersistenceError, ProductRepository};
use crate::domain::{Error, Product, ProductDraft, ProductId};

fn map_product_persistence_error(err: ProductPersistenceError) -> Error {
    match err {
        ProductPersistenceError::DuplicateName { .. } => {
            Error::invalid_request("product already exists").with_details(json!({ "field": "name" }))
        }
        other => {
            error!(error = %other, "product repository call failed");
            Error::internal("product store unavailable")
        }
    }
}

/// Product create/list over a [`ProductRepository`].
#[derive(Clone)]
pub struct ProductService {
    repo: Arc<dyn ProductRepository>,
}

impl ProductService {
    /// Service over the given repository.
    pub fn new(repo: Arc<dyn ProductRepository>) -> Self {
        Self { repo }
    }
}

#[async_trait]
impl ProductCatalogue for ProductService {
    async fn create(&self, draft: ProductDraft) -> Result<ProductId, Error> {
        let id = ProductId::random();
        let product = draft.into_product(id);
        self.repo
            .insert(&product)
            .await
            .map_err(map_product_persistence_error)?;
        info!(product_id = %id, name = %product.name, "product created");
        Ok(id)
    }

    async fn list(&self) -> Result<Vec<Product>, Error> {
        self.repo.list().await.map_err(map_product_persistence_error)
    }
}
