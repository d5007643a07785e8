//! PostgreSQL-backed `ProductRepository` adapter.

use async_trait::async_trait;
use diesel::prelude::*;
use diesel_async::RunQueryDsl;

use crate::domain::ports::{ProductPersistenceError, ProductRepository};
use crate::domain::{Product, ProductId};

use super::diesel_helpers::{DieselFailure, classify_diesel_error};
use super::models::{NewProductRow, ProductRow};
use super::pool::{DbPool, PoolError};
use super::schema::products;

/// Diesel-backed implementation of the product port.
#[derive(Clone)]
pub struct DieselProductRepository {
    pool: DbPool,
}

impl DieselProductRepository {
    pub fn new(pool: DbPool) -> Self {
        Self { pool }
    }
}

fn map_pool_error(error: PoolError) -> ProductPersistenceError {
    ProductPersistenceError::connection(error.into_message())
}

fn map_diesel_error(
    error: diesel::result::Error,
    operation: &str,
    name: &str,
) -> ProductPersistenceError {
    match classify_diesel_error(error, operation) {
        DieselFailure::UniqueViolation { .. } => ProductPersistenceError::duplicate_name(name),
        DieselFailure::Connection(message) => ProductPersistenceError::connection(message),
        DieselFailure::Query(message) => ProductPersistenceError::query(message),
    }
}

impl From<ProductRow> for Product {
    fn from(row: ProductRow) -> Self {
        Self {
            id: ProductId::from(row.id),
            name: row.name,
            description: row.description,
            price: row.price,
            category: row.category,
            stock: row.stock,
            image_url: row.image_url,
        }
    }
}

#[async_trait]
impl ProductRepository for DieselProductRepository {
    async fn insert(&self, product: &Product) -> Result<(), ProductPersistenceError> {
        let mut conn = self.pool.get().await.map_err(map_pool_error)?;
        let row = NewProductRow {
            id: *product.id.as_uuid(),
            name: &product.name,
            description: &product.description,
            price: product.price,
            category: &product.category,
            stock: product.stock,
            image_url: &product.image_url,
        };
        diesel::insert_into(products::table)
            .values(&row)
            .execute(&mut conn)
            .await
            .map(|_| ())
            .map_err(|err| map_diesel_error(err, "insert product", &product.name))
    }

    async fn list(&self) -> Result<Vec<Product>, ProductPersistenceError> {
        let mut conn = self.pool.get().await.map_err(map_pool_error)?;
        let rows: Vec<ProductRow> = products::table
            .select(ProductRow::as_select())
            .order_by((products::created_at.asc(), products::id.asc()))
            .load(&mut conn)
            .await
            .map_err(|err| map_diesel_error(err, "list products", ""))?;
        Ok(rows.into_iter().map(Product::from).collect())
    }
}
