//! Product catalogue handlers. Both routes require a bearer token.
//!
//! ```text
//! POST /products {"name":"Kopi","description":"","price":25000,"category":"drinks","stock":3,"image_url":""}
//! GET  /products
//! ```

use actix_web::{HttpResponse, get, post, web};
use serde::{Deserialize, Serialize};
use serde_json::json;
use tracing::info;
use utoipa::ToSchema;
use uuid::Uuid;

use crate::domain::{Error, Product, ProductDraft, ProductValidationError};
use crate::inbound::http::ApiResult;
use crate::inbound::http::bearer::Authenticated;
use crate::inbound::http::schemas::{ErrorSchema, ProductSchema};
use crate::inbound::http::state::HttpState;

/// Request body for `POST /products`.
#[derive(Debug, Deserialize, Serialize, ToSchema)]
pub struct CreateProductRequest {
    #[schema(example = "Kopi Susu")]
    pub name: String,
    #[serde(default)]
    pub description: String,
    #[schema(example = 25000.0)]
    pub price: f64,
    #[serde(default)]
    pub category: String,
    #[serde(default)]
    pub stock: i64,
    #[serde(default)]
    pub image_url: String,
}

impl TryFrom<CreateProductRequest> for ProductDraft {
    type Error = ProductValidationError;

    fn try_from(value: CreateProductRequest) -> Result<Self, Self::Error> {
        Self::try_from_parts(
            &value.name,
            &value.description,
            value.price,
            &value.category,
            value.stock,
            &value.image_url,
        )
    }
}

/// Body returned after a product is stored.
#[derive(Debug, Deserialize, Serialize, ToSchema)]
pub struct ProductCreatedResponse {
    pub message: String,
    #[schema(value_type = String, format = "uuid")]
    pub product_id: Uuid,
}

/// Envelope for the product listing.
#[derive(Debug, Serialize, ToSchema)]
pub struct ProductListResponse {
    #[schema(example = "success")]
    pub status: String,
    pub message: String,
    #[schema(value_type = Vec<ProductSchema>)]
    pub data: Vec<Product>,
}

fn map_product_validation_error(err: ProductValidationError) -> Error {
    let field = err.field();
    Error::invalid_request(err.to_string()).with_details(json!({ "field": field }))
}

/// Add a product to the catalogue.
#[utoipa::path(
    post,
    path = "/products",
    request_body = CreateProductRequest,
    responses(
        (status = 201, description = "Product created", body = ProductCreatedResponse),
        (status = 400, description = "Invalid request or duplicate product", body = ErrorSchema),
        (status = 401, description = "Missing or invalid bearer token", body = ErrorSchema),
        (status = 500, description = "Internal server error", body = ErrorSchema)
    ),
    tags = ["products"],
    operation_id = "createProduct",
    security(("bearerAuth" = []))
)]
#[post("/products")]
pub async fn create_product(
    state: web::Data<HttpState>,
    caller: Authenticated,
    payload: web::Json<CreateProductRequest>,
) -> ApiResult<HttpResponse> {
    let draft = ProductDraft::try_from(payload.into_inner()).map_err(map_product_validation_error)?;
    let id = state.products.create(draft).await?;
    info!(user_id = %caller.claims().sub, product_id = %id, "product created");
    Ok(HttpResponse::Created().json(ProductCreatedResponse {
        message: "Product created successfully".to_owned(),
        product_id: *id.as_uuid(),
    }))
}

/// List every product.
#[utoipa::path(
    get,
    path = "/products",
    responses(
        (status = 200, description = "All products", body = ProductListResponse),
        (status = 401, description = "Missing or invalid bearer token", body = ErrorSchema),
        (status = 500, description = "Internal server error", body = ErrorSchema)
    ),
    tags = ["products"],
    operation_id = "listProducts",
    security(("bearerAuth" = []))
)]
#[get("/products")]
pub async fn list_products(
    state: web::Data<HttpState>,
    caller: Authenticated,
) -> ApiResult<web::Json<ProductListResponse>> {
    let data = state.products.list().await?;
    info!(user_id = %caller.claims().sub, count = data.len(), "products listed");
    Ok(web::Json(ProductListResponse {
        status: "success".to_owned(),
        message: "Products fetched successfully".to_owned(),
        data,
    }))
}
