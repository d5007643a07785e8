//! OpenAPI schema definitions for domain and GeoJSON types.
//!
//! Domain types stay framework-agnostic by not deriving `ToSchema`, and the
//! `geojson` crate has no utoipa support. The wrappers here mirror the wire
//! shape of those types and are registered under the original names.

use utoipa::ToSchema;

/// OpenAPI schema for [`crate::domain::ErrorCode`].
///
/// Stable machine-readable error codes returned in API error responses.
#[derive(ToSchema)]
#[schema(as = crate::domain::ErrorCode)]
pub enum ErrorCodeSchema {
    /// The request is malformed or fails validation.
    #[schema(rename = "invalid_request")]
    InvalidRequest,
    /// Authentication failed or is missing.
    #[schema(rename = "unauthorized")]
    Unauthorized,
    /// Nothing matched the request.
    #[schema(rename = "not_found")]
    NotFound,
    /// An unexpected error occurred on the server.
    #[schema(rename = "internal_error")]
    InternalError,
}

/// OpenAPI schema for [`crate::domain::Error`].
#[derive(ToSchema)]
#[schema(as = crate::domain::Error)]
#[schema(rename_all = "camelCase")]
#[expect(
    dead_code,
    reason = "Used only for OpenAPI schema generation via utoipa"
)]
pub struct ErrorSchema {
    #[schema(example = "not_found")]
    code: ErrorCodeSchema,
    /// Human-readable message returned to clients.
    #[schema(example = "no roads found within the requested distance")]
    message: String,
    /// Correlation identifier, also sent as the `trace-id` header.
    #[schema(example = "3fa85f64-5717-4562-b3fc-2c963f66afa6")]
    trace_id: Option<String>,
    /// Supplementary details such as `field` or `parseError`.
    details: Option<serde_json::Value>,
}

/// GeoJSON geometry with (longitude, latitude) coordinates.
#[derive(ToSchema)]
#[schema(as = geojson::Geometry)]
#[expect(
    dead_code,
    reason = "Used only for OpenAPI schema generation via utoipa"
)]
pub struct GeometrySchema {
    /// `LineString`, `MultiLineString`, `Polygon`, `MultiPolygon`, ...
    #[schema(rename = "type", example = "LineString")]
    kind: String,
    /// Nested position arrays; depth depends on the geometry type.
    #[schema(value_type = Object, example = json!([[107.6098, -6.9147], [107.6112, -6.9150]]))]
    coordinates: serde_json::Value,
}

/// A single GeoJSON feature.
#[derive(ToSchema)]
#[schema(as = geojson::Feature)]
#[expect(
    dead_code,
    reason = "Used only for OpenAPI schema generation via utoipa"
)]
pub struct FeatureSchema {
    #[schema(rename = "type", example = "Feature")]
    kind: String,
    geometry: GeometrySchema,
    /// `{osm_id, name, highway}` for roads, or
    /// `{province, district, sub_district, village}` for regions.
    #[schema(value_type = Object)]
    properties: serde_json::Value,
}

/// OpenAPI schema for the GeoJSON feature collection returned by lookups.
#[derive(ToSchema)]
#[schema(as = geojson::FeatureCollection)]
#[expect(
    dead_code,
    reason = "Used only for OpenAPI schema generation via utoipa"
)]
pub struct FeatureCollectionSchema {
    #[schema(rename = "type", example = "FeatureCollection")]
    kind: String,
    features: Vec<FeatureSchema>,
}

/// OpenAPI schema for [`crate::domain::Product`].
#[derive(ToSchema)]
#[schema(as = crate::domain::Product)]
#[expect(
    dead_code,
    reason = "Used only for OpenAPI schema generation via utoipa"
)]
pub struct ProductSchema {
    #[schema(value_type = String, format = "uuid")]
    id: String,
    #[schema(example = "Kopi Susu")]
    name: String,
    description: String,
    #[schema(example = 25000.0)]
    price: f64,
    #[schema(example = "drinks")]
    category: String,
    #[schema(example = 3)]
    stock: i64,
    image_url: String,
}
