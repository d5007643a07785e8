//! Geolocation API handlers.
//!
//! ```text
//! POST /api/getroad   {"latitude":-6.9,"longitude":107.6,"max_distance":500}
//! POST /api/getregion {"latitude":-6.9,"longitude":107.6}
//! ```

use actix_web::{HttpResponse, post, web};
use serde::{Deserialize, Serialize};
use serde_json::json;
use utoipa::ToSchema;

use crate::domain::Error;
use crate::domain::geo::{ContainingRegionQuery, GeoValidationError, NearestRoadsQuery};
use crate::inbound::http::ApiResult;
use crate::inbound::http::schemas::{ErrorSchema, FeatureCollectionSchema};
use crate::inbound::http::state::HttpState;

/// Request body for `POST /api/getroad`.
#[derive(Debug, Deserialize, Serialize, ToSchema)]
pub struct NearestRoadsRequest {
    #[schema(example = -6.914_744)]
    pub latitude: f64,
    #[schema(example = 107.609_81)]
    pub longitude: f64,
    /// Search radius in metres.
    #[schema(example = 500.0)]
    pub max_distance: f64,
}

/// Request body for `POST /api/getregion`.
#[derive(Debug, Deserialize, Serialize, ToSchema)]
pub struct ContainingRegionRequest {
    #[schema(example = -6.914_744)]
    pub latitude: f64,
    #[schema(example = 107.609_81)]
    pub longitude: f64,
}

fn map_geo_validation_error(err: GeoValidationError) -> Error {
    Error::invalid_request(err.to_string()).with_details(json!({ "field": err.field() }))
}

/// Roads within `max_distance` metres of the point, nearest first.
#[utoipa::path(
    post,
    path = "/api/getroad",
    request_body = NearestRoadsRequest,
    responses(
        (status = 200, description = "Roads ordered by distance", body = FeatureCollectionSchema),
        (status = 400, description = "Malformed body or invalid values", body = ErrorSchema),
        (status = 404, description = "No road within range", body = ErrorSchema),
        (status = 500, description = "Spatial store failure", body = ErrorSchema)
    ),
    tags = ["geo"],
    operation_id = "getRoad",
    security([])
)]
#[post("/getroad")]
pub async fn get_road(
    state: web::Data<HttpState>,
    payload: web::Json<NearestRoadsRequest>,
) -> ApiResult<HttpResponse> {
    let NearestRoadsRequest {
        latitude,
        longitude,
        max_distance,
    } = payload.into_inner();
    let query = NearestRoadsQuery::try_from_parts(latitude, longitude, max_distance)
        .map_err(map_geo_validation_error)?;
    let collection = state.geo.nearest_roads(&query).await?;
    Ok(HttpResponse::Ok().json(collection))
}

/// The administrative region containing the point.
#[utoipa::path(
    post,
    path = "/api/getregion",
    request_body = ContainingRegionRequest,
    responses(
        (status = 200, description = "Singleton collection with the region", body = FeatureCollectionSchema),
        (status = 400, description = "Malformed body or invalid values", body = ErrorSchema),
        (status = 404, description = "No region contains the point", body = ErrorSchema),
        (status = 500, description = "Spatial store failure", body = ErrorSchema)
    ),
    tags = ["geo"],
    operation_id = "getRegion",
    security([])
)]
#[post("/getregion")]
pub async fn get_region(
    state: web::Data<HttpState>,
    payload: web::Json<ContainingRegionRequest>,
) -> ApiResult<HttpResponse> {
    let ContainingRegionRequest {
        latitude,
        longitude,
    } = payload.into_inner();
    let query = ContainingRegionQuery::try_from_parts(latitude, longitude)
        .map_err(map_geo_validation_error)?;
    let collection = state.geo.containing_region(&query).await?;
    Ok(HttpResponse::Ok().json(collection))
}
