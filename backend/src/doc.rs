//! OpenAPI documentation configuration.
//!
//! [`ApiDoc`] registers every HTTP endpoint, the schema wrappers from
//! [`crate::inbound::http::schemas`], and the bearer token scheme guarding
//! the product routes. Swagger UI serves it in debug builds and the
//! `openapi-dump` binary prints it.

use crate::inbound::http::schemas::{
    ErrorCodeSchema, ErrorSchema, FeatureCollectionSchema, FeatureSchema, GeometrySchema,
    ProductSchema,
};
use utoipa::openapi::security::{HttpAuthScheme, HttpBuilder, SecurityScheme};
use utoipa::{Modify, OpenApi};

/// Adds the `bearerAuth` security scheme.
struct SecurityAddon;

impl Modify for SecurityAddon {
    fn modify(&self, openapi: &mut utoipa::openapi::OpenApi) {
        let components = openapi
            .components
            .get_or_insert_with(utoipa::openapi::Components::default);

        components.add_security_scheme(
            "bearerAuth",
            SecurityScheme::Http(
                HttpBuilder::new()
                    .scheme(HttpAuthScheme::Bearer)
                    .bearer_format("JWT")
                    .description(Some("Access token issued by POST /login."))
                    .build(),
            ),
        );
    }
}

/// OpenAPI document for the REST API.
#[derive(OpenApi)]
#[openapi(
    modifiers(&SecurityAddon),
    info(
        title = "Petapedia backend API",
        description = "Nearest-road and containing-region lookups, plus the shop endpoints.",
        license(name = "MIT")
    ),
    servers(
        (url = "/", description = "Relative to the deployment base URL")
    ),
    paths(
        crate::inbound::http::geo::get_road,
        crate::inbound::http::geo::get_region,
        crate::inbound::http::accounts::register,
        crate::inbound::http::accounts::login,
        crate::inbound::http::products::create_product,
        crate::inbound::http::products::list_products,
        crate::inbound::http::health::ready,
        crate::inbound::http::health::live,
    ),
    components(schemas(
        ErrorSchema,
        ErrorCodeSchema,
        GeometrySchema,
        FeatureSchema,
        FeatureCollectionSchema,
        ProductSchema
    )),
    tags(
        (name = "geo", description = "Spatial lookups over roads and administrative regions"),
        (name = "accounts", description = "Registration and login"),
        (name = "products", description = "Product catalogue (bearer token required)"),
        (name = "health", description = "Endpoints for health checks")
    )
)]
pub struct ApiDoc;
