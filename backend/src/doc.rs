//! OpenAPI documentation configuration.
//!
//! Defines the [`ApiDoc`] struct which generates the OpenAPI specification
//! for the REST API: all restaurant and review endpoints from the inbound
//! layer, their request/response schemas, and the forwarded-identity header
//! security scheme. The generated specification backs Swagger UI in debug
//! builds.

use utoipa::openapi::security::{ApiKey, ApiKeyValue, SecurityScheme};
use utoipa::{Modify, OpenApi};

use crate::domain::{Error, ErrorCode};
use crate::inbound::http::restaurants::{
    AddressBody, GeoPointBody, OperatingHoursBody, PhotoBody, RestaurantCreateUpdateRequestBody,
    RestaurantResponseBody, RestaurantSummaryBody, RestaurantSummaryPageBody, TimeRangeBody,
};
use crate::inbound::http::reviews::{
    ReviewCreateUpdateRequestBody, ReviewPageBody, ReviewResponseBody, UserBody,
};

/// Enrich the generated document with the forwarded-identity scheme.
struct SecurityAddon;

impl Modify for SecurityAddon {
    fn modify(&self, openapi: &mut utoipa::openapi::OpenApi) {
        let components = openapi
            .components
            .get_or_insert_with(utoipa::openapi::Components::default);

        components.add_security_scheme(
            "ForwardedIdentity",
            SecurityScheme::ApiKey(ApiKey::Header(ApiKeyValue::with_description(
                "X-Auth-Subject",
                "Subject identifier forwarded by the identity-aware proxy.",
            ))),
        );
    }
}

/// OpenAPI document for the REST API.
/// Swagger UI is enabled in debug builds only and used by tooling.
#[derive(OpenApi)]
#[openapi(
    modifiers(&SecurityAddon),
    info(
        title = "Restaurant review backend API",
        description = "HTTP interface for restaurant records and their embedded reviews."
    ),
    servers(
        (url = "/", description = "Relative to the deployment base URL")
    ),
    paths(
        crate::inbound::http::restaurants::create_restaurant,
        crate::inbound::http::restaurants::search_restaurants,
        crate::inbound::http::restaurants::get_restaurant,
        crate::inbound::http::restaurants::update_restaurant,
        crate::inbound::http::restaurants::delete_restaurant,
        crate::inbound::http::reviews::create_review,
        crate::inbound::http::reviews::list_reviews,
        crate::inbound::http::reviews::get_review,
        crate::inbound::http::reviews::update_review,
        crate::inbound::http::reviews::delete_review,
    ),
    components(schemas(
        Error,
        ErrorCode,
        AddressBody,
        TimeRangeBody,
        OperatingHoursBody,
        PhotoBody,
        GeoPointBody,
        RestaurantCreateUpdateRequestBody,
        RestaurantResponseBody,
        RestaurantSummaryBody,
        RestaurantSummaryPageBody,
        ReviewCreateUpdateRequestBody,
        ReviewResponseBody,
        ReviewPageBody,
        UserBody,
    )),
    tags(
        (name = "restaurants", description = "Restaurant records and search"),
        (name = "reviews", description = "Reviews embedded in restaurants")
    )
)]
pub struct ApiDoc;
