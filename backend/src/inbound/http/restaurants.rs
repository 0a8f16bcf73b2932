//! Restaurant HTTP handlers.
//!
//! ```text
//! POST   /api/restaurants
//! GET    /api/restaurants
//! GET    /api/restaurants/{restaurant_id}
//! PUT    /api/restaurants/{restaurant_id}
//! DELETE /api/restaurants/{restaurant_id}
//! ```

use actix_web::{HttpResponse, delete, get, post, put, web};
use pagination::{Page, PageRequest};
use serde::{Deserialize, Serialize};
use utoipa::{IntoParams, ToSchema};
use uuid::Uuid;

use crate::domain::{
    Address, Error, GeoPoint, OperatingHours, Photo, Restaurant, RestaurantCreateUpdateRequest,
    RestaurantSearchRequest, TimeRange,
};
use crate::inbound::http::ApiResult;
use crate::inbound::http::reviews::ReviewResponseBody;
use crate::inbound::http::state::HttpState;
use crate::inbound::http::validation::{
    require_non_blank, require_photo_ids, require_street_number, require_wall_clock,
};

/// Structured postal address payload.
#[derive(Debug, Clone, Deserialize, Serialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct AddressBody {
    /// House or building number.
    pub street_number: String,
    /// Street name.
    pub street_name: String,
    /// Apartment, suite, or floor.
    pub unit: Option<String>,
    /// City or locality.
    pub city: String,
    /// State, province, or region.
    pub state: String,
    /// Postal or ZIP code.
    pub postal_code: String,
    /// Country name.
    pub country: String,
}

/// Opening and closing times for one day.
#[derive(Debug, Clone, Deserialize, Serialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct TimeRangeBody {
    /// Opening time, `HH:MM`.
    pub opens: String,
    /// Closing time, `HH:MM`.
    pub closes: String,
}

/// Weekly operating hours; omitted days are closed.
#[derive(Debug, Clone, Default, Deserialize, Serialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct OperatingHoursBody {
    /// Monday hours.
    pub monday: Option<TimeRangeBody>,
    /// Tuesday hours.
    pub tuesday: Option<TimeRangeBody>,
    /// Wednesday hours.
    pub wednesday: Option<TimeRangeBody>,
    /// Thursday hours.
    pub thursday: Option<TimeRangeBody>,
    /// Friday hours.
    pub friday: Option<TimeRangeBody>,
    /// Saturday hours.
    pub saturday: Option<TimeRangeBody>,
    /// Sunday hours.
    pub sunday: Option<TimeRangeBody>,
}

/// Photo reference as shown to clients.
#[derive(Debug, Clone, Serialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct PhotoBody {
    /// Storage URL or upload identifier.
    pub url: String,
    /// Upload time, RFC 3339.
    #[schema(format = "date-time")]
    pub upload_date: String,
}

/// Coordinate pair as shown to clients.
#[derive(Debug, Clone, Serialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct GeoPointBody {
    /// Latitude in decimal degrees.
    pub latitude: f64,
    /// Longitude in decimal degrees.
    pub longitude: f64,
}

/// Request payload for creating or replacing a restaurant.
#[derive(Debug, Clone, Deserialize, Serialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct RestaurantCreateUpdateRequestBody {
    /// Display name.
    pub name: String,
    /// Cuisine category.
    pub cuisine_type: String,
    /// Contact detail.
    pub contact_information: String,
    /// Postal address; geocoded server-side.
    pub address: AddressBody,
    /// Weekly opening times.
    pub operating_hours: Option<OperatingHoursBody>,
    /// Upload identifiers for the restaurant's photos; at least one.
    pub photo_ids: Vec<String>,
}

/// Full restaurant representation, embedded reviews included.
#[derive(Debug, Clone, Serialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct RestaurantResponseBody {
    /// Restaurant identifier.
    #[schema(format = "uuid")]
    pub id: String,
    /// Display name.
    pub name: String,
    /// Cuisine category.
    pub cuisine_type: String,
    /// Contact detail.
    pub contact_information: String,
    /// Postal address.
    pub address: AddressBody,
    /// Geocoded coordinates.
    pub geo_location: GeoPointBody,
    /// Weekly opening times.
    pub operating_hours: OperatingHoursBody,
    /// Derived mean review rating.
    pub average_rating: f32,
    /// Restaurant photos.
    pub photos: Vec<PhotoBody>,
    /// Embedded reviews.
    pub reviews: Vec<ReviewResponseBody>,
}

/// Condensed restaurant representation for search results.
#[derive(Debug, Clone, Serialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct RestaurantSummaryBody {
    /// Restaurant identifier.
    #[schema(format = "uuid")]
    pub id: String,
    /// Display name.
    pub name: String,
    /// Cuisine category.
    pub cuisine_type: String,
    /// Derived mean review rating.
    pub average_rating: f32,
    /// Number of reviews behind the average.
    pub review_count: usize,
    /// Geocoded coordinates.
    pub geo_location: GeoPointBody,
    /// Restaurant photos.
    pub photos: Vec<PhotoBody>,
}

/// One page of restaurant summaries plus the total count.
#[derive(Debug, Clone, Serialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct RestaurantSummaryPageBody {
    /// Summaries on this page.
    pub content: Vec<RestaurantSummaryBody>,
    /// Total number of matching restaurants.
    pub total: usize,
}

/// Query parameters for restaurant search.
#[derive(Debug, Deserialize, IntoParams)]
#[serde(rename_all = "camelCase")]
pub struct SearchRestaurantsQuery {
    /// Free-text query over name and cuisine.
    pub q: Option<String>,
    /// Minimum average rating.
    pub min_rating: Option<f32>,
    /// Geo filter latitude.
    pub latitude: Option<f64>,
    /// Geo filter longitude.
    pub longitude: Option<f64>,
    /// Geo filter radius in kilometres.
    pub radius: Option<f64>,
    /// One-based page number.
    #[serde(default = "default_page")]
    pub page: usize,
    /// Page size.
    #[serde(default = "default_size")]
    pub size: usize,
}

fn default_page() -> usize {
    1
}

fn default_size() -> usize {
    pagination::DEFAULT_PAGE_SIZE
}

impl From<Photo> for PhotoBody {
    fn from(value: Photo) -> Self {
        Self {
            url: value.url,
            upload_date: value.upload_date.to_rfc3339(),
        }
    }
}

impl From<GeoPoint> for GeoPointBody {
    fn from(value: GeoPoint) -> Self {
        Self {
            latitude: value.latitude,
            longitude: value.longitude,
        }
    }
}

impl From<Address> for AddressBody {
    fn from(value: Address) -> Self {
        Self {
            street_number: value.street_number,
            street_name: value.street_name,
            unit: value.unit,
            city: value.city,
            state: value.state,
            postal_code: value.postal_code,
            country: value.country,
        }
    }
}

impl From<TimeRange> for TimeRangeBody {
    fn from(value: TimeRange) -> Self {
        Self {
            opens: value.opens,
            closes: value.closes,
        }
    }
}

impl From<OperatingHours> for OperatingHoursBody {
    fn from(value: OperatingHours) -> Self {
        Self {
            monday: value.monday.map(TimeRangeBody::from),
            tuesday: value.tuesday.map(TimeRangeBody::from),
            wednesday: value.wednesday.map(TimeRangeBody::from),
            thursday: value.thursday.map(TimeRangeBody::from),
            friday: value.friday.map(TimeRangeBody::from),
            saturday: value.saturday.map(TimeRangeBody::from),
            sunday: value.sunday.map(TimeRangeBody::from),
        }
    }
}

impl From<Restaurant> for RestaurantResponseBody {
    fn from(value: Restaurant) -> Self {
        Self {
            id: value.id.to_string(),
            name: value.name,
            cuisine_type: value.cuisine_type,
            contact_information: value.contact_information,
            address: AddressBody::from(value.address),
            geo_location: GeoPointBody::from(value.geo_location),
            operating_hours: OperatingHoursBody::from(value.operating_hours),
            average_rating: value.average_rating,
            photos: value.photos.into_iter().map(PhotoBody::from).collect(),
            reviews: value
                .reviews
                .into_iter()
                .map(ReviewResponseBody::from)
                .collect(),
        }
    }
}

impl From<Restaurant> for RestaurantSummaryBody {
    fn from(value: Restaurant) -> Self {
        Self {
            id: value.id.to_string(),
            name: value.name,
            cuisine_type: value.cuisine_type,
            average_rating: value.average_rating,
            review_count: value.reviews.len(),
            geo_location: GeoPointBody::from(value.geo_location),
            photos: value.photos.into_iter().map(PhotoBody::from).collect(),
        }
    }
}

impl From<Page<Restaurant>> for RestaurantSummaryPageBody {
    fn from(value: Page<Restaurant>) -> Self {
        let total = value.total();
        Self {
            content: value
                .into_content()
                .into_iter()
                .map(RestaurantSummaryBody::from)
                .collect(),
            total,
        }
    }
}

fn parse_address(body: AddressBody) -> Result<Address, Error> {
    require_street_number(&body.street_number)?;
    require_non_blank("streetName", &body.street_name)?;
    require_non_blank("city", &body.city)?;
    require_non_blank("state", &body.state)?;
    require_non_blank("postalCode", &body.postal_code)?;
    require_non_blank("country", &body.country)?;

    Ok(Address {
        street_number: body.street_number,
        street_name: body.street_name,
        unit: body.unit.filter(|unit| !unit.trim().is_empty()),
        city: body.city,
        state: body.state,
        postal_code: body.postal_code,
        country: body.country,
    })
}

fn parse_day(day: &str, body: Option<TimeRangeBody>) -> Result<Option<TimeRange>, Error> {
    body.map(|range| {
        require_wall_clock(&format!("{day}.opens"), &range.opens)?;
        require_wall_clock(&format!("{day}.closes"), &range.closes)?;
        Ok(TimeRange {
            opens: range.opens,
            closes: range.closes,
        })
    })
    .transpose()
}

fn parse_operating_hours(body: Option<OperatingHoursBody>) -> Result<OperatingHours, Error> {
    let body = body.unwrap_or_default();
    Ok(OperatingHours {
        monday: parse_day("monday", body.monday)?,
        tuesday: parse_day("tuesday", body.tuesday)?,
        wednesday: parse_day("wednesday", body.wednesday)?,
        thursday: parse_day("thursday", body.thursday)?,
        friday: parse_day("friday", body.friday)?,
        saturday: parse_day("saturday", body.saturday)?,
        sunday: parse_day("sunday", body.sunday)?,
    })
}

fn parse_restaurant_request(
    body: RestaurantCreateUpdateRequestBody,
) -> Result<RestaurantCreateUpdateRequest, Error> {
    require_non_blank("name", &body.name)?;
    require_non_blank("cuisineType", &body.cuisine_type)?;
    require_non_blank("contactInformation", &body.contact_information)?;
    require_photo_ids(&body.photo_ids)?;

    Ok(RestaurantCreateUpdateRequest {
        name: body.name,
        cuisine_type: body.cuisine_type,
        contact_information: body.contact_information,
        address: parse_address(body.address)?,
        operating_hours: parse_operating_hours(body.operating_hours)?,
        photo_ids: body.photo_ids,
    })
}

/// Create a restaurant record with a geocoded address.
#[utoipa::path(
    post,
    path = "/api/restaurants",
    request_body = RestaurantCreateUpdateRequestBody,
    responses(
        (status = 200, description = "Restaurant created", body = RestaurantResponseBody),
        (status = 400, description = "Invalid request", body = Error),
        (status = 503, description = "Geocoder or store unavailable", body = Error)
    ),
    tags = ["restaurants"],
    operation_id = "createRestaurant"
)]
#[post("/restaurants")]
pub async fn create_restaurant(
    state: web::Data<HttpState>,
    payload: web::Json<RestaurantCreateUpdateRequestBody>,
) -> ApiResult<web::Json<RestaurantResponseBody>> {
    let request = parse_restaurant_request(payload.into_inner())?;

    let restaurant = state.restaurants.create_restaurant(&request).await?;

    Ok(web::Json(RestaurantResponseBody::from(restaurant)))
}

/// Search restaurants, dispatching to exactly one query shape.
#[utoipa::path(
    get,
    path = "/api/restaurants",
    params(SearchRestaurantsQuery),
    responses(
        (status = 200, description = "One page of matching restaurants", body = RestaurantSummaryPageBody),
        (status = 400, description = "Invalid request", body = Error)
    ),
    tags = ["restaurants"],
    operation_id = "searchRestaurants"
)]
#[get("/restaurants")]
pub async fn search_restaurants(
    state: web::Data<HttpState>,
    query: web::Query<SearchRestaurantsQuery>,
) -> ApiResult<web::Json<RestaurantSummaryPageBody>> {
    let params = query.into_inner();
    let request = PageRequest::from_page_number(params.page, params.size)
        .map_err(|error| Error::invalid_request(error.to_string()))?;

    let filters = RestaurantSearchRequest {
        query: params.q,
        min_rating: params.min_rating,
        latitude: params.latitude,
        longitude: params.longitude,
        radius_km: params.radius,
    };

    let page = state
        .restaurants
        .search_restaurants(&filters, request)
        .await?;

    Ok(web::Json(RestaurantSummaryPageBody::from(page)))
}

/// Fetch one restaurant with its embedded reviews.
#[utoipa::path(
    get,
    path = "/api/restaurants/{restaurant_id}",
    params(("restaurant_id" = Uuid, Path, description = "Restaurant identifier")),
    responses(
        (status = 200, description = "The restaurant", body = RestaurantResponseBody),
        (status = 404, description = "Restaurant not found", body = Error)
    ),
    tags = ["restaurants"],
    operation_id = "getRestaurant"
)]
#[get("/restaurants/{restaurant_id}")]
pub async fn get_restaurant(
    state: web::Data<HttpState>,
    path: web::Path<Uuid>,
) -> ApiResult<web::Json<RestaurantResponseBody>> {
    let restaurant_id = path.into_inner();

    let restaurant = state
        .restaurants
        .get_restaurant(&restaurant_id)
        .await?
        .ok_or_else(|| Error::not_found(format!("restaurant {restaurant_id} not found")))?;

    Ok(web::Json(RestaurantResponseBody::from(restaurant)))
}

/// Replace a restaurant's descriptive fields, re-geocoding the address.
#[utoipa::path(
    put,
    path = "/api/restaurants/{restaurant_id}",
    params(("restaurant_id" = Uuid, Path, description = "Restaurant identifier")),
    request_body = RestaurantCreateUpdateRequestBody,
    responses(
        (status = 200, description = "Restaurant updated", body = RestaurantResponseBody),
        (status = 400, description = "Invalid request", body = Error),
        (status = 404, description = "Restaurant not found", body = Error)
    ),
    tags = ["restaurants"],
    operation_id = "updateRestaurant"
)]
#[put("/restaurants/{restaurant_id}")]
pub async fn update_restaurant(
    state: web::Data<HttpState>,
    path: web::Path<Uuid>,
    payload: web::Json<RestaurantCreateUpdateRequestBody>,
) -> ApiResult<web::Json<RestaurantResponseBody>> {
    let restaurant_id = path.into_inner();
    let request = parse_restaurant_request(payload.into_inner())?;

    let restaurant = state
        .restaurants
        .update_restaurant(&restaurant_id, &request)
        .await?;

    Ok(web::Json(RestaurantResponseBody::from(restaurant)))
}

/// Remove a restaurant and its embedded reviews.
#[utoipa::path(
    delete,
    path = "/api/restaurants/{restaurant_id}",
    params(("restaurant_id" = Uuid, Path, description = "Restaurant identifier")),
    responses(
        (status = 204, description = "Restaurant removed")
    ),
    tags = ["restaurants"],
    operation_id = "deleteRestaurant"
)]
#[delete("/restaurants/{restaurant_id}")]
pub async fn delete_restaurant(
    state: web::Data<HttpState>,
    path: web::Path<Uuid>,
) -> ApiResult<HttpResponse> {
    let restaurant_id = path.into_inner();

    state.restaurants.delete_restaurant(&restaurant_id).await?;

    Ok(HttpResponse::NoContent().finish())
}

#[cfg(test)]
#[path = "restaurants_tests.rs"]
mod tests;
