//! Review HTTP handlers.
//!
//! ```text
//! POST   /api/restaurants/{restaurant_id}/reviews
//! GET    /api/restaurants/{restaurant_id}/reviews
//! GET    /api/restaurants/{restaurant_id}/reviews/{review_id}
//! PUT    /api/restaurants/{restaurant_id}/reviews/{review_id}
//! DELETE /api/restaurants/{restaurant_id}/reviews/{review_id}
//! ```

use actix_web::{HttpResponse, delete, get, post, put, web};
use pagination::PageRequest;
use serde::{Deserialize, Serialize};
use serde_json::json;
use utoipa::{IntoParams, ToSchema};
use uuid::Uuid;

use crate::domain::{
    Error, Review, ReviewCreateUpdateRequest, ReviewSortKey, SortDirection, User,
};
use crate::inbound::http::ApiResult;
use crate::inbound::http::identity::AuthenticatedUser;
use crate::inbound::http::restaurants::PhotoBody;
use crate::inbound::http::state::HttpState;
use crate::inbound::http::validation::{require_non_blank, require_rating};

/// Request payload for creating or replacing a review.
#[derive(Debug, Clone, Deserialize, Serialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct ReviewCreateUpdateRequestBody {
    /// Review body text.
    pub content: String,
    /// Star rating from 1 to 5.
    pub rating: u8,
    /// Upload identifiers for attached photos.
    #[serde(default)]
    pub photo_ids: Vec<String>,
}

/// Review author as shown to clients.
#[derive(Debug, Clone, Serialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct UserBody {
    /// Stable subject identifier.
    pub id: String,
    /// Preferred username, when asserted.
    pub username: Option<String>,
    /// Given name, when asserted.
    pub given_name: Option<String>,
    /// Family name, when asserted.
    pub family_name: Option<String>,
}

/// Review representation returned to clients.
#[derive(Debug, Clone, Serialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct ReviewResponseBody {
    /// Review identifier.
    #[schema(format = "uuid")]
    pub id: String,
    /// Review body text.
    pub content: String,
    /// Star rating.
    pub rating: u8,
    /// Attached photos.
    pub photos: Vec<PhotoBody>,
    /// Original posting time, RFC 3339.
    #[schema(format = "date-time")]
    pub date_posted: String,
    /// Most recent edit time, RFC 3339.
    #[schema(format = "date-time")]
    pub last_edited: String,
    /// Authoring user.
    pub written_by: UserBody,
}

/// One page of reviews plus the total count.
#[derive(Debug, Clone, Serialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct ReviewPageBody {
    /// Reviews on this page.
    pub content: Vec<ReviewResponseBody>,
    /// Total number of reviews on the restaurant.
    pub total: usize,
}

/// Query parameters for listing reviews.
#[derive(Debug, Deserialize, IntoParams)]
#[serde(rename_all = "camelCase")]
pub struct ListReviewsQuery {
    /// Sort key: `datePosted` (default) or `rating`.
    pub sort: Option<String>,
    /// Sort direction: `asc` or `desc` (default).
    pub direction: Option<String>,
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

impl From<User> for UserBody {
    fn from(value: User) -> Self {
        Self {
            id: value.id.to_string(),
            username: value.username,
            given_name: value.given_name,
            family_name: value.family_name,
        }
    }
}

impl From<Review> for ReviewResponseBody {
    fn from(value: Review) -> Self {
        Self {
            id: value.id.to_string(),
            content: value.content,
            rating: value.rating,
            photos: value.photos.into_iter().map(PhotoBody::from).collect(),
            date_posted: value.date_posted.to_rfc3339(),
            last_edited: value.last_edited.to_rfc3339(),
            written_by: UserBody::from(value.written_by),
        }
    }
}

fn parse_review_request(
    body: ReviewCreateUpdateRequestBody,
) -> Result<ReviewCreateUpdateRequest, Error> {
    require_non_blank("content", &body.content)?;
    require_rating(body.rating)?;
    Ok(ReviewCreateUpdateRequest {
        content: body.content,
        rating: body.rating,
        photo_ids: body.photo_ids,
    })
}

fn parse_sort(raw: Option<&str>) -> Result<ReviewSortKey, Error> {
    raw.map_or(Ok(ReviewSortKey::default()), |value| {
        value.parse().map_err(|_| {
            Error::invalid_request("sort must be datePosted or rating").with_details(json!({
                "field": "sort",
                "value": value,
            }))
        })
    })
}

fn parse_direction(raw: Option<&str>) -> Result<SortDirection, Error> {
    raw.map_or(Ok(SortDirection::default()), |value| {
        value.parse().map_err(|_| {
            Error::invalid_request("direction must be asc or desc").with_details(json!({
                "field": "direction",
                "value": value,
            }))
        })
    })
}

fn parse_page_request(page: usize, size: usize) -> Result<PageRequest, Error> {
    PageRequest::from_page_number(page, size)
        .map_err(|error| Error::invalid_request(error.to_string()))
}

/// Post a review to a restaurant on behalf of the authenticated user.
#[utoipa::path(
    post,
    path = "/api/restaurants/{restaurant_id}/reviews",
    params(("restaurant_id" = Uuid, Path, description = "Restaurant identifier")),
    request_body = ReviewCreateUpdateRequestBody,
    responses(
        (status = 200, description = "Review created", body = ReviewResponseBody),
        (status = 400, description = "Invalid request or review not allowed", body = Error),
        (status = 401, description = "Unauthorized", body = Error),
        (status = 404, description = "Restaurant not found", body = Error)
    ),
    tags = ["reviews"],
    operation_id = "createReview"
)]
#[post("/restaurants/{restaurant_id}/reviews")]
pub async fn create_review(
    state: web::Data<HttpState>,
    author: AuthenticatedUser,
    path: web::Path<Uuid>,
    payload: web::Json<ReviewCreateUpdateRequestBody>,
) -> ApiResult<web::Json<ReviewResponseBody>> {
    let restaurant_id = path.into_inner();
    let request = parse_review_request(payload.into_inner())?;

    let review = state
        .reviews
        .create_review(author.user(), &restaurant_id, &request)
        .await?;

    Ok(web::Json(ReviewResponseBody::from(review)))
}

/// List a restaurant's reviews, sorted and paginated.
#[utoipa::path(
    get,
    path = "/api/restaurants/{restaurant_id}/reviews",
    params(
        ("restaurant_id" = Uuid, Path, description = "Restaurant identifier"),
        ListReviewsQuery
    ),
    responses(
        (status = 200, description = "One page of reviews", body = ReviewPageBody),
        (status = 400, description = "Invalid request", body = Error),
        (status = 404, description = "Restaurant not found", body = Error)
    ),
    tags = ["reviews"],
    operation_id = "listReviews"
)]
#[get("/restaurants/{restaurant_id}/reviews")]
pub async fn list_reviews(
    state: web::Data<HttpState>,
    path: web::Path<Uuid>,
    query: web::Query<ListReviewsQuery>,
) -> ApiResult<web::Json<ReviewPageBody>> {
    let restaurant_id = path.into_inner();
    let params = query.into_inner();
    let sort = parse_sort(params.sort.as_deref())?;
    let direction = parse_direction(params.direction.as_deref())?;
    let request = parse_page_request(params.page, params.size)?;

    let page = state
        .reviews
        .list_reviews(&restaurant_id, sort, direction, request)
        .await?;

    let total = page.total();
    Ok(web::Json(ReviewPageBody {
        content: page
            .into_content()
            .into_iter()
            .map(ReviewResponseBody::from)
            .collect(),
        total,
    }))
}

/// Fetch a single review.
///
/// Responds `204 No Content` when the restaurant exists but the review does
/// not.
#[utoipa::path(
    get,
    path = "/api/restaurants/{restaurant_id}/reviews/{review_id}",
    params(
        ("restaurant_id" = Uuid, Path, description = "Restaurant identifier"),
        ("review_id" = Uuid, Path, description = "Review identifier")
    ),
    responses(
        (status = 200, description = "The review", body = ReviewResponseBody),
        (status = 204, description = "Review absent within an existing restaurant"),
        (status = 404, description = "Restaurant not found", body = Error)
    ),
    tags = ["reviews"],
    operation_id = "getReview"
)]
#[get("/restaurants/{restaurant_id}/reviews/{review_id}")]
pub async fn get_review(
    state: web::Data<HttpState>,
    path: web::Path<(Uuid, Uuid)>,
) -> ApiResult<HttpResponse> {
    let (restaurant_id, review_id) = path.into_inner();

    match state.reviews.get_review(&restaurant_id, &review_id).await? {
        Some(review) => Ok(HttpResponse::Ok().json(ReviewResponseBody::from(review))),
        None => Ok(HttpResponse::NoContent().finish()),
    }
}

/// Replace a review's content, rating, and photos.
#[utoipa::path(
    put,
    path = "/api/restaurants/{restaurant_id}/reviews/{review_id}",
    params(
        ("restaurant_id" = Uuid, Path, description = "Restaurant identifier"),
        ("review_id" = Uuid, Path, description = "Review identifier")
    ),
    request_body = ReviewCreateUpdateRequestBody,
    responses(
        (status = 200, description = "Review updated", body = ReviewResponseBody),
        (status = 400, description = "Invalid request or review not allowed", body = Error),
        (status = 401, description = "Unauthorized", body = Error),
        (status = 404, description = "Restaurant not found", body = Error)
    ),
    tags = ["reviews"],
    operation_id = "updateReview"
)]
#[put("/restaurants/{restaurant_id}/reviews/{review_id}")]
pub async fn update_review(
    state: web::Data<HttpState>,
    author: AuthenticatedUser,
    path: web::Path<(Uuid, Uuid)>,
    payload: web::Json<ReviewCreateUpdateRequestBody>,
) -> ApiResult<web::Json<ReviewResponseBody>> {
    let (restaurant_id, review_id) = path.into_inner();
    let request = parse_review_request(payload.into_inner())?;

    let review = state
        .reviews
        .update_review(author.user(), &restaurant_id, &review_id, &request)
        .await?;

    Ok(web::Json(ReviewResponseBody::from(review)))
}

/// Remove a review.
#[utoipa::path(
    delete,
    path = "/api/restaurants/{restaurant_id}/reviews/{review_id}",
    params(
        ("restaurant_id" = Uuid, Path, description = "Restaurant identifier"),
        ("review_id" = Uuid, Path, description = "Review identifier")
    ),
    responses(
        (status = 204, description = "Review removed"),
        (status = 400, description = "Review not allowed", body = Error),
        (status = 401, description = "Unauthorized", body = Error),
        (status = 404, description = "Restaurant not found", body = Error)
    ),
    tags = ["reviews"],
    operation_id = "deleteReview"
)]
#[delete("/restaurants/{restaurant_id}/reviews/{review_id}")]
pub async fn delete_review(
    state: web::Data<HttpState>,
    author: AuthenticatedUser,
    path: web::Path<(Uuid, Uuid)>,
) -> ApiResult<HttpResponse> {
    let (restaurant_id, review_id) = path.into_inner();

    state
        .reviews
        .delete_review(author.user(), &restaurant_id, &review_id)
        .await?;

    Ok(HttpResponse::NoContent().finish())
}

#[cfg(test)]
#[path = "reviews_tests.rs"]
mod tests;
