//! End-to-end flow over the HTTP surface with in-process adapters.
//!
//! Drives the full lifecycle (create a restaurant, post reviews from two
//! users, edit inside and outside the 48-hour window, delete) and checks
//! the aggregate rating and search behaviour after every step.

use std::sync::{Arc, Mutex};

use actix_web::http::StatusCode;
use actix_web::{App, test as actix_test, web};
use chrono::{DateTime, Duration, Local, Utc};
use mockable::Clock;
use serde_json::{Value, json};

use backend::domain::ports::FixtureGeoLocationResolver;
use backend::domain::{RestaurantService, ReviewService};
use backend::inbound::http::identity::SUBJECT_HEADER;
use backend::inbound::http::state::HttpState;
use backend::inbound::http::{restaurants, reviews};
use backend::outbound::persistence::InMemoryRestaurantStore;

const ALICE: &str = "11111111-1111-4111-8111-111111111111";
const BOB: &str = "22222222-2222-4222-8222-222222222222";

struct MutableClock(Mutex<DateTime<Utc>>);

impl MutableClock {
    fn new(now: DateTime<Utc>) -> Self {
        Self(Mutex::new(now))
    }

    fn advance_hours(&self, hours: i64) {
        let mut guard = self.0.lock().expect("clock mutex");
        *guard += Duration::hours(hours);
    }
}

impl Clock for MutableClock {
    fn local(&self) -> DateTime<Local> {
        self.utc().with_timezone(&Local)
    }

    fn utc(&self) -> DateTime<Utc> {
        *self.0.lock().expect("clock mutex")
    }
}

fn start_time() -> DateTime<Utc> {
    DateTime::parse_from_rfc3339("2026-03-01T12:00:00Z")
        .expect("valid fixture timestamp")
        .with_timezone(&Utc)
}

fn state_with_clock(clock: Arc<MutableClock>) -> HttpState {
    let store = Arc::new(InMemoryRestaurantStore::new());
    HttpState::new(
        Arc::new(RestaurantService::new(
            store.clone(),
            Arc::new(FixtureGeoLocationResolver),
            clock.clone(),
        )),
        Arc::new(ReviewService::new(store, clock)),
    )
}

fn full_app(
    state: HttpState,
) -> App<
    impl actix_web::dev::ServiceFactory<
        actix_web::dev::ServiceRequest,
        Config = (),
        Response = actix_web::dev::ServiceResponse,
        Error = actix_web::Error,
        InitError = (),
    >,
> {
    App::new().app_data(web::Data::new(state)).service(
        web::scope("/api")
            .service(restaurants::create_restaurant)
            .service(restaurants::search_restaurants)
            .service(restaurants::get_restaurant)
            .service(restaurants::update_restaurant)
            .service(restaurants::delete_restaurant)
            .service(reviews::create_review)
            .service(reviews::list_reviews)
            .service(reviews::get_review)
            .service(reviews::update_review)
            .service(reviews::delete_review),
    )
}

fn restaurant_payload() -> Value {
    json!({
        "name": "The Copper Pot",
        "cuisineType": "Bistro",
        "contactInformation": "+44 20 7946 0123",
        "address": {
            "streetNumber": "7",
            "streetName": "Market Row",
            "city": "London",
            "state": "Greater London",
            "postalCode": "SW9 8LB",
            "country": "United Kingdom"
        },
        "operatingHours": {
            "friday": {"opens": "18:00", "closes": "23:00"}
        },
        "photoIds": ["front.jpg"]
    })
}

fn review_payload(content: &str, rating: u8) -> Value {
    json!({ "content": content, "rating": rating, "photoIds": [] })
}

async fn fetch_restaurant(
    app: &impl actix_web::dev::Service<
        actix_http::Request,
        Response = actix_web::dev::ServiceResponse,
        Error = actix_web::Error,
    >,
    restaurant_id: &str,
) -> Value {
    let request = actix_test::TestRequest::get()
        .uri(&format!("/api/restaurants/{restaurant_id}"))
        .to_request();
    let response = actix_test::call_service(app, request).await;
    assert_eq!(response.status(), StatusCode::OK);
    actix_test::read_body_json(response).await
}

#[actix_web::test]
async fn review_lifecycle_maintains_the_aggregate_rating() {
    let clock = Arc::new(MutableClock::new(start_time()));
    let app = actix_test::init_service(full_app(state_with_clock(clock.clone()))).await;

    // Create the restaurant.
    let create_response = actix_test::call_service(
        &app,
        actix_test::TestRequest::post()
            .uri("/api/restaurants")
            .set_json(restaurant_payload())
            .to_request(),
    )
    .await;
    assert_eq!(create_response.status(), StatusCode::OK);
    let created: Value = actix_test::read_body_json(create_response).await;
    let restaurant_id = created["id"].as_str().expect("id present").to_owned();
    assert_eq!(created["averageRating"], 0.0);

    // Alice posts a five-star review.
    let alice_response = actix_test::call_service(
        &app,
        actix_test::TestRequest::post()
            .uri(&format!("/api/restaurants/{restaurant_id}/reviews"))
            .insert_header((SUBJECT_HEADER, ALICE))
            .set_json(review_payload("superb", 5))
            .to_request(),
    )
    .await;
    assert_eq!(alice_response.status(), StatusCode::OK);
    let alice_review: Value = actix_test::read_body_json(alice_response).await;
    let alice_review_id = alice_review["id"].as_str().expect("id present").to_owned();

    assert_eq!(
        fetch_restaurant(&app, &restaurant_id).await["averageRating"],
        5.0
    );

    // An hour later Bob disagrees.
    clock.advance_hours(1);
    let bob_response = actix_test::call_service(
        &app,
        actix_test::TestRequest::post()
            .uri(&format!("/api/restaurants/{restaurant_id}/reviews"))
            .insert_header((SUBJECT_HEADER, BOB))
            .set_json(review_payload("overrated", 2))
            .to_request(),
    )
    .await;
    assert_eq!(bob_response.status(), StatusCode::OK);
    let bob_review: Value = actix_test::read_body_json(bob_response).await;
    let bob_review_id = bob_review["id"].as_str().expect("id present").to_owned();

    assert_eq!(
        fetch_restaurant(&app, &restaurant_id).await["averageRating"],
        3.5
    );

    // Default listing is newest first.
    let listing: Value = actix_test::read_body_json(
        actix_test::call_service(
            &app,
            actix_test::TestRequest::get()
                .uri(&format!("/api/restaurants/{restaurant_id}/reviews"))
                .to_request(),
        )
        .await,
    )
    .await;
    assert_eq!(listing["total"], 2);
    assert_eq!(listing["content"][0]["id"], bob_review_id.as_str());

    // The rating floor search sees the materialised average.
    let rated: Value = actix_test::read_body_json(
        actix_test::call_service(
            &app,
            actix_test::TestRequest::get()
                .uri("/api/restaurants?minRating=3.0")
                .to_request(),
        )
        .await,
    )
    .await;
    assert_eq!(rated["total"], 1);

    // Bob revises his review right away.
    let bob_update = actix_test::call_service(
        &app,
        actix_test::TestRequest::put()
            .uri(&format!(
                "/api/restaurants/{restaurant_id}/reviews/{bob_review_id}"
            ))
            .insert_header((SUBJECT_HEADER, BOB))
            .set_json(review_payload("second visit was better", 3))
            .to_request(),
    )
    .await;
    assert_eq!(bob_update.status(), StatusCode::OK);
    assert_eq!(
        fetch_restaurant(&app, &restaurant_id).await["averageRating"],
        4.0
    );

    // Two days on, Alice's edit window has closed.
    clock.advance_hours(49);
    let alice_update = actix_test::call_service(
        &app,
        actix_test::TestRequest::put()
            .uri(&format!(
                "/api/restaurants/{restaurant_id}/reviews/{alice_review_id}"
            ))
            .insert_header((SUBJECT_HEADER, ALICE))
            .set_json(review_payload("changed my mind", 1))
            .to_request(),
    )
    .await;
    assert_eq!(alice_update.status(), StatusCode::BAD_REQUEST);
    let rejection: Value = actix_test::read_body_json(alice_update).await;
    assert_eq!(rejection["code"], "review_not_allowed");

    // Deleting has no window; Alice removes her review entirely.
    let alice_delete = actix_test::call_service(
        &app,
        actix_test::TestRequest::delete()
            .uri(&format!(
                "/api/restaurants/{restaurant_id}/reviews/{alice_review_id}"
            ))
            .insert_header((SUBJECT_HEADER, ALICE))
            .to_request(),
    )
    .await;
    assert_eq!(alice_delete.status(), StatusCode::NO_CONTENT);

    let final_state = fetch_restaurant(&app, &restaurant_id).await;
    assert_eq!(final_state["averageRating"], 3.0);
    assert_eq!(final_state["reviews"].as_array().map(Vec::len), Some(1));
    assert_eq!(final_state["reviews"][0]["id"], bob_review_id.as_str());
}

#[actix_web::test]
async fn geo_search_finds_restaurants_near_the_fixture_point() {
    let clock = Arc::new(MutableClock::new(start_time()));
    let app = actix_test::init_service(full_app(state_with_clock(clock))).await;

    let create_response = actix_test::call_service(
        &app,
        actix_test::TestRequest::post()
            .uri("/api/restaurants")
            .set_json(restaurant_payload())
            .to_request(),
    )
    .await;
    assert_eq!(create_response.status(), StatusCode::OK);

    // The fixture resolver pins every restaurant to central London.
    let nearby: Value = actix_test::read_body_json(
        actix_test::call_service(
            &app,
            actix_test::TestRequest::get()
                .uri("/api/restaurants?latitude=51.5&longitude=-0.12&radius=5.0")
                .to_request(),
        )
        .await,
    )
    .await;
    assert_eq!(nearby["total"], 1);

    let far_away: Value = actix_test::read_body_json(
        actix_test::call_service(
            &app,
            actix_test::TestRequest::get()
                .uri("/api/restaurants?latitude=48.85&longitude=2.35&radius=5.0")
                .to_request(),
        )
        .await,
    )
    .await;
    assert_eq!(far_away["total"], 0);
}
