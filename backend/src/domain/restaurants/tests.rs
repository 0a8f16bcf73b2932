//! Regression coverage for the restaurant aggregate entities.

use chrono::{Duration, Utc};
use uuid::Uuid;

use crate::domain::user::{User, UserId};

use super::*;

fn sample_address() -> Address {
    Address {
        street_number: "12".to_owned(),
        street_name: "Rue Cler".to_owned(),
        unit: None,
        city: "Paris".to_owned(),
        state: "Île-de-France".to_owned(),
        postal_code: "75007".to_owned(),
        country: "France".to_owned(),
    }
}

fn sample_restaurant() -> Restaurant {
    Restaurant {
        id: Uuid::new_v4(),
        name: "Chez Test".to_owned(),
        cuisine_type: "French".to_owned(),
        contact_information: "+33 1 23 45 67 89".to_owned(),
        address: sample_address(),
        geo_location: GeoPoint::new(48.857, 2.306),
        operating_hours: OperatingHours::default(),
        average_rating: 0.0,
        photos: Vec::new(),
        reviews: Vec::new(),
        version: 0,
    }
}

fn review_by(author: &User, rating: u8) -> Review {
    let now = Utc::now();
    Review {
        id: Uuid::new_v4(),
        content: "solid".to_owned(),
        rating,
        photos: Vec::new(),
        date_posted: now,
        last_edited: now,
        written_by: author.clone(),
    }
}

#[test]
fn review_lookup_finds_embedded_entries() {
    let author = User::from_id(UserId::random());
    let mut restaurant = sample_restaurant();
    let review = review_by(&author, 4);
    let review_id = review.id;
    restaurant.reviews.push(review);

    assert!(restaurant.review(&review_id).is_some());
    assert!(restaurant.review(&Uuid::new_v4()).is_none());
}

#[test]
fn has_review_by_compares_author_ids_only() {
    let author = User {
        id: UserId::random(),
        username: Some("alice".to_owned()),
        given_name: Some("Alice".to_owned()),
        family_name: None,
    };
    let mut restaurant = sample_restaurant();
    restaurant.reviews.push(review_by(&author, 5));

    // Same id, different display attributes.
    let same_person = User::from_id(author.id.clone());
    assert!(restaurant.has_review_by(&same_person.id));
    assert!(!restaurant.has_review_by(&UserId::random()));
}

#[test]
fn refresh_average_rating_tracks_the_collection() {
    let mut restaurant = sample_restaurant();
    let author_a = User::from_id(UserId::random());
    let author_b = User::from_id(UserId::random());
    restaurant.reviews.push(review_by(&author_a, 2));
    restaurant.reviews.push(review_by(&author_b, 5));

    restaurant.refresh_average_rating();
    assert_eq!(restaurant.average_rating, 3.5);

    restaurant.reviews.clear();
    restaurant.refresh_average_rating();
    assert_eq!(restaurant.average_rating, 0.0);
}

#[test]
fn edit_window_is_anchored_to_posting_time() {
    let author = User::from_id(UserId::random());
    let mut review = review_by(&author, 3);
    review.date_posted = Utc::now() - Duration::hours(24);
    // A later edit does not extend the window.
    review.last_edited = Utc::now();

    let posted = review.date_posted;
    assert!(review.editable_at(posted + Duration::hours(47) + Duration::minutes(59)));
    assert!(!review.editable_at(posted + Duration::hours(48) + Duration::minutes(1)));
}
