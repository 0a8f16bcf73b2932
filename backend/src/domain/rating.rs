//! Aggregate rating computation.

use crate::domain::restaurants::Review;

/// Arithmetic mean of the ratings across `reviews`, or `0.0` when empty.
///
/// Pure function of the review collection; callers store the result on the
/// restaurant's `average_rating` before persisting so range queries never
/// observe a stale value.
///
/// # Examples
/// ```
/// use backend::domain::rating;
///
/// assert_eq!(rating::recompute(&[]), 0.0);
/// ```
pub fn recompute(reviews: &[Review]) -> f32 {
    if reviews.is_empty() {
        return 0.0;
    }
    let sum: u32 = reviews.iter().map(|review| u32::from(review.rating)).sum();
    sum as f32 / reviews.len() as f32
}

#[cfg(test)]
mod tests {
    //! Regression coverage for this module.

    use chrono::Utc;
    use rstest::rstest;
    use uuid::Uuid;

    use crate::domain::restaurants::Review;
    use crate::domain::user::{User, UserId};

    use super::*;

    fn review_rated(rating: u8) -> Review {
        let now = Utc::now();
        Review {
            id: Uuid::new_v4(),
            content: "fine".to_owned(),
            rating,
            photos: Vec::new(),
            date_posted: now,
            last_edited: now,
            written_by: User::from_id(UserId::random()),
        }
    }

    #[test]
    fn empty_collection_yields_zero() {
        assert_eq!(recompute(&[]), 0.0);
    }

    #[rstest]
    #[case(&[5], 5.0)]
    #[case(&[1, 5], 3.0)]
    #[case(&[2, 3, 4], 3.0)]
    #[case(&[1, 2], 1.5)]
    fn mean_of_ratings(#[case] ratings: &[u8], #[case] expected: f32) {
        let reviews: Vec<Review> = ratings.iter().copied().map(review_rated).collect();
        assert_eq!(recompute(&reviews), expected);
    }
}
