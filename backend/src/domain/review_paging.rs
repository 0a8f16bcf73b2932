//! Sorted, paginated views over an in-memory review collection.
//!
//! Reviews live embedded in their restaurant rather than in an
//! independently queryable table, so listing sorts and slices the loaded
//! collection in memory. The review id acts as a deterministic secondary
//! sort key, keeping repeated pagination stable across calls.

use std::cmp::Ordering;
use std::str::FromStr;

use pagination::{Page, PageRequest};

use crate::domain::restaurants::Review;

/// Review property to sort a listing by.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum ReviewSortKey {
    /// Original posting time; the listing default.
    #[default]
    DatePosted,
    /// Star rating.
    Rating,
}

impl FromStr for ReviewSortKey {
    type Err = UnknownSortInput;

    fn from_str(value: &str) -> Result<Self, Self::Err> {
        match value {
            "datePosted" => Ok(Self::DatePosted),
            "rating" => Ok(Self::Rating),
            other => Err(UnknownSortInput(other.to_owned())),
        }
    }
}

/// Sort direction for a review listing.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum SortDirection {
    /// Smallest (oldest / lowest) first.
    Ascending,
    /// Largest (newest / highest) first; the listing default.
    #[default]
    Descending,
}

impl FromStr for SortDirection {
    type Err = UnknownSortInput;

    fn from_str(value: &str) -> Result<Self, Self::Err> {
        match value {
            "asc" => Ok(Self::Ascending),
            "desc" => Ok(Self::Descending),
            other => Err(UnknownSortInput(other.to_owned())),
        }
    }
}

/// Raised when a sort key or direction does not match any known value.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("unknown sort input: {0}")]
pub struct UnknownSortInput(String);

fn compare(lhs: &Review, rhs: &Review, sort: ReviewSortKey) -> Ordering {
    let by_key = match sort {
        ReviewSortKey::DatePosted => lhs.date_posted.cmp(&rhs.date_posted),
        ReviewSortKey::Rating => lhs.rating.cmp(&rhs.rating),
    };
    by_key.then_with(|| lhs.id.cmp(&rhs.id))
}

/// Sort `reviews` by the chosen key and slice out one page.
///
/// The returned [`Page`] reports the size of the whole collection; an
/// offset at or past the end yields an empty page with that total intact.
pub fn page(
    mut reviews: Vec<Review>,
    sort: ReviewSortKey,
    direction: SortDirection,
    request: &PageRequest,
) -> Page<Review> {
    reviews.sort_by(|lhs, rhs| match direction {
        SortDirection::Ascending => compare(lhs, rhs, sort),
        SortDirection::Descending => compare(rhs, lhs, sort),
    });
    Page::from_complete(reviews, request)
}
