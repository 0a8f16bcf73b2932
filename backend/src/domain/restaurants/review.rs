//! Review entity embedded in the restaurant aggregate.

use chrono::{DateTime, Duration, Utc};
use uuid::Uuid;

use crate::domain::user::{User, UserId};

use super::Photo;

/// Hours after `date_posted` during which the author may edit a review.
pub const REVIEW_EDIT_WINDOW_HOURS: i64 = 48;

/// A review written by one user for one restaurant.
///
/// Reviews live embedded inside their owning [`super::Restaurant`] and are
/// created, edited, and removed only through the review lifecycle service.
/// `date_posted` is immutable once set; `last_edited` moves on every
/// successful edit.
#[derive(Debug, Clone, PartialEq)]
pub struct Review {
    /// Server-generated identifier, unique within and across restaurants.
    pub id: Uuid,
    /// Review body text.
    pub content: String,
    /// Star rating; the domain trusts the inbound validation for the 1–5
    /// range.
    pub rating: u8,
    /// Photos attached to this review.
    pub photos: Vec<Photo>,
    /// Original posting time; anchors the edit window.
    pub date_posted: DateTime<Utc>,
    /// Time of the most recent successful edit.
    pub last_edited: DateTime<Utc>,
    /// Authoring user; compared by id only.
    pub written_by: User,
}

impl Review {
    /// Whether the given user authored this review.
    pub fn is_written_by(&self, user_id: &UserId) -> bool {
        self.written_by.id == *user_id
    }

    /// Latest instant at which the author may still edit this review.
    pub fn edit_deadline(&self) -> DateTime<Utc> {
        self.date_posted + Duration::hours(REVIEW_EDIT_WINDOW_HOURS)
    }

    /// Whether an edit at `now` falls inside the 48-hour window anchored to
    /// the original posting time.
    pub fn editable_at(&self, now: DateTime<Utc>) -> bool {
        now <= self.edit_deadline()
    }
}
