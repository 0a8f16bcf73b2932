//! Photo value object.

use chrono::{DateTime, Utc};

/// An uploaded photo reference.
///
/// Photos are immutable values: whenever an owning collection is replaced,
/// each entry is rebuilt with a fresh upload timestamp.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Photo {
    /// Storage URL or upload identifier of the image.
    pub url: String,
    /// When this photo entry was (re)attached to its owner.
    pub upload_date: DateTime<Utc>,
}

impl Photo {
    /// Build a photo stamped with the given upload time.
    pub fn new(url: impl Into<String>, upload_date: DateTime<Utc>) -> Self {
        Self {
            url: url.into(),
            upload_date,
        }
    }

    /// Rebuild a photo collection from upload identifiers, stamping every
    /// entry with the same timestamp.
    pub fn from_ids(photo_ids: &[String], upload_date: DateTime<Utc>) -> Vec<Self> {
        photo_ids
            .iter()
            .map(|url| Self::new(url.clone(), upload_date))
            .collect()
    }
}
