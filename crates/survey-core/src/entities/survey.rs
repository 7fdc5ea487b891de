//! Survey entity - an admin-authored question set

use chrono::{DateTime, Utc};
use serde_json::Value;
use uuid::Uuid;

/// Survey entity representing a question set created by an admin
///
/// The `config` blob holds the question definitions and is owned by the
/// presentation layer; the server only guarantees it is a JSON object.
#[derive(Debug, Clone, PartialEq)]
pub struct Survey {
    pub id: Uuid,
    /// URL-safe unique identifier derived from the title, immutable once assigned
    pub slug: String,
    pub title: String,
    pub description: Option<String>,
    pub config: Value,
    /// Owning admin - surveys are owned exclusively by their creator
    pub created_by: Uuid,
    pub opens_at: Option<DateTime<Utc>>,
    pub closes_at: Option<DateTime<Utc>>,
    pub deleted_at: Option<DateTime<Utc>>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl Survey {
    /// Create a new Survey with required fields
    #[allow(clippy::too_many_arguments)]
    pub fn new(
        slug: String,
        title: String,
        description: Option<String>,
        config: Value,
        created_by: Uuid,
        opens_at: Option<DateTime<Utc>>,
        closes_at: Option<DateTime<Utc>>,
    ) -> Self {
        let now = Utc::now();
        Self {
            id: Uuid::new_v4(),
            slug,
            title,
            description,
            config,
            created_by,
            opens_at,
            closes_at,
            deleted_at: None,
            created_at: now,
            updated_at: now,
        }
    }

    /// Check if the survey is soft deleted
    #[inline]
    pub fn is_deleted(&self) -> bool {
        self.deleted_at.is_some()
    }

    /// Check if the survey accepts responses at the given instant
    ///
    /// Open iff `now` is not before `opens_at` and not after `closes_at`;
    /// an absent bound is unbounded on that side. Boundary instants count
    /// as open.
    pub fn is_open_at(&self, now: DateTime<Utc>) -> bool {
        if self.opens_at.is_some_and(|opens| now < opens) {
            return false;
        }
        if self.closes_at.is_some_and(|closes| now > closes) {
            return false;
        }
        true
    }

    /// Check if the survey accepts responses right now
    pub fn is_open(&self) -> bool {
        self.is_open_at(Utc::now())
    }
}
