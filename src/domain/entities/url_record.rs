//! URL record entity: the mapping between a short code and a target URL.

use chrono::{DateTime, Utc};

/// A stored URL mapping with its access counter and timestamps.
///
/// `short_code` is immutable after creation and globally unique; the store
/// enforces uniqueness with a constraint on top of the generator's pre-check.
/// `access_count` only ever grows, by exactly one per successful resolve.
#[derive(Debug, Clone, sqlx::FromRow)]
pub struct UrlRecord {
    pub id: i64,
    pub short_code: String,
    pub target_url: String,
    pub access_count: i64,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

/// Input data for creating a new record.
#[derive(Debug, Clone)]
pub struct NewUrlRecord {
    pub short_code: String,
    pub target_url: String,
}
