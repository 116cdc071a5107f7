//! Wire representation of a URL record.

use chrono::{DateTime, Utc};
use serde::Serialize;

use crate::domain::entities::UrlRecord;

/// Serialized record as consumed by the presentation layer.
///
/// All fields are always present; timestamps serialize as ISO-8601 strings.
#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct UrlRecordDto {
    pub id: i64,
    pub target_url: String,
    pub short_code: String,
    pub access_count: i64,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl From<UrlRecord> for UrlRecordDto {
    fn from(record: UrlRecord) -> Self {
        Self {
            id: record.id,
            target_url: record.target_url,
            short_code: record.short_code,
            access_count: record.access_count,
            created_at: record.created_at,
            updated_at: record.updated_at,
        }
    }
}
