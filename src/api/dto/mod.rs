//! Request and response payloads for the REST API.

pub mod health;
pub mod record;
pub mod shorten;

pub use health::HealthResponse;
pub use record::UrlRecordDto;
pub use shorten::{ShortenRequest, UpdateUrlRequest};
