//! Shared application state.

use std::sync::Arc;

use crate::application::services::UrlRecordService;
use crate::infrastructure::persistence::PgRecordRepository;
use crate::ratelimit::FixedWindowGate;

/// State shared by all request handlers and middleware.
///
/// The record service (with its pooled store connection) and the rate gate
/// are the only process-wide mutable resources.
#[derive(Clone)]
pub struct AppState {
    pub records: Arc<UrlRecordService<PgRecordRepository>>,
    pub rate_gate: Arc<FixedWindowGate>,
    /// Read client IPs from proxy headers. Enable only behind a trusted
    /// reverse proxy.
    pub behind_proxy: bool,
}

impl AppState {
    pub fn new(
        records: Arc<UrlRecordService<PgRecordRepository>>,
        rate_gate: Arc<FixedWindowGate>,
        behind_proxy: bool,
    ) -> Self {
        Self {
            records,
            rate_gate,
            behind_proxy,
        }
    }
}
