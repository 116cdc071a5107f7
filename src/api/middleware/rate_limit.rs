//! Rate policy middleware.
//!
//! Classifies each request into an operation class by method and path, then
//! consults the fixed-window gate before the handler runs. Rejections carry
//! `429 Too Many Requests` and still count against the client's quotas.

use axum::{
    extract::{ConnectInfo, Request, State},
    http::Method,
    middleware::Next,
    response::Response,
};
use std::net::{IpAddr, Ipv4Addr, SocketAddr};

use crate::error::AppError;
use crate::ratelimit::PolicyClass;
use crate::state::AppState;
use crate::utils::client_ip::client_ip;

/// Gate middleware applied to the whole router.
///
/// Classification happens before the handler, so validation and not-found
/// failures still count against quota; only requests the router never
/// delivers here (transport failures) are exempt, plus the health probe.
pub async fn rate_policy_gate(
    State(state): State<AppState>,
    req: Request,
    next: Next,
) -> Result<Response, AppError> {
    let Some(class) = classify(req.method(), req.uri().path()) else {
        return Ok(next.run(req).await);
    };

    let peer = req
        .extensions()
        .get::<ConnectInfo<SocketAddr>>()
        .map(|info| info.0.ip())
        .unwrap_or(IpAddr::V4(Ipv4Addr::UNSPECIFIED));
    let client = client_ip(req.headers(), peer, state.behind_proxy);

    state.rate_gate.admit(class, client)?;

    Ok(next.run(req).await)
}

/// Maps a request to its policy class. `None` means only exempt endpoints
/// (the health probe).
fn classify(method: &Method, path: &str) -> Option<PolicyClass> {
    if path == "/health" {
        return None;
    }

    match *method {
        Method::POST => Some(PolicyClass::Create),
        Method::PUT | Method::PATCH | Method::DELETE => Some(PolicyClass::Modify),
        _ => Some(PolicyClass::Read),
    }
}
