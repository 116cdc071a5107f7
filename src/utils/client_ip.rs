//! Client IP extraction for rate-limit keying.

use axum::http::{HeaderMap, HeaderName};
use std::net::IpAddr;

static X_FORWARDED_FOR: HeaderName = HeaderName::from_static("x-forwarded-for");
static X_REAL_IP: HeaderName = HeaderName::from_static("x-real-ip");

/// Resolves the client IP used as rate-limit identity.
///
/// When `behind_proxy` is set, `X-Forwarded-For` (first hop) and `X-Real-IP`
/// are consulted first; these headers are only trustworthy behind a reverse
/// proxy that overwrites them. Otherwise, and as a fallback when the headers
/// are absent or unparsable, the socket peer address is used.
pub fn client_ip(headers: &HeaderMap, peer: IpAddr, behind_proxy: bool) -> IpAddr {
    if !behind_proxy {
        return peer;
    }

    if let Some(forwarded) = headers.get(&X_FORWARDED_FOR)
        && let Ok(value) = forwarded.to_str()
        && let Some(first) = value.split(',').next()
        && let Ok(ip) = first.trim().parse::<IpAddr>()
    {
        return ip;
    }

    if let Some(real_ip) = headers.get(&X_REAL_IP)
        && let Ok(value) = real_ip.to_str()
        && let Ok(ip) = value.trim().parse::<IpAddr>()
    {
        return ip;
    }

    peer
}
