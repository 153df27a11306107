//! Client IP resolution from proxy headers.

use axum::http::HeaderMap;

/// Placeholder used when no proxy header carries a client address.
pub const DEFAULT_FALLBACK_IP: &str = "192.168.1.1";

/// Headers consulted in order. Only the first entry of `x-forwarded-for` is used.
const CLIENT_IP_HEADERS: [&str; 3] = ["x-forwarded-for", "cf-connecting-ip", "x-real-ip"];

/// Resolve the client IP: the first non-empty value among the known proxy
/// headers, else `fallback`.
#[must_use]
pub fn resolve_client_ip(headers: &HeaderMap, fallback: &str) -> String {
    CLIENT_IP_HEADERS
        .iter()
        .filter_map(|name| headers.get(*name))
        .filter_map(|value| value.to_str().ok())
        .filter_map(|value| value.split(',').next())
        .map(str::trim)
        .find(|value| !value.is_empty())
        .map_or_else(|| fallback.to_string(), ToString::to_string)
}
