//! Client identification utilities
//!
//! Common functions for identifying clients via HTTP headers, used to
//! derive rate-limit partition keys.

use axum::http::HeaderMap;
use std::net::IpAddr;

/// Fixed partition key used when the client address cannot be determined
pub const GLOBAL_PARTITION_KEY: &str = "global";

/// Extract client IP address from headers
///
/// Checks X-Forwarded-For header first (for reverse proxy setups),
/// then falls back to direct connection IP.
///
/// ## Arguments
/// * `headers` - HTTP request headers
/// * `direct_ip` - Direct connection IP address
///
/// ## Returns
/// The client IP address, or None if not determinable
pub fn extract_client_ip(headers: &HeaderMap, direct_ip: Option<IpAddr>) -> Option<IpAddr> {
    // Check X-Forwarded-For header (first IP in the list)
    if let Some(xff) = headers.get("x-forwarded-for").and_then(|v| v.to_str().ok()) {
        if let Some(first_ip) = xff.split(',').next() {
            if let Ok(ip) = first_ip.trim().parse::<IpAddr>() {
                return Some(ip);
            }
        }
    }
    direct_ip
}

/// Derive the rate-limit partition key for a client
///
/// Partitions by network address; requests whose address is unknown all
/// share [`GLOBAL_PARTITION_KEY`] so they still count against a limit.
pub fn partition_key(client_ip: Option<IpAddr>) -> String {
    match client_ip {
        Some(ip) => ip.to_string(),
        None => GLOBAL_PARTITION_KEY.to_string(),
    }
}
