// SPDX-FileCopyrightText: 2025 Hyperpolymath
// SPDX-License-Identifier: PMPL-1.0-or-later

//! Rate-limit identifiers derived from request metadata.
//!
//! The default identifier is built from the User-Agent and Host headers, both
//! of which the client controls. It adds friction for casual resubmission
//! and gives no protection against a client that rotates its headers.

use crate::config::IdentifierSource;
use axum::http::{header, HeaderMap};
use std::net::{IpAddr, SocketAddr};
use tracing::debug;

/// Identifier from client-supplied metadata. Missing values are empty.
pub fn client_metadata_identifier(user_agent: Option<&str>, host: Option<&str>) -> String {
    format!("{}-{}", user_agent.unwrap_or(""), host.unwrap_or(""))
}

/// Identifier from the remote socket address.
pub fn peer_identifier(ip: IpAddr) -> String {
    ip.to_string()
}

/// Derive the identifier for a request according to `source`.
///
/// Falls back to client metadata when the peer address is unavailable.
pub fn identify(source: IdentifierSource, headers: &HeaderMap, peer: Option<SocketAddr>) -> String {
    match (source, peer) {
        (IdentifierSource::PeerAddress, Some(addr)) => peer_identifier(addr.ip()),
        (IdentifierSource::PeerAddress, None) => {
            debug!("Peer address unavailable, using client metadata");
            from_headers(headers)
        }
        (IdentifierSource::ClientMetadata, _) => from_headers(headers),
    }
}

fn from_headers(headers: &HeaderMap) -> String {
    let user_agent = headers
        .get(header::USER_AGENT)
        .and_then(|v| v.to_str().ok());
    let host = headers
        .get(header::HOST)
        .and_then(|v| v.to_str().ok())
        .map(strip_port);

    client_metadata_identifier(user_agent, host)
}

/// `example.com:443` -> `example.com`, leaving bracketed IPv6 hosts intact.
fn strip_port(host: &str) -> &str {
    match host.rfind(':') {
        Some(idx) if !host[idx..].contains(']') && host[idx + 1..].bytes().all(|b| b.is_ascii_digit()) => {
            &host[..idx]
        }
        _ => host,
    }
}
