//! Captive-portal redirection.
//!
//! Phones and desktops probe well-known URLs to detect captive portals.
//! Those probes arrive with a foreign Host header; answering them with
//! real content would make the OS believe it is online and hide the
//! portal. Any request whose Host names neither the portal's own address
//! nor the station address is bounced back to the portal with a 302.

use tracing::debug;

use crate::request;
use crate::state::SharedState;

/// Outcome of the Host check.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Disposition {
    /// Serve the requested resource.
    Direct,
    /// Answer with a 302 to the portal address; no routing happens.
    Redirect,
}

/// Decide whether to serve the request or bounce it to `ap_addr`.
///
/// The Host header is matched by containment, not equality, so a value
/// like `10.10.0.1:80` still counts as local. An absent or empty Host goes
/// Direct. The station IP is read under its own bounded-wait lock; a
/// timeout counts as "no match".
pub async fn decide(headers: &str, ap_addr: &str, state: &SharedState) -> Disposition {
    let host = request::header_value(headers, "Host: ").unwrap_or("");
    if host.is_empty() {
        return Disposition::Direct;
    }

    if host.contains(ap_addr) {
        return Disposition::Direct;
    }

    let from_sta = match state.sta_ip().await {
        Ok(Some(ip)) => !ip.is_empty() && host.contains(&ip),
        Ok(None) | Err(_) => false,
    };

    if from_sta {
        Disposition::Direct
    } else {
        debug!("foreign host {:?}, redirecting to {}", host, ap_addr);
        Disposition::Redirect
    }
}
