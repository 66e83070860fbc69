//! # portal-server
//!
//! HTTP server for the device-configuration captive portal.
//!
//! The server speaks just enough HTTP to drive the portal page: it accepts
//! one raw TCP connection at a time, parses the request by hand (no HTTP
//! library), decides whether to redirect foreign hosts back to the portal
//! address, and routes by method and path to a fixed set of handlers.
//!
//! Shared network state is injected as [`SharedState`] and read under
//! bounded-wait locks; commands for the Wi-Fi manager are fire-and-forget
//! messages over an mpsc channel.

pub mod assets;
pub mod redirect;
pub mod request;
pub mod response;
pub mod routes;
pub mod server;
pub mod state;

pub use server::{PortalServer, ServerConfig, WifiCommand};
pub use state::{SharedState, StateError, LOCK_WAIT};
