//! The fixed route table.

use crate::request::Method;

/// Handlers reachable through the portal's HTTP surface.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Route {
    /// GET / — the portal page.
    Index,
    /// GET /jquery.js
    JQuery,
    /// GET /code.js
    Script,
    /// GET /style.css
    Styles,
    /// GET /ap.json — latest scan snapshot, then request a fresh scan.
    ApScan,
    /// GET /status.json — current address assignment.
    Status,
    /// GET /config.json — the autoexec command list.
    ReadConfig,
    /// POST /config.json — persist flag and commands.
    WriteConfig,
    /// POST /connect.json — join a network with submitted credentials.
    Connect,
    /// DELETE /connect.json — leave the current network.
    Disconnect,
    /// POST /factory.json — factory reset.
    FactoryReset,
}

/// Static method+path table; read-only for the lifetime of the process.
const ROUTES: &[(Method, &str, Route)] = &[
    (Method::Get, "/", Route::Index),
    (Method::Get, "/jquery.js", Route::JQuery),
    (Method::Get, "/code.js", Route::Script),
    (Method::Get, "/style.css", Route::Styles),
    (Method::Get, "/ap.json", Route::ApScan),
    (Method::Get, "/status.json", Route::Status),
    (Method::Get, "/config.json", Route::ReadConfig),
    (Method::Post, "/config.json", Route::WriteConfig),
    (Method::Post, "/connect.json", Route::Connect),
    (Method::Delete, "/connect.json", Route::Disconnect),
    (Method::Post, "/factory.json", Route::FactoryReset),
];

/// Exact-match lookup. A miss is answered with 400 by the caller.
pub fn resolve(method: Method, path: &str) -> Option<Route> {
    ROUTES
        .iter()
        .find(|(m, p, _)| *m == method && *p == path)
        .map(|(_, _, route)| *route)
}
