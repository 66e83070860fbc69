//! Canned response headers.
//!
//! Header blocks use bare-`\n` line endings and omit Content-Length on
//! asset responses; the portal page and captive-portal probes accept this
//! dialect. JSON responses carry aggressive no-cache directives so polling
//! clients always see fresh snapshots.

pub const OK_HTML: &str = "HTTP/1.1 200 OK\nContent-type: text/html\n\n";

pub const OK_CSS: &str =
    "HTTP/1.1 200 OK\nContent-type: text/css\nCache-Control: public, max-age=31536000\n\n";

pub const OK_JS: &str = "HTTP/1.1 200 OK\nContent-type: text/javascript\n\n";

pub const OK_JSON_NO_CACHE: &str = "HTTP/1.1 200 OK\nContent-type: application/json\nCache-Control: no-store, no-cache, must-revalidate, max-age=0\nPragma: no-cache\n\n";

pub const BAD_REQUEST: &str = "HTTP/1.1 400 Bad Request\nContent-Length: 0\n\n";

pub const NOT_FOUND: &str = "HTTP/1.1 404 Not Found\nContent-Length: 0\n\n";

pub const UNAVAILABLE: &str = "HTTP/1.1 503 Service Unavailable\nContent-Length: 0\n\n";

/// Redirect to the portal address: START + address + END.
pub const REDIRECT_START: &str = "HTTP/1.1 302 Found\nLocation: http://";
pub const REDIRECT_END: &str = "/\n\n";
