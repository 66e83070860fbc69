//! Static portal assets, embedded at build time.
//!
//! The slices live for the process lifetime, so response writes can borrow
//! them directly.

pub static INDEX_HTML: &[u8] = include_bytes!("../assets/index.html");
pub static JQUERY_JS: &[u8] = include_bytes!("../assets/jquery.js");
pub static CODE_JS: &[u8] = include_bytes!("../assets/code.js");
pub static STYLE_CSS: &[u8] = include_bytes!("../assets/style.css");
