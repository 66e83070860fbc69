//! Hand-rolled HTTP request parsing.
//!
//! Only the request line is tokenized. Headers stay as the raw text that
//! arrived after the first line terminator and are searched on demand by
//! name, which keeps the parser tiny at the cost of a false match when a
//! header name also occurs inside another header's name or value. Callers
//! rely on that exact first-match-anywhere behavior.

/// Request methods the portal routes. Anything else is unroutable.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Method {
    Get,
    Post,
    Delete,
}

impl Method {
    fn parse(token: &str) -> Option<Self> {
        match token {
            "GET" => Some(Method::Get),
            "POST" => Some(Method::Post),
            "DELETE" => Some(Method::Delete),
            _ => None,
        }
    }
}

/// A parsed request, borrowing the connection's receive buffer.
#[derive(Debug)]
pub struct Request<'a> {
    /// Parsed method; `None` for methods the portal does not speak.
    pub method: Option<Method>,

    /// Request path token, empty if the line had no second token.
    pub path: &'a str,

    /// Raw header region; searched on demand by [`header_value`].
    pub headers: &'a str,
}

impl<'a> Request<'a> {
    /// Split the received text at the first line terminator.
    ///
    /// Returns `None` when no request line is present at all (empty input
    /// or nothing but newlines); the caller answers that with 404. A line
    /// that does not tokenize into a known method and path still parses,
    /// and is rejected later by the dispatcher with 400.
    pub fn parse(raw: &'a str) -> Option<Request<'a>> {
        let raw = raw.trim_start_matches('\n');
        if raw.is_empty() {
            return None;
        }

        let (line, headers) = raw.split_once('\n').unwrap_or((raw, ""));
        let line = line.trim_end_matches('\r');

        let mut tokens = line.split_whitespace();
        let method = tokens.next().and_then(Method::parse);
        let path = tokens.next().unwrap_or("");

        Some(Request {
            method,
            path,
            headers,
        })
    }
}

/// Look up a header by substring search over the raw header region.
///
/// `name` includes its `": "` suffix. The value runs from just after the
/// match to the first CR or LF. Matching is exact and unanchored: the
/// first occurrence anywhere in the region wins, even inside another
/// header's value. That imprecision is deliberate and preserved.
pub fn header_value<'a>(headers: &'a str, name: &str) -> Option<&'a str> {
    let start = headers.find(name)? + name.len();
    let rest = &headers[start..];
    let end = rest.find(['\r', '\n']).unwrap_or(rest.len());
    Some(&rest[..end])
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_request_line() {
        let raw = "GET /ap.json HTTP/1.1\r\nHost: 10.10.0.1\r\n\r\n";
        let request = Request::parse(raw).unwrap();

        assert_eq!(request.method, Some(Method::Get));
        assert_eq!(request.path, "/ap.json");
        assert_eq!(request.headers, "Host: 10.10.0.1\r\n\r\n");
    }

    #[test]
    fn test_parse_empty_input() {
        assert!(Request::parse("").is_none());
        assert!(Request::parse("\n\n\n").is_none());
    }

    #[test]
    fn test_parse_unknown_method() {
        let request = Request::parse("BREW /pot HTTP/1.1\r\n\r\n").unwrap();
        assert_eq!(request.method, None);
        assert_eq!(request.path, "/pot");
    }

    #[test]
    fn test_parse_bare_line_without_newline() {
        let request = Request::parse("GET /").unwrap();
        assert_eq!(request.method, Some(Method::Get));
        assert_eq!(request.path, "/");
        assert_eq!(request.headers, "");
    }

    #[test]
    fn test_header_value_present() {
        let headers = "Host: 10.10.0.1\r\nX-Custom-ssid: MyNet\r\n\r\n";
        assert_eq!(header_value(headers, "Host: "), Some("10.10.0.1"));
        assert_eq!(header_value(headers, "X-Custom-ssid: "), Some("MyNet"));
    }

    #[test]
    fn test_header_value_absent() {
        assert_eq!(header_value("Host: a\r\n", "X-Custom-pwd: "), None);
    }

    #[test]
    fn test_header_value_empty() {
        assert_eq!(header_value("X-Custom-pwd: \r\n", "X-Custom-pwd: "), Some(""));
    }

    #[test]
    fn test_header_value_at_end_of_buffer() {
        assert_eq!(header_value("Host: 10.10.0.1", "Host: "), Some("10.10.0.1"));
    }

    #[test]
    fn test_header_value_bare_lf_terminator() {
        assert_eq!(header_value("Host: 10.10.0.1\nNext: x", "Host: "), Some("10.10.0.1"));
    }

    #[test]
    fn test_header_value_first_match_anywhere_wins() {
        // unanchored search: "Host: " also matches inside X-Forwarded-Host
        let headers = "X-Forwarded-Host: proxy.example\r\nHost: 10.10.0.1\r\n";
        assert_eq!(header_value(headers, "Host: "), Some("proxy.example"));
    }

    #[test]
    fn test_indexed_header_names_do_not_collide() {
        // "X-Custom-autoexec: " must not match "X-Custom-autoexec1: "
        let headers = "X-Custom-autoexec1: volume 50\r\n";
        assert_eq!(header_value(headers, "X-Custom-autoexec: "), None);
        assert_eq!(
            header_value(headers, "X-Custom-autoexec1: "),
            Some("volume 50")
        );
    }
}
