//! String substitution for JSON documents that are assembled by hand.
//!
//! The config endpoint embeds stored command lines in a JSON document it
//! writes piece by piece, so quote characters in the stored text must be
//! escaped before embedding.

/// Replace every non-overlapping occurrence of `from` in `src` with `to`.
///
/// The scan resumes immediately after each appended replacement, so
/// occurrences introduced by the replacement text itself are never
/// rescanned. `from` must be non-empty.
pub fn replace_all(src: &str, from: &str, to: &str) -> String {
    debug_assert!(!from.is_empty(), "substitution target must be non-empty");

    let mut out = String::with_capacity(src.len());
    let mut rest = src;
    while let Some(pos) = rest.find(from) {
        out.push_str(&rest[..pos]);
        out.push_str(to);
        rest = &rest[pos + from.len()..];
    }
    out.push_str(rest);
    out
}

/// Escape every `"` as `\"` for embedding in a JSON string literal.
pub fn escape_quotes(src: &str) -> String {
    replace_all(src, "\"", "\\\"")
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    #[test]
    fn test_no_occurrence_is_identity() {
        assert_eq!(replace_all("hello world", "x", "y"), "hello world");
    }

    #[test]
    fn test_replaces_every_occurrence() {
        assert_eq!(replace_all("a.b.c", ".", "::"), "a::b::c");
    }

    #[test]
    fn test_occurrence_at_start_and_end() {
        assert_eq!(replace_all(".a.", ".", "!"), "!a!");
    }

    #[test]
    fn test_replacement_containing_target_terminates() {
        // "a" -> "aa" must not rescan the freshly appended text
        assert_eq!(replace_all("aaa", "a", "aa"), "aaaaaa");
    }

    #[test]
    fn test_escape_quotes_counts() {
        let input = "say \"hi\" to \"her\"";
        let escaped = escape_quotes(input);

        let raw_quotes = input.matches('"').count();
        assert_eq!(escaped.matches("\\\"").count(), raw_quotes);

        // every remaining quote character is part of an escape sequence
        let bytes = escaped.as_bytes();
        for (i, b) in bytes.iter().enumerate() {
            if *b == b'"' {
                assert_eq!(bytes[i - 1], b'\\', "raw quote at byte {}", i);
            }
        }
    }

    #[test]
    fn test_escape_quotes_without_quotes() {
        assert_eq!(escape_quotes("plain text"), "plain text");
    }
}
