//! Byte-to-text decoding for scanned files

use std::borrow::Cow;

/// How bytes that are not valid UTF-8 are handled.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TextPolicy {
    /// Decode lossily; malformed sequences become U+FFFD. A file is only
    /// rewritten when it contains the old fragment, so the substitution is
    /// still visible in files with stray binary junk.
    Lossy,
    /// Skip files whose bytes are not valid UTF-8.
    Strict,
}

/// Decode raw file bytes according to the policy.
///
/// Returns `None` when the policy is [`TextPolicy::Strict`] and the bytes
/// are not valid UTF-8; callers treat that as a skip, not an error.
pub fn decode_text(bytes: &[u8], policy: TextPolicy) -> Option<Cow<'_, str>> {
    match policy {
        TextPolicy::Lossy => Some(String::from_utf8_lossy(bytes)),
        TextPolicy::Strict => std::str::from_utf8(bytes).ok().map(Cow::Borrowed),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_valid_utf8_decodes_under_both_policies() {
        let bytes = "path: C:/old/dir".as_bytes();
        assert_eq!(
            decode_text(bytes, TextPolicy::Lossy).unwrap(),
            "path: C:/old/dir"
        );
        assert_eq!(
            decode_text(bytes, TextPolicy::Strict).unwrap(),
            "path: C:/old/dir"
        );
    }

    #[test]
    fn test_valid_utf8_borrows_instead_of_copying() {
        let bytes = "plain ascii".as_bytes();
        assert!(matches!(
            decode_text(bytes, TextPolicy::Lossy),
            Some(Cow::Borrowed(_))
        ));
    }

    #[test]
    fn test_invalid_utf8_is_replaced_under_lossy() {
        let bytes = b"ok \xFF\xFE ok";
        let decoded = decode_text(bytes, TextPolicy::Lossy).unwrap();
        assert_eq!(decoded, "ok \u{FFFD}\u{FFFD} ok");
    }

    #[test]
    fn test_invalid_utf8_is_skipped_under_strict() {
        let bytes = b"ok \xFF\xFE ok";
        assert!(decode_text(bytes, TextPolicy::Strict).is_none());
    }

    #[test]
    fn test_empty_input_is_fine() {
        assert_eq!(decode_text(b"", TextPolicy::Lossy).unwrap(), "");
        assert_eq!(decode_text(b"", TextPolicy::Strict).unwrap(), "");
    }
}
