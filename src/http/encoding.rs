//! Percent encoding of file names in request paths and response headers

use percent_encoding::{percent_decode_str, utf8_percent_encode, AsciiSet, NON_ALPHANUMERIC};

/// Everything except RFC 3986 unreserved characters gets escaped
const NAME_ENCODE_SET: &AsciiSet = &NON_ALPHANUMERIC
    .remove(b'-')
    .remove(b'_')
    .remove(b'.')
    .remove(b'~');

/// Decode a raw path segment; `None` if the result is not valid UTF-8
pub fn decode_name(raw: &str) -> Option<String> {
    percent_decode_str(raw)
        .decode_utf8()
        .ok()
        .map(std::borrow::Cow::into_owned)
}

/// Encode a file name for use inside a quoted header parameter
pub fn encode_name(name: &str) -> String {
    utf8_percent_encode(name, NAME_ENCODE_SET).to_string()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_decode() {
        assert_eq!(decode_name("plain.txt").as_deref(), Some("plain.txt"));
        assert_eq!(decode_name("my%20file.txt").as_deref(), Some("my file.txt"));
        assert_eq!(decode_name("%2e%2e").as_deref(), Some(".."));
        assert_eq!(decode_name("a%2Fb").as_deref(), Some("a/b"));
        assert_eq!(decode_name("%D0%BF.txt").as_deref(), Some("п.txt"));
        assert_eq!(decode_name("%FF%FE"), None);
    }

    #[test]
    fn test_encode_keeps_unreserved() {
        assert_eq!(encode_name("report-v2_final.~txt"), "report-v2_final.~txt");
        assert_eq!(encode_name("my file.txt"), "my%20file.txt");
        assert_eq!(encode_name("quote\".txt"), "quote%22.txt");
        assert_eq!(encode_name("п.txt"), "%D0%BF.txt");
    }
}
