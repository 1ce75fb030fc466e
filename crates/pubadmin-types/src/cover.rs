use percent_encoding::{AsciiSet, NON_ALPHANUMERIC, utf8_percent_encode};

/// Cover used when the user does not provide an image, title is appended
pub const PLACEHOLDER_COVER_PREFIX: &str = "https://placehold.co/200x280/7f8c8d/ffffff?text=";
/// Cover displayed when the image at cover url cannot be loaded
pub const COVER_ERROR_URL: &str = "https://placehold.co/100x140/cccccc/ffffff?text=Error";

// Same set of unreserved characters as javascript encodeURIComponent
const URI_COMPONENT: &AsciiSet = &NON_ALPHANUMERIC
    .remove(b'-')
    .remove(b'_')
    .remove(b'.')
    .remove(b'!')
    .remove(b'~')
    .remove(b'*')
    .remove(b'\'')
    .remove(b'(')
    .remove(b')');

pub fn encode_uri_component(text: &str) -> String {
    utf8_percent_encode(text, URI_COMPONENT).to_string()
}

pub fn placeholder_cover_url(title: &str) -> String {
    format!("{PLACEHOLDER_COVER_PREFIX}{}", encode_uri_component(title))
}

/// `url` is the generated placeholder for `title`
pub fn is_placeholder_for(url: &str, title: &str) -> bool {
    url == placeholder_cover_url(title)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_placeholder_url() {
        assert_eq!(
            placeholder_cover_url("Report 2025"),
            "https://placehold.co/200x280/7f8c8d/ffffff?text=Report%202025"
        );
        assert!(is_placeholder_for(
            "https://placehold.co/200x280/7f8c8d/ffffff?text=Report%202025",
            "Report 2025"
        ));
        assert!(!is_placeholder_for(
            "https://placehold.co/200x280/7f8c8d/ffffff?text=Report%202025",
            "Report 2026"
        ));
        assert!(!is_placeholder_for("https://img.example.org/1.png", "Report 2025"));
    }

    #[test]
    fn test_encode_uri_component() {
        assert_eq!(encode_uri_component("a&b=c/d?"), "a%26b%3Dc%2Fd%3F");
        assert_eq!(encode_uri_component("(Draft) it's *new*!~"), "(Draft)%20it's%20*new*!~");
        assert_eq!(encode_uri_component("Ekonomi–Jateng"), "Ekonomi%E2%80%93Jateng");
        assert_eq!(encode_uri_component("100% + more"), "100%25%20%2B%20more");
    }
}
