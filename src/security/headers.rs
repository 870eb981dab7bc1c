//! Response hardening headers.

use axum::http::{header, HeaderMap, HeaderValue};

/// Stop browsers from MIME-sniffing a JSON body into something executable.
pub fn apply_security_headers(headers: &mut HeaderMap) {
    headers.insert(
        header::X_CONTENT_TYPE_OPTIONS,
        HeaderValue::from_static("nosniff"),
    );
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_nosniff_set() {
        let mut headers = HeaderMap::new();
        apply_security_headers(&mut headers);
        assert_eq!(headers["x-content-type-options"], "nosniff");
    }

    #[test]
    fn test_overwrites_existing_value() {
        let mut headers = HeaderMap::new();
        headers.insert(header::X_CONTENT_TYPE_OPTIONS, HeaderValue::from_static("sniff"));
        apply_security_headers(&mut headers);
        assert_eq!(headers.get_all(header::X_CONTENT_TYPE_OPTIONS).iter().count(), 1);
        assert_eq!(headers["x-content-type-options"], "nosniff");
    }
}
