//! Cross-origin header policy
//!
//! The same fixed header set is attached to every response the server sends,
//! preflight answers included.

use hyper::header::{HeaderMap, HeaderName, HeaderValue};

pub const ALLOW_HEADERS: &str = "Content-Type, Content-Length, Accept-Encoding, X-CSRF-Token, Authorization, accept, origin, Cache-Control, X-Requested-With";
pub const ALLOW_METHODS: &str = "POST, OPTIONS, GET, PUT, DELETE, PATCH";

/// CORS headers applied to outgoing responses
#[derive(Debug, Clone)]
pub struct CorsPolicy {
    headers: Vec<(HeaderName, HeaderValue)>,
}

impl CorsPolicy {
    /// Allow any origin, with credentials, for the fixed header and method lists
    pub fn permissive() -> Self {
        Self {
            headers: vec![
                (
                    hyper::header::ACCESS_CONTROL_ALLOW_ORIGIN,
                    HeaderValue::from_static("*"),
                ),
                (
                    hyper::header::ACCESS_CONTROL_ALLOW_CREDENTIALS,
                    HeaderValue::from_static("true"),
                ),
                (
                    hyper::header::ACCESS_CONTROL_ALLOW_HEADERS,
                    HeaderValue::from_static(ALLOW_HEADERS),
                ),
                (
                    hyper::header::ACCESS_CONTROL_ALLOW_METHODS,
                    HeaderValue::from_static(ALLOW_METHODS),
                ),
            ],
        }
    }

    /// Insert the policy headers, replacing any existing values
    pub fn apply(&self, headers: &mut HeaderMap) {
        for (name, value) in &self.headers {
            headers.insert(name.clone(), value.clone());
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_apply_sets_all_headers() {
        let mut headers = HeaderMap::new();
        CorsPolicy::permissive().apply(&mut headers);

        assert_eq!(headers["access-control-allow-origin"], "*");
        assert_eq!(headers["access-control-allow-credentials"], "true");
        assert_eq!(headers["access-control-allow-headers"], ALLOW_HEADERS);
        assert_eq!(
            headers["access-control-allow-methods"],
            "POST, OPTIONS, GET, PUT, DELETE, PATCH"
        );
    }

    #[test]
    fn test_apply_replaces_existing() {
        let mut headers = HeaderMap::new();
        headers.insert(
            hyper::header::ACCESS_CONTROL_ALLOW_ORIGIN,
            HeaderValue::from_static("https://example.com"),
        );
        CorsPolicy::permissive().apply(&mut headers);

        assert_eq!(
            headers
                .get_all(hyper::header::ACCESS_CONTROL_ALLOW_ORIGIN)
                .iter()
                .count(),
            1
        );
        assert_eq!(headers["access-control-allow-origin"], "*");
    }
}
