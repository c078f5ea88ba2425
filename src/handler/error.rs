//! Request-level errors and their HTTP mapping.

use http_body_util::Full;
use hyper::body::Bytes;
use hyper::{Response, StatusCode};
use thiserror::Error;

use crate::http::json_response;
use crate::models::ErrorBody;

#[derive(Debug, Error)]
pub enum ApiError {
    /// Body is not a JSON object; the parser message is reported as-is
    #[error("{0}")]
    MalformedBody(#[from] serde_json::Error),

    #[error("failed to read request body: {0}")]
    BodyUnreadable(String),

    #[error("request body exceeds {limit} bytes")]
    PayloadTooLarge { limit: u64 },
}

impl ApiError {
    pub const fn status(&self) -> StatusCode {
        match self {
            Self::MalformedBody(_) | Self::BodyUnreadable(_) => StatusCode::BAD_REQUEST,
            Self::PayloadTooLarge { .. } => StatusCode::PAYLOAD_TOO_LARGE,
        }
    }

    pub fn into_response(self) -> Response<Full<Bytes>> {
        json_response(
            self.status(),
            &ErrorBody {
                error: self.to_string(),
            },
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_malformed_body_keeps_parser_text() {
        let parse_err = serde_json::from_str::<serde_json::Value>("{\"name\":").unwrap_err();
        let expected = parse_err.to_string();
        let err = ApiError::from(parse_err);
        assert_eq!(err.status(), StatusCode::BAD_REQUEST);
        assert_eq!(err.to_string(), expected);
    }

    #[test]
    fn test_status_mapping() {
        assert_eq!(
            ApiError::PayloadTooLarge { limit: 10 }.status(),
            StatusCode::PAYLOAD_TOO_LARGE
        );
        assert_eq!(
            ApiError::BodyUnreadable("reset".to_string()).status(),
            StatusCode::BAD_REQUEST
        );
    }
}
