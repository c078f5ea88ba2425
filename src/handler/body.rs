//! Request body reading and JSON decoding for create/update.

use http_body_util::{BodyExt, LengthLimitError, Limited};
use hyper::body::{Body, Bytes};
use hyper::Request;

use super::error::ApiError;
use crate::models::JsonObject;

/// Reject early when `Content-Length` already exceeds the limit
pub fn check_content_length<B>(req: &Request<B>, max_body_size: u64) -> Result<(), ApiError> {
    let Some(value) = req.headers().get(hyper::header::CONTENT_LENGTH) else {
        return Ok(());
    };
    match value.to_str().ok().and_then(|v| v.parse::<u64>().ok()) {
        Some(size) if size > max_body_size => Err(ApiError::PayloadTooLarge {
            limit: max_body_size,
        }),
        // hyper rejects malformed lengths before we get here
        _ => Ok(()),
    }
}

/// Collect the body, stopping once it grows past `max_body_size`
pub async fn read_body<B>(body: B, max_body_size: u64) -> Result<Bytes, ApiError>
where
    B: Body<Data = Bytes>,
    B::Error: Into<Box<dyn std::error::Error + Send + Sync>>,
{
    let limit = usize::try_from(max_body_size).unwrap_or(usize::MAX);
    match Limited::new(body, limit).collect().await {
        Ok(collected) => Ok(collected.to_bytes()),
        Err(e) if e.downcast_ref::<LengthLimitError>().is_some() => {
            Err(ApiError::PayloadTooLarge {
                limit: max_body_size,
            })
        }
        Err(e) => Err(ApiError::BodyUnreadable(e.to_string())),
    }
}

/// Decode the first JSON value in the body as an object or `null`
///
/// Bytes after that first value are ignored. Arrays, other scalars and empty
/// input are errors.
pub fn decode_object(bytes: &[u8]) -> Result<Option<JsonObject>, ApiError> {
    match serde_json::Deserializer::from_slice(bytes)
        .into_iter::<Option<JsonObject>>()
        .next()
    {
        Some(value) => Ok(value?),
        // Only whitespace: let the parser produce its EOF error
        None => Ok(serde_json::from_slice(bytes)?),
    }
}
