//! Users endpoints
//!
//! Nothing is stored: reads return canned records, writes echo the request.

use http_body_util::Full;
use hyper::body::Bytes;
use hyper::{Response, StatusCode};
use serde_json::Value;

use super::body::decode_object;
use super::error::ApiError;
use crate::http::json_response;
use crate::models::{DataEnvelope, DeletedUser, HealthStatus, User, UserId};

pub fn health() -> Response<Full<Bytes>> {
    json_response(
        StatusCode::OK,
        &HealthStatus {
            status: "ok",
            message: "Server is running",
        },
    )
}

pub fn list_users() -> Response<Full<Bytes>> {
    json_response(
        StatusCode::OK,
        &DataEnvelope {
            data: User::examples(),
            message: "Users retrieved successfully",
        },
    )
}

/// The id is echoed without lookup
pub fn get_user(id: &str) -> Response<Full<Bytes>> {
    json_response(
        StatusCode::OK,
        &DataEnvelope {
            data: User::john(UserId::Path(id.to_string())),
            message: "User retrieved successfully",
        },
    )
}

pub fn create_user(body: &[u8]) -> Result<Response<Full<Bytes>>, ApiError> {
    let user = decode_object(body)?;
    Ok(json_response(
        StatusCode::CREATED,
        &DataEnvelope {
            data: user,
            message: "User created successfully",
        },
    ))
}

/// Echo the body with `id` replaced by the path id; a `null` body counts as `{}`
pub fn update_user(id: &str, body: &[u8]) -> Result<Response<Full<Bytes>>, ApiError> {
    let mut user = decode_object(body)?.unwrap_or_default();
    user.insert("id".to_string(), Value::String(id.to_string()));
    Ok(json_response(
        StatusCode::OK,
        &DataEnvelope {
            data: user,
            message: "User updated successfully",
        },
    ))
}

pub fn delete_user(id: &str) -> Response<Full<Bytes>> {
    json_response(
        StatusCode::OK,
        &DeletedUser {
            message: "User deleted successfully",
            id,
        },
    )
}
