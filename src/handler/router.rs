//! Request dispatch module
//!
//! Entry point for HTTP request processing: preflight short-circuit, route
//! matching, dispatch, then the headers every response carries.

use crate::config::AppState;
use crate::handler::body::{check_content_length, read_body};
use crate::handler::error::ApiError;
use crate::handler::users;
use crate::http;
use crate::logger::{self, AccessLogEntry};
use crate::routing::{Endpoint, RouteMatch};
use http_body_util::Full;
use hyper::body::{Body, Bytes};
use hyper::header::{HeaderValue, SERVER};
use hyper::{Method, Request, Response, Version};
use std::convert::Infallible;
use std::net::SocketAddr;
use std::sync::Arc;
use std::time::Instant;

/// Main entry point for HTTP request handling
///
/// Every request gets an access line, whatever the log mode.
pub async fn handle_request<B>(
    req: Request<B>,
    state: Arc<AppState>,
    peer_addr: Option<SocketAddr>,
) -> Result<Response<Full<Bytes>>, Infallible>
where
    B: Body<Data = Bytes>,
    B::Error: Into<Box<dyn std::error::Error + Send + Sync>>,
{
    let (response, entry) = serve_request(req, &state, peer_addr).await;
    logger::log_access(&entry, &state.config.logging.access_log_format);
    Ok(response)
}

/// Build the response along with its completed access log entry
async fn serve_request<B>(
    req: Request<B>,
    state: &AppState,
    peer_addr: Option<SocketAddr>,
) -> (Response<Full<Bytes>>, AccessLogEntry)
where
    B: Body<Data = Bytes>,
    B::Error: Into<Box<dyn std::error::Error + Send + Sync>>,
{
    let started = Instant::now();
    let mut entry = start_access_entry(&req, peer_addr);

    let mut response = if req.method() == Method::OPTIONS {
        http::build_preflight_response()
    } else {
        route_request(req, state).await
    };

    state.cors.apply(response.headers_mut());
    if let Ok(server_name) = HeaderValue::from_str(&state.config.http.server_name) {
        response.headers_mut().insert(SERVER, server_name);
    }

    entry.status = response.status().as_u16();
    entry.body_bytes =
        usize::try_from(response.body().size_hint().exact().unwrap_or(0)).unwrap_or(usize::MAX);
    entry.latency = started.elapsed();

    (response, entry)
}

fn start_access_entry<B>(req: &Request<B>, peer_addr: Option<SocketAddr>) -> AccessLogEntry {
    let header = |name: hyper::header::HeaderName| {
        req.headers()
            .get(name)
            .and_then(|v| v.to_str().ok())
            .map(ToString::to_string)
    };

    let mut entry = AccessLogEntry::new(
        peer_addr.map_or_else(|| "-".to_string(), |a| a.ip().to_string()),
        req.method().to_string(),
        req.uri().path().to_string(),
    );
    entry.query = req.uri().query().map(ToString::to_string);
    entry.http_version = version_str(req.version()).to_string();
    entry.referer = header(hyper::header::REFERER);
    entry.user_agent = header(hyper::header::USER_AGENT);
    entry
}

fn version_str(version: Version) -> &'static str {
    if version == Version::HTTP_10 {
        "1.0"
    } else if version == Version::HTTP_09 {
        "0.9"
    } else if version == Version::HTTP_2 {
        "2"
    } else {
        "1.1"
    }
}

async fn route_request<B>(req: Request<B>, state: &AppState) -> Response<Full<Bytes>>
where
    B: Body<Data = Bytes>,
    B::Error: Into<Box<dyn std::error::Error + Send + Sync>>,
{
    match state.router.match_route(req.method(), req.uri().path()) {
        RouteMatch::Found { endpoint, id } => {
            let id = id.unwrap_or_default();
            dispatch(endpoint, &id, req, state)
                .await
                .unwrap_or_else(|err| {
                    logger::log_warning(&format!("{} {}: {err}", endpoint.name(), err.status()));
                    err.into_response()
                })
        }
        RouteMatch::Redirect { location, code } => {
            let target = match req.uri().query() {
                Some(q) => format!("{location}?{q}"),
                None => location,
            };
            http::build_redirect_response_with_code(&target, code)
        }
        RouteMatch::NotFound => http::build_404_response(),
    }
}

/// Run the endpoint; only create/update read the body
async fn dispatch<B>(
    endpoint: Endpoint,
    id: &str,
    req: Request<B>,
    state: &AppState,
) -> Result<Response<Full<Bytes>>, ApiError>
where
    B: Body<Data = Bytes>,
    B::Error: Into<Box<dyn std::error::Error + Send + Sync>>,
{
    match endpoint {
        Endpoint::Health => Ok(users::health()),
        Endpoint::ListUsers => Ok(users::list_users()),
        Endpoint::GetUser => Ok(users::get_user(id)),
        Endpoint::DeleteUser => Ok(users::delete_user(id)),
        Endpoint::CreateUser => {
            let body = read_limited(req, state.config.http.max_body_size).await?;
            users::create_user(&body)
        }
        Endpoint::UpdateUser => {
            let body = read_limited(req, state.config.http.max_body_size).await?;
            users::update_user(id, &body)
        }
    }
}

async fn read_limited<B>(req: Request<B>, max_body_size: u64) -> Result<Bytes, ApiError>
where
    B: Body<Data = Bytes>,
    B::Error: Into<Box<dyn std::error::Error + Send + Sync>>,
{
    check_content_length(&req, max_body_size)?;
    read_body(req.into_body(), max_body_size).await
}
