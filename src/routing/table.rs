//! Static route table
//!
//! Routes are matched segment by segment on method + path. A `:name` segment
//! captures exactly one non-empty path segment.

use hyper::{Method, StatusCode};

/// Versioned prefix shared by every route
pub const API_PREFIX: &str = "/api/v1";

/// Handler selected by a route
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Endpoint {
    Health,
    ListUsers,
    GetUser,
    CreateUser,
    UpdateUser,
    DeleteUser,
}

impl Endpoint {
    pub const fn name(self) -> &'static str {
        match self {
            Self::Health => "health",
            Self::ListUsers => "list_users",
            Self::GetUser => "get_user",
            Self::CreateUser => "create_user",
            Self::UpdateUser => "update_user",
            Self::DeleteUser => "delete_user",
        }
    }
}

#[derive(Debug, Clone)]
pub struct Route {
    pub method: Method,
    /// Path relative to [`API_PREFIX`]
    pub pattern: &'static str,
    pub endpoint: Endpoint,
}

impl Route {
    pub fn full_path(&self) -> String {
        format!("{API_PREFIX}{}", self.pattern)
    }
}

/// Outcome of matching a request against the table
#[derive(Debug, PartialEq, Eq)]
pub enum RouteMatch {
    Found {
        endpoint: Endpoint,
        /// Value captured by the `:id` segment, if the route has one
        id: Option<String>,
    },
    /// Same route without the trailing slash
    Redirect { location: String, code: StatusCode },
    NotFound,
}

/// All routes served under [`API_PREFIX`]
pub fn routes() -> Vec<Route> {
    vec![
        Route {
            method: Method::GET,
            pattern: "/health",
            endpoint: Endpoint::Health,
        },
        Route {
            method: Method::GET,
            pattern: "/users",
            endpoint: Endpoint::ListUsers,
        },
        Route {
            method: Method::GET,
            pattern: "/users/:id",
            endpoint: Endpoint::GetUser,
        },
        Route {
            method: Method::POST,
            pattern: "/users",
            endpoint: Endpoint::CreateUser,
        },
        Route {
            method: Method::PUT,
            pattern: "/users/:id",
            endpoint: Endpoint::UpdateUser,
        },
        Route {
            method: Method::DELETE,
            pattern: "/users/:id",
            endpoint: Endpoint::DeleteUser,
        },
    ]
}

/// Route table with the full paths pre-split into segments
pub struct Router {
    entries: Vec<(Route, Vec<String>)>,
}

impl Router {
    pub fn new() -> Self {
        let entries = routes()
            .into_iter()
            .map(|route| {
                let segments = split_path(&route.full_path())
                    .map(ToString::to_string)
                    .collect();
                (route, segments)
            })
            .collect();
        Self { entries }
    }

    pub fn routes(&self) -> impl Iterator<Item = &Route> {
        self.entries.iter().map(|(route, _)| route)
    }

    /// Match method + path, falling back to a trailing-slash redirect
    pub fn match_route(&self, method: &Method, path: &str) -> RouteMatch {
        if let Some((endpoint, id)) = self.find(method, path) {
            return RouteMatch::Found { endpoint, id };
        }

        let trimmed = path.trim_end_matches('/');
        if trimmed.len() < path.len() && !trimmed.is_empty() && self.find(method, trimmed).is_some()
        {
            let code = if *method == Method::GET {
                StatusCode::MOVED_PERMANENTLY
            } else {
                StatusCode::TEMPORARY_REDIRECT
            };
            return RouteMatch::Redirect {
                location: trimmed.to_string(),
                code,
            };
        }

        RouteMatch::NotFound
    }

    fn find(&self, method: &Method, path: &str) -> Option<(Endpoint, Option<String>)> {
        let segments: Vec<&str> = split_path(path).collect();
        self.entries
            .iter()
            .filter(|(route, _)| route.method == *method)
            .find_map(|(route, pattern)| {
                match_segments(pattern, &segments).map(|id| (route.endpoint, id))
            })
    }
}

impl Default for Router {
    fn default() -> Self {
        Self::new()
    }
}

/// Split on `/`, ignoring the leading one but keeping a trailing empty segment
fn split_path(path: &str) -> impl Iterator<Item = &str> {
    path.strip_prefix('/').unwrap_or(path).split('/')
}

/// Returns the captured parameter (if any) when every segment matches
fn match_segments(pattern: &[String], segments: &[&str]) -> Option<Option<String>> {
    if pattern.len() != segments.len() {
        return None;
    }

    let mut captured = None;
    for (expected, actual) in pattern.iter().zip(segments) {
        if expected.starts_with(':') {
            if actual.is_empty() {
                return None;
            }
            captured = Some((*actual).to_string());
        } else if expected.as_str() != *actual {
            return None;
        }
    }
    Some(captured)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn found(endpoint: Endpoint, id: Option<&str>) -> RouteMatch {
        RouteMatch::Found {
            endpoint,
            id: id.map(String::from),
        }
    }

    #[test]
    fn test_match_static_routes() {
        let router = Router::new();
        assert_eq!(
            router.match_route(&Method::GET, "/api/v1/health"),
            found(Endpoint::Health, None)
        );
        assert_eq!(
            router.match_route(&Method::GET, "/api/v1/users"),
            found(Endpoint::ListUsers, None)
        );
        assert_eq!(
            router.match_route(&Method::POST, "/api/v1/users"),
            found(Endpoint::CreateUser, None)
        );
    }

    #[test]
    fn test_match_id_param() {
        let router = Router::new();
        assert_eq!(
            router.match_route(&Method::GET, "/api/v1/users/42"),
            found(Endpoint::GetUser, Some("42"))
        );
        assert_eq!(
            router.match_route(&Method::PUT, "/api/v1/users/abc"),
            found(Endpoint::UpdateUser, Some("abc"))
        );
        assert_eq!(
            router.match_route(&Method::DELETE, "/api/v1/users/9"),
            found(Endpoint::DeleteUser, Some("9"))
        );
    }

    #[test]
    fn test_no_match() {
        let router = Router::new();
        assert_eq!(router.match_route(&Method::GET, "/"), RouteMatch::NotFound);
        assert_eq!(
            router.match_route(&Method::GET, "/api/v2/users"),
            RouteMatch::NotFound
        );
        assert_eq!(
            router.match_route(&Method::GET, "/api/v1/users/1/posts"),
            RouteMatch::NotFound
        );
        // Method mismatch is reported the same way as an unknown path
        assert_eq!(
            router.match_route(&Method::PATCH, "/api/v1/users/1"),
            RouteMatch::NotFound
        );
        assert_eq!(
            router.match_route(&Method::DELETE, "/api/v1/users"),
            RouteMatch::NotFound
        );
    }

    #[test]
    fn test_trailing_slash_redirect() {
        let router = Router::new();
        assert_eq!(
            router.match_route(&Method::GET, "/api/v1/users/"),
            RouteMatch::Redirect {
                location: "/api/v1/users".to_string(),
                code: StatusCode::MOVED_PERMANENTLY,
            }
        );
        assert_eq!(
            router.match_route(&Method::POST, "/api/v1/users/"),
            RouteMatch::Redirect {
                location: "/api/v1/users".to_string(),
                code: StatusCode::TEMPORARY_REDIRECT,
            }
        );
        assert_eq!(
            router.match_route(&Method::PUT, "/api/v1/users/7/"),
            RouteMatch::Redirect {
                location: "/api/v1/users/7".to_string(),
                code: StatusCode::TEMPORARY_REDIRECT,
            }
        );
        assert_eq!(
            router.match_route(&Method::GET, "/nothing/"),
            RouteMatch::NotFound
        );
    }

    #[test]
    fn test_route_table() {
        let router = Router::new();
        let paths: Vec<String> = router.routes().map(Route::full_path).collect();
        assert_eq!(paths.len(), 6);
        assert!(paths.contains(&"/api/v1/users/:id".to_string()));
        assert!(paths.iter().all(|p| p.starts_with(API_PREFIX)));
    }
}
