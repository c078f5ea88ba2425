//! Routing module
//!
//! Maps method + path onto the users API endpoints.

mod table;

pub use table::{Endpoint, Route, RouteMatch, Router};
