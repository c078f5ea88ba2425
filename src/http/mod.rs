//! HTTP protocol layer module
//!
//! Response builders and the CORS header policy, kept apart from the
//! users endpoints themselves.

pub mod cors;
pub mod response;

// Re-export commonly used types
pub use cors::CorsPolicy;
pub use response::{
    build_404_response, build_preflight_response, build_redirect_response_with_code,
    json_response,
};
