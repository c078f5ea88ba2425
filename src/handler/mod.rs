//! Request handler module
//!
//! Request dispatch plus the users endpoints behind it.

mod body;
mod error;
pub mod router;
mod users;

// Re-export main entry point
pub use router::handle_request;
