//! Request handler module
//!
//! Responsible for turning hyper requests into registry calls and back into
//! responses.

pub mod dispatcher;
pub mod router;

// Re-export main entry point
pub use router::handle_request;
