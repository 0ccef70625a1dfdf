//! HTTP protocol layer module
//!
//! Response framing shared by every route, decoupled from resource logic.

pub mod response;

// Re-export commonly used types
pub use response::{write_outcome, HttpOutcome};
