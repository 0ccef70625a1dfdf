//! Routing module
//!
//! Provides the request-target side of dispatch:
//! - URL parsing into resource, id and query filters
//! - The resource registry mapping resources and operations to repositories

mod parser;
mod registry;

pub use parser::{parse, ParsedRequest};
pub use registry::{Operation, Registry, ResourceName, Route};
