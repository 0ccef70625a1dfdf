//! Resource storage module
//!
//! In-memory collections backing the four kennel resources.
//! Each collection is guarded by its own lock, so connections served
//! concurrently never mutate a resource type at the same time.

mod collection;
pub mod filters;
mod models;
pub mod seed;

pub use collection::Collection;
pub use models::{Animal, Customer, Employee, Location};

use serde_json::Value;

/// An entity stored in a [`Collection`]
pub trait Entity: Clone {
    fn id(&self) -> u64;
    fn set_id(&mut self, id: u64);
}

/// CRUD capability exposed to the request dispatcher
///
/// Payloads and results are JSON values so every resource fits behind
/// the same trait object. Lookups of missing ids return an empty object
/// instead of failing; update and delete of a missing id do nothing.
pub trait ResourceRepository: Send + Sync {
    fn list(&self) -> Value;
    fn get(&self, id: u64) -> Value;
    fn create(&self, payload: Value) -> serde_json::Result<Value>;
    fn update(&self, id: u64, payload: Value) -> serde_json::Result<()>;
    fn delete(&self, id: u64);
}
