//! Generic in-memory collection

use serde::de::DeserializeOwned;
use serde::Serialize;
use serde_json::{Map, Value};
use std::sync::{PoisonError, RwLock, RwLockReadGuard, RwLockWriteGuard};

use super::{Entity, ResourceRepository};
use crate::logger;

struct Rows<T> {
    items: Vec<T>,
    /// Next id handed out by `insert`, never reused after a delete
    next_id: u64,
}

/// Ordered, lock-guarded list of entities of one resource type
pub struct Collection<T> {
    rows: RwLock<Rows<T>>,
}

impl<T: Entity> Collection<T> {
    pub fn new() -> Self {
        Self::with_items(Vec::new())
    }

    /// Build a collection from existing rows, continuing ids after the highest one
    pub fn with_items(items: Vec<T>) -> Self {
        let next_id = items.iter().map(Entity::id).max().unwrap_or(0) + 1;
        Self {
            rows: RwLock::new(Rows { items, next_id }),
        }
    }

    fn read(&self) -> RwLockReadGuard<'_, Rows<T>> {
        self.rows.read().unwrap_or_else(PoisonError::into_inner)
    }

    fn write(&self) -> RwLockWriteGuard<'_, Rows<T>> {
        self.rows.write().unwrap_or_else(PoisonError::into_inner)
    }

    /// Append an entity under a freshly assigned id
    pub fn insert(&self, mut item: T) -> T {
        let mut rows = self.write();
        item.set_id(rows.next_id);
        rows.next_id += 1;
        rows.items.push(item.clone());
        item
    }

    pub fn find(&self, id: u64) -> Option<T> {
        self.read().items.iter().find(|item| item.id() == id).cloned()
    }

    /// Entities matching `predicate`, in insertion order
    pub fn select(&self, predicate: impl Fn(&T) -> bool) -> Vec<T> {
        self.read()
            .items
            .iter()
            .filter(|item| predicate(item))
            .cloned()
            .collect()
    }

    /// Swap the entity stored under `id`; returns false if there is none
    pub fn replace(&self, id: u64, mut item: T) -> bool {
        item.set_id(id);
        let mut rows = self.write();
        match rows.items.iter_mut().find(|existing| existing.id() == id) {
            Some(slot) => {
                *slot = item;
                true
            }
            None => false,
        }
    }

    pub fn remove(&self, id: u64) -> bool {
        let mut rows = self.write();
        let before = rows.items.len();
        rows.items.retain(|item| item.id() != id);
        rows.items.len() != before
    }

    #[cfg(test)]
    pub fn len(&self) -> usize {
        self.read().items.len()
    }

    #[cfg(test)]
    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

impl<T: Entity> Default for Collection<T> {
    fn default() -> Self {
        Self::new()
    }
}

impl<T> ResourceRepository for Collection<T>
where
    T: Entity + Serialize + DeserializeOwned + Send + Sync,
{
    fn list(&self) -> Value {
        to_json(&self.read().items)
    }

    fn get(&self, id: u64) -> Value {
        self.find(id)
            .map_or_else(|| Value::Object(Map::new()), |item| to_json(&item))
    }

    fn create(&self, payload: Value) -> serde_json::Result<Value> {
        let item: T = serde_json::from_value(payload)?;
        Ok(to_json(&self.insert(item)))
    }

    fn update(&self, id: u64, payload: Value) -> serde_json::Result<()> {
        let item: T = serde_json::from_value(payload)?;
        self.replace(id, item);
        Ok(())
    }

    fn delete(&self, id: u64) {
        self.remove(id);
    }
}

/// Serialize an entity or list of entities, falling back to `null`
pub fn to_json<S: Serialize + ?Sized>(value: &S) -> Value {
    serde_json::to_value(value).unwrap_or_else(|e| {
        logger::log_error(&format!("Failed to serialize entity: {e}"));
        Value::Null
    })
}
