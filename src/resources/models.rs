// Kennel entity types
//
// Every field is defaulted and unknown fields are kept, so any JSON object
// sent by a client is a valid payload.

use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

use super::Entity;

/// Implements `Entity` for structs with a `pub id: u64` field
macro_rules! impl_entity {
    ($($ty:ty),+ $(,)?) => {
        $(
            impl Entity for $ty {
                fn id(&self) -> u64 {
                    self.id
                }

                fn set_id(&mut self, id: u64) {
                    self.id = id;
                }
            }
        )+
    };
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Animal {
    pub id: u64,
    pub name: String,
    pub species: String,
    /// Adoption status, e.g. "Admitted" or "adoptable"
    pub status: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub location_id: Option<u64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub customer_id: Option<u64>,
    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Customer {
    pub id: u64,
    pub name: String,
    pub address: String,
    pub email: String,
    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Employee {
    pub id: u64,
    pub name: String,
    pub address: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub location_id: Option<u64>,
    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Location {
    pub id: u64,
    pub name: String,
    pub address: String,
    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

impl_entity!(Animal, Customer, Employee, Location);
