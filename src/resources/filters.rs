//! Query filters over single resource collections
//!
//! Each filter takes the raw query-string value and returns a JSON array of
//! matching entities. A value that cannot be interpreted matches nothing.

use serde_json::Value;

use super::collection::to_json;
use super::{Animal, Collection, Customer, Employee};

pub fn customers_by_email(customers: &Collection<Customer>, email: &str) -> Value {
    to_json(&customers.select(|customer| customer.email == email))
}

pub fn animals_by_location(animals: &Collection<Animal>, location_id: &str) -> Value {
    let wanted = parse_id(location_id);
    to_json(&animals.select(|animal| wanted.is_some() && animal.location_id == wanted))
}

pub fn employees_by_location(employees: &Collection<Employee>, location_id: &str) -> Value {
    let wanted = parse_id(location_id);
    to_json(&employees.select(|employee| wanted.is_some() && employee.location_id == wanted))
}

pub fn animals_by_status(animals: &Collection<Animal>, status: &str) -> Value {
    to_json(&animals.select(|animal| animal.status == status))
}

fn parse_id(value: &str) -> Option<u64> {
    value.trim().parse().ok()
}
