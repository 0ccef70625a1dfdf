//! Resource registry module
//!
//! Fixed table from resource name and operation to the backing repository,
//! plus a side table of named query filters.

use hyper::{Method, StatusCode};
use serde_json::Value;

use crate::resources::{
    filters, seed, Animal, Collection, Customer, Employee, Location, ResourceRepository,
};

/// The closed set of resources served
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ResourceName {
    Animals,
    Customers,
    Employees,
    Locations,
}

impl ResourceName {
    pub const ALL: [Self; 4] = [
        Self::Animals,
        Self::Customers,
        Self::Employees,
        Self::Locations,
    ];

    /// Match a path segment; unrecognized names yield `None`
    pub fn from_segment(segment: &str) -> Option<Self> {
        Self::ALL
            .into_iter()
            .find(|resource| resource.as_str() == segment)
    }

    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Animals => "animals",
            Self::Customers => "customers",
            Self::Employees => "employees",
            Self::Locations => "locations",
        }
    }
}

impl std::fmt::Display for ResourceName {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// CRUD operation selected by the HTTP method
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Operation {
    Read,
    Create,
    Update,
    Delete,
}

impl Operation {
    /// Map a method to its operation; OPTIONS and unsupported verbs have none
    pub fn for_method(method: &Method) -> Option<Self> {
        match *method {
            Method::GET => Some(Self::Read),
            Method::POST => Some(Self::Create),
            Method::PUT => Some(Self::Update),
            Method::DELETE => Some(Self::Delete),
            _ => None,
        }
    }

    /// Response status for this operation
    ///
    /// Decided before any repository is consulted, so an unknown resource or
    /// missing entity reports the same status as a success.
    pub const fn status(self) -> StatusCode {
        match self {
            Self::Read => StatusCode::OK,
            Self::Create => StatusCode::CREATED,
            Self::Update | Self::Delete => StatusCode::NO_CONTENT,
        }
    }

    /// Whether the request body is decoded as a JSON payload
    pub const fn takes_payload(self) -> bool {
        matches!(self, Self::Create | Self::Update)
    }
}

/// A resolved registry entry
pub struct Route<'a> {
    pub resource: ResourceName,
    pub operation: Operation,
    pub repository: &'a dyn ResourceRepository,
}

/// A named filter capability of one resource
pub struct FilterRoute {
    pub resource: ResourceName,
    pub key: &'static str,
    apply: fn(&Registry, &str) -> Value,
}

impl FilterRoute {
    pub fn apply(&self, registry: &Registry, value: &str) -> Value {
        (self.apply)(registry, value)
    }
}

/// Filters in evaluation order
///
/// When a query carries several recognized keys every matching filter runs
/// and the last one in this order provides the response body.
pub static FILTER_ORDER: [FilterRoute; 4] = [
    FilterRoute {
        resource: ResourceName::Customers,
        key: "email",
        apply: customers_by_email,
    },
    FilterRoute {
        resource: ResourceName::Animals,
        key: "location_id",
        apply: animals_by_location,
    },
    FilterRoute {
        resource: ResourceName::Employees,
        key: "location_id",
        apply: employees_by_location,
    },
    FilterRoute {
        resource: ResourceName::Animals,
        key: "status",
        apply: animals_by_status,
    },
];

fn customers_by_email(registry: &Registry, value: &str) -> Value {
    filters::customers_by_email(&registry.customers, value)
}

fn animals_by_location(registry: &Registry, value: &str) -> Value {
    filters::animals_by_location(&registry.animals, value)
}

fn employees_by_location(registry: &Registry, value: &str) -> Value {
    filters::employees_by_location(&registry.employees, value)
}

fn animals_by_status(registry: &Registry, value: &str) -> Value {
    filters::animals_by_status(&registry.animals, value)
}

/// Owner of the four resource collections
#[derive(Default)]
pub struct Registry {
    animals: Collection<Animal>,
    customers: Collection<Customer>,
    employees: Collection<Employee>,
    locations: Collection<Location>,
}

impl Registry {
    pub fn empty() -> Self {
        Self::default()
    }

    /// Registry pre-populated with the sample kennel data
    pub fn seeded() -> Self {
        Self {
            animals: Collection::with_items(seed::animals()),
            customers: Collection::with_items(seed::customers()),
            employees: Collection::with_items(seed::employees()),
            locations: Collection::with_items(seed::locations()),
        }
    }

    pub fn repository(&self, resource: ResourceName) -> &dyn ResourceRepository {
        match resource {
            ResourceName::Animals => &self.animals,
            ResourceName::Customers => &self.customers,
            ResourceName::Employees => &self.employees,
            ResourceName::Locations => &self.locations,
        }
    }

    /// Resolve `(resource, operation)`; `None` when the resource is unknown
    pub fn lookup(&self, resource: &str, operation: Operation) -> Option<Route<'_>> {
        let resource = ResourceName::from_segment(resource)?;
        Some(Route {
            resource,
            operation,
            repository: self.repository(resource),
        })
    }

    /// Filters registered for `resource`, in evaluation order
    pub fn filter_routes(resource: ResourceName) -> impl Iterator<Item = &'static FilterRoute> {
        FILTER_ORDER
            .iter()
            .filter(move |route| route.resource == resource)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_resource_names_round_trip() {
        for resource in ResourceName::ALL {
            assert_eq!(ResourceName::from_segment(resource.as_str()), Some(resource));
        }
        assert_eq!(ResourceName::from_segment("Animals"), None);
        assert_eq!(ResourceName::from_segment(""), None);
    }

    #[test]
    fn test_every_resource_supports_every_operation() {
        let registry = Registry::empty();
        let operations = [
            Operation::Read,
            Operation::Create,
            Operation::Update,
            Operation::Delete,
        ];
        for resource in ResourceName::ALL {
            for operation in operations {
                let route = registry.lookup(resource.as_str(), operation).unwrap();
                assert_eq!(route.resource, resource);
                assert_eq!(route.operation, operation);
            }
        }
    }

    #[test]
    fn test_unknown_resource_is_not_found() {
        let registry = Registry::empty();
        assert!(registry.lookup("owners", Operation::Read).is_none());
    }

    #[test]
    fn test_method_mapping() {
        assert_eq!(Operation::for_method(&Method::GET), Some(Operation::Read));
        assert_eq!(Operation::for_method(&Method::POST), Some(Operation::Create));
        assert_eq!(Operation::for_method(&Method::PUT), Some(Operation::Update));
        assert_eq!(Operation::for_method(&Method::DELETE), Some(Operation::Delete));
        assert_eq!(Operation::for_method(&Method::OPTIONS), None);
        assert_eq!(Operation::for_method(&Method::PATCH), None);
    }

    #[test]
    fn test_filter_table() {
        let keys = |resource| {
            Registry::filter_routes(resource)
                .map(|route| route.key)
                .collect::<Vec<_>>()
        };
        assert_eq!(keys(ResourceName::Animals), vec!["location_id", "status"]);
        assert_eq!(keys(ResourceName::Customers), vec!["email"]);
        assert_eq!(keys(ResourceName::Employees), vec!["location_id"]);
        assert!(keys(ResourceName::Locations).is_empty());
    }

    #[test]
    fn test_seeded_registry_has_sample_rows() {
        let registry = Registry::seeded();
        let animals = registry.repository(ResourceName::Animals).list();
        assert_eq!(animals.as_array().map(Vec::len), Some(3));
        let location = registry.repository(ResourceName::Locations).get(2);
        assert_eq!(location["name"], "Nashville South");
    }
}
