// Sample kennel data loaded at startup when `store.seed_sample_data` is on

use super::{Animal, Customer, Employee, Location};

fn text(value: &str) -> String {
    value.to_string()
}

pub fn locations() -> Vec<Location> {
    vec![
        Location {
            id: 1,
            name: text("Nashville North"),
            address: text("8422 Johnson Pike"),
            ..Location::default()
        },
        Location {
            id: 2,
            name: text("Nashville South"),
            address: text("209 Emory Drive"),
            ..Location::default()
        },
    ]
}

pub fn animals() -> Vec<Animal> {
    vec![
        Animal {
            id: 1,
            name: text("Snickers"),
            species: text("Dog"),
            status: text("Admitted"),
            location_id: Some(1),
            customer_id: Some(4),
            ..Animal::default()
        },
        Animal {
            id: 2,
            name: text("Roman"),
            species: text("Dog"),
            status: text("Admitted"),
            location_id: Some(1),
            customer_id: Some(2),
            ..Animal::default()
        },
        Animal {
            id: 3,
            name: text("Blue"),
            species: text("Cat"),
            status: text("Admitted"),
            location_id: Some(2),
            customer_id: Some(1),
            ..Animal::default()
        },
    ]
}

pub fn customers() -> Vec<Customer> {
    vec![Customer {
        id: 1,
        name: text("Ryan Tanay"),
        address: text("7002 Chestnut Ct"),
        email: text("ryan@tanay.com"),
        ..Customer::default()
    }]
}

pub fn employees() -> Vec<Employee> {
    vec![Employee {
        id: 1,
        name: text("Jenna Solis"),
        address: text("301 Main St"),
        location_id: Some(1),
        ..Employee::default()
    }]
}
