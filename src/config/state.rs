// Application state module
// Shared by every connection task

use super::types::Config;
use crate::routing::Registry;

/// Application state
pub struct AppState {
    pub config: Config,
    /// Resource collections; each one carries its own lock
    pub registry: Registry,
}

impl AppState {
    pub fn new(config: &Config) -> Self {
        let registry = if config.store.seed_sample_data {
            Registry::seeded()
        } else {
            Registry::empty()
        };

        Self {
            config: config.clone(),
            registry,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::routing::{Operation, ResourceName};

    #[test]
    fn test_seed_flag_controls_initial_rows() {
        let mut cfg = Config::load_from("does-not-exist/kennels").unwrap();
        let seeded = AppState::new(&cfg);
        let animals = seeded.registry.repository(ResourceName::Animals).list();
        assert_eq!(animals.as_array().map(Vec::len), Some(3));

        cfg.store.seed_sample_data = false;
        let empty = AppState::new(&cfg);
        let route = empty.registry.lookup("animals", Operation::Read).unwrap();
        assert_eq!(route.repository.list(), serde_json::json!([]));
    }
}
