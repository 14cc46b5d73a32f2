use super::{types::Config, ConfigError};

/// Validate configuration beyond what serde enforces.
pub fn validate_config(config: &Config) -> Result<(), ConfigError> {
    if config.server.port == 0 {
        return Err(ConfigError::ValidationError(
            "server.port cannot be 0".to_string(),
        ));
    }

    if config.local_store.url.is_empty() {
        return Err(ConfigError::ValidationError(
            "local_store.url cannot be empty".to_string(),
        ));
    }

    if config.coordinator.min_query_len == 0 {
        return Err(ConfigError::ValidationError(
            "coordinator.min_query_len must be at least 1".to_string(),
        ));
    }

    if config.coordinator.thin_results_franchise < config.coordinator.thin_results {
        return Err(ConfigError::ValidationError(
            "coordinator.thin_results_franchise must be >= coordinator.thin_results".to_string(),
        ));
    }

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::{CoordinatorConfig, LocalStoreConfig, ServerConfig};

    fn valid_config() -> Config {
        Config {
            server: ServerConfig::default(),
            local_store: LocalStoreConfig {
                url: "http://localhost:54321".to_string(),
                api_key: "key".to_string(),
                timeout_secs: 5,
            },
            external_catalog: None,
            coordinator: CoordinatorConfig::default(),
        }
    }

    #[test]
    fn test_validate_valid_config() {
        assert!(validate_config(&valid_config()).is_ok());
    }

    #[test]
    fn test_validate_port_zero_fails() {
        let mut config = valid_config();
        config.server.port = 0;
        assert!(validate_config(&config).is_err());
    }

    #[test]
    fn test_validate_empty_store_url_fails() {
        let mut config = valid_config();
        config.local_store.url = String::new();
        assert!(validate_config(&config).is_err());
    }

    #[test]
    fn test_validate_inverted_thin_thresholds_fail() {
        let mut config = valid_config();
        config.coordinator.thin_results = 10;
        config.coordinator.thin_results_franchise = 5;
        assert!(validate_config(&config).is_err());
    }
}
