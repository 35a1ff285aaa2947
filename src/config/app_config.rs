use serde::Deserialize;

/// Application configuration
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default)]
pub struct AppConfig {
    pub server: ServerConfig,
    pub logging: LoggingConfig,
    pub storage: StorageConfig,
    pub pagination: PaginationConfig,
}

#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct ServerConfig {
    pub host: String,
    pub port: u16,
}

#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct LoggingConfig {
    pub level: String,
    pub format: LogFormat,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize, Default)]
#[serde(rename_all = "lowercase")]
pub enum LogFormat {
    #[default]
    Pretty,
    Json,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize, Default)]
#[serde(rename_all = "lowercase")]
pub enum StorageBackend {
    #[default]
    Memory,
    Postgres,
}

#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default)]
pub struct StorageConfig {
    pub backend: StorageBackend,
    /// Falls back to the `DATABASE_URL` environment variable when unset
    pub database_url: Option<String>,
    pub max_connections: u32,
}

/// Page sizes applied to list endpoints
#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize)]
#[serde(default)]
pub struct PaginationConfig {
    pub default_page_size: i64,
    pub max_page_size: i64,
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            host: "0.0.0.0".to_string(),
            port: 8080,
        }
    }
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            level: "info".to_string(),
            format: LogFormat::default(),
        }
    }
}

impl Default for PaginationConfig {
    fn default() -> Self {
        Self {
            default_page_size: 10,
            max_page_size: 100,
        }
    }
}

impl StorageConfig {
    /// Configured URL, or `DATABASE_URL` from the environment
    pub fn resolved_database_url(&self) -> Option<String> {
        self.database_url_or(|| std::env::var("DATABASE_URL").ok())
    }

    /// Blank values on either side count as unset
    fn database_url_or(&self, fallback: impl FnOnce() -> Option<String>) -> Option<String> {
        self.database_url
            .clone()
            .filter(|url| !url.trim().is_empty())
            .or_else(fallback)
            .filter(|url| !url.trim().is_empty())
    }

    pub fn max_connections(&self) -> u32 {
        if self.max_connections == 0 {
            10
        } else {
            self.max_connections
        }
    }
}

impl AppConfig {
    /// Load `config/default`, `config/local`, then `APP__`-prefixed environment variables
    pub fn load() -> Result<Self, config::ConfigError> {
        let config = config::Config::builder()
            .add_source(config::File::with_name("config/default").required(false))
            .add_source(config::File::with_name("config/local").required(false))
            .add_source(
                config::Environment::with_prefix("APP")
                    .prefix_separator("__")
                    .separator("__")
                    .try_parsing(true),
            )
            .build()?;

        let loaded: Self = config.try_deserialize()?;
        loaded.validate()?;
        Ok(loaded)
    }

    fn validate(&self) -> Result<(), config::ConfigError> {
        let pagination = &self.pagination;

        if pagination.default_page_size < 1 {
            return Err(config::ConfigError::Message(format!(
                "pagination.default_page_size must be at least 1, got {}",
                pagination.default_page_size
            )));
        }

        if pagination.max_page_size < pagination.default_page_size {
            return Err(config::ConfigError::Message(format!(
                "pagination.max_page_size ({}) must not be below default_page_size ({})",
                pagination.max_page_size, pagination.default_page_size
            )));
        }

        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults() {
        let config = AppConfig::default();

        assert_eq!(config.server.port, 8080);
        assert_eq!(config.logging.format, LogFormat::Pretty);
        assert_eq!(config.storage.backend, StorageBackend::Memory);
        assert_eq!(config.pagination.default_page_size, 10);
        assert_eq!(config.pagination.max_page_size, 100);
        assert!(config.validate().is_ok());
    }

    #[test]
    fn test_partial_sections_fill_defaults() {
        let config: AppConfig = serde_json::from_str(
            r#"{"storage": {"backend": "postgres"}, "pagination": {"max_page_size": 50}}"#,
        )
        .unwrap();

        assert_eq!(config.storage.backend, StorageBackend::Postgres);
        assert_eq!(config.storage.max_connections(), 10);
        assert_eq!(config.pagination.default_page_size, 10);
        assert_eq!(config.pagination.max_page_size, 50);
        assert_eq!(config.server.host, "0.0.0.0");
    }

    #[test]
    fn test_invalid_pagination_rejected() {
        let mut config = AppConfig::default();
        config.pagination.default_page_size = 0;
        assert!(config.validate().is_err());

        let mut config = AppConfig::default();
        config.pagination.max_page_size = 5;
        assert!(config.validate().is_err());
    }

    #[test]
    fn test_explicit_database_url_wins() {
        let storage = StorageConfig {
            database_url: Some("postgres://localhost/users".to_string()),
            ..Default::default()
        };

        assert_eq!(
            storage.resolved_database_url().as_deref(),
            Some("postgres://localhost/users")
        );
    }

    #[test]
    fn test_blank_database_url_falls_back() {
        let storage = StorageConfig {
            database_url: Some("   ".to_string()),
            ..Default::default()
        };

        assert_eq!(
            storage
                .database_url_or(|| Some("postgres://env/users".to_string()))
                .as_deref(),
            Some("postgres://env/users")
        );
        assert_eq!(storage.database_url_or(|| Some(String::new())), None);
        assert_eq!(storage.database_url_or(|| None), None);
    }
}
