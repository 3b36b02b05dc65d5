use anyhow::Result;
use serde::{Deserialize, Serialize};
use std::fs;

#[derive(Debug, Default, Deserialize, Serialize)]
pub struct Config {
    #[serde(default)]
    pub server: ServerConfig,
    #[serde(default)]
    pub database: DatabaseConfig,
    #[serde(default)]
    pub store: StoreConfig,
}

#[derive(Debug, Deserialize, Serialize)]
pub struct ServerConfig {
    #[serde(default = "default_bind_address")]
    pub bind_address: String,
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            bind_address: default_bind_address(),
        }
    }
}

#[derive(Debug, Deserialize, Serialize)]
pub struct DatabaseConfig {
    #[serde(default = "default_database_engine")]
    pub engine: DatabaseEngine,
    #[serde(default = "default_database_url")]
    pub url: String,
    #[serde(default = "default_max_connections")]
    pub max_connections: u32,
}

impl Default for DatabaseConfig {
    fn default() -> Self {
        Self {
            engine: default_database_engine(),
            url: default_database_url(),
            max_connections: default_max_connections(),
        }
    }
}

#[derive(Debug, Clone, Copy, Default, Deserialize, Serialize, PartialEq, Eq)]
#[serde(rename_all = "lowercase")]
pub enum DatabaseEngine {
    #[default]
    Sqlite,
    Postgres,
}

impl From<DatabaseEngine> for parley_db::DatabaseEngine {
    fn from(engine: DatabaseEngine) -> Self {
        match engine {
            DatabaseEngine::Sqlite => parley_db::DatabaseEngine::Sqlite,
            DatabaseEngine::Postgres => parley_db::DatabaseEngine::Postgres,
        }
    }
}

#[derive(Debug, Default, Deserialize, Serialize)]
pub struct StoreConfig {
    #[serde(default)]
    pub backend: StoreBackend,
}

/// Where messages live: the configured database, or process memory.
#[derive(Debug, Clone, Copy, Default, Deserialize, Serialize, PartialEq, Eq)]
#[serde(rename_all = "lowercase")]
pub enum StoreBackend {
    #[default]
    Database,
    Memory,
}

fn default_bind_address() -> String {
    "0.0.0.0:8080".into()
}
fn default_database_engine() -> DatabaseEngine {
    DatabaseEngine::Sqlite
}
fn default_database_url() -> String {
    "sqlite://./data/parley.db?mode=rwc".into()
}
fn default_max_connections() -> u32 {
    20
}

impl Config {
    pub fn load(path: &str) -> Result<Self> {
        let mut config = if std::path::Path::new(path).exists() {
            let content = fs::read_to_string(path)?;
            toml::from_str(&content)?
        } else {
            tracing::info!(
                "Config file not found at '{}', generating defaults...",
                path
            );
            let config = Config::default();

            if let Some(parent) = std::path::Path::new(path).parent() {
                fs::create_dir_all(parent)?;
            }

            fs::write(path, generate_config_template(&config))?;
            tracing::info!("Generated default config at '{}'", path);
            config
        };

        config.apply_env_overrides(|key| std::env::var(key).ok());
        Ok(config)
    }

    pub fn apply_env_overrides(&mut self, lookup: impl Fn(&str) -> Option<String>) {
        if let Some(value) = lookup("PARLEY_BIND_ADDRESS") {
            self.server.bind_address = value;
        }
        if let Some(value) = lookup("PARLEY_DATABASE_URL") {
            self.database.url = value;
        }
        if let Some(value) = lookup("PARLEY_DATABASE_ENGINE") {
            let normalized = value.trim().to_ascii_lowercase();
            match normalized.as_str() {
                "sqlite" => self.database.engine = DatabaseEngine::Sqlite,
                "postgres" | "postgresql" => self.database.engine = DatabaseEngine::Postgres,
                _ => {
                    tracing::warn!(
                        "Ignoring invalid PARLEY_DATABASE_ENGINE value '{}'; expected sqlite or postgres",
                        value
                    );
                }
            }
        }
        if let Some(value) = lookup("PARLEY_DATABASE_MAX_CONNECTIONS") {
            if let Ok(parsed) = value.parse::<u32>() {
                self.database.max_connections = parsed;
            }
        }
        if let Some(value) = lookup("PARLEY_STORE_BACKEND") {
            match value.trim().to_ascii_lowercase().as_str() {
                "database" => self.store.backend = StoreBackend::Database,
                "memory" => self.store.backend = StoreBackend::Memory,
                _ => {
                    tracing::warn!(
                        "Ignoring invalid PARLEY_STORE_BACKEND value '{}'; expected database or memory",
                        value
                    );
                }
            }
        }
    }
}

fn generate_config_template(config: &Config) -> String {
    format!(
        r#"# Parley Server Configuration
# Generated automatically on first run. Edit as needed.

[server]
bind_address = "{bind_address}"

[database]
# "sqlite" or "postgres"; must match the url scheme.
engine = "{db_engine}"
url = "{db_url}"
max_connections = {max_connections}

[store]
# "database" keeps messages in the database above.
# "memory" keeps them in process memory and loses them on restart.
backend = "{backend}"
"#,
        bind_address = config.server.bind_address,
        db_engine = match config.database.engine {
            DatabaseEngine::Sqlite => "sqlite",
            DatabaseEngine::Postgres => "postgres",
        },
        db_url = config.database.url,
        max_connections = config.database.max_connections,
        backend = match config.store.backend {
            StoreBackend::Database => "database",
            StoreBackend::Memory => "memory",
        },
    )
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;

    #[test]
    fn missing_file_generates_loadable_template() {
        let dir = tempfile::tempdir().expect("tempdir");
        let path = dir.path().join("config").join("parley.toml");
        let path = path.to_string_lossy().into_owned();

        let generated = Config::load(&path).expect("generate");
        assert!(std::path::Path::new(&path).exists());

        let content = fs::read_to_string(&path).expect("read template");
        let reparsed: Config = toml::from_str(&content).expect("parse template");
        assert_eq!(reparsed.database.url, generated.database.url);
        assert_eq!(reparsed.store.backend, StoreBackend::Database);
    }

    #[test]
    fn partial_file_falls_back_to_defaults() {
        let config: Config = toml::from_str(
            r#"
            [store]
            backend = "memory"
            "#,
        )
        .expect("parse");
        assert_eq!(config.store.backend, StoreBackend::Memory);
        assert_eq!(config.server.bind_address, "0.0.0.0:8080");
        assert_eq!(config.database.engine, DatabaseEngine::Sqlite);
        assert_eq!(config.database.max_connections, 20);
    }

    #[test]
    fn env_overrides_apply_and_invalid_values_are_ignored() {
        let env: HashMap<&str, &str> = HashMap::from([
            ("PARLEY_BIND_ADDRESS", "127.0.0.1:9000"),
            ("PARLEY_DATABASE_ENGINE", "postgresql"),
            ("PARLEY_DATABASE_URL", "postgres://localhost/parley"),
            ("PARLEY_DATABASE_MAX_CONNECTIONS", "not-a-number"),
            ("PARLEY_STORE_BACKEND", "redis"),
        ]);
        let mut config = Config::default();
        config.apply_env_overrides(|key| env.get(key).map(|v| v.to_string()));

        assert_eq!(config.server.bind_address, "127.0.0.1:9000");
        assert_eq!(config.database.engine, DatabaseEngine::Postgres);
        assert_eq!(config.database.url, "postgres://localhost/parley");
        assert_eq!(config.database.max_connections, 20);
        assert_eq!(config.store.backend, StoreBackend::Database);
    }
}
