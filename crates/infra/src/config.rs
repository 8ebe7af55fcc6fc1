//! Configuration loading and representation.
//!
//! Sources, lowest to highest priority:
//! 1. Built-in defaults
//! 2. `jobboard.toml` in the working directory (optional)
//! 3. Environment variables prefixed `JOBBOARD_`, `__` separating sections
//!    (`JOBBOARD_STORE__KIND=postgres` -> `store.kind`)

use figment::{
    Figment,
    providers::{Env, Format, Serialized, Toml},
};
use serde::{Deserialize, Serialize};
use thiserror::Error;

use jobboard_observability::LogFormat;

pub const CONFIG_FILE: &str = "jobboard.toml";
pub const ENV_PREFIX: &str = "JOBBOARD_";

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("configuration error: {0}")]
    Figment(#[from] figment::Error),

    /// A `.env` file exists but could not be read or parsed.
    #[error("failed to load .env: {0}")]
    Dotenv(#[from] dotenvy::Error),

    /// A field needed by the selected options is missing.
    #[error("configuration field '{field}' is required: {reason}")]
    Missing { field: String, reason: String },
}

/// Which [`JobStore`](crate::store::JobStore) backs the board.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum StoreKind {
    #[default]
    Memory,
    Postgres,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct StoreSettings {
    pub kind: StoreKind,
    pub database_url: Option<String>,
    pub max_connections: u32,
    pub acquire_timeout_secs: u64,
    pub run_migrations: bool,
    /// Fill the in-memory store with demo postings at startup.
    pub seed_demo_data: bool,
}

impl Default for StoreSettings {
    fn default() -> Self {
        Self {
            kind: StoreKind::Memory,
            database_url: None,
            max_connections: 5,
            acquire_timeout_secs: 5,
            run_migrations: true,
            seed_demo_data: true,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct Settings {
    pub listen_addr: String,
    pub log_format: LogFormat,
    pub store: StoreSettings,
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            listen_addr: "0.0.0.0:8080".to_string(),
            log_format: LogFormat::Json,
            store: StoreSettings::default(),
        }
    }
}

impl Settings {
    /// Load from defaults, `jobboard.toml` and the environment.
    pub fn load() -> Result<Self, ConfigError> {
        let settings: Self = Self::figment().extract()?;
        settings.validate()
    }

    /// Like [`Settings::load`], reading a `.env` file first when one exists.
    ///
    /// A missing `.env` is fine; a malformed one is an error.
    pub fn load_with_dotenv() -> Result<Self, ConfigError> {
        match dotenvy::dotenv() {
            Ok(path) => tracing::debug!(path = %path.display(), "loaded .env"),
            Err(e) if e.not_found() => {}
            Err(e) => return Err(e.into()),
        }
        Self::load()
    }

    pub fn figment() -> Figment {
        Figment::from(Serialized::defaults(Self::default()))
            .merge(Toml::file(CONFIG_FILE))
            .merge(Env::prefixed(ENV_PREFIX).split("__"))
    }

    fn validate(self) -> Result<Self, ConfigError> {
        if self.store.kind == StoreKind::Postgres && self.store.database_url.is_none() {
            return Err(ConfigError::Missing {
                field: "store.database_url".to_string(),
                reason: "store.kind is postgres".to_string(),
            });
        }
        if self.store.max_connections == 0 {
            return Err(ConfigError::Missing {
                field: "store.max_connections".to_string(),
                reason: "the pool needs at least one connection".to_string(),
            });
        }
        Ok(self)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use figment::Jail;

    #[test]
    fn defaults_use_the_seeded_memory_store() {
        Jail::expect_with(|_jail| {
            let settings = Settings::load().expect("defaults load");
            assert_eq!(settings, Settings::default());
            assert_eq!(settings.listen_addr, "0.0.0.0:8080");
            assert_eq!(settings.store.kind, StoreKind::Memory);
            assert!(settings.store.seed_demo_data);
            Ok(())
        });
    }

    #[test]
    fn environment_overrides_nested_fields() {
        Jail::expect_with(|jail| {
            jail.set_env("JOBBOARD_LISTEN_ADDR", "127.0.0.1:3000");
            jail.set_env("JOBBOARD_LOG_FORMAT", "pretty");
            jail.set_env("JOBBOARD_STORE__KIND", "postgres");
            jail.set_env("JOBBOARD_STORE__DATABASE_URL", "postgres://jobs@localhost/jobs");
            jail.set_env("JOBBOARD_STORE__MAX_CONNECTIONS", "12");

            let settings = Settings::load().expect("env config loads");
            assert_eq!(settings.listen_addr, "127.0.0.1:3000");
            assert_eq!(settings.log_format, LogFormat::Pretty);
            assert_eq!(settings.store.kind, StoreKind::Postgres);
            assert_eq!(
                settings.store.database_url.as_deref(),
                Some("postgres://jobs@localhost/jobs")
            );
            assert_eq!(settings.store.max_connections, 12);
            assert!(settings.store.run_migrations);
            Ok(())
        });
    }

    #[test]
    fn toml_file_is_layered_under_the_environment() {
        Jail::expect_with(|jail| {
            jail.create_file(
                CONFIG_FILE,
                r#"
                listen_addr = "127.0.0.1:9000"

                [store]
                seed_demo_data = false
                "#,
            )?;
            jail.set_env("JOBBOARD_LISTEN_ADDR", "127.0.0.1:9001");

            let settings = Settings::load().expect("toml config loads");
            assert_eq!(settings.listen_addr, "127.0.0.1:9001");
            assert!(!settings.store.seed_demo_data);
            assert_eq!(settings.store.max_connections, 5);
            Ok(())
        });
    }

    #[test]
    fn postgres_without_url_is_rejected() {
        Jail::expect_with(|jail| {
            jail.set_env("JOBBOARD_STORE__KIND", "postgres");
            let err = Settings::load().unwrap_err();
            assert!(matches!(err, ConfigError::Missing { ref field, .. } if field == "store.database_url"));
            Ok(())
        });
    }

    #[test]
    fn missing_dotenv_file_is_not_an_error() {
        Jail::expect_with(|_jail| {
            let settings = Settings::load_with_dotenv().expect("loads without .env");
            assert_eq!(settings.store.kind, StoreKind::Memory);
            Ok(())
        });
    }

    #[test]
    fn malformed_dotenv_file_is_reported() {
        Jail::expect_with(|jail| {
            jail.create_file(".env", "JOBBOARD_LISTEN_ADDR='127.0.0.1:3000\n")?;
            let err = Settings::load_with_dotenv().unwrap_err();
            assert!(matches!(err, ConfigError::Dotenv(_)), "{err}");
            Ok(())
        });
    }

    #[test]
    fn unknown_store_kind_is_a_figment_error() {
        Jail::expect_with(|jail| {
            jail.set_env("JOBBOARD_STORE__KIND", "sqlite");
            assert!(matches!(Settings::load(), Err(ConfigError::Figment(_))));
            Ok(())
        });
    }
}
