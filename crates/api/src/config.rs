use std::path::PathBuf;

use sleeptrack_db::backend::StorageBackend;

/// Deployment environment, from `APP_ENV`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AppEnv {
    Development,
    Staging,
    Production,
}

impl AppEnv {
    pub fn from_str_value(s: &str) -> Result<Self, String> {
        match s {
            "development" => Ok(Self::Development),
            "staging" => Ok(Self::Staging),
            "production" => Ok(Self::Production),
            _ => Err("must be one of: development, staging, production".into()),
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Development => "development",
            Self::Staging => "staging",
            Self::Production => "production",
        }
    }
}

/// The single bearer token accepted by the API and the user it maps to.
#[derive(Debug, Clone)]
pub struct AuthConfig {
    pub token: String,
    pub user_id: String,
    pub user_name: String,
}

/// Errors raised while reading configuration.
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("{key} is required when {reason}")]
    Missing { key: &'static str, reason: &'static str },

    #[error("Invalid {key}='{value}': {reason}")]
    Invalid {
        key: &'static str,
        value: String,
        reason: String,
    },
}

/// Server configuration loaded from environment variables.
///
/// All fields have defaults suitable for local development against the
/// JSON-file backend. In production, override via environment variables.
#[derive(Debug, Clone)]
pub struct ServerConfig {
    /// Bind address (default: `0.0.0.0`).
    pub host: String,
    /// Bind port (default: `8088`).
    pub port: u16,
    /// Allowed CORS origins, parsed from comma-separated `CORS_ORIGINS` env var.
    pub cors_origins: Vec<String>,
    /// HTTP request timeout in seconds (default: `30`).
    pub request_timeout_secs: u64,
    pub env: AppEnv,
    pub storage: StorageBackend,
    pub auth: AuthConfig,
}

impl ServerConfig {
    /// Load configuration from the process environment.
    ///
    /// | Env Var                | Default                    |
    /// |------------------------|----------------------------|
    /// | `HOST`                 | `0.0.0.0`                  |
    /// | `PORT`                 | `8088`                     |
    /// | `CORS_ORIGINS`         | `http://localhost:5173`    |
    /// | `REQUEST_TIMEOUT_SECS` | `30`                       |
    /// | `APP_ENV`              | `development`              |
    /// | `STORAGE_BACKEND`      | `file` (or `postgres`)     |
    /// | `DATABASE_URL`         | required for `postgres`    |
    /// | `SLEEP_FILE`           | `data/sleep_logs.json`     |
    /// | `GOALS_FILE`           | `data/goals.json`          |
    /// | `AUTH_TOKEN`           | `MOCK-TOKEN`               |
    /// | `DEMO_USER_ID`         | `u1`                       |
    /// | `DEMO_USER_NAME`       | `Demo User`                |
    pub fn from_env() -> Result<Self, ConfigError> {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Load configuration from an arbitrary key lookup. Empty values count
    /// as unset.
    pub fn from_lookup<F>(lookup: F) -> Result<Self, ConfigError>
    where
        F: Fn(&str) -> Option<String>,
    {
        let var = |key: &str| lookup(key).filter(|v| !v.trim().is_empty());
        let var_or = |key: &str, default: &str| var(key).unwrap_or_else(|| default.to_string());

        let host = var_or("HOST", "0.0.0.0");
        let port = parse_number("PORT", var_or("PORT", "8088"))?;

        let cors_origins: Vec<String> = var_or("CORS_ORIGINS", "http://localhost:5173")
            .split(',')
            .map(|s| s.trim().to_string())
            .filter(|s| !s.is_empty())
            .collect();

        let request_timeout_secs =
            parse_number("REQUEST_TIMEOUT_SECS", var_or("REQUEST_TIMEOUT_SECS", "30"))?;

        let env_value = var_or("APP_ENV", "development");
        let env = AppEnv::from_str_value(&env_value).map_err(|reason| ConfigError::Invalid {
            key: "APP_ENV",
            value: env_value.clone(),
            reason,
        })?;

        let storage = match var_or("STORAGE_BACKEND", "file").as_str() {
            "file" => StorageBackend::File {
                sleep_file: PathBuf::from(var_or("SLEEP_FILE", "data/sleep_logs.json")),
                goals_file: PathBuf::from(var_or("GOALS_FILE", "data/goals.json")),
            },
            "postgres" => StorageBackend::Postgres {
                database_url: var("DATABASE_URL").ok_or(ConfigError::Missing {
                    key: "DATABASE_URL",
                    reason: "STORAGE_BACKEND=postgres",
                })?,
            },
            other => {
                return Err(ConfigError::Invalid {
                    key: "STORAGE_BACKEND",
                    value: other.to_string(),
                    reason: "must be one of: file, postgres".into(),
                })
            }
        };

        let auth = AuthConfig {
            token: var_or("AUTH_TOKEN", "MOCK-TOKEN"),
            user_id: var_or("DEMO_USER_ID", "u1"),
            user_name: var_or("DEMO_USER_NAME", "Demo User"),
        };

        Ok(Self {
            host,
            port,
            cors_origins,
            request_timeout_secs,
            env,
            storage,
            auth,
        })
    }
}

fn parse_number<T>(key: &'static str, value: String) -> Result<T, ConfigError>
where
    T: std::str::FromStr,
    T::Err: std::fmt::Display,
{
    value.parse().map_err(|e: T::Err| ConfigError::Invalid {
        key,
        reason: e.to_string(),
        value,
    })
}
