//! Environment Configuration
//!
//! Typed access to environment variables. Values come from the process
//! environment, optionally seeded from a `.env` file by the binary.

use std::env;
use std::fmt::Display;
use std::str::FromStr;

/// Deployment environment. Selects cookie attributes among other things.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Environment {
    #[default]
    Development,
    Production,
}

impl Environment {
    pub fn is_production(&self) -> bool {
        matches!(self, Environment::Production)
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            Environment::Development => "development",
            Environment::Production => "production",
        }
    }

    /// Read `APP_ENV`, defaulting to development.
    pub fn from_env() -> Result<Self, ConfigError> {
        env_or("APP_ENV", Environment::Development)
    }
}

impl FromStr for Environment {
    type Err = ConfigError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "production" | "prod" => Ok(Environment::Production),
            "development" | "dev" | "local" => Ok(Environment::Development),
            other => Err(ConfigError::Invalid {
                key: "APP_ENV".to_string(),
                reason: format!("unknown environment `{other}`"),
            }),
        }
    }
}

impl Display for Environment {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Configuration loading errors
#[derive(Debug, Clone, thiserror::Error)]
pub enum ConfigError {
    #[error("Missing required environment variable: {0}")]
    Missing(String),

    #[error("Invalid value for {key}: {reason}")]
    Invalid { key: String, reason: String },
}

/// Non-empty value of `key`, if set.
pub fn optional_env(key: &str) -> Option<String> {
    env::var(key)
        .ok()
        .map(|v| v.trim().to_string())
        .filter(|v| !v.is_empty())
}

/// Value of `key`; a blank value counts as missing.
pub fn require_env(key: &str) -> Result<String, ConfigError> {
    optional_env(key).ok_or_else(|| ConfigError::Missing(key.to_string()))
}

/// Parse `key`, falling back to `default` when unset.
pub fn env_or<T>(key: &str, default: T) -> Result<T, ConfigError>
where
    T: FromStr,
    T::Err: Display,
{
    match optional_env(key) {
        Some(raw) => raw.parse().map_err(|e: T::Err| ConfigError::Invalid {
            key: key.to_string(),
            reason: e.to_string(),
        }),
        None => {
            tracing::debug!(key, "Environment variable not set, using default");
            Ok(default)
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_environment_parse() {
        assert_eq!("production".parse::<Environment>().unwrap(), Environment::Production);
        assert_eq!("PROD".parse::<Environment>().unwrap(), Environment::Production);
        assert_eq!("dev".parse::<Environment>().unwrap(), Environment::Development);
        assert!("staging".parse::<Environment>().is_err());
    }

    #[test]
    fn test_require_env() {
        temp_env::with_var("PLATFORM_TEST_SECRET", Some("s3cret"), || {
            assert_eq!(require_env("PLATFORM_TEST_SECRET").unwrap(), "s3cret");
        });
        temp_env::with_var("PLATFORM_TEST_SECRET", Some("   "), || {
            assert!(matches!(
                require_env("PLATFORM_TEST_SECRET"),
                Err(ConfigError::Missing(_))
            ));
        });
    }

    #[test]
    fn test_env_or() {
        temp_env::with_var_unset("PLATFORM_TEST_PORT", || {
            assert_eq!(env_or("PLATFORM_TEST_PORT", 5000u16).unwrap(), 5000);
        });
        temp_env::with_var("PLATFORM_TEST_PORT", Some("8080"), || {
            assert_eq!(env_or("PLATFORM_TEST_PORT", 5000u16).unwrap(), 8080);
        });
        temp_env::with_var("PLATFORM_TEST_PORT", Some("eighty"), || {
            assert!(matches!(
                env_or("PLATFORM_TEST_PORT", 5000u16),
                Err(ConfigError::Invalid { .. })
            ));
        });
    }

    #[test]
    fn test_environment_from_env() {
        temp_env::with_var("APP_ENV", Some("production"), || {
            assert!(Environment::from_env().unwrap().is_production());
        });
        temp_env::with_var_unset("APP_ENV", || {
            assert_eq!(Environment::from_env().unwrap(), Environment::Development);
        });
    }
}
