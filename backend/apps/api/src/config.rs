//! Server Configuration
//!
//! Everything the binary reads from the environment, resolved once at
//! startup. Production refuses to start without its secrets; development
//! fills the gaps with safe local defaults.

use std::time::Duration;

use auth::AuthConfig;
use auth::application::config::MAX_TOKEN_TTL;
use platform::config::{ConfigError, Environment, env_or, optional_env, require_env};
use scholarship::StripeConfig;

pub const DEFAULT_PORT: u16 = 5000;
pub const DEFAULT_MAX_CONNECTIONS: u32 = 5;
pub const DEFAULT_TOKEN_TTL_HOURS: u64 = 24;
pub const DEFAULT_FRONTEND_ORIGINS: &str = "http://localhost:5173,http://127.0.0.1:5173";

#[derive(Debug, Clone)]
pub struct DatabaseConfig {
    pub url: String,
    pub max_connections: u32,
}

#[derive(Debug, Clone)]
pub struct ApiConfig {
    pub environment: Environment,
    pub port: u16,
    /// `None` runs on the in-memory stores (development only)
    pub database: Option<DatabaseConfig>,
    pub auth: AuthConfig,
    pub stripe: StripeConfig,
    pub frontend_origins: Vec<String>,
}

impl ApiConfig {
    pub fn from_env() -> Result<Self, ConfigError> {
        let environment = Environment::from_env()?;
        let production = environment.is_production();

        let database_url = if production {
            Some(require_env("DATABASE_URL")?)
        } else {
            optional_env("DATABASE_URL")
        };
        let database = match database_url {
            Some(url) => Some(DatabaseConfig {
                url,
                max_connections: env_or("DATABASE_MAX_CONNECTIONS", DEFAULT_MAX_CONNECTIONS)?,
            }),
            None => None,
        };

        let token_secret = match optional_env("ACCESS_TOKEN_SECRET") {
            Some(secret) => secret.into_bytes(),
            None if production => return Err(ConfigError::Missing("ACCESS_TOKEN_SECRET".into())),
            None => {
                tracing::warn!("ACCESS_TOKEN_SECRET not set, using a random per-process secret");
                platform::crypto::random_bytes(32)
            }
        };
        let ttl_hours: u64 = env_or("TOKEN_TTL_HOURS", DEFAULT_TOKEN_TTL_HOURS)?;
        let ttl_secs = ttl_hours
            .checked_mul(3600)
            .filter(|secs| (1..=MAX_TOKEN_TTL.as_secs()).contains(secs))
            .ok_or_else(|| ConfigError::Invalid {
                key: "TOKEN_TTL_HOURS".into(),
                reason: format!(
                    "must be between 1 and {} hours",
                    MAX_TOKEN_TTL.as_secs() / 3600
                ),
            })?;
        let auth = AuthConfig::for_environment(environment, token_secret)
            .with_token_ttl(Duration::from_secs(ttl_secs));

        let stripe_key = if production {
            require_env("STRIPE_SECRET_KEY")?
        } else {
            optional_env("STRIPE_SECRET_KEY").unwrap_or_else(|| {
                tracing::warn!("STRIPE_SECRET_KEY not set, payment intents will fail");
                String::new()
            })
        };
        let mut stripe = StripeConfig::new(stripe_key);
        if let Some(base) = optional_env("STRIPE_API_BASE") {
            stripe = stripe.with_api_base(base);
        }

        let frontend_origins = optional_env("FRONTEND_ORIGINS")
            .unwrap_or_else(|| DEFAULT_FRONTEND_ORIGINS.to_string())
            .split(',')
            .map(str::trim)
            .filter(|o| !o.is_empty())
            .map(str::to_string)
            .collect();

        Ok(Self {
            environment,
            port: env_or("PORT", DEFAULT_PORT)?,
            database,
            auth,
            stripe,
            frontend_origins,
        })
    }
}
