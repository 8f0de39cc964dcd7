use regex::Regex;
use sqlx::{postgres::PgPoolOptions, PgPool};
use std::time::Duration;

use crate::config::Config;
use crate::errors::ConfigurationError;

#[derive(Clone)]
pub struct Database {
    pub pool: PgPool,
    /// Validated schema name, safe to interpolate as a quoted identifier.
    pub schema: String,
}

impl Database {
    /// Builds the process-wide connection pool without touching the network.
    ///
    /// Connections are opened on first use, so a store that is down at
    /// startup can still serve requests once it comes back.
    pub fn connect_lazy(config: &Config) -> Result<Self, ConfigurationError> {
        let url = config
            .database_url
            .as_deref()
            .ok_or_else(|| ConfigurationError("DATABASE_URL is not set".to_string()))?;

        if !url.starts_with("postgresql://") && !url.starts_with("postgres://") {
            return Err(ConfigurationError(
                "DATABASE_URL must start with postgresql:// or postgres://".to_string(),
            ));
        }

        let schema = validate_schema(config.schema())?;

        let pool = PgPoolOptions::new()
            .max_connections(10)
            .acquire_timeout(config.store_timeout)
            .connect_lazy(url)
            .map_err(|e| ConfigurationError(format!("Invalid DATABASE_URL: {}", e)))?;

        Ok(Self { pool, schema })
    }

    /// Round-trips a trivial query; used at startup to log reachability.
    pub async fn ping(&self, limit: Duration) -> Result<(), String> {
        match tokio::time::timeout(limit, sqlx::query("SELECT 1").execute(&self.pool)).await {
            Ok(Ok(_)) => Ok(()),
            Ok(Err(e)) => Err(e.to_string()),
            Err(_) => Err(format!("no answer within {:?}", limit)),
        }
    }
}

fn validate_schema(name: &str) -> Result<String, ConfigurationError> {
    let pattern = Regex::new(r"^[A-Za-z_][A-Za-z0-9_]{0,62}$")
        .map_err(|e| ConfigurationError(format!("Schema pattern failed to compile: {}", e)))?;

    if pattern.is_match(name) {
        Ok(name.to_string())
    } else {
        Err(ConfigurationError(format!(
            "DATABASE_NAME '{}' is not a valid schema identifier",
            name
        )))
    }
}
