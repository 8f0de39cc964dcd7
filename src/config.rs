use std::time::Duration;

/// Schema used when `DATABASE_NAME` is unset.
pub const DEFAULT_SCHEMA: &str = "public";

#[derive(Debug, Clone)]
pub struct Config {
    pub port: u16,
    /// Postgres URL; `None` leaves the service running without a store.
    pub database_url: Option<String>,
    /// Logical database name, mapped to the Postgres schema holding documents.
    pub database_name: Option<String>,
    /// Deadline applied to every document store call.
    pub store_timeout: Duration,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            port: 8000,
            database_url: None,
            database_name: None,
            store_timeout: Duration::from_secs(10),
        }
    }
}

impl Config {
    pub fn from_env() -> anyhow::Result<Self> {
        dotenvy::dotenv().ok();

        let config = Self::from_vars(|key| std::env::var(key).ok())?;

        // Log successful configuration load (without sensitive values)
        tracing::info!("Configuration loaded successfully");
        tracing::debug!("Server Port: {}", config.port);
        tracing::debug!(
            "DATABASE_URL {}",
            if config.database_url.is_some() { "set" } else { "not set" }
        );
        tracing::debug!("Document schema: {}", config.schema());
        tracing::debug!("Store timeout: {:?}", config.store_timeout);

        Ok(config)
    }

    /// Builds a config from an arbitrary variable lookup.
    ///
    /// Empty values count as unset.
    pub fn from_vars<F>(lookup: F) -> anyhow::Result<Self>
    where
        F: Fn(&str) -> Option<String>,
    {
        let var = |key: &str| lookup(key).filter(|v| !v.trim().is_empty());

        let port = match var("PORT") {
            Some(port) => port
                .trim()
                .parse()
                .map_err(|_| anyhow::anyhow!("PORT must be a valid number between 1-65535"))?,
            None => 8000,
        };

        let store_timeout = match var("DATABASE_TIMEOUT_SECS") {
            Some(secs) => {
                let secs: u64 = secs.trim().parse().map_err(|_| {
                    anyhow::anyhow!("DATABASE_TIMEOUT_SECS must be a whole number of seconds")
                })?;
                if secs == 0 {
                    anyhow::bail!("DATABASE_TIMEOUT_SECS must be greater than zero");
                }
                Duration::from_secs(secs)
            }
            None => Duration::from_secs(10),
        };

        Ok(Self {
            port,
            database_url: var("DATABASE_URL"),
            database_name: var("DATABASE_NAME"),
            store_timeout,
        })
    }

    /// Schema holding the documents table.
    pub fn schema(&self) -> &str {
        self.database_name.as_deref().unwrap_or(DEFAULT_SCHEMA)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;

    fn vars(pairs: &[(&str, &str)]) -> impl Fn(&str) -> Option<String> {
        let map: HashMap<String, String> = pairs
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect();
        move |key| map.get(key).cloned()
    }

    #[test]
    fn test_defaults() {
        let config = Config::from_vars(vars(&[])).unwrap();
        assert_eq!(config.port, 8000);
        assert!(config.database_url.is_none());
        assert_eq!(config.schema(), "public");
        assert_eq!(config.store_timeout, Duration::from_secs(10));
    }

    #[test]
    fn test_reads_all_variables() {
        let config = Config::from_vars(vars(&[
            ("PORT", "9090"),
            ("DATABASE_URL", "postgres://localhost/courses"),
            ("DATABASE_NAME", "landing"),
            ("DATABASE_TIMEOUT_SECS", "3"),
        ]))
        .unwrap();
        assert_eq!(config.port, 9090);
        assert_eq!(
            config.database_url.as_deref(),
            Some("postgres://localhost/courses")
        );
        assert_eq!(config.schema(), "landing");
        assert_eq!(config.store_timeout, Duration::from_secs(3));
    }

    #[test]
    fn test_blank_values_count_as_unset() {
        let config = Config::from_vars(vars(&[("DATABASE_URL", "  "), ("PORT", "")])).unwrap();
        assert!(config.database_url.is_none());
        assert_eq!(config.port, 8000);
    }

    #[test]
    fn test_invalid_port_rejected() {
        assert!(Config::from_vars(vars(&[("PORT", "eighty")])).is_err());
        assert!(Config::from_vars(vars(&[("PORT", "70000")])).is_err());
    }

    #[test]
    fn test_zero_timeout_rejected() {
        assert!(Config::from_vars(vars(&[("DATABASE_TIMEOUT_SECS", "0")])).is_err());
    }
}
