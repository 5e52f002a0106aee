use tabletop_core::error::CoreError;

/// Default upper bound on pooled connections.
pub const DEFAULT_MAX_CONNECTIONS: u32 = 20;

/// Database configuration loaded from environment variables.
#[derive(Debug, Clone)]
pub struct DbConfig {
    /// Postgres connection string.
    pub database_url: String,
    /// Pool size (default: `20`).
    pub max_connections: u32,
}

impl DbConfig {
    /// Load configuration from the environment, reading a `.env` file first
    /// when one is present.
    ///
    /// | Env Var              | Default    |
    /// |----------------------|------------|
    /// | `DATABASE_URL`       | (required) |
    /// | `DB_MAX_CONNECTIONS` | `20`       |
    pub fn from_env() -> Result<Self, CoreError> {
        dotenvy::dotenv().ok();
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Result<Self, CoreError> {
        let database_url = lookup("DATABASE_URL")
            .filter(|url| !url.trim().is_empty())
            .ok_or_else(|| CoreError::Validation("DATABASE_URL must be set".to_string()))?;

        let max_connections = match lookup("DB_MAX_CONNECTIONS") {
            Some(raw) => raw.trim().parse::<u32>().ok().filter(|n| *n > 0).ok_or_else(|| {
                CoreError::Validation(format!(
                    "DB_MAX_CONNECTIONS must be a positive integer, got '{raw}'"
                ))
            })?,
            None => DEFAULT_MAX_CONNECTIONS,
        };

        Ok(Self {
            database_url,
            max_connections,
        })
    }
}

#[cfg(test)]
mod tests {
    use std::collections::HashMap;

    use assert_matches::assert_matches;

    use super::*;

    fn load(vars: &[(&str, &str)]) -> Result<DbConfig, CoreError> {
        let map: HashMap<String, String> = vars
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect();
        DbConfig::from_lookup(|key| map.get(key).cloned())
    }

    #[test]
    fn defaults_pool_size() {
        let config = load(&[("DATABASE_URL", "postgres://localhost/tabletop")]).unwrap();
        assert_eq!(config.database_url, "postgres://localhost/tabletop");
        assert_eq!(config.max_connections, DEFAULT_MAX_CONNECTIONS);
    }

    #[test]
    fn reads_pool_size_override() {
        let config = load(&[
            ("DATABASE_URL", "postgres://localhost/tabletop"),
            ("DB_MAX_CONNECTIONS", "5"),
        ])
        .unwrap();
        assert_eq!(config.max_connections, 5);
    }

    #[test]
    fn missing_url_is_rejected() {
        assert_matches!(load(&[]), Err(CoreError::Validation(_)));
        assert_matches!(load(&[("DATABASE_URL", "  ")]), Err(CoreError::Validation(_)));
    }

    #[test]
    fn bad_pool_size_is_rejected() {
        for raw in ["zero", "0", "-3"] {
            assert_matches!(
                load(&[("DATABASE_URL", "postgres://x"), ("DB_MAX_CONNECTIONS", raw)]),
                Err(CoreError::Validation(_))
            );
        }
    }
}
