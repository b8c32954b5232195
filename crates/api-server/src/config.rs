use anyhow::{bail, Context, Result};
use std::env;
use std::net::SocketAddr;
use std::path::PathBuf;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Environment {
    Development,
    Production,
}

impl Environment {
    fn parse(value: &str) -> Result<Self> {
        match value.to_ascii_lowercase().as_str() {
            "development" | "dev" => Ok(Self::Development),
            "production" | "prod" => Ok(Self::Production),
            other => bail!("APP_ENV must be 'development' or 'production', got '{other}'"),
        }
    }
}

#[derive(Debug, Clone)]
pub struct ServerConfig {
    pub host: String,
    pub port: u16,
    pub environment: Environment,

    /// JSON ticker dataset; the bundled list is used when unset
    pub tickers_path: Option<PathBuf>,
    pub allowed_origins: Vec<String>,

    pub search_default_limit: usize,
    pub search_max_limit: usize,
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            host: "0.0.0.0".to_string(),
            port: 8080,
            environment: Environment::Development,
            tickers_path: None,
            allowed_origins: vec!["http://localhost:3000".to_string()],
            search_default_limit: ticker_search::DEFAULT_SEARCH_LIMIT,
            search_max_limit: 50,
        }
    }
}

impl ServerConfig {
    pub fn from_env() -> Result<Self> {
        let defaults = Self::default();

        let config = Self {
            host: env::var("HOST").unwrap_or(defaults.host),
            port: env::var("PORT")
                .unwrap_or_else(|_| defaults.port.to_string())
                .parse()
                .context("PORT must be a valid port number")?,
            environment: match env::var("APP_ENV") {
                Ok(value) => Environment::parse(&value)?,
                Err(_) => defaults.environment,
            },
            tickers_path: env::var("TICKERS_PATH")
                .ok()
                .filter(|p| !p.trim().is_empty())
                .map(PathBuf::from),
            allowed_origins: env::var("ALLOWED_ORIGINS")
                .map(|v| parse_origins(&v))
                .unwrap_or(defaults.allowed_origins),
            search_default_limit: env::var("SEARCH_DEFAULT_LIMIT")
                .unwrap_or_else(|_| defaults.search_default_limit.to_string())
                .parse()
                .context("SEARCH_DEFAULT_LIMIT must be a positive integer")?,
            search_max_limit: env::var("SEARCH_MAX_LIMIT")
                .unwrap_or_else(|_| defaults.search_max_limit.to_string())
                .parse()
                .context("SEARCH_MAX_LIMIT must be a positive integer")?,
        };

        config.validate()?;
        Ok(config)
    }

    pub fn validate(&self) -> Result<()> {
        if self.search_default_limit == 0 {
            bail!("SEARCH_DEFAULT_LIMIT must be greater than 0");
        }
        if self.search_max_limit < self.search_default_limit {
            bail!(
                "SEARCH_MAX_LIMIT ({}) must be >= SEARCH_DEFAULT_LIMIT ({})",
                self.search_max_limit,
                self.search_default_limit
            );
        }
        if self.environment == Environment::Production
            && self.allowed_origins.iter().any(|o| o == "*")
        {
            bail!("Wildcard CORS origin is not allowed in production");
        }
        Ok(())
    }

    pub fn socket_addr(&self) -> Result<SocketAddr> {
        format!("{}:{}", self.host, self.port)
            .parse()
            .with_context(|| format!("Invalid listen address {}:{}", self.host, self.port))
    }

    /// Resolve a requested result count against the configured bounds.
    pub fn search_limit(&self, requested: Option<i64>) -> usize {
        match requested {
            Some(n) if n >= 1 => (n as usize).min(self.search_max_limit),
            _ => self.search_default_limit,
        }
    }
}

fn parse_origins(value: &str) -> Vec<String> {
    value
        .split(',')
        .map(|o| o.trim().to_string())
        .filter(|o| !o.is_empty())
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults_are_valid() {
        let config = ServerConfig::default();
        assert!(config.validate().is_ok());
        assert_eq!(config.socket_addr().unwrap().port(), 8080);
    }

    #[test]
    fn test_search_limit_bounds() {
        let config = ServerConfig::default();
        assert_eq!(config.search_limit(None), 10);
        assert_eq!(config.search_limit(Some(0)), 10);
        assert_eq!(config.search_limit(Some(-3)), 10);
        assert_eq!(config.search_limit(Some(25)), 25);
        assert_eq!(config.search_limit(Some(500)), 50);
    }

    #[test]
    fn test_validate_rejects_inverted_limits() {
        let config = ServerConfig {
            search_default_limit: 20,
            search_max_limit: 5,
            ..ServerConfig::default()
        };
        assert!(config.validate().is_err());

        let config = ServerConfig {
            search_default_limit: 0,
            ..ServerConfig::default()
        };
        assert!(config.validate().is_err());
    }

    #[test]
    fn test_validate_rejects_wildcard_in_production() {
        let config = ServerConfig {
            environment: Environment::Production,
            allowed_origins: vec!["*".to_string()],
            ..ServerConfig::default()
        };
        assert!(config.validate().is_err());
    }

    #[test]
    fn test_parse_origins() {
        assert_eq!(
            parse_origins("http://a.test, http://b.test,,"),
            vec!["http://a.test", "http://b.test"]
        );
    }

    #[test]
    fn test_environment_parse() {
        assert_eq!(Environment::parse("PRODUCTION").unwrap(), Environment::Production);
        assert_eq!(Environment::parse("dev").unwrap(), Environment::Development);
        assert!(Environment::parse("staging").is_err());
    }
}
