//! Configuration module for the order board service

use serde::Deserialize;
use std::env;
use std::net::SocketAddr;

use crate::error::{OrderBoardError, Result};

const DEFAULT_CONFIG_FILE: &str = "orderboard";
const ENV_PREFIX: &str = "ORDERBOARD";

/// Application configuration
#[derive(Debug, Clone, Deserialize)]
pub struct Config {
    /// Interface to bind the HTTP server to
    pub host: String,

    /// HTTP listen port
    pub port: u16,

    /// Directory served as static files at `/`
    pub static_dir: String,

    /// Allowed CORS origins ("*" allows any)
    pub cors_allowed_origins: Vec<String>,

    /// Component name reported by the health check
    pub component_name: String,
}

impl Config {
    /// Load configuration from defaults, an optional config file, `.env` and
    /// `ORDERBOARD_*` environment variables, in increasing precedence.
    ///
    /// The file defaults to `orderboard.{toml,json,yaml}` in the working
    /// directory; `ORDERBOARD_CONFIG` points elsewhere.
    pub fn load() -> Result<Self> {
        dotenvy::dotenv().ok();

        let file = env::var(format!("{ENV_PREFIX}_CONFIG"))
            .unwrap_or_else(|_| DEFAULT_CONFIG_FILE.to_string());
        Self::from_sources(&file)
    }

    /// Load configuration using `file` as the optional config file
    pub fn from_sources(file: &str) -> Result<Self> {
        let defaults = Self::default();

        let settings = config::Config::builder()
            .set_default("host", defaults.host)?
            .set_default("port", i64::from(defaults.port))?
            .set_default("static_dir", defaults.static_dir)?
            .set_default("cors_allowed_origins", defaults.cors_allowed_origins)?
            .set_default("component_name", defaults.component_name)?
            .add_source(config::File::with_name(file).required(false))
            .add_source(
                config::Environment::with_prefix(ENV_PREFIX)
                    .try_parsing(true)
                    .list_separator(",")
                    .with_list_parse_key("cors_allowed_origins"),
            )
            .build()?;

        let config: Config = settings.try_deserialize()?;
        config.listen_addr()?;
        Ok(config)
    }

    /// Socket address for the HTTP server
    pub fn listen_addr(&self) -> Result<SocketAddr> {
        format!("{}:{}", self.host, self.port)
            .parse()
            .map_err(|e| {
                OrderBoardError::ConfigError(format!(
                    "invalid listen address {}:{}: {}",
                    self.host, self.port, e
                ))
            })
    }

    /// Whether any origin may call the API
    pub fn allows_any_origin(&self) -> bool {
        self.cors_allowed_origins.iter().any(|origin| origin == "*")
    }
}

impl Default for Config {
    fn default() -> Self {
        Self {
            host: "0.0.0.0".to_string(),
            port: 3000,
            static_dir: "silver-frontend/public".to_string(),
            cors_allowed_origins: vec!["*".to_string()],
            component_name: "order-board".to_string(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;

    #[test]
    fn test_defaults_without_file() {
        let config = Config::from_sources("definitely-missing-orderboard-config").unwrap();
        assert_eq!(config.port, 3000);
        assert_eq!(config.static_dir, "silver-frontend/public");
        assert!(config.allows_any_origin());
        assert_eq!(
            config.listen_addr().unwrap(),
            "0.0.0.0:3000".parse().unwrap()
        );
    }

    #[test]
    fn test_file_overrides_defaults() {
        let mut file = tempfile::Builder::new()
            .suffix(".toml")
            .tempfile()
            .unwrap();
        writeln!(
            file,
            "host = \"127.0.0.1\"\nport = 8080\ncors_allowed_origins = [\"http://localhost:5000\"]"
        )
        .unwrap();

        let path = file.path().to_str().unwrap().trim_end_matches(".toml");
        let config = Config::from_sources(path).unwrap();

        assert_eq!(config.host, "127.0.0.1");
        assert_eq!(config.port, 8080);
        assert_eq!(config.cors_allowed_origins, vec!["http://localhost:5000"]);
        assert!(!config.allows_any_origin());
        assert_eq!(config.component_name, "order-board");
    }

    #[test]
    fn test_invalid_host_is_rejected() {
        let config = Config {
            host: "not a host".to_string(),
            ..Config::default()
        };
        assert!(matches!(
            config.listen_addr(),
            Err(OrderBoardError::ConfigError(_))
        ));
    }
}
