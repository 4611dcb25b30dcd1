use anyhow::{Context, Result};
use std::env;

#[derive(Debug, Clone)]
pub struct Config {
    pub api_host: String,
    pub api_port: u16,
    pub service_name: String,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            api_host: "0.0.0.0".to_string(),
            api_port: 8080,
            service_name: "User REST API".to_string(),
        }
    }
}

impl Config {
    /// Load configuration from the environment.
    /// A first positional argument, when given, overrides `API_PORT`.
    pub fn from_env() -> Result<Self> {
        // Load .env file if it exists
        dotenv::dotenv().ok();

        Self::from_sources(|key| env::var(key).ok(), env::args().nth(1))
    }

    fn from_sources(
        lookup: impl Fn(&str) -> Option<String>,
        port_arg: Option<String>,
    ) -> Result<Self> {
        let defaults = Config::default();

        let api_port = match port_arg.or_else(|| lookup("API_PORT")) {
            Some(raw) => raw
                .parse::<u16>()
                .with_context(|| format!("Invalid API port: {}", raw))?,
            None => defaults.api_port,
        };

        Ok(Config {
            api_host: lookup("API_HOST").unwrap_or(defaults.api_host),
            api_port,
            service_name: lookup("SERVICE_NAME").unwrap_or(defaults.service_name),
        })
    }

    pub fn api_address(&self) -> String {
        format!("{}:{}", self.api_host, self.api_port)
    }
}
