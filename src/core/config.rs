//! Configuration management for the MCP server.
//!
//! Configuration is read once at startup from a `.env` file (if present),
//! environment variables and the first command-line argument, then shared
//! immutably for the lifetime of the process.

use super::error::{Error, Result};
use super::transport::TransportConfig;
use serde::{Deserialize, Serialize};
use tracing::info;

/// Main configuration structure for the MCP server.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Config {
    /// Server identification and metadata.
    pub server: ServerConfig,

    /// Logging configuration.
    pub logging: LoggingConfig,

    /// Transport configuration.
    pub transport: TransportConfig,

    /// Remote API connection settings.
    pub actitime: ActitimeConfig,
}

/// Server identification configuration.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ServerConfig {
    /// The name of the server as reported to clients.
    pub name: String,

    /// The version of the server.
    pub version: String,
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            name: "actitime-mcp-server".to_string(),
            version: env!("CARGO_PKG_VERSION").to_string(),
        }
    }
}

/// Logging configuration.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LoggingConfig {
    /// Log level filter (e.g., "info", "debug", "trace").
    pub level: String,

    /// Whether to include timestamps in log output.
    pub with_timestamps: bool,
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            level: "info".to_string(),
            with_timestamps: true,
        }
    }
}

/// Connection settings for one actiTIME instance.
#[derive(Clone, Serialize, Deserialize)]
pub struct ActitimeConfig {
    /// Company (tenant) identifier, as used in the hosted URL.
    pub company: String,

    /// API root, without a trailing slash requirement.
    pub base_url: String,

    /// Basic auth user.
    pub username: String,

    /// Basic auth password.
    #[serde(skip_serializing, default)]
    pub password: String,
}

/// Custom Debug implementation to redact secrets from logs.
impl std::fmt::Debug for ActitimeConfig {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ActitimeConfig")
            .field("company", &self.company)
            .field("base_url", &self.base_url)
            .field("username", &self.username)
            .field("password", &"[REDACTED]")
            .finish()
    }
}

impl ActitimeConfig {
    /// Hosted API root for a company.
    pub fn default_base_url(company: &str) -> String {
        format!("https://online.actitime.com/{}/api/v1", company)
    }

    /// Resolve connection settings.
    ///
    /// The company comes from `company_arg` or `ACTITIME_COMPANY` (argument
    /// wins). `ACTITIME_BASE_URL` replaces the hosted URL when set. Username
    /// and password are required; empty values count as missing.
    pub fn resolve<F>(company_arg: Option<String>, lookup: F) -> Result<Self>
    where
        F: Fn(&str) -> Option<String>,
    {
        let non_empty = |key: &str| lookup(key).filter(|v| !v.is_empty());

        let company = company_arg
            .filter(|c| !c.is_empty())
            .or_else(|| non_empty("ACTITIME_COMPANY"))
            .ok_or_else(|| {
                Error::config(
                    "Company name required as first argument or ACTITIME_COMPANY environment variable",
                )
            })?;

        let base_url =
            non_empty("ACTITIME_BASE_URL").unwrap_or_else(|| Self::default_base_url(&company));

        let (Some(username), Some(password)) =
            (non_empty("ACTITIME_USERNAME"), non_empty("ACTITIME_PASSWORD"))
        else {
            return Err(Error::config(
                "ACTITIME_USERNAME and ACTITIME_PASSWORD environment variables must be set",
            ));
        };

        Ok(Self {
            company,
            base_url,
            username,
            password,
        })
    }

    /// Whether both credentials are present.
    pub fn has_credentials(&self) -> bool {
        !self.username.is_empty() && !self.password.is_empty()
    }
}

impl Config {
    /// Load configuration from the process environment.
    ///
    /// Environment variables are expected to be prefixed with `MCP_` for
    /// server settings and `ACTITIME_` for the connection.
    pub fn from_env() -> Result<Self> {
        Self::load(None)
    }

    /// Load configuration, with an optional company name from the command line.
    pub fn load(company_arg: Option<String>) -> Result<Self> {
        dotenvy::dotenv().ok();

        let config = Self::from_lookup(company_arg, |key| std::env::var(key).ok())?;
        info!("Using actiTIME API at {}", config.actitime.base_url);
        Ok(config)
    }

    /// Build configuration from an arbitrary variable source.
    pub fn from_lookup<F>(company_arg: Option<String>, lookup: F) -> Result<Self>
    where
        F: Fn(&str) -> Option<String>,
    {
        let actitime = ActitimeConfig::resolve(company_arg, &lookup)?;

        let mut server = ServerConfig::default();
        if let Some(name) = lookup("MCP_SERVER_NAME") {
            server.name = name;
        }

        let mut logging = LoggingConfig::default();
        if let Some(level) = lookup("MCP_LOG_LEVEL") {
            logging.level = level;
        }
        if let Some(timestamps) = lookup("MCP_LOG_TIMESTAMPS") {
            logging.with_timestamps = timestamps.to_lowercase() != "false" && timestamps != "0";
        }

        Ok(Self {
            server,
            logging,
            transport: TransportConfig::from_lookup(&lookup),
            actitime,
        })
    }
}
