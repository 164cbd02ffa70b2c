//! Configuration management for the calculator MCP server.
//!
//! Values come from defaults, overridden by `MCP_`-prefixed environment
//! variables (optionally loaded from a `.env` file).

use super::transport::TransportConfig;
use serde::{Deserialize, Serialize};
use std::path::PathBuf;
use tracing::{info, warn};

/// Default cap on the number of inputs in one batch request.
pub const DEFAULT_MAX_BATCH_SIZE: usize = 1000;

/// Default cap on the size of a hashed file (1 GiB).
pub const DEFAULT_MAX_FILE_SIZE: u64 = 1024 * 1024 * 1024;

/// Main configuration structure for the MCP server.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Config {
    /// Server identification and metadata.
    pub server: ServerConfig,

    /// Logging configuration.
    pub logging: LoggingConfig,

    /// Transport configuration.
    pub transport: TransportConfig,

    /// Security and path validation configuration.
    pub security: SecurityConfig,

    /// Limits applied to calculator requests.
    pub calculator: CalculatorConfig,
}

/// Server identification configuration.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ServerConfig {
    /// The name of the server as reported to clients.
    pub name: String,

    /// The version of the server.
    pub version: String,
}

/// Logging configuration.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LoggingConfig {
    /// Log level filter (e.g., "info", "debug", "trace").
    pub level: String,

    /// Whether to include timestamps in log output.
    pub with_timestamps: bool,
}

/// Configuration for security and path validation.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SecurityConfig {
    /// Optional root directory that file inputs must live under.
    /// If None, any readable path is accepted.
    pub root_path: Option<PathBuf>,

    /// Whether file inputs may be symlinks. Targets of allowed symlinks are
    /// still checked against the root.
    pub allow_symlinks: bool,
}

/// Request limits for the calculator tools.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CalculatorConfig {
    /// Maximum number of inputs accepted by the batch hash tool.
    pub max_batch_size: usize,

    /// Maximum size in bytes of a file input.
    pub max_file_size: u64,
}

impl Default for SecurityConfig {
    fn default() -> Self {
        Self {
            root_path: None,
            allow_symlinks: true,
        }
    }
}

impl Default for CalculatorConfig {
    fn default() -> Self {
        Self {
            max_batch_size: DEFAULT_MAX_BATCH_SIZE,
            max_file_size: DEFAULT_MAX_FILE_SIZE,
        }
    }
}

impl Default for Config {
    fn default() -> Self {
        Self {
            server: ServerConfig {
                name: "calculator-mcp-server".to_string(),
                version: env!("CARGO_PKG_VERSION").to_string(),
            },
            logging: LoggingConfig {
                level: "info".to_string(),
                with_timestamps: true,
            },
            transport: TransportConfig::default(),
            security: SecurityConfig::default(),
            calculator: CalculatorConfig::default(),
        }
    }
}

impl Config {
    /// Create a new configuration with default values.
    pub fn new() -> Self {
        Self::default()
    }

    /// Load configuration from environment variables.
    ///
    /// Environment variables are expected to be prefixed with `MCP_`.
    /// For example: `MCP_SERVER_NAME`, `MCP_LOG_LEVEL`, `MCP_LOG_TIMESTAMPS`,
    /// `MCP_MAX_BATCH_SIZE`.
    pub fn from_env() -> Self {
        dotenvy::dotenv().ok();

        let mut config = Self::default();

        if let Ok(name) = std::env::var("MCP_SERVER_NAME") {
            config.server.name = name;
        }

        if let Ok(level) = std::env::var("MCP_LOG_LEVEL") {
            config.logging.level = level;
        }

        if let Ok(raw) = std::env::var("MCP_LOG_TIMESTAMPS") {
            config.logging.with_timestamps = raw.to_lowercase() != "false" && raw != "0";
        }

        // Load transport configuration from environment
        config.transport = TransportConfig::from_env();

        // Load security configuration
        if let Ok(root_path) = std::env::var("MCP_ROOT_PATH") {
            config.security.root_path = Some(PathBuf::from(root_path));
            info!("Path security enabled: root directory set to {:?}", config.security.root_path);
        } else {
            warn!(
                "MCP_ROOT_PATH not set - no path restrictions active. \
                 File inputs may point anywhere on the filesystem."
            );
        }

        if let Ok(allow_symlinks) = std::env::var("MCP_ALLOW_SYMLINKS") {
            config.security.allow_symlinks = allow_symlinks.parse().unwrap_or(true);
            info!("Symlinks allowed: {}", config.security.allow_symlinks);
        }

        if let Ok(raw) = std::env::var("MCP_MAX_BATCH_SIZE") {
            match raw.parse::<usize>() {
                Ok(size) if size > 0 => config.calculator.max_batch_size = size,
                _ => warn!(
                    "Ignoring invalid MCP_MAX_BATCH_SIZE '{}', using {}",
                    raw, config.calculator.max_batch_size
                ),
            }
        }

        if let Ok(raw) = std::env::var("MCP_MAX_FILE_SIZE") {
            match raw.parse::<u64>() {
                Ok(size) => config.calculator.max_file_size = size,
                Err(_) => warn!(
                    "Ignoring invalid MCP_MAX_FILE_SIZE '{}', using {}",
                    raw, config.calculator.max_file_size
                ),
            }
        }

        config
    }
}
