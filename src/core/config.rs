//! Configuration management for the MCP server.
//!
//! This module provides a centralized configuration structure that can be
//! populated from environment variables or defaults.

use super::error::{Error, Result};
use super::transport::TransportConfig;
use serde::{Deserialize, Serialize};
use std::path::PathBuf;
use std::time::Duration;
use tracing::{info, warn};

/// Default period of the UUID auto-generation task.
pub const DEFAULT_UUID_AUTO_INTERVAL_MS: u64 = 2000;

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

    /// Tool behaviour tuning.
    pub tools: ToolsConfig,
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
    /// Optional root directory for export targets.
    /// If None, no path restrictions are enforced.
    pub root_path: Option<PathBuf>,

    /// Whether to allow symlinks in path validation.
    /// If false, symlinks pointing outside the root are rejected.
    pub allow_symlinks: bool,
}

/// Configuration for the tools domain.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ToolsConfig {
    /// Period of the UUID auto-generation task, in milliseconds.
    pub uuid_auto_interval_ms: u64,
}

impl ToolsConfig {
    /// Auto-generation period as a `Duration` (never zero).
    pub fn uuid_auto_interval(&self) -> Duration {
        Duration::from_millis(self.uuid_auto_interval_ms.max(1))
    }
}

impl Default for SecurityConfig {
    fn default() -> Self {
        Self {
            root_path: None,
            allow_symlinks: true,
        }
    }
}

impl Default for ToolsConfig {
    fn default() -> Self {
        Self {
            uuid_auto_interval_ms: DEFAULT_UUID_AUTO_INTERVAL_MS,
        }
    }
}

impl Default for Config {
    fn default() -> Self {
        Self {
            server: ServerConfig {
                name: "devtools-mcp-server".to_string(),
                version: env!("CARGO_PKG_VERSION").to_string(),
            },
            logging: LoggingConfig {
                level: "info".to_string(),
                with_timestamps: true,
            },
            transport: TransportConfig::default(),
            security: SecurityConfig::default(),
            tools: ToolsConfig::default(),
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
    /// For example: `MCP_SERVER_NAME`, `MCP_LOG_LEVEL`.
    pub fn from_env() -> Self {
        dotenvy::dotenv().ok();

        let mut config = Self::default();

        if let Ok(name) = std::env::var("MCP_SERVER_NAME") {
            config.server.name = name;
        }

        if let Ok(level) = std::env::var("MCP_LOG_LEVEL") {
            config.logging.level = level;
        }

        if let Ok(flag) = std::env::var("MCP_LOG_TIMESTAMPS") {
            config.logging.with_timestamps = flag.to_lowercase() != "false" && flag != "0";
        }

        config.transport = TransportConfig::from_env();

        if let Ok(root_path) = std::env::var("MCP_ROOT_PATH") {
            config.security.root_path = Some(PathBuf::from(root_path));
            info!(
                "Path security enabled: export root set to {:?}",
                config.security.root_path
            );
        } else {
            warn!(
                "MCP_ROOT_PATH not set - exports may be written to any existing directory"
            );
        }

        if let Ok(allow_symlinks) = std::env::var("MCP_ALLOW_SYMLINKS") {
            config.security.allow_symlinks = allow_symlinks.parse().unwrap_or(true);
            info!("Symlinks allowed: {}", config.security.allow_symlinks);
        }

        if let Ok(interval) = std::env::var("MCP_UUID_AUTO_INTERVAL_MS") {
            match interval.parse::<u64>() {
                Ok(ms) if ms > 0 => config.tools.uuid_auto_interval_ms = ms,
                _ => warn!(
                    "Ignoring invalid MCP_UUID_AUTO_INTERVAL_MS '{}', using {} ms",
                    interval, DEFAULT_UUID_AUTO_INTERVAL_MS
                ),
            }
        }

        config
    }

    /// Check settings that cannot be verified while parsing.
    ///
    /// An export root must name an existing directory.
    pub fn validate(&self) -> Result<()> {
        if let Some(root) = &self.security.root_path {
            if !root.is_dir() {
                return Err(Error::config(format!(
                    "MCP_ROOT_PATH {:?} is not an existing directory",
                    root
                )));
            }
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::Mutex;

    // Mutex to ensure env var tests run serially
    static ENV_TEST_LOCK: Mutex<()> = Mutex::new(());

    #[test]
    fn test_default_config() {
        let config = Config::default();
        assert_eq!(config.server.name, "devtools-mcp-server");
        assert_eq!(config.logging.level, "info");
        assert!(config.security.root_path.is_none());
        assert_eq!(config.tools.uuid_auto_interval_ms, 2000);
    }

    #[test]
    fn test_uuid_interval_from_env() {
        let _lock = ENV_TEST_LOCK.lock().unwrap();
        unsafe {
            std::env::set_var("MCP_UUID_AUTO_INTERVAL_MS", "250");
        }
        let config = Config::from_env();
        assert_eq!(config.tools.uuid_auto_interval_ms, 250);
        unsafe {
            std::env::remove_var("MCP_UUID_AUTO_INTERVAL_MS");
        }
    }

    #[test]
    fn test_uuid_interval_invalid_falls_back() {
        let _lock = ENV_TEST_LOCK.lock().unwrap();
        unsafe {
            std::env::set_var("MCP_UUID_AUTO_INTERVAL_MS", "soon");
        }
        let config = Config::from_env();
        assert_eq!(
            config.tools.uuid_auto_interval_ms,
            DEFAULT_UUID_AUTO_INTERVAL_MS
        );
        unsafe {
            std::env::remove_var("MCP_UUID_AUTO_INTERVAL_MS");
        }
    }

    #[test]
    fn test_root_path_from_env() {
        let _lock = ENV_TEST_LOCK.lock().unwrap();
        unsafe {
            std::env::set_var("MCP_ROOT_PATH", "/tmp/exports");
        }
        let config = Config::from_env();
        assert_eq!(config.security.root_path, Some(PathBuf::from("/tmp/exports")));
        unsafe {
            std::env::remove_var("MCP_ROOT_PATH");
        }
    }

    #[test]
    fn test_validate_rejects_missing_root() {
        let mut config = Config::default();
        assert!(config.validate().is_ok());

        config.security.root_path = Some(PathBuf::from("/definitely/not/here"));
        let err = config.validate().unwrap_err();
        assert!(err.to_string().starts_with("Configuration error: MCP_ROOT_PATH"));

        let dir = tempfile::TempDir::new().unwrap();
        config.security.root_path = Some(dir.path().to_path_buf());
        assert!(config.validate().is_ok());
    }

    #[test]
    fn test_uuid_interval_never_zero() {
        let tools = ToolsConfig {
            uuid_auto_interval_ms: 0,
        };
        assert_eq!(tools.uuid_auto_interval(), Duration::from_millis(1));
    }
}
