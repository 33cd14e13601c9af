use serde::{Deserialize, Serialize};
use std::path::PathBuf;

/// Relay server configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Config {
    #[serde(default)]
    pub server: ServerConfig,

    #[serde(default)]
    pub upstream: UpstreamConfig,

    #[serde(default)]
    pub cors: CorsConfig,

    #[serde(default)]
    pub logging: LoggingConfig,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ServerConfig {
    #[serde(default = "default_port")]
    pub port: u16,

    #[serde(default = "default_host")]
    pub host: String,
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            port: default_port(),
            host: default_host(),
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct UpstreamConfig {
    /// Base URL of the FPL API, without a trailing slash
    #[serde(default = "default_base_url")]
    pub base_url: String,

    /// Per-request timeout for outbound calls, in seconds
    #[serde(default = "default_request_timeout")]
    pub request_timeout: u64,
}

impl Default for UpstreamConfig {
    fn default() -> Self {
        Self {
            base_url: default_base_url(),
            request_timeout: default_request_timeout(),
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CorsConfig {
    /// The single origin allowed to read relayed responses
    #[serde(default = "default_allowed_origin")]
    pub allowed_origin: String,
}

impl Default for CorsConfig {
    fn default() -> Self {
        Self {
            allowed_origin: default_allowed_origin(),
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LoggingConfig {
    #[serde(default = "default_log_level")]
    pub level: String,
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            level: default_log_level(),
        }
    }
}

impl Default for Config {
    fn default() -> Self {
        Self {
            server: ServerConfig::default(),
            upstream: UpstreamConfig::default(),
            cors: CorsConfig::default(),
            logging: LoggingConfig::default(),
        }
    }
}

// Default value functions
fn default_port() -> u16 { 3000 }
fn default_host() -> String { "127.0.0.1".to_string() }
fn default_base_url() -> String { "https://fantasy.premierleague.com/api".to_string() }
fn default_request_timeout() -> u64 { 30 }
fn default_log_level() -> String { "info".to_string() }
fn default_allowed_origin() -> String { "https://littlesheepdesign-max.github.io".to_string() }

/// Get default config file path
/// Uses ~/.config/fpl-relay/config.toml for Unix-like CLI experience
pub fn default_config_path() -> PathBuf {
    dirs::home_dir()
        .unwrap_or_else(|| PathBuf::from("."))
        .join(".config")
        .join("fpl-relay")
        .join("config.toml")
}

/// Load config from file, or return defaults if not found.
///
/// Loading order:
/// 1. Specified path (if provided)
/// 2. ./config.toml (if exists)
/// 3. default_config_path() (usually ~/.config/fpl-relay/config.toml)
///
/// Environment overrides are applied after the file is read.
pub fn load_config(path: Option<PathBuf>) -> anyhow::Result<Config> {
    let mut config = read_config_file(path)?;
    apply_env_overrides(&mut config);
    Ok(config)
}

fn read_config_file(path: Option<PathBuf>) -> anyhow::Result<Config> {
    if let Some(config_path) = path {
        if config_path.exists() {
            let content = std::fs::read_to_string(&config_path)?;
            let config: Config = toml::from_str(&content)?;
            tracing::info!("Loaded config from specified path {:?}", config_path);
            return Ok(config);
        } else {
            anyhow::bail!("Specified config file not found: {:?}", config_path);
        }
    }

    // Try current directory config.toml
    let local_config = PathBuf::from("config.toml");
    if local_config.exists() {
        match std::fs::read_to_string(&local_config) {
            Ok(content) => {
                match toml::from_str::<Config>(&content) {
                    Ok(config) => {
                        tracing::info!("Loaded config from current directory {:?}", local_config);
                        return Ok(config);
                    }
                    Err(e) => {
                        tracing::error!("Failed to parse ./config.toml: {}. Falling back to default path.", e);
                    }
                }
            }
            Err(e) => {
                tracing::error!("Failed to read ./config.toml: {}. Falling back to default path.", e);
            }
        }
    }

    let default_path = default_config_path();
    if default_path.exists() {
        let content = std::fs::read_to_string(&default_path)?;
        let config: Config = toml::from_str(&content)?;
        tracing::info!("Loaded config from default path {:?}", default_path);
        Ok(config)
    } else {
        tracing::info!("No config file found, using defaults");
        Ok(Config::default())
    }
}

/// Apply environment overrides on top of whatever the file provided.
/// `PORT` is honored as a fallback because typical PaaS hosts inject it.
fn apply_env_overrides(config: &mut Config) {
    let port_var = std::env::var("FPL_RELAY_PORT").or_else(|_| std::env::var("PORT"));
    if let Ok(port) = port_var {
        match port.parse::<u16>() {
            Ok(port) => config.server.port = port,
            Err(_) => tracing::warn!("Ignoring non-numeric port from environment: {}", port),
        }
    }

    if let Ok(base_url) = std::env::var("FPL_RELAY_UPSTREAM_BASE") {
        config.upstream.base_url = base_url;
    }

    if let Ok(origin) = std::env::var("FPL_RELAY_ALLOWED_ORIGIN") {
        config.cors.allowed_origin = origin;
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn defaults_match_upstream_service() {
        let config = Config::default();
        assert_eq!(config.server.port, 3000);
        assert_eq!(config.upstream.base_url, "https://fantasy.premierleague.com/api");
        assert_eq!(config.cors.allowed_origin, "https://littlesheepdesign-max.github.io");
        assert_eq!(config.upstream.request_timeout, 30);
    }

    #[test]
    fn partial_toml_fills_in_defaults() {
        let config: Config = toml::from_str(
            r#"
            [server]
            port = 8080

            [cors]
            allowed_origin = "https://example.github.io"
            "#,
        )
        .unwrap();

        assert_eq!(config.server.port, 8080);
        assert_eq!(config.server.host, "127.0.0.1");
        assert_eq!(config.cors.allowed_origin, "https://example.github.io");
        assert_eq!(config.upstream.base_url, "https://fantasy.premierleague.com/api");
    }

    #[test]
    fn empty_toml_is_all_defaults() {
        let config: Config = toml::from_str("").unwrap();
        assert_eq!(config.server.host, ServerConfig::default().host);
        assert_eq!(config.logging.level, "info");
    }
}
