use std::collections::HashMap;
use std::env::var;
use std::path::{Path, PathBuf};
use std::time::Duration;

use dotenvy::dotenv;
use steam_lobby::ClientOptions;
use steam_lobby::reference::is_steamid;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("could not read profiles file {path}: {source}")]
    ProfilesUnreadable {
        path: PathBuf,
        source: std::io::Error,
    },

    #[error("profiles must be a JSON object of alias -> steamid: {0}")]
    ProfilesInvalid(#[from] serde_json::Error),

    #[error("profile '{alias}' has a non-numeric steamid: {steamid:?}")]
    InvalidSteamId { alias: String, steamid: String },
}

/// Bot configuration with environment variable overrides
#[derive(Debug, Clone)]
pub struct Config {
    /// Steam Web API key
    /// Env: STEAM_API_KEY (required at runtime)
    pub steam_api_key: Option<String>,

    /// JSON file mapping aliases to steamids
    /// Env: STEAM_PROFILES_PATH (default: "profiles.json")
    pub profiles_path: PathBuf,

    /// Steam Web API base URL
    /// Env: STEAM_API_BASE_URL (default: "http://api.steampowered.com")
    pub steam_api_base_url: String,

    /// Per-request timeout towards Steam in seconds
    /// Env: STEAM_REQUEST_TIMEOUT_SECS (default: 7, also used for 0)
    pub steam_request_timeout: Duration,

    /// Discord API Token
    /// Env: DISCORD_TOKEN (required at runtime)
    pub discord_token: Option<String>,

    /// Discord Command Prefix
    /// Env: DISCORD_COMMAND_PREFIX (default: "!")
    pub discord_command_prefix: String,
}

impl Config {
    /// Load configuration from environment variables with defaults
    pub fn from_env() -> Self {
        let _ = dotenv();
        let defaults = Self::default();
        Self {
            steam_api_key: var("STEAM_API_KEY").ok(),
            profiles_path: var("STEAM_PROFILES_PATH")
                .map(PathBuf::from)
                .unwrap_or(defaults.profiles_path),
            steam_api_base_url: env_or_default_string(
                "STEAM_API_BASE_URL",
                &defaults.steam_api_base_url,
            ),
            steam_request_timeout: request_timeout(
                env_or_default("STEAM_REQUEST_TIMEOUT_SECS", 0),
                defaults.steam_request_timeout,
            ),
            discord_token: var("DISCORD_TOKEN").ok(),
            discord_command_prefix: env_or_default_string(
                "DISCORD_COMMAND_PREFIX",
                &defaults.discord_command_prefix,
            ),
        }
    }

    /// HTTP settings for the lobby client
    pub fn client_options(&self) -> ClientOptions {
        ClientOptions {
            base_url: self.steam_api_base_url.clone(),
            timeout: self.steam_request_timeout,
        }
    }
}

impl Default for Config {
    fn default() -> Self {
        let client = ClientOptions::default();
        Self {
            steam_api_key: None,
            profiles_path: PathBuf::from("profiles.json"),
            steam_api_base_url: client.base_url,
            steam_request_timeout: client.timeout,
            discord_token: None,
            discord_command_prefix: "!".to_string(),
        }
    }
}

/// Seconds from the environment, falling back to `default` for 0 (unset or disabled).
fn request_timeout(secs: u64, default: Duration) -> Duration {
    if secs == 0 {
        default
    } else {
        Duration::from_secs(secs)
    }
}

/// Read the alias -> steamid registry from a JSON file.
pub fn load_registry(path: impl AsRef<Path>) -> Result<HashMap<String, String>, ConfigError> {
    let path = path.as_ref();
    let raw = std::fs::read_to_string(path).map_err(|source| ConfigError::ProfilesUnreadable {
        path: path.to_path_buf(),
        source,
    })?;
    parse_registry(&raw)
}

/// Parse `{"alias": "steamid", ...}`, rejecting non-numeric steamids.
pub fn parse_registry(raw: &str) -> Result<HashMap<String, String>, ConfigError> {
    let registry: HashMap<String, String> = serde_json::from_str(raw)?;
    if let Some((alias, steamid)) = registry.iter().find(|(_, id)| !is_steamid(id)) {
        return Err(ConfigError::InvalidSteamId {
            alias: alias.clone(),
            steamid: steamid.clone(),
        });
    }
    Ok(registry)
}

/// Parse environment variable or return default value
fn env_or_default<T: std::str::FromStr>(key: &str, default: T) -> T {
    var(key)
        .ok()
        .and_then(|val| val.parse().ok())
        .unwrap_or(default)
}

/// Parse environment variable string or return default value
fn env_or_default_string(key: &str, default: &str) -> String {
    var(key).unwrap_or_else(|_| default.to_string())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_config() {
        let config = Config::default();
        assert_eq!(config.profiles_path, PathBuf::from("profiles.json"));
        assert_eq!(config.steam_api_base_url, "http://api.steampowered.com");
        assert_eq!(config.steam_request_timeout, Duration::from_secs(7));
        assert_eq!(config.discord_command_prefix, "!");
        assert!(config.steam_api_key.is_none());
        assert!(config.discord_token.is_none());
    }

    #[test]
    fn test_client_options_follow_config() {
        let config = Config {
            steam_api_base_url: "http://localhost:8080".to_string(),
            steam_request_timeout: Duration::from_secs(2),
            ..Config::default()
        };
        let options = config.client_options();
        assert_eq!(options.base_url, "http://localhost:8080");
        assert_eq!(options.timeout, Duration::from_secs(2));
    }

    #[test]
    fn test_zero_timeout_falls_back_to_default() {
        let default = Duration::from_secs(7);
        assert_eq!(request_timeout(0, default), default);
        assert_eq!(request_timeout(15, default), Duration::from_secs(15));
    }

    #[test]
    fn test_parse_registry() {
        let registry =
            parse_registry(r#"{"main": "76561198000000001", "alt": "76561198000000002"}"#)
                .unwrap();
        assert_eq!(registry.len(), 2);
        assert_eq!(registry["main"], "76561198000000001");
    }

    #[test]
    fn test_parse_registry_rejects_vanity_names() {
        let err = parse_registry(r#"{"main": "gaben"}"#).unwrap_err();
        assert!(matches!(
            err,
            ConfigError::InvalidSteamId { ref alias, .. } if alias == "main"
        ));
    }

    #[test]
    fn test_parse_registry_rejects_non_objects() {
        assert!(matches!(
            parse_registry(r#"["76561198000000001"]"#),
            Err(ConfigError::ProfilesInvalid(_))
        ));
    }

    #[test]
    fn test_load_registry_missing_file() {
        let err = load_registry("/definitely/not/here.json").unwrap_err();
        assert!(matches!(err, ConfigError::ProfilesUnreadable { .. }));
    }
}
