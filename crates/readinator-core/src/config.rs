//! Configuration structures for readinator

use serde::{Deserialize, Serialize};
use std::path::PathBuf;

/// Main configuration for a verification run.
///
/// Defaults reproduce a local development deployment: backend on
/// localhost:8000, frontend served from localhost:5500.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct Config {
    /// Target backend settings
    #[serde(default)]
    pub target: TargetConfig,

    /// Filesystem checks
    #[serde(default)]
    pub files: FilesConfig,

    /// Verified application settings checks
    #[serde(default)]
    pub settings: SettingsConfig,

    /// Database checks
    #[serde(default)]
    pub database: DatabaseConfig,
}

/// Where the backend under verification is reachable
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TargetConfig {
    /// Base URL of the backend
    #[serde(default = "default_base_url")]
    pub base_url: String,

    /// Path prefix of the JSON API
    #[serde(default = "default_api_path")]
    pub api_path: String,

    /// Origin the frontend is served from, sent when probing CORS
    #[serde(default = "default_frontend_origin")]
    pub frontend_origin: String,

    /// Per-check I/O timeout in seconds
    #[serde(default = "default_timeout_secs")]
    pub timeout_secs: u64,

    /// Security headers required on responses
    #[serde(default = "default_security_headers")]
    pub security_headers: Vec<String>,

    /// CDN hosts the Content-Security-Policy must allow
    #[serde(default = "default_cdn_hosts")]
    pub cdn_hosts: Vec<String>,
}

impl TargetConfig {
    /// Absolute URL for a path relative to the backend root
    pub fn url(&self, path: &str) -> String {
        format!("{}{}", self.base_url.trim_end_matches('/'), path)
    }

    /// Absolute URL for a path relative to the API prefix
    pub fn api_url(&self, path: &str) -> String {
        format!(
            "{}{}{}",
            self.base_url.trim_end_matches('/'),
            self.api_path,
            path
        )
    }

    pub fn timeout(&self) -> std::time::Duration {
        std::time::Duration::from_secs(self.timeout_secs)
    }
}

impl Default for TargetConfig {
    fn default() -> Self {
        Self {
            base_url: default_base_url(),
            api_path: default_api_path(),
            frontend_origin: default_frontend_origin(),
            timeout_secs: default_timeout_secs(),
            security_headers: default_security_headers(),
            cdn_hosts: default_cdn_hosts(),
        }
    }
}

fn default_base_url() -> String {
    "http://localhost:8000".to_string()
}

fn default_api_path() -> String {
    "/api".to_string()
}

fn default_frontend_origin() -> String {
    "http://localhost:5500".to_string()
}

fn default_timeout_secs() -> u64 {
    5
}

fn default_security_headers() -> Vec<String> {
    [
        "X-Content-Type-Options",
        "X-Frame-Options",
        "Content-Security-Policy",
        "Strict-Transport-Security",
        "Referrer-Policy",
    ]
    .iter()
    .map(|s| s.to_string())
    .collect()
}

fn default_cdn_hosts() -> Vec<String> {
    vec![
        "fonts.googleapis.com".to_string(),
        "cdnjs.cloudflare.com".to_string(),
    ]
}

/// Files the deployment must ship
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct FilesConfig {
    /// Project root the relative paths below resolve against
    #[serde(default = "default_root")]
    pub root: PathBuf,

    /// Required frontend files
    #[serde(default = "default_frontend_files")]
    pub frontend: Vec<String>,

    /// Required backend files
    #[serde(default = "default_backend_files")]
    pub backend: Vec<String>,

    /// HTML entry point inspected for configuration markers
    #[serde(default = "default_entrypoint")]
    pub entrypoint: String,

    /// Marker that must be present in the entry point
    #[serde(default = "default_api_config_marker")]
    pub api_config_marker: String,
}

impl Default for FilesConfig {
    fn default() -> Self {
        Self {
            root: default_root(),
            frontend: default_frontend_files(),
            backend: default_backend_files(),
            entrypoint: default_entrypoint(),
            api_config_marker: default_api_config_marker(),
        }
    }
}

fn default_root() -> PathBuf {
    PathBuf::from(".")
}

fn default_frontend_files() -> Vec<String> {
    [
        "index.html",
        "js/api.js",
        "js/auth.js",
        "QUICK_START.md",
        "SETUP_GUIDE.md",
        "start_frontend.ps1",
    ]
    .iter()
    .map(|s| s.to_string())
    .collect()
}

fn default_backend_files() -> Vec<String> {
    [
        "backend/app/main.py",
        "backend/app/config.py",
        "backend/requirements.txt",
        "backend/.env.example",
        "backend/start_backend.ps1",
        "backend/alembic.ini",
    ]
    .iter()
    .map(|s| s.to_string())
    .collect()
}

fn default_entrypoint() -> String {
    "index.html".to_string()
}

fn default_api_config_marker() -> String {
    "window.API_CONFIG".to_string()
}

/// Checks against the verified application's own settings
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SettingsConfig {
    /// Env file the application loads its settings from
    #[serde(default = "default_env_file")]
    pub env_file: String,

    /// Minimum acceptable JWT secret length
    #[serde(default = "default_min_secret_length")]
    pub min_secret_length: usize,
}

impl Default for SettingsConfig {
    fn default() -> Self {
        Self {
            env_file: default_env_file(),
            min_secret_length: default_min_secret_length(),
        }
    }
}

fn default_env_file() -> String {
    "backend/.env".to_string()
}

fn default_min_secret_length() -> usize {
    32
}

/// Database schema expectations
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DatabaseConfig {
    /// Connection URL override; when absent the verified application's
    /// DATABASE_URL is used
    pub url: Option<String>,

    /// Tables the migrations must have created
    #[serde(default = "default_required_tables")]
    pub required_tables: Vec<String>,

    /// Username the seed script must have created
    #[serde(default = "default_seed_username")]
    pub seed_username: String,
}

impl Default for DatabaseConfig {
    fn default() -> Self {
        Self {
            url: None,
            required_tables: default_required_tables(),
            seed_username: default_seed_username(),
        }
    }
}

fn default_required_tables() -> Vec<String> {
    ["users", "events", "registrations", "resources"]
        .iter()
        .map(|s| s.to_string())
        .collect()
}

fn default_seed_username() -> String {
    "admin".to_string()
}

impl Config {
    /// Load configuration from a file
    pub fn from_file(path: &std::path::Path) -> crate::error::Result<Self> {
        let content = std::fs::read_to_string(path)?;

        if path.extension().map(|e| e == "json").unwrap_or(false) {
            serde_json::from_str(&content).map_err(|e| crate::error::ReadinatorError::Parse {
                context: path.display().to_string(),
                message: e.to_string(),
            })
        } else {
            // Assume YAML for other extensions
            serde_yaml::from_str(&content).map_err(|e| crate::error::ReadinatorError::Parse {
                context: path.display().to_string(),
                message: e.to_string(),
            })
        }
    }
}

/// The verified application's settings, as exposed by a [`SettingsSource`].
///
/// [`SettingsSource`]: crate::traits::SettingsSource
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AppSettings {
    /// Origins the application accepts cross-origin requests from
    pub allowed_origins: Vec<String>,

    /// Secret used to sign JWTs
    pub jwt_secret_key: String,

    /// Database connection URL
    pub database_url: String,

    /// Whether the application runs in debug mode
    pub debug: bool,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn defaults_describe_local_deployment() {
        let config = Config::default();
        assert_eq!(config.target.base_url, "http://localhost:8000");
        assert_eq!(config.target.frontend_origin, "http://localhost:5500");
        assert_eq!(config.target.security_headers.len(), 5);
        assert_eq!(config.database.required_tables.len(), 4);
        assert_eq!(config.database.seed_username, "admin");
    }

    #[test]
    fn url_helpers_join_paths() {
        let target = TargetConfig {
            base_url: "http://localhost:8000/".to_string(),
            ..TargetConfig::default()
        };
        assert_eq!(target.url("/health"), "http://localhost:8000/health");
        assert_eq!(target.api_url("/events"), "http://localhost:8000/api/events");
    }

    #[test]
    fn partial_yaml_keeps_defaults() {
        let config: Config = serde_yaml::from_str("target:\n  base_url: http://10.0.0.1:9000\n")
            .expect("yaml parses");
        assert_eq!(config.target.base_url, "http://10.0.0.1:9000");
        assert_eq!(config.target.timeout_secs, 5);
        assert_eq!(config.settings.min_secret_length, 32);
    }
}
