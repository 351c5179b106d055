//! Client config load for `~/.chat-widget/config.yaml`.

use std::path::{Path, PathBuf};

/// Endpoint used when no config sets `api.url`.
pub const DEFAULT_API_URL: &str = "http://localhost:8000/chat";

/// Env var naming an alternate config file.
pub const CONFIG_ENV_VAR: &str = "CHAT_WIDGET_CONFIG";

/// API section (url, session_id).
#[derive(Debug, Clone, Default, PartialEq, serde::Serialize, serde::Deserialize)]
pub struct ApiSection {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub url: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub session_id: Option<String>,
}

/// Full config file.
#[derive(Debug, Clone, Default, PartialEq, serde::Serialize, serde::Deserialize)]
pub struct Config {
    #[serde(default)]
    pub api: ApiSection,
}

impl Config {
    /// Answer Service endpoint, falling back to [`DEFAULT_API_URL`].
    pub fn api_url(&self) -> &str {
        self.api.url.as_deref().unwrap_or(DEFAULT_API_URL)
    }

    pub fn session_id(&self) -> Option<&str> {
        self.api.session_id.as_deref()
    }
}

/// Returns the default config file path: `~/.chat-widget/config.yaml` (platform-specific).
pub fn default_config_path() -> Option<PathBuf> {
    Some(config_dir()?.join("config.yaml"))
}

/// Directory holding the config file and the widget log.
pub fn config_dir() -> Option<PathBuf> {
    Some(home_dir()?.join(".chat-widget"))
}

#[cfg(unix)]
fn home_dir() -> Option<PathBuf> {
    std::env::var_os("HOME").map(PathBuf::from)
}

#[cfg(windows)]
fn home_dir() -> Option<PathBuf> {
    std::env::var_os("USERPROFILE").map(PathBuf::from)
}

#[cfg(not(any(unix, windows)))]
fn home_dir() -> Option<PathBuf> {
    None
}

/// Resolve the config path: `--config <path>` in `args`, then
/// [`CONFIG_ENV_VAR`], then the default path.
pub fn resolve_config_path(args: &[String]) -> Result<PathBuf, ConfigError> {
    if let Some(pos) = args.iter().position(|a| a == "--config") {
        return args
            .get(pos + 1)
            .map(PathBuf::from)
            .ok_or_else(|| ConfigError::Path("--config requires a path".into()));
    }
    if let Ok(val) = std::env::var(CONFIG_ENV_VAR) {
        return Ok(PathBuf::from(val));
    }
    default_config_path().ok_or_else(|| {
        ConfigError::Path(format!(
            "unable to determine config path (set --config or {})",
            CONFIG_ENV_VAR
        ))
    })
}

/// Load config from a YAML file.
pub fn load(path: &Path) -> Result<Config, ConfigError> {
    let contents = std::fs::read_to_string(path).map_err(|e| ConfigError::Io(e.to_string()))?;
    serde_yaml::from_str(&contents).map_err(|e| ConfigError::Parse(e.to_string()))
}

/// Like [`load`], but a missing file yields the default config.
pub fn load_or_default(path: &Path) -> Result<Config, ConfigError> {
    if !path.exists() {
        tracing::debug!(path = %path.display(), "no config file, using defaults");
        return Ok(Config::default());
    }
    load(path)
}

/// Config resolution/load error.
#[derive(Debug)]
pub enum ConfigError {
    Path(String),
    Io(String),
    Parse(String),
}

impl std::fmt::Display for ConfigError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            ConfigError::Path(s) => write!(f, "config path error: {}", s),
            ConfigError::Io(s) => write!(f, "IO error: {}", s),
            ConfigError::Parse(s) => write!(f, "parse error: {}", s),
        }
    }
}

impl std::error::Error for ConfigError {}
