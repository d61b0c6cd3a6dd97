use std::{
    fs,
    path::{Path, PathBuf},
    sync::Arc,
    time::Duration,
};

use parking_lot::RwLock;
use serde::{Deserialize, Serialize};
use tracing::warn;

use crate::{Result, fs::config_dir};

const FILE_NAME: &str = "core.toml";
/// Checked in order; the first one set wins over the configured key.
const API_KEY_VARS: [&str; 2] = ["GEMINI_API_KEY", "API_KEY"];

/// Shared handle to the core configuration.
pub type Cfg = Arc<RwLock<CoreConfig>>;

/// The core configuration, serialized to TOML.
#[derive(Debug, Default, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct CoreConfig {
    pub gemini: GeminiConfig,
    pub feed: FeedConfig,
    pub ghin: GhinConfig,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct GeminiConfig {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub api_key: Option<String>,
    /// Key taken from the environment. Wins over `api_key` and is never saved.
    #[serde(skip)]
    pub env_api_key: Option<String>,
    pub model: String,
    pub base_url: String,
    pub timeout_secs: u64,
}

impl GeminiConfig {
    /// The key requests are sent with.
    pub fn api_key(&self) -> Option<&str> {
        self.env_api_key.as_deref().or(self.api_key.as_deref())
    }
}

impl Default for GeminiConfig {
    fn default() -> Self {
        Self {
            api_key: None,
            env_api_key: None,
            model: "gemini-2.5-flash".into(),
            base_url: "https://generativelanguage.googleapis.com".into(),
            timeout_secs: 60,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct FeedConfig {
    /// How many golfers to ask the directory for
    pub count: usize,
}

impl Default for FeedConfig {
    fn default() -> Self {
        Self { count: 10 }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct GhinConfig {
    /// Simulated lookup latency
    pub delay_ms: u64,
}

impl GhinConfig {
    pub fn delay(&self) -> Duration {
        Duration::from_millis(self.delay_ms)
    }
}

impl Default for GhinConfig {
    fn default() -> Self {
        Self { delay_ms: 1500 }
    }
}

impl CoreConfig {
    pub fn path() -> Result<PathBuf> {
        Ok(config_dir()?.join(FILE_NAME))
    }

    /// Load the config from the default location, writing defaults on first run.
    pub fn load() -> Result<Self> {
        let mut cfg = Self::load_from(&Self::path()?)?;
        cfg.apply_env(|var| std::env::var(var).ok());
        Ok(cfg)
    }

    pub fn load_from(path: &Path) -> Result<Self> {
        if path.exists() {
            let contents = fs::read_to_string(path)?;
            Ok(toml::from_str(&contents).unwrap_or_else(|e| {
                warn!("Ignoring invalid config {}: {e}", path.display());
                Self::default()
            }))
        } else {
            let cfg = Self::default();
            cfg.save_to(path)?;
            Ok(cfg)
        }
    }

    pub fn save_to(&self, path: &Path) -> Result<()> {
        let contents = toml::to_string_pretty(self)?;

        if let Some(parent) = path.parent() {
            fs::create_dir_all(parent)?;
        }
        fs::write(path, contents)?;

        Ok(())
    }

    /// Let the environment override the Gemini API key.
    pub fn apply_env<F>(&mut self, lookup: F)
    where
        F: Fn(&str) -> Option<String>,
    {
        if let Some(key) = API_KEY_VARS
            .iter()
            .filter_map(|var| lookup(var))
            .find(|key| !key.trim().is_empty())
        {
            self.gemini.env_api_key = Some(key);
        }
    }

    pub fn into_handle(self) -> Cfg {
        Arc::new(RwLock::new(self))
    }
}

#[cfg(test)]
mod test {
    use tempfile::tempdir;

    use super::*;

    #[test]
    fn test_first_load_writes_defaults() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("core.toml");

        let cfg = CoreConfig::load_from(&path).unwrap();

        assert_eq!(cfg, CoreConfig::default());
        assert!(path.exists());
        assert_eq!(cfg.feed.count, 10);
        assert_eq!(cfg.ghin.delay(), Duration::from_millis(1500));
        assert_eq!(cfg.gemini.model, "gemini-2.5-flash");
    }

    #[test]
    fn test_round_trip() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("core.toml");

        let mut cfg = CoreConfig::default();
        cfg.feed.count = 4;
        cfg.gemini.api_key = Some("secret".into());
        cfg.save_to(&path).unwrap();

        assert_eq!(CoreConfig::load_from(&path).unwrap(), cfg);
    }

    #[test]
    fn test_partial_file_uses_defaults() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("core.toml");
        fs::write(&path, "[feed]\ncount = 3\n").unwrap();

        let cfg = CoreConfig::load_from(&path).unwrap();

        assert_eq!(cfg.feed.count, 3);
        assert_eq!(cfg.ghin, GhinConfig::default());
    }

    #[test]
    fn test_invalid_file_falls_back_to_defaults() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("core.toml");
        fs::write(&path, "feed = [[[").unwrap();

        assert_eq!(CoreConfig::load_from(&path).unwrap(), CoreConfig::default());
    }

    #[test]
    fn test_env_overrides_api_key() {
        let mut cfg = CoreConfig::default();
        cfg.gemini.api_key = Some("from-file".into());

        cfg.apply_env(|var| (var == "API_KEY").then(|| "from-env".to_string()));
        assert_eq!(cfg.gemini.api_key(), Some("from-env"));

        cfg.apply_env(|var| match var {
            "GEMINI_API_KEY" => Some("gemini".into()),
            "API_KEY" => Some("generic".into()),
            _ => None,
        });
        assert_eq!(cfg.gemini.api_key(), Some("gemini"));
    }

    #[test]
    fn test_blank_env_is_ignored() {
        let mut cfg = CoreConfig::default();

        cfg.apply_env(|_| Some("  ".into()));

        assert_eq!(cfg.gemini.api_key(), None);
    }

    #[test]
    fn test_env_key_is_not_written_back() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("core.toml");
        fs::write(&path, "[gemini]\napi_key = \"from-file\"\n").unwrap();

        let mut cfg = CoreConfig::load_from(&path).unwrap();
        cfg.apply_env(|var| (var == "GEMINI_API_KEY").then(|| "from-env".to_string()));
        assert_eq!(cfg.gemini.api_key(), Some("from-env"));

        cfg.save_to(&path).unwrap();

        let contents = fs::read_to_string(&path).unwrap();
        assert!(!contents.contains("from-env"));
        let reloaded = CoreConfig::load_from(&path).unwrap();
        assert_eq!(reloaded.gemini.api_key(), Some("from-file"));
    }
}
