use std::{fs, path::Path, sync::Arc};

use linksconnect_lib::{Bracket, SortOrder, fs::config_dir};
use parking_lot::RwLock;
use serde::{Deserialize, Serialize};
use tracing::warn;

pub use crate::config::theme::Theme;

mod theme;

const FILE_NAME: &str = "gui.toml";

/// Handle to the desktop app's configuration
pub type Cfg = Arc<RwLock<GuiConfig>>;

/// The desktop app's configuration, serialized to TOML.
#[derive(Debug, Default, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct GuiConfig {
    pub theme: Theme,
    pub feed: Feed,
}

/// Feed filters remembered between runs.
#[derive(Debug, Default, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Feed {
    pub bracket: Bracket,
    pub order: SortOrder,
}

impl GuiConfig {
    /// Load the config, falling back to defaults if it can't be read.
    pub fn load() -> Self {
        match config_dir() {
            Ok(dir) => Self::load_from(&dir.join(FILE_NAME)),
            Err(e) => {
                warn!("No config directory, using defaults: {e}");
                Self::default()
            }
        }
    }

    pub fn load_from(path: &Path) -> Self {
        if path.exists() {
            match fs::read_to_string(path) {
                Ok(contents) => toml::from_str(&contents).unwrap_or_default(),
                Err(e) => {
                    warn!("Failed to read {}: {e}", path.display());
                    Self::default()
                }
            }
        } else {
            let cfg = Self::default();
            cfg.save_to(path);
            cfg
        }
    }

    pub fn save(&self) {
        match config_dir() {
            Ok(dir) => self.save_to(&dir.join(FILE_NAME)),
            Err(e) => warn!("Not saving config: {e}"),
        }
    }

    pub fn save_to(&self, path: &Path) {
        let result = toml::to_string_pretty(self)
            .map_err(|e| e.to_string())
            .and_then(|contents| fs::write(path, contents).map_err(|e| e.to_string()));

        if let Err(e) = result {
            warn!("Failed to save {}: {e}", path.display());
        }
    }

    pub fn theme(&self) -> iced::Theme {
        self.theme.into()
    }

    pub fn into_handle(self) -> Cfg {
        Arc::new(RwLock::new(self))
    }
}
