//! Persistence for the single local self-profile.

use std::{
    fmt::Debug,
    fs,
    io::ErrorKind,
    path::{Path, PathBuf},
    sync::Arc,
};

use parking_lot::RwLock;
use tracing::{debug, warn};

use crate::{Result, fs::state_dir, profile::GolferProfile};

const FILE_NAME: &str = "linksconnect_user.toml";

/// Holds at most one [`GolferProfile`]: the user of this device.
pub trait ProfileStore: Debug + Send + Sync {
    /// The saved profile, if any.
    fn load(&self) -> Result<Option<GolferProfile>>;
    /// Replace whatever is stored with `profile`.
    fn save(&self, profile: &GolferProfile) -> Result<()>;
    /// Forget the stored profile. Clearing an empty store is fine.
    fn clear(&self) -> Result<()>;
}

/// Handle to the profile store shared by a front end.
pub type Store = Arc<dyn ProfileStore>;

/// Stores the profile as a TOML file in the state directory.
#[derive(Debug, Clone)]
pub struct FileStore {
    path: PathBuf,
}

impl FileStore {
    pub fn new() -> Result<Self> {
        Ok(Self::at(state_dir()?.join(FILE_NAME)))
    }

    pub fn at(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Move an unreadable record out of the way so a fresh one can be written.
    fn backup(&self) -> Result<PathBuf> {
        let timestamp = chrono::Local::now().format("%Y%m%d-%H%M%S");
        let stem = self
            .path
            .file_stem()
            .map(|s| s.to_string_lossy().into_owned())
            .unwrap_or_else(|| "profile".into());
        let backup = self.path.with_file_name(format!("{stem}-{timestamp}.toml.bak"));

        fs::rename(&self.path, &backup)?;

        Ok(backup)
    }
}

impl ProfileStore for FileStore {
    fn load(&self) -> Result<Option<GolferProfile>> {
        let contents = match fs::read_to_string(&self.path) {
            Ok(contents) => contents,
            Err(e) if e.kind() == ErrorKind::NotFound => return Ok(None),
            Err(e) => return Err(e.into()),
        };

        match toml::from_str(&contents) {
            Ok(profile) => Ok(Some(profile)),
            Err(e) => {
                let backup = self.backup()?;
                warn!(
                    "Unreadable profile at {} ({e}), moved to {}",
                    self.path.display(),
                    backup.display()
                );
                Ok(None)
            }
        }
    }

    fn save(&self, profile: &GolferProfile) -> Result<()> {
        let contents = toml::to_string_pretty(profile)?;

        if let Some(parent) = self.path.parent() {
            fs::create_dir_all(parent)?;
        }
        fs::write(&self.path, contents)?;

        debug!("Saved profile {} to {}", profile.id(), self.path.display());

        Ok(())
    }

    fn clear(&self) -> Result<()> {
        match fs::remove_file(&self.path) {
            Ok(()) => {
                debug!("Removed profile at {}", self.path.display());
                Ok(())
            }
            Err(e) if e.kind() == ErrorKind::NotFound => Ok(()),
            Err(e) => Err(e.into()),
        }
    }
}

/// Keeps the profile in memory only.
#[derive(Debug, Default, Clone)]
pub struct MemoryStore {
    profile: Arc<RwLock<Option<GolferProfile>>>,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self::default()
    }
}

impl ProfileStore for MemoryStore {
    fn load(&self) -> Result<Option<GolferProfile>> {
        Ok(self.profile.read().clone())
    }

    fn save(&self, profile: &GolferProfile) -> Result<()> {
        *self.profile.write() = Some(profile.clone());
        Ok(())
    }

    fn clear(&self) -> Result<()> {
        self.profile.write().take();
        Ok(())
    }
}
