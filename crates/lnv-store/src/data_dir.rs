use std::path::{Path, PathBuf};
use std::{env, fs};

use crate::config::{CONFIG_FILE, Settings};
use crate::error::{Result, StoreError};
use crate::store::Store;

pub const DATA_DIR_ENV: &str = "LNV_DATA_DIR";
pub const DB_FILE: &str = "lnv.db";

/// Default base directory: `$LNV_DATA_DIR`, else `~/.late-night-vibes`.
pub fn default_base_dir() -> PathBuf {
    if let Ok(dir) = env::var(DATA_DIR_ENV)
        && !dir.trim().is_empty()
    {
        return PathBuf::from(dir);
    }
    dirs_home().join(".late-night-vibes")
}

fn dirs_home() -> PathBuf {
    env::var("HOME")
        .or_else(|_| env::var("USERPROFILE"))
        .map(PathBuf::from)
        .unwrap_or_else(|_| PathBuf::from("."))
}

/// The on-disk home of one user's state.
///
/// Layout:
/// ```text
/// ~/.late-night-vibes/
/// ├── lnv.db
/// └── config.toml   (optional)
/// ```
pub struct DataDir {
    base: PathBuf,
    store: Store,
    settings: Settings,
}

impl DataDir {
    /// Open the data directory, creating it as needed.
    /// `base_dir` overrides the default location.
    pub fn open(base_dir: Option<&Path>) -> Result<Self> {
        let base = base_dir.map(PathBuf::from).unwrap_or_else(default_base_dir);
        fs::create_dir_all(&base).map_err(|e| StoreError::io(&base, e))?;

        let settings = Settings::load(&base.join(CONFIG_FILE))?;
        let store = Store::open(&base.join(DB_FILE))?;
        tracing::debug!(base = %base.display(), "data directory opened");

        Ok(Self {
            base,
            store,
            settings,
        })
    }

    pub fn base(&self) -> &Path {
        &self.base
    }

    pub fn store(&self) -> &Store {
        &self.store
    }

    pub fn settings(&self) -> &Settings {
        &self.settings
    }

    /// Venue CSV named in settings.
    pub fn dataset_path(&self) -> PathBuf {
        PathBuf::from(&self.settings.dataset)
    }
}
