use anyhow::{Context, Result, anyhow};
use directories::ProjectDirs;
use std::{fs, path::PathBuf};

/// Fixed storage key for the persisted city history.
pub const HISTORY_KEY: &str = "history";
/// Fixed storage key for the persisted theme.
pub const THEME_KEY: &str = "theme";

/// Flat key/value persistence, one file per key in a local data directory.
///
/// Values are plain strings; callers JSON-encode structured data. A missing
/// key reads as `None`, never an error. Last write wins; there is no
/// cross-process locking.
#[derive(Debug, Clone)]
pub struct LocalStore {
    dir: PathBuf,
}

impl LocalStore {
    /// Open the store at the platform data directory.
    pub fn open() -> Result<Self> {
        let dirs = ProjectDirs::from("dev", "wearcast", "wearcast")
            .ok_or_else(|| anyhow!("Could not determine platform data directory"))?;

        Ok(Self::at(dirs.data_local_dir()))
    }

    /// Open the store at an explicit directory (tests, custom deployments).
    pub fn at(dir: impl Into<PathBuf>) -> Self {
        Self { dir: dir.into() }
    }

    pub fn get(&self, key: &str) -> Option<String> {
        fs::read_to_string(self.path(key)).ok()
    }

    pub fn set(&self, key: &str, value: &str) -> Result<()> {
        fs::create_dir_all(&self.dir)
            .with_context(|| format!("Failed to create data directory: {}", self.dir.display()))?;

        let path = self.path(key);
        fs::write(&path, value)
            .with_context(|| format!("Failed to write store entry: {}", path.display()))?;

        Ok(())
    }

    pub fn remove(&self, key: &str) -> Result<()> {
        let path = self.path(key);
        match fs::remove_file(&path) {
            Ok(()) => Ok(()),
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => Ok(()),
            Err(e) => {
                Err(e).with_context(|| format!("Failed to remove store entry: {}", path.display()))
            }
        }
    }

    fn path(&self, key: &str) -> PathBuf {
        self.dir.join(format!("{key}.json"))
    }
}
