//! High-score persistence
//!
//! The record is a single decimal integer. Anything that cannot be read back
//! as one (missing file, empty file, garbage) counts as "no record yet".

use anyhow::{Context, Result};
use log::{info, warn};
use std::io::ErrorKind;
use std::path::{Path, PathBuf};

/// Where the game keeps its best length between runs
pub trait HighScoreStore {
    /// Read the stored record, or 0 when there is none
    fn load(&mut self) -> u32;

    /// Replace the stored record
    fn save(&mut self, score: u32) -> Result<()>;
}

/// Stores the record in a plain text file
#[derive(Debug, Clone)]
pub struct FileHighScoreStore {
    path: PathBuf,
}

impl FileHighScoreStore {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }
}

impl HighScoreStore for FileHighScoreStore {
    fn load(&mut self) -> u32 {
        let contents = match std::fs::read_to_string(&self.path) {
            Ok(contents) => contents,
            Err(e) if e.kind() == ErrorKind::NotFound => {
                info!("No high score file at {:?}, starting from 0", self.path);
                return 0;
            }
            Err(e) => {
                warn!("Failed to read high score from {:?}: {}", self.path, e);
                return 0;
            }
        };

        match contents.trim().parse() {
            Ok(score) => score,
            Err(e) => {
                warn!(
                    "Ignoring malformed high score {:?} in {:?}: {}",
                    contents.trim(),
                    self.path,
                    e
                );
                0
            }
        }
    }

    fn save(&mut self, score: u32) -> Result<()> {
        if let Some(parent) = self.path.parent().filter(|p| !p.as_os_str().is_empty()) {
            std::fs::create_dir_all(parent)
                .with_context(|| format!("Failed to create directory: {:?}", parent))?;
        }

        std::fs::write(&self.path, score.to_string())
            .with_context(|| format!("Failed to write high score to {:?}", self.path))
    }
}

/// In-memory store; remembers every save
#[derive(Debug, Clone, Default)]
pub struct MemoryHighScoreStore {
    value: Option<u32>,
    saves: Vec<u32>,
    fail_saves: bool,
}

impl MemoryHighScoreStore {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_value(value: u32) -> Self {
        Self {
            value: Some(value),
            ..Self::default()
        }
    }

    /// Store whose saves always fail
    pub fn failing() -> Self {
        Self {
            fail_saves: true,
            ..Self::default()
        }
    }

    pub fn value(&self) -> Option<u32> {
        self.value
    }

    /// Every value passed to `save`, in order
    pub fn saves(&self) -> &[u32] {
        &self.saves
    }
}

impl HighScoreStore for MemoryHighScoreStore {
    fn load(&mut self) -> u32 {
        self.value.unwrap_or(0)
    }

    fn save(&mut self, score: u32) -> Result<()> {
        anyhow::ensure!(!self.fail_saves, "high score store is read-only");
        self.value = Some(score);
        self.saves.push(score);
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    #[test]
    fn test_missing_file_loads_zero() {
        let dir = TempDir::new().unwrap();
        let mut store = FileHighScoreStore::new(dir.path().join("highscore.txt"));
        assert_eq!(store.load(), 0);
    }

    #[test]
    fn test_save_then_load() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("nested").join("highscore.txt");
        let mut store = FileHighScoreStore::new(&path);

        store.save(17).unwrap();
        assert_eq!(std::fs::read_to_string(&path).unwrap(), "17");
        assert_eq!(FileHighScoreStore::new(&path).load(), 17);
    }

    #[test]
    fn test_whitespace_is_tolerated() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("highscore.txt");
        std::fs::write(&path, "  42\n").unwrap();
        assert_eq!(FileHighScoreStore::new(&path).load(), 42);
    }

    #[test]
    fn test_malformed_file_loads_zero() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("highscore.txt");

        for contents in ["", "abc", "-3", "12 13"] {
            std::fs::write(&path, contents).unwrap();
            assert_eq!(FileHighScoreStore::new(&path).load(), 0, "{:?}", contents);
        }
    }

    #[test]
    fn test_save_into_directory_fails() {
        let dir = TempDir::new().unwrap();
        let mut store = FileHighScoreStore::new(dir.path());
        assert!(store.save(3).is_err());
    }

    #[test]
    fn test_memory_store() {
        let mut store = MemoryHighScoreStore::with_value(5);
        assert_eq!(store.load(), 5);
        store.save(8).unwrap();
        assert_eq!(store.value(), Some(8));
        assert_eq!(store.saves(), &[8]);

        let mut failing = MemoryHighScoreStore::failing();
        assert!(failing.save(1).is_err());
        assert_eq!(failing.load(), 0);
    }
}
