//! Text-file persistence for the match history.

use std::fs::{self, File};
use std::io::{BufRead, BufReader, Write};
use std::path::{Path, PathBuf};

use super::MatchHistory;
use crate::domain::Member;
use crate::error::{CoffeeError, Result};

/// History file holding one member id per line.
#[derive(Debug, Clone)]
pub struct HistoryStore {
    path: PathBuf,
}

impl HistoryStore {
    /// Create a store backed by the given file. Nothing is touched on disk.
    pub fn new(path: impl AsRef<Path>) -> Self {
        Self {
            path: path.as_ref().to_path_buf(),
        }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    pub fn exists(&self) -> bool {
        self.path.exists()
    }

    /// Load the history. A missing file is an empty history.
    pub fn load(&self) -> Result<MatchHistory> {
        if !self.path.exists() {
            return Ok(MatchHistory::new());
        }

        let file = File::open(&self.path)
            .map_err(|e| CoffeeError::History(format!("Failed to open {}: {}", self.path.display(), e)))?;
        let reader = BufReader::new(file);

        let mut history = MatchHistory::new();
        for line in reader.lines() {
            let line = line?;
            let id = line.trim();
            if !id.is_empty() {
                history.insert(Member::new(id));
            }
        }

        log::debug!("Loaded {} members from {}", history.len(), self.path.display());
        Ok(history)
    }

    /// Truncate the history file to empty, creating it if needed.
    pub fn reset(&self) -> Result<()> {
        self.ensure_parent()?;
        File::create(&self.path)
            .map_err(|e| CoffeeError::History(format!("Failed to reset {}: {}", self.path.display(), e)))?;
        Ok(())
    }

    /// Overwrite the history file with the full set.
    ///
    /// Content goes to a sibling temp file first and is renamed into place, so
    /// readers see either the old or the new snapshot, never a partial one.
    pub fn save(&self, history: &MatchHistory) -> Result<()> {
        self.ensure_parent()?;

        let tmp_path = self.tmp_path();
        {
            let mut file = File::create(&tmp_path)?;
            for member in history.iter() {
                writeln!(file, "{}", member)?;
            }
            file.sync_all()?;
        }

        fs::rename(&tmp_path, &self.path).map_err(|e| {
            CoffeeError::History(format!(
                "Failed to move {} to {}: {}",
                tmp_path.display(),
                self.path.display(),
                e
            ))
        })?;

        log::debug!("Saved {} members to {}", history.len(), self.path.display());
        Ok(())
    }

    fn ensure_parent(&self) -> Result<()> {
        if let Some(parent) = self.path.parent()
            && !parent.as_os_str().is_empty()
        {
            fs::create_dir_all(parent)?;
        }
        Ok(())
    }

    fn tmp_path(&self) -> PathBuf {
        let mut name = self.path.file_name().map(|n| n.to_os_string()).unwrap_or_default();
        name.push(".tmp");
        self.path.with_file_name(name)
    }
}
