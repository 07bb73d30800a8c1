use std::fs;
use std::path::PathBuf;

use serde::{Deserialize, Serialize};
use tracing::{debug, warn};

use crate::calc_types::CalcError;

// On-disk shape: a bare JSON array of entry strings.
#[derive(Serialize, Deserialize)]
#[serde(transparent)]
struct HistoryFile {
    entries: Vec<String>,
}

pub const DEFAULT_HISTORY_FILE: &str = "calculator_history.json";

/// At most this many entries are ever written to disk.
pub const PERSIST_LIMIT: usize = 100;

/// The history popup shows at most this many entries.
pub const DISPLAY_LIMIT: usize = 50;

const EXPORT_HEADER: &str = "Calculator History Export";

/// Calculation history, persisted best-effort as a JSON array of strings.
///
/// Load and save failures are swallowed: the history is a non-critical
/// local cache, and a calculator that cannot read or write it still has
/// to start and keep working.
pub struct History {
    entries: Vec<String>,
    path: PathBuf,
}

impl History {
    /// Read the history file once at startup. A missing file or a parse
    /// failure yields an empty history with no error surfaced.
    pub fn load(path: impl Into<PathBuf>) -> Self {
        let path = path.into();
        let entries = match fs::read_to_string(&path) {
            Ok(contents) => match serde_json::from_str::<HistoryFile>(&contents) {
                Ok(file) => file.entries,
                Err(e) => {
                    warn!(path = %path.display(), error = %e, "history file unreadable, starting empty");
                    Vec::new()
                }
            },
            Err(_) => Vec::new(),
        };
        debug!(path = %path.display(), count = entries.len(), "history loaded");
        History { entries, path }
    }

    /// Append an entry and persist. Write failures are swallowed.
    pub fn record(&mut self, entry: String) {
        self.entries.push(entry);
        self.save();
    }

    /// Write the most recent `PERSIST_LIMIT` entries as a JSON array.
    pub fn save(&self) {
        let start = self.entries.len().saturating_sub(PERSIST_LIMIT);
        let to_save = HistoryFile {
            entries: self.entries[start..].to_vec(),
        };
        let json = match serde_json::to_string(&to_save) {
            Ok(json) => json,
            Err(e) => {
                warn!(error = %e, "could not serialize history");
                return;
            }
        };
        if let Err(e) = fs::write(&self.path, json) {
            warn!(path = %self.path.display(), error = %e, "could not save history");
        }
    }

    pub fn clear(&mut self) {
        self.entries.clear();
        self.save();
    }

    pub fn entries(&self) -> &[String] {
        &self.entries
    }

    /// The most recent entries, oldest first, capped at `DISPLAY_LIMIT`.
    pub fn recent(&self) -> &[String] {
        let start = self.entries.len().saturating_sub(DISPLAY_LIMIT);
        &self.entries[start..]
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Export every in-memory entry to a plain-text file. Overwrites any
    /// existing file of the same name. Unlike save, failures here are
    /// reported to the caller.
    pub fn export(&self, path: impl Into<PathBuf>) -> Result<(), CalcError> {
        let path = path.into();
        let mut contents = String::new();
        contents.push_str(EXPORT_HEADER);
        contents.push('\n');
        contents.push_str(&"=".repeat(30));
        contents.push('\n');
        for entry in &self.entries {
            contents.push_str(entry);
            contents.push('\n');
        }
        fs::write(&path, contents)?;
        debug!(path = %path.display(), count = self.entries.len(), "history exported");
        Ok(())
    }
}
