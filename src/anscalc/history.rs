//! Persisted, append-only record of successful calculations.
//!
//! The [`HistoryLedger`] owns the in-memory list of [`HistoryEntry`] values and mirrors
//! the full list to a [`HistoryStore`] after every change. Two stores ship with the
//! crate:
//!
//! - [`JsonFileHistoryStore`] keeps the ledger as a JSON array in a single file
//! - [`InMemoryHistoryStore`] keeps it in process memory (tests, ephemeral sessions)
//!
//! # Disk Format
//!
//! ```text
//! [
//!   {"expression":"2+2","result":4.0,"recorded_at":"2026-10-17T12:00:00Z"},
//!   {"expression":"ans*3","result":12.0,"recorded_at":"2026-10-17T12:00:05Z"}
//! ]
//! ```
//!
//! The file is rewritten through a sibling `.tmp` file that is flushed to disk and then
//! renamed over the target, so a crash mid-write leaves either the old or the new ledger
//! on disk, never a torn one.
//!
//! A file that exists but cannot be parsed is renamed to `<path>.corrupt` when the ledger
//! is opened. The session starts with an empty history and the damaged copy is left for
//! the user to inspect instead of being overwritten by the next save.
//!
//! # Example
//!
//! ```rust
//! use anscalc::history::{HistoryLedger, InMemoryHistoryStore, EMPTY_HISTORY_PLACEHOLDER};
//!
//! let store = InMemoryHistoryStore::new();
//! let mut ledger = HistoryLedger::open(Box::new(store.clone()), None);
//! assert_eq!(ledger.render(), vec![EMPTY_HISTORY_PLACEHOLDER.to_string()]);
//!
//! ledger.record("2+2", 4.0).unwrap();
//! assert_eq!(ledger.render(), vec!["2+2 = 4".to_string()]);
//! assert_eq!(store.snapshot().len(), 1);
//! ```

use std::fmt;
use std::fs;
use std::io::{self, Write};
use std::path::{Path, PathBuf};
use std::sync::{Arc, Mutex};

use chrono::{DateTime, Utc};
use log::{debug, info, warn};
use serde::{Deserialize, Serialize};

use crate::anscalc::error::HistoryError;
use crate::anscalc::evaluator::format_number;

/// Text rendered in place of the ledger when it holds no entries.
pub const EMPTY_HISTORY_PLACEHOLDER: &str = "No history";

/// One successful calculation.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct HistoryEntry {
    /// The expression text as the user entered it, placeholders unresolved.
    pub expression: String,
    /// The rounded result.
    pub result: f64,
    /// When the calculation completed.
    pub recorded_at: DateTime<Utc>,
}

impl HistoryEntry {
    pub fn new(expression: &str, result: f64) -> Self {
        Self {
            expression: expression.to_string(),
            result,
            recorded_at: Utc::now(),
        }
    }
}

impl fmt::Display for HistoryEntry {
    /// Formats as `"<expression> = <result>"`.
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} = {}", self.expression, format_number(self.result))
    }
}

/// Backing storage for a [`HistoryLedger`].
///
/// Calls are synchronous; a `save` must be durable by the time it returns.
pub trait HistoryStore {
    /// Returns the persisted ledger, oldest first. A store with nothing saved yields an
    /// empty list.
    fn load(&self) -> Result<Vec<HistoryEntry>, HistoryError>;

    /// Replaces the persisted ledger with `entries`.
    fn save(&self, entries: &[HistoryEntry]) -> Result<(), HistoryError>;

    /// Removes the persisted copy entirely.
    fn clear(&self) -> Result<(), HistoryError>;

    /// Moves an unreadable persisted copy out of the way so a later `save` cannot
    /// overwrite it. Stores without a persisted copy have nothing to do.
    fn quarantine(&self) -> Result<(), HistoryError> {
        Ok(())
    }
}

/// A store that lives only as long as the process.
///
/// Clones share the same underlying list, so a test can keep a handle and observe what
/// the ledger persisted.
#[derive(Debug, Clone, Default)]
pub struct InMemoryHistoryStore {
    entries: Arc<Mutex<Option<Vec<HistoryEntry>>>>,
}

impl InMemoryHistoryStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Starts the store with a previously persisted ledger.
    pub fn with_entries(entries: Vec<HistoryEntry>) -> Self {
        Self {
            entries: Arc::new(Mutex::new(Some(entries))),
        }
    }

    /// Returns a copy of what is currently persisted.
    pub fn snapshot(&self) -> Vec<HistoryEntry> {
        self.lock().clone().unwrap_or_default()
    }

    /// True if something has been saved and not cleared since.
    pub fn is_persisted(&self) -> bool {
        self.lock().is_some()
    }

    fn lock(&self) -> std::sync::MutexGuard<'_, Option<Vec<HistoryEntry>>> {
        self.entries.lock().unwrap_or_else(|e| e.into_inner())
    }
}

impl HistoryStore for InMemoryHistoryStore {
    fn load(&self) -> Result<Vec<HistoryEntry>, HistoryError> {
        Ok(self.snapshot())
    }

    fn save(&self, entries: &[HistoryEntry]) -> Result<(), HistoryError> {
        *self.lock() = Some(entries.to_vec());
        Ok(())
    }

    fn clear(&self) -> Result<(), HistoryError> {
        *self.lock() = None;
        Ok(())
    }
}

/// Persists the ledger as a JSON array in a single file.
#[derive(Debug, Clone)]
pub struct JsonFileHistoryStore {
    path: PathBuf,
}

impl JsonFileHistoryStore {
    /// Uses `path` for the ledger. Parent directories are created on first save.
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Where an unreadable ledger is moved by [`HistoryStore::quarantine`].
    pub fn corrupt_path(&self) -> PathBuf {
        self.sibling(".corrupt")
    }

    fn temp_path(&self) -> PathBuf {
        self.sibling(".tmp")
    }

    fn sibling(&self, suffix: &str) -> PathBuf {
        let mut name = self.path.clone().into_os_string();
        name.push(suffix);
        PathBuf::from(name)
    }
}

#[cfg(unix)]
fn sync_dir(dir: &Path) -> io::Result<()> {
    fs::File::open(dir)?.sync_all()
}

#[cfg(not(unix))]
fn sync_dir(_dir: &Path) -> io::Result<()> {
    Ok(())
}

impl HistoryStore for JsonFileHistoryStore {
    fn load(&self) -> Result<Vec<HistoryEntry>, HistoryError> {
        let contents = match fs::read_to_string(&self.path) {
            Ok(contents) => contents,
            Err(e) if e.kind() == io::ErrorKind::NotFound => return Ok(Vec::new()),
            Err(e) => return Err(e.into()),
        };

        if contents.trim().is_empty() {
            return Ok(Vec::new());
        }

        Ok(serde_json::from_str(&contents)?)
    }

    fn save(&self, entries: &[HistoryEntry]) -> Result<(), HistoryError> {
        let parent = self.path.parent().filter(|p| !p.as_os_str().is_empty());
        if let Some(parent) = parent {
            fs::create_dir_all(parent)?;
        }

        let json = serde_json::to_string_pretty(entries)?;
        let temp_path = self.temp_path();
        let mut file = fs::File::create(&temp_path)?;
        file.write_all(json.as_bytes())?;
        file.sync_all()?;
        drop(file);

        fs::rename(&temp_path, &self.path)?;
        // the rename itself is only durable once the directory entry is flushed
        sync_dir(parent.unwrap_or_else(|| Path::new(".")))?;
        Ok(())
    }

    fn clear(&self) -> Result<(), HistoryError> {
        match fs::remove_file(&self.path) {
            Ok(()) => Ok(()),
            Err(e) if e.kind() == io::ErrorKind::NotFound => Ok(()),
            Err(e) => Err(e.into()),
        }
    }

    fn quarantine(&self) -> Result<(), HistoryError> {
        let target = self.corrupt_path();
        match fs::rename(&self.path, &target) {
            Ok(()) => {
                warn!(
                    "moved unreadable history {} to {}",
                    self.path.display(),
                    target.display()
                );
                Ok(())
            }
            Err(e) if e.kind() == io::ErrorKind::NotFound => Ok(()),
            Err(e) => Err(e.into()),
        }
    }
}

/// Ordered, append-only list of past calculations mirrored to a [`HistoryStore`].
pub struct HistoryLedger {
    entries: Vec<HistoryEntry>,
    store: Box<dyn HistoryStore>,
    max_entries: Option<usize>,
}

impl HistoryLedger {
    /// Loads the persisted ledger from `store`.
    ///
    /// A store that cannot be read is logged and treated as empty, so a damaged history
    /// file never prevents the calculator from starting. Unparseable contents are
    /// [quarantined](HistoryStore::quarantine) first so they survive the next save.
    pub fn open(store: Box<dyn HistoryStore>, max_entries: Option<usize>) -> Self {
        let entries = match store.load() {
            Ok(entries) => {
                info!("loaded {} history entries", entries.len());
                entries
            }
            Err(e) => {
                warn!("starting with empty history: {}", e);
                if let HistoryError::Serialization(_) = e {
                    if let Err(e) = store.quarantine() {
                        warn!("could not set aside unreadable history: {}", e);
                    }
                }
                Vec::new()
            }
        };

        let mut ledger = Self {
            entries,
            store,
            max_entries,
        };
        ledger.evict_oldest();
        ledger
    }

    /// Appends an entry and persists the whole ledger.
    ///
    /// The entry is kept in memory even if persisting fails; the error is returned so the
    /// caller can report it.
    pub fn record(&mut self, expression: &str, result: f64) -> Result<(), HistoryError> {
        let entry = HistoryEntry::new(expression, result);
        debug!("recording history entry: {}", entry);
        self.entries.push(entry);
        self.evict_oldest();
        self.store.save(&self.entries)
    }

    /// Removes the persisted copy and empties the ledger.
    ///
    /// If the store cannot be cleared the in-memory entries are kept, so what is shown
    /// still matches what the next start will load.
    pub fn clear(&mut self) -> Result<(), HistoryError> {
        self.store.clear()?;
        self.entries.clear();
        Ok(())
    }

    /// One display line per entry, oldest first, or the placeholder when empty.
    pub fn render(&self) -> Vec<String> {
        if self.entries.is_empty() {
            return vec![EMPTY_HISTORY_PLACEHOLDER.to_string()];
        }
        self.entries.iter().map(|e| e.to_string()).collect()
    }

    pub fn entries(&self) -> &[HistoryEntry] {
        &self.entries
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn max_entries(&self) -> Option<usize> {
        self.max_entries
    }

    fn evict_oldest(&mut self) {
        if let Some(max) = self.max_entries {
            let excess = self.entries.len().saturating_sub(max);
            if excess > 0 {
                debug!("evicting {} oldest history entries", excess);
                self.entries.drain(..excess);
            }
        }
    }
}
