//! Persisted price snapshot: a JSON object keyed by product code.
//!
//! Loading never fails from the caller's point of view. A missing or
//! unreadable file yields an empty [`History`], which makes every listed
//! product count as new for that run. Saving is the only fallible operation
//! that matters to the run; losing a save means the next run re-reports the
//! same changes.

use std::collections::btree_map;
use std::collections::BTreeMap;
use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::products::PriceState;

/// Mapping from product code to its last-known [`PriceState`].
///
/// Entries for products that drop out of the listing are kept.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct History(BTreeMap<String, PriceState>);

impl History {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    #[must_use]
    pub fn get(&self, code: &str) -> Option<&PriceState> {
        self.0.get(code)
    }

    /// Replaces the stored state for `code`, returning the previous one.
    pub fn insert(&mut self, code: impl Into<String>, state: PriceState) -> Option<PriceState> {
        self.0.insert(code.into(), state)
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.0.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    pub fn iter(&self) -> btree_map::Iter<'_, String, PriceState> {
        self.0.iter()
    }
}

impl FromIterator<(String, PriceState)> for History {
    fn from_iter<I: IntoIterator<Item = (String, PriceState)>>(iter: I) -> Self {
        Self(iter.into_iter().collect())
    }
}

impl<'a> IntoIterator for &'a History {
    type Item = (&'a String, &'a PriceState);
    type IntoIter = btree_map::Iter<'a, String, PriceState>;

    fn into_iter(self) -> Self::IntoIter {
        self.0.iter()
    }
}

/// Why a history file could not be read. Recovered at [`HistoryStore::load`].
#[derive(Debug, Error)]
pub enum HistoryLoadError {
    #[error("history file {path} does not exist")]
    NotFound { path: String },

    #[error("failed to read history file {path}: {source}")]
    Io {
        path: String,
        #[source]
        source: std::io::Error,
    },

    #[error("failed to parse history file {path}: {source}")]
    Parse {
        path: String,
        #[source]
        source: serde_json::Error,
    },
}

#[derive(Debug, Error)]
pub enum HistorySaveError {
    #[error("failed to serialize history: {0}")]
    Serialize(#[from] serde_json::Error),

    #[error("failed to write history file {path}: {source}")]
    Io {
        path: String,
        #[source]
        source: std::io::Error,
    },
}

/// File-backed store for [`History`].
#[derive(Debug, Clone)]
pub struct HistoryStore {
    path: PathBuf,
}

impl HistoryStore {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    #[must_use]
    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Loads the stored history, substituting an empty one on any failure.
    #[must_use]
    pub fn load(&self) -> History {
        match self.try_load() {
            Ok(history) => {
                tracing::debug!(path = %self.path.display(), entries = history.len(), "loaded history");
                history
            }
            Err(HistoryLoadError::NotFound { path }) => {
                tracing::info!(%path, "no history file yet; starting from an empty snapshot");
                History::new()
            }
            Err(e) => {
                tracing::warn!(error = %e, "history unreadable; starting from an empty snapshot");
                History::new()
            }
        }
    }

    /// Loads the stored history, reporting why it could not be read.
    ///
    /// # Errors
    ///
    /// Returns [`HistoryLoadError`] if the file is absent, unreadable, or not
    /// a JSON object of price states.
    pub fn try_load(&self) -> Result<History, HistoryLoadError> {
        let path = self.path.display().to_string();
        let content = std::fs::read_to_string(&self.path).map_err(|e| {
            if e.kind() == std::io::ErrorKind::NotFound {
                HistoryLoadError::NotFound { path: path.clone() }
            } else {
                HistoryLoadError::Io {
                    path: path.clone(),
                    source: e,
                }
            }
        })?;
        serde_json::from_str(&content).map_err(|e| HistoryLoadError::Parse { path, source: e })
    }

    /// Writes the full history as pretty-printed JSON, replacing the file.
    ///
    /// The content goes to a sibling `.tmp` file first and is renamed into
    /// place, so an interrupted write leaves the previous snapshot intact.
    ///
    /// # Errors
    ///
    /// Returns [`HistorySaveError`] if serialization fails or the file (or its
    /// parent directory) cannot be written.
    pub fn save(&self, history: &History) -> Result<(), HistorySaveError> {
        let mut body = serde_json::to_string_pretty(history)?;
        body.push('\n');

        let io_err = |source: std::io::Error| HistorySaveError::Io {
            path: self.path.display().to_string(),
            source,
        };

        if let Some(parent) = self.path.parent().filter(|p| !p.as_os_str().is_empty()) {
            std::fs::create_dir_all(parent).map_err(io_err)?;
        }

        let tmp_path = self.tmp_path();
        std::fs::write(&tmp_path, body).map_err(io_err)?;
        if let Err(e) = std::fs::rename(&tmp_path, &self.path) {
            std::fs::remove_file(&tmp_path).ok();
            return Err(io_err(e));
        }

        tracing::debug!(path = %self.path.display(), entries = history.len(), "saved history");
        Ok(())
    }

    fn tmp_path(&self) -> PathBuf {
        let mut name = self
            .path
            .file_name()
            .map(std::ffi::OsStr::to_os_string)
            .unwrap_or_else(|| "history.json".into());
        name.push(".tmp");
        self.path.with_file_name(name)
    }
}
