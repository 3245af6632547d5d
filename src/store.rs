// src/store.rs
//! Saved snapshots, kept as one JSON array on disk.
//!
//! Every operation reads the file fresh and writes it back whole. Two writers
//! racing on the same file: the last one to write wins.

use std::{fs, io, path::{Path, PathBuf}};

use chrono::{DateTime, Local};
use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::core::Cents;
use crate::scrape::Totals;

#[derive(Debug, Error)]
pub enum StoreError {
    #[error("snapshot store I/O at {path}: {source}")]
    Io { path: PathBuf, source: io::Error },

    #[error("snapshot store at {path} is not valid JSON: {source}")]
    Json { path: PathBuf, source: serde_json::Error },
}

#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Snapshot {
    pub epoch_ms: i64,
    pub date: String,
    pub time: String,
    pub profit_cents: Cents,
    pub loss_cents: Cents,
    pub net_cents: Cents,
    pub equity_cents: Cents,
}

impl Snapshot {
    /// Stamp `totals` with local date (`MM/DD/YYYY`) and time (`hh:mm AM`).
    pub fn from_totals(totals: &Totals, at: DateTime<Local>) -> Self {
        Self {
            epoch_ms: at.timestamp_millis(),
            date: at.format("%m/%d/%Y").to_string(),
            time: at.format("%I:%M %p").to_string(),
            profit_cents: totals.profit(),
            loss_cents: totals.loss(),
            net_cents: totals.net(),
            equity_cents: totals.equity(),
        }
    }
}

pub struct SnapshotStore {
    path: PathBuf,
}

impl SnapshotStore {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    pub fn path(&self) -> &Path { &self.path }

    fn io_err(&self, source: io::Error) -> StoreError {
        StoreError::Io { path: self.path.clone(), source }
    }

    /// Stored order (append order). A missing file is an empty store.
    pub fn load(&self) -> Result<Vec<Snapshot>, StoreError> {
        let text = match fs::read_to_string(&self.path) {
            Ok(t) => t,
            Err(e) if e.kind() == io::ErrorKind::NotFound => return Ok(Vec::new()),
            Err(e) => return Err(self.io_err(e)),
        };
        if text.trim().is_empty() {
            return Ok(Vec::new());
        }
        serde_json::from_str(&text)
            .map_err(|source| StoreError::Json { path: self.path.clone(), source })
    }

    fn write(&self, snaps: &[Snapshot]) -> Result<(), StoreError> {
        if let Some(parent) = self.path.parent() {
            if !parent.as_os_str().is_empty() {
                fs::create_dir_all(parent).map_err(|e| self.io_err(e))?;
            }
        }
        let json = serde_json::to_string_pretty(snaps)
            .map_err(|source| StoreError::Json { path: self.path.clone(), source })?;
        fs::write(&self.path, json).map_err(|e| self.io_err(e))
    }

    pub fn append(&self, snap: Snapshot) -> Result<(), StoreError> {
        let mut all = self.load()?;
        all.push(snap);
        self.write(&all)?;
        logf!("Store: appended snapshot ({} total)", all.len());
        Ok(())
    }

    /// Record `totals` as of `at`. Returns the stored snapshot.
    pub fn save(&self, totals: &Totals, at: DateTime<Local>) -> Result<Snapshot, StoreError> {
        let snap = Snapshot::from_totals(totals, at);
        self.append(snap.clone())?;
        Ok(snap)
    }

    /// Remove every snapshot with exactly this `epoch_ms`. Returns how many went.
    pub fn delete(&self, epoch_ms: i64) -> Result<usize, StoreError> {
        let mut all = self.load()?;
        let before = all.len();
        all.retain(|s| s.epoch_ms != epoch_ms);
        let removed = before - all.len();
        self.write(&all)?;
        logf!("Store: deleted {} snapshot(s) at {}", removed, epoch_ms);
        Ok(removed)
    }

    pub fn clear(&self) -> Result<(), StoreError> {
        self.write(&[])?;
        logf!("Store: cleared");
        Ok(())
    }

    /// Oldest first, by `epoch_ms`.
    pub fn series(&self) -> Result<Vec<Snapshot>, StoreError> {
        let mut all = self.load()?;
        all.sort_by_key(|s| s.epoch_ms);
        Ok(all)
    }

    /// Newest first, for history tables.
    pub fn newest_first(&self) -> Result<Vec<Snapshot>, StoreError> {
        let mut all = self.series()?;
        all.reverse();
        Ok(all)
    }
}
