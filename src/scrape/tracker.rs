// src/scrape/tracker.rs
//! Lifecycle around [`TotalsAggregator`]: route guard, polling, change
//! detection and the latest reading.
//!
//! The tracker is `Active` only while the watched page says it is the
//! investing page (or says nothing about its URL). While active, every
//! `tick` recomputes when the poll interval has elapsed or the source
//! changed. Each recompute replaces the previous reading.

use std::fs;
use std::io;
use std::path::{Path, PathBuf};
use std::time::{Duration, Instant, SystemTime};

use chrono::{DateTime, Local};
use thiserror::Error;

use crate::config::consts::{TRACKED_ORIGIN, TRACKED_PATH};
use crate::config::options::TrackerOptions;
use crate::dom::{HtmlDocument, HtmlNode};
use crate::error::ExtractError;

use super::totals::{Totals, TotalsAggregator};

#[derive(Debug, Error)]
pub enum SourceError {
    #[error("failed to read {path}: {source}")]
    Read { path: PathBuf, source: io::Error },
}

/// Where page snapshots come from.
pub trait PageSource {
    /// Human-readable origin, for logs and the GUI.
    fn describe(&self) -> String;

    /// True when the content may differ from the last `fetch`.
    fn changed(&mut self) -> bool;

    fn fetch(&mut self) -> Result<String, SourceError>;
}

/// A saved HTML file; changes are detected through its modification time.
pub struct HtmlFileSource {
    path: PathBuf,
    seen: Option<SystemTime>,
}

impl HtmlFileSource {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into(), seen: None }
    }

    pub fn path(&self) -> &Path { &self.path }

    fn mtime(&self) -> Option<SystemTime> {
        fs::metadata(&self.path).and_then(|m| m.modified()).ok()
    }
}

impl PageSource for HtmlFileSource {
    fn describe(&self) -> String {
        self.path.display().to_string()
    }

    fn changed(&mut self) -> bool {
        self.mtime() != self.seen
    }

    fn fetch(&mut self) -> Result<String, SourceError> {
        self.seen = self.mtime();
        fs::read_to_string(&self.path)
            .map_err(|source| SourceError::Read { path: self.path.clone(), source })
    }
}

/// True for `https://robinhood.com/account/investing` with or without a
/// trailing slash; query and fragment are ignored.
pub fn is_tracked_location(url: &str) -> bool {
    let Some(rest) = url.trim().strip_prefix(TRACKED_ORIGIN) else {
        return false;
    };
    let path = rest.split(['?', '#']).next().unwrap_or_default();
    path == TRACKED_PATH || path.strip_suffix('/') == Some(TRACKED_PATH)
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum TrackerState {
    Stopped,
    Active,
}

/// Outcome of the most recent pass.
#[derive(Clone, Debug, PartialEq)]
pub enum Reading {
    Ready { totals: Totals, at: DateTime<Local> },
    Failed { reason: String, retryable: bool },
}

impl Reading {
    fn from_result(res: Result<Totals, ExtractError>) -> Self {
        match res {
            Ok(totals) => Reading::Ready { totals, at: Local::now() },
            Err(e) => Reading::Failed { reason: e.to_string(), retryable: e.is_retryable() },
        }
    }

    /// A failure the next poll may clear on its own.
    pub fn is_retrying(&self) -> bool {
        matches!(self, Reading::Failed { retryable: true, .. })
    }

    pub fn totals(&self) -> Option<&Totals> {
        match self {
            Reading::Ready { totals, .. } => Some(totals),
            Reading::Failed { .. } => None,
        }
    }

    /// Summary line: row count plus stamp, or the failure reason.
    pub fn subtitle(&self) -> String {
        match self {
            Reading::Ready { totals, at } => format!(
                "Total stocks: {} • Updated at {}",
                totals.rows_parsed(),
                at.format("%m/%d/%y %I:%M:%S %p")
            ),
            Reading::Failed { reason, .. } => reason.clone(),
        }
    }
}

pub struct Tracker<S: PageSource> {
    state: TrackerState,
    opts: TrackerOptions,
    source: S,
    last_run: Option<Instant>,
    latest: Option<Reading>,
}

impl<S: PageSource> Tracker<S> {
    pub fn new(source: S, opts: TrackerOptions) -> Self {
        Self { state: TrackerState::Stopped, opts, source, last_run: None, latest: None }
    }

    pub fn state(&self) -> TrackerState { self.state }
    pub fn latest(&self) -> Option<&Reading> { self.latest.as_ref() }
    pub fn source(&self) -> &S { &self.source }
    pub fn options(&self) -> &TrackerOptions { &self.opts }

    fn poll_interval(&self) -> Duration {
        Duration::from_millis(self.opts.poll_interval_ms)
    }

    /// Activate and compute right away. No-op when already active.
    pub fn start(&mut self) {
        if self.state == TrackerState::Active {
            return;
        }
        logf!("Tracker: start ({})", self.source.describe());
        self.state = TrackerState::Active;
        self.recompute(Instant::now());
    }

    /// Deactivate and drop the current reading. No-op when already stopped.
    pub fn stop(&mut self) {
        if self.state == TrackerState::Stopped {
            return;
        }
        logf!("Tracker: stop");
        self.state = TrackerState::Stopped;
        self.last_run = None;
        self.latest = None;
    }

    /// Drive from a timer. Returns true when a recompute ran.
    ///
    /// A changed source is always re-read (that is also how a stopped
    /// tracker notices it is back on the investing page).
    pub fn tick(&mut self, now: Instant) -> bool {
        let changed = self.source.changed();
        let due = self.state == TrackerState::Active
            && self.last_run.is_none_or(|t| now.saturating_duration_since(t) >= self.poll_interval());
        if changed || due {
            self.recompute(now);
            true
        } else {
            false
        }
    }

    /// Recompute now and hand back the result, for callers that must not act
    /// on a reading older than the page.
    pub fn refresh(&mut self, now: Instant) -> Option<&Reading> {
        self.recompute(now);
        self.latest.as_ref()
    }

    /// One full pass: fetch, route check, aggregate. Last call wins.
    pub fn recompute(&mut self, now: Instant) {
        let text = match self.source.fetch() {
            Ok(t) => t,
            Err(e) => {
                loge!("Tracker: {}", e);
                if self.state == TrackerState::Active {
                    self.last_run = Some(now);
                    self.latest = Some(Reading::Failed { reason: e.to_string(), retryable: true });
                }
                return;
            }
        };

        let doc = HtmlDocument::parse(&text);
        match doc.canonical_url() {
            Some(url) if !is_tracked_location(&url) => {
                logd!("Tracker: {} is not the investing page", url);
                self.stop();
                return;
            }
            _ => {
                if self.state == TrackerState::Stopped {
                    logf!("Tracker: start ({})", self.source.describe());
                    self.state = TrackerState::Active;
                }
            }
        }

        let aggregator: TotalsAggregator<HtmlNode> = TotalsAggregator::new(&self.opts);
        let reading = Reading::from_result(aggregator.aggregate(&doc.root()));
        if let Reading::Failed { reason, .. } = &reading {
            logd!("Tracker: {}", reason);
        }
        self.last_run = Some(now);
        self.latest = Some(reading);
    }
}
