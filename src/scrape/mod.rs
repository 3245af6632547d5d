// src/scrape/mod.rs
pub mod totals;
pub mod tracker;

pub use totals::{aggregate, Totals, TotalsAggregator};
pub use tracker::{is_tracked_location, HtmlFileSource, PageSource, Reading, SourceError, Tracker, TrackerState};
