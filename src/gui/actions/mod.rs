// src/gui/actions/mod.rs
//
// Folder module facade: re-export public entrypoints.
// Submodules stay private; consumers only see actions::{…}.

mod export;    // src/gui/actions/export.rs
mod snapshot;  // src/gui/actions/snapshot.rs

pub use export::{export_csv, export_png};
pub use snapshot::{clear_history, delete_snapshot, open_chart, save_snapshot};
