// src/gui/actions/snapshot.rs
use std::time::Instant;

use chrono::Local;

use crate::{gui::app::App, scrape::Reading};

pub fn save_snapshot(app: &mut App) {
    let reading = app.tracker.as_mut().and_then(|t| t.refresh(Instant::now()));
    let totals = match reading {
        Some(Reading::Ready { totals, .. }) => *totals,
        Some(Reading::Failed { reason, .. }) => {
            let msg = format!("Cannot save: {reason}");
            logd!("Save: {}", msg);
            app.status(msg);
            return;
        }
        None => {
            app.status("Unable to compute totals.");
            return;
        }
    };

    match app.store.save(&totals, Local::now()) {
        Ok(snap) => {
            app.status(format!("Saved snapshot {} {}", snap.date, snap.time));
            app.reload_history();
        }
        Err(e) => {
            loge!("Save: {}", e);
            app.status(format!("Save failed: {e}"));
        }
    }
}

pub fn delete_snapshot(app: &mut App, epoch_ms: i64) {
    match app.store.delete(epoch_ms) {
        Ok(n) => {
            app.status(format!("Deleted {n} snapshot(s)"));
            app.reload_history();
        }
        Err(e) => {
            loge!("Delete: {}", e);
            app.status(format!("Delete failed: {e}"));
        }
    }
}

pub fn clear_history(app: &mut App) {
    match app.store.clear() {
        Ok(()) => {
            app.status("History cleared");
            app.reload_history();
        }
        Err(e) => {
            loge!("Clear: {}", e);
            app.status(format!("Clear failed: {e}"));
        }
    }
}

pub fn open_chart(app: &mut App) {
    app.state.gui.show_chart = true;
    app.rebuild_chart();
    logf!("UI: Chart opened ({})", app.chart_caption);
}
