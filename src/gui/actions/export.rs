// src/gui/actions/export.rs
use chrono::Local;

use crate::{file, gui::app::App};

pub fn export_csv(app: &mut App) {
    let snaps = match app.store.series() {
        Ok(v) => v,
        Err(e) => {
            loge!("Export: {}", e);
            app.status(format!("Export error: {e}"));
            return;
        }
    };
    let path = app.state.options.export.out_dir.join(file::default_csv_name(Local::now()));
    let msg = match file::write_csv(&path, &snaps) {
        Ok(p) => format!("Exported {} snapshot(s) to {}", snaps.len(), p.display()),
        Err(e) => {
            loge!("Export: Error: {}", e);
            format!("Export error: {e}")
        }
    };
    app.status(msg);
}

/// Image export is the one failure that gets a modal.
pub fn export_png(app: &mut App) {
    let Some(geo) = app.chart.as_ref() else {
        app.export_error = Some(s!("No chart to export."));
        return;
    };
    let path = app.state.options.export.out_dir.join(file::default_png_name(Local::now()));
    match file::write_png(&path, geo) {
        Ok(p) => app.status(format!("Exported chart to {}", p.display())),
        Err(e) => {
            loge!("Export: PNG failed: {}", e);
            app.export_error = Some(format!("Failed to export chart. {e}"));
        }
    }
}
