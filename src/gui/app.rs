// src/gui/app.rs
use std::{
    error::Error,
    time::{Duration, Instant},
};

use eframe::egui;

use crate::{
    chart::{self, ChartGeometry},
    config::{
        options::TrackerOptions,
        state::{AppState, GuiState},
    },
    scrape::{HtmlFileSource, Reading, Tracker},
    store::{Snapshot, SnapshotStore},
};

pub fn run(options: eframe::NativeOptions) -> Result<(), Box<dyn Error>> {
    crate::log::init(false);
    let opts = match TrackerOptions::load_default_location() {
        Ok(o) => o,
        Err(e) => {
            loge!("Options: {}; using defaults", e);
            TrackerOptions::default()
        }
    };
    let state = AppState { options: opts, gui: GuiState::default() };
    eframe::run_native(
        "Holdings Tracker",
        options,
        Box::new(|_cc| Ok(Box::new(App::new(state)))),
    )?;
    Ok(())
}

/// Destructive actions wait here for a second click.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Confirm {
    Clear,
    Delete(i64),
}

pub struct App {
    // single source of truth (UI thread only)
    pub state: AppState,

    // source path text field UX (we map this <-> tracker source)
    pub source_text: String,

    pub tracker: Option<Tracker<HtmlFileSource>>,
    pub store: SnapshotStore,

    // history, newest first; reloaded after every store change
    pub history: Vec<Snapshot>,

    // chart window content; rebuilt from the store on open and on change
    pub chart: Option<ChartGeometry>,
    pub chart_caption: String,

    pub status: String,
    pub confirm: Option<Confirm>,
    pub export_error: Option<String>,
}

impl App {
    pub fn new(state: AppState) -> Self {
        let store = SnapshotStore::new(state.options.store.path());
        let source_text = state.gui.source_path.clone();

        let mut app = Self {
            state,
            source_text,
            tracker: None,
            store,
            history: Vec::new(),
            chart: None,
            chart_caption: chart::caption(0),
            status: s!("Pick a saved holdings page to start."),
            confirm: None,
            export_error: None,
        };
        app.reload_history();
        logf!("Init: store={}, snapshots={}", app.store.path().display(), app.history.len());
        app
    }

    /* ---------- tiny helpers ---------- */

    #[inline]
    pub fn status<T: Into<String>>(&mut self, msg: T) {
        self.status = msg.into();
    }

    #[inline]
    pub fn latest(&self) -> Option<&Reading> {
        self.tracker.as_ref().and_then(|t| t.latest())
    }

    /// Point the tracker at a new file and start watching it.
    pub fn set_source(&mut self, path: &str) {
        let path = path.trim();
        self.state.gui.source_path = s!(path);
        if path.is_empty() {
            if let Some(t) = self.tracker.as_mut() {
                t.stop();
            }
            self.tracker = None;
            self.status("No page selected.");
            return;
        }
        let mut tracker = Tracker::new(HtmlFileSource::new(path), self.state.options.clone());
        tracker.start();
        logf!("UI: Source → {}", path);
        self.tracker = Some(tracker);
        self.status(format!("Watching {path}"));
    }

    pub fn reload_history(&mut self) {
        match self.store.newest_first() {
            Ok(v) => self.history = v,
            Err(e) => {
                loge!("Store: {}", e);
                self.status(format!("History unavailable: {e}"));
            }
        }
        if self.state.gui.show_chart {
            self.rebuild_chart();
        }
    }

    /// Re-read the series and rebuild geometry.
    pub fn rebuild_chart(&mut self) {
        match self.store.series() {
            Ok(series) => {
                self.chart_caption = chart::caption(series.len());
                self.chart = Some(chart::build_from_snapshots(&series, &self.state.options.chart));
            }
            Err(e) => {
                loge!("Chart: {}", e);
                self.chart_caption = format!("Unable to read snapshots: {e}");
                self.chart = None;
            }
        }
    }

    fn poll(&mut self, ctx: &egui::Context) {
        let interval = Duration::from_millis(self.state.options.poll_interval_ms);
        if let Some(t) = self.tracker.as_mut() {
            t.tick(Instant::now());
            ctx.request_repaint_after(interval.min(Duration::from_millis(1000)));
        }
    }
}

impl eframe::App for App {
    fn update(&mut self, ctx: &egui::Context, _frame: &mut eframe::Frame) {
        self.poll(ctx);

        egui::TopBottomPanel::bottom("status").show(ctx, |ui| {
            ui.label(self.status.as_str());
        });

        egui::CentralPanel::default().show(ctx, |ui| {
            crate::gui::components::source_bar::draw(ui, self);

            ui.separator();

            crate::gui::components::summary::draw(ui, self);

            ui.separator();

            crate::gui::components::action_buttons::draw(ui, self);

            ui.separator();

            crate::gui::components::history_table::draw(ui, self);
        });

        crate::gui::components::chart_window::draw(ctx, self);
        crate::gui::components::dialogs::draw(ctx, self);
    }
}
