// src/gui/components/source_bar.rs
//
// Which saved page is being watched, and whether the tracker is running.

use eframe::egui;

use crate::{gui::app::App, scrape::TrackerState};

pub fn draw(ui: &mut egui::Ui, app: &mut App) {
    let mut apply = false;

    ui.horizontal(|ui| {
        ui.label("Page:");
        let edit = ui.add(
            egui::TextEdit::singleline(&mut app.source_text)
                .hint_text("path/to/investing.html")
                .desired_width(420.0)
                .font(egui::TextStyle::Monospace),
        );
        if edit.lost_focus() && ui.input(|i| i.key_pressed(egui::Key::Enter)) {
            apply = true;
        }
        if ui.button("Watch").clicked() {
            apply = true;
        }

        let state = app.tracker.as_ref().map(|t| t.state()).unwrap_or(TrackerState::Stopped);
        match state {
            TrackerState::Active => {
                ui.colored_label(egui::Color32::from_rgb(34, 197, 94), "● tracking");
                if ui.button("Stop").clicked() {
                    if let Some(t) = app.tracker.as_mut() {
                        t.stop();
                    }
                    app.status("Stopped.");
                }
            }
            TrackerState::Stopped => {
                ui.weak("○ not tracking");
                if app.tracker.is_some() && ui.button("Start").clicked() {
                    if let Some(t) = app.tracker.as_mut() {
                        t.start();
                    }
                    app.status("Started.");
                }
            }
        }
    });

    if apply {
        let path = app.source_text.clone();
        app.set_source(&path);
    }
}
