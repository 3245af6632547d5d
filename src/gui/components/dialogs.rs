// src/gui/components/dialogs.rs
//
// Confirmation for destructive actions, and the image-export failure modal.

use eframe::egui;

use crate::gui::{
    actions,
    app::{App, Confirm},
};

pub fn draw(ctx: &egui::Context, app: &mut App) {
    if let Some(confirm) = app.confirm {
        let question = match confirm {
            Confirm::Clear => s!("Clear all saved snapshots?"),
            Confirm::Delete(_) => s!("Delete this snapshot?"),
        };

        let mut answer: Option<bool> = None;
        egui::Window::new("Confirm")
            .collapsible(false)
            .resizable(false)
            .anchor(egui::Align2::CENTER_CENTER, [0.0, 0.0])
            .show(ctx, |ui| {
                ui.label(question);
                ui.horizontal(|ui| {
                    if ui.button("Yes").clicked() { answer = Some(true); }
                    if ui.button("Cancel").clicked() { answer = Some(false); }
                });
            });

        match answer {
            Some(true) => {
                app.confirm = None;
                match confirm {
                    Confirm::Clear => actions::clear_history(app),
                    Confirm::Delete(epoch_ms) => actions::delete_snapshot(app, epoch_ms),
                }
            }
            Some(false) => app.confirm = None,
            None => {}
        }
    }

    if let Some(msg) = app.export_error.clone() {
        let mut close = false;
        egui::Window::new("Export failed")
            .collapsible(false)
            .resizable(false)
            .anchor(egui::Align2::CENTER_CENTER, [0.0, 0.0])
            .show(ctx, |ui| {
                ui.label(msg);
                if ui.button("OK").clicked() { close = true; }
            });
        if close {
            app.export_error = None;
        }
    }
}
