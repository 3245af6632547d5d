// src/gui/components/action_buttons.rs

use eframe::egui;

use crate::gui::{
    actions,
    app::{App, Confirm},
};

pub fn draw(ui: &mut egui::Ui, app: &mut App) {
    let can_save = app.latest().and_then(|r| r.totals()).is_some();
    let has_history = !app.history.is_empty();

    ui.horizontal(|ui| {
        // Save
        if ui
            .add_enabled(can_save, egui::Button::new("Save snapshot"))
            .on_disabled_hover_text("Totals are not available yet")
            .clicked()
        {
            actions::save_snapshot(app);
        }

        // Chart
        if ui.button("Trend chart").clicked() {
            actions::open_chart(app);
        }

        // CSV
        if ui.button("Export CSV").clicked() {
            actions::export_csv(app);
        }

        // Clear (confirmed in dialogs)
        if ui.add_enabled(has_history, egui::Button::new("Clear history")).clicked() {
            app.confirm = Some(Confirm::Clear);
        }
    });
}
