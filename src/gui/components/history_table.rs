// src/gui/components/history_table.rs
//
// Saved snapshots, newest first. Delete asks for confirmation in dialogs.

use eframe::egui::{self, Color32, RichText};
use egui_extras::{Column, TableBuilder};

use crate::{
    config::consts::{NEG_RED, POS_GREEN},
    core::money::format,
    gui::app::{App, Confirm},
};

const HEADERS: [&str; 7] = ["Date", "Time", "Profit", "Loss", "Net", "Total Equity", ""];

pub fn draw(ui: &mut egui::Ui, app: &mut App) {
    let green = Color32::from_rgb(POS_GREEN.0, POS_GREEN.1, POS_GREEN.2);
    let red = Color32::from_rgb(NEG_RED.0, NEG_RED.1, NEG_RED.2);

    ui.label(RichText::new("History").strong());
    if app.history.is_empty() {
        ui.weak("No snapshots saved yet.");
        return;
    }

    let mut delete: Option<i64> = None;

    TableBuilder::new(ui)
        .striped(true)
        .min_scrolled_height(0.0)
        .column(Column::initial(90.0).at_least(60.0))
        .column(Column::initial(80.0).at_least(50.0))
        .columns(Column::initial(110.0).at_least(60.0).clip(true), 4)
        .column(Column::remainder().at_least(70.0))
        .header(22.0, |mut header| {
            for h in HEADERS {
                header.col(|ui| {
                    ui.strong(h);
                });
            }
        })
        .body(|body| {
            body.rows(22.0, app.history.len(), |mut row| {
                let s = &app.history[row.index()];
                let net_color = if s.net_cents.is_negative() { red } else { green };
                row.col(|ui| { ui.label(s.date.as_str()); });
                row.col(|ui| { ui.label(s.time.as_str()); });
                row.col(|ui| { ui.colored_label(green, format(s.profit_cents)); });
                row.col(|ui| { ui.colored_label(red, format(s.loss_cents)); });
                row.col(|ui| { ui.colored_label(net_color, format(s.net_cents)); });
                row.col(|ui| { ui.label(format(s.equity_cents)); });
                row.col(|ui| {
                    if ui.small_button("Delete").clicked() {
                        delete = Some(s.epoch_ms);
                    }
                });
            });
        });

    if let Some(epoch_ms) = delete {
        app.confirm = Some(Confirm::Delete(epoch_ms));
    }
}
