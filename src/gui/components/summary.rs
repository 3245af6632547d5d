// src/gui/components/summary.rs
//
// Profit / Loss / Net / Total Equity of the latest reading, or placeholders
// plus the reason when the last pass failed.

use eframe::egui::{self, Color32, RichText};

use crate::{
    config::consts::{NEG_RED, POS_GREEN},
    core::money::format,
    gui::app::App,
    scrape::Reading,
};

const PLACEHOLDER: &str = "—";

fn kv(ui: &mut egui::Ui, key: &str, value: RichText) {
    ui.vertical(|ui| {
        ui.label(RichText::new(key).weak().small());
        ui.label(value.strong().size(18.0));
    });
}

pub fn draw(ui: &mut egui::Ui, app: &mut App) {
    let green = Color32::from_rgb(POS_GREEN.0, POS_GREEN.1, POS_GREEN.2);
    let red = Color32::from_rgb(NEG_RED.0, NEG_RED.1, NEG_RED.2);

    let subtitle = match app.latest() {
        Some(r) => r.subtitle(),
        None if app.tracker.is_some() => s!("Not on the investing page."),
        None => s!("No page selected."),
    };
    ui.horizontal(|ui| {
        ui.label(RichText::new(subtitle).weak());
        if app.latest().is_some_and(Reading::is_retrying) {
            ui.spinner();
            ui.label(RichText::new("retrying…").weak().italics());
        }
    });

    ui.add_space(4.0);
    ui.horizontal(|ui| {
        ui.spacing_mut().item_spacing.x = 28.0;
        match app.latest() {
            Some(Reading::Ready { totals, .. }) => {
                let net_color = if totals.net().is_negative() { red } else { green };
                kv(ui, "Profit", RichText::new(format(totals.profit())).color(green));
                kv(ui, "Loss", RichText::new(format(totals.loss())).color(red));
                kv(ui, "Net", RichText::new(format(totals.net())).color(net_color));
                kv(ui, "Total Equity", RichText::new(format(totals.equity())));
            }
            _ => {
                for key in ["Profit", "Loss", "Net", "Total Equity"] {
                    kv(ui, key, RichText::new(PLACEHOLDER));
                }
            }
        }
    });
}
