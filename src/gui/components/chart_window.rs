// src/gui/components/chart_window.rs
//
// Paints a ChartGeometry with the egui painter. Geometry is laid out for its
// own frame size; here it is scaled uniformly into the available rect.
// Hovering a point shows its date, time and net.

use eframe::egui::{
    self, epaint::TextShape, Color32, FontId, Pos2, Sense, Shape as EShape, Stroke, Vec2,
};

use crate::{
    chart::{geometry::{Marker, Point}, Shape},
    config::consts::{BG_DARK, CHART_TITLE, INK, NEG_RED, POS_GREEN},
    gui::{actions, app::App},
};

const HIT_RADIUS: f32 = 14.0;

fn c32((r, g, b): (u8, u8, u8)) -> Color32 {
    Color32::from_rgb(r, g, b)
}

fn ink(a: f32) -> Color32 {
    Color32::from_rgba_unmultiplied(INK.0, INK.1, INK.2, (a * 255.0) as u8)
}

fn fill(c: (u8, u8, u8), a: f32) -> Color32 {
    Color32::from_rgba_unmultiplied(c.0, c.1, c.2, (a * 255.0) as u8)
}

/// Chart px -> screen.
struct View {
    origin: Pos2,
    k: f32,
}

impl View {
    fn pos(&self, p: &Point) -> Pos2 {
        self.origin + Vec2::new(p.x as f32, p.y as f32) * self.k
    }
    fn xy(&self, x: f64, y: f64) -> Pos2 {
        self.pos(&Point { x, y })
    }
}

pub fn draw(ctx: &egui::Context, app: &mut App) {
    if !app.state.gui.show_chart {
        return;
    }

    let mut open = true;
    let mut export = false;

    egui::Window::new("Trend")
        .open(&mut open)
        .default_size([940.0, 600.0])
        .resizable(true)
        .show(ctx, |ui| {
            ui.horizontal(|ui| {
                ui.label(app.chart_caption.as_str());
                ui.with_layout(egui::Layout::right_to_left(egui::Align::Center), |ui| {
                    if ui.button("Export PNG").clicked() {
                        export = true;
                    }
                });
            });
            ui.separator();
            if let Some(geo) = app.chart.as_ref() {
                paint(ui, geo);
            }
        });

    if export {
        actions::export_png(app);
    }
    if !open {
        app.state.gui.show_chart = false;
        logd!("UI: Chart closed");
    }
}

fn paint(ui: &mut egui::Ui, geo: &crate::chart::ChartGeometry) {
    let f = &geo.frame;
    let avail = ui.available_size();
    let k = (avail.x / f.width as f32).min(avail.y / f.height as f32).max(0.1);
    let size = Vec2::new(f.width as f32, f.height as f32) * k;
    let (rect, response) = ui.allocate_exact_size(size, Sense::hover());
    let painter = ui.painter_at(rect);
    let view = View { origin: rect.min, k };

    painter.rect_filled(rect, 18.0 * k, c32(BG_DARK));
    painter.rect_filled(rect, 18.0 * k, ink(0.06));

    let text = |pos: Pos2, size: f32, color: Color32, body: &str, align: egui::Align2| {
        painter.text(pos, align, body, FontId::proportional(size * k), color);
    };
    text(view.xy(22.0, 28.0), 14.0, ink(0.92), CHART_TITLE, egui::Align2::LEFT_BOTTOM);

    let (left, right) = (f.pad_left, geo.right());
    let hline = |y: f64, color: Color32| {
        painter.line_segment([view.xy(left, y), view.xy(right, y)], Stroke::new(1.0, color));
    };

    let mut markers: Vec<(&Marker, f32)> = Vec::new();

    match &geo.shape {
        Shape::Empty { message } => {
            text(view.xy(f.width / 2.0, f.height / 2.0), 14.0, ink(0.75), *message, egui::Align2::CENTER_CENTER);
        }
        Shape::Single(s) => {
            hline(s.baseline_y, ink(0.18));
            text(view.xy(left - 12.0, s.baseline_y), 11.0, ink(0.70), "0.00", egui::Align2::RIGHT_CENTER);
            markers.push((&s.marker, 7.0));
            text(view.xy(left, f.height - 20.0), 11.0, ink(0.70), &s.label, egui::Align2::LEFT_BOTTOM);
        }
        Shape::Trend(t) => {
            text(view.xy(22.0, 48.0), 12.0, ink(0.72), &t.subtitle.text(), egui::Align2::LEFT_BOTTOM);

            for tick in &t.y_ticks {
                hline(tick.y, ink(0.08));
                text(view.xy(left - 12.0, tick.y), 11.0, ink(0.70), &tick.label, egui::Align2::RIGHT_CENTER);
            }
            hline(t.baseline_y, ink(0.18));
            let axis_y = geo.axis_y();
            hline(axis_y, ink(0.10));

            // egui fills convex shapes only: one quad per segment down to the baseline
            for (areas, color) in [(&t.above, POS_GREEN), (&t.below, NEG_RED)] {
                for a in areas {
                    for w in a.points.windows(2) {
                        let (p, q) = (w[0].at(), w[1].at());
                        let quad = vec![
                            view.xy(p.x, a.baseline_y),
                            view.pos(&p),
                            view.pos(&q),
                            view.xy(q.x, a.baseline_y),
                        ];
                        painter.add(EShape::convex_polygon(quad, fill(color, 0.18), Stroke::NONE));
                    }
                }
            }

            let line: Vec<Pos2> = t.line.iter().map(|p| view.pos(p)).collect();
            painter.add(EShape::line(line, Stroke::new(3.5 * k, ink(0.85))));

            for m in &t.markers {
                markers.push((m, 5.5));
            }

            let label_y = if t.rotation != 0 { axis_y + 60.0 } else { axis_y + 32.0 };
            for x in &t.x_ticks {
                painter.line_segment(
                    [view.xy(x.x, axis_y), view.xy(x.x, axis_y + 7.0)],
                    Stroke::new(1.0, ink(0.14)),
                );
                let galley = painter.layout_no_wrap(x.text.clone(), FontId::proportional(11.0 * k), ink(0.70));
                let anchor = view.xy(x.x, label_y);
                if t.rotation == 0 {
                    let pos = anchor - Vec2::new(galley.size().x / 2.0, galley.size().y);
                    painter.galley(pos, galley, ink(0.70));
                } else {
                    // text-anchor "end": the text's right end sits on the anchor
                    let angle = (t.rotation as f32).to_radians();
                    let w = galley.size().x;
                    let pos = anchor - Vec2::angled(angle) * w - Vec2::new(0.0, galley.size().y);
                    painter.add(TextShape::new(pos, galley, ink(0.70)).with_angle(angle));
                }
            }
        }
    }

    for (m, r) in &markers {
        let color = if m.is_positive() { c32(POS_GREEN) } else { c32(NEG_RED) };
        let stroke_color = if m.is_positive() { fill(POS_GREEN, 0.65) } else { fill(NEG_RED, 0.65) };
        painter.circle(view.pos(&m.at), r * k, color, Stroke::new(3.0 * k, stroke_color));
    }

    // Hover
    let Some(pointer) = response.hover_pos() else { return };
    let hit = markers
        .iter()
        .map(|(m, _)| (*m, view.pos(&m.at).distance(pointer)))
        .filter(|(_, d)| *d <= HIT_RADIUS * k.max(1.0))
        .min_by(|a, b| a.1.total_cmp(&b.1));
    if let Some((m, _)) = hit {
        let mut parts = m.payload.splitn(3, '|');
        let date = parts.next().unwrap_or_default().to_string();
        let time = parts.next().unwrap_or_default().to_string();
        let net = parts.next().unwrap_or_default().to_string();
        response.on_hover_ui_at_pointer(|ui| {
            ui.strong(format!("Net: {net}"));
            ui.label(format!("Date: {date}"));
            ui.label(format!("Time: {time}"));
        });
    }

}
