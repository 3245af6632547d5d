// src/chart/svg.rs
//! Geometry -> standalone SVG document.
//!
//! Points carry their hover payload in a `data-point` attribute so any viewer
//! can show `date|time|net` without recomputing anything.

use crate::config::consts::{CHART_TITLE, INK, NEG_RED, POS_GREEN};

use super::geometry::{Area, ChartGeometry, Marker, Point, Shape};

pub fn escape_xml(s: &str) -> String {
    let mut out = String::with_capacity(s.len());
    for ch in s.chars() {
        match ch {
            '&' => out.push_str("&amp;"),
            '<' => out.push_str("&lt;"),
            '>' => out.push_str("&gt;"),
            '"' => out.push_str("&quot;"),
            '\'' => out.push_str("&apos;"),
            c => out.push(c),
        }
    }
    out
}

fn rgb((r, g, b): (u8, u8, u8)) -> String {
    format!("#{r:02x}{g:02x}{b:02x}")
}

fn rgba((r, g, b): (u8, u8, u8), a: f64) -> String {
    format!("rgba({r},{g},{b},{a})")
}

fn ink(a: f64) -> String { rgba(INK, a) }

fn path_d(points: &[Point], close: bool) -> String {
    let mut d = points
        .iter()
        .enumerate()
        .map(|(i, p)| format!("{} {:.2} {:.2}", if i == 0 { "M" } else { "L" }, p.x, p.y))
        .collect::<Vec<_>>()
        .join(" ");
    if close {
        d.push_str(" Z");
    }
    d
}

fn hline(out: &mut String, x1: f64, x2: f64, y: f64, stroke: &str) {
    out.push_str(&format!(
        r#"<line x1="{x1}" y1="{y}" x2="{x2}" y2="{y}" stroke="{stroke}"/>"#
    ));
    out.push('\n');
}

fn text(out: &mut String, x: f64, y: f64, attrs: &str, body: &str) {
    out.push_str(&format!(r#"<text x="{x}" y="{y}" {attrs}>{}</text>"#, escape_xml(body)));
    out.push('\n');
}

fn marker(out: &mut String, m: &Marker, r: f64, hit_r: f64) {
    let color = if m.is_positive() { POS_GREEN } else { NEG_RED };
    out.push_str(&format!(
        r#"<g data-point="{}"><circle cx="{:.2}" cy="{:.2}" r="{r}" fill="{}" stroke="{}" stroke-width="3"/><circle cx="{:.2}" cy="{:.2}" r="{hit_r}" fill="transparent"/></g>"#,
        escape_xml(&m.payload),
        m.at.x, m.at.y,
        rgb(color),
        rgba(color, 0.65),
        m.at.x, m.at.y,
    ));
    out.push('\n');
}

fn area(out: &mut String, a: &Area, color: (u8, u8, u8)) {
    out.push_str(&format!(
        r#"<path d="{}" fill="{}" stroke="none"/>"#,
        path_d(&a.outline(), true),
        rgba(color, 0.18)
    ));
    out.push('\n');
}

/// Serialize `geo` as an SVG document.
pub fn render(geo: &ChartGeometry) -> String {
    let f = &geo.frame;
    let (w, h) = (f.width, f.height);
    let left = f.pad_left;
    let right = geo.right();
    let small = r#"font-size="11" text-anchor="end""#;

    let mut out = String::new();
    out.push_str(&format!(
        r#"<svg width="{w}" height="{h}" viewBox="0 0 {w} {h}" xmlns="http://www.w3.org/2000/svg">"#
    ));
    out.push('\n');
    out.push_str(&format!(
        r#"<rect x="0" y="0" width="{w}" height="{h}" rx="18" fill="{}" stroke="{}"/>"#,
        ink(0.06), ink(0.14)
    ));
    out.push('\n');
    text(&mut out, 22.0, 28.0, &format!(r#"font-size="14" font-weight="900" fill="{}""#, ink(0.92)), CHART_TITLE);

    match &geo.shape {
        Shape::Empty { message } => {
            text(
                &mut out, w / 2.0, h / 2.0,
                &format!(r#"font-size="14" text-anchor="middle" fill="{}""#, ink(0.75)),
                message,
            );
        }
        Shape::Single(s) => {
            hline(&mut out, left, right, s.baseline_y, &ink(0.18));
            text(&mut out, left - 12.0, s.baseline_y + 4.0, &format!(r#"{small} fill="{}""#, ink(0.70)), "0.00");
            marker(&mut out, &s.marker, 7.0, 12.0);
            text(&mut out, left, h - 20.0, &format!(r#"font-size="11" fill="{}""#, ink(0.70)), &s.label);
        }
        Shape::Trend(t) => {
            text(
                &mut out, 22.0, 48.0,
                &format!(r#"font-size="12" fill="{}""#, ink(0.72)),
                &t.subtitle.text(),
            );

            for tick in &t.y_ticks {
                hline(&mut out, left, right, tick.y, &ink(0.08));
                text(&mut out, left - 12.0, tick.y + 4.0, &format!(r#"{small} fill="{}""#, ink(0.70)), &tick.label);
            }

            hline(&mut out, left, right, t.baseline_y, &ink(0.18));
            let axis_y = geo.axis_y();
            hline(&mut out, left, right, axis_y, &ink(0.10));

            for a in &t.above {
                area(&mut out, a, POS_GREEN);
            }
            for a in &t.below {
                area(&mut out, a, NEG_RED);
            }

            out.push_str(&format!(
                r#"<path d="{}" fill="none" stroke="{}" stroke-width="3.5" stroke-linecap="round" stroke-linejoin="round"/>"#,
                path_d(&t.line, false),
                ink(0.85)
            ));
            out.push('\n');

            for m in &t.markers {
                marker(&mut out, m, 5.5, 14.0);
            }

            let label_y = if t.rotation != 0 { axis_y + 60.0 } else { axis_y + 32.0 };
            let anchor = if t.rotation != 0 { "end" } else { "middle" };
            for x in &t.x_ticks {
                out.push_str(&format!(
                    r#"<line x1="{0}" y1="{axis_y}" x2="{0}" y2="{1}" stroke="{2}"/>"#,
                    x.x, axis_y + 7.0, ink(0.14)
                ));
                out.push('\n');
                let rotate = if t.rotation != 0 {
                    format!(r#" transform="rotate({} {} {label_y})""#, t.rotation, x.x)
                } else {
                    s!()
                };
                text(
                    &mut out, x.x, label_y,
                    &format!(r#"font-size="11" text-anchor="{anchor}" fill="{}"{rotate}"#, ink(0.70)),
                    &x.text,
                );
            }
        }
    }

    out.push_str("</svg>\n");
    out
}
