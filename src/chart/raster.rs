// src/chart/raster.rs
//! Geometry -> opaque PNG on the dark panel background.
//!
//! Text is set in the proportional font the GUI ships with, registered with
//! plotters on first use. The bitmap backend only turns text in quarter
//! turns, so rotated x labels are drawn upright into a scratch buffer and
//! composited onto the chart at their angle.

use std::borrow::Cow;
use std::io::Cursor;
use std::sync::OnceLock;

use eframe::egui::{FontDefinitions, FontFamily};
use image::{ImageFormat, RgbImage};
use plotters::prelude::*;
use plotters::style::text_anchor::{HPos, Pos, VPos};
use plotters::style::{register_font, FontStyle};

use crate::config::consts::{BG_DARK, CHART_TITLE, INK, NEG_RED, POS_GREEN};
use crate::file::ExportError;

use super::geometry::{ChartGeometry, Marker, Point, Shape};

const FAMILY: &str = "sans-serif";
const LABEL_ALPHA: f64 = 0.70;

static FONT: OnceLock<Result<(), String>> = OnceLock::new();

fn px(p: &Point) -> (i32, i32) {
    (p.x.round() as i32, p.y.round() as i32)
}

fn rgb(c: (u8, u8, u8)) -> RGBColor {
    RGBColor(c.0, c.1, c.2)
}

fn ink(a: f64) -> RGBAColor {
    rgb(INK).mix(a)
}

fn draw_err<E: std::fmt::Display>(e: E) -> ExportError {
    ExportError::Draw(e.to_string())
}

fn gui_font() -> Option<&'static [u8]> {
    let defs = FontDefinitions::default();
    let name = defs.families.get(&FontFamily::Proportional)?.first()?;
    let data = defs.font_data.get(name)?;
    match &data.font {
        Cow::Borrowed(bytes) => Some(*bytes),
        // registered once per process
        Cow::Owned(bytes) => Some(Box::leak(bytes.clone().into_boxed_slice())),
    }
}

fn ensure_font() -> Result<(), ExportError> {
    FONT.get_or_init(|| {
        let bytes = gui_font().ok_or_else(|| s!("no proportional font available"))?;
        register_font(FAMILY, FontStyle::Normal, bytes).map_err(|_| s!("font data rejected"))?;
        logd!("Raster: registered {} font ({} bytes)", FAMILY, bytes.len());
        Ok(())
    })
    .clone()
    .map_err(ExportError::Draw)
}

type Area<'a> = DrawingArea<BitMapBackend<'a>, plotters::coord::Shift>;

fn hline(root: &Area, x1: f64, x2: f64, y: f64, color: RGBAColor, width: u32) -> Result<(), ExportError> {
    let y = y.round() as i32;
    root.draw(&PathElement::new(
        vec![(x1.round() as i32, y), (x2.round() as i32, y)],
        ShapeStyle { color, filled: false, stroke_width: width },
    ))
    .map_err(draw_err)
}

fn marker(root: &Area, m: &Marker, r: i32) -> Result<(), ExportError> {
    let color = if m.is_positive() { rgb(POS_GREEN) } else { rgb(NEG_RED) };
    let at = px(&m.at);
    root.draw(&Circle::new(at, r + 2, color.mix(0.65).filled())).map_err(draw_err)?;
    root.draw(&Circle::new(at, r, color.filled())).map_err(draw_err)
}

fn style(size: u32, alpha: f64, h: HPos, v: VPos) -> TextStyle<'static> {
    (FAMILY, size).into_font().color(&ink(alpha)).pos(Pos::new(h, v))
}

/// Text anchored at `(x, y)`; `h`/`v` pick which edge of the text box sits there.
fn label(root: &Area, x: f64, y: f64, style: &TextStyle, body: &str) -> Result<(), ExportError> {
    root.draw(&Text::new(body.to_string(), (x.round() as i32, y.round() as i32), style.clone()))
        .map_err(draw_err)
}

/// An x label to be composited at an angle once the chart is drawn.
struct Turned {
    anchor: (f64, f64),
    degrees: f64,
    size: (u32, u32),
    text: String,
}

fn draw(root: &Area, geo: &ChartGeometry, turned: &mut Vec<Turned>) -> Result<(), ExportError> {
    let f = &geo.frame;
    let (left, right) = (f.pad_left, geo.right());
    let small_right = style(11, LABEL_ALPHA, HPos::Right, VPos::Center);

    root.fill(&rgb(BG_DARK)).map_err(draw_err)?;
    root.draw(&Rectangle::new(
        [(0, 0), (f.width as i32 - 1, f.height as i32 - 1)],
        ink(0.06).filled(),
    ))
    .map_err(draw_err)?;
    label(root, 22.0, 28.0, &style(14, 0.92, HPos::Left, VPos::Bottom), CHART_TITLE)?;

    match &geo.shape {
        Shape::Empty { message } => {
            let centered = style(14, 0.75, HPos::Center, VPos::Center);
            label(root, f.width / 2.0, f.height / 2.0, &centered, message)?;
        }
        Shape::Single(s) => {
            hline(root, left, right, s.baseline_y, ink(0.18), 1)?;
            label(root, left - 12.0, s.baseline_y, &small_right, "0.00")?;
            marker(root, &s.marker, 7)?;
            let below = style(11, LABEL_ALPHA, HPos::Left, VPos::Bottom);
            label(root, left, f.height - 20.0, &below, &s.label)?;
        }
        Shape::Trend(t) => {
            let sub = style(12, 0.72, HPos::Left, VPos::Bottom);
            label(root, 22.0, 48.0, &sub, &t.subtitle.text())?;
            for tick in &t.y_ticks {
                hline(root, left, right, tick.y, ink(0.08), 1)?;
                label(root, left - 12.0, tick.y, &small_right, &tick.label)?;
            }
            hline(root, left, right, t.baseline_y, ink(0.18), 1)?;
            hline(root, left, right, geo.axis_y(), ink(0.10), 1)?;

            for (areas, color) in [(&t.above, POS_GREEN), (&t.below, NEG_RED)] {
                for a in areas {
                    let pts: Vec<(i32, i32)> = a.outline().iter().map(px).collect();
                    root.draw(&Polygon::new(pts, rgb(color).mix(0.18).filled()))
                        .map_err(draw_err)?;
                }
            }

            let line: Vec<(i32, i32)> = t.line.iter().map(px).collect();
            root.draw(&PathElement::new(line, ShapeStyle {
                color: ink(0.85),
                filled: false,
                stroke_width: 3,
            }))
            .map_err(draw_err)?;

            for m in &t.markers {
                marker(root, m, 5)?;
            }

            let axis_y = geo.axis_y();
            let label_y = if t.rotation != 0 { axis_y + 60.0 } else { axis_y + 32.0 };
            let upright = style(11, LABEL_ALPHA, HPos::Center, VPos::Bottom);
            for x in &t.x_ticks {
                root.draw(&PathElement::new(
                    vec![(x.x.round() as i32, axis_y as i32), (x.x.round() as i32, (axis_y + 7.0) as i32)],
                    ink(0.14),
                ))
                .map_err(draw_err)?;
                if t.rotation == 0 {
                    label(root, x.x, label_y, &upright, &x.text)?;
                } else {
                    turned.push(Turned {
                        anchor: (x.x, label_y),
                        degrees: t.rotation as f64,
                        size: root.estimate_text_size(&x.text, &upright).map_err(draw_err)?,
                        text: x.text.clone(),
                    });
                }
            }
        }
    }
    Ok(())
}

const PAD: u32 = 2;

/// Upright white-on-black coverage mask of `t`, padded by `PAD` on each side.
fn mask(t: &Turned) -> Result<(u32, u32, Vec<u8>), ExportError> {
    let (w, h) = (t.size.0 + 2 * PAD, t.size.1 + 2 * PAD);
    let mut buf = vec![0u8; (w * h * 3) as usize];
    {
        let area = BitMapBackend::with_buffer(&mut buf, (w, h)).into_drawing_area();
        area.fill(&BLACK).map_err(draw_err)?;
        let white = (FAMILY, 11).into_font().color(&WHITE);
        area.draw(&Text::new(t.text.clone(), (PAD as i32, PAD as i32), white))
            .map_err(draw_err)?;
        area.present().map_err(draw_err)?;
    }
    Ok((w, h, buf))
}

/// Rotate the mask about the anchor (text end on the anchor, like SVG
/// `text-anchor="end"`) and blend ink into `dest`.
fn composite(dest: &mut [u8], dw: u32, dh: u32, t: &Turned) -> Result<(), ExportError> {
    let (mw, mh, m) = mask(t)?;
    let (sin, cos) = t.degrees.to_radians().sin_cos();
    let (ax, ay) = t.anchor;
    let (mw_f, mh_f) = (mw as f64, mh as f64);

    // mask pixel (bx, by) sits at local (bx - mw, by - mh), end/bottom at the origin
    let corners = [(-mw_f, -mh_f), (0.0, -mh_f), (-mw_f, 0.0), (0.0, 0.0)]
        .map(|(u, v)| (ax + u * cos - v * sin, ay + u * sin + v * cos));
    let min_x = corners.iter().map(|c| c.0).fold(f64::INFINITY, f64::min).floor().max(0.0) as u32;
    let max_x = corners.iter().map(|c| c.0).fold(f64::NEG_INFINITY, f64::max).ceil().min(dw as f64) as u32;
    let min_y = corners.iter().map(|c| c.1).fold(f64::INFINITY, f64::min).floor().max(0.0) as u32;
    let max_y = corners.iter().map(|c| c.1).fold(f64::NEG_INFINITY, f64::max).ceil().min(dh as f64) as u32;

    for y in min_y..max_y {
        for x in min_x..max_x {
            let (dx, dy) = (x as f64 + 0.5 - ax, y as f64 + 0.5 - ay);
            let u = cos * dx + sin * dy;
            let v = -sin * dx + cos * dy;
            let (bx, by) = ((u + mw_f).floor(), (v + mh_f).floor());
            if bx < 0.0 || by < 0.0 || bx >= mw_f || by >= mh_f {
                continue;
            }
            let mi = ((by as u32 * mw + bx as u32) * 3) as usize;
            let cover = m[mi..mi + 3].iter().copied().max().unwrap_or(0);
            if cover == 0 {
                continue;
            }
            let a = cover as f64 / 255.0 * LABEL_ALPHA;
            let di = ((y * dw + x) * 3) as usize;
            for (c, ink_c) in dest[di..di + 3].iter_mut().zip([INK.0, INK.1, INK.2]) {
                *c = (*c as f64 * (1.0 - a) + ink_c as f64 * a).round() as u8;
            }
        }
    }
    Ok(())
}

/// Raw RGB8 pixels, `width * height * 3` bytes.
pub fn render_rgb(geo: &ChartGeometry) -> Result<(u32, u32, Vec<u8>), ExportError> {
    ensure_font()?;
    let (w, h) = (geo.frame.width.round().max(1.0) as u32, geo.frame.height.round().max(1.0) as u32);
    let mut buf = vec![0u8; (w * h * 3) as usize];
    let mut turned = Vec::new();
    {
        let root = BitMapBackend::with_buffer(&mut buf, (w, h)).into_drawing_area();
        draw(&root, geo, &mut turned)?;
        root.present().map_err(draw_err)?;
    }
    for t in &turned {
        composite(&mut buf, w, h, t)?;
    }
    Ok((w, h, buf))
}

/// Encoded PNG bytes.
pub fn render_png(geo: &ChartGeometry) -> Result<Vec<u8>, ExportError> {
    let (w, h, buf) = render_rgb(geo)?;
    let img = RgbImage::from_raw(w, h, buf)
        .ok_or_else(|| ExportError::Draw(s!("raster buffer size mismatch")))?;
    let mut out = Cursor::new(Vec::new());
    img.write_to(&mut out, ImageFormat::Png)?;
    Ok(out.into_inner())
}
