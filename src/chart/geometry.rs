// src/chart/geometry.rs
//! Net-over-snapshots chart, as plain coordinates.
//!
//! x is spaced by index, not by time. y is linear over a domain that always
//! contains zero, padded by 5% of its span (at least one cent) on both ends.
//! With two or more points the line is split into fill regions above and
//! below zero, cut exactly where a segment crosses the baseline.

use crate::config::consts::Y_TICKS;
use crate::config::options::ChartOptions;
use crate::core::money::{self, Cents};
use crate::store::Snapshot;

use super::labels;

pub const EMPTY_MESSAGE: &str = "No snapshots yet. Click “Save snapshot” to start tracking.";

/// One series point as the chart needs it.
#[derive(Clone, Debug, PartialEq)]
pub struct ChartEntry {
    pub date: String,
    pub time: String,
    pub value: Cents,
}

impl ChartEntry {
    pub fn label(&self) -> String {
        format!("{} {}", self.date, self.time)
    }

    pub fn payload(&self) -> String {
        format!("{}|{}|{}", self.date, self.time, money::format(self.value))
    }
}

impl From<&Snapshot> for ChartEntry {
    fn from(s: &Snapshot) -> Self {
        Self { date: s.date.clone(), time: s.time.clone(), value: s.net_cents }
    }
}

/// Y domain in cents, already padded.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct Domain {
    pub min: i64,
    pub max: i64,
}

impl Domain {
    pub fn of(values: &[Cents]) -> Self {
        let lo = values.iter().map(|c| c.get()).min().unwrap_or(0).min(0);
        let hi = values.iter().map(|c| c.get()).max().unwrap_or(0).max(0);
        let base = hi.saturating_sub(lo).max(1);
        // round(base * 5%), half up
        let pad = (base.saturating_add(10) / 20).max(1);
        Self { min: lo.saturating_sub(pad), max: hi.saturating_add(pad) }
    }

    pub fn range(&self) -> f64 {
        let r = self.max as f64 - self.min as f64;
        if r == 0.0 { 1.0 } else { r }
    }
}

/// Index/value to pixel mapping for one render.
#[derive(Clone, Copy, Debug)]
pub struct Scale {
    left: f64,
    top: f64,
    plot_w: f64,
    plot_h: f64,
    count: usize,
    domain: Domain,
}

impl Scale {
    pub fn new(frame: &ChartOptions, count: usize, domain: Domain) -> Self {
        Self {
            left: frame.pad_left,
            top: frame.pad_top,
            plot_w: frame.plot_w(),
            plot_h: frame.plot_h(),
            count,
            domain,
        }
    }

    pub fn x(&self, i: usize) -> f64 {
        self.left + (i as f64 * self.plot_w) / (self.count.saturating_sub(1).max(1) as f64)
    }

    pub fn y(&self, v: f64) -> f64 {
        self.top + self.plot_h * (self.domain.max as f64 - v) / self.domain.range()
    }
}

#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Point {
    pub x: f64,
    pub y: f64,
}

/// A polyline vertex that remembers the value it was mapped from.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct PlotPoint {
    pub x: f64,
    pub y: f64,
    pub value: f64,
}

impl PlotPoint {
    pub fn at(&self) -> Point { Point { x: self.x, y: self.y } }
}

/// A run of same-sign points, closed against the baseline.
#[derive(Clone, Debug, PartialEq)]
pub struct Area {
    pub points: Vec<PlotPoint>,
    pub baseline_y: f64,
}

impl Area {
    /// Closed outline: down to the baseline under the first point, along
    /// the run, back to the baseline under the last one.
    pub fn outline(&self) -> Vec<Point> {
        let (Some(first), Some(last)) = (self.points.first(), self.points.last()) else {
            return Vec::new();
        };
        let mut out = Vec::with_capacity(self.points.len() + 2);
        out.push(Point { x: first.x, y: self.baseline_y });
        out.extend(self.points.iter().map(PlotPoint::at));
        out.push(Point { x: last.x, y: self.baseline_y });
        out
    }

    pub fn x_span(&self) -> (f64, f64) {
        let first = self.points.first().map_or(0.0, |p| p.x);
        let last = self.points.last().map_or(first, |p| p.x);
        (first, last)
    }
}

/// Hoverable point.
#[derive(Clone, Debug, PartialEq)]
pub struct Marker {
    pub at: Point,
    pub value: Cents,
    pub payload: String,
}

impl Marker {
    pub fn is_positive(&self) -> bool { !self.value.is_negative() }
}

#[derive(Clone, Debug, PartialEq)]
pub struct YTick {
    pub y: f64,
    pub label: String,
}

#[derive(Clone, Debug, PartialEq)]
pub struct XTick {
    pub x: f64,
    pub text: String,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct Subtitle {
    pub first: Cents,
    pub latest: Cents,
}

impl Subtitle {
    pub fn change(&self) -> Cents { self.latest.saturating_sub(self.first) }

    pub fn text(&self) -> String {
        format!(
            "Start {} → Latest {} • Change {}",
            money::format(self.first),
            money::format(self.latest),
            money::format(self.change())
        )
    }
}

#[derive(Clone, Debug, PartialEq)]
pub struct Single {
    pub baseline_y: f64,
    pub marker: Marker,
    pub label: String,
}

#[derive(Clone, Debug, PartialEq)]
pub struct Trend {
    pub baseline_y: f64,
    pub domain: Domain,
    pub line: Vec<Point>,
    pub above: Vec<Area>,
    pub below: Vec<Area>,
    pub markers: Vec<Marker>,
    pub y_ticks: Vec<YTick>,
    pub x_ticks: Vec<XTick>,
    pub rotation: i32,
    pub subtitle: Subtitle,
}

#[derive(Clone, Debug, PartialEq)]
pub enum Shape {
    Empty { message: &'static str },
    Single(Single),
    Trend(Trend),
}

#[derive(Clone, Debug, PartialEq)]
pub struct ChartGeometry {
    pub frame: ChartOptions,
    pub shape: Shape,
}

impl ChartGeometry {
    pub fn is_empty(&self) -> bool { matches!(self.shape, Shape::Empty { .. }) }

    /// Bottom edge of the plot area, where x ticks hang.
    pub fn axis_y(&self) -> f64 { self.frame.pad_top + self.frame.plot_h() }

    pub fn right(&self) -> f64 { self.frame.width - self.frame.pad_right }
}

/// Caption above the chart, by snapshot count.
pub fn caption(count: usize) -> String {
    match count {
        0 => s!("No snapshots saved yet."),
        1 => s!("1 snapshot saved. Save one more to see a trend."),
        n => format!("Snapshots: {n}"),
    }
}

pub fn build_from_snapshots(series: &[Snapshot], frame: &ChartOptions) -> ChartGeometry {
    let entries: Vec<ChartEntry> = series.iter().map(ChartEntry::from).collect();
    build(&entries, frame)
}

/// Geometry for an ordered series (oldest first).
pub fn build(series: &[ChartEntry], frame: &ChartOptions) -> ChartGeometry {
    let shape = match series {
        [] => Shape::Empty { message: EMPTY_MESSAGE },
        [only] => Shape::Single(single(only, frame)),
        _ => Shape::Trend(trend(series, frame)),
    };
    ChartGeometry { frame: frame.clone(), shape }
}

fn single(entry: &ChartEntry, frame: &ChartOptions) -> Single {
    let scale = Scale::new(frame, 1, Domain::of(&[entry.value]));
    Single {
        baseline_y: scale.y(0.0),
        marker: Marker {
            at: Point { x: scale.x(0), y: scale.y(entry.value.get() as f64) },
            value: entry.value,
            payload: entry.payload(),
        },
        label: entry.label(),
    }
}

fn trend(series: &[ChartEntry], frame: &ChartOptions) -> Trend {
    let values: Vec<Cents> = series.iter().map(|e| e.value).collect();
    let domain = Domain::of(&values);
    let scale = Scale::new(frame, series.len(), domain);
    let baseline_y = scale.y(0.0);

    let pts: Vec<PlotPoint> = values
        .iter()
        .enumerate()
        .map(|(i, v)| {
            let value = v.get() as f64;
            PlotPoint { x: scale.x(i), y: scale.y(value), value }
        })
        .collect();

    let markers = series
        .iter()
        .zip(&pts)
        .map(|(e, p)| Marker { at: p.at(), value: e.value, payload: e.payload() })
        .collect();

    let y_ticks = (0..=Y_TICKS)
        .map(|i| {
            let v = domain.min as f64 + domain.range() * i as f64 / Y_TICKS as f64;
            YTick { y: scale.y(v), label: money::format_fixed(Cents(v.round() as i64)) }
        })
        .collect();

    let label_text: Vec<String> = series.iter().map(ChartEntry::label).collect();
    let plan = labels::plan(&label_text, frame.plot_w());
    let x_ticks = plan
        .labels
        .into_iter()
        .map(|l| XTick { x: scale.x(l.index), text: l.text })
        .collect();

    Trend {
        baseline_y,
        domain,
        line: pts.iter().map(PlotPoint::at).collect(),
        above: split_areas(&pts, baseline_y, true),
        below: split_areas(&pts, baseline_y, false),
        markers,
        y_ticks,
        x_ticks,
        rotation: plan.rotation,
        subtitle: Subtitle { first: values[0], latest: values[values.len() - 1] },
    }
}

/// Runs of points on one side of zero (zero itself counts as above). Where a
/// segment crosses, the interpolated baseline point ends one run and starts
/// the next. Runs shorter than two points enclose nothing and are dropped.
pub fn split_areas(pts: &[PlotPoint], baseline_y: f64, above: bool) -> Vec<Area> {
    let side = |v: f64| (v >= 0.0) == above;
    let mut runs: Vec<Vec<PlotPoint>> = Vec::new();
    let mut current: Vec<PlotPoint> = Vec::new();

    for (i, p) in pts.iter().enumerate() {
        if side(p.value) {
            current.push(*p);
        }
        let Some(q) = pts.get(i + 1) else { continue };
        if (p.value >= 0.0) != (q.value >= 0.0) {
            let t = (0.0 - p.value) / (q.value - p.value);
            let cross = PlotPoint { x: p.x + t * (q.x - p.x), y: baseline_y, value: 0.0 };
            if side(p.value) {
                current.push(cross);
                runs.push(std::mem::take(&mut current));
            } else {
                current = vec![cross];
            }
        }
    }
    if !current.is_empty() {
        runs.push(current);
    }

    runs.into_iter()
        .filter(|r| r.len() >= 2)
        .map(|points| Area { points, baseline_y })
        .collect()
}
