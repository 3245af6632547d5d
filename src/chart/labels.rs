// src/chart/labels.rs
//! X-axis labels: which indices get one, how they are rotated and how much
//! of "date time" survives.

use std::sync::LazyLock;

use regex::Regex;

use crate::config::consts::{MAX_X_TICKS, MIN_X_TICKS, PX_PER_LABEL};

static DATE_TIME: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"^(\d{1,2}/\d{1,2}(?:/\d{2,4})?)\s+(.*)$").expect("static regex")
});

/// `"01/02/2025 09:30 AM"` -> `("01/02/2025", "09:30 AM")`. Without a
/// leading date the whole label is the time part.
pub fn split_label(label: &str) -> (&str, &str) {
    let s = label.trim();
    match DATE_TIME.captures(s) {
        Some(c) => match (c.get(1), c.get(2)) {
            (Some(d), Some(t)) => (d.as_str(), t.as_str()),
            _ => ("", s),
        },
        None => ("", s),
    }
}

/// One label per ~170px, between 3 and 6.
pub fn tick_budget(plot_w: f64) -> usize {
    ((plot_w / PX_PER_LABEL).floor().max(0.0) as usize).clamp(MIN_X_TICKS, MAX_X_TICKS)
}

/// Evenly spaced indices into a series of length `n`; first and last always
/// present, no duplicates, ascending.
pub fn pick_ticks(n: usize, plot_w: f64) -> Vec<usize> {
    match n {
        0 => return Vec::new(),
        1 => return vec![0],
        _ => {}
    }
    let k = tick_budget(plot_w);
    let mut out: Vec<usize> = Vec::with_capacity(k);
    for i in 0..k {
        let idx = ((i * (n - 1)) as f64 / (k - 1) as f64).round() as usize;
        if out.last() != Some(&idx) {
            out.push(idx);
        }
    }
    out
}

pub fn rotation(tick_count: usize) -> i32 {
    match tick_count {
        0..=3 => 0,
        4 => -30,
        _ => -45,
    }
}

/// True when every label carries the same date part. An empty list counts
/// as same-day; a label without a date part never does.
pub fn same_day_all<S: AsRef<str>>(labels: &[S]) -> bool {
    let Some(first) = labels.first() else { return true };
    let (day, _) = split_label(first.as_ref());
    if day.is_empty() {
        return false;
    }
    labels.iter().all(|l| split_label(l.as_ref()).0 == day)
}

/// Time only on a single-day series, month/day otherwise.
pub fn shorten(label: &str, same_day: bool) -> String {
    let (date, time) = split_label(label);
    if same_day {
        return if time.is_empty() { s!(label) } else { s!(time) };
    }
    let mmdd = date.split('/').take(2).collect::<Vec<_>>().join("/");
    if mmdd.is_empty() { s!(label) } else { mmdd }
}

#[derive(Clone, Debug, PartialEq)]
pub struct XLabel {
    pub index: usize,
    pub text: String,
}

#[derive(Clone, Debug, PartialEq)]
pub struct LabelPlan {
    pub labels: Vec<XLabel>,
    pub rotation: i32,
}

/// Full plan for a series of `"date time"` labels.
pub fn plan<S: AsRef<str>>(labels: &[S], plot_w: f64) -> LabelPlan {
    let same_day = same_day_all(labels);
    let ticks = pick_ticks(labels.len(), plot_w);
    let rotation = rotation(ticks.len());
    let labels = ticks
        .into_iter()
        .map(|index| XLabel { index, text: shorten(labels[index].as_ref(), same_day) })
        .collect();
    LabelPlan { labels, rotation }
}

#[cfg(test)]
mod tests {
    use super::*;

    const PLOT_W: f64 = 765.0;

    #[test]
    fn budget_from_width() {
        assert_eq!(tick_budget(765.0), 4);
        assert_eq!(tick_budget(100.0), 3);
        assert_eq!(tick_budget(5000.0), 6);
    }

    #[test]
    fn ticks_small_series() {
        assert!(pick_ticks(0, PLOT_W).is_empty());
        assert_eq!(pick_ticks(1, PLOT_W), vec![0]);
        assert_eq!(pick_ticks(2, PLOT_W), vec![0, 1]);
        assert_eq!(pick_ticks(3, PLOT_W), vec![0, 1, 2]);
    }

    #[test]
    fn ticks_stay_in_bounds_and_hit_both_ends() {
        for w in [100.0, 500.0, 765.0, 900.0, 1200.0, 4000.0] {
            for n in 3..200 {
                let t = pick_ticks(n, w);
                assert!((3..=6).contains(&t.len()), "n={n} w={w} -> {t:?}");
                assert_eq!(t[0], 0);
                assert_eq!(*t.last().unwrap(), n - 1);
                assert!(t.windows(2).all(|p| p[0] < p[1]));
            }
        }
    }

    #[test]
    fn rotation_by_density() {
        assert_eq!(rotation(3), 0);
        assert_eq!(rotation(4), -30);
        assert_eq!(rotation(5), -45);
        assert_eq!(rotation(6), -45);
    }

    #[test]
    fn splits_and_shortens() {
        assert_eq!(split_label("01/02/2025 09:30 AM"), ("01/02/2025", "09:30 AM"));
        assert_eq!(split_label("9:30 AM"), ("", "9:30 AM"));
        assert_eq!(shorten("01/02/2025 09:30 AM", true), "09:30 AM");
        assert_eq!(shorten("01/02/2025 09:30 AM", false), "01/02");
        assert_eq!(shorten("whenever", false), "whenever");
    }

    #[test]
    fn same_day_detection() {
        assert!(same_day_all::<&str>(&[]));
        assert!(same_day_all(&["01/02/2025 09:30 AM", "01/02/2025 04:00 PM"]));
        assert!(!same_day_all(&["01/02/2025 09:30 AM", "01/03/2025 09:30 AM"]));
        assert!(!same_day_all(&["09:30 AM"]));
    }

    #[test]
    fn plan_uses_time_only_on_one_day() {
        let labels: Vec<String> = (0..8).map(|h| format!("03/14/2025 {:02}:00 PM", h + 1)).collect();
        let p = plan(&labels, PLOT_W);
        assert_eq!(p.rotation, -30);
        assert!(p.labels.iter().all(|l| l.text.ends_with("PM") && !l.text.contains('/')));
        assert_eq!(p.labels.first().map(|l| l.index), Some(0));
        assert_eq!(p.labels.last().map(|l| l.index), Some(7));
    }
}
