// tests/chart.rs
use holdings_tracker::chart::{self, geometry::Area, labels, svg, ChartEntry, Shape};
use holdings_tracker::config::options::ChartOptions;
use holdings_tracker::core::Cents;

fn series(date_of: impl Fn(usize) -> String, values: &[i64]) -> Vec<ChartEntry> {
    values
        .iter()
        .enumerate()
        .map(|(i, v)| ChartEntry {
            date: date_of(i),
            time: format!("{:02}:{:02} PM", 1 + i / 60, i % 60),
            value: Cents(*v),
        })
        .collect()
}

fn one_day(values: &[i64]) -> Vec<ChartEntry> {
    series(|_| "03/14/2025".to_string(), values)
}

#[test]
fn single_snapshot_is_marker_and_baseline() {
    let g = chart::build(&one_day(&[500]), &ChartOptions::default());
    let Shape::Single(s) = &g.shape else { panic!("expected single, got {:?}", g.shape) };
    assert!(s.marker.is_positive());
    assert!(s.marker.at.y < s.baseline_y);

    let out = svg::render(&g);
    assert_eq!(out.matches("data-point=").count(), 1);
    // no line, no fill
    assert!(!out.contains("<path"));
}

#[test]
fn same_day_labels_are_time_only() {
    let g = chart::build(&one_day(&[1, 2, 3, 4, 5, 6, 7, 8]), &ChartOptions::default());
    let Shape::Trend(t) = &g.shape else { panic!("expected trend") };
    assert!(!t.x_ticks.is_empty());
    for x in &t.x_ticks {
        assert!(x.text.ends_with("PM"), "{}", x.text);
        assert!(!x.text.contains('/'), "{}", x.text);
    }
}

#[test]
fn multi_day_labels_are_month_day() {
    let entries = series(|i| format!("03/{:02}/2025", 10 + i), &[1, -2, 3, -4]);
    let g = chart::build(&entries, &ChartOptions::default());
    let Shape::Trend(t) = &g.shape else { panic!("expected trend") };
    let texts: Vec<&str> = t.x_ticks.iter().map(|x| x.text.as_str()).collect();
    assert_eq!(texts.first(), Some(&"03/10"));
    assert_eq!(texts.last(), Some(&"03/13"));
}

fn span(areas: &[Area]) -> f64 {
    areas.iter().map(|a| { let (l, r) = a.x_span(); r - l }).sum()
}

#[test]
fn areas_cover_the_line_once_and_keep_their_side() {
    let values = [300, -200, -100, 400, 0, -50, 75];
    let g = chart::build(&one_day(&values), &ChartOptions::default());
    let Shape::Trend(t) = &g.shape else { panic!("expected trend") };

    let total = t.line[t.line.len() - 1].x - t.line[0].x;
    assert!((span(&t.above) + span(&t.below) - total).abs() < 1e-6);

    for a in &t.above {
        assert!(a.points.iter().all(|p| p.value >= 0.0 && p.y <= t.baseline_y + 1e-9));
    }
    for a in &t.below {
        assert!(a.points.iter().all(|p| p.value <= 0.0 && p.y >= t.baseline_y - 1e-9));
    }
    assert_eq!(t.markers.len(), values.len());
}

#[test]
fn tick_indices_stay_in_bounds() {
    for plot_w in [200.0, 765.0, 5000.0] {
        for n in 2..60 {
            let ticks = labels::pick_ticks(n, plot_w);
            assert_eq!(ticks.first(), Some(&0));
            assert_eq!(ticks.last(), Some(&(n - 1)));
            assert!(ticks.windows(2).all(|w| w[0] < w[1]));
            if n >= 3 {
                assert!((3..=6).contains(&ticks.len()), "n={n} w={plot_w}: {ticks:?}");
            }
        }
    }
    assert_eq!(labels::pick_ticks(2, 765.0), vec![0, 1]);
}

#[test]
fn empty_series_has_message() {
    let g = chart::build(&[], &ChartOptions::default());
    assert!(g.is_empty());
    assert!(svg::render(&g).contains("No snapshots yet"));
}
