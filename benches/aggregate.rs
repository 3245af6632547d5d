// benches/aggregate.rs
use criterion::{criterion_group, criterion_main, Criterion, black_box};

use holdings_tracker::{
    chart,
    config::options::TrackerOptions,
    dom::HtmlDocument,
    scrape,
};

/// A saved page if one is around, otherwise a synthetic one with `n` rows.
fn load_sample(n: usize) -> String {
    if let Ok(s) = std::fs::read_to_string(".ignore/page_samples/investing.html") {
        return s;
    }
    let rows: String = (0..n)
        .map(|i| {
            let (glyph, color) = if i % 3 == 0 { ("9.5", "rgb(255,80,0)") } else { ("2.5", "rgb(0,200,5)") };
            format!(
                r#"<a href="/stocks/S{i}"><div><div><div>S{i}</div><div>{i}</div><div>$1.00</div>
                <div><svg><path d="M1 {glyph}L3 3"/></svg><span style="color: {color}">${i}.25</span></div>
                <div>$1,{i:03}.00</div></div></div></a>"#
            )
        })
        .collect();
    format!(
        r#"<html><body><main><header><div>Name</div><div>Shares</div><div>Price</div>
        <div>Total return</div><div>Equity</div></header><div>{rows}</div></main></body></html>"#
    )
}

fn bench_aggregate(c: &mut Criterion) {
    let opts = TrackerOptions::default();
    let text = load_sample(200);

    c.bench_function("parse_and_aggregate", |b| {
        b.iter(|| {
            let doc = HtmlDocument::parse(black_box(&text));
            let t = scrape::aggregate(&doc.root(), &opts);
            black_box(t.map(|t| t.rows_parsed()).unwrap_or(0))
        })
    });

    let doc = HtmlDocument::parse(&text);
    c.bench_function("aggregate_only", |b| {
        b.iter(|| {
            let t = scrape::aggregate(black_box(&doc.root()), &opts);
            black_box(t.is_ok())
        })
    });
}

fn bench_chart(c: &mut Criterion) {
    let entries: Vec<chart::ChartEntry> = (0..500)
        .map(|i: i64| chart::ChartEntry {
            date: format!("01/{:02}/2025", 1 + i % 28),
            time: s_time(i),
            value: holdings_tracker::core::Cents((i * 37 % 2000) - 1000),
        })
        .collect();
    let frame = TrackerOptions::default().chart;
    c.bench_function("chart_geometry_500", |b| {
        b.iter(|| black_box(chart::build(black_box(&entries), &frame)))
    });
}

fn s_time(i: i64) -> String {
    format!("{:02}:{:02} AM", 1 + (i / 60) % 12, i % 60)
}

criterion_group!(benches, bench_aggregate, bench_chart);
criterion_main!(benches);
