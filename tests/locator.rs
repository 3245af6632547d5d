// tests/locator.rs
mod common;

use common::{el, glyph, header, page, row};
use holdings_tracker::config::options::PageOptions;
use holdings_tracker::dom::VisualNode;
use holdings_tracker::error::ExtractError;
use holdings_tracker::specs::{find_row, locate, row_anchors};

#[test]
fn header_gives_column_indices() {
    let root = page(vec![row("AAA", el("div").text("$1.00"), "$5.00")]);
    let layout = locate(&root, &PageOptions::default()).expect("layout");
    assert_eq!(layout.column_count, 5);
    assert_eq!(layout.total_return_index, 3);
    assert_eq!(layout.equity_index, 4);
    assert_eq!(row_anchors(&layout.rows_container, "/stocks/").len(), 1);
}

#[test]
fn rows_container_falls_back_to_parent() {
    // header is the last child, so there is no next sibling
    let root = el("body")
        .child(el("section").child(row("AAA", el("div").text("$1.00"), "$5.00")).child(header()))
        .build();
    let layout = locate(&root, &PageOptions::default()).expect("layout");
    assert!(layout.rows_container.is("section"));
}

#[test]
fn missing_label_is_structure_not_found() {
    let root = el("body")
        .child(el("header").children(["Name", "Equity"].map(|t| el("div").text(t))))
        .build();
    let err = locate(&root, &PageOptions::default()).map(|_| ()).unwrap_err();
    assert_eq!(
        err,
        ExtractError::StructureNotFound { total_return: "Total return".into(), equity: "Equity".into() }
    );
}

#[test]
fn custom_labels_are_honored() {
    let opts = PageOptions {
        total_return_label: "Gain".into(),
        equity_label: "Value".into(),
        ..PageOptions::default()
    };
    let root = el("body")
        .child(el("header").children(["Value", "Gain"].map(|t| el("div").text(t))))
        .child(el("div"))
        .build();
    let layout = locate(&root, &opts).expect("layout");
    assert_eq!((layout.total_return_index, layout.equity_index), (1, 0));
}

#[test]
fn grid_needs_matching_width_and_enough_text() {
    let anchor = row("AAA", el("div").child(glyph(common::UP_PATH)).child(el("span").text("$2.00")), "$5.00")
        .build();
    let grid = find_row(&anchor, 5, 3).expect("grid");
    assert_eq!(grid.children().len(), 5);

    assert!(find_row(&anchor, 4, 3).is_none());

    // skeleton row: right width, nothing rendered yet
    let skeleton = el("a")
        .attr("href", "/stocks/ZZZ")
        .child(el("div").children((0..5).map(|_| el("div"))))
        .build();
    assert!(find_row(&skeleton, 5, 3).is_none());
    assert!(find_row(&skeleton, 5, 0).is_some());
}

#[test]
fn richest_candidate_wins() {
    // outer and inner both have five children; the outer one holds more
    let inner = el("div").children(["a", "b", "c", "d", "e"].map(|t| el("div").text(t)));
    let outer = el("div")
        .child(inner)
        .children(["w", "x", "y", "z"].map(|t| el("div").text(t)));
    let anchor = el("a").attr("href", "/stocks/Q").child(outer).build();
    let grid = find_row(&anchor, 5, 3).expect("grid");
    assert_eq!(grid.descendant_count(), 10);
}

#[test]
fn anchors_filter_by_prefix() {
    let root = el("div")
        .child(el("a").attr("href", "/stocks/AAA"))
        .child(el("a").attr("href", "/crypto/BTC"))
        .child(el("a"))
        .child(el("div").child(el("a").attr("href", "/stocks/BBB")))
        .build();
    let hrefs: Vec<String> = row_anchors(&root, "/stocks/")
        .iter()
        .filter_map(|a| a.attr("href").map(str::to_string))
        .collect();
    assert_eq!(hrefs, ["/stocks/AAA", "/stocks/BBB"]);
}
