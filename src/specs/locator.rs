// src/specs/locator.rs
//! Finding the holdings table without ids.
//!
//! Two levels, both re-run on every pass:
//! 1. [`locate`]: the `<header>` whose text carries both column labels gives
//!    the column count and the two column indices; its next sibling (or its
//!    parent) holds the rows.
//! 2. [`find_row`]: inside one row link, the descendant whose direct
//!    children line up with the header columns is the cell grid.

use std::cmp::Reverse;

use crate::config::options::PageOptions;
use crate::dom::VisualNode;
use crate::error::ExtractError;

/// Where the columns of interest live, for one pass.
#[derive(Clone, Debug)]
pub struct TableLayout<N> {
    pub rows_container: N,
    pub column_count: usize,
    pub total_return_index: usize,
    pub equity_index: usize,
}

/// Header columns are the header's direct `div` children.
fn header_columns<N: VisualNode>(header: &N) -> Vec<N> {
    header.children().into_iter().filter(|c| c.is("div")).collect()
}

pub fn locate<N: VisualNode>(root: &N, page: &PageOptions) -> Result<TableLayout<N>, ExtractError> {
    let not_found = || ExtractError::StructureNotFound {
        total_return: page.total_return_label.clone(),
        equity: page.equity_label.clone(),
    };

    let header = std::iter::once(root.clone())
        .chain(root.descendants())
        .filter(|n| n.is("header"))
        .find(|h| {
            let txt = h.flat_text();
            txt.contains(&page.total_return_label) && txt.contains(&page.equity_label)
        })
        .ok_or_else(not_found)?;

    let cols = header_columns(&header);
    let index_of = |label: &str| cols.iter().position(|c| c.flat_text().contains(label));

    let (Some(total_return_index), Some(equity_index)) =
        (index_of(&page.total_return_label), index_of(&page.equity_label))
    else {
        logd!("Locator: header found but a label is not a direct column");
        return Err(not_found());
    };

    let rows_container = header
        .next_sibling()
        .or_else(|| header.parent())
        .unwrap_or_else(|| header.clone());

    logd!(
        "Locator: columns={} total_return@{} equity@{}",
        cols.len(), total_return_index, equity_index
    );

    Ok(TableLayout {
        rows_container,
        column_count: cols.len(),
        total_return_index,
        equity_index,
    })
}

/// The cell grid inside one row: exactly `column_count` element children,
/// at least `min(min_filled, column_count)` of them with text. The most
/// fully rendered candidate (most descendants) wins; ties keep document order.
pub fn find_row<N: VisualNode>(row: &N, column_count: usize, min_filled: usize) -> Option<N> {
    let need = min_filled.min(column_count);
    row.descendants()
        .into_iter()
        .filter(|el| {
            let kids = el.children();
            kids.len() == column_count
                && kids.iter().filter(|k| !k.flat_text().is_empty()).count() >= need
        })
        .min_by_key(|el| Reverse(el.descendant_count()))
}

/// Holding-row anchors: `<a>` whose href starts with the configured prefix.
pub fn row_anchors<N: VisualNode>(container: &N, prefix: &str) -> Vec<N> {
    container
        .descendants()
        .into_iter()
        .filter(|n| n.is("a") && n.attr("href").is_some_and(|h| h.starts_with(prefix)))
        .collect()
}
