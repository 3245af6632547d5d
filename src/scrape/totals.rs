// src/scrape/totals.rs
//! One pass over the holdings table: locate, walk the rows, sum.
//!
//! Result shape:
//! - `profit` is the sum of non-negative signed total returns, `loss` the sum
//!   of negative ones, `net = profit + loss`.
//! - `equity` sums every equity cell that parsed, independently of sign cues.
//! - A row whose total return does not parse is skipped whole and counted in
//!   `rows_skipped`.

use crate::config::options::{PageOptions, TrackerOptions};
use crate::core::money::{self, Cents};
use crate::dom::VisualNode;
use crate::error::ExtractError;
use crate::specs::{find_row, locate, row_anchors, SignResolver};

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct Totals {
    profit: Cents,
    loss: Cents,
    equity: Cents,
    rows_parsed: usize,
    rows_skipped: usize,
}

impl Totals {
    pub fn profit(&self) -> Cents { self.profit }
    pub fn loss(&self) -> Cents { self.loss }
    pub fn net(&self) -> Cents { self.profit + self.loss }
    pub fn equity(&self) -> Cents { self.equity }
    pub fn rows_parsed(&self) -> usize { self.rows_parsed }
    pub fn rows_skipped(&self) -> usize { self.rows_skipped }
}

pub struct TotalsAggregator<N: VisualNode> {
    page: PageOptions,
    resolver: SignResolver<N>,
}

impl<N: VisualNode> TotalsAggregator<N> {
    pub fn new(opts: &TrackerOptions) -> Self {
        Self::with_resolver(opts.page.clone(), SignResolver::from_options(&opts.sign))
    }

    pub fn with_resolver(page: PageOptions, resolver: SignResolver<N>) -> Self {
        Self { page, resolver }
    }

    pub fn aggregate(&self, root: &N) -> Result<Totals, ExtractError> {
        let layout = locate(root, &self.page)?;

        let anchors = row_anchors(&layout.rows_container, &self.page.row_link_prefix);
        if anchors.is_empty() {
            return Err(ExtractError::NoHoldingRows);
        }

        let mut profit = Cents::ZERO;
        let mut loss = Cents::ZERO;
        let mut equity = Cents::ZERO;
        let mut rows_parsed = 0usize;
        let mut rows_skipped = 0usize;
        let mut equity_parsed = 0usize;

        for anchor in &anchors {
            let Some(grid) = find_row(anchor, layout.column_count, self.page.min_filled_cells) else {
                rows_skipped += 1;
                continue;
            };
            let cells = grid.children();
            let (Some(tr_cell), Some(eq_cell)) =
                (cells.get(layout.total_return_index), cells.get(layout.equity_index))
            else {
                rows_skipped += 1;
                continue;
            };

            let tr_text = tr_cell.flat_text();
            let amount = match money::find_amount(&tr_text).map(money::parse) {
                Some(Ok(c)) => c,
                Some(Err(e)) => {
                    logd!("Totals: skipping row, {}", e);
                    rows_skipped += 1;
                    continue;
                }
                None => {
                    logd!("Totals: skipping row, no amount in {:?}", tr_text);
                    rows_skipped += 1;
                    continue;
                }
            };

            // An explicit "($x)" is already signed; cues only apply to bare amounts.
            let signed = if amount.is_negative() {
                amount
            } else {
                Cents(amount.get() * self.resolver.resolve(tr_cell).factor())
            };
            let bucket = if signed.is_negative() { &mut loss } else { &mut profit };
            let Some(sum) = bucket.checked_add(signed) else {
                logd!("Totals: skipping row, total return {} overflows", signed);
                rows_skipped += 1;
                continue;
            };

            let eq_text = eq_cell.flat_text();
            let eq_sum = match money::find_amount(&eq_text).map(money::parse) {
                Some(Ok(c)) => match equity.checked_add(c) {
                    Some(s) => Some(s),
                    None => {
                        logd!("Totals: skipping row, equity {} overflows", c);
                        rows_skipped += 1;
                        continue;
                    }
                },
                _ => None,
            };

            *bucket = sum;
            if let Some(s) = eq_sum {
                equity = s;
                equity_parsed += 1;
            }
            rows_parsed += 1;
        }

        if equity_parsed == 0 {
            return Err(ExtractError::EquityNotYetParsed);
        }

        logd!(
            "Totals: rows={} skipped={} profit={} loss={} equity={}",
            rows_parsed, rows_skipped, profit, loss, equity
        );

        Ok(Totals { profit, loss, equity, rows_parsed, rows_skipped })
    }
}

/// Convenience wrapper: build an aggregator from options and run one pass.
pub fn aggregate<N: VisualNode>(root: &N, opts: &TrackerOptions) -> Result<Totals, ExtractError> {
    TotalsAggregator::new(opts).aggregate(root)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::dom::HtmlDocument;

    fn page(rows: &str) -> String {
        format!(
            r#"<html><body><main>
            <header><div>Name</div><div>Price</div><div>Total return</div><div>Equity</div></header>
            <div class="rows">{rows}</div>
            </main></body></html>"#
        )
    }

    fn row(sym: &str, tr: &str, eq: &str) -> String {
        format!(
            r#"<a href="/stocks/{sym}"><div><div>{sym}</div><div>$1.00</div><div>{tr}</div><div>{eq}</div></div></a>"#
        )
    }

    fn run(html: &str) -> Result<Totals, ExtractError> {
        let doc = HtmlDocument::parse(html);
        aggregate(&doc.root(), &TrackerOptions::default())
    }

    #[test]
    fn sums_profit_loss_equity() {
        let rows = [
            row("AAA", r#"<span style="color: rgb(0,200,5)">$12.34</span>"#, "$1,000.00"),
            row("BBB", "($30.25)", "$500.50"),
            row("CCC", r#"<svg><path d="M7 9.5L1 1"/></svg><span>$5.00</span>"#, "$20.00"),
        ]
        .concat();
        let t = run(&page(&rows)).expect("totals");
        assert_eq!(t.profit(), Cents(1234));
        assert_eq!(t.loss(), Cents(-3525));
        assert_eq!(t.net(), Cents(-2291));
        assert_eq!(t.equity(), Cents(152050));
        assert_eq!(t.rows_parsed(), 3);
        assert_eq!(t.rows_skipped(), 0);
    }

    #[test]
    fn unparsable_total_return_skips_row() {
        let rows = [row("AAA", "$1.00", "$10.00"), row("BBB", "n/a", "$99.00")].concat();
        let t = run(&page(&rows)).expect("totals");
        assert_eq!(t.rows_parsed(), 1);
        assert_eq!(t.rows_skipped(), 1);
        assert_eq!(t.equity(), Cents(1000));
    }

    #[test]
    fn overflowing_rows_are_skipped_not_summed() {
        let huge = "$90,000,000,000,000,000.00";
        let rows = [
            row("AAA", huge, "$1.00"),
            row("BBB", huge, "$1.00"),
            row("CCC", "$2.00", huge),
            row("DDD", "$3.00", huge),
        ]
        .concat();
        let t = run(&page(&rows)).expect("totals");
        assert_eq!(t.profit(), Cents(9_000_000_000_000_000_000 + 200));
        assert_eq!(t.equity(), Cents(9_000_000_000_000_000_000 + 100));
        assert_eq!((t.rows_parsed(), t.rows_skipped()), (2, 2));
    }

    #[test]
    fn failure_reasons() {
        assert!(matches!(
            run("<html><body><p>nothing</p></body></html>"),
            Err(ExtractError::StructureNotFound { .. })
        ));
        assert_eq!(run(&page("")), Err(ExtractError::NoHoldingRows));
        let pending = row("AAA", "$1.00", "—");
        assert_eq!(run(&page(&pending)), Err(ExtractError::EquityNotYetParsed));
    }
}
