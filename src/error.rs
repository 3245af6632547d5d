// src/error.rs
//
// Extraction failures travel as values. Only the aggregate pass/fail and one
// reason string reach the user; row-level misses are counted, not surfaced.

use thiserror::Error;

#[derive(Clone, Debug, Error, PartialEq, Eq)]
pub enum ExtractError {
    /// Header labels are absent: most likely a layout change, not transient.
    #[error("Could not locate header labels \"{total_return}\" and \"{equity}\".")]
    StructureNotFound { total_return: String, equity: String },

    #[error("No holding rows found.")]
    NoHoldingRows,

    /// The table is there but no equity cell parsed yet. Retry shortly.
    #[error("Equity not parsed yet (page still rendering). Scroll slightly and wait.")]
    EquityNotYetParsed,

    #[error("Not a currency amount: {0:?}")]
    InvalidMoneyText(String),
}

impl ExtractError {
    /// Worth polling again without user action.
    pub fn is_retryable(&self) -> bool {
        matches!(self, ExtractError::EquityNotYetParsed)
    }
}
