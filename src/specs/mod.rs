// src/specs/mod.rs
//! # Page "specs" module
//!
//! This module hosts the **page-specific reading rules** for the holdings page.
//! It encodes *where the ground truth lives in the tree* and *how to read it
//! robustly* when the markup has no stable ids or class names.
//!
//! ## What lives here
//! - **Structure location** (`locator`): find the column header by its labels,
//!   derive column indices, find the rows container and each row's cell grid.
//! - **Sign inference** (`sign`): decide the direction of an unsigned amount
//!   from arrow glyphs or text color, through an ordered list of strategies.
//!
//! ## What does **not** live here
//! - **Summing and validation** – that's `scrape::totals`.
//! - **Persistence** (`store`) and **charting** (`chart`).
//! - **Money parsing** – `core::money`.
//!
//! ## Typical call chain
//! ```text
//! GUI / cli → scrape::Tracker::recompute → scrape::totals::aggregate
//!                                       ↘  specs::locator::{locate, find_row}
//!                                       ↘  specs::sign::SignResolver::resolve
//! ```
//!
//! ## Conventions & invariants
//! - Everything works through `dom::VisualNode`; nothing here knows about
//!   `scraper` directly.
//! - **Nothing is cached**: the page re-renders, so every pass starts from the
//!   root again.
//! - Labels, row link prefix and glyph signatures come from
//!   `config::options`, never hard-coded at call sites.
//!
//! In short: **`specs` knows how to read the page.** Other layers decide when
//! to read it, what to keep and how to present it.
pub mod locator;
pub mod sign;

pub use locator::{find_row, locate, row_anchors, TableLayout};
pub use sign::{ColorCue, GlyphCue, Sign, SignResolver, SignStrategy};
