// src/dom/mod.rs
//! # Tree-query interface
//!
//! The holdings page has no stable ids or class names worth trusting, so the
//! locator and the sign resolver only ever talk to a node through
//! [`VisualNode`]: tag, attributes, element children, parent, next sibling,
//! flattened text, computed text color and an embedded glyph path.
//!
//! - [`html`] adapts a parsed HTML document (`scraper`) to this trait.
//! - Tests build small synthetic trees that implement it directly.
//!
//! Nothing here caches structure: every call walks the live tree.

pub mod html;

use crate::core::color::Rgb;
use crate::core::sanitize::normalize_ws;

pub use html::{HtmlDocument, HtmlNode};

pub trait VisualNode: Clone {
    /// Lower-case element name.
    fn tag(&self) -> &str;

    fn attr(&self, name: &str) -> Option<&str>;

    /// Direct element children, in document order (text nodes excluded).
    fn children(&self) -> Vec<Self>;

    fn parent(&self) -> Option<Self>;

    /// Next element sibling.
    fn next_sibling(&self) -> Option<Self>;

    /// Concatenated text of the whole subtree, unnormalized.
    fn text(&self) -> String;

    /// Rendered text color, inherited from ancestors where not set locally.
    fn computed_color(&self) -> Option<Rgb>;

    /// `d` of the first `<path>` inside an `<svg>` under this node.
    fn glyph_path(&self) -> Option<String> {
        self.descendants()
            .into_iter()
            .filter(|n| n.tag().eq_ignore_ascii_case("svg"))
            .find_map(|svg| {
                svg.descendants()
                    .into_iter()
                    .find(|p| p.tag().eq_ignore_ascii_case("path"))
                    .and_then(|p| p.attr("d").map(str::to_string))
            })
    }

    /// Text with whitespace collapsed.
    fn flat_text(&self) -> String {
        normalize_ws(&self.text())
    }

    /// All element descendants, pre-order, excluding `self`.
    fn descendants(&self) -> Vec<Self> {
        let mut out = Vec::new();
        let mut stack: Vec<Self> = self.children().into_iter().rev().collect();
        while let Some(n) = stack.pop() {
            stack.extend(n.children().into_iter().rev());
            out.push(n);
        }
        out
    }

    fn descendant_count(&self) -> usize {
        self.descendants().len()
    }

    fn is(&self, tag: &str) -> bool {
        self.tag().eq_ignore_ascii_case(tag)
    }
}
