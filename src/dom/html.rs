// src/dom/html.rs
//! `VisualNode` over a parsed HTML document.
//!
//! A saved page carries no stylesheet engine, so "computed" color is the
//! nearest inline `style="color: …"` (or legacy `color=` attribute) on the
//! node or any ancestor, which is how CSS inheritance resolves for inline
//! styles.

use std::sync::LazyLock;

use scraper::{ElementRef, Html, Selector};

use crate::core::color::{self, Rgb};
use super::VisualNode;

static CANONICAL: LazyLock<Selector> = LazyLock::new(|| {
    Selector::parse(r#"link[rel="canonical"], meta[property="og:url"]"#).expect("static selector")
});

pub struct HtmlDocument {
    html: Html,
}

impl HtmlDocument {
    pub fn parse(text: &str) -> Self {
        Self { html: Html::parse_document(text) }
    }

    pub fn root(&self) -> HtmlNode<'_> {
        HtmlNode(self.html.root_element())
    }

    /// The page's own idea of its URL, if it recorded one when saved.
    pub fn canonical_url(&self) -> Option<String> {
        self.html.select(&CANONICAL).find_map(|el| {
            let v = el.value();
            v.attr("href").or_else(|| v.attr("content")).map(str::to_string)
        })
    }
}

#[derive(Clone, Copy, Debug)]
pub struct HtmlNode<'a>(ElementRef<'a>);

impl<'a> HtmlNode<'a> {
    fn local_color(&self) -> Option<Rgb> {
        let v = self.0.value();
        v.attr("style")
            .and_then(color::color_from_style)
            .or_else(|| v.attr("color").and_then(color::parse_css_color))
    }
}

impl<'a> VisualNode for HtmlNode<'a> {
    fn tag(&self) -> &str {
        self.0.value().name()
    }

    fn attr(&self, name: &str) -> Option<&str> {
        self.0.value().attr(name)
    }

    fn children(&self) -> Vec<Self> {
        self.0.children().filter_map(ElementRef::wrap).map(HtmlNode).collect()
    }

    fn parent(&self) -> Option<Self> {
        self.0.parent().and_then(ElementRef::wrap).map(HtmlNode)
    }

    fn next_sibling(&self) -> Option<Self> {
        self.0.next_siblings().find_map(ElementRef::wrap).map(HtmlNode)
    }

    fn text(&self) -> String {
        self.0.text().collect()
    }

    fn computed_color(&self) -> Option<Rgb> {
        let mut cur = Some(*self);
        while let Some(node) = cur {
            if let Some(c) = node.local_color() {
                return Some(c);
            }
            cur = node.parent();
        }
        None
    }
}
