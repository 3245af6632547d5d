// tests/common/mod.rs
//
// A synthetic in-memory tree implementing `VisualNode`, so the locator and
// the sign resolver can be exercised without any HTML.
#![allow(dead_code)]

use std::rc::Rc;

use holdings_tracker::core::color::Rgb;
use holdings_tracker::dom::VisualNode;

#[derive(Clone, Debug, Default)]
pub struct El {
    tag: String,
    attrs: Vec<(String, String)>,
    text: String,
    color: Option<Rgb>,
    children: Vec<El>,
}

pub fn el(tag: &str) -> El {
    El { tag: tag.to_string(), ..Default::default() }
}

impl El {
    pub fn attr(mut self, k: &str, v: &str) -> Self {
        self.attrs.push((k.to_string(), v.to_string()));
        self
    }
    pub fn text(mut self, t: &str) -> Self {
        self.text = t.to_string();
        self
    }
    pub fn color(mut self, r: u8, g: u8, b: u8) -> Self {
        self.color = Some(Rgb::new(r, g, b));
        self
    }
    pub fn child(mut self, c: El) -> Self {
        self.children.push(c);
        self
    }
    pub fn children<I: IntoIterator<Item = El>>(mut self, cs: I) -> Self {
        self.children.extend(cs);
        self
    }

    /// Freeze into an arena and hand back the root.
    pub fn build(self) -> MemNode {
        let mut nodes = Vec::new();
        push(&mut nodes, self, None);
        MemNode { tree: Rc::new(nodes), id: 0 }
    }
}

struct Slot {
    tag: String,
    attrs: Vec<(String, String)>,
    text: String,
    color: Option<Rgb>,
    parent: Option<usize>,
    children: Vec<usize>,
}

fn push(nodes: &mut Vec<Slot>, e: El, parent: Option<usize>) -> usize {
    let id = nodes.len();
    nodes.push(Slot {
        tag: e.tag,
        attrs: e.attrs,
        text: e.text,
        color: e.color,
        parent,
        children: Vec::new(),
    });
    for c in e.children {
        let cid = push(nodes, c, Some(id));
        nodes[id].children.push(cid);
    }
    id
}

#[derive(Clone)]
pub struct MemNode {
    tree: Rc<Vec<Slot>>,
    id: usize,
}

impl MemNode {
    fn slot(&self) -> &Slot {
        &self.tree[self.id]
    }
    fn at(&self, id: usize) -> Self {
        MemNode { tree: Rc::clone(&self.tree), id }
    }
}

impl VisualNode for MemNode {
    fn tag(&self) -> &str {
        &self.slot().tag
    }

    fn attr(&self, name: &str) -> Option<&str> {
        self.slot().attrs.iter().find(|(k, _)| k == name).map(|(_, v)| v.as_str())
    }

    fn children(&self) -> Vec<Self> {
        self.slot().children.iter().map(|&c| self.at(c)).collect()
    }

    fn parent(&self) -> Option<Self> {
        self.slot().parent.map(|p| self.at(p))
    }

    fn next_sibling(&self) -> Option<Self> {
        let p = self.slot().parent?;
        let sibs = &self.tree[p].children;
        let pos = sibs.iter().position(|&c| c == self.id)?;
        sibs.get(pos + 1).map(|&c| self.at(c))
    }

    fn text(&self) -> String {
        let mut out = self.slot().text.clone();
        for c in self.children() {
            out.push_str(&c.text());
        }
        out
    }

    fn computed_color(&self) -> Option<Rgb> {
        let mut cur = Some(self.clone());
        while let Some(n) = cur {
            if let Some(c) = n.slot().color {
                return Some(c);
            }
            cur = n.parent();
        }
        None
    }
}

/* ---------- holdings page builders ---------- */

pub const UP_PATH: &str = "M2.5 6L6 2.5L10 6";
pub const DOWN_PATH: &str = "M1 3L6 9.5L11 3";

pub fn header() -> El {
    el("header").children(
        ["Name", "Shares", "Price", "Total return", "Equity"].map(|t| el("div").text(t)),
    )
}

/// A `/stocks/` row: wrapper div, then the five-cell grid.
pub fn row(sym: &str, total_return: El, equity: &str) -> El {
    el("a").attr("href", &format!("/stocks/{sym}")).child(
        el("div").child(
            el("div")
                .child(el("div").text(sym))
                .child(el("div").text("10"))
                .child(el("div").text("$1.00"))
                .child(total_return)
                .child(el("div").text(equity)),
        ),
    )
}

pub fn glyph(d: &str) -> El {
    el("svg").child(el("path").attr("d", d))
}

pub fn page(rows: Vec<El>) -> MemNode {
    el("body")
        .child(el("main").child(header()).child(el("div").children(rows)))
        .build()
}
