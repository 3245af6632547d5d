// src/specs/sign.rs
//! Sign inference for total-return cells.
//!
//! The page often prints the amount without a minus and signals direction
//! with an arrow icon or with the text color. Each cue is a [`SignStrategy`];
//! [`SignResolver`] asks them in order and the first answer wins. When no cue
//! answers, the value counts as positive.

use regex::Regex;

use crate::config::options::SignOptions;
use crate::dom::VisualNode;

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Sign {
    Positive,
    Negative,
}

impl Sign {
    pub fn factor(self) -> i64 {
        match self {
            Sign::Positive => 1,
            Sign::Negative => -1,
        }
    }
}

pub trait SignStrategy<N: VisualNode> {
    fn name(&self) -> &'static str;
    fn infer(&self, cell: &N) -> Option<Sign>;
}

/// Arrow icon: the first `<svg>` path under the cell, matched against opaque
/// numeric tokens. A token only matches whole (`9.5` does not match `19.55`).
pub struct GlyphCue {
    down: Vec<Regex>,
    up: Vec<Regex>,
}

impl GlyphCue {
    pub fn new(down: &[String], up: &[String]) -> Self {
        Self { down: token_patterns(down), up: token_patterns(up) }
    }
}

fn token_patterns(tokens: &[String]) -> Vec<Regex> {
    tokens
        .iter()
        .filter(|t| !t.trim().is_empty())
        .filter_map(|t| {
            let pat = format!(r"(?:^|[^0-9.]){}(?:[^0-9.]|$)", regex::escape(t.trim()));
            match Regex::new(&pat) {
                Ok(re) => Some(re),
                Err(e) => {
                    loge!("Sign: bad glyph token {:?}: {}", t, e);
                    None
                }
            }
        })
        .collect()
}

impl<N: VisualNode> SignStrategy<N> for GlyphCue {
    fn name(&self) -> &'static str { "glyph" }

    fn infer(&self, cell: &N) -> Option<Sign> {
        let d = cell.glyph_path()?;
        if self.down.iter().any(|re| re.is_match(&d)) {
            Some(Sign::Negative)
        } else if self.up.iter().any(|re| re.is_match(&d)) {
            Some(Sign::Positive)
        } else {
            None
        }
    }
}

/// Text color of the amount: the first `<span>` whose text has a `$`,
/// else the cell itself.
pub struct ColorCue {
    margin: u8,
}

impl ColorCue {
    pub fn new(margin: u8) -> Self { Self { margin } }
}

impl<N: VisualNode> SignStrategy<N> for ColorCue {
    fn name(&self) -> &'static str { "color" }

    fn infer(&self, cell: &N) -> Option<Sign> {
        let target = cell
            .descendants()
            .into_iter()
            .find(|n| n.is("span") && n.text().contains('$'))
            .unwrap_or_else(|| cell.clone());
        let c = target.computed_color()?;
        if c.green_dominant(self.margin) {
            Some(Sign::Positive)
        } else if c.red_dominant(self.margin) {
            Some(Sign::Negative)
        } else {
            None
        }
    }
}

pub struct SignResolver<N: VisualNode> {
    strategies: Vec<Box<dyn SignStrategy<N>>>,
}

impl<N: VisualNode> SignResolver<N> {
    /// Glyph first, then color.
    pub fn from_options(opts: &SignOptions) -> Self {
        Self::with_strategies(vec![
            Box::new(GlyphCue::new(&opts.glyph_down, &opts.glyph_up)),
            Box::new(ColorCue::new(opts.color_margin)),
        ])
    }

    pub fn with_strategies(strategies: Vec<Box<dyn SignStrategy<N>>>) -> Self {
        Self { strategies }
    }

    pub fn resolve(&self, cell: &N) -> Sign {
        for s in &self.strategies {
            if let Some(sign) = s.infer(cell) {
                logd!("Sign: {} -> {:?}", s.name(), sign);
                return sign;
            }
        }
        Sign::Positive
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::dom::{HtmlDocument, HtmlNode};

    fn cell<'a>(doc: &'a HtmlDocument) -> HtmlNode<'a> {
        doc.root()
            .descendants()
            .into_iter()
            .find(|n| n.attr("id") == Some("cell"))
            .expect("fixture has #cell")
    }

    fn resolve(html: &str) -> Sign {
        let doc = HtmlDocument::parse(html);
        let resolver = SignResolver::from_options(&SignOptions::default());
        resolver.resolve(&cell(&doc))
    }

    #[test]
    fn down_glyph_is_negative() {
        let html = r#"<div id="cell"><svg><path d="M7 9.5L12 15"/></svg><span>$30.25</span></div>"#;
        assert_eq!(resolve(html), Sign::Negative);
    }

    #[test]
    fn up_glyph_is_positive_even_when_red() {
        let html = r#"<div id="cell"><svg><path d="M7 2.5L12 8"/></svg>
            <span style="color: rgb(255, 80, 0)">$30.25</span></div>"#;
        assert_eq!(resolve(html), Sign::Positive);
    }

    #[test]
    fn glyph_tokens_match_whole_numbers_only() {
        let html = r#"<div id="cell"><svg><path d="M19.55 12.5L3 4"/></svg>
            <span style="color:#ff5000">$1.00</span></div>"#;
        // no glyph match, so color decides
        assert_eq!(resolve(html), Sign::Negative);
    }

    #[test]
    fn color_of_dollar_span_decides_without_glyph() {
        let green = r#"<div id="cell" style="color: red"><span>x</span><span style="color: rgb(0, 200, 5)">$5.00</span></div>"#;
        assert_eq!(resolve(green), Sign::Positive);
        let red = r#"<div id="cell"><span style="color: rgb(255, 80, 0)">$5.00</span></div>"#;
        assert_eq!(resolve(red), Sign::Negative);
    }

    #[test]
    fn neutral_color_and_no_glyph_default_positive() {
        let html = r#"<div id="cell"><span style="color: rgb(200, 200, 200)">$5.00</span></div>"#;
        assert_eq!(resolve(html), Sign::Positive);
        assert_eq!(resolve(r#"<div id="cell">$5.00</div>"#), Sign::Positive);
    }

    #[test]
    fn color_margin_is_strict() {
        // green exceeds red by exactly 25: not dominant
        let html = r#"<div id="cell"><span style="color: rgb(100, 125, 0)">$5.00</span></div>"#;
        assert_eq!(resolve(html), Sign::Positive);
        let strategy = ColorCue::new(25);
        let doc = HtmlDocument::parse(html);
        assert_eq!(<ColorCue as SignStrategy<HtmlNode>>::infer(&strategy, &cell(&doc)), None);
    }

    #[test]
    fn custom_strategy_order_is_respected() {
        struct Always(Sign);
        impl<N: VisualNode> SignStrategy<N> for Always {
            fn name(&self) -> &'static str { "always" }
            fn infer(&self, _: &N) -> Option<Sign> { Some(self.0) }
        }
        let html = r#"<div id="cell"><svg><path d="M7 2.5"/></svg>$1.00</div>"#;
        let doc = HtmlDocument::parse(html);
        let resolver: SignResolver<HtmlNode> = SignResolver::with_strategies(vec![
            Box::new(Always(Sign::Negative)),
            Box::new(GlyphCue::new(&[], &[s!("2.5")])),
        ]);
        assert_eq!(resolver.resolve(&cell(&doc)), Sign::Negative);
    }
}
