// src/core/color.rs
//
// Just enough CSS color parsing to read text color off inline styles:
// rgb(), rgba(), #rgb, #rrggbb and a handful of names.

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct Rgb {
    pub r: u8,
    pub g: u8,
    pub b: u8,
}

impl Rgb {
    pub const fn new(r: u8, g: u8, b: u8) -> Self { Self { r, g, b } }

    /// Green beats both red and blue by more than `margin`.
    pub fn green_dominant(&self, margin: u8) -> bool {
        let (r, g, b, m) = (self.r as i16, self.g as i16, self.b as i16, margin as i16);
        g > r + m && g > b + m
    }

    /// Red beats both green and blue by more than `margin`.
    pub fn red_dominant(&self, margin: u8) -> bool {
        let (r, g, b, m) = (self.r as i16, self.g as i16, self.b as i16, margin as i16);
        r > g + m && r > b + m
    }
}

/// Parse a single CSS color value.
pub fn parse_css_color(value: &str) -> Option<Rgb> {
    let v = value.trim().trim_end_matches("!important").trim().to_ascii_lowercase();

    if let Some(inner) = v.strip_prefix("rgba(").or_else(|| v.strip_prefix("rgb(")) {
        let inner = inner.strip_suffix(')')?;
        let mut parts = inner
            .split(|c: char| c == ',' || c == '/' || c.is_whitespace())
            .filter(|p| !p.is_empty());
        let mut channel = || -> Option<u8> {
            let p = parts.next()?;
            let n: f32 = p.parse().ok()?;
            Some(n.clamp(0.0, 255.0) as u8)
        };
        return Some(Rgb::new(channel()?, channel()?, channel()?));
    }

    if let Some(hex) = v.strip_prefix('#') {
        return match hex.len() {
            3 | 4 => {
                let d = |i: usize| u8::from_str_radix(&hex[i..i + 1], 16).ok().map(|x| x * 17);
                Some(Rgb::new(d(0)?, d(1)?, d(2)?))
            }
            6 | 8 => {
                let d = |i: usize| u8::from_str_radix(&hex[i..i + 2], 16).ok();
                Some(Rgb::new(d(0)?, d(2)?, d(4)?))
            }
            _ => None,
        };
    }

    match v.as_str() {
        "green" => Some(Rgb::new(0, 128, 0)),
        "lime" => Some(Rgb::new(0, 255, 0)),
        "red" => Some(Rgb::new(255, 0, 0)),
        "black" => Some(Rgb::new(0, 0, 0)),
        "white" => Some(Rgb::new(255, 255, 255)),
        _ => None,
    }
}

/// Pull the `color` declaration out of an inline `style` attribute.
/// `background-color` and friends are ignored.
pub fn color_from_style(style: &str) -> Option<Rgb> {
    style
        .split(';')
        .filter_map(|decl| decl.split_once(':'))
        .filter(|(prop, _)| prop.trim().eq_ignore_ascii_case("color"))
        .last()
        .and_then(|(_, val)| parse_css_color(val))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parses_functional_and_hex_forms() {
        assert_eq!(parse_css_color("rgb(0, 200, 5)"), Some(Rgb::new(0, 200, 5)));
        assert_eq!(parse_css_color("rgba(255, 80, 0, 0.5)"), Some(Rgb::new(255, 80, 0)));
        assert_eq!(parse_css_color("rgb(10 20 30 / 50%)"), Some(Rgb::new(10, 20, 30)));
        assert_eq!(parse_css_color("#0c5"), Some(Rgb::new(0, 204, 85)));
        assert_eq!(parse_css_color("#FF5000"), Some(Rgb::new(255, 80, 0)));
        assert_eq!(parse_css_color("currentColor"), None);
    }

    #[test]
    fn style_lookup_skips_background() {
        let style = "background-color: rgb(255,0,0); color: rgb(0, 200, 5)";
        assert_eq!(color_from_style(style), Some(Rgb::new(0, 200, 5)));
        assert_eq!(color_from_style("background-color: red"), None);
    }

    #[test]
    fn dominance_uses_strict_margin() {
        let green = Rgb::new(0, 200, 5);
        assert!(green.green_dominant(25));
        assert!(!green.red_dominant(25));
        // 25 above is not enough
        assert!(!Rgb::new(100, 125, 100).green_dominant(25));
        assert!(Rgb::new(255, 80, 0).red_dominant(25));
    }
}
