// src/config/options.rs
use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};
use thiserror::Error;

use super::consts::*;

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("failed to read options {path}: {source}")]
    Read { path: PathBuf, source: std::io::Error },

    #[error("failed to parse TOML {path}: {source}")]
    Parse { path: PathBuf, source: toml::de::Error },
}

/// Everything a user may tune without rebuilding. Every field has a default,
/// so an empty or partial `tracker.toml` is valid.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct TrackerOptions {
    pub page: PageOptions,
    pub sign: SignOptions,
    pub store: StoreOptions,
    pub export: ExportOptions,
    pub chart: ChartOptions,
    pub poll_interval_ms: u64,
}

impl Default for TrackerOptions {
    fn default() -> Self {
        Self {
            page: PageOptions::default(),
            sign: SignOptions::default(),
            store: StoreOptions::default(),
            export: ExportOptions::default(),
            chart: ChartOptions::default(),
            poll_interval_ms: POLL_INTERVAL_MS,
        }
    }
}

impl TrackerOptions {
    /// Load from `path`; a missing file yields defaults.
    pub fn load(path: &Path) -> Result<Self, ConfigError> {
        if !path.exists() {
            logd!("Options: {} missing, using defaults", path.display());
            return Ok(Self::default());
        }
        let text = std::fs::read_to_string(path)
            .map_err(|source| ConfigError::Read { path: path.to_path_buf(), source })?;
        let opts = toml::from_str(&text)
            .map_err(|source| ConfigError::Parse { path: path.to_path_buf(), source })?;
        logf!("Options: loaded {}", path.display());
        Ok(opts)
    }

    pub fn load_default_location() -> Result<Self, ConfigError> {
        Self::load(Path::new(OPTIONS_FILE))
    }
}

/// Where the holdings table is and how rows are recognized.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct PageOptions {
    pub total_return_label: String,
    pub equity_label: String,
    pub row_link_prefix: String,
    pub min_filled_cells: usize,
}

impl Default for PageOptions {
    fn default() -> Self {
        Self {
            total_return_label: s!(TOTAL_RETURN_LABEL),
            equity_label: s!(EQUITY_LABEL),
            row_link_prefix: s!(ROW_LINK_PREFIX),
            min_filled_cells: MIN_FILLED_CELLS,
        }
    }
}

/// Arrow glyph signatures are opaque tokens lifted from the site's SVG paths.
/// They break whenever the site redraws its icons, hence configurable.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct SignOptions {
    pub glyph_down: Vec<String>,
    pub glyph_up: Vec<String>,
    pub color_margin: u8,
}

impl Default for SignOptions {
    fn default() -> Self {
        Self {
            glyph_down: vec![s!(GLYPH_DOWN)],
            glyph_up: vec![s!(GLYPH_UP)],
            color_margin: COLOR_MARGIN,
        }
    }
}

#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct StoreOptions {
    pub dir: PathBuf,
    pub file: String,
}

impl Default for StoreOptions {
    fn default() -> Self {
        Self { dir: PathBuf::from(STORE_DIR), file: s!(SNAPSHOTS_FILE) }
    }
}

impl StoreOptions {
    pub fn path(&self) -> PathBuf {
        self.dir.join(&self.file)
    }
}

#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct ExportOptions {
    pub out_dir: PathBuf,
}

impl Default for ExportOptions {
    fn default() -> Self {
        Self { out_dir: PathBuf::from(DEFAULT_OUT_DIR) }
    }
}

/// Chart canvas size and paddings, in px.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct ChartOptions {
    pub width: f64,
    pub height: f64,
    pub pad_left: f64,
    pub pad_right: f64,
    pub pad_top: f64,
    pub pad_bottom: f64,
}

impl Default for ChartOptions {
    fn default() -> Self {
        Self {
            width: CHART_W,
            height: CHART_H,
            pad_left: PAD_L,
            pad_right: PAD_R,
            pad_top: PAD_T,
            pad_bottom: PAD_B,
        }
    }
}

impl ChartOptions {
    pub fn plot_w(&self) -> f64 { (self.width - self.pad_left - self.pad_right).max(1.0) }
    pub fn plot_h(&self) -> f64 { (self.height - self.pad_top - self.pad_bottom).max(1.0) }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn empty_toml_is_all_defaults() {
        let opts: TrackerOptions = toml::from_str("").expect("empty config should parse");
        assert_eq!(opts, TrackerOptions::default());
    }

    #[test]
    fn partial_toml_overrides_only_named_fields() {
        let text = r#"
poll_interval_ms = 1500

[sign]
glyph_down = ["9.5", "M12 19"]
"#;
        let opts: TrackerOptions = toml::from_str(text).expect("partial config should parse");
        assert_eq!(opts.poll_interval_ms, 1500);
        assert_eq!(opts.sign.glyph_down, vec!["9.5", "M12 19"]);
        assert_eq!(opts.sign.glyph_up, vec![GLYPH_UP]);
        assert_eq!(opts.page, PageOptions::default());
    }

    #[test]
    fn unknown_fields_are_rejected() {
        let err = toml::from_str::<TrackerOptions>("[page]\nbogus = 1").expect_err("unknown field");
        assert!(!err.to_string().is_empty());
    }

    #[test]
    fn default_plot_area() {
        let chart = ChartOptions::default();
        assert_eq!(chart.plot_w(), 765.0);
        assert_eq!(chart.plot_h(), 258.0);
    }
}
