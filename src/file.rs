// src/file.rs

use std::{
    fs,
    path::{Path, PathBuf},
};

use chrono::{DateTime, Local};
use thiserror::Error;

use crate::chart::{raster, svg, ChartGeometry};
use crate::config::consts::{CSV_PREFIX, PNG_PREFIX};
use crate::core::sanitize::file_stamp;
use crate::csv::snapshots_to_string;
use crate::store::Snapshot;

#[derive(Debug, Error)]
pub enum ExportError {
    #[error("Path exists but is not a directory: {0}")]
    NotADirectory(PathBuf),

    #[error("failed to write {path}: {source}")]
    Io { path: PathBuf, source: std::io::Error },

    #[error("failed to encode PNG: {0}")]
    Encode(#[from] image::ImageError),

    #[error("failed to draw chart: {0}")]
    Draw(String),
}

fn io_err(path: &Path) -> impl FnOnce(std::io::Error) -> ExportError + '_ {
    move |source| ExportError::Io { path: path.to_path_buf(), source }
}

pub fn ensure_directory(dir: &Path) -> Result<(), ExportError> {
    if dir.exists() && !dir.is_dir() {
        return Err(ExportError::NotADirectory(dir.to_path_buf()));
    }
    if !dir.exists() { fs::create_dir_all(dir).map_err(io_err(dir))?; }
    Ok(())
}

fn ensure_parent(path: &Path) -> Result<(), ExportError> {
    if let Some(parent) = path.parent() {
        if !parent.as_os_str().is_empty() {
            ensure_directory(parent)?;
        }
    }
    Ok(())
}

/// `RH_Tracker_<YYYY-MM-DD>.csv`
pub fn default_csv_name(at: DateTime<Local>) -> String {
    join!(CSV_PREFIX, &at.format("%Y-%m-%d").to_string(), ".csv")
}

/// `RH_Stocks_Tracker_Net_<YYYY-MM-DD-HH-MM-SS>.png`
pub fn default_png_name(at: DateTime<Local>) -> String {
    join!(PNG_PREFIX, &file_stamp(at), ".png")
}

/// Empty input means "default name in `out_dir`"; a trailing separator or an
/// existing directory means "default name in there".
pub fn resolve_out_path(user_o: &str, out_dir: &Path, default_filename: &str) -> PathBuf {
    if user_o.is_empty() { return out_dir.join(default_filename); }
    let p = PathBuf::from(normalize_separators(user_o));
    if looks_like_dir_hint(&p) || p.is_dir() {
        p.join(default_filename)
    } else {
        p
    }
}

pub fn normalize_separators(p: &str) -> String {
    let sep = std::path::MAIN_SEPARATOR;
    p.chars().map(|c| if c=='/'||c=='\\' { sep } else { c }).collect()
}

pub fn looks_like_dir_hint(p: &Path) -> bool {
    let s = p.to_string_lossy();
    s.ends_with('/') || s.ends_with('\\')
}

pub fn write_csv(path: &Path, snaps: &[Snapshot]) -> Result<PathBuf, ExportError> {
    ensure_parent(path)?;
    fs::write(path, snapshots_to_string(snaps)).map_err(io_err(path))?;
    logf!("Export: CSV ({} rows) -> {}", snaps.len(), path.display());
    Ok(path.to_path_buf())
}

pub fn write_svg(path: &Path, geo: &ChartGeometry) -> Result<PathBuf, ExportError> {
    ensure_parent(path)?;
    fs::write(path, svg::render(geo)).map_err(io_err(path))?;
    logf!("Export: SVG -> {}", path.display());
    Ok(path.to_path_buf())
}

pub fn write_png(path: &Path, geo: &ChartGeometry) -> Result<PathBuf, ExportError> {
    let bytes = raster::render_png(geo)?;
    ensure_parent(path)?;
    fs::write(path, bytes).map_err(io_err(path))?;
    logf!("Export: PNG -> {}", path.display());
    Ok(path.to_path_buf())
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;

    #[test]
    fn default_names() {
        let at = Local.with_ymd_and_hms(2025, 3, 4, 5, 6, 7).single().expect("valid local time");
        assert_eq!(default_csv_name(at), "RH_Tracker_2025-03-04.csv");
        assert_eq!(default_png_name(at), "RH_Stocks_Tracker_Net_2025-03-04-05-06-07.png");
    }

    #[test]
    fn out_path_resolution() {
        let out = Path::new("out");
        assert_eq!(resolve_out_path("", out, "a.csv"), out.join("a.csv"));
        let hinted = resolve_out_path("some/dir/", out, "a.csv");
        assert!(hinted.ends_with("a.csv"));
        assert_eq!(resolve_out_path("x.csv", out, "a.csv"), PathBuf::from("x.csv"));
    }
}
