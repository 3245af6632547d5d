// src/core/sanitize.rs

/// Collapse runs of whitespace (including NBSP) to one space and trim.
pub fn normalize_ws(s: &str) -> String {
    let mut out = String::with_capacity(s.len());
    let mut prev_space = false;
    for ch in s.chars() {
        if ch.is_whitespace() {
            if !prev_space { out.push(' '); prev_space = true; }
        } else { out.push(ch); prev_space = false; }
    }
    out.trim().to_string()
}

/// Timestamp suitable for file names: `YYYY-MM-DD-HH-MM-SS`.
pub fn file_stamp(at: chrono::DateTime<chrono::Local>) -> String {
    at.format("%Y-%m-%d-%H-%M-%S").to_string()
}
