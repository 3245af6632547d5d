// src/csv.rs
use std::io::{self, Write};

use crate::config::consts::CSV_HEADERS;
use crate::core::money::format_fixed;
use crate::store::Snapshot;

fn needs_quotes(field: &str) -> bool {
    field.contains(',') || field.contains('"') || field.contains('\n') || field.contains('\r')
}

/// Write a single CSV row (LF-terminated) to any writer.
pub fn write_row<W: Write, S: AsRef<str>>(mut w: W, row: &[S]) -> io::Result<()> {
    let mut first = true;
    for cell in row {
        let cell = cell.as_ref();
        if !first { write!(w, ",")?; } else { first = false; }
        if needs_quotes(cell) {
            let escaped = cell.replace('"', "\"\"");
            write!(w, "\"{}\"", escaped)?;
        } else {
            write!(w, "{}", cell)?;
        }
    }
    writeln!(w)
}

pub fn snapshot_row(s: &Snapshot) -> [String; 6] {
    [
        s.date.clone(),
        s.time.clone(),
        format_fixed(s.profit_cents),
        format_fixed(s.loss_cents),
        format_fixed(s.net_cents),
        format_fixed(s.equity_cents),
    ]
}

/// Header plus one line per snapshot, oldest first regardless of input order.
pub fn write_snapshots<W: Write>(mut w: W, snaps: &[Snapshot]) -> io::Result<()> {
    let mut sorted: Vec<&Snapshot> = snaps.iter().collect();
    sorted.sort_by_key(|s| s.epoch_ms);

    write_row(&mut w, &CSV_HEADERS)?;
    for s in sorted {
        write_row(&mut w, &snapshot_row(s))?;
    }
    Ok(())
}

pub fn snapshots_to_string(snaps: &[Snapshot]) -> String {
    let mut buf: Vec<u8> = Vec::new();
    let _ = write_snapshots(&mut buf, snaps);

    match String::from_utf8(buf) {
        Ok(s) => s,
        Err(e) => String::from_utf8_lossy(&e.into_bytes()).into_owned(),
    }
}
