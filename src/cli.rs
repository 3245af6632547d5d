// src/cli.rs
use std::path::PathBuf;

use chrono::Local;
use clap::{Parser, Subcommand};
use color_eyre::eyre::{bail, eyre, Result, WrapErr};

use crate::chart;
use crate::config::options::TrackerOptions;
use crate::core::money::format;
use crate::dom::HtmlDocument;
use crate::file;
use crate::scrape::{is_tracked_location, Totals, TotalsAggregator};
use crate::store::SnapshotStore;

#[derive(Debug, Parser)]
#[command(name = "cli", version, about = "Holdings totals, snapshots and net trend charts")]
pub struct Args {
    /// Options file (TOML). Missing file means defaults.
    #[arg(long, global = true)]
    pub config: Option<PathBuf>,

    /// Log to stderr as well as the log file.
    #[arg(long, short, global = true)]
    pub verbose: bool,

    #[command(subcommand)]
    pub command: Command,
}

#[derive(Debug, Subcommand)]
pub enum Command {
    /// Compute totals from a saved holdings page.
    Totals { page: PathBuf },

    /// Compute totals and append a snapshot.
    Save { page: PathBuf },

    /// List saved snapshots, newest first.
    History,

    /// Delete snapshots with this exact epoch (ms).
    Delete { epoch_ms: i64 },

    /// Delete every snapshot.
    Clear {
        /// Required; there is no undo.
        #[arg(long)]
        yes: bool,
    },

    /// Export snapshots as CSV.
    ExportCsv {
        #[arg(short, long, default_value = "")]
        out: String,
    },

    /// Render the net trend chart.
    Chart {
        #[arg(long)]
        svg: Option<PathBuf>,
        /// PNG path; empty for the default name in the output dir.
        #[arg(long, num_args = 0..=1, default_missing_value = "")]
        png: Option<String>,
    },
}

fn load_options(path: Option<&PathBuf>) -> Result<TrackerOptions> {
    let opts = match path {
        Some(p) => TrackerOptions::load(p)?,
        None => TrackerOptions::load_default_location()?,
    };
    Ok(opts)
}

fn compute(page: &PathBuf, opts: &TrackerOptions) -> Result<Totals> {
    let text = std::fs::read_to_string(page)
        .wrap_err_with(|| format!("reading {}", page.display()))?;
    let doc = HtmlDocument::parse(&text);
    if let Some(url) = doc.canonical_url() {
        if !is_tracked_location(&url) {
            bail!("{} is not the investing page ({url})", page.display());
        }
    }
    let aggregator = TotalsAggregator::new(opts);
    aggregator.aggregate(&doc.root()).map_err(|e| eyre!(e))
}

fn print_totals(t: &Totals) {
    println!("Profit        {}", format(t.profit()));
    println!("Loss          {}", format(t.loss()));
    println!("Net           {}", format(t.net()));
    println!("Total Equity  {}", format(t.equity()));
    println!("Total stocks: {} (skipped {})", t.rows_parsed(), t.rows_skipped());
}

pub fn run() -> Result<()> {
    let args = Args::parse();
    crate::log::init(args.verbose);
    let opts = load_options(args.config.as_ref())?;
    let store = SnapshotStore::new(opts.store.path());

    match args.command {
        Command::Totals { page } => {
            print_totals(&compute(&page, &opts)?);
        }
        Command::Save { page } => {
            let totals = compute(&page, &opts)?;
            let snap = store.save(&totals, Local::now())?;
            print_totals(&totals);
            println!("Saved snapshot {} ({} {})", snap.epoch_ms, snap.date, snap.time);
        }
        Command::History => {
            let snaps = store.newest_first()?;
            if snaps.is_empty() {
                println!("{}", chart::caption(0));
            }
            for s in snaps {
                println!(
                    "{}  {} {}  profit {}  loss {}  net {}  equity {}",
                    s.epoch_ms, s.date, s.time,
                    format(s.profit_cents), format(s.loss_cents),
                    format(s.net_cents), format(s.equity_cents)
                );
            }
        }
        Command::Delete { epoch_ms } => {
            let removed = store.delete(epoch_ms)?;
            if removed == 0 {
                bail!("no snapshot at {epoch_ms}");
            }
            println!("Deleted {removed} snapshot(s)");
        }
        Command::Clear { yes } => {
            if !yes {
                bail!("refusing to clear history without --yes");
            }
            store.clear()?;
            println!("History cleared");
        }
        Command::ExportCsv { out } => {
            let snaps = store.series()?;
            let path = file::resolve_out_path(&out, &opts.export.out_dir, &file::default_csv_name(Local::now()));
            let written = file::write_csv(&path, &snaps)?;
            println!("Wrote {}", written.display());
        }
        Command::Chart { svg, png } => {
            let snaps = store.series()?;
            println!("{}", chart::caption(snaps.len()));
            let geo = chart::build_from_snapshots(&snaps, &opts.chart);
            if let chart::Shape::Trend(t) = &geo.shape {
                println!("{}", t.subtitle.text());
            }
            if let Some(p) = svg {
                println!("Wrote {}", file::write_svg(&p, &geo)?.display());
            }
            if let Some(p) = png {
                let path = file::resolve_out_path(&p, &opts.export.out_dir, &file::default_png_name(Local::now()));
                println!("Wrote {}", file::write_png(&path, &geo)?.display());
            }
        }
    }
    Ok(())
}
