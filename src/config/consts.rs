// src/config/consts.rs

// Route guard
pub const TRACKED_ORIGIN: &str = "https://robinhood.com";
pub const TRACKED_PATH: &str = "/account/investing";

// Page heuristics
pub const TOTAL_RETURN_LABEL: &str = "Total return";
pub const EQUITY_LABEL: &str = "Equity";
pub const ROW_LINK_PREFIX: &str = "/stocks/";
pub const MIN_FILLED_CELLS: usize = 3;

// Sign cues
pub const GLYPH_DOWN: &str = "9.5";
pub const GLYPH_UP: &str = "2.5";
pub const COLOR_MARGIN: u8 = 25;

// Polling
pub const POLL_INTERVAL_MS: u64 = 3_000;

// Local store
pub const STORE_DIR: &str = ".store";
pub const SNAPSHOTS_FILE: &str = "snapshots.json";
pub const LOG_FILE: &str = "debug.log";
pub const OPTIONS_FILE: &str = "tracker.toml";

// Export
pub const DEFAULT_OUT_DIR: &str = "out";
pub const CSV_PREFIX: &str = "RH_Tracker_";
pub const PNG_PREFIX: &str = "RH_Stocks_Tracker_Net_";
pub const CSV_HEADERS: [&str; 6] = ["Date", "Time", "Profit", "Loss", "Net", "Total Equity"];

// Chart layout (px)
pub const CHART_W: f64 = 920.0;
pub const CHART_H: f64 = 520.0;
pub const PAD_L: f64 = 100.0;
pub const PAD_R: f64 = 55.0;
pub const PAD_T: f64 = 92.0; // room for title + subtitle
pub const PAD_B: f64 = 170.0; // room for rotated x labels
pub const Y_TICKS: usize = 4;
pub const CHART_TITLE: &str = "Net (USD) — based on saved snapshots";

// X labels
pub const PX_PER_LABEL: f64 = 170.0;
pub const MIN_X_TICKS: usize = 3;
pub const MAX_X_TICKS: usize = 6;

// Chart colors (r, g, b)
pub const BG_DARK: (u8, u8, u8) = (0x11, 0x18, 0x27);
pub const POS_GREEN: (u8, u8, u8) = (34, 197, 94);
pub const NEG_RED: (u8, u8, u8) = (239, 68, 68);
pub const INK: (u8, u8, u8) = (249, 250, 251);
