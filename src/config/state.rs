// src/config/state.rs
use super::options::TrackerOptions;

#[derive(Clone, Debug)]
pub struct GuiState {
    /// Saved holdings page being watched
    pub source_path: String,

    pub window_w: u32,
    pub window_h: u32,

    /// Chart window open
    pub show_chart: bool,
}

impl Default for GuiState {
    fn default() -> Self {
        Self {
            source_path: s!(),
            window_w: 1000,
            window_h: 720,
            show_chart: false,
        }
    }
}

#[derive(Clone, Debug, Default)]
pub struct AppState {
    pub options: TrackerOptions,
    pub gui: GuiState,
}
