// src/gui/components/mod.rs
pub mod action_buttons;
pub mod chart_window;
pub mod dialogs;
pub mod history_table;
pub mod source_bar;
pub mod summary;
