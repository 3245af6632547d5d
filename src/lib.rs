// src/lib.rs

#[macro_use]
pub mod macros;
#[macro_use]
pub mod log;

#[cfg(feature = "cli")]
pub mod cli;
pub mod config;
pub mod core;
pub mod dom;
pub mod error;
pub mod specs;

pub mod chart;
pub mod csv;
pub mod file;
pub mod gui;
pub mod scrape;
pub mod store;

pub use error::ExtractError;
