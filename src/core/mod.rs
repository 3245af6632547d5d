// src/core/mod.rs

pub mod color;
pub mod money;
pub mod sanitize;

pub use money::Cents;
