// src/report/mod.rs
//! Output surfaces: colored terminal reporting and file/stdout export.

pub mod export;
pub mod terminal;

pub use export::OutputFormat;
