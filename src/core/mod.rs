//! Core layout modules
//!
//! - `table`: cells, rule styles and the table grid with its renderer

pub mod table;

pub use table::{OutputFormat, Style, StyleKind, Table};
