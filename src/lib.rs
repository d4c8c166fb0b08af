//! # tabletex
//!
//! Pretty-formatted plain-text tables that can be exported to LaTeX.
//!
//! ## Features
//!
//! - **Two outputs, one layout**: the text and LaTeX renderers share a single
//!   two-pass algorithm, so rules, spans and widths always agree
//! - **Journal styles**: `A`, `T`, `MNRAS`, `NoLines` and `A&A` rule conventions
//! - **Spans**: multi-row and multi-column cells (`\multirow`, `\multicolumn`)
//! - **Number formatting**: table-wide decimal places with per-cell rendering
//! - **Design properties**: per-cell color and borders
//!
//! ## Usage Examples
//!
//! ```rust
//! use tabletex::{CellContent, Table};
//!
//! let mut table = Table::new(["Name", "b", "c", "d", "e"]);
//! table.add_row(vec![
//!     CellContent::from("first"),
//!     1.into(),
//!     4.into(),
//!     6.into(),
//!     7.into(),
//! ]);
//!
//! // Plain text
//! let text = table.to_string();
//! assert!(text.contains("first"));
//!
//! // LaTeX, A&A style by default
//! let latex = table.build_latex();
//! assert!(latex.contains("\\begin{tabular}{ccccc}\n\\hline\\hline"));
//! ```

/// Core layout engine
pub mod core;

/// Utility modules
pub mod utils;

/// TOML configuration (feature-gated)
#[cfg(feature = "config")]
pub mod config;

// Re-export the table API
pub use crate::core::table::{
    Alignment, Cell, CellContent, CellDesign, CellProperty, Direction, OutputFormat, Style,
    StyleKind, Table, DEFAULT_DECIMAL_PLACES,
};

// Re-export utilities
pub use utils::error::{TableError, TableResult};
pub use utils::sink::{FileSink, MemorySink, TableSink, WriteMode, WriteOptions};

#[cfg(feature = "config")]
pub use config::TableConfig;
