//! Table layout engine
//!
//! Renders a grid of cells as aligned plain text and as LaTeX tabular
//! markup. Both outputs come out of the same two-pass algorithm; only the
//! style callbacks and the per-cell rendering differ, so rules, spans and
//! column widths stay in agreement between the two formats.
//!
//! # Architecture
//!
//! ```text
//! add_row -> Cell arena (row-major) -> spans as grid metadata
//!         -> column widths -> Style rule queries -> joined lines
//! ```
//!
//! # Example
//!
//! ```
//! use tabletex::{CellContent, StyleKind, Table};
//!
//! let mut table = Table::with_style(["Name", "b", "c"], StyleKind::TopRule);
//! table.add_row(vec![CellContent::from("first"), 1.into(), 4.5.into()]);
//! let text = table.to_string();
//! let latex = table.build_latex();
//! assert!(text.contains("4.50"));
//! assert!(latex.contains("\\begin{tabular}{c|cc}"));
//! ```

mod cell;
mod grid;
mod render;
mod style;


// Re-export public API
pub use cell::{Alignment, Cell, CellContent, CellDesign, CellProperty};
pub use grid::{Direction, Table, DEFAULT_DECIMAL_PLACES};
pub use style::{OutputFormat, Style, StyleKind};
