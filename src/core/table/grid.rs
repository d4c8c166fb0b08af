//! Cell grid ownership, spans and the mutation/query API

use tracing::{debug, warn};

use super::cell::{Alignment, Cell, CellContent, CellProperty};
use super::style::{Style, StyleKind};
use crate::utils::error::{TableError, TableResult};

/// Fractional digits applied to numeric cells unless changed
pub const DEFAULT_DECIMAL_PLACES: usize = 2;

/// Adjacency links between grid cells
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Direction {
    NextCol,
    PrevCol,
    NextRow,
    PrevRow,
}

/// A line removed by a rebuild
#[derive(Debug, Clone, Copy)]
enum Line {
    Row(usize),
    Column(usize),
}

impl Line {
    /// New coordinates of `(row, col)` once the line is gone
    fn remap(&self, (row, col): (usize, usize)) -> Option<(usize, usize)> {
        match *self {
            Line::Row(r) if row == r => None,
            Line::Row(r) if row > r => Some((row - 1, col)),
            Line::Column(c) if col == c => None,
            Line::Column(c) if col > c => Some((row, col - 1)),
            _ => Some((row, col)),
        }
    }

    /// Whether the span anchored at `origin` crosses this line
    fn cuts(&self, origin: &Cell) -> bool {
        match *self {
            Line::Row(r) => origin.row() <= r && r < origin.row() + origin.row_span(),
            Line::Column(c) => origin.col() <= c && c < origin.col() + origin.col_span(),
        }
    }
}

/// A table of cells with a header row
///
/// The table exclusively owns its cells in a flat row-major arena; row 0 is
/// the header. Spans are recorded on the cells themselves (origin spans and
/// blank markers), so coordinates never shift.
#[derive(Debug, Clone)]
pub struct Table {
    pub(super) ncols: usize,
    pub(super) nrows: usize,
    pub(super) cells: Vec<Cell>,
    decimal_places: Option<usize>,
    pub(super) style: Style,
}

impl Table {
    /// Create a table in the default journal style
    pub fn new<I, S>(header: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self::with_style(header, StyleKind::default())
    }

    /// Create a table with an explicit style
    pub fn with_style<I, S>(header: I, kind: StyleKind) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        let header: Vec<CellContent> = header
            .into_iter()
            .map(|h| CellContent::Text(h.into()))
            .collect();

        let mut table = Table {
            ncols: header.len(),
            nrows: 0,
            cells: Vec::new(),
            decimal_places: Some(DEFAULT_DECIMAL_PLACES),
            style: Style::new(kind),
        };
        table.add_row(header);
        table
    }

    /// Create a table with a style given by name (`"T"`, `"A"`, `"MNRAS"`,
    /// `"NoLines"` or `"A&A"`)
    pub fn from_style_name<I, S>(header: I, style: &str) -> TableResult<Self>
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        let kind = style.parse::<StyleKind>()?;
        Ok(Self::with_style(header, kind))
    }

    pub fn column_count(&self) -> usize {
        self.ncols
    }

    /// Number of rows, header included
    pub fn row_count(&self) -> usize {
        self.nrows
    }

    pub fn decimal_places(&self) -> Option<usize> {
        self.decimal_places
    }

    pub fn style(&self) -> &Style {
        &self.style
    }

    fn index(&self, row: usize, col: usize) -> Option<usize> {
        if row < self.nrows && col < self.ncols {
            Some(row * self.ncols + col)
        } else {
            None
        }
    }

    pub fn cell(&self, row: usize, col: usize) -> Option<&Cell> {
        self.index(row, col).map(|i| &self.cells[i])
    }

    pub fn cell_mut(&mut self, row: usize, col: usize) -> Option<&mut Cell> {
        let i = self.index(row, col)?;
        Some(&mut self.cells[i])
    }

    /// The cell adjacent to `(row, col)` in the given direction
    pub fn neighbor(&self, row: usize, col: usize, direction: Direction) -> Option<&Cell> {
        self.cell(row, col)?;
        let (r, c) = match direction {
            Direction::NextCol => (row, col + 1),
            Direction::PrevCol => (row, col.checked_sub(1)?),
            Direction::NextRow => (row + 1, col),
            Direction::PrevRow => (row.checked_sub(1)?, col),
        };
        self.cell(r, c)
    }

    /// The span origin covering a blank cell
    pub fn origin_of(&self, cell: &Cell) -> Option<&Cell> {
        cell.span_origin().and_then(|(r, c)| self.cell(r, c))
    }

    /// Append one row of values
    ///
    /// Rows shorter than the header are padded with empty cells, longer rows
    /// are truncated.
    pub fn add_row<I, V>(&mut self, values: I)
    where
        I: IntoIterator<Item = V>,
        V: Into<CellContent>,
    {
        let row = self.nrows;
        let mut values: Vec<CellContent> = values.into_iter().map(Into::into).collect();

        if values.len() != self.ncols {
            warn!(
                row,
                expected = self.ncols,
                got = values.len(),
                "ragged row, padding or truncating to the header width"
            );
            values.resize(self.ncols, CellContent::default());
        }

        for (col, value) in values.into_iter().enumerate() {
            let mut cell = Cell::new(value, row, col);
            cell.set_decimal_places(self.decimal_places);
            self.cells.push(cell);
        }
        self.nrows += 1;
    }

    /// All cells of one row, left to right
    pub fn get_line(&self, row: usize) -> TableResult<&[Cell]> {
        if row >= self.nrows {
            return Err(TableError::row_not_found(row, self.nrows));
        }
        let start = row * self.ncols;
        Ok(&self.cells[start..start + self.ncols])
    }

    /// All cells of one column, header first
    pub fn get_column(&self, col: usize) -> TableResult<Vec<&Cell>> {
        if col >= self.ncols {
            return Err(TableError::column_not_found(col, self.ncols));
        }
        Ok(self.cells.iter().skip(col).step_by(self.ncols).collect())
    }

    /// Rendered text of each cell of one row
    pub fn row_values(&self, row: usize) -> TableResult<Vec<String>> {
        Ok(self.get_line(row)?.iter().map(Cell::render_text).collect())
    }

    /// Make `(row, col)` span `extra_rows` additional rows downwards
    pub fn set_cell_as_multi_row(
        &mut self,
        row: usize,
        col: usize,
        extra_rows: usize,
    ) -> TableResult<()> {
        let col_span = self
            .cell(row, col)
            .ok_or_else(|| TableError::cell_not_found(row, col))?
            .col_span();

        row.checked_add(extra_rows)
            .filter(|&last| last < self.nrows)
            .ok_or_else(|| TableError::row_not_found(row.saturating_add(extra_rows), self.nrows))?;

        self.apply_span(row, col, extra_rows + 1, col_span);
        Ok(())
    }

    /// Make `(row, col)` span `extra_cols` additional columns to the right
    pub fn set_cell_as_multi_col(
        &mut self,
        row: usize,
        col: usize,
        extra_cols: usize,
    ) -> TableResult<()> {
        let row_span = self
            .cell(row, col)
            .ok_or_else(|| TableError::cell_not_found(row, col))?
            .row_span();

        col.checked_add(extra_cols)
            .filter(|&last| last < self.ncols)
            .ok_or_else(|| {
                TableError::column_not_found(col.saturating_add(extra_cols), self.ncols)
            })?;

        self.apply_span(row, col, row_span, extra_cols + 1);
        Ok(())
    }

    /// Record a `row_span` x `col_span` region anchored at `(row, col)`
    ///
    /// Bounds are checked by the callers.
    fn apply_span(&mut self, row: usize, col: usize, row_span: usize, col_span: usize) {
        debug!(row, col, row_span, col_span, "setting cell span");

        for r in row..row + row_span {
            for c in col..col + col_span {
                if (r, c) == (row, col) {
                    continue;
                }
                if let Some(cell) = self.cell_mut(r, c) {
                    cell.mark_blank((row, col));
                }
            }
        }

        if let Some(origin) = self.cell_mut(row, col) {
            origin.set_row_span(row_span);
            origin.set_col_span(col_span);
        }
    }

    /// Set the decimal places of every cell and of cells added later
    pub fn set_decimal_places(&mut self, places: i32) -> TableResult<()> {
        if places < 0 {
            return Err(TableError::invalid(format!(
                "decimal places must be >= 0, got {}",
                places
            )));
        }
        self.apply_decimal_places(Some(places as usize));
        Ok(())
    }

    /// Render numbers in their natural form from now on
    pub fn clear_decimal_places(&mut self) {
        self.apply_decimal_places(None);
    }

    fn apply_decimal_places(&mut self, places: Option<usize>) {
        self.decimal_places = places;
        for cell in &mut self.cells {
            cell.set_decimal_places(places);
        }
    }

    pub fn add_vline(&mut self, col: usize) {
        self.style.add_vline(col);
    }

    pub fn add_hline(&mut self, row: usize) {
        self.style.add_hline(row);
    }

    pub fn add_table_caption(&mut self, caption: impl Into<String>) {
        self.style.set_caption(caption);
    }

    pub fn add_table_label(&mut self, label: impl Into<String>) {
        self.style.set_label(label);
    }

    /// Switch the rule convention, dropping user-added rules
    pub fn set_style(&mut self, kind: StyleKind) {
        self.style = self.style.with_kind(kind);
    }

    /// Switch the rule convention by name
    pub fn update_style(&mut self, name: &str) -> TableResult<()> {
        let kind = name.parse::<StyleKind>()?;
        self.set_style(kind);
        Ok(())
    }

    /// Set per-column tabular alignments from a string like `"lcr"`
    pub fn set_alignment(&mut self, columns: &str) -> TableResult<()> {
        let alignment = columns
            .chars()
            .filter(|c| !c.is_whitespace())
            .map(|c| {
                Alignment::from_char(c).ok_or_else(|| {
                    TableError::invalid(format!("unknown alignment '{}' in '{}'", c, columns))
                })
            })
            .collect::<TableResult<Vec<_>>>()?;

        if alignment.len() != self.ncols {
            return Err(TableError::invalid(format!(
                "alignment '{}' has {} columns, table has {}",
                columns,
                alignment.len(),
                self.ncols
            )));
        }
        self.style.set_alignment(alignment);
        Ok(())
    }

    /// Set a table-level property by key
    pub fn set_property(&mut self, key: &str, value: &str) -> TableResult<()> {
        match key.trim().to_lowercase().as_str() {
            "caption" => self.add_table_caption(value),
            "label" => self.add_table_label(value),
            "alignment" => self.set_alignment(value)?,
            "style" | "lines" => self.update_style(value)?,
            other => {
                return Err(TableError::invalid(format!(
                    "unknown table property '{}'",
                    other
                )))
            }
        }
        Ok(())
    }

    /// Set a design property of one cell by key
    pub fn set_cell_property(
        &mut self,
        row: usize,
        col: usize,
        key: &str,
        value: &str,
    ) -> TableResult<()> {
        let property = CellProperty::parse(key, value)?;
        self.cell_mut(row, col)
            .ok_or_else(|| TableError::cell_not_found(row, col))?
            .set_property(property);
        Ok(())
    }

    /// Remove a data row, rebuilding the grid without it
    ///
    /// The header can only go once it is the last row left.
    pub fn delete_row(&mut self, row: usize) -> TableResult<()> {
        if row >= self.nrows {
            return Err(TableError::row_not_found(row, self.nrows));
        }
        if row == 0 && self.nrows > 1 {
            return Err(TableError::invalid(
                "the header row can only be deleted from a table without data rows",
            ));
        }
        self.rebuild_without(Line::Row(row));
        self.style.remove_row(row);
        self.nrows -= 1;
        Ok(())
    }

    /// Remove a column, rebuilding the grid without it
    pub fn delete_column(&mut self, col: usize) -> TableResult<()> {
        if col >= self.ncols {
            return Err(TableError::column_not_found(col, self.ncols));
        }
        self.rebuild_without(Line::Column(col));
        self.style.remove_column(col);
        self.ncols -= 1;
        Ok(())
    }

    /// Spans crossing the removed line are dissolved, the others are moved
    /// along with their cells.
    fn rebuild_without(&mut self, line: Line) {
        let broken: Vec<(usize, usize)> = self
            .cells
            .iter()
            .filter(|c| !c.is_blank() && (c.is_multirow() || c.is_multicol()) && line.cuts(c))
            .map(|c| (c.row(), c.col()))
            .collect();

        debug!(?line, dissolved = broken.len(), "rebuilding grid");

        let old = std::mem::take(&mut self.cells);
        for mut cell in old {
            let Some((row, col)) = line.remap((cell.row(), cell.col())) else {
                continue;
            };

            let origin = cell.span_origin();
            if broken.contains(&(cell.row(), cell.col()))
                || origin.is_some_and(|o| broken.contains(&o))
            {
                cell.reset_span();
            } else if let Some(o) = origin {
                match line.remap(o) {
                    Some(moved) => cell.mark_blank(moved),
                    None => cell.reset_span(),
                }
            }

            cell.move_to(row, col);
            self.cells.push(cell);
        }
    }
}
