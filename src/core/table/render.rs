//! Two-pass rendering shared by the text and LaTeX outputs

use std::fmt;
use std::path::Path;

use tracing::debug;

use super::grid::Table;
use super::style::{OutputFormat, Style};
use crate::utils::error::TableResult;
use crate::utils::sink::{FileSink, TableSink, WriteOptions};

/// Centre `text` in `width` columns, the odd space going left
fn center(text: &str, width: usize) -> String {
    let len = text.chars().count();
    if len >= width {
        return text.to_string();
    }
    let pad = width - len;
    let right = pad / 2;
    let left = pad - right;
    format!("{}{}{}", " ".repeat(left), text, " ".repeat(right))
}

impl Table {
    /// Width of each column: longest rendered text, rounded up to even, plus
    /// two characters of padding
    pub fn compute_column_widths(&self) -> Vec<usize> {
        (0..self.ncols)
            .map(|col| {
                let longest = self
                    .cells
                    .iter()
                    .skip(col)
                    .step_by(self.ncols)
                    .map(|cell| cell.render_text().chars().count())
                    .max()
                    .unwrap_or(0);
                longest + longest % 2 + 2
            })
            .collect()
    }

    /// Render rows `skip_rows..` in the given format, one line per row and
    /// per horizontal rule
    pub fn render(&self, format: OutputFormat, skip_rows: usize) -> String {
        let widths = self.compute_column_widths();
        let rows = self.nrows.saturating_sub(skip_rows);

        let mut style = self.style.clone();
        style.set_size(rows, self.ncols);
        debug!(?format, rows, cols = self.ncols, style = %style.kind(), "render pass");

        let mut lines: Vec<String> = Vec::with_capacity(rows * 2 + 1);

        for row in skip_rows..self.nrows {
            let local = row - skip_rows;
            self.push_rules(&mut lines, &style, local, Some(row), &widths, format);

            let mut line = String::new();
            for (col, &width) in widths.iter().enumerate() {
                let cell = &self.cells[row * self.ncols + col];
                let prev = col.checked_sub(1).and_then(|c| self.cell(row, c));
                line.push_str(&style.column_separator(local, col, Some(cell), prev, format));

                let content = match format {
                    OutputFormat::Text => cell.render_text(),
                    OutputFormat::Latex => cell.render_latex(self.origin_of(cell)),
                };
                line.push_str(&center(&content, width));
            }

            let last = self.ncols.checked_sub(1).and_then(|c| self.cell(row, c));
            line.push_str(&style.column_separator(local, self.ncols, None, last, format));
            lines.push(line);
        }

        // Closing boundary below the last rendered row
        self.push_rules(&mut lines, &style, rows, None, &widths, format);

        lines.retain(|line| !line.is_empty());
        lines.join("\n")
    }

    /// Append the rule above rendered row `local`, stacked as many times as
    /// it was requested
    fn push_rules(
        &self,
        lines: &mut Vec<String>,
        style: &Style,
        local: usize,
        row: Option<usize>,
        widths: &[usize],
        format: OutputFormat,
    ) {
        let below = |col: usize| row.and_then(|r| self.cell(r, col));

        let mut rule: String = widths
            .iter()
            .enumerate()
            .map(|(col, &width)| style.row_separator(local, col, width, below(col), format))
            .collect();
        if rule.is_empty() {
            return;
        }
        rule.push_str(&style.row_separator(local, self.ncols, 0, None, format));

        let (_, count) = style.duplicate_row_check(local);
        for _ in 0..count {
            lines.push(rule.clone());
        }
    }

    /// The complete `table` float: preamble, tabular body and closing markup
    pub fn build_latex(&self) -> String {
        let mut style = self.style.clone();
        style.set_size(self.nrows, self.ncols);

        let parts = [
            style.tex_header(),
            self.render(OutputFormat::Latex, 0),
            style.tex_footer(),
        ];
        parts
            .iter()
            .filter(|part| !part.is_empty())
            .map(String::as_str)
            .collect::<Vec<_>>()
            .join("\n")
    }

    /// The block written by [`Table::write_to`], `None` when nothing is
    /// selected
    pub fn to_output(&self, options: &WriteOptions) -> Option<String> {
        let mut parts = Vec::new();
        if options.write_table {
            parts.push(self.render(OutputFormat::Text, 0));
        }
        if options.write_latex {
            parts.push(self.build_latex());
        }
        if parts.is_empty() {
            return None;
        }
        let mut out = parts.join("\n");
        out.push('\n');
        Some(out)
    }

    /// Write the text and/or LaTeX renderings to a sink
    pub fn write_to<S: TableSink>(&self, sink: &mut S, options: &WriteOptions) -> TableResult<()> {
        match self.to_output(options) {
            Some(content) => sink.write(&content, options.mode),
            None => {
                debug!("nothing selected for output, skipping write");
                Ok(())
            }
        }
    }

    /// Write the text and/or LaTeX renderings to a file
    pub fn write_to_file(&self, path: impl AsRef<Path>, options: &WriteOptions) -> TableResult<()> {
        let mut sink = FileSink::new(path);
        self.write_to(&mut sink, options)
    }
}

impl fmt::Display for Table {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.render(OutputFormat::Text, 0))
    }
}
