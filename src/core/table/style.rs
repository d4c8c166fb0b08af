//! Rule placement policies
//!
//! A [`Style`] answers where vertical and horizontal rules go for a given
//! table shape, for both the plain-text and the LaTeX renderer. The five
//! variants only differ in their default rule positions; the separator
//! algorithms are shared.
//!
//! Rule positions are boundary indices. Vertical position `c` is the boundary
//! immediately before column `c` (`cols` closes the row), horizontal position
//! `r` is the boundary immediately above rendered row `r` (`rows` closes the
//! table). Horizontal positions form a multiset: a position listed twice is
//! drawn twice.

use std::fmt;
use std::str::FromStr;

use super::cell::{Alignment, Cell};
use crate::utils::error::{TableError, TableResult};

/// Output format of a render pass
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum OutputFormat {
    #[default]
    Text,
    Latex,
}

/// The built-in rule conventions
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum StyleKind {
    /// Rules on every column and row boundary (`"A"`)
    LinesAlways,
    /// A single rule after the first column and after the header (`"T"`)
    TopRule,
    /// Rules bracketing the header row only (`"MNRAS"`)
    MinimalRule,
    /// No rules at all (`"NoLines"`)
    NoRule,
    /// Astronomy & Astrophysics journal layout (`"A&A"`)
    #[default]
    Journal,
}

impl StyleKind {
    pub const ALL: [StyleKind; 5] = [
        StyleKind::LinesAlways,
        StyleKind::TopRule,
        StyleKind::MinimalRule,
        StyleKind::NoRule,
        StyleKind::Journal,
    ];

    /// The short name used to select this style
    pub fn name(&self) -> &'static str {
        match self {
            StyleKind::LinesAlways => "A",
            StyleKind::TopRule => "T",
            StyleKind::MinimalRule => "MNRAS",
            StyleKind::NoRule => "NoLines",
            StyleKind::Journal => "A&A",
        }
    }

    fn default_vlines(&self, cols: usize) -> Vec<usize> {
        match self {
            StyleKind::LinesAlways => (0..=cols).collect(),
            StyleKind::TopRule => vec![1],
            StyleKind::MinimalRule | StyleKind::NoRule | StyleKind::Journal => Vec::new(),
        }
    }

    fn default_hlines(&self, rows: usize) -> Vec<usize> {
        match self {
            StyleKind::LinesAlways => (0..=rows).collect(),
            StyleKind::TopRule => vec![1],
            StyleKind::MinimalRule => vec![0, 1],
            StyleKind::NoRule => Vec::new(),
            StyleKind::Journal => vec![0, 0, 1, rows],
        }
    }
}

impl FromStr for StyleKind {
    type Err = TableError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        StyleKind::ALL
            .into_iter()
            .find(|kind| kind.name() == s.trim())
            .ok_or_else(|| {
                TableError::invalid(format!(
                    "unknown table style '{}' (expected one of T, A, MNRAS, NoLines, A&A)",
                    s
                ))
            })
    }
}

impl fmt::Display for StyleKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

/// Rule policy plus LaTeX float properties for one table
#[derive(Debug, Clone, PartialEq)]
pub struct Style {
    kind: StyleKind,
    extra_vlines: Vec<usize>,
    extra_hlines: Vec<usize>,
    caption: Option<String>,
    label: Option<String>,
    alignment: Vec<Alignment>,
    /// `(rows, cols)` of the current render pass
    shape: (usize, usize),
}

impl Style {
    pub fn new(kind: StyleKind) -> Self {
        Style {
            kind,
            extra_vlines: Vec::new(),
            extra_hlines: Vec::new(),
            caption: None,
            label: None,
            alignment: Vec::new(),
            shape: (0, 0),
        }
    }

    /// Switch to another rule convention
    ///
    /// User-added rules are dropped; caption, label and alignment carry over.
    pub fn with_kind(&self, kind: StyleKind) -> Self {
        Style {
            kind,
            extra_vlines: Vec::new(),
            extra_hlines: Vec::new(),
            caption: self.caption.clone(),
            label: self.label.clone(),
            alignment: self.alignment.clone(),
            shape: self.shape,
        }
    }

    pub fn kind(&self) -> StyleKind {
        self.kind
    }

    /// Record the shape of the upcoming render pass
    pub fn set_size(&mut self, rows: usize, cols: usize) {
        self.shape = (rows, cols);
    }

    pub fn shape(&self) -> (usize, usize) {
        self.shape
    }

    pub fn add_vline(&mut self, col: usize) {
        self.extra_vlines.push(col);
    }

    pub fn add_hline(&mut self, row: usize) {
        self.extra_hlines.push(row);
    }

    /// Forget column `col`: its alignment and the rule before it go, later
    /// rules shift left
    pub fn remove_column(&mut self, col: usize) {
        if col < self.alignment.len() {
            self.alignment.remove(col);
        }
        shift_positions(&mut self.extra_vlines, col);
    }

    /// Forget row `row`: the rule above it goes, later rules shift up
    pub fn remove_row(&mut self, row: usize) {
        shift_positions(&mut self.extra_hlines, row);
    }

    pub fn caption(&self) -> Option<&str> {
        self.caption.as_deref()
    }

    pub fn set_caption(&mut self, caption: impl Into<String>) {
        self.caption = Some(caption.into());
    }

    pub fn label(&self) -> Option<&str> {
        self.label.as_deref()
    }

    pub fn set_label(&mut self, label: impl Into<String>) {
        self.label = Some(label.into());
    }

    pub fn set_alignment(&mut self, alignment: Vec<Alignment>) {
        self.alignment = alignment;
    }

    /// Alignment of column `col`, centered unless set otherwise
    pub fn alignment_for(&self, col: usize) -> Alignment {
        self.alignment.get(col).copied().unwrap_or_default()
    }

    /// All vertical rule positions for the current shape
    pub fn vlines(&self) -> Vec<usize> {
        let mut out = self.kind.default_vlines(self.shape.1);
        out.extend(self.extra_vlines.iter().copied());
        out
    }

    /// All horizontal rule positions for the current shape, duplicates kept
    pub fn hlines(&self) -> Vec<usize> {
        let mut out = self.kind.default_hlines(self.shape.0);
        out.extend(self.extra_hlines.iter().copied());
        out
    }

    pub fn is_vline(&self, col: usize) -> bool {
        self.vlines().contains(&col)
    }

    fn hline_count(&self, row: usize) -> usize {
        self.hlines().iter().filter(|&&r| r == row).count()
    }

    /// How many times the rule above `row` was requested
    ///
    /// The count is 1 when the rule is not stacked.
    pub fn duplicate_row_check(&self, row: usize) -> (bool, usize) {
        let count = self.hline_count(row);
        (count > 1, count.max(1))
    }

    /// Token placed immediately before the cell at `(row, col)`
    ///
    /// Called once more per row with `col == cols` and `cell == None` to
    /// close the row; `prev` is the cell to the left of the boundary.
    pub fn column_separator(
        &self,
        row: usize,
        col: usize,
        cell: Option<&Cell>,
        prev: Option<&Cell>,
        format: OutputFormat,
    ) -> String {
        let cols = self.shape.1;
        match format {
            OutputFormat::Text => {
                if cell.is_some_and(|c| c.is_col_covered()) {
                    return " ".to_string();
                }
                let bordered = cell.is_some_and(|c| c.design().border_left)
                    || prev.is_some_and(|p| !p.is_blank() && p.design().border_right);
                if self.is_vline(col) || bordered {
                    "|".to_string()
                } else {
                    " ".to_string()
                }
            }
            OutputFormat::Latex => {
                if col == cols {
                    let mut out = String::from("\\\\");
                    for _ in 0..self.hline_count(row + 1) {
                        out.push_str(" \\hline");
                    }
                    out
                } else if col == 0 || cell.is_some_and(|c| c.is_col_covered()) {
                    String::new()
                } else {
                    "&".to_string()
                }
            }
        }
    }

    /// Horizontal rule fragment above `row` for column `col`
    ///
    /// `cell` is the cell just below the rule. With `col == cols` only the
    /// closing junction is returned.
    pub fn row_separator(
        &self,
        row: usize,
        col: usize,
        col_width: usize,
        cell: Option<&Cell>,
        format: OutputFormat,
    ) -> String {
        if format != OutputFormat::Text || !self.hlines().contains(&row) {
            return String::new();
        }

        let (rows, cols) = self.shape;
        let junction = if self.is_vline(col) { '+' } else { '-' };
        if col >= cols {
            return junction.to_string();
        }

        let through_span = row != rows && cell.is_some_and(|c| c.is_row_covered());
        let fill = if through_span { ' ' } else { '-' };

        let mut out = String::with_capacity(col_width + 1);
        out.push(junction);
        out.extend(std::iter::repeat(fill).take(col_width));
        out
    }

    /// Build the column specification string (e.g. `"|c|c|"`)
    fn build_column_spec(&self) -> String {
        let cols = self.shape.1;
        let vlines = self.vlines();
        let mut spec = String::new();

        for col in 0..=cols {
            if vlines.contains(&col) {
                spec.push('|');
            }
            if col < cols {
                spec.push(self.alignment_for(col).to_char());
            }
        }
        spec
    }

    /// LaTeX preamble: table float, caption, label, tabular and top rules
    pub fn tex_header(&self) -> String {
        let mut lines = vec!["\\begin{table}".to_string(), "\\centering".to_string()];

        if let Some(ref caption) = self.caption {
            lines.push(format!("\\caption{{{}}}", caption));
        }
        if let Some(ref label) = self.label {
            lines.push(format!("\\label{{{}}}", label));
        }

        lines.push(format!("\\begin{{tabular}}{{{}}}", self.build_column_spec()));

        let top_rules = self.hline_count(0);
        if top_rules > 0 {
            lines.push("\\hline".repeat(top_rules));
        }

        lines.join("\n")
    }

    pub fn tex_footer(&self) -> String {
        "\\end{tabular}\n\\end{table}".to_string()
    }
}

/// Drop positions equal to `removed` and move later ones down by one
fn shift_positions(positions: &mut Vec<usize>, removed: usize) {
    positions.retain(|&p| p != removed);
    for p in positions.iter_mut() {
        if *p > removed {
            *p -= 1;
        }
    }
}

impl Default for Style {
    fn default() -> Self {
        Self::new(StyleKind::default())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sized(kind: StyleKind, rows: usize, cols: usize) -> Style {
        let mut style = Style::new(kind);
        style.set_size(rows, cols);
        style
    }

    #[test]
    fn test_parse_names() {
        assert_eq!("A".parse::<StyleKind>().unwrap(), StyleKind::LinesAlways);
        assert_eq!("T".parse::<StyleKind>().unwrap(), StyleKind::TopRule);
        assert_eq!("MNRAS".parse::<StyleKind>().unwrap(), StyleKind::MinimalRule);
        assert_eq!("NoLines".parse::<StyleKind>().unwrap(), StyleKind::NoRule);
        assert_eq!("A&A".parse::<StyleKind>().unwrap(), StyleKind::Journal);
        assert!(matches!(
            "booktabs".parse::<StyleKind>(),
            Err(TableError::InvalidArgument { .. })
        ));
    }

    #[test]
    fn test_default_positions() {
        let style = sized(StyleKind::LinesAlways, 3, 2);
        assert_eq!(style.vlines(), vec![0, 1, 2]);
        assert_eq!(style.hlines(), vec![0, 1, 2, 3]);

        let style = sized(StyleKind::Journal, 4, 5);
        assert!(style.vlines().is_empty());
        assert_eq!(style.hlines(), vec![0, 0, 1, 4]);

        let style = sized(StyleKind::NoRule, 4, 5);
        assert!(style.vlines().is_empty());
        assert!(style.hlines().is_empty());
    }

    #[test]
    fn test_duplicate_row_check() {
        let mut style = sized(StyleKind::Journal, 3, 2);
        assert_eq!(style.duplicate_row_check(0), (true, 2));
        assert_eq!(style.duplicate_row_check(1), (false, 1));
        assert_eq!(style.duplicate_row_check(2), (false, 1));

        style.add_hline(1);
        style.add_hline(1);
        assert_eq!(style.duplicate_row_check(1), (true, 3));
    }

    #[test]
    fn test_text_column_separator() {
        let style = sized(StyleKind::TopRule, 2, 3);
        let cell = Cell::new("x", 0, 0);
        assert_eq!(style.column_separator(0, 0, Some(&cell), None, OutputFormat::Text), " ");
        assert_eq!(style.column_separator(0, 1, Some(&cell), None, OutputFormat::Text), "|");
        assert_eq!(style.column_separator(0, 3, None, Some(&cell), OutputFormat::Text), " ");
    }

    #[test]
    fn test_text_separator_suppressed_inside_span() {
        let style = sized(StyleKind::LinesAlways, 2, 3);
        let mut covered = Cell::new("", 1, 1);
        covered.mark_blank((1, 0));
        assert_eq!(
            style.column_separator(1, 1, Some(&covered), None, OutputFormat::Text),
            " "
        );
    }

    #[test]
    fn test_latex_column_separator() {
        let style = sized(StyleKind::Journal, 3, 2);
        let cell = Cell::new("x", 0, 1);
        assert_eq!(style.column_separator(0, 0, Some(&cell), None, OutputFormat::Latex), "");
        assert_eq!(style.column_separator(0, 1, Some(&cell), None, OutputFormat::Latex), "&");
        assert_eq!(
            style.column_separator(0, 2, None, Some(&cell), OutputFormat::Latex),
            "\\\\ \\hline"
        );
        assert_eq!(style.column_separator(1, 2, None, None, OutputFormat::Latex), "\\\\");
        assert_eq!(
            style.column_separator(2, 2, None, None, OutputFormat::Latex),
            "\\\\ \\hline"
        );
    }

    #[test]
    fn test_row_separator_spaces_under_row_span() {
        let style = sized(StyleKind::LinesAlways, 3, 2);
        let mut covered = Cell::new("", 2, 0);
        covered.mark_blank((1, 0));
        assert_eq!(
            style.row_separator(2, 0, 4, Some(&covered), OutputFormat::Text),
            "+    "
        );
        let plain = Cell::new("y", 2, 1);
        assert_eq!(style.row_separator(2, 1, 4, Some(&plain), OutputFormat::Text), "+----");
        assert_eq!(style.row_separator(2, 2, 0, None, OutputFormat::Text), "+");
        // Final boundary is always a full rule
        assert_eq!(style.row_separator(3, 0, 4, Some(&covered), OutputFormat::Text), "+----");
    }

    #[test]
    fn test_row_separator_only_in_text() {
        let style = sized(StyleKind::LinesAlways, 3, 2);
        assert_eq!(style.row_separator(0, 0, 4, None, OutputFormat::Latex), "");
        let style = sized(StyleKind::NoRule, 3, 2);
        assert_eq!(style.row_separator(0, 0, 4, None, OutputFormat::Text), "");
    }

    #[test]
    fn test_tex_header() {
        let mut style = sized(StyleKind::LinesAlways, 2, 3);
        style.set_caption("Results");
        style.set_label("tab:results");
        style.set_alignment(vec![Alignment::Left]);
        let header = style.tex_header();
        assert_eq!(
            header,
            "\\begin{table}\n\\centering\n\\caption{Results}\n\\label{tab:results}\n\\begin{tabular}{|l|c|c|}\n\\hline"
        );
        assert_eq!(style.tex_footer(), "\\end{tabular}\n\\end{table}");
    }

    #[test]
    fn test_journal_header_double_rule() {
        let style = sized(StyleKind::Journal, 2, 5);
        assert!(style.tex_header().ends_with("\\begin{tabular}{ccccc}\n\\hline\\hline"));
    }

    #[test]
    fn test_with_kind_keeps_properties() {
        let mut style = sized(StyleKind::Journal, 2, 2);
        style.set_caption("c");
        style.add_vline(1);
        let switched = style.with_kind(StyleKind::NoRule);
        assert_eq!(switched.caption(), Some("c"));
        assert!(switched.vlines().is_empty());
    }

    #[test]
    fn test_remove_column_shifts_rules_and_alignment() {
        let mut style = sized(StyleKind::NoRule, 2, 3);
        style.set_alignment(vec![Alignment::Left, Alignment::Center, Alignment::Right]);
        style.add_vline(0);
        style.add_vline(2);
        style.remove_column(0);
        style.set_size(2, 2);

        assert_eq!(style.alignment_for(0), Alignment::Center);
        assert_eq!(style.alignment_for(1), Alignment::Right);
        assert_eq!(style.vlines(), vec![1]);
    }

    #[test]
    fn test_remove_row_shifts_hlines() {
        let mut style = sized(StyleKind::NoRule, 4, 2);
        style.add_hline(1);
        style.add_hline(3);
        style.add_hline(3);
        style.remove_row(1);
        style.set_size(3, 2);
        assert_eq!(style.hlines(), vec![2, 2]);
    }
}
