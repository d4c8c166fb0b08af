//! Cell types and alignment for table rendering

use std::fmt;

use crate::utils::error::{TableError, TableResult};

/// Column alignment options for the tabular specification
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Alignment {
    Left,
    #[default]
    Center,
    Right,
}

impl Alignment {
    /// Convert to LaTeX column specification character
    pub fn to_char(&self) -> char {
        match self {
            Alignment::Left => 'l',
            Alignment::Center => 'c',
            Alignment::Right => 'r',
        }
    }

    /// Parse from a LaTeX column specification character
    pub fn from_char(c: char) -> Option<Self> {
        match c {
            'l' => Some(Alignment::Left),
            'c' => Some(Alignment::Center),
            'r' => Some(Alignment::Right),
            _ => None,
        }
    }
}

/// The value held by a cell
#[derive(Debug, Clone, PartialEq)]
pub enum CellContent {
    Text(String),
    Integer(i64),
    Real(f64),
}

impl CellContent {
    pub fn is_numeric(&self) -> bool {
        matches!(self, CellContent::Integer(_) | CellContent::Real(_))
    }

    /// Format the value, rounding numbers to `decimal_places` fractional digits
    pub fn format(&self, decimal_places: Option<usize>) -> String {
        match (self, decimal_places) {
            (CellContent::Integer(i), Some(0)) => i.to_string(),
            (CellContent::Integer(i), Some(places)) => format!("{}.{}", i, "0".repeat(places)),
            (CellContent::Real(v), Some(places)) => format!("{:.*}", places, v),
            _ => self.to_string(),
        }
    }
}

impl fmt::Display for CellContent {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            CellContent::Text(s) => f.write_str(s),
            CellContent::Integer(i) => write!(f, "{}", i),
            CellContent::Real(v) => write!(f, "{}", v),
        }
    }
}

impl Default for CellContent {
    fn default() -> Self {
        CellContent::Text(String::new())
    }
}

impl From<&str> for CellContent {
    fn from(value: &str) -> Self {
        CellContent::Text(value.to_string())
    }
}

impl From<String> for CellContent {
    fn from(value: String) -> Self {
        CellContent::Text(value)
    }
}

impl From<&String> for CellContent {
    fn from(value: &String) -> Self {
        CellContent::Text(value.clone())
    }
}

macro_rules! impl_from_integer {
    ($($ty:ty),*) => {
        $(
            impl From<$ty> for CellContent {
                fn from(value: $ty) -> Self {
                    CellContent::Integer(value as i64)
                }
            }
        )*
    };
}

impl_from_integer!(i8, i16, i32, i64, u8, u16, u32);

macro_rules! impl_from_wide_integer {
    ($($ty:ty),*) => {
        $(
            /// Values beyond the `i64` range saturate
            impl From<$ty> for CellContent {
                fn from(value: $ty) -> Self {
                    CellContent::Integer(i64::try_from(value).unwrap_or(if value > 0 {
                        i64::MAX
                    } else {
                        i64::MIN
                    }))
                }
            }
        )*
    };
}

impl_from_wide_integer!(u64, usize, isize);

impl From<f32> for CellContent {
    fn from(value: f32) -> Self {
        CellContent::Real(value as f64)
    }
}

impl From<f64> for CellContent {
    fn from(value: f64) -> Self {
        CellContent::Real(value)
    }
}

/// Per-cell design properties
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct CellDesign {
    /// LaTeX color name applied with `\textcolor`
    pub color: Option<String>,
    pub border_left: bool,
    pub border_right: bool,
}

/// A single design property update, parsed from a key/value pair
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum CellProperty {
    Color(Option<String>),
    BorderLeft(bool),
    BorderRight(bool),
}

impl CellProperty {
    /// Parse a property from its key and textual value
    ///
    /// An empty color value clears the color.
    pub fn parse(key: &str, value: &str) -> TableResult<Self> {
        match key.trim().to_lowercase().as_str() {
            "color" => {
                let value = value.trim();
                if value.is_empty() {
                    Ok(CellProperty::Color(None))
                } else {
                    Ok(CellProperty::Color(Some(value.to_string())))
                }
            }
            "border_left" => Ok(CellProperty::BorderLeft(parse_flag(key, value)?)),
            "border_right" => Ok(CellProperty::BorderRight(parse_flag(key, value)?)),
            other => Err(TableError::invalid(format!(
                "unknown cell property '{}'",
                other
            ))),
        }
    }
}

fn parse_flag(key: &str, value: &str) -> TableResult<bool> {
    match value.trim().to_lowercase().as_str() {
        "true" | "yes" | "1" => Ok(true),
        "false" | "no" | "0" => Ok(false),
        _ => Err(TableError::invalid(format!(
            "property '{}' expects a boolean, got '{}'",
            key, value
        ))),
    }
}

/// Atomic grid unit: content, span, position and formatting
#[derive(Debug, Clone, PartialEq)]
pub struct Cell {
    content: CellContent,
    row: usize,
    col: usize,
    row_span: usize,
    col_span: usize,
    is_blank: bool,
    /// Origin of the span covering this cell, set only for blank cells
    span_origin: Option<(usize, usize)>,
    decimal_places: Option<usize>,
    design: CellDesign,
}

impl Cell {
    /// Create a new single-span cell at `(row, col)`
    pub fn new(content: impl Into<CellContent>, row: usize, col: usize) -> Self {
        Cell {
            content: content.into(),
            row,
            col,
            row_span: 1,
            col_span: 1,
            is_blank: false,
            span_origin: None,
            decimal_places: None,
            design: CellDesign::default(),
        }
    }

    pub fn content(&self) -> &CellContent {
        &self.content
    }

    pub fn set_content(&mut self, content: impl Into<CellContent>) {
        self.content = content.into();
    }

    pub fn row(&self) -> usize {
        self.row
    }

    pub fn col(&self) -> usize {
        self.col
    }

    pub fn row_span(&self) -> usize {
        self.row_span
    }

    pub fn col_span(&self) -> usize {
        self.col_span
    }

    pub fn is_multirow(&self) -> bool {
        self.row_span > 1
    }

    pub fn is_multicol(&self) -> bool {
        self.col_span > 1
    }

    pub fn is_blank(&self) -> bool {
        self.is_blank
    }

    pub fn span_origin(&self) -> Option<(usize, usize)> {
        self.span_origin
    }

    /// Blank because a span from an earlier row covers it
    pub fn is_row_covered(&self) -> bool {
        matches!(self.span_origin, Some((r, _)) if self.is_blank && r < self.row)
    }

    /// Blank because a span from an earlier column covers it
    pub fn is_col_covered(&self) -> bool {
        matches!(self.span_origin, Some((_, c)) if self.is_blank && c < self.col)
    }

    pub fn decimal_places(&self) -> Option<usize> {
        self.decimal_places
    }

    /// Affects subsequent renders only
    pub fn set_decimal_places(&mut self, places: Option<usize>) {
        self.decimal_places = places;
    }

    pub fn design(&self) -> &CellDesign {
        &self.design
    }

    pub fn set_property(&mut self, property: CellProperty) {
        match property {
            CellProperty::Color(color) => self.design.color = color,
            CellProperty::BorderLeft(flag) => self.design.border_left = flag,
            CellProperty::BorderRight(flag) => self.design.border_right = flag,
        }
    }

    pub fn set_row_span(&mut self, span: usize) {
        self.row_span = span.max(1);
    }

    pub fn set_col_span(&mut self, span: usize) {
        self.col_span = span.max(1);
    }

    /// Mark this cell as covered by the span starting at `origin`
    pub fn mark_blank(&mut self, origin: (usize, usize)) {
        self.is_blank = true;
        self.span_origin = Some(origin);
        self.row_span = 1;
        self.col_span = 1;
    }

    /// Drop any span bookkeeping, turning the cell back into a plain cell
    pub(crate) fn reset_span(&mut self) {
        self.is_blank = false;
        self.span_origin = None;
        self.row_span = 1;
        self.col_span = 1;
    }

    pub(crate) fn move_to(&mut self, row: usize, col: usize) {
        self.row = row;
        self.col = col;
    }

    /// Plain-text rendering of this cell
    pub fn render_text(&self) -> String {
        if self.is_blank {
            return String::new();
        }
        self.content.format(self.decimal_places)
    }

    /// LaTeX rendering of this cell
    ///
    /// `origin` is the span origin covering this cell, when it is blank.
    pub fn render_latex(&self, origin: Option<&Cell>) -> String {
        if self.is_blank {
            return match origin {
                Some(o)
                    if o.row < self.row
                        && o.col == self.col
                        && o.is_multirow()
                        && o.is_multicol() =>
                {
                    format!("\\multicolumn{{{}}}{{c}}{{}}", o.col_span)
                }
                _ => String::new(),
            };
        }

        let mut content = self.content.format(self.decimal_places);

        if let Some(ref color) = self.design.color {
            content = format!("\\textcolor{{{}}}{{{}}}", color, content);
        }

        // Build the inner content (potentially wrapped in \multirow)
        let inner = if self.is_multirow() {
            format!("\\multirow{{{}}}{{*}}{{{}}}", self.row_span, content)
        } else {
            content
        };

        // Wrap in \multicolumn if spanning or carrying its own borders
        if self.is_multicol() || self.design.border_left || self.design.border_right {
            let left = if self.design.border_left { "|" } else { "" };
            let right = if self.design.border_right { "|" } else { "" };
            format!(
                "\\multicolumn{{{}}}{{{}c{}}}{{{}}}",
                self.col_span, left, right, inner
            )
        } else {
            inner
        }
    }
}

impl fmt::Display for Cell {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.render_text())
    }
}
