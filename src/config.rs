//! TOML table configuration
//!
//! ```toml
//! style = "MNRAS"
//! decimal_places = 3
//! caption = "Fitted parameters"
//! label = "tab:fit"
//! alignment = "lcc"
//! hlines = [3]
//! ```

use std::fs;
use std::path::Path;

use serde::Deserialize;

use crate::core::table::Table;
use crate::utils::error::{TableError, TableResult};

/// Rendering settings applied to a table after it is built
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct TableConfig {
    /// Style name (`"T"`, `"A"`, `"MNRAS"`, `"NoLines"`, `"A&A"`)
    pub style: Option<String>,
    pub decimal_places: Option<i32>,
    pub caption: Option<String>,
    pub label: Option<String>,
    /// One of `l`, `c`, `r` per column
    pub alignment: Option<String>,
    /// Extra vertical rule positions
    pub vlines: Vec<usize>,
    /// Extra horizontal rule positions
    pub hlines: Vec<usize>,
}

impl TableConfig {
    pub fn from_toml_str(input: &str) -> TableResult<Self> {
        toml::from_str(input).map_err(|e| TableError::config(e.to_string()))
    }

    pub fn load(path: impl AsRef<Path>) -> TableResult<Self> {
        let input = fs::read_to_string(path)?;
        Self::from_toml_str(&input)
    }

    /// Layer `other` on top of `self`; set values win, rule lists add up
    pub fn merge(mut self, other: TableConfig) -> TableConfig {
        self.style = other.style.or(self.style);
        self.decimal_places = other.decimal_places.or(self.decimal_places);
        self.caption = other.caption.or(self.caption);
        self.label = other.label.or(self.label);
        self.alignment = other.alignment.or(self.alignment);
        self.vlines.extend(other.vlines);
        self.hlines.extend(other.hlines);
        self
    }

    /// Apply to a table
    ///
    /// The style goes first, since switching styles drops added rules.
    pub fn apply(&self, table: &mut Table) -> TableResult<()> {
        if let Some(ref style) = self.style {
            table.update_style(style)?;
        }
        if let Some(places) = self.decimal_places {
            table.set_decimal_places(places)?;
        }
        if let Some(ref caption) = self.caption {
            table.add_table_caption(caption.as_str());
        }
        if let Some(ref label) = self.label {
            table.add_table_label(label.as_str());
        }
        if let Some(ref alignment) = self.alignment {
            table.set_alignment(alignment)?;
        }
        for &col in &self.vlines {
            table.add_vline(col);
        }
        for &row in &self.hlines {
            table.add_hline(row);
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::table::StyleKind;

    #[test]
    fn test_parse_full_config() {
        let config = TableConfig::from_toml_str(
            r#"
            style = "MNRAS"
            decimal_places = 3
            caption = "Fitted parameters"
            alignment = "lc"
            hlines = [2, 2]
            "#,
        )
        .unwrap();
        assert_eq!(config.style.as_deref(), Some("MNRAS"));
        assert_eq!(config.decimal_places, Some(3));
        assert_eq!(config.hlines, vec![2, 2]);
        assert!(config.vlines.is_empty());
    }

    #[test]
    fn test_unknown_key_rejected() {
        let err = TableConfig::from_toml_str("colour = \"red\"").unwrap_err();
        assert!(matches!(err, TableError::Config { .. }));
    }

    #[test]
    fn test_merge_prefers_override() {
        let base = TableConfig {
            style: Some("A".to_string()),
            caption: Some("base".to_string()),
            hlines: vec![1],
            ..Default::default()
        };
        let over = TableConfig {
            style: Some("T".to_string()),
            hlines: vec![2],
            ..Default::default()
        };
        let merged = base.merge(over);
        assert_eq!(merged.style.as_deref(), Some("T"));
        assert_eq!(merged.caption.as_deref(), Some("base"));
        assert_eq!(merged.hlines, vec![1, 2]);
    }

    #[test]
    fn test_apply_keeps_rules_after_style_switch() {
        let mut table = Table::new(["a", "b"]);
        table.add_row([1, 2]);
        let config = TableConfig {
            style: Some("NoLines".to_string()),
            decimal_places: Some(0),
            vlines: vec![1],
            ..Default::default()
        };
        config.apply(&mut table).unwrap();

        assert_eq!(table.style().kind(), StyleKind::NoRule);
        assert_eq!(table.decimal_places(), Some(0));
        assert!(table.to_string().contains('|'));
    }

    #[test]
    fn test_apply_rejects_negative_decimals() {
        let mut table = Table::new(["a"]);
        let config = TableConfig {
            decimal_places: Some(-2),
            ..Default::default()
        };
        assert!(matches!(
            config.apply(&mut table),
            Err(TableError::InvalidArgument { .. })
        ));
    }
}
