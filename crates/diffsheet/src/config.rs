//! Report configuration
//!
//! All rows and columns are 0-based: row 1 is the header row of a file
//! sheet, so `first_content_row` defaults to 1.

use std::path::Path;

use diffsheet_core::Color;
use diffsheet_html::HtmlReadOptions;
use serde::{Deserialize, Serialize};

use crate::error::{ReportError, ReportResult};

/// Folder names that never start a file name in an encoded report stem
pub const DEFAULT_FOLDER_KEYWORDS: &[&str] = &[
    "modules", "ctrl", "tool", "gui", "etc", "src", "include", "lib", "bin", "obj", "SEQ", "u",
    "v4", "LINK", "Res", "modcommon", "sc2stb", "Gui",
];

/// Options for building a consolidated report
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct ReportConfig {
    /// Rows of context kept around each changed row (default: 4)
    pub context_lines: u32,
    /// Fill that marks a changed content cell (default: FFC0C0C0)
    pub highlight_color: Color,
    /// First row after the header row
    pub first_content_row: u32,
    /// Line-number columns, left then right (default: A, C)
    pub line_number_columns: Vec<u16>,
    /// Content columns, left then right (default: B, D)
    pub content_columns: Vec<u16>,
    /// Column holding review comments; `None` disables it (default: E)
    pub annotation_column: Option<u16>,
    /// Columns copied into the compare sheet, starting at A (default: 4)
    pub copied_columns: u16,

    /// First data row of the summary table (default: 5, row 6 in Excel)
    pub summary_start_row: u32,
    /// Summary column holding the file name (default: B)
    pub summary_name_column: u16,
    /// Summary column holding the folder (default: C)
    pub summary_folder_column: u16,

    /// Separator restored when a label is decoded from a sheet title
    pub path_separator: char,
    /// Folder names recognised when recovering file names from stems
    pub folder_keywords: Vec<String>,

    /// Title of the consolidated sheet
    pub compare_sheet_name: String,
    /// Title of the summary sheet
    pub summary_sheet_name: String,

    /// Monospace face for content columns
    pub monospace_font: String,
    pub line_number_width: f64,
    pub content_width: f64,
    pub annotation_width: f64,
    /// Header text of each content column, in `content_columns` order
    pub content_headers: Vec<String>,
    pub annotation_header: String,
    pub annotation_header_fill: Color,
    /// Text written into annotation cells of unchanged rows
    pub annotation_placeholder: String,
    pub annotation_placeholder_fill: Color,
    pub line_number_fill: Color,
    pub line_number_font_size: f64,
    pub label_fill: Color,
    pub label_font_size: f64,
    pub border_color: Color,

    /// Options handed to the HTML converter
    #[serde(skip)]
    pub html: HtmlReadOptions,
}

impl Default for ReportConfig {
    fn default() -> Self {
        Self {
            context_lines: 4,
            highlight_color: Color::rgb(0xC0, 0xC0, 0xC0),
            first_content_row: 1,
            line_number_columns: vec![0, 2],
            content_columns: vec![1, 3],
            annotation_column: Some(4),
            copied_columns: 4,
            summary_start_row: 5,
            summary_name_column: 1,
            summary_folder_column: 2,
            path_separator: '\\',
            folder_keywords: DEFAULT_FOLDER_KEYWORDS
                .iter()
                .map(|k| k.to_string())
                .collect(),
            compare_sheet_name: "compare".to_string(),
            summary_sheet_name: "Summary".to_string(),
            monospace_font: "MS Gothic".to_string(),
            line_number_width: 5.0,
            content_width: 100.0,
            annotation_width: 60.0,
            content_headers: vec!["Before".to_string(), "After".to_string()],
            annotation_header: "Comments".to_string(),
            annotation_header_fill: Color::rgb(0xCC, 0xFF, 0xCC),
            annotation_placeholder: "-".to_string(),
            annotation_placeholder_fill: Color::rgb(0xE0, 0xE0, 0xE0),
            line_number_fill: Color::rgb(0xF0, 0xF0, 0xF0),
            line_number_font_size: 12.0,
            label_fill: Color::rgb(0xCC, 0xFF, 0xFF),
            label_font_size: 12.0,
            border_color: Color::rgb(0xE0, 0xE0, 0xE0),
            html: HtmlReadOptions::default(),
        }
    }
}

impl ReportConfig {
    /// Create the default configuration
    pub fn new() -> Self {
        Self::default()
    }

    /// Load a configuration from a JSON file
    ///
    /// Missing fields keep their defaults.
    pub fn from_json_file<P: AsRef<Path>>(path: P) -> ReportResult<Self> {
        let path = path.as_ref();
        let text = std::fs::read_to_string(path)?;
        Self::from_json_str(&text)
            .map_err(|e| ReportError::Config(format!("{}: {}", path.display(), e)))
    }

    /// Parse a configuration from JSON text
    pub fn from_json_str(text: &str) -> ReportResult<Self> {
        let config: Self =
            serde_json::from_str(text).map_err(|e| ReportError::Config(e.to_string()))?;
        config.validate()?;
        Ok(config)
    }

    pub fn with_context_lines(mut self, lines: u32) -> Self {
        self.context_lines = lines;
        self
    }

    pub fn with_highlight_color(mut self, color: Color) -> Self {
        self.highlight_color = color;
        self
    }

    /// Enable or disable the annotation column
    pub fn with_annotation(mut self, enabled: bool) -> Self {
        self.annotation_column = if enabled {
            self.annotation_column.or(Self::default().annotation_column)
        } else {
            None
        };
        self
    }

    pub fn with_path_separator(mut self, separator: char) -> Self {
        self.path_separator = separator;
        self
    }

    pub fn with_monospace_font<S: Into<String>>(mut self, font: S) -> Self {
        self.monospace_font = font.into();
        self
    }

    pub fn with_folder_keywords<I, S>(mut self, keywords: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.folder_keywords = keywords.into_iter().map(Into::into).collect();
        self
    }

    /// Check that the layout is usable
    pub fn validate(&self) -> ReportResult<()> {
        if self.content_columns.is_empty() {
            return Err(ReportError::Config(
                "at least one content column is required".into(),
            ));
        }
        if self.first_content_row == 0 {
            return Err(ReportError::Config(
                "first_content_row must leave room for the header row".into(),
            ));
        }
        if self.copied_columns == 0 {
            return Err(ReportError::Config("copied_columns must be at least 1".into()));
        }
        if self.compare_sheet_name.eq_ignore_ascii_case(&self.summary_sheet_name) {
            return Err(ReportError::Config(format!(
                "compare and summary sheets cannot share the title '{}'",
                self.compare_sheet_name
            )));
        }
        let mut columns: Vec<u16> = self
            .line_number_columns
            .iter()
            .chain(&self.content_columns)
            .chain(self.annotation_column.as_ref())
            .copied()
            .collect();
        let count = columns.len();
        columns.sort_unstable();
        columns.dedup();
        if columns.len() != count {
            return Err(ReportError::Config(
                "line-number, content and annotation columns must be distinct".into(),
            ));
        }
        Ok(())
    }

    /// Whether `part` names a folder rather than the start of a file name
    pub fn is_folder_keyword(&self, part: &str) -> bool {
        self.folder_keywords.iter().any(|k| k == part)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    #[test]
    fn test_defaults() {
        let config = ReportConfig::default();
        assert_eq!(config.context_lines, 4);
        assert_eq!(config.highlight_color.to_argb_hex(), "FFC0C0C0");
        assert_eq!(config.content_columns, vec![1, 3]);
        assert_eq!(config.annotation_column, Some(4));
        assert!(config.is_folder_keyword("SEQ"));
        assert!(!config.is_folder_keyword("seq"));
        assert!(config.validate().is_ok());
    }

    #[test]
    fn test_partial_json_keeps_defaults() {
        let config = ReportConfig::from_json_str(
            r##"{ "context_lines": 2, "highlight_color": "#ffc0c0", "annotation_column": null }"##,
        )
        .unwrap();
        assert_eq!(config.context_lines, 2);
        assert_eq!(config.highlight_color, Color::rgb(0xFF, 0xC0, 0xC0));
        assert_eq!(config.annotation_column, None);
        assert_eq!(config.monospace_font, "MS Gothic");
    }

    #[test]
    fn test_json_rejects_bad_input() {
        assert!(matches!(
            ReportConfig::from_json_str(r#"{ "contex_lines": 2 }"#),
            Err(ReportError::Config(_))
        ));
        assert!(matches!(
            ReportConfig::from_json_str(r#"{ "highlight_color": "grey" }"#),
            Err(ReportError::Config(_))
        ));
        assert!(matches!(
            ReportConfig::from_json_str(r#"{ "content_columns": [0, 1] }"#),
            Err(ReportError::Config(_))
        ));
    }

    #[test]
    fn test_builders() {
        let config = ReportConfig::new()
            .with_context_lines(1)
            .with_annotation(false)
            .with_path_separator('/')
            .with_folder_keywords(["a", "b"]);
        assert_eq!(config.context_lines, 1);
        assert_eq!(config.annotation_column, None);
        assert_eq!(config.path_separator, '/');
        assert_eq!(config.folder_keywords, vec!["a".to_string(), "b".to_string()]);
        assert_eq!(config.with_annotation(true).annotation_column, Some(4));
    }

    #[test]
    fn test_round_trip_through_json() {
        let config = ReportConfig::default().with_context_lines(7);
        let json = serde_json::to_string(&config).unwrap();
        assert_eq!(ReportConfig::from_json_str(&json).unwrap(), config);
    }
}
