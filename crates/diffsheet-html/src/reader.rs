//! HTML table reader

use std::collections::BTreeMap;
use std::fs::File;
use std::io::Read;
use std::path::Path;

use diffsheet_core::{
    BorderLineStyle, BorderStyle, CellAddress, CellData, CellRange, CellValue, Color,
    HorizontalAlignment, Style, VerticalAlignment, Worksheet,
};
use quick_xml::events::{BytesStart, Event};
use quick_xml::Reader;

use crate::attrs::{decode_lenient, decode_text, trim_fragment, CellAttributes};
use crate::error::HtmlResult;
use crate::options::HtmlReadOptions;
use crate::warning::Warning;

/// Result of converting one report
#[derive(Debug)]
pub struct Conversion {
    /// The converted sheet
    pub sheet: Worksheet,
    /// Problems that did not stop the conversion
    pub warnings: Vec<Warning>,
}

/// HTML diff report reader
pub struct HtmlReader;

impl HtmlReader {
    /// Read an HTML file into a worksheet named `sheet_name`
    pub fn read_file<P: AsRef<Path>>(
        path: P,
        sheet_name: &str,
        options: &HtmlReadOptions,
    ) -> HtmlResult<Conversion> {
        let file = File::open(path)?;
        Self::read(file, sheet_name, options)
    }

    /// Read HTML from a reader
    ///
    /// Invalid UTF-8 sequences are replaced rather than rejected.
    pub fn read<R: Read>(
        mut reader: R,
        sheet_name: &str,
        options: &HtmlReadOptions,
    ) -> HtmlResult<Conversion> {
        let mut bytes = Vec::new();
        reader.read_to_end(&mut bytes)?;
        let html = String::from_utf8_lossy(&bytes);
        Self::read_str(&html, sheet_name, options)
    }

    /// Convert an HTML document held in memory
    pub fn read_str(
        html: &str,
        sheet_name: &str,
        options: &HtmlReadOptions,
    ) -> HtmlResult<Conversion> {
        let html = html.strip_prefix('\u{feff}').unwrap_or(html);
        let mut builder = SheetBuilder::new(Worksheet::new(sheet_name), options);

        let mut xml_reader = Reader::from_str(html);
        xml_reader.trim_text(false);
        xml_reader.check_end_names(false);

        loop {
            match xml_reader.read_event() {
                Ok(Event::Start(e)) => builder.open_tag(&e, false, xml_reader.buffer_position())?,
                Ok(Event::Empty(e)) => builder.open_tag(&e, true, xml_reader.buffer_position())?,
                Ok(Event::End(e)) => {
                    let name = e.name().as_ref().to_ascii_lowercase();
                    builder.end_element(&name)?;
                }
                Ok(Event::Text(e)) => {
                    if builder.collecting_text() {
                        builder.push_text(&decode_text(&e));
                    }
                }
                Ok(Event::CData(e)) => {
                    if builder.collecting_text() {
                        builder.push_text(&String::from_utf8_lossy(&e));
                    }
                }
                Ok(Event::Eof) => break,
                Err(e) => {
                    builder.warn(Warning::Markup {
                        position: xml_reader.buffer_position(),
                        message: e.to_string(),
                    });
                    break;
                }
                _ => {}
            }
        }

        builder.finish()
    }
}

/// Cell collected between its start and end tags
#[derive(Debug)]
struct PendingCell {
    header: bool,
    text: String,
    /// Text since the last tag, trimmed as one fragment
    fragment: String,
    attrs: CellAttributes,
}

/// Event-driven builder for the first table of a document
struct SheetBuilder<'o> {
    sheet: Worksheet,
    options: &'o HtmlReadOptions,
    warnings: Vec<Warning>,
    /// Top-level tables seen so far
    tables_seen: usize,
    /// Current `<table>` nesting depth
    depth: usize,
    /// Row being filled, if a `<tr>` is open
    row: Option<u32>,
    next_row: u32,
    col: u16,
    cell: Option<PendingCell>,
}

impl<'o> SheetBuilder<'o> {
    fn new(sheet: Worksheet, options: &'o HtmlReadOptions) -> Self {
        Self {
            sheet,
            options,
            warnings: Vec::new(),
            tables_seen: 0,
            depth: 0,
            row: None,
            next_row: 0,
            col: 0,
            cell: None,
        }
    }

    /// Inside the first table, outside any nested one
    fn interpreting(&self) -> bool {
        self.tables_seen == 1 && self.depth == 1
    }

    fn collecting_text(&self) -> bool {
        self.interpreting() && self.cell.is_some()
    }

    fn warn(&mut self, warning: Warning) {
        log::warn!("{}: {}", self.sheet.name(), warning);
        self.warnings.push(warning);
    }

    fn push_text(&mut self, raw: &str) {
        if let Some(cell) = self.cell.as_mut() {
            cell.fragment.push_str(raw);
        }
    }

    fn flush_fragment(&mut self) {
        if let Some(cell) = self.cell.as_mut() {
            cell.text.push_str(trim_fragment(&cell.fragment));
            cell.fragment.clear();
        }
    }

    /// Start tag, or a stray `<` in cell text that the tokenizer took for one
    fn open_tag(&mut self, e: &BytesStart<'_>, empty: bool, position: usize) -> HtmlResult<()> {
        if self.collecting_text() && !is_tag_name(e.name().as_ref()) {
            return self.keep_as_text(e, empty, position);
        }
        self.start_element(e, empty)
    }

    /// Put `<...>` back into the cell text. The tokenizer reads up to the
    /// next `>`, so a closing tag such as `</td` may be inside the bytes.
    fn keep_as_text(&mut self, e: &BytesStart<'_>, empty: bool, position: usize) -> HtmlResult<()> {
        let raw = String::from_utf8_lossy(e);
        self.warn(Warning::Markup {
            position,
            message: "unescaped '<' kept as text".to_string(),
        });

        match raw.split_once("</") {
            Some((text, closing)) => {
                self.push_text(&format!("<{}", decode_lenient(text)));
                let name = closing.split_whitespace().next().unwrap_or("");
                self.end_element(name.to_ascii_lowercase().as_bytes())
            }
            None => {
                let close = if empty { "/>" } else { ">" };
                self.push_text(&format!("<{}{}", decode_lenient(&raw), close));
                Ok(())
            }
        }
    }

    fn start_element(&mut self, e: &BytesStart<'_>, empty: bool) -> HtmlResult<()> {
        self.flush_fragment();
        let name = e.name().as_ref().to_ascii_lowercase();
        match name.as_slice() {
            b"table" => {
                if self.depth == 0 {
                    self.tables_seen += 1;
                } else if self.interpreting() {
                    let cell = CellAddress::new(self.row.unwrap_or(self.next_row), self.col);
                    self.warn(Warning::NestedTable { cell });
                }
                if !empty {
                    self.depth += 1;
                }
            }
            b"tr" if self.interpreting() => {
                self.finish_row()?;
                self.open_row();
            }
            b"td" | b"th" if self.interpreting() => {
                self.finish_cell()?;
                if self.row.is_none() {
                    self.open_row();
                }
                self.cell = Some(PendingCell {
                    header: name.as_slice() == b"th",
                    text: String::new(),
                    fragment: String::new(),
                    attrs: CellAttributes::parse(e),
                });
                if empty {
                    self.finish_cell()?;
                }
            }
            _ => {}
        }
        Ok(())
    }

    fn end_element(&mut self, name: &[u8]) -> HtmlResult<()> {
        self.flush_fragment();
        match name {
            b"table" if self.depth > 0 => {
                if self.interpreting() {
                    self.finish_row()?;
                }
                self.depth -= 1;
            }
            b"tr" if self.interpreting() => self.finish_row()?,
            b"td" | b"th" if self.interpreting() => self.finish_cell()?,
            _ => {}
        }
        Ok(())
    }

    fn open_row(&mut self) {
        self.row = Some(self.next_row);
        self.col = 0;
    }

    fn finish_row(&mut self) -> HtmlResult<()> {
        self.finish_cell()?;
        if self.row.take().is_some() {
            self.next_row += 1;
        }
        Ok(())
    }

    /// Write the pending cell at the next free position of the current row
    fn finish_cell(&mut self) -> HtmlResult<()> {
        self.flush_fragment();
        let Some(pending) = self.cell.take() else {
            return Ok(());
        };
        let Some(row) = self.row else {
            return Ok(());
        };

        while self.col < u16::MAX && self.sheet.is_merge_covered(row, self.col) {
            self.col += 1;
        }
        let col = self.col;
        let address = CellAddress::new(row, col);

        let mut text = pending.text;
        if col < self.options.placeholder_columns && text == "." {
            text.clear();
        }

        let mut style = Style::new().border(BorderStyle::all(BorderLineStyle::Thin, Color::BLACK));

        match pending.attrs.background() {
            Some(Ok(color)) => style = style.fill_color(color),
            Some(Err(value)) => self.warn(Warning::UnrecognizedColor {
                cell: address,
                value,
            }),
            None => {}
        }

        if pending.header {
            style = style
                .bold(true)
                .font_size(self.options.header_font_size)
                .horizontal_alignment(HorizontalAlignment::Center)
                .vertical_alignment(VerticalAlignment::Center);
            if style.fill.is_none() {
                style = style.fill_color(self.options.header_fill);
            }
        }

        let value = if text.is_empty() {
            CellValue::Empty
        } else {
            CellValue::String(text)
        };
        self.sheet
            .set_cell_at(row, col, CellData::with_style(value, style))?;

        let colspan = self.span(pending.attrs.colspan(), address, "colspan");
        let rowspan = self.span(pending.attrs.rowspan(), address, "rowspan");
        let end_col = u32::from(col) + colspan - 1;
        let end_col = u16::try_from(end_col).unwrap_or(u16::MAX);

        if colspan > 1 || rowspan > 1 {
            let range = CellRange::from_indices(row, col, row.saturating_add(rowspan - 1), end_col);
            self.sheet.merge_cells(&range)?;
        }

        self.col = end_col.saturating_add(1);
        Ok(())
    }

    fn span(&mut self, parsed: Result<u32, String>, cell: CellAddress, attribute: &'static str) -> u32 {
        parsed.unwrap_or_else(|value| {
            self.warn(Warning::InvalidSpan {
                cell,
                attribute,
                value,
            });
            1
        })
    }

    fn finish(mut self) -> HtmlResult<Conversion> {
        if self.depth > 0 && self.tables_seen == 1 {
            self.depth = 1;
            self.finish_row()?;
        }

        match self.tables_seen {
            0 => self.warn(Warning::NoTable),
            1 => {}
            n => self.warn(Warning::ExtraTables { count: n - 1 }),
        }

        self.autosize_columns();
        log::debug!(
            "converted '{}': {} rows, {} merged regions",
            self.sheet.name(),
            self.next_row,
            self.sheet.merged_regions().len()
        );

        Ok(Conversion {
            sheet: self.sheet,
            warnings: self.warnings,
        })
    }

    /// Width of every populated column: longest text + 2, capped
    fn autosize_columns(&mut self) {
        let mut longest: BTreeMap<u16, usize> = BTreeMap::new();
        for (_, col, cell) in self.sheet.iter_cells() {
            let len = longest.entry(col).or_insert(0);
            *len = (*len).max(cell.value.char_len());
        }
        for (col, len) in longest {
            let width = ((len + 2) as f64).min(self.options.max_column_width);
            self.sheet.set_column_width(col, width);
        }
    }
}

/// An ASCII letter followed by letters and digits
fn is_tag_name(name: &[u8]) -> bool {
    match name.split_first() {
        Some((first, rest)) => {
            first.is_ascii_alphabetic() && rest.iter().all(u8::is_ascii_alphanumeric)
        }
        None => false,
    }
}
