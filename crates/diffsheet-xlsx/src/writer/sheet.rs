//! Worksheet part rendering

use diffsheet_core::{CellAddress, CellData, CellValue, Worksheet};

use super::parts::{RELATIONSHIPS_NS, SPREADSHEET_NS, XML_DECLARATION};
use crate::styles::{escape_xml_attr, is_xml_forbidden, XlsxStyleTable};

/// Where a cell hyperlink points
#[derive(Debug, Clone, PartialEq, Eq)]
enum LinkTarget<'a> {
    /// A cell reference inside the workbook, e.g. `'main.c'!A1`
    Location(&'a str),
    /// A URL, written through a worksheet relationship
    External(&'a str),
}

impl<'a> LinkTarget<'a> {
    fn classify(target: &'a str) -> Self {
        if target.contains("://") || target.starts_with("mailto:") {
            LinkTarget::External(target)
        } else {
            LinkTarget::Location(target.strip_prefix('#').unwrap_or(target))
        }
    }
}

/// A rendered `xl/worksheets/sheetN.xml`
pub(super) struct SheetPart<'s> {
    pub xml: String,
    /// URLs needing a relationship, in `rId` order
    pub external_links: Vec<&'s str>,
}

impl<'s> SheetPart<'s> {
    pub fn render(sheet: &'s Worksheet, styles: &XlsxStyleTable) -> Self {
        let mut part = SheetPart {
            xml: format!(
                "{}\n<worksheet xmlns=\"{}\" xmlns:r=\"{}\">",
                XML_DECLARATION, SPREADSHEET_NS, RELATIONSHIPS_NS
            ),
            external_links: Vec::new(),
        };

        if let Some(range) = sheet.used_range() {
            part.xml.push_str(&format!("\n    <dimension ref=\"{}\"/>", range));
        }
        part.columns(sheet);
        part.sheet_data(sheet, styles);
        part.merges(sheet);
        part.hyperlinks(sheet);
        part.xml.push_str("\n</worksheet>");
        part
    }

    fn columns(&mut self, sheet: &Worksheet) {
        let widths = sheet.custom_column_widths();
        if widths.is_empty() {
            return;
        }
        self.xml.push_str("\n    <cols>");
        for (&col, &width) in widths {
            let n = u32::from(col) + 1;
            self.xml.push_str(&format!(
                "\n        <col min=\"{}\" max=\"{}\" width=\"{}\" customWidth=\"1\"/>",
                n, n, width
            ));
        }
        self.xml.push_str("\n    </cols>");
    }

    /// Rows in order; cells without text are kept only when styled
    fn sheet_data(&mut self, sheet: &Worksheet, styles: &XlsxStyleTable) {
        self.xml.push_str("\n    <sheetData>");

        let mut open_row = None;
        for (row, col, cell) in sheet.iter_cells() {
            let Some(element) = cell_element(CellAddress::new(row, col), cell, styles) else {
                continue;
            };
            if open_row != Some(row) {
                if open_row.is_some() {
                    self.xml.push_str("\n        </row>");
                }
                self.xml.push_str(&format!("\n        <row r=\"{}\">", row + 1));
                open_row = Some(row);
            }
            self.xml.push_str("\n            ");
            self.xml.push_str(&element);
        }
        if open_row.is_some() {
            self.xml.push_str("\n        </row>");
        }

        self.xml.push_str("\n    </sheetData>");
    }

    fn merges(&mut self, sheet: &Worksheet) {
        let regions = sheet.merged_regions();
        if regions.is_empty() {
            return;
        }
        self.xml
            .push_str(&format!("\n    <mergeCells count=\"{}\">", regions.len()));
        for range in regions {
            self.xml
                .push_str(&format!("\n        <mergeCell ref=\"{}\"/>", range));
        }
        self.xml.push_str("\n    </mergeCells>");
    }

    fn hyperlinks(&mut self, sheet: &'s Worksheet) {
        let mut links = sheet.hyperlinks().peekable();
        if links.peek().is_none() {
            return;
        }

        self.xml.push_str("\n    <hyperlinks>");
        for (row, col, target) in links {
            let reference = CellAddress::new(row, col).to_a1_string();
            let display = sheet
                .value_at(row, col)
                .map(|text| format!(" display=\"{}\"", escape_xml_attr(text)))
                .unwrap_or_default();

            let destination = match LinkTarget::classify(target) {
                LinkTarget::Location(location) => {
                    format!("location=\"{}\"", escape_xml_attr(location))
                }
                LinkTarget::External(url) => {
                    self.external_links.push(url);
                    format!("r:id=\"rId{}\"", self.external_links.len())
                }
            };
            self.xml.push_str(&format!(
                "\n        <hyperlink ref=\"{}\" {}{}/>",
                reference, destination, display
            ));
        }
        self.xml.push_str("\n    </hyperlinks>");
    }
}

/// `<c>` element for a cell, or `None` for an unstyled empty cell
fn cell_element(address: CellAddress, cell: &CellData, styles: &XlsxStyleTable) -> Option<String> {
    let reference = address.to_a1_string();
    let style = match styles.xf_id_for(&cell.style) {
        0 => String::new(),
        xf => format!(" s=\"{}\"", xf),
    };

    match &cell.value {
        CellValue::String(text) if !text.is_empty() => {
            let preserve = if text.trim() != text.as_str() {
                " xml:space=\"preserve\""
            } else {
                ""
            };
            Some(format!(
                "<c r=\"{}\"{} t=\"inlineStr\"><is><t{}>{}</t></is></c>",
                reference,
                style,
                preserve,
                escape_text(text)
            ))
        }
        _ if !style.is_empty() => Some(format!("<c r=\"{}\"{}/>", reference, style)),
        _ => None,
    }
}

/// Escape `<t>` content. Control characters XML 1.0 forbids become the
/// OOXML `_xHHHH_` form, and a literal `_xHHHH_` gets its `_` escaped so
/// Excel does not decode it.
fn escape_text(text: &str) -> String {
    let mut out = String::with_capacity(text.len());
    for (i, c) in text.char_indices() {
        match c {
            '&' => out.push_str("&amp;"),
            '<' => out.push_str("&lt;"),
            '>' => out.push_str("&gt;"),
            '_' if is_ooxml_escape(&text[i..]) => out.push_str("_x005F_"),
            c if is_xml_forbidden(c) => out.push_str(&format!("_x{:04X}_", u32::from(c))),
            c => out.push(c),
        }
    }
    out
}

/// `_xHHHH_` at the start of `s`
fn is_ooxml_escape(s: &str) -> bool {
    let bytes = s.as_bytes();
    bytes.len() >= 7
        && bytes.starts_with(b"_x")
        && bytes[2..6].iter().all(u8::is_ascii_hexdigit)
        && bytes[6] == b'_'
}

#[cfg(test)]
mod tests {
    use super::*;
    use diffsheet_core::{Color, Style, Workbook};
    use pretty_assertions::assert_eq;

    fn render(sheet: &Worksheet) -> String {
        let mut wb = Workbook::new();
        wb.add_existing_worksheet(sheet.clone()).unwrap();
        let styles = XlsxStyleTable::build(&wb);
        SheetPart::render(sheet, &styles).xml
    }

    #[test]
    fn test_link_targets() {
        assert_eq!(
            LinkTarget::classify("'main.c'!A1"),
            LinkTarget::Location("'main.c'!A1")
        );
        assert_eq!(LinkTarget::classify("#Summary!B6"), LinkTarget::Location("Summary!B6"));
        assert_eq!(
            LinkTarget::classify("https://example.com/a?b&c"),
            LinkTarget::External("https://example.com/a?b&c")
        );
        assert_eq!(
            LinkTarget::classify("mailto:review@example.com"),
            LinkTarget::External("mailto:review@example.com")
        );
    }

    #[test]
    fn test_escape_text() {
        assert_eq!(escape_text("if (a < b && c > d)"), "if (a &lt; b &amp;&amp; c &gt; d)");
    }

    #[test]
    fn test_control_characters_are_encoded() {
        assert_eq!(escape_text("page\u{c}break\u{1}"), "page_x000C_break_x0001_");
        assert_eq!(escape_text("a\tb\nc\r"), "a\tb\nc\r");
        assert_eq!(escape_text("keep_x0041_as_is"), "keep_x005F_x0041_as_is");
        assert_eq!(escape_text("snake_xyz_case_x12"), "snake_xyz_case_x12");

        let mut sheet = Worksheet::new("s");
        sheet.set_cell_value_at(0, 0, "page\u{c}break\u{1}").unwrap();
        sheet.set_hyperlink_at(0, 0, "'s'!B2").unwrap();
        sheet.set_cell_value_at(1, 0, "bell\u{7}").unwrap();
        sheet.set_hyperlink_at(1, 0, "'s'!B3").unwrap();
        let xml = render(&sheet);

        assert!(xml.contains("<t>page_x000C_break_x0001_</t>"));
        assert!(xml.contains("display=\"pagebreak\""));
        assert!(xml.contains("display=\"bell\""));
        assert!(!xml.chars().any(is_xml_forbidden));
    }

    #[test]
    fn test_padded_text_is_preserved() {
        let mut sheet = Worksheet::new("s");
        sheet.set_cell_value_at(0, 1, "    indented").unwrap();
        let xml = render(&sheet);
        assert!(xml.contains("<c r=\"B1\" t=\"inlineStr\"><is><t xml:space=\"preserve\">    indented</t></is></c>"));
    }

    #[test]
    fn test_unstyled_empty_cells_are_skipped() {
        let mut sheet = Worksheet::new("s");
        sheet.set_cell_value_at(0, 0, "").unwrap();
        sheet
            .set_cell_style_at(2, 0, &Style::new().fill_color(Color::rgb(0xE0, 0xE0, 0xE0)))
            .unwrap();
        let xml = render(&sheet);

        assert!(!xml.contains("<row r=\"1\">"));
        assert!(xml.contains("<row r=\"3\">\n            <c r=\"A3\" s=\"1\"/>\n        </row>"));
    }

    #[test]
    fn test_external_links_are_numbered() {
        let mut sheet = Worksheet::new("s");
        sheet.set_hyperlink_at(0, 0, "https://a.example").unwrap();
        sheet.set_hyperlink_at(1, 0, "'s'!A1").unwrap();
        sheet.set_hyperlink_at(2, 0, "https://b.example").unwrap();

        let mut wb = Workbook::new();
        wb.add_existing_worksheet(sheet.clone()).unwrap();
        let styles = XlsxStyleTable::build(&wb);
        let part = SheetPart::render(&sheet, &styles);

        assert_eq!(part.external_links, vec!["https://a.example", "https://b.example"]);
        assert!(part.xml.contains("<hyperlink ref=\"A3\" r:id=\"rId2\"/>"));
        assert!(part.xml.contains("<hyperlink ref=\"A2\" location=\"&apos;s&apos;!A1\"/>"));
    }
}
