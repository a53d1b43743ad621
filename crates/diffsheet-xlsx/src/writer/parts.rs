//! Package-level parts: content types, relationships and the workbook

use diffsheet_core::Workbook;

use crate::styles::escape_xml_attr;

pub(super) const XML_DECLARATION: &str =
    r#"<?xml version="1.0" encoding="UTF-8" standalone="yes"?>"#;
pub(super) const SPREADSHEET_NS: &str = "http://schemas.openxmlformats.org/spreadsheetml/2006/main";
pub(super) const RELATIONSHIPS_NS: &str =
    "http://schemas.openxmlformats.org/officeDocument/2006/relationships";

const PACKAGE_RELATIONSHIPS_NS: &str =
    "http://schemas.openxmlformats.org/package/2006/relationships";
const CONTENT_TYPES_NS: &str = "http://schemas.openxmlformats.org/package/2006/content-types";

const OFFICE_DOCUMENT_REL: &str =
    "http://schemas.openxmlformats.org/officeDocument/2006/relationships/officeDocument";
const WORKSHEET_REL: &str =
    "http://schemas.openxmlformats.org/officeDocument/2006/relationships/worksheet";
const STYLES_REL: &str = "http://schemas.openxmlformats.org/officeDocument/2006/relationships/styles";
const HYPERLINK_REL: &str =
    "http://schemas.openxmlformats.org/officeDocument/2006/relationships/hyperlink";

const WORKBOOK_CT: &str = "application/vnd.openxmlformats-officedocument.spreadsheetml.sheet.main+xml";
const WORKSHEET_CT: &str =
    "application/vnd.openxmlformats-officedocument.spreadsheetml.worksheet+xml";
const STYLES_CT: &str = "application/vnd.openxmlformats-officedocument.spreadsheetml.styles+xml";
const RELATIONSHIPS_CT: &str = "application/vnd.openxmlformats-package.relationships+xml";

/// One entry of a `.rels` part; ids are assigned by position
struct Relationship<'a> {
    kind: &'static str,
    target: &'a str,
    external: bool,
}

fn relationships(entries: &[Relationship<'_>]) -> String {
    let mut xml = format!(
        "{}\n<Relationships xmlns=\"{}\">",
        XML_DECLARATION, PACKAGE_RELATIONSHIPS_NS
    );
    for (i, rel) in entries.iter().enumerate() {
        let mode = if rel.external {
            " TargetMode=\"External\""
        } else {
            ""
        };
        xml.push_str(&format!(
            "\n    <Relationship Id=\"rId{}\" Type=\"{}\" Target=\"{}\"{}/>",
            i + 1,
            rel.kind,
            escape_xml_attr(rel.target),
            mode
        ));
    }
    xml.push_str("\n</Relationships>");
    xml
}

pub(super) fn content_types(sheet_count: usize) -> String {
    let mut xml = format!(
        "{}\n<Types xmlns=\"{}\">\n    <Default Extension=\"rels\" ContentType=\"{}\"/>\n    <Default Extension=\"xml\" ContentType=\"application/xml\"/>",
        XML_DECLARATION, CONTENT_TYPES_NS, RELATIONSHIPS_CT
    );

    let mut overrides = vec![
        ("/xl/workbook.xml".to_string(), WORKBOOK_CT),
        ("/xl/styles.xml".to_string(), STYLES_CT),
    ];
    overrides.extend((1..=sheet_count).map(|n| (format!("/xl/worksheets/sheet{}.xml", n), WORKSHEET_CT)));

    for (part, content_type) in overrides {
        xml.push_str(&format!(
            "\n    <Override PartName=\"{}\" ContentType=\"{}\"/>",
            part, content_type
        ));
    }
    xml.push_str("\n</Types>");
    xml
}

pub(super) fn root_relationships() -> String {
    relationships(&[Relationship {
        kind: OFFICE_DOCUMENT_REL,
        target: "xl/workbook.xml",
        external: false,
    }])
}

/// Sheet `n` is `rId<n>`; the style sheet follows the last sheet
pub(super) fn workbook_relationships(sheet_count: usize) -> String {
    let targets: Vec<String> = (1..=sheet_count)
        .map(|n| format!("worksheets/sheet{}.xml", n))
        .collect();

    let mut entries: Vec<Relationship<'_>> = targets
        .iter()
        .map(|target| Relationship {
            kind: WORKSHEET_REL,
            target: target.as_str(),
            external: false,
        })
        .collect();
    entries.push(Relationship {
        kind: STYLES_REL,
        target: "styles.xml",
        external: false,
    });
    relationships(&entries)
}

pub(super) fn hyperlink_relationships(urls: &[&str]) -> String {
    let entries: Vec<Relationship<'_>> = urls
        .iter()
        .map(|&url| Relationship {
            kind: HYPERLINK_REL,
            target: url,
            external: true,
        })
        .collect();
    relationships(&entries)
}

pub(super) fn workbook(workbook: &Workbook) -> String {
    let mut xml = format!(
        "{}\n<workbook xmlns=\"{}\" xmlns:r=\"{}\">\n    <bookViews>\n        <workbookView activeTab=\"0\"/>\n    </bookViews>\n    <sheets>",
        XML_DECLARATION, SPREADSHEET_NS, RELATIONSHIPS_NS
    );
    for (n, sheet) in (1..).zip(workbook.worksheets()) {
        xml.push_str(&format!(
            "\n        <sheet name=\"{}\" sheetId=\"{}\" r:id=\"rId{}\"/>",
            escape_xml_attr(sheet.name()),
            n,
            n
        ));
    }
    xml.push_str("\n    </sheets>\n</workbook>");
    xml
}
