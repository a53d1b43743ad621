//! Convert a side-by-side report laid out the way the diff tool emits it

use std::io::Write;

use diffsheet_core::{CellRange, Color};
use diffsheet_html::{HtmlReadOptions, HtmlReader, Warning};
use pretty_assertions::assert_eq;

const REPORT: &str = r##"<!DOCTYPE html>
<html>
<head>
<meta charset="UTF-8">
<title>WinMerge File Compare Report</title>
<style type="text/css">
td,th { word-break: break-all; font-size: 0.8rem; }
.ln { text-align: right; }
</style>
</head>
<body>
<table cellspacing="0" cellpadding="0" style="width: 100%; margin: 0; border: none;">
<thead>
<tr>
<th class="title" style="width:2%"></th>
<th class="title" style="width:48%">C:\base\src\main.c</th>
<th class="title" style="width:2%"></th>
<th class="title" style="width:48%">C:\latest\src\main.c</th>
</tr>
</thead>
<tbody>
<tr><td class="ln">1</td><td><code>#include &lt;stdio.h&gt;</code></td><td class="ln">1</td><td><code>#include &lt;stdio.h&gt;</code></td></tr>
<tr><td class="ln" bgcolor="#efcb05"><a name="d1">2</a></td><td bgcolor="#c0c0c0"><code>int x&nbsp;=&nbsp;1;</code></td><td class="ln" bgcolor="#efcb05">2</td><td bgcolor="#c0c0c0"><code>int x&nbsp;=&nbsp;2;</code></td></tr>
<tr><td class="ln" style="background-color: #a0a0a0">.</td><td style="background-color: #a0a0a0"><br></td><td class="ln">3</td><td bgcolor="#ffff00">  <code>return x;</code></td></tr>
<tr><td class="ln">3</td><td>}</td><td class="ln">4</td><td>}</td></tr>
</tbody>
</table>
<br>
<table><tr><td>legend</td></tr></table>
</body>
</html>
"##;

#[test]
fn test_side_by_side_report() {
    let conversion = HtmlReader::read_str(REPORT, "main.c", &HtmlReadOptions::default()).unwrap();
    let sheet = &conversion.sheet;

    assert_eq!(sheet.max_row(), Some(4));
    assert_eq!(sheet.max_col(), Some(3));

    assert_eq!(sheet.value_at(0, 1), Some("C:\\base\\src\\main.c"));
    assert_eq!(sheet.value_at(1, 1), Some("#include <stdio.h>"));
    assert_eq!(sheet.value_at(2, 0), Some("2"));
    assert_eq!(sheet.value_at(2, 1), Some("int x\u{a0}=\u{a0}1;"));
    assert_eq!(sheet.value_at(3, 3), Some("return x;"));

    // Placeholder dot in the line-number column is dropped
    assert_eq!(sheet.value_at(3, 0), None);

    let fill = |row, col| sheet.cell_style_at(row, col).and_then(|s| s.fill.color());
    assert_eq!(fill(2, 1), Some(Color::rgb(0xC0, 0xC0, 0xC0)));
    assert_eq!(fill(2, 3), Some(Color::rgb(0xC0, 0xC0, 0xC0)));
    assert_eq!(fill(3, 1), Some(Color::rgb(0xA0, 0xA0, 0xA0)));
    assert_eq!(fill(3, 3), Some(Color::rgb(0xFF, 0xFF, 0x00)));
    assert_eq!(fill(4, 1), None);
    assert_eq!(fill(0, 1), Some(Color::rgb(0xDD, 0xDD, 0xDD)));

    assert!(sheet.merged_regions().is_empty());
    assert_eq!(conversion.warnings, vec![Warning::ExtraTables { count: 1 }]);
}

#[test]
fn test_summary_report_with_spanning_title() {
    let html = r#"<table>
<tr><th colspan="4">Compare Results</th></tr>
<tr><td>Compared</td><td colspan="3">C:\base vs C:\latest</td></tr>
<tr><td></td><td></td><td></td><td></td></tr>
<tr><td></td><td></td><td></td><td></td></tr>
<tr><td></td><td></td><td></td><td></td></tr>
<tr><th>#</th><th>Filename</th><th>Folder</th><th>Comparison result</th></tr>
<tr><td>1</td><td>main.c</td><td>src</td><td>Text files are different</td></tr>
<tr><td>2</td><td>util.h</td><td>src\include</td><td>Identical</td></tr>
</table>"#;
    let conversion = HtmlReader::read_str(html, "Summary", &HtmlReadOptions::default()).unwrap();
    let sheet = &conversion.sheet;

    assert_eq!(
        sheet.merged_regions(),
        &[
            CellRange::parse("A1:D1").unwrap(),
            CellRange::parse("B2:D2").unwrap()
        ]
    );
    assert_eq!(sheet.value_at(6, 1), Some("main.c"));
    assert_eq!(sheet.value_at(7, 2), Some("src\\include"));
    assert!(conversion.warnings.is_empty());
}

#[test]
fn test_read_file_with_invalid_utf8() {
    let mut file = tempfile::NamedTempFile::new().unwrap();
    file.write_all(b"<table><tr><td>caf\xe9</td><td>ok</td></tr></table>")
        .unwrap();

    let conversion =
        HtmlReader::read_file(file.path(), "bytes", &HtmlReadOptions::default()).unwrap();
    assert_eq!(conversion.sheet.value_at(0, 0), Some("caf\u{fffd}"));
    assert_eq!(conversion.sheet.value_at(0, 1), Some("ok"));
}

#[test]
fn test_missing_file_is_an_io_error() {
    let dir = tempfile::tempdir().unwrap();
    let result = HtmlReader::read_file(
        dir.path().join("missing.html"),
        "missing",
        &HtmlReadOptions::default(),
    );
    assert!(matches!(result, Err(diffsheet_html::HtmlError::Io(_))));
}
