//! `xl/styles.xml`: fonts, fills, borders and the cellXfs that combine them

use std::hash::Hash;

use ahash::AHashMap;

use diffsheet_core::{
    Alignment, BorderEdge, BorderLineStyle, BorderStyle, Color, FillStyle, FontStyle, Style,
    Workbook,
};

/// Distinct values numbered in first-seen order
#[derive(Debug)]
struct Pool<T> {
    items: Vec<T>,
    ids: AHashMap<T, u32>,
}

impl<T: Clone + Eq + Hash> Pool<T> {
    fn seeded(seed: impl IntoIterator<Item = T>) -> Self {
        let mut pool = Pool {
            items: Vec::new(),
            ids: AHashMap::new(),
        };
        for item in seed {
            pool.id(&item);
        }
        pool
    }

    fn id(&mut self, item: &T) -> u32 {
        if let Some(&id) = self.ids.get(item) {
            return id;
        }
        let id = self.items.len() as u32;
        self.items.push(item.clone());
        self.ids.insert(item.clone(), id);
        id
    }

    fn get(&self, item: &T) -> Option<u32> {
        self.ids.get(item).copied()
    }
}

/// One cellXfs entry per distinct [`Style`] in the workbook; `s="0"` is the
/// default style.
#[derive(Debug)]
pub(crate) struct XlsxStyleTable {
    xfs: Pool<Style>,
}

impl XlsxStyleTable {
    pub(crate) fn build(workbook: &Workbook) -> Self {
        let mut xfs = Pool::seeded([Style::default()]);
        for (_, _, cell) in workbook.worksheets().flat_map(|sheet| sheet.iter_cells()) {
            xfs.id(&cell.style);
        }

        let table = Self { xfs };
        log::debug!("style table holds {} cell format(s)", table.len());
        table
    }

    /// Unknown styles fall back to the default format
    pub(crate) fn xf_id_for(&self, style: &Style) -> u32 {
        self.xfs.get(style).unwrap_or(0)
    }

    pub(crate) fn len(&self) -> usize {
        self.xfs.items.len()
    }

    pub(crate) fn to_styles_xml(&self) -> String {
        let mut fonts = Pool::seeded([FontStyle::default()]);
        // `None` stands for the gray125 pattern Excel expects at index 1
        let mut fills = Pool::seeded([Some(FillStyle::None), None]);
        let mut borders = Pool::seeded([BorderStyle::default()]);

        let xfs: Vec<String> = self
            .xfs
            .items
            .iter()
            .map(|style| {
                let font = fonts.id(&style.font);
                let fill = fills.id(&Some(style.fill));
                let border = borders.id(&style.border);
                xf_element(style, font, fill, border)
            })
            .collect();

        let mut xml = format!(
            "{}\n<styleSheet xmlns=\"{}\">",
            r#"<?xml version="1.0" encoding="UTF-8" standalone="yes"?>"#,
            "http://schemas.openxmlformats.org/spreadsheetml/2006/main"
        );
        push_list(&mut xml, "fonts", fonts.items.iter().map(font_element));
        push_list(&mut xml, "fills", fills.items.iter().map(fill_element));
        push_list(&mut xml, "borders", borders.items.iter().map(border_element));
        push_list(
            &mut xml,
            "cellStyleXfs",
            std::iter::once(r#"<xf numFmtId="0" fontId="0" fillId="0" borderId="0"/>"#.to_string()),
        );
        push_list(&mut xml, "cellXfs", xfs.into_iter());
        push_list(
            &mut xml,
            "cellStyles",
            std::iter::once(r#"<cellStyle name="Normal" xfId="0" builtinId="0"/>"#.to_string()),
        );
        xml.push_str(
            "\n  <dxfs count=\"0\"/>\n  <tableStyles count=\"0\" defaultTableStyle=\"TableStyleMedium9\" defaultPivotStyle=\"PivotStyleLight16\"/>\n</styleSheet>",
        );
        xml
    }
}

/// `<tag count="n">` around one element per line
fn push_list(xml: &mut String, tag: &str, elements: impl ExactSizeIterator<Item = String>) {
    xml.push_str(&format!("\n  <{} count=\"{}\">", tag, elements.len()));
    for element in elements {
        xml.push_str("\n    ");
        xml.push_str(&element);
    }
    xml.push_str(&format!("\n  </{}>", tag));
}

/// C0 controls other than tab, newline and carriage return
pub(crate) fn is_xml_forbidden(c: char) -> bool {
    c < ' ' && !matches!(c, '\t' | '\n' | '\r')
}

/// Escape an attribute value, dropping characters XML 1.0 forbids
pub(crate) fn escape_xml_attr(s: &str) -> String {
    let mut out = String::with_capacity(s.len());
    for c in s.chars() {
        match c {
            c if is_xml_forbidden(c) => {}
            '&' => out.push_str("&amp;"),
            '<' => out.push_str("&lt;"),
            '>' => out.push_str("&gt;"),
            '"' => out.push_str("&quot;"),
            '\'' => out.push_str("&apos;"),
            c => out.push(c),
        }
    }
    out
}

fn color_attr(color: &Color) -> String {
    match color {
        Color::Auto => " indexed=\"64\"".to_string(),
        Color::Argb { .. } => format!(" rgb=\"{}\"", color.to_argb_hex()),
    }
}

fn font_element(font: &FontStyle) -> String {
    let bold = if font.bold { "<b/>" } else { "" };
    let color = match font.color {
        Color::Auto => "<color theme=\"1\"/>".to_string(),
        color => format!("<color{}/>", color_attr(&color)),
    };
    format!(
        "<font>{}<sz val=\"{}\"/>{}<name val=\"{}\"/><family val=\"2\"/></font>",
        bold,
        font.size,
        color,
        escape_xml_attr(&font.name)
    )
}

fn fill_element(fill: &Option<FillStyle>) -> String {
    let pattern = match fill {
        None => "<patternFill patternType=\"gray125\"/>".to_string(),
        Some(FillStyle::None) => "<patternFill patternType=\"none\"/>".to_string(),
        Some(FillStyle::Solid { color }) => format!(
            "<patternFill patternType=\"solid\"><fgColor{}/><bgColor indexed=\"64\"/></patternFill>",
            color_attr(color)
        ),
    };
    format!("<fill>{}</fill>", pattern)
}

fn border_element(border: &BorderStyle) -> String {
    let edge = |tag: &str, side: &Option<BorderEdge>| match side {
        Some(e) if e.style != BorderLineStyle::None => format!(
            "<{tag} style=\"{}\"><color{}/></{tag}>",
            e.style.as_str(),
            color_attr(&e.color)
        ),
        _ => format!("<{tag}/>"),
    };
    format!(
        "<border>{}{}{}{}<diagonal/></border>",
        edge("left", &border.left),
        edge("right", &border.right),
        edge("top", &border.top),
        edge("bottom", &border.bottom)
    )
}

/// `None` when the alignment is the default
fn alignment_element(alignment: &Alignment) -> Option<String> {
    if alignment.is_default() {
        return None;
    }
    let default = Alignment::default();
    let mut xml = String::from("<alignment");
    if alignment.horizontal != default.horizontal {
        xml.push_str(&format!(" horizontal=\"{}\"", alignment.horizontal));
    }
    if alignment.vertical != default.vertical {
        xml.push_str(&format!(" vertical=\"{}\"", alignment.vertical));
    }
    if alignment.wrap_text {
        xml.push_str(" wrapText=\"1\"");
    }
    xml.push_str("/>");
    Some(xml)
}

fn xf_element(style: &Style, font: u32, fill: u32, border: u32) -> String {
    let applied = [
        ("applyFont", style.font != FontStyle::default()),
        ("applyFill", !style.fill.is_none()),
        ("applyBorder", !style.border.is_empty()),
        ("applyAlignment", !style.alignment.is_default()),
    ];
    let mut xml = format!(
        "<xf numFmtId=\"0\" fontId=\"{}\" fillId=\"{}\" borderId=\"{}\" xfId=\"0\"",
        font, fill, border
    );
    for (attr, _) in applied.iter().filter(|(_, on)| *on) {
        xml.push_str(&format!(" {}=\"1\"", attr));
    }

    match alignment_element(&style.alignment) {
        Some(alignment) => xml.push_str(&format!(">{}</xf>", alignment)),
        None => xml.push_str("/>"),
    }
    xml
}
