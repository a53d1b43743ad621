//! Attribute and text decoding for table cells

use std::borrow::Cow;

use diffsheet_core::Color;
use quick_xml::events::{BytesStart, BytesText};

/// Largest span honoured, as in browsers
const MAX_COLSPAN: u32 = 1000;
const MAX_ROWSPAN: u32 = 65534;

/// Raw attributes of a `<td>`/`<th>` that affect the grid
#[derive(Debug, Default)]
pub(crate) struct CellAttributes {
    pub bgcolor: Option<String>,
    pub style: Option<String>,
    pub colspan: Option<String>,
    pub rowspan: Option<String>,
}

impl CellAttributes {
    /// Collect the attributes, accepting unquoted and valueless HTML forms
    pub fn parse(e: &BytesStart<'_>) -> Self {
        let mut attrs = Self::default();
        for attr in e.html_attributes().with_checks(false).flatten() {
            let value = match attr.unescape_value() {
                Ok(v) => v.into_owned(),
                Err(_) => String::from_utf8_lossy(&attr.value).into_owned(),
            };
            let key = attr.key.as_ref().to_ascii_lowercase();
            match key.as_slice() {
                b"bgcolor" => attrs.bgcolor = Some(value),
                b"style" => attrs.style = Some(value),
                b"colspan" => attrs.colspan = Some(value),
                b"rowspan" => attrs.rowspan = Some(value),
                _ => {}
            }
        }
        attrs
    }

    /// The explicit background colour
    ///
    /// `None` when no colour is given, `Some(Err(raw))` when one is given but
    /// cannot be parsed. A non-empty `bgcolor` wins over the style attribute.
    pub fn background(&self) -> Option<Result<Color, String>> {
        let raw = match self.bgcolor.as_deref().filter(|v| !v.trim().is_empty()) {
            Some(bgcolor) => bgcolor.to_string(),
            None => style_background(self.style.as_deref()?)?,
        };
        Some(Color::normalize_html(&raw).ok_or(raw))
    }

    pub fn colspan(&self) -> Result<u32, String> {
        parse_span(self.colspan.as_deref(), MAX_COLSPAN)
    }

    pub fn rowspan(&self) -> Result<u32, String> {
        parse_span(self.rowspan.as_deref(), MAX_ROWSPAN)
    }
}

/// Extract the colour of a `background-color` or `background` declaration
fn style_background(style: &str) -> Option<String> {
    let mut shorthand = None;
    for declaration in style.split(';') {
        let Some((property, value)) = declaration.split_once(':') else {
            continue;
        };
        let value = value.trim().trim_end_matches("!important").trim();
        match property.trim().to_ascii_lowercase().as_str() {
            "background-color" => return Some(value.to_string()),
            "background" if shorthand.is_none() => {
                shorthand = value.split_whitespace().next().map(str::to_string);
            }
            _ => {}
        }
    }
    shorthand
}

fn parse_span(raw: Option<&str>, max: u32) -> Result<u32, String> {
    match raw {
        None => Ok(1),
        Some(raw) => match raw.trim().parse::<u32>() {
            Ok(0) | Err(_) => Err(raw.to_string()),
            Ok(n) => Ok(n.min(max)),
        },
    }
}

/// Decode one text node, falling back to a lenient pass on unknown entities
pub(crate) fn decode_text(e: &BytesText<'_>) -> String {
    match e.unescape_with(resolve_entity) {
        Ok(text) => text.into_owned(),
        Err(_) => decode_lenient(&String::from_utf8_lossy(e)),
    }
}

/// Trim a fragment of ordinary whitespace and non-breaking spaces
pub(crate) fn trim_fragment(text: &str) -> &str {
    text.trim_matches(|c: char| c.is_whitespace() || c == '\u{a0}')
}

fn resolve_entity(name: &str) -> Option<&'static str> {
    let value = match name {
        "lt" => "<",
        "gt" => ">",
        "amp" => "&",
        "quot" => "\"",
        "apos" => "'",
        "nbsp" => "\u{a0}",
        "ensp" => "\u{2002}",
        "emsp" => "\u{2003}",
        "thinsp" => "\u{2009}",
        "copy" => "\u{a9}",
        "reg" => "\u{ae}",
        "trade" => "\u{2122}",
        "hellip" => "\u{2026}",
        "ndash" => "\u{2013}",
        "mdash" => "\u{2014}",
        "laquo" => "\u{ab}",
        "raquo" => "\u{bb}",
        "middot" => "\u{b7}",
        "times" => "\u{d7}",
        "yen" => "\u{a5}",
        _ => return None,
    };
    Some(value)
}

/// Resolve known entities and keep anything unrecognized verbatim
pub(crate) fn decode_lenient(raw: &str) -> String {
    let mut out = String::with_capacity(raw.len());
    let mut rest = raw;

    while let Some(amp) = rest.find('&') {
        out.push_str(&rest[..amp]);
        let tail = &rest[amp..];
        let decoded = tail[1..]
            .find(';')
            .filter(|end| *end > 0 && *end <= 32)
            .and_then(|end| decode_reference(&tail[1..=end]).map(|s| (s, end + 2)));

        match decoded {
            Some((text, consumed)) => {
                out.push_str(&text);
                rest = &tail[consumed..];
            }
            None => {
                out.push('&');
                rest = &tail[1..];
            }
        }
    }

    out.push_str(rest);
    out
}

fn decode_reference(name: &str) -> Option<Cow<'static, str>> {
    if let Some(number) = name.strip_prefix('#') {
        let code = match number.strip_prefix(['x', 'X']) {
            Some(hex) => u32::from_str_radix(hex, 16).ok()?,
            None => number.parse().ok()?,
        };
        return char::from_u32(code).map(|c| Cow::Owned(c.to_string()));
    }
    resolve_entity(name).map(Cow::Borrowed)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn cell(style: Option<&str>, bgcolor: Option<&str>) -> CellAttributes {
        CellAttributes {
            style: style.map(str::to_string),
            bgcolor: bgcolor.map(str::to_string),
            ..Default::default()
        }
    }

    #[test]
    fn test_bgcolor_wins_over_style() {
        let attrs = cell(Some("background-color: #ff0000"), Some("#00ff00"));
        assert_eq!(attrs.background(), Some(Ok(Color::rgb(0, 0xFF, 0))));
    }

    #[test]
    fn test_style_background() {
        assert_eq!(
            cell(Some("color: red; background-color:#EFCB05 !important"), None).background(),
            Some(Ok(Color::rgb(0xEF, 0xCB, 0x05)))
        );
        assert_eq!(
            cell(Some("background: #abc url(x.png)"), None).background(),
            Some(Ok(Color::rgb(0xAA, 0xBB, 0xCC)))
        );
        assert_eq!(cell(Some("color: #abc"), None).background(), None);
        assert_eq!(cell(None, Some("  ")).background(), None);
    }

    #[test]
    fn test_unrecognized_colour_is_reported() {
        assert_eq!(
            cell(None, Some("lightblue")).background(),
            Some(Err("lightblue".to_string()))
        );
    }

    #[test]
    fn test_spans() {
        assert_eq!(parse_span(None, MAX_COLSPAN), Ok(1));
        assert_eq!(parse_span(Some(" 3 "), MAX_COLSPAN), Ok(3));
        assert_eq!(parse_span(Some("5000"), MAX_COLSPAN), Ok(1000));
        assert_eq!(parse_span(Some("0"), MAX_COLSPAN), Err("0".to_string()));
        assert_eq!(parse_span(Some("two"), MAX_COLSPAN), Err("two".to_string()));
    }

    #[test]
    fn test_decode_lenient() {
        assert_eq!(decode_lenient("a &amp;&amp; b"), "a && b");
        assert_eq!(decode_lenient("x &unknown; y"), "x &unknown; y");
        assert_eq!(decode_lenient("&#65;&#x42;&lt;"), "AB<");
        assert_eq!(decode_lenient("tail &"), "tail &");
    }

    #[test]
    fn test_trim_fragment() {
        assert_eq!(trim_fragment("\u{a0} int x; \n"), "int x;");
        assert_eq!(trim_fragment("\u{a0}\u{a0}"), "");
    }
}
