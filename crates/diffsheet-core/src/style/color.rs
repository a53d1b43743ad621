//! Color representation

use std::fmt;

/// Color representation
///
/// Colors are ARGB values. [`Color::Auto`] is the "no colour / default"
/// sentinel and is never equal to an explicit colour, white included.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum Color {
    /// Automatic/default color
    #[default]
    Auto,

    /// ARGB color with alpha channel
    Argb { a: u8, r: u8, g: u8, b: u8 },
}

impl Color {
    /// Create an opaque RGB color
    pub const fn rgb(r: u8, g: u8, b: u8) -> Self {
        Color::Argb { a: 0xFF, r, g, b }
    }

    /// Create an ARGB color
    pub const fn argb(a: u8, r: u8, g: u8, b: u8) -> Self {
        Color::Argb { a, r, g, b }
    }

    /// Create from an 8-digit ARGB hex string (e.g., "FFC0C0C0")
    pub fn from_argb_hex(hex: &str) -> Option<Self> {
        if hex.len() != 8 || !hex.bytes().all(|b| b.is_ascii_hexdigit()) {
            return None;
        }
        let a = u8::from_str_radix(&hex[0..2], 16).ok()?;
        let r = u8::from_str_radix(&hex[2..4], 16).ok()?;
        let g = u8::from_str_radix(&hex[4..6], 16).ok()?;
        let b = u8::from_str_radix(&hex[6..8], 16).ok()?;
        Some(Color::Argb { a, r, g, b })
    }

    /// Normalize a colour as written in HTML (`bgcolor`, `background-color`)
    ///
    /// The text is trimmed, upper-cased and stripped of one leading `#`. Three digits are
    /// expanded by doubling each digit, six digits get an opaque `FF` alpha,
    /// eight digits are taken as ARGB. Anything else is rejected.
    ///
    /// ```
    /// use diffsheet_core::Color;
    ///
    /// assert_eq!(Color::normalize_html("#abc").unwrap().to_argb_hex(), "FFAABBCC");
    /// assert_eq!(Color::normalize_html("#AABBCC").unwrap().to_argb_hex(), "FFAABBCC");
    /// assert_eq!(Color::normalize_html("AABBCCDD").unwrap().to_argb_hex(), "AABBCCDD");
    /// assert!(Color::normalize_html("12345").is_none());
    /// ```
    pub fn normalize_html(value: &str) -> Option<Self> {
        let trimmed = value.trim();
        let upper = trimmed.strip_prefix('#').unwrap_or(trimmed).to_ascii_uppercase();
        if !upper.bytes().all(|b| b.is_ascii_hexdigit()) {
            return None;
        }

        let argb = match upper.len() {
            3 => {
                let mut doubled = String::from("FF");
                for c in upper.chars() {
                    doubled.push(c);
                    doubled.push(c);
                }
                doubled
            }
            6 => format!("FF{}", upper),
            8 => upper,
            _ => return None,
        };

        Self::from_argb_hex(&argb)
    }

    /// Convert to ARGB hex string (8 characters, used by XLSX)
    ///
    /// [`Color::Auto`] renders as opaque black, the spreadsheet default.
    pub fn to_argb_hex(&self) -> String {
        match self {
            Color::Auto => "FF000000".to_string(),
            Color::Argb { a, r, g, b } => format!("{:02X}{:02X}{:02X}{:02X}", a, r, g, b),
        }
    }

    /// Check if color is automatic/default
    pub fn is_auto(&self) -> bool {
        matches!(self, Color::Auto)
    }

    /// Whether this colour, used as a fill, means "no visible fill"
    ///
    /// True for [`Color::Auto`], opaque white and any fully transparent colour.
    pub fn is_default_fill(&self) -> bool {
        match self {
            Color::Auto => true,
            Color::Argb { a: 0, .. } => true,
            Color::Argb { .. } => *self == Color::WHITE,
        }
    }

    /// Whether this colour, used as a font colour, means the default text colour
    ///
    /// True for [`Color::Auto`], opaque black and transparent black.
    pub fn is_default_font(&self) -> bool {
        matches!(
            self,
            Color::Auto | Color::Argb { a: 0xFF | 0x00, r: 0, g: 0, b: 0 }
        )
    }

    pub const BLACK: Color = Color::rgb(0, 0, 0);
    pub const WHITE: Color = Color::rgb(0xFF, 0xFF, 0xFF);
}

impl fmt::Display for Color {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Color::Auto => write!(f, "auto"),
            Color::Argb { .. } => write!(f, "{}", self.to_argb_hex()),
        }
    }
}

#[cfg(feature = "serde")]
impl serde::Serialize for Color {
    fn serialize<S: serde::Serializer>(&self, serializer: S) -> std::result::Result<S::Ok, S::Error> {
        serializer.serialize_str(&self.to_string())
    }
}

#[cfg(feature = "serde")]
impl<'de> serde::Deserialize<'de> for Color {
    fn deserialize<D: serde::Deserializer<'de>>(deserializer: D) -> std::result::Result<Self, D::Error> {
        let text = <String as serde::Deserialize>::deserialize(deserializer)?;
        if text.trim().eq_ignore_ascii_case("auto") {
            return Ok(Color::Auto);
        }
        Color::normalize_html(&text)
            .ok_or_else(|| serde::de::Error::custom(format!("invalid colour '{}'", text)))
    }
}
