//! Cell fonts

use super::Color;

/// Default font face for new cells
pub const DEFAULT_FONT_NAME: &str = "Calibri";

/// Default font size in points
pub const DEFAULT_FONT_SIZE: f64 = 11.0;

/// Face, size, weight and colour of a cell's text
#[derive(Debug, Clone, PartialEq)]
pub struct FontStyle {
    pub name: String,
    /// Points
    pub size: f64,
    pub bold: bool,
    /// `Auto` leaves the colour to the application
    pub color: Color,
}

impl Default for FontStyle {
    fn default() -> Self {
        Self {
            name: DEFAULT_FONT_NAME.to_string(),
            size: DEFAULT_FONT_SIZE,
            bold: false,
            color: Color::Auto,
        }
    }
}

// Sizes hash by bit pattern
impl std::hash::Hash for FontStyle {
    fn hash<H: std::hash::Hasher>(&self, state: &mut H) {
        self.name.hash(state);
        self.size.to_bits().hash(state);
        self.bold.hash(state);
        self.color.hash(state);
    }
}

impl Eq for FontStyle {}
