//! Formatting attached to a cell: font, fill, borders and alignment

mod alignment;
mod border;
mod color;
mod fill;
mod font;

pub use alignment::{Alignment, HorizontalAlignment, VerticalAlignment};
pub use border::{BorderEdge, BorderLineStyle, BorderStyle};
pub use color::Color;
pub use fill::FillStyle;
pub use font::{FontStyle, DEFAULT_FONT_NAME, DEFAULT_FONT_SIZE};

/// Everything the xlsx writer turns into one `<xf>` record.
///
/// `Eq + Hash` so equal styles collapse to the same record.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Default)]
pub struct Style {
    pub font: FontStyle,
    pub fill: FillStyle,
    pub border: BorderStyle,
    pub alignment: Alignment,
}

impl Style {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn bold(mut self, bold: bool) -> Self {
        self.font.bold = bold;
        self
    }

    /// Points
    pub fn font_size(mut self, size: f64) -> Self {
        self.font.size = size;
        self
    }

    pub fn font_name(mut self, name: impl Into<String>) -> Self {
        self.font.name = name.into();
        self
    }

    pub fn font_color(mut self, color: Color) -> Self {
        self.font.color = color;
        self
    }

    pub fn fill_color(mut self, color: Color) -> Self {
        self.fill = FillStyle::solid(color);
        self
    }

    pub fn border(mut self, border: BorderStyle) -> Self {
        self.border = border;
        self
    }

    pub fn horizontal_alignment(mut self, horizontal: HorizontalAlignment) -> Self {
        self.alignment.horizontal = horizontal;
        self
    }

    pub fn vertical_alignment(mut self, vertical: VerticalAlignment) -> Self {
        self.alignment.vertical = vertical;
        self
    }
}
