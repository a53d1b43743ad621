//! Cell background

use super::Color;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum FillStyle {
    #[default]
    None,
    Solid { color: Color },
}

impl FillStyle {
    pub fn solid(color: Color) -> Self {
        FillStyle::Solid { color }
    }

    pub fn is_none(&self) -> bool {
        *self == FillStyle::None
    }

    pub fn color(&self) -> Option<Color> {
        if let FillStyle::Solid { color } = self {
            Some(*color)
        } else {
            None
        }
    }

    /// No fill, or one that renders like none (white, fully transparent)
    pub fn is_default(&self) -> bool {
        match self.color() {
            Some(color) => color.is_default_fill(),
            None => true,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_is_default() {
        assert!(FillStyle::None.is_default());
        assert!(FillStyle::solid(Color::WHITE).is_default());
        assert!(FillStyle::solid(Color::argb(0, 0xC0, 0xC0, 0xC0)).is_default());
        assert!(!FillStyle::solid(Color::rgb(0xCC, 0xFF, 0xFF)).is_default());
        assert_eq!(FillStyle::None.color(), None);
    }
}
