//! Text measurement oracle.
//!
//! Layout never shapes text itself; it asks a [`TextMeasure`] for the pixel
//! extent of a string in a font. The caller provides the real renderer's
//! measurement; [`MonospaceMeasure`] is a deterministic stand-in.

use glam::IVec2;

use crate::markup;

/// Pixel measurement of rendered text. Implementations must return the same
/// size for the same input within one layout pass.
pub trait TextMeasure {
    /// Size of `text` rendered in `font`. Newlines start new lines. With
    /// `markup` set the text carries inline tags that take no space.
    fn measure(&self, text: &str, font: Option<&str>, markup: bool) -> IVec2;

    /// Typical character advance, used for `max-width` in characters and
    /// entry widths.
    fn approximate_char_width(&self, font: Option<&str>) -> i32 {
        self.measure("0", font, false).x
    }
}

/// Fixed-advance measurement: every character is `advance` pixels wide and
/// every line `line_height` tall, both scaled by the point size at the end of
/// a font description (`"Sans Bold 12"`) relative to `base_size`.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct MonospaceMeasure {
    pub advance: i32,
    pub line_height: i32,
    pub base_size: f64,
}

impl Default for MonospaceMeasure {
    fn default() -> Self {
        Self {
            advance: 8,
            line_height: 16,
            base_size: 10.0,
        }
    }
}

impl MonospaceMeasure {
    pub fn new(advance: i32, line_height: i32) -> Self {
        Self {
            advance,
            line_height,
            ..Self::default()
        }
    }

    fn scale(&self, font: Option<&str>) -> f64 {
        font.and_then(point_size)
            .filter(|size| *size > 0.0 && self.base_size > 0.0)
            .map_or(1.0, |size| size / self.base_size)
    }
}

impl TextMeasure for MonospaceMeasure {
    fn measure(&self, text: &str, font: Option<&str>, markup: bool) -> IVec2 {
        let visible = if markup {
            markup::visible_text(text).unwrap_or_else(|| text.to_string())
        } else {
            text.to_string()
        };
        let scale = self.scale(font);
        let advance = (self.advance as f64 * scale).round() as i32;
        let line_height = (self.line_height as f64 * scale).round() as i32;

        let (columns, rows) = visible
            .split('\n')
            .fold((0usize, 0i32), |(widest, rows), line| (widest.max(line.chars().count()), rows + 1));
        IVec2::new(columns as i32 * advance, rows * line_height)
    }
}

/// Trailing point size of a font description, if any.
pub fn point_size(font: &str) -> Option<f64> {
    font.split_whitespace().last()?.parse().ok()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_plain_measurement() {
        let oracle = MonospaceMeasure::default();
        assert_eq!(oracle.measure("hello", None, false), IVec2::new(40, 16));
        assert_eq!(oracle.measure("", None, false), IVec2::new(0, 16));
        assert_eq!(oracle.measure("ab\nabcd", None, false), IVec2::new(32, 32));
    }

    #[test]
    fn test_markup_is_zero_width() {
        let oracle = MonospaceMeasure::default();
        assert_eq!(oracle.measure("<b>hi</b> &amp; bye", None, true), IVec2::new(64, 16));
        // not well-formed, measured as written
        assert_eq!(oracle.measure("<b>hi", None, true), IVec2::new(40, 16));
    }

    #[test]
    fn test_font_size_scales() {
        let oracle = MonospaceMeasure::default();
        assert_eq!(oracle.measure("abc", Some("Sans Bold 20"), false), IVec2::new(48, 32));
        assert_eq!(oracle.measure("abc", Some("Sans"), false), IVec2::new(24, 16));
        assert_eq!(oracle.approximate_char_width(Some("Mono 5")), 4);
    }

    #[test]
    fn test_point_size() {
        assert_eq!(point_size("Sans 12"), Some(12.0));
        assert_eq!(point_size("DejaVu Sans Bold 9.5"), Some(9.5));
        assert_eq!(point_size("Sans"), None);
    }
}
