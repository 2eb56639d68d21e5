//! Core value types for greeter themes.

use glam::IVec2;

/// A color with an 8-bit alpha channel packed as `0xRRGGBBAA`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Rgba(pub u32);

impl Rgba {
    pub const WHITE: Self = Self(0xFFFF_FFFF);
    pub const BLACK: Self = Self(0x0000_00FF);
    pub const TRANSPARENT: Self = Self(0x0000_0000);

    /// Parse a `#RRGGBB` color. Exactly seven characters with a leading `#`;
    /// the result is fully opaque.
    pub fn from_hex(hex: &str) -> Option<Self> {
        let digits = hex.strip_prefix('#')?;
        if digits.len() != 6 || !digits.bytes().all(|b| b.is_ascii_hexdigit()) {
            return None;
        }
        let rgb = u32::from_str_radix(digits, 16).ok()?;
        Some(Self((rgb << 8) | 0xFF))
    }

    /// Replace the alpha channel. `alpha` is clamped to `[0, 1]` and
    /// quantized to 8 bits (rounded to nearest).
    pub fn with_alpha(self, alpha: f64) -> Self {
        Self((self.0 & 0xFFFF_FF00) | quantize_alpha(alpha) as u32)
    }

    pub fn red(self) -> u8 {
        (self.0 >> 24) as u8
    }

    pub fn green(self) -> u8 {
        (self.0 >> 16) as u8
    }

    pub fn blue(self) -> u8 {
        (self.0 >> 8) as u8
    }

    pub fn alpha(self) -> u8 {
        self.0 as u8
    }

    /// Convert to hex string (e.g., "#FF5733CC").
    pub fn to_hex(self) -> String {
        format!("#{:08X}", self.0)
    }
}

/// Clamp an alpha value to `[0, 1]` and scale it to an 8-bit channel.
pub fn quantize_alpha(alpha: f64) -> u8 {
    if alpha.is_nan() {
        return 0;
    }
    (alpha.clamp(0.0, 1.0) * 255.0).round() as u8
}

/// Percentage of a length in whole pixels, rounded half away from zero.
pub fn percent_of(percent: f64, length: i32) -> i32 {
    (percent / 100.0 * length as f64).round() as i32
}

/// Which point of an item's own box is placed on its (x, y) position.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum Anchor {
    #[default]
    NorthWest,
    North,
    NorthEast,
    West,
    Center,
    East,
    SouthWest,
    South,
    SouthEast,
}

impl Anchor {
    /// Look up an anchor by its theme name (`nw`, `n`, ..., `c`, ..., `se`).
    pub fn from_name(name: &str) -> Option<Self> {
        let anchor = match name {
            "nw" => Anchor::NorthWest,
            "n" => Anchor::North,
            "ne" => Anchor::NorthEast,
            "w" => Anchor::West,
            "c" | "center" => Anchor::Center,
            "e" => Anchor::East,
            "sw" => Anchor::SouthWest,
            "s" => Anchor::South,
            "se" => Anchor::SouthEast,
            _ => return None,
        };
        Some(anchor)
    }

    /// Distance from the item's top-left corner to the anchor point.
    pub fn offset(self, width: i32, height: i32) -> IVec2 {
        let dx = match self {
            Anchor::NorthWest | Anchor::West | Anchor::SouthWest => 0,
            Anchor::North | Anchor::Center | Anchor::South => width / 2,
            Anchor::NorthEast | Anchor::East | Anchor::SouthEast => width,
        };
        let dy = match self {
            Anchor::NorthWest | Anchor::North | Anchor::NorthEast => 0,
            Anchor::West | Anchor::Center | Anchor::East => height / 2,
            Anchor::SouthWest | Anchor::South | Anchor::SouthEast => height,
        };
        IVec2::new(dx, dy)
    }
}

/// One axis of an item's position.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum Coord {
    #[default]
    Unset,
    /// Absolute pixels (magnitude; see [`Offset::negative`]).
    Pixels(f64),
    /// Percentage of the parent's dimension (magnitude).
    Percent(f64),
}

/// A position coordinate plus its sign flag. Negative offsets are measured
/// from the far edge of the parent.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Offset {
    pub coord: Coord,
    pub negative: bool,
}

impl Offset {
    pub fn pixels(value: f64) -> Self {
        Self {
            coord: Coord::Pixels(value.abs()),
            negative: value.is_sign_negative(),
        }
    }

    pub fn percent(value: f64) -> Self {
        Self {
            coord: Coord::Percent(value.abs()),
            negative: value.is_sign_negative(),
        }
    }

    /// Resolve against the parent's length along this axis, relative to the
    /// parent's origin.
    pub fn resolve(&self, parent_length: i32) -> i32 {
        let magnitude = match self.coord {
            Coord::Unset => return 0,
            Coord::Pixels(px) => px.round() as i32,
            Coord::Percent(p) => percent_of(p, parent_length),
        };
        if self.negative {
            parent_length - magnitude
        } else {
            magnitude
        }
    }
}

/// One axis of an item's size request.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum Extent {
    #[default]
    Unset,
    Pixels(f64),
    Percent(f64),
    /// Computed from the item's content (text block or box children).
    Box,
    /// The asset's natural size, scaled uniformly into the assigned box.
    Scale,
}

impl Extent {
    /// The size in pixels when it does not depend on content.
    pub fn fixed(&self, parent_length: i32) -> Option<i32> {
        match *self {
            Extent::Pixels(px) => Some(px.round() as i32),
            Extent::Percent(p) => Some(percent_of(p, parent_length)),
            Extent::Unset | Extent::Box | Extent::Scale => None,
        }
    }

    pub fn is_set(&self) -> bool {
        !matches!(self, Extent::Unset)
    }
}

/// Anchor plus x/y offsets.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Position {
    pub anchor: Anchor,
    pub x: Offset,
    pub y: Offset,
}

/// Width and height requests.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct SizeRequest {
    pub width: Extent,
    pub height: Extent,
}

impl SizeRequest {
    /// The request along the given axis.
    pub fn along(&self, orientation: Orientation) -> Extent {
        match orientation {
            Orientation::Horizontal => self.width,
            Orientation::Vertical => self.height,
        }
    }

    /// The request across the given axis.
    pub fn across(&self, orientation: Orientation) -> Extent {
        self.along(orientation.cross())
    }
}

/// Box orientation.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum Orientation {
    #[default]
    Horizontal,
    Vertical,
}

impl Orientation {
    pub fn cross(self) -> Self {
        match self {
            Orientation::Horizontal => Orientation::Vertical,
            Orientation::Vertical => Orientation::Horizontal,
        }
    }
}

/// Layout parameters of a box container.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct BoxLayout {
    pub orientation: Orientation,
    pub homogeneous: bool,
    pub spacing: i32,
    /// Inset applied on the left and right edges.
    pub xpadding: i32,
    /// Inset applied on the top and bottom edges.
    pub ypadding: i32,
    pub min_width: i32,
    pub min_height: i32,
}

impl BoxLayout {
    /// Padding on one side along the given axis.
    pub fn padding(&self, orientation: Orientation) -> i32 {
        match orientation {
            Orientation::Horizontal => self.xpadding,
            Orientation::Vertical => self.ypadding,
        }
    }

    /// Lower bound on the container's size along the given axis.
    pub fn min_length(&self, orientation: Orientation) -> i32 {
        match orientation {
            Orientation::Horizontal => self.min_width,
            Orientation::Vertical => self.min_height,
        }
    }
}

/// A resolved rectangle in integer pixels, absolute to the root surface.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Rect {
    pub x: i32,
    pub y: i32,
    pub width: i32,
    pub height: i32,
}

impl Rect {
    pub fn new(x: i32, y: i32, width: i32, height: i32) -> Self {
        Self { x, y, width, height }
    }

    pub fn from_vecs(position: IVec2, size: IVec2) -> Self {
        Self::new(position.x, position.y, size.x, size.y)
    }

    pub fn position(&self) -> IVec2 {
        IVec2::new(self.x, self.y)
    }

    pub fn size(&self) -> IVec2 {
        IVec2::new(self.width, self.height)
    }

    pub fn right(&self) -> i32 {
        self.x + self.width
    }

    pub fn bottom(&self) -> i32 {
        self.y + self.height
    }

    /// Length along the given axis.
    pub fn length(&self, orientation: Orientation) -> i32 {
        match orientation {
            Orientation::Horizontal => self.width,
            Orientation::Vertical => self.height,
        }
    }

    /// Zero-area rectangles are valid but draw nothing.
    pub fn is_degenerate(&self) -> bool {
        self.width <= 0 || self.height <= 0
    }

    /// Check if a point is inside the rectangle (right/bottom edges exclusive).
    pub fn contains(&self, x: i32, y: i32) -> bool {
        x >= self.x && x < self.right() && y >= self.y && y < self.bottom()
    }

    /// Shrink by `dx` on the left and right and `dy` on the top and bottom.
    /// The size never goes below zero.
    pub fn inset(&self, dx: i32, dy: i32) -> Rect {
        Rect::new(
            self.x + dx,
            self.y + dy,
            (self.width - 2 * dx).max(0),
            (self.height - 2 * dy).max(0),
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_color_requires_exact_hex() {
        assert_eq!(Rgba::from_hex("#FF8000"), Some(Rgba(0xFF80_00FF)));
        assert_eq!(Rgba::from_hex("FF8000"), None);
        assert_eq!(Rgba::from_hex("#FF800"), None);
        assert_eq!(Rgba::from_hex("#FF80001"), None);
        assert_eq!(Rgba::from_hex("#GG8000"), None);
    }

    #[test]
    fn test_alpha_is_clamped_and_quantized() {
        let c = Rgba::from_hex("#102030").unwrap();
        assert_eq!(c.with_alpha(0.5).alpha(), 128);
        assert_eq!(c.with_alpha(2.0).alpha(), 255);
        assert_eq!(c.with_alpha(-1.0).alpha(), 0);
        assert_eq!(c.with_alpha(0.5).red(), 0x10);
        assert_eq!(c.with_alpha(0.5).to_hex(), "#10203080");
    }

    #[test]
    fn test_anchor_offsets() {
        assert_eq!(Anchor::NorthWest.offset(10, 20), IVec2::new(0, 0));
        assert_eq!(Anchor::Center.offset(10, 20), IVec2::new(5, 10));
        assert_eq!(Anchor::SouthEast.offset(10, 20), IVec2::new(10, 20));
        assert_eq!(Anchor::from_name("c"), Some(Anchor::Center));
        assert_eq!(Anchor::from_name("middle"), None);
    }

    #[test]
    fn test_negative_offset_measures_from_far_edge() {
        assert_eq!(Offset::pixels(-10.0).resolve(200), 190);
        assert_eq!(Offset::pixels(10.0).resolve(200), 10);
        assert_eq!(Offset::percent(-25.0).resolve(200), 150);
        assert_eq!(Offset::default().resolve(200), 0);
    }

    #[test]
    fn test_percent_rounding() {
        assert_eq!(percent_of(50.0, 201), 101);
        assert_eq!(percent_of(33.0, 100), 33);
        assert_eq!(Extent::Percent(50.0).fixed(200), Some(100));
        assert_eq!(Extent::Box.fixed(200), None);
    }

    #[test]
    fn test_rect_inset_never_negative() {
        let r = Rect::new(0, 0, 10, 10).inset(8, 2);
        assert_eq!(r, Rect::new(8, 2, 0, 6));
        assert!(r.is_degenerate());
    }
}
