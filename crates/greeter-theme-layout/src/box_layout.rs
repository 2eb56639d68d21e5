//! Box layout: children stacked along one axis.
//!
//! Children keep document order. Padding insets the content on both sides of
//! each axis; spacing separates neighbours.

use glam::IVec2;

use greeter_theme_core::{BoxLayout, Orientation, Rect};

/// Size request of one box child for distribution.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct BoxChild {
    /// Requested length along the box axis.
    pub length: i32,
    /// Requested length across the axis; `None` fills the content.
    pub cross: Option<i32>,
    /// Share leftover length with the other expanding children.
    pub expand: bool,
}

impl BoxChild {
    pub fn new(length: i32) -> Self {
        Self {
            length,
            ..Self::default()
        }
    }

    pub fn with_cross(mut self, cross: i32) -> Self {
        self.cross = Some(cross);
        self
    }

    pub fn expanding(mut self) -> Self {
        self.expand = true;
        self
    }
}

fn along_cross(size: IVec2, orientation: Orientation) -> (i32, i32) {
    match orientation {
        Orientation::Horizontal => (size.x, size.y),
        Orientation::Vertical => (size.y, size.x),
    }
}

fn from_along_cross(along: i32, cross: i32, orientation: Orientation) -> IVec2 {
    match orientation {
        Orientation::Horizontal => IVec2::new(along, cross),
        Orientation::Vertical => IVec2::new(cross, along),
    }
}

fn total_spacing(layout: &BoxLayout, n: usize) -> i32 {
    layout.spacing * n.saturating_sub(1) as i32
}

/// Size of a box from its children's sizes: the sum (or, homogeneous,
/// `n` times the largest) along the axis, the largest across it, plus
/// padding, floored by the minimums.
pub fn natural_size(layout: &BoxLayout, children: &[IVec2]) -> IVec2 {
    let orientation = layout.orientation;
    let (sum, max_along, max_cross) = children.iter().fold((0, 0, 0), |(sum, max_along, max_cross), size| {
        let (along, cross) = along_cross(*size, orientation);
        (sum + along, max_along.max(along), max_cross.max(cross))
    });
    let stacked = if layout.homogeneous {
        max_along * children.len() as i32
    } else {
        sum
    };
    let along = stacked + total_spacing(layout, children.len());

    let content = from_along_cross(along, max_cross, orientation);
    IVec2::new(
        (content.x + 2 * layout.xpadding).max(layout.min_width),
        (content.y + 2 * layout.ypadding).max(layout.min_height),
    )
}

/// Assign each child a rectangle inside `container`.
pub fn distribute(layout: &BoxLayout, container: Rect, children: &[BoxChild]) -> Vec<Rect> {
    if children.is_empty() {
        return Vec::new();
    }
    let orientation = layout.orientation;
    let content = container.inset(layout.xpadding, layout.ypadding);
    let content_along = content.length(orientation);
    let content_cross = content.length(orientation.cross());
    let n = children.len();
    let spacing = total_spacing(layout, n);

    let lengths: Vec<i32> = if layout.homogeneous {
        let each = ((content_along - spacing) / n as i32).max(0);
        vec![each; n]
    } else {
        let requested: i32 = children.iter().map(|c| c.length.max(0)).sum();
        let expanding = children.iter().filter(|c| c.expand).count() as i32;
        let leftover = (content_along - requested - spacing).max(0);
        let (share, mut remainder) = if expanding > 0 {
            (leftover / expanding, leftover % expanding)
        } else {
            (0, 0)
        };
        children
            .iter()
            .map(|child| {
                let mut length = child.length.max(0);
                if child.expand {
                    length += share;
                    if remainder > 0 {
                        length += 1;
                        remainder -= 1;
                    }
                }
                length
            })
            .collect()
    };

    let (start_along, start_cross) = along_cross(content.position(), orientation);
    let mut cursor = start_along;
    children
        .iter()
        .zip(lengths)
        .map(|(child, length)| {
            let cross = child.cross.unwrap_or(content_cross).max(0);
            let position = from_along_cross(cursor, start_cross, orientation);
            let size = from_along_cross(length, cross, orientation);
            cursor += length + layout.spacing;
            Rect::from_vecs(position, size)
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    fn horizontal() -> BoxLayout {
        BoxLayout::default()
    }

    fn vertical() -> BoxLayout {
        BoxLayout {
            orientation: Orientation::Vertical,
            ..BoxLayout::default()
        }
    }

    #[test]
    fn test_horizontal_with_spacing() {
        let layout = BoxLayout {
            spacing: 10,
            ..horizontal()
        };
        let container = Rect::new(0, 0, 300, 40);
        let result = distribute(&layout, container, &[BoxChild::new(100), BoxChild::new(100)]);

        assert_eq!(result, vec![Rect::new(0, 0, 100, 40), Rect::new(110, 0, 100, 40)]);
    }

    #[test]
    fn test_vertical_with_padding() {
        let layout = BoxLayout {
            xpadding: 5,
            ypadding: 20,
            spacing: 4,
            ..vertical()
        };
        let container = Rect::new(10, 10, 200, 200);
        let result = distribute(&layout, container, &[BoxChild::new(30), BoxChild::new(20).with_cross(50)]);

        assert_eq!(result[0], Rect::new(15, 30, 190, 30));
        assert_eq!(result[1], Rect::new(15, 64, 50, 20));
    }

    #[test]
    fn test_expand_shares_leftover() {
        let container = Rect::new(0, 0, 100, 10);
        let children = [BoxChild::new(10), BoxChild::new(10).expanding(), BoxChild::new(10).expanding()];
        let result = distribute(&horizontal(), container, &children);

        // leftover 70 split 35/35
        assert_eq!(result[0].width, 10);
        assert_eq!(result[1], Rect::new(10, 0, 45, 10));
        assert_eq!(result[2], Rect::new(55, 0, 45, 10));
    }

    #[test]
    fn test_expand_remainder_goes_first() {
        let container = Rect::new(0, 0, 11, 10);
        let children = [BoxChild::new(0).expanding(), BoxChild::new(0).expanding()];
        let widths: Vec<i32> = distribute(&horizontal(), container, &children)
            .iter()
            .map(|r| r.width)
            .collect();
        assert_eq!(widths, vec![6, 5]);
    }

    #[test]
    fn test_overflow_does_not_shrink() {
        let container = Rect::new(0, 0, 50, 10);
        let children = [BoxChild::new(40), BoxChild::new(40).expanding()];
        let result = distribute(&horizontal(), container, &children);
        assert_eq!(result[1], Rect::new(40, 0, 40, 10));
    }

    #[test]
    fn test_homogeneous() {
        let layout = BoxLayout {
            homogeneous: true,
            spacing: 10,
            ..horizontal()
        };
        let container = Rect::new(0, 0, 320, 20);
        let children = [BoxChild::new(5), BoxChild::new(500), BoxChild::new(0)];
        let result = distribute(&layout, container, &children);

        assert_eq!(result[0], Rect::new(0, 0, 100, 20));
        assert_eq!(result[1], Rect::new(110, 0, 100, 20));
        assert_eq!(result[2], Rect::new(220, 0, 100, 20));
    }

    #[test]
    fn test_natural_size() {
        let layout = BoxLayout {
            spacing: 5,
            xpadding: 2,
            ypadding: 3,
            ..vertical()
        };
        let size = natural_size(&layout, &[IVec2::new(40, 10), IVec2::new(60, 20)]);
        assert_eq!(size, IVec2::new(64, 41));

        let homogeneous = BoxLayout {
            homogeneous: true,
            ..horizontal()
        };
        assert_eq!(
            natural_size(&homogeneous, &[IVec2::new(10, 5), IVec2::new(30, 8)]),
            IVec2::new(60, 8)
        );
    }

    #[test]
    fn test_empty_box_is_padding_and_floors() {
        let layout = BoxLayout {
            xpadding: 4,
            ypadding: 4,
            min_width: 100,
            ..horizontal()
        };
        assert_eq!(natural_size(&layout, &[]), IVec2::new(100, 8));
        assert!(distribute(&layout, Rect::new(0, 0, 10, 10), &[]).is_empty());
    }
}
