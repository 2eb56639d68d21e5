//! Geometry resolution for an item tree.
//!
//! One top-down pass assigns every visible item an absolute rectangle.
//! Content-derived sizes (text blocks, box containers) are computed
//! bottom-up on demand and memoized for the pass.

use std::collections::HashMap;

use glam::IVec2;

use greeter_theme_core::{
    percent_of, BoxLayout, Children, ConfigAccessor, Extent, ItemKind, ItemNode, ItemTree, NodeId, Orientation,
    Rect, VisualState,
};

use crate::box_layout::{self, BoxChild};
use crate::expand::{expand_text, ExpansionContext};
use crate::measure::TextMeasure;
use crate::text::{wrap, WrappedBlock};
use crate::visibility::{is_visible, RuntimeContext};

/// Options for geometry resolution.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ResolveOptions {
    /// Width of text entries in approximate characters.
    pub entry_width_chars: u32,
    /// Values for greeter escapes in label text.
    pub expansion: ExpansionContext,
    /// Font for text items whose style names none.
    pub default_font: Option<String>,
}

impl Default for ResolveOptions {
    fn default() -> Self {
        Self {
            entry_width_chars: 20,
            expansion: ExpansionContext::default(),
            default_font: None,
        }
    }
}

impl ResolveOptions {
    /// Seed the timed-login escapes from the greeter configuration.
    pub fn from_config(config: &dyn ConfigAccessor) -> Self {
        let mut options = Self::default();
        options.expansion.timed_user = config.get_string("daemon/TimedLogin").unwrap_or_default();
        options.expansion.timed_delay = config.get_int("daemon/TimedLoginDelay").unwrap_or(30);
        options
    }
}

/// Font of a text-bearing node in `state`, falling back to the default.
pub(crate) fn node_font<'a>(node: &'a ItemNode, state: VisualState, options: &'a ResolveOptions) -> Option<&'a str> {
    let styled = match &node.kind {
        ItemKind::Label(text) | ItemKind::Entry(text) | ItemKind::Button(text) => text.styles.get(state).font.as_deref(),
        ItemKind::List(list) => list.styles.get(state).font.as_deref(),
        ItemKind::Rect(_) | ItemKind::Image(_) => None,
    };
    styled.or(options.default_font.as_deref())
}

/// Wrap a label's or button's text for a width budget.
pub(crate) fn wrap_node_text(
    node: &ItemNode,
    budget: Option<i32>,
    oracle: &dyn TextMeasure,
    options: &ResolveOptions,
) -> Option<WrappedBlock> {
    let text = match &node.kind {
        ItemKind::Label(text) | ItemKind::Button(text) => text,
        _ => return None,
    };
    let expanded = expand_text(&text.text, &options.expansion, text.markup);
    let font = node_font(node, VisualState::Normal, options);
    Some(wrap(&expanded, text.markup, budget, font, oracle))
}

/// Effective wrap width of a text item: the tightest of its character
/// limit, its screen percentage and the width it is given.
pub(crate) fn text_budget(
    node: &ItemNode,
    avail: Option<i32>,
    surface_width: i32,
    oracle: &dyn TextMeasure,
    options: &ResolveOptions,
) -> Option<i32> {
    let Some(text) = node.kind.text() else {
        return avail;
    };
    let font = node_font(node, VisualState::Normal, options);
    let by_chars = text
        .max_width_chars
        .map(|chars| chars as i32 * oracle.approximate_char_width(font));
    let by_screen = text
        .max_screen_percent_width
        .map(|percent| percent_of(percent, surface_width));
    [by_chars, by_screen, avail].into_iter().flatten().min()
}

/// Resolve every item's rectangle for a surface of the given size. Hidden
/// items, and everything below them, end up with no rectangle. The size
/// gate of show predicates sees the same surface, whatever `runtime` says.
pub fn resolve(
    tree: &mut ItemTree,
    surface_width: i32,
    surface_height: i32,
    oracle: &dyn TextMeasure,
    runtime: &RuntimeContext,
    options: &ResolveOptions,
) {
    let runtime = RuntimeContext {
        surface_width,
        surface_height,
        ..*runtime
    };
    let rects = {
        let mut resolver = Resolver::new(tree, surface_width, oracle, &runtime, options);
        let root = tree.root();
        if resolver.visible(root) {
            let surface = Rect::new(0, 0, surface_width.max(0), surface_height.max(0));
            let rect = resolver.fixed_rect(root, surface);
            resolver.place(root, rect);
        }
        resolver.rects
    };

    tree.clear_resolved();
    let mut placed = 0;
    for (index, rect) in rects.into_iter().enumerate() {
        if let (Some(rect), Some(node)) = (rect, tree.get_mut(NodeId(index))) {
            node.resolved = Some(rect);
            placed += 1;
        }
    }
    log::debug!(
        "resolved {placed} of {} items on a {surface_width}x{surface_height} surface",
        tree.len()
    );
}

/// Per-pass resolution state.
struct Resolver<'a> {
    tree: &'a ItemTree,
    oracle: &'a dyn TextMeasure,
    runtime: &'a RuntimeContext,
    options: &'a ResolveOptions,
    surface_width: i32,
    rects: Vec<Option<Rect>>,
    natural: HashMap<(NodeId, Option<i32>), IVec2>,
}

impl<'a> Resolver<'a> {
    fn new(
        tree: &'a ItemTree,
        surface_width: i32,
        oracle: &'a dyn TextMeasure,
        runtime: &'a RuntimeContext,
        options: &'a ResolveOptions,
    ) -> Self {
        Self {
            tree,
            oracle,
            runtime,
            options,
            surface_width,
            rects: vec![None; tree.len()],
            natural: HashMap::new(),
        }
    }

    fn visible(&self, id: NodeId) -> bool {
        is_visible(&self.tree[id], self.runtime)
    }

    fn visible_children(&self, id: NodeId) -> Vec<NodeId> {
        self.tree
            .children(id)
            .iter()
            .copied()
            .filter(|child| self.visible(*child))
            .collect()
    }

    /// Assign `rect` to `id` and lay out its children inside it.
    fn place(&mut self, id: NodeId, rect: Rect) {
        let rect = Rect::new(rect.x, rect.y, rect.width.max(0), rect.height.max(0));
        log::trace!("{:?} {} -> {:?}", id, self.tree[id].kind.type_name(), rect);
        self.rects[id.0] = Some(rect);

        let tree = self.tree;
        match &tree[id].children {
            Children::None => {}
            Children::Fixed(_) => {
                for child in self.visible_children(id) {
                    let child_rect = self.fixed_rect(child, rect);
                    self.place(child, child_rect);
                }
            }
            Children::Box(_) => {
                let layout = tree[id].box_layout.unwrap_or_default();
                let content = rect.inset(layout.xpadding, layout.ypadding);
                let children = self.visible_children(id);
                let requests: Vec<BoxChild> = children
                    .iter()
                    .map(|child| self.box_child(*child, &layout, content))
                    .collect();
                for (child, child_rect) in children.into_iter().zip(box_layout::distribute(&layout, rect, &requests)) {
                    self.place(child, child_rect);
                }
            }
        }
    }

    /// Rectangle of an anchored child inside `parent`.
    fn fixed_rect(&mut self, id: NodeId, parent: Rect) -> Rect {
        let tree = self.tree;
        let node = &tree[id];
        let size = self.requested_size(id, Some(parent.size()), None);
        let x = parent.x + node.position.x.resolve(parent.width);
        let y = parent.y + node.position.y.resolve(parent.height);
        let anchor = node.position.anchor.offset(size.x, size.y);
        Rect::new(x - anchor.x, y - anchor.y, size.x, size.y)
    }

    /// Request of a box child: explicit sizes resolve against the
    /// container's content; an unset cross size fills it.
    fn box_child(&mut self, id: NodeId, layout: &BoxLayout, content: Rect) -> BoxChild {
        let tree = self.tree;
        let node = &tree[id];
        let orientation = layout.orientation;
        let along_extent = node.size.along(orientation);
        let cross_extent = node.size.across(orientation);
        // the width the child will get, which its text wraps to
        let avail = Some(node.size.width.fixed(content.width).unwrap_or(content.width));

        let natural = if along_extent.fixed(0).is_none() || matches!(cross_extent, Extent::Box | Extent::Scale) {
            Some(self.natural_size(id, avail))
        } else {
            None
        };
        let pick = |v: IVec2| match orientation {
            Orientation::Horizontal => (v.x, v.y),
            Orientation::Vertical => (v.y, v.x),
        };
        let (natural_along, natural_cross) = natural.map(pick).unwrap_or((0, 0));
        let floors = node
            .box_layout
            .map(|b| pick(IVec2::new(b.min_width, b.min_height)))
            .unwrap_or((0, 0));

        let length = along_extent
            .fixed(content.length(orientation))
            .unwrap_or(natural_along)
            .max(floors.0);
        let cross = match cross_extent {
            Extent::Unset => None,
            Extent::Box | Extent::Scale => Some(natural_cross.max(floors.1)),
            Extent::Pixels(_) | Extent::Percent(_) => {
                cross_extent.fixed(content.length(orientation.cross())).map(|c| c.max(floors.1))
            }
        };
        BoxChild {
            length,
            cross,
            expand: node.expand,
        }
    }

    /// Size from the item's own request; percentages resolve against
    /// `parent` (0 while it is still unknown), anything content-derived
    /// comes from [`Self::natural_size`]. Content flows into the item's own
    /// width when that is known, otherwise into `avail`.
    fn requested_size(&mut self, id: NodeId, parent: Option<IVec2>, avail: Option<i32>) -> IVec2 {
        let tree = self.tree;
        let node = &tree[id];
        let width = node.size.width.fixed(parent.map_or(0, |p| p.x));
        let height = node.size.height.fixed(parent.map_or(0, |p| p.y));
        let flow = match node.size.width {
            Extent::Percent(_) if parent.is_none() => avail,
            _ => width.or(avail),
        };
        let natural = match (width, height) {
            (Some(_), Some(_)) => IVec2::ZERO,
            _ => self.natural_size(id, flow),
        };
        let mut size = IVec2::new(width.unwrap_or(natural.x), height.unwrap_or(natural.y));
        if let Some(layout) = node.box_layout {
            size = size.max(IVec2::new(layout.min_width, layout.min_height));
        }
        size
    }

    /// Content-derived size of an item given the width available to its
    /// text.
    fn natural_size(&mut self, id: NodeId, avail: Option<i32>) -> IVec2 {
        if let Some(size) = self.natural.get(&(id, avail)) {
            return *size;
        }
        let tree = self.tree;
        let node = &tree[id];
        let size = if node.children.is_box() {
            self.box_natural_size(id, avail)
        } else {
            match &node.kind {
                ItemKind::Rect(_) => IVec2::ZERO,
                ItemKind::Image(image) => image.natural_size.unwrap_or(IVec2::ZERO),
                ItemKind::Label(_) | ItemKind::Button(_) => {
                    let budget = text_budget(node, avail, self.surface_width, self.oracle, self.options);
                    wrap_node_text(node, budget, self.oracle, self.options)
                        .map_or(IVec2::ZERO, |block| block.size())
                }
                ItemKind::Entry(_) => {
                    let font = node_font(node, VisualState::Normal, self.options);
                    let line = self.oracle.measure("0", font, false);
                    IVec2::new(self.options.entry_width_chars as i32 * line.x, line.y)
                }
                ItemKind::List(list) => {
                    let font = node_font(node, VisualState::Normal, self.options);
                    let rows: Vec<IVec2> = list
                        .entries
                        .iter()
                        .map(|entry| self.oracle.measure(&entry.label, font, false))
                        .collect();
                    let width = rows.iter().map(|r| r.x).max().unwrap_or(0);
                    let height = if list.combo {
                        rows.first().copied().unwrap_or_else(|| self.oracle.measure("0", font, false)).y
                    } else {
                        rows.iter().map(|r| r.y).sum()
                    };
                    IVec2::new(width, height)
                }
            }
        };
        self.natural.insert((id, avail), size);
        size
    }

    /// `avail` is the box's own width when known.
    fn box_natural_size(&mut self, id: NodeId, avail: Option<i32>) -> IVec2 {
        let tree = self.tree;
        let node = &tree[id];
        let layout = node.box_layout.unwrap_or_default();
        let content_avail = avail.map(|w| (w - 2 * layout.xpadding).max(0));
        let content = content_avail.map(|w| IVec2::new(w, 0));

        let sizes: Vec<IVec2> = self
            .visible_children(id)
            .into_iter()
            .map(|child| self.requested_size(child, content, content_avail))
            .collect();
        box_layout::natural_size(&layout, &sizes)
    }
}

/// Replace the text of a label, entry or button and forget the rectangles
/// that depend on it. Returns `false` for items without text.
pub fn set_text(tree: &mut ItemTree, id: NodeId, text: &str) -> bool {
    let Some(payload) = tree.get_mut(id).and_then(|node| node.kind.text_mut()) else {
        return false;
    };
    payload.text = text.to_string();
    tree.invalidate(id);
    true
}

/// Topmost resolved item under a point, excluding the root. Later siblings
/// paint over earlier ones and win.
pub fn hit_test(tree: &ItemTree, x: i32, y: i32) -> Option<NodeId> {
    fn descend(tree: &ItemTree, id: NodeId, x: i32, y: i32) -> Option<NodeId> {
        if !tree.resolved(id)?.contains(x, y) {
            return None;
        }
        tree.children(id)
            .iter()
            .rev()
            .find_map(|child| descend(tree, *child, x, y))
            .or(Some(id))
    }
    descend(tree, tree.root(), x, y).filter(|id| *id != tree.root())
}

/// The clickable group under a point: the hit item if it is a button,
/// otherwise the button that owns it.
pub fn button_at(tree: &ItemTree, x: i32, y: i32) -> Option<NodeId> {
    let hit = hit_test(tree, x, y)?;
    let node = &tree[hit];
    if node.button {
        Some(hit)
    } else {
        node.button_owner
    }
}
