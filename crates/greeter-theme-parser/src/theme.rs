//! Recursive descent over a theme document.
//!
//! The document root must be `<greeter>`. Each `<item>` becomes one node of
//! the [`ItemTree`]; `<fixed>` and `<box>` elements open a nested level.

use std::path::Path;

use roxmltree::Node;

use greeter_theme_core::{
    Anchor, BoxLayout, Extent, ImageFormat, ImageItem, ImageStyle, ItemKind, ItemNode, ItemTree, ListEntry,
    ListItem, NodeId, Orientation, ParseError, Placement, Position, RectItem, RectStyle, Rgba,
    ShowPredicate, StateVariants, TextItem, TextStyle, VisualState,
};

use crate::files::{natural_size, select_file};
use crate::locale::select_translation;
use crate::stock::stock_label;
use crate::values;
use crate::ParseOptions;

const XML_NAMESPACE: &str = "http://www.w3.org/XML/1998/namespace";

/// Parse a theme document into an item tree. `search_path` anchors
/// relative file references.
pub fn parse(document: &str, search_path: &Path, options: &ParseOptions) -> Result<ItemTree, ParseError> {
    let doc = crate::parse_xml(document).map_err(|e| ParseError::BadXml(e.to_string()))?;
    let root = doc.root_element();
    if root.tag_name().name() != "greeter" {
        return Err(ParseError::WrongDocumentType {
            found: root.tag_name().name().to_string(),
        });
    }

    let mut parser = ThemeParser::new(search_path, options);
    let root_id = parser.tree.root();
    parser.parse_items(root, root_id, Placement::Fixed)?;

    log::debug!(
        "parsed theme: {} items, {} ids",
        parser.tree.len() - 1,
        parser.tree.ids().count()
    );
    Ok(parser.tree)
}

/// Parser state threaded through the descent.
struct ThemeParser<'a> {
    search_path: &'a Path,
    options: &'a ParseOptions,
    tree: ItemTree,
    /// Enclosing clickable groups, innermost last.
    buttons: Vec<NodeId>,
}

impl<'a> ThemeParser<'a> {
    fn new(search_path: &'a Path, options: &'a ParseOptions) -> Self {
        Self {
            search_path,
            options,
            tree: ItemTree::new(),
            buttons: Vec::new(),
        }
    }

    /// Parse every `<item>` child of `container` below `parent`.
    fn parse_items(&mut self, container: Node<'_, '_>, parent: NodeId, placement: Placement) -> Result<(), ParseError> {
        for child in container.children().filter(Node::is_element) {
            if child.tag_name().name() == "item" {
                self.parse_item(child, parent, placement)?;
            } else {
                log::trace!("ignoring <{}> inside <{}>", child.tag_name().name(), container.tag_name().name());
            }
        }
        Ok(())
    }

    fn parse_item(&mut self, elem: Node<'_, '_>, parent: NodeId, placement: Placement) -> Result<NodeId, ParseError> {
        let kind = item_kind(elem)?;
        let mut node = ItemNode::new(kind);
        node.id = elem.attribute("id").filter(|id| !id.is_empty()).map(str::to_string);
        if let Some(text) = elem.attribute("button") {
            node.button = values::boolean("button", text)?;
        }
        node.button_owner = self.buttons.last().copied();

        let mut fixed = Vec::new();
        let mut boxes = Vec::new();
        for child in elem.children().filter(Node::is_element) {
            match child.tag_name().name() {
                "pos" => parse_pos(child, &mut node)?,
                "show" => node.show = parse_show(child)?,
                "normal" => self.parse_state(child, VisualState::Normal, &mut node)?,
                "prelight" => self.parse_state(child, VisualState::Prelight, &mut node)?,
                "active" => self.parse_state(child, VisualState::Active, &mut node)?,
                "fixed" => fixed.push(child),
                "box" => {
                    node.box_layout = Some(parse_box(child)?);
                    boxes.push(child);
                }
                // consumed by the text and list passes below
                "text" | "stock" | "listitem" => {}
                other => log::trace!("ignoring <{other}> in item"),
            }
        }

        if !fixed.is_empty() || !boxes.is_empty() {
            if node.kind.is_leaf() {
                let attribute = if fixed.is_empty() { "box" } else { "fixed" };
                return Err(ParseError::bad_spec(attribute, "leaf item types cannot have children"));
            }
            if !fixed.is_empty() && !boxes.is_empty() {
                return Err(ParseError::bad_spec("box", "an item cannot have both fixed and box children"));
            }
        }

        self.parse_content(elem, &mut node)?;

        let id = self.tree.add_child(parent, node, placement)?;
        if let Some(name) = self.tree[id].id.as_deref() {
            log::trace!("registered id {name} as {id:?}");
        }

        let is_button = self.tree[id].button;
        if is_button {
            self.buttons.push(id);
        }
        for child in &fixed {
            self.parse_items(*child, id, Placement::Fixed)?;
        }
        for child in &boxes {
            self.parse_items(*child, id, Placement::Box)?;
        }
        if is_button {
            self.buttons.pop();
        }
        Ok(id)
    }

    fn parse_state(&self, elem: Node<'_, '_>, state: VisualState, node: &mut ItemNode) -> Result<(), ParseError> {
        let alpha = elem
            .attribute("alpha")
            .map(|text| values::alpha("alpha", text))
            .transpose()?;
        let color = elem
            .attribute("color")
            .map(|text| values::color("color", text))
            .transpose()?
            .map(|c| c.with_alpha(alpha.unwrap_or(1.0)));

        match &mut node.kind {
            ItemKind::Rect(rect) => rect.styles.set(state, RectStyle { color }),
            ItemKind::Image(image) => {
                let tint = elem
                    .attribute("tint")
                    .map(|text| values::color("tint", text))
                    .transpose()?;
                let file = select_file(elem, self.search_path);
                if state == VisualState::Normal && self.options.read_image_sizes {
                    image.natural_size = file.as_deref().and_then(|f| natural_size(f, image.format));
                }
                image.styles.set(
                    state,
                    ImageStyle {
                        file,
                        tint,
                        alpha: alpha.unwrap_or(1.0).clamp(0.0, 1.0),
                    },
                );
            }
            ItemKind::Label(text) | ItemKind::Entry(text) | ItemKind::Button(text) => {
                text.styles.set(state, text_style(elem, color));
            }
            ItemKind::List(list) => list.styles.set(state, text_style(elem, color)),
        }
        Ok(())
    }

    /// Fill in text for labels and buttons and rows for lists.
    fn parse_content(&self, elem: Node<'_, '_>, node: &mut ItemNode) -> Result<(), ParseError> {
        let locales = &self.options.locales;
        match &mut node.kind {
            ItemKind::Label(text) | ItemKind::Button(text) => {
                let item = node_type_name(elem);
                text.text = resolve_text(elem, locales).ok_or_else(|| ParseError::MissingRequiredChild {
                    item,
                    child: "text".to_string(),
                })?;
            }
            ItemKind::Entry(text) => {
                text.text = resolve_text(elem, locales).unwrap_or_default();
            }
            ItemKind::List(list) => {
                for row in elem.children().filter(|n| n.has_tag_name("listitem")) {
                    let id = row
                        .attribute("id")
                        .ok_or_else(|| ParseError::bad_spec("listitem", "missing id"))?;
                    let label = resolve_text(row, locales).ok_or_else(|| ParseError::MissingRequiredChild {
                        item: "listitem".to_string(),
                        child: "text".to_string(),
                    })?;
                    list.entries.push(ListEntry {
                        id: id.to_string(),
                        label,
                    });
                }
            }
            ItemKind::Rect(_) | ItemKind::Image(_) => {}
        }
        Ok(())
    }
}

/// Build the kind skeleton from the mandatory `type` attribute.
fn item_kind(elem: Node<'_, '_>) -> Result<ItemKind, ParseError> {
    let name = elem.attribute("type").ok_or(ParseError::MissingType)?;
    let text = |markup: bool| TextItem {
        markup,
        styles: StateVariants::new(),
        ..TextItem::default()
    };
    let kind = match name {
        "rect" => ItemKind::Rect(RectItem::default()),
        "svg" => ItemKind::Image(ImageItem {
            format: ImageFormat::Svg,
            ..ImageItem::default()
        }),
        "pixmap" => ItemKind::Image(ImageItem {
            format: ImageFormat::Raster,
            ..ImageItem::default()
        }),
        "label" => ItemKind::Label(text(true)),
        "entry" => ItemKind::Entry(text(false)),
        "button" => ItemKind::Button(text(true)),
        "list" => ItemKind::List(ListItem {
            combo: elem
                .attribute("combo")
                .map(|v| values::boolean("combo", v))
                .transpose()?
                .unwrap_or(false),
            ..ListItem::default()
        }),
        other => {
            return Err(ParseError::UnknownItemType {
                name: other.to_string(),
            })
        }
    };
    Ok(kind)
}

fn node_type_name(elem: Node<'_, '_>) -> String {
    elem.attribute("type").unwrap_or("item").to_string()
}

fn text_style(elem: Node<'_, '_>, color: Option<Rgba>) -> TextStyle {
    TextStyle {
        font: elem.attribute("font").map(str::to_string),
        color,
    }
}

/// Choose the text of an element: a known `<stock>` wins outright,
/// otherwise the best locale match among `<text>` children.
fn resolve_text(elem: Node<'_, '_>, locales: &[String]) -> Option<String> {
    for stock in elem.children().filter(|n| n.has_tag_name("stock")) {
        let kind = stock.attribute("type").unwrap_or_default();
        match stock_label(kind) {
            Some(label) => return Some(label.to_string()),
            None => log::warn!("unknown stock label type {kind:?}"),
        }
    }

    let candidates: Vec<(Option<&str>, String)> = elem
        .children()
        .filter(|n| n.has_tag_name("text"))
        .map(|n| (n.attribute((XML_NAMESPACE, "lang")), element_text(n)))
        .collect();
    select_translation(candidates.iter().map(|(lang, text)| (*lang, text.as_str())), locales).map(str::to_string)
}

/// Concatenated character data of an element and its descendants.
fn element_text(elem: Node<'_, '_>) -> String {
    elem.descendants()
        .filter(Node::is_text)
        .filter_map(|n| n.text())
        .collect()
}

fn parse_pos(elem: Node<'_, '_>, node: &mut ItemNode) -> Result<(), ParseError> {
    let mut position = Position::default();
    if let Some(text) = elem.attribute("anchor") {
        position.anchor = Anchor::from_name(text.trim())
            .ok_or_else(|| ParseError::bad_spec("anchor", text))?;
    }
    if let Some(text) = elem.attribute("x") {
        position.x = values::offset("x", text)?;
    }
    if let Some(text) = elem.attribute("y") {
        position.y = values::offset("y", text)?;
    }
    node.position = position;

    let is_image = matches!(node.kind, ItemKind::Image(_));
    for (attribute, slot) in [("width", &mut node.size.width), ("height", &mut node.size.height)] {
        if let Some(text) = elem.attribute(attribute) {
            let extent = values::extent(attribute, text)?;
            if extent == Extent::Scale && !is_image {
                return Err(ParseError::bad_spec(attribute, text));
            }
            *slot = extent;
        }
    }

    if let Some(text) = elem.attribute("expand") {
        node.expand = values::boolean("expand", text)?;
    }

    let max_chars = elem
        .attribute("max-width")
        .map(|text| values::number("max-width", text).map(|v| v.max(0.0).round() as u32))
        .transpose()?;
    let max_percent = elem
        .attribute("max-screen-percent-width")
        .map(|text| values::number("max-screen-percent-width", text))
        .transpose()?;
    if let Some(text) = node.kind.text_mut() {
        text.max_width_chars = max_chars;
        text.max_screen_percent_width = max_percent;
    }
    Ok(())
}

fn parse_show(elem: Node<'_, '_>) -> Result<ShowPredicate, ParseError> {
    let mut show = ShowPredicate::default();
    if let Some(text) = elem.attribute("modes") {
        show.modes = values::show_modes("modes", text)?;
    }
    show.category = elem.attribute("type").filter(|t| !t.is_empty()).map(str::to_string);
    if let Some(text) = elem.attribute("min-screen-width") {
        show.min_screen_width = values::pixels("min-screen-width", text)?;
    }
    if let Some(text) = elem.attribute("min-screen-height") {
        show.min_screen_height = values::pixels("min-screen-height", text)?;
    }
    Ok(show)
}

fn parse_box(elem: Node<'_, '_>) -> Result<BoxLayout, ParseError> {
    let mut layout = BoxLayout::default();
    if let Some(text) = elem.attribute("orientation") {
        layout.orientation = match text.trim() {
            "horizontal" => Orientation::Horizontal,
            "vertical" => Orientation::Vertical,
            _ => return Err(ParseError::bad_spec("orientation", text)),
        };
    }
    if let Some(text) = elem.attribute("homogeneous") {
        layout.homogeneous = values::boolean("homogeneous", text)?;
    }
    let fields: [(&str, &mut i32); 5] = [
        ("spacing", &mut layout.spacing),
        ("xpadding", &mut layout.xpadding),
        ("ypadding", &mut layout.ypadding),
        ("min-width", &mut layout.min_width),
        ("min-height", &mut layout.min_height),
    ];
    for (attribute, slot) in fields {
        if let Some(text) = elem.attribute(attribute) {
            *slot = values::pixels(attribute, text)?;
        }
    }
    Ok(layout)
}
