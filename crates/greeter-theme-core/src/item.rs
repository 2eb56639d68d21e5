//! Item model: one node per visual element of a theme.

use glam::IVec2;
use smallvec::SmallVec;

use crate::show::ShowPredicate;
use crate::state::{ImageStyle, RectStyle, StateVariants, TextStyle, VisualState};
use crate::tree::NodeId;
use crate::types::{BoxLayout, Position, Rect, SizeRequest};

/// A visual element and its kind-specific payload.
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum ItemKind {
    Rect(RectItem),
    Image(ImageItem),
    Label(TextItem),
    Entry(TextItem),
    List(ListItem),
    Button(TextItem),
}

impl ItemKind {
    /// Theme `type` name of this kind.
    pub fn type_name(&self) -> &'static str {
        match self {
            ItemKind::Rect(_) => "rect",
            ItemKind::Image(image) => match image.format {
                ImageFormat::Svg => "svg",
                ImageFormat::Raster => "pixmap",
            },
            ItemKind::Label(_) => "label",
            ItemKind::Entry(_) => "entry",
            ItemKind::List(_) => "list",
            ItemKind::Button(_) => "button",
        }
    }

    /// Leaf kinds may not contain `fixed` or `box` children.
    pub fn is_leaf(&self) -> bool {
        matches!(self, ItemKind::Label(_) | ItemKind::Entry(_) | ItemKind::List(_))
    }

    /// Text payload of labels, entries and buttons.
    pub fn text(&self) -> Option<&TextItem> {
        match self {
            ItemKind::Label(text) | ItemKind::Entry(text) | ItemKind::Button(text) => Some(text),
            _ => None,
        }
    }

    pub fn text_mut(&mut self) -> Option<&mut TextItem> {
        match self {
            ItemKind::Label(text) | ItemKind::Entry(text) | ItemKind::Button(text) => Some(text),
            _ => None,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct RectItem {
    pub styles: StateVariants<RectStyle>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum ImageFormat {
    Svg,
    #[default]
    Raster,
}

#[derive(Debug, Clone, PartialEq, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct ImageItem {
    pub format: ImageFormat,
    pub styles: StateVariants<ImageStyle>,
    /// Pixel size of the Normal state's file, if it could be determined.
    pub natural_size: Option<IVec2>,
}

/// Text payload shared by labels, entries and buttons.
#[derive(Debug, Clone, PartialEq, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct TextItem {
    pub text: String,
    /// Whether `text` carries inline markup.
    pub markup: bool,
    /// Wrap budget in approximate characters.
    pub max_width_chars: Option<u32>,
    /// Wrap budget as a percentage of the surface width.
    pub max_screen_percent_width: Option<f64>,
    pub styles: StateVariants<TextStyle>,
}

/// One row of a list item.
#[derive(Debug, Clone, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct ListEntry {
    pub id: String,
    pub label: String,
}

#[derive(Debug, Clone, PartialEq, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct ListItem {
    pub entries: Vec<ListEntry>,
    /// Drawn as a single-row combo instead of a list view.
    pub combo: bool,
    pub styles: StateVariants<TextStyle>,
}

/// How an item's children are laid out.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum Children {
    #[default]
    None,
    /// Anchored children; order only affects paint order.
    Fixed(SmallVec<[NodeId; 4]>),
    /// Children distributed along the box axis in document order.
    Box(SmallVec<[NodeId; 4]>),
}

impl Children {
    pub fn ids(&self) -> &[NodeId] {
        match self {
            Children::None => &[],
            Children::Fixed(ids) | Children::Box(ids) => ids,
        }
    }

    pub fn is_box(&self) -> bool {
        matches!(self, Children::Box(_))
    }
}

/// A node of the item tree.
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct ItemNode {
    /// Optional unique identifier from the theme.
    pub id: Option<String>,
    pub kind: ItemKind,
    pub position: Position,
    pub size: SizeRequest,
    /// Share leftover length with other expanding box siblings.
    pub expand: bool,
    pub show: ShowPredicate,
    /// Present when the item declares a `box`.
    pub box_layout: Option<BoxLayout>,
    pub children: Children,
    pub parent: Option<NodeId>,
    /// The item is a clickable group.
    pub button: bool,
    /// Nearest enclosing clickable group.
    pub button_owner: Option<NodeId>,
    /// Live visual state.
    pub state: VisualState,
    /// Output of geometry resolution; `None` until resolved or when hidden.
    pub resolved: Option<Rect>,
}

impl ItemNode {
    pub fn new(kind: ItemKind) -> Self {
        Self {
            id: None,
            kind,
            position: Position::default(),
            size: SizeRequest::default(),
            expand: false,
            show: ShowPredicate::default(),
            box_layout: None,
            children: Children::None,
            parent: None,
            button: false,
            button_owner: None,
            state: VisualState::Normal,
            resolved: None,
        }
    }

    pub fn with_id(mut self, id: impl Into<String>) -> Self {
        self.id = Some(id.into());
        self
    }

    pub fn with_position(mut self, position: Position) -> Self {
        self.position = position;
        self
    }

    pub fn with_size(mut self, size: SizeRequest) -> Self {
        self.size = size;
        self
    }

    pub fn with_box_layout(mut self, layout: BoxLayout) -> Self {
        self.box_layout = Some(layout);
        self
    }

    pub fn with_show(mut self, show: ShowPredicate) -> Self {
        self.show = show;
        self
    }
}
