//! Visual states and per-state style variants.

use std::path::PathBuf;

use crate::item::{ItemKind, ItemNode};
use crate::types::Rgba;

/// Interaction state selecting which style variant is drawn.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum VisualState {
    #[default]
    Normal,
    Prelight,
    Active,
}

impl VisualState {
    pub const ALL: [VisualState; 3] = [VisualState::Normal, VisualState::Prelight, VisualState::Active];

    /// Theme element name for this state.
    pub fn element_name(self) -> &'static str {
        match self {
            VisualState::Normal => "normal",
            VisualState::Prelight => "prelight",
            VisualState::Active => "active",
        }
    }

    fn index(self) -> usize {
        match self {
            VisualState::Normal => 0,
            VisualState::Prelight => 1,
            VisualState::Active => 2,
        }
    }

    fn bit(self) -> u8 {
        1 << self.index()
    }
}

/// Bitmask of states explicitly supplied by the theme.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct StateMask(u8);

impl StateMask {
    pub fn contains(self, state: VisualState) -> bool {
        self.0 & state.bit() != 0
    }

    pub fn insert(&mut self, state: VisualState) {
        self.0 |= state.bit();
    }

    pub fn is_empty(self) -> bool {
        self.0 == 0
    }
}

/// One style value per visual state. States that were not supplied fall
/// back to the Normal variant.
#[derive(Debug, Clone, PartialEq, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct StateVariants<T> {
    variants: [T; 3],
    supplied: StateMask,
}

impl<T: Default> StateVariants<T> {
    pub fn new() -> Self {
        Self {
            variants: Default::default(),
            supplied: StateMask::default(),
        }
    }
}

impl<T> StateVariants<T> {
    /// Record the style for a state.
    pub fn set(&mut self, state: VisualState, value: T) {
        self.variants[state.index()] = value;
        self.supplied.insert(state);
    }

    /// The style drawn in `state`.
    pub fn get(&self, state: VisualState) -> &T {
        if self.supplied.contains(state) {
            &self.variants[state.index()]
        } else {
            &self.variants[VisualState::Normal.index()]
        }
    }

    pub fn supplied(&self) -> StateMask {
        self.supplied
    }
}

/// Fill of a rect item.
#[derive(Debug, Clone, PartialEq, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct RectStyle {
    /// Fill color with alpha; `None` draws nothing.
    pub color: Option<Rgba>,
}

/// Source and blending of an image item.
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct ImageStyle {
    pub file: Option<PathBuf>,
    pub tint: Option<Rgba>,
    pub alpha: f64,
}

impl Default for ImageStyle {
    fn default() -> Self {
        Self {
            file: None,
            tint: None,
            alpha: 1.0,
        }
    }
}

/// Font and color of a text-bearing item.
#[derive(Debug, Clone, PartialEq, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct TextStyle {
    /// Font description such as `"Sans Bold 12"`.
    pub font: Option<String>,
    /// Text color with alpha.
    pub color: Option<Rgba>,
}

/// The concrete visual of one node in one state.
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum ResolvedVisual {
    Fill(Rgba),
    Image {
        file: PathBuf,
        tint: Option<Rgba>,
        alpha: f64,
    },
    Text {
        font: Option<String>,
        color: Rgba,
    },
    /// Nothing to draw (no color or file given for this state).
    Nothing,
}

/// Select the style variant of `node` for `state`.
pub fn apply_state(node: &ItemNode, state: VisualState) -> ResolvedVisual {
    match &node.kind {
        ItemKind::Rect(rect) => match rect.styles.get(state).color {
            Some(color) => ResolvedVisual::Fill(color),
            None => ResolvedVisual::Nothing,
        },
        ItemKind::Image(image) => {
            let style = image.styles.get(state);
            match &style.file {
                Some(file) => ResolvedVisual::Image {
                    file: file.clone(),
                    tint: style.tint,
                    alpha: style.alpha,
                },
                None => ResolvedVisual::Nothing,
            }
        }
        ItemKind::Label(text) | ItemKind::Entry(text) | ItemKind::Button(text) => {
            let style = text.styles.get(state);
            ResolvedVisual::Text {
                font: style.font.clone(),
                color: style.color.unwrap_or(Rgba::BLACK),
            }
        }
        ItemKind::List(list) => {
            let style = list.styles.get(state);
            ResolvedVisual::Text {
                font: style.font.clone(),
                color: style.color.unwrap_or(Rgba::BLACK),
            }
        }
    }
}
