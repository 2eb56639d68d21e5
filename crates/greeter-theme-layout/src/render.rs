//! Draw-list emission for a resolved tree.
//!
//! The engine does not paint. It walks visible items in paint order and
//! hands a [`RenderSink`] one [`DrawCommand`] per item that has something
//! to draw.

use std::collections::HashMap;
use std::fmt;

use greeter_theme_core::{apply_state, Extent, ItemKind, ItemNode, ItemTree, NodeId, Rect, ResolvedVisual, VisualState};

use crate::compute::{text_budget, wrap_node_text, ResolveOptions};
use crate::measure::TextMeasure;

/// Everything a painter needs for one item.
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize))]
pub struct DrawCommand {
    pub node: NodeId,
    pub id: Option<String>,
    /// Theme type name (`rect`, `label`, ...).
    pub kind: &'static str,
    pub rect: Rect,
    pub state: VisualState,
    pub visual: ResolvedVisual,
    /// Display lines of text items, wrapped to the rectangle.
    pub lines: Vec<String>,
    /// Where a scale-to-fit image lands after uniform scaling.
    pub fitted: Option<Rect>,
}

/// Receiver of draw commands.
pub trait RenderSink {
    fn draw(&mut self, command: DrawCommand);
}

/// Emits draw commands, remembering each item's visual per state across
/// passes.
pub struct Emitter<'a> {
    oracle: &'a dyn TextMeasure,
    options: &'a ResolveOptions,
    visuals: HashMap<(NodeId, VisualState), ResolvedVisual>,
}

impl<'a> Emitter<'a> {
    pub fn new(oracle: &'a dyn TextMeasure, options: &'a ResolveOptions) -> Self {
        Self {
            oracle,
            options,
            visuals: HashMap::new(),
        }
    }

    /// Walk the resolved items of `tree` in paint order.
    pub fn emit(&mut self, tree: &ItemTree, sink: &mut dyn RenderSink) {
        // the root covers the surface
        let surface_width = tree.resolved(tree.root()).map_or(0, |r| r.width);
        let mut count = 0;
        for id in tree.descendants(tree.root()) {
            let node = &tree[id];
            let Some(rect) = node.resolved else {
                continue;
            };
            let visual = self
                .visuals
                .entry((id, node.state))
                .or_insert_with(|| apply_state(node, node.state))
                .clone();
            if visual == ResolvedVisual::Nothing {
                continue;
            }
            sink.draw(DrawCommand {
                node: id,
                id: node.id.clone(),
                kind: node.kind.type_name(),
                rect,
                state: node.state,
                visual,
                lines: self.lines(node, rect, surface_width),
                fitted: fitted_rect(node, rect),
            });
            count += 1;
        }
        log::debug!("emitted {count} draw commands");
    }

    /// Text lines wrapped with the budget the item was sized with.
    fn lines(&self, node: &ItemNode, rect: Rect, surface_width: i32) -> Vec<String> {
        match &node.kind {
            ItemKind::Label(_) | ItemKind::Button(_) => {
                let budget = text_budget(node, Some(rect.width), surface_width, self.oracle, self.options);
                wrap_node_text(node, budget, self.oracle, self.options)
                    .map(|block| block.lines)
                    .unwrap_or_default()
            }
            ItemKind::Entry(text) => vec![text.text.clone()],
            ItemKind::List(list) if list.combo => list.entries.iter().take(1).map(|e| e.label.clone()).collect(),
            ItemKind::List(list) => list.entries.iter().map(|e| e.label.clone()).collect(),
            ItemKind::Rect(_) | ItemKind::Image(_) => Vec::new(),
        }
    }
}

/// One emission pass with a fresh visual cache.
pub fn emit(tree: &ItemTree, oracle: &dyn TextMeasure, options: &ResolveOptions, sink: &mut dyn RenderSink) {
    Emitter::new(oracle, options).emit(tree, sink);
}

/// Scale-to-fit images keep their aspect ratio and are centered in their
/// rectangle.
fn fitted_rect(node: &ItemNode, rect: Rect) -> Option<Rect> {
    let ItemKind::Image(image) = &node.kind else {
        return None;
    };
    if node.size.width != Extent::Scale && node.size.height != Extent::Scale {
        return None;
    }
    let natural = image.natural_size.filter(|n| n.x > 0 && n.y > 0)?;
    let scale = (rect.width as f64 / natural.x as f64).min(rect.height as f64 / natural.y as f64);
    let width = (natural.x as f64 * scale).round() as i32;
    let height = (natural.y as f64 * scale).round() as i32;
    Some(Rect::new(
        rect.x + (rect.width - width) / 2,
        rect.y + (rect.height - height) / 2,
        width,
        height,
    ))
}

/// A sink that keeps every command; its `Display` form is a readable
/// listing.
#[derive(Debug, Clone, Default, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize))]
pub struct DrawList {
    pub commands: Vec<DrawCommand>,
}

impl RenderSink for DrawList {
    fn draw(&mut self, command: DrawCommand) {
        self.commands.push(command);
    }
}

impl fmt::Display for DrawList {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for command in &self.commands {
            let name = match &command.id {
                Some(id) => format!("#{id}"),
                None => format!("@{}", command.node.0),
            };
            let r = command.rect;
            write!(f, "{:<6} {name} {},{} {}x{}", command.kind, r.x, r.y, r.width, r.height)?;
            match &command.visual {
                ResolvedVisual::Fill(color) => write!(f, " fill {}", color.to_hex())?,
                ResolvedVisual::Image { file, tint, alpha } => {
                    let file_name = file.file_name().map_or_else(|| file.display().to_string(), |n| n.to_string_lossy().into_owned());
                    write!(f, " image {file_name} alpha {alpha:.2}")?;
                    if let Some(tint) = tint {
                        write!(f, " tint {}", tint.to_hex())?;
                    }
                }
                ResolvedVisual::Text { font, color } => {
                    write!(f, " text {}", color.to_hex())?;
                    if let Some(font) = font {
                        write!(f, " {font:?}")?;
                    }
                }
                ResolvedVisual::Nothing => {}
            }
            if command.state != VisualState::Normal {
                write!(f, " [{}]", command.state.element_name())?;
            }
            if let Some(fit) = command.fitted {
                write!(f, " fit {},{} {}x{}", fit.x, fit.y, fit.width, fit.height)?;
            }
            writeln!(f)?;
            for line in &command.lines {
                if line.is_empty() {
                    writeln!(f, "    |")?;
                } else {
                    writeln!(f, "    | {line}")?;
                }
            }
        }
        Ok(())
    }
}
