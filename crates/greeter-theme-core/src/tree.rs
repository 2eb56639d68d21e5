//! Arena-owned item tree.
//!
//! Nodes live in a single `Vec` and refer to each other by [`NodeId`]. A
//! parent owns its ordered child list; children keep only the parent's
//! index. The id table is scoped to one tree, so a reload starts clean.

use std::ops::{Index, IndexMut};

use indexmap::IndexMap;
use smallvec::SmallVec;

use crate::errors::TreeError;
use crate::item::{Children, ItemKind, ItemNode, RectItem};
use crate::state::VisualState;
use crate::types::{Extent, Rect, SizeRequest};

/// Index of a node in its [`ItemTree`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct NodeId(pub usize);

/// How a child is attached to its parent.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Placement {
    Fixed,
    Box,
}

/// A parsed theme: the root surface item and everything below it.
#[derive(Debug, Clone)]
pub struct ItemTree {
    nodes: Vec<ItemNode>,
    ids: IndexMap<String, NodeId>,
}

impl Default for ItemTree {
    fn default() -> Self {
        Self::new()
    }
}

impl ItemTree {
    /// Create a tree holding only the root item, which covers the whole
    /// surface.
    pub fn new() -> Self {
        let mut root = ItemNode::new(ItemKind::Rect(RectItem::default()));
        root.size = SizeRequest {
            width: Extent::Percent(100.0),
            height: Extent::Percent(100.0),
        };
        Self {
            nodes: vec![root],
            ids: IndexMap::new(),
        }
    }

    pub fn root(&self) -> NodeId {
        NodeId(0)
    }

    /// Attach `node` below `parent`. A parent holds either fixed or box
    /// children, never both; a non-empty id must be unused.
    pub fn add_child(
        &mut self,
        parent: NodeId,
        mut node: ItemNode,
        placement: Placement,
    ) -> Result<NodeId, TreeError> {
        let id = NodeId(self.nodes.len());
        if let Some(name) = node.id.as_deref().filter(|n| !n.is_empty()) {
            if self.ids.contains_key(name) {
                return Err(TreeError::DuplicateId { id: name.to_string() });
            }
        }

        let siblings = &mut self.nodes[parent.0].children;
        if matches!(siblings, Children::None) {
            *siblings = match placement {
                Placement::Fixed => Children::Fixed(SmallVec::new()),
                Placement::Box => Children::Box(SmallVec::new()),
            };
        }
        match (placement, siblings) {
            (Placement::Fixed, Children::Fixed(ids)) | (Placement::Box, Children::Box(ids)) => ids.push(id),
            _ => return Err(TreeError::MixedChildren),
        }

        if let Some(name) = node.id.as_deref().filter(|n| !n.is_empty()) {
            self.ids.insert(name.to_string(), id);
        }
        node.parent = Some(parent);
        self.nodes.push(node);
        Ok(id)
    }

    pub fn get(&self, id: NodeId) -> Option<&ItemNode> {
        self.nodes.get(id.0)
    }

    pub fn get_mut(&mut self, id: NodeId) -> Option<&mut ItemNode> {
        self.nodes.get_mut(id.0)
    }

    /// Find the node registered under a theme id.
    pub fn lookup_id(&self, id: &str) -> Option<&ItemNode> {
        self.lookup_index(id).and_then(|n| self.get(n))
    }

    pub fn lookup_index(&self, id: &str) -> Option<NodeId> {
        self.ids.get(id).copied()
    }

    /// Registered ids in document order.
    pub fn ids(&self) -> impl Iterator<Item = (&str, NodeId)> {
        self.ids.iter().map(|(k, v)| (k.as_str(), *v))
    }

    pub fn len(&self) -> usize {
        self.nodes.len()
    }

    pub fn is_empty(&self) -> bool {
        self.nodes.is_empty()
    }

    /// Iterate over all nodes in creation order.
    pub fn iter(&self) -> impl Iterator<Item = (NodeId, &ItemNode)> {
        self.nodes.iter().enumerate().map(|(i, n)| (NodeId(i), n))
    }

    pub fn children(&self, id: NodeId) -> &[NodeId] {
        self.get(id).map(|n| n.children.ids()).unwrap_or(&[])
    }

    pub fn parent(&self, id: NodeId) -> Option<NodeId> {
        self.get(id).and_then(|n| n.parent)
    }

    /// Parents of `id`, nearest first.
    pub fn ancestors(&self, id: NodeId) -> impl Iterator<Item = NodeId> + '_ {
        std::iter::successors(self.parent(id), move |&n| self.parent(n))
    }

    /// `id` and everything below it, in pre-order.
    pub fn descendants(&self, id: NodeId) -> Vec<NodeId> {
        let mut out = Vec::new();
        let mut stack = vec![id];
        while let Some(next) = stack.pop() {
            out.push(next);
            stack.extend(self.children(next).iter().rev().copied());
        }
        out
    }

    /// Forget every resolved rectangle.
    pub fn clear_resolved(&mut self) {
        for node in &mut self.nodes {
            node.resolved = None;
        }
    }

    /// Forget the rectangles of `id` and all of its ancestors, whose
    /// content-derived sizes may depend on it.
    pub fn invalidate(&mut self, id: NodeId) {
        let chain: Vec<NodeId> = std::iter::once(id).chain(self.ancestors(id)).collect();
        for n in chain {
            if let Some(node) = self.get_mut(n) {
                node.resolved = None;
            }
        }
    }

    pub fn resolved(&self, id: NodeId) -> Option<Rect> {
        self.get(id).and_then(|n| n.resolved)
    }

    /// Switch a clickable group and the items it owns to `state`. Returns
    /// `false`, changing nothing, when `button` is not in the tree.
    pub fn set_button_state(&mut self, button: NodeId, state: VisualState) -> bool {
        if self.get(button).is_none() {
            return false;
        }
        for node_id in self.descendants(button) {
            if let Some(node) = self.nodes.get_mut(node_id.0) {
                if node_id == button || node.button_owner == Some(button) {
                    node.state = state;
                }
            }
        }
        true
    }
}

impl Index<NodeId> for ItemTree {
    type Output = ItemNode;

    fn index(&self, id: NodeId) -> &ItemNode {
        &self.nodes[id.0]
    }
}

impl IndexMut<NodeId> for ItemTree {
    fn index_mut(&mut self, id: NodeId) -> &mut ItemNode {
        &mut self.nodes[id.0]
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::item::TextItem;

    fn rect() -> ItemNode {
        ItemNode::new(ItemKind::Rect(RectItem::default()))
    }

    #[test]
    fn test_add_and_lookup() {
        let mut tree = ItemTree::new();
        let root = tree.root();
        let panel = tree.add_child(root, rect().with_id("panel"), Placement::Fixed).unwrap();
        let label = tree
            .add_child(panel, ItemNode::new(ItemKind::Label(TextItem::default())), Placement::Box)
            .unwrap();

        assert_eq!(tree.lookup_index("panel"), Some(panel));
        assert_eq!(tree.lookup_id("panel").unwrap().parent, Some(root));
        assert_eq!(tree.children(panel), &[label]);
        assert!(tree[panel].children.is_box());
        assert_eq!(tree.ancestors(label).collect::<Vec<_>>(), vec![panel, root]);
        assert!(tree.lookup_id("missing").is_none());
    }

    #[test]
    fn test_duplicate_id_rejected() {
        let mut tree = ItemTree::new();
        let root = tree.root();
        tree.add_child(root, rect().with_id("a"), Placement::Fixed).unwrap();
        let err = tree.add_child(root, rect().with_id("a"), Placement::Fixed).unwrap_err();
        assert_eq!(err, TreeError::DuplicateId { id: "a".to_string() });
        assert_eq!(tree.len(), 2);
    }

    #[test]
    fn test_mixed_children_rejected() {
        let mut tree = ItemTree::new();
        let root = tree.root();
        tree.add_child(root, rect(), Placement::Fixed).unwrap();
        assert_eq!(tree.add_child(root, rect(), Placement::Box), Err(TreeError::MixedChildren));
    }

    #[test]
    fn test_invalidate_clears_ancestors_only() {
        let mut tree = ItemTree::new();
        let root = tree.root();
        let a = tree.add_child(root, rect(), Placement::Fixed).unwrap();
        let b = tree.add_child(a, rect(), Placement::Box).unwrap();
        let c = tree.add_child(root, rect(), Placement::Fixed).unwrap();
        for id in [root, a, b, c] {
            tree[id].resolved = Some(Rect::new(0, 0, 1, 1));
        }

        tree.invalidate(b);

        assert!(tree.resolved(b).is_none());
        assert!(tree.resolved(a).is_none());
        assert!(tree.resolved(root).is_none());
        assert!(tree.resolved(c).is_some());
    }

    #[test]
    fn test_button_state_reaches_owned_items() {
        let mut tree = ItemTree::new();
        let root = tree.root();
        let mut button = rect();
        button.button = true;
        let button = tree.add_child(root, button, Placement::Fixed).unwrap();
        let mut inner = rect();
        inner.button_owner = Some(button);
        let inner = tree.add_child(button, inner, Placement::Fixed).unwrap();
        let other = tree.add_child(root, rect(), Placement::Fixed).unwrap();

        assert!(tree.set_button_state(button, VisualState::Prelight));

        assert_eq!(tree[button].state, VisualState::Prelight);
        assert_eq!(tree[inner].state, VisualState::Prelight);
        assert_eq!(tree[other].state, VisualState::Normal);
    }

    #[test]
    fn test_button_state_unknown_id_is_noop() {
        let mut tree = ItemTree::new();
        let root = tree.root();
        let child = tree.add_child(root, rect(), Placement::Fixed).unwrap();

        assert!(!tree.set_button_state(NodeId(42), VisualState::Prelight));

        assert_eq!(tree[root].state, VisualState::Normal);
        assert_eq!(tree[child].state, VisualState::Normal);
    }
}
