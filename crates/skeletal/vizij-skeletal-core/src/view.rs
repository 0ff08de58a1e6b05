//! The navigable tree the user edits.
//!
//! Nodes live in an arena keyed by [`NodeId`]. A node never owns model data;
//! its [`NodeTag`] names the group or track it mirrors.

use std::cmp::Ordering;

use hashbrown::HashMap;
use serde::{Deserialize, Serialize};

use crate::commands::MenuCommand;
use crate::ids::{GroupId, NodeId};
use crate::track::{DisplayConversion, TrackChannel};
use crate::{Result, SkeletalError};

/// Back-reference from a node to the model object it mirrors.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum NodeTag {
    Animation,
    Group(GroupId),
    Track {
        group: GroupId,
        channel: TrackChannel,
    },
}

/// Which transform components of a bone have more than one keyframe.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct AnimatedChannels {
    pub translate: bool,
    pub rotate: bool,
    pub scale: bool,
}

/// The kind of a view node.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum NodeKind {
    Animation,
    BoneGroup(AnimatedChannels),
    Track(DisplayConversion),
}

impl NodeKind {
    /// Track nodes are told when their bone group is removed.
    #[inline]
    pub fn observes_group_removal(&self) -> bool {
        matches!(self, Self::Track(_))
    }

    #[inline]
    pub fn name(&self) -> &'static str {
        match self {
            Self::Animation => "animation",
            Self::BoneGroup(_) => "bone group",
            Self::Track(_) => "track",
        }
    }
}

/// A node of the view tree.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ViewNode {
    pub id: NodeId,
    pub parent: Option<NodeId>,
    pub header: String,
    pub kind: NodeKind,
    pub tag: NodeTag,
    pub icon: String,
    pub can_rename: bool,
    pub is_expanded: bool,
    pub is_selected: bool,
    /// Set by the "Rename" command; the host opens an inline editor.
    pub rename_active: bool,
    pub commands: Vec<MenuCommand>,
    pub children: Vec<NodeId>,
}

impl ViewNode {
    pub fn new(header: impl Into<String>, kind: NodeKind, tag: NodeTag) -> Self {
        Self {
            id: NodeId::new(),
            parent: None,
            header: header.into(),
            kind,
            tag,
            icon: String::new(),
            can_rename: false,
            is_expanded: false,
            is_selected: false,
            rename_active: false,
            commands: Vec::new(),
            children: Vec::new(),
        }
    }

    #[inline]
    pub fn with_icon(mut self, icon: impl Into<String>) -> Self {
        self.icon = icon.into();
        self
    }

    #[inline]
    pub fn group_id(&self) -> Option<GroupId> {
        match self.tag {
            NodeTag::Group(id) => Some(id),
            _ => None,
        }
    }
}

/// Id-free structural description of a subtree, for comparing rebuilt trees.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct NodeSnapshot {
    pub header: String,
    pub kind: NodeKind,
    pub tag: NodeTag,
    pub icon: String,
    pub can_rename: bool,
    pub is_expanded: bool,
    pub commands: Vec<MenuCommand>,
    pub children: Vec<NodeSnapshot>,
}

/// Arena-backed tree with a single animation root.
#[derive(Debug, Clone)]
pub struct ViewTree {
    nodes: HashMap<NodeId, ViewNode>,
    root: NodeId,
}

impl ViewTree {
    /// Create a tree holding only an empty root node.
    pub fn new() -> Self {
        let root = ViewNode::new("", NodeKind::Animation, NodeTag::Animation);
        let id = root.id;
        let mut nodes = HashMap::new();
        nodes.insert(id, root);
        Self { nodes, root: id }
    }

    #[inline]
    pub fn root(&self) -> NodeId {
        self.root
    }

    /// Number of nodes in the arena, root included
    #[inline]
    pub fn len(&self) -> usize {
        self.nodes.len()
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.nodes.is_empty()
    }

    #[inline]
    pub fn node(&self, id: NodeId) -> Option<&ViewNode> {
        self.nodes.get(&id)
    }

    #[inline]
    pub fn node_mut(&mut self, id: NodeId) -> Option<&mut ViewNode> {
        self.nodes.get_mut(&id)
    }

    /// Like [`ViewTree::node`], but a missing node is an error.
    pub fn get(&self, id: NodeId) -> Result<&ViewNode> {
        self.nodes.get(&id).ok_or_else(|| not_found(id))
    }

    pub fn get_mut(&mut self, id: NodeId) -> Result<&mut ViewNode> {
        self.nodes.get_mut(&id).ok_or_else(|| not_found(id))
    }

    /// Children of a node; empty for unknown ids.
    pub fn children(&self, id: NodeId) -> &[NodeId] {
        self.nodes
            .get(&id)
            .map(|n| n.children.as_slice())
            .unwrap_or(&[])
    }

    /// Headers of a node's children, in order.
    pub fn child_headers(&self, id: NodeId) -> Vec<&str> {
        self.children(id)
            .iter()
            .filter_map(|c| self.nodes.get(c))
            .map(|n| n.header.as_str())
            .collect()
    }

    /// Add a node to the arena without attaching it anywhere.
    pub fn insert(&mut self, node: ViewNode) -> NodeId {
        let id = node.id;
        self.nodes.insert(id, node);
        id
    }

    /// Attach `child` as the last child of `parent`.
    pub fn append_child(&mut self, parent: NodeId, child: NodeId) -> Result<()> {
        self.get(parent)?;
        self.get(child)?;
        self.attach(parent, child);
        Ok(())
    }

    pub(crate) fn attach(&mut self, parent: NodeId, child: NodeId) {
        if let Some(node) = self.nodes.get_mut(&parent) {
            node.children.push(child);
        }
        if let Some(node) = self.nodes.get_mut(&child) {
            node.parent = Some(parent);
        }
    }

    /// Detach a node from its parent and drop it with all of its descendants.
    /// The root itself cannot be removed.
    pub fn remove_subtree(&mut self, id: NodeId) -> Result<()> {
        let node = self.get(id)?;
        if id == self.root {
            return Err(SkeletalError::UnexpectedNodeKind {
                node_id: id.to_string(),
                expected: "child node".to_string(),
                actual: node.kind.name().to_string(),
            });
        }
        self.drop_subtree(id);
        Ok(())
    }

    pub(crate) fn drop_subtree(&mut self, id: NodeId) {
        let parent = self.nodes.get(&id).and_then(|n| n.parent);
        if let Some(parent) = parent.and_then(|p| self.nodes.get_mut(&p)) {
            parent.children.retain(|c| *c != id);
        }
        for node in self.descendants(id) {
            self.nodes.remove(&node);
        }
        self.nodes.remove(&id);
    }

    /// Drop every child subtree of a node.
    pub fn clear_children(&mut self, id: NodeId) -> Result<()> {
        let children = std::mem::take(&mut self.get_mut(id)?.children);
        for child in children {
            for node in self.descendants(child) {
                self.nodes.remove(&node);
            }
            self.nodes.remove(&child);
        }
        Ok(())
    }

    /// Reorder a node's children by comparing their headers.
    pub(crate) fn sort_children_by<F>(&mut self, id: NodeId, mut compare: F)
    where
        F: FnMut(&str, &str) -> Ordering,
    {
        let mut order = self.children(id).to_vec();
        order.sort_by(|a, b| compare(self.header_of(*a), self.header_of(*b)));
        if let Some(node) = self.nodes.get_mut(&id) {
            node.children = order;
        }
    }

    fn header_of(&self, id: NodeId) -> &str {
        self.nodes.get(&id).map(|n| n.header.as_str()).unwrap_or("")
    }

    /// All descendants of a node in pre-order, the node itself excluded.
    pub fn descendants(&self, id: NodeId) -> Vec<NodeId> {
        let mut out = Vec::new();
        let mut stack: Vec<NodeId> = self.children(id).iter().rev().copied().collect();
        while let Some(next) = stack.pop() {
            out.push(next);
            stack.extend(self.children(next).iter().rev().copied());
        }
        out
    }

    /// Set the header text as the view does while the user types.
    pub fn set_header(&mut self, id: NodeId, header: impl Into<String>) -> Result<()> {
        self.get_mut(id)?.header = header.into();
        Ok(())
    }

    pub fn set_selected(&mut self, id: NodeId, selected: bool) -> Result<()> {
        self.get_mut(id)?.is_selected = selected;
        Ok(())
    }

    /// Selected direct children of a node, in child order.
    pub fn selected_children(&self, id: NodeId) -> Vec<NodeId> {
        self.children(id)
            .iter()
            .copied()
            .filter(|c| self.nodes.get(c).is_some_and(|n| n.is_selected))
            .collect()
    }

    /// The child of `parent` tagged with a group id.
    pub fn find_group_child(&self, parent: NodeId, group: GroupId) -> Option<NodeId> {
        self.children(parent)
            .iter()
            .copied()
            .find(|c| self.nodes.get(c).and_then(|n| n.group_id()) == Some(group))
    }

    /// Structural description of the subtree at `id`.
    pub fn snapshot(&self, id: NodeId) -> Option<NodeSnapshot> {
        let node = self.nodes.get(&id)?;
        Some(NodeSnapshot {
            header: node.header.clone(),
            kind: node.kind,
            tag: node.tag,
            icon: node.icon.clone(),
            can_rename: node.can_rename,
            is_expanded: node.is_expanded,
            commands: node.commands.clone(),
            children: node
                .children
                .iter()
                .filter_map(|c| self.snapshot(*c))
                .collect(),
        })
    }
}

impl Default for ViewTree {
    fn default() -> Self {
        Self::new()
    }
}

fn not_found(id: NodeId) -> SkeletalError {
    SkeletalError::NodeNotFound {
        node_id: id.to_string(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn leaf(tree: &mut ViewTree, parent: NodeId, header: &str) -> NodeId {
        let group = GroupId::new();
        let id = tree.insert(ViewNode::new(
            header,
            NodeKind::BoneGroup(AnimatedChannels::default()),
            NodeTag::Group(group),
        ));
        tree.append_child(parent, id).unwrap();
        id
    }

    #[test]
    fn append_and_remove_subtree() {
        let mut tree = ViewTree::new();
        let root = tree.root();
        let a = leaf(&mut tree, root, "A");
        let b = leaf(&mut tree, root, "B");
        leaf(&mut tree, a, "A.1");
        leaf(&mut tree, a, "A.2");
        assert_eq!(tree.len(), 5);

        tree.remove_subtree(a).unwrap();
        assert_eq!(tree.children(root), &[b]);
        assert_eq!(tree.len(), 2);
        assert!(tree.node(a).is_none());
    }

    #[test]
    fn descendants_are_pre_order() {
        let mut tree = ViewTree::new();
        let root = tree.root();
        let a = leaf(&mut tree, root, "A");
        let a1 = leaf(&mut tree, a, "A.1");
        let a1x = leaf(&mut tree, a1, "A.1.x");
        let b = leaf(&mut tree, root, "B");
        assert_eq!(tree.descendants(root), vec![a, a1, a1x, b]);
    }

    #[test]
    fn selection_only_reports_direct_children() {
        let mut tree = ViewTree::new();
        let root = tree.root();
        let a = leaf(&mut tree, root, "A");
        let b = leaf(&mut tree, root, "B");
        let nested = leaf(&mut tree, a, "A.1");
        tree.set_selected(b, true).unwrap();
        tree.set_selected(nested, true).unwrap();
        assert_eq!(tree.selected_children(root), vec![b]);
    }

    #[test]
    fn clear_children_drops_the_whole_subtree() {
        let mut tree = ViewTree::new();
        let root = tree.root();
        let a = leaf(&mut tree, root, "A");
        leaf(&mut tree, a, "A.1");
        tree.clear_children(root).unwrap();
        assert_eq!(tree.len(), 1);
        assert!(tree.children(root).is_empty());
    }

    #[test]
    fn unknown_node_is_an_error() {
        let mut tree = ViewTree::new();
        let err = tree.set_header(NodeId::new(), "x").unwrap_err();
        assert!(matches!(err, SkeletalError::NodeNotFound { .. }));
    }
}
