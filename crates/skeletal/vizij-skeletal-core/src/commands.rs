//! Command objects attached to view nodes and the notices operations emit.
//!
//! Node construction returns the commands a node offers instead of
//! registering callbacks; the host shows them in a context menu and hands the
//! chosen action back to the session.

use serde::{Deserialize, Serialize};

use crate::ids::{GroupId, NodeId};
use crate::view::NodeTag;

/// What a context-menu entry does when invoked.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum NodeAction {
    /// Append a new bone group to the animation
    AddBone,
    /// Open the inline header editor on the node
    BeginRename,
    SortAscending,
    SortDescending,
    /// Delete every selected bone group under the root
    DeleteSelected,
    /// Delete the bone group the node mirrors
    DeleteGroup,
    /// Visual divider; invoking it does nothing
    Separator,
}

/// A labelled entry of a node's context menu.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct MenuCommand {
    pub label: String,
    pub action: NodeAction,
}

impl MenuCommand {
    #[inline]
    pub fn new(label: impl Into<String>, action: NodeAction) -> Self {
        Self {
            label: label.into(),
            action,
        }
    }

    #[inline]
    pub fn separator() -> Self {
        Self::new("", NodeAction::Separator)
    }

    #[inline]
    pub fn is_separator(&self) -> bool {
        self.action == NodeAction::Separator
    }
}

/// Emitted for each node that listens for its bone group being removed.
///
/// The host uses these to detach any observers it hung on the node before
/// the node goes away.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct RemovalNotice {
    pub node: NodeId,
    pub tag: NodeTag,
}

/// Result of a delete operation.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct DeleteReport {
    /// Groups removed from the animation, in removal order
    pub removed: Vec<GroupId>,
    /// Selected nodes with no matching group; left in place
    pub skipped: Vec<NodeId>,
    /// Removal notices, in emission order
    pub notices: Vec<RemovalNotice>,
}

impl DeleteReport {
    #[inline]
    pub fn is_empty(&self) -> bool {
        self.removed.is_empty() && self.skipped.is_empty()
    }
}

/// Outcome of a header rename that passed validation.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub enum RenameOutcome {
    /// The header already matched the stored name
    Unchanged,
    Renamed { from: String, to: String },
}

/// Outcome of dispatching a [`NodeAction`].
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub enum CommandOutcome {
    Added(NodeId),
    RenameStarted(NodeId),
    Sorted { ascending: bool },
    Deleted(DeleteReport),
    /// Separators and actions the node does not offer
    Ignored,
}
