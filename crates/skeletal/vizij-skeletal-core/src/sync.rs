//! Keeps a skeletal animation and its view tree in lock-step.
//!
//! Every structural edit goes through [`AnimationSession`], which applies it
//! to the bone groups and to the root's children before returning. After each
//! completed operation `tree.children(root)[i]` mirrors `animation.groups[i]`.

use log::{debug, warn};

use crate::animation::SkeletalAnimation;
use crate::commands::{CommandOutcome, DeleteReport, NodeAction, RemovalNotice, RenameOutcome};
use crate::config::EditorConfig;
use crate::group::BoneAnimGroup;
use crate::ids::NodeId;
use crate::nodes::{group_node, root_commands};
use crate::notify::Notifier;
use crate::track::TrackChannel;
use crate::view::{NodeKind, NodeTag, ViewTree};
use crate::{Result, SkeletalError};

/// Rebuild the whole view subtree for an animation from scratch.
///
/// `None` is accepted and leaves the tree untouched. Calling this twice on an
/// unchanged animation produces structurally identical trees.
pub fn reload_tree(
    tree: &mut ViewTree,
    animation: Option<&mut SkeletalAnimation>,
    config: &EditorConfig,
) -> Option<NodeId> {
    let animation = animation?;
    let root = tree.root();

    if let Some(node) = tree.node_mut(root) {
        node.header = animation.name.clone();
        node.kind = NodeKind::Animation;
        node.tag = NodeTag::Animation;
        node.icon = config.icons.animation.clone();
        node.can_rename = true;
        node.is_expanded = config.expand_root;
        node.rename_active = false;
        node.commands = root_commands(config);
    }

    if let Err(err) = tree.clear_children(root) {
        warn!("could not clear the view root before reloading: {err}");
    }
    for group in animation.groups.iter_mut() {
        let child = group_node(tree, config, group);
        tree.attach(root, child);
    }

    debug!(
        "reloaded tree for '{}' with {} bone group(s)",
        animation.name,
        animation.groups.len()
    );
    Some(root)
}

/// Check that the view mirrors the animation.
///
/// Reports the first position where membership, order, header, tag or the
/// nine track children disagree.
pub fn verify(animation: &SkeletalAnimation, tree: &ViewTree) -> Result<()> {
    let children = tree.children(tree.root());
    if children.len() != animation.groups.len() {
        return Err(SkeletalError::Desync {
            index: children.len().min(animation.groups.len()),
            reason: format!(
                "{} view node(s) for {} bone group(s)",
                children.len(),
                animation.groups.len()
            ),
        });
    }

    for (index, (child, group)) in children.iter().zip(&animation.groups).enumerate() {
        let desync = |reason: String| SkeletalError::Desync { index, reason };
        let node = tree.get(*child)?;
        if node.header != group.name {
            return Err(desync(format!(
                "header '{}' does not match group '{}'",
                node.header, group.name
            )));
        }
        if node.tag != NodeTag::Group(group.id) {
            return Err(desync(format!("node is not tagged with group '{}'", group.name)));
        }
        let tracks = tree.children(*child);
        if tracks.len() != TrackChannel::ALL.len() {
            return Err(desync(format!("{} track node(s) under '{}'", tracks.len(), group.name)));
        }
        for (track, channel) in tracks.iter().zip(TrackChannel::ALL) {
            let expected = NodeTag::Track {
                group: group.id,
                channel,
            };
            if tree.get(*track)?.tag != expected {
                return Err(desync(format!("track node for {channel} out of place")));
            }
        }
    }
    Ok(())
}

/// One open animation together with the tree that shows it.
#[derive(Debug, Clone)]
pub struct AnimationSession {
    animation: SkeletalAnimation,
    tree: ViewTree,
    config: EditorConfig,
}

impl AnimationSession {
    /// Open an animation and build its view tree.
    pub fn new(animation: SkeletalAnimation, config: EditorConfig) -> Self {
        let mut session = Self {
            animation,
            tree: ViewTree::new(),
            config,
        };
        session.reload();
        session
    }

    #[inline]
    pub fn animation(&self) -> &SkeletalAnimation {
        &self.animation
    }

    /// Mutable access to the model for non-structural edits such as keyframe
    /// values. Call [`AnimationSession::reload`] after changing groups here.
    #[inline]
    pub fn animation_mut(&mut self) -> &mut SkeletalAnimation {
        &mut self.animation
    }

    #[inline]
    pub fn tree(&self) -> &ViewTree {
        &self.tree
    }

    /// Mutable access for what the view owns: selection, expansion and
    /// optimistic header edits.
    #[inline]
    pub fn tree_mut(&mut self) -> &mut ViewTree {
        &mut self.tree
    }

    #[inline]
    pub fn config(&self) -> &EditorConfig {
        &self.config
    }

    #[inline]
    pub fn root(&self) -> NodeId {
        self.tree.root()
    }

    /// Close the session, handing back the animation.
    pub fn into_animation(self) -> SkeletalAnimation {
        self.animation
    }

    /// Rebuild the tree after an out-of-band change to the animation.
    pub fn reload(&mut self) {
        reload_tree(&mut self.tree, Some(&mut self.animation), &self.config);
    }

    pub fn verify(&self) -> Result<()> {
        verify(&self.animation, &self.tree)
    }

    /// Append a new bone group and its node. Always succeeds.
    ///
    /// The new group takes the configured name without a uniqueness check,
    /// so adding twice yields two groups with the same name.
    pub fn add_bone_group(&mut self) -> NodeId {
        let mut group = BoneAnimGroup::new(self.config.new_bone_name.clone());
        let node = group_node(&mut self.tree, &self.config, &mut group);
        self.animation.groups.push(group);
        let root = self.tree.root();
        self.tree.attach(root, node);
        self.animation.mark_edited();

        debug!(
            "added bone group '{}' to '{}'",
            self.config.new_bone_name, self.animation.name
        );
        node
    }

    /// Validate the header the view already applied to a bone group node.
    ///
    /// A header equal to the stored name is a no-op. A header that another
    /// group already uses is rejected: the header is reverted, the user is
    /// notified and the model is left alone. Anything else renames the group
    /// and its track collection.
    pub fn rename_group<N: Notifier + ?Sized>(
        &mut self,
        node: NodeId,
        notifier: &mut N,
    ) -> Result<RenameOutcome> {
        let view = self.tree.get(node)?;
        let group_id = view.group_id().ok_or_else(|| unexpected(node, "bone group", view.kind))?;
        let proposed = view.header.clone();
        let group = self
            .animation
            .group(group_id)
            .ok_or_else(|| SkeletalError::GroupNotFound {
                group_id: group_id.to_string(),
            })?;

        if group.data.name == proposed {
            self.tree.get_mut(node)?.rename_active = false;
            return Ok(RenameOutcome::Unchanged);
        }

        if self.animation.name_taken(&proposed, group_id) {
            let stored = group.data.name.clone();
            let view = self.tree.get_mut(node)?;
            view.header = stored;
            view.rename_active = false;

            let err = SkeletalError::DuplicateName { name: proposed };
            warn!("rejected rename: {err}");
            notifier.error(&err.to_string());
            return Err(err);
        }

        let from = group.name.clone();
        if let Some(group) = self.animation.group_mut(group_id) {
            group.set_name(&proposed);
        }
        self.tree.get_mut(node)?.rename_active = false;
        self.animation.mark_edited();

        debug!("renamed bone group '{from}' to '{proposed}'");
        Ok(RenameOutcome::Renamed { from, to: proposed })
    }

    /// Apply the root's header to the animation name.
    pub fn rename_animation(&mut self) -> RenameOutcome {
        let root = self.tree.root();
        let Some(view) = self.tree.node_mut(root) else {
            return RenameOutcome::Unchanged;
        };
        view.rename_active = false;
        if view.header == self.animation.name {
            return RenameOutcome::Unchanged;
        }

        let from = std::mem::replace(&mut self.animation.name, view.header.clone());
        self.animation.mark_edited();
        debug!("renamed animation '{from}' to '{}'", self.animation.name);
        RenameOutcome::Renamed {
            from,
            to: self.animation.name.clone(),
        }
    }

    /// Commit an inline header edit: apply it to the node, then validate it.
    ///
    /// On any error the node keeps the header it had before the edit.
    pub fn commit_header<N: Notifier + ?Sized>(
        &mut self,
        node: NodeId,
        header: impl Into<String>,
        notifier: &mut N,
    ) -> Result<RenameOutcome> {
        let view = self.tree.get_mut(node)?;
        if !view.can_rename {
            return Err(unexpected(node, "renamable node", view.kind));
        }
        let kind = view.kind;
        let previous = std::mem::replace(&mut view.header, header.into());

        let result = match kind {
            NodeKind::Animation => Ok(self.rename_animation()),
            _ => self.rename_group(node, notifier),
        };

        // Duplicate names already revert to the stored name.
        if let Err(err) = &result {
            if !matches!(err, SkeletalError::DuplicateName { .. }) {
                if let Some(view) = self.tree.node_mut(node) {
                    view.header = previous;
                    view.rename_active = false;
                }
            }
        }
        result
    }

    /// Reorder groups by name and the root's children by header with the
    /// same ordinal comparison.
    pub fn sort_groups(&mut self, ascending: bool) {
        let compare = |a: &str, b: &str| if ascending { a.cmp(b) } else { b.cmp(a) };

        let root = self.tree.root();
        self.tree.sort_children_by(root, compare);
        self.animation
            .groups
            .sort_by(|a, b| compare(a.name.as_str(), b.name.as_str()));
        self.animation.mark_edited();

        debug!(
            "sorted {} bone group(s) {}",
            self.animation.groups.len(),
            if ascending { "ascending" } else { "descending" }
        );
    }

    /// Delete every selected bone group node under the root.
    ///
    /// Each selected node's removal observers are notified first. The group
    /// is then looked up by exact name; a node without a matching group is
    /// skipped and the remaining selections are still processed.
    pub fn delete_selected_groups(&mut self) -> DeleteReport {
        let root = self.tree.root();
        let children = self.tree.children(root).to_vec();
        let mut report = DeleteReport::default();

        for node in children {
            let Some(view) = self.tree.node(node) else {
                continue;
            };
            if !view.is_selected {
                continue;
            }
            let header = view.header.clone();
            let tagged = view.group_id();

            report.notices.extend(self.removal_notices(node));

            // Among groups sharing the header, prefer the one this node mirrors.
            let index = tagged
                .and_then(|id| self.animation.position_of(id))
                .filter(|&i| self.animation.groups[i].name == header)
                .or_else(|| self.animation.position_by_name(&header));
            let Some(index) = index else {
                warn!("no bone group named '{header}' for selected node {node}; skipping");
                report.skipped.push(node);
                continue;
            };

            let group = self.animation.groups.remove(index);
            self.tree.drop_subtree(node);
            report.removed.push(group.id);
        }

        if !report.removed.is_empty() {
            self.animation.mark_edited();
        }
        debug!(
            "deleted {} selected bone group(s), skipped {}",
            report.removed.len(),
            report.skipped.len()
        );
        report
    }

    /// Delete the one bone group a node mirrors.
    pub fn delete_group(&mut self, node: NodeId) -> Result<DeleteReport> {
        let view = self.tree.get(node)?;
        let group_id = view.group_id().ok_or_else(|| unexpected(node, "bone group", view.kind))?;
        let index = self
            .animation
            .position_of(group_id)
            .ok_or_else(|| SkeletalError::GroupNotFound {
                group_id: group_id.to_string(),
            })?;

        let notices = self.removal_notices(node);
        let group = self.animation.groups.remove(index);
        self.tree.drop_subtree(node);
        self.animation.mark_edited();

        debug!("deleted bone group '{}'", group.name);
        Ok(DeleteReport {
            removed: vec![group.id],
            skipped: Vec::new(),
            notices,
        })
    }

    /// Flag a node for inline renaming.
    pub fn begin_rename(&mut self, node: NodeId) -> Result<()> {
        let view = self.tree.get_mut(node)?;
        if !view.can_rename {
            return Err(unexpected(node, "renamable node", view.kind));
        }
        view.rename_active = true;
        Ok(())
    }

    /// Run the action of a context-menu command invoked on `node`.
    ///
    /// Actions the node does not offer in its `commands` are ignored.
    pub fn dispatch(&mut self, node: NodeId, action: NodeAction) -> Result<CommandOutcome> {
        let offered = self
            .tree
            .get(node)?
            .commands
            .iter()
            .any(|c| c.action == action);
        if !offered {
            debug!("ignoring {action:?} on node {node}: not offered there");
            return Ok(CommandOutcome::Ignored);
        }

        match action {
            NodeAction::AddBone => Ok(CommandOutcome::Added(self.add_bone_group())),
            NodeAction::BeginRename => {
                self.begin_rename(node)?;
                Ok(CommandOutcome::RenameStarted(node))
            }
            NodeAction::SortAscending => {
                self.sort_groups(true);
                Ok(CommandOutcome::Sorted { ascending: true })
            }
            NodeAction::SortDescending => {
                self.sort_groups(false);
                Ok(CommandOutcome::Sorted { ascending: false })
            }
            NodeAction::DeleteSelected => {
                Ok(CommandOutcome::Deleted(self.delete_selected_groups()))
            }
            NodeAction::DeleteGroup => Ok(CommandOutcome::Deleted(self.delete_group(node)?)),
            NodeAction::Separator => Ok(CommandOutcome::Ignored),
        }
    }

    /// Notices for every descendant of `node` that observes group removal.
    fn removal_notices(&self, node: NodeId) -> Vec<RemovalNotice> {
        self.tree
            .descendants(node)
            .into_iter()
            .filter_map(|id| self.tree.node(id))
            .filter(|n| n.kind.observes_group_removal())
            .map(|n| RemovalNotice {
                node: n.id,
                tag: n.tag,
            })
            .collect()
    }
}

fn unexpected(node: NodeId, expected: &str, actual: NodeKind) -> SkeletalError {
    SkeletalError::UnexpectedNodeKind {
        node_id: node.to_string(),
        expected: expected.to_string(),
        actual: actual.name().to_string(),
    }
}
