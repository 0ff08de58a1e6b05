//! Builds view nodes for bone groups and their tracks.

use crate::commands::{MenuCommand, NodeAction};
use crate::config::EditorConfig;
use crate::group::BoneAnimGroup;
use crate::ids::{GroupId, NodeId};
use crate::track::{Track, TrackChannel};
use crate::view::{AnimatedChannels, NodeKind, NodeTag, ViewNode, ViewTree};

/// Commands offered on the animation root.
pub fn root_commands(config: &EditorConfig) -> Vec<MenuCommand> {
    let labels = &config.labels;
    vec![
        MenuCommand::new(&labels.add_bone, NodeAction::AddBone),
        MenuCommand::new(&labels.rename, NodeAction::BeginRename),
        MenuCommand::new(&labels.sort_ascending, NodeAction::SortAscending),
        MenuCommand::new(&labels.sort_descending, NodeAction::SortDescending),
        MenuCommand::new(&labels.delete_selected, NodeAction::DeleteSelected),
    ]
}

/// Commands offered on a bone group node.
pub fn group_commands(config: &EditorConfig) -> Vec<MenuCommand> {
    vec![
        MenuCommand::new(&config.labels.rename, NodeAction::BeginRename),
        MenuCommand::separator(),
        MenuCommand::new(&config.labels.delete, NodeAction::DeleteGroup),
    ]
}

/// Build the node for a bone group with its nine track children.
///
/// The returned node is in the arena but not attached to a parent. Building
/// the track children names the group's tracks.
pub fn group_node(tree: &mut ViewTree, config: &EditorConfig, group: &mut BoneAnimGroup) -> NodeId {
    let animated = AnimatedChannels {
        translate: group.translate().is_animated(),
        rotate: group.rotate().is_animated(),
        scale: group.scale().is_animated(),
    };

    let mut node = ViewNode::new(
        group.name.clone(),
        NodeKind::BoneGroup(animated),
        NodeTag::Group(group.id),
    )
    .with_icon(&config.icons.bone);
    node.can_rename = true;
    node.is_expanded = config.expand_groups;
    node.commands = group_commands(config);
    let id = tree.insert(node);

    for channel in TrackChannel::ALL {
        let child = track_node(tree, config, group.id, group.data.track_mut(channel), channel);
        tree.attach(id, child);
    }

    log::trace!("built node for bone group '{}' ({})", group.name, group.id);
    id
}

/// Build the node for one track, assigning the track's name on the way.
pub fn track_node(
    tree: &mut ViewTree,
    config: &EditorConfig,
    group: GroupId,
    track: &mut Track,
    channel: TrackChannel,
) -> NodeId {
    track.name = channel.label().to_string();
    let node = ViewNode::new(
        track.name.clone(),
        NodeKind::Track(channel.conversion()),
        NodeTag::Track { group, channel },
    )
    .with_icon(&config.icons.track);
    tree.insert(node)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::track::DisplayConversion;

    #[test]
    fn group_node_has_nine_tracks_in_fixed_order() {
        let mut tree = ViewTree::new();
        let config = EditorConfig::default();
        let mut group = BoneAnimGroup::new("Spine");
        let id = group_node(&mut tree, &config, &mut group);

        let node = tree.node(id).unwrap();
        assert_eq!(node.header, "Spine");
        assert_eq!(node.tag, NodeTag::Group(group.id));
        assert!(node.can_rename);
        assert!(!node.is_expanded);
        assert_eq!(node.commands.len(), 3);
        assert!(node.commands[1].is_separator());

        assert_eq!(
            tree.child_headers(id),
            [
                "Translate.X",
                "Translate.Y",
                "Translate.Z",
                "Rotate.X",
                "Rotate.Y",
                "Rotate.Z",
                "Scale.X",
                "Scale.Y",
                "Scale.Z"
            ]
        );

        for (child, channel) in tree.children(id).iter().zip(TrackChannel::ALL) {
            let child = tree.node(*child).unwrap();
            let expected = if channel.is_rotation() {
                DisplayConversion::RadiansToDegrees
            } else {
                DisplayConversion::None
            };
            assert_eq!(child.kind, NodeKind::Track(expected));
            assert_eq!(child.parent, Some(id));
            assert!(child.kind.observes_group_removal());
        }
    }

    #[test]
    fn building_track_nodes_names_the_tracks() {
        let mut tree = ViewTree::new();
        let mut group = BoneAnimGroup::new("Arm");
        group.data.rotate.z.name.clear();
        group_node(&mut tree, &EditorConfig::default(), &mut group);
        assert_eq!(group.data.rotate.z.name, "Rotate.Z");
    }

    #[test]
    fn animated_channels_follow_keyframe_counts() {
        let mut tree = ViewTree::new();
        let mut group = BoneAnimGroup::new("Head");
        group.data.rotate.y.push_keyframe(0.0, 0.0);
        group.data.rotate.y.push_keyframe(5.0, 1.0);
        let id = group_node(&mut tree, &EditorConfig::default(), &mut group);
        let expected = AnimatedChannels {
            translate: false,
            rotate: true,
            scale: false,
        };
        assert_eq!(tree.node(id).unwrap().kind, NodeKind::BoneGroup(expected));
    }
}
