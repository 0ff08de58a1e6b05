//! Vizij Skeletal Core
//!
//! Editing model for skeletal animations: bone groups of nine scalar tracks,
//! kept structurally identical to the tree view the user edits. Every add,
//! rename, sort and delete goes through [`AnimationSession`] and lands on both
//! sides before control returns to the host.

pub mod animation;
pub mod commands;
pub mod config;
pub mod error;
pub mod group;
pub mod ids;
pub mod nodes;
pub mod notify;
pub mod sync;
pub mod track;
pub mod view;

// Re-exports for hosts
pub use animation::SkeletalAnimation;
pub use commands::{
    CommandOutcome, DeleteReport, MenuCommand, NodeAction, RemovalNotice, RenameOutcome,
};
pub use config::{EditorConfig, IconGlyphs, MenuLabels};
pub use error::SkeletalError;
pub use group::{BoneAnimData, BoneAnimGroup};
pub use ids::{GroupId, NodeId};
pub use nodes::{group_node, track_node};
pub use notify::{LogNotifier, Notifier, RecordingNotifier};
pub use sync::{reload_tree, verify, AnimationSession};
pub use track::{DisplayConversion, Keyframe, Track, TrackChannel, TrackTriple};
pub use view::{AnimatedChannels, NodeKind, NodeSnapshot, NodeTag, ViewNode, ViewTree};

/// Skeletal core result type
pub type Result<T> = core::result::Result<T, SkeletalError>;
