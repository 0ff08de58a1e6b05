//! The editable skeletal animation: an ordered list of bone groups.

use serde::{Deserialize, Serialize};

use crate::group::BoneAnimGroup;
use crate::ids::GroupId;

/// A skeletal animation as seen by the editor.
///
/// `groups` order is display order. It is preserved by renames and changed
/// only by sorting, adding or deleting.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SkeletalAnimation {
    pub name: String,
    #[serde(default)]
    pub groups: Vec<BoneAnimGroup>,
    /// Set whenever the editor changes the animation; consumed by persistence.
    #[serde(skip)]
    pub edited: bool,
}

impl SkeletalAnimation {
    /// Create an animation without any bone groups
    #[inline]
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            groups: Vec::new(),
            edited: false,
        }
    }

    /// Create an animation from already loaded bone groups
    pub fn with_groups(name: impl Into<String>, groups: Vec<BoneAnimGroup>) -> Self {
        Self {
            name: name.into(),
            groups,
            edited: false,
        }
    }

    #[inline]
    pub fn mark_edited(&mut self) {
        self.edited = true;
    }

    #[inline]
    pub fn clear_edited(&mut self) {
        self.edited = false;
    }

    /// Get a group by its identity
    #[inline]
    pub fn group(&self, id: GroupId) -> Option<&BoneAnimGroup> {
        self.groups.iter().find(|g| g.id == id)
    }

    /// Get a mutable reference to a group by its identity
    #[inline]
    pub fn group_mut(&mut self, id: GroupId) -> Option<&mut BoneAnimGroup> {
        self.groups.iter_mut().find(|g| g.id == id)
    }

    /// Position of the first group with exactly this name
    #[inline]
    pub fn position_by_name(&self, name: &str) -> Option<usize> {
        self.groups.iter().position(|g| g.name == name)
    }

    #[inline]
    pub fn position_of(&self, id: GroupId) -> Option<usize> {
        self.groups.iter().position(|g| g.id == id)
    }

    /// Whether a group other than `except` already uses `name` (exact, case-sensitive).
    pub fn name_taken(&self, name: &str, except: GroupId) -> bool {
        self.groups.iter().any(|g| g.id != except && g.name == name)
    }

    /// Group names in display order
    pub fn group_names(&self) -> Vec<&str> {
        self.groups.iter().map(|g| g.name.as_str()).collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sample() -> SkeletalAnimation {
        SkeletalAnimation::with_groups(
            "Walk",
            vec![BoneAnimGroup::new("Hip"), BoneAnimGroup::new("Spine")],
        )
    }

    #[test]
    fn lookup_by_name_and_id() {
        let anim = sample();
        let spine = anim.groups[1].id;
        assert_eq!(anim.position_by_name("Spine"), Some(1));
        assert_eq!(anim.position_by_name("spine"), None);
        assert_eq!(anim.position_of(spine), Some(1));
        assert_eq!(anim.group(spine).map(|g| g.name.as_str()), Some("Spine"));
    }

    #[test]
    fn name_taken_ignores_the_group_itself() {
        let anim = sample();
        let hip = anim.groups[0].id;
        assert!(!anim.name_taken("Hip", hip));
        assert!(anim.name_taken("Spine", hip));
    }

    #[test]
    fn edited_flag_is_not_serialized() {
        let mut anim = sample();
        anim.mark_edited();
        let json = serde_json::to_string(&anim).unwrap();
        let back: SkeletalAnimation = serde_json::from_str(&json).unwrap();
        assert!(!back.edited);
        assert_eq!(back.group_names(), ["Hip", "Spine"]);

        anim.clear_edited();
        assert!(!anim.edited);
    }
}
