//! Identifiers for bone groups and view nodes.

use crate::SkeletalError;
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// Stable identity of a bone animation group.
///
/// View nodes tag the group they mirror with this id instead of holding a
/// reference to it, so the view never owns model data.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct GroupId(Uuid);

impl GroupId {
    /// Generate a new group ID
    #[inline]
    pub fn new() -> Self {
        Self(Uuid::new_v4())
    }

    /// Create a group ID from a UUID string
    #[inline]
    pub fn from_string(id: impl AsRef<str>) -> Result<Self, SkeletalError> {
        Uuid::parse_str(id.as_ref())
            .map(Self)
            .map_err(|_| SkeletalError::InvalidValue {
                reason: format!("Invalid group ID: {}", id.as_ref()),
            })
    }

    /// Get the underlying UUID
    #[inline]
    pub fn uuid(&self) -> Uuid {
        self.0
    }
}

impl Default for GroupId {
    fn default() -> Self {
        Self::new()
    }
}

impl From<Uuid> for GroupId {
    #[inline]
    fn from(uuid: Uuid) -> Self {
        Self(uuid)
    }
}

impl std::fmt::Display for GroupId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// Unique identifier for a node of the view tree
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct NodeId(Uuid);

impl NodeId {
    /// Generate a new node ID
    #[inline]
    pub fn new() -> Self {
        Self(Uuid::new_v4())
    }

    /// Get the underlying UUID
    #[inline]
    pub fn uuid(&self) -> Uuid {
        self.0
    }
}

impl Default for NodeId {
    fn default() -> Self {
        Self::new()
    }
}

impl From<Uuid> for NodeId {
    #[inline]
    fn from(uuid: Uuid) -> Self {
        Self(uuid)
    }
}

impl std::fmt::Display for NodeId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn ids_are_unique() {
        assert_ne!(GroupId::new(), GroupId::new());
        assert_ne!(NodeId::new(), NodeId::new());
    }

    #[test]
    fn group_id_parses_uuid_strings() {
        let id = GroupId::from_string("d7a6b716-10b0-40bb-a894-8bc13a992737").unwrap();
        assert_eq!(id.to_string(), "d7a6b716-10b0-40bb-a894-8bc13a992737");
        let err = GroupId::from_string("not-a-uuid").unwrap_err();
        assert_eq!(
            err,
            SkeletalError::InvalidValue {
                reason: "Invalid group ID: not-a-uuid".to_string()
            }
        );
        assert_eq!(err.category(), "validation");
    }
}
