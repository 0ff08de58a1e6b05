//! Error types for the skeletal editing core

use serde::{Deserialize, Serialize};

/// Error type for skeletal editing operations
#[derive(thiserror::Error, Debug, Clone, PartialEq, Serialize, Deserialize)]
#[non_exhaustive]
pub enum SkeletalError {
    /// Another bone group in the same animation already uses this name
    #[error("Name {name} already exists!")]
    DuplicateName { name: String },

    /// The view tree has no node with this id
    #[error("Node not found: {node_id}")]
    NodeNotFound { node_id: String },

    /// The node exists but is not the kind the operation expects
    #[error("Unexpected node kind for {node_id}: expected {expected}, got {actual}")]
    UnexpectedNodeKind {
        node_id: String,
        expected: String,
        actual: String,
    },

    /// A view node tags a group the animation does not contain
    #[error("Bone group not found: {group_id}")]
    GroupNotFound { group_id: String },

    /// Data model and view tree disagree
    #[error("View out of sync at position {index}: {reason}")]
    Desync { index: usize, reason: String },

    /// A value could not be parsed or is out of range
    #[error("Invalid value: {reason}")]
    InvalidValue { reason: String },

    /// Invalid editor configuration
    #[error("Invalid config: {reason}")]
    InvalidConfig { reason: String },

    /// Serialization error
    #[error("Serialization error: {reason}")]
    SerializationError { reason: String },
}

impl SkeletalError {
    /// Check if this is a recoverable error
    ///
    /// Recoverable errors leave both the model and the view in their prior
    /// valid state, so the editing session can simply continue.
    #[inline]
    pub fn is_recoverable(&self) -> bool {
        matches!(
            self,
            Self::DuplicateName { .. }
                | Self::NodeNotFound { .. }
                | Self::UnexpectedNodeKind { .. }
                | Self::InvalidValue { .. }
                | Self::InvalidConfig { .. }
        )
    }

    /// Get error category for logging
    #[inline]
    pub fn category(&self) -> &'static str {
        match self {
            Self::DuplicateName { .. } | Self::InvalidValue { .. } => "validation",
            Self::NodeNotFound { .. } | Self::UnexpectedNodeKind { .. } => "view",
            Self::GroupNotFound { .. } | Self::Desync { .. } => "sync",
            Self::InvalidConfig { .. } => "config",
            Self::SerializationError { .. } => "serialization",
        }
    }
}

impl From<serde_json::Error> for SkeletalError {
    fn from(err: serde_json::Error) -> Self {
        Self::SerializationError {
            reason: err.to_string(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn duplicate_name_message_matches_dialog_text() {
        let error = SkeletalError::DuplicateName {
            name: "Spine".to_string(),
        };
        assert_eq!(error.to_string(), "Name Spine already exists!");
        assert!(error.is_recoverable());
        assert_eq!(error.category(), "validation");
    }

    #[test]
    fn desync_is_not_recoverable() {
        let error = SkeletalError::Desync {
            index: 2,
            reason: "header mismatch".to_string(),
        };
        assert!(!error.is_recoverable());
        assert_eq!(error.category(), "sync");
    }

    #[test]
    fn test_serialization() {
        let error = SkeletalError::NodeNotFound {
            node_id: "abc".to_string(),
        };
        let serialized = serde_json::to_string(&error).unwrap();
        let deserialized: SkeletalError = serde_json::from_str(&serialized).unwrap();
        assert_eq!(error, deserialized);
    }
}
