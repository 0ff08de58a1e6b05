//! Configuration for the skeletal editing session

use crate::SkeletalError;
use serde::{Deserialize, Serialize};

/// Settings that shape how the view tree is built and how new bones are named.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct EditorConfig {
    /// Name given to bones created with "Add Bone". Not checked for uniqueness.
    pub new_bone_name: String,
    /// Whether the animation root node starts expanded
    pub expand_root: bool,
    /// Whether bone group nodes start expanded
    pub expand_groups: bool,
    /// Context menu labels
    pub labels: MenuLabels,
    /// Icon glyphs handed to the host for each node kind
    pub icons: IconGlyphs,
}

impl Default for EditorConfig {
    fn default() -> Self {
        Self {
            new_bone_name: "NewBone".to_string(),
            expand_root: true,
            expand_groups: false,
            labels: MenuLabels::default(),
            icons: IconGlyphs::default(),
        }
    }
}

/// Labels shown for the context menu entries.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct MenuLabels {
    pub add_bone: String,
    pub rename: String,
    pub sort_ascending: String,
    pub sort_descending: String,
    pub delete_selected: String,
    pub delete: String,
}

impl Default for MenuLabels {
    fn default() -> Self {
        Self {
            add_bone: "Add Bone".to_string(),
            rename: "Rename".to_string(),
            sort_ascending: "Sort (A -> Z)".to_string(),
            sort_descending: "Sort (Z -> A)".to_string(),
            delete_selected: "Delete Selected".to_string(),
            delete: "Delete".to_string(),
        }
    }
}

/// Icon glyphs. Rendering them is up to the host.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct IconGlyphs {
    pub animation: String,
    pub bone: String,
    pub track: String,
}

impl Default for IconGlyphs {
    fn default() -> Self {
        Self {
            animation: '\u{f008}'.to_string(),
            bone: '\u{f5d7}'.to_string(),
            track: '\u{f1b2}'.to_string(),
        }
    }
}

impl EditorConfig {
    /// A configuration that expands every node, handy for hosts that show the
    /// whole skeleton at once.
    pub fn expanded() -> Self {
        Self {
            expand_groups: true,
            ..Self::default()
        }
    }

    /// Parse a configuration from JSON; missing fields take their defaults.
    pub fn from_json_str(s: &str) -> Result<Self, SkeletalError> {
        let config: Self = serde_json::from_str(s)?;
        config.validate()?;
        Ok(config)
    }

    /// Validate the configuration
    pub fn validate(&self) -> Result<(), SkeletalError> {
        if self.new_bone_name.trim().is_empty() {
            return Err(SkeletalError::InvalidConfig {
                reason: "New bone name must not be empty".to_string(),
            });
        }

        let labels = &self.labels;
        let all = [
            &labels.add_bone,
            &labels.rename,
            &labels.sort_ascending,
            &labels.sort_descending,
            &labels.delete_selected,
            &labels.delete,
        ];
        if all.iter().any(|l| l.is_empty()) {
            return Err(SkeletalError::InvalidConfig {
                reason: "Menu labels must not be empty".to_string(),
            });
        }

        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_config() {
        let config = EditorConfig::default();
        assert_eq!(config.new_bone_name, "NewBone");
        assert!(config.expand_root);
        assert!(!config.expand_groups);
        assert!(config.validate().is_ok());
    }

    #[test]
    fn partial_json_keeps_defaults() {
        let config = EditorConfig::from_json_str(r#"{ "new_bone_name": "Bone" }"#).unwrap();
        assert_eq!(config.new_bone_name, "Bone");
        assert_eq!(config.labels.add_bone, "Add Bone");
        assert_eq!(config.icons.track, "\u{f1b2}");
    }

    #[test]
    fn test_config_validation() {
        let err = EditorConfig::from_json_str(r#"{ "new_bone_name": "  " }"#).unwrap_err();
        assert_eq!(err.category(), "config");

        let mut config = EditorConfig::expanded();
        config.labels.delete.clear();
        assert!(config.validate().is_err());
    }

    #[test]
    fn config_round_trips_through_json() {
        let mut config = EditorConfig::expanded();
        config.labels.sort_ascending = "A-Z".to_string();
        let json = serde_json::to_string(&config).unwrap();
        assert_eq!(EditorConfig::from_json_str(&json).unwrap(), config);
    }

    #[test]
    fn malformed_json_is_a_serialization_error() {
        let err = EditorConfig::from_json_str("{").unwrap_err();
        assert!(matches!(err, SkeletalError::SerializationError { .. }));
    }
}
