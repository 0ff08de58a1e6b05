//! Bone animation groups: nine tracks under one bone name.

use serde::{Deserialize, Serialize};

use crate::ids::GroupId;
use crate::track::{Track, TrackChannel, TrackTriple};

/// The named track collection of one bone.
///
/// Deserialized collections always come out with every track named and
/// converted for its channel, whatever the input said about them.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(from = "BoneAnimDataRepr")]
pub struct BoneAnimData {
    pub name: String,
    pub translate: TrackTriple,
    pub rotate: TrackTriple,
    pub scale: TrackTriple,
}

#[derive(Deserialize)]
struct BoneAnimDataRepr {
    name: String,
    #[serde(default)]
    translate: TrackTriple,
    #[serde(default)]
    rotate: TrackTriple,
    #[serde(default)]
    scale: TrackTriple,
}

impl From<BoneAnimDataRepr> for BoneAnimData {
    fn from(repr: BoneAnimDataRepr) -> Self {
        let mut data = Self {
            name: repr.name,
            translate: repr.translate,
            rotate: repr.rotate,
            scale: repr.scale,
        };
        data.assign_channels();
        data
    }
}

impl BoneAnimData {
    /// Create an empty track collection with every track named after its channel.
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            translate: Self::default_translate(),
            rotate: Self::default_rotate(),
            scale: Self::default_scale(),
        }
    }

    fn default_translate() -> TrackTriple {
        TrackTriple::for_channels(
            TrackChannel::TranslateX,
            TrackChannel::TranslateY,
            TrackChannel::TranslateZ,
        )
    }

    fn default_rotate() -> TrackTriple {
        TrackTriple::for_channels(
            TrackChannel::RotateX,
            TrackChannel::RotateY,
            TrackChannel::RotateZ,
        )
    }

    fn default_scale() -> TrackTriple {
        TrackTriple::for_channels(
            TrackChannel::ScaleX,
            TrackChannel::ScaleY,
            TrackChannel::ScaleZ,
        )
    }

    /// Give every track the name and display conversion of its channel.
    pub fn assign_channels(&mut self) {
        for channel in TrackChannel::ALL {
            let track = self.track_mut(channel);
            track.name = channel.label().to_string();
            track.conversion = channel.conversion();
        }
    }

    /// Get the track on a channel
    pub fn track(&self, channel: TrackChannel) -> &Track {
        match channel {
            TrackChannel::TranslateX => &self.translate.x,
            TrackChannel::TranslateY => &self.translate.y,
            TrackChannel::TranslateZ => &self.translate.z,
            TrackChannel::RotateX => &self.rotate.x,
            TrackChannel::RotateY => &self.rotate.y,
            TrackChannel::RotateZ => &self.rotate.z,
            TrackChannel::ScaleX => &self.scale.x,
            TrackChannel::ScaleY => &self.scale.y,
            TrackChannel::ScaleZ => &self.scale.z,
        }
    }

    /// Get a mutable reference to the track on a channel
    pub fn track_mut(&mut self, channel: TrackChannel) -> &mut Track {
        match channel {
            TrackChannel::TranslateX => &mut self.translate.x,
            TrackChannel::TranslateY => &mut self.translate.y,
            TrackChannel::TranslateZ => &mut self.translate.z,
            TrackChannel::RotateX => &mut self.rotate.x,
            TrackChannel::RotateY => &mut self.rotate.y,
            TrackChannel::RotateZ => &mut self.rotate.z,
            TrackChannel::ScaleX => &mut self.scale.x,
            TrackChannel::ScaleY => &mut self.scale.y,
            TrackChannel::ScaleZ => &mut self.scale.z,
        }
    }
}

/// The most granular animatable unit: one bone and its nine tracks.
///
/// Names must be unique within an animation, but that is only enforced when
/// the user renames a group; construction may produce a duplicate.
///
/// `name` and `data.name` always agree. On load the group name wins.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(from = "BoneAnimGroupRepr")]
pub struct BoneAnimGroup {
    #[serde(skip)]
    pub id: GroupId,
    pub name: String,
    pub data: BoneAnimData,
}

#[derive(Deserialize)]
struct BoneAnimGroupRepr {
    name: String,
    data: BoneAnimData,
}

impl From<BoneAnimGroupRepr> for BoneAnimGroup {
    fn from(repr: BoneAnimGroupRepr) -> Self {
        let mut group = Self::from_data(repr.data);
        group.set_name(&repr.name);
        group
    }
}

impl BoneAnimGroup {
    pub fn new(name: impl Into<String>) -> Self {
        let name = name.into();
        Self {
            id: GroupId::new(),
            data: BoneAnimData::new(name.clone()),
            name,
        }
    }

    /// Wrap an existing track collection, taking the group name from it.
    pub fn from_data(data: BoneAnimData) -> Self {
        Self {
            id: GroupId::new(),
            name: data.name.clone(),
            data,
        }
    }

    /// Set both the group name and its track collection's name.
    pub(crate) fn set_name(&mut self, name: &str) {
        self.data.name = name.to_string();
        self.name = name.to_string();
    }

    #[inline]
    pub fn translate(&self) -> &TrackTriple {
        &self.data.translate
    }

    #[inline]
    pub fn rotate(&self) -> &TrackTriple {
        &self.data.rotate
    }

    #[inline]
    pub fn scale(&self) -> &TrackTriple {
        &self.data.scale
    }

    /// Iterate the nine tracks in channel order.
    pub fn tracks(&self) -> impl Iterator<Item = (TrackChannel, &Track)> {
        TrackChannel::ALL
            .into_iter()
            .map(move |channel| (channel, self.data.track(channel)))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::track::DisplayConversion;

    #[test]
    fn new_group_names_tracks_and_collection() {
        let group = BoneAnimGroup::new("Spine");
        assert_eq!(group.name, "Spine");
        assert_eq!(group.data.name, "Spine");
        let names: Vec<&str> = group.tracks().map(|(_, t)| t.name.as_str()).collect();
        assert_eq!(names[3], "Rotate.X");
        assert_eq!(names.len(), 9);
    }

    #[test]
    fn rotate_tracks_use_degrees() {
        let group = BoneAnimGroup::new("Arm");
        for track in group.rotate().tracks() {
            assert_eq!(track.conversion, DisplayConversion::RadiansToDegrees);
        }
        for track in group.translate().tracks().into_iter().chain(group.scale().tracks()) {
            assert_eq!(track.conversion, DisplayConversion::None);
        }
    }

    #[test]
    fn deserialized_group_gets_fresh_identity() {
        let json = r#"{"name":"Hip","data":{"name":"Hip"}}"#;
        let a: BoneAnimGroup = serde_json::from_str(json).unwrap();
        let b: BoneAnimGroup = serde_json::from_str(json).unwrap();
        assert_ne!(a.id, b.id);
        assert_eq!(a.data.scale.z.name, "Scale.Z");
    }

    #[test]
    fn from_data_takes_the_collection_name() {
        let mut data = BoneAnimData::new("Tail");
        data.scale.x.push_keyframe(0.0, 1.0);
        let group = BoneAnimGroup::from_data(data);
        assert_eq!(group.name, "Tail");
        assert_eq!(group.scale().x.keyframes.len(), 1);
    }

    #[test]
    fn loaded_group_name_overrides_collection_name() {
        let json = r#"{"name":"Hip","data":{"name":"Pelvis"}}"#;
        let group: BoneAnimGroup = serde_json::from_str(json).unwrap();
        assert_eq!(group.name, "Hip");
        assert_eq!(group.data.name, "Hip");
    }

    #[test]
    fn partial_triples_are_completed_on_load() {
        let json = r#"{
            "name": "Hip",
            "data": {
                "name": "Hip",
                "rotate": { "y": { "keyframes": [{ "time": 0.0, "value": 0.5 }] } }
            }
        }"#;
        let group: BoneAnimGroup = serde_json::from_str(json).unwrap();
        assert_eq!(group.data.rotate.x.name, "Rotate.X");
        assert_eq!(group.data.rotate.x.conversion, DisplayConversion::RadiansToDegrees);
        assert_eq!(group.data.rotate.y.keyframes.len(), 1);
        assert_eq!(group.data.translate.z.conversion, DisplayConversion::None);
    }
}
