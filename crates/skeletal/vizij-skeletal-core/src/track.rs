//! Scalar keyframe tracks and the fixed X/Y/Z triples bone groups are made of.

use serde::{Deserialize, Serialize};

/// A single keyframe on a scalar track.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Keyframe {
    pub time: f32,
    pub value: f32,
}

impl Keyframe {
    #[inline]
    pub fn new(time: f32, value: f32) -> Self {
        Self { time, value }
    }
}

/// Presentation transform applied when a track's values are shown to the user.
///
/// Stored values are never altered by the conversion.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
pub enum DisplayConversion {
    #[default]
    None,
    /// Values are stored in radians and displayed in degrees.
    RadiansToDegrees,
}

impl DisplayConversion {
    /// Convert a stored value to the value shown in the editor.
    #[inline]
    pub fn to_display(self, stored: f32) -> f32 {
        match self {
            Self::None => stored,
            Self::RadiansToDegrees => stored.to_degrees(),
        }
    }

    /// Convert a value typed in the editor back to its stored form.
    #[inline]
    pub fn to_stored(self, displayed: f32) -> f32 {
        match self {
            Self::None => displayed,
            Self::RadiansToDegrees => displayed.to_radians(),
        }
    }
}

/// One animatable axis of a bone: Translate/Rotate/Scale times X/Y/Z.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum TrackChannel {
    TranslateX,
    TranslateY,
    TranslateZ,
    RotateX,
    RotateY,
    RotateZ,
    ScaleX,
    ScaleY,
    ScaleZ,
}

impl TrackChannel {
    /// All channels in the order they appear under a bone group node.
    pub const ALL: [TrackChannel; 9] = [
        Self::TranslateX,
        Self::TranslateY,
        Self::TranslateZ,
        Self::RotateX,
        Self::RotateY,
        Self::RotateZ,
        Self::ScaleX,
        Self::ScaleY,
        Self::ScaleZ,
    ];

    /// Label used as the track name and as the track node header.
    #[inline]
    pub fn label(self) -> &'static str {
        match self {
            Self::TranslateX => "Translate.X",
            Self::TranslateY => "Translate.Y",
            Self::TranslateZ => "Translate.Z",
            Self::RotateX => "Rotate.X",
            Self::RotateY => "Rotate.Y",
            Self::RotateZ => "Rotate.Z",
            Self::ScaleX => "Scale.X",
            Self::ScaleY => "Scale.Y",
            Self::ScaleZ => "Scale.Z",
        }
    }

    #[inline]
    pub fn is_rotation(self) -> bool {
        matches!(self, Self::RotateX | Self::RotateY | Self::RotateZ)
    }

    /// Display conversion the track on this channel uses.
    #[inline]
    pub fn conversion(self) -> DisplayConversion {
        if self.is_rotation() {
            DisplayConversion::RadiansToDegrees
        } else {
            DisplayConversion::None
        }
    }
}

impl std::fmt::Display for TrackChannel {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.label())
    }
}

/// An animatable scalar channel holding keyframes in temporal order.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct Track {
    /// Axis label, e.g. "Rotate.X". Assigned by the owning group.
    #[serde(default)]
    pub name: String,
    #[serde(default)]
    pub keyframes: Vec<Keyframe>,
    #[serde(default)]
    pub conversion: DisplayConversion,
}

impl Track {
    /// Create an empty track for the given channel.
    #[inline]
    pub fn for_channel(channel: TrackChannel) -> Self {
        Self {
            name: channel.label().to_string(),
            keyframes: Vec::new(),
            conversion: channel.conversion(),
        }
    }

    /// Append a keyframe. Callers keep keyframes in temporal order.
    #[inline]
    pub fn push_keyframe(&mut self, time: f32, value: f32) {
        self.keyframes.push(Keyframe::new(time, value));
    }

    /// A track with more than one keyframe actually varies over time.
    #[inline]
    pub fn is_animated(&self) -> bool {
        self.keyframes.len() > 1
    }

    #[inline]
    pub fn display_value(&self, stored: f32) -> f32 {
        self.conversion.to_display(stored)
    }

    #[inline]
    pub fn stored_value(&self, displayed: f32) -> f32 {
        self.conversion.to_stored(displayed)
    }

    /// Keyframe values as the editor shows them.
    pub fn display_keyframes(&self) -> Vec<Keyframe> {
        self.keyframes
            .iter()
            .map(|k| Keyframe::new(k.time, self.display_value(k.value)))
            .collect()
    }
}

/// Exactly three tracks, one per axis.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct TrackTriple {
    #[serde(default)]
    pub x: Track,
    #[serde(default)]
    pub y: Track,
    #[serde(default)]
    pub z: Track,
}

impl TrackTriple {
    /// Build a triple from the X, Y and Z channels of one transform component.
    pub fn for_channels(x: TrackChannel, y: TrackChannel, z: TrackChannel) -> Self {
        Self {
            x: Track::for_channel(x),
            y: Track::for_channel(y),
            z: Track::for_channel(z),
        }
    }

    #[inline]
    pub fn tracks(&self) -> [&Track; 3] {
        [&self.x, &self.y, &self.z]
    }

    /// Whether any axis has more than one keyframe.
    #[inline]
    pub fn is_animated(&self) -> bool {
        self.tracks().iter().any(|t| t.is_animated())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn channel_order_and_labels() {
        let labels: Vec<&str> = TrackChannel::ALL.iter().map(|c| c.label()).collect();
        assert_eq!(
            labels,
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
    }

    #[test]
    fn only_rotation_channels_convert_to_degrees() {
        for channel in TrackChannel::ALL {
            let expected = if channel.is_rotation() {
                DisplayConversion::RadiansToDegrees
            } else {
                DisplayConversion::None
            };
            assert_eq!(channel.conversion(), expected, "{channel}");
        }
    }

    #[test]
    fn conversion_does_not_touch_stored_values() {
        let mut track = Track::for_channel(TrackChannel::RotateY);
        track.push_keyframe(0.0, std::f32::consts::PI);
        let shown = track.display_keyframes();
        assert!((shown[0].value - 180.0).abs() < 1e-4);
        assert_eq!(track.keyframes[0].value, std::f32::consts::PI);
        assert!((track.stored_value(90.0) - std::f32::consts::FRAC_PI_2).abs() < 1e-6);
    }

    #[test]
    fn animated_needs_more_than_one_keyframe() {
        let mut triple = TrackTriple::for_channels(
            TrackChannel::ScaleX,
            TrackChannel::ScaleY,
            TrackChannel::ScaleZ,
        );
        triple.y.push_keyframe(0.0, 1.0);
        assert!(!triple.is_animated());
        triple.y.push_keyframe(10.0, 2.0);
        assert!(triple.is_animated());
    }
}
